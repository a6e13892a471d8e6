//! Integer identifiers assigned by the store when a row is created.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier for developers and contractors alike.
    CompanyId
);
record_id!(CapabilityId);
record_id!(
    /// Identifier of a single company capability profile row.
    CompanyCapabilityId
);
record_id!(ProjectId);
record_id!(
    /// Identifier of a project requirement row. Duplicate capability rows get distinct ids.
    RequirementId
);
record_id!(ResponseId);
