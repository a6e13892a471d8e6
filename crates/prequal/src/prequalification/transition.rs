use std::fmt;

use super::domain::PrequalificationStatus;

/// Decides whether a response may move from its current status to a requested one.
///
/// `current` is `None` when the pair has no response yet.
pub trait TransitionPolicy: Send + Sync {
    fn check(
        &self,
        current: Option<PrequalificationStatus>,
        next: PrequalificationStatus,
    ) -> Result<(), TransitionRejected>;
}

/// Any status may follow any other, including re-opening a rejected contractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenTransitions;

impl TransitionPolicy for OpenTransitions {
    fn check(
        &self,
        _current: Option<PrequalificationStatus>,
        _next: PrequalificationStatus,
    ) -> Result<(), TransitionRejected> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRejected {
    pub from: Option<PrequalificationStatus>,
    pub to: PrequalificationStatus,
}

impl fmt::Display for TransitionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(
                f,
                "status change from {} to {} is not permitted",
                from.label(),
                self.to.label()
            ),
            None => write!(
                f,
                "a new response cannot start as {}",
                self.to.label()
            ),
        }
    }
}

impl std::error::Error for TransitionRejected {}
