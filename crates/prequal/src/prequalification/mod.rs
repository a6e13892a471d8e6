//! Capability matching and the prequalification decision workflow.
//!
//! [`PrequalificationService::match_contractors`] ranks contractors for a project from its
//! requirement rows, and [`PrequalificationService::upsert`] records one decision per
//! (project, contractor) pair, overwriting it in place on later calls.

pub mod domain;
pub mod matching;
pub mod repository;
pub mod router;
pub mod service;
pub mod transition;

#[cfg(test)]
mod tests;

pub use domain::{Decision, NewResponse, PrequalificationResponse, PrequalificationStatus};
pub use matching::{ContractorMatch, MatchingEngine};
pub use repository::PrequalificationRepository;
pub use router::prequalification_router;
pub use service::{CandidateView, PrequalificationError, PrequalificationService};
pub use transition::{OpenTransitions, TransitionPolicy, TransitionRejected};
