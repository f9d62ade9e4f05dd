//! Hero build lists and the recommendation service built on the engine.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{BuildItem, HeroBuild, HeroId, RecommendationRequest};
pub use repository::{BuildRepository, BuildStoreError};
pub use router::advisor_router;
pub use service::{AdvisorError, AdvisorService, AdvisorSettings};
