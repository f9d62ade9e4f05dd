use super::domain::{HeroBuild, HeroId};

/// Storage abstraction for per-hero build lists.
pub trait BuildRepository: Send + Sync {
    fn load(&self, hero_id: &HeroId) -> Result<Option<HeroBuild>, BuildStoreError>;
    fn save(&self, build: HeroBuild) -> Result<(), BuildStoreError>;
    fn delete(&self, hero_id: &HeroId) -> Result<(), BuildStoreError>;
}

/// Error enumeration for build store failures.
#[derive(Debug, thiserror::Error)]
pub enum BuildStoreError {
    #[error("build not found")]
    NotFound,
    #[error("build store unavailable: {0}")]
    Unavailable(String),
}
