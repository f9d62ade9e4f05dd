use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{BuildItem, HeroBuild, HeroId, RecommendationRequest};
use super::repository::{BuildRepository, BuildStoreError};
use crate::catalog::candidates_from_catalog;
use crate::config::EngineConfig;
use crate::engine::{EngineInput, EngineOutput, StagePipeline};

/// Request handling knobs layered on top of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisorSettings {
    /// Drop candidates the hero already owns before scoring.
    pub exclude_owned_items: bool,
    /// Truncate ranked lists to this many entries.
    pub result_limit: Option<usize>,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            exclude_owned_items: true,
            result_limit: None,
        }
    }
}

/// Service composing the build store with the scoring pipeline.
pub struct AdvisorService<R> {
    builds: Arc<R>,
    pipeline: Arc<StagePipeline>,
    settings: AdvisorSettings,
}

impl<R> AdvisorService<R>
where
    R: BuildRepository + 'static,
{
    pub fn new(builds: Arc<R>, pipeline: StagePipeline, settings: AdvisorSettings) -> Self {
        Self {
            builds,
            pipeline: Arc::new(pipeline),
            settings,
        }
    }

    pub fn from_config(builds: Arc<R>, config: &EngineConfig) -> Self {
        let settings = AdvisorSettings {
            exclude_owned_items: config.exclude_owned_items,
            result_limit: config.result_limit,
        };
        Self::new(builds, StagePipeline::from_kinds(&config.stages), settings)
    }

    pub fn settings(&self) -> AdvisorSettings {
        self.settings
    }

    pub fn pipeline(&self) -> &StagePipeline {
        &self.pipeline
    }

    /// Score and rank the request's candidates for the hero's intent.
    pub fn recommend(&self, request: RecommendationRequest) -> Result<EngineOutput, AdvisorError> {
        let RecommendationRequest {
            hero_id,
            intent,
            current_items,
            match_context,
            candidates,
            stages,
        } = request;

        let current_items = match current_items {
            Some(items) => items,
            None => self
                .builds
                .load(&hero_id)?
                .map(|build| build.item_ids())
                .unwrap_or_default(),
        };

        let mut candidates = candidates_from_catalog(candidates);
        let offered = candidates.len();
        if self.settings.exclude_owned_items && !current_items.is_empty() {
            let owned: HashSet<&str> = current_items.iter().map(String::as_str).collect();
            candidates.retain(|candidate| !owned.contains(candidate.item_id.as_str()));
        }

        let input = EngineInput {
            hero_id: hero_id.0.clone(),
            intent,
            current_items,
            match_context,
        };

        let mut output = match stages {
            Some(kinds) => StagePipeline::from_kinds(&kinds).recommend(&input, &candidates),
            None => self.pipeline.recommend(&input, &candidates),
        };

        if let Some(limit) = self.settings.result_limit {
            output.recommendations.truncate(limit);
        }

        debug!(
            hero_id = %hero_id.0,
            offered,
            scored = candidates.len(),
            returned = output.recommendations.len(),
            "recommendations ranked"
        );

        Ok(output)
    }

    /// Current build for the hero, empty when nothing has been saved.
    pub fn build(&self, hero_id: &HeroId) -> Result<HeroBuild, AdvisorError> {
        let build = self
            .builds
            .load(hero_id)?
            .unwrap_or_else(|| HeroBuild::empty(hero_id.clone()));
        Ok(build)
    }

    /// Append an item unless the build already holds it.
    pub fn add_item(&self, hero_id: &HeroId, item: BuildItem) -> Result<HeroBuild, AdvisorError> {
        let id = item.id.trim().to_string();
        if id.is_empty() {
            return Err(AdvisorError::InvalidBuildItem);
        }

        let mut build = self.build(hero_id)?;
        if build.contains(&id) {
            return Ok(build);
        }

        build.items.push(BuildItem { id, name: item.name });
        build.updated_at = Some(Utc::now());
        self.builds.save(build.clone())?;

        info!(hero_id = %hero_id.0, items = build.items.len(), "build item added");
        Ok(build)
    }

    pub fn remove_item(&self, hero_id: &HeroId, item_id: &str) -> Result<HeroBuild, AdvisorError> {
        let item_id = item_id.trim();
        let mut build = self.build(hero_id)?;
        let before = build.items.len();
        build.items.retain(|item| item.id != item_id);

        if build.items.len() != before {
            build.updated_at = Some(Utc::now());
            self.builds.save(build.clone())?;
            info!(hero_id = %hero_id.0, item_id, "build item removed");
        }

        Ok(build)
    }

    pub fn clear_build(&self, hero_id: &HeroId) -> Result<HeroBuild, AdvisorError> {
        match self.builds.delete(hero_id) {
            Ok(()) | Err(BuildStoreError::NotFound) => {}
            Err(err) => return Err(err.into()),
        }

        info!(hero_id = %hero_id.0, "build cleared");
        Ok(HeroBuild::empty(hero_id.clone()))
    }
}

/// Error raised by the advisor service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("build item requires a non-empty id")]
    InvalidBuildItem,
    #[error(transparent)]
    Build(#[from] BuildStoreError),
}
