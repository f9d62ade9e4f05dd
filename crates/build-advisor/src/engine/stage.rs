use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::stages::{BaseCategoryStage, IntentTagBonusStage};
use super::types::{EngineInput, EngineOutput, ItemCandidate, StageScore};

/// Single scoring unit in the recommendation pipeline.
///
/// Implementations must be pure: the same input and candidate always produce
/// the same score, with no clock, randomness, or shared state involved.
pub trait ScoringStage: Send + Sync {
    fn stage_id(&self) -> &str;

    fn score(&self, input: &EngineInput, candidate: &ItemCandidate) -> StageScore;
}

/// Built-in stages addressable from configuration and request payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    BaseCategory,
    IntentTagBonus,
}

impl StageKind {
    pub const DEFAULT_PIPELINE: [StageKind; 2] = [StageKind::BaseCategory, StageKind::IntentTagBonus];

    pub fn label(self) -> &'static str {
        match self {
            StageKind::BaseCategory => "base_category",
            StageKind::IntentTagBonus => "intent_tag_bonus",
        }
    }

    pub fn build(self) -> Box<dyn ScoringStage> {
        match self {
            StageKind::BaseCategory => Box::new(BaseCategoryStage),
            StageKind::IntentTagBonus => Box::new(IntentTagBonusStage),
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStageKind(pub String);

impl fmt::Display for UnknownStageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scoring stage '{}'", self.0)
    }
}

impl std::error::Error for UnknownStageKind {}

impl FromStr for StageKind {
    type Err = UnknownStageKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "base_category" | "basecategorystage" => Ok(StageKind::BaseCategory),
            "intent_tag_bonus" | "intent_weight" | "intentweightstage" => {
                Ok(StageKind::IntentTagBonus)
            }
            _ => Err(UnknownStageKind(value.trim().to_string())),
        }
    }
}

/// Owned, ordered list of stages that can be shared across requests.
pub struct StagePipeline {
    stages: Vec<Box<dyn ScoringStage>>,
}

impl StagePipeline {
    pub fn new(stages: Vec<Box<dyn ScoringStage>>) -> Self {
        Self { stages }
    }

    pub fn from_kinds(kinds: &[StageKind]) -> Self {
        Self::new(kinds.iter().map(|kind| kind.build()).collect())
    }

    pub fn standard() -> Self {
        Self::from_kinds(&StageKind::DEFAULT_PIPELINE)
    }

    pub fn with_stage(mut self, stage: Box<dyn ScoringStage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_ids(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.stage_id()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn recommend(&self, input: &EngineInput, candidates: &[ItemCandidate]) -> EngineOutput {
        let stages: Vec<&dyn ScoringStage> = self.stages.iter().map(|stage| stage.as_ref()).collect();
        super::recommend(input, candidates, &stages)
    }
}

impl Default for StagePipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for StagePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagePipeline")
            .field("stages", &self.stage_ids())
            .finish()
    }
}
