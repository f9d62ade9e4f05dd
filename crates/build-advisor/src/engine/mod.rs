//! Deterministic item scoring and ranking.
//!
//! The engine normalizes the caller's intent once, runs every stage in the
//! supplied order against each candidate, aggregates the stage outputs, and
//! returns the candidates in a strict total order. It performs no I/O and
//! holds no state between calls.

mod aggregate;
mod intent;
mod rank;
mod stage;
pub mod stages;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::aggregate_stage_scores;
pub use intent::{dominant_intent, normalize_intent};
pub use rank::{compare_recommendations, rank};
pub use stage::{ScoringStage, StageKind, StagePipeline, UnknownStageKind};
pub use stages::{BaseCategoryStage, IntentTagBonusStage};
pub use types::{
    EngineInput, EngineOutput, IntentKey, IntentWeights, ItemCandidate, ItemRecommendation,
    MatchContextValue, ScoreBreakdown, ScoreCategory, StageScore,
};

/// Schema version stamped on every [`EngineOutput`].
pub const ENGINE_SCHEMA_VERSION: u32 = 1;

/// Score and rank `candidates` for the intent carried by `input`.
///
/// Empty candidate lists yield no recommendations; an empty stage list scores
/// everything at zero so ordering falls back to cost and then item id.
pub fn recommend(
    input: &EngineInput,
    candidates: &[ItemCandidate],
    stages: &[&dyn ScoringStage],
) -> EngineOutput {
    let normalized_intent = normalize_intent(&input.intent);
    let scoped = EngineInput {
        intent: normalized_intent.clone(),
        ..input.clone()
    };

    let mut recommendations: Vec<ItemRecommendation> = candidates
        .iter()
        .map(|candidate| {
            let stage_scores: Vec<StageScore> = stages
                .iter()
                .map(|stage| stage.score(&scoped, candidate))
                .collect();
            let breakdown = aggregate_stage_scores(&stage_scores);
            let reasons = stage_scores
                .iter()
                .flat_map(|score| score.reasons.iter().cloned())
                .collect();

            ItemRecommendation {
                item: candidate.clone(),
                final_score: breakdown.total,
                breakdown,
                stage_scores,
                reasons,
            }
        })
        .collect();

    rank(&mut recommendations);

    EngineOutput {
        version: ENGINE_SCHEMA_VERSION,
        normalized_intent,
        recommendations,
    }
}
