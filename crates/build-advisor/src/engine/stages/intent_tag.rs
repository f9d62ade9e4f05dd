//! Additive bonus for items whose tags echo the dominant intent.

use crate::engine::intent::dominant_intent;
use crate::engine::stage::ScoringStage;
use crate::engine::types::{EngineInput, ItemCandidate, StageScore};

pub(crate) const STAGE_ID: &str = "intentWeightStage";

/// Score added per matching tag, before scaling by the dominant weight.
pub const TAG_BONUS_PER_MATCH: f64 = 0.05;

/// Matches beyond this count are ignored.
pub const MAX_TAGS_SCORED: usize = 3;

/// Bounded bonus for thematic alignment with the single dominant intent.
///
/// The bonus never attributes to a category, so breakdowns stay purely
/// stat-driven, and an item without matching tags scores zero rather than a
/// penalty.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentTagBonusStage;

impl ScoringStage for IntentTagBonusStage {
    fn stage_id(&self) -> &str {
        STAGE_ID
    }

    fn score(&self, input: &EngineInput, candidate: &ItemCandidate) -> StageScore {
        let (dominant, dominant_weight) = dominant_intent(&input.intent);
        let candidate_tags: Vec<String> = candidate
            .tags
            .iter()
            .map(|tag| tag.to_lowercase())
            .collect();

        let matched: Vec<&str> = dominant
            .vocabulary()
            .iter()
            .copied()
            .filter(|tag| candidate_tags.iter().any(|own| own == tag))
            .take(MAX_TAGS_SCORED)
            .collect();

        let mut score = StageScore::empty(STAGE_ID);

        if matched.is_empty() {
            score.reasons.push(format!(
                "no tag match for dominant intent: {}",
                dominant.label()
            ));
            return score;
        }

        // Fail-open intents can carry a negative dominant weight.
        let weight = dominant_weight.max(0.0);
        let bonus = TAG_BONUS_PER_MATCH * matched.len() as f64 * weight;

        score.total = bonus;
        score.reasons.push(format!(
            "dominant intent: {} (weight {:.3})",
            dominant.label(),
            weight
        ));
        score.reasons.push(format!(
            "matched tags [{}]: {} × {} × {:.3} = {:.4}",
            matched.join(", "),
            matched.len(),
            TAG_BONUS_PER_MATCH,
            weight,
            bonus
        ));
        score
    }
}
