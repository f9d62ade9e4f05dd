//! Stat-driven dot product between item category values and player intent.

use std::collections::BTreeMap;

use crate::engine::stage::ScoringStage;
use crate::engine::types::{EngineInput, IntentKey, ItemCandidate, ScoreCategory, StageScore};

pub(crate) const STAGE_ID: &str = "baseCategoryStage";

/// Weighted sum of category values against the normalized intent.
///
/// Economy has no intent axis and is always credited at full weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseCategoryStage;

impl BaseCategoryStage {
    fn effective_weight(input: &EngineInput, category: ScoreCategory) -> f64 {
        if category == ScoreCategory::Economy {
            return 1.0;
        }

        IntentKey::ALL
            .iter()
            .filter(|key| key.target_category() == category)
            .map(|key| input.intent.weight(*key))
            .sum()
    }
}

impl ScoringStage for BaseCategoryStage {
    fn stage_id(&self) -> &str {
        STAGE_ID
    }

    fn score(&self, input: &EngineInput, candidate: &ItemCandidate) -> StageScore {
        let mut by_category = BTreeMap::new();
        let mut reasons = Vec::new();
        let mut total = 0.0;

        for category in ScoreCategory::ALL {
            let raw_value = candidate.category_value(category);
            if !raw_value.is_finite() || raw_value == 0.0 {
                continue;
            }

            let weight = Self::effective_weight(input, category);
            if weight == 0.0 {
                continue;
            }

            let contribution = raw_value * weight;
            by_category.insert(category, contribution);
            total += contribution;

            reasons.push(format!(
                "{}: {:.2} × {:.3} = {:.3}",
                category.label(),
                raw_value,
                weight,
                contribution
            ));
        }

        StageScore {
            stage_id: STAGE_ID.to_string(),
            by_category,
            total,
            reasons,
        }
    }
}
