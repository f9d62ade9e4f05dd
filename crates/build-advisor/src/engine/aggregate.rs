use super::types::{ScoreBreakdown, StageScore};

/// Sum stage outputs for a single candidate.
///
/// Categories no stage reported stay absent, which keeps "no opinion" distinct
/// from an explicit zero. The sums do not depend on stage order.
pub fn aggregate_stage_scores(stage_scores: &[StageScore]) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    for stage in stage_scores {
        breakdown.total += stage.total;

        for (category, contribution) in &stage.by_category {
            if contribution.is_finite() {
                *breakdown.by_category.entry(*category).or_insert(0.0) += contribution;
            }
        }
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::ScoreCategory;

    fn stage(id: &str, total: f64, categories: &[(ScoreCategory, f64)]) -> StageScore {
        StageScore {
            stage_id: id.to_string(),
            by_category: categories.iter().copied().collect(),
            total,
            reasons: vec![format!("{id} reason")],
        }
    }

    #[test]
    fn sums_totals_and_shared_categories() {
        let scores = vec![
            stage("a", 12.0, &[(ScoreCategory::Damage, 10.0), (ScoreCategory::Economy, 2.0)]),
            stage("b", -3.0, &[(ScoreCategory::Damage, -3.0)]),
            stage("c", 0.5, &[]),
        ];

        let breakdown = aggregate_stage_scores(&scores);

        assert_eq!(breakdown.total, 9.5);
        assert_eq!(breakdown.by_category.get(&ScoreCategory::Damage), Some(&7.0));
        assert_eq!(breakdown.by_category.get(&ScoreCategory::Economy), Some(&2.0));
        assert!(!breakdown.by_category.contains_key(&ScoreCategory::Mobility));
    }

    #[test]
    fn reported_zero_differs_from_absent() {
        let scores = vec![stage("a", 0.0, &[(ScoreCategory::Utility, 0.0)])];

        let breakdown = aggregate_stage_scores(&scores);

        assert_eq!(breakdown.by_category.get(&ScoreCategory::Utility), Some(&0.0));
        assert_eq!(breakdown.by_category.len(), 1);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let breakdown = aggregate_stage_scores(&[]);

        assert_eq!(breakdown.total, 0.0);
        assert!(breakdown.by_category.is_empty());
    }
}
