use std::sync::Mutex;

use super::common::*;
use crate::engine::{
    recommend, EngineInput, IntentKey, IntentWeights, ItemCandidate, ScoreCategory, ScoringStage,
    StageKind, StagePipeline, StageScore,
};

/// Rewards cheap items; used to prove the orchestrator accepts foreign stages.
struct CostEfficiencyStage;

impl ScoringStage for CostEfficiencyStage {
    fn stage_id(&self) -> &str {
        "costEfficiencyStage"
    }

    fn score(&self, _input: &EngineInput, candidate: &ItemCandidate) -> StageScore {
        let mut score = StageScore::empty(self.stage_id());
        if candidate.cost > 0.0 {
            score.total = 1000.0 / candidate.cost;
            score.by_category.insert(ScoreCategory::Economy, score.total);
            score.reasons.push(format!("efficiency {:.3}", score.total));
        }
        score
    }
}

/// Captures the intent each stage invocation observes.
#[derive(Default)]
struct IntentProbe {
    seen: Mutex<Vec<IntentWeights>>,
}

impl ScoringStage for IntentProbe {
    fn stage_id(&self) -> &str {
        "intentProbe"
    }

    fn score(&self, input: &EngineInput, _candidate: &ItemCandidate) -> StageScore {
        self.seen
            .lock()
            .expect("probe mutex poisoned")
            .push(input.intent.clone());
        StageScore::empty(self.stage_id())
    }
}

#[test]
fn custom_stages_join_the_pipeline() {
    let pipeline = StagePipeline::standard().with_stage(Box::new(CostEfficiencyStage));

    let output = pipeline.recommend(&input_for(IntentKey::Burst), &mini_catalog());

    assert_eq!(
        pipeline.stage_ids(),
        vec!["baseCategoryStage", "intentWeightStage", "costEfficiencyStage"]
    );
    let top = &output.recommendations[0];
    assert_eq!(top.item.item_id, "item_a");
    assert_eq!(top.stage_scores.len(), 3);
    let economy = top
        .breakdown
        .by_category
        .get(&ScoreCategory::Economy)
        .copied()
        .expect("economy reported by efficiency stage");
    assert!((economy - 1000.0 / 3000.0).abs() < 1e-12);
}

#[test]
fn stages_observe_normalized_intent() {
    let probe = IntentProbe::default();
    let intent = IntentWeights::new()
        .with(IntentKey::Burst, 2.0)
        .with(IntentKey::Tank, 6.0);
    let input = EngineInput::new("hero_test", intent);

    let stages: [&dyn ScoringStage; 1] = [&probe];
    let output = recommend(&input, &mini_catalog(), &stages);

    let seen = probe.seen.lock().expect("probe mutex poisoned");
    assert_eq!(seen.len(), 4);
    for observed in seen.iter() {
        assert_eq!(observed, &output.normalized_intent);
        assert_eq!(observed.raw(IntentKey::Tank), Some(0.75));
    }
    assert_eq!(input.intent.raw(IntentKey::Tank), Some(6.0));
}

#[test]
fn stage_kinds_parse_and_build() {
    assert_eq!("base_category".parse::<StageKind>(), Ok(StageKind::BaseCategory));
    assert_eq!(
        " Intent-Tag-Bonus ".parse::<StageKind>(),
        Ok(StageKind::IntentTagBonus)
    );
    assert_eq!(
        "intentWeightStage".parse::<StageKind>(),
        Ok(StageKind::IntentTagBonus)
    );
    assert!("economy_boost".parse::<StageKind>().is_err());

    let pipeline = StagePipeline::from_kinds(&[StageKind::IntentTagBonus]);
    assert_eq!(pipeline.stage_ids(), vec!["intentWeightStage"]);
    assert_eq!(StageKind::BaseCategory.build().stage_id(), "baseCategoryStage");
}

#[test]
fn pipeline_matches_direct_engine_call() {
    let input = even_input();
    let catalog = mini_catalog();

    let via_pipeline = StagePipeline::standard().recommend(&input, &catalog);
    let direct = recommend(&input, &catalog, &standard_stages());

    assert_eq!(via_pipeline, direct);
}
