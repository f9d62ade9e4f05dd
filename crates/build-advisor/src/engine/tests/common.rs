use crate::engine::{
    EngineInput, IntentKey, IntentWeights, ItemCandidate, ScoreCategory, ScoringStage,
    BaseCategoryStage, IntentTagBonusStage,
};

pub(super) static BASE: BaseCategoryStage = BaseCategoryStage;
pub(super) static TAGS: IntentTagBonusStage = IntentTagBonusStage;

pub(super) fn standard_stages() -> Vec<&'static dyn ScoringStage> {
    let stages: [&'static dyn ScoringStage; 2] = [&BASE, &TAGS];
    stages.to_vec()
}

fn candidate(
    item_id: &str,
    name: &str,
    cost: f64,
    values: &[(ScoreCategory, f64)],
    tags: &[&str],
) -> ItemCandidate {
    ItemCandidate {
        item_id: item_id.to_string(),
        name: name.to_string(),
        cost,
        category_values: values.iter().copied().collect(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

pub(super) fn mini_catalog() -> Vec<ItemCandidate> {
    use ScoreCategory::*;

    vec![
        candidate(
            "item_a",
            "Burst Blade",
            3000.0,
            &[(Damage, 80.0), (Survivability, 10.0), (Mobility, 5.0)],
            &["burst", "damage"],
        ),
        candidate(
            "item_b",
            "Tank Shield",
            2800.0,
            &[(Damage, 10.0), (Survivability, 90.0)],
            &["tank", "armor"],
        ),
        candidate(
            "item_c",
            "Balanced Boots",
            2500.0,
            &[
                (Damage, 40.0),
                (Survivability, 20.0),
                (Sustain, 20.0),
                (Mobility, 20.0),
            ],
            &["mobility", "speed"],
        ),
        candidate(
            "item_d",
            "Lifedrain Pendant",
            3200.0,
            &[(Damage, 20.0), (Sustain, 95.0), (Utility, 10.0), (Economy, 5.0)],
            &["sustain", "lifesteal", "heal"],
        ),
    ]
}

pub(super) fn input_for(key: IntentKey) -> EngineInput {
    EngineInput::new("hero_test", IntentWeights::single(key, 1.0))
}

pub(super) fn even_input() -> EngineInput {
    let intent = IntentKey::ALL.iter().map(|key| (*key, 1.0)).collect();
    EngineInput::new("hero_test", intent)
}
