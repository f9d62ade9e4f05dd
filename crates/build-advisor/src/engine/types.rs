use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Axis a player can express intent along. Declaration order is the canonical
/// order used for deterministic tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKey {
    Burst,
    Sustain,
    Tank,
    Mobility,
    Utility,
}

impl IntentKey {
    pub const ALL: [IntentKey; 5] = [
        IntentKey::Burst,
        IntentKey::Sustain,
        IntentKey::Tank,
        IntentKey::Mobility,
        IntentKey::Utility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IntentKey::Burst => "burst",
            IntentKey::Sustain => "sustain",
            IntentKey::Tank => "tank",
            IntentKey::Mobility => "mobility",
            IntentKey::Utility => "utility",
        }
    }

    /// Category whose stat value this intent rewards.
    pub fn target_category(self) -> ScoreCategory {
        match self {
            IntentKey::Burst => ScoreCategory::Damage,
            IntentKey::Sustain => ScoreCategory::Sustain,
            IntentKey::Tank => ScoreCategory::Survivability,
            IntentKey::Mobility => ScoreCategory::Mobility,
            IntentKey::Utility => ScoreCategory::Utility,
        }
    }

    /// Lowercase synonym tags, scanned in order by the tag bonus stage.
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            IntentKey::Burst => &["burst", "nuke", "one-shot", "amp", "damage"],
            IntentKey::Sustain => &["sustain", "lifesteal", "regen", "heal", "drain"],
            IntentKey::Tank => &["tank", "armor", "shield", "barrier", "endure"],
            IntentKey::Mobility => &["mobility", "dash", "speed", "blink", "move"],
            IntentKey::Utility => &["utility", "slow", "silence", "stun", "debuff", "cc"],
        }
    }
}

/// Stat bucket an item can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreCategory {
    Damage,
    Survivability,
    Sustain,
    Mobility,
    Utility,
    Economy,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 6] = [
        ScoreCategory::Damage,
        ScoreCategory::Survivability,
        ScoreCategory::Sustain,
        ScoreCategory::Mobility,
        ScoreCategory::Utility,
        ScoreCategory::Economy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Damage => "damage",
            ScoreCategory::Survivability => "survivability",
            ScoreCategory::Sustain => "sustain",
            ScoreCategory::Mobility => "mobility",
            ScoreCategory::Utility => "utility",
            ScoreCategory::Economy => "economy",
        }
    }
}

/// Intent weights keyed by axis. Absent keys read as zero.
///
/// Deserialization tolerates `null` values by dropping them, so partially
/// filled payloads from the client reach the normalizer as missing keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<IntentKey, Option<f64>>")]
pub struct IntentWeights(BTreeMap<IntentKey, f64>);

impl IntentWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weights with every axis at zero except `key`.
    pub fn single(key: IntentKey, weight: f64) -> Self {
        let mut weights: Self = IntentKey::ALL.iter().map(|k| (*k, 0.0)).collect();
        weights.set(key, weight);
        weights
    }

    pub fn with(mut self, key: IntentKey, weight: f64) -> Self {
        self.set(key, weight);
        self
    }

    pub fn set(&mut self, key: IntentKey, weight: f64) {
        self.0.insert(key, weight);
    }

    /// Raw stored value, if the key was supplied.
    pub fn raw(&self, key: IntentKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    /// Stored value with missing or non-finite entries read as zero.
    pub fn weight(&self, key: IntentKey) -> f64 {
        match self.raw(key) {
            Some(value) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntentKey, f64)> + '_ {
        self.0.iter().map(|(key, value)| (*key, *value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(IntentKey, f64)> for IntentWeights {
    fn from_iter<T: IntoIterator<Item = (IntentKey, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<IntentKey, Option<f64>>> for IntentWeights {
    fn from(raw: BTreeMap<IntentKey, Option<f64>>) -> Self {
        raw.into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }
}

/// Scalar context value supplied alongside a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchContextValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// Request-scoped input handed to every stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineInput {
    pub hero_id: String,
    pub intent: IntentWeights,
    #[serde(default)]
    pub current_items: Vec<String>,
    #[serde(default)]
    pub match_context: BTreeMap<String, MatchContextValue>,
}

impl EngineInput {
    pub fn new(hero_id: impl Into<String>, intent: IntentWeights) -> Self {
        Self {
            hero_id: hero_id.into(),
            intent,
            current_items: Vec::new(),
            match_context: BTreeMap::new(),
        }
    }
}

/// Purchasable item under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCandidate {
    pub item_id: String,
    pub name: String,
    pub cost: f64,
    #[serde(default)]
    pub category_values: BTreeMap<ScoreCategory, f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ItemCandidate {
    /// Raw value for `category`, zero when absent.
    pub fn category_value(&self, category: ScoreCategory) -> f64 {
        self.category_values.get(&category).copied().unwrap_or(0.0)
    }
}

/// Output of a single stage for a single candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageScore {
    pub stage_id: String,
    pub by_category: BTreeMap<ScoreCategory, f64>,
    pub total: f64,
    pub reasons: Vec<String>,
}

impl StageScore {
    pub fn empty(stage_id: impl Into<String>) -> Self {
        Self {
            stage_id: stage_id.into(),
            by_category: BTreeMap::new(),
            total: 0.0,
            reasons: Vec::new(),
        }
    }
}

/// Per-candidate aggregate across every stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub by_category: BTreeMap<ScoreCategory, f64>,
    pub total: f64,
}

/// Ranked entry in the engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecommendation {
    pub item: ItemCandidate,
    pub final_score: f64,
    pub breakdown: ScoreBreakdown,
    pub stage_scores: Vec<StageScore>,
    pub reasons: Vec<String>,
}

/// Versioned result of a single engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOutput {
    pub version: u32,
    pub normalized_intent: IntentWeights,
    pub recommendations: Vec<ItemRecommendation>,
}
