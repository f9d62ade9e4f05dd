use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::engine::{IntentWeights, MatchContextValue, StageKind};

/// Identifier wrapper for heroes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub String);

impl HeroId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Item saved to a hero's build list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildItem {
    pub id: String,
    pub name: String,
}

/// Ordered build list for a single hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBuild {
    pub hero_id: HeroId,
    pub items: Vec<BuildItem>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HeroBuild {
    pub fn empty(hero_id: HeroId) -> Self {
        Self {
            hero_id,
            items: Vec::new(),
            updated_at: None,
        }
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }

    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}

/// Recommendation request as accepted over HTTP and from the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub hero_id: HeroId,
    pub intent: IntentWeights,
    /// Overrides the stored build when present.
    #[serde(default)]
    pub current_items: Option<Vec<String>>,
    #[serde(default)]
    pub match_context: BTreeMap<String, MatchContextValue>,
    #[serde(default)]
    pub candidates: Vec<CatalogItem>,
    /// Overrides the configured pipeline when present.
    #[serde(default)]
    pub stages: Option<Vec<StageKind>>,
}

impl RecommendationRequest {
    pub fn new(hero_id: HeroId, intent: IntentWeights, candidates: Vec<CatalogItem>) -> Self {
        Self {
            hero_id,
            intent,
            current_items: None,
            match_context: BTreeMap::new(),
            candidates,
            stages: None,
        }
    }
}
