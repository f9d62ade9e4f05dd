use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::advisor::domain::{BuildItem, HeroBuild, HeroId, RecommendationRequest};
use crate::advisor::repository::{BuildRepository, BuildStoreError};
use crate::advisor::{advisor_router, AdvisorService, AdvisorSettings};
use crate::catalog::CatalogItem;
use crate::engine::{IntentKey, IntentWeights, ScoreCategory, StagePipeline};

#[derive(Default, Clone)]
pub(super) struct MemoryBuilds {
    builds: Arc<Mutex<HashMap<HeroId, HeroBuild>>>,
}

impl MemoryBuilds {
    pub(super) fn stored(&self, hero_id: &HeroId) -> Option<HeroBuild> {
        self.builds
            .lock()
            .expect("build mutex poisoned")
            .get(hero_id)
            .cloned()
    }
}

impl BuildRepository for MemoryBuilds {
    fn load(&self, hero_id: &HeroId) -> Result<Option<HeroBuild>, BuildStoreError> {
        let guard = self.builds.lock().expect("build mutex poisoned");
        Ok(guard.get(hero_id).cloned())
    }

    fn save(&self, build: HeroBuild) -> Result<(), BuildStoreError> {
        let mut guard = self.builds.lock().expect("build mutex poisoned");
        guard.insert(build.hero_id.clone(), build);
        Ok(())
    }

    fn delete(&self, hero_id: &HeroId) -> Result<(), BuildStoreError> {
        let mut guard = self.builds.lock().expect("build mutex poisoned");
        guard
            .remove(hero_id)
            .map(|_| ())
            .ok_or(BuildStoreError::NotFound)
    }
}

pub(super) struct OfflineBuilds;

impl BuildRepository for OfflineBuilds {
    fn load(&self, _hero_id: &HeroId) -> Result<Option<HeroBuild>, BuildStoreError> {
        Err(BuildStoreError::Unavailable("storage offline".to_string()))
    }

    fn save(&self, _build: HeroBuild) -> Result<(), BuildStoreError> {
        Err(BuildStoreError::Unavailable("storage offline".to_string()))
    }

    fn delete(&self, _hero_id: &HeroId) -> Result<(), BuildStoreError> {
        Err(BuildStoreError::Unavailable("storage offline".to_string()))
    }
}

pub(super) fn hero() -> HeroId {
    HeroId::new("hero_test")
}

fn catalog_item(id: &str, name: &str, cost: f64, values: &[(ScoreCategory, f64)], tags: &[&str]) -> CatalogItem {
    CatalogItem {
        item_id: Some(id.to_string()),
        name: Some(name.to_string()),
        cost: Some(cost),
        category_values: values
            .iter()
            .map(|(category, value)| (*category, Some(*value)))
            .collect::<BTreeMap<_, _>>(),
        tags: Some(tags.iter().map(|tag| tag.to_string()).collect()),
    }
}

pub(super) fn catalog() -> Vec<CatalogItem> {
    use ScoreCategory::*;

    vec![
        catalog_item(
            "item_a",
            "Burst Blade",
            3000.0,
            &[(Damage, 80.0), (Survivability, 10.0), (Mobility, 5.0)],
            &["burst", "damage"],
        ),
        catalog_item(
            "item_b",
            "Tank Shield",
            2800.0,
            &[(Damage, 10.0), (Survivability, 90.0)],
            &["tank", "armor"],
        ),
        catalog_item(
            "item_c",
            "Balanced Boots",
            2500.0,
            &[(Damage, 40.0), (Survivability, 20.0), (Sustain, 20.0), (Mobility, 20.0)],
            &["mobility", "speed"],
        ),
        catalog_item(
            "item_d",
            "Lifedrain Pendant",
            3200.0,
            &[(Damage, 20.0), (Sustain, 95.0), (Utility, 10.0), (Economy, 5.0)],
            &["sustain", "lifesteal", "heal"],
        ),
    ]
}

pub(super) fn request(key: IntentKey) -> RecommendationRequest {
    RecommendationRequest::new(hero(), IntentWeights::single(key, 1.0), catalog())
}

pub(super) fn build_item(id: &str, name: &str) -> BuildItem {
    BuildItem {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub(super) fn build_service() -> (AdvisorService<MemoryBuilds>, Arc<MemoryBuilds>) {
    build_service_with(AdvisorSettings::default())
}

pub(super) fn build_service_with(
    settings: AdvisorSettings,
) -> (AdvisorService<MemoryBuilds>, Arc<MemoryBuilds>) {
    let builds = Arc::new(MemoryBuilds::default());
    let service = AdvisorService::new(builds.clone(), StagePipeline::standard(), settings);
    (service, builds)
}

pub(super) fn router_with_service(service: AdvisorService<MemoryBuilds>) -> axum::Router {
    advisor_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
