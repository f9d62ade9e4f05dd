use build_advisor::advisor::{BuildRepository, BuildStoreError, HeroBuild, HeroId};
use build_advisor::engine::{IntentKey, IntentWeights};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local build lists; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBuildRepository {
    builds: Arc<Mutex<HashMap<HeroId, HeroBuild>>>,
}

impl InMemoryBuildRepository {
    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<HeroId, HeroBuild>>, BuildStoreError> {
        self.builds
            .lock()
            .map_err(|_| BuildStoreError::Unavailable("build mutex poisoned".to_string()))
    }
}

impl BuildRepository for InMemoryBuildRepository {
    fn load(&self, hero_id: &HeroId) -> Result<Option<HeroBuild>, BuildStoreError> {
        Ok(self.guard()?.get(hero_id).cloned())
    }

    fn save(&self, build: HeroBuild) -> Result<(), BuildStoreError> {
        self.guard()?.insert(build.hero_id.clone(), build);
        Ok(())
    }

    fn delete(&self, hero_id: &HeroId) -> Result<(), BuildStoreError> {
        self.guard()?
            .remove(hero_id)
            .map(|_| ())
            .ok_or(BuildStoreError::NotFound)
    }
}

/// Parse `burst=1,tank=0.5` into raw intent weights.
pub(crate) fn parse_intent(raw: &str) -> Result<IntentWeights, String> {
    let mut intent = IntentWeights::new();

    for pair in raw.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=weight, got '{pair}'"))?;
        let key = parse_intent_key(key.trim())?;
        let weight = value
            .trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid weight for {}: {err}", key.label()))?;
        intent.set(key, weight);
    }

    Ok(intent)
}

fn parse_intent_key(raw: &str) -> Result<IntentKey, String> {
    IntentKey::ALL
        .into_iter()
        .find(|key| key.label().eq_ignore_ascii_case(raw))
        .ok_or_else(|| {
            let known: Vec<&str> = IntentKey::ALL.iter().map(|key| key.label()).collect();
            format!("unknown intent '{raw}' (expected one of {})", known.join(", "))
        })
}
