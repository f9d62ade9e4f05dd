//! Defaulting layer between raw catalog data and the scoring engine.
//!
//! Catalog exports are loosely typed: numbers go missing, come back as `null`,
//! or overflow to non-finite values. Everything here resolves those cases to
//! neutral values so the engine only ever sees well-formed candidates.

mod parser;

use crate::engine::{ItemCandidate, ScoreCategory};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Item record as delivered by the catalog, before defaulting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default, alias = "item_id", alias = "id")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(
        default,
        alias = "category_values",
        deserialize_with = "lenient_category_values"
    )]
    pub category_values: BTreeMap<ScoreCategory, Option<f64>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl CatalogItem {
    /// Apply the defaulting policy. Returns `None` when the record has no id.
    pub fn into_candidate(self) -> Option<ItemCandidate> {
        let item_id = self
            .item_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())?;

        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| item_id.clone());

        let category_values = self
            .category_values
            .into_iter()
            .filter_map(|(category, value)| {
                value
                    .filter(|value| value.is_finite())
                    .map(|value| (category, value))
            })
            .collect();

        let tags = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        Some(ItemCandidate {
            item_id,
            name,
            cost: finite_or_zero(self.cost),
            category_values,
            tags,
        })
    }
}

impl From<ItemCandidate> for CatalogItem {
    fn from(candidate: ItemCandidate) -> Self {
        Self {
            item_id: Some(candidate.item_id),
            name: Some(candidate.name),
            cost: Some(candidate.cost),
            category_values: candidate
                .category_values
                .into_iter()
                .map(|(category, value)| (category, Some(value)))
                .collect(),
            tags: Some(candidate.tags),
        }
    }
}

/// Resolve a catalog column or JSON key to a category.
///
/// Matching ignores case and accepts `tankiness` for survivability.
pub fn category_for_key(key: &str) -> Option<ScoreCategory> {
    let key = key.trim();
    if key.eq_ignore_ascii_case("tankiness") {
        return Some(ScoreCategory::Survivability);
    }

    ScoreCategory::ALL
        .into_iter()
        .find(|category| category.label().eq_ignore_ascii_case(key))
}

fn lenient_category_values<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<ScoreCategory, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<f64>>>::deserialize(deserializer)?;
    let mut values = BTreeMap::new();

    for (key, value) in raw.unwrap_or_default() {
        match category_for_key(&key) {
            // An exact category key wins over its alias.
            Some(category) if category.label() == key => {
                values.insert(category, value);
            }
            Some(category) => {
                values.entry(category).or_insert(value);
            }
            None => warn!(key = %key, "unknown catalog category ignored"),
        }
    }

    Ok(values)
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|value| value.is_finite()).unwrap_or(0.0)
}

/// Convert raw records into unique candidates.
///
/// Records without an id are omitted and later duplicates of an id are
/// dropped, since the ranker relies on ids being unique within a call.
pub fn candidates_from_catalog<I>(items: I) -> Vec<ItemCandidate>
where
    I: IntoIterator<Item = CatalogItem>,
{
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for item in items {
        let Some(candidate) = item.into_candidate() else {
            warn!("catalog record without item id omitted");
            continue;
        };

        if !seen.insert(candidate.item_id.clone()) {
            warn!(item_id = %candidate.item_id, "duplicate catalog item omitted");
            continue;
        }

        candidates.push(candidate);
    }

    candidates
}

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read item catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid catalog JSON data: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads candidate lists from catalog exports.
pub struct CatalogImporter;

impl CatalogImporter {
    /// Read a `.json` export as JSON and anything else as CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ItemCandidate>, CatalogImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_csv_reader(file)
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<ItemCandidate>, CatalogImportError> {
        let items = parser::parse_csv(reader)?;
        Ok(candidates_from_catalog(items))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<ItemCandidate>, CatalogImportError> {
        let items: Vec<CatalogItem> = serde_json::from_reader(reader)?;
        Ok(candidates_from_catalog(items))
    }
}
