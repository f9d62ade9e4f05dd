use super::CatalogItem;
use crate::engine::ScoreCategory;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::warn;

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<CatalogItem>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut items = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        items.push(row.into_item());
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    item_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cost: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    damage: Option<String>,
    #[serde(
        default,
        alias = "tankiness",
        deserialize_with = "empty_string_as_none"
    )]
    survivability: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sustain: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    mobility: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    utility: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    economy: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
}

impl CatalogRow {
    fn into_item(self) -> CatalogItem {
        let item_id = self.item_id.as_deref().map(normalize_text);
        let label = item_id.clone().unwrap_or_default();

        let columns = [
            (ScoreCategory::Damage, &self.damage),
            (ScoreCategory::Survivability, &self.survivability),
            (ScoreCategory::Sustain, &self.sustain),
            (ScoreCategory::Mobility, &self.mobility),
            (ScoreCategory::Utility, &self.utility),
            (ScoreCategory::Economy, &self.economy),
        ];
        let category_values: BTreeMap<ScoreCategory, Option<f64>> = columns
            .into_iter()
            .filter_map(|(category, raw)| {
                raw.as_deref()
                    .map(|value| (category, parse_number(&label, category.label(), value)))
            })
            .collect();

        CatalogItem {
            item_id,
            name: self.name.as_deref().map(normalize_text),
            cost: self
                .cost
                .as_deref()
                .and_then(|value| parse_number(&label, "cost", value)),
            category_values,
            tags: self.tags.as_deref().map(split_tags),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_number(item_id: &str, column: &str, raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(item_id, column, raw, "unparsable catalog number, defaulting to 0");
            None
        }
    }
}

pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split([';', '|'])
        .map(normalize_text)
        .filter(|tag| !tag.is_empty())
        .collect()
}
