mod base_category;
mod intent_tag;

pub use base_category::BaseCategoryStage;
pub use intent_tag::{IntentTagBonusStage, MAX_TAGS_SCORED, TAG_BONUS_PER_MATCH};
