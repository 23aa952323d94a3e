use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const CODE_FIELD: &str = "alim_code";
pub const NAME_FIELD: &str = "alim_nom_fr";
pub const GROUP_FIELD: &str = "alim_grp_nom_fr";
pub const SUBGROUP_FIELD: &str = "alim_ssgrp_nom_fr";

/// One CIQUAL food item after normalization.
///
/// Every value is text and column order follows the source. Records are built
/// once (by the normalizer or from a bundled dataset) and never edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodRecord {
    fields: IndexMap<String, String>,
}

impl FoodRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The display name (`alim_nom_fr`), if the record carries one.
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_FIELD)
    }

    /// Dedup key: the display name, or the empty string when absent.
    pub fn name_key(&self) -> &str {
        self.name().unwrap_or("")
    }

    pub fn code(&self) -> Option<&str> {
        self.get(CODE_FIELD)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FoodRecord {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        FoodRecord {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Parse a bundled dataset: a JSON array of flat string-valued objects.
pub fn records_from_json(content: &str) -> Result<Vec<FoodRecord>, serde_json::Error> {
    serde_json::from_str(content)
}
