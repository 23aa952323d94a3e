use std::collections::HashSet;
use tracing::debug;

use crate::models::FoodRecord;

/// Merges record groups keeping the first record seen for each `alim_nom_fr`.
/// Groups are consumed in the order given, so earlier groups take priority.
pub struct Deduplicator;

impl Deduplicator {
    pub fn merge<I>(&self, groups: I) -> Vec<FoodRecord>
    where
        I: IntoIterator<Item = Vec<FoodRecord>>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut unique = Vec::new();
        let mut dropped = 0;

        for group in groups {
            for record in group {
                if seen.insert(record.name_key().to_string()) {
                    unique.push(record);
                } else {
                    dropped += 1;
                }
            }
        }

        debug!(
            "Deduplication kept {} records, dropped {} repeats",
            unique.len(),
            dropped
        );

        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CODE_FIELD, NAME_FIELD};

    fn item(code: &str, name: &str) -> FoodRecord {
        [
            (CODE_FIELD.to_string(), code.to_string()),
            (NAME_FIELD.to_string(), name.to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_earliest_group_wins() {
        let filtered = vec![item("20041", "Carotte, crue"), item("20047", "Tomate, crue")];
        let essentials = vec![item("20002", "Carotte, crue"), item("20100", "Avocat, pulpe, cru")];

        let merged = Deduplicator.merge(vec![filtered, essentials]);

        let pairs: Vec<(&str, &str)> = merged
            .iter()
            .map(|r| (r.code().unwrap(), r.name_key()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("20041", "Carotte, crue"),
                ("20047", "Tomate, crue"),
                ("20100", "Avocat, pulpe, cru"),
            ]
        );
    }

    #[test]
    fn test_repeats_within_a_group() {
        let merged = Deduplicator.merge(vec![vec![
            item("1", "Noisette"),
            item("2", "Noisette"),
            item("3", "noisette"),
        ]]);

        // Dedup is by exact name; case variants are distinct
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].code(), Some("1"));
        assert_eq!(merged[1].code(), Some("3"));
    }

    #[test]
    fn test_same_code_different_names_kept() {
        let merged = Deduplicator.merge(vec![
            vec![item("1", "Fève, sèche")],
            vec![item("1", "Lentille, sèche")],
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_nameless_records_share_one_slot() {
        let nameless: FoodRecord = [(CODE_FIELD.to_string(), "9".to_string())]
            .into_iter()
            .collect();
        let merged = Deduplicator.merge(vec![
            vec![nameless.clone(), nameless],
            vec![item("1", "")],
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].code(), Some("9"));
    }

    #[test]
    fn test_empty_groups() {
        assert!(Deduplicator.merge(Vec::<Vec<FoodRecord>>::new()).is_empty());
        assert!(Deduplicator.merge(vec![Vec::new(), Vec::new()]).is_empty());
    }
}
