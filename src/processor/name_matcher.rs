use std::collections::HashSet;
use tracing::debug;

use crate::models::FoodRecord;

/// Result of filtering a record set against the target list.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub records: Vec<FoodRecord>,
    /// Distinct target names matched by at least one record
    pub matched_targets: usize,
    /// Distinct target names in the list
    pub requested_targets: usize,
}

struct Target {
    name: String,
    lowered: String,
}

/// Containment matcher over a fixed list of product names.
///
/// A record name `R` matches a target `T` when, lower-cased, either string
/// contains the other. Accents are compared as-is, and an empty name is
/// contained in every target.
pub struct NameMatcher {
    targets: Vec<Target>,
}

impl NameMatcher {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let mut seen = HashSet::new();
        let targets = names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| seen.insert(*name))
            .map(|name| Target {
                name: name.to_string(),
                lowered: name.to_lowercase(),
            })
            .collect();

        NameMatcher { targets }
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Index of the first target matching `name`, scanning in list order.
    pub fn find_target(&self, name: &str) -> Option<usize> {
        let lowered = name.to_lowercase();
        self.targets.iter().position(|target| {
            lowered.contains(&target.lowered) || target.lowered.contains(&lowered)
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.find_target(name).is_some()
    }

    pub fn filter(&self, records: Vec<FoodRecord>) -> FilterOutcome {
        let mut matched = HashSet::new();
        let mut kept = Vec::new();

        for record in records {
            match self.find_target(record.name_key()) {
                Some(index) => {
                    matched.insert(index);
                    kept.push(record);
                }
                None => {
                    debug!("No target matches '{}'", record.name_key());
                }
            }
        }

        debug!(
            "Matched targets: {:?}",
            matched
                .iter()
                .map(|&index| self.targets[index].name.as_str())
                .collect::<Vec<_>>()
        );

        FilterOutcome {
            records: kept,
            matched_targets: matched.len(),
            requested_targets: self.targets.len(),
        }
    }
}
