//! Strategy Store: the current result of one session plus its avatar lookup.

use std::collections::HashMap;

use crate::strategy::schema::{SalesAngle, StrategyOutput};

/// Session-scoped holder for the latest validated strategy.
///
/// Single writer: only a successful generation calls `set`, and it replaces
/// everything at once. The lookup is rebuilt from scratch on each `set`.
#[derive(Debug, Default, Clone)]
pub struct StrategyStore {
    current: Option<StrategyOutput>,
    angles: HashMap<String, SalesAngle>,
}

impl StrategyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any prior result. Duplicate avatar names: last one wins.
    pub fn set(&mut self, output: StrategyOutput) {
        let angles = output
            .sales_angles
            .iter()
            .map(|angle| (angle.avatar_name.clone(), angle.clone()))
            .collect();

        self.angles = angles;
        self.current = Some(output);
    }

    pub fn get(&self) -> Option<&StrategyOutput> {
        self.current.as_ref()
    }

    pub fn lookup(&self, avatar_name: &str) -> Option<&SalesAngle> {
        self.angles.get(avatar_name)
    }

    /// Selectable avatar names, deduplicated, in the order they first appear.
    pub fn avatar_names(&self) -> Vec<&str> {
        let Some(output) = &self.current else {
            return Vec::new();
        };

        let mut names: Vec<&str> = Vec::with_capacity(self.angles.len());
        for angle in &output.sales_angles {
            if !names.contains(&angle.avatar_name.as_str()) {
                names.push(&angle.avatar_name);
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle(name: &str, copy: &str) -> SalesAngle {
        SalesAngle {
            avatar_name: name.to_string(),
            pain_point_addressed: "noise".to_string(),
            persuasive_copy: copy.to_string(),
        }
    }

    fn output(angles: Vec<SalesAngle>) -> StrategyOutput {
        StrategyOutput {
            main_pain_points: vec!["noise".to_string()],
            sales_angles: angles,
        }
    }

    #[test]
    fn test_empty_store_reports_absent() {
        let store = StrategyStore::new();
        assert!(store.get().is_none());
        assert!(store.lookup("The Skeptic").is_none());
        assert!(store.avatar_names().is_empty());
    }

    #[test]
    fn test_set_builds_lookup_by_avatar_name() {
        let mut store = StrategyStore::new();
        store.set(output(vec![angle("The Skeptic", "a"), angle("The Power User", "b")]));

        assert_eq!(store.lookup("The Skeptic").unwrap().persuasive_copy, "a");
        assert_eq!(store.lookup("The Power User").unwrap().persuasive_copy, "b");
        assert!(store.lookup("the skeptic").is_none());
        assert_eq!(store.avatar_names(), vec!["The Skeptic", "The Power User"]);
    }

    #[test]
    fn test_duplicate_avatar_names_last_write_wins() {
        let mut store = StrategyStore::new();
        store.set(output(vec![
            angle("The Skeptic", "first"),
            angle("The Saver", "middle"),
            angle("The Skeptic", "last"),
        ]));

        assert_eq!(store.lookup("The Skeptic").unwrap().persuasive_copy, "last");
        assert_eq!(store.avatar_names(), vec!["The Skeptic", "The Saver"]);
        // The stored output itself keeps every angle as returned.
        assert_eq!(store.get().unwrap().sales_angles.len(), 3);
    }

    #[test]
    fn test_set_replaces_and_never_merges() {
        let mut store = StrategyStore::new();
        store.set(output(vec![angle("The Skeptic", "a")]));
        store.set(output(vec![angle("The Value Seeker", "b")]));

        assert!(store.lookup("The Skeptic").is_none());
        assert!(store.lookup("The Value Seeker").is_some());
        assert_eq!(store.avatar_names(), vec!["The Value Seeker"]);
        assert_eq!(
            store.get().unwrap().sales_angles[0].avatar_name,
            "The Value Seeker"
        );
    }
}
