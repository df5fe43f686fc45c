//! Named-variable store.

use std::collections::BTreeMap;

use tracing::debug;

use super::{CoordinateFrame, TimeSeries};

/// Keyed storage of time series shared between loaders and processing steps.
pub trait VariableStore {
    fn get(&self, name: &str) -> Option<&TimeSeries>;

    /// Stores `series` under `name`, replacing any existing series.
    fn set(&mut self, name: &str, series: TimeSeries);

    fn remove(&mut self, name: &str) -> Option<TimeSeries>;

    fn names(&self) -> Vec<String>;

    fn coords(&self, name: &str) -> Option<CoordinateFrame> {
        self.get(name).and_then(|series| series.coords().cloned())
    }

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// In-memory store, ordered by variable name.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    variables: BTreeMap<String, TimeSeries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl VariableStore for MemoryStore {
    fn get(&self, name: &str) -> Option<&TimeSeries> {
        self.variables.get(name)
    }

    fn set(&mut self, name: &str, series: TimeSeries) {
        debug!(name, samples = series.len(), "storing variable");
        self.variables.insert(name.to_string(), series);
    }

    fn remove(&mut self, name: &str) -> Option<TimeSeries> {
        self.variables.remove(name)
    }

    fn names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(value: f64) -> TimeSeries {
        TimeSeries::scalar(vec![0.0, 1.0], vec![value, value]).unwrap()
    }

    #[test]
    fn should_overwrite_existing_variable() {
        let mut store = MemoryStore::new();
        store.set("a", series(1.0));
        store.set("a", series(2.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some(&series(2.0)));
    }

    #[test]
    fn should_report_coordinate_tag() {
        let mut store = MemoryStore::new();
        store.set("pos", series(1.0).with_coords(CoordinateFrame::Gei));
        store.set("raw", series(1.0));

        assert_eq!(store.coords("pos"), Some(CoordinateFrame::Gei));
        assert_eq!(store.coords("raw"), None);
        assert_eq!(store.coords("missing"), None);
    }

    #[test]
    fn should_list_names_in_order() {
        let mut store = MemoryStore::new();
        store.set("b", series(1.0));
        store.set("a", series(1.0));

        assert_eq!(store.names(), vec!["a".to_string(), "b".to_string()]);
        assert!(store.remove("a").is_some());
        assert!(!store.contains("a"));
    }
}
