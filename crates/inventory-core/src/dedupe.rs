use std::collections::BTreeMap;

/// De-duplication keys of rows already emitted this run, with the row that kept each.
#[derive(Debug, Clone, Default)]
pub struct SeenNames {
    first_rows: BTreeMap<String, usize>,
}

impl SeenNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row that kept `key`, if any.
    pub fn first_row(&self, key: &str) -> Option<usize> {
        self.first_rows.get(key).copied()
    }

    /// Record `key` as kept by `row`. An earlier claim is left in place.
    pub fn claim(&mut self, key: String, row: usize) {
        self.first_rows.entry(key).or_insert(row);
    }

    pub fn len(&self) -> usize {
        self.first_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_rows.is_empty()
    }
}
