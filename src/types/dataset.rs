use serde::Serialize;

use crate::types::quote::Quote;

/// Counts gathered while normalizing rows into quotes.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub quotes_kept: usize,
    pub dropped_empty_text: usize,
    pub dropped_duplicate_id: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.dropped_empty_text + self.dropped_duplicate_id
    }
}

/// The immutable quote catalog, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub quotes: Vec<Quote>,
    pub report: LoadReport,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }
}
