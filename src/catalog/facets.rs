use std::collections::BTreeSet;

use crate::types::quote::{Difficulty, Quote};

/// Distinct filterable values present in the dataset, sorted for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub roles: Vec<String>,
    pub topics: Vec<String>,
    pub difficulties: Vec<Difficulty>,
}

impl Facets {
    pub fn collect(quotes: &[Quote]) -> Self {
        let mut roles = BTreeSet::new();
        let mut topics = BTreeSet::new();
        let mut difficulties = BTreeSet::new();
        for quote in quotes {
            roles.insert(quote.role.clone());
            topics.insert(quote.topic.clone());
            topics.extend(quote.topics.iter().cloned());
            difficulties.insert(quote.difficulty);
        }
        Self {
            roles: roles.into_iter().collect(),
            topics: topics.into_iter().collect(),
            difficulties: difficulties.into_iter().collect(),
        }
    }
}
