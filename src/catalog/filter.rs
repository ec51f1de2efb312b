use std::collections::BTreeSet;

use crate::likes::LikeStore;
use crate::types::quote::{Difficulty, Quote};

/// Active predicates. Categories combine with AND, values inside a category with OR.
/// An empty category does not constrain anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub search: String,
    pub roles: BTreeSet<String>,
    pub topics: BTreeSet<String>,
    pub difficulties: BTreeSet<Difficulty>,
    pub liked_only: bool,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topics.insert(topic.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulties.insert(difficulty);
        self
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.roles.is_empty()
            || !self.topics.is_empty()
            || !self.difficulties.is_empty()
            || self.liked_only
    }

    pub fn toggle_role(&mut self, role: &str) {
        toggle(&mut self.roles, role.to_string());
    }

    pub fn toggle_topic(&mut self, topic: &str) {
        toggle(&mut self.topics, topic.to_string());
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        toggle(&mut self.difficulties, difficulty);
    }

    /// Lowercased search needle, `None` when the search box is blank.
    fn needle(&self) -> Option<String> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    pub fn matches(&self, quote: &Quote, likes: &LikeStore) -> bool {
        self.matcher().matches(quote, likes)
    }

    /// Prepares the predicate once so a pass over the dataset lowercases the needle only once.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher { config: self, needle: self.needle() }
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

pub struct Matcher<'a> {
    config: &'a FilterConfig,
    needle: Option<String>,
}

impl Matcher<'_> {
    pub fn matches(&self, quote: &Quote, likes: &LikeStore) -> bool {
        let config = self.config;
        if let Some(needle) = &self.needle {
            if !search_hit(quote, needle) {
                return false;
            }
        }
        if !config.roles.is_empty() && !config.roles.contains(&quote.role) {
            return false;
        }
        if !config.topics.is_empty() && !config.topics.iter().any(|t| quote.has_topic(t)) {
            return false;
        }
        if !config.difficulties.is_empty() && !config.difficulties.contains(&quote.difficulty) {
            return false;
        }
        if config.liked_only && !likes.is_liked(&quote.id) {
            return false;
        }
        true
    }
}

fn search_hit(quote: &Quote, needle: &str) -> bool {
    [&quote.text, &quote.speaker, &quote.topic, &quote.role, &quote.company]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, speaker: &str, role: &str, topic: &str, difficulty: Difficulty) -> Quote {
        Quote {
            id: id.to_string(),
            speaker: speaker.to_string(),
            role: role.to_string(),
            company: "Acme".to_string(),
            topic: topic.to_string(),
            topics: vec![topic.to_string()],
            text: format!("{} talks about {}", speaker, topic),
            difficulty,
            ..Default::default()
        }
    }

    #[test]
    fn empty_config_passes_everything() {
        let likes = LikeStore::in_memory();
        let q = quote("1", "Ann", "Product", "Growth", Difficulty::Beginner);
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().matches(&q, &likes));
        assert!(FilterConfig::new().with_search("   ").matches(&q, &likes));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let likes = LikeStore::in_memory();
        let q = quote("1", "Ann Lee", "Product", "Growth", Difficulty::Beginner);
        for term in ["ANN", "product", "gRoWtH", "acme", "talks about"] {
            assert!(FilterConfig::new().with_search(term).matches(&q, &likes), "{}", term);
        }
        assert!(!FilterConfig::new().with_search("pricing").matches(&q, &likes));
    }

    #[test]
    fn values_within_category_are_ored() {
        let likes = LikeStore::in_memory();
        let config = FilterConfig::new().with_role("Product").with_role("Engineering");
        assert!(config.matches(&quote("1", "A", "Product", "T", Difficulty::Beginner), &likes));
        assert!(config.matches(&quote("2", "B", "Engineering", "T", Difficulty::Beginner), &likes));
        assert!(!config.matches(&quote("3", "C", "Design", "T", Difficulty::Beginner), &likes));
    }

    #[test]
    fn categories_are_anded() {
        let likes = LikeStore::in_memory();
        let config = FilterConfig::new().with_role("Product").with_difficulty(Difficulty::Advanced);
        assert!(config.matches(&quote("1", "A", "Product", "T", Difficulty::Advanced), &likes));
        assert!(!config.matches(&quote("2", "A", "Product", "T", Difficulty::Beginner), &likes));
        assert!(!config.matches(&quote("3", "A", "Design", "T", Difficulty::Advanced), &likes));
    }

    #[test]
    fn topic_filter_checks_secondary_topics() {
        let likes = LikeStore::in_memory();
        let mut q = quote("1", "A", "Product", "Growth", Difficulty::Beginner);
        q.topics.push("Pricing".to_string());
        assert!(FilterConfig::new().with_topic("Pricing").matches(&q, &likes));
    }

    #[test]
    fn liked_only_uses_like_set() {
        let mut likes = LikeStore::in_memory();
        likes.toggle("2");
        let config = FilterConfig { liked_only: true, ..Default::default() };
        assert!(!config.matches(&quote("1", "A", "P", "T", Difficulty::Beginner), &likes));
        assert!(config.matches(&quote("2", "B", "P", "T", Difficulty::Beginner), &likes));
    }

    #[test]
    fn toggles_flip_selection_and_clear_resets() {
        let mut config = FilterConfig::new().with_search("x");
        config.toggle_topic("Growth");
        config.toggle_difficulty(Difficulty::Advanced);
        assert!(config.topics.contains("Growth"));
        config.toggle_topic("Growth");
        assert!(config.topics.is_empty());
        config.clear();
        assert_eq!(config, FilterConfig::default());
    }
}
