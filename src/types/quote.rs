use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    /// Unknown or missing labels fall back to `Intermediate`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty level '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VocabularyInsight {
    #[serde(default)]
    pub nuance: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

impl VocabularyInsight {
    pub fn is_empty(&self) -> bool {
        self.nuance.trim().is_empty() && self.synonyms.is_empty() && self.antonyms.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default, alias = "business_context")]
    pub business_context: String,
    #[serde(default, alias = "example_usage")]
    pub example_usage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<VocabularyInsight>,
}

impl VocabularyEntry {
    pub fn bare(word: impl Into<String>) -> Self {
        Self { word: word.into(), ..Default::default() }
    }

    pub fn is_enriched(&self) -> bool {
        !self.definition.trim().is_empty()
    }
}

/// Translation targets carried next to the English text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Korean,
    Chinese,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::English, Language::Korean, Language::Chinese, Language::Spanish];
    pub const TRANSLATED: [Language; 3] = [Language::Korean, Language::Chinese, Language::Spanish];

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Korean => "Korean",
            Language::Chinese => "Chinese",
            Language::Spanish => "Spanish",
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Quote {
    pub id: String,
    pub speaker: String,
    pub role: String,
    pub company: String,
    pub speaker_function: String,
    pub speaker_expertise: Vec<String>,
    pub topic: String,
    pub topics: Vec<String>,
    pub text: String,
    pub text_ko: Option<String>,
    pub text_zh: Option<String>,
    pub text_es: Option<String>,
    pub vocabulary: Vec<VocabularyEntry>,
    pub full_context: String,
    pub difficulty: Difficulty,
    pub timestamp: String,
    pub episode_date: Option<NaiveDate>,
}

impl Quote {
    /// Text in the requested language; `None` when the translation is absent.
    pub fn text_in(&self, language: Language) -> Option<&str> {
        match language {
            Language::English => Some(self.text.as_str()),
            Language::Korean => self.text_ko.as_deref(),
            Language::Chinese => self.text_zh.as_deref(),
            Language::Spanish => self.text_es.as_deref(),
        }
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topic == topic || self.topics.iter().any(|t| t == topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_label(" ADVANCED "), Difficulty::Advanced);
        assert_eq!(Difficulty::from_label("beginner"), Difficulty::Beginner);
    }

    #[test]
    fn unknown_difficulty_falls_back_to_intermediate() {
        assert_eq!(Difficulty::from_label("expert"), Difficulty::Intermediate);
        assert_eq!(Difficulty::from_label(""), Difficulty::Intermediate);
    }

    #[test]
    fn missing_translation_is_none() {
        let quote = Quote {
            text: "Ship it".to_string(),
            text_es: Some("Envíalo".to_string()),
            ..Default::default()
        };
        assert_eq!(quote.text_in(Language::English), Some("Ship it"));
        assert_eq!(quote.text_in(Language::Spanish), Some("Envíalo"));
        assert_eq!(quote.text_in(Language::Korean), None);
    }

    #[test]
    fn topic_matches_primary_or_list() {
        let quote = Quote {
            topic: "Growth".to_string(),
            topics: vec!["Growth".to_string(), "Pricing".to_string()],
            ..Default::default()
        };
        assert!(quote.has_topic("Growth"));
        assert!(quote.has_topic("Pricing"));
        assert!(!quote.has_topic("Hiring"));
    }
}
