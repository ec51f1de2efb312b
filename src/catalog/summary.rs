use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::types::quote::{Difficulty, Language, Quote};

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub quotes: usize,
    pub speakers: usize,
    pub vocabulary_terms: usize,
    pub topics: usize,
    pub difficulties: BTreeMap<Difficulty, usize>,
    pub korean: usize,
    pub chinese: usize,
    pub spanish: usize,
    pub enriched_vocabulary: usize,
    pub with_insights: usize,
}

impl CatalogSummary {
    pub fn collect(quotes: &[Quote]) -> Self {
        let mut summary = CatalogSummary { quotes: quotes.len(), ..Default::default() };
        let mut speakers = BTreeSet::new();
        let mut topics = BTreeSet::new();

        for quote in quotes {
            speakers.insert(quote.speaker.as_str());
            topics.extend(quote.topics.iter().map(String::as_str));
            topics.insert(quote.topic.as_str());
            summary.vocabulary_terms += quote.vocabulary.len();
            *summary.difficulties.entry(quote.difficulty).or_insert(0) += 1;

            summary.korean += usize::from(quote.text_ko.is_some());
            summary.chinese += usize::from(quote.text_zh.is_some());
            summary.spanish += usize::from(quote.text_es.is_some());
            if quote.vocabulary.iter().any(|v| v.is_enriched()) {
                summary.enriched_vocabulary += 1;
            }
            if quote.vocabulary.iter().any(|v| v.insight.as_ref().is_some_and(|i| !i.is_empty())) {
                summary.with_insights += 1;
            }
        }

        summary.speakers = speakers.len();
        summary.topics = topics.len();
        summary
    }

    /// Number of quotes carrying a translation into `language`.
    pub fn translations(&self, language: Language) -> usize {
        match language {
            Language::English => self.quotes,
            Language::Korean => self.korean,
            Language::Chinese => self.chinese,
            Language::Spanish => self.spanish,
        }
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Quotes:             {}", self.quotes)?;
        writeln!(f, "Speakers:           {}", self.speakers)?;
        writeln!(f, "Vocabulary terms:   {}", self.vocabulary_terms)?;
        writeln!(f, "Topics:             {}", self.topics)?;
        let levels: Vec<String> = self.difficulties.iter().map(|(d, n)| format!("{} {}", d, n)).collect();
        writeln!(f, "Difficulties:       {}", levels.join(", "))?;
        for language in Language::TRANSLATED {
            writeln!(f, "{:<20}{}", format!("{}:", language.label()), self.translations(language))?;
        }
        writeln!(f, "With enriched vocab:{}", self.enriched_vocabulary)?;
        write!(f, "With insights:      {}", self.with_insights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::quote::{VocabularyEntry, VocabularyInsight};

    #[test]
    fn counts_coverage_and_vocabulary() {
        let quotes = vec![
            Quote {
                speaker: "Ann".into(),
                topic: "Growth".into(),
                topics: vec!["Growth".into()],
                text: "a".into(),
                text_ko: Some("가".into()),
                text_es: Some("a".into()),
                vocabulary: vec![
                    VocabularyEntry {
                        word: "moat".into(),
                        definition: "defensible advantage".into(),
                        insight: Some(VocabularyInsight { nuance: "strategic".into(), ..Default::default() }),
                        ..Default::default()
                    },
                    VocabularyEntry::bare("flywheel"),
                ],
                difficulty: Difficulty::Advanced,
                ..Default::default()
            },
            Quote {
                speaker: "Ann".into(),
                topic: "Hiring".into(),
                text: "b".into(),
                vocabulary: vec![VocabularyEntry::bare("bar raiser")],
                ..Default::default()
            },
        ];
        let summary = CatalogSummary::collect(&quotes);
        assert_eq!(summary.quotes, 2);
        assert_eq!(summary.speakers, 1);
        assert_eq!(summary.topics, 2);
        assert_eq!(summary.vocabulary_terms, 3);
        assert_eq!(summary.translations(Language::Korean), 1);
        assert_eq!(summary.translations(Language::Chinese), 0);
        assert_eq!(summary.translations(Language::Spanish), 1);
        assert_eq!(summary.enriched_vocabulary, 1);
        assert_eq!(summary.with_insights, 1);
        assert_eq!(summary.difficulties.get(&Difficulty::Intermediate), Some(&1));
        assert!(summary.to_string().contains("Speakers:           1"));
    }
}
