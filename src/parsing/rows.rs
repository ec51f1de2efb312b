//! Raw dataset rows as they appear in the exported JSON and CSV files.
//!
//! Both shapes are reduced to [`RawRow`] before normalization so the rules in
//! `normalize` only exist once.

use serde::Deserialize;

use crate::types::quote::VocabularyEntry;

/// Format-independent row; every field is still optional.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub id: Option<String>,
    pub speaker: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub speaker_function: Option<String>,
    pub speaker_expertise: Vec<String>,
    pub topic: Option<String>,
    pub topics: Vec<String>,
    pub text: Option<String>,
    pub text_ko: Option<String>,
    pub text_zh: Option<String>,
    pub text_es: Option<String>,
    pub full_context: Option<String>,
    pub vocabulary: Vec<VocabularyEntry>,
    pub difficulty: Option<String>,
    pub timestamp: Option<String>,
    pub episode_date: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum JsonId {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum JsonVocab {
    Word(String),
    Entry(VocabularyEntry),
}

impl JsonVocab {
    fn into_entry(self) -> VocabularyEntry {
        match self {
            JsonVocab::Word(word) => VocabularyEntry::bare(word),
            JsonVocab::Entry(entry) => entry,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct JsonRow {
    #[serde(default)]
    pub id: Option<JsonId>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub speaker_function: Option<String>,
    #[serde(default)]
    pub speaker_expertise: Option<Vec<String>>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_ko: Option<String>,
    #[serde(default)]
    pub text_zh: Option<String>,
    #[serde(default)]
    pub text_es: Option<String>,
    #[serde(default, rename = "fullContext", alias = "context", alias = "full_context")]
    pub full_context: Option<String>,
    #[serde(default)]
    pub vocabulary: Option<Vec<JsonVocab>>,
    #[serde(default)]
    pub vocabulary_highlights: Option<Vec<JsonVocab>>,
    #[serde(default, alias = "difficulty")]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, alias = "publish_date", alias = "episodeDate")]
    pub episode_date: Option<String>,
}

impl From<JsonRow> for RawRow {
    fn from(row: JsonRow) -> Self {
        // Structured vocabulary wins over the plain highlight list when present.
        let vocabulary = match (row.vocabulary, row.vocabulary_highlights) {
            (Some(v), _) if !v.is_empty() => v,
            (_, Some(h)) => h,
            _ => Vec::new(),
        };
        RawRow {
            id: row.id.map(|id| match id {
                JsonId::Text(s) => s,
                JsonId::Number(n) => n.to_string(),
            }),
            speaker: row.speaker,
            role: row.role,
            company: row.company,
            speaker_function: row.speaker_function,
            speaker_expertise: row.speaker_expertise.unwrap_or_default(),
            topic: row.topic,
            topics: row.topics.unwrap_or_default(),
            text: row.text,
            text_ko: row.text_ko,
            text_zh: row.text_zh,
            text_es: row.text_es,
            full_context: row.full_context,
            vocabulary: vocabulary.into_iter().map(JsonVocab::into_entry).collect(),
            difficulty: row.difficulty_level,
            timestamp: row.timestamp,
            episode_date: row.episode_date,
        }
    }
}

/// One CSV record; list columns hold comma separated values.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CsvRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub speaker_function: Option<String>,
    #[serde(default)]
    pub speaker_expertise: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub topics: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_ko: Option<String>,
    #[serde(default)]
    pub text_zh: Option<String>,
    #[serde(default)]
    pub text_es: Option<String>,
    #[serde(default, alias = "fullContext", alias = "full_context")]
    pub context: Option<String>,
    #[serde(default, alias = "vocabulary")]
    pub vocabulary_highlights: Option<String>,
    #[serde(default, alias = "difficulty")]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, alias = "publish_date")]
    pub episode_date: Option<String>,
}

impl From<CsvRow> for RawRow {
    fn from(row: CsvRow) -> Self {
        RawRow {
            id: row.id,
            speaker: row.speaker,
            role: row.role,
            company: row.company,
            speaker_function: row.speaker_function,
            speaker_expertise: split_list(row.speaker_expertise.as_deref()),
            topic: row.topic,
            topics: split_list(row.topics.as_deref()),
            text: row.text,
            text_ko: row.text_ko,
            text_zh: row.text_zh,
            text_es: row.text_es,
            full_context: row.context,
            vocabulary: split_list(row.vocabulary_highlights.as_deref())
                .into_iter()
                .map(VocabularyEntry::bare)
                .collect(),
            difficulty: row.difficulty_level,
            timestamp: row.timestamp,
            episode_date: row.episode_date,
        }
    }
}

pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
