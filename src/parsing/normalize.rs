use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::parsing::rows::RawRow;
use crate::types::dataset::{Dataset, LoadReport};
use crate::types::quote::{Difficulty, Quote};

const DEFAULT_SPEAKER: &str = "Unknown";
const DEFAULT_TOPIC: &str = "General";
const DEFAULT_ROLE: &str = "Guest";

fn non_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("slug pattern is valid"))
}

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-\s]+").expect("separator pattern is valid"))
}

/// URL-friendly form of a speaker name: "Shreyas Doshi" -> "shreyas-doshi".
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = non_word_re().replace_all(&lowered, "");
    separator_re().replace_all(&stripped, "-").into_owned()
}

fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_episode_date(value: Option<String>) -> Option<NaiveDate> {
    let raw = clean(value)?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(value = %raw, "ignoring malformed episode date");
            None
        }
    }
}

/// `<slug>-<n>`, bumping `n` past ids already taken.
fn derive_id(speaker: &str, ordinal: usize, taken: &HashSet<String>) -> String {
    let slug = slugify(speaker);
    (ordinal..)
        .map(|n| format!("{}-{}", slug, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(slug)
}

/// Turns raw rows into the immutable catalog.
///
/// Rows with blank text are dropped, as are rows repeating an id already seen.
/// Missing ids are derived from the speaker slug and the row's position among
/// that speaker's rows, skipping ahead when that id is already taken.
pub fn normalize_rows<I>(rows: I) -> Dataset
where
    I: IntoIterator<Item = RawRow>,
{
    let mut report = LoadReport::default();
    let mut quotes = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut per_speaker: HashMap<String, usize> = HashMap::new();

    for row in rows {
        report.rows_read += 1;

        let speaker = clean(row.speaker).unwrap_or_else(|| DEFAULT_SPEAKER.to_string());
        let ordinal = per_speaker.entry(speaker.clone()).or_insert(0);
        *ordinal += 1;

        let text = match clean(row.text) {
            Some(text) => text,
            None => {
                report.dropped_empty_text += 1;
                continue;
            }
        };

        let id = match clean(row.id) {
            Some(id) => id,
            None => derive_id(&speaker, *ordinal, &seen_ids),
        };
        if !seen_ids.insert(id.clone()) {
            tracing::warn!(%id, "duplicate quote id, keeping the first occurrence");
            report.dropped_duplicate_id += 1;
            continue;
        }

        let topics: Vec<String> = row
            .topics
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let topic = clean(row.topic)
            .or_else(|| topics.first().cloned())
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string());

        let speaker_function = clean(row.speaker_function).unwrap_or_default();
        let role = clean(row.role)
            .or_else(|| Some(speaker_function.clone()).filter(|f| !f.is_empty()))
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        let difficulty = match clean(row.difficulty) {
            Some(label) => label.parse::<Difficulty>().unwrap_or_else(|err| {
                tracing::debug!(%id, error = %err, "defaulting difficulty");
                Difficulty::default()
            }),
            None => Difficulty::default(),
        };

        let vocabulary = row
            .vocabulary
            .into_iter()
            .filter(|entry| !entry.word.trim().is_empty())
            .collect();

        quotes.push(Quote {
            id,
            speaker,
            role,
            company: clean(row.company).unwrap_or_default(),
            speaker_function,
            speaker_expertise: row.speaker_expertise,
            topic,
            topics,
            text,
            text_ko: clean(row.text_ko),
            text_zh: clean(row.text_zh),
            text_es: clean(row.text_es),
            vocabulary,
            full_context: clean(row.full_context).unwrap_or_default(),
            difficulty,
            timestamp: clean(row.timestamp).unwrap_or_default(),
            episode_date: parse_episode_date(row.episode_date),
        });
    }

    report.quotes_kept = quotes.len();
    if report.dropped() > 0 {
        tracing::info!(
            empty_text = report.dropped_empty_text,
            duplicate_id = report.dropped_duplicate_id,
            "dropped dataset rows"
        );
    }
    Dataset { quotes, report }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(speaker: &str, text: &str) -> RawRow {
        RawRow {
            speaker: Some(speaker.to_string()),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn slugify_matches_export_ids() {
        assert_eq!(slugify("Shreyas Doshi"), "shreyas-doshi");
        assert_eq!(slugify("  Elena Verna 2.0 "), "elena-verna-20");
        assert_eq!(slugify("Brian  -  Chesky"), "brian-chesky");
    }

    #[test]
    fn blank_text_rows_are_dropped() {
        let dataset = normalize_rows(vec![row("A", "kept"), row("A", "   "), RawRow::default()]);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.report.rows_read, 3);
        assert_eq!(dataset.report.dropped_empty_text, 2);
    }

    #[test]
    fn derived_ids_count_rows_per_speaker() {
        let dataset = normalize_rows(vec![row("Ann Lee", "one"), row("Bo", "two"), row("Ann Lee", "three")]);
        let ids: Vec<_> = dataset.quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["ann-lee-1", "bo-1", "ann-lee-2"]);
    }

    #[test]
    fn derived_id_skips_taken_ids() {
        let mut explicit = row("Someone Else", "explicit");
        explicit.id = Some("ann-lee-1".to_string());
        let dataset = normalize_rows(vec![explicit, row("Ann Lee", "one"), row("Ann Lee", "two")]);
        let ids: Vec<_> = dataset.quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["ann-lee-1", "ann-lee-2", "ann-lee-3"]);
        assert_eq!(dataset.report.dropped_duplicate_id, 0);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut first = row("A", "first");
        first.id = Some("q1".to_string());
        let mut second = row("B", "second");
        second.id = Some("q1".to_string());
        let dataset = normalize_rows(vec![first, second]);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.quotes[0].text, "first");
        assert_eq!(dataset.report.dropped_duplicate_id, 1);
    }

    #[test]
    fn defaults_fill_missing_metadata() {
        let mut raw = row("A", "text");
        raw.speaker_function = Some("Product".to_string());
        raw.topics = vec!["Growth".to_string(), "Pricing".to_string()];
        raw.text_ko = Some("  ".to_string());
        raw.episode_date = Some("2024-03-01".to_string());
        let quote = &normalize_rows(vec![raw]).quotes[0];
        assert_eq!(quote.role, "Product");
        assert_eq!(quote.topic, "Growth");
        assert_eq!(quote.text_ko, None);
        assert_eq!(quote.difficulty, Difficulty::Intermediate);
        assert_eq!(quote.episode_date, NaiveDate::from_ymd_opt(2024, 3, 1));

        let bare = &normalize_rows(vec![row("B", "text")]).quotes[0];
        assert_eq!(bare.role, "Guest");
        assert_eq!(bare.topic, "General");
    }

    #[test]
    fn malformed_episode_date_is_absent() {
        let mut raw = row("A", "text");
        raw.episode_date = Some("March 2024".to_string());
        assert_eq!(normalize_rows(vec![raw]).quotes[0].episode_date, None);
    }
}
