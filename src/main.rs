use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use eframe::{egui, NativeOptions};

use fluent_stakeholder::app::QuoteBrowserApp;
use fluent_stakeholder::catalog::{self, CatalogSummary, FilterConfig, SortKey};
use fluent_stakeholder::config::{load_config_from_file, Config, DEFAULT_CONFIG_FILE};
use fluent_stakeholder::likes::LikeStore;
use fluent_stakeholder::logging::init_tracing;
use fluent_stakeholder::parsing::load_dataset;
use fluent_stakeholder::types::quote::{Difficulty, Quote};

#[derive(Parser, Debug)]
#[command(name = "fluent_stakeholder", version, about = "Browse podcast quotes enriched for language learners")]
struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quote dataset, overriding `data_path`
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Liked-quotes file, overriding `likes_path`
    #[arg(long, global = true)]
    likes: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the quotes matching the given filters
    List(ListArgs),
    /// Print catalog statistics
    Summary,
    /// Toggle the like on a quote
    Like {
        /// Quote id
        id: String,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long = "role")]
    roles: Vec<String>,
    #[arg(long = "topic")]
    topics: Vec<String>,
    #[arg(long = "difficulty")]
    difficulties: Vec<Difficulty>,
    /// recency, popularity or speaker
    #[arg(long)]
    sort: Option<SortKey>,
    #[arg(long)]
    liked_only: bool,
    #[arg(long)]
    limit: Option<usize>,
    /// Emit JSON instead of one line per quote
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn filter(&self) -> FilterConfig {
        FilterConfig {
            search: self.search.clone(),
            roles: self.roles.iter().cloned().collect(),
            topics: self.topics.iter().cloned().collect(),
            difficulties: self.difficulties.iter().copied().collect(),
            liked_only: self.liked_only,
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_file(path, true),
        None => load_config_from_file(&PathBuf::from(DEFAULT_CONFIG_FILE), false),
    }
    .map_err(|e| e.to_string())?;
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    if let Some(likes) = &cli.likes {
        config.likes_path = likes.clone();
    }
    Ok(config)
}

fn quote_line(quote: &Quote, liked: bool) -> String {
    format!(
        "{}{} [{}] {} ({}, {}): {}",
        if liked { "♥ " } else { "" },
        quote.id,
        quote.difficulty,
        quote.speaker,
        quote.role,
        quote.topic,
        quote.text
    )
}

/// Derived list as printed by `list`: one line per quote, or a JSON array.
fn list_output(quotes: &[Quote], likes: &LikeStore, args: &ListArgs, default_sort: SortKey) -> Result<String, String> {
    let sort = args.sort.unwrap_or(default_sort);
    let mut derived = catalog::derive(quotes, &args.filter(), sort, likes);
    if let Some(limit) = args.limit {
        derived.truncate(limit);
    }

    if args.json {
        serde_json::to_string_pretty(&derived).map_err(|e| format!("JSON serialization failed: {}", e))
    } else if derived.is_empty() {
        Ok("No quotes match the current filters.".to_string())
    } else {
        let lines: Vec<String> = derived.iter().map(|quote| quote_line(quote, likes.is_liked(&quote.id))).collect();
        Ok(lines.join("\n"))
    }
}

fn run_list(config: &Config, args: &ListArgs) -> Result<(), String> {
    let dataset = load_dataset(&config.data_path).map_err(|e| e.to_string())?;
    let likes = LikeStore::open(&config.likes_path);
    println!("{}", list_output(&dataset.quotes, &likes, args, config.default_sort)?);
    Ok(())
}

fn run_summary(config: &Config) -> Result<(), String> {
    let dataset = load_dataset(&config.data_path).map_err(|e| e.to_string())?;
    println!("{}", CatalogSummary::collect(&dataset.quotes));
    if dataset.report.dropped() > 0 {
        println!(
            "Skipped rows:       {} ({} without text, {} duplicate ids)",
            dataset.report.dropped(),
            dataset.report.dropped_empty_text,
            dataset.report.dropped_duplicate_id
        );
    }
    Ok(())
}

fn run_like(config: &Config, id: &str) -> Result<(), String> {
    let mut likes = LikeStore::open(&config.likes_path);
    let liked = likes.toggle(id);
    if let Some(err) = likes.last_error() {
        return Err(format!("Failed to save likes: {}", err));
    }
    println!("{} {}", if liked { "Liked" } else { "Unliked" }, id);
    Ok(())
}

fn run_gui(config: Config) -> Result<(), String> {
    let likes = LikeStore::open(&config.likes_path);
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Fluent Stakeholder - Quote Browser",
        options,
        Box::new(move |_cc| Box::new(QuoteBrowserApp::new(config, likes))),
    )
    .map_err(|e| format!("GUI error: {}", e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration resolved");

    let result = match &cli.command {
        None => run_gui(config),
        Some(Command::List(args)) => run_list(&config, args),
        Some(Command::Summary) => run_summary(&config),
        Some(Command::Like { id }) => run_like(&config, id),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_stakeholder::parsing::{parse_dataset, DataFormat};
    use std::fs;

    const QUOTES: &str = r#"[
      {"id": "ann-1", "speaker": "Ann Lee", "role": "VP Product", "text": "Say no to most things.",
       "difficulty_level": "Advanced", "episode_date": "2024-05-01"},
      {"id": "bo-1", "speaker": "Bo Chen", "role": "Engineer", "text": "Ship small, ship often.",
       "difficulty_level": "Beginner", "episode_date": "2023-01-15"},
      {"id": "cy-1", "speaker": "cy park", "role": "VP Product", "text": "Retention beats acquisition.",
       "difficulty_level": "Advanced"}
    ]"#;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fluent_stakeholder").chain(args.iter().copied())).unwrap()
    }

    fn list_args(cli: Cli) -> ListArgs {
        match cli.command {
            Some(Command::List(args)) => args,
            other => panic!("expected list, got {:?}", other),
        }
    }

    fn quotes() -> Vec<Quote> {
        parse_dataset(DataFormat::Json, QUOTES).unwrap().quotes
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "data_path = \"from_config.json\"\npage_size = 5\n").unwrap();
        let config_arg = config_path.to_str().unwrap();

        let cli = parse(&["--config", config_arg, "--data", "x.csv", "list", "--difficulty", "advanced", "--limit", "1"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.data_path, PathBuf::from("x.csv"));
        assert_eq!(config.page_size, 5);
        assert_eq!(config.likes_path, Config::default().likes_path);

        let args = list_args(cli);
        assert_eq!(args.limit, Some(1));
        let filter = args.filter();
        assert!(filter.difficulties.contains(&Difficulty::Advanced));
        assert_eq!(filter.difficulties.len(), 1);
        assert!(filter.roles.is_empty() && !filter.liked_only);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let cli = parse(&["--config", "/no/such/dir/config.toml", "summary"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn repeated_filters_collect_into_sets() {
        let args = list_args(parse(&["list", "--role", "VP Product", "--role", "Engineer", "--topic", "Growth", "--liked-only"]));
        let filter = args.filter();
        assert_eq!(filter.roles.len(), 2);
        assert!(filter.topics.contains("Growth"));
        assert!(filter.liked_only);
    }

    #[test]
    fn unknown_sort_is_rejected() {
        assert!(Cli::try_parse_from(["fluent_stakeholder", "list", "--sort", "loudest"]).is_err());
    }

    #[test]
    fn list_truncates_after_sorting() {
        let quotes = quotes();
        let likes = LikeStore::in_memory();

        let args = list_args(parse(&["list", "--difficulty", "advanced", "--limit", "1"]));
        let output = list_output(&quotes, &likes, &args, SortKey::Recency).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("ann-1 [Advanced] Ann Lee"), "{}", output);

        let args = list_args(parse(&["list", "--sort", "speaker", "--json"]));
        let output = list_output(&quotes, &likes, &args, SortKey::Recency).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        let ids: Vec<_> = rows.iter().map(|row| row["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["ann-1", "bo-1", "cy-1"]);
    }

    #[test]
    fn list_marks_likes_and_reports_no_matches() {
        let quotes = quotes();
        let mut likes = LikeStore::in_memory();
        likes.toggle("bo-1");

        let args = list_args(parse(&["list", "--liked-only"]));
        let output = list_output(&quotes, &likes, &args, SortKey::Recency).unwrap();
        assert!(output.starts_with("♥ bo-1"), "{}", output);

        let args = list_args(parse(&["list", "--search", "nothing like this"]));
        let output = list_output(&quotes, &likes, &args, SortKey::Recency).unwrap();
        assert_eq!(output, "No quotes match the current filters.");
    }

    #[test]
    fn like_command_toggles_persisted_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { likes_path: dir.path().join("liked_quotes.json"), ..Config::default() };

        run_like(&config, "ann-1").unwrap();
        assert!(LikeStore::open(&config.likes_path).is_liked("ann-1"));

        run_like(&config, "ann-1").unwrap();
        assert!(LikeStore::open(&config.likes_path).is_empty());
    }

    #[test]
    fn like_command_fails_when_store_cannot_be_written() {
        let dir = tempfile::tempdir().unwrap();
        let likes_path = dir.path().join("liked_quotes.json");
        fs::create_dir(&likes_path).unwrap();
        let config = Config { likes_path, ..Config::default() };

        let err = run_like(&config, "ann-1").unwrap_err();
        assert!(err.starts_with("Failed to save likes"), "{}", err);
    }
}
