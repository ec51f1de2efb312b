use std::time::Duration;

use eframe::{egui, App};

use crate::catalog::{CatalogSummary, Facets, FilterConfig, SortKey, ViewState};
use crate::config::Config;
use crate::likes::LikeStore;
use crate::parsing::DatasetState;
use crate::types::quote::{Language, Quote, VocabularyEntry};

const CARD_MIN_WIDTH: f32 = 320.0;
const CARD_PREVIEW_CHARS: usize = 280;

/// User interactions collected while the card area is borrowed, applied after the frame.
enum UiAction {
    ToggleLike(String),
    Open(String),
    ShowMore,
    ClearFilters,
}

pub struct QuoteBrowserApp {
    config: Config,
    dataset: DatasetState,
    likes: LikeStore,
    filter: FilterConfig,
    sort: SortKey,
    facets: Facets,
    summary: Option<CatalogSummary>,
    visible: usize,
    selected_quote: Option<String>,
    detail_language: Language,
}

impl QuoteBrowserApp {
    pub fn new(config: Config, likes: LikeStore) -> Self {
        let dataset = DatasetState::start(config.data_path.clone());
        Self {
            sort: config.default_sort,
            visible: config.page_size,
            config,
            dataset,
            likes,
            filter: FilterConfig::default(),
            facets: Facets::default(),
            summary: None,
            selected_quote: None,
            detail_language: Language::English,
        }
    }

    fn poll_dataset(&mut self, ctx: &egui::Context) {
        if self.dataset.poll() {
            if let Some(dataset) = self.dataset.dataset() {
                self.facets = Facets::collect(&dataset.quotes);
                self.summary = Some(CatalogSummary::collect(&dataset.quotes));
            }
        }
        if self.dataset.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn reset_paging(&mut self) {
        self.visible = self.config.page_size;
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleLike(id) => {
                let liked = self.likes.toggle(&id);
                tracing::debug!(%id, liked, "like toggled");
            }
            UiAction::Open(id) => {
                self.selected_quote = Some(id);
                self.detail_language = Language::English;
            }
            UiAction::ShowMore => self.visible += self.config.page_size,
            UiAction::ClearFilters => {
                self.filter.clear();
                self.reset_paging();
            }
        }
    }

    fn filter_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filters");
        ui.separator();

        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut self.filter.search)
                .hint_text("text, speaker, topic, role, company")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(5.0);

        egui::ComboBox::from_label("Sort by")
            .selected_text(self.sort.label())
            .show_ui(ui, |ui| {
                for key in SortKey::ALL {
                    ui.selectable_value(&mut self.sort, key, key.label());
                }
            });
        ui.checkbox(&mut self.filter.liked_only, format!("Liked only ({})", self.likes.len()));
        ui.separator();

        egui::CollapsingHeader::new(format!("Role ({} selected)", self.filter.roles.len()))
            .id_source("role_facets")
            .default_open(true)
            .show(ui, |ui| {
                for role in &self.facets.roles {
                    let mut checked = self.filter.roles.contains(role);
                    if ui.checkbox(&mut checked, role.as_str()).changed() {
                        self.filter.toggle_role(role);
                    }
                }
            });
        egui::CollapsingHeader::new(format!("Topic ({} selected)", self.filter.topics.len()))
            .id_source("topic_facets")
            .show(ui, |ui| {
                egui::ScrollArea::vertical().id_source("topic_facets_scroll").max_height(220.0).show(ui, |ui| {
                    for topic in &self.facets.topics {
                        let mut checked = self.filter.topics.contains(topic);
                        if ui.checkbox(&mut checked, topic.as_str()).changed() {
                            self.filter.toggle_topic(topic);
                        }
                    }
                });
            });
        egui::CollapsingHeader::new("Difficulty").default_open(true).show(ui, |ui| {
            for &level in &self.facets.difficulties {
                let mut checked = self.filter.difficulties.contains(&level);
                if ui.checkbox(&mut checked, level.label()).changed() {
                    self.filter.toggle_difficulty(level);
                }
            }
        });

        ui.add_space(5.0);
        if ui.add_enabled(self.filter.is_active(), egui::Button::new("Clear filters")).clicked() {
            self.filter.clear();
        }
        ui.separator();

        if let Some(summary) = &self.summary {
            ui.collapsing("Catalog summary", |ui| {
                ui.label(format!("Quotes: {}", summary.quotes));
                ui.label(format!("Speakers: {}", summary.speakers));
                ui.label(format!("Topics: {}", summary.topics));
                ui.label(format!("Vocabulary terms: {}", summary.vocabulary_terms));
                for language in Language::TRANSLATED {
                    ui.label(format!("{} translations: {}", language.label(), summary.translations(language)));
                }
                ui.label(format!("With insights: {}", summary.with_insights));
            });
        }
        if let Some(dataset) = self.dataset.dataset() {
            let report = dataset.report;
            if report.dropped() > 0 {
                ui.label(
                    egui::RichText::new(format!(
                        "Skipped {} rows ({} without text, {} duplicate ids)",
                        report.dropped(),
                        report.dropped_empty_text,
                        report.dropped_duplicate_id
                    ))
                    .weak(),
                );
            }
        }
        if let Some(err) = self.likes.last_error() {
            ui.colored_label(egui::Color32::RED, format!("Likes not saved: {}", err));
        }
    }

    fn detail_window(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let Some(id) = self.selected_quote.clone() else { return };
        let Some(quote) = self.dataset.dataset().and_then(|d| d.get(&id)) else {
            self.selected_quote = None;
            return;
        };

        let mut open = true;
        let liked = self.likes.is_liked(&quote.id);
        let language = &mut self.detail_language;
        egui::Window::new(quote.speaker.as_str())
            .id(egui::Id::new("quote_detail"))
            .open(&mut open)
            .default_width(560.0)
            .vscroll(true)
            .show(ctx, |ui| quote_detail(ui, quote, liked, language, actions));
        if !open {
            self.selected_quote = None;
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= CARD_PREVIEW_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(CARD_PREVIEW_CHARS).collect();
        format!("{}…", head.trim_end())
    }
}

fn like_label(liked: bool) -> &'static str {
    if liked {
        "♥ Liked"
    } else {
        "♡ Like"
    }
}

fn speaker_line(quote: &Quote) -> String {
    if quote.company.is_empty() {
        quote.role.clone()
    } else {
        format!("{} · {}", quote.role, quote.company)
    }
}

/// Renders one card. Clicking anywhere above the buttons opens the detail window.
fn quote_card(ui: &mut egui::Ui, quote: &Quote, liked: bool, actions: &mut Vec<UiAction>) -> egui::Response {
    egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            let body = ui
                .vertical(|ui| {
                    ui.strong(quote.speaker.as_str());
                    ui.label(egui::RichText::new(speaker_line(quote)).small());
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(quote.topic.as_str()).small().strong());
                        ui.label(egui::RichText::new(quote.difficulty.label()).small());
                        if let Some(date) = quote.episode_date {
                            ui.label(egui::RichText::new(date.format("%Y-%m-%d").to_string()).small().weak());
                        }
                    });
                    ui.add_space(4.0);
                    ui.label(preview(&quote.text));
                })
                .response;
            // Registered before the buttons so they stay on top for hit testing.
            let body = ui
                .interact(body.rect, egui::Id::new(("quote_card", quote.id.as_str())), egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if body.clicked() {
                actions.push(UiAction::Open(quote.id.clone()));
            }
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button(like_label(liked)).clicked() {
                    actions.push(UiAction::ToggleLike(quote.id.clone()));
                }
                if ui.button("Details").clicked() {
                    actions.push(UiAction::Open(quote.id.clone()));
                }
            });
            body
        })
        .inner
}

fn card_grid(ui: &mut egui::Ui, quotes: &[&Quote], likes: &LikeStore, actions: &mut Vec<UiAction>) {
    let columns = ((ui.available_width() / CARD_MIN_WIDTH).floor() as usize).max(1);
    egui::ScrollArea::vertical().id_source("card_grid_scroll").auto_shrink([false, false]).show(ui, |ui| {
        for row in quotes.chunks(columns) {
            ui.columns(columns, |cols| {
                for (col, quote) in cols.iter_mut().zip(row) {
                    quote_card(col, quote, likes.is_liked(&quote.id), actions);
                }
            });
            ui.add_space(8.0);
        }
    });
}

fn vocabulary_entry(ui: &mut egui::Ui, quote_id: &str, index: usize, entry: &VocabularyEntry) {
    egui::CollapsingHeader::new(entry.word.as_str())
        .id_source((quote_id, index))
        .show(ui, |ui| {
            for (label, value) in [
                ("Definition", &entry.definition),
                ("Business context", &entry.business_context),
                ("Example", &entry.example_usage),
            ] {
                if !value.is_empty() {
                    ui.label(format!("{}: {}", label, value));
                }
            }
            if let Some(insight) = entry.insight.as_ref().filter(|i| !i.is_empty()) {
                if !insight.nuance.is_empty() {
                    ui.label(egui::RichText::new(format!("Nuance: {}", insight.nuance)).italics());
                }
                if !insight.synonyms.is_empty() {
                    ui.label(format!("Synonyms: {}", insight.synonyms.join(", ")));
                }
                if !insight.antonyms.is_empty() {
                    ui.label(format!("Antonyms: {}", insight.antonyms.join(", ")));
                }
            }
            if !entry.is_enriched() {
                ui.label(egui::RichText::new("No definition yet.").weak());
            }
        });
}

fn quote_detail(
    ui: &mut egui::Ui,
    quote: &Quote,
    liked: bool,
    language: &mut Language,
    actions: &mut Vec<UiAction>,
) {
    ui.label(speaker_line(quote));
    ui.horizontal_wrapped(|ui| {
        ui.label(format!("Topic: {}", quote.topic));
        ui.label(format!("Difficulty: {}", quote.difficulty));
        if !quote.timestamp.is_empty() {
            ui.label(format!("At {}", quote.timestamp));
        }
        if let Some(date) = quote.episode_date {
            ui.label(format!("Aired {}", date.format("%Y-%m-%d")));
        }
    });
    if quote.topics.len() > 1 {
        ui.label(egui::RichText::new(quote.topics.join(" · ")).small());
    }
    if !quote.speaker_expertise.is_empty() {
        ui.label(egui::RichText::new(format!("Expertise: {}", quote.speaker_expertise.join(", "))).small());
    }
    ui.separator();

    ui.horizontal(|ui| {
        for option in Language::ALL {
            ui.selectable_value(&mut *language, option, option.label());
        }
    });
    match quote.text_in(*language) {
        Some(text) => {
            ui.label(egui::RichText::new(text).size(16.0));
        }
        None => {
            ui.label(egui::RichText::new("Translation not available yet.").weak());
        }
    }
    ui.add_space(6.0);
    if ui.button(like_label(liked)).clicked() {
        actions.push(UiAction::ToggleLike(quote.id.clone()));
    }
    ui.separator();

    ui.strong(format!("Vocabulary ({})", quote.vocabulary.len()));
    for (index, entry) in quote.vocabulary.iter().enumerate() {
        vocabulary_entry(ui, &quote.id, index, entry);
    }

    if !quote.full_context.is_empty() {
        ui.separator();
        egui::CollapsingHeader::new("Full context").show(ui, |ui| {
            ui.label(quote.full_context.as_str());
        });
    }
}

impl App for QuoteBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_dataset(ctx);
        let before = (self.filter.clone(), self.sort);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Clear filters").clicked() {
                        self.filter.clear();
                        ui.close_menu();
                    }
                });
            });
        });

        egui::SidePanel::left("side_panel_left")
            .min_width(240.0)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().id_source("filters_scroll").show(ui, |ui| self.filter_controls(ui));
            });
        if before != (self.filter.clone(), self.sort) {
            self.reset_paging();
        }

        let mut actions = Vec::new();
        {
            let view = ViewState::resolve(&self.dataset, &self.filter, self.sort, &self.likes);
            let total = self.dataset.dataset().map_or(0, |d| d.len());
            let visible = self.visible;
            let likes = &self.likes;
            egui::CentralPanel::default().show(ctx, |ui| match &view {
                ViewState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading quotes…");
                    });
                }
                ViewState::Failed(message) => {
                    ui.heading("Could not load quotes");
                    ui.colored_label(egui::Color32::RED, *message);
                }
                ViewState::Empty => {
                    ui.heading("No quotes match the current filters");
                    if ui.button("Clear filters").clicked() {
                        actions.push(UiAction::ClearFilters);
                    }
                }
                ViewState::Results(quotes) => {
                    let shown = quotes.len().min(visible);
                    ui.horizontal(|ui| {
                        ui.label(format!("Showing {} of {} matching quotes ({} total)", shown, quotes.len(), total));
                        if shown < quotes.len() && ui.button(format!("Show more ({} left)", quotes.len() - shown)).clicked() {
                            actions.push(UiAction::ShowMore);
                        }
                    });
                    ui.separator();
                    card_grid(ui, &quotes[..shown], likes, &mut actions);
                }
            });
        }

        self.detail_window(ctx, &mut actions);

        for action in actions {
            self.apply(action);
        }
    }
}
