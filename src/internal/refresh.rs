//! One fetch → filter → present pass over the top-stories feed.
//!
//! The cycle owns the state that survives between passes (the top article URL
//! and the last successful refresh time). It is the only writer of [`UiState`];
//! each pass builds a complete new state and hands it to the [`Presenter`] in
//! one call, so the menu never shows a half-built list.

use jiff::Zoned;
use std::sync::{Arc, RwLock};
use strum_macros::Display;
use tracing::{debug, info, warn};

use crate::api::StorySource;
use crate::internal::desktop::Desktop;
use crate::internal::models::{Article, DisplayState, MenuAction, MenuEntry, UiState, with_trailer};
use crate::internal::notification::Notification;
use crate::internal::settings::Settings;
use crate::utils::datetime::refresh_label;
use crate::utils::text::{format_bar_title, format_menu_label};

/// Receives every new UI state. Implemented by the menu-bar shell.
pub trait Presenter: Send + Sync {
    fn present(&self, state: UiState);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CyclePhase {
    Idle,
    Fetching,
    Filtering,
    Presenting,
}

pub struct RefreshCycle<S> {
    source: S,
    settings: Arc<RwLock<Settings>>,
    desktop: Arc<dyn Desktop>,
    presenter: Arc<dyn Presenter>,
    phase: CyclePhase,
    top_article_url: Option<String>,
    last_refresh_time: Option<Zoned>,
}

impl<S: StorySource> RefreshCycle<S> {
    pub fn new(
        source: S,
        settings: Arc<RwLock<Settings>>,
        desktop: Arc<dyn Desktop>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            source,
            settings,
            desktop,
            presenter,
            phase: CyclePhase::Idle,
            top_article_url: None,
            last_refresh_time: None,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn last_refresh_time(&self) -> Option<&Zoned> {
        self.last_refresh_time.as_ref()
    }

    fn enter(&mut self, phase: CyclePhase) {
        debug!(from = %self.phase, to = %phase, "refresh phase");
        self.phase = phase;
    }

    /// Run one full cycle, publish the resulting state and return it.
    pub fn run(&mut self) -> UiState {
        info!("Starting Hacker News update cycle");
        // Dialog edits made while this pass runs apply to the next one.
        let settings = self
            .settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        self.enter(CyclePhase::Fetching);
        let state = match self.source.list_top_ids() {
            Err(e) => {
                tracing::error!("Error fetching top stories: {}", e);
                self.desktop.notify(Notification::fetch_failed(&e));
                self.error_state(&settings)
            }
            Ok(ids) => {
                self.enter(CyclePhase::Filtering);
                let articles = collect_articles(&self.source, &ids, &settings);
                if articles.is_empty() {
                    warn!("Update completed but no suitable articles found");
                    self.empty_state(&settings)
                } else {
                    self.ready_state(&settings, &articles)
                }
            }
        };

        self.enter(CyclePhase::Presenting);
        self.presenter.present(state.clone());
        self.enter(CyclePhase::Idle);
        state
    }

    fn error_state(&self, settings: &Settings) -> UiState {
        UiState {
            display: DisplayState::Error,
            title: format!("{} HN Err", settings.icon_error),
            entries: with_trailer(
                vec![MenuEntry::status("Error fetching stories")],
                "Refresh".to_string(),
            ),
            top_article_url: self.top_article_url.clone(),
            last_refresh_time: self.last_refresh_time.clone(),
        }
    }

    fn empty_state(&self, settings: &Settings) -> UiState {
        UiState {
            display: DisplayState::Empty,
            title: format!("{} HN Empty", settings.icon_default),
            entries: with_trailer(
                vec![MenuEntry::status("No suitable articles found")],
                "Refresh".to_string(),
            ),
            top_article_url: self.top_article_url.clone(),
            last_refresh_time: self.last_refresh_time.clone(),
        }
    }

    fn ready_state(&mut self, settings: &Settings, articles: &[Article]) -> UiState {
        let top = &articles[0];
        self.top_article_url = top.url.clone();
        let title = format_bar_title(
            &settings.icon_default,
            top.score,
            &top.title,
            settings.title_max_len,
        );

        let entries = articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let label = format_menu_label(i + 1, article.score, &article.title);
                match &article.url {
                    Some(url) => MenuEntry::action(label, MenuAction::OpenUrl(url.clone())),
                    None => MenuEntry::status(label),
                }
            })
            .collect();
        // The label shows the previous successful refresh, then the clock moves on.
        let entries = with_trailer(entries, refresh_label(self.last_refresh_time.as_ref()));
        self.last_refresh_time = Some(Zoned::now());

        info!(title = %title, articles = articles.len(), "Update successful");
        UiState {
            display: DisplayState::Ready,
            title,
            entries,
            top_article_url: self.top_article_url.clone(),
            last_refresh_time: self.last_refresh_time.clone(),
        }
    }
}

/// Walk `ids` in rank order collecting qualifying articles.
///
/// Stops after `articles_per_menu` matches or `articles_per_menu * 5` lookups,
/// whichever comes first. Failed lookups count against the bound.
pub fn collect_articles<S: StorySource + ?Sized>(
    source: &S,
    ids: &[u32],
    settings: &Settings,
) -> Vec<Article> {
    let wanted = settings.articles_per_menu;
    let limit = settings.scan_limit().min(ids.len());
    let mut articles = Vec::with_capacity(wanted);

    for (examined, &id) in ids.iter().enumerate() {
        if articles.len() >= wanted {
            info!(wanted, "Reached target article count");
            break;
        }
        if examined >= limit {
            warn!(limit, "Scan limit reached without enough articles");
            break;
        }

        if let Some(item) = source.get_item(id)
            && item.is_qualifying()
        {
            articles.push(Article::from(item));
        }
    }

    articles
}
