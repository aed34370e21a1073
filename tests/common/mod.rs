#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use hn_menubar::api::StorySource;
use hn_menubar::internal::desktop::Desktop;
use hn_menubar::internal::error::{AppError, AppResult};
use hn_menubar::internal::models::{Item, UiState};
use hn_menubar::internal::notification::{Alert, Notification};
use hn_menubar::internal::refresh::Presenter;

/// Desktop double that records every side effect.
#[derive(Default)]
pub struct RecordingDesktop {
    pub notifications: Mutex<Vec<Notification>>,
    pub alerts: Mutex<Vec<Alert>>,
    pub opened: Mutex<Vec<String>>,
    pub prompt_answer: Option<String>,
    pub fail_open: bool,
}

impl RecordingDesktop {
    pub fn answering(text: &str) -> Self {
        Self {
            prompt_answer: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Desktop for RecordingDesktop {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    fn alert(&self, alert: Alert) {
        self.alerts.lock().unwrap().push(alert);
    }

    fn prompt(&self, _title: &str, _message: &str, _default_text: &str) -> Option<String> {
        self.prompt_answer.clone()
    }

    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        if self.fail_open {
            anyhow::bail!("no browser available");
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub states: Mutex<Vec<UiState>>,
}

impl RecordingPresenter {
    pub fn states(&self) -> Vec<UiState> {
        self.states.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&self, state: UiState) {
        self.states.lock().unwrap().push(state);
    }
}

/// In-memory feed. `ids: None` makes the listing fail.
pub struct FakeSource {
    pub ids: Mutex<Option<Vec<u32>>>,
    pub items: HashMap<u32, Item>,
    pub lookups: Mutex<Vec<u32>>,
}

impl FakeSource {
    pub fn new(ids: Vec<u32>, items: Vec<Item>) -> Self {
        Self {
            ids: Mutex::new(Some(ids)),
            items: items.into_iter().map(|item| (item.id, item)).collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            ids: Mutex::new(None),
            items: HashMap::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Make every later listing request fail.
    pub fn fail_listing(&self) {
        *self.ids.lock().unwrap() = None;
    }

    pub fn lookups(&self) -> Vec<u32> {
        self.lookups.lock().unwrap().clone()
    }
}

impl StorySource for FakeSource {
    fn list_top_ids(&self) -> AppResult<Vec<u32>> {
        self.ids
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::Api("expected a JSON array".to_string()))
    }

    fn get_item(&self, id: u32) -> Option<Item> {
        self.lookups.lock().unwrap().push(id);
        self.items.get(&id).cloned()
    }
}

pub fn story(id: u32, score: u32, title: &str) -> Item {
    Item {
        id,
        kind: "story".to_string(),
        title: Some(title.to_string()),
        url: Some(format!("https://example.com/{id}")),
        score: Some(score),
    }
}

pub fn ask(id: u32) -> Item {
    Item {
        id,
        kind: "story".to_string(),
        title: Some(format!("Ask HN: question {id}")),
        url: None,
        score: Some(1),
    }
}

pub fn job(id: u32) -> Item {
    Item {
        id,
        kind: "job".to_string(),
        title: Some("Hiring".to_string()),
        url: Some("https://jobs.example.com".to_string()),
        score: None,
    }
}

/// Unique scratch path under the system temp dir.
pub fn temp_path(test: &str, name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("hn-menubar-{}-{}", test, std::process::id()))
        .join(name)
}
