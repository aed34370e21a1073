use jiff::Zoned;
use serde::Deserialize;
use strum_macros::Display;

/// Item record as returned by the `item/{id}.json` endpoint.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Item {
    pub id: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub score: Option<u32>,
}

impl Item {
    /// A story that links out to an external page.
    pub fn is_qualifying(&self) -> bool {
        self.kind == "story" && self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub url: Option<String>,
    pub score: u32,
}

impl From<Item> for Article {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title.unwrap_or_else(|| "No Title Provided".to_string()),
            url: item.url,
            score: item.score.unwrap_or(0),
        }
    }
}

/// What a menu entry does when clicked.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MenuAction {
    OpenUrl(String),
    OpenSettings,
    Refresh,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Entries without an action are rendered disabled.
    Item {
        label: String,
        action: Option<MenuAction>,
    },
    Separator,
}

impl MenuEntry {
    pub fn status(label: impl Into<String>) -> Self {
        Self::Item {
            label: label.into(),
            action: None,
        }
    }

    pub fn action(label: impl Into<String>, action: MenuAction) -> Self {
        Self::Item {
            label: label.into(),
            action: Some(action),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Item { label, .. } => Some(label),
            Self::Separator => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum DisplayState {
    #[default]
    Loading,
    Error,
    Empty,
    Ready,
}

/// Everything the menu bar shows. Published as a whole after every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub display: DisplayState,
    pub title: String,
    pub entries: Vec<MenuEntry>,
    pub top_article_url: Option<String>,
    pub last_refresh_time: Option<Zoned>,
}

impl UiState {
    pub fn loading(icon_default: &str) -> Self {
        Self {
            display: DisplayState::Loading,
            title: format!("{icon_default} Loading..."),
            entries: with_trailer(vec![MenuEntry::status("Loading...")], "Refresh".to_string()),
            top_article_url: None,
            last_refresh_time: None,
        }
    }

    /// Labels of all non-separator entries, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().filter_map(MenuEntry::label).collect()
    }

    /// Actions in menu order, used by tests and the headless shell.
    pub fn actions(&self) -> Vec<&MenuAction> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                MenuEntry::Item {
                    action: Some(action),
                    ..
                } => Some(action),
                _ => None,
            })
            .collect()
    }
}

/// Appends the fixed tail every menu carries: separator, Refresh, Settings, Quit.
pub fn with_trailer(mut entries: Vec<MenuEntry>, refresh_label: String) -> Vec<MenuEntry> {
    entries.push(MenuEntry::Separator);
    entries.push(MenuEntry::action(refresh_label, MenuAction::Refresh));
    entries.push(MenuEntry::action("Settings", MenuAction::OpenSettings));
    entries.push(MenuEntry::action("Quit", MenuAction::Quit));
    entries
}
