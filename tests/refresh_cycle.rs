mod common;

use std::sync::{Arc, RwLock};

use common::{FakeSource, RecordingDesktop, RecordingPresenter, ask, job, story};
use hn_menubar::internal::models::{DisplayState, MenuAction};
use hn_menubar::internal::notification::NotificationType;
use hn_menubar::internal::refresh::{CyclePhase, RefreshCycle};
use hn_menubar::internal::settings::Settings;

struct Harness {
    source: Arc<FakeSource>,
    desktop: Arc<RecordingDesktop>,
    presenter: Arc<RecordingPresenter>,
    cycle: RefreshCycle<Arc<FakeSource>>,
}

fn harness(source: FakeSource, settings: Settings) -> Harness {
    let source = Arc::new(source);
    let desktop = Arc::new(RecordingDesktop::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let cycle = RefreshCycle::new(
        Arc::clone(&source),
        Arc::new(RwLock::new(settings)),
        desktop.clone(),
        presenter.clone(),
    );
    Harness {
        source,
        desktop,
        presenter,
        cycle,
    }
}

fn two_per_menu() -> Settings {
    Settings {
        articles_per_menu: 2,
        ..Settings::default()
    }
}

#[test]
fn ready_state_lists_qualifying_articles() {
    let source = FakeSource::new(
        vec![1, 2, 3, 4],
        vec![
            story(1, 300, "Rust 2024 is here"),
            ask(2),
            story(3, 42, "Show HN: a tiny tray app"),
            job(4),
        ],
    );
    let mut h = harness(source, two_per_menu());

    let state = h.cycle.run();

    assert_eq!(state.display, DisplayState::Ready);
    assert_eq!(state.title, "📰 [300] Rust 2024 is here");
    assert_eq!(state.top_article_url.as_deref(), Some("https://example.com/1"));
    insta::assert_snapshot!(state.labels().join("\n"), @r"
1. [300] Rust 2024 is here
2. [42] Show HN: a tiny tray app
Refresh
Settings
Quit
");
    assert_eq!(
        state.actions()[0],
        &MenuAction::OpenUrl("https://example.com/1".to_string())
    );
    // Target reached after id 3, so id 4 is never fetched.
    assert_eq!(h.source.lookups(), vec![1, 2, 3]);
    assert!(h.desktop.notifications().is_empty());
    assert_eq!(h.presenter.states(), vec![state]);
    assert_eq!(h.cycle.phase(), CyclePhase::Idle);
}

#[test]
fn refresh_label_shows_previous_success() {
    let source = FakeSource::new(vec![1], vec![story(1, 10, "Only one")]);
    let mut h = harness(source, two_per_menu());

    let first = h.cycle.run();
    assert!(first.labels().contains(&"Refresh"));
    assert!(h.cycle.last_refresh_time().is_some());

    let second = h.cycle.run();
    let refresh = second
        .labels()
        .into_iter()
        .find(|l| l.starts_with("Refresh"))
        .unwrap()
        .to_string();
    assert!(refresh.starts_with("Refresh (Last: "), "got {refresh}");
    assert_eq!(refresh.len(), "Refresh (Last: HH:MM:SS)".len());
}

#[test]
fn scan_stops_at_five_times_menu_size() {
    let ids: Vec<u32> = (1..=40).collect();
    let items = ids.iter().map(|&id| ask(id)).collect();
    let mut h = harness(FakeSource::new(ids, items), two_per_menu());

    let state = h.cycle.run();

    assert_eq!(h.source.lookups(), (1..=10).collect::<Vec<_>>());
    assert_eq!(state.display, DisplayState::Empty);
}

#[test]
fn empty_list_shows_empty_wording() {
    let mut h = harness(FakeSource::new(vec![], vec![]), Settings::default());

    let state = h.cycle.run();

    assert_eq!(state.display, DisplayState::Empty);
    assert_eq!(state.title, "📰 HN Empty");
    assert_eq!(
        state.labels(),
        vec!["No suitable articles found", "Refresh", "Settings", "Quit"]
    );
    assert!(h.source.lookups().is_empty());
    assert!(h.desktop.notifications().is_empty());
}

#[test]
fn list_failure_shows_error_and_notifies_once() {
    let mut h = harness(FakeSource::failing(), Settings::default());

    let state = h.cycle.run();

    assert_eq!(state.display, DisplayState::Error);
    assert_eq!(state.title, "⚠️ HN Err");
    assert_eq!(
        state.labels(),
        vec!["Error fetching stories", "Refresh", "Settings", "Quit"]
    );
    let notifications = h.desktop.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].subtitle, "API Error");
    assert_eq!(notifications[0].notification_type, NotificationType::Error);
    assert!(h.source.lookups().is_empty());
}

#[test]
fn error_after_success_keeps_top_article() {
    let source = FakeSource::new(vec![1], vec![story(1, 5, "Kept")]);
    let mut h = harness(source, Settings::default());

    let ready = h.cycle.run();
    assert_eq!(ready.top_article_url.as_deref(), Some("https://example.com/1"));

    h.source.fail_listing();
    let error = h.cycle.run();
    assert_eq!(error.display, DisplayState::Error);
    assert_eq!(error.top_article_url.as_deref(), Some("https://example.com/1"));
    assert_eq!(error.last_refresh_time, ready.last_refresh_time);
    assert_eq!(h.presenter.states().len(), 2);
}

#[test]
fn long_titles_respect_configured_length() {
    let long = "An extraordinarily long headline that keeps going well past any menu bar";
    let source = FakeSource::new(vec![7], vec![story(7, 1234, long)]);
    let settings = Settings {
        title_max_len: 30,
        ..Settings::default()
    };
    let mut h = harness(source, settings);

    let state = h.cycle.run();

    assert_eq!(state.title.chars().count(), 30);
    assert!(state.title.starts_with("📰 [1234] An extra"));
    assert!(state.title.ends_with("..."));
}

#[test]
fn settings_edits_apply_to_next_cycle() {
    let source = FakeSource::new(vec![1], vec![story(1, 9, "A headline of some length")]);
    let settings = Arc::new(RwLock::new(Settings::default()));
    let mut cycle = RefreshCycle::new(
        source,
        settings.clone(),
        Arc::new(RecordingDesktop::default()),
        Arc::new(RecordingPresenter::default()),
    );

    assert_eq!(cycle.run().title, "📰 [9] A headline of some length");
    settings.write().unwrap().title_max_len = 12;
    assert_eq!(cycle.run().title, "📰 [9] A h...");
}
