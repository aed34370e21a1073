use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::platform::macos::{ActivationPolicy, EventLoopExtMacOS};
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

use super::AppContext;
use super::macos::MacDesktop;
use crate::config::AppConfig;
use crate::internal::actions::Flow;
use crate::internal::models::{MenuAction, MenuEntry, UiState};
use crate::internal::refresh::Presenter;

enum UserEvent {
    Menu(MenuEvent),
    Tray(TrayIconEvent),
    State(Box<UiState>),
}

/// Forwards published states to the main thread.
struct ProxyPresenter {
    proxy: Mutex<EventLoopProxy<UserEvent>>,
}

impl Presenter for ProxyPresenter {
    fn present(&self, state: UiState) {
        let proxy = self.proxy.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if proxy.send_event(UserEvent::State(Box::new(state))).is_err() {
            tracing::warn!("Event loop closed; dropping menu update");
        }
    }
}

/// Build the native menu and the id → action table for one UI state.
fn build_menu(state: &UiState) -> Result<(Menu, HashMap<MenuId, MenuAction>)> {
    let menu = Menu::new();
    let mut actions = HashMap::new();

    for entry in &state.entries {
        match entry {
            MenuEntry::Separator => menu.append(&PredefinedMenuItem::separator())?,
            MenuEntry::Item { label, action } => {
                let item = MenuItem::new(label, action.is_some(), None);
                if let Some(action) = action {
                    actions.insert(item.id().clone(), action.clone());
                }
                menu.append(&item)?;
            }
        }
    }

    Ok((menu, actions))
}

/// Run the menu-bar app. Only returns on startup failure.
pub fn run(config: AppConfig) -> Result<()> {
    let mut event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    // Menu bar only: no Dock icon, no app switcher entry.
    event_loop.set_activation_policy(ActivationPolicy::Accessory);

    let proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(UserEvent::Menu(event));
    }));
    let proxy = event_loop.create_proxy();
    TrayIconEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(UserEvent::Tray(event));
    }));

    let context = AppContext::load(&config);
    let mut state = UiState::loading(&context.icon_default());
    let (menu, mut actions) = build_menu(&state)?;

    let desktop = Arc::new(MacDesktop);
    let presenter = Arc::new(ProxyPresenter {
        proxy: Mutex::new(event_loop.create_proxy()),
    });
    let (scheduler, dispatcher) = context
        .start(desktop.clone(), presenter)
        .context("failed to start refresh worker")?;
    let mut scheduler = Some(scheduler);
    let mut tray_icon: Option<TrayIcon> = None;

    tracing::info!("Menu bar app initialized, timer started");

    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                match TrayIconBuilder::new()
                    .with_menu(Box::new(menu.clone()))
                    .with_menu_on_left_click(false)
                    .with_title(&state.title)
                    .with_tooltip("Hacker News")
                    .build()
                {
                    Ok(icon) => tray_icon = Some(icon),
                    Err(e) => {
                        tracing::error!("Failed to build tray icon: {}", e);
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }

            Event::UserEvent(UserEvent::State(new_state)) => {
                match build_menu(&new_state) {
                    Ok((new_menu, new_actions)) => {
                        if let Some(tray) = &tray_icon {
                            tray.set_menu(Some(Box::new(new_menu)));
                            tray.set_title(Some(&new_state.title));
                        }
                        actions = new_actions;
                        state = *new_state;
                    }
                    Err(e) => tracing::error!("Failed to build menu: {}", e),
                }
            }

            Event::UserEvent(UserEvent::Menu(menu_event)) => {
                match actions.get(&menu_event.id).cloned() {
                    Some(action) => {
                        tracing::debug!(%action, "Menu click");
                        if dispatcher.dispatch(&action, desktop.as_ref()) == Flow::Exit {
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                    None => tracing::debug!(id = ?menu_event.id, "Click on entry without action"),
                }
            }

            Event::UserEvent(UserEvent::Tray(TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            })) => {
                dispatcher.open_top_article(state.top_article_url.as_deref(), desktop.as_ref());
            }

            Event::LoopDestroyed => {
                if let Some(scheduler) = scheduler.take() {
                    scheduler.shutdown();
                }
                drop(tray_icon.take());
            }

            _ => {}
        }
    })
}
