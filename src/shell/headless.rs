use anyhow::{Context, Result};
use std::sync::Arc;

use super::AppContext;
use crate::config::AppConfig;
use crate::internal::desktop::LogDesktop;
use crate::internal::models::UiState;
use crate::internal::refresh::Presenter;

/// Writes every published menu to the log.
struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&self, state: UiState) {
        tracing::info!(display = %state.display, title = %state.title, "Menu bar updated");
        for label in state.labels() {
            tracing::info!("  {}", label);
        }
    }
}

/// Run the refresh cycle without a menu bar until Ctrl-C.
pub fn run(config: AppConfig) -> Result<()> {
    tracing::warn!("No menu bar on this platform; running headless");
    let context = AppContext::load(&config);
    LogPresenter.present(UiState::loading(&context.icon_default()));

    let (scheduler, _dispatcher) = context.start(Arc::new(LogDesktop), Arc::new(LogPresenter))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build signal runtime")?;
    runtime
        .block_on(tokio::signal::ctrl_c())
        .context("failed to listen for Ctrl-C")?;

    tracing::info!("Interrupted, shutting down");
    scheduler.shutdown();
    Ok(())
}
