use anyhow::Result;
use hn_menubar::config::AppConfig;
use hn_menubar::shell;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = AppConfig::load();

    // RUST_LOG wins over the configured levels.
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(config.logging.filter_directive()),
    };

    // A menu-bar app launched from Finder has no console, so logs go to a
    // daily rotating file. Headless builds keep logging to stderr.
    let _guard = if cfg!(target_os = "macos") {
        let log_dir = config.logging.resolved_log_directory();
        let file_appender = tracing_appender::rolling::daily(log_dir, "hn-menubar.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .compact()
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        None
    };

    tracing::info!("Starting Hacker News Menu Bar App...");
    if let Err(err) = shell::run(config) {
        tracing::error!("Failed to initialize or run the application: {:?}", err);
        return Err(err);
    }
    Ok(())
}
