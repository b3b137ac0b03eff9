//! Logging helpers
//!
//! Subscriber set-up and formatted log lines shared by the binary and the
//! services.
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with verbose
/// logging. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs the start-up banner
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 PathFinder started - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🌐 Predict endpoint base: {}", config.predict_base());
    info!("🌐 Chat endpoint base: {}", config.chat_base());
    info!("📚 Catalog: {:?}", config.catalog_mode);
    info!("{}", "=".repeat(60));
}

/// Logs a finished roadmap batch
pub fn log_roadmaps_complete(done: usize, failed: usize) {
    info!("{}", "─".repeat(60));
    info!("✓ Roadmaps finished: {} ok, {} failed", done, failed);
    info!("{}", "─".repeat(60));
}

/// Shortens long text for log lines
///
/// # Arguments
/// - `text`: original text
/// - `max_len`: maximum number of characters kept
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
