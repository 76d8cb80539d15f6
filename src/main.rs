//! DFC Widgets Gallery - Main Entry Point

use dfc_widgets::app::application::run_app;
use dfc_widgets::config::WidgetsConfig;

const CONFIG_PATH: &str = "widgets.toml";

fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting DFC widgets gallery...");

    let config = match WidgetsConfig::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, path = CONFIG_PATH, "invalid widget config, using defaults");
            WidgetsConfig::default()
        }
    };

    run_app(config);
}
