//! Tries to create an `AppConfig` from config files and the environment.
//! Uses `figment` to layer `config/base.toml`, `config/<environment>.toml` and env variables.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod structs;

use std::sync::OnceLock;
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use structs::{
    AppConfig, ClientConfig, Destination, Environment, NetConfig, WebhookUrls, WEBHOOK_ENV_VARS,
};

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!(
            "{:<20} - Initializing the configuration",
            "get_or_init_config"
        );
        let base_path = std::env::current_dir().expect("Failed to determine the current DIR.");
        let config_dir = base_path.join("config");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .expect("Failed to parse APP_ENVIRONMENT.");

        let config = AppConfig::load(&config_dir, environment)
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));

        // Only report presence, the URLs themselves carry the webhook token.
        for destination in [
            Destination::General,
            Destination::Buying,
            Destination::Selling,
            Destination::Sourcing,
            Destination::Email,
        ] {
            let configured = config.webhooks.url_for(destination).is_some();
            info!(
                "{:<20} - {:<8} webhook configured: {configured}",
                "get_or_init_config",
                destination.as_ref()
            );
        }

        config
    })
}
