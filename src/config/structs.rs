//! The configuration structs used to build the AppConfig, and their impls.
use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::{ConfigError, ConfigResult};

/// Raw environment variables holding the Discord webhook URLs, one per destination.
pub const WEBHOOK_ENV_VARS: [&str; 5] = [
    "DISCORD_WEBHOOK_URL",
    "DISCORD_WEBHOOK_URL_BUYING",
    "DISCORD_WEBHOOK_URL_SELLING",
    "DISCORD_WEBHOOK_URL_SOURCING",
    "DISCORD_WEBHOOK_URL_EMAIL",
];

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub client_config: ClientConfig,
    #[serde(default)]
    pub webhooks: WebhookUrls,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout_millis: u64,
}

/// The webhook URLs of every destination. A `None` (or empty) URL means the destination
/// is not configured and deliveries to it are skipped.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct WebhookUrls {
    #[serde(default, rename = "discord_webhook_url")]
    pub general: Option<SecretString>,
    #[serde(default, rename = "discord_webhook_url_buying")]
    pub buying: Option<SecretString>,
    #[serde(default, rename = "discord_webhook_url_selling")]
    pub selling: Option<SecretString>,
    #[serde(default, rename = "discord_webhook_url_sourcing")]
    pub sourcing: Option<SecretString>,
    #[serde(default, rename = "discord_webhook_url_email")]
    pub email: Option<SecretString>,
}

/// Where a notification ends up.
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Destination {
    General,
    Buying,
    Selling,
    Sourcing,
    Email,
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// Layers `base.toml`, `<environment>.toml` and the environment on top of each other.
    ///
    /// `APP_` prefixed variables override the files (`__` separates nested keys), `PORT` overrides
    /// the listening port and the raw `DISCORD_WEBHOOK_URL*` variables fill in the webhook table.
    pub fn load(config_dir: &Path, environment: Environment) -> ConfigResult<Self> {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        let config = Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "net_config.app_port".into()))
            .merge(
                Env::raw()
                    .only(&WEBHOOK_ENV_VARS)
                    .map(|key| format!("webhooks.{}", key.as_str().to_ascii_lowercase()).into()),
            )
            .extract()?;

        Ok(config)
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

impl WebhookUrls {
    /// Returns the URL configured for `destination`, treating blank values as unconfigured.
    pub fn url_for(&self, destination: Destination) -> Option<&SecretString> {
        let url = match destination {
            Destination::General => &self.general,
            Destination::Buying => &self.buying,
            Destination::Selling => &self.selling,
            Destination::Sourcing => &self.sourcing,
            Destination::Email => &self.email,
        };

        url.as_ref()
            .filter(|url| !url.expose_secret().trim().is_empty())
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}
