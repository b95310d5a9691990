//! PlatesX form relay.
//!
//! Receives the contact and newsletter forms of the PlatesX website and forwards them,
//! as Discord embeds, to the webhook configured for the form's category.

pub mod app;
pub mod config;
pub mod embed;
mod error;
pub mod web;
pub mod webhook_client;

pub use app::{serve, App, AppState};
pub use error::{Error, Result};
pub use webhook_client::WebhookClient;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Human readable console logging, used for debug builds and tests.
/// `RUST_LOG` overrides the default `debug` filter.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

/// JSON logging for release builds.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
