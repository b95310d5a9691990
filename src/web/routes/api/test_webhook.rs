use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::{config::Destination, embed::WebhookMessage, web::WebResult, AppState};

#[derive(Debug, thiserror::Error)]
pub enum WebhookTestError {
    #[error("general webhook url is not configured")]
    NotConfigured,
    #[error("webhook client error: {0}")]
    WebhookClient(#[from] crate::webhook_client::Error),
}

#[derive(Debug, Serialize)]
pub struct WebhookTestResponse {
    pub success: bool,
    pub message: &'static str,
    /// Status code returned by the destination
    pub status: u16,
}

/// Sends a fixed test message to the general destination.
/// Unlike the form routes this one fails when nothing is configured.
#[tracing::instrument(name = "Testing the general webhook", skip(app_state))]
pub async fn test_webhook(State(app_state): State<AppState>) -> WebResult<Json<WebhookTestResponse>> {
    let webhook_url = app_state
        .webhooks
        .url_for(Destination::General)
        .ok_or(WebhookTestError::NotConfigured)?;

    let status = app_state
        .webhook_client
        .send_message(webhook_url, &WebhookMessage::test_message(Utc::now()))
        .await
        .map_err(WebhookTestError::WebhookClient)?;

    info!("Test webhook sent - STATUS: {status}");
    Ok(Json(WebhookTestResponse {
        success: true,
        message: "Test webhook sent successfully!",
        status: status.as_u16(),
    }))
}
