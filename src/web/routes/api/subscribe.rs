use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use tracing::{info, warn};

use super::FormResponse;
use crate::{
    config::Destination,
    embed::WebhookMessage,
    web::{
        types::{parse_form_body, DataParsingError, DeserSubscription, ValidSubscription},
        WebResult,
    },
    AppState,
};

const SUBSCRIBED_MSG: &str = "Thank you for subscribing!";

#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("webhook client error: {0}")]
    WebhookClient(#[from] crate::webhook_client::Error),
}

#[tracing::instrument(name = "Relaying newsletter subscription", skip(app_state, body))]
pub async fn subscribe(
    State(app_state): State<AppState>,
    body: Bytes,
) -> WebResult<Json<FormResponse>> {
    let subscription: DeserSubscription =
        parse_form_body(&body).map_err(SubscribeError::MalformedBody)?;
    let subscription: ValidSubscription = subscription
        .try_into()
        .map_err(SubscribeError::DataParsing)?;

    let Some(webhook_url) = app_state.webhooks.url_for(Destination::Email) else {
        warn!("Discord webhook URL for emails not configured. Message sending is disabled.");
        return Ok(Json(FormResponse::skipped(
            SUBSCRIBED_MSG,
            "Discord webhook URL for emails not configured, message not actually sent".to_string(),
        )));
    };

    let message = WebhookMessage::subscription(&subscription, Utc::now());
    let status = app_state
        .webhook_client
        .send_message(webhook_url, &message)
        .await
        .map_err(SubscribeError::WebhookClient)?;

    info!("Email subscription successfully sent to Discord - STATUS: {status}");
    Ok(Json(FormResponse::sent(SUBSCRIBED_MSG)))
}
