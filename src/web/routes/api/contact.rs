use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use tracing::{info, warn, Span};

use super::FormResponse;
use crate::{
    embed::WebhookMessage,
    web::{
        types::{parse_form_body, DataParsingError, DeserContact, ValidContact},
        WebResult,
    },
    AppState,
};

const CONTACT_SENT_MSG: &str = "Your message has been sent! We'll get back to you soon.";

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("webhook client error: {0}")]
    WebhookClient(#[from] crate::webhook_client::Error),
}

// ###################################
// ->   API
// ###################################
/// Relays a contact form (general, buying, selling or sourcing) to its Discord channel.
///
/// The body is read as raw bytes so that any JSON object is accepted regardless of the
/// `Content-Type` header, a body that doesn't parse is an internal failure.
#[tracing::instrument(
    name = "Relaying contact form",
    skip(app_state, body),
    fields(form_type = tracing::field::Empty, destination = tracing::field::Empty)
)]
pub async fn contact(
    State(app_state): State<AppState>,
    body: Bytes,
) -> WebResult<Json<FormResponse>> {
    let contact: DeserContact =
        parse_form_body(&body).map_err(ContactError::MalformedBody)?;
    let contact: ValidContact = contact.try_into().map_err(ContactError::DataParsing)?;

    let destination = contact.form_type.destination();
    let span = Span::current();
    span.record("form_type", contact.form_tag.as_str());
    span.record("destination", destination.as_ref());

    let Some(webhook_url) = app_state.webhooks.url_for(destination) else {
        warn!(
            "Discord webhook URL for {} form not configured. Message sending is disabled.",
            contact.form_tag
        );
        return Ok(Json(FormResponse::skipped(
            CONTACT_SENT_MSG,
            format!(
                "Discord webhook URL for {} not configured, message not actually sent",
                contact.form_tag
            ),
        )));
    };

    let message = WebhookMessage::contact(&contact, Utc::now());
    let status = app_state
        .webhook_client
        .send_message(webhook_url, &message)
        .await
        .map_err(ContactError::WebhookClient)?;

    info!("Message successfully sent to Discord - STATUS: {status}");
    Ok(Json(FormResponse::sent(CONTACT_SENT_MSG)))
}
