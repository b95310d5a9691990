use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::routes::{ContactError, SubscribeError, WebhookTestError};

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("contact error: {0}")]
    Contact(#[from] ContactError),
    #[error("subscribe error: {0}")]
    Subscribe(#[from] SubscribeError),
    #[error("webhook test error: {0}")]
    WebhookTest(#[from] WebhookTestError),
}

impl Error {
    /// Maps the server side error onto what the client gets to see.
    /// Anything that isn't a problem with the client's input is reported as a generic failure.
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::Contact(ContactError::DataParsing(_)) => (StatusCode::BAD_REQUEST, MissingFields),
            Error::Contact(_) => (StatusCode::INTERNAL_SERVER_ERROR, ContactFailed),

            Error::Subscribe(SubscribeError::DataParsing(_)) => {
                (StatusCode::BAD_REQUEST, EmailRequired)
            }
            Error::Subscribe(_) => (StatusCode::INTERNAL_SERVER_ERROR, SubscribeFailed),

            Error::WebhookTest(WebhookTestError::NotConfigured) => {
                (StatusCode::BAD_REQUEST, WebhookNotConfigured)
            }
            Error::WebhookTest(_) => (StatusCode::INTERNAL_SERVER_ERROR, WebhookTestFailed),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<20} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The errors as the client sees them, the `Display` impl is the message in the response body.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Missing required fields")]
    MissingFields,
    #[display("Email is required")]
    EmailRequired,
    #[display("Discord webhook URL not configured")]
    WebhookNotConfigured,
    #[display("Failed to send your message. Please try again later.")]
    ContactFailed,
    #[display("Failed to process your subscription. Please try again later.")]
    SubscribeFailed,
    #[display("Failed to send test webhook. Please try again later.")]
    WebhookTestFailed,
}
