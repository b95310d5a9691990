use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::embed::WebhookMessage;

/// A thin client over Discord's incoming webhooks.
/// Holds a single `reqwest::Client` so connections are pooled across requests.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    pub http_client: Client,
}

impl WebhookClient {
    pub fn new(timeout: std::time::Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(WebhookClient { http_client })
    }

    /// POSTs `message` to the webhook `url` once.
    /// Returns the status code of the destination, any non-2xx status is an `Err`.
    pub async fn send_message(
        &self,
        url: &SecretString,
        message: &WebhookMessage,
    ) -> Result<StatusCode> {
        let url = reqwest::Url::parse(url.expose_secret())
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let resp = self
            .http_client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| Error::Reqwest(e.without_url()))?;

        let status = resp.status();
        debug!("{:<20} - destination responded with: {status}", "send_message");

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Rejected { status, body });
        }

        Ok(status)
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse webhook url: {0}")]
    UrlParsing(String),
    #[error("webhook rejected the message with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
