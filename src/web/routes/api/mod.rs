pub mod contact;
pub mod subscribe;
pub mod test_webhook;

pub use contact::contact;
pub use subscribe::subscribe;
pub use test_webhook::test_webhook;

use serde::Serialize;

/// The JSON body of a successfully handled form submission.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub success: bool,
    pub message: &'static str,
    /// Only present when the destination isn't configured and nothing was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_note: Option<String>,
}

impl FormResponse {
    pub fn sent(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            dev_note: None,
        }
    }

    pub fn skipped(message: &'static str, dev_note: String) -> Self {
        Self {
            success: true,
            message,
            dev_note: Some(dev_note),
        }
    }
}
