//! The JSON documents sent to the Discord webhooks and the builders turning
//! form submissions into them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::web::types::{FormType, ValidContact, ValidSubscription};

pub const NOT_PROVIDED: &str = "Not provided";
pub const DEFAULT_SUBJECT: &str = "New contact form submission from PlatesX";
pub const UNKNOWN_SOURCE: &str = "Unknown";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    /// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Title prefix, color and footer of a contact notification.
struct ContactStyle {
    title: &'static str,
    color: u32,
    footer: &'static str,
}

// ###################################
// ->   IMPLS
// ###################################
impl WebhookMessage {
    pub fn single(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
        }
    }

    pub fn contact(contact: &ValidContact, at: DateTime<Utc>) -> Self {
        Self::single(Embed::contact(contact, at))
    }

    pub fn subscription(subscription: &ValidSubscription, at: DateTime<Utc>) -> Self {
        Self::single(Embed::subscription(subscription, at))
    }

    pub fn test_message(at: DateTime<Utc>) -> Self {
        Self::single(Embed::test_message(at))
    }
}

impl Embed {
    /// Form specific fields come first, then the fields common to every contact form.
    pub fn contact(contact: &ValidContact, at: DateTime<Utc>) -> Self {
        let style = ContactStyle::of(contact.form_type);
        let subject = contact.subject.as_deref().unwrap_or(DEFAULT_SUBJECT);

        let mut fields = form_specific_fields(contact);
        fields.extend([
            EmbedField::inline("Name", &contact.name),
            EmbedField::inline("Email", &contact.email),
            EmbedField::inline(
                "Phone",
                contact.phone_number.as_deref().unwrap_or(NOT_PROVIDED),
            ),
            EmbedField::inline("Budget", contact.budget.as_deref().unwrap_or(NOT_PROVIDED)),
            EmbedField::block("Message", &contact.message),
        ]);

        Embed {
            title: format!("{}: {subject}", style.title),
            description: None,
            color: style.color,
            fields,
            timestamp: iso_timestamp(at),
            footer: Some(EmbedFooter::new(style.footer)),
        }
    }

    pub fn subscription(subscription: &ValidSubscription, at: DateTime<Utc>) -> Self {
        Embed {
            title: "📧 New Email Subscription".to_string(),
            description: None,
            color: 0x3498db,
            fields: vec![
                EmbedField::inline("Email", &subscription.email),
                EmbedField::inline(
                    "Name",
                    subscription.name.as_deref().unwrap_or(NOT_PROVIDED),
                ),
                EmbedField::inline(
                    "Source",
                    subscription.source.as_deref().unwrap_or(UNKNOWN_SOURCE),
                ),
            ],
            timestamp: iso_timestamp(at),
            footer: Some(EmbedFooter::new("PlatesX Email Subscription")),
        }
    }

    pub fn test_message(at: DateTime<Utc>) -> Self {
        Embed {
            title: "🧪 Test Webhook Message".to_string(),
            description: Some("This is a test message from the PlatesX contact form API".to_string()),
            color: 0x00ff00,
            fields: Vec::new(),
            timestamp: iso_timestamp(at),
            footer: None,
        }
    }
}

impl EmbedField {
    pub fn inline(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            inline: Some(true),
        }
    }

    pub fn block(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            inline: None,
        }
    }
}

impl EmbedFooter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl ContactStyle {
    fn of(form_type: FormType) -> Self {
        match form_type {
            FormType::Buying => ContactStyle {
                title: "🛒 New Buying Enquiry",
                color: 0x4CAF50,
                footer: "PlatesX Buying Enquiry",
            },
            FormType::Selling => ContactStyle {
                title: "💰 New Selling Request",
                color: 0xFFC107,
                footer: "PlatesX Selling Request",
            },
            FormType::Sourcing => ContactStyle {
                title: "🔍 New Sourcing Request",
                color: 0x2196F3,
                footer: "PlatesX Sourcing Request",
            },
            FormType::General => ContactStyle {
                title: "📬 New General Enquiry",
                color: 0x9C27B0,
                footer: "PlatesX General Enquiry",
            },
        }
    }
}

// ###################################
// ->   HELPERS
// ###################################
fn form_specific_fields(contact: &ValidContact) -> Vec<EmbedField> {
    let candidates = match contact.form_type {
        FormType::Buying => vec![("Plate of Interest", &contact.plate_number)],
        FormType::Selling => vec![
            ("Plate to Sell", &contact.plate_to_sell),
            ("Asking Price", &contact.asking_price),
        ],
        FormType::Sourcing => vec![("Desired Plate/Style", &contact.desired_plate)],
        FormType::General => Vec::new(),
    };

    candidates
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(|value| EmbedField::inline(name, value))
        })
        .collect()
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
