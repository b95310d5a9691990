//! Most of the structs in `web` module and their implementations live here.
//! Includes the form submissions, their validation and tests for those.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};
use strum_macros::AsRefStr;

use crate::config::Destination;

/// The tag used when a contact submission doesn't carry a `formType`.
pub const DEFAULT_FORM_TAG: &str = "general";

// ###################################
// ->   STRUCTS
// ###################################
/// The category of a contact form, selects the destination and the look of the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FormType {
    General,
    Buying,
    Selling,
    Sourcing,
}

/// Deserializable contact form submission.
/// Every field is optional here, the required ones are checked when converting into `ValidContact`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeserContact {
    #[serde(default, deserialize_with = "form_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub form_type: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub plate_number: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub plate_to_sell: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub asking_price: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub desired_plate: Option<String>,
}

/// Validated contact form submission
#[derive(Debug, Clone)]
pub struct ValidContact {
    pub form_type: FormType,
    /// The `formType` exactly as the client sent it, `general` if it was missing.
    pub form_tag: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: Option<String>,
    pub phone_number: Option<String>,
    pub budget: Option<String>,
    pub plate_number: Option<String>,
    pub plate_to_sell: Option<String>,
    pub asking_price: Option<String>,
    pub desired_plate: Option<String>,
}

/// Deserializable newsletter subscription
#[derive(Debug, Default, Deserialize)]
pub struct DeserSubscription {
    #[serde(default, deserialize_with = "form_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "form_text")]
    pub source: Option<String>,
}

/// Validated newsletter subscription
#[derive(Debug, Clone)]
pub struct ValidSubscription {
    pub email: String,
    pub name: Option<String>,
    pub source: Option<String>,
}

// ###################################
// ->   IMPLS
// ###################################
impl FormType {
    /// Unknown tags fall back to `General` instead of being rejected.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "buying" => Self::Buying,
            "selling" => Self::Selling,
            "sourcing" => Self::Sourcing,
            _ => Self::General,
        }
    }

    pub fn destination(self) -> Destination {
        match self {
            Self::General => Destination::General,
            Self::Buying => Destination::Buying,
            Self::Selling => Destination::Selling,
            Self::Sourcing => Destination::Sourcing,
        }
    }
}

impl TryFrom<DeserContact> for ValidContact {
    type Error = DataParsingError;

    fn try_from(deser: DeserContact) -> Result<Self, Self::Error> {
        let (name, email, message) = match (deser.name, deser.email, deser.message) {
            (Some(name), Some(email), Some(message)) => (name, email, message),
            (name, email, message) => {
                let missing = [("name", name), ("email", email), ("message", message)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(key, _)| key)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(DataParsingError::MissingRequiredFields(missing));
            }
        };

        let form_tag = deser
            .form_type
            .unwrap_or_else(|| DEFAULT_FORM_TAG.to_string());

        Ok(ValidContact {
            form_type: FormType::from_tag(&form_tag),
            form_tag,
            name,
            email,
            message,
            subject: deser.subject,
            phone_number: deser.phone_number,
            budget: deser.budget,
            plate_number: deser.plate_number,
            plate_to_sell: deser.plate_to_sell,
            asking_price: deser.asking_price,
            desired_plate: deser.desired_plate,
        })
    }
}

impl TryFrom<DeserSubscription> for ValidSubscription {
    type Error = DataParsingError;

    fn try_from(deser: DeserSubscription) -> Result<Self, Self::Error> {
        let email = deser.email.ok_or(DataParsingError::EmailMissing)?;

        Ok(ValidSubscription {
            email,
            name: deser.name,
            source: deser.source,
        })
    }
}

// ###################################
// ->   HELPERS
// ###################################

/// Parses a form submission body, which has to be a JSON object.
/// Derived `Deserialize` impls would also fill a struct from a JSON array by position,
/// so the body goes through a `Map` first.
pub fn parse_form_body<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    let object: Map<String, Value> = serde_json::from_slice(body)?;
    serde_json::from_value(Value::Object(object))
}

/// Turns any JSON value into the text shown in the notification.
/// `null` and empty strings count as a missing field, strings are kept as they are and
/// everything else is written out as JSON.
fn form_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    let text = match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    };

    Ok(text)
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("missing required fields: {0}")]
    MissingRequiredFields(String),
    #[error("missing email")]
    EmailMissing,
}
