use crate::entities::messages::Message as MessageEntity;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A per-message secret as sent by the author. Clients are sloppy about
/// its JSON type, so numbers and booleans are accepted and used in their
/// textual form.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(secret) => Ok(Self(secret)),
            serde_json::Value::Number(number) => Ok(Self(number_text(&number))),
            serde_json::Value::Bool(flag) => Ok(Self(flag.to_string())),
            other => Err(D::Error::custom(format!(
                "expected a string, number or boolean password, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Renders a JSON number the way a JavaScript client would stringify it,
/// so `1.0` and `1` name the same secret.
fn number_text(number: &serde_json::Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    let Some(value) = number.as_f64() else {
        return number.to_string();
    };

    let magnitude = value.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    if value.fract() == 0.0 {
        return format!("{}", value as i128);
    }
    value.to_string()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub name: String,
    pub password: Secret,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub name: String,
    pub password: Secret,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: Secret,
    pub new_password: Secret,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMessageRequest {
    pub password: Secret,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMessageResponse {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AcknowledgeResponse {
    pub message: String,
}

impl AcknowledgeResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// A message as clients see it, without the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub author_ip: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageEntity> for Message {
    fn from(value: MessageEntity) -> Self {
        Self {
            id: value.id,
            name: value.name.into_string(),
            message: value.message.into_string(),
            author_ip: value.author_ip.into_string(),
            created_at: value.created_at,
        }
    }
}
