//! Message model shared by every mural surface.
//!
//! # Design
//! The store returns loosely shaped JSON: fields can be missing or carry an
//! unexpected type, and ids come back as numbers or strings depending on the
//! deployment. `Message` therefore keeps every field optional, and
//! [`decode_listing`] is the single place where raw JSON is validated into
//! records. Ordering and rendering code only ever sees the typed form.
//!
//! Wire names (`autor`, `mensagem`, `data_criacao`) are kept on the serde
//! attributes; Rust code uses the English field names.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Shown in place of a missing or blank author.
pub const ANONYMOUS_AUTHOR: &str = "Anônimo";

/// Opaque message identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl MessageId {
    /// Interpret user input as an id. The trimmed text is kept as typed, so
    /// `"007"` addresses `/recados/007`, not `/recados/7`.
    pub fn parse(raw: &str) -> Self {
        MessageId::Text(raw.trim().to_string())
    }

    /// Whether both ids name the same record, compared by their text form.
    /// `Number(42)` matches `Text("42")` but not `Text("042")`.
    pub fn same_as(&self, other: &MessageId) -> bool {
        match (self, other) {
            (MessageId::Number(a), MessageId::Number(b)) => a == b,
            (MessageId::Text(a), MessageId::Text(b)) => a == b,
            (MessageId::Number(n), MessageId::Text(s)) | (MessageId::Text(s), MessageId::Number(n)) => {
                *s == n.to_string()
            }
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(MessageId::Number),
            Value::String(s) => Some(MessageId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Number(n) => write!(f, "{n}"),
            MessageId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MessageId {
    fn from(n: i64) -> Self {
        MessageId::Number(n)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId::Text(s.to_string())
    }
}

/// A single bulletin-board post as returned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    #[serde(rename = "autor", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "mensagem", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "data_criacao", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Message {
    /// Author text used for ordering: missing counts as empty.
    pub fn author_or_empty(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }

    /// Author text used for display.
    pub fn display_author(&self) -> &str {
        match self.author.as_deref() {
            Some(a) if !a.trim().is_empty() => a,
            _ => ANONYMOUS_AUTHOR,
        }
    }

    /// Decode one listing element. Returns `None` when `value` is not an
    /// object; individual fields of the wrong type decode as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Message {
            id: obj.get("id").and_then(MessageId::from_json),
            author: text_field(obj, "autor"),
            body: text_field(obj, "mensagem"),
            created_at: text_field(obj, "data_criacao"),
        })
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            tracing::debug!(field = key, value = %other, "ignoring non-string field");
            None
        }
    }
}

/// Validate a raw store listing into records.
///
/// Anything that is not a JSON array is an empty listing. Array elements
/// that are not objects are skipped.
pub fn decode_listing(value: &Value) -> Vec<Message> {
    let Some(items) = value.as_array() else {
        tracing::warn!(kind = json_kind(value), "listing is not an array, treating as empty");
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let message = Message::from_value(item);
            if message.is_none() {
                tracing::warn!(index, kind = json_kind(item), "skipping non-object listing entry");
            }
            message
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Payload for publishing a new message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "mensagem")]
    pub body: String,
}

impl NewMessage {
    /// Build a draft from form input. Both fields are trimmed and must be
    /// non-empty afterwards.
    pub fn from_form(author: &str, body: &str) -> Result<Self, ApiError> {
        let author = author.trim();
        let body = body.trim();
        if author.is_empty() {
            return Err(ApiError::InvalidDraft("autor"));
        }
        if body.is_empty() {
            return Err(ApiError::InvalidDraft("mensagem"));
        }
        Ok(Self {
            author: author.to_string(),
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_listing_non_array_is_empty() {
        for value in [json!(null), json!({"id": 1}), json!(42), json!("recados")] {
            assert!(decode_listing(&value).is_empty(), "{value}");
        }
    }

    #[test]
    fn decode_listing_skips_non_objects() {
        let value = json!([{"id": 1, "autor": "Ana"}, 7, null, {"id": "b"}]);
        let messages = decode_listing(&value);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, Some(MessageId::Number(1)));
        assert_eq!(messages[1].id, Some(MessageId::Text("b".to_string())));
    }

    #[test]
    fn wrong_field_types_decode_as_absent() {
        let value = json!({"id": true, "autor": 12, "mensagem": "oi", "data_criacao": []});
        let message = Message::from_value(&value).unwrap();
        assert_eq!(message.id, None);
        assert_eq!(message.author, None);
        assert_eq!(message.body.as_deref(), Some("oi"));
        assert_eq!(message.created_at, None);
    }

    #[test]
    fn display_author_falls_back_to_anonymous() {
        let mut message = Message::default();
        assert_eq!(message.display_author(), ANONYMOUS_AUTHOR);
        message.author = Some("   ".to_string());
        assert_eq!(message.display_author(), ANONYMOUS_AUTHOR);
        message.author = Some("Bia".to_string());
        assert_eq!(message.display_author(), "Bia");
    }

    #[test]
    fn message_id_parse_keeps_text_as_typed() {
        assert_eq!(MessageId::parse(" 42 "), MessageId::Text("42".to_string()));
        assert_eq!(MessageId::parse("007"), MessageId::Text("007".to_string()));
        assert_eq!(MessageId::parse("abc-1"), MessageId::Text("abc-1".to_string()));
    }

    #[test]
    fn message_ids_match_by_text_form() {
        assert!(MessageId::Number(42).same_as(&MessageId::parse("42")));
        assert!(MessageId::parse("42").same_as(&MessageId::Number(42)));
        assert!(!MessageId::Number(7).same_as(&MessageId::parse("007")));
        assert!(!MessageId::from("a").same_as(&MessageId::from("b")));
    }

    #[test]
    fn new_message_trims_and_serializes_wire_names() {
        let draft = NewMessage::from_form("  Ana ", " oi pessoal\n").unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, json!({"autor": "Ana", "mensagem": "oi pessoal"}));
    }

    #[test]
    fn new_message_rejects_blank_fields() {
        assert!(matches!(
            NewMessage::from_form(" ", "oi"),
            Err(ApiError::InvalidDraft("autor"))
        ));
        assert!(matches!(
            NewMessage::from_form("Ana", ""),
            Err(ApiError::InvalidDraft("mensagem"))
        ));
    }
}
