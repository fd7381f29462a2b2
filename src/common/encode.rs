use crate::error::{Error, Result};

use serde::Serialize;
use serde_json::Value;

const EMPTY_OBJECT: &[u8] = b"{}";

/// A request body before it is encoded.
///
/// The variants are checked in a fixed order when encoding: raw bytes, raw
/// text, absence, and finally structured JSON.
///
/// ```rust
/// use inceptiondb_client::common::encode;
///
/// let body = encode::encode_object(encode::Payload::from("  ")).unwrap();
/// assert_eq!(body, b"{}");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Payload {
    /// No value was provided, or the value was null at runtime.
    #[default]
    Absent,
    /// Already serialized bytes, sent as they are.
    Bytes(Vec<u8>),
    /// Already serialized text, sent as it is.
    Text(String),
    /// A structured value serialized on encode.
    Json(Value),
}

impl Payload {
    /// Serialize any value into a payload.
    ///
    /// Values that serialize to `null` (`None`, `()`) become [`Payload::Absent`].
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(|source| Error::Encode {
            context: "payload",
            source,
        })?;
        Ok(value.into())
    }

    /// Whether this payload counts as "nothing" for object-shaped bodies.
    fn is_blank(&self) -> bool {
        match self {
            Self::Absent | Self::Json(Value::Null) => true,
            Self::Bytes(bytes) => bytes.trim_ascii().is_empty(),
            Self::Text(text) => text.trim().is_empty(),
            Self::Json(_) => false,
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            value => Self::Json(value),
        }
    }
}

impl<P: Into<Payload>> From<Option<P>> for Payload {
    fn from(payload: Option<P>) -> Self {
        payload.map_or(Self::Absent, Into::into)
    }
}

fn to_bytes(value: &Value, context: &'static str) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| Error::Encode { context, source })
}

/// Encode a payload whose absence means "send no body at all".
///
/// Raw bytes and text are passed through unchanged, even when blank.
pub fn encode_payload(payload: Payload) -> Result<Option<Vec<u8>>> {
    match payload {
        Payload::Bytes(bytes) => Ok(Some(bytes)),
        Payload::Text(text) => Ok(Some(text.into_bytes())),
        Payload::Absent | Payload::Json(Value::Null) => Ok(None),
        Payload::Json(value) => to_bytes(&value, "payload").map(Some),
    }
}

/// Encode a payload that must be a JSON object at minimum.
///
/// Absent values, blank text and whitespace-only bytes all become `{}`.
pub fn encode_object(payload: Payload) -> Result<Vec<u8>> {
    if payload.is_blank() {
        return Ok(EMPTY_OBJECT.to_vec());
    }
    match payload {
        Payload::Bytes(bytes) => Ok(bytes),
        Payload::Text(text) => Ok(text.into_bytes()),
        Payload::Json(value) => to_bytes(&value, "object"),
        Payload::Absent => Ok(EMPTY_OBJECT.to_vec()),
    }
}

/// Encode the body of a find, patch or remove request.
pub fn encode_query<T: Serialize>(request: Option<&T>) -> Result<Vec<u8>> {
    match request {
        Some(request) => encode_object(Payload::from_value(request)?),
        None => Ok(EMPTY_OBJECT.to_vec()),
    }
}

/// Encode values as JSON Lines, one compact value per line.
pub fn encode_json_lines<T: Serialize>(items: &[T]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for item in items {
        serde_json::to_writer(&mut buffer, item).map_err(|source| Error::Encode {
            context: "json lines",
            source,
        })?;
        buffer.push(b'\n');
    }
    Ok(buffer)
}
