//! Error types returned by the client, the encoders and the stream reader.

use serde::Deserialize;
use std::{error, fmt, io, io::Read};
use thiserror::Error;

/// Upper bound on the number of bytes read from an error response body.
pub(crate) const MAX_ERROR_BODY: u64 = 1 << 20;

/// Errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured base URL is blank or lacks a scheme or a host.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// A URL could not be parsed.
    #[error("parse url: {0}")]
    Url(#[from] url::ParseError),
    /// A request body could not be serialized.
    #[error("encode {context}: {source}")]
    Encode {
        /// What was being encoded.
        context: &'static str,
        /// The underlying serialization failure.
        #[source]
        source: serde_json::Error,
    },
    /// A response body could not be deserialized.
    #[error("decode: {0}")]
    Decode(#[source] serde_json::Error),
    /// Reading a response or request body failed.
    #[error("io: {0}")]
    Io(#[from] io::Error),
    /// The HTTP transport failed before a response was available.
    #[error("transport: {0}")]
    Transport(#[source] Box<dyn error::Error + Send + Sync + 'static>),
    /// The server answered with an error status.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// An iteration was requested over an absent stream.
    #[error("nil stream")]
    NilStream,
    /// An iteration was requested without a callback.
    #[error("nil iterator callback")]
    NilCallback,
}

/// A specialized `Result` type for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// An HTTP level error returned by the server.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The error message reported by the server, or the raw body.
    pub message: String,
    /// The optional error description reported by the server.
    pub description: String,
    /// The raw response body (truncated to 1 MiB).
    pub body: Vec<u8>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = ureq::http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .map_or_else(|| format!("status {}", self.status), str::to_string);
        if self.message.is_empty() {
            let body = String::from_utf8_lossy(&self.body);
            let body = body.trim();
            if body.is_empty() {
                return write!(f, "inceptiondb: {status}");
            }
            return write!(f, "inceptiondb: {status}: {body}");
        }
        if self.description.is_empty() {
            write!(f, "inceptiondb: {status}: {}", self.message)
        } else {
            write!(
                f,
                "inceptiondb: {status}: {} ({})",
                self.message, self.description
            )
        }
    }
}

impl error::Error for ApiError {}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    description: String,
}

impl ApiError {
    /// Build an error from a status code and the (possibly unstructured) body.
    pub fn parse(status: u16, body: Vec<u8>) -> Self {
        if !body.is_empty() {
            if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&body) {
                let detail = envelope.error;
                if !detail.message.is_empty() || !detail.description.is_empty() {
                    return Self {
                        status,
                        message: detail.message,
                        description: detail.description,
                        body,
                    };
                }
            }
        }
        let message = String::from_utf8_lossy(&body).trim().to_string();
        Self {
            status,
            message,
            body,
            ..Default::default()
        }
    }

    /// Read at most 1 MiB of `reader` and parse it as an error response.
    pub(crate) fn read_from(status: u16, reader: impl Read) -> Self {
        let mut body = Vec::new();
        match reader.take(MAX_ERROR_BODY).read_to_end(&mut body) {
            Ok(_) => Self::parse(status, body),
            Err(err) => Self {
                status,
                message: err.to_string(),
                body,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::structured(
        404,
        r#"{"error":{"message":"collection not found","description":"no such collection 'a'"}}"#,
        "collection not found",
        "no such collection 'a'"
    )]
    #[case::message_only(
        400,
        r#"{"error":{"message":"bad filter"}}"#,
        "bad filter",
        ""
    )]
    #[case::plain_text(
        500,
        "  internal failure\n",
        "internal failure",
        ""
    )]
    #[case::json_without_error(
        409,
        r#"{"other":1}"#,
        r#"{"other":1}"#,
        ""
    )]
    #[case::empty(
        502,
        "",
        "",
        ""
    )]
    fn test_parse(
        #[case] status: u16,
        #[case] body: &str,
        #[case] message: &str,
        #[case] description: &str,
    ) {
        let actual = ApiError::parse(status, body.as_bytes().to_vec());
        assert_eq!(actual.status, status);
        assert_eq!(actual.message, message);
        assert_eq!(actual.description, description);
        assert_eq!(actual.body, body.as_bytes());
    }

    #[rstest]
    #[case::message_and_description(
        ApiError {
            status: 404,
            message: "a".to_string(),
            description: "b".to_string(),
            ..Default::default()
        },
        "inceptiondb: Not Found: a (b)"
    )]
    #[case::message(
        ApiError {
            status: 400,
            message: "a".to_string(),
            ..Default::default()
        },
        "inceptiondb: Bad Request: a"
    )]
    #[case::body_fallback(
        ApiError {
            status: 500,
            body: b" boom ".to_vec(),
            ..Default::default()
        },
        "inceptiondb: Internal Server Error: boom"
    )]
    #[case::unknown_status(
        ApiError {
            status: 599,
            ..Default::default()
        },
        "inceptiondb: status 599"
    )]
    fn test_display(#[case] error: ApiError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_read_from_truncates() {
        let body = vec![b'x'; (MAX_ERROR_BODY as usize) + 10];
        let actual = ApiError::read_from(500, body.as_slice());
        assert_eq!(actual.body.len() as u64, MAX_ERROR_BODY);
    }
}
