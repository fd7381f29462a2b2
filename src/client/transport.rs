use crate::error::Result;

use std::{fmt, io::Read, time};
use url::Url;

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// The method name as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request body.
pub enum Body {
    /// An encoded body held in memory.
    Bytes(Vec<u8>),
    /// A body streamed from a reader while the request is sent.
    Reader(Box<dyn Read + Send>),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Reader(_) => f.debug_tuple("Reader").finish_non_exhaustive(),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// A request ready to be sent.
#[derive(Debug)]
pub struct HttpRequest {
    /// The request method.
    pub method: Method,
    /// The absolute request URL.
    pub url: Url,
    /// Header names and values, in the order they are sent.
    pub headers: Vec<(&'static str, String)>,
    /// The request body, `None` to send no body at all.
    pub body: Option<Body>,
}

/// A response whose body has not been read yet.
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Sends requests on behalf of a [`Client`](crate::client::Client).
///
/// Implementations must hand back responses of every status code; the
/// client turns error statuses into [`Error::Api`](crate::error::Error::Api)
/// itself. Retries, redirects and connection reuse are up to the transport.
pub trait Transport {
    /// Perform `request` and return the response.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// The default [`Transport`], backed by a [`ureq::Agent`].
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// Build a transport with an optional timeout covering the whole call.
    pub fn new(timeout: Option<time::Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = match request.method {
            Method::Get => {
                let mut builder = self.agent.get(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(*name, value.as_str());
                }
                builder.call()?
            }
            Method::Post => {
                let mut builder = self.agent.post(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(*name, value.as_str());
                }
                match request.body {
                    Some(Body::Bytes(body)) => builder.send(&body[..])?,
                    Some(Body::Reader(mut reader)) => {
                        builder.send(ureq::SendBody::from_reader(&mut reader))?
                    }
                    None => builder.send_empty()?,
                }
            }
        };
        Ok(HttpResponse {
            status: response.status().as_u16(),
            body: Box::new(response.into_body().into_reader()),
        })
    }
}
