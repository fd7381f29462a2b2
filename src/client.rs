//! Blocking client for the InceptionDB REST API.
//!
//! Every operation resolves its endpoint under `/v1/collections`, encodes its
//! body with [`common::encode`](crate::common::encode) and either decodes a
//! single JSON response or hands back a [`JsonStream`].

/// Collection management operations.
pub mod collection;

/// Document operations (insert, find, patch, remove).
pub mod document;

/// Index management operations.
pub mod index;

/// The HTTP boundary of the client.
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

use crate::{
    error::{ApiError, Error, Result},
    stream::JsonStream,
};
use transport::{Body, HttpRequest, HttpResponse, Method, Transport, UreqTransport};

use serde::de::DeserializeOwned;
use std::{fmt, io, time};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client configuration.
///
/// ```rust
/// use inceptiondb_client::client;
/// use std::time::Duration;
///
/// let config = client::ClientConfig {
///     base_url: "https://inceptiondb.io".to_string(),
///     api_key: Some("key".to_string()),
///     api_secret: Some("secret".to_string()),
///     timeout: Some(Duration::from_secs(30)),
/// };
/// let client = client::Client::with_config(config).unwrap();
/// assert_eq!(client.base_url().as_str(), "https://inceptiondb.io/");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClientConfig {
    /// The server URL, including the scheme and the host.
    pub base_url: String,
    /// Sent as the `Api-Key` header when set and not empty.
    pub api_key: Option<String>,
    /// Sent as the `Api-Secret` header when set and not empty.
    pub api_secret: Option<String>,
    /// Timeout of a whole call, used by the default transport only.
    pub timeout: Option<time::Duration>,
}

/// Parse and validate a base URL.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let base_url = base_url.trim();
    if base_url.is_empty() {
        return Err(Error::InvalidBaseUrl("base URL is required".to_string()));
    }
    let parsed = Url::parse(base_url)?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidBaseUrl(
            "base URL must include the host".to_string(),
        ));
    }
    Ok(parsed)
}

/// High level client for the InceptionDB REST API.
///
/// ```rust,no_run
/// use inceptiondb_client::{client::Client, common::query, stream};
/// use serde_json::Value;
///
/// # fn example() -> Result<(), inceptiondb_client::error::Error> {
/// let client = Client::new("https://inceptiondb.io")?;
/// for collection in client.list_collections()? {
///     println!("{} ({} documents)", collection.name, collection.total);
/// }
/// let request = query::FindRequest {
///     query: query::QueryOptions {
///         limit: 10,
///         ..Default::default()
///     },
/// };
/// let mut documents = client.find("users", Some(&request))?;
/// documents.for_each(|document: Value| {
///     println!("{document}");
///     Ok::<_, inceptiondb_client::error::Error>(stream::CONTINUE)
/// })?;
/// # Ok(())
/// # }
/// ```
pub struct Client<T = UreqTransport> {
    base_url: Url,
    api_key: Option<String>,
    api_secret: Option<String>,
    transport: T,
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl Client<UreqTransport> {
    /// Build a client for `base_url` with the default configuration.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Build a client from a configuration, using the default transport.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Client<T> {
    /// Build a client sending its requests through `transport`.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Self {
            base_url,
            api_key: config.api_key.filter(|api_key| !api_key.is_empty()),
            api_secret: config.api_secret.filter(|api_secret| !api_secret.is_empty()),
            transport,
        };
        Ok(client)
    }

    /// The validated base URL.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The transport requests are sent through.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// `/v1/collections`, `/v1/collections/{collection}` or
    /// `/v1/collections/{collection}:{action}`.
    fn endpoint(&self, collection: Option<&str>, action: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.clear().extend(["v1", "collections"]);
            match (collection, action) {
                (Some(collection), Some(action)) => {
                    segments.push(&format!("{collection}:{action}"));
                }
                (Some(collection), None) => {
                    segments.push(collection);
                }
                (None, _) => {}
            }
        }
        Ok(url)
    }

    fn action(&self, collection: &str, action: &str) -> Result<Url> {
        self.endpoint(Some(collection), Some(action))
    }

    /// Send a request and turn error statuses into [`Error::Api`].
    fn send(&self, method: Method, url: Url, body: Option<Body>) -> Result<HttpResponse> {
        let mut headers = Vec::with_capacity(3);
        if body.is_some() {
            headers.push(("Content-Type", JSON_CONTENT_TYPE.to_string()));
        }
        if let Some(api_key) = &self.api_key {
            headers.push(("Api-Key", api_key.clone()));
        }
        if let Some(api_secret) = &self.api_secret {
            headers.push(("Api-Secret", api_secret.clone()));
        }
        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(status = response.status, "received response");
        if response.status >= 400 {
            return Err(ApiError::read_from(response.status, response.body).into());
        }
        Ok(response)
    }

    /// Send a request and decode a single JSON value from the response.
    ///
    /// `204 No Content`, empty bodies and `null` decode to `D::default()`.
    /// Whatever follows the value is read and dropped.
    fn send_json<D: DeserializeOwned + Default>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<D> {
        let response = self.send(method, url, body.map(Body::from))?;
        if response.status == 204 {
            return Ok(D::default());
        }
        let mut stream = JsonStream::new(response.status, response.body);
        let value = stream.next::<Option<D>>()?.flatten().unwrap_or_default();
        stream.drain()?;
        Ok(value)
    }

    /// Send a request and discard the response body.
    fn send_discard(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<()> {
        let mut response = self.send(method, url, body.map(Body::from))?;
        io::copy(&mut response.body, &mut io::sink())?;
        Ok(())
    }

    /// Send a request and stream the JSON Lines response.
    fn send_stream(&self, url: Url, body: Body) -> Result<JsonStream> {
        let response = self.send(Method::Post, url, Some(body))?;
        Ok(JsonStream::new(response.status, response.body))
    }
}
