use crate::{
    client::{
        Client, ClientConfig,
        transport::{Body, HttpRequest, HttpResponse, Method, Transport},
    },
    error::Result,
};

use serde_json::Value;
use std::{
    cell, collections,
    io::{self, Read},
    sync::{Arc, atomic},
};
use url::Url;

pub(crate) const BASE_URL: &str = "http://localhost:8080";

/// A request as seen by [`FakeTransport`], with its body read into memory.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RecordedRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: Vec<(&'static str, String)>,
    pub(crate) body: Option<Vec<u8>>,
    /// Whether the body was handed over as a reader.
    pub(crate) streamed: bool,
}

impl RecordedRequest {
    fn record(request: HttpRequest) -> io::Result<Self> {
        let (body, streamed) = match request.body {
            None => (None, false),
            Some(Body::Bytes(bytes)) => (Some(bytes), false),
            Some(Body::Reader(mut reader)) => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes)?;
                (Some(bytes), true)
            }
        };
        Ok(Self {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body,
            streamed,
        })
    }

    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn body_text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .map(|body| std::str::from_utf8(body).unwrap())
    }

    pub(crate) fn body_json(&self) -> Value {
        serde_json::from_slice(self.body.as_deref().unwrap()).unwrap()
    }
}

/// Counts the response bytes read by the client.
struct CountingReader {
    inner: io::Cursor<Vec<u8>>,
    consumed: Arc<atomic::AtomicUsize>,
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.consumed.fetch_add(read, atomic::Ordering::SeqCst);
        Ok(read)
    }
}

/// In-memory transport recording requests and replaying canned responses.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    requests: cell::RefCell<Vec<RecordedRequest>>,
    responses: cell::RefCell<collections::VecDeque<(u16, String)>>,
    consumed: Arc<atomic::AtomicUsize>,
}

impl FakeTransport {
    /// Queue a response; requests without a queued response get an empty `200`.
    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back((status, body.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last_request(&self) -> RecordedRequest {
        self.requests.borrow().last().cloned().unwrap()
    }

    /// Response bytes read so far, across every response.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed.load(atomic::Ordering::SeqCst)
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests
            .borrow_mut()
            .push(RecordedRequest::record(request)?);
        let (status, body) = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or((200, String::new()));
        Ok(HttpResponse {
            status,
            body: Box::new(CountingReader {
                inner: io::Cursor::new(body.into_bytes()),
                consumed: Arc::clone(&self.consumed),
            }),
        })
    }
}

pub(crate) fn new_client(transport: FakeTransport) -> Client<FakeTransport> {
    Client::with_transport(
        ClientConfig {
            base_url: BASE_URL.to_string(),
            ..Default::default()
        },
        transport,
    )
    .unwrap()
}
