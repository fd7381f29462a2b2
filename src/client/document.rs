use crate::{
    client::{
        Client,
        transport::{Body, Transport},
    },
    common::{encode, query},
    error::Result,
    stream::JsonStream,
};

use serde::Serialize;
use std::io::Read;

impl<T: Transport> Client<T> {
    /// Send a JSON Lines payload to the insert endpoint and stream back the
    /// inserted documents.
    ///
    /// The reader is streamed as the request body while the request is sent.
    /// `None` sends an empty body.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.insert_stream", skip(self, reader), err)
    )]
    pub fn insert_stream<R: Read + Send + 'static>(
        &self,
        collection: &str,
        reader: Option<R>,
    ) -> Result<JsonStream> {
        let body = match reader {
            Some(reader) => Body::Reader(Box::new(reader)),
            None => Body::Bytes(Vec::new()),
        };
        let url = self.action(collection, "insert")?;
        self.send_stream(url, body)
    }

    /// Encode `documents` as JSON Lines and insert them.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "inceptiondb.insert_documents",
            skip(self, documents),
            fields(count = documents.len()),
            err
        )
    )]
    pub fn insert_documents<D: Serialize>(
        &self,
        collection: &str,
        documents: &[D],
    ) -> Result<JsonStream> {
        let body = encode::encode_json_lines(documents)?;
        let url = self.action(collection, "insert")?;
        self.send_stream(url, body.into())
    }

    /// Query a collection and stream the matching documents.
    ///
    /// `None` sends an empty query, matching every document.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.find", skip(self), err)
    )]
    pub fn find(
        &self,
        collection: &str,
        request: Option<&query::FindRequest>,
    ) -> Result<JsonStream> {
        let body = encode::encode_query(request)?;
        let url = self.action(collection, "find")?;
        self.send_stream(url, body.into())
    }

    /// Patch the documents matched by the query and stream them back.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.patch", skip(self), err)
    )]
    pub fn patch(&self, collection: &str, request: &query::PatchRequest) -> Result<JsonStream> {
        let body = encode::encode_query(Some(request))?;
        let url = self.action(collection, "patch")?;
        self.send_stream(url, body.into())
    }

    /// Delete the documents matched by the query and stream them back.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.remove", skip(self), err)
    )]
    pub fn remove(
        &self,
        collection: &str,
        request: Option<&query::RemoveRequest>,
    ) -> Result<JsonStream> {
        let body = encode::encode_query(request)?;
        let url = self.action(collection, "remove")?;
        self.send_stream(url, body.into())
    }
}
