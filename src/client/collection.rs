use crate::{
    client::{
        Client,
        transport::{Method, Transport},
    },
    common::{collection, encode},
    error::Result,
};

use serde_json::{Map, Value};

impl<T: Transport> Client<T> {
    /// List the collections available in the server.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.list_collections", skip(self), err)
    )]
    pub fn list_collections(&self) -> Result<Vec<collection::Collection>> {
        let url = self.endpoint(None, None)?;
        self.send_json(Method::Get, url, None)
    }

    /// Create a collection and return its metadata.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.create_collection", skip(self), err)
    )]
    pub fn create_collection(
        &self,
        request: &collection::CreateCollectionRequest,
    ) -> Result<collection::Collection> {
        let body = encode::encode_payload(encode::Payload::from_value(request)?)?;
        let url = self.endpoint(None, None)?;
        self.send_json(Method::Post, url, body)
    }

    /// Retrieve the metadata of a single collection.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.get_collection", skip(self), err)
    )]
    pub fn get_collection(&self, collection: &str) -> Result<collection::Collection> {
        let url = self.endpoint(Some(collection), None)?;
        self.send_json(Method::Get, url, None)
    }

    /// Delete a collection and its indexes.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.drop_collection", skip(self), err)
    )]
    pub fn drop_collection(&self, collection: &str) -> Result<()> {
        let url = self.action(collection, "dropCollection")?;
        self.send_discard(Method::Post, url, None)
    }

    /// Set the document merged into every row inserted afterwards.
    ///
    /// `None` sends an empty object. Returns the defaults stored by the server.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.set_defaults", skip(self), err)
    )]
    pub fn set_defaults(
        &self,
        collection: &str,
        defaults: Option<&Map<String, Value>>,
    ) -> Result<Map<String, Value>> {
        let body = encode::encode_object(encode::Payload::from_value(&defaults)?)?;
        let url = self.action(collection, "setDefaults")?;
        self.send_json(Method::Post, url, Some(body))
    }

    /// Usage statistics of a collection. The endpoint is experimental.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.size", skip(self), err)
    )]
    pub fn size(&self, collection: &str) -> Result<Map<String, Value>> {
        let url = self.action(collection, "size")?;
        self.send_json(Method::Post, url, None)
    }
}
