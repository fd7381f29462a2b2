use crate::{
    client::{
        Client,
        transport::{Method, Transport},
    },
    common::{encode, index},
    error::Result,
};

use serde_json::{Map, Value};

/// `{"name": <name>}`, the body of the single index operations.
fn name_payload(name: &str) -> encode::Payload {
    let mut object = Map::with_capacity(1);
    object.insert(index::NAME.to_string(), Value::String(name.to_string()));
    encode::Payload::Json(Value::Object(object))
}

impl<T: Transport> Client<T> {
    /// List the indexes registered in a collection.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.list_indexes", skip(self), err)
    )]
    pub fn list_indexes(&self, collection: &str) -> Result<Vec<index::Index>> {
        let url = self.action(collection, "listIndexes")?;
        self.send_json(Method::Post, url, None)
    }

    /// Register an index and return its description.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.create_index", skip(self), err)
    )]
    pub fn create_index(
        &self,
        collection: &str,
        request: &index::CreateIndexRequest,
    ) -> Result<index::Index> {
        let body = encode::encode_payload(encode::Payload::from_value(request)?)?;
        let url = self.action(collection, "createIndex")?;
        self.send_json(Method::Post, url, body)
    }

    /// Retrieve a single index.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.get_index", skip(self), err)
    )]
    pub fn get_index(&self, collection: &str, name: &str) -> Result<index::Index> {
        let body = encode::encode_object(name_payload(name))?;
        let url = self.action(collection, "getIndex")?;
        self.send_json(Method::Post, url, Some(body))
    }

    /// Remove an index from a collection.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "inceptiondb.drop_index", skip(self), err)
    )]
    pub fn drop_index(&self, collection: &str, name: &str) -> Result<()> {
        let body = encode::encode_object(name_payload(name))?;
        let url = self.action(collection, "dropIndex")?;
        self.send_discard(Method::Post, url, Some(body))
    }
}
