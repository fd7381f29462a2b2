use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Query parameters shared by find, patch and remove.
///
/// Every field left at its default value is omitted from the request body;
/// the server decides how the remaining ones are interpreted.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct QueryOptions {
    /// The traversal mode (`fullscan`, `unique`, `sequence`, ...).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,
    /// The index used to traverse the collection.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub index: String,
    /// Documents must contain these key/value pairs to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Map<String, Value>>,
    /// The number of matches to skip.
    #[serde(skip_serializing_if = "is_zero")]
    pub skip: i64,
    /// The maximum number of matches to return.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: i64,
    /// Whether to traverse the index backwards.
    #[serde(skip_serializing_if = "is_false")]
    pub reverse: bool,
    /// The lower bound of a range traversal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Map<String, Value>>,
    /// The upper bound of a range traversal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Map<String, Value>>,
    /// The key looked up by a unique traversal.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// Options available when querying documents.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FindRequest {
    /// The query parameters.
    #[serde(flatten)]
    pub query: QueryOptions,
}

/// Partial update applied to the documents matched by the query.
///
/// ```rust
/// use inceptiondb_client::common::query;
/// use serde_json::json;
///
/// let request = query::PatchRequest {
///     query: query::QueryOptions {
///         limit: 1,
///         ..Default::default()
///     },
///     patch: json!({"name": "Fulanez"}),
/// };
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"limit":1,"patch":{"name":"Fulanez"}}"#
/// );
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PatchRequest {
    /// The query parameters.
    #[serde(flatten)]
    pub query: QueryOptions,
    /// The patch merged into every matched document.
    #[serde(default)]
    pub patch: Value,
}

/// Parameters accepted by the remove endpoint.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RemoveRequest {
    /// The query parameters.
    #[serde(flatten)]
    pub query: QueryOptions,
}
