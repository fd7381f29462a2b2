use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Read a JSON `null` as the default value of the field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Collection metadata returned by the server.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Collection {
    /// The collection name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// The number of documents stored in the collection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: i64,
    /// The number of indexes registered in the collection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub indexes: i64,
    /// The document merged into every inserted row, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Map<String, Value>>,
}

/// Parameters used to create a collection.
///
/// ```rust
/// use inceptiondb_client::common::collection;
///
/// let request = collection::CreateCollectionRequest {
///     name: "users".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"name":"users"}"#);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CreateCollectionRequest {
    /// The collection name.
    pub name: String,
    /// The document merged into every inserted row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::full(
        json!({"name": "a", "total": 3, "indexes": 1, "defaults": {"b": "c"}}),
        Collection {
            name: "a".to_string(),
            total: 3,
            indexes: 1,
            defaults: Some(json!({"b": "c"}).as_object().unwrap().clone()),
        }
    )]
    #[case::partial(
        json!({"name": "a"}),
        Collection {
            name: "a".to_string(),
            ..Default::default()
        }
    )]
    #[case::null_fields(
        json!({"name": null, "total": null, "indexes": 2, "defaults": null}),
        Collection {
            indexes: 2,
            ..Default::default()
        }
    )]
    fn test_collection_deserialize(#[case] value: Value, #[case] expected: Collection) {
        let actual: Collection = serde_json::from_value(value).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_create_collection_request_with_defaults() {
        let request = CreateCollectionRequest {
            name: "a".to_string(),
            defaults: Some(json!({"b": 1}).as_object().unwrap().clone()),
        };
        let actual = serde_json::to_value(&request).unwrap();
        assert_eq!(actual, json!({"name": "a", "defaults": {"b": 1}}));
    }
}
