use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The wire key of an index name.
pub const NAME: &str = "name";

/// The wire key of an index type.
pub const TYPE: &str = "type";

/// Type specific options of an index, kept in insertion order.
pub type Options = IndexMap<String, Value>;

/// Merge the fixed fields and the options into a single JSON object.
///
/// Empty fixed fields are left out and the remaining ones are written first.
/// An option named `name` or `type` overwrites the fixed field of the same
/// name; the server contract leaves that case undefined.
///
/// ```rust
/// use inceptiondb_client::common::index;
/// use serde_json::json;
///
/// let options = index::Options::from([("field".to_string(), json!("id"))]);
/// let object = index::flatten("by-id", "map", Some(&options));
/// assert_eq!(
///     serde_json::Value::Object(object),
///     json!({"name": "by-id", "type": "map", "field": "id"})
/// );
/// ```
pub fn flatten(name: &str, kind: &str, options: Option<&Options>) -> Map<String, Value> {
    let mut object = Map::with_capacity(options.map_or(0, IndexMap::len) + 2);
    if !name.is_empty() {
        object.insert(NAME.to_string(), Value::String(name.to_string()));
    }
    if !kind.is_empty() {
        object.insert(TYPE.to_string(), Value::String(kind.to_string()));
    }
    if let Some(options) = options {
        for (key, value) in options {
            object.insert(key.clone(), value.clone());
        }
    }
    object
}

/// Fields recovered from a flattened JSON object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Unflattened {
    /// The `name` key, when it held a string.
    pub name: Option<String>,
    /// The `type` key, when it held a string.
    pub kind: Option<String>,
    /// Every other key, or `None` when there were none.
    pub options: Option<Options>,
}

/// Split a flattened JSON object back into fixed fields and options.
///
/// `name` and `type` are never part of the options, even when they do not
/// hold strings.
pub fn unflatten(object: Map<String, Value>) -> Unflattened {
    let mut unflattened = Unflattened::default();
    let mut options = Options::with_capacity(object.len());
    for (key, value) in object {
        match key.as_str() {
            NAME => {
                if let Value::String(name) = value {
                    unflattened.name = Some(name);
                }
            }
            TYPE => {
                if let Value::String(kind) = value {
                    unflattened.kind = Some(kind);
                }
            }
            _ => {
                options.insert(key, value);
            }
        }
    }
    if !options.is_empty() {
        unflattened.options = Some(options);
    }
    unflattened
}

/// Index description as returned by the server.
///
/// ```rust
/// use inceptiondb_client::common::index;
/// use serde_json::json;
///
/// let index: index::Index =
///     serde_json::from_value(json!({"name": "by-id", "type": "map", "field": "id"})).unwrap();
/// assert_eq!(index.kind, "map");
/// assert_eq!(index.options.unwrap()["field"], json!("id"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Index {
    /// The index name.
    pub name: String,
    /// The index type (`type` on the wire).
    pub kind: String,
    /// Type specific options, flattened next to `name` and `type`.
    pub options: Option<Options>,
}

impl Serialize for Index {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        flatten(&self.name, &self.kind, self.options.as_ref()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Index {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let unflattened = unflatten(Map::deserialize(deserializer)?);
        Ok(Self {
            name: unflattened.name.unwrap_or_default(),
            kind: unflattened.kind.unwrap_or_default(),
            options: unflattened.options,
        })
    }
}

/// Parameters used to create an index.
///
/// ```rust
/// use inceptiondb_client::common::index;
/// use serde_json::json;
///
/// let request = index::CreateIndexRequest {
///     name: "by-id".to_string(),
///     kind: "btree".to_string(),
///     options: Some(index::Options::from([
///         ("fields".to_string(), json!(["id"])),
///         ("unique".to_string(), json!(true)),
///     ])),
/// };
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"name":"by-id","type":"btree","fields":["id"],"unique":true}"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateIndexRequest {
    /// The index name.
    pub name: String,
    /// The index type (`type` on the wire).
    pub kind: String,
    /// Type specific options, flattened next to `name` and `type`.
    pub options: Option<Options>,
}

impl Serialize for CreateIndexRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        flatten(&self.name, &self.kind, self.options.as_ref()).serialize(serializer)
    }
}

impl From<CreateIndexRequest> for Index {
    fn from(request: CreateIndexRequest) -> Self {
        Self {
            name: request.name,
            kind: request.kind,
            options: request.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::fixed_only(
        Index {
            name: "a".to_string(),
            kind: "map".to_string(),
            options: None,
        },
        r#"{"name":"a","type":"map"}"#
    )]
    #[case::empty_fixed_fields_omitted(
        Index {
            options: Some(
                Options::from(
                    [("b".to_string(), json!(1))]
                )
            ),
            ..Default::default()
        },
        r#"{"b":1}"#
    )]
    #[case::fixed_fields_first(
        Index {
            name: "a".to_string(),
            kind: "btree".to_string(),
            options: Some(
                Options::from(
                    [
                        ("z".to_string(), json!(["c", "d"])),
                        ("sparse".to_string(), json!(true)),
                    ]
                )
            ),
        },
        r#"{"name":"a","type":"btree","z":["c","d"],"sparse":true}"#
    )]
    #[case::option_overwrites_fixed_field(
        Index {
            name: "a".to_string(),
            kind: "map".to_string(),
            options: Some(
                Options::from(
                    [("name".to_string(), json!("b"))]
                )
            ),
        },
        r#"{"name":"b","type":"map"}"#
    )]
    fn test_serialize(#[case] index: Index, #[case] expected: &str) {
        let actual = serde_json::to_string(&index).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::fixed_only(
        json!({"name": "a", "type": "map"}),
        Index {
            name: "a".to_string(),
            kind: "map".to_string(),
            options: None,
        }
    )]
    #[case::with_options(
        json!({"type": "btree", "fields": ["id"], "name": "a", "unique": false}),
        Index {
            name: "a".to_string(),
            kind: "btree".to_string(),
            options: Some(
                Options::from(
                    [
                        ("fields".to_string(), json!(["id"])),
                        ("unique".to_string(), json!(false)),
                    ]
                )
            ),
        }
    )]
    #[case::wrong_typed_fixed_fields_skipped(
        json!({"name": 1, "type": null}),
        Index::default()
    )]
    #[case::empty(
        json!({}),
        Index::default()
    )]
    fn test_deserialize(#[case] value: Value, #[case] expected: Index) {
        let actual: Index = serde_json::from_value(value).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_deserialize_rejects_non_objects() {
        assert!(serde_json::from_value::<Index>(json!([1, 2])).is_err());
    }

    #[rstest]
    #[case::no_options(None)]
    #[case::empty_options(Some(Options::new()))]
    #[case::options(Some(Options::from([("field".to_string(), json!("id"))])))]
    fn test_round_trip(#[case] options: Option<Options>) {
        let index = Index {
            name: "a".to_string(),
            kind: "map".to_string(),
            options,
        };
        let encoded = serde_json::to_vec(&index).unwrap();
        let actual: Index = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(actual.name, index.name);
        assert_eq!(actual.kind, index.kind);
        assert_eq!(actual.options, index.options.filter(|options| !options.is_empty()));
    }

    #[test]
    fn test_unflatten_preserves_option_order() {
        let object = json!({"c": 1, "name": "a", "b": 2, "a": 3});
        let actual = unflatten(object.as_object().unwrap().clone());
        let keys: Vec<_> = actual.options.unwrap().into_keys().collect();
        assert_eq!(keys, ["c", "b", "a"]);
        assert_eq!(actual.name.as_deref(), Some("a"));
        assert_eq!(actual.kind, None);
    }

    #[test]
    fn test_create_index_request_serialize() {
        let request = CreateIndexRequest {
            kind: "map".to_string(),
            options: Some(Options::from([("field".to_string(), json!("id"))])),
            ..Default::default()
        };
        let actual = serde_json::to_value(&request).unwrap();
        assert_eq!(actual, json!({"type": "map", "field": "id"}));
        let index: Index = request.into();
        assert_eq!(index.kind, "map");
    }
}
