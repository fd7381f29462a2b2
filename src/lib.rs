#![deny(missing_docs)]
#![deny(warnings)]

//! # InceptionDB client
//!
//! A blocking client for the InceptionDB REST API.
//!
//! ## Overview
//!
//! The server speaks JSON over HTTP. Most of the work of this crate is moving
//! data across that boundary:
//! - Request bodies are built from raw bytes, raw text or any serializable
//!   value, with absent values turned into no body or into `{}` depending on
//!   what the endpoint expects
//! - Index descriptions keep their type specific options flattened next to
//!   `name` and `type`, and split them back out on decode
//! - Insert, find, patch and remove answer with JSON Lines, decoded one
//!   document at a time into any deserializable type
//!
//! ## Quick Example
//!
//! ```no_run
//! use inceptiondb_client::{client, common::query, stream};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! # fn example() -> Result<(), inceptiondb_client::error::Error> {
//! let client = client::Client::with_config(client::ClientConfig {
//!     base_url: "https://inceptiondb.io".to_string(),
//!     api_key: Some("key".to_string()),
//!     api_secret: Some("secret".to_string()),
//!     ..Default::default()
//! })?;
//! let request = query::FindRequest {
//!     query: query::QueryOptions {
//!         filter: Some(serde_json::json!({"name": "Fulanez"}).as_object().cloned().unwrap_or_default()),
//!         ..Default::default()
//!     },
//! };
//! let mut users = client.find("users", Some(&request))?;
//! users.for_each(|user: User| {
//!     println!("{} {}", user.id, user.name);
//!     // the first match is enough
//!     Ok::<_, inceptiondb_client::error::Error>(stream::STOP)
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@client`] - The client and its HTTP transport
//! - [`mod@common`] - Request/response types and body encoding
//! - [`mod@stream`] - JSON Lines streams and typed iteration
//! - [`mod@error`] - Error types

/// The client and its operations.
pub mod client;

/// Request and response payloads, and request body encoding.
pub mod common;

/// Error types.
pub mod error;

/// JSON Lines response streams.
pub mod stream;
