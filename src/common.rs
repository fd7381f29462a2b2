//! Request and response payloads.
//!
//! This module provides the types exchanged with the server and the
//! encoders turning caller supplied values into request bodies.

/// Collection metadata and creation requests.
pub mod collection;

/// Canonical request body encoding.
pub mod encode;

/// Index descriptions and the flattening of their dynamic options.
pub mod index;

/// Query parameters shared by find, patch and remove.
pub mod query;
