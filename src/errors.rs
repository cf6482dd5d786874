// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Errors
//!
//! Error types for the platform_config crate.
//!
//! Every lookup the reader exposes fails with one specific, distinguishable variant of
//! [`ConfigError`]. Absence of the platform itself is never an error: it is answered by
//! [`Config::is_available`](crate::Config::is_available).
//!
//! Errors are `Clone` because a failed decode is cached like a successful one and reported
//! again on every later access to the same field.

use thiserror::Error;

/// Errors that can occur while reading the platform configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An encoded field held malformed base64, UTF-8 or JSON.
    ///
    /// # Arguments
    ///
    /// * `key` - The full snapshot key that was being decoded
    /// * `code` - The numeric diagnostic code, see [`DecodeCode`](crate::DecodeCode)
    /// * `message` - The underlying decoder's message
    #[error("Error decoding JSON, code: {code} ({key}) - `{message}`")]
    Decode {
        key: String,
        code: u8,
        message: String,
    },

    /// An encoded field held valid JSON that does not have the expected structure.
    #[error("unexpected structure in `{key}` - `{message}`")]
    UnexpectedShape { key: String, message: String },

    /// The operation is only valid in the other phase, e.g. reading routes at build time.
    #[error("{0}")]
    Phase(String),

    /// No route carries the requested id or URL.
    #[error("no such route found: `{0}`")]
    RouteNotFound(String),

    /// The relationship name is not defined.
    #[error("no relationship defined: `{0}`")]
    RelationshipNotFound(String),

    /// The relationship exists but has no instance at the requested index.
    #[error("relationship `{name}` has {len} instance(s), no index {index}")]
    RelationshipIndex {
        name: String,
        index: usize,
        len: usize,
    },

    /// The name is neither a known field nor a key present in the snapshot.
    #[error("undefined property: `{0}`")]
    UndefinedProperty(String),

    /// A dotenv file could not be read into a snapshot.
    #[error("error to load environment snapshot - `{0}`")]
    SnapshotLoad(String),
}
