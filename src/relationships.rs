// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Relationships
//!
//! Each relationship name maps to an ordered list of service instance descriptors
//! (scheme, type, host, port, credentials...). A name may carry several instances, for
//! example one per replica.

use crate::errors::ConfigError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The connection descriptor of one service instance, returned as decoded.
pub type RelationshipInstance = Map<String, Value>;

/// All relationships of the application, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    entries: HashMap<String, Vec<RelationshipInstance>>,
}

impl Relationships {
    /// Builds the relationships from the decoded value of the relationships key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnexpectedShape` unless the value is an object of arrays of
    /// objects. An empty array is read as no relationships.
    pub fn from_value(key: &str, value: Value) -> Result<Relationships, ConfigError> {
        // an empty map encoded on the PHP side arrives as `[]`
        if value.as_array().is_some_and(Vec::is_empty) {
            return Ok(Relationships::default());
        }

        serde_json::from_value::<HashMap<String, Vec<RelationshipInstance>>>(value)
            .map(|entries| Relationships { entries })
            .map_err(|err| ConfigError::UnexpectedShape {
                key: key.to_owned(),
                message: err.to_string(),
            })
    }

    /// Returns the instance of `name` at `index`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::RelationshipNotFound` if `name` is not defined
    /// - `ConfigError::RelationshipIndex` if `name` has no instance at `index`
    pub fn instance(&self, name: &str, index: usize) -> Result<&RelationshipInstance, ConfigError> {
        let instances = self
            .entries
            .get(name)
            .ok_or_else(|| ConfigError::RelationshipNotFound(name.to_owned()))?;

        instances
            .get(index)
            .ok_or_else(|| ConfigError::RelationshipIndex {
                name: name.to_owned(),
                index,
                len: instances.len(),
            })
    }

    /// All instances of `name`.
    pub fn get(&self, name: &str) -> Option<&[RelationshipInstance]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
