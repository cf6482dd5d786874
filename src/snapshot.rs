// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Environment Snapshot
//!
//! The immutable key/value mapping a [`Config`](crate::Config) is constructed from.
//!
//! The reader never touches the process environment on its own: callers hand it a snapshot,
//! taken from the process, from a dotenv file or from plain test data.

use crate::errors::ConfigError;
use dotenvy::from_filename_iter;
use std::{collections::HashMap, env, path::Path};
use tracing::error;

/// An immutable copy of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Creates a snapshot from any iterator of key/value pairs.
    ///
    /// When a key appears more than once, the last value wins.
    pub fn new<I, K, V>(vars: I) -> EnvSnapshot
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvSnapshot {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Takes a snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process_env() -> EnvSnapshot {
        EnvSnapshot::new(env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }

    /// Reads a dotenv file into a snapshot without modifying the process environment.
    ///
    /// This is mostly useful to simulate the platform on a developer machine.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SnapshotLoad` if the file can't be opened or one of its lines
    /// can't be parsed.
    pub fn from_dotenv(path: impl AsRef<Path>) -> Result<EnvSnapshot, ConfigError> {
        let path = path.as_ref();

        let iter = from_filename_iter(path).map_err(|err| {
            error!(error = err.to_string(), path = %path.display(), "failed to open dotenv file");
            ConfigError::SnapshotLoad(err.to_string())
        })?;

        let mut vars = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|err| {
                error!(error = err.to_string(), path = %path.display(), "failed to parse dotenv file");
                ConfigError::SnapshotLoad(err.to_string())
            })?;
            vars.insert(key, value);
        }

        Ok(EnvSnapshot { vars })
    }

    /// Returns the raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present, even with an empty value.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over all key/value pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        EnvSnapshot::new(iter)
    }
}

impl From<HashMap<String, String>> for EnvSnapshot {
    fn from(vars: HashMap<String, String>) -> Self {
        EnvSnapshot { vars }
    }
}
