// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Platform Config
//!
//! `platform_config` reads the configuration a platform-as-a-service injects into the
//! environment of the applications it hosts.
//!
//! Some of the injected values are plain strings (project, environment, branch...), others
//! are base64 encoded JSON documents (application, variables, routes, relationships). The
//! reader decodes the latter lazily, once per reader, and exposes typed lookups with a
//! specific error for every way a lookup can fail.
//!
//! ## Features
//!
//! - Detection of the platform and of the current phase (build or runtime)
//! - Enterprise and production classification from the mode and branch keys
//! - Routes by id or URL, relationships credentials by name and index
//! - User variables with defaults
//! - Snapshots taken from the process environment, a dotenv file or plain data
//!
//! ## Example
//!
//! ```rust
//! use platform_config::{Config, EnvSnapshot};
//!
//! fn database_host(config: &Config) -> Result<Option<String>, platform_config::ConfigError> {
//!     if !config.is_available() || config.in_build() {
//!         return Ok(None);
//!     }
//!
//!     let credentials = config.credentials("database")?;
//!     Ok(credentials["host"].as_str().map(str::to_owned))
//! }
//!
//! let config = Config::new(EnvSnapshot::from_process_env());
//! let _ = database_host(&config);
//! ```

mod config;
pub mod decoder;
pub mod env_keys;
pub mod errors;
mod properties;
mod relationships;
mod routes;
mod snapshot;

pub use config::{Config, ConfigBuilder, Phase};
pub use decoder::DecodeCode;
pub use errors::ConfigError;
pub use properties::PropertyValue;
pub use relationships::{RelationshipInstance, Relationships};
pub use routes::{Route, RouteTable};
pub use snapshot::EnvSnapshot;
