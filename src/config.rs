// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Platform Configuration Reader
//!
//! This module provides [`Config`], the read-only view over the environment the platform
//! injects into the application, and [`ConfigBuilder`], the fluent way to create one.
//!
//! ## Architecture
//!
//! A `Config` works in two layers:
//!
//! 1. **Plain fields**: identity and path values (project, environment, branch, tree id...)
//!    are read straight from the snapshot on every call.
//!
//! 2. **Encoded fields**: the application descriptor, the variables, the relationships and
//!    the routes are base64 encoded JSON. Each one is decoded on first access and the outcome,
//!    success or failure, is stored in its own `OnceLock` for the life of the reader.
//!
//! ## Phases
//!
//! The same application reads its configuration twice: once while being built, when only the
//! application descriptor and variables exist, and once at runtime, when the platform has
//! added the environment, the routes and the relationships. The presence of the environment
//! key tells the two apart, see [`Config::in_build`].

use crate::{
    decoder::decode,
    env_keys::{
        APP_DIR_KEY, APPLICATION_KEY, APPLICATION_NAME_KEY, BRANCH_KEY,
        DEFAULT_ENTERPRISE_PRODUCTION_BRANCH, DEFAULT_PREFIX, DEFAULT_TRUNK_BRANCH,
        DOCUMENT_ROOT_KEY, ENTERPRISE_MODE, ENTROPY_KEY, ENVIRONMENT_KEY, MODE_KEY, PORT_KEY,
        PROJECT_KEY, RELATIONSHIPS_KEY, SOCKET_KEY, TREE_ID_KEY,
    },
    errors::ConfigError,
    properties::{self, EncodedField, Field, PropertyValue},
    relationships::{RelationshipInstance, Relationships},
    routes::{Route, RouteTable},
    snapshot::EnvSnapshot,
};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::{debug, warn};

type Cached<T> = OnceLock<Result<T, ConfigError>>;

/// `UndefinedProperty` always carries the property name, never the prefixed key.
const APPLICATION_PROPERTY: &str = "application";

/// Lifecycle stage the reader was created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Only the application descriptor and variables are available.
    Build,
    /// Routes and relationships are available too.
    Runtime,
}

/// The fluent builder for [`Config`].
///
/// # Example
///
/// ```rust
/// use platform_config::{ConfigBuilder, EnvSnapshot};
///
/// let config = ConfigBuilder::new()
///     .prefix("")
///     .trunk_branch("main")
///     .build(EnvSnapshot::new([("APPLICATION", "test-application")]));
///
/// assert!(config.is_available());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    prefix: String,
    trunk_branch: String,
    enterprise_branch: String,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder {
            prefix: DEFAULT_PREFIX.to_owned(),
            trunk_branch: DEFAULT_TRUNK_BRANCH.to_owned(),
            enterprise_branch: DEFAULT_ENTERPRISE_PRODUCTION_BRANCH.to_owned(),
        }
    }
}

impl ConfigBuilder {
    /// Creates a builder with the platform defaults: the `PLATFORM_` prefix, `master` as the
    /// production branch of standard projects and `production` for enterprise ones.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Sets the prefix prepended to every key.
    ///
    /// An empty prefix reads bare keys (`APPLICATION`, `PROJECT`...), which is how the reader
    /// is embedded in tests or in other platforms' tooling. With an empty prefix the
    /// application key alone is enough for [`Config::is_available`].
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the branch name that identifies production on standard projects.
    pub fn trunk_branch(mut self, branch: impl Into<String>) -> Self {
        self.trunk_branch = branch.into();
        self
    }

    /// Sets the branch name that identifies production on enterprise projects.
    pub fn enterprise_branch(mut self, branch: impl Into<String>) -> Self {
        self.enterprise_branch = branch.into();
        self
    }

    /// Creates the reader. Nothing is decoded yet.
    pub fn build(self, snapshot: EnvSnapshot) -> Config {
        Config {
            snapshot,
            prefix: self.prefix,
            trunk_branch: self.trunk_branch,
            enterprise_branch: self.enterprise_branch,
            application: OnceLock::new(),
            variables: OnceLock::new(),
            relationships: OnceLock::new(),
            routes: OnceLock::new(),
        }
    }
}

/// Read-only access to the platform configuration of one environment snapshot.
///
/// A `Config` is `Send + Sync`: it can be created once at startup and shared between threads.
#[derive(Debug)]
pub struct Config {
    snapshot: EnvSnapshot,
    prefix: String,
    trunk_branch: String,
    enterprise_branch: String,
    application: Cached<Map<String, Value>>,
    variables: Cached<Map<String, Value>>,
    relationships: Cached<Relationships>,
    routes: Cached<RouteTable>,
}

impl Config {
    /// Creates a reader over `snapshot` with the default `PLATFORM_` prefix.
    pub fn new(snapshot: EnvSnapshot) -> Config {
        ConfigBuilder::new().build(snapshot)
    }

    /// Creates a reader over `snapshot` that reads its keys behind `prefix`.
    pub fn with_prefix(snapshot: EnvSnapshot, prefix: impl Into<String>) -> Config {
        ConfigBuilder::new().prefix(prefix).build(snapshot)
    }

    /// The prefix prepended to every key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The snapshot this reader was created from.
    pub fn snapshot(&self) -> &EnvSnapshot {
        &self.snapshot
    }
}

// Phase and tier classification
impl Config {
    /// Returns `true` if the snapshot was injected by the platform.
    ///
    /// Requires the application and project keys. Under an empty prefix the application key
    /// is enough. Never fails, so callers can branch on it outside the platform.
    pub fn is_available(&self) -> bool {
        self.has(APPLICATION_KEY) && (self.prefix.is_empty() || self.has(PROJECT_KEY))
    }

    /// Returns `true` while the application is being built, i.e. before the platform has
    /// injected the environment key.
    pub fn in_build(&self) -> bool {
        !self.has(ENVIRONMENT_KEY)
    }

    /// [`Phase::Build`] when [`Config::in_build`] is `true`, [`Phase::Runtime`] otherwise.
    pub fn phase(&self) -> Phase {
        if self.in_build() {
            Phase::Build
        } else {
            Phase::Runtime
        }
    }

    /// Returns `true` if the mode key is `enterprise`.
    pub fn on_enterprise(&self) -> bool {
        self.mode() == Some(ENTERPRISE_MODE)
    }

    /// Returns `true` if the current branch is the production branch of the project tier:
    /// the enterprise branch on enterprise projects, the trunk branch otherwise.
    pub fn on_production(&self) -> bool {
        let production = if self.on_enterprise() {
            &self.enterprise_branch
        } else {
            &self.trunk_branch
        };

        self.branch() == Some(production.as_str())
    }
}

// Plain fields
impl Config {
    /// The project id.
    pub fn project(&self) -> Option<&str> {
        self.value(PROJECT_KEY)
    }

    /// The environment id. Only present at runtime.
    pub fn environment(&self) -> Option<&str> {
        self.value(ENVIRONMENT_KEY)
    }

    /// The git branch the environment is built from. Only present at runtime.
    pub fn branch(&self) -> Option<&str> {
        self.value(BRANCH_KEY)
    }

    /// The deployment mode, `enterprise` or absent.
    pub fn mode(&self) -> Option<&str> {
        self.value(MODE_KEY)
    }

    /// The name of the application, as in its descriptor.
    pub fn application_name(&self) -> Option<&str> {
        self.value(APPLICATION_NAME_KEY)
    }

    /// The id of the source tree the application was built from.
    pub fn tree_id(&self) -> Option<&str> {
        self.value(TREE_ID_KEY)
    }

    /// A random value stable for the life of the project, usable as a hashing salt.
    pub fn entropy(&self) -> Option<&str> {
        self.value(ENTROPY_KEY)
    }

    /// The absolute path of the application directory.
    pub fn app_dir(&self) -> Option<&str> {
        self.value(APP_DIR_KEY)
    }

    /// The absolute path of the web root. Only present at runtime.
    pub fn document_root(&self) -> Option<&str> {
        self.value(DOCUMENT_ROOT_KEY)
    }

    /// The TCP port the application should listen on. Only present at runtime.
    pub fn port(&self) -> Option<&str> {
        self.value(PORT_KEY)
    }

    /// The unix socket the application should listen on. Only present at runtime.
    pub fn socket(&self) -> Option<&str> {
        self.value(SOCKET_KEY)
    }

    /// Reads a key that is not part of the known fields.
    ///
    /// `name` is first looked up upper-cased behind the prefix (`new` reads `PLATFORM_NEW`),
    /// then verbatim.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.value(&name.to_uppercase())
            .or_else(|| self.snapshot.get(name))
    }

    /// Reads any property by name.
    ///
    /// Known names (`application`, `routes`, `project`, `tree_id`...) go through their typed
    /// accessor, anything else falls back to [`Config::raw`].
    ///
    /// # Errors
    ///
    /// - `ConfigError::UndefinedProperty` if no key backs `name`
    /// - any error of the typed accessor for encoded fields
    pub fn property(&self, name: &str) -> Result<PropertyValue<'_>, ConfigError> {
        let text = match properties::lookup(name) {
            Some(Field::Encoded(EncodedField::Application)) => {
                return self.application().map(PropertyValue::Application);
            }
            Some(Field::Encoded(EncodedField::Variables)) => {
                return self.variables().map(PropertyValue::Variables);
            }
            Some(Field::Encoded(EncodedField::Relationships)) => {
                return self.relationships().map(PropertyValue::Relationships);
            }
            Some(Field::Encoded(EncodedField::Routes)) => {
                return self.routes().map(PropertyValue::Routes);
            }
            Some(Field::Plain(suffix)) => self.value(suffix),
            None => self.raw(name),
        };

        text.map(PropertyValue::Text)
            .ok_or_else(|| ConfigError::UndefinedProperty(name.to_owned()))
    }
}

// Encoded fields
impl Config {
    /// The application descriptor (name, type, hooks...).
    ///
    /// # Errors
    ///
    /// - `ConfigError::UndefinedProperty("application")` if the application key is absent
    /// - `ConfigError::Decode` / `ConfigError::UnexpectedShape` if it is malformed
    pub fn application(&self) -> Result<&Map<String, Value>, ConfigError> {
        self.cached(&self.application, EncodedField::Application, |key, value| {
            match value {
                Some(value) => into_object(key, value),
                None => Err(ConfigError::UndefinedProperty(APPLICATION_PROPERTY.to_owned())),
            }
        })
    }

    /// All user defined variables. An absent key yields an empty map.
    pub fn variables(&self) -> Result<&Map<String, Value>, ConfigError> {
        self.cached(&self.variables, EncodedField::Variables, |key, value| {
            value.map_or_else(|| Ok(Map::new()), |value| into_object(key, value))
        })
    }

    /// The variable `name`, `None` when it is not defined.
    pub fn variable(&self, name: &str) -> Result<Option<&Value>, ConfigError> {
        Ok(self.variables()?.get(name))
    }

    /// Returns the variable `name`, or `default` when it is not defined.
    ///
    /// # Errors
    ///
    /// Decode errors are not defaulted, only absence is.
    pub fn variable_or(&self, name: &str, default: impl Into<Value>) -> Result<Value, ConfigError> {
        Ok(self
            .variable(name)?
            .cloned()
            .unwrap_or_else(|| default.into()))
    }

    /// All relationships. An absent key yields no relationships.
    pub fn relationships(&self) -> Result<&Relationships, ConfigError> {
        self.cached(&self.relationships, EncodedField::Relationships, |key, value| {
            value.map_or_else(
                || Ok(Relationships::default()),
                |value| Relationships::from_value(key, value),
            )
        })
    }

    /// Returns `true` if the relationship `name` is defined.
    pub fn has_relationship(&self, name: &str) -> Result<bool, ConfigError> {
        Ok(self.relationships()?.contains(name))
    }

    /// The first instance of the relationship `name`.
    pub fn credentials(&self, name: &str) -> Result<&RelationshipInstance, ConfigError> {
        self.credentials_at(name, 0)
    }

    /// The instance of the relationship `name` at `index`, unmodified.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Phase` at build time, when the platform hasn't injected any relationship
    /// - `ConfigError::RelationshipNotFound` if `name` is not defined
    /// - `ConfigError::RelationshipIndex` if `name` has no instance at `index`
    pub fn credentials_at(
        &self,
        name: &str,
        index: usize,
    ) -> Result<&RelationshipInstance, ConfigError> {
        if self.in_build() && !self.has(RELATIONSHIPS_KEY) {
            warn!(relationship = name, "relationships read during the build phase");
            return Err(ConfigError::Phase(
                "relationships are not available during the build phase".into(),
            ));
        }

        self.relationships()?.instance(name, index)
    }

    /// The routing table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Phase` during the build phase: routes don't exist yet, which is
    /// not the same as an empty routing table.
    pub fn routes(&self) -> Result<&RouteTable, ConfigError> {
        if self.in_build() {
            warn!("routes read during the build phase");
            return Err(ConfigError::Phase(
                "routes are not available during the build phase".into(),
            ));
        }

        self.cached(&self.routes, EncodedField::Routes, |key, value| {
            value.map_or_else(
                || Ok(RouteTable::default()),
                |value| RouteTable::from_value(key, value),
            )
        })
    }

    /// The route whose `id` attribute is `id`.
    pub fn get_route(&self, id: &str) -> Result<&Route, ConfigError> {
        self.routes()?.by_id(id)
    }

    /// The route answering on the resolved `url`.
    pub fn route_by_url(&self, url: &str) -> Result<&Route, ConfigError> {
        self.routes()?.by_url(url)
    }
}

// Helper methods
impl Config {
    fn key(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    fn value(&self, suffix: &str) -> Option<&str> {
        self.snapshot.get(&self.key(suffix))
    }

    fn has(&self, suffix: &str) -> bool {
        self.snapshot.contains(&self.key(suffix))
    }

    /// Decodes `field` once and returns the cached outcome afterwards.
    ///
    /// `build` receives the full key and the decoded value, `None` when the key is absent.
    fn cached<'a, T>(
        &'a self,
        cell: &'a Cached<T>,
        field: EncodedField,
        build: impl FnOnce(&str, Option<Value>) -> Result<T, ConfigError>,
    ) -> Result<&'a T, ConfigError> {
        cell.get_or_init(|| {
            let key = self.key(field.key());
            debug!(key = key, field = ?field, "decoding platform field");

            let value = match self.snapshot.get(&key) {
                Some(raw) => Some(decode(&key, raw)?),
                None => None,
            };

            build(&key, value)
        })
        .as_ref()
        .map_err(Clone::clone)
    }
}

fn into_object(key: &str, value: Value) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        // an empty map encoded on the PHP side arrives as `[]`
        Value::Array(items) if items.is_empty() => Ok(Map::new()),
        other => Err(ConfigError::UnexpectedShape {
            key: key.to_owned(),
            message: format!("expected an object, found `{other}`"),
        }),
    }
}
