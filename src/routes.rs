// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Routes
//!
//! The platform describes its HTTP routing table as a JSON object keyed by resolved URL.
//! [`RouteTable`] keeps the entries in their original order and indexes them by URL and by
//! the optional `id` attribute callers assign in their routes definition.

use crate::errors::ConfigError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One entry of the routing table.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    url: String,
    attributes: Map<String, Value>,
}

impl Route {
    pub fn new(url: impl Into<String>, attributes: Map<String, Value>) -> Route {
        Route {
            url: url.into(),
            attributes,
        }
    }

    /// The resolved URL this route answers on.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn id(&self) -> Option<&str> {
        self.str_attribute("id")
    }

    /// The URL as written in the routes definition, placeholders such as `{default}` kept.
    pub fn original_url(&self) -> Option<&str> {
        self.str_attribute("original_url")
    }

    /// `upstream` or `redirect`.
    pub fn route_type(&self) -> Option<&str> {
        self.str_attribute("type")
    }

    pub fn upstream(&self) -> Option<&str> {
        self.str_attribute("upstream")
    }

    /// Target of a redirect route.
    pub fn to(&self) -> Option<&str> {
        self.str_attribute("to")
    }

    pub fn is_primary(&self) -> bool {
        self.attributes
            .get("primary")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// The full attribute bag, unmodified.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    fn str_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }
}

/// The ordered routing table with its URL and id indexes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_url: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl RouteTable {
    /// Builds the table from the decoded value of the routes key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnexpectedShape` if the value is not an object of objects. An
    /// empty array is read as an empty table.
    pub fn from_value(key: &str, value: Value) -> Result<RouteTable, ConfigError> {
        let entries = match value {
            Value::Object(entries) => entries,
            // an empty map encoded on the PHP side arrives as `[]`
            Value::Array(items) if items.is_empty() => Map::new(),
            _ => {
                return Err(ConfigError::UnexpectedShape {
                    key: key.to_owned(),
                    message: "routes must be an object keyed by url".into(),
                });
            }
        };

        let mut routes = Vec::with_capacity(entries.len());
        for (url, attributes) in entries {
            let Value::Object(attributes) = attributes else {
                return Err(ConfigError::UnexpectedShape {
                    key: key.to_owned(),
                    message: format!("route `{url}` is not an object"),
                });
            };
            routes.push(Route::new(url, attributes));
        }

        Ok(RouteTable::from_routes(routes))
    }

    pub fn from_routes(routes: Vec<Route>) -> RouteTable {
        let mut by_url = HashMap::with_capacity(routes.len());
        let mut by_id = HashMap::new();

        for (idx, route) in routes.iter().enumerate() {
            by_url.insert(route.url.clone(), idx);
            // first route wins when ids collide
            if let Some(id) = route.id() {
                by_id.entry(id.to_owned()).or_insert(idx);
            }
        }

        RouteTable {
            routes,
            by_url,
            by_id,
        }
    }

    /// Looks a route up by its `id` attribute.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RouteNotFound` if no route carries that id.
    pub fn by_id(&self, id: &str) -> Result<&Route, ConfigError> {
        self.by_id
            .get(id)
            .map(|idx| &self.routes[*idx])
            .ok_or_else(|| ConfigError::RouteNotFound(id.to_owned()))
    }

    /// Looks a route up by its resolved URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RouteNotFound` if no route answers on that URL.
    pub fn by_url(&self, url: &str) -> Result<&Route, ConfigError> {
        self.by_url
            .get(url)
            .map(|idx| &self.routes[*idx])
            .ok_or_else(|| ConfigError::RouteNotFound(url.to_owned()))
    }

    /// The route flagged as primary, or the first one when none is.
    pub fn primary(&self) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.is_primary())
            .or_else(|| self.routes.first())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
