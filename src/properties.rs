// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! Static table of the fields reachable through [`Config::property`](crate::Config::property).

use crate::{
    env_keys::{
        APP_DIR_KEY, APPLICATION_KEY, APPLICATION_NAME_KEY, BRANCH_KEY, DOCUMENT_ROOT_KEY,
        ENTROPY_KEY, ENVIRONMENT_KEY, MODE_KEY, PORT_KEY, PROJECT_KEY, RELATIONSHIPS_KEY,
        ROUTES_KEY, SOCKET_KEY, TREE_ID_KEY, VARIABLES_KEY,
    },
    relationships::Relationships,
    routes::RouteTable,
};
use serde_json::{Map, Value};

/// The structured fields, each decoded once and cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EncodedField {
    Application,
    Variables,
    Relationships,
    Routes,
}

impl EncodedField {
    pub(crate) fn key(self) -> &'static str {
        match self {
            EncodedField::Application => APPLICATION_KEY,
            EncodedField::Variables => VARIABLES_KEY,
            EncodedField::Relationships => RELATIONSHIPS_KEY,
            EncodedField::Routes => ROUTES_KEY,
        }
    }
}

/// How a named property is read from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Encoded(EncodedField),
    /// Read as is, the value is the key suffix.
    Plain(&'static str),
}

pub(crate) const FIELDS: &[(&str, Field)] = &[
    ("application", Field::Encoded(EncodedField::Application)),
    ("variables", Field::Encoded(EncodedField::Variables)),
    ("relationships", Field::Encoded(EncodedField::Relationships)),
    ("routes", Field::Encoded(EncodedField::Routes)),
    ("project", Field::Plain(PROJECT_KEY)),
    ("environment", Field::Plain(ENVIRONMENT_KEY)),
    ("application_name", Field::Plain(APPLICATION_NAME_KEY)),
    ("tree_id", Field::Plain(TREE_ID_KEY)),
    ("entropy", Field::Plain(ENTROPY_KEY)),
    ("document_root", Field::Plain(DOCUMENT_ROOT_KEY)),
    ("app_dir", Field::Plain(APP_DIR_KEY)),
    ("branch", Field::Plain(BRANCH_KEY)),
    ("mode", Field::Plain(MODE_KEY)),
    ("port", Field::Plain(PORT_KEY)),
    ("socket", Field::Plain(SOCKET_KEY)),
];

pub(crate) fn lookup(name: &str) -> Option<Field> {
    FIELDS
        .iter()
        .find(|(field_name, _)| *field_name == name)
        .map(|(_, field)| *field)
}

/// The value of a property read by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    Application(&'a Map<String, Value>),
    Variables(&'a Map<String, Value>),
    Relationships(&'a Relationships),
    Routes(&'a RouteTable),
    /// A plain string field or a raw snapshot value.
    Text(&'a str),
}

impl<'a> PropertyValue<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }
}
