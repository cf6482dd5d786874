// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Payload Decoder
//!
//! The platform injects its structured values (application, variables, routes and
//! relationships) as base64 encoded JSON. This module turns such a raw string into a
//! `serde_json::Value`, classifying every failure with a numeric [`DecodeCode`].

use crate::errors::ConfigError;
use base64::{Engine, engine::general_purpose};
use serde_json::{Value, error::Category};
use std::fmt;
use tracing::error;

/// Diagnostic code attached to a `ConfigError::Decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DecodeCode {
    /// The document is nested deeper than the parser accepts.
    Depth = 1,
    /// A string contains an unescaped control character.
    ControlCharacter = 3,
    /// Any other syntax error, truncated input included.
    Syntax = 4,
    /// The base64 payload did not decode to UTF-8.
    Utf8 = 5,
    /// The raw value is not valid base64.
    Base64 = 64,
}

impl DecodeCode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DecodeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<&serde_json::Error> for DecodeCode {
    fn from(err: &serde_json::Error) -> Self {
        // serde_json exposes no finer error kind than `Category`, so the depth and control
        // character cases are told apart by the wording of its messages.
        let message = err.to_string();

        match err.classify() {
            Category::Syntax if message.starts_with("recursion limit exceeded") => {
                DecodeCode::Depth
            }
            Category::Syntax if message.starts_with("control character") => {
                DecodeCode::ControlCharacter
            }
            _ => DecodeCode::Syntax,
        }
    }
}

/// Decodes a base64 encoded JSON value read from `key`.
///
/// `key` is only used for diagnostics.
///
/// # Errors
///
/// Returns `ConfigError::Decode` carrying the matching [`DecodeCode`] if any of the three
/// steps (base64, UTF-8, JSON) fails.
pub fn decode(key: &str, raw: &str) -> Result<Value, ConfigError> {
    let bytes = general_purpose::STANDARD.decode(raw.trim()).map_err(|err| {
        error!(key = key, error = err.to_string(), "base64 decoded error");
        decode_error(key, DecodeCode::Base64, err.to_string())
    })?;

    let text = String::from_utf8(bytes).map_err(|err| {
        error!(key = key, error = err.to_string(), "error to convert to String");
        decode_error(key, DecodeCode::Utf8, err.to_string())
    })?;

    serde_json::from_str(&text).map_err(|err| {
        let code = DecodeCode::from(&err);
        error!(key = key, code = code.code(), error = err.to_string(), "error decoding JSON");
        decode_error(key, code, err.to_string())
    })
}

/// Encodes a value the way the platform does, the inverse of [`decode`].
pub fn encode(value: &Value) -> String {
    general_purpose::STANDARD.encode(value.to_string())
}

fn decode_error(key: &str, code: DecodeCode, message: String) -> ConfigError {
    ConfigError::Decode {
        key: key.to_owned(),
        code: code.code(),
        message,
    }
}
