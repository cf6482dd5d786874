// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

#![allow(dead_code)]

use platform_config::{EnvSnapshot, decoder::encode};
use serde_json::Value;
use std::{fs, path::PathBuf};

pub fn load_json(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/valid")
        .join(format!("{name}.json"));
    let text = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn load_env(name: &str) -> Vec<(String, String)> {
    let Value::Object(map) = load_json(name) else {
        panic!("{name}.json is not an object");
    };

    map.into_iter()
        .map(|(k, v)| (k, v.as_str().unwrap().to_owned()))
        .collect()
}

/// Variables of a build phase environment: no routes, relationships or environment.
pub fn build_vars() -> Vec<(String, String)> {
    let mut vars = load_env("ENV");
    for key in ["PLATFORM_APPLICATION", "PLATFORM_VARIABLES"] {
        vars.push((key.to_owned(), encode(&load_json(key))));
    }
    vars
}

/// Variables of a runtime environment.
pub fn deploy_vars() -> Vec<(String, String)> {
    let mut vars = build_vars();
    for key in ["PLATFORM_ROUTES", "PLATFORM_RELATIONSHIPS"] {
        vars.push((key.to_owned(), encode(&load_json(key))));
    }
    vars.extend(load_env("ENV_runtime"));
    vars
}

pub fn build_env() -> EnvSnapshot {
    EnvSnapshot::new(build_vars())
}

pub fn deploy_env() -> EnvSnapshot {
    EnvSnapshot::new(deploy_vars())
}

/// The runtime environment with `overrides` applied on top.
pub fn deploy_env_with(overrides: &[(&str, &str)]) -> EnvSnapshot {
    let mut vars = deploy_vars();
    vars.extend(overrides.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    EnvSnapshot::new(vars)
}

