// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Environment Keys
//!
//! This module contains constant definitions for the environment variable keys injected by
//! the platform, together with the defaults used to classify the running environment.
//!
//! Every key below is a suffix: the reader prepends its configured prefix (by default
//! [`DEFAULT_PREFIX`]) before looking it up in the snapshot.

/// Prefix applied to every platform key unless the reader is built with another one.
pub const DEFAULT_PREFIX: &str = "PLATFORM_";

/// Base64 encoded JSON keys
pub const APPLICATION_KEY: &str = "APPLICATION";
pub const VARIABLES_KEY: &str = "VARIABLES";
pub const ROUTES_KEY: &str = "ROUTES";
pub const RELATIONSHIPS_KEY: &str = "RELATIONSHIPS";

/// Plain string identity keys
pub const PROJECT_KEY: &str = "PROJECT";
pub const ENVIRONMENT_KEY: &str = "ENVIRONMENT";
pub const BRANCH_KEY: &str = "BRANCH";
pub const MODE_KEY: &str = "MODE";
pub const TREE_ID_KEY: &str = "TREE_ID";
pub const ENTROPY_KEY: &str = "ENTROPY";
pub const APP_DIR_KEY: &str = "APP_DIR";
pub const DOCUMENT_ROOT_KEY: &str = "DOCUMENT_ROOT";
pub const APPLICATION_NAME_KEY: &str = "APPLICATION_NAME";

/// Runtime only plain string keys
pub const PORT_KEY: &str = "PORT";
pub const SOCKET_KEY: &str = "SOCKET";

/// Value of the mode key on enterprise deployments
pub const ENTERPRISE_MODE: &str = "enterprise";

/// Production branch names
pub const DEFAULT_TRUNK_BRANCH: &str = "master";
pub const DEFAULT_ENTERPRISE_PRODUCTION_BRANCH: &str = "production";
