// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

mod common;

use common::{build_env, deploy_env, deploy_env_with};
use platform_config::{Config, ConfigError, EnvSnapshot, Phase, PropertyValue, decoder::encode};
use serde_json::json;
use std::thread;

#[test]
fn not_on_platform_returns_correctly() {
    let config = Config::new(EnvSnapshot::default());

    assert!(!config.is_available());
}

#[test]
fn on_platform_returns_correctly_in_runtime() {
    assert!(Config::new(deploy_env()).is_available());
}

#[test]
fn on_platform_returns_correctly_in_build() {
    assert!(Config::new(build_env()).is_available());
}

#[test]
fn project_key_is_required_under_the_default_prefix() {
    let config = Config::new(EnvSnapshot::new([("PLATFORM_APPLICATION", "app")]));

    assert!(!config.is_available());
}

#[test]
fn custom_prefix() {
    let config = Config::with_prefix(EnvSnapshot::new([("APPLICATION", "test-application")]), "");

    assert!(config.is_available());
    assert_eq!(config.prefix(), "");
}

#[test]
fn in_build_in_build_phase_is_true() {
    let config = Config::new(build_env());

    assert!(config.in_build());
    assert_eq!(config.phase(), Phase::Build);
}

#[test]
fn in_build_in_deploy_phase_is_false() {
    let config = Config::new(deploy_env());

    assert!(!config.in_build());
    assert_eq!(config.phase(), Phase::Runtime);
}

#[test]
fn buildtime_properties_are_available() {
    let config = Config::new(build_env());

    assert_eq!(config.app_dir(), Some("/app"));
    assert_eq!(config.application_name(), Some("app"));
    assert_eq!(config.project(), Some("test-project"));
    assert_eq!(config.tree_id(), Some("abc123"));
    assert_eq!(config.entropy(), Some("def789"));
    assert_eq!(config.branch(), None);
    assert_eq!(config.environment(), None);
}

#[test]
fn runtime_properties_are_available() {
    let config = Config::new(deploy_env());

    assert_eq!(config.branch(), Some("feature-x"));
    assert_eq!(config.environment(), Some("feature-x-hgi456"));
    assert_eq!(config.document_root(), Some("/app/web"));
    assert_eq!(config.port(), Some("8888"));
    assert_eq!(config.socket(), Some("/run/app.sock"));
}

#[test]
fn application_is_available_in_build() {
    let config = Config::new(build_env());
    let application = config.application().unwrap();

    assert_eq!(application["type"], "php:7.2");
    assert_eq!(application["hooks"]["deploy"], "php bin/migrate.php\n");
}

#[test]
fn load_routes_in_runtime_works() {
    let config = Config::new(deploy_env());

    let routes = config.routes().unwrap();

    assert_eq!(routes.len(), 2);
}

#[test]
fn load_routes_in_build_fails() {
    let config = Config::new(build_env());

    assert!(matches!(config.routes(), Err(ConfigError::Phase(_))));
    assert!(matches!(config.get_route("main"), Err(ConfigError::Phase(_))));
}

#[test]
fn get_route_by_id_works() {
    let config = Config::new(deploy_env());

    let route = config.get_route("main").unwrap();

    assert_eq!(route.original_url(), Some("https://www.{default}/"));
    assert_eq!(route.get("original_url"), Some(&json!("https://www.{default}/")));
    assert_eq!(
        route.url(),
        "https://www.master-7rqtwti-gcpjkefjk4wc2.us-2.platformsh.site/"
    );
}

#[test]
fn get_non_existent_route_fails() {
    let config = Config::new(deploy_env());

    assert_eq!(
        config.get_route("missing"),
        Err(ConfigError::RouteNotFound("missing".into()))
    );
}

#[test]
fn route_by_url_and_primary() {
    let config = Config::new(deploy_env());

    let redirect = config
        .route_by_url("https://master-7rqtwti-gcpjkefjk4wc2.us-2.platformsh.site/")
        .unwrap();
    assert_eq!(redirect.route_type(), Some("redirect"));
    assert_eq!(redirect.id(), None);

    let primary = config.routes().unwrap().primary().unwrap();
    assert_eq!(primary.id(), Some("main"));
}

#[test]
fn on_enterprise_returns_true_on_enterprise() {
    let config = Config::new(deploy_env_with(&[("PLATFORM_MODE", "enterprise")]));

    assert!(config.on_enterprise());
}

#[test]
fn on_enterprise_returns_false_on_standard() {
    assert!(!Config::new(deploy_env()).on_enterprise());
}

#[test]
fn on_production_on_enterprise_prod_is_true() {
    let config = Config::new(deploy_env_with(&[
        ("PLATFORM_MODE", "enterprise"),
        ("PLATFORM_BRANCH", "production"),
    ]));

    assert!(config.on_production());
}

#[test]
fn on_production_on_enterprise_stg_is_false() {
    let config = Config::new(deploy_env_with(&[
        ("PLATFORM_MODE", "enterprise"),
        ("PLATFORM_BRANCH", "staging"),
    ]));

    assert!(!config.on_production());
}

#[test]
fn on_production_on_enterprise_master_is_false() {
    let config = Config::new(deploy_env_with(&[
        ("PLATFORM_MODE", "enterprise"),
        ("PLATFORM_BRANCH", "master"),
    ]));

    assert!(!config.on_production());
}

#[test]
fn on_production_on_standard_prod_is_true() {
    let config = Config::new(deploy_env_with(&[("PLATFORM_BRANCH", "master")]));

    assert!(config.on_production());
}

#[test]
fn on_production_on_standard_production_branch_is_false() {
    let config = Config::new(deploy_env_with(&[("PLATFORM_BRANCH", "production")]));

    assert!(!config.on_production());
}

#[test]
fn on_production_on_standard_stg_is_false() {
    // the fixture is on a feature branch
    assert!(!Config::new(deploy_env()).on_production());
}

#[test]
fn credentials_existing_relationship_returns() {
    let config = Config::new(deploy_env());

    let creds = config.credentials("database").unwrap();

    assert_eq!(creds["scheme"], "mysql");
    assert_eq!(creds["type"], "mysql:10.2");
    assert_eq!(creds["port"], 3306);
}

#[test]
fn credentials_missing_relationship_fails() {
    let config = Config::new(deploy_env());

    assert_eq!(
        config.credentials("does-not-exist"),
        Err(ConfigError::RelationshipNotFound("does-not-exist".into()))
    );
}

#[test]
fn credentials_missing_relationship_index_fails() {
    let config = Config::new(deploy_env());

    assert_eq!(
        config.credentials_at("database", 3),
        Err(ConfigError::RelationshipIndex {
            name: "database".into(),
            index: 3,
            len: 1,
        })
    );
}

#[test]
fn has_relationship() {
    let config = Config::new(deploy_env());

    assert!(config.has_relationship("database").unwrap());
    assert!(!config.has_relationship("cache").unwrap());
}

#[test]
fn reading_existing_variable_works() {
    let config = Config::new(deploy_env());

    assert_eq!(config.variable("somevar").unwrap(), Some(&json!("someval")));
}

#[test]
fn reading_missing_variable_returns_default() {
    let config = Config::new(deploy_env());

    assert_eq!(
        config.variable_or("missing", "default-val").unwrap(),
        json!("default-val")
    );
    assert_eq!(config.variable("missing").unwrap(), None);
}

#[test]
fn variables_returns_on_platform() {
    let config = Config::new(deploy_env());

    let vars = config.variables().unwrap();

    assert_eq!(vars["somevar"], "someval");
    assert_eq!(vars["feature_flags"]["beta"], true);
}

#[test]
fn variables_absent_is_empty() {
    let config = Config::new(EnvSnapshot::new([("PLATFORM_PROJECT", "test-project")]));

    assert!(config.variables().unwrap().is_empty());
    assert_eq!(config.variable_or("x", 3).unwrap(), json!(3));
}

#[test]
fn mixed_config() {
    let config = Config::new(EnvSnapshot::new([
        ("PLATFORM_PROJECT", "test-project".to_owned()),
        ("PLATFORM_ENVIRONMENT", "test-environment".to_owned()),
        ("PLATFORM_APPLICATION", encode(&json!({"type": "php:7.0"}))),
        (
            "PLATFORM_RELATIONSHIPS",
            encode(&json!({"database": [{"host": "127.0.0.1"}]})),
        ),
        ("PLATFORM_NEW", "some-new-variable".to_owned()),
    ]));

    assert!(config.is_available());
    assert_eq!(config.application().unwrap()["type"], "php:7.0");
    assert_eq!(
        config.property("project").unwrap(),
        PropertyValue::Text("test-project")
    );

    let Ok(PropertyValue::Relationships(rels)) = config.property("relationships") else {
        panic!("relationships property should decode");
    };
    assert_eq!(rels.instance("database", 0).unwrap()["host"], "127.0.0.1");

    assert_eq!(
        config.property("new").unwrap().as_str(),
        Some("some-new-variable")
    );
}

#[test]
fn unknown_property_fails() {
    let config = Config::new(deploy_env());

    assert_eq!(
        config.property("nothing_here"),
        Err(ConfigError::UndefinedProperty("nothing_here".into()))
    );
}

#[test]
fn encoded_properties_by_name() {
    let config = Config::new(deploy_env());

    assert!(matches!(
        config.property("routes"),
        Ok(PropertyValue::Routes(routes)) if routes.len() == 2
    ));
    assert!(matches!(
        config.property("variables"),
        Ok(PropertyValue::Variables(vars)) if vars.contains_key("somevar")
    ));
    assert!(matches!(
        config.property("application"),
        Ok(PropertyValue::Application(_))
    ));
}

#[test]
fn invalid_json() {
    let config = Config::new(EnvSnapshot::new([
        ("PLATFORM_APPLICATION", "app".to_owned()),
        ("PLATFORM_ENVIRONMENT", "test-environment".to_owned()),
        ("PLATFORM_VARIABLES", encode_raw("{some-invalid-json}")),
    ]));

    let err = config.variables().unwrap_err();

    assert!(matches!(err, ConfigError::Decode { code: 4, .. }));
    assert!(err.to_string().starts_with("Error decoding JSON, code: 4"));
    assert!(config.variable_or("somevar", "default").is_err());
}

#[test]
fn decoding_happens_once() {
    let config = Config::new(deploy_env());

    let first = config.variables().unwrap();
    let second = config.variables().unwrap();
    assert!(std::ptr::eq(first, second));

    let first = config.routes().unwrap();
    let second = config.routes().unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn concurrent_first_access_publishes_one_value() {
    let config = Config::new(deploy_env());

    let addresses: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| config.relationships().unwrap() as *const _ as usize))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn snapshot_is_not_modified() {
    let config = Config::new(deploy_env());
    let before = config.snapshot().clone();

    let _ = config.routes();
    let _ = config.variables();

    assert_eq!(config.snapshot(), &before);
    assert!(config.snapshot().get("PLATFORM_ROUTES").is_some());
}

fn encode_raw(text: &str) -> String {
    use base64::{Engine, engine::general_purpose};
    general_purpose::STANDARD.encode(text)
}

