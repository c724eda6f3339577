use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "VARSEL_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "debug");
    assert!(cfg.selector_config_path.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("VARSEL_ENV", "production");
    map.insert("VARSEL_LOG_LEVEL", "varsel_engine=debug");
    map.insert("VARSEL_CONFIG_PATH", "./config/selector.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "varsel_engine=debug");
    assert_eq!(
        cfg.selector_config_path.as_deref(),
        Some(Path::new("./config/selector.yaml"))
    );
}

#[test]
fn build_app_config_log_level_defaults_follow_environment() {
    for (env, expected) in [("production", "info"), ("test", "warn")] {
        let mut map = HashMap::new();
        map.insert("VARSEL_ENV", env);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, expected, "default log level for {env}");
    }
}

#[test]
fn build_app_config_explicit_log_level_beats_environment_default() {
    let mut map = HashMap::new();
    map.insert("VARSEL_ENV", "test");
    map.insert("VARSEL_LOG_LEVEL", "trace");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "trace");
}

#[test]
fn build_app_config_ignores_blank_config_path() {
    let mut map = HashMap::new();
    map.insert("VARSEL_CONFIG_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.selector_config_path.is_none());
}

#[test]
fn build_app_config_fails_on_invalid_env() {
    let mut map = HashMap::new();
    map.insert("VARSEL_ENV", "producton");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VARSEL_ENV"),
        "expected InvalidEnvVar(VARSEL_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_on_blank_log_level() {
    let mut map = HashMap::new();
    map.insert("VARSEL_LOG_LEVEL", "");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VARSEL_LOG_LEVEL"),
        "expected InvalidEnvVar(VARSEL_LOG_LEVEL), got: {result:?}"
    );
}
