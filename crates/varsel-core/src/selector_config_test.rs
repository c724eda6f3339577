use std::io::Write;

use super::*;

#[test]
fn default_enables_conflict_resolution_only() {
    let config = SelectorConfig::default();
    assert!(config.resolve_availability_conflict);
    assert!(!config.select_sold_out);
    assert!(!config.reject_malformed_variants);
    assert!(config.hide_single_options_from_level.is_none());
}

#[test]
fn empty_mapping_yields_defaults() {
    let config = parse_selector_config("{}").unwrap();
    assert_eq!(config, SelectorConfig::default());
}

#[test]
fn partial_yaml_keeps_remaining_defaults() {
    let config = parse_selector_config("select_sold_out: true\n").unwrap();
    assert!(config.select_sold_out);
    assert!(config.resolve_availability_conflict);
}

#[test]
fn full_yaml_overrides_every_field() {
    let yaml = "\
hide_single_options_from_level: 1
resolve_availability_conflict: false
select_sold_out: true
reject_malformed_variants: true
";
    let config = parse_selector_config(yaml).unwrap();
    assert_eq!(config.hide_single_options_from_level, Some(1));
    assert!(!config.resolve_availability_conflict);
    assert!(config.select_sold_out);
    assert!(config.reject_malformed_variants);
}

#[test]
fn unknown_field_is_a_parse_error() {
    let err = parse_selector_config("resolve_conflicts: true\n").unwrap_err();
    assert!(matches!(err, ConfigError::SelectorFileParse(_)));
}

#[test]
fn hide_level_out_of_range_is_rejected() {
    let err = parse_selector_config("hide_single_options_from_level: 3\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn load_selector_config_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "select_sold_out: true").expect("write config");
    let config = load_selector_config(file.path()).unwrap();
    assert!(config.select_sold_out);
}

#[test]
fn load_selector_config_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.yaml");
    let err = load_selector_config(&path).unwrap_err();
    assert!(
        matches!(err, ConfigError::SelectorFileIo { ref path, .. } if path.ends_with("missing.yaml")),
        "expected SelectorFileIo, got: {err:?}"
    );
}
