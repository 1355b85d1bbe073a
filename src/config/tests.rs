//! Tests for config functionality.

use super::operations::config_path_from;
use crate::config::Config;
use crate::scheduler::{MAX_WORKERS, default_worker_count};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.csv_file, Path::new("samples.csv"));
    assert_eq!(config.output_dir, None);
    assert_eq!(config.scad_file, None);
    assert_eq!(config.output_extension, "stl");
    assert!(config.detect_header);
    assert_eq!(config.max_workers, default_worker_count() as i64);
    assert_eq!(config.openscad_path, None);
    assert!(!config.dry_run);
    assert!(!config.verbose);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("{}").unwrap();

    // Should use all defaults
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
csv_file: catalogs/pla.csv
max_workers: 6
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.csv_file, Path::new("catalogs/pla.csv"));
    assert_eq!(config.max_workers, 6);

    // Unspecified values should use defaults
    assert_eq!(config.output_extension, "stl");
    assert!(config.detect_header);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
csv_file: /data/samples.csv
output_dir: /data/out
scad_file: /data/swatch.scad
output_extension: 3mf
detect_header: false
max_workers: 2
openscad_path: "flatpak run org.openscad.OpenSCAD"
dry_run: true
verbose: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.csv_file, Path::new("/data/samples.csv"));
    assert_eq!(config.output_dir.as_deref(), Some(Path::new("/data/out")));
    assert_eq!(config.scad_file.as_deref(), Some(Path::new("/data/swatch.scad")));
    assert_eq!(config.output_extension, "3mf");
    assert!(!config.detect_header);
    assert_eq!(config.max_workers, 2);
    assert_eq!(
        config.openscad_path.as_deref(),
        Some("flatpak run org.openscad.OpenSCAD")
    );
    assert!(config.dry_run);
    assert!(config.verbose);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = Config::from_yaml("future_option: 42\nmax_workers: 3\n").unwrap();
    assert_eq!(config.max_workers, 3);
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = Config::from_yaml("max_workers: [not, a, number]").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_worker_count_is_clamped_not_rejected() {
    assert_eq!(Config::from_yaml("max_workers: 0").unwrap().max_workers, 1);
    assert_eq!(Config::from_yaml("max_workers: -4").unwrap().max_workers, 1);
    assert_eq!(
        Config::from_yaml("max_workers: 500").unwrap().max_workers,
        MAX_WORKERS as i64
    );
}

#[test]
fn test_validate_csv_file_required() {
    let err = Config::from_yaml("csv_file: \"\"").unwrap_err();
    assert!(err.to_string().contains("csv_file is required"));
}

#[test]
fn test_validate_output_extension() {
    let err = Config::from_yaml("output_extension: \"\"").unwrap_err();
    assert!(err.to_string().contains("must be non-empty"));

    let err = Config::from_yaml("output_extension: .stl").unwrap_err();
    assert!(err.to_string().contains("leading dot"));
    assert!(err.to_string().contains("Use 'stl' instead"));
}

#[test]
fn test_resolved_paths_default_next_to_csv() {
    let config = Config {
        csv_file: PathBuf::from("/data/catalog/samples.csv"),
        ..Config::default()
    };
    assert_eq!(config.output_dir(), Path::new("/data/catalog/stl"));
    assert_eq!(
        config.template_path(),
        Path::new("/data/catalog/FilamentSamples.scad")
    );

    let bare = Config::default();
    assert_eq!(bare.output_dir(), Path::new("stl"));
    assert_eq!(bare.template_path(), Path::new("FilamentSamples.scad"));
}

#[test]
fn test_resolved_paths_explicit() {
    let config = Config {
        output_dir: Some(PathBuf::from("/tmp/out")),
        scad_file: Some(PathBuf::from("/tmp/t.scad")),
        ..Config::default()
    };
    assert_eq!(config.output_dir(), Path::new("/tmp/out"));
    assert_eq!(config.template_path(), Path::new("/tmp/t.scad"));
}

#[test]
fn test_yaml_round_trip_of_example() {
    let example = Config::example();
    let yaml = example.to_yaml().unwrap();

    assert!(yaml.contains("csv_file: samples.csv"));
    assert!(yaml.contains("max_workers: 4"));
    assert_eq!(Config::from_yaml(&yaml).unwrap(), example);
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/dir/config.yaml");

    Config::example().save(&path).unwrap();
    let loaded = Config::load(&path).unwrap();

    assert_eq!(loaded, Config::example());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_config_path_prefers_xdg() {
    let path = config_path_from(
        Some(OsString::from("/xdg")),
        Some(OsString::from("/home/user")),
    );
    assert_eq!(path, Path::new("/xdg/filament-samples/config.yaml"));
}

#[test]
fn test_config_path_falls_back_to_home() {
    let path = config_path_from(Some(OsString::new()), Some(OsString::from("/home/user")));
    assert_eq!(
        path,
        Path::new("/home/user/.config/filament-samples/config.yaml")
    );
}

#[test]
fn test_config_path_without_home() {
    assert_eq!(config_path_from(None, None), Path::new("filament-samples.yaml"));
}
