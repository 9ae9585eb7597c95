//! Integration tests for settings loading.

use std::fs;
use std::path::PathBuf;

use rxlex_cli::settings::{DEFAULT_SETTINGS_FILE, Settings, load_settings};

#[test]
fn test_missing_implicit_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let settings = load_settings(None, dir.path()).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_implicit_file_is_read_from_the_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join(DEFAULT_SETTINGS_FILE),
        "[source]\nsab = \"RXNORM\"\n\n[normalize]\ndrop_foreign_canonicals = false\n\n[output]\ndir = \"lexicon\"\n",
    )
    .expect("write settings");

    let settings = load_settings(None, dir.path()).expect("load settings");
    assert_eq!(settings.source.sab.as_deref(), Some("RXNORM"));
    assert!(!settings.normalize.drop_foreign_canonicals);
    assert_eq!(settings.normalize.delimiter, " / ");
    assert_eq!(settings.output.dir, PathBuf::from("lexicon"));
}

#[test]
fn test_explicit_file_must_exist() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nowhere.toml");
    let error = load_settings(Some(&missing), dir.path()).unwrap_err();
    assert!(format!("{error:#}").contains("nowhere.toml"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[normalize]\ndrop_foreign_canonicals = \"maybe\"\n").expect("write");
    assert!(load_settings(Some(&path), dir.path()).is_err());

    fs::write(dir.path().join(DEFAULT_SETTINGS_FILE), "not toml at all [").expect("write");
    assert!(load_settings(None, dir.path()).is_err());
}

#[test]
fn test_custom_word_lists_replace_the_defaults() {
    let settings = Settings::from_toml("[normalize]\nroute_words = [\"oral\"]\n").expect("parse");
    assert_eq!(settings.normalize.route_words, vec!["oral".to_string()]);
    assert!(!settings.normalize.dosage_units.is_empty());
}
