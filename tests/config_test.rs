// tests/config_test.rs
use git_bump::config::{load_config, Config, CONFIG_FILE_NAME};
use git_bump::store::SearchMode;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Runs `f` with the working directory set to `dir`, restoring it afterwards.
fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let original = env::current_dir().unwrap();
    env::set_current_dir(dir).unwrap();
    let result = f();
    env::set_current_dir(original).unwrap();
    result
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.publish.remote, "origin");
    assert_eq!(config.publish.search, SearchMode::Recursive);
    assert!(config.classifier.minor_types.contains(&"feat".to_string()));
    assert!(config.classifier.patch_types.contains(&"fix".to_string()));
    assert!(config
        .classifier
        .breaking_change_indicators
        .contains(&"BREAKING CHANGE:".to_string()));
    assert_eq!(config.classifier.skip_markers, vec!["[skip hint]"]);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[classifier]
minor_types = ["feat", "story"]
skip_markers = ["[no bump]"]

[publish]
remote = "upstream"
tag_prefix = "v"
tag_suffix = "-rc"
search = "top-level"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.classifier.minor_types, vec!["feat", "story"]);
    assert_eq!(config.classifier.skip_markers, vec!["[no bump]"]);
    assert_eq!(config.publish.remote, "upstream");
    assert_eq!(config.publish.tag_prefix, "v");
    assert_eq!(config.publish.tag_suffix, "-rc");
    assert_eq!(config.publish.search, SearchMode::TopLevel);
    // Unlisted keys keep their defaults
    assert!(config.classifier.patch_types.contains(&"fix".to_string()));
}

#[test]
fn test_malformed_file_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[publish\nremote = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Cannot parse"));
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[publish]\ntag_prefix = \"release-\"\n",
    )
    .unwrap();

    let config = in_dir(dir.path(), || load_config(None)).unwrap();
    assert_eq!(config.publish.tag_prefix, "release-");
    assert_eq!(config.publish.remote, "origin");
}

#[test]
#[serial]
fn test_explicit_path_wins_over_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[publish]\nremote = \"local\"\n",
    )
    .unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "[publish]\nremote = \"explicit\"\n").unwrap();

    let config = in_dir(dir.path(), || load_config(Some(explicit.to_str().unwrap()))).unwrap();
    assert_eq!(config.publish.remote, "explicit");
}
