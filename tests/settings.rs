use std::path::PathBuf;

use datacompat::error::DataCompatError;
use datacompat::settings::Settings;
use serial_test::serial;
use tempfile::TempDir;

/// Writes `content` as a settings file inside a fresh temp directory.
fn settings_file(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("datacompat.toml");
    std::fs::write(&path, content).expect("write settings");
    (temp, path)
}

#[test]
#[serial]
fn explicit_file_overrides_defaults() {
    let (_temp, path) =
        settings_file("output_dir = \"out/gen\"\nsuffix = \"Spec\"\ninitializer = false\nderives = [\"Eq\", \"Hash\"]\n");
    let settings = Settings::load(Some(&path)).expect("settings load");
    assert_eq!(settings.output_dir, PathBuf::from("out/gen"));
    assert_eq!(settings.suffix, "Spec");
    assert!(!settings.initializer);
    assert!(settings.display, "unset keys keep their default");
    assert_eq!(settings.derives, vec!["Eq".to_string(), "Hash".to_string()]);
}

#[test]
#[serial]
fn environment_overrides_the_file() {
    let (_temp, path) = settings_file("suffix = \"Data\"\ndisplay = true\n");
    temp_env::with_vars(
        [
            ("DATACOMPAT_DERIVES", Some("Eq,Hash")),
            ("DATACOMPAT_SUFFIX", Some("Spec")),
            ("DATACOMPAT_DISPLAY", Some("false")),
        ],
        || {
            let settings = Settings::load(Some(&path)).expect("settings load");
            assert_eq!(settings.derives, vec!["Eq".to_string(), "Hash".to_string()]);
            assert_eq!(settings.suffix, "Spec");
            assert!(!settings.display, "booleans are parsed from the environment");
            assert!(settings.initializer);
        },
    );
}

#[test]
#[serial]
fn missing_explicit_file_is_a_config_error() {
    let err = Settings::load(Some(std::path::Path::new("no/such/datacompat.toml"))).expect_err("should fail");
    assert!(matches!(err, DataCompatError::Config(_)));
}

#[test]
fn defaults_match_the_documented_values() {
    let settings = Settings::default();
    assert_eq!(settings.output_dir, PathBuf::from("generated"));
    assert_eq!(settings.suffix, "Data");
    assert!(settings.initializer && settings.display);
    assert!(settings.derives.is_empty());
}
