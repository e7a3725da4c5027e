//! Runs the `datacompat` binary against declarations in a temp directory.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const PERSON_DATA: &str = include_str!("../demos/person_data.rs");

const MIXED_DATA: &str = r#"
#[data_compat] pub struct PublicData { a: i32 }
#[data_compat] struct GoodData { a: i32 }
"#;

/// The binary, started inside `dir` so no stray `datacompat.toml` is read.
fn datacompat(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("datacompat");
    cmd.current_dir(dir.path()).env_remove("DATACOMPAT_OUTPUT_DIR").env_remove("DATACOMPAT_SUFFIX");
    cmd
}

/// A temp directory holding `files` as `(name, contents)`.
fn workspace(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, contents) in files {
        std::fs::write(temp.path().join(name), contents).unwrap();
    }
    temp
}

#[test]
fn writes_generated_files_into_out_dir() {
    let temp = workspace(&[("person_data.rs", PERSON_DATA)]);
    datacompat(&temp).args(["person_data.rs", "--out", "gen"]).assert().success();

    let written = std::fs::read_to_string(temp.path().join("gen/person.rs")).unwrap();
    assert!(written.contains("pub struct PersonBuilder"), "{written}");
}

#[test]
fn dry_run_prints_instead_of_writing() {
    let temp = workspace(&[("person_data.rs", PERSON_DATA)]);
    datacompat(&temp)
        .args(["person_data.rs", "--out", "gen", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("// ---- person.rs ----").and(predicate::str::contains("pub struct Person")));

    assert!(!temp.path().join("gen").exists());
}

#[test]
fn rejected_declaration_fails_after_writing_the_rest() {
    let temp = workspace(&[("mixed.rs", MIXED_DATA)]);
    datacompat(&temp)
        .args(["mixed.rs", "--out", "gen"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 declaration(s) rejected"));

    assert!(temp.path().join("gen/good.rs").exists());
}

#[test]
fn missing_input_does_not_stop_later_inputs() {
    let temp = workspace(&[("person_data.rs", PERSON_DATA)]);
    datacompat(&temp)
        .args(["missing.rs", "person_data.rs", "--out", "gen"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 input(s) could not be processed"));

    assert!(temp.path().join("gen/person.rs").exists());
}

#[test]
fn unparsable_input_is_reported_next_to_rejections() {
    let temp = workspace(&[("broken.rs", "struct { }"), ("mixed.rs", MIXED_DATA)]);
    datacompat(&temp)
        .args(["broken.rs", "mixed.rs", "--out", "gen"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("input(s) could not be processed"));

    assert!(temp.path().join("gen/good.rs").exists());
}

#[test]
fn inputs_are_required() {
    let temp = workspace(&[]);
    datacompat(&temp).assert().failure().stderr(predicate::str::contains("Usage"));
}
