//! Integration tests for the devlint CLI
//!
//! A shell script stands in for eslint: it prints canned JSON results for the
//! directory it is asked to lint.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[cfg(unix)]
const CLEAN: &str = r#"[{"filePath":"__ROOT__/__DIR__/index.js","messages":[],"errorCount":0,"warningCount":0,"fixableErrorCount":0,"fixableWarningCount":0}]"#;

#[cfg(unix)]
const VIOLATION: &str = r#"[{"filePath":"__ROOT__/__DIR__/index.js","messages":[{"ruleId":"no-unused-vars","severity":2,"message":"'unused' is defined but never used.","line":3,"column":7}],"errorCount":1,"warningCount":0,"fixableErrorCount":0,"fixableWarningCount":0}]"#;

/// Package with package.json, the shared config installed, and a devlint.toml
/// pointing at a stub engine that answers with `response` for every directory.
#[cfg(unix)]
fn package(name: &str, dirs: &[&str], response: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("package.json"), format!(r#"{{"name": "{name}"}}"#)).unwrap();
    for dir in dirs {
        fs::create_dir_all(root.join(dir)).unwrap();
        fs::write(root.join(dir).join("index.js"), "const a = 1;\n").unwrap();
    }

    let config_dir = root.join("node_modules/@blockly/eslint-config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("index.js"), "module.exports = {};\n").unwrap();

    let engine = write_stub_engine(root, response);
    fs::write(
        root.join("devlint.toml"),
        format!(
            "[engine]\ncommand = \"{}\"\nresolve_plugins_relative_to = \"{}\"\n",
            engine.display(),
            root.display()
        ),
    )
    .unwrap();
    temp
}

#[cfg(unix)]
fn write_stub_engine(root: &Path, response: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let template = response.replace("__ROOT__", "$(pwd -P)").replace("__DIR__", "$dir");
    let script = format!(
        "#!/bin/sh\nfor dir in \"$@\"; do :; done\ncat <<EOF\n{template}\nEOF\n"
    );
    let path = root.join("stub-eslint");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn devlint(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("devlint").unwrap();
    cmd.arg("--root").arg(root).arg("--quiet").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("devlint")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("src and test"));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("devlint")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devlint"));
}

#[test]
fn test_missing_package_metadata_fails_before_linting() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();

    devlint(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("package.json"));
}

#[cfg(unix)]
#[test]
fn test_no_directories_prints_only_announcement() {
    let temp = package("empty-plugin", &[], CLEAN);

    devlint(temp.path())
        .assert()
        .success()
        .stdout("Running lint for empty-plugin\n");
}

#[cfg(unix)]
#[test]
fn test_both_directories_clean() {
    let temp = package("clean-plugin", &["src", "test"], CLEAN);

    devlint(temp.path())
        .assert()
        .success()
        .stdout("Running lint for clean-plugin\n\n\n");
}

#[cfg(unix)]
#[test]
fn test_only_src_present() {
    let temp = package("src-only", &["src"], VIOLATION);

    let assert = devlint(temp.path()).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("Running lint for src-only\n"));
    assert_eq!(stdout.matches("problem (").count(), 1);
    assert!(!stdout.contains("/test/"));
}

#[cfg(unix)]
#[test]
fn test_violation_is_reported_in_stylish_layout() {
    let temp = package("dirty-plugin", &["src"], VIOLATION);
    let file = temp.path().canonicalize().unwrap().join("src/index.js");

    devlint(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\n{}\n", file.display())))
        .stdout(predicate::str::contains(
            "  3:7  error  'unused' is defined but never used  no-unused-vars\n",
        ))
        .stdout(predicate::str::contains("\u{2716} 1 problem (1 error, 0 warnings)\n"));
}

#[cfg(unix)]
#[test]
fn test_verbose_summary_names_package_version() {
    let temp = package("versioned-plugin", &["src"], CLEAN);
    fs::write(
        temp.path().join("package.json"),
        r#"{"name": "versioned-plugin", "version": "2.1.0"}"#,
    )
    .unwrap();

    Command::cargo_bin("devlint")
        .unwrap()
        .arg("--root")
        .arg(temp.path())
        .arg("-v")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Running lint for versioned-plugin\n"))
        .stderr(predicate::str::contains("Package versioned-plugin@2.1.0"))
        .stderr(predicate::str::contains("Linted 1 of 2 directories"));
}

#[cfg(unix)]
#[test]
fn test_repeated_runs_are_byte_identical() {
    let temp = package("stable-plugin", &["src", "test"], VIOLATION);

    let first = devlint(temp.path()).assert().success().get_output().stdout.clone();
    let second = devlint(temp.path()).assert().success().get_output().stdout.clone();
    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn test_missing_shared_config_is_fatal() {
    let temp = package("no-config", &["src"], CLEAN);
    fs::remove_dir_all(temp.path().join("node_modules")).unwrap();

    devlint(temp.path())
        .assert()
        .failure()
        .stdout("Running lint for no-config\n")
        .stderr(predicate::str::contains("@blockly/eslint-config"));
}

#[cfg(unix)]
#[test]
fn test_engine_crash_fails_the_run() {
    let temp = package("crashing-plugin", &["src"], CLEAN);
    fs::write(
        temp.path().join("stub-eslint"),
        "#!/bin/sh\necho 'Oops! Something went wrong!' >&2\nexit 2\n",
    )
    .unwrap();

    devlint(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Something went wrong"));
}

#[cfg(unix)]
#[test]
fn test_json_formatter_from_environment() {
    let temp = package("json-plugin", &["src"], VIOLATION);

    let assert = devlint(temp.path())
        .env("DEVLINT_RUN__FORMATTER", "json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json_line = stdout.lines().nth(1).unwrap();
    let value: serde_json::Value = serde_json::from_str(json_line).unwrap();
    assert_eq!(value[0]["messages"][0]["ruleId"], "no-unused-vars");
}
