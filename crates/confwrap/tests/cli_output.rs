//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::path::Path;
use std::process::{Command, Output};

fn run_confwrap(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_confwrap"))
        .args(args)
        .output()
        .expect("Failed to execute confwrap")
}

/// Run and require success, returning stdout.
fn run_ok(args: &[&str]) -> String {
    let output = run_confwrap(args);
    assert!(
        output.status.success(),
        "confwrap {:?} failed with exit code {:?}. stderr: {}",
        args,
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

const INI: &str = "\
; sample
foo=bar
goodInt=89
badVal=chicken

[Section]
list=1,2,3,,
";

#[test]
fn test_ini_keys_are_listed_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let ini = write_file(dir.path(), "app.ini", INI);

    let stdout = run_ok(&["--ini", &ini, "keys"]);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["foo", "goodInt", "badVal", "Section.list"]
    );
}

#[test]
fn test_keys_json_output_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let json = write_file(
        dir.path(),
        "app.json",
        r#"{"a": {"b": {"c": 1}, "d": [1, 2]}, "other": true}"#,
    );

    let stdout = run_ok(&["--json", &json, "keys", "--prefix", "a.", "--json"]);
    let keys: Vec<String> = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(keys, vec!["a.b.c", "a.d"]);
}

#[test]
fn test_get_typed_values() {
    let dir = tempfile::tempdir().unwrap();
    let ini = write_file(dir.path(), "app.ini", INI);

    assert_eq!(run_ok(&["--ini", &ini, "get", "foo"]).trim(), "bar");
    assert_eq!(
        run_ok(&["--ini", &ini, "get", "goodInt", "--type", "int"]).trim(),
        "89"
    );
    assert_eq!(
        run_ok(&["--ini", &ini, "get", "badVal", "--type", "int", "--default", "17"]).trim(),
        "17"
    );
    assert_eq!(
        run_ok(&["--ini", &ini, "get", "Section.list", "--type", "int", "--separators", ","]),
        "1\n2\n3\n"
    );
}

#[test]
fn test_strict_mismatch_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let ini = write_file(dir.path(), "app.ini", INI);

    let output = run_confwrap(&[
        "--ini", &ini, "get", "badVal", "--type", "float", "--default", "78", "--strict",
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Cannot cast 'chicken' to type f64."),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_missing_required_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let ini = write_file(dir.path(), "app.ini", INI);

    let output = run_confwrap(&["--ini", &ini, "get", "nosuchKey"]);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("No config value found for key 'nosuchKey'")
    );
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.ini").display().to_string();

    let output = run_confwrap(&["--ini", &absent, "keys"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: The ini store is unavailable"));
}

#[test]
fn test_latin1_ini_needs_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.ini");
    std::fs::write(&path, b"first=1\nname=Caf\xe9\nport=80\n").unwrap();
    let ini = path.display().to_string();

    let output = run_confwrap(&["--ini", &ini, "get", "port"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not valid UTF-8 text"));

    assert_eq!(
        run_ok(&["--ini", &ini, "--encoding", "latin1", "get", "name"]).trim(),
        "Caf\u{e9}"
    );
}

#[test]
fn test_json_keys_with_dotted_members_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let json = write_file(dir.path(), "app.json", r#"{"log.level": "debug"}"#);

    let stdout = run_ok(&["--json", &json, "keys"]);
    assert_eq!(stdout.trim(), "['log.level']");
    assert_eq!(run_ok(&["--json", &json, "get", "['log.level']"]).trim(), "debug");
}

#[test]
fn test_toml_document() {
    let dir = tempfile::tempdir().unwrap();
    let toml = write_file(dir.path(), "app.toml", "[server]\nport = 8080\n");

    assert_eq!(
        run_ok(&["--toml", &toml, "get", "server.port", "--type", "int"]).trim(),
        "8080"
    );
}

#[test]
fn test_hive_set_get_delete() {
    let dir = tempfile::tempdir().unwrap();
    let hive = dir.path().display().to_string();
    let key = "hkcu/Software/App/port";

    let output = run_confwrap(&["--hive", &hive, "set", key, "8080"]);
    assert!(!output.status.success(), "set without --create must fail");

    run_ok(&["--hive", &hive, "set", key, "8080", "--create"]);
    assert_eq!(run_ok(&["--hive", &hive, "get", key, "--type", "int"]).trim(), "8080");
    assert_eq!(
        run_ok(&["--hive", &hive, "keys", "--prefix", "hkcu/Software"]).trim(),
        key
    );

    run_ok(&["--hive", &hive, "delete", key]);
    assert_eq!(
        run_ok(&["--hive", &hive, "get", key, "--default", "none"]).trim(),
        "none"
    );
}

#[test]
fn test_hive_keys_without_prefix_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let hive = dir.path().display().to_string();

    let output = run_confwrap(&["--hive", &hive, "keys"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not support"));
}

#[test]
fn test_read_only_source_refuses_writes() {
    let dir = tempfile::tempdir().unwrap();
    let ini = write_file(dir.path(), "app.ini", INI);

    let output = run_confwrap(&["--ini", &ini, "set", "foo", "baz"]);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("Error: The ini store does not support writes")
    );
}

/// Verify that stdout contains only user-facing output and that stderr has no
/// INFO logs by default.
#[test]
fn test_stdout_is_clean_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let ini = write_file(dir.path(), "app.ini", INI);

    let output = run_confwrap(&["--ini", &ini, "keys"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

/// Verify that -v emits structured logs on stderr, never on stdout.
#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let ini = write_file(dir.path(), "app.ini", INI);

    let output = run_confwrap(&["-v", "--ini", &ini, "keys"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    for line in stdout.lines() {
        assert!(!line.trim_start().starts_with('{'), "JSON on stdout: {}", line);
    }
    assert!(
        stderr.contains("core.resolver.bound"),
        "verbose mode should log binding, got: {}",
        stderr
    );
}

/// Failures are logged with the library error code.
#[test]
fn test_failure_log_carries_error_code() {
    let dir = tempfile::tempdir().unwrap();
    let ini = write_file(dir.path(), "app.ini", INI);

    let output = run_confwrap(&["-v", "--ini", &ini, "get", "nosuchKey"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cli.command_failed"), "got: {}", stderr);
    assert!(
        stderr.contains(r#""error_code":"KEY_NOT_FOUND""#),
        "failure log should carry the error code, got: {}",
        stderr
    );
}
