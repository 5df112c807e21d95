//! Integration tests for the confighandler CLI.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Fresh per-test folder under the system temp dir.
fn temp_folder(tag: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("confighandler-it-{}-{}", tag, std::process::id()));
    fs::remove_dir_all(&dir).ok();
    dir
}

/// Run confighandler against `folder` and return (stdout, stderr, exit_code).
fn run(folder: &PathBuf, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_confighandler"))
        .arg("--folder")
        .arg(folder)
        .arg("--name")
        .arg("cfg")
        .args(args)
        .env("CONFIGHANDLER_TEST_VAR", "from-env")
        .output()
        .expect("Failed to run confighandler");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_first_run_creates_default_file() {
    let folder = temp_folder("create").join("app");

    let (stdout, _stderr, exit_code) = run(&folder, &["path"]);

    assert_eq!(exit_code, 0);
    let path = folder.join("cfg.ini");
    assert_eq!(stdout.trim(), path.display().to_string());
    assert_eq!(
        fs::read_to_string(&path).expect("config file should exist"),
        "[DEFAULT]\nOPTION = \n"
    );

    fs::remove_dir_all(folder.parent().unwrap()).ok();
}

#[test]
fn test_get_default_option_is_empty() {
    let folder = temp_folder("default-option");

    let (stdout, _stderr, exit_code) = run(&folder, &["get", "DEFAULT", "OPTION"]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "\n");

    fs::remove_dir_all(&folder).ok();
}

#[test]
fn test_missing_option_exits_with_status_1() {
    let folder = temp_folder("exit");

    let (stdout, stderr, exit_code) = run(&folder, &["get", "DEFAULT", "MISSING"]);

    assert_eq!(exit_code, 1, "Missing key should terminate the process");
    assert!(stdout.is_empty(), "Nothing should be printed: {}", stdout);
    assert!(
        stderr.contains("Error: No option 'missing' in section: 'DEFAULT'"),
        "Diagnostic should name the option: {}",
        stderr
    );

    fs::remove_dir_all(&folder).ok();
}

#[test]
fn test_missing_section_exits_with_status_1() {
    let folder = temp_folder("exit-section");

    let (_stdout, stderr, exit_code) = run(&folder, &["getdict", "server", "peers"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("No section: 'server'"), "{}", stderr);

    fs::remove_dir_all(&folder).ok();
}

#[test]
fn test_missing_option_with_no_exit_prints_empty() {
    let folder = temp_folder("no-exit");

    let (stdout, stderr, exit_code) = run(&folder, &["get", "DEFAULT", "MISSING", "--no-exit"]);

    assert_eq!(exit_code, 0, "--no-exit should not terminate");
    assert_eq!(stdout, "\n");
    assert!(stderr.contains("Error:"), "Diagnostic still printed: {}", stderr);

    fs::remove_dir_all(&folder).ok();
}

#[test]
fn test_existing_file_values_and_interpolation() {
    let folder = temp_folder("values");
    fs::create_dir_all(&folder).unwrap();
    fs::write(
        folder.join("cfg.ini"),
        "[DEFAULT]\nOPTION = user\nbase = %(confighandler_test_var)s\n\n[app]\nhosts = a, b,c\nurl = %(base)s/x\n",
    )
    .unwrap();

    let (stdout, _stderr, exit_code) = run(&folder, &["getdict", "app", "hosts", "--json"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), r#"["a","b","c"]"#);

    let (stdout, _stderr, exit_code) = run(&folder, &["get", "app", "url"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), "from-env/x");

    let (stdout, _stderr, _) = run(&folder, &["get", "app", "url", "--raw"]);
    assert_eq!(stdout.trim(), "%(base)s/x");

    // DEFAULT.OPTION was cleared on load, everything else kept
    let content = fs::read_to_string(folder.join("cfg.ini")).unwrap();
    assert!(content.starts_with("[DEFAULT]\nOPTION = \nbase = "));
    assert!(content.contains("[app]\nhosts = a, b,c\n"));

    fs::remove_dir_all(&folder).ok();
}

#[test]
fn test_sections_and_dump() {
    let folder = temp_folder("dump");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("cfg.ini"), "[zeta]\nk = 1\n\n[alpha]\nk = 2\n").unwrap();

    let (stdout, _stderr, exit_code) = run(&folder, &["sections"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "alpha\nzeta\n");

    let (stdout, _stderr, exit_code) = run(&folder, &["dump"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("\"alpha\""));
    assert!(stdout.contains("\"k\": \"2\""));
    assert!(
        !stdout.contains("confighandler_test_var"),
        "Environment must not leak into dump"
    );

    fs::remove_dir_all(&folder).ok();
}

#[test]
fn test_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_confighandler"))
        .arg("--help")
        .output()
        .expect("Failed to run help command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Help should succeed");
    assert!(stdout.contains("confighandler"));
    assert!(stdout.contains("get"), "Help should mention get command");
    assert!(stdout.contains("getdict"), "Help should mention getdict command");
}

#[test]
fn test_version_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_confighandler"))
        .arg("--version")
        .output()
        .expect("Failed to run version command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Version should succeed");
    assert!(stdout.contains("confighandler"));
}
