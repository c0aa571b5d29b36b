//! Save, load, decode, export and import through the binary.

use std::fs;

use serde_json::json;

use crate::common::cli::CliRunner;
use crate::common::fixtures::{sample_profile, write_file, FakeDevice};

#[test]
fn save_then_load_round_trips_raw_bytes() {
    let source = FakeDevice::with_profile(&sample_profile());
    let files = tempfile::tempdir().unwrap();
    let path = files.path().join("slot1.rz");
    let path_arg = path.display().to_string();

    CliRunner::new()
        .with_device(source.path())
        .run_robot(&["save", &path_arg])
        .assert_success()
        .assert_json_field("/path", &json!(path_arg))
        .assert_json_field("/profile/slot", &json!(1));
    assert_eq!(fs::read(&path).unwrap(), sample_profile());

    let target = FakeDevice::new();
    CliRunner::new()
        .with_device(target.path())
        .run(&["load", &path_arg])
        .assert_success()
        .assert_stdout_contains("Loaded");
    assert_eq!(target.read("profile"), sample_profile());
}

#[test]
fn load_pads_a_short_file() {
    let files = tempfile::tempdir().unwrap();
    let path = write_file(files.path(), "short.rz", &[1, 1, 4, 2]);
    let fake = FakeDevice::with_profile(&sample_profile());

    CliRunner::new()
        .with_device(fake.path())
        .run_robot(&["load", &path.display().to_string()])
        .assert_success();

    let raw = fake.read("profile");
    assert_eq!(raw.len(), 512);
    assert_eq!(&raw[..4], &[1, 1, 4, 2]);
    assert!(raw[4..].iter().all(|b| *b == 0));
}

#[test]
fn load_missing_file_fails() {
    let fake = FakeDevice::with_profile(&sample_profile());
    let result = CliRunner::new()
        .with_device(fake.path())
        .run_robot(&["load", "/nonexistent/slot.rz"]);
    result.assert_failure();
    assert_eq!(result.error_json()["recoverable"], json!(true));
    assert_eq!(fake.read("profile"), sample_profile());
}

#[test]
fn decode_needs_no_device() {
    let files = tempfile::tempdir().unwrap();
    let path = write_file(files.path(), "dump.rz", &sample_profile());

    let result = CliRunner::new().run_robot(&["decode", &path.display().to_string()]);
    result
        .assert_success()
        .assert_json_array_len("/buttons", 25)
        .assert_json_field("/buttons/1/name", &json!("START"));
    assert!(result.json().get("slot").is_none());

    CliRunner::new()
        .run(&["decode", &path.display().to_string()])
        .assert_success()
        .assert_stdout_contains("dump.rz")
        .assert_stdout_contains("START");
}

#[test]
fn export_edit_import() {
    let fake = FakeDevice::with_profile(&sample_profile());
    let files = tempfile::tempdir().unwrap();
    let path = files.path().join("layout.toml");
    let path_arg = path.display().to_string();
    let cli = CliRunner::new().with_device(fake.path());

    cli.run_robot(&["export", &path_arg])
        .assert_success()
        .assert_json_field("/buttons", &json!(25));

    let text = fs::read_to_string(&path).unwrap();
    let edited = text.replacen("payload = \"ESC\"", "payload = \"TAB\"", 1);
    assert_ne!(text, edited);
    fs::write(&path, edited).unwrap();

    cli.run_robot(&["import", &path_arg])
        .assert_success()
        .assert_json_field("/changed", &json!(1));

    let raw = fake.read("profile");
    assert_eq!((raw[0x3C], raw[0x3D]), (1, 15));
    assert_eq!((raw[0x3E], raw[0x3F]), (4, 33));

    // Re-importing the same file changes nothing.
    cli.run(&["import", &path_arg])
        .assert_success()
        .assert_stdout_contains("matches the active profile");
}

#[test]
fn import_rejects_bad_entries_atomically() {
    let fake = FakeDevice::with_profile(&sample_profile());
    let files = tempfile::tempdir().unwrap();
    let path = write_file(
        files.path(),
        "bad.toml",
        br#"
[[key]]
button = 1
kind = "KEY"
payload = "TAB"

[[key]]
button = 30
kind = "KEY"
payload = "A"
"#,
    );

    CliRunner::new()
        .with_device(fake.path())
        .run(&["import", &path.display().to_string()])
        .assert_exit_code(1)
        .assert_stderr_contains("Button 30");
    assert_eq!(fake.read("profile"), sample_profile());
}

#[test]
fn config_file_supplies_device_and_export_dir() {
    let fake = FakeDevice::with_profile(&sample_profile());
    let home = tempfile::tempdir().unwrap();
    let config = write_file(
        home.path(),
        "config.toml",
        format!(
            "device_dir = \"{}\"\nexport_dir = \"exports\"\n",
            fake.path().display()
        )
        .as_bytes(),
    );
    fs::create_dir(home.path().join("exports")).unwrap();

    CliRunner::new()
        .with_env("LINAPSE_CONFIG", &config.display().to_string())
        .run_robot(&["save", "slot.rz"])
        .assert_success();
    assert_eq!(
        fs::read(home.path().join("exports").join("slot.rz")).unwrap(),
        sample_profile()
    );
}

#[test]
fn explicit_config_must_exist() {
    let result = CliRunner::new().run_robot(&["--config", "/nonexistent/linapse.toml", "show"]);
    result.assert_failure();
    assert!(result.error_json()["message"]
        .as_str()
        .unwrap()
        .contains("Configuration file not found"));
}
