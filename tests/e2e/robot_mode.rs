//! Robot-mode end-to-end tests.

use serde_json::json;

use crate::common::cli::CliRunner;
use crate::common::fixtures::{sample_profile, FakeDevice};
use crate::common::init_test_logging;

#[test]
fn quick_start_is_json() {
    init_test_logging();
    let result = CliRunner::new().run(&["--robot"]);
    result
        .assert_success()
        .assert_json_field("/tool", &json!("linapse"));
    assert!(result.json().get("commands").is_some());
}

#[test]
fn version_reports_package_version() {
    CliRunner::new()
        .run(&["version", "--format=json"])
        .assert_success()
        .assert_json_field("/version", &json!(env!("CARGO_PKG_VERSION")));
}

#[test]
fn show_lists_every_button() {
    let fake = FakeDevice::with_profile(&sample_profile());
    let result = CliRunner::new().with_device(fake.path()).run_robot(&["show"]);

    result
        .assert_success()
        .assert_json_field("/slot", &json!(1))
        .assert_json_field("/empty", &json!(false))
        .assert_json_array_len("/buttons", 25)
        .assert_json_field("/buttons/0/name", &json!("ESC"))
        .assert_json_field("/buttons/1/kind", &json!("MACRO"))
        .assert_json_field("/buttons/16/raw_code", &json!(0x1D))
        .assert_json_field("/buttons/24/payload", &json!(3));

    let raw = result.json()["raw"].as_str().unwrap().to_string();
    assert_eq!(hex::decode(raw).unwrap(), sample_profile());
}

#[test]
fn show_with_no_active_profile_is_empty() {
    let fake = FakeDevice::new();
    fake.write("profile_num", b"0\n");
    CliRunner::new()
        .with_device(fake.path())
        .run_robot(&["show"])
        .assert_success()
        .assert_json_field("/slot", &json!(0))
        .assert_json_field("/empty", &json!(true))
        .assert_json_array_len("/buttons", 0);
}

#[test]
fn set_key_reports_old_and_new_binds() {
    let fake = FakeDevice::with_profile(&sample_profile());
    let result = CliRunner::new()
        .with_device(fake.path())
        .run_robot(&["set-key", "17", "macro", "m3"]);

    result
        .assert_success()
        .assert_json_field("/raw_code", &json!(0x1D))
        .assert_json_field("/old/name", &json!("LCTRL"))
        .assert_json_field("/new/kind", &json!("MACRO"))
        .assert_json_field("/new/payload", &json!(3))
        .assert_json_field("/display", &json!("MACRO : 0x3"));

    let raw = fake.read("profile");
    assert_eq!((raw[0x3A], raw[0x3B]), (4, 3));
}

#[test]
fn set_key_to_the_current_bind_leaves_the_device_alone() {
    let short = sample_profile()[..0x3E].to_vec();
    let fake = FakeDevice::with_profile(&short);
    CliRunner::new()
        .with_device(fake.path())
        .run_robot(&["set-key", "1", "key", "esc"])
        .assert_success()
        .assert_json_field("/old/name", &json!("ESC"))
        .assert_json_field("/new/name", &json!("ESC"));
    // A write would have padded the attribute to a full profile.
    assert_eq!(fake.read("profile"), short);
}

#[test]
fn switch_writes_profile_number() {
    let fake = FakeDevice::new();
    CliRunner::new()
        .with_device(fake.path())
        .run_robot(&["switch", "5"])
        .assert_success()
        .assert_json_field("/requested", &json!(5))
        .assert_json_field("/active", &json!(5));
    assert_eq!(fake.read("profile_num"), b"5");
}

#[test]
fn errors_go_to_stderr_as_json() {
    let fake = FakeDevice::new();
    let result = CliRunner::new()
        .with_device(fake.path())
        .run_robot(&["set-key", "3", "key", "NOTAREALKEY"]);

    result.assert_failure().assert_exit_code(1);
    assert!(result.stdout.trim().is_empty());
    let err = result.error_json();
    assert_eq!(err["error"], json!(true));
    assert_eq!(err["recoverable"], json!(true));
    assert!(err["suggestion"].as_str().unwrap().contains("linapse keys"));
    assert_eq!(fake.read("profile"), vec![0; 512]);
}

#[test]
fn missing_device_is_a_recoverable_error() {
    let result = CliRunner::new().run_robot(&["show"]);
    result.assert_failure();
    let err = result.error_json();
    assert_eq!(err["message"], json!("No device directory configured"));
    assert_eq!(err["recoverable"], json!(true));
}

#[test]
fn keys_and_resolve() {
    let cli = CliRunner::new();
    let keys = cli.run_robot(&["keys"]);
    keys.assert_success();
    let entries = keys.json();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 126);
    assert_eq!(entries[0], json!({"code": 1, "name": "ESC"}));

    cli.run_robot(&["keys", "--macros"])
        .assert_success()
        .assert_json_array_len("", 36);

    cli.run_robot(&["resolve", "left ctrl"])
        .assert_success()
        .assert_json_field("/code", &json!(29))
        .assert_json_field("/name", &json!("LCTRL"));

    cli.run_robot(&["resolve", "--macros", "pre2"])
        .assert_success()
        .assert_json_field("/code", &json!(37));

    cli.run_robot(&["resolve", "hyperdrive"]).assert_failure();
}
