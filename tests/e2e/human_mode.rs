//! Human-mode end-to-end tests.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::cli::CliRunner;
use crate::common::fixtures::{sample_profile, FakeDevice};

/// `linapse` with the developer's environment scrubbed.
fn linapse() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_linapse"));
    cmd.env_remove("LINAPSE_DEVICE")
        .env_remove("LINAPSE_CONFIG")
        .env_remove("LINAPSE_FORMAT")
        .env("XDG_CONFIG_HOME", "/nonexistent/linapse-test-config")
        .env("RUST_LOG", "off")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn quick_start_without_command() {
    linapse()
        .assert()
        .success()
        .stdout(predicate::str::contains("QUICK START"))
        .stdout(predicate::str::contains("linapse set-key 17 key ctrl"));
}

#[test]
fn show_draws_the_grid() {
    let fake = FakeDevice::with_profile(&sample_profile());
    linapse()
        .arg("--device")
        .arg(fake.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 1"))
        .stdout(predicate::str::contains("┏╸01╺"))
        .stdout(predicate::str::contains("┏╸25╺"))
        .stdout(predicate::str::contains("ESC"))
        .stdout(predicate::str::contains("START"))
        .stdout(predicate::str::contains("LCTRL"))
        .stdout(predicate::str::contains("PROFILE"));
}

#[test]
fn show_reports_no_data_for_slot_zero() {
    let fake = FakeDevice::new();
    fake.write("profile_num", b"0\n");
    CliRunner::new()
        .with_device(fake.path())
        .run(&["show"])
        .assert_success()
        .assert_stdout_contains("Profile 0")
        .assert_stdout_contains("[ No data ]");
}

#[test]
fn show_can_select_a_slot_first() {
    let fake = FakeDevice::new();
    CliRunner::new()
        .with_device(fake.path())
        .run(&["show", "--profile", "4"])
        .assert_success()
        .assert_stdout_contains("Profile 4");
    assert_eq!(fake.read("profile_num"), b"4");
}

#[test]
fn set_key_accepts_aliases() {
    let fake = FakeDevice::new();
    CliRunner::new()
        .with_device(fake.path())
        .run(&["set-key", "17", "key", "ctrl"])
        .assert_success()
        .assert_stdout_contains("Button 17 set")
        .assert_stdout_contains("LCTRL");

    let raw = fake.read("profile");
    assert_eq!(raw.len(), 512);
    assert_eq!((raw[0x3A], raw[0x3B]), (0x01, 0x1D));
    assert!(raw
        .iter()
        .enumerate()
        .all(|(idx, byte)| idx == 0x3A || idx == 0x3B || *byte == 0));
}

#[test]
fn set_key_disable_needs_no_payload() {
    let fake = FakeDevice::with_profile(&sample_profile());
    CliRunner::new()
        .with_device(fake.path())
        .run(&["set-key", "1", "disable"])
        .assert_success();
    let raw = fake.read("profile");
    assert_eq!((raw[0x3C], raw[0x3D]), (0, 0));
    assert_eq!((raw[0x3E], raw[0x3F]), (4, 33));
}

#[test]
fn button_out_of_range_fails_without_touching_device() {
    let fake = FakeDevice::with_profile(&sample_profile());
    linapse()
        .env("LINAPSE_DEVICE", fake.path())
        .args(["set-key", "26", "key", "a"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[ERR]"))
        .stderr(predicate::str::contains("26"));
    assert_eq!(fake.read("profile"), sample_profile());
}

#[test]
fn missing_device_directory_is_reported() {
    CliRunner::new()
        .with_device(std::path::Path::new("/nonexistent/tartarus"))
        .run(&["show"])
        .assert_exit_code(1)
        .assert_stderr_contains("Device directory not found");
}

#[test]
fn switch_selects_the_slot() {
    let fake = FakeDevice::new();
    CliRunner::new()
        .with_device(fake.path())
        .run(&["switch", "3"])
        .assert_success()
        .assert_stdout_contains("Switched to profile 3");
    assert_eq!(fake.read("profile_num"), b"3");
}

#[test]
fn keys_lists_names() {
    linapse()
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("Key names"))
        .stdout(predicate::str::contains("LCTRL"));

    linapse()
        .args(["resolve", "ctrl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("29 (LCTRL)"));
}

#[test]
fn completions_generate_a_script() {
    linapse()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linapse"));
}
