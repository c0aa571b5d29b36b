//! Profile operations against the mock device and attribute directories.

use std::fs;

use linapse::bind::{Bind, BindKind};
use linapse::device::mock::{MockDevice, Operation};
use linapse::device::{self, AttributeStore, SysfsDevice, PROFILE_ATTR, PROFILE_NUM_ATTR};
use linapse::error::LinapseError;
use linapse::profile::{Profile, PROFILE_SIZE};

use crate::common::fixtures::{sample_profile, write_file, FakeDevice};
use crate::common::init_test_logging;

// ============================================================================
// Mock device
// ============================================================================

#[test]
fn slots_keep_separate_profiles() {
    init_test_logging();
    let mock = MockDevice::new(8);

    mock.select_profile(1).unwrap();
    mock.modify_key(0x1E, Bind::new(BindKind::Key, 1)).unwrap();
    mock.select_profile(2).unwrap();
    mock.modify_key(0x1E, Bind::new(BindKind::Macro, 5)).unwrap();

    mock.select_profile(1).unwrap();
    assert_eq!(mock.read_profile().unwrap().get(0x1E), Some(Bind::new(BindKind::Key, 1)));
    mock.select_profile(2).unwrap();
    assert_eq!(mock.read_profile().unwrap().get(0x1E), Some(Bind::new(BindKind::Macro, 5)));
}

#[test]
fn selecting_past_the_slot_count_wraps() {
    init_test_logging();
    let mock = MockDevice::new(8);
    mock.select_profile(9).unwrap();
    assert_eq!(mock.active_profile().unwrap(), 1);
    mock.select_profile(16).unwrap();
    assert_eq!(mock.active_profile().unwrap(), 8);
}

#[test]
fn modify_key_reads_then_writes_full_profile() {
    let mock = MockDevice::new(8).with_slot(1, &sample_profile());
    let old = mock.modify_key(0x20, Bind::new(BindKind::Key, 30)).unwrap();
    assert_eq!(old, Bind::DISABLED);

    let ops = mock.operations();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0], Operation::Read { name: PROFILE_ATTR.to_string() });
    match ops.last() {
        Some(Operation::Write { name, data }) => {
            assert_eq!(name, PROFILE_ATTR);
            assert_eq!(data.len(), PROFILE_SIZE);
        }
        other => panic!("expected a profile write, got {other:?}"),
    }

    let updated = mock.read_profile().unwrap();
    assert_eq!(updated.get(0x1D), Some(Bind::new(BindKind::Key, 0x1D)));
    assert_eq!(updated.get(0x20), Some(Bind::new(BindKind::Key, 30)));
}

#[test]
fn empty_profile_attribute_reads_as_disabled_keys() {
    let mock = MockDevice::new(8);
    mock.set_attr(PROFILE_ATTR, &[]);
    let profile = mock.read_profile().unwrap();
    assert_eq!(profile, Profile::filled());
    assert!(mock.writes().is_empty());
}

#[test]
fn device_failure_surfaces_as_error() {
    let mock = MockDevice::new(8);
    mock.inject_error(LinapseError::PermissionDenied {
        name: PROFILE_ATTR.to_string(),
    });
    let err = mock.modify_key(0x1E, Bind::DISABLED).unwrap_err();
    assert!(matches!(err, LinapseError::PermissionDenied { .. }));
    assert!(mock.writes().is_empty());
}

#[test]
fn save_and_load_move_raw_bytes() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slot1.rz");

    let source = MockDevice::new(8).with_slot(1, &sample_profile());
    source.save_profile(&path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), sample_profile());

    let target = MockDevice::new(8);
    target.select_profile(4).unwrap();
    let loaded = target.load_profile(&path).unwrap();
    assert_eq!(loaded, Profile::decode(&sample_profile()));
    assert_eq!(target.slot(4).unwrap(), sample_profile());
    assert_eq!(target.slot(1).unwrap(), vec![0; PROFILE_SIZE]);
}

#[test]
fn load_pads_short_files_and_truncates_long_ones() {
    let dir = tempfile::tempdir().unwrap();
    let short = write_file(dir.path(), "short.rz", &[1, 2, 3]);
    let mut long_bytes = sample_profile();
    long_bytes.extend_from_slice(&[0xFF; 64]);
    let long = write_file(dir.path(), "long.rz", &long_bytes);

    let mock = MockDevice::new(2);
    mock.load_profile(&short).unwrap();
    let slot = mock.slot(1).unwrap();
    assert_eq!(slot.len(), PROFILE_SIZE);
    assert_eq!(&slot[..4], &[1, 2, 3, 0]);

    mock.load_profile(&long).unwrap();
    assert_eq!(mock.slot(1).unwrap(), sample_profile());
}

#[test]
fn load_missing_file_is_reported() {
    let mock = MockDevice::new(2);
    let err = mock
        .load_profile(std::path::Path::new("/nonexistent/slot.rz"))
        .unwrap_err();
    assert!(matches!(err, LinapseError::FileNotFound { .. }));
    assert!(mock.writes().is_empty());
}

// ============================================================================
// Attribute directory
// ============================================================================

#[test]
fn directory_device_reads_profile_and_numbers() {
    let fake = FakeDevice::with_profile(&sample_profile());
    let dev = SysfsDevice::open(fake.path()).unwrap();

    assert_eq!(dev.active_profile().unwrap(), 1);
    assert_eq!(dev.profile_count().unwrap(), 8);
    let profile = dev.read_profile().unwrap();
    assert_eq!(profile.button(25), Ok(Bind::new(BindKind::Profile, 3)));
}

#[test]
fn directory_device_writes_through() {
    let fake = FakeDevice::new();
    let dev = device::open_boxed(fake.path()).unwrap();

    dev.select_profile(3).unwrap();
    assert_eq!(fake.read(PROFILE_NUM_ATTR), b"3");

    dev.modify_key(0x1D, Bind::parse(1u8, "ctrl").unwrap()).unwrap();
    let raw = fake.read(PROFILE_ATTR);
    assert_eq!(raw.len(), PROFILE_SIZE);
    assert_eq!((raw[0x3A], raw[0x3B]), (1, 0x1D));
}

#[test]
fn directory_device_pads_short_profile_file() {
    let fake = FakeDevice::with_profile(&[1, 1]);
    let dev = SysfsDevice::open(fake.path()).unwrap();
    let profile = dev.read_profile().unwrap();
    assert_eq!(profile.get(0), Some(Bind::new(BindKind::Key, 1)));
    assert_eq!(profile.get(1), Some(Bind::DISABLED));
}

#[test]
fn missing_profile_count_is_tolerated_when_switching() {
    let fake = FakeDevice::new();
    fs::remove_file(fake.attr_path("profile_count")).unwrap();
    let dev = SysfsDevice::open(fake.path()).unwrap();
    dev.select_profile(2).unwrap();
    assert_eq!(fake.read(PROFILE_NUM_ATTR), b"2");
}

#[test]
fn garbage_profile_number_is_an_attribute_error() {
    let fake = FakeDevice::new();
    fake.write(PROFILE_NUM_ATTR, b"two\n");
    let dev = SysfsDevice::open(fake.path()).unwrap();
    assert!(matches!(
        dev.active_profile(),
        Err(LinapseError::AttributeInvalid { .. })
    ));
}
