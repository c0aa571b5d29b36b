//! In-memory device for tests.
//!
//! Mimics the driver's attribute semantics: a fixed number of profile
//! slots, `profile_num` selects one (wrapping numbers above the slot
//! count), and `profile` reads or writes the selected slot.
//!
//! # Example
//!
//! ```rust
//! use linapse::device::mock::{MockDevice, Operation};
//! use linapse::device::AttributeStore;
//!
//! let mock = MockDevice::new(8);
//! mock.select_profile(3).unwrap();
//! assert_eq!(mock.active_profile().unwrap(), 3);
//! mock.assert_contains(&Operation::Write { name: "profile_num".to_string(), data: b"3".to_vec() });
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use super::{AttributeStore, PROFILE_ATTR, PROFILE_COUNT_ATTR, PROFILE_NUM_ATTR};
use crate::error::{LinapseError, Result};
use crate::profile::PROFILE_SIZE;

/// Recorded operation for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Read { name: String },
    Write { name: String, data: Vec<u8> },
}

#[derive(Debug)]
struct MockState {
    slots: Vec<Vec<u8>>,
    active: u8,
    overrides: HashMap<String, Vec<u8>>,
}

/// Mock device holding its profiles in memory.
pub struct MockDevice {
    state: Mutex<MockState>,
    operation_log: Mutex<Vec<Operation>>,
    error_injection: Mutex<Option<LinapseError>>,
}

impl MockDevice {
    /// A device with `slots` zeroed profiles and slot 1 active.
    ///
    /// With no slots nothing is active and `profile` reads empty.
    pub fn new(slots: u8) -> Self {
        debug!(slots, "Creating mock device");
        Self {
            state: Mutex::new(MockState {
                slots: vec![vec![0; PROFILE_SIZE]; usize::from(slots)],
                active: u8::from(slots > 0),
                overrides: HashMap::new(),
            }),
            operation_log: Mutex::new(Vec::new()),
            error_injection: Mutex::new(None),
        }
    }

    /// Replace the raw contents of a profile slot (1-based).
    pub fn with_slot(self, slot: u8, data: &[u8]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            if let Some(buf) = state.slots.get_mut(usize::from(slot).wrapping_sub(1)) {
                *buf = data.to_vec();
            }
        }
        self
    }

    /// Serve fixed contents for an attribute, bypassing the emulation.
    pub fn set_attr(&self, name: &str, data: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert(name.to_string(), data.to_vec());
    }

    /// Fail the next operation with `error`.
    pub fn inject_error(&self, error: LinapseError) {
        *self.error_injection.lock().unwrap() = Some(error);
    }

    /// Raw contents of a profile slot (1-based).
    pub fn slot(&self, slot: u8) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.slots.get(usize::from(slot).wrapping_sub(1)).cloned()
    }

    // === Assertions ===

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.operation_log.lock().unwrap().clone()
    }

    /// Get all recorded writes.
    pub fn writes(&self) -> Vec<Operation> {
        self.operations()
            .into_iter()
            .filter(|op| matches!(op, Operation::Write { .. }))
            .collect()
    }

    /// Assert a specific operation was performed at least once.
    ///
    /// # Panics
    ///
    /// Panics if the operation was not found.
    pub fn assert_contains(&self, expected: &Operation) {
        let ops = self.operations();
        assert!(
            ops.contains(expected),
            "Expected operation {expected:?} not found in: {ops:#?}",
        );
    }

    fn record(&self, op: Operation) -> Result<()> {
        self.operation_log.lock().unwrap().push(op);
        match self.error_injection.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AttributeStore for MockDevice {
    fn location(&self) -> String {
        "mock".to_string()
    }

    fn read_attr(&self, name: &str) -> Result<Vec<u8>> {
        self.record(Operation::Read {
            name: name.to_string(),
        })?;

        let state = self.state.lock().unwrap();
        if let Some(data) = state.overrides.get(name) {
            return Ok(data.clone());
        }

        match name {
            PROFILE_ATTR => Ok(state
                .slots
                .get(usize::from(state.active).wrapping_sub(1))
                .cloned()
                .unwrap_or_default()),
            PROFILE_NUM_ATTR => Ok(state.active.to_string().into_bytes()),
            PROFILE_COUNT_ATTR => Ok(state.slots.len().to_string().into_bytes()),
            _ => Err(LinapseError::AttributeMissing {
                name: name.to_string(),
            }),
        }
    }

    fn write_attr(&self, name: &str, data: &[u8]) -> Result<usize> {
        self.record(Operation::Write {
            name: name.to_string(),
            data: data.to_vec(),
        })?;

        let mut state = self.state.lock().unwrap();
        match name {
            PROFILE_ATTR => {
                let active = usize::from(state.active).wrapping_sub(1);
                if let Some(slot) = state.slots.get_mut(active) {
                    let mut buf = data[..data.len().min(PROFILE_SIZE)].to_vec();
                    buf.resize(PROFILE_SIZE, 0);
                    *slot = buf;
                }
                Ok(data.len())
            }
            PROFILE_NUM_ATTR => {
                let text = String::from_utf8_lossy(&data[..data.len().min(3)]).to_string();
                // Unparseable numbers are consumed and ignored, like the driver.
                if let Ok(slot) = text.trim().parse::<usize>() {
                    let count = state.slots.len();
                    let slot = if slot == 0 || count == 0 { 0 } else { (slot - 1) % count + 1 };
                    state.active = u8::try_from(slot).unwrap_or(0);
                }
                Ok(data.len())
            }
            _ => Err(LinapseError::PermissionDenied {
                name: name.to_string(),
            }),
        }
    }
}
