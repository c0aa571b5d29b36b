//! Physical button layout of the keypad.
//!
//! The 25 buttons are numbered 1..=25 in reading order, five per row. Each
//! one reports a raw key code, and that code is the index of its bind in a
//! [`Profile`](crate::profile::Profile).

use crate::error::CodecError;

/// Number of physical buttons.
pub const BUTTON_COUNT: usize = 25;

/// Buttons per grid row.
pub const ROW_LEN: usize = 5;

/// Raw key code for each button, button 1 first.
#[rustfmt::skip]
pub const PHYSICAL_KEYS: [u8; BUTTON_COUNT] = [
    0x1E, 0x1F, 0x20, 0x21, 0x22,
    0x2B, 0x14, 0x1A, 0x08, 0x15,
    0x39, 0x04, 0x16, 0x07, 0x09,
    0x42, 0x1D, 0x1B, 0x06, 0x2C,
    0x44, 0x50, 0x52, 0x4F, 0x51,
];

/// Raw key code for a 1-based button number.
pub fn raw_code(button: usize) -> Result<u8, CodecError> {
    button
        .checked_sub(1)
        .and_then(|idx| PHYSICAL_KEYS.get(idx))
        .copied()
        .ok_or(CodecError::IndexFault {
            index: button,
            min: 1,
            max: BUTTON_COUNT,
        })
}

/// Button number for a raw key code, if a button reports it.
pub fn button_of(raw: u8) -> Option<usize> {
    PHYSICAL_KEYS.iter().position(|&code| code == raw).map(|idx| idx + 1)
}

/// Button numbers and raw codes, one slice per grid row.
pub fn rows() -> impl Iterator<Item = impl Iterator<Item = (usize, u8)>> {
    (0..BUTTON_COUNT / ROW_LEN).map(|row| {
        let start = row * ROW_LEN;
        (start..start + ROW_LEN).map(|idx| (idx + 1, PHYSICAL_KEYS[idx]))
    })
}
