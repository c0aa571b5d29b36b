//! Single key binds: a kind byte plus a one-byte payload.
//!
//! A [`Bind`] is always stored validated. Human input (names, hex or decimal
//! strings, already-resolved numbers) only exists at the boundary, as
//! [`KindInput`] and [`PayloadInput`], and goes through [`Bind::parse`].

use std::fmt;

use tracing::trace;

use crate::error::CodecError;
use crate::keycode::{self, CODES, MACRO_CODES};

/// What a key does when pressed.
///
/// Unknown kind bytes are kept as [`BindKind::Undefined`] so they survive a
/// decode/encode cycle unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindKind {
    Disable,
    Key,
    HyperShift,
    Profile,
    Macro,
    Script,
    SwitchKey,
    Debug,
    Undefined(u8),
}

impl BindKind {
    /// The named kinds, in byte order.
    pub const NAMED: [Self; 8] = [
        Self::Disable,
        Self::Key,
        Self::HyperShift,
        Self::Profile,
        Self::Macro,
        Self::Script,
        Self::SwitchKey,
        Self::Debug,
    ];

    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Disable,
            1 => Self::Key,
            2 => Self::HyperShift,
            3 => Self::Profile,
            4 => Self::Macro,
            5 => Self::Script,
            6 => Self::SwitchKey,
            255 => Self::Debug,
            other => Self::Undefined(other),
        }
    }

    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Disable => 0,
            Self::Key => 1,
            Self::HyperShift => 2,
            Self::Profile => 3,
            Self::Macro => 4,
            Self::Script => 5,
            Self::SwitchKey => 6,
            Self::Debug => 255,
            Self::Undefined(byte) => byte,
        }
    }

    /// Upper-case label used in diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Disable => "DISABLE",
            Self::Key => "KEY",
            Self::HyperShift => "HYPERSHIFT",
            Self::Profile => "PROFILE",
            Self::Macro => "MACRO",
            Self::Script => "SCRIPT",
            Self::SwitchKey => "SWKEY",
            Self::Debug => "DEBUG",
            Self::Undefined(_) => "UNDEFINED",
        }
    }

    /// Label short enough for a grid cell.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Disable => "NONE",
            Self::HyperShift => "SHIFT",
            Self::Profile => "PROFL",
            Self::Undefined(_) => "UNDEF",
            other => other.label(),
        }
    }

    /// Look a kind up by its long or short label, ignoring case.
    pub fn from_label(text: &str) -> Option<Self> {
        let wanted = keycode::normalize(text);
        Self::NAMED
            .into_iter()
            .find(|kind| kind.label() == wanted || kind.short_label() == wanted)
    }

    /// Exclusive upper bound for a finalized payload of this kind.
    fn payload_limit(self) -> i64 {
        let len = match self {
            Self::Key => CODES.len(),
            Self::Macro => MACRO_CODES.len(),
            _ => 256,
        };
        i64::try_from(len).unwrap_or(i64::MAX)
    }
}

impl From<u8> for BindKind {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

impl From<BindKind> for u8 {
    fn from(kind: BindKind) -> Self {
        kind.as_byte()
    }
}

impl fmt::Display for BindKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind field as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindInput {
    Number(i64),
    /// Decimal or `0x`-prefixed text.
    Text(String),
}

impl KindInput {
    /// Kind typed by a user: a label such as `KEY` or `profl`, else a number.
    pub fn from_user(text: &str) -> Self {
        BindKind::from_label(text).map_or_else(|| Self::Text(text.to_string()), Self::from)
    }
}

impl From<u8> for KindInput {
    fn from(value: u8) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<i64> for KindInput {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<BindKind> for KindInput {
    fn from(kind: BindKind) -> Self {
        Self::Number(i64::from(kind.as_byte()))
    }
}

impl From<&str> for KindInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for KindInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Payload field as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadInput {
    /// A key or macro name, or an integer literal.
    Text(String),
    /// Already resolved; only range checked.
    Number(i64),
    /// Nothing entered. Resolves to payload 0.
    Absent,
}

impl From<&str> for PayloadInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PayloadInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u8> for PayloadInput {
    fn from(value: u8) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<i64> for PayloadInput {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for PayloadInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// One key's behavior: a kind byte and a payload byte.
///
/// Equality compares the two stored bytes and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bind {
    kind: u8,
    payload: u8,
}

impl Bind {
    /// A disabled key.
    pub const DISABLED: Self = Self::from_raw(0, 0);

    /// Build a bind without validation.
    ///
    /// Used by the decoder and by editors holding a not-yet-finished bind.
    pub const fn new(kind: BindKind, payload: u8) -> Self {
        Self::from_raw(kind.as_byte(), payload)
    }

    pub const fn from_raw(kind: u8, payload: u8) -> Self {
        Self { kind, payload }
    }

    pub const fn kind(self) -> BindKind {
        BindKind::from_byte(self.kind)
    }

    pub const fn kind_byte(self) -> u8 {
        self.kind
    }

    pub const fn payload(self) -> u8 {
        self.payload
    }

    /// True for a non-disabled bind whose payload was never set.
    pub const fn is_unset(self) -> bool {
        self.kind != 0 && self.payload == 0
    }

    /// Parse a bind from caller input.
    ///
    /// Text payloads for [`BindKind::Key`] go through the alias table and
    /// for [`BindKind::Macro`] through the macro names; anything left is
    /// parsed as a decimal or `0x` hex literal. A payload of 0 is only
    /// accepted for [`BindKind::Disable`].
    pub fn parse(
        kind: impl Into<KindInput>,
        payload: impl Into<PayloadInput>,
    ) -> Result<Self, CodecError> {
        let kind = parse_kind(kind.into())?;
        let payload = payload.into();
        trace!(%kind, ?payload, "Parsing bind");

        let value = match payload {
            PayloadInput::Absent => 0,
            PayloadInput::Number(value) => value,
            PayloadInput::Text(text) if text.is_empty() => 0,
            PayloadInput::Text(text) => resolve_text(kind, &text)?,
        };

        let min = i64::from(kind != BindKind::Disable);
        let limit = kind.payload_limit();
        if value < min || value >= limit {
            return Err(CodecError::OutOfRange {
                value,
                kind: kind.label(),
                min,
                limit,
            });
        }

        let payload = u8::try_from(value).map_err(|_| CodecError::OutOfRange {
            value,
            kind: kind.label(),
            min,
            limit,
        })?;
        Ok(Self::new(kind, payload))
    }

    /// Diagnostic form, e.g. `KEY : 0x1d`.
    pub fn display_string(self) -> String {
        format!("{} : {:#x}", self.kind().label(), self.payload)
    }

    /// The payload as a name where the kind has one, else as a number.
    pub fn payload_name(self) -> String {
        keycode::display_name(self.kind(), self.payload)
    }
}

impl fmt::Display for Bind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

fn parse_kind(input: KindInput) -> Result<BindKind, CodecError> {
    let value = match &input {
        KindInput::Number(value) => Some(*value),
        KindInput::Text(text) => parse_int(text),
    };

    value
        .and_then(|value| u8::try_from(value).ok())
        .map(BindKind::from_byte)
        .ok_or_else(|| CodecError::InvalidKind {
            input: match input {
                KindInput::Number(value) => value.to_string(),
                KindInput::Text(text) => text,
            },
        })
}

fn resolve_text(kind: BindKind, text: &str) -> Result<i64, CodecError> {
    let named = match kind {
        BindKind::Key => keycode::resolve_name(text),
        BindKind::Macro => keycode::resolve_macro(text),
        _ => None,
    };

    named
        .map(i64::from)
        .or_else(|| parse_int(text))
        .ok_or_else(|| CodecError::Unparseable {
            input: text.to_string(),
            kind: kind.label(),
        })
}

/// Parse an integer literal: decimal, or `0x`/`0o`/`0b` prefixed.
///
/// Decimal literals may not carry leading zeros (`"007"` is rejected, `"0"`
/// and `"00"` are zero). Literals too large for `i64` saturate, so range
/// checks still see them as out of range.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let prefix = digits.get(..2).map(str::to_ascii_lowercase);
    let radix = match prefix.as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => 10,
    };
    let body = if radix == 10 { digits } else { &digits[2..] };

    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    if radix == 10 && body.len() > 1 && body.starts_with('0') && body.chars().any(|c| c != '0') {
        return None;
    }

    // Every digit is valid here, so a failure can only be overflow.
    Some(match i64::from_str_radix(body, radix) {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}
