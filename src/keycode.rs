//! Key code tables and symbolic name resolution.
//!
//! Codes follow the Linux input event numbering (`KEY_ESC` = 1 through
//! `KEY_COMPOSE` = 127), which is what the driver forwards to the input
//! layer. Macro codes live in their own numbering space and are only
//! meaningful for [`BindKind::Macro`](crate::bind::BindKind::Macro) binds.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::trace;

use crate::bind::BindKind;

/// Placeholder shown for payloads without a name.
pub const UNSUPPORTED: &str = "UNSUPPORTED";

/// Canonical display names for key codes 0-127.
#[rustfmt::skip]
pub static CODES: [Option<&str>; 128] = [
    None,          Some("ESC"),   Some("1"),     Some("2"),     Some("3"),     Some("4"),     Some("5"),     Some("6"),     Some("7"),     Some("8"),        //   0 -   9
    Some("9"),     Some("0"),     Some("-"),     Some("="),     Some("BCKSP"), Some("TAB"),   Some("Q"),     Some("W"),     Some("E"),     Some("R"),        //  10 -  19
    Some("T"),     Some("Y"),     Some("U"),     Some("I"),     Some("O"),     Some("P"),     Some("["),     Some("]"),     Some("ENTER"), Some("LCTRL"),    //  20 -  29
    Some("A"),     Some("S"),     Some("D"),     Some("F"),     Some("G"),     Some("H"),     Some("J"),     Some("K"),     Some("L"),     Some(";"),        //  30 -  39
    Some("'"),     Some("~"),     Some("LSHFT"), Some("\\"),    Some("Z"),     Some("X"),     Some("C"),     Some("V"),     Some("B"),     Some("N"),        //  40 -  49
    Some("M"),     Some(","),     Some("."),     Some("/"),     Some("RSHFT"), Some("KP*"),   Some("LALT"),  Some("SPACE"), Some("CAPS"),  Some("F1"),       //  50 -  59
    Some("F2"),    Some("F3"),    Some("F4"),    Some("F5"),    Some("F6"),    Some("F7"),    Some("F8"),    Some("F9"),    Some("F10"),   Some("NUMLK"),    //  60 -  69
    Some("SCRLK"), Some("KP7"),   Some("KP8/U"), Some("KP9"),   Some("KP-"),   Some("KP4/L"), Some("KP5"),   Some("KP6/R"), Some("KP+"),   Some("KP1"),      //  70 -  79
    Some("KP2/D"), Some("KP3"),   Some("KP0"),   Some("KP."),   None,          Some("ZEN"),   Some("ANY"),   Some("F11"),   Some("F12"),   Some("RO"),       //  80 -  89
    Some("KAT"),   Some("HIR"),   Some("HEN"),   Some("KAHI"),  Some("MUHEN"), Some("JP,"),   Some("KPENT"), Some("RCTRL"), Some("KP/"),   Some("SYSRQ"),    //  90 -  99
    Some("RALT"),  Some("LF"),    Some("HOME"),  Some("UP"),    Some("PGUP"),  Some("LEFT"),  Some("RIGHT"), Some("END"),   Some("DOWN"),  Some("PGDN"),     // 100 - 109
    Some("INS"),   Some("DEL"),   Some("MACRO"), Some("MUTE"),  Some("VOLDN"), Some("VOLUP"), Some("POWER"), Some("KP="),   Some("KP+/-"), Some("PAUSE"),    // 110 - 119
    Some("SCALE"), Some("KP,"),   Some("HANGE"), Some("HANJA"), Some("YEN"),   Some("LMETA"), Some("RMETA"), Some("MENU"),                                   // 120 - 127
];

/// Display names for the device's macro buttons.
#[rustfmt::skip]
pub static MACRO_CODES: [Option<&str>; 39] = [
    None,         Some("M1"),   Some("M2"),   Some("M3"),    Some("M4"),    Some("M5"),    Some("M6"),   Some("M7"),   Some("M8"),   Some("M9"),
    Some("M10"),  Some("M11"),  Some("M12"),  Some("M13"),   Some("M14"),   Some("M15"),   Some("M16"),  Some("M17"),  Some("M18"),  Some("M19"),
    Some("M20"),  Some("M21"),  Some("M22"),  Some("M23"),   Some("M24"),   Some("M25"),   Some("M26"),  Some("M27"),  Some("M28"),  Some("M29"),
    Some("M30"),  None,         None,         Some("START"), Some("STOP"),  Some("CYCLE"), Some("PRE1"), Some("PRE2"), Some("PRE3"),
];

/// Extra spellings accepted for key codes, on top of the canonical names.
///
/// Entries are stored already normalized (see [`normalize`]).
#[rustfmt::skip]
const EXTRA_ALIASES: &[(&str, u8)] = &[
    // Linux KEY_* names
    ("ESCAPE", 1), ("MINUS", 12), ("EQUAL", 13), ("BACKSPACE", 14), ("LEFTBRACE", 26),
    ("RIGHTBRACE", 27), ("LEFTCTRL", 29), ("SEMICOLON", 39), ("APOSTROPHE", 40),
    ("GRAVE", 41), ("LEFTSHIFT", 42), ("BACKSLASH", 43), ("COMMA", 51), ("DOT", 52),
    ("SLASH", 53), ("RIGHTSHIFT", 54), ("KPASTERISK", 55), ("LEFTALT", 56),
    ("CAPSLOCK", 58), ("NUMLOCK", 69), ("SCROLLLOCK", 70), ("KP8", 72), ("KPMINUS", 74),
    ("KP4", 75), ("KP6", 77), ("KPPLUS", 78), ("KP2", 80), ("KPDOT", 83),
    ("ZENKAKUHANKAKU", 85), ("102ND", 86), ("KATAKANA", 90), ("HIRAGANA", 91),
    ("HENKAN", 92), ("KATAKANAHIRAGANA", 93), ("MUHENKAN", 94), ("KPJPCOMMA", 95),
    ("KPENTER", 96), ("RIGHTCTRL", 97), ("KPSLASH", 98), ("RIGHTALT", 100),
    ("LINEFEED", 101), ("PAGEUP", 104), ("PAGEDOWN", 109), ("INSERT", 110),
    ("DELETE", 111), ("VOLUMEDOWN", 114), ("VOLUMEUP", 115), ("KPEQUAL", 117),
    ("KPPLUSMINUS", 118), ("KPCOMMA", 121), ("HANGEUL", 122), ("LEFTMETA", 125),
    ("RIGHTMETA", 126), ("COMPOSE", 127),

    // Modifiers
    ("CTRL", 29), ("CONTROL", 29), ("LCONTROL", 29), ("LCTL", 29), ("RCONTROL", 97),
    ("RCTL", 97), ("SHIFT", 42), ("LSHIFT", 42), ("RSHIFT", 54), ("ALT", 56),
    ("ALTGR", 100), ("META", 125), ("SUPER", 125), ("LSUPER", 125),
    ("WIN", 125), ("LWIN", 125), ("GUI", 125), ("LGUI", 125), ("CMD", 125),
    ("RSUPER", 126), ("RWIN", 126), ("RGUI", 126),

    // Editing and navigation
    ("BKSP", 14), ("BS", 14), ("RETURN", 28), ("ENT", 28), ("SPC", 57),
    ("SPACEBAR", 57), ("CAPSLK", 58), ("PRIOR", 104), ("PGDOWN", 109), ("NEXT", 109),
    ("PRINTSCREEN", 99), ("PRTSC", 99), ("PRINT", 99), ("PRTSCR", 99),
    ("SCROLL", 70), ("SCRLOCK", 70), ("BREAK", 119),
    ("APPS", 127), ("APPLICATION", 127), ("CONTEXT", 127),

    // Arrows
    ("ARROWUP", 103), ("UPARROW", 103), ("ARROWDOWN", 108), ("DOWNARROW", 108),
    ("ARROWLEFT", 105), ("LEFTARROW", 105), ("ARROWRIGHT", 106), ("RIGHTARROW", 106),

    // Symbols: shifted digits map onto their key
    ("!", 2), ("@", 3), ("#", 4), ("$", 5), ("%", 6), ("^", 7), ("&", 8), ("*", 9),
    ("(", 10), (")", 11), ("_", 12), ("DASH", 12), ("HYPHEN", 12), ("+", 13),
    ("PLUS", 13), ("EQUALS", 13), ("{", 26), ("LBRACKET", 26), ("LEFTBRACKET", 26),
    ("}", 27), ("RBRACKET", 27), ("RIGHTBRACKET", 27), (":", 39), ("COLON", 39),
    ("\"", 40), ("QUOTE", 40), ("`", 41), ("BACKTICK", 41), ("TILDE", 41), ("|", 43),
    ("PIPE", 43), ("<", 51), (">", 52), ("PERIOD", 52), ("?", 53), ("QUESTION", 53),

    // Keypad
    ("KPMULTIPLY", 55), ("KPSTAR", 55), ("KPUP", 72), ("KPSUBTRACT", 74), ("KPLEFT", 75),
    ("KPRIGHT", 77), ("KPADD", 78), ("KPDOWN", 80), ("KPDECIMAL", 83), ("KPPERIOD", 83),
    ("KPDEL", 83), ("KPRETURN", 96), ("KPDIVIDE", 98),

    // Locale-specific
    ("ZENKAKU", 85), ("HANKAKU", 85), ("ISO", 86), ("NONUSBACKSLASH", 86),
    ("KANA", 93), ("HANGUL", 122),
    ("JPCOMMA", 95),

    // Media
    ("VOLDOWN", 114), ("VOLMINUS", 114), ("VOLPLUS", 115),
];

/// Lookup from normalized spelling to key code.
static ALIASES: LazyLock<HashMap<String, u8>> = LazyLock::new(|| {
    let mut map: HashMap<String, u8> = EXTRA_ALIASES
        .iter()
        .map(|&(name, code)| (name.to_string(), code))
        .collect();

    // Canonical names always win over an extra spelling.
    for (code, name) in CODES.iter().enumerate() {
        if let Some(name) = name {
            #[allow(clippy::cast_possible_truncation)] // CODES has 128 entries
            map.insert(normalize(name), code as u8);
        }
    }
    map
});

/// Uppercase `text` and drop every whitespace character.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Canonical name of a key code, if it has one.
pub fn code_name(code: u8) -> Option<&'static str> {
    CODES.get(usize::from(code)).copied().flatten()
}

/// Canonical name of a macro code, if it has one.
pub fn macro_name(code: u8) -> Option<&'static str> {
    MACRO_CODES.get(usize::from(code)).copied().flatten()
}

/// Resolve a human-typed key name to its code.
///
/// Absence is a normal outcome; callers fall back to numeric parsing.
pub fn resolve_name(text: &str) -> Option<u8> {
    let key = normalize(text);
    let code = ALIASES.get(&key).copied();
    trace!(input = text, normalized = %key, ?code, "Resolving key name");
    code
}

/// Resolve a macro button name by exact match against [`MACRO_CODES`].
pub fn resolve_macro(text: &str) -> Option<u8> {
    let key = normalize(text);
    MACRO_CODES
        .iter()
        .position(|name| name.is_some_and(|name| name == key))
        .and_then(|idx| u8::try_from(idx).ok())
}

/// Human-readable form of a payload for the given bind kind.
///
/// Key and macro payloads resolve through their tables; other kinds show
/// the bare decimal number, and disabled binds show nothing.
pub fn display_name(kind: BindKind, payload: u8) -> String {
    match kind {
        BindKind::Disable => String::new(),
        BindKind::Key => code_name(payload).unwrap_or(UNSUPPORTED).to_string(),
        BindKind::Macro => macro_name(payload).unwrap_or(UNSUPPORTED).to_string(),
        _ => payload.to_string(),
    }
}

/// Every spelling the resolver accepts, with the code it maps to.
///
/// Sorted by code, then by spelling.
pub fn aliases() -> Vec<(&'static str, u8)> {
    let mut all: Vec<(&'static str, u8)> = CODES
        .iter()
        .enumerate()
        .filter_map(|(code, name)| Some((name.as_ref().copied()?, u8::try_from(code).ok()?)))
        .chain(EXTRA_ALIASES.iter().copied())
        .collect();
    all.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    all
}
