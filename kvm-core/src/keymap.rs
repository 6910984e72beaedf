//! Key Translation Table: wire [`KeyId`]s to HID keyboard usage codes.
//!
//! The table is built at compile time and never changes. Letters map
//! case-insensitively and shifted symbols share the code of their unshifted
//! key; the peer is responsible for sending the shift key itself.

use kvm_proto::keys::{self, KeyId, KEY_ID_LIMIT};

/// Usage code meaning "no key"; also the value of an empty report slot.
pub const NO_KEY: u8 = 0;

/// USB HID usage IDs, Keyboard/Keypad page (0x07).
pub mod usage {
    pub const A: u8 = 0x04;
    pub const Z: u8 = 0x1D;
    pub const DIGIT_1: u8 = 0x1E;
    pub const DIGIT_0: u8 = 0x27;
    pub const ENTER: u8 = 0x28;
    pub const ESCAPE: u8 = 0x29;
    pub const BACKSPACE: u8 = 0x2A;
    pub const TAB: u8 = 0x2B;
    pub const SPACE: u8 = 0x2C;
    pub const MINUS: u8 = 0x2D;
    pub const EQUAL: u8 = 0x2E;
    pub const BRACKET_LEFT: u8 = 0x2F;
    pub const BRACKET_RIGHT: u8 = 0x30;
    pub const BACKSLASH: u8 = 0x31;
    pub const SEMICOLON: u8 = 0x33;
    pub const APOSTROPHE: u8 = 0x34;
    pub const GRAVE: u8 = 0x35;
    pub const COMMA: u8 = 0x36;
    pub const PERIOD: u8 = 0x37;
    pub const SLASH: u8 = 0x38;
    pub const CAPS_LOCK: u8 = 0x39;
    pub const F1: u8 = 0x3A;
    pub const F13: u8 = 0x68;
    pub const INSERT: u8 = 0x49;
    pub const HOME: u8 = 0x4A;
    pub const PAGE_UP: u8 = 0x4B;
    pub const DELETE: u8 = 0x4C;
    pub const END: u8 = 0x4D;
    pub const PAGE_DOWN: u8 = 0x4E;
    pub const ARROW_RIGHT: u8 = 0x4F;
    pub const ARROW_LEFT: u8 = 0x50;
    pub const ARROW_DOWN: u8 = 0x51;
    pub const ARROW_UP: u8 = 0x52;
    pub const CONTROL_LEFT: u8 = 0xE0;
    pub const SHIFT_LEFT: u8 = 0xE1;
    pub const ALT_LEFT: u8 = 0xE2;
    pub const GUI_LEFT: u8 = 0xE3;
    pub const CONTROL_RIGHT: u8 = 0xE4;
    pub const SHIFT_RIGHT: u8 = 0xE5;
    pub const ALT_RIGHT: u8 = 0xE6;
    pub const GUI_RIGHT: u8 = 0xE7;

    // Media keys are sent through the keyboard array with these raw codes.
    pub const BRIGHTNESS_UP: u8 = 0x6F;
    pub const BRIGHTNESS_DOWN: u8 = 0x70;
    pub const AUDIO_NEXT: u8 = 0xB5;
    pub const AUDIO_PREV: u8 = 0xB6;
    pub const AUDIO_PLAY: u8 = 0xCD;
}

/// Symbol pairs sharing one physical key: (unshifted, shifted, usage).
const PUNCTUATION: [(u8, u8, u8); 11] = [
    (b'-', b'_', usage::MINUS),
    (b'=', b'+', usage::EQUAL),
    (b'[', b'{', usage::BRACKET_LEFT),
    (b']', b'}', usage::BRACKET_RIGHT),
    (b'\\', b'|', usage::BACKSLASH),
    (b';', b':', usage::SEMICOLON),
    (b'\'', b'"', usage::APOSTROPHE),
    (b'`', b'~', usage::GRAVE),
    (b',', b'<', usage::COMMA),
    (b'.', b'>', usage::PERIOD),
    (b'/', b'?', usage::SLASH),
];

/// Shifted symbols on the digit row, `!` through `(` then `)` for 0.
const DIGIT_SYMBOLS: [u8; 10] = [b'!', b'@', b'#', b'$', b'%', b'^', b'&', b'*', b'(', b')'];

const SYMBOLIC: [(KeyId, u8); 31] = [
    (keys::BACKSPACE, usage::BACKSPACE),
    (keys::TAB, usage::TAB),
    (keys::RETURN, usage::ENTER),
    (keys::ESCAPE, usage::ESCAPE),
    (keys::DELETE, usage::DELETE),
    (keys::CAPS_LOCK, usage::CAPS_LOCK),
    (keys::SHIFT_L, usage::SHIFT_LEFT),
    (keys::SHIFT_R, usage::SHIFT_RIGHT),
    (keys::CONTROL_L, usage::CONTROL_LEFT),
    (keys::CONTROL_R, usage::CONTROL_RIGHT),
    (keys::ALT_L, usage::ALT_LEFT),
    (keys::ALT_R, usage::ALT_RIGHT),
    (keys::SUPER_L, usage::GUI_LEFT),
    (keys::SUPER_R, usage::GUI_RIGHT),
    (keys::UP, usage::ARROW_UP),
    (keys::DOWN, usage::ARROW_DOWN),
    (keys::LEFT, usage::ARROW_LEFT),
    (keys::RIGHT, usage::ARROW_RIGHT),
    (keys::HOME, usage::HOME),
    (keys::END, usage::END),
    (keys::INSERT, usage::INSERT),
    (keys::PAGE_UP, usage::PAGE_UP),
    (keys::PAGE_DOWN, usage::PAGE_DOWN),
    (keys::BRIGHTNESS_DOWN, usage::BRIGHTNESS_DOWN),
    (keys::BRIGHTNESS_UP, usage::BRIGHTNESS_UP),
    (keys::AUDIO_PLAY, usage::AUDIO_PLAY),
    (keys::AUDIO_NEXT, usage::AUDIO_NEXT),
    (keys::AUDIO_PREV, usage::AUDIO_PREV),
    (b' ' as KeyId, usage::SPACE),
    (b'\t' as KeyId, usage::TAB),
    (b'\n' as KeyId, usage::ENTER),
];

const fn build_table() -> [u8; KEY_ID_LIMIT] {
    let mut table = [NO_KEY; KEY_ID_LIMIT];

    let mut i = 0;
    while i < 26 {
        table[b'A' as usize + i] = usage::A + i as u8;
        table[b'a' as usize + i] = usage::A + i as u8;
        i += 1;
    }

    // HID orders the digit row 1..9 then 0.
    let mut i = 0;
    while i < 10 {
        let code = usage::DIGIT_1 + i as u8;
        let digit = if i == 9 { b'0' } else { b'1' + i as u8 };
        table[digit as usize] = code;
        table[DIGIT_SYMBOLS[i] as usize] = code;
        i += 1;
    }

    let mut i = 0;
    while i < PUNCTUATION.len() {
        let (plain, shifted, code) = PUNCTUATION[i];
        table[plain as usize] = code;
        table[shifted as usize] = code;
        i += 1;
    }

    let mut i = 0;
    while i < keys::FUNCTION_KEYS.len() {
        let base = if i < 12 { usage::F1 } else { usage::F13 - 12 };
        table[keys::FUNCTION_KEYS[i] as usize] = base + i as u8;
        i += 1;
    }

    let mut i = 0;
    while i < SYMBOLIC.len() {
        let (id, code) = SYMBOLIC[i];
        table[id as usize] = code;
        i += 1;
    }

    table[b'\r' as usize] = usage::ENTER;
    table
}

/// KeyId -> usage code, [`NO_KEY`] where unmapped.
pub static KEY_TABLE: [u8; KEY_ID_LIMIT] = build_table();

/// Translate a wire key identifier into a HID usage code.
///
/// Returns [`NO_KEY`] for identifiers without a mapping, including anything
/// outside the table.
#[inline]
#[must_use]
pub fn translate(id: KeyId) -> u8 {
    KEY_TABLE.get(usize::from(id)).copied().unwrap_or(NO_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_case_insensitive() {
        for (upper, lower) in (b'A'..=b'Z').zip(b'a'..=b'z') {
            let code = translate(KeyId::from(upper));
            assert_ne!(code, NO_KEY);
            assert_eq!(code, translate(KeyId::from(lower)));
        }
        assert_eq!(translate(KeyId::from(b'a')), usage::A);
        assert_eq!(translate(KeyId::from(b'Z')), usage::Z);
    }

    #[test]
    fn test_digits_and_shifted_aliases() {
        assert_eq!(translate(KeyId::from(b'1')), usage::DIGIT_1);
        assert_eq!(translate(KeyId::from(b'!')), usage::DIGIT_1);
        assert_eq!(translate(KeyId::from(b'9')), usage::DIGIT_1 + 8);
        assert_eq!(translate(KeyId::from(b'(')), usage::DIGIT_1 + 8);
        assert_eq!(translate(KeyId::from(b'0')), usage::DIGIT_0);
        assert_eq!(translate(KeyId::from(b')')), usage::DIGIT_0);
    }

    #[test]
    fn test_punctuation_pairs() {
        assert_eq!(translate(KeyId::from(b'/')), usage::SLASH);
        assert_eq!(translate(KeyId::from(b'?')), usage::SLASH);
        assert_eq!(translate(KeyId::from(b'{')), usage::BRACKET_LEFT);
        assert_eq!(translate(KeyId::from(b'|')), usage::BACKSLASH);
        assert_eq!(translate(KeyId::from(b'~')), usage::GRAVE);
        assert_eq!(translate(KeyId::from(b' ')), usage::SPACE);
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(translate(keys::F1), usage::F1);
        assert_eq!(translate(keys::F12), usage::F1 + 11);
        assert_eq!(translate(keys::F13), usage::F13);
        assert_eq!(translate(keys::F24), usage::F13 + 11);
    }

    #[test]
    fn test_modifiers_and_navigation() {
        assert_eq!(translate(keys::SHIFT_L), usage::SHIFT_LEFT);
        assert_eq!(translate(keys::SUPER_L), usage::GUI_LEFT);
        assert_eq!(translate(keys::SUPER_R), usage::GUI_RIGHT);
        assert_eq!(translate(keys::RETURN), usage::ENTER);
        assert_eq!(translate(keys::PAGE_DOWN), usage::PAGE_DOWN);
        assert_eq!(translate(keys::AUDIO_PLAY), usage::AUDIO_PLAY);
    }

    #[test]
    fn test_unmapped_identifiers() {
        assert_eq!(translate(0), NO_KEY);
        assert_eq!(translate(KeyId::from(0x7Fu8)), NO_KEY);
        assert_eq!(translate(0x1A0), NO_KEY);
        assert_eq!(translate(0x200), NO_KEY);
        assert_eq!(translate(0xFFFF), NO_KEY);
    }
}
