//! Key identifiers carried in the `id` field of key packets.
//!
//! Identifiers below 0x100 are the ASCII characters themselves. Symbolic keys
//! live in 0x100..=0x1FF; most of them are the low byte of the matching
//! Synergy/Barrier key id (`0xEFxx`) with bit 8 set, which keeps the peer's
//! conversion a single mask. Media keys, which Synergy places on its `0xE0xx`
//! page, get slots the function page leaves free.

/// Key identifier as sent on the wire.
pub type KeyId = u16;

/// One past the largest valid [`KeyId`].
pub const KEY_ID_LIMIT: usize = 0x200;

pub const BACKSPACE: KeyId = 0x108;
pub const TAB: KeyId = 0x109;
pub const RETURN: KeyId = 0x10D;
pub const ESCAPE: KeyId = 0x11B;

pub const HOME: KeyId = 0x150;
pub const LEFT: KeyId = 0x151;
pub const UP: KeyId = 0x152;
pub const RIGHT: KeyId = 0x153;
pub const DOWN: KeyId = 0x154;
pub const PAGE_UP: KeyId = 0x155;
pub const PAGE_DOWN: KeyId = 0x156;
pub const END: KeyId = 0x157;
pub const INSERT: KeyId = 0x163;

pub const F1: KeyId = 0x1BE;
pub const F2: KeyId = 0x1BF;
pub const F3: KeyId = 0x1C0;
pub const F4: KeyId = 0x1C1;
pub const F5: KeyId = 0x1C2;
pub const F6: KeyId = 0x1C3;
pub const F7: KeyId = 0x1C4;
pub const F8: KeyId = 0x1C5;
pub const F9: KeyId = 0x1C6;
pub const F10: KeyId = 0x1C7;
pub const F11: KeyId = 0x1C8;
pub const F12: KeyId = 0x1C9;
pub const F13: KeyId = 0x1CA;
pub const F14: KeyId = 0x1CB;
pub const F15: KeyId = 0x1CC;
pub const F16: KeyId = 0x1CD;
pub const F17: KeyId = 0x1CE;
pub const F18: KeyId = 0x1CF;
pub const F19: KeyId = 0x1D0;
pub const F20: KeyId = 0x1D1;
pub const F21: KeyId = 0x1D2;
pub const F22: KeyId = 0x1D3;
pub const F23: KeyId = 0x1D4;
pub const F24: KeyId = 0x1D5;

pub const SHIFT_L: KeyId = 0x1E1;
pub const SHIFT_R: KeyId = 0x1E2;
pub const CONTROL_L: KeyId = 0x1E3;
pub const CONTROL_R: KeyId = 0x1E4;
pub const CAPS_LOCK: KeyId = 0x1E5;
pub const ALT_L: KeyId = 0x1E9;
pub const ALT_R: KeyId = 0x1EA;
pub const SUPER_L: KeyId = 0x1EB;
pub const SUPER_R: KeyId = 0x1EC;

pub const BRIGHTNESS_DOWN: KeyId = 0x1F0;
pub const BRIGHTNESS_UP: KeyId = 0x1F1;
pub const AUDIO_PLAY: KeyId = 0x1F2;
pub const AUDIO_NEXT: KeyId = 0x1F3;
pub const AUDIO_PREV: KeyId = 0x1F4;

pub const DELETE: KeyId = 0x1FF;

/// Function keys in order, `FUNCTION_KEYS[0]` is F1.
pub const FUNCTION_KEYS: [KeyId; 24] = [
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12, F13, F14, F15, F16, F17, F18, F19, F20,
    F21, F22, F23, F24,
];

/// Fold a Synergy/Barrier key id into the wire [`KeyId`] range.
///
/// Returns `None` for ids with no slot in the range.
///
/// ```
/// use kvm_proto::keys;
///
/// assert_eq!(keys::from_synergy(u16::from(b'q')), Some(u16::from(b'q')));
/// assert_eq!(keys::from_synergy(0xEFBE), Some(keys::F1));
/// assert_eq!(keys::from_synergy(0xE0B3), Some(keys::AUDIO_PLAY));
/// assert_eq!(keys::from_synergy(0x20AC), None);
/// ```
#[must_use]
pub const fn from_synergy(id: u16) -> Option<KeyId> {
    match id {
        0x0000..=0x00FF => Some(id),
        0xEFF0..=0xEFFE => None,
        0xEF00..=0xEFFF => Some(0x100 | (id & 0xFF)),
        0xE0B0 => Some(AUDIO_NEXT),
        0xE0B1 => Some(AUDIO_PREV),
        0xE0B3 => Some(AUDIO_PLAY),
        0xE0B8 => Some(BRIGHTNESS_DOWN),
        0xE0B9 => Some(BRIGHTNESS_UP),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbolic_keys_are_above_ascii_and_in_range() {
        let symbolic = [
            BACKSPACE, TAB, RETURN, ESCAPE, HOME, LEFT, UP, RIGHT, DOWN, PAGE_UP, PAGE_DOWN, END,
            INSERT, SHIFT_L, SHIFT_R, CONTROL_L, CONTROL_R, CAPS_LOCK, ALT_L, ALT_R, SUPER_L,
            SUPER_R, BRIGHTNESS_DOWN, BRIGHTNESS_UP, AUDIO_PLAY, AUDIO_NEXT, AUDIO_PREV, DELETE,
        ];
        for id in symbolic.iter().chain(FUNCTION_KEYS.iter()) {
            assert!(*id >= 0x100);
            assert!((*id as usize) < KEY_ID_LIMIT);
        }
    }

    #[test]
    fn test_from_synergy_function_page() {
        assert_eq!(from_synergy(0xEF08), Some(BACKSPACE));
        assert_eq!(from_synergy(0xEF0D), Some(RETURN));
        assert_eq!(from_synergy(0xEFD5), Some(F24));
        assert_eq!(from_synergy(0xEFE1), Some(SHIFT_L));
        assert_eq!(from_synergy(0xEFFF), Some(DELETE));
    }

    #[test]
    fn test_from_synergy_media_page() {
        assert_eq!(from_synergy(0xE0B0), Some(AUDIO_NEXT));
        assert_eq!(from_synergy(0xE0B1), Some(AUDIO_PREV));
        assert_eq!(from_synergy(0xE0B8), Some(BRIGHTNESS_DOWN));
        assert_eq!(from_synergy(0xE0AD), None);
    }

    #[test]
    fn test_from_synergy_reserved_slots_are_not_folded() {
        assert_eq!(from_synergy(0xEFF2), None);
    }
}
