//! Input State Tracker: pointer position, held buttons and held keys.
//!
//! [`InputSession`] is owned by the dispatch loop and mutated by one packet
//! at a time. Each handled packet yields at most one report to emit.

use kvm_proto::keys::{KeyId, KEY_ID_LIMIT};
use kvm_proto::{Packet, ABS_AXIS_MAX};

use crate::keymap::{self, NO_KEY};
use crate::report::{AbsMouseReport, HidReport, KeyboardReport, KEY_ROLLOVER};

/// Raw wheel units per detent.
pub const WHEEL_NOTCH: i16 = 120;

/// Capacity of the [`ButtonStateTable`]; larger button ids are rejected.
pub const BUTTON_TABLE_SIZE: usize = KEY_ID_LIMIT;

/// Mouse button bitfield, HID button order.
///
/// # Example
///
/// ```
/// use kvm_core::MouseButtons;
///
/// // Peer button 2 is the middle button, HID button 3.
/// assert_eq!(MouseButtons::from_peer(2), Some(MouseButtons::MIDDLE));
/// assert_eq!(MouseButtons::from_peer(3), Some(MouseButtons::RIGHT));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const MIDDLE: Self = Self(1 << 2);
    pub const BACK: Self = Self(1 << 3);
    pub const FORWARD: Self = Self(1 << 4);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Map a peer button ordinal to its HID bit.
    ///
    /// The peer numbers middle and right the other way round; ordinals that
    /// land outside buttons 1..=5 have no bit.
    #[must_use]
    pub const fn from_peer(raw: i8) -> Option<Self> {
        let remapped = match raw {
            2 => 3,
            3 => 2,
            other => other,
        };
        if remapped >= 1 && remapped <= 5 {
            Some(Self(1 << (remapped - 1)))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, button: MouseButtons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: MouseButtons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Last emitted pointer state.
///
/// Axes hold 0 until the first move; afterwards they stay in `0..=32767`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseState {
    pub x: u16,
    pub y: u16,
    pub buttons: MouseButtons,
}

impl MouseState {
    /// Report at the current position with the given scroll deltas.
    #[must_use]
    pub const fn report(&self, wheel: i8, pan: i8) -> AbsMouseReport {
        AbsMouseReport {
            buttons: self.buttons.0,
            x: self.x,
            y: self.y,
            wheel,
            pan,
        }
    }
}

/// The six key slots of the keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardState {
    slots: [u8; KEY_ROLLOVER],
}

impl KeyboardState {
    /// Held usage codes in slot order, 0 for empty slots.
    #[must_use]
    pub const fn slots(&self) -> &[u8; KEY_ROLLOVER] {
        &self.slots
    }

    /// Whether `code` occupies a slot.
    #[must_use]
    pub fn is_held(&self, code: u8) -> bool {
        code != NO_KEY && self.slots.contains(&code)
    }

    /// Put `code` into the first empty slot.
    ///
    /// Returns `false` if every slot is taken. A code that is already held
    /// is not duplicated.
    pub fn press(&mut self, code: u8) -> bool {
        if self.is_held(code) {
            return true;
        }
        match self.slots.iter_mut().find(|slot| **slot == NO_KEY) {
            Some(slot) => {
                *slot = code;
                true
            }
            None => false,
        }
    }

    /// Clear the slot holding `code`, returning whether one was found.
    pub fn release(&mut self, code: u8) -> bool {
        if code == NO_KEY {
            return false;
        }
        match self.slots.iter_mut().find(|slot| **slot == code) {
            Some(slot) => {
                *slot = NO_KEY;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|&code| code == NO_KEY)
    }

    /// Report carrying the held keys.
    #[must_use]
    pub const fn report(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: 0,
            keys: self.slots,
        }
    }
}

/// Usage code currently held per peer button id.
///
/// Ids at or beyond [`BUTTON_TABLE_SIZE`] are never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonStateTable {
    codes: [u8; BUTTON_TABLE_SIZE],
}

impl ButtonStateTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            codes: [NO_KEY; BUTTON_TABLE_SIZE],
        }
    }

    /// Code held by `button`, [`NO_KEY`] if none or out of range.
    #[must_use]
    pub fn get(&self, button: u16) -> u8 {
        self.codes
            .get(usize::from(button))
            .copied()
            .unwrap_or(NO_KEY)
    }

    /// Record `code` for `button`, returning the previous code.
    ///
    /// Returns `None` when `button` is out of range.
    pub fn store(&mut self, button: u16, code: u8) -> Option<u8> {
        self.codes
            .get_mut(usize::from(button))
            .map(|slot| core::mem::replace(slot, code))
    }

    /// Whether any button currently holds `code`.
    #[must_use]
    pub fn holds(&self, code: u8) -> bool {
        code != NO_KEY && self.codes.contains(&code)
    }

    /// Clear `button`, returning the code it held.
    pub fn take(&mut self, button: u16) -> u8 {
        self.codes
            .get_mut(usize::from(button))
            .map_or(NO_KEY, |slot| core::mem::replace(slot, NO_KEY))
    }
}

impl Default for ButtonStateTable {
    fn default() -> Self {
        Self::new()
    }
}

/// All state touched by the packet handlers.
#[derive(Clone, Debug, Default)]
pub struct InputSession {
    mouse: MouseState,
    keyboard: KeyboardState,
    buttons: ButtonStateTable,
}

impl InputSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mouse: MouseState {
                x: 0,
                y: 0,
                buttons: MouseButtons::NONE,
            },
            keyboard: KeyboardState {
                slots: [NO_KEY; KEY_ROLLOVER],
            },
            buttons: ButtonStateTable::new(),
        }
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn button_table(&self) -> &ButtonStateTable {
        &self.buttons
    }

    /// Apply one packet and return the report it produces, if any.
    pub fn apply(&mut self, packet: &Packet) -> Option<HidReport> {
        match *packet {
            Packet::AbsMove { x, y } => Some(self.move_to(x, y)),
            Packet::MouseDown { button } => self.mouse_button(button, true),
            Packet::MouseUp { button } => self.mouse_button(button, false),
            Packet::KeyDown { id, button, .. } => self.key_down(id, button),
            Packet::KeyUp { button, .. } => Some(self.key_up(button)),
            Packet::MouseWheel { x_delta, y_delta } => Some(self.wheel(x_delta, y_delta)),
            Packet::MouseEnter => None,
            Packet::MouseLeave => Some(self.leave()),
        }
    }

    fn move_to(&mut self, x: u16, y: u16) -> HidReport {
        self.mouse.x = x.min(ABS_AXIS_MAX);
        self.mouse.y = y.min(ABS_AXIS_MAX);
        self.mouse.report(0, 0).into()
    }

    fn mouse_button(&mut self, raw: i8, pressed: bool) -> Option<HidReport> {
        let Some(bit) = MouseButtons::from_peer(raw) else {
            debug!("mouse button {=i8} has no HID bit", raw);
            return None;
        };
        self.mouse.buttons.set(bit, pressed);
        Some(self.mouse.report(0, 0).into())
    }

    fn key_down(&mut self, id: KeyId, button: u16) -> Option<HidReport> {
        let code = keymap::translate(id);
        if code == NO_KEY {
            debug!("no HID code for key {=u16:#x}", id);
            return None;
        }
        if self.buttons.get(button) == code {
            return None;
        }
        let Some(previous) = self.buttons.store(button, code) else {
            debug!("button id {=u16} out of range", button);
            return None;
        };
        // Same button, new key: the old one is no longer held by it.
        if previous != NO_KEY && !self.buttons.holds(previous) {
            self.keyboard.release(previous);
        }
        if !self.keyboard.press(code) {
            debug!("rollover, key {=u8:#x} not reported", code);
        }
        Some(self.keyboard.report().into())
    }

    fn key_up(&mut self, button: u16) -> HidReport {
        let code = self.buttons.take(button);
        // A code pressed through several buttons stays in its slot until the
        // last of them is released.
        if !self.buttons.holds(code) && !self.keyboard.release(code) {
            warn!("key up on button {=u16} without matching key down", button);
        }
        KeyboardReport::empty().into()
    }

    fn wheel(&mut self, x_delta: i16, y_delta: i16) -> HidReport {
        self.mouse.report(notches(y_delta), notches(x_delta)).into()
    }

    fn leave(&mut self) -> HidReport {
        self.mouse.x = if self.mouse.x > ABS_AXIS_MAX / 2 {
            ABS_AXIS_MAX
        } else {
            1
        };
        self.mouse.report(0, 0).into()
    }
}

/// Whole detents in `delta`, saturated to the report's -127..=127.
fn notches(delta: i16) -> i8 {
    (delta / WHEEL_NOTCH).clamp(-127, 127) as i8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::usage;

    fn key_down(id: u8, button: u16) -> Packet {
        Packet::KeyDown {
            id: u16::from(id),
            mask: 0,
            button,
        }
    }

    fn key_up(id: u8, button: u16) -> Packet {
        Packet::KeyUp {
            id: u16::from(id),
            mask: 0,
            button,
        }
    }

    fn mouse_report(report: Option<HidReport>) -> AbsMouseReport {
        match report {
            Some(HidReport::Mouse(r)) => r,
            other => panic!("expected mouse report, got {other:?}"),
        }
    }

    fn keyboard_report(report: Option<HidReport>) -> KeyboardReport {
        match report {
            Some(HidReport::Keyboard(r)) => r,
            other => panic!("expected keyboard report, got {other:?}"),
        }
    }

    #[test]
    fn test_abs_move_reports_position() {
        let mut session = InputSession::new();
        let report = mouse_report(session.apply(&Packet::AbsMove { x: 100, y: 200 }));
        assert_eq!(
            report,
            AbsMouseReport {
                buttons: 0,
                x: 100,
                y: 200,
                wheel: 0,
                pan: 0
            }
        );
        assert_eq!(session.mouse().x, 100);
        assert_eq!(session.mouse().y, 200);
    }

    #[test]
    fn test_abs_move_clamps_to_axis_max() {
        let mut session = InputSession::new();
        let report = mouse_report(session.apply(&Packet::AbsMove { x: 0xFFFF, y: 0x8000 }));
        assert_eq!(report.x, ABS_AXIS_MAX);
        assert_eq!(report.y, ABS_AXIS_MAX);
    }

    #[test]
    fn test_button_remap() {
        let mut session = InputSession::new();

        let report = mouse_report(session.apply(&Packet::MouseDown { button: 2 }));
        assert_eq!(report.buttons, 0b0000_0100);

        let report = mouse_report(session.apply(&Packet::MouseDown { button: 3 }));
        assert_eq!(report.buttons, 0b0000_0110);

        let report = mouse_report(session.apply(&Packet::MouseUp { button: 2 }));
        assert_eq!(report.buttons, 0b0000_0010);

        let report = mouse_report(session.apply(&Packet::MouseDown { button: 1 }));
        assert_eq!(report.buttons, 0b0000_0011);
    }

    #[test]
    fn test_button_keeps_position() {
        let mut session = InputSession::new();
        session.apply(&Packet::AbsMove { x: 10, y: 20 });
        let report = mouse_report(session.apply(&Packet::MouseDown { button: 1 }));
        assert_eq!((report.x, report.y), (10, 20));
        assert!(session.mouse().buttons.contains(MouseButtons::LEFT));
    }

    #[test]
    fn test_unmappable_mouse_button_ignored() {
        let mut session = InputSession::new();
        assert_eq!(session.apply(&Packet::MouseDown { button: 0 }), None);
        assert_eq!(session.apply(&Packet::MouseDown { button: 6 }), None);
        assert_eq!(session.apply(&Packet::MouseDown { button: -1 }), None);
        assert_eq!(session.mouse().buttons, MouseButtons::NONE);
    }

    #[test]
    fn test_wheel_scaling() {
        let mut session = InputSession::new();
        session.apply(&Packet::AbsMove { x: 7, y: 9 });
        let report = mouse_report(session.apply(&Packet::MouseWheel {
            x_delta: 240,
            y_delta: -120,
        }));
        assert_eq!(report.wheel, -1);
        assert_eq!(report.pan, 2);
        assert_eq!((report.x, report.y), (7, 9));
    }

    #[test]
    fn test_wheel_truncates_and_saturates() {
        let mut session = InputSession::new();
        let report = mouse_report(session.apply(&Packet::MouseWheel {
            x_delta: 119,
            y_delta: i16::MIN,
        }));
        assert_eq!(report.pan, 0);
        assert_eq!(report.wheel, -127);
    }

    #[test]
    fn test_leave_clips_to_nearer_edge() {
        let mut session = InputSession::new();
        session.apply(&Packet::AbsMove { x: 20000, y: 300 });
        let report = mouse_report(session.apply(&Packet::MouseLeave));
        assert_eq!((report.x, report.y), (ABS_AXIS_MAX, 300));

        session.apply(&Packet::AbsMove { x: 5000, y: 400 });
        let report = mouse_report(session.apply(&Packet::MouseLeave));
        assert_eq!((report.x, report.y), (1, 400));
        assert_eq!(session.mouse().x, 1);
    }

    #[test]
    fn test_enter_is_status_only() {
        let mut session = InputSession::new();
        assert_eq!(session.apply(&Packet::MouseEnter), None);
    }

    #[test]
    fn test_key_down_reports_key() {
        let mut session = InputSession::new();
        let report = keyboard_report(session.apply(&key_down(b'A', 1)));
        assert_eq!(report.keys, [usage::A, 0, 0, 0, 0, 0]);
        assert_eq!(report.modifier, 0);
        assert_eq!(session.button_table().get(1), usage::A);
    }

    #[test]
    fn test_key_down_is_idempotent() {
        let mut session = InputSession::new();
        session.apply(&key_down(b'a', 1));
        let once = *session.keyboard();
        assert_eq!(session.apply(&key_down(b'a', 1)), None);
        assert_eq!(*session.keyboard(), once);
    }

    #[test]
    fn test_key_round_trip_clears_state() {
        let mut session = InputSession::new();
        session.apply(&key_down(b'q', 7));
        let report = keyboard_report(session.apply(&key_up(b'q', 7)));
        assert_eq!(report, KeyboardReport::empty());
        assert!(session.keyboard().is_empty());
        assert_eq!(session.button_table().get(7), NO_KEY);
    }

    #[test]
    fn test_rollover_keeps_first_six() {
        let mut session = InputSession::new();
        for (button, id) in b"abcdef".iter().enumerate() {
            session.apply(&key_down(*id, button as u16));
        }
        let report = keyboard_report(session.apply(&key_down(b'g', 6)));
        let expected: [u8; 6] = core::array::from_fn(|i| usage::A + i as u8);
        assert_eq!(report.keys, expected);
        assert!(!session.keyboard().is_held(usage::A + 6));
    }

    #[test]
    fn test_key_up_forces_empty_report() {
        let mut session = InputSession::new();
        session.apply(&key_down(b'a', 1));
        session.apply(&key_down(b'b', 2));
        let report = keyboard_report(session.apply(&key_up(b'a', 1)));
        assert_eq!(report, KeyboardReport::empty());
        // 'b' is still tracked; 'c' takes the slot 'a' freed.
        assert!(session.keyboard().is_held(usage::A + 1));
        let report = keyboard_report(session.apply(&key_down(b'c', 3)));
        assert_eq!(report.keys, [usage::A + 2, usage::A + 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_key_up_without_key_down() {
        let mut session = InputSession::new();
        let report = keyboard_report(session.apply(&key_up(b'x', 42)));
        assert_eq!(report, KeyboardReport::empty());
    }

    #[test]
    fn test_unmapped_key_dropped() {
        let mut session = InputSession::new();
        assert_eq!(session.apply(&key_down(0x7F, 1)), None);
        assert_eq!(session.button_table().get(1), NO_KEY);
    }

    #[test]
    fn test_out_of_range_button_id_dropped() {
        let mut session = InputSession::new();
        assert_eq!(session.apply(&key_down(b'a', 0x200)), None);
        assert_eq!(session.apply(&key_down(b'a', 0xFFFF)), None);
        assert!(session.keyboard().is_empty());
        let report = keyboard_report(session.apply(&key_up(b'a', 0xFFFF)));
        assert_eq!(report, KeyboardReport::empty());
    }

    #[test]
    fn test_new_key_on_same_button_replaces_old() {
        let mut session = InputSession::new();
        session.apply(&key_down(b'a', 1));
        let report = keyboard_report(session.apply(&key_down(b'b', 1)));
        assert_eq!(report.keys, [usage::A + 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_shared_code_survives_one_release() {
        let mut session = InputSession::new();
        session.apply(&key_down(b'1', 10));
        session.apply(&key_down(b'1', 20));
        session.apply(&key_up(b'1', 10));

        assert_eq!(session.button_table().get(20), usage::DIGIT_1);
        assert!(session.keyboard().is_held(usage::DIGIT_1));
        let report = keyboard_report(session.apply(&key_down(b'c', 30)));
        assert_eq!(report.keys, [usage::DIGIT_1, usage::A + 2, 0, 0, 0, 0]);

        session.apply(&key_up(b'1', 20));
        assert!(!session.keyboard().is_held(usage::DIGIT_1));
        assert!(session.keyboard().is_held(usage::A + 2));
    }

    #[test]
    fn test_replaced_shared_code_stays_held() {
        let mut session = InputSession::new();
        session.apply(&key_down(b'a', 1));
        session.apply(&key_down(b'a', 2));
        let report = keyboard_report(session.apply(&key_down(b'b', 1)));
        assert_eq!(report.keys, [usage::A, usage::A + 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_shared_code_not_duplicated() {
        let mut session = InputSession::new();
        session.apply(&key_down(b'a', 1));
        let report = keyboard_report(session.apply(&key_down(b'A', 2)));
        assert_eq!(report.keys, [usage::A, 0, 0, 0, 0, 0]);
    }
}
