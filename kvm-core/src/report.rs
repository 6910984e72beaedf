//! HID report layouts and the composite report descriptor.
//!
//! The device exposes one interface carrying two top-level collections,
//! told apart by the leading report ID byte.

/// Report ID of the boot-style keyboard collection.
pub const KEYBOARD_REPORT_ID: u8 = 1;
/// Report ID of the absolute mouse collection.
pub const MOUSE_REPORT_ID: u8 = 2;

/// Number of simultaneous non-modifier keys a keyboard report carries.
pub const KEY_ROLLOVER: usize = 6;

/// Keyboard input report.
///
/// Wire layout (9 bytes): report ID, modifier bits, reserved, six key codes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier bitfield. Always zero: modifiers travel in `keys`.
    pub modifier: u8,
    /// Usage codes of held keys, 0 marks an empty slot.
    pub keys: [u8; KEY_ROLLOVER],
}

impl KeyboardReport {
    /// Size of the report in bytes, including the report ID.
    pub const SIZE: usize = 3 + KEY_ROLLOVER;

    /// Report with no keys held.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            keys: [0; KEY_ROLLOVER],
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0] = KEYBOARD_REPORT_ID;
        out[1] = self.modifier;
        out[3..].copy_from_slice(&self.keys);
        out
    }
}

/// Absolute pointer input report.
///
/// Wire layout (8 bytes, little-endian axes): report ID, buttons, x, y,
/// vertical wheel, horizontal pan.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AbsMouseReport {
    pub buttons: u8,
    pub x: u16,
    pub y: u16,
    pub wheel: i8,
    pub pan: i8,
}

impl AbsMouseReport {
    /// Size of the report in bytes, including the report ID.
    pub const SIZE: usize = 8;

    /// Convert the report to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let x = self.x.to_le_bytes();
        let y = self.y.to_le_bytes();
        [
            MOUSE_REPORT_ID,
            self.buttons,
            x[0],
            x[1],
            y[0],
            y[1],
            self.wheel as u8,
            self.pan as u8,
        ]
    }
}

/// Any report the device can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Mouse(AbsMouseReport),
}

impl HidReport {
    /// Largest encoded report, in bytes.
    pub const MAX_SIZE: usize = KeyboardReport::SIZE;

    /// Encode into `buf`, returning the number of bytes used.
    ///
    /// Only the returned prefix is meaningful; the tail is left untouched.
    pub fn encode(&self, buf: &mut [u8; Self::MAX_SIZE]) -> usize {
        match self {
            Self::Keyboard(report) => {
                buf.copy_from_slice(&report.to_bytes());
                KeyboardReport::SIZE
            }
            Self::Mouse(report) => {
                buf[..AbsMouseReport::SIZE].copy_from_slice(&report.to_bytes());
                AbsMouseReport::SIZE
            }
        }
    }
}

impl From<KeyboardReport> for HidReport {
    fn from(report: KeyboardReport) -> Self {
        Self::Keyboard(report)
    }
}

impl From<AbsMouseReport> for HidReport {
    fn from(report: AbsMouseReport) -> Self {
        Self::Mouse(report)
    }
}

/// Composite HID report descriptor: keyboard (ID 1) and absolute mouse (ID 2).
///
/// The mouse axes span 0..=32767 so hosts scale them to the full desktop.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    0x85, KEYBOARD_REPORT_ID, //   Report ID (1)
    //
    // --- Modifiers (8 bits) ---
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x08, //   Report Count (8)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Reserved byte ---
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant)
    //
    // --- LED output (5 bits + 3 padding) ---
    0x05, 0x08, //   Usage Page (LEDs)
    0x19, 0x01, //   Usage Minimum (Num Lock)
    0x29, 0x05, //   Usage Maximum (Kana)
    0x95, 0x05, //   Report Count (5)
    0x75, 0x01, //   Report Size (1)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x03, //   Report Size (3)
    0x91, 0x01, //   Output (Constant)
    //
    // --- Key array (6 bytes) ---
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x00, //   Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
    //
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x85, MOUSE_REPORT_ID, //   Report ID (2)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    // --- Buttons (5 bits + 3 padding) ---
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x05, //     Usage Maximum (Button 5)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x05, //     Report Count (5)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x03, //     Report Size (3)
    0x81, 0x01, //     Input (Constant)
    //
    // --- Absolute X/Y (16 bits each) ---
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x15, 0x00, //     Logical Minimum (0)
    0x26, 0xFF, 0x7F, //     Logical Maximum (32767)
    0x95, 0x02, //     Report Count (2)
    0x75, 0x10, //     Report Size (16)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    // --- Vertical wheel ---
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x08, //     Report Size (8)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    // --- Horizontal pan ---
    0x05, 0x0C, //     Usage Page (Consumer)
    0x0A, 0x38, 0x02, //     Usage (AC Pan)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x08, //     Report Size (8)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    0xC0, //   End Collection
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_report_layout() {
        let report = KeyboardReport {
            modifier: 0,
            keys: [0x04, 0x05, 0, 0, 0, 0],
        };
        assert_eq!(report.to_bytes(), [1, 0, 0, 0x04, 0x05, 0, 0, 0, 0]);
        assert_eq!(KeyboardReport::empty().to_bytes(), [1, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_mouse_report_layout() {
        let report = AbsMouseReport {
            buttons: 0x05,
            x: 0x1234,
            y: 0x7FFF,
            wheel: -1,
            pan: 2,
        };
        assert_eq!(report.to_bytes(), [2, 0x05, 0x34, 0x12, 0xFF, 0x7F, 0xFF, 0x02]);
    }

    #[test]
    fn test_encode_lengths() {
        let mut buf = [0u8; HidReport::MAX_SIZE];

        let len = HidReport::from(KeyboardReport::empty()).encode(&mut buf);
        assert_eq!(len, 9);
        assert_eq!(buf[0], KEYBOARD_REPORT_ID);

        let len = HidReport::from(AbsMouseReport::default()).encode(&mut buf);
        assert_eq!(len, 8);
        assert_eq!(buf[0], MOUSE_REPORT_ID);
    }

    #[test]
    fn test_descriptor_collections_balance() {
        let opens = REPORT_DESCRIPTOR
            .windows(2)
            .filter(|w| w[0] == 0xA1)
            .count();
        let closes = REPORT_DESCRIPTOR.iter().filter(|&&b| b == 0xC0).count();
        assert_eq!(opens, 3);
        assert_eq!(closes, 3);
        assert_eq!(REPORT_DESCRIPTOR.len(), 147);
    }

    #[test]
    fn test_descriptor_declares_both_report_ids() {
        assert!(REPORT_DESCRIPTOR.windows(2).any(|w| w == [0x85, 1]));
        assert!(REPORT_DESCRIPTOR.windows(2).any(|w| w == [0x85, 2]));
        // 16-bit absolute axes topping out at 32767
        assert!(REPORT_DESCRIPTOR.windows(3).any(|w| w == [0x26, 0xFF, 0x7F]));
    }
}
