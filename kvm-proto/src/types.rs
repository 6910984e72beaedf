//! Packet kinds and decoded packets.

use crate::parser::ParseError;

/// Largest coordinate value of the absolute pointer axes.
pub const ABS_AXIS_MAX: u16 = 0x7FFF;

/// One-byte tag that starts every frame on the serial line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PacketKind {
    AbsMove = 0,
    MouseDown = 1,
    MouseUp = 2,
    KeyDown = 3,
    KeyUp = 4,
    MouseWheel = 5,
    MouseEnter = 6,
    MouseLeave = 7,
}

impl PacketKind {
    /// Every kind, in tag order.
    pub const ALL: [PacketKind; 8] = [
        PacketKind::AbsMove,
        PacketKind::MouseDown,
        PacketKind::MouseUp,
        PacketKind::KeyDown,
        PacketKind::KeyUp,
        PacketKind::MouseWheel,
        PacketKind::MouseEnter,
        PacketKind::MouseLeave,
    ];

    /// Look up the kind for a tag byte.
    #[inline]
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::AbsMove),
            1 => Some(Self::MouseDown),
            2 => Some(Self::MouseUp),
            3 => Some(Self::KeyDown),
            4 => Some(Self::KeyUp),
            5 => Some(Self::MouseWheel),
            6 => Some(Self::MouseEnter),
            7 => Some(Self::MouseLeave),
            _ => None,
        }
    }

    /// The tag byte for this kind.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Widths in bytes of the payload fields, in wire order.
    #[must_use]
    pub const fn field_widths(self) -> &'static [usize] {
        match self {
            Self::AbsMove | Self::MouseWheel => &[2, 2],
            Self::MouseDown | Self::MouseUp => &[1],
            Self::KeyDown | Self::KeyUp => &[2, 2, 2],
            Self::MouseEnter | Self::MouseLeave => &[],
        }
    }

    /// Total payload length following the tag byte.
    #[must_use]
    pub const fn payload_len(self) -> usize {
        let widths = self.field_widths();
        let mut total = 0;
        let mut i = 0;
        while i < widths.len() {
            total += widths[i];
            i += 1;
        }
        total
    }
}

impl TryFrom<u8> for PacketKind {
    type Error = ParseError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or(ParseError::UnknownKind(tag))
    }
}

/// A decoded frame.
///
/// `button` on key events is the peer's correlation handle between a press
/// and its release; it is independent of `id`. The modifier mask is carried
/// on the wire but has no effect on the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    AbsMove { x: u16, y: u16 },
    MouseDown { button: i8 },
    MouseUp { button: i8 },
    KeyDown { id: u16, mask: u16, button: u16 },
    KeyUp { id: u16, mask: u16, button: u16 },
    MouseWheel { x_delta: i16, y_delta: i16 },
    MouseEnter,
    MouseLeave,
}

impl Packet {
    /// The kind tag this packet is framed with.
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        match self {
            Self::AbsMove { .. } => PacketKind::AbsMove,
            Self::MouseDown { .. } => PacketKind::MouseDown,
            Self::MouseUp { .. } => PacketKind::MouseUp,
            Self::KeyDown { .. } => PacketKind::KeyDown,
            Self::KeyUp { .. } => PacketKind::KeyUp,
            Self::MouseWheel { .. } => PacketKind::MouseWheel,
            Self::MouseEnter => PacketKind::MouseEnter,
            Self::MouseLeave => PacketKind::MouseLeave,
        }
    }

    /// Decode the payload of a frame whose tag has already been read.
    ///
    /// `payload` must hold at least [`PacketKind::payload_len`] bytes; extra
    /// bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Incomplete`] if the payload is too short.
    pub fn from_payload(kind: PacketKind, payload: &[u8]) -> Result<Self, ParseError> {
        if payload.len() < kind.payload_len() {
            return Err(ParseError::Incomplete(kind));
        }

        let be16 = |at: usize| u16::from_be_bytes([payload[at], payload[at + 1]]);

        Ok(match kind {
            PacketKind::AbsMove => Self::AbsMove {
                x: be16(0),
                y: be16(2),
            },
            PacketKind::MouseDown => Self::MouseDown {
                button: payload[0] as i8,
            },
            PacketKind::MouseUp => Self::MouseUp {
                button: payload[0] as i8,
            },
            PacketKind::KeyDown => Self::KeyDown {
                id: be16(0),
                mask: be16(2),
                button: be16(4),
            },
            PacketKind::KeyUp => Self::KeyUp {
                id: be16(0),
                mask: be16(2),
                button: be16(4),
            },
            PacketKind::MouseWheel => Self::MouseWheel {
                x_delta: be16(0) as i16,
                y_delta: be16(2) as i16,
            },
            PacketKind::MouseEnter => Self::MouseEnter,
            PacketKind::MouseLeave => Self::MouseLeave,
        })
    }
}

/// Scale a screen coordinate into the absolute pointer range.
///
/// `pos` is a pixel coordinate on a screen `extent` pixels wide (or high).
/// The result is rounded up and clamped to [`ABS_AXIS_MAX`]; a zero extent
/// yields 0.
///
/// ```
/// use kvm_proto::scale_to_abs;
///
/// assert_eq!(scale_to_abs(0, 2560), 0);
/// assert_eq!(scale_to_abs(1280, 2560), 16384);
/// assert_eq!(scale_to_abs(2560, 2560), 0x7FFF);
/// ```
#[must_use]
pub fn scale_to_abs(pos: u16, extent: u16) -> u16 {
    if extent == 0 {
        return 0;
    }
    let scaled = (u32::from(pos) * u32::from(ABS_AXIS_MAX)).div_ceil(u32::from(extent));
    scaled.min(u32::from(ABS_AXIS_MAX)) as u16
}
