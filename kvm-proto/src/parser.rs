//! Slice parser for serial frames.
//!
//! A frame is a one-byte [`PacketKind`] tag followed by a fixed-shape payload
//! of big-endian fields. There is no length prefix, checksum or delimiter, so
//! an unknown tag consumes exactly one byte.

use crate::types::{Packet, PacketKind};

/// Error type for frame parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// No bytes to read a tag from.
    Empty,
    /// The tag byte does not name a packet kind.
    UnknownKind(u8),
    /// Fewer payload bytes than the kind requires.
    Incomplete(PacketKind),
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "no data"),
            Self::UnknownKind(tag) => write!(f, "unknown packet kind {tag:#04x}"),
            Self::Incomplete(kind) => write!(f, "incomplete {kind:?} payload"),
        }
    }
}

/// Parse one frame from the front of `bytes`.
///
/// Returns the packet and the number of bytes it occupied.
///
/// # Example
///
/// ```
/// use kvm_proto::{parse_packet, Packet};
///
/// let (packet, used) = parse_packet(&[0x00, 0x00, 0x64, 0x00, 0xC8, 0x06]).unwrap();
/// assert_eq!(packet, Packet::AbsMove { x: 100, y: 200 });
/// assert_eq!(used, 5);
/// ```
///
/// # Errors
///
/// - [`ParseError::Empty`] if `bytes` is empty
/// - [`ParseError::UnknownKind`] if the tag is not recognised; callers skip
///   one byte and continue
/// - [`ParseError::Incomplete`] if the payload is cut short
pub fn parse_packet(bytes: &[u8]) -> Result<(Packet, usize), ParseError> {
    let (&tag, payload) = bytes.split_first().ok_or(ParseError::Empty)?;
    let kind = PacketKind::try_from(tag)?;
    let packet = Packet::from_payload(kind, payload)?;
    Ok((packet, 1 + kind.payload_len()))
}
