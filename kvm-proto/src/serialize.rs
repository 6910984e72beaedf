//! Frame serialization for the peer side of the serial link.
//!
//! The relay that feeds the bridge writes each input event as a tag byte
//! followed by the big-endian payload fields. [`Serialize`] produces exactly
//! the bytes [`parse_packet`](crate::parse_packet) consumes.
//!
//! # Example
//!
//! ```
//! use kvm_proto::{Packet, Serialize};
//!
//! let mut buf = [0u8; kvm_proto::MAX_PACKET_SIZE];
//! let len = Packet::AbsMove { x: 100, y: 200 }.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], &[0x00, 0x00, 0x64, 0x00, 0xC8]);
//! ```

use crate::types::Packet;

/// Largest serialized frame: KeyDown/KeyUp, tag(1) + 3 * u16(6).
pub const MAX_PACKET_SIZE: usize = 7;

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized frame.
    BufferTooSmall,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// Cursor over the output buffer.
struct FrameBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FrameBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn put_u8(&mut self, value: u8) {
        self.buf[self.pos] = value;
        self.pos += 1;
    }

    #[inline]
    fn put_u16(&mut self, value: u16) {
        self.buf[self.pos..self.pos + 2].copy_from_slice(&value.to_be_bytes());
        self.pos += 2;
    }

    #[inline]
    fn finish(self) -> usize {
        self.pos
    }
}

/// Extension trait for serializing frames.
pub trait Serialize {
    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the frame does not fit.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    #[cfg(feature = "heapless")]
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to an `embedded_io::Write` implementation, such as a UART.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_PACKET_SIZE];
        let len = self.serialize(&mut buf)?;
        writer
            .write_all(&buf[..len])
            .map_err(|_| SerializeError::WriteError)
    }
}

impl Serialize for Packet {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let kind = self.kind();
        if buf.len() < 1 + kind.payload_len() {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut fb = FrameBuf::new(buf);
        fb.put_u8(kind.tag());

        match *self {
            Packet::AbsMove { x, y } => {
                fb.put_u16(x);
                fb.put_u16(y);
            }
            Packet::MouseDown { button } | Packet::MouseUp { button } => {
                fb.put_u8(button as u8);
            }
            Packet::KeyDown { id, mask, button } | Packet::KeyUp { id, mask, button } => {
                fb.put_u16(id);
                fb.put_u16(mask);
                fb.put_u16(button);
            }
            Packet::MouseWheel { x_delta, y_delta } => {
                fb.put_u16(x_delta as u16);
                fb.put_u16(y_delta as u16);
            }
            Packet::MouseEnter | Packet::MouseLeave => {}
        }

        Ok(fb.finish())
    }
}
