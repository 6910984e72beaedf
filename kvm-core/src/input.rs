//! Byte source trait and input error types.

use core::future::Future;
use core::time::Duration;

use kvm_proto::PacketKind;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// UART/communication I/O error.
    Io,
    /// UART framing or parity error.
    Framing,
    /// Receive buffer overrun, bytes were lost.
    BufferOverflow,
    /// Tag byte that names no packet kind. The byte is consumed.
    UnknownKind(u8),
    /// A payload field was not fully available; the packet was abandoned.
    Truncated(PacketKind),
}

/// Async trait for the serial byte stream feeding the decoder.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes, waiting at most `timeout` for them.
    ///
    /// Returns the number of bytes read, which may be less than requested
    /// (including 0) when the timeout expires. A zero timeout returns only
    /// bytes that are already buffered.
    fn read(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> impl Future<Output = Result<usize, InputError>>;
}
