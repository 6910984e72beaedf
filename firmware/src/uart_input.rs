//! Buffered UART byte source for the packet decoder.
//!
//! Bytes arriving on UART1 RX are collected by the interrupt handler into a
//! ring buffer, so zero-timeout reads can return whatever is already there
//! without waiting on the line.

use core::task::Poll;
use core::time::Duration;

use embassy_futures::poll_once;
use embassy_rp::uart::{BufferedUartRx, Error as UartError};
use embassy_time::{with_deadline, Instant};
use embedded_io_async::Read;
use kvm_core::{ByteSource, InputError};

/// Convert UART errors to [`InputError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `UartError` and `InputError` are defined in external crates).
#[inline]
fn uart_error_to_input_error(e: UartError) -> InputError {
    match e {
        UartError::Framing => InputError::Framing,
        UartError::Overrun => InputError::BufferOverflow,
        _ => InputError::Io,
    }
}

/// UART-based byte source feeding the packet decoder.
pub struct UartByteSource {
    rx: BufferedUartRx,
}

impl UartByteSource {
    /// Create a new byte source from the given buffered UART receiver.
    #[must_use]
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }

    /// Copy out bytes already in the ring buffer without waiting.
    fn read_buffered(&mut self, buf: &mut [u8]) -> Result<usize, InputError> {
        let mut filled = 0;
        while filled < buf.len() {
            match poll_once(self.rx.read(&mut buf[filled..])) {
                Poll::Ready(Ok(0)) | Poll::Pending => break,
                Poll::Ready(Ok(n)) => filled += n,
                Poll::Ready(Err(e)) => return Err(uart_error_to_input_error(e)),
            }
        }
        Ok(filled)
    }
}

impl ByteSource for UartByteSource {
    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, InputError> {
        if timeout.is_zero() {
            return self.read_buffered(buf);
        }

        let micros = u64::try_from(timeout.as_micros()).unwrap_or(u64::MAX);
        let deadline = Instant::now()
            .checked_add(embassy_time::Duration::from_micros(micros))
            .unwrap_or(Instant::MAX);

        let mut filled = 0;
        while filled < buf.len() {
            match with_deadline(deadline, self.rx.read(&mut buf[filled..])).await {
                Ok(Ok(0)) | Err(_) => break,
                Ok(Ok(n)) => filled += n,
                Ok(Err(e)) => return Err(uart_error_to_input_error(e)),
            }
        }
        Ok(filled)
    }
}
