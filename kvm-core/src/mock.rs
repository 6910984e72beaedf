//! In-memory seams for host tests.

extern crate std;

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use core::time::Duration;
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::input::{ByteSource, InputError};
use crate::output::{HidSink, LinkState, OutputError};
use crate::report::HidReport;
use crate::status::{Indication, StatusIndicator};

/// Byte source over a fixed buffer; everything queued counts as already
/// received, so reads never wait.
#[derive(Default)]
pub struct MockSource {
    pub bytes: VecDeque<u8>,
    /// Returned (once) by the next read instead of data.
    pub fail_next: Option<InputError>,
    /// Timeout passed to every read, in call order.
    pub timeouts: Vec<Duration>,
}

impl MockSource {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl ByteSource for MockSource {
    fn read(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> impl Future<Output = Result<usize, InputError>> {
        self.timeouts.push(timeout);
        let result = match self.fail_next.take() {
            Some(err) => Err(err),
            None => {
                let n = buf.len().min(self.bytes.len());
                for (slot, byte) in buf.iter_mut().zip(self.bytes.drain(..n)) {
                    *slot = byte;
                }
                Ok(n)
            }
        };
        core::future::ready(result)
    }
}

/// Sink recording every report it accepts.
pub struct MockSink {
    pub sent: Vec<HidReport>,
    pub link: LinkState,
    pub fail_with: Option<OutputError>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            link: LinkState::READY,
            fail_with: None,
        }
    }
}

impl HidSink for MockSink {
    fn send(&mut self, report: &HidReport) -> impl Future<Output = Result<(), OutputError>> {
        let result = match self.fail_with {
            Some(err) => Err(err),
            None => {
                self.sent.push(*report);
                Ok(())
            }
        };
        core::future::ready(result)
    }

    fn link_state(&self) -> LinkState {
        self.link
    }
}

#[derive(Default)]
pub struct MockIndicator {
    pub shown: Vec<Indication>,
}

impl StatusIndicator for MockIndicator {
    fn show(&mut self, indication: Indication) {
        self.shown.push(indication);
    }
}

/// Delay that returns immediately and adds up what it was asked to wait.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// Helper to run a future to completion (simple blocking executor)
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {
                panic!("Mock future returned Pending unexpectedly");
            }
        }
    }
}
