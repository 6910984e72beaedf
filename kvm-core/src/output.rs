//! HID sink trait, link state and error types.

use core::future::Future;

use crate::report::HidReport;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Device not ready (e.g., USB not enumerated or suspended).
    NotReady,
    /// Report queue full.
    Busy,
}

/// USB connection state as seen by the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkState {
    /// Attached to a powered bus.
    pub connected: bool,
    /// Configured by the host.
    pub mounted: bool,
    /// Bus suspended by the host.
    pub suspended: bool,
}

impl LinkState {
    /// Link that is up and configured.
    pub const READY: Self = Self {
        connected: true,
        mounted: true,
        suspended: false,
    };

    /// Whether reports can be delivered.
    #[inline]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.connected && self.mounted && !self.suspended
    }
}

/// Async trait for HID report sinks.
///
/// `send` hands the report to the transport and returns without waiting for
/// the host to collect it.
pub trait HidSink {
    /// Queue a report for transmission.
    fn send(&mut self, report: &HidReport) -> impl Future<Output = Result<(), OutputError>>;

    /// Current link state, polled before every packet.
    fn link_state(&self) -> LinkState;

    /// Check if the sink is ready to accept data.
    fn is_ready(&self) -> bool {
        self.link_state().is_ready()
    }
}
