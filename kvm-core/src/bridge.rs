//! HidBridge: the dispatch loop from serial packets to HID reports.

use core::time::Duration;

use embedded_hal_async::delay::DelayNs;
use kvm_proto::Packet;

use crate::decoder::decode_next;
use crate::input::{ByteSource, InputError};
use crate::output::{HidSink, OutputError};
use crate::session::InputSession;
use crate::status::{Indication, StatusIndicator};

/// Dispatch loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// How long to wait for a packet tag before reporting idle.
    pub kind_timeout: Duration,
    /// Back-off while the USB link is not ready.
    pub idle_delay_ms: u32,
}

impl BridgeConfig {
    pub const DEFAULT: Self = Self {
        kind_timeout: Duration::from_millis(20),
        idle_delay_ms: 50,
    };
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Outcome of one successful loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeEvent {
    /// USB link not ready; nothing was read.
    LinkDown,
    /// No packet arrived within the tag timeout.
    Idle,
    /// A packet was decoded and handled.
    Packet(Packet),
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the byte source or decoder. The packet was dropped.
    Input(InputError),
    /// Error from the HID sink. Session state was already updated.
    Output(OutputError),
}

/// Forwards packets from a byte source to a HID sink, one per iteration.
///
/// The bridge owns the [`InputSession`]; nothing else touches it.
pub struct HidBridge<I, O, D, L> {
    input: I,
    output: O,
    delay: D,
    indicator: L,
    session: InputSession,
    config: BridgeConfig,
    /// Last observed link readiness, `None` until the first check.
    link_up: Option<bool>,
}

impl<I, O, D, L> HidBridge<I, O, D, L>
where
    I: ByteSource,
    O: HidSink,
    D: DelayNs,
    L: StatusIndicator,
{
    pub fn new(input: I, output: O, delay: D, indicator: L, config: BridgeConfig) -> Self {
        Self {
            input,
            output,
            delay,
            indicator,
            session: InputSession::new(),
            config,
            link_up: None,
        }
    }

    /// Run the bridge indefinitely. Errors are logged and skipped.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// One loop iteration: check the link, then decode and handle at most
    /// one packet.
    pub async fn process_one(&mut self) -> Result<BridgeEvent, BridgeError> {
        let ready = self.output.is_ready();
        self.track_link(ready);
        if !ready {
            self.delay.delay_ms(self.config.idle_delay_ms).await;
            return Ok(BridgeEvent::LinkDown);
        }

        let packet = match decode_next(&mut self.input, self.config.kind_timeout).await {
            Ok(Some(packet)) => packet,
            Ok(None) => return Ok(BridgeEvent::Idle),
            Err(e) => {
                debug!("packet dropped: {}", e);
                return Err(BridgeError::Input(e));
            }
        };
        trace!("packet {}", packet);

        match packet {
            Packet::MouseEnter => self.indicator.show(Indication::PointerEntered),
            Packet::MouseLeave => self.indicator.show(Indication::PointerLeft),
            _ => {}
        }

        if let Some(report) = self.session.apply(&packet) {
            if let Err(e) = self.output.send(&report).await {
                error!("HID report not queued: {}", e);
                return Err(BridgeError::Output(e));
            }
        }
        Ok(BridgeEvent::Packet(packet))
    }

    fn track_link(&mut self, ready: bool) {
        if self.link_up == Some(ready) {
            return;
        }
        self.link_up = Some(ready);
        if ready {
            info!("USB link up");
            self.indicator.show(Indication::Connected);
        } else {
            info!("USB link down");
            self.indicator.show(Indication::Disconnected);
        }
    }

    pub fn session(&self) -> &InputSession {
        &self.session
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Get a reference to the byte source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the byte source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the HID sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the HID sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}
