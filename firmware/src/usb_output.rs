//! USB HID keyboard + absolute mouse output.
//!
//! The dispatch task never waits on the USB endpoint: [`QueuedHidSink`]
//! pushes reports into [`REPORTS`] and [`hid_writer_loop`] drains them into
//! the interrupt endpoint as the host polls.

use defmt::{debug, error, info};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_usb::class::hid::{
    Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Handler};
use kvm_core::{HidReport, HidSink, LinkState, OutputError, KEYBOARD_REPORT_ID, REPORT_DESCRIPTOR};
use portable_atomic::{AtomicBool, Ordering};

use crate::config::{HID_MAX_PACKET_SIZE, HID_POLL_MS, REPORT_QUEUE_DEPTH};

/// Largest report written to the endpoint.
pub const MAX_REPORT_SIZE: usize = HidReport::MAX_SIZE;

pub type UsbDriver = Driver<'static, USB>;
pub type KvmHidWriter = HidWriter<'static, UsbDriver, MAX_REPORT_SIZE>;

type ReportChannel = Channel<CriticalSectionRawMutex, HidReport, REPORT_QUEUE_DEPTH>;
pub type ReportSender = Sender<'static, CriticalSectionRawMutex, HidReport, REPORT_QUEUE_DEPTH>;
pub type ReportReceiver = Receiver<'static, CriticalSectionRawMutex, HidReport, REPORT_QUEUE_DEPTH>;

/// Reports waiting for the HID endpoint.
pub static REPORTS: ReportChannel = Channel::new();

/// USB device state, written from USB bus events and read by the sink.
pub static LINK_STATE: UsbLinkState = UsbLinkState::new();

/// Lock-free snapshot of the USB device state.
pub struct UsbLinkState {
    connected: AtomicBool,
    mounted: AtomicBool,
    suspended: AtomicBool,
}

impl UsbLinkState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            mounted: AtomicBool::new(false),
            suspended: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> LinkState {
        LinkState {
            connected: self.connected.load(Ordering::Relaxed),
            mounted: self.mounted.load(Ordering::Relaxed),
            suspended: self.suspended.load(Ordering::Relaxed),
        }
    }
}

impl Default for UsbLinkState {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks bus events into a [`UsbLinkState`].
pub struct LinkStateHandler {
    link: &'static UsbLinkState,
}

impl LinkStateHandler {
    #[must_use]
    pub const fn new(link: &'static UsbLinkState) -> Self {
        Self { link }
    }
}

impl Handler for LinkStateHandler {
    fn enabled(&mut self, enabled: bool) {
        self.link.connected.store(enabled, Ordering::Relaxed);
        if !enabled {
            self.link.mounted.store(false, Ordering::Relaxed);
            self.link.suspended.store(false, Ordering::Relaxed);
        }
    }

    fn reset(&mut self) {
        self.link.mounted.store(false, Ordering::Relaxed);
    }

    fn configured(&mut self, configured: bool) {
        self.link.mounted.store(configured, Ordering::Relaxed);
    }

    fn suspended(&mut self, suspended: bool) {
        self.link.suspended.store(suspended, Ordering::Relaxed);
    }
}

/// [`HidSink`] that queues reports for the HID writer task.
pub struct QueuedHidSink {
    reports: ReportSender,
    link: &'static UsbLinkState,
}

impl QueuedHidSink {
    #[must_use]
    pub fn new(reports: ReportSender, link: &'static UsbLinkState) -> Self {
        Self { reports, link }
    }
}

impl HidSink for QueuedHidSink {
    async fn send(&mut self, report: &HidReport) -> Result<(), OutputError> {
        // The link can drop between the dispatch loop's check and here.
        if !self.link.snapshot().is_ready() {
            return Err(OutputError::NotReady);
        }
        self.reports.try_send(*report).map_err(|_| OutputError::Busy)
    }

    fn link_state(&self) -> LinkState {
        self.link.snapshot()
    }
}

/// Drain queued reports into the HID endpoint. Never returns.
pub async fn hid_writer_loop(mut writer: KvmHidWriter, reports: ReportReceiver) -> ! {
    writer.ready().await;
    info!("USB HID endpoint ready");

    let mut buf = [0u8; MAX_REPORT_SIZE];
    loop {
        let report = reports.receive().await;
        let len = report.encode(&mut buf);
        if let Err(e) = writer.write(&buf[..len]).await {
            error!("HID write failed: {}", e);
        }
    }
}

/// HID request handler (handles SET_REPORT, etc.).
///
/// The keyboard collection declares LED outputs, so hosts send lock-key
/// state here. It is logged and otherwise ignored.
pub struct KvmRequestHandler;

impl RequestHandler for KvmRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        if matches!(id, ReportId::Out(KEYBOARD_REPORT_ID)) {
            debug!("host keyboard LEDs: {:02x}", data);
        }
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid(
    builder: &mut Builder<'static, UsbDriver>,
    state: &'static mut State<'static>,
    request_handler: &'static mut KvmRequestHandler,
) -> KvmHidWriter {
    let config = HidConfig {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(request_handler),
        poll_ms: HID_POLL_MS,
        max_packet_size: HID_MAX_PACKET_SIZE,
        // Report IDs rule out the boot protocol.
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
