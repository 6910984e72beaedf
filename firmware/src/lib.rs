//! UART to USB keyboard + absolute mouse bridge for RP2040.
//!
//! This crate provides the embedded side of the bridge: it reads the serial
//! packet stream from UART and emits USB HID reports.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Receives packets over UART1 (460800 baud, 8N1, see [`config`])
//! 2. Decodes them and tracks pointer/key state in [`kvm_core`]
//! 3. Outputs a composite keyboard + absolute mouse USB HID device
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack and link state
//! - **Dispatch Task**: Runs [`kvm_core::HidBridge`], one packet per iteration
//! - **HID Writer Task**: Drains queued reports into the HID endpoint
//!
//! The dispatch task never waits for the host: reports go through a bounded
//! [`Channel`](embassy_sync::channel::Channel) and are dropped when it is full.
//!
//! # Modules
//!
//! - [`uart_input`]: UART byte source ([`UartByteSource`])
//! - [`usb_output`]: USB HID sink and link state ([`QueuedHidSink`], [`UsbLinkState`])
//! - [`status_led`]: RGB status LED ([`RgbStatusLed`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub mod config;
pub mod status_led;
pub mod uart_input;
pub mod usb_output;

pub use status_led::RgbStatusLed;
pub use uart_input::UartByteSource;
pub use usb_output::{
    configure_usb_hid, hid_writer_loop, KvmRequestHandler, LinkStateHandler, QueuedHidSink,
    UsbLinkState, LINK_STATE, REPORTS,
};
