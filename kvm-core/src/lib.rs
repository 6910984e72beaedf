//! Platform-agnostic keyboard/mouse state tracking and HID report generation.
//!
//! This crate turns the serial packet stream described in [`kvm_proto`] into
//! USB HID reports for a composite keyboard + absolute mouse, without any
//! platform-specific dependencies. It can be used both in embedded `no_std`
//! environments and on host for testing.
//!
//! # Overview
//!
//! - [`keymap`]: Key Translation Table ([`translate`])
//! - [`report`]: report layouts and the [`REPORT_DESCRIPTOR`]
//! - [`session`]: pointer, button and key state ([`InputSession`])
//! - [`decoder`]: framing over a [`ByteSource`] ([`decode_next`])
//! - [`output`] / [`status`]: the [`HidSink`] and [`StatusIndicator`] seams
//! - [`bridge`]: the dispatch loop ([`HidBridge`])
//!
//! # Example
//!
//! ```rust
//! use kvm_core::{HidReport, InputSession};
//! use kvm_proto::Packet;
//!
//! let mut session = InputSession::new();
//! let report = session.apply(&Packet::AbsMove { x: 100, y: 200 });
//! match report {
//!     Some(HidReport::Mouse(mouse)) => assert_eq!((mouse.x, mouse.y), (100, 200)),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod bridge;
pub mod decoder;
pub mod input;
pub mod keymap;
pub mod output;
pub mod report;
pub mod session;
pub mod status;

#[cfg(test)]
mod mock;

// Re-export main types at crate root
pub use bridge::{BridgeConfig, BridgeError, BridgeEvent, HidBridge};
pub use decoder::decode_next;
pub use input::{ByteSource, InputError};
pub use keymap::{translate, NO_KEY};
pub use output::{HidSink, LinkState, OutputError};
pub use report::{
    AbsMouseReport, HidReport, KeyboardReport, KEYBOARD_REPORT_ID, MOUSE_REPORT_ID,
    REPORT_DESCRIPTOR,
};
pub use session::{InputSession, KeyboardState, MouseButtons, MouseState};
pub use status::{Indication, NoIndicator, StatusIndicator};
