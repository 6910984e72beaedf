//! Serial wire protocol for the UART-to-HID bridge.
//!
//! A peer (typically a relay attached to a Synergy/Barrier server) writes a
//! stream of input events onto the serial line; the bridge turns them into USB
//! keyboard and mouse reports. This crate holds everything both ends need to
//! agree on:
//!
//! - **Types**: [`PacketKind`] tags and decoded [`Packet`] values
//! - **Parsing**: [`parse_packet()`] for whole frames in a slice, and
//!   [`Packet::from_payload`] for a payload read field by field
//! - **Serialization**: the [`Serialize`] trait for the peer side
//! - **Keys**: the [`keys`] identifier range and its Synergy mapping
//!
//! # Frame Format
//!
//! ```text
//! <kind:u8> <payload>
//! ```
//!
//! | Kind | Tag | Payload |
//! |------|-----|---------|
//! | AbsMove | 0 | x:u16, y:u16 |
//! | MouseDown | 1 | button:i8 |
//! | MouseUp | 2 | button:i8 |
//! | KeyDown | 3 | id:u16, mask:u16, button:u16 |
//! | KeyUp | 4 | id:u16, mask:u16, button:u16 |
//! | MouseWheel | 5 | x_delta:i16, y_delta:i16 |
//! | MouseEnter | 6 | - |
//! | MouseLeave | 7 | - |
//!
//! All multi-byte fields are big-endian. Frames carry no length, checksum or
//! delimiter.
//!
//! # Example
//!
//! ```
//! use kvm_proto::{parse_packet, Packet, Serialize, MAX_PACKET_SIZE};
//!
//! let mut buf = [0u8; MAX_PACKET_SIZE];
//! let down = Packet::KeyDown { id: u16::from(b'a'), mask: 0, button: 1 };
//! let len = down.serialize(&mut buf).unwrap();
//!
//! assert_eq!(parse_packet(&buf[..len]), Ok((down, len)));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable `serialize_to_vec()`
//! - **`embedded-io`**: Enable `serialize_io()` for I/O peripherals

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod keys;
pub mod parser;
pub mod serialize;
pub mod types;

pub use keys::KeyId;
pub use parser::{parse_packet, ParseError};
pub use serialize::{Serialize, SerializeError, MAX_PACKET_SIZE};
pub use types::{scale_to_abs, Packet, PacketKind, ABS_AXIS_MAX};
