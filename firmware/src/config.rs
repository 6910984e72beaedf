//! Board and link configuration.
//!
//! | Function  | GPIO | Description |
//! |-----------|------|-------------|
//! | UART1 TX  | 8    | Serial transmit (unused) |
//! | UART1 RX  | 9    | Packet stream input |
//! | LED red   | 18   | Status LED, active high |
//! | LED green | 19   | Status LED, active high |
//! | LED blue  | 20   | Status LED, active high |

/// Serial baud rate, 8N1.
pub const UART_BAUD: u32 = 460_800;

/// UART receive ring buffer. Sized for a few milliseconds of back-to-back
/// frames while the dispatch task waits on USB.
pub const UART_RX_BUF_SIZE: usize = 256;
pub const UART_TX_BUF_SIZE: usize = 16;

// pid.codes test VID/PID
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;
pub const USB_MANUFACTURER: &str = "Rust KVM";
pub const USB_PRODUCT: &str = "UART-to-HID Bridge";
pub const USB_SERIAL: &str = "001";

/// HID interrupt endpoint polling interval.
pub const HID_POLL_MS: u8 = 10;
/// HID interrupt endpoint max packet size; every report fits in one packet.
pub const HID_MAX_PACKET_SIZE: u16 = 16;

/// Reports buffered between the dispatch task and the HID writer.
pub const REPORT_QUEUE_DEPTH: usize = 8;
