#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use embassy_rp::usb::Driver;
use embassy_time::Delay;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig, UsbDevice};
use kvm_core::{BridgeConfig, HidBridge, Indication, StatusIndicator};
use static_cell::StaticCell;
use uart_to_hid::config;
use uart_to_hid::usb_output::{KvmHidWriter, ReportReceiver};
use uart_to_hid::{
    configure_usb_hid, hid_writer_loop, KvmRequestHandler, LinkStateHandler, QueuedHidSink,
    RgbStatusLed, UartByteSource, LINK_STATE, REPORTS,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

type StatusLed = RgbStatusLed<Output<'static>, Output<'static>, Output<'static>>;
type Bridge = HidBridge<UartByteSource, QueuedHidSink, Delay, StatusLed>;

/// UART ring buffers.
static UART_TX_BUF: StaticCell<[u8; config::UART_TX_BUF_SIZE]> = StaticCell::new();
static UART_RX_BUF: StaticCell<[u8; config::UART_RX_BUF_SIZE]> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<KvmRequestHandler> = StaticCell::new();
static LINK_HANDLER: StaticCell<LinkStateHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("UART-to-HID starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let mut led = RgbStatusLed::new(
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_20, Level::Low),
    );
    led.show(Indication::Startup);

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::UART_BAUD;

    let uart = BufferedUart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        UART_TX_BUF.init([0; config::UART_TX_BUF_SIZE]),
        UART_RX_BUF.init([0; config::UART_RX_BUF_SIZE]),
        uart_config,
    );
    let (_tx, rx) = uart.split();
    let uart_input = UartByteSource::new(rx);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL);
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    builder.handler(LINK_HANDLER.init(LinkStateHandler::new(&LINK_STATE)));

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let request_handler = REQUEST_HANDLER.init(KvmRequestHandler);
    let hid_writer = configure_usb_hid(&mut builder, hid_state, request_handler);

    // Build the USB device
    let usb_device = builder.build();

    let sink = QueuedHidSink::new(REPORTS.sender(), &LINK_STATE);
    let bridge = HidBridge::new(uart_input, sink, Delay, led, BridgeConfig::default());

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(hid_writer_task(hid_writer, REPORTS.receiver()).unwrap());
    spawner.spawn(dispatch_task(bridge).unwrap());

    info!("UART-to-HID initialized, waiting for USB host...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// HID writer task - moves queued reports onto the interrupt endpoint.
#[embassy_executor::task]
async fn hid_writer_task(writer: KvmHidWriter, reports: ReportReceiver) {
    hid_writer_loop(writer, reports).await;
}

/// Dispatch task - decodes packets and queues the resulting reports.
#[embassy_executor::task]
async fn dispatch_task(mut bridge: Bridge) {
    bridge.run().await;
}
