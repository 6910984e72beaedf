//! RGB status LED on three GPIO outputs.

use embedded_hal::digital::{OutputPin, PinState};
use kvm_core::{Indication, StatusIndicator};

/// Red/green/blue channel levels for an indication, `true` = lit.
#[must_use]
pub const fn color(indication: Indication) -> (bool, bool, bool) {
    match indication {
        Indication::Startup => (true, true, true),
        Indication::Connected => (false, false, true),
        Indication::Disconnected => (true, false, false),
        Indication::PointerEntered => (false, true, false),
        Indication::PointerLeft => (true, false, true),
    }
}

/// Active-high RGB LED.
pub struct RgbStatusLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> RgbStatusLed<R, G, B> {
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> StatusIndicator for RgbStatusLed<R, G, B> {
    fn show(&mut self, indication: Indication) {
        let (r, g, b) = color(indication);
        // GPIO writes on the RP2040 cannot fail.
        let _ = self.red.set_state(PinState::from(r));
        let _ = self.green.set_state(PinState::from(g));
        let _ = self.blue.set_state(PinState::from(b));
    }
}
