//! Status indicator seam.

/// What the status indicator should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indication {
    /// Powered up, link state not known yet.
    Startup,
    /// USB link ready.
    Connected,
    /// USB link down, unconfigured or suspended.
    Disconnected,
    /// Pointer entered this screen.
    PointerEntered,
    /// Pointer left this screen.
    PointerLeft,
}

/// A device that can display an [`Indication`] (LED, display, ...).
pub trait StatusIndicator {
    fn show(&mut self, indication: Indication);
}

impl<T: StatusIndicator + ?Sized> StatusIndicator for &mut T {
    fn show(&mut self, indication: Indication) {
        (**self).show(indication);
    }
}

/// Indicator that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndicator;

impl StatusIndicator for NoIndicator {
    fn show(&mut self, _indication: Indication) {}
}
