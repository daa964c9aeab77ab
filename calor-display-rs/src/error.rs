//! Error types for the TFT driver.

/// Errors that can occur during display operations.
///
/// `lcd-async` surfaces bus-level failures through its own generic error
/// types; this enum collapses them so callers do not carry the SPI error
/// parameter around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TftError {
    /// The panel did not come up during the initialisation sequence.
    InitializationFailed,
    /// An operation was attempted before [`TftDriver::init()`](crate::TftDriver::init)
    /// succeeded.
    NotInitialized,
    /// Bus-level failure while transferring a frame.
    Interface,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TftError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TftError::InitializationFailed => defmt::write!(f, "Initialization failed"),
            TftError::NotInitialized => defmt::write!(f, "Not initialized"),
            TftError::Interface => defmt::write!(f, "Display interface error"),
        }
    }
}
