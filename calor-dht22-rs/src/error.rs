//! Error types for the DHT22 driver.

use core::fmt;

/// Errors that can occur during a sensor transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhtError {
    /// The data line did not reach the expected level within the protocol
    /// deadline. Covers a missing sensor as well as a wedged bus.
    Timeout,

    /// The 40-bit frame arrived but its checksum byte did not match.
    Checksum,
}

impl fmt::Display for DhtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DhtError::Timeout => write!(f, "sensor did not respond in time"),
            DhtError::Checksum => write!(f, "frame checksum mismatch"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DhtError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DhtError::Timeout => defmt::write!(f, "sensor did not respond in time"),
            DhtError::Checksum => defmt::write!(f, "frame checksum mismatch"),
        }
    }
}
