use core::{error, fmt};

use embedded_hal::spi;

use crate::bitrate::BitRateError;

/// Errors returned by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Payload larger than the transmit buffer; nothing was copied.
    CapacityExceeded,
    /// Nothing received since the last read.
    NoData,
    /// Transfer requested while the channel is not idle.
    NotIdle,
    /// Buffer write attempted while a transfer is in flight.
    Busy,
    /// The unit kept reporting BSY past the caller's deadline.
    Timeout,
    /// Configured bit rate cannot be produced from the system clock.
    BitRate(BitRateError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded => f.write_str("SSI payload exceeds transmit buffer"),
            Error::NoData => f.write_str("SSI receive buffer empty"),
            Error::NotIdle => f.write_str("SSI channel not idle"),
            Error::Busy => f.write_str("SSI transfer in progress"),
            Error::Timeout => f.write_str("SSI busy timeout"),
            Error::BitRate(e) => write!(f, "SSI bit rate: {e}"),
        }
    }
}

impl error::Error for Error {}

impl From<BitRateError> for Error {
    fn from(e: BitRateError) -> Self {
        Error::BitRate(e)
    }
}

impl spi::Error for Error {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}
