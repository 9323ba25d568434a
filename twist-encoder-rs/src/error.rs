//! Error types for the Qwiic Twist driver.

use core::fmt;

/// Errors that can occur when communicating with the Qwiic Twist.
#[derive(Debug, PartialEq, Eq)]
pub enum TwistError<E> {
    /// Underlying I2C bus error, including a missing acknowledgement.
    I2c(E),

    /// Requested I2C address lies outside 0x08..=0x77.
    InvalidAddress,

    /// The ID register answered with something other than a Qwiic Twist.
    UnexpectedId(u8),
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for TwistError<E> {
    fn from(error: E) -> Self {
        TwistError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for TwistError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TwistError::I2c(e) => write!(f, "I2C error: {:?}", e),
            TwistError::InvalidAddress => write!(f, "Invalid I2C address (must be 0x08-0x77)"),
            TwistError::UnexpectedId(id) => write!(f, "Unexpected device ID 0x{:02X}", id),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for TwistError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TwistError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            TwistError::InvalidAddress => defmt::write!(f, "Invalid I2C address"),
            TwistError::UnexpectedId(id) => defmt::write!(f, "Unexpected device ID {=u8:#x}", id),
        }
    }
}
