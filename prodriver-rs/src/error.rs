//! Error types for the ProDriver.

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Errors that can occur when driving the TC78H670FTG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProDriverError {
    /// A GPIO read or write failed.
    Pin(ErrorKind),

    /// The IC pulled ERR low: thermal shutdown, over-current or open load.
    Fault,

    /// The operation only exists in the other control mode.
    WrongControlMode,

    /// Step resolution can only change at runtime in a variable
    /// resolution mode.
    FixedResolution,
}

/// Collapse any HAL pin error into its portable [`ErrorKind`].
pub(crate) fn pin_error<E: embedded_hal::digital::Error>(error: E) -> ProDriverError {
    ProDriverError::Pin(error.kind())
}

impl fmt::Display for ProDriverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProDriverError::Pin(kind) => write!(f, "GPIO error: {:?}", kind),
            ProDriverError::Fault => write!(f, "Driver fault (ERR pin low)"),
            ProDriverError::WrongControlMode => write!(f, "Operation not available in this control mode"),
            ProDriverError::FixedResolution => write!(f, "Step resolution is fixed in this mode"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProDriverError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ProDriverError::Pin(kind) => {
                defmt::write!(f, "GPIO error: {}", defmt::Debug2Format(kind))
            }
            ProDriverError::Fault => defmt::write!(f, "Driver fault (ERR pin low)"),
            ProDriverError::WrongControlMode => defmt::write!(f, "Wrong control mode"),
            ProDriverError::FixedResolution => defmt::write!(f, "Fixed step resolution"),
        }
    }
}
