//! Blocking driver for the SparkFun ProDriver stepper motor board.
//!
//! The ProDriver carries a Toshiba TC78H670FTG bipolar stepper driver. This
//! crate bit-bangs its GPIO interface through `embedded-hal` 1.0 traits:
//! booting the IC into clock-in or serial control mode, stepping it in
//! clock-in mode, changing the step resolution at runtime, and sampling the
//! ERR line after every operation.
//!
//! # Quick start
//!
//! ```ignore
//! use prodriver::{Direction, ProDriver, ProDriverPins};
//!
//! let pins = ProDriverPins { mode0, mode1, mode2, mode3, enable, standby, error };
//! let mut driver = ProDriver::with_defaults(pins, delay);
//!
//! driver.begin()?;
//! driver.enable()?;
//! driver.standby_off()?;
//! driver.step(200, Direction::Clockwise, prodriver::DEFAULT_CLOCK_DELAY_MS)?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] on public types and fault logging.

#![cfg_attr(not(test), no_std)]

pub use driver::{Direction, ProDriver};
pub use error::ProDriverError;
pub use pins::ProDriverPins;
pub use settings::{ControlMode, ProDriverSettings, StepResolution, StepResolutionMode};
pub use timing::DEFAULT_CLOCK_DELAY_MS;

mod driver;
mod error;
mod pins;
mod settings;
pub mod timing;
