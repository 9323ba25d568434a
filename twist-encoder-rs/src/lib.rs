//! Async driver for the SparkFun Qwiic Twist RGB rotary encoder.
//!
//! This crate provides an Embassy-compatible async I2C driver for the
//! Qwiic Twist (SparkFun DEV-15083): a detented rotary encoder with a push
//! button and an RGB LED, managed by an on-board microcontroller that
//! exposes a small register file over I2C.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private) — register primitives that handle the
//!   one-byte register pointer and little-endian encoding.
//! - **[`QwiicTwist`]** (public) — knob, button, LED and configuration
//!   operations.
//!
//! # Quick start
//!
//! ```ignore
//! use twist_encoder::{QwiicTwist, DEFAULT_ADDRESS};
//!
//! // Construct with any `embedded-hal-async` I2C implementation
//! let mut twist = QwiicTwist::new(i2c, DEFAULT_ADDRESS);
//!
//! twist.is_connected().await?;
//! let diff = twist.read_diff(true).await?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on error types
//!   for embedded logging.

#![cfg_attr(not(test), no_std)]

pub use error::TwistError;
pub use registers::{DEFAULT_ADDRESS, DEVICE_ID};
pub use twist::{Color, QwiicTwist};

mod driver;
mod error;
pub mod registers;
mod twist;
