//! Datasheet timing constants for the TC78H670FTG.
//!
//! All values are minimums; the driver waits exactly this long.

/// TmodeSU: MODE pins must be stable this long before standby is released.
pub const MODE_SETUP_US: u32 = 1;

/// TmodeHO: MODE pins must be held this long after standby is released.
pub const MODE_HOLD_US: u32 = 100;

/// Minimum CLK low/high width when bit-banging the clock line.
pub const CLOCK_PULSE_US: u32 = 1;

/// Default time between step clock edges in milliseconds.
pub const DEFAULT_CLOCK_DELAY_MS: u8 = 2;
