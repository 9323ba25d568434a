//! Register map of the Qwiic Twist firmware.
//!
//! Every register is addressed by a single byte. Multi-byte values are
//! stored little-endian, starting at the listed address.

// ---------------------------------------------------------------------------
// Identification
// ---------------------------------------------------------------------------

/// Device ID register (8-bit, read-only). Always reads [`DEVICE_ID`].
pub const TWIST_ID: u8 = 0x00;

/// Event status register (8-bit). See the `STATUS_*` bit positions.
pub const TWIST_STATUS: u8 = 0x01;

/// Firmware version (16-bit, major in the high byte).
pub const TWIST_VERSION: u8 = 0x02;

/// Interrupt enable register (8-bit). See the `INT_ENABLE_*` bit positions.
pub const TWIST_ENABLE_INTS: u8 = 0x04;

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Accumulated encoder count (16-bit signed).
pub const TWIST_COUNT: u8 = 0x05;

/// Ticks since the difference was last cleared (16-bit signed).
pub const TWIST_DIFFERENCE: u8 = 0x07;

/// Milliseconds since the knob last moved (16-bit).
pub const TWIST_LAST_ENCODER_EVENT: u8 = 0x09;

/// Milliseconds since the button was last pressed (16-bit).
pub const TWIST_LAST_BUTTON_EVENT: u8 = 0x0B;

// ---------------------------------------------------------------------------
// RGB LED
// ---------------------------------------------------------------------------

pub const TWIST_RED: u8 = 0x0D;
pub const TWIST_GREEN: u8 = 0x0E;
pub const TWIST_BLUE: u8 = 0x0F;

/// Per-tick colour change applied by the firmware on each encoder tick
/// (16-bit signed). Green and blue follow at +2 and +4.
pub const TWIST_CONNECT_RED: u8 = 0x10;
pub const TWIST_CONNECT_GREEN: u8 = 0x12;
pub const TWIST_CONNECT_BLUE: u8 = 0x14;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Milliseconds after the last movement before the INT pin fires (16-bit).
pub const TWIST_TURN_INT_TIMEOUT: u8 = 0x16;

/// Writing a new 7-bit address here moves the device to it immediately.
pub const TWIST_CHANGE_ADDRESS: u8 = 0x18;

/// Count wraps to zero when it reaches this value; 0 disables the limit
/// (16-bit).
pub const TWIST_LIMIT: u8 = 0x19;

// ---------------------------------------------------------------------------
// Bit positions
// ---------------------------------------------------------------------------

pub const STATUS_ENCODER_MOVED: u8 = 0;
pub const STATUS_BUTTON_PRESSED: u8 = 1;
pub const STATUS_BUTTON_CLICKED: u8 = 2;

pub const INT_ENABLE_ENCODER: u8 = 0;
pub const INT_ENABLE_BUTTON: u8 = 1;

// ---------------------------------------------------------------------------
// Device constants
// ---------------------------------------------------------------------------

/// Value of the [`TWIST_ID`] register on a genuine Qwiic Twist.
pub const DEVICE_ID: u8 = 0x5C;

/// Factory I2C address.
pub const DEFAULT_ADDRESS: u8 = 0x3F;

/// Lowest and highest addresses accepted by [`TWIST_CHANGE_ADDRESS`];
/// the rest of the 7-bit space is reserved by the I2C specification.
pub const MIN_ADDRESS: u8 = 0x08;
pub const MAX_ADDRESS: u8 = 0x77;
