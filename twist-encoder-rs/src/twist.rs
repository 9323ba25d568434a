//! High-level interface for the Qwiic Twist.
//!
//! [`QwiicTwist`] wraps the register driver with the knob, button, LED and
//! configuration registers of the board.

use embedded_hal_async::i2c::I2c;

use crate::driver::RegisterDriver;
use crate::error::TwistError;
use crate::registers::*;

/// RGB LED colour, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// High-level interface for the SparkFun Qwiic Twist rotary encoder.
///
/// Every method performs one or more I2C transactions; a missing
/// acknowledgement surfaces as [`TwistError::I2c`].
///
/// # Example
///
/// ```ignore
/// use twist_encoder::{QwiicTwist, DEFAULT_ADDRESS};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut twist = QwiicTwist::new(i2c, DEFAULT_ADDRESS);
///
/// if twist.is_moved().await? {
///     let count = twist.read_count().await?;
/// }
/// ```
pub struct QwiicTwist<I2C> {
    driver: RegisterDriver<I2C>,
}

impl<I2C> QwiicTwist<I2C>
where
    I2C: I2c,
{
    /// Create a new Twist interface. No I2C traffic is generated.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (factory default 0x3F)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: RegisterDriver::new(i2c, address),
        }
    }

    /// The I2C address currently used for transactions.
    pub fn address(&self) -> u8 {
        self.driver.address()
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Identification
    // -----------------------------------------------------------------------

    /// Check that a Qwiic Twist answers at the configured address.
    ///
    /// # Errors
    /// * [`TwistError::I2c`] if the device does not acknowledge
    /// * [`TwistError::UnexpectedId`] if a different device answers
    pub async fn is_connected(&mut self) -> Result<(), TwistError<I2C::Error>> {
        let id = self.driver.read_u8(TWIST_ID).await?;
        if id != DEVICE_ID {
            return Err(TwistError::UnexpectedId(id));
        }
        Ok(())
    }

    /// Firmware version, major number in the high byte.
    pub async fn read_version(&mut self) -> Result<u16, TwistError<I2C::Error>> {
        self.driver.read_u16(TWIST_VERSION).await
    }

    // -----------------------------------------------------------------------
    // Encoder
    // -----------------------------------------------------------------------

    /// Read the accumulated encoder count.
    pub async fn read_count(&mut self) -> Result<i16, TwistError<I2C::Error>> {
        self.driver.read_i16(TWIST_COUNT).await
    }

    /// Overwrite the accumulated encoder count.
    pub async fn set_count(&mut self, count: i16) -> Result<(), TwistError<I2C::Error>> {
        self.driver.write_i16(TWIST_COUNT, count).await
    }

    /// Read the ticks turned since the difference was last cleared.
    ///
    /// With `clear` set, the register is zeroed after reading.
    pub async fn read_diff(&mut self, clear: bool) -> Result<i16, TwistError<I2C::Error>> {
        let diff = self.driver.read_i16(TWIST_DIFFERENCE).await?;
        if clear {
            self.driver.write_i16(TWIST_DIFFERENCE, 0).await?;
        }
        Ok(diff)
    }

    /// Read the wrap limit. Zero means no limit.
    pub async fn read_limit(&mut self) -> Result<u16, TwistError<I2C::Error>> {
        self.driver.read_u16(TWIST_LIMIT).await
    }

    /// Make the count wrap to zero when it reaches `limit`. Zero disables
    /// the limit.
    pub async fn set_limit(&mut self, limit: u16) -> Result<(), TwistError<I2C::Error>> {
        self.driver.write_u16(TWIST_LIMIT, limit).await
    }

    /// Milliseconds since the knob last moved.
    pub async fn time_since_last_movement(
        &mut self,
        clear: bool,
    ) -> Result<u16, TwistError<I2C::Error>> {
        let elapsed = self.driver.read_u16(TWIST_LAST_ENCODER_EVENT).await?;
        if clear {
            self.driver.write_u16(TWIST_LAST_ENCODER_EVENT, 0).await?;
        }
        Ok(elapsed)
    }

    /// Milliseconds since the button was last pressed.
    pub async fn time_since_last_press(
        &mut self,
        clear: bool,
    ) -> Result<u16, TwistError<I2C::Error>> {
        let elapsed = self.driver.read_u16(TWIST_LAST_BUTTON_EVENT).await?;
        if clear {
            self.driver.write_u16(TWIST_LAST_BUTTON_EVENT, 0).await?;
        }
        Ok(elapsed)
    }

    // -----------------------------------------------------------------------
    // Status flags
    // -----------------------------------------------------------------------

    /// Has the knob moved since the last call? Clears the flag.
    pub async fn is_moved(&mut self) -> Result<bool, TwistError<I2C::Error>> {
        self.take_status_bit(STATUS_ENCODER_MOVED).await
    }

    /// Has the button been pressed since the last call? Clears the flag.
    pub async fn is_pressed(&mut self) -> Result<bool, TwistError<I2C::Error>> {
        self.take_status_bit(STATUS_BUTTON_PRESSED).await
    }

    /// Has the button been clicked (pressed and released) since the last
    /// call? Clears the flag.
    pub async fn is_clicked(&mut self) -> Result<bool, TwistError<I2C::Error>> {
        self.take_status_bit(STATUS_BUTTON_CLICKED).await
    }

    /// Read one status bit and write the register back with only that bit
    /// cleared, so the other pending events survive.
    async fn take_status_bit(&mut self, bit: u8) -> Result<bool, TwistError<I2C::Error>> {
        let status = self.driver.read_u8(TWIST_STATUS).await?;
        let mask = 1 << bit;
        self.driver.write_u8(TWIST_STATUS, status & !mask).await?;
        Ok(status & mask != 0)
    }

    // -----------------------------------------------------------------------
    // Interrupts
    // -----------------------------------------------------------------------

    /// Choose which events drive the INT pin low.
    pub async fn enable_interrupts(
        &mut self,
        encoder: bool,
        button: bool,
    ) -> Result<(), TwistError<I2C::Error>> {
        let mut value = 0;
        if encoder {
            value |= 1 << INT_ENABLE_ENCODER;
        }
        if button {
            value |= 1 << INT_ENABLE_BUTTON;
        }
        self.driver.write_u8(TWIST_ENABLE_INTS, value).await
    }

    /// Stop the INT pin from firing on any event.
    pub async fn disable_interrupts(&mut self) -> Result<(), TwistError<I2C::Error>> {
        self.driver.write_u8(TWIST_ENABLE_INTS, 0).await
    }

    /// Milliseconds of inactivity after a turn before INT fires.
    pub async fn read_int_timeout(&mut self) -> Result<u16, TwistError<I2C::Error>> {
        self.driver.read_u16(TWIST_TURN_INT_TIMEOUT).await
    }

    pub async fn set_int_timeout(&mut self, timeout_ms: u16) -> Result<(), TwistError<I2C::Error>> {
        self.driver.write_u16(TWIST_TURN_INT_TIMEOUT, timeout_ms).await
    }

    // -----------------------------------------------------------------------
    // RGB LED
    // -----------------------------------------------------------------------

    /// Set all three LED channels in a single transaction.
    pub async fn set_color(&mut self, color: Color) -> Result<(), TwistError<I2C::Error>> {
        self.driver
            .write_u8x3(TWIST_RED, [color.red, color.green, color.blue])
            .await
    }

    pub async fn read_color(&mut self) -> Result<Color, TwistError<I2C::Error>> {
        let [red, green, blue] = self.driver.read_u8x3(TWIST_RED).await?;
        Ok(Color { red, green, blue })
    }

    /// Tie the LED to the knob: each tick adds the given amount to each
    /// channel (negative values dim it).
    pub async fn connect_color(
        &mut self,
        red: i16,
        green: i16,
        blue: i16,
    ) -> Result<(), TwistError<I2C::Error>> {
        self.driver.write_i16(TWIST_CONNECT_RED, red).await?;
        self.driver.write_i16(TWIST_CONNECT_GREEN, green).await?;
        self.driver.write_i16(TWIST_CONNECT_BLUE, blue).await
    }

    // -----------------------------------------------------------------------
    // Addressing
    // -----------------------------------------------------------------------

    /// Move the device to a new I2C address.
    ///
    /// The firmware switches address as soon as the write completes, so
    /// subsequent transactions use `new_address`.
    ///
    /// # Errors
    /// * [`TwistError::InvalidAddress`] if `new_address` is outside
    ///   0x08..=0x77 (nothing is sent)
    /// * [`TwistError::I2c`] on communication failure (address unchanged)
    pub async fn change_address(&mut self, new_address: u8) -> Result<(), TwistError<I2C::Error>> {
        if !(MIN_ADDRESS..=MAX_ADDRESS).contains(&new_address) {
            return Err(TwistError::InvalidAddress);
        }

        self.driver.write_u8(TWIST_CHANGE_ADDRESS, new_address).await?;
        self.driver.set_address(new_address);
        Ok(())
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    // Register-file backed fake Twist. The first written byte of each
    // transaction sets the register pointer, following bytes are stored
    // sequentially and reads stream out from the pointer.
    struct FakeTwist {
        address: u8,
        regs: [u8; 0x20],
        writes: Vec<Vec<u8>>,
    }

    impl FakeTwist {
        fn new() -> Self {
            let mut regs = [0u8; 0x20];
            regs[TWIST_ID as usize] = DEVICE_ID;
            Self {
                address: DEFAULT_ADDRESS,
                regs,
                writes: Vec::new(),
            }
        }
    }

    impl ErrorType for FakeTwist {
        type Error = ErrorKind;
    }

    impl I2c for FakeTwist {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.address {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }

            let mut pointer = 0usize;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        self.writes.push(bytes.to_vec());
                        pointer = bytes[0] as usize;
                        for &b in &bytes[1..] {
                            self.regs[pointer] = b;
                            pointer += 1;
                        }
                        if bytes.len() == 2 && bytes[0] == TWIST_CHANGE_ADDRESS {
                            self.address = bytes[1];
                        }
                    }
                    Operation::Read(buf) => {
                        for b in buf.iter_mut() {
                            *b = self.regs[pointer];
                            pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn twist() -> QwiicTwist<FakeTwist> {
        QwiicTwist::new(FakeTwist::new(), DEFAULT_ADDRESS)
    }

    // ── Identification ───────────────────────────────────────────────

    #[test]
    fn is_connected_accepts_twist_id() {
        let mut t = twist();
        assert_eq!(block_on(t.is_connected()), Ok(()));
    }

    #[test]
    fn is_connected_rejects_foreign_id() {
        let mut fake = FakeTwist::new();
        fake.regs[TWIST_ID as usize] = 0x42;
        let mut t = QwiicTwist::new(fake, DEFAULT_ADDRESS);
        assert_eq!(block_on(t.is_connected()), Err(TwistError::UnexpectedId(0x42)));
    }

    #[test]
    fn missing_ack_surfaces_as_i2c_error() {
        let mut t = QwiicTwist::new(FakeTwist::new(), 0x20);
        assert_eq!(
            block_on(t.read_count()),
            Err(TwistError::I2c(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address
            )))
        );
    }

    // ── Encoder registers ────────────────────────────────────────────

    #[test]
    fn count_is_little_endian_signed() {
        let mut fake = FakeTwist::new();
        fake.regs[TWIST_COUNT as usize] = 0xFE;
        fake.regs[TWIST_COUNT as usize + 1] = 0xFF;
        let mut t = QwiicTwist::new(fake, DEFAULT_ADDRESS);
        assert_eq!(block_on(t.read_count()), Ok(-2));
    }

    #[test]
    fn set_count_writes_register_then_lsb_msb() {
        let mut t = twist();
        block_on(t.set_count(0x1234)).unwrap();
        let fake = t.release();
        assert_eq!(fake.writes.last().unwrap(), &[TWIST_COUNT, 0x34, 0x12]);
    }

    #[test]
    fn read_diff_with_clear_zeroes_register() {
        let mut fake = FakeTwist::new();
        fake.regs[TWIST_DIFFERENCE as usize] = 5;
        let mut t = QwiicTwist::new(fake, DEFAULT_ADDRESS);

        assert_eq!(block_on(t.read_diff(true)), Ok(5));
        assert_eq!(block_on(t.read_diff(false)), Ok(0));
    }

    #[test]
    fn read_diff_without_clear_keeps_value() {
        let mut fake = FakeTwist::new();
        fake.regs[TWIST_DIFFERENCE as usize] = 3;
        let mut t = QwiicTwist::new(fake, DEFAULT_ADDRESS);

        assert_eq!(block_on(t.read_diff(false)), Ok(3));
        assert_eq!(block_on(t.read_diff(false)), Ok(3));
    }

    #[test]
    fn limit_round_trips_through_register() {
        let mut t = twist();
        block_on(t.set_limit(100)).unwrap();
        assert_eq!(block_on(t.read_limit()), Ok(100));
    }

    #[test]
    fn time_since_last_press_clears_when_asked() {
        let mut fake = FakeTwist::new();
        fake.regs[TWIST_LAST_BUTTON_EVENT as usize] = 0xE8;
        fake.regs[TWIST_LAST_BUTTON_EVENT as usize + 1] = 0x03;
        let mut t = QwiicTwist::new(fake, DEFAULT_ADDRESS);

        assert_eq!(block_on(t.time_since_last_press(true)), Ok(1000));
        assert_eq!(block_on(t.time_since_last_press(false)), Ok(0));
    }

    #[test]
    fn time_since_last_movement_clears_when_asked() {
        let mut fake = FakeTwist::new();
        fake.regs[TWIST_LAST_ENCODER_EVENT as usize] = 0xF4;
        fake.regs[TWIST_LAST_ENCODER_EVENT as usize + 1] = 0x01;
        let mut t = QwiicTwist::new(fake, DEFAULT_ADDRESS);

        assert_eq!(block_on(t.time_since_last_movement(false)), Ok(500));
        assert_eq!(block_on(t.time_since_last_movement(true)), Ok(500));
        assert_eq!(block_on(t.time_since_last_movement(false)), Ok(0));

        let fake = t.release();
        assert_eq!(fake.writes.last().unwrap(), &[TWIST_LAST_ENCODER_EVENT, 0, 0]);
    }

    // ── Status flags ─────────────────────────────────────────────────

    #[test]
    fn is_moved_clears_only_its_bit() {
        let mut fake = FakeTwist::new();
        fake.regs[TWIST_STATUS as usize] = 0b111;
        let mut t = QwiicTwist::new(fake, DEFAULT_ADDRESS);

        assert_eq!(block_on(t.is_moved()), Ok(true));
        assert_eq!(block_on(t.is_moved()), Ok(false));
        // Pressed and clicked are still pending.
        assert_eq!(block_on(t.is_pressed()), Ok(true));
        assert_eq!(block_on(t.is_clicked()), Ok(true));

        let fake = t.release();
        assert_eq!(fake.regs[TWIST_STATUS as usize], 0);
    }

    #[test]
    fn is_clicked_false_when_idle() {
        let mut t = twist();
        assert_eq!(block_on(t.is_clicked()), Ok(false));
    }

    // ── Interrupts ───────────────────────────────────────────────────

    #[test]
    fn enable_interrupts_sets_selected_bits() {
        let mut t = twist();
        block_on(t.enable_interrupts(true, false)).unwrap();
        block_on(t.enable_interrupts(true, true)).unwrap();
        block_on(t.disable_interrupts()).unwrap();

        let fake = t.release();
        let writes: Vec<_> = fake.writes.iter().map(|w| w[1]).collect();
        assert_eq!(writes, [0b01, 0b11, 0b00]);
    }

    #[test]
    fn int_timeout_round_trips_through_register() {
        let mut t = twist();
        block_on(t.set_int_timeout(250)).unwrap();
        assert_eq!(block_on(t.read_int_timeout()), Ok(250));
    }

    // ── RGB LED ──────────────────────────────────────────────────────

    #[test]
    fn set_color_writes_three_channels_at_once() {
        let mut t = twist();
        block_on(t.set_color(Color::new(10, 20, 30))).unwrap();
        assert_eq!(block_on(t.read_color()), Ok(Color::new(10, 20, 30)));

        let fake = t.release();
        assert_eq!(fake.writes.len(), 2);
        assert_eq!(fake.writes[0], [TWIST_RED, 10, 20, 30]);
    }

    #[test]
    fn connect_color_writes_signed_steps() {
        let mut t = twist();
        block_on(t.connect_color(-10, 0, 10)).unwrap();

        let fake = t.release();
        assert_eq!(fake.writes[0], [TWIST_CONNECT_RED, 0xF6, 0xFF]);
        assert_eq!(fake.writes[1], [TWIST_CONNECT_GREEN, 0x00, 0x00]);
        assert_eq!(fake.writes[2], [TWIST_CONNECT_BLUE, 0x0A, 0x00]);
    }

    // ── Addressing ───────────────────────────────────────────────────

    #[test]
    fn change_address_follows_device() {
        let mut t = twist();
        block_on(t.change_address(0x40)).unwrap();
        assert_eq!(t.address(), 0x40);
        assert_eq!(block_on(t.is_connected()), Ok(()));
    }

    #[test]
    fn change_address_rejects_reserved_range() {
        let mut t = twist();
        assert_eq!(block_on(t.change_address(0x07)), Err(TwistError::InvalidAddress));
        assert_eq!(block_on(t.change_address(0x78)), Err(TwistError::InvalidAddress));
        assert_eq!(t.address(), DEFAULT_ADDRESS);

        let fake = t.release();
        assert!(fake.writes.is_empty());
    }

    #[test]
    fn change_address_keeps_old_address_on_nack() {
        let mut t = QwiicTwist::new(FakeTwist::new(), 0x30);
        assert!(block_on(t.change_address(0x40)).is_err());
        assert_eq!(t.address(), 0x30);
    }

    #[test]
    fn version_reads_sixteen_bits() {
        let mut fake = FakeTwist::new();
        fake.regs[TWIST_VERSION as usize] = 0x02;
        fake.regs[TWIST_VERSION as usize + 1] = 0x01;
        let mut t = QwiicTwist::new(fake, DEFAULT_ADDRESS);
        assert_eq!(block_on(t.read_version()), Ok(0x0102));
    }
}
