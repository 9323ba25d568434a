//! Low-level register driver.
//!
//! Implements the I2C register primitives used by the Qwiic Twist firmware:
//! a one-byte register pointer followed by little-endian data.
//!
//! This module is crate-private — consumers interact with [`QwiicTwist`]
//! in `twist.rs` instead.
//!
//! [`QwiicTwist`]: crate::QwiicTwist

use embedded_hal_async::i2c::I2c;

use crate::error::TwistError;

/// Low-level register driver.
///
/// Owns an I2C peripheral and the device address it talks to.
pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    /// Create a new register driver.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (typically 0x3F)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Typed read helpers
    // -----------------------------------------------------------------------

    /// Read a single byte register.
    pub async fn read_u8(&mut self, register: u8) -> Result<u8, TwistError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buf).await?;
        Ok(buf[0])
    }

    /// Read a 16-bit unsigned register (little-endian on the wire).
    pub async fn read_u16(&mut self, register: u8) -> Result<u16, TwistError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut buf).await?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a 16-bit signed register (little-endian on the wire).
    pub async fn read_i16(&mut self, register: u8) -> Result<i16, TwistError<I2C::Error>> {
        Ok(self.read_u16(register).await? as i16)
    }

    // -----------------------------------------------------------------------
    // Typed write helpers
    // -----------------------------------------------------------------------

    /// Write a single byte register.
    pub async fn write_u8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), TwistError<I2C::Error>> {
        self.i2c.write(self.address, &[register, value]).await?;
        Ok(())
    }

    /// Write a 16-bit register as `[register, lsb, msb]` in one transaction.
    pub async fn write_u16(
        &mut self,
        register: u8,
        value: u16,
    ) -> Result<(), TwistError<I2C::Error>> {
        let bytes = value.to_le_bytes();
        self.i2c
            .write(self.address, &[register, bytes[0], bytes[1]])
            .await?;
        Ok(())
    }

    pub async fn write_i16(
        &mut self,
        register: u8,
        value: i16,
    ) -> Result<(), TwistError<I2C::Error>> {
        self.write_u16(register, value as u16).await
    }

    /// Write three consecutive byte registers starting at `register`.
    pub async fn write_u8x3(
        &mut self,
        register: u8,
        values: [u8; 3],
    ) -> Result<(), TwistError<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, values[0], values[1], values[2]])
            .await?;
        Ok(())
    }

    /// Read three consecutive byte registers starting at `register`.
    pub async fn read_u8x3(&mut self, register: u8) -> Result<[u8; 3], TwistError<I2C::Error>> {
        let mut buf = [0u8; 3];
        self.i2c.write_read(self.address, &[register], &mut buf).await?;
        Ok(buf)
    }
}
