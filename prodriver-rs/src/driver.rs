//! Pin-level driver for the TC78H670FTG.
//!
//! Every operation is a fixed sequence of pin writes and datasheet delays
//! that ends by sampling the ERR line.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::error::{pin_error, ProDriverError};
use crate::pins::ProDriverPins;
use crate::settings::{ControlMode, ProDriverSettings, StepResolution};
use crate::timing::{CLOCK_PULSE_US, MODE_HOLD_US, MODE_SETUP_US};

/// Rotation direction, driven onto the CW-CCW pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// CW-CCW high: OUT_A leads OUT_B by 90°.
    #[default]
    Clockwise,
    /// CW-CCW low: OUT_B leads OUT_A by 90°.
    CounterClockwise,
}

impl Direction {
    fn level(self) -> PinState {
        match self {
            Direction::Clockwise => PinState::High,
            Direction::CounterClockwise => PinState::Low,
        }
    }
}

/// Driver for the SparkFun ProDriver stepper board.
///
/// Owns the seven GPIO lines and a delay source. Nothing touches the
/// hardware until [`begin`](Self::begin) is called.
///
/// # Example
///
/// ```ignore
/// use prodriver::{Direction, ProDriver, ProDriverSettings, StepResolution, StepResolutionMode, ControlMode};
///
/// let settings = ProDriverSettings::new(ControlMode::ClockIn, StepResolutionMode::VariableHalf);
/// let mut driver = ProDriver::new(pins, delay, settings);
///
/// driver.begin()?;
/// driver.enable()?;
/// driver.standby_off()?;
/// driver.step(200, Direction::Clockwise, 2)?;
/// driver.change_step_resolution(StepResolution::Eighth)?;
/// ```
pub struct ProDriver<O, I, D> {
    pins: ProDriverPins<O, I>,
    delay: D,
    settings: ProDriverSettings,
}

impl<O, I, D> ProDriver<O, I, D>
where
    O: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    pub fn new(pins: ProDriverPins<O, I>, delay: D, settings: ProDriverSettings) -> Self {
        Self {
            pins,
            delay,
            settings,
        }
    }

    /// Construct with [`ProDriverSettings::default`]: clock-in, fixed full step.
    pub fn with_defaults(pins: ProDriverPins<O, I>, delay: D) -> Self {
        Self::new(pins, delay, ProDriverSettings::default())
    }

    pub fn settings(&self) -> &ProDriverSettings {
        &self.settings
    }

    /// Mutable settings. Changes to the control or resolution mode take
    /// effect on the next [`begin`](Self::begin).
    pub fn settings_mut(&mut self) -> &mut ProDriverSettings {
        &mut self.settings
    }

    /// Give back the pins and delay source.
    pub fn release(self) -> (ProDriverPins<O, I>, D) {
        (self.pins, self.delay)
    }

    // -----------------------------------------------------------------------
    // Boot
    // -----------------------------------------------------------------------

    /// Apply the settings: put every line in its idle state, then boot the
    /// IC into the configured control mode.
    ///
    /// Leaves the IC disabled and in standby.
    pub fn begin(&mut self) -> Result<(), ProDriverError> {
        self.pin_setup()?;
        self.control_mode_select()
    }

    /// Drive every output to its idle level: standby held (STBY low),
    /// disabled (EN low) and all MODE pins low.
    pub fn pin_setup(&mut self) -> Result<(), ProDriverError> {
        self.pins.standby.set_low().map_err(pin_error)?;
        self.settings.standby_status = true;

        self.pins.enable.set_low().map_err(pin_error)?;
        self.settings.enable_status = false;

        for pin in self.pins.mode_pins() {
            pin.set_low().map_err(pin_error)?;
        }
        Ok(())
    }

    /// Boot the IC into the configured control mode.
    ///
    /// The MODE pins are sampled when standby is released, so they are set
    /// first, held for TmodeSU, then STBY is pulsed high for TmodeHO. Must be
    /// called with the IC in standby and the motor supply stable.
    pub fn control_mode_select(&mut self) -> Result<(), ProDriverError> {
        match self.settings.control_mode {
            ControlMode::Serial => {
                for pin in self.pins.mode_pins() {
                    pin.set_low().map_err(pin_error)?;
                }
            }
            ControlMode::ClockIn => {
                let mode = self.settings.step_resolution_mode;
                for (bit, pin) in (0u8..).zip(self.pins.mode_pins()) {
                    pin.set_state(PinState::from(mode.mode_pin_level(bit)))
                        .map_err(pin_error)?;
                }
                self.settings.step_resolution = mode.initial_resolution();
            }
        }

        self.delay.delay_us(MODE_SETUP_US);
        self.pins.standby.set_high().map_err(pin_error)?;
        self.delay.delay_us(MODE_HOLD_US);
        self.pins.standby.set_low().map_err(pin_error)?;
        self.settings.standby_status = true;

        // MODE1/MODE2 now act as SET_EN/CLK. Park them at SET_EN low and
        // CLK high while still in standby, so the next CLK edge is a step
        // and not a resolution shift.
        if self.settings.control_mode == ControlMode::ClockIn {
            self.pins.set_en().set_low().map_err(pin_error)?;
            self.pins.clk().set_high().map_err(pin_error)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ProDriver booted: {} / {}",
            self.settings.control_mode,
            self.settings.step_resolution_mode
        );

        self.error_stat()
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    /// Sample the ERR line.
    ///
    /// # Errors
    /// * [`ProDriverError::Fault`] if ERR reads low: thermal shutdown (TSD),
    ///   over-current (ISD) or motor load open (OPD)
    /// * [`ProDriverError::Pin`] if the line cannot be read
    pub fn error_stat(&mut self) -> Result<(), ProDriverError> {
        if self.pins.error.is_high().map_err(pin_error)? {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("ProDriver fault: ERR pin low");

        Err(ProDriverError::Fault)
    }

    // -----------------------------------------------------------------------
    // Clock-in motion
    // -----------------------------------------------------------------------

    /// Step the motor `steps` times in `direction`.
    ///
    /// Each step is one rising edge on CLK followed by `clock_delay_ms` of
    /// settle time. ERR is checked after every step and stepping stops at
    /// the first fault.
    ///
    /// # Errors
    /// * [`ProDriverError::WrongControlMode`] outside clock-in mode
    /// * [`ProDriverError::Fault`] as soon as ERR reads low
    pub fn step(
        &mut self,
        steps: u16,
        direction: Direction,
        clock_delay_ms: u8,
    ) -> Result<(), ProDriverError> {
        self.require_clock_in()?;

        self.pins
            .cw_ccw()
            .set_state(direction.level())
            .map_err(pin_error)?;

        for _ in 0..steps {
            self.pulse_clock()?;
            self.delay.delay_ms(u32::from(clock_delay_ms));
            self.error_stat()?;
        }

        self.error_stat()
    }

    /// Change the step resolution while running.
    ///
    /// With SET_EN high, every CLK rising edge moves the resolution one
    /// power of two: finer with UP-DW low, coarser with UP-DW high. The new
    /// resolution takes effect synchronously with the step clock.
    ///
    /// Requesting the active resolution only samples ERR.
    ///
    /// # Errors
    /// * [`ProDriverError::WrongControlMode`] outside clock-in mode
    /// * [`ProDriverError::FixedResolution`] if booted into a fixed mode and
    ///   `resolution` differs from the active one
    pub fn change_step_resolution(
        &mut self,
        resolution: StepResolution,
    ) -> Result<(), ProDriverError> {
        self.require_clock_in()?;

        let current = self.settings.step_resolution;
        if resolution == current {
            return self.error_stat();
        }

        if !self.settings.step_resolution_mode.is_variable() {
            return Err(ProDriverError::FixedResolution);
        }

        self.pins.clk().set_high().map_err(pin_error)?;
        self.pins.set_en().set_high().map_err(pin_error)?;

        let (up_dw, shifts) = if resolution > current {
            (PinState::Low, resolution.rung() - current.rung())
        } else {
            (PinState::High, current.rung() - resolution.rung())
        };
        self.pins.up_dw().set_state(up_dw).map_err(pin_error)?;

        for _ in 0..shifts {
            self.pulse_clock()?;
            self.delay.delay_us(CLOCK_PULSE_US);
        }

        // SET_EN low stops the IC from sampling UP-DW.
        self.pins.set_en().set_low().map_err(pin_error)?;
        self.settings.step_resolution = resolution;

        self.error_stat()
    }

    fn pulse_clock(&mut self) -> Result<(), ProDriverError> {
        self.pins.clk().set_low().map_err(pin_error)?;
        self.delay.delay_us(CLOCK_PULSE_US);
        self.pins.clk().set_high().map_err(pin_error)
    }

    fn require_clock_in(&self) -> Result<(), ProDriverError> {
        if self.settings.control_mode != ControlMode::ClockIn {
            return Err(ProDriverError::WrongControlMode);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Enable / standby
    // -----------------------------------------------------------------------

    /// Drive EN high. The board's EN switch must be set to USER.
    pub fn enable(&mut self) -> Result<(), ProDriverError> {
        if !self.settings.enable_status {
            self.pins.enable.set_high().map_err(pin_error)?;
            self.settings.enable_status = true;
        }
        self.error_stat()
    }

    /// Drive EN low, de-energising the outputs.
    pub fn disable(&mut self) -> Result<(), ProDriverError> {
        if self.settings.enable_status {
            self.pins.enable.set_low().map_err(pin_error)?;
            self.settings.enable_status = false;
        }
        self.error_stat()
    }

    /// Enter standby (STBY low).
    pub fn standby_on(&mut self) -> Result<(), ProDriverError> {
        if !self.settings.standby_status {
            self.pins.standby.set_low().map_err(pin_error)?;
            self.settings.standby_status = true;
        }
        self.error_stat()
    }

    /// Leave standby (STBY high). The control mode latched by the last
    /// boot is kept.
    pub fn standby_off(&mut self) -> Result<(), ProDriverError> {
        if self.settings.standby_status {
            self.pins.standby.set_high().map_err(pin_error)?;
            self.settings.standby_status = false;
        }
        self.error_stat()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
