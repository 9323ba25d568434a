//! Configuration record for the ProDriver.
//!
//! [`ProDriverSettings`] holds the control mode and step resolution the IC
//! is booted into, plus the driver's cached view of the EN and STBY lines.

/// How the TC78H670FTG receives motion commands. Latched when standby is
/// released during [`control_mode_select`](crate::ProDriver::control_mode_select).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    /// Step/direction pulse train on the CLK and CW-CCW pins.
    #[default]
    ClockIn,
    /// Bit-shifted configuration words. All MODE pins are held low at boot.
    Serial,
}

/// Step resolution the IC boots into in clock-in mode.
///
/// The discriminant is the 4-bit pattern presented on MODE3..MODE0 (bit 0
/// on MODE0). Variable modes allow [`change_step_resolution`] afterwards;
/// fixed modes lock the resolution until the next boot.
///
/// [`change_step_resolution`]: crate::ProDriver::change_step_resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StepResolutionMode {
    VariableHalf = 1,
    VariableQuarter = 2,
    VariableEighth = 3,
    VariableSixteenth = 4,
    VariableThirtySecond = 5,
    VariableSixtyFourth = 6,
    VariableOneTwentyEighth = 7,
    #[default]
    FixedFull = 8,
    FixedHalf = 9,
    FixedQuarter = 10,
    FixedEighth = 11,
    FixedSixteenth = 12,
    FixedThirtySecond = 13,
    FixedSixtyFourth = 14,
    FixedOneTwentyEighth = 15,
}

impl StepResolutionMode {
    /// MODE pin bit pattern.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Level for MODE pin `pin` (0..=3).
    pub const fn mode_pin_level(self, pin: u8) -> bool {
        (self.code() >> pin) & 1 == 1
    }

    pub const fn is_variable(self) -> bool {
        self.code() < StepResolutionMode::FixedFull.code()
    }

    /// Resolution the IC runs at right after booting into this mode.
    pub const fn initial_resolution(self) -> StepResolution {
        use StepResolution::*;
        match self {
            StepResolutionMode::FixedFull => Full,
            StepResolutionMode::VariableHalf | StepResolutionMode::FixedHalf => Half,
            StepResolutionMode::VariableQuarter | StepResolutionMode::FixedQuarter => Quarter,
            StepResolutionMode::VariableEighth | StepResolutionMode::FixedEighth => Eighth,
            StepResolutionMode::VariableSixteenth | StepResolutionMode::FixedSixteenth => Sixteenth,
            StepResolutionMode::VariableThirtySecond | StepResolutionMode::FixedThirtySecond => {
                ThirtySecond
            }
            StepResolutionMode::VariableSixtyFourth | StepResolutionMode::FixedSixtyFourth => {
                SixtyFourth
            }
            StepResolutionMode::VariableOneTwentyEighth
            | StepResolutionMode::FixedOneTwentyEighth => OneTwentyEighth,
        }
    }
}

/// Active step resolution, expressed by the divisor of a full step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StepResolution {
    #[default]
    Full = 1,
    Half = 2,
    Quarter = 4,
    Eighth = 8,
    Sixteenth = 16,
    ThirtySecond = 32,
    SixtyFourth = 64,
    OneTwentyEighth = 128,
}

impl StepResolution {
    /// Microsteps per full step.
    pub const fn divisor(self) -> u8 {
        self as u8
    }

    /// Position on the power-of-two ladder (Full = 0, 1/128 = 7). One CLK
    /// pulse with SET_EN high moves one rung.
    pub const fn rung(self) -> u8 {
        self.divisor().trailing_zeros() as u8
    }
}

/// Settings applied by [`begin`](crate::ProDriver::begin).
///
/// Write the desired `control_mode` and `step_resolution_mode` before
/// calling `begin()`. The remaining fields track driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProDriverSettings {
    pub control_mode: ControlMode,
    /// Only used in clock-in mode, otherwise ignored.
    pub step_resolution_mode: StepResolutionMode,
    /// Active resolution within the bounds set by `step_resolution_mode`.
    pub step_resolution: StepResolution,
    /// Cached EN line level, used to skip redundant writes.
    pub enable_status: bool,
    /// Cached standby state (`true` = STBY held low).
    pub standby_status: bool,
}

impl ProDriverSettings {
    pub const fn new(control_mode: ControlMode, step_resolution_mode: StepResolutionMode) -> Self {
        Self {
            control_mode,
            step_resolution_mode,
            step_resolution: step_resolution_mode.initial_resolution(),
            enable_status: false,
            standby_status: true,
        }
    }
}

impl Default for ProDriverSettings {
    fn default() -> Self {
        Self::new(ControlMode::ClockIn, StepResolutionMode::FixedFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_codes_span_one_to_fifteen() {
        assert_eq!(StepResolutionMode::VariableHalf.code(), 1);
        assert_eq!(StepResolutionMode::FixedFull.code(), 8);
        assert_eq!(StepResolutionMode::FixedOneTwentyEighth.code(), 15);
    }

    #[test]
    fn only_codes_below_eight_are_variable() {
        assert!(StepResolutionMode::VariableOneTwentyEighth.is_variable());
        assert!(!StepResolutionMode::FixedFull.is_variable());
        assert!(!StepResolutionMode::FixedOneTwentyEighth.is_variable());
    }

    #[test]
    fn mode_pin_levels_follow_code_bits() {
        // FixedEighth = 11 = 0b1011
        let mode = StepResolutionMode::FixedEighth;
        assert!(mode.mode_pin_level(0));
        assert!(mode.mode_pin_level(1));
        assert!(!mode.mode_pin_level(2));
        assert!(mode.mode_pin_level(3));
    }

    #[test]
    fn initial_resolution_matches_mode_name() {
        assert_eq!(StepResolutionMode::FixedFull.initial_resolution(), StepResolution::Full);
        assert_eq!(
            StepResolutionMode::VariableSixteenth.initial_resolution(),
            StepResolution::Sixteenth
        );
        assert_eq!(
            StepResolutionMode::FixedOneTwentyEighth.initial_resolution(),
            StepResolution::OneTwentyEighth
        );
    }

    #[test]
    fn rungs_are_log2_of_divisor() {
        assert_eq!(StepResolution::Full.rung(), 0);
        assert_eq!(StepResolution::Eighth.rung(), 3);
        assert_eq!(StepResolution::OneTwentyEighth.rung(), 7);
        assert_eq!(StepResolution::SixtyFourth.divisor(), 64);
    }

    #[test]
    fn default_settings_boot_clock_in_full_step_in_standby() {
        let s = ProDriverSettings::default();
        assert_eq!(s.control_mode, ControlMode::ClockIn);
        assert_eq!(s.step_resolution_mode, StepResolutionMode::FixedFull);
        assert_eq!(s.step_resolution, StepResolution::Full);
        assert!(!s.enable_status);
        assert!(s.standby_status);
    }
}
