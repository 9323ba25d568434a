//! GPIO lines wired to the ProDriver header.

use embedded_hal::digital::{InputPin, OutputPin};

/// The seven GPIO lines the driver controls.
///
/// Each line is moved in by value, so two roles can never share a pin.
///
/// In clock-in mode the MODE pins change role once the IC has booted:
///
/// | pin   | boot      | clock-in run |
/// |-------|-----------|--------------|
/// | mode0 | MODE0     | UP-DW        |
/// | mode1 | MODE1     | SET_EN       |
/// | mode2 | MODE2     | CLK          |
/// | mode3 | MODE3     | CW-CCW       |
pub struct ProDriverPins<O, I> {
    pub mode0: O,
    pub mode1: O,
    pub mode2: O,
    pub mode3: O,
    /// EN, active high. The board's pull-down disables the IC when low.
    pub enable: O,
    /// STBY, active low.
    pub standby: O,
    /// ERR, active low, open-drain from the IC.
    pub error: I,
}

impl<O, I> ProDriverPins<O, I>
where
    O: OutputPin,
    I: InputPin,
{
    pub(crate) fn mode_pins(&mut self) -> [&mut O; 4] {
        [&mut self.mode0, &mut self.mode1, &mut self.mode2, &mut self.mode3]
    }

    pub(crate) fn up_dw(&mut self) -> &mut O {
        &mut self.mode0
    }

    pub(crate) fn set_en(&mut self) -> &mut O {
        &mut self.mode1
    }

    pub(crate) fn clk(&mut self) -> &mut O {
        &mut self.mode2
    }

    pub(crate) fn cw_ccw(&mut self) -> &mut O {
        &mut self.mode3
    }
}
