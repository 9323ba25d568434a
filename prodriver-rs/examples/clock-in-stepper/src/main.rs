//! Clock-in stepper example
//!
//! Boots the ProDriver in variable 1/2-step mode on the Raspberry Pi Pico 2,
//! then sweeps the motor back and forth, switching to 1/8 step for the
//! return leg.
//!
//! # Wiring
//!
//! | ProDriver | Pico 2 Pin | Notes                          |
//! |-----------|------------|--------------------------------|
//! | STBY      | GP8        | Active-low                     |
//! | EN        | GP7        | Board EN switch set to USER    |
//! | MODE0     | GP6        | UP-DW after boot               |
//! | MODE1     | GP5        | SET_EN after boot              |
//! | MODE2     | GP4        | CLK after boot                 |
//! | MODE3     | GP3        | CW-CCW after boot              |
//! | ERR       | GP2        | Active-low, pull-up enabled    |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use prodriver::{
    ControlMode, Direction, ProDriver, ProDriverPins, ProDriverSettings, StepResolution,
    StepResolutionMode, DEFAULT_CLOCK_DELAY_MS,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// Full steps per revolution of a 1.8° motor.
const STEPS_PER_REV: u16 = 200;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let pins = ProDriverPins {
        mode0: Output::new(p.PIN_6, Level::Low),
        mode1: Output::new(p.PIN_5, Level::Low),
        mode2: Output::new(p.PIN_4, Level::Low),
        mode3: Output::new(p.PIN_3, Level::Low),
        enable: Output::new(p.PIN_7, Level::Low),
        standby: Output::new(p.PIN_8, Level::Low),
        error: Input::new(p.PIN_2, Pull::Up),
    };

    let settings = ProDriverSettings::new(ControlMode::ClockIn, StepResolutionMode::VariableHalf);
    let mut driver = ProDriver::new(pins, Delay, settings);

    if let Err(e) = driver.begin() {
        error!("ProDriver boot failed: {}", e);
        return;
    }

    // Leave standby and energise the outputs.
    unwrap!(driver.standby_off());
    unwrap!(driver.enable());
    info!("ProDriver ready: {}", driver.settings());

    loop {
        // Half stepping: 2 clocks per full step.
        if let Err(e) = driver.change_step_resolution(StepResolution::Half) {
            error!("Resolution change failed: {}", e);
        }
        if let Err(e) = driver.step(STEPS_PER_REV * 2, Direction::Clockwise, DEFAULT_CLOCK_DELAY_MS) {
            error!("Forward sweep stopped: {}", e);
            break;
        }

        Timer::after(Duration::from_millis(500)).await;

        // Eighth stepping: 8 clocks per full step, faster clock.
        if let Err(e) = driver.change_step_resolution(StepResolution::Eighth) {
            error!("Resolution change failed: {}", e);
        }
        if let Err(e) = driver.step(STEPS_PER_REV * 8, Direction::CounterClockwise, 1) {
            error!("Return sweep stopped: {}", e);
            break;
        }

        Timer::after(Duration::from_millis(500)).await;
    }

    // Fault: de-energise and park in standby.
    let _ = driver.disable();
    let _ = driver.standby_on();
    warn!("Motor parked after fault");
}
