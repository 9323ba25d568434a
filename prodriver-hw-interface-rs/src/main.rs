//! prodriver-hw-interface
//!
//! Qwiic Twist → ProDriver integration firmware for the Raspberry Pi Pico 2.
//! Turning the knob jogs the stepper motor:
//!
//! 1. The Twist is turned and pulls its INT pin low.
//! 2. The firmware reads and clears the tick difference.
//! 3. Each tick becomes `STEPS_PER_TICK` clock-in steps in the matching
//!    direction on the ProDriver.
//! 4. Clicking the knob toggles the motor outputs on and off; the LED shows
//!    green when energised, blue when idle and red after a driver fault.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use prodriver::{
    ControlMode, Direction, ProDriver, ProDriverError, ProDriverPins, ProDriverSettings,
    StepResolutionMode, DEFAULT_CLOCK_DELAY_MS,
};
use twist_encoder::{Color, QwiicTwist, DEFAULT_ADDRESS};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the I2C0 peripheral interrupt to Embassy's async handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Clock-in steps per encoder detent (1/8 stepping: 8 = one full step).
const STEPS_PER_TICK: u16 = 8;

const LED_ENERGISED: Color = Color::new(0, 64, 0);
const LED_IDLE: Color = Color::new(0, 0, 64);
const LED_FAULT: Color = Color::new(128, 0, 0);

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

type Driver = ProDriver<Output<'static>, Input<'static>, Delay>;
type Twist = QwiicTwist<I2c<'static, I2C0, i2c::Async>>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert a signed tick count into a direction and step count.
fn ticks_to_steps(diff: i16) -> (Direction, u16) {
    let direction = if diff >= 0 {
        Direction::Clockwise
    } else {
        Direction::CounterClockwise
    };
    let steps = diff.unsigned_abs().saturating_mul(STEPS_PER_TICK);
    (direction, steps)
}

/// Flip the motor between energised and idle, returning the new LED colour.
fn toggle_outputs(driver: &mut Driver) -> Result<Color, ProDriverError> {
    if driver.settings().enable_status {
        driver.disable()?;
        driver.standby_on()?;
        Ok(LED_IDLE)
    } else {
        driver.standby_off()?;
        driver.enable()?;
        Ok(LED_ENERGISED)
    }
}

async fn show(twist: &mut Twist, colour: Color) {
    if let Err(_) = twist.set_color(colour).await {
        warn!("Failed to update Twist LED");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("prodriver-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // I2C_SDA   → GP20  (p.PIN_20)
    // I2C_SCL   → GP21  (p.PIN_21)
    // TWIST_INT → GP19  (p.PIN_19)  active-low, pull-up enabled
    // STBY      → GP8   EN → GP7
    // MODE0..3  → GP6, GP5, GP4, GP3
    // ERR       → GP2   active-low, pull-up enabled
    // ———————————————————————————————————————————————————————————————————————

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );
    let mut twist: Twist = QwiicTwist::new(i2c, DEFAULT_ADDRESS);
    let mut int_pin = Input::new(p.PIN_19, Pull::Up);

    let pins = ProDriverPins {
        mode0: Output::new(p.PIN_6, Level::Low),
        mode1: Output::new(p.PIN_5, Level::Low),
        mode2: Output::new(p.PIN_4, Level::Low),
        mode3: Output::new(p.PIN_3, Level::Low),
        enable: Output::new(p.PIN_7, Level::Low),
        standby: Output::new(p.PIN_8, Level::Low),
        error: Input::new(p.PIN_2, Pull::Up),
    };
    let settings = ProDriverSettings::new(ControlMode::ClockIn, StepResolutionMode::FixedEighth);
    let mut driver: Driver = ProDriver::new(pins, Delay, settings);

    // —— Peripheral initialisation ——————————————————————————————————————————

    if let Err(e) = twist.is_connected().await {
        error!("Qwiic Twist not found: {}", e);
        return;
    }

    // INT fires on knob turns and on button events.
    if let Err(_) = twist.enable_interrupts(true, true).await {
        error!("Failed to enable Twist interrupts");
    }
    // Discard ticks accumulated before the motor was ready.
    let _ = twist.read_diff(true).await;

    match driver.begin() {
        Ok(()) => show(&mut twist, LED_IDLE).await,
        Err(e) => {
            error!("ProDriver boot failed: {}", e);
            show(&mut twist, LED_FAULT).await;
        }
    }

    info!("Ready — click the knob to energise the motor, turn to jog");

    // —— Main loop ——————————————————————————————————————————————————————————

    loop {
        int_pin.wait_for_low().await;

        if let Ok(true) = twist.is_clicked().await {
            match toggle_outputs(&mut driver) {
                Ok(colour) => show(&mut twist, colour).await,
                Err(e) => {
                    error!("Toggle failed: {}", e);
                    show(&mut twist, LED_FAULT).await;
                }
            }
        }

        let diff = match twist.read_diff(true).await {
            Ok(d) => d,
            Err(e) => {
                error!("Twist read failed: {}", e);
                let _ = twist.is_moved().await;
                continue;
            }
        };

        // Reading the status flags lets INT go back high.
        let _ = twist.is_moved().await;
        let _ = twist.is_pressed().await;

        if diff == 0 || !driver.settings().enable_status {
            continue;
        }

        let (direction, steps) = ticks_to_steps(diff);
        debug!("Jog {} steps {}", steps, direction);

        if let Err(e) = driver.step(steps, direction, DEFAULT_CLOCK_DELAY_MS) {
            error!("Stepping stopped: {}", e);
            let _ = driver.disable();
            show(&mut twist, LED_FAULT).await;
        }
    }
}
