//! Simple Qwiic Twist example
//!
//! Demonstrates basic usage of the twist-encoder crate on the Raspberry Pi
//! Pico 2. Waits for the Twist's INT pin to fire, reads the count and the
//! button state, and logs them via defmt. Clicking the knob cycles the LED.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       |                              |
//! | I2C0 SCL  | GP21       |                              |
//! | TWIST INT | GP19       | Active-low, pull-up enabled  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

use twist_encoder::{Color, QwiicTwist, DEFAULT_ADDRESS};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

const PALETTE: [Color; 3] = [
    Color::new(255, 0, 0),
    Color::new(0, 255, 0),
    Color::new(0, 0, 255),
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let mut int_pin = Input::new(p.PIN_19, Pull::Up);

    let mut twist = QwiicTwist::new(i2c, DEFAULT_ADDRESS);

    if let Err(e) = twist.is_connected().await {
        error!("Qwiic Twist not found: {}", e);
        return;
    }

    match twist.read_version().await {
        Ok(v) => info!("Twist firmware {}.{}", v >> 8, v & 0xFF),
        Err(e) => warn!("Version read failed: {}", e),
    }

    twist
        .enable_interrupts(true, true)
        .await
        .expect("Failed to enable Twist interrupts");

    info!("Twist example started — turn or click the knob");

    let mut colour = 0usize;

    loop {
        int_pin.wait_for_low().await;

        match twist.read_diff(true).await {
            Ok(0) => {}
            Ok(diff) => match twist.read_count().await {
                Ok(count) => info!("Moved {} -> count {}", diff, count),
                Err(e) => error!("Count read failed: {}", e),
            },
            Err(e) => error!("Diff read failed: {}", e),
        }

        if let Ok(true) = twist.is_clicked().await {
            colour = (colour + 1) % PALETTE.len();
            if let Err(e) = twist.set_color(PALETTE[colour]).await {
                error!("LED update failed: {}", e);
            }
        }

        // Reading the moved flag releases INT until the next event.
        let _ = twist.is_moved().await;
        let _ = twist.is_pressed().await;
    }
}
