//! Simple servo sweep demo.
//!
//! Sweeps an SG90 on BCM pin 18 (board pin 12) back and forth, then
//! recentres it and prints a diagnostic summary. Needs a running
//! pigpio setup on the Pi:
//!
//! ```bash
//! cargo run --example sweep --features pigpio
//! ```
//!
//! Power the servo from a separate supply, not the Pi's 5V header.

use log::info;
use pigpio_servo::{PigpioBackend, PinNumbering, Servo, ServoProfile};

fn main() -> pigpio_servo::Result<()> {
    env_logger::init();

    let backend = PigpioBackend::connect()?;
    let mut servo = Servo::new(backend, ServoProfile::sg90(), 18, PinNumbering::Bcm, false)?;

    info!("starting sweep");
    for target in [-60.0, 60.0, -60.0, 60.0, 0.0] {
        servo.move_to(target)?;
    }

    println!("{}", servo.summary());
    Ok(())
}
