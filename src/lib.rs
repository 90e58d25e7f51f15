//! This is a small lib for driving hobby servos through the [pigpio](https://abyz.me.uk/rpi/pigpio/)
//! daemon on a Raspberry Pi.
//!
//! A [`Servo`] owns one PWM-capable pin and converts signed positions
//! in degrees (0 at the centre of travel) into pulse widths from its
//! [`ServoProfile`], throttling sequential moves with a conservative
//! travel-time estimate. The hardware is reached through the
//! [`PwmBackend`] trait; enable the `pigpio` feature for the real
//! [`PigpioBackend`] connection.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "pigpio")]
//! # fn example() -> pigpio_servo::Result<()> {
//! use pigpio_servo::{PigpioBackend, PinNumbering, Servo, ServoProfile};
//!
//! let backend = PigpioBackend::connect()?;
//! let mut servo = Servo::new(backend, ServoProfile::sg90(), 18, PinNumbering::Bcm, false)?;
//! servo.move_to(45.0)?;
//! servo.reset_position()?;
//! println!("{}", servo.summary());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod pins;
pub mod servo;
pub mod servo_config;
pub mod utils;

#[cfg(feature = "pigpio")]
pub use backend::PigpioBackend;
pub use backend::PwmBackend;
pub use error::{Error, ErrorKind, Result};
pub use pins::PinNumbering;
pub use servo::{Servo, ServoSummary};
pub use servo_config::ServoProfile;
