//! PWM backend abstraction.
//!
//! The controller only needs one hardware operation: set the servo
//! pulse width on a pin. [`PwmBackend`] captures that seam so the
//! production pigpio connection and test doubles are interchangeable.

use crate::error::Result;

/// Access to a PWM-capable GPIO backend.
///
/// # Implementations
/// - Production: [`PigpioBackend`] (pigpio daemon, `pigpio` feature)
/// - Testing: any in-memory recorder
pub trait PwmBackend {
    /// Sets the servo pulse width on `pin` (BCM numbering) in
    /// microseconds.
    fn set_pulse_width(&mut self, pin: u8, pulse_us: f64) -> Result<()>;
}

/// A `&mut` to a backend is itself a backend, so one connection can be
/// shared by several controllers.
impl<B: PwmBackend + ?Sized> PwmBackend for &mut B {
    fn set_pulse_width(&mut self, pin: u8, pulse_us: f64) -> Result<()> {
        (**self).set_pulse_width(pin, pulse_us)
    }
}

#[cfg(feature = "pigpio")]
pub use self::pigpio::PigpioBackend;

#[cfg(feature = "pigpio")]
mod pigpio {
    use log::{debug, info};
    use rust_pigpio::pwm::*;
    use rust_pigpio::*;

    use super::PwmBackend;
    use crate::error::{Error, Result};

    /// Connection to the pigpio library.
    ///
    /// Initialised once on [`connect`](Self::connect) and terminated
    /// when dropped, so keep at most one per process. Requires pigpio
    /// privileges (typically root) on the Pi.
    pub struct PigpioBackend {
        // pins already switched to OUTPUT mode
        prepared: Vec<u8>,
    }

    impl PigpioBackend {
        /// Initialises pigpio and returns the connection handle.
        pub fn connect() -> Result<Self> {
            let version = initialize().map_err(|e| Error::Backend {
                message: e.to_string(),
            })?;
            info!("pigpio initialized (version {version})");
            Ok(Self {
                prepared: Vec::new(),
            })
        }
    }

    impl PwmBackend for PigpioBackend {
        fn set_pulse_width(&mut self, pin: u8, pulse_us: f64) -> Result<()> {
            if !self.prepared.contains(&pin) {
                set_mode(pin as u32, OUTPUT).map_err(|e| Error::Backend {
                    message: e.to_string(),
                })?;
                self.prepared.push(pin);
            }
            debug!("GPIO {pin}: pulse width {pulse_us}us");
            servo(pin as u32, pulse_us.round() as u32).map_err(|e| Error::Backend {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }

    impl Drop for PigpioBackend {
        fn drop(&mut self) {
            terminate();
        }
    }
}
