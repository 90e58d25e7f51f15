//! Servo controller implementation.
//!
//! This module provides the [`Servo`] struct for driving a hobby servo
//! through a [`PwmBackend`], and the [`ServoSummary`] diagnostic view.

use std::fmt;
use std::path::Path;
use std::thread;

use log::{debug, info};
use serde::Serialize;

use crate::backend::PwmBackend;
use crate::error::{Error, Result};
use crate::pins::{self, PinNumbering};
use crate::servo_config::ServoProfile;
use crate::utils;

/// Controller for one servo on one PWM-capable pin.
///
/// Movement is open loop: there is no position sensor, so after each
/// write the controller sleeps for an estimated travel time and then
/// assumes the move completed. The tracked position is the
/// controller's belief, not a measurement.
///
/// The API is synchronous and blocking; there is no internal locking.
/// Sharing one instance across threads requires external
/// synchronisation by the caller.
#[derive(Debug)]
pub struct Servo<B: PwmBackend> {
    backend: B,
    /// Resolved BCM pin number.
    pin: u8,
    profile: ServoProfile,
    /// Believed position in degrees, `None` until the first move
    /// completes.
    current_position: Option<f64>,
    /// When set, hardware writes and travel sleeps are skipped but the
    /// believed position still updates.
    debug_mode: bool,
}

impl<B: PwmBackend> Servo<B> {
    /// Creates a controller and moves the servo to its centre position.
    ///
    /// The reset move is the last construction step, so a freshly
    /// constructed controller has a known position. It writes to the
    /// backend and sleeps for the worst-case full-sweep travel time,
    /// unless `debug_mode` is set.
    ///
    /// # Arguments
    ///
    /// * `backend` - PWM connection, owned by this controller (pass a
    ///   `&mut` reference to share one connection between controllers)
    /// * `profile` - Characteristics of the attached servo model
    /// * `pin` - Pin number, interpreted per `numbering`
    /// * `numbering` - Whether `pin` is a board position or a BCM number
    /// * `debug_mode` - Dry-run mode: no writes, no sleeps
    pub fn new(
        backend: B,
        profile: ServoProfile,
        pin: u8,
        numbering: PinNumbering,
        debug_mode: bool,
    ) -> Result<Self> {
        let bcm = pins::resolve_pwm_pin(pin, numbering)?;
        Self::with_resolved_pin(backend, profile, bcm, debug_mode)
    }

    /// Like [`new`](Self::new), loading the profile from a JSON file.
    ///
    /// The pin is resolved and validated before the profile is read.
    pub fn from_profile_path(
        backend: B,
        profile_path: impl AsRef<Path>,
        pin: u8,
        numbering: PinNumbering,
        debug_mode: bool,
    ) -> Result<Self> {
        let bcm = pins::resolve_pwm_pin(pin, numbering)?;
        let profile = ServoProfile::from_path(profile_path)?;
        Self::with_resolved_pin(backend, profile, bcm, debug_mode)
    }

    fn with_resolved_pin(
        backend: B,
        profile: ServoProfile,
        bcm: u8,
        debug_mode: bool,
    ) -> Result<Self> {
        info!("initializing {} servo on GPIO {bcm} (BCM)", profile.model);
        debug!("loaded profile: {profile:?}");
        info!(
            "angular speed: {}s/deg ({}s / 90deg)",
            profile.seconds_per_degree(),
            90.0 * profile.seconds_per_degree()
        );

        let mut servo = Self {
            backend,
            pin: bcm,
            profile,
            current_position: None,
            debug_mode,
        };
        info!("moving to start position");
        servo.reset_position()?;
        Ok(servo)
    }

    /// Moves the servo to `degrees`, signed, 0 at the centre of travel.
    ///
    /// Computes the pulse width, rejects targets mapping outside the
    /// profile's pulse range before anything is written, then issues
    /// one backend write and blocks for the estimated travel time.
    /// On success the believed position becomes `degrees`; on error it
    /// is left unchanged. In debug mode the write and the sleep are
    /// skipped but the position still updates.
    pub fn move_to(&mut self, degrees: f64) -> Result<()> {
        let pulse_us = utils::degrees_to_pulse_us(
            degrees,
            self.profile.max_travel_degrees,
            self.profile.pwm_min_us,
            self.profile.pwm_max_us,
        );
        if pulse_us < self.profile.pwm_min_us || pulse_us > self.profile.pwm_max_us {
            return Err(Error::PositionOutOfRange {
                degrees,
                pulse_us,
                min_us: self.profile.pwm_min_us,
                max_us: self.profile.pwm_max_us,
            });
        }

        let travel = utils::estimated_travel_time(
            self.current_position,
            degrees,
            self.profile.seconds_per_degree(),
            self.profile.max_travel_degrees,
        );
        let from = match self.current_position {
            Some(position) => format!("{position:+}"),
            None => "unknown".to_string(),
        };
        info!(
            "moving position: {from} -> {degrees:+} (PWM pulse width {pulse_us}us), \
             travel time expectation: {}s",
            travel.as_secs_f64()
        );

        if !self.debug_mode {
            self.backend.set_pulse_width(self.pin, pulse_us)?;
            // open loop: assume the move completed after the estimate
            thread::sleep(travel);
        }

        self.current_position = Some(degrees);
        Ok(())
    }

    /// Moves the servo back to its centre position.
    pub fn reset_position(&mut self) -> Result<()> {
        self.move_to(0.0)
    }

    /// Believed position in degrees, `None` before the first move.
    pub fn current_position(&self) -> Option<f64> {
        self.current_position
    }

    /// Resolved BCM pin this controller drives.
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Profile of the attached servo.
    pub fn profile(&self) -> &ServoProfile {
        &self.profile
    }

    /// Whether dry-run mode is active.
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Shared access to the PWM backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Exclusive access to the PWM backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Read-only diagnostic snapshot of this controller.
    pub fn summary(&self) -> ServoSummary {
        ServoSummary {
            model: self.profile.model.clone(),
            pwm_min_us: self.profile.pwm_min_us,
            pwm_max_us: self.profile.pwm_max_us,
            max_travel_degrees: self.profile.max_travel_degrees,
            speed_degrees_per_second: self.profile.speed_degrees_per_second(),
            current_position: self.current_position,
        }
    }
}

/// Human-readable snapshot of a [`Servo`], for diagnostics.
///
/// `Display` renders it as pretty-printed JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServoSummary {
    /// Model identifier from the profile.
    #[serde(rename = "Servo Model")]
    pub model: String,
    /// Smallest supported pulse width in microseconds.
    #[serde(rename = "PWM Min Width (us)")]
    pub pwm_min_us: f64,
    /// Largest supported pulse width in microseconds.
    #[serde(rename = "PWM Max Width (us)")]
    pub pwm_max_us: f64,
    /// Total mechanical sweep in degrees.
    #[serde(rename = "Servo Max Travel (deg)")]
    pub max_travel_degrees: f64,
    /// Angular speed in degrees per second.
    #[serde(rename = "Servo Speed (deg/s)")]
    pub speed_degrees_per_second: f64,
    /// Believed position in degrees.
    #[serde(rename = "Current Position")]
    pub current_position: Option<f64>,
}

impl fmt::Display for ServoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
