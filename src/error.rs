//! Error types for servo configuration and movement.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`], so callers can tell
/// configuration-time failures from movement-time failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad pin selection or an unusable profile. Raised before any
    /// hardware access.
    Configuration,
    /// A requested position maps outside the servo's supported pulse
    /// width range.
    Range,
    /// The PWM backend reported a failure.
    Backend,
}

/// Everything that can go wrong while constructing or moving a servo.
#[derive(Debug)]
pub enum Error {
    /// A board-numbered pin that does not exist on the 40-pin header,
    /// or is a power/ground position.
    UnknownBoardPin {
        /// Physical header position as given by the caller.
        requested: u8,
    },
    /// The resolved BCM pin is not one of the PWM-capable pins.
    NotPwmCapable {
        /// Pin number as given by the caller.
        requested: u8,
        /// BCM number it resolved to.
        resolved: u8,
    },
    /// The profile file could not be read.
    ProfileRead {
        /// Path the profile was loaded from.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The profile file is not valid JSON or is missing required fields.
    ProfileParse {
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The profile parsed, but one of its numeric fields is unusable.
    InvalidProfile {
        /// Name of the offending field, as spelled in the file.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The requested position maps to a pulse width outside the
    /// servo's supported range.
    PositionOutOfRange {
        /// Requested position in degrees.
        degrees: f64,
        /// Pulse width the position maps to, in microseconds.
        pulse_us: f64,
        /// Minimum supported pulse width in microseconds.
        min_us: f64,
        /// Maximum supported pulse width in microseconds.
        max_us: f64,
    },
    /// The PWM backend rejected an operation.
    Backend {
        /// Message reported by the backend.
        message: String,
    },
}

impl Error {
    /// Classifies this error per the taxonomy above.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownBoardPin { .. }
            | Error::NotPwmCapable { .. }
            | Error::ProfileRead { .. }
            | Error::ProfileParse { .. }
            | Error::InvalidProfile { .. } => ErrorKind::Configuration,
            Error::PositionOutOfRange { .. } => ErrorKind::Range,
            Error::Backend { .. } => ErrorKind::Backend,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownBoardPin { requested } => {
                write!(
                    f,
                    "board pin {requested} is not a GPIO position on the 40-pin header"
                )
            }
            Error::NotPwmCapable {
                requested,
                resolved,
            } => {
                write!(
                    f,
                    "specified pin number {requested} (board) -- {resolved} (BCM) \
                     is not a PWM output pin"
                )
            }
            Error::ProfileRead { path, source } => {
                write!(f, "cannot read servo profile {}: {source}", path.display())
            }
            Error::ProfileParse { source } => {
                write!(f, "malformed servo profile: {source}")
            }
            Error::InvalidProfile { field, value } => {
                write!(f, "servo profile field {field} has unusable value {value}")
            }
            Error::PositionOutOfRange {
                degrees,
                pulse_us,
                min_us,
                max_us,
            } => {
                write!(
                    f,
                    "position {degrees} degrees is outside the range of the servo: \
                     it corresponds to a pulse width of {pulse_us}us, while this \
                     servo supports between {min_us}us and {max_us}us"
                )
            }
            Error::Backend { message } => {
                write!(f, "PWM backend error: {message}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ProfileRead { source, .. } => Some(source),
            Error::ProfileParse { source } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::ProfileParse { source }
    }
}
