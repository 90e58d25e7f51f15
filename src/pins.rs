//! Pin numbering tables for the Raspberry Pi 40-pin header.
//!
//! Two numbering schemes exist for the same physical board: the
//! position on the header (board numbering, 1..=40) and the BCM GPIO
//! number the SoC uses. The pigpio daemon wants BCM numbers, so the
//! controller resolves board positions through [`BOARD_TO_BCM`] and
//! then checks PWM capability against [`PWM_PINS_BCM`].

use crate::error::{Error, Result};

/// Which numbering scheme a pin argument is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinNumbering {
    /// Physical position on the 40-pin header (1..=40).
    Board,
    /// BCM GPIO number, used directly.
    Bcm,
}

/// Board position to BCM GPIO number. Index is the physical pin;
/// index 0 is unused, `None` marks power, ground, and the reserved
/// ID EEPROM pins (27/28).
pub const BOARD_TO_BCM: [Option<u8>; 41] = [
    None,     // no pin 0
    None,     // 1: 3.3V
    None,     // 2: 5V
    Some(2),  // 3
    None,     // 4: 5V
    Some(3),  // 5
    None,     // 6: GND
    Some(4),  // 7
    Some(14), // 8
    None,     // 9: GND
    Some(15), // 10
    Some(17), // 11
    Some(18), // 12
    Some(27), // 13
    None,     // 14: GND
    Some(22), // 15
    Some(23), // 16
    None,     // 17: 3.3V
    Some(24), // 18
    Some(10), // 19
    None,     // 20: GND
    Some(9),  // 21
    Some(25), // 22
    Some(11), // 23
    Some(8),  // 24
    None,     // 25: GND
    Some(7),  // 26
    None,     // 27: ID_SD (reserved)
    None,     // 28: ID_SC (reserved)
    Some(5),  // 29
    None,     // 30: GND
    Some(6),  // 31
    Some(12), // 32
    Some(13), // 33
    None,     // 34: GND
    Some(19), // 35
    Some(16), // 36
    Some(26), // 37
    Some(20), // 38
    None,     // 39: GND
    Some(21), // 40
];

/// BCM pins wired to the hardware PWM channels.
pub const PWM_PINS_BCM: [u8; 4] = [12, 13, 18, 19];

/// Looks up the BCM number for a physical header position.
pub fn board_to_bcm(board_pin: u8) -> Option<u8> {
    BOARD_TO_BCM.get(board_pin as usize).copied().flatten()
}

/// Whether a BCM pin supports PWM output.
pub fn is_pwm_capable(bcm_pin: u8) -> bool {
    PWM_PINS_BCM.contains(&bcm_pin)
}

/// Resolves a pin argument to a BCM number and checks it is
/// PWM-capable. Errors report both the input and the resolved value.
pub fn resolve_pwm_pin(pin: u8, numbering: PinNumbering) -> Result<u8> {
    let bcm = match numbering {
        PinNumbering::Board => {
            board_to_bcm(pin).ok_or(Error::UnknownBoardPin { requested: pin })?
        }
        PinNumbering::Bcm => pin,
    };
    if !is_pwm_capable(bcm) {
        return Err(Error::NotPwmCapable {
            requested: pin,
            resolved: bcm,
        });
    }
    Ok(bcm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn board_12_is_bcm_18() {
        assert_eq!(board_to_bcm(12), Some(18));
        assert_eq!(resolve_pwm_pin(12, PinNumbering::Board).unwrap(), 18);
    }

    #[test]
    fn power_pins_do_not_resolve() {
        assert_eq!(board_to_bcm(1), None);
        assert_eq!(board_to_bcm(6), None);
        let err = resolve_pwm_pin(6, PinNumbering::Board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn non_pwm_gpio_is_rejected() {
        // board 11 is BCM 17, a plain GPIO
        let err = resolve_pwm_pin(11, PinNumbering::Board).unwrap_err();
        match err {
            Error::NotPwmCapable {
                requested,
                resolved,
            } => {
                assert_eq!(requested, 11);
                assert_eq!(resolved, 17);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bcm_numbering_is_used_directly() {
        assert_eq!(resolve_pwm_pin(19, PinNumbering::Bcm).unwrap(), 19);
        assert!(resolve_pwm_pin(4, PinNumbering::Bcm).is_err());
    }

    #[test]
    fn all_pwm_pins_appear_on_the_header() {
        for bcm in PWM_PINS_BCM {
            assert!(BOARD_TO_BCM.contains(&Some(bcm)));
        }
    }
}
