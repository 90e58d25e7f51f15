//! Conversion and estimation functions for servo movement.
//! These functions are independent of `ServoProfile` and can be tested in isolation.

use std::time::Duration;

/// Inflation applied to travel-time estimates when the current
/// position is known, to cover acceleration and deceleration the
/// linear model leaves out.
pub const TRAVEL_SAFETY_FACTOR: f64 = 1.2;

/// Maps a position in degrees to a pulse width in microseconds.
///
/// # Arguments
///
/// * `degrees` - Target position, signed, 0 at the centre of travel
/// * `max_travel_degrees` - Total mechanical sweep of the servo
/// * `pulse_min_us` - Pulse width at one end of travel
/// * `pulse_max_us` - Pulse width at the other end of travel
///
/// # Returns
///
/// Pulse width in microseconds. The map is linear with slope
/// `(pulse_max_us - pulse_min_us) / max_travel_degrees`; 0 degrees
/// lands on the midpoint of the pulse range. The result is not
/// clamped, so out-of-travel inputs map outside the pulse range.
pub fn degrees_to_pulse_us(
    degrees: f64,
    max_travel_degrees: f64,
    pulse_min_us: f64,
    pulse_max_us: f64,
) -> f64 {
    // shift into [0, max_travel], then interpolate
    let shifted = degrees + max_travel_degrees / 2.0;
    pulse_min_us + (pulse_max_us - pulse_min_us) * (shifted / max_travel_degrees)
}

/// Estimates how long the servo needs to reach `target` degrees.
///
/// With no known current position the estimate is the worst case, a
/// full sweep at the servo's angular speed. Otherwise it is the linear
/// travel time inflated by [`TRAVEL_SAFETY_FACTOR`].
pub fn estimated_travel_time(
    current: Option<f64>,
    target: f64,
    seconds_per_degree: f64,
    max_travel_degrees: f64,
) -> Duration {
    let seconds = match current {
        None => max_travel_degrees * seconds_per_degree,
        Some(position) => {
            TRAVEL_SAFETY_FACTOR * (target - position).abs() * seconds_per_degree
        }
    };
    Duration::from_secs_f64(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn zero_degrees_is_the_pulse_midpoint() {
        let pulse = degrees_to_pulse_us(0.0, 180.0, 1000.0, 2000.0);
        assert!((pulse - 1500.0).abs() < EPS);
    }

    #[test]
    fn endpoints_map_exactly_onto_the_bounds() {
        assert!((degrees_to_pulse_us(-90.0, 180.0, 1000.0, 2000.0) - 1000.0).abs() < EPS);
        assert!((degrees_to_pulse_us(90.0, 180.0, 1000.0, 2000.0) - 2000.0).abs() < EPS);
    }

    #[test]
    fn conversion_is_linear_in_degrees() {
        let slope = (2000.0 - 1000.0) / 180.0;
        let mut degrees = -90.0;
        while degrees <= 90.0 {
            let pulse = degrees_to_pulse_us(degrees, 180.0, 1000.0, 2000.0);
            let expected = 1500.0 + slope * degrees;
            assert!((pulse - expected).abs() < EPS, "at {degrees} degrees");
            assert!((1000.0 - EPS..=2000.0 + EPS).contains(&pulse));
            degrees += 7.5;
        }
    }

    #[test]
    fn out_of_travel_degrees_map_outside_the_bounds() {
        assert!(degrees_to_pulse_us(91.0, 180.0, 1000.0, 2000.0) > 2000.0);
        assert!(degrees_to_pulse_us(-91.0, 180.0, 1000.0, 2000.0) < 1000.0);
    }

    #[test]
    fn unknown_position_assumes_a_full_sweep() {
        let t = estimated_travel_time(None, 0.0, 1.0 / 90.0, 180.0);
        assert!((t.as_secs_f64() - 2.0).abs() < EPS);
    }

    #[test]
    fn known_position_uses_the_inflated_linear_estimate() {
        let t = estimated_travel_time(Some(0.0), 90.0, 1.0 / 90.0, 180.0);
        assert!((t.as_secs_f64() - 1.2).abs() < EPS);
        // direction does not matter
        let back = estimated_travel_time(Some(90.0), 0.0, 1.0 / 90.0, 180.0);
        assert_eq!(t, back);
    }

    #[test]
    fn zero_distance_needs_zero_time() {
        let t = estimated_travel_time(Some(30.0), 30.0, 1.0 / 90.0, 180.0);
        assert_eq!(t, Duration::ZERO);
    }
}
