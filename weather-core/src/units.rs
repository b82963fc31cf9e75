//! Unit conversion and rounding helpers.

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn converts_kelvin_to_celsius() {
        assert!(approx(kelvin_to_celsius(300.15), 27.0));
        assert!(approx(kelvin_to_celsius(273.15), 0.0));
        assert!(approx(kelvin_to_celsius(0.0), -273.15));
    }

    #[test]
    fn round2_cleans_up_subtraction_noise() {
        // 300.15 - 273.15 is not exactly 27.0 in binary floating point.
        assert_eq!(round2(kelvin_to_celsius(300.15)), 27.0);
        assert_eq!(round2(kelvin_to_celsius(298.15)), 25.0);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert!(approx(round2(26.856), 26.86));
        assert!(approx(round2(-3.14159), -3.14));
        assert!(approx(round2(27.8), 27.8));
    }
}
