//! RGB color value type with perceptual distance.
//!
//! Re-encoded sources never reproduce colors bit-exactly, so all comparisons
//! in Buscar go through a distance metric rather than equality. The metric is
//! plain Euclidean distance in RGB space, which is enough to separate the
//! saturated reference colors used by seek plans.

use serde::{Deserialize, Serialize};

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Color {
    /// Pure red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pure green
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Pure blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from channel values
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance to another color in RGB space.
    ///
    /// Ranges from 0.0 (identical) to ~441.7 (black vs white).
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dr = f64::from(i32::from(self.r) - i32::from(other.r));
        let dg = f64::from(i32::from(self.g) - i32::from(other.g));
        let db = f64::from(i32::from(self.b) - i32::from(other.b));
        db.mul_add(db, dr.mul_add(dr, dg * dg)).sqrt()
    }

    /// Signed per-channel deltas (`self - other`) as `[r, g, b]`.
    #[must_use]
    pub const fn channel_deltas(self, other: Self) -> [i16; 3] {
        [
            self.r as i16 - other.r as i16,
            self.g as i16 - other.g as i16,
            self.b as i16 - other.b as i16,
        ]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_identical_is_zero() {
        assert!(Color::RED.distance(Color::RED) < f64::EPSILON);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Color::rgb(12, 200, 33);
        let b = Color::rgb(99, 14, 250);
        assert!((a.distance(b) - b.distance(a)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_black_white() {
        let d = Color::BLACK.distance(Color::WHITE);
        assert!((d - (3.0 * 255.0 * 255.0_f64).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_primary_colors_are_well_separated() {
        // RED vs BLUE differ in two channels: sqrt(255^2 + 255^2) ~= 360.6
        let d = Color::RED.distance(Color::BLUE);
        assert!((d - 360.62).abs() < 0.01);
    }

    #[test]
    fn test_channel_deltas_signed() {
        let deltas = Color::rgb(10, 200, 0).channel_deltas(Color::rgb(20, 100, 255));
        assert_eq!(deltas, [-10, 100, -255]);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Color::RED.to_string(), "#FF0000");
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Color::GREEN).unwrap();
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::GREEN);
    }
}
