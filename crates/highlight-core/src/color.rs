//! Highlight colour parsing

use lopdf::Object;
use serde::{Deserialize, Serialize};

use crate::error::HighlightError;

/// RGB colour with components in the 0-1 range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const YELLOW: RgbColor = RgbColor {
        r: 1.0,
        g: 1.0,
        b: 0.0,
    };

    /// Parse `#RRGGBB` (or `RRGGBB`). Only the first six hex digits are read.
    pub fn from_hex(color: &str) -> Result<Self, HighlightError> {
        let invalid = || HighlightError::InvalidColor(color.to_string());

        let hex = color.trim().trim_start_matches('#');
        let digits = hex
            .get(0..6)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(invalid)?;

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn components(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// PDF colour array `[r g b]`
    pub fn to_object(&self) -> Object {
        Object::Array(self.components().into_iter().map(Object::Real).collect())
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::YELLOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parses_with_and_without_hash() {
        assert_eq!(RgbColor::from_hex("#FF0000").unwrap(), RgbColor { r: 1.0, g: 0.0, b: 0.0 });
        assert_eq!(RgbColor::from_hex("00ff00").unwrap(), RgbColor { r: 0.0, g: 1.0, b: 0.0 });
        assert_eq!(RgbColor::from_hex("#FFFF00").unwrap(), RgbColor::YELLOW);
    }

    #[test]
    fn test_extra_digits_are_ignored() {
        assert_eq!(RgbColor::from_hex("#0000FFAA").unwrap(), RgbColor { r: 0.0, g: 0.0, b: 1.0 });
    }

    #[test]
    fn test_rejects_short_or_non_hex() {
        for bad in ["", "#", "#FFF", "#FFFFF", "#GG0000", "#12 456", "#ééé"] {
            assert!(
                matches!(RgbColor::from_hex(bad), Err(HighlightError::InvalidColor(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    proptest! {
        #[test]
        fn components_stay_in_unit_range(r: u8, g: u8, b: u8) {
            let color = RgbColor::from_hex(&format!("#{:02x}{:02X}{:02x}", r, g, b)).unwrap();
            prop_assert!((color.r - r as f32 / 255.0).abs() < 1e-6);
            prop_assert!((color.g - g as f32 / 255.0).abs() < 1e-6);
            prop_assert!((color.b - b as f32 / 255.0).abs() < 1e-6);
        }
    }
}
