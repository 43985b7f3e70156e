//! Bridge parameters and fixed model constants

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// Height of the upper deck chord above water level (m)
pub const DECK_HEIGHT: f64 = 78.0;

/// Vertical distance between the upper and lower deck chords (m)
pub const DECK_SECTION_HEIGHT: f64 = 7.62;

/// Height of the main cable low point above the deck (m)
pub const MAIN_CABLE_SAG_OFFSET: f64 = 1.0;

/// Relative tolerance for the whole-segment check
const SEGMENT_TOLERANCE: f64 = 1e-9;

fn default_tower_height() -> f64 {
    230.0
}

fn default_segment_length() -> f64 {
    7.62
}

/// Physical parameters of the generated bridge (lengths in meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeParams {
    /// Distance between the two towers
    pub main_span: f64,
    /// Distance from each tower to its bank
    pub side_span: f64,
    /// Tower height from water level
    #[serde(default = "default_tower_height")]
    pub tower_height: f64,
    /// Length of one deck truss panel
    #[serde(default = "default_segment_length")]
    pub segment_length: f64,
}

impl Default for BridgeParams {
    /// The reference bridge: 1280 m main span, 345 m side spans, 10 m panels
    fn default() -> Self {
        Self {
            main_span: 1280.0,
            side_span: 345.0,
            tower_height: default_tower_height(),
            segment_length: 10.0,
        }
    }
}

impl BridgeParams {
    /// Create parameters with the default tower height and segment length
    pub fn new(main_span: f64, side_span: f64) -> Self {
        Self {
            main_span,
            side_span,
            tower_height: default_tower_height(),
            segment_length: default_segment_length(),
        }
    }

    /// Parse parameters from JSON
    pub fn from_json_str(json: &str) -> BridgeResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Total bridge length, bank to bank
    pub fn total_length(&self) -> f64 {
        self.main_span + 2.0 * self.side_span
    }

    /// Number of deck panels: one per segment length plus a closing panel
    pub fn segments_count(&self) -> BridgeResult<usize> {
        let segments = self.total_length() / self.segment_length;
        let rounded = segments.round();

        if (segments - rounded).abs() > SEGMENT_TOLERANCE * rounded.max(1.0) {
            return Err(BridgeError::IndivisibleSpan {
                total_length: self.total_length(),
                segment_length: self.segment_length,
            });
        }

        Ok(rounded as usize + 1)
    }

    /// Check the parameters describe a bridge that can be meshed
    pub fn validate(&self) -> BridgeResult<()> {
        let positive = [
            ("main_span", self.main_span),
            ("side_span", self.side_span),
            ("tower_height", self.tower_height),
            ("segment_length", self.segment_length),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(BridgeError::InvalidParameter(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        if self.tower_height <= DECK_HEIGHT + MAIN_CABLE_SAG_OFFSET {
            return Err(BridgeError::InvalidGeometry(format!(
                "tower height {} must exceed the cable sag point at {}",
                self.tower_height,
                DECK_HEIGHT + MAIN_CABLE_SAG_OFFSET
            )));
        }

        let segments_count = self.segments_count()?;
        let (left, right) = self.tower_panels();
        if left >= right || right >= segments_count {
            return Err(BridgeError::InvalidGeometry(format!(
                "towers at panels {} and {} do not fit inside {} deck panels",
                left, right, segments_count
            )));
        }

        // The main cable parabola needs its low point strictly between the towers
        let (left_x, right_x) = (self.panel_mid_x(left), self.panel_mid_x(right));
        let mid_x = self.mid_span_x();
        if !(left_x < mid_x && mid_x < right_x) {
            return Err(BridgeError::InvalidGeometry(format!(
                "main span low point x = {} must lie between the towers at x = {} and x = {}",
                mid_x, left_x, right_x
            )));
        }

        Ok(())
    }

    /// Deck panels the two towers stand on
    pub fn tower_panels(&self) -> (usize, usize) {
        let left = (self.side_span / self.segment_length).round();
        let right = ((self.side_span + self.main_span) / self.segment_length).round();
        (left as usize, right as usize)
    }

    /// X coordinate of the centre of deck panel `panel`
    pub fn panel_mid_x(&self, panel: usize) -> f64 {
        self.segment_length * panel as f64 + self.segment_length / 2.0
    }

    /// X coordinate of the main cable low point
    pub fn mid_span_x(&self) -> f64 {
        self.total_length() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_segments_count() {
        let params = BridgeParams::default();
        assert_eq!(params.segments_count().unwrap(), 198);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_constructor_defaults() {
        let params = BridgeParams::new(1280.0, 345.0);
        assert_eq!(params.tower_height, 230.0);
        assert_eq!(params.segment_length, 7.62);
    }

    #[test]
    fn test_indivisible_span_rejected() {
        // 1970 / 7.62 is not a whole number of panels
        let params = BridgeParams::new(1280.0, 345.0);
        assert!(matches!(
            params.validate(),
            Err(BridgeError::IndivisibleSpan { .. })
        ));
    }

    #[test]
    fn test_non_positive_rejected() {
        let params = BridgeParams { segment_length: 0.0, ..BridgeParams::default() };
        assert!(matches!(
            params.validate(),
            Err(BridgeError::InvalidParameter(_))
        ));
        let params = BridgeParams { main_span: f64::NAN, ..BridgeParams::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_low_tower_rejected() {
        let params = BridgeParams { tower_height: 50.0, ..BridgeParams::default() };
        assert!(matches!(
            params.validate(),
            Err(BridgeError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_short_main_span_rejected() {
        // Towers at x = 1.5 and 2.5, low point at x = 1.5
        let params = BridgeParams {
            main_span: 1.0,
            side_span: 1.0,
            tower_height: 100.0,
            segment_length: 1.0,
        };
        assert_eq!(params.segments_count().unwrap(), 4);
        assert_eq!(params.tower_panels(), (1, 2));
        assert!(matches!(
            params.validate(),
            Err(BridgeError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_small_valid_spans_generate() {
        for segment_length in [1.0, 2.0, 5.0, 10.0] {
            for side in 1..=4 {
                for main in 1..=8 {
                    let params = BridgeParams {
                        main_span: main as f64 * segment_length,
                        side_span: side as f64 * segment_length,
                        tower_height: 100.0,
                        segment_length,
                    };
                    if params.validate().is_ok() {
                        assert!(
                            crate::mesh::generate(&params).is_ok(),
                            "validated params failed to mesh: {:?}",
                            params
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_tower_panels() {
        let params = BridgeParams::default();
        assert_eq!(params.tower_panels(), (35, 163));
        assert_eq!(params.panel_mid_x(35), 355.0);
        assert_eq!(params.panel_mid_x(163), 1635.0);
        assert_eq!(params.mid_span_x(), 985.0);
    }

    #[test]
    fn test_from_json_defaults() {
        let params =
            BridgeParams::from_json_str(r#"{"main_span": 1280.0, "side_span": 345.0, "segment_length": 10.0}"#)
                .unwrap();
        assert_eq!(params, BridgeParams::default());

        assert!(BridgeParams::from_json_str(r#"{"main_span": 1280.0}"#).is_err());
    }
}
