//! Fire-risk classification: five ordered categories with fixed palettes.
//!
//! The risk-level and anomaly fields carry integer codes 1-5, with 0
//! reserved for "no data". Classification bands are placed at half-integers
//! (0.5, 1.5, ..., 5.5) so each integer code maps unambiguously to exactly
//! one color band when the field is drawn through a continuous raster
//! primitive.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// The five ordered risk categories, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Bajo,
    Moderado,
    Alto,
    MuyAlto,
    Extremo,
}

/// Classification band edges: band `i` covers `[BOUNDS[i], BOUNDS[i+1])`.
pub const CLASS_BOUNDS: [f32; 6] = [0.5, 1.5, 2.5, 3.5, 4.5, 5.5];

impl RiskCategory {
    /// All categories in legend order.
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Bajo,
        RiskCategory::Moderado,
        RiskCategory::Alto,
        RiskCategory::MuyAlto,
        RiskCategory::Extremo,
    ];

    /// Integer code 1-5 (0 is "no data" and has no category).
    pub fn code(self) -> u8 {
        match self {
            RiskCategory::Bajo => 1,
            RiskCategory::Moderado => 2,
            RiskCategory::Alto => 3,
            RiskCategory::MuyAlto => 4,
            RiskCategory::Extremo => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(RiskCategory::Bajo),
            2 => Some(RiskCategory::Moderado),
            3 => Some(RiskCategory::Alto),
            4 => Some(RiskCategory::MuyAlto),
            5 => Some(RiskCategory::Extremo),
            _ => None,
        }
    }

    /// Legend label (display language follows the dashboard).
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Bajo => "Bajo",
            RiskCategory::Moderado => "Moderado",
            RiskCategory::Alto => "Alto",
            RiskCategory::MuyAlto => "Muy Alto",
            RiskCategory::Extremo => "Extremo",
        }
    }

    /// Classify a raw cell value into a category band.
    ///
    /// Returns `None` for NaN, the no-data code 0, and anything outside
    /// the half-integer bands; such cells are left unpainted.
    pub fn classify(value: f32) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        for (i, window) in CLASS_BOUNDS.windows(2).enumerate() {
            if value >= window[0] && value < window[1] {
                return Self::from_code(i as u8 + 1);
            }
        }
        None
    }
}

/// A fixed five-color palette keyed by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalPalette {
    pub colors: [Color; 5],
}

impl CategoricalPalette {
    pub fn color_for(&self, category: RiskCategory) -> Color {
        self.colors[category.code() as usize - 1]
    }
}

/// Palette for the risk-level field (green through dark red).
pub const RISK_PALETTE: CategoricalPalette = CategoricalPalette {
    colors: [
        Color::rgb(0xa6, 0xd9, 0x6a), // #a6d96a
        Color::rgb(0xff, 0xff, 0xbf), // #ffffbf
        Color::rgb(0xfd, 0xae, 0x61), // #fdae61
        Color::rgb(0xf4, 0x6d, 0x43), // #f46d43
        Color::rgb(0xd7, 0x30, 0x27), // #d73027
    ],
};

/// Palette for the anomaly field (blue through maroon).
pub const ANOMALY_PALETTE: CategoricalPalette = CategoricalPalette {
    colors: [
        Color::rgb(0x67, 0xa9, 0xcf), // #67a9cf
        Color::rgb(0xff, 0xff, 0xbf), // #ffffbf
        Color::rgb(0xfd, 0xae, 0x61), // #fdae61
        Color::rgb(0xd7, 0x30, 0x27), // #d73027
        Color::rgb(0x70, 0x1d, 0x19), // #701d19
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for category in RiskCategory::ALL {
            assert_eq!(RiskCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(RiskCategory::from_code(0), None);
        assert_eq!(RiskCategory::from_code(6), None);
    }

    #[test]
    fn test_classify_integer_codes() {
        assert_eq!(RiskCategory::classify(1.0), Some(RiskCategory::Bajo));
        assert_eq!(RiskCategory::classify(3.0), Some(RiskCategory::Alto));
        assert_eq!(RiskCategory::classify(5.0), Some(RiskCategory::Extremo));
    }

    #[test]
    fn test_classify_no_data_excluded() {
        assert_eq!(RiskCategory::classify(0.0), None);
        assert_eq!(RiskCategory::classify(f32::NAN), None);
        assert_eq!(RiskCategory::classify(6.0), None);
        assert_eq!(RiskCategory::classify(-1.0), None);
    }

    #[test]
    fn test_classify_band_edges() {
        // Bands are half-open: [0.5, 1.5) -> Bajo, [1.5, 2.5) -> Moderado
        assert_eq!(RiskCategory::classify(0.5), Some(RiskCategory::Bajo));
        assert_eq!(RiskCategory::classify(1.4999), Some(RiskCategory::Bajo));
        assert_eq!(RiskCategory::classify(1.5), Some(RiskCategory::Moderado));
        assert_eq!(RiskCategory::classify(5.5), None);
    }

    #[test]
    fn test_labels_in_legend_order() {
        let labels: Vec<&str> = RiskCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Bajo", "Moderado", "Alto", "Muy Alto", "Extremo"]);
    }

    #[test]
    fn test_palette_lookup() {
        assert_eq!(
            RISK_PALETTE.color_for(RiskCategory::Bajo),
            Color::rgb(0xa6, 0xd9, 0x6a)
        );
        assert_eq!(
            ANOMALY_PALETTE.color_for(RiskCategory::Extremo),
            Color::rgb(0x70, 0x1d, 0x19)
        );
    }
}
