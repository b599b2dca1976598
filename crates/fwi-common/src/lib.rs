//! Common types shared across the fwi-map crates.

pub mod bbox;
pub mod color;
pub mod error;
pub mod risk;
pub mod style;

pub use bbox::BoundingBox;
pub use color::Color;
pub use error::{FwiError, FwiResult};
pub use risk::{CategoricalPalette, RiskCategory, ANOMALY_PALETTE, RISK_PALETTE};
pub use style::{StyleCatalog, VariableKind, VariableStyle};
