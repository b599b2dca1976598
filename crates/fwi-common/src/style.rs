//! Variable style catalog: how each dataset variable should be rendered.
//!
//! The catalog is immutable configuration passed into the renderer. It maps
//! raw variable identifiers (e.g. `t2m`, `FWI_risk`) to a display name, an
//! optional colormap identifier, an optional unit string, and a
//! variable-kind tag that selects the rendering path. Variables missing
//! from the catalog fall back to the raw identifier and the default
//! continuous colormap rather than failing.

use crate::error::{FwiError, FwiResult};
use crate::risk::{CategoricalPalette, ANOMALY_PALETTE, RISK_PALETTE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Selects the rendering path for a variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VariableKind {
    /// Continuous field drawn through a named colormap.
    #[default]
    Continuous,

    /// Ordinal classification codes 1-5 drawn through a fixed palette.
    Categorical { palette: CategoricalPalette },

    /// Continuous precipitation with the all-zero "no rain" special case.
    Precipitation,
}

/// Style definition for a single variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableStyle {
    /// Human-readable name used in titles and colorbar labels.
    pub display_name: String,

    /// Colormap identifier for continuous rendering. Categorical variables
    /// leave this unset; their colors come from the palette instead.
    #[serde(default)]
    pub colormap: Option<String>,

    /// Unit string appended to the colorbar label, e.g. "°C".
    #[serde(default)]
    pub units: Option<String>,

    #[serde(default)]
    pub kind: VariableKind,

    /// Fixed daily valid hour for instantaneous snapshot fields. When set,
    /// titles carry a "— HH:00 h" suffix.
    #[serde(default)]
    pub valid_hour: Option<u8>,
}

impl VariableStyle {
    /// Fallback style for a variable absent from the catalog: raw
    /// identifier as display name, default colormap, no units.
    pub fn fallback(variable_id: &str) -> Self {
        Self {
            display_name: variable_id.to_string(),
            colormap: None,
            units: None,
            kind: VariableKind::Continuous,
            valid_hour: None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.display_name.is_empty() {
            return Err("display_name must not be empty".to_string());
        }
        if let (VariableKind::Categorical { .. }, Some(cmap)) = (&self.kind, &self.colormap) {
            return Err(format!(
                "categorical variables use a fixed palette, not colormap '{}'",
                cmap
            ));
        }
        if let Some(hour) = self.valid_hour {
            if hour > 23 {
                return Err(format!("valid_hour {} is not a valid hour of day", hour));
            }
        }
        Ok(())
    }
}

/// Named style definitions for all variables a dataset can produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleCatalog {
    pub variables: HashMap<String, VariableStyle>,
}

impl StyleCatalog {
    /// Load a catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> FwiResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> FwiResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Get a variable's style by raw identifier.
    pub fn get(&self, variable_id: &str) -> Option<&VariableStyle> {
        self.variables.get(variable_id)
    }

    /// Validate all styles in the catalog.
    pub fn validate(&self) -> FwiResult<()> {
        for (id, style) in &self.variables {
            style
                .validate()
                .map_err(|e| FwiError::InvalidStyle(format!("{}: {}", id, e)))?;
        }
        Ok(())
    }

    /// The built-in catalog for the FWI forecast dataset.
    pub fn default_catalog() -> Self {
        let mut variables = HashMap::new();

        let continuous = |display: &str, colormap: &str, units: Option<&str>, hour: Option<u8>| {
            VariableStyle {
                display_name: display.to_string(),
                colormap: Some(colormap.to_string()),
                units: units.map(str::to_string),
                kind: VariableKind::Continuous,
                valid_hour: hour,
            }
        };

        variables.insert(
            "t2m".to_string(),
            continuous("Temperatura", "coolwarm", Some("°C"), Some(11)),
        );
        variables.insert(
            "rh".to_string(),
            continuous("Humedad", "PuBuGn", Some("%"), Some(11)),
        );
        variables.insert(
            "wind10m".to_string(),
            continuous("Velocidad del Viento", "viridis", Some("km/h"), Some(11)),
        );
        variables.insert(
            "rain_24h".to_string(),
            VariableStyle {
                display_name: "Precipitación".to_string(),
                colormap: Some("Blues".to_string()),
                units: Some("mm".to_string()),
                kind: VariableKind::Precipitation,
                valid_hour: Some(11),
            },
        );
        variables.insert(
            "FWI_risk".to_string(),
            VariableStyle {
                display_name: "Riesgo de Incendio".to_string(),
                colormap: None,
                units: None,
                kind: VariableKind::Categorical {
                    palette: RISK_PALETTE,
                },
                valid_hour: None,
            },
        );
        variables.insert(
            "FWI_anomalies".to_string(),
            VariableStyle {
                display_name: "Anomalías del FWI".to_string(),
                colormap: None,
                units: None,
                kind: VariableKind::Categorical {
                    palette: ANOMALY_PALETTE,
                },
                valid_hour: None,
            },
        );

        // FWI components are daily aggregates: no units, no valid-hour suffix
        variables.insert("FFMC".to_string(), continuous("FFMC", "plasma", None, None));
        variables.insert("DMC".to_string(), continuous("DMC", "cividis", None, None));
        variables.insert("DC".to_string(), continuous("DC", "YlOrBr", None, None));
        variables.insert("ISI".to_string(), continuous("ISI", "OrRd", None, None));
        variables.insert("BUI".to_string(), continuous("BUI", "YlOrBr", None, None));
        variables.insert("FWI".to_string(), continuous("FWI", "hot_r", None, None));

        Self { variables }
    }
}
