//! Dataset and field types with time-slice selection.

use chrono::{DateTime, Utc};
use fwi_common::{BoundingBox, FwiError, FwiResult};
use std::collections::HashMap;

/// Format a timestamp to day precision, e.g. "2025-07-31".
pub fn format_day(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}

/// A single gridded variable.
///
/// Values are stored row-major as `[time][latitude][longitude]`; 2-D fields
/// simply have no time dimension. Each field carries its own coordinate
/// arrays, so different variables may cover different regions.
#[derive(Debug, Clone)]
pub struct GridField {
    name: String,
    values: Vec<f32>,
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    time: Option<Vec<DateTime<Utc>>>,
}

impl GridField {
    /// Create a 2-D field (no time dimension).
    pub fn new(
        name: impl Into<String>,
        values: Vec<f32>,
        longitude: Vec<f64>,
        latitude: Vec<f64>,
    ) -> FwiResult<Self> {
        Self::build(name.into(), values, longitude, latitude, None)
    }

    /// Create a 3-D field with a time dimension.
    pub fn with_time(
        name: impl Into<String>,
        values: Vec<f32>,
        longitude: Vec<f64>,
        latitude: Vec<f64>,
        time: Vec<DateTime<Utc>>,
    ) -> FwiResult<Self> {
        Self::build(name.into(), values, longitude, latitude, Some(time))
    }

    fn build(
        name: String,
        values: Vec<f32>,
        longitude: Vec<f64>,
        latitude: Vec<f64>,
        time: Option<Vec<DateTime<Utc>>>,
    ) -> FwiResult<Self> {
        if longitude.is_empty() || latitude.is_empty() {
            return Err(FwiError::InvalidGrid(format!(
                "field '{}' has empty coordinate arrays",
                name
            )));
        }
        let steps = match &time {
            Some(t) if t.is_empty() => {
                return Err(FwiError::InvalidGrid(format!(
                    "field '{}' has an empty time dimension",
                    name
                )))
            }
            Some(t) => t.len(),
            None => 1,
        };
        let expected = steps * latitude.len() * longitude.len();
        if values.len() != expected {
            return Err(FwiError::InvalidGrid(format!(
                "field '{}': {} values, expected {} ({} x {} x {})",
                name,
                values.len(),
                expected,
                steps,
                latitude.len(),
                longitude.len()
            )));
        }
        Ok(Self {
            name,
            values,
            longitude,
            latitude,
            time,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    pub fn latitude(&self) -> &[f64] {
        &self.latitude
    }

    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// Number of time steps (1 for a field without a time dimension).
    pub fn time_steps(&self) -> usize {
        self.time.as_ref().map_or(1, Vec::len)
    }

    /// Select a single time slice.
    ///
    /// For fields with a time dimension the index is validated against the
    /// number of time steps; for 2-D fields the index is ignored and the
    /// whole field is returned, matching how the dashboard treats
    /// time-invariant variables.
    pub fn slice(&self, time_index: usize) -> FwiResult<FieldSlice<'_>> {
        let plane = self.latitude.len() * self.longitude.len();
        match &self.time {
            Some(times) => {
                if time_index >= times.len() {
                    return Err(FwiError::TimeIndexOutOfRange {
                        index: time_index,
                        len: times.len(),
                    });
                }
                let start = time_index * plane;
                Ok(FieldSlice {
                    values: &self.values[start..start + plane],
                    longitude: &self.longitude,
                    latitude: &self.latitude,
                    valid_time: Some(times[time_index]),
                })
            }
            None => Ok(FieldSlice {
                values: &self.values,
                longitude: &self.longitude,
                latitude: &self.latitude,
                valid_time: None,
            }),
        }
    }
}

/// A single 2-D time slice of a field, borrowed from its [`GridField`].
#[derive(Debug, Clone, Copy)]
pub struct FieldSlice<'a> {
    pub values: &'a [f32],
    pub longitude: &'a [f64],
    pub latitude: &'a [f64],
    /// The time coordinate of this slice, when the field has one.
    pub valid_time: Option<DateTime<Utc>>,
}

impl FieldSlice<'_> {
    pub fn width(&self) -> usize {
        self.longitude.len()
    }

    pub fn height(&self) -> usize {
        self.latitude.len()
    }

    /// Cell value at (latitude row, longitude column).
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.longitude.len() + col]
    }

    /// Extent of this slice's own coordinate arrays.
    pub fn bounds(&self) -> BoundingBox {
        // Coordinate arrays are non-empty by GridField construction
        BoundingBox::from_coords(self.longitude, self.latitude)
            .unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Day-precision label of this slice's valid time.
    pub fn date_label(&self) -> Option<String> {
        self.valid_time.as_ref().map(format_day)
    }
}

/// A read-only collection of gridded variables, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    fields: HashMap<String, GridField>,
    /// Optional scalar date coordinate, used for the date label when a
    /// variable has no time dimension of its own.
    pub date: Option<DateTime<Utc>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(date: DateTime<Utc>) -> Self {
        Self {
            fields: HashMap::new(),
            date: Some(date),
        }
    }

    pub fn insert(&mut self, field: GridField) {
        self.fields.insert(field.name().to_string(), field);
    }

    /// Look up a variable by name.
    pub fn field(&self, name: &str) -> FwiResult<&GridField> {
        self.fields
            .get(name)
            .ok_or_else(|| FwiError::VariableNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Names of all variables, in arbitrary order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
