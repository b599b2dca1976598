//! Synthetic fields with known values for tests, demos, and benches.
//!
//! The position-encoding pattern (`value = col * 1000 + row`) makes it easy
//! to verify slice selection and raster lookups after the fact.

use crate::dataset::{Dataset, GridField};
use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;

/// Evenly spaced coordinate arrays over the given extent.
pub fn coords(
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
    nx: usize,
    ny: usize,
) -> (Vec<f64>, Vec<f64>) {
    let lons = (0..nx)
        .map(|i| min_lon + (max_lon - min_lon) * i as f64 / (nx - 1).max(1) as f64)
        .collect();
    let lats = (0..ny)
        .map(|j| min_lat + (max_lat - min_lat) * j as f64 / (ny - 1).max(1) as f64)
        .collect();
    (lons, lats)
}

/// Grid where value at (col, row) = col * 1000 + row.
pub fn position_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Temperature-like field: smooth ramp from 12 °C to 38 °C across rows.
pub fn temperature_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let t = 12.0 + 26.0 * row as f32 / (height - 1).max(1) as f32;
        for _col in 0..width {
            data.push(t);
        }
    }
    data
}

/// Risk-code field cycling through codes 0-5, so every category and the
/// no-data code appear.
pub fn risk_grid(width: usize, height: usize) -> Vec<f32> {
    (0..width * height).map(|i| (i % 6) as f32).collect()
}

/// Field with normally-plausible noise around a base value.
pub fn noisy_grid(width: usize, height: usize, base: f32, spread: f32) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..width * height)
        .map(|_| base + rng.gen_range(-spread..spread))
        .collect()
}

/// Forecast days starting 2025-07-31.
pub fn forecast_times(days: usize) -> Vec<DateTime<Utc>> {
    (0..days)
        .map(|d| {
            Utc.with_ymd_and_hms(2025, 7, 31, 0, 0, 0).unwrap()
                + chrono::Duration::days(d as i64)
        })
        .collect()
}

/// A small forecast dataset over a 2°x2° region with three daily steps:
/// temperature, all-zero precipitation, and a risk classification field.
pub fn forecast_dataset() -> Dataset {
    let (nx, ny, days) = (9, 9, 3);
    let (lons, lats) = coords(0.0, 2.0, 40.0, 42.0, nx, ny);
    let times = forecast_times(days);

    let mut ds = Dataset::new();

    let t2m: Vec<f32> = (0..days)
        .flat_map(|d| {
            temperature_grid(nx, ny)
                .into_iter()
                .map(move |v| v + d as f32)
        })
        .collect();
    ds.insert(
        GridField::with_time("t2m", t2m, lons.clone(), lats.clone(), times.clone()).unwrap(),
    );

    let rain = vec![0.0; days * nx * ny];
    ds.insert(
        GridField::with_time("rain_24h", rain, lons.clone(), lats.clone(), times.clone())
            .unwrap(),
    );

    let risk: Vec<f32> = (0..days).flat_map(|_| risk_grid(nx, ny)).collect();
    ds.insert(GridField::with_time("FWI_risk", risk, lons, lats, times).unwrap());

    ds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_grid_encoding() {
        let data = position_grid(4, 3);
        assert_eq!(data[0], 0.0); // col 0, row 0
        assert_eq!(data[1 * 4 + 2], 2001.0); // col 2, row 1
    }

    #[test]
    fn test_coords_span_extent() {
        let (lons, lats) = coords(0.0, 2.0, 40.0, 42.0, 5, 3);
        assert_eq!(lons.first(), Some(&0.0));
        assert_eq!(lons.last(), Some(&2.0));
        assert_eq!(lats.last(), Some(&42.0));
    }

    #[test]
    fn test_forecast_dataset_shape() {
        let ds = forecast_dataset();
        let field = ds.field("t2m").unwrap();
        assert_eq!(field.time_steps(), 3);
        assert!(ds.field("rain_24h").unwrap().slice(0).unwrap().values[0] == 0.0);
    }

    #[test]
    fn test_risk_grid_covers_all_codes() {
        let data = risk_grid(6, 1);
        assert_eq!(data, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
