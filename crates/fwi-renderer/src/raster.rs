//! Filled-mesh rasterization of a field slice into RGBA pixels.
//!
//! Every output pixel is colored from the nearest grid cell (per-cell
//! fidelity, no smoothing). Three fill modes exist: continuous colormap,
//! categorical palette with the no-data code masked out, and the uniform
//! zero raster used for all-zero precipitation.

use crate::colormap::Colormap;
use fwi_common::{CategoricalPalette, Color, RiskCategory};
use fwi_grid::FieldSlice;
use rayon::prelude::*;

/// Finite min/max of a slice, ignoring NaN. `None` when nothing is finite.
pub fn value_range(values: &[f32]) -> Option<(f32, f32)> {
    let mut range: Option<(f32, f32)> = None;
    for &v in values {
        if v.is_finite() {
            range = Some(match range {
                Some((min, max)) => (min.min(v), max.max(v)),
                None => (v, v),
            });
        }
    }
    range
}

/// True when every value is finite and zero within `tolerance`.
///
/// Any NaN makes this false, so partially-masked precipitation fields take
/// the normal continuous path.
pub fn all_zero(values: &[f32], tolerance: f32) -> bool {
    values.iter().all(|v| v.is_finite() && v.abs() <= tolerance)
}

/// Nearest coordinate index for a target value. The coordinate array must
/// be monotonic (ascending or descending) but need not be evenly spaced.
fn nearest_index(coords: &[f64], target: f64) -> usize {
    let n = coords.len();
    if n < 2 {
        return 0;
    }
    let split = if coords[0] <= coords[n - 1] {
        coords.partition_point(|&c| c < target)
    } else {
        coords.partition_point(|&c| c > target)
    };
    if split == 0 {
        return 0;
    }
    if split >= n {
        return n - 1;
    }
    // Closer of the two neighbors around the split
    if (coords[split] - target).abs() < (coords[split - 1] - target).abs() {
        split
    } else {
        split - 1
    }
}

/// Rasterize with a per-cell color function. Pixel centers map to lon/lat
/// within the slice's own extent; row 0 is the northern edge.
fn fill_with<F>(slice: &FieldSlice<'_>, width: usize, height: usize, color_fn: F) -> Vec<u8>
where
    F: Fn(f32) -> Color + Sync,
{
    let bounds = slice.bounds();
    let mut pixels = vec![0u8; width * height * 4];

    pixels
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(py, row_pixels)| {
            let lat = bounds.max_lat
                - bounds.height() * (py as f64 + 0.5) / height as f64;
            let row = nearest_index(slice.latitude, lat);
            for px in 0..width {
                let lon = bounds.min_lon
                    + bounds.width() * (px as f64 + 0.5) / width as f64;
                let col = nearest_index(slice.longitude, lon);
                let color = color_fn(slice.get(row, col));
                row_pixels[px * 4..px * 4 + 4].copy_from_slice(&color.to_array());
            }
        });

    pixels
}

/// Continuous fill: values scaled to [vmin, vmax] through a colormap,
/// NaN cells transparent.
pub fn fill_continuous(
    slice: &FieldSlice<'_>,
    width: usize,
    height: usize,
    colormap: &Colormap,
    vmin: f32,
    vmax: f32,
) -> Vec<u8> {
    let range = vmax - vmin;
    fill_with(slice, width, height, |value| {
        if !value.is_finite() {
            return Color::transparent();
        }
        // Degenerate range (uniform field): use the midpoint color
        let t = if range.abs() < f32::EPSILON {
            0.5
        } else {
            (value - vmin) / range
        };
        colormap.sample(t)
    })
}

/// Categorical fill: codes 1-5 through the fixed palette, code 0 and
/// out-of-band values left unpainted.
pub fn fill_classified(
    slice: &FieldSlice<'_>,
    width: usize,
    height: usize,
    palette: &CategoricalPalette,
) -> Vec<u8> {
    fill_with(slice, width, height, |value| {
        match RiskCategory::classify(value) {
            Some(category) => palette.color_for(category),
            None => Color::transparent(),
        }
    })
}

/// Uniform zero raster scaled to a fixed [0, 1] color range. Used instead
/// of the real data when a precipitation slice is all zero, so automatic
/// scaling cannot produce a misleading legend.
pub fn fill_uniform_zero(width: usize, height: usize, colormap: &Colormap) -> Vec<u8> {
    let color = colormap.sample(0.0).to_array();
    let mut pixels = vec![0u8; width * height * 4];
    for pixel in pixels.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwi_common::{ANOMALY_PALETTE, RISK_PALETTE};
    use fwi_grid::GridField;

    fn slice_of(field: &GridField) -> FieldSlice<'_> {
        field.slice(0).unwrap()
    }

    #[test]
    fn test_value_range_skips_nan() {
        assert_eq!(value_range(&[1.0, f32::NAN, 3.0]), Some((1.0, 3.0)));
        assert_eq!(value_range(&[f32::NAN]), None);
    }

    #[test]
    fn test_all_zero() {
        assert!(all_zero(&[0.0, 1e-7, -1e-9], 1e-6));
        assert!(!all_zero(&[0.0, 0.01], 1e-6));
        assert!(!all_zero(&[0.0, f32::NAN], 1e-6));
    }

    #[test]
    fn test_nearest_index_ascending_and_descending() {
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 1.2), 1);
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 1.6), 2);
        assert_eq!(nearest_index(&[42.0, 41.0, 40.0], 40.2), 2);
        assert_eq!(nearest_index(&[42.0, 41.0, 40.0], 41.9), 0);
    }

    #[test]
    fn test_nearest_index_uneven_spacing() {
        // Stretched grids keep exact nearest-cell placement
        assert_eq!(nearest_index(&[0.0, 1.0, 10.0], 2.0), 1);
        assert_eq!(nearest_index(&[0.0, 1.0, 10.0], 8.0), 2);
        assert_eq!(nearest_index(&[10.0, 9.0, 0.0], 2.0), 2);
        assert_eq!(nearest_index(&[10.0, 9.0, 0.0], 8.5), 1);
    }

    #[test]
    fn test_nearest_index_out_of_range_clamps() {
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], -5.0), 0);
        assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 9.0), 2);
    }

    #[test]
    fn test_fill_continuous_endpoints() {
        // 1x2 grid: min on the west, max on the east
        let field = GridField::new("v", vec![0.0, 10.0], vec![0.0, 1.0], vec![40.0]).unwrap();
        let pixels = fill_continuous(&slice_of(&field), 2, 1, Colormap::default_map(), 0.0, 10.0);
        let low = Colormap::default_map().sample(0.0).to_array();
        let high = Colormap::default_map().sample(1.0).to_array();
        assert_eq!(&pixels[0..4], &low);
        assert_eq!(&pixels[4..8], &high);
    }

    #[test]
    fn test_fill_continuous_nan_transparent() {
        let field = GridField::new("v", vec![f32::NAN], vec![0.0], vec![40.0]).unwrap();
        let pixels = fill_continuous(&slice_of(&field), 1, 1, Colormap::default_map(), 0.0, 1.0);
        assert_eq!(pixels[3], 0);
    }

    #[test]
    fn test_fill_continuous_uniform_field_uses_midpoint() {
        let field = GridField::new("v", vec![5.0, 5.0], vec![0.0, 1.0], vec![40.0]).unwrap();
        let pixels = fill_continuous(&slice_of(&field), 2, 1, Colormap::default_map(), 5.0, 5.0);
        let mid = Colormap::default_map().sample(0.5).to_array();
        assert_eq!(&pixels[0..4], &mid);
    }

    #[test]
    fn test_fill_classified_masks_no_data() {
        // Codes 0..5 across one row; each painted pixel takes its band color
        let field = GridField::new(
            "risk",
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![40.0],
        )
        .unwrap();
        let pixels = fill_classified(&slice_of(&field), 6, 1, &RISK_PALETTE);

        // Code 0 is transparent
        assert_eq!(pixels[3], 0);
        // Codes 1-5 map to the palette in order
        for (i, color) in RISK_PALETTE.colors.iter().enumerate() {
            let offset = (i + 1) * 4;
            assert_eq!(&pixels[offset..offset + 4], &color.to_array());
        }
    }

    #[test]
    fn test_fill_classified_anomaly_palette() {
        let field = GridField::new("a", vec![5.0], vec![0.0], vec![40.0]).unwrap();
        let pixels = fill_classified(&slice_of(&field), 1, 1, &ANOMALY_PALETTE);
        assert_eq!(&pixels[0..4], &ANOMALY_PALETTE.colors[4].to_array());
    }

    #[test]
    fn test_fill_uniform_zero() {
        let map = Colormap::by_name("Blues").unwrap();
        let pixels = fill_uniform_zero(3, 2, map);
        let expected = map.sample(0.0).to_array();
        for pixel in pixels.chunks_exact(4) {
            assert_eq!(pixel, &expected);
        }
    }
}
