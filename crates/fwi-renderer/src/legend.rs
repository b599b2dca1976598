//! Colorbar construction and drawing.
//!
//! The colorbar is modeled structurally (ticks, labels, body) so callers
//! and tests can inspect it without decoding pixels; [`Colorbar::strip`]
//! rasterizes the body for figure composition.

use crate::colormap::Colormap;
use fwi_common::{CategoricalPalette, Color, RiskCategory};
use image::{Rgba, RgbaImage};

/// A single tick on the colorbar. `position` runs 0 (bottom) to 1 (top).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarTick {
    pub position: f32,
    pub label: String,
}

#[derive(Debug, Clone)]
enum ColorbarBody {
    /// Continuous gradient through a colormap.
    Gradient(&'static Colormap),
    /// Five discrete bands, bottom to top.
    Bands([Color; 5]),
}

/// A vertical colorbar: a colored body plus ticks and an axis label.
#[derive(Debug, Clone)]
pub struct Colorbar {
    pub label: String,
    pub ticks: Vec<ColorbarTick>,
    body: ColorbarBody,
}

/// Number of auto-placed ticks on a continuous colorbar.
const CONTINUOUS_TICKS: usize = 5;

impl Colorbar {
    /// Continuous colorbar over [vmin, vmax] with evenly spaced value
    /// ticks. The label combines display name and unit when one exists.
    pub fn continuous(
        display_name: &str,
        units: Option<&str>,
        colormap: &'static Colormap,
        vmin: f32,
        vmax: f32,
    ) -> Self {
        let label = match units {
            Some(u) => format!("{} ({})", display_name, u),
            None => display_name.to_string(),
        };
        let range = vmax - vmin;
        let ticks = (0..CONTINUOUS_TICKS)
            .map(|i| {
                let position = i as f32 / (CONTINUOUS_TICKS - 1) as f32;
                ColorbarTick {
                    position,
                    label: format_tick(vmin + range * position, range),
                }
            })
            .collect();
        Self {
            label,
            ticks,
            body: ColorbarBody::Gradient(colormap),
        }
    }

    /// Categorical colorbar: five bands with ticks at the integer codes,
    /// labeled in fixed order regardless of which codes the scene contains.
    pub fn categorical(display_name: &str, palette: &CategoricalPalette) -> Self {
        let ticks = RiskCategory::ALL
            .iter()
            .map(|category| ColorbarTick {
                // Tick at the band center: code c sits at (c - 0.5) / 5
                position: (category.code() as f32 - 0.5) / 5.0,
                label: category.label().to_string(),
            })
            .collect();
        Self {
            label: display_name.to_string(),
            ticks,
            body: ColorbarBody::Bands(palette.colors),
        }
    }

    /// The "no rain" colorbar: fixed [0, 1] gradient with a single tick.
    pub fn zero_precipitation(display_name: &str, colormap: &'static Colormap) -> Self {
        Self {
            label: display_name.to_string(),
            ticks: vec![ColorbarTick {
                position: 0.0,
                label: "0 mm".to_string(),
            }],
            body: ColorbarBody::Gradient(colormap),
        }
    }

    /// Body color at height fraction `t` (0 = bottom, 1 = top).
    pub fn color_at(&self, t: f32) -> Color {
        match &self.body {
            ColorbarBody::Gradient(map) => map.sample(t),
            ColorbarBody::Bands(colors) => {
                let band = ((t * 5.0) as usize).min(4);
                colors[band]
            }
        }
    }

    /// Rasterize the colorbar body as a vertical strip.
    pub fn strip(&self, width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for y in 0..height {
            // Row 0 is the top of the strip
            let t = 1.0 - (y as f32 + 0.5) / height as f32;
            let color = Rgba(self.color_at(t).to_array());
            for x in 0..width {
                img.put_pixel(x, y, color);
            }
        }
        img
    }
}

/// Format a tick value: whole numbers for wide ranges, one decimal for
/// narrow ones.
fn format_tick(value: f32, range: f32) -> String {
    if range.abs() >= 10.0 || value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
