//! The variable renderer: time-slice selection, visual-encoding dispatch,
//! map decoration, and figure composition.
//!
//! `render()` is a pure function of its inputs: it produces a fresh
//! [`RenderedMap`] on every call and keeps no state between calls.

use crate::colormap::Colormap;
use crate::decor::{self, Basemap, GRID_SPACING_DEG};
use crate::legend::Colorbar;
use crate::png;
use crate::raster;
use crate::text::{self, LabelFont};
use fwi_common::{BoundingBox, Color, FwiError, FwiResult, StyleCatalog, VariableKind, VariableStyle};
use fwi_grid::{format_day, Dataset};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use std::path::Path;
use tracing::{debug, warn};

/// All-zero tolerance for the precipitation special case. Well below any
/// measurable rainfall, so a genuine light-precipitation field can never
/// be suppressed.
const ZERO_PRECIP_TOLERANCE: f32 = 1e-6;

// Figure layout in pixels
const MARGIN_LEFT: u32 = 48;
const MARGIN_TOP: u32 = 34;
const MARGIN_BOTTOM: u32 = 30;
const COLORBAR_AREA: u32 = 96;
const COLORBAR_WIDTH: u32 = 18;
/// Colorbar height as a fraction of the panel height.
const COLORBAR_SHRINK: f32 = 0.6;

const TITLE_SIZE: f32 = 16.0;
const TICK_SIZE: f32 = 11.0;

/// A point location overlaid on the map with a legend entry.
#[derive(Debug, Clone)]
pub struct FireMarker {
    pub lon: f64,
    pub lat: f64,
    pub label: String,
}

/// Inputs controlling a single render call.
pub struct RenderOptions {
    /// Index into the variable's time dimension, when it has one.
    pub time_index: usize,
    /// Explicit title; used verbatim when set.
    pub title: Option<String>,
    pub marker: Option<FireMarker>,
    /// Map panel size in pixels (margins and colorbar are added around it).
    pub panel_width: u32,
    pub panel_height: u32,
    pub basemap: Basemap,
    /// Label font; when absent the text layers are skipped.
    pub font: Option<LabelFont>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            time_index: 0,
            title: None,
            marker: None,
            panel_width: 640,
            panel_height: 480,
            basemap: Basemap::default(),
            font: None,
        }
    }
}

/// A rendered map figure plus the structured pieces it was built from.
/// Ownership passes entirely to the caller.
pub struct RenderedMap {
    pub figure: RgbaImage,
    pub title: String,
    pub date_label: Option<String>,
    /// Geographic extent: the min/max of the variable's own coordinates.
    pub extent: BoundingBox,
    pub colorbar: Colorbar,
    pub gridline_lons: Vec<f64>,
    pub gridline_lats: Vec<f64>,
    pub marker_label: Option<String>,
}

impl RenderedMap {
    pub fn width(&self) -> u32 {
        self.figure.width()
    }

    pub fn height(&self) -> u32 {
        self.figure.height()
    }

    /// Encode the figure as a PNG (indexed when the palette fits).
    pub fn to_png(&self) -> FwiResult<Vec<u8>> {
        png::encode_auto(
            self.figure.as_raw(),
            self.figure.width() as usize,
            self.figure.height() as usize,
        )
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> FwiResult<()> {
        std::fs::write(path, self.to_png()?)?;
        Ok(())
    }
}

/// Render one variable of the dataset at one time step.
///
/// Fails only on a variable name the dataset does not carry or a time
/// index outside the variable's time dimension; every lookup-table miss
/// falls back to defaults so the dashboard always gets a figure.
pub fn render(
    dataset: &Dataset,
    variable_id: &str,
    catalog: &StyleCatalog,
    options: &RenderOptions,
) -> FwiResult<RenderedMap> {
    if options.panel_width == 0 || options.panel_height == 0 {
        return Err(FwiError::InvalidGrid(
            "panel dimensions must be non-zero".to_string(),
        ));
    }

    let field = dataset.field(variable_id)?;
    let slice = field.slice(options.time_index)?;

    let date_label = slice
        .date_label()
        .or_else(|| dataset.date.as_ref().map(format_day));

    let style = match catalog.get(variable_id) {
        Some(style) => style.clone(),
        None => {
            warn!(variable = variable_id, "variable not in style catalog, using fallback");
            VariableStyle::fallback(variable_id)
        }
    };
    let colormap = resolve_colormap(&style);

    debug!(
        variable = variable_id,
        time_index = options.time_index,
        date = date_label.as_deref().unwrap_or("-"),
        "rendering map"
    );

    let (pw, ph) = (options.panel_width as usize, options.panel_height as usize);
    let (data_pixels, colorbar) = match &style.kind {
        VariableKind::Categorical { palette } => (
            raster::fill_classified(&slice, pw, ph, palette),
            Colorbar::categorical(&style.display_name, palette),
        ),
        VariableKind::Precipitation
            if raster::all_zero(slice.values, ZERO_PRECIP_TOLERANCE) =>
        {
            debug!(variable = variable_id, "all-zero precipitation, rendering uniform zero raster");
            (
                raster::fill_uniform_zero(pw, ph, colormap),
                Colorbar::zero_precipitation(&style.display_name, colormap),
            )
        }
        VariableKind::Precipitation | VariableKind::Continuous => {
            let (vmin, vmax) = raster::value_range(slice.values).unwrap_or((0.0, 1.0));
            (
                raster::fill_continuous(&slice, pw, ph, colormap, vmin, vmax),
                Colorbar::continuous(
                    &style.display_name,
                    style.units.as_deref(),
                    colormap,
                    vmin,
                    vmax,
                ),
            )
        }
    };

    let extent = slice.bounds();
    let panel = decor::render_panel(
        &data_pixels,
        options.panel_width,
        options.panel_height,
        &extent,
        &options.basemap,
        options.marker.as_ref().map(|m| (m.lon, m.lat)),
    )?;

    let title = compose_title(&style, options.title.as_deref(), date_label.as_deref());
    let gridline_lons = decor::gridline_positions(extent.min_lon, extent.max_lon, GRID_SPACING_DEG);
    let gridline_lats = decor::gridline_positions(extent.min_lat, extent.max_lat, GRID_SPACING_DEG);

    let figure = compose_figure(
        &panel,
        &colorbar,
        &title,
        &extent,
        &gridline_lons,
        &gridline_lats,
        options,
    );

    Ok(RenderedMap {
        figure,
        title,
        date_label,
        extent,
        colorbar,
        gridline_lons,
        gridline_lats,
        marker_label: options.marker.as_ref().map(|m| m.label.clone()),
    })
}

/// Colormap for the style, falling back to the default sequential map.
fn resolve_colormap(style: &VariableStyle) -> &'static Colormap {
    match style.colormap.as_deref() {
        Some(name) => Colormap::by_name(name).unwrap_or_else(|| {
            warn!(colormap = name, "unknown colormap, using default");
            Colormap::default_map()
        }),
        None => Colormap::default_map(),
    }
}

/// Title policy: an explicit title is used verbatim; otherwise the display
/// name plus the date label, plus the fixed valid-hour suffix for
/// instantaneous snapshot variables.
fn compose_title(
    style: &VariableStyle,
    explicit: Option<&str>,
    date_label: Option<&str>,
) -> String {
    if let Some(title) = explicit {
        return title.to_string();
    }
    let mut title = match date_label {
        Some(date) => format!("{} — {}", style.display_name, date),
        None => style.display_name.clone(),
    };
    if let Some(hour) = style.valid_hour {
        title = format!("{} — {:02}:00 h", title, hour);
    }
    title
}

/// Assemble the final figure: title band, map panel, axis tick labels, and
/// the colorbar with its ticks and rotated label.
fn compose_figure(
    panel: &RgbaImage,
    colorbar: &Colorbar,
    title: &str,
    extent: &BoundingBox,
    gridline_lons: &[f64],
    gridline_lats: &[f64],
    options: &RenderOptions,
) -> RgbaImage {
    let (pw, ph) = (options.panel_width, options.panel_height);
    let fig_w = MARGIN_LEFT + pw + COLORBAR_AREA;
    let fig_h = MARGIN_TOP + ph + MARGIN_BOTTOM;
    let mut figure = RgbaImage::from_pixel(fig_w, fig_h, Rgba([255, 255, 255, 255]));

    imageops::overlay(&mut figure, panel, MARGIN_LEFT as i64, MARGIN_TOP as i64);

    // Colorbar strip, vertically centered and shrunk relative to the panel
    let cb_h = ((ph as f32) * COLORBAR_SHRINK) as u32;
    let cb_x = MARGIN_LEFT + pw + 10;
    let cb_y = MARGIN_TOP + (ph - cb_h) / 2;
    let strip = colorbar.strip(COLORBAR_WIDTH, cb_h);
    imageops::overlay(&mut figure, &strip, cb_x as i64, cb_y as i64);

    let font = match &options.font {
        Some(font) => font,
        None => {
            warn!("no label font configured; text layers skipped");
            return figure;
        }
    };
    let black = Color::rgb(0, 0, 0);

    // Title centered over the panel
    let title_w = text::text_width(font, title, TITLE_SIZE);
    let title_x = MARGIN_LEFT as i32 + ((pw as f32 - title_w) / 2.0) as i32;
    text::draw_label(&mut figure, font, title, title_x.max(0), 8, TITLE_SIZE, black);

    // Colorbar tick marks and labels
    for tick in &colorbar.ticks {
        let ty = cb_y as f32 + cb_h as f32 * (1.0 - tick.position);
        let x0 = (cb_x + COLORBAR_WIDTH) as f32;
        draw_line_segment_mut(&mut figure, (x0, ty), (x0 + 4.0, ty), Rgba(black.to_array()));
        text::draw_label(
            &mut figure,
            font,
            &tick.label,
            (x0 + 6.0) as i32,
            (ty - TICK_SIZE / 2.0) as i32,
            TICK_SIZE,
            black,
        );
    }

    // Colorbar axis label, rotated to run along the strip
    let label_w = text::text_width(font, &colorbar.label, TICK_SIZE).ceil() as u32;
    if label_w > 0 {
        let mut banner = RgbaImage::new(label_w + 2, (TICK_SIZE + 4.0) as u32);
        text::draw_label(&mut banner, font, &colorbar.label, 0, 0, TICK_SIZE, black);
        let rotated = imageops::rotate270(&banner);
        let label_x = (cb_x + COLORBAR_WIDTH + 52).min(fig_w - rotated.width());
        let label_y = cb_y + cb_h.saturating_sub(rotated.height()) / 2;
        imageops::overlay(&mut figure, &rotated, label_x as i64, label_y as i64);
    }

    // Axis tick labels: longitude on the bottom edge, latitude on the left
    // edge only (top/right suppressed)
    for &lon in gridline_lons {
        let x = MARGIN_LEFT as f64 + (lon - extent.min_lon) / extent.width() * pw as f64;
        let label = format_degrees(lon);
        let w = text::text_width(font, &label, TICK_SIZE);
        text::draw_label(
            &mut figure,
            font,
            &label,
            (x - w as f64 / 2.0) as i32,
            (MARGIN_TOP + ph + 4) as i32,
            TICK_SIZE,
            black,
        );
    }
    for &lat in gridline_lats {
        let y = MARGIN_TOP as f64 + (extent.max_lat - lat) / extent.height() * ph as f64;
        let label = format_degrees(lat);
        let w = text::text_width(font, &label, TICK_SIZE);
        text::draw_label(
            &mut figure,
            font,
            &label,
            (MARGIN_LEFT as f32 - w - 4.0) as i32,
            (y - TICK_SIZE as f64 / 2.0) as i32,
            TICK_SIZE,
            black,
        );
    }

    // Marker legend entry inside the panel's top-left corner
    if let Some(marker) = &options.marker {
        let (lx, ly) = (MARGIN_LEFT as i32 + 10, MARGIN_TOP as i32 + 10);
        draw_filled_circle_mut(&mut figure, (lx, ly), 4, Rgba([0xd7, 0x30, 0x27, 255]));
        text::draw_label(
            &mut figure,
            font,
            &marker.label,
            lx + 8,
            ly - (TICK_SIZE / 2.0) as i32,
            TICK_SIZE,
            black,
        );
    }

    figure
}

/// Degree label for an axis tick, e.g. "0.25°".
fn format_degrees(value: f64) -> String {
    format!("{:.2}°", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwi_common::StyleCatalog;

    fn style(display: &str, hour: Option<u8>) -> VariableStyle {
        VariableStyle {
            display_name: display.to_string(),
            colormap: None,
            units: None,
            kind: VariableKind::Continuous,
            valid_hour: hour,
        }
    }

    #[test]
    fn test_title_with_date_and_valid_hour() {
        let title = compose_title(&style("Temperatura", Some(11)), None, Some("2025-07-31"));
        assert_eq!(title, "Temperatura — 2025-07-31 — 11:00 h");
    }

    #[test]
    fn test_title_without_valid_hour() {
        let title = compose_title(&style("Riesgo de Incendio", None), None, Some("2025-07-31"));
        assert_eq!(title, "Riesgo de Incendio — 2025-07-31");
    }

    #[test]
    fn test_title_without_date() {
        let title = compose_title(&style("FWI", None), None, None);
        assert_eq!(title, "FWI");
    }

    #[test]
    fn test_explicit_title_verbatim() {
        let title = compose_title(
            &style("Temperatura", Some(11)),
            Some("Mapa de prueba"),
            Some("2025-07-31"),
        );
        assert_eq!(title, "Mapa de prueba");
    }

    #[test]
    fn test_resolve_colormap_fallbacks() {
        let mut s = style("x", None);
        assert_eq!(resolve_colormap(&s).name(), "viridis");
        s.colormap = Some("no_such_map".to_string());
        assert_eq!(resolve_colormap(&s).name(), "viridis");
        s.colormap = Some("coolwarm".to_string());
        assert_eq!(resolve_colormap(&s).name(), "coolwarm");
    }

    #[test]
    fn test_catalog_styles_resolve_to_real_colormaps() {
        // Every colormap named in the default catalog must exist
        let catalog = StyleCatalog::default_catalog();
        for (id, style) in &catalog.variables {
            if let Some(name) = &style.colormap {
                assert!(
                    Colormap::by_name(name).is_some(),
                    "catalog entry {} names unknown colormap {}",
                    id,
                    name
                );
            }
        }
    }
}
