//! Map panel decoration: basemap layers, gridlines, and the fire marker.
//!
//! Reference layers (ocean fill, land fill, coastlines, borders) draw
//! beneath the data raster; gridlines and the marker draw above it. All
//! vector work happens on a tiny-skia pixmap which is then converted back
//! to a straight-alpha RGBA image for figure composition.

use fwi_common::{BoundingBox, Color, FwiError, FwiResult};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tiny_skia::{
    FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash, Transform,
};

/// Gridline spacing in degrees, both axes.
pub const GRID_SPACING_DEG: f64 = 0.25;

/// Reference geometry and fill colors drawn beneath the data layer.
///
/// Geometry is supplied by the caller in lon/lat (the dashboard shell owns
/// the Natural Earth extracts); the default basemap is plain ocean and
/// land fills with no line work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basemap {
    pub ocean_color: Color,
    pub land_color: Color,
    /// Closed land polygons, outer rings only.
    #[serde(default)]
    pub land_polygons: Vec<Vec<(f64, f64)>>,
    #[serde(default)]
    pub coastlines: Vec<Vec<(f64, f64)>>,
    #[serde(default)]
    pub borders: Vec<Vec<(f64, f64)>>,
}

impl Default for Basemap {
    fn default() -> Self {
        Self {
            ocean_color: Color::rgb(173, 216, 230), // lightblue
            land_color: Color::rgb(211, 211, 211),  // lightgray
            land_polygons: Vec::new(),
            coastlines: Vec::new(),
            borders: Vec::new(),
        }
    }
}

/// Positions of gridlines: every multiple of `spacing` within [min, max].
pub fn gridline_positions(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    let mut positions = Vec::new();
    let mut tick = (min / spacing).ceil() * spacing;
    // Tolerate float error at the upper edge
    while tick <= max + spacing * 1e-9 {
        positions.push(tick);
        tick += spacing;
    }
    positions
}

/// Geographic to pixel transform for a panel of the given size.
fn to_px(extent: &BoundingBox, width: u32, height: u32, lon: f64, lat: f64) -> (f32, f32) {
    let x = (lon - extent.min_lon) / extent.width() * width as f64;
    let y = (extent.max_lat - lat) / extent.height() * height as f64;
    (x as f32, y as f32)
}

fn polyline_path(
    points: &[(f64, f64)],
    extent: &BoundingBox,
    width: u32,
    height: u32,
    close: bool,
) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let (x0, y0) = to_px(extent, width, height, points.first()?.0, points.first()?.1);
    pb.move_to(x0, y0);
    for &(lon, lat) in &points[1..] {
        let (x, y) = to_px(extent, width, height, lon, lat);
        pb.line_to(x, y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn stroke_polylines(
    pixmap: &mut Pixmap,
    lines: &[Vec<(f64, f64)>],
    extent: &BoundingBox,
    color: Color,
    stroke: &Stroke,
) {
    let paint = solid_paint(color);
    let (w, h) = (pixmap.width(), pixmap.height());
    for line in lines {
        if line.len() < 2 {
            continue;
        }
        if let Some(path) = polyline_path(line, extent, w, h, false) {
            pixmap.stroke_path(&path, &paint, stroke, Transform::identity(), None);
        }
    }
}

/// Assemble the map panel: basemap beneath the data raster, gridlines and
/// the optional fire marker above it.
pub fn render_panel(
    data_pixels: &[u8],
    width: u32,
    height: u32,
    extent: &BoundingBox,
    basemap: &Basemap,
    marker: Option<(f64, f64)>,
) -> FwiResult<RgbaImage> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| FwiError::InvalidGrid("panel dimensions must be non-zero".to_string()))?;

    // Ocean fill as the background
    let oc = basemap.ocean_color;
    pixmap.fill(tiny_skia::Color::from_rgba8(oc.r, oc.g, oc.b, oc.a));

    // Land polygons
    let land_paint = solid_paint(basemap.land_color);
    for polygon in &basemap.land_polygons {
        if polygon.len() < 3 {
            continue;
        }
        if let Some(path) = polyline_path(polygon, extent, width, height, true) {
            pixmap.fill_path(&path, &land_paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    // Coastlines and borders, still beneath the data
    let coast_stroke = Stroke {
        width: 1.2,
        ..Stroke::default()
    };
    stroke_polylines(
        &mut pixmap,
        &basemap.coastlines,
        extent,
        Color::rgb(64, 64, 64),
        &coast_stroke,
    );
    let border_stroke = Stroke {
        width: 1.0,
        ..Stroke::default()
    };
    stroke_polylines(
        &mut pixmap,
        &basemap.borders,
        extent,
        Color::rgb(120, 120, 120),
        &border_stroke,
    );

    // Data raster. Cells are fully opaque or fully transparent, so the
    // straight-alpha bytes are already valid premultiplied data.
    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| FwiError::InvalidGrid("panel dimensions must be non-zero".to_string()))?;
    let data_pixmap = Pixmap::from_vec(data_pixels.to_vec(), size).ok_or_else(|| {
        FwiError::InvalidGrid("data raster does not match panel dimensions".to_string())
    })?;
    pixmap.draw_pixmap(
        0,
        0,
        data_pixmap.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    draw_gridlines(&mut pixmap, extent);

    if let Some((lon, lat)) = marker {
        draw_marker(&mut pixmap, extent, lon, lat);
    }

    Ok(demultiply(pixmap))
}

/// Dashed gray gridlines at fixed 0.25° spacing in both axes.
fn draw_gridlines(pixmap: &mut Pixmap, extent: &BoundingBox) {
    let (w, h) = (pixmap.width(), pixmap.height());
    let paint = solid_paint(Color::rgba(128, 128, 128, 204));
    let stroke = Stroke {
        width: 1.0,
        dash: StrokeDash::new(vec![4.0, 4.0], 0.0),
        ..Stroke::default()
    };

    for lon in gridline_positions(extent.min_lon, extent.max_lon, GRID_SPACING_DEG) {
        let (x, _) = to_px(extent, w, h, lon, extent.max_lat);
        let mut pb = PathBuilder::new();
        pb.move_to(x, 0.0);
        pb.line_to(x, h as f32);
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
    for lat in gridline_positions(extent.min_lat, extent.max_lat, GRID_SPACING_DEG) {
        let (_, y) = to_px(extent, w, h, extent.min_lon, lat);
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, y);
        pb.line_to(w as f32, y);
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

/// Fire-location marker: a filled dot with a white ring.
fn draw_marker(pixmap: &mut Pixmap, extent: &BoundingBox, lon: f64, lat: f64) {
    let (x, y) = to_px(extent, pixmap.width(), pixmap.height(), lon, lat);
    if let Some(circle) = PathBuilder::from_circle(x, y, 5.0) {
        let fill = solid_paint(Color::rgb(0xd7, 0x30, 0x27));
        pixmap.fill_path(&circle, &fill, FillRule::Winding, Transform::identity(), None);

        let ring = solid_paint(Color::rgb(255, 255, 255));
        let stroke = Stroke {
            width: 1.5,
            ..Stroke::default()
        };
        pixmap.stroke_path(&circle, &ring, &stroke, Transform::identity(), None);
    }
}

/// Convert a premultiplied tiny-skia pixmap to a straight-alpha image.
fn demultiply(pixmap: Pixmap) -> RgbaImage {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut data = pixmap.take();
    for pixel in data.chunks_exact_mut(4) {
        let a = pixel[3] as u16;
        if a > 0 && a < 255 {
            pixel[0] = (pixel[0] as u16 * 255 / a) as u8;
            pixel[1] = (pixel[1] as u16 * 255 / a) as u8;
            pixel[2] = (pixel[2] as u16 * 255 / a) as u8;
        }
    }
    // Dimensions match by construction
    RgbaImage::from_raw(width, height, data).unwrap_or_else(|| RgbaImage::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gridline_positions_quarter_degree() {
        let ticks = gridline_positions(0.0, 1.0, GRID_SPACING_DEG);
        assert_eq!(ticks, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_gridline_positions_offset_extent() {
        let ticks = gridline_positions(40.1, 40.7, GRID_SPACING_DEG);
        assert_eq!(ticks, vec![40.25, 40.5]);
    }

    #[test]
    fn test_to_px_corners() {
        let extent = BoundingBox::new(0.0, 40.0, 2.0, 42.0);
        assert_eq!(to_px(&extent, 200, 100, 0.0, 42.0), (0.0, 0.0));
        assert_eq!(to_px(&extent, 200, 100, 2.0, 40.0), (200.0, 100.0));
    }

    #[test]
    fn test_render_panel_data_over_basemap() {
        // Extent chosen so no 0.25° gridline crosses the panel
        let extent = BoundingBox::new(0.01, 40.01, 0.24, 40.24);
        let basemap = Basemap::default();
        // 2x2 raster: opaque red on the left column, transparent on the right
        let red = [255, 0, 0, 255];
        let clear = [0, 0, 0, 0];
        let mut data = Vec::new();
        for row in [[red, clear], [red, clear]] {
            for px in row {
                data.extend_from_slice(&px);
            }
        }
        let panel = render_panel(&data, 2, 2, &extent, &basemap, None).unwrap();
        // Left pixel shows the data, right pixel shows the ocean fill
        assert_eq!(panel.get_pixel(0, 0).0, red);
        assert_eq!(
            panel.get_pixel(1, 0).0[..3],
            basemap.ocean_color.to_array()[..3]
        );
    }

    #[test]
    fn test_render_panel_rejects_mismatched_raster() {
        let extent = BoundingBox::new(0.0, 40.0, 1.0, 41.0);
        let result = render_panel(&[0u8; 4], 2, 2, &extent, &Basemap::default(), None);
        assert!(result.is_err());
    }
}
