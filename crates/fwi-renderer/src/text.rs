//! Text labels for titles, axis ticks, and colorbar annotations.
//!
//! The font is supplied by the caller (the dashboard shell ships its own
//! typeface). When no font is configured the figure is still produced and
//! all label strings remain on the structured artifact; only the pixel
//! text layers are skipped.

use fwi_common::{Color, FwiError, FwiResult};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};
use std::path::Path;

/// A TrueType font used for figure labels.
#[derive(Clone)]
pub struct LabelFont {
    font: Font<'static>,
}

impl LabelFont {
    /// Load a font from TTF bytes. Returns `None` when the bytes are not a
    /// valid TrueType font.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self { font })
    }

    /// Load a font from a TTF file.
    pub fn from_file(path: impl AsRef<Path>) -> FwiResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes).ok_or_else(|| {
            FwiError::InvalidStyle(format!(
                "'{}' is not a valid TrueType font",
                path.as_ref().display()
            ))
        })
    }
}

/// Draw a text label at (x, y) (top-left anchored).
pub fn draw_label(
    img: &mut RgbaImage,
    font: &LabelFont,
    text: &str,
    x: i32,
    y: i32,
    size: f32,
    color: Color,
) {
    draw_text_mut(
        img,
        Rgba(color.to_array()),
        x,
        y,
        Scale::uniform(size),
        &font.font,
        text,
    );
}

/// Pixel width of a laid-out text string, for centering.
pub fn text_width(font: &LabelFont, text: &str, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    font.font
        .layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}
