//! Map rendering for the fire-weather dashboard.
//!
//! Turns one variable of a [`fwi_grid::Dataset`] at one time step into a
//! complete figure: basemap, filled-mesh data layer, dashed gridlines,
//! colorbar, title, and optional fire marker. The entrypoint is
//! [`render`]; its output is a [`RenderedMap`] carrying both the pixels
//! and the structured pieces (title, extent, colorbar model) so the
//! dashboard shell and tests can inspect the figure without decoding it.
//!
//! # Example
//!
//! ```no_run
//! use fwi_common::StyleCatalog;
//! use fwi_grid::testdata;
//! use fwi_renderer::{render, RenderOptions};
//!
//! let dataset = testdata::forecast_dataset();
//! let catalog = StyleCatalog::default_catalog();
//! let map = render(&dataset, "t2m", &catalog, &RenderOptions::default()).unwrap();
//! map.write_png("t2m.png").unwrap();
//! ```

pub mod colormap;
pub mod decor;
pub mod legend;
pub mod png;
pub mod raster;
pub mod render;
pub mod text;

pub use colormap::Colormap;
pub use decor::{Basemap, GRID_SPACING_DEG};
pub use legend::{Colorbar, ColorbarTick};
pub use render::{render, FireMarker, RenderOptions, RenderedMap};
pub use text::LabelFont;
