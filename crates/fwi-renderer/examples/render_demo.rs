//! Render the synthetic forecast dataset to PNG files.
//!
//! Run with: cargo run --example render_demo [font.ttf]

use fwi_common::StyleCatalog;
use fwi_grid::testdata;
use fwi_renderer::{render, LabelFont, RenderOptions};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let font = std::env::args()
        .nth(1)
        .map(LabelFont::from_file)
        .transpose()?;

    let dataset = testdata::forecast_dataset();
    let catalog = StyleCatalog::default_catalog();

    for variable in ["t2m", "rain_24h", "FWI_risk"] {
        let options = RenderOptions {
            font: font.clone(),
            ..RenderOptions::default()
        };
        let map = render(&dataset, variable, &catalog, &options)?;
        let path = format!("{}.png", variable);
        map.write_png(&path)?;
        info!(variable, path = %path, title = %map.title, "wrote figure");
    }

    Ok(())
}
