//! Gridded FWI forecast dataset model.
//!
//! A [`Dataset`] maps variable names to [`GridField`]s: 2-D or 3-D `f32`
//! arrays carrying their own `longitude`/`latitude` coordinate arrays and
//! an optional `time` dimension. The dataset is loaded once per dashboard
//! session by an external collaborator and is read-only to the renderer.

pub mod dataset;
pub mod testdata;

pub use dataset::{format_day, Dataset, FieldSlice, GridField};
