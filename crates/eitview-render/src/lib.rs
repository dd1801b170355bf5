//! Rendering pipeline for eitview.
//!
//! This crate turns reconstruction frames into drawable buffers and draws them:
//! - [`map_frame`]: normalization, diverging colors and area-weighted heights
//! - [`SceneBuffers`]: per-vertex positions and colors plus electrode lines
//! - [`view_transform`]: rotation and orthographic projection
//! - [`RenderSink`]: the rasterizer seam, implemented by the wgpu [`RenderEngine`]
//! - [`screenshot`]: reading a rendered frame back into a PNG

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors return plain values which don't need must_use
#![allow(clippy::must_use_candidate)]
// Vertex counts are far below u32::MAX
#![allow(clippy::cast_possible_truncation)]

pub mod buffer;
pub mod camera;
pub mod color_maps;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod screenshot;
pub mod sink;

pub use buffer::SceneBuffers;
pub use camera::{project_point, view_transform, VIEW_EXTENT};
pub use color_maps::{normalization, DivergingColorMap};
pub use engine::{RenderEngine, ViewUniforms};
pub use error::{RenderError, RenderResult};
pub use mapper::map_frame;
pub use screenshot::save_png;
pub use sink::{RenderFrame, RenderSink};
