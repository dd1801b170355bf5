//! Core model for eitview.
//!
//! This crate holds everything about an EIT reconstruction display that does
//! not touch the GPU:
//! - [`Mesh`] and its [`AreaWeights`] (per-triangle and per-node areas)
//! - [`FrameBuffer`], the time-ordered reconstruction matrix
//! - [`PlaybackEngine`], the tick-driven cursor over buffered frames
//! - [`ViewState`], rotation and normalization threshold
//! - [`Options`] / [`SessionConfig`] and plain-text matrix I/O

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors return plain values which don't need must_use
#![allow(clippy::must_use_candidate)]

pub mod analysis;
pub mod error;
pub mod frames;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod options;
pub mod playback;
pub mod view;

pub use analysis::{FrameStatistics, PlaybackStatistics};
pub use error::{EitViewError, Result};
pub use frames::FrameBuffer;
pub use geometry::{triangle_area_2d, AreaWeights};
pub use io::TextMatrix;
pub use mesh::Mesh;
pub use options::{MeshConfig, ModelConfig, Options, SessionConfig};
pub use playback::{Advance, PlaybackEngine, PlaybackState};
pub use view::{ScrollDirection, ViewState};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3};
