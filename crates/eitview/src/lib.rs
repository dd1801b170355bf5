//! eitview: an interactive viewer for electrical impedance tomography.
//!
//! A reconstruction is a scalar per mesh triangle. eitview animates a stream
//! of such frames on the mesh: every triangle gets a diverging blue-green-red
//! color, every node is lifted by the area-weighted average of its incident
//! triangles, and the electrodes are drawn as line segments. The view can be
//! rotated by dragging and the color normalization threshold adjusted with the
//! scroll wheel.
//!
//! # Quick Start
//!
//! ```no_run
//! use eitview::*;
//!
//! fn main() -> Result<()> {
//!     let session = SessionConfig::load("session.json")?;
//!
//!     show_streaming(&session, |mut sender| {
//!         let frames = FrameBuffer::zeros(1024, 10);
//!         sender.send_timed(frames);
//!     })
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Viewer`] owns the mesh, the active [`FrameBuffer`], the playback engine
//!   and the view state. It can be driven headlessly and drawn into any
//!   [`RenderSink`].
//! - [`FrameSender`] delivers solved buffers from another thread into the
//!   window's event loop.
//! - [`DataLogger`] records delivered buffers for later analysis.
//!
//! # Controls
//!
//! - Left drag: rotate
//! - Scroll: raise or lower the normalization threshold
//! - `R`: reset the view
//! - `L`: start or stop the data logger, `C`: clear it, `S`: save it
//! - `P`: save the view as a PNG
//! - `Esc`: quit

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors return plain values which don't need must_use
#![allow(clippy::must_use_candidate)]

mod app;
mod channel;
mod datalogger;
mod viewer;

pub use channel::{FrameSender, UserEvent};
pub use datalogger::{DataLogger, LogEntry};
pub use viewer::{Viewer, ViewerStatistics};

// Re-export core types
pub use eitview_core::{
    io, Advance, AreaWeights, EitViewError, FrameBuffer, FrameStatistics, Mesh, MeshConfig,
    ModelConfig, Options, PlaybackState, PlaybackStatistics, Result, ScrollDirection,
    SessionConfig, TextMatrix, ViewState, Mat4, Vec2, Vec3,
};

// Re-export render types
pub use eitview_render::{
    map_frame, view_transform, DivergingColorMap, RenderEngine, RenderError, RenderFrame,
    RenderResult, RenderSink, SceneBuffers,
};

/// Builds a viewer for a session, initialized with its mesh.
///
/// The frame buffer starts with `frame_count` zero frames.
pub fn viewer_for(session: &SessionConfig, frame_count: usize) -> Result<Viewer> {
    let mesh = session.load_mesh()?;
    let triangles = mesh.num_triangles();
    let mut viewer = Viewer::new(session.viewer.clone());
    viewer.initialize(mesh, frame_count, triangles)?;
    Ok(viewer)
}

/// Shows the mesh of a session in a window, waiting for no data.
///
/// This function blocks until the window is closed.
pub fn show(session: &SessionConfig) -> Result<()> {
    show_with(session, None)
}

/// Shows a session, optionally playing back a recorded frame buffer.
///
/// A recorded buffer is played at one frame per tick. This function blocks
/// until the window is closed.
pub fn show_with(session: &SessionConfig, recorded: Option<FrameBuffer>) -> Result<()> {
    let frame_count = recorded.as_ref().map_or(1, FrameBuffer::columns);
    let mut viewer = viewer_for(session, frame_count)?;
    if let Some(frames) = recorded {
        viewer.load_recording(frames)?;
    }
    show_viewer(viewer)
}

/// Shows a session and runs `producer` on its own thread with a
/// [`FrameSender`] for delivering solved buffers.
///
/// This function blocks until the window is closed.
pub fn show_streaming<F>(session: &SessionConfig, producer: F) -> Result<()>
where
    F: FnOnce(FrameSender) + Send + 'static,
{
    show_viewer_streaming(viewer_for(session, 1)?, producer)
}

/// Shows an already initialized viewer.
pub fn show_viewer(viewer: Viewer) -> Result<()> {
    let _ = env_logger::try_init();
    app::run_app(viewer, None)
}

/// Shows an already initialized viewer fed by `producer`.
pub fn show_viewer_streaming<F>(viewer: Viewer, producer: F) -> Result<()>
where
    F: FnOnce(FrameSender) + Send + 'static,
{
    let _ = env_logger::try_init();
    app::run_app(viewer, Some(Box::new(producer)))
}
