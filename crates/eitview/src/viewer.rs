//! The viewer: single owner of mesh, frames, playback and view state.

use std::time::Duration;

use eitview_core::{
    Advance, AreaWeights, EitViewError, FrameBuffer, FrameStatistics, Mesh, Options,
    PlaybackEngine, PlaybackState, PlaybackStatistics, Result, ScrollDirection, Vec2, ViewState,
};
use eitview_render::{map_frame, view_transform, RenderFrame, RenderSink, SceneBuffers};

/// Everything that exists only between `initialize` and `teardown`.
struct Scene {
    mesh: Mesh,
    weights: AreaWeights,
    buffers: SceneBuffers,
    frames: FrameBuffer,
}

/// Statistics shown alongside the rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerStatistics {
    /// Statistics of the frame currently displayed, if any.
    pub frame: Option<FrameStatistics>,
    /// Frame rate, threshold and mesh size of the playback.
    pub playback: PlaybackStatistics,
}

/// Displays a stream of reconstruction frames on a mesh.
///
/// All mutation goes through `&mut self`, so deliveries, ticks and input are
/// naturally serialized. Methods that change what is on screen set a redraw
/// flag; the owner then calls [`Viewer::render`] with a [`RenderSink`].
///
/// ```
/// use eitview::{FrameBuffer, Mesh, Options, Vec2, Viewer};
///
/// let mesh = Mesh::new(
///     vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
///     vec![[0, 1, 2]],
///     vec![],
///     1.0,
/// )?;
/// let mut viewer = Viewer::new(Options::default());
/// viewer.initialize(mesh, 1, 1)?;
/// viewer.load_frame(FrameBuffer::from_frames(&[vec![0.5], vec![1.0]])?, 0.04)?;
/// viewer.tick();
/// assert_eq!(viewer.current_effective_frame_index(), 1);
/// # Ok::<(), eitview::EitViewError>(())
/// ```
pub struct Viewer {
    options: Options,
    scene: Option<Scene>,
    playback: PlaybackEngine,
    view: ViewState,
    norm: f32,
    needs_redraw: bool,
}

impl Viewer {
    /// Creates an uninitialized viewer.
    pub fn new(options: Options) -> Self {
        Self {
            playback: PlaybackEngine::new(options.tick_period_secs()),
            view: ViewState::new(options.threshold_step, options.default_threshold),
            options,
            scene: None,
            norm: 1.0,
            needs_redraw: false,
        }
    }

    /// The options this viewer was created with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Interval between playback ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.options.tick_period_ms))
    }

    /// Whether a mesh has been loaded.
    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    /// Loads a mesh and allocates an all-zero frame buffer.
    ///
    /// Any previous session is discarded. Playback starts `Idle` and the view
    /// is reset; the zero frame is mapped so a first render shows the mesh.
    pub fn initialize(
        &mut self,
        mesh: Mesh,
        frame_count: usize,
        triangle_count: usize,
    ) -> Result<()> {
        if triangle_count != mesh.num_triangles() {
            return Err(EitViewError::SizeMismatch {
                expected: mesh.num_triangles(),
                actual: triangle_count,
            });
        }

        let weights = AreaWeights::compute(&mesh);
        let buffers = SceneBuffers::new(&mesh, &self.options);
        log::info!(
            "viewer initialized: {} nodes, {} triangles, {} electrodes, area {:.4}",
            mesh.num_nodes(),
            mesh.num_triangles(),
            mesh.num_electrodes(),
            weights.total_area()
        );

        self.scene = Some(Scene {
            frames: FrameBuffer::zeros(triangle_count, frame_count),
            mesh,
            weights,
            buffers,
        });
        self.playback.reset();
        self.view.reset();
        self.remap();
        Ok(())
    }

    /// Replaces the frame buffer with a freshly solved one.
    ///
    /// The cursor restarts at column 0 and the increment is derived from
    /// `elapsed_seconds`, the time the solver took to produce the buffer.
    /// Rejected buffers leave the current one playing.
    pub fn load_frame(
        &mut self,
        frames: FrameBuffer,
        elapsed_seconds: f64,
    ) -> Result<PlaybackState> {
        log::debug!("buffer delivered after {elapsed_seconds:.3}s");
        self.replace_frames(frames, |playback, columns| {
            playback.load(columns, elapsed_seconds)
        })
    }

    /// Replaces the frame buffer with a recording played at one frame per
    /// tick.
    pub fn load_recording(&mut self, frames: FrameBuffer) -> Result<PlaybackState> {
        self.replace_frames(frames, |playback, columns| {
            playback.load_with_increment(columns, 1.0)
        })
    }

    fn replace_frames(
        &mut self,
        frames: FrameBuffer,
        start: impl FnOnce(&mut PlaybackEngine, usize) -> PlaybackState,
    ) -> Result<PlaybackState> {
        let scene = self.scene.as_mut().ok_or(EitViewError::NotInitialized)?;

        if frames.rows() != scene.mesh.num_triangles() {
            log::warn!(
                "rejected frame buffer with {} rows for {} triangles",
                frames.rows(),
                scene.mesh.num_triangles()
            );
            return Err(EitViewError::SizeMismatch {
                expected: scene.mesh.num_triangles(),
                actual: frames.rows(),
            });
        }
        if frames.is_empty() {
            log::warn!("rejected frame buffer without frames");
            return Err(EitViewError::EmptyFrameBuffer);
        }

        scene.frames = frames;
        let state = start(&mut self.playback, scene.frames.columns());
        if log::log_enabled!(log::Level::Debug) {
            if let Some(stats) = FrameStatistics::compute(scene.frames.column(0), &scene.weights)
            {
                log::debug!(
                    "loaded {} frames: min {:.4} max {:.4} mean {:.4} std {:.4}",
                    scene.frames.columns(),
                    stats.min,
                    stats.max,
                    stats.mean,
                    stats.std_dev
                );
            }
        }

        // Playing buffers are picked up by the next tick.
        if state == PlaybackState::Still {
            self.remap();
        }
        Ok(state)
    }

    /// Runs one playback tick: maps the effective frame, then advances.
    ///
    /// When the cursor runs off the end it is clamped and the last frame is
    /// mapped once more. Does nothing unless playing.
    pub fn tick(&mut self) -> Advance {
        if self.scene.is_none() || !self.playback.is_animating() {
            return Advance::Stopped;
        }
        self.remap();
        let advance = self.playback.advance();
        if advance == Advance::Finished {
            log::debug!("playback reached frame {}", self.playback.effective_frame());
            self.remap();
        }
        advance
    }

    /// Starts a rotation drag at `position` (window pixels).
    pub fn press(&mut self, position: Vec2) {
        self.view.press(position);
    }

    /// Ends a rotation drag.
    pub fn release(&mut self) {
        self.view.release();
    }

    /// Continues a rotation drag. Returns whether the rotation changed.
    pub fn drag(&mut self, position: Vec2) -> bool {
        let changed = self.view.drag(position);
        if changed && !self.playback.is_animating() {
            self.needs_redraw = self.scene.is_some();
        }
        changed
    }

    /// Adjusts the normalization threshold by one step.
    ///
    /// Returns whether the threshold changed. While paused the current frame
    /// is re-mapped immediately; while playing the next tick picks it up.
    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        let changed = self.view.scroll(direction);
        if changed && !self.playback.is_animating() {
            self.remap();
        }
        changed
    }

    /// Restores the default rotation and threshold.
    pub fn reset_view(&mut self) {
        self.view.reset();
        if !self.playback.is_animating() {
            self.remap();
        }
    }

    /// Drops the mesh and frames and stops playback.
    pub fn teardown(&mut self) {
        if self.scene.take().is_some() {
            log::info!("viewer torn down");
        }
        self.playback.reset();
        self.view.reset();
        self.norm = 1.0;
        self.needs_redraw = false;
    }

    /// Column currently selected by the playback cursor.
    pub fn current_effective_frame_index(&self) -> usize {
        self.playback.effective_frame()
    }

    /// Current normalization threshold.
    pub fn current_threshold(&self) -> f32 {
        self.view.threshold()
    }

    /// Current rotation in degrees, `[about x, about z]`.
    pub fn rotation(&self) -> [f32; 2] {
        self.view.rotation()
    }

    /// Current playback state.
    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Whether the playback tick should be running.
    pub fn is_animating(&self) -> bool {
        self.playback.is_animating()
    }

    /// Norm used for the most recent mapping.
    pub fn norm(&self) -> f32 {
        self.norm
    }

    /// Whether something changed since the last [`Viewer::render`].
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// The loaded mesh.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.scene.as_ref().map(|s| &s.mesh)
    }

    /// The active frame buffer.
    pub fn frames(&self) -> Option<&FrameBuffer> {
        self.scene.as_ref().map(|s| &s.frames)
    }

    /// The most recently mapped render buffers.
    pub fn buffers(&self) -> Option<&SceneBuffers> {
        self.scene.as_ref().map(|s| &s.buffers)
    }

    /// Statistics of the displayed frame and of the playback.
    pub fn statistics(&self) -> Option<ViewerStatistics> {
        let scene = self.scene.as_ref()?;
        let frame = Self::displayed_column(&scene.frames, self.playback.effective_frame())
            .and_then(|values| FrameStatistics::compute(values, &scene.weights));
        Some(ViewerStatistics {
            frame,
            playback: PlaybackStatistics::compute(
                self.playback.tick_period(),
                self.playback.increment(),
                self.view.threshold(),
                scene.mesh.num_triangles(),
            ),
        })
    }

    /// Draws the current buffers. A no-op before initialization.
    pub fn render(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
        let Some(frame) = self.frame(sink.aspect_ratio()) else {
            return Ok(());
        };
        sink.submit(&frame)?;
        self.needs_redraw = false;
        Ok(())
    }

    /// The current buffers and view as a frame for a target with the given
    /// aspect ratio. `None` before initialization.
    pub fn frame(&self, aspect_ratio: f32) -> Option<RenderFrame<'_>> {
        let scene = self.scene.as_ref()?;
        let transform = view_transform(&self.view, aspect_ratio);
        Some(scene.buffers.frame(transform, self.options.background_color))
    }

    fn displayed_column(frames: &FrameBuffer, index: usize) -> Option<&[f32]> {
        (index < frames.columns()).then(|| frames.column(index))
    }

    /// Maps the effective frame into the render buffers.
    fn remap(&mut self) {
        let Some(scene) = &mut self.scene else {
            return;
        };
        let threshold = self.view.threshold();
        let index = self.playback.effective_frame();
        let zeros;
        let values = match Self::displayed_column(&scene.frames, index) {
            Some(values) => values,
            None => {
                zeros = vec![0.0; scene.mesh.num_triangles()];
                &zeros
            }
        };
        self.norm = map_frame(&mut scene.buffers, &scene.mesh, &scene.weights, values, threshold);
        self.needs_redraw = true;
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
