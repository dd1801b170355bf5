//! Frame playback state machine.
//!
//! The engine owns a fractional cursor over the columns of the active frame
//! buffer. Each tick the owner renders the effective frame (the cursor's
//! floor) and then asks the engine to advance. The per-tick increment is
//! derived from how long the solver took to deliver the buffer, so that a
//! buffer is played back in roughly the time it took to produce the next one.

/// Playback states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No buffer has been delivered. Cursor is 0.
    #[default]
    Idle,
    /// A buffer was delivered but the increment is zero; column 0 is shown
    /// and no ticks run.
    Still,
    /// The cursor advances every tick.
    Playing,
    /// The cursor reached the last column; ticking stopped.
    PausedAtEnd,
}

/// Result of advancing the cursor by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved and playback continues.
    Continue,
    /// The cursor hit the end, was clamped to the last column and playback
    /// stopped. The owner renders once more at [`PlaybackEngine::effective_frame`].
    Finished,
    /// Nothing happened because playback is not running.
    Stopped,
}

/// Timer-driven playback over the columns of a frame buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackEngine {
    state: PlaybackState,
    cursor: f64,
    increment: f64,
    column_count: usize,
    tick_period: f64,
}

impl PlaybackEngine {
    /// Creates an idle engine ticking every `tick_period` seconds.
    pub fn new(tick_period: f64) -> Self {
        Self {
            state: PlaybackState::Idle,
            cursor: 0.0,
            increment: 0.0,
            column_count: 0,
            tick_period,
        }
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether periodic ticks should be running.
    pub fn is_animating(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Fractional cursor position.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Per-tick cursor advance.
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Number of columns in the active buffer.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Tick period in seconds.
    pub fn tick_period(&self) -> f64 {
        self.tick_period
    }

    /// The frame to render: the floor of the cursor.
    pub fn effective_frame(&self) -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let frame = self.cursor.floor() as usize;
        frame
    }

    /// Per-tick increment for a buffer of `column_count` frames that arrived
    /// `elapsed` seconds after the previous one.
    ///
    /// Intervals no longer than one tick (including negative or NaN values)
    /// give zero, which disables auto-advance.
    pub fn compute_increment(tick_period: f64, elapsed: f64, column_count: usize) -> f64 {
        if elapsed > tick_period {
            #[allow(clippy::cast_precision_loss)]
            let columns = column_count as f64;
            tick_period / elapsed * columns
        } else {
            0.0
        }
    }

    /// Starts playback of a freshly delivered buffer.
    ///
    /// The cursor always returns to 0.
    pub fn load(&mut self, column_count: usize, elapsed: f64) -> PlaybackState {
        let increment = Self::compute_increment(self.tick_period, elapsed, column_count);
        self.load_with_increment(column_count, increment)
    }

    /// Starts playback of a buffer with a fixed per-tick increment.
    ///
    /// Negative or non-finite increments are treated as zero.
    pub fn load_with_increment(&mut self, column_count: usize, increment: f64) -> PlaybackState {
        self.cursor = 0.0;
        self.column_count = column_count;
        self.increment = if increment.is_finite() {
            increment.max(0.0)
        } else {
            0.0
        };
        self.state = if column_count > 0 && self.increment > 0.0 {
            PlaybackState::Playing
        } else {
            PlaybackState::Still
        };
        log::debug!(
            "playback loaded {column_count} frames, increment {:.4} ({:?})",
            self.increment,
            self.state
        );
        self.state
    }

    /// Advances the cursor after the current frame was rendered.
    pub fn advance(&mut self) -> Advance {
        if self.state != PlaybackState::Playing {
            return Advance::Stopped;
        }

        self.cursor += self.increment;
        #[allow(clippy::cast_precision_loss)]
        let end = self.column_count as f64;
        if self.cursor >= end {
            self.cursor = end - 1.0;
            self.state = PlaybackState::PausedAtEnd;
            log::trace!("playback reached frame {}", self.effective_frame());
            Advance::Finished
        } else {
            Advance::Continue
        }
    }

    /// Stops ticking and forgets the buffer.
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.cursor = 0.0;
        self.increment = 0.0;
        self.column_count = 0;
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(0.02)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increment_formula() {
        // 10 frames delivered 0.2 s apart: one frame per tick
        let inc = PlaybackEngine::compute_increment(0.02, 0.2, 10);
        assert!((inc - 1.0).abs() < 1e-12);
        assert_eq!(PlaybackEngine::compute_increment(0.02, 0.02, 10), 0.0);
        assert_eq!(PlaybackEngine::compute_increment(0.02, -1.0, 10), 0.0);
        assert_eq!(PlaybackEngine::compute_increment(0.02, f64::NAN, 10), 0.0);
    }

    #[test]
    fn test_load_resets_cursor() {
        let mut engine = PlaybackEngine::default();
        engine.load(4, 0.08);
        engine.advance();
        engine.advance();
        assert!(engine.cursor() > 0.0);
        engine.load(4, 0.08);
        assert_eq!(engine.cursor(), 0.0);
        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_zero_increment_is_still() {
        let mut engine = PlaybackEngine::default();
        assert_eq!(engine.load(5, 0.01), PlaybackState::Still);
        assert!(!engine.is_animating());
        for _ in 0..10 {
            assert_eq!(engine.advance(), Advance::Stopped);
        }
        assert_eq!(engine.cursor(), 0.0);
        assert_eq!(engine.state(), PlaybackState::Still);
    }

    #[test]
    fn test_runs_to_end_and_stops() {
        let mut engine = PlaybackEngine::default();
        // increment 0.02 / 0.05 * 3 = 1.2
        engine.load(3, 0.05);
        assert_eq!(engine.advance(), Advance::Continue);
        assert_eq!(engine.effective_frame(), 1);
        assert_eq!(engine.advance(), Advance::Continue);
        assert_eq!(engine.effective_frame(), 2);
        assert_eq!(engine.advance(), Advance::Finished);
        assert_eq!(engine.effective_frame(), 2);
        assert_eq!(engine.state(), PlaybackState::PausedAtEnd);

        // further ticks change nothing
        assert_eq!(engine.advance(), Advance::Stopped);
        assert_eq!(engine.cursor(), 2.0);
    }

    #[test]
    fn test_empty_buffer_is_still() {
        let mut engine = PlaybackEngine::default();
        assert_eq!(engine.load(0, 1.0), PlaybackState::Still);
    }

    #[test]
    fn test_reset() {
        let mut engine = PlaybackEngine::default();
        engine.load(3, 0.05);
        engine.advance();
        engine.reset();
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert_eq!(engine.cursor(), 0.0);
        assert_eq!(engine.increment(), 0.0);
        assert_eq!(engine.column_count(), 0);
    }

    #[test]
    fn test_fixed_increment_plays_every_column() {
        let mut engine = PlaybackEngine::new(0.02);
        assert_eq!(engine.load_with_increment(10, 1.0), PlaybackState::Playing);
        let mut shown = vec![engine.effective_frame()];
        while engine.advance() == Advance::Continue {
            shown.push(engine.effective_frame());
        }
        assert_eq!(shown, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_fixed_increment_sanitized() {
        let mut engine = PlaybackEngine::default();
        assert_eq!(engine.load_with_increment(4, -1.0), PlaybackState::Still);
        assert_eq!(engine.load_with_increment(4, f64::NAN), PlaybackState::Still);
        assert_eq!(engine.increment(), 0.0);
    }

    proptest! {
        #[test]
        fn cursor_never_passes_last_column(
            columns in 1usize..64,
            elapsed in 0.0f64..5.0,
            ticks in 0usize..500,
        ) {
            let mut engine = PlaybackEngine::default();
            engine.load(columns, elapsed);
            for _ in 0..ticks {
                engine.advance();
                prop_assert!(engine.effective_frame() < columns);
                #[allow(clippy::cast_precision_loss)]
                let last = (columns - 1) as f64;
                prop_assert!(engine.cursor() <= last || engine.is_animating());
            }
        }
    }
}
