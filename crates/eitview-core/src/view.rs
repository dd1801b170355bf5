//! Interactive view state: rotation and normalization threshold.

use glam::Vec2;

/// Direction of a scroll-wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Away from the user; raises the threshold.
    Up,
    /// Towards the user; lowers the threshold.
    Down,
}

impl ScrollDirection {
    /// Classifies a signed wheel delta. Zero deltas carry no direction.
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Up)
        } else if delta < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }
}

/// Rotation angles and normalization threshold.
///
/// Mutated by user input only; its lifecycle is independent of frame data.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Rotation about the x axis (index 0) and the z axis (index 1), degrees.
    rotation: [f32; 2],
    threshold: f32,
    threshold_step: f32,
    default_threshold: f32,
    anchor: Option<Vec2>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(0.05, 0.1)
    }
}

impl ViewState {
    /// Creates a view in its reset state.
    pub fn new(threshold_step: f32, default_threshold: f32) -> Self {
        Self {
            rotation: [0.0, 0.0],
            threshold: default_threshold.max(0.0),
            threshold_step,
            default_threshold: default_threshold.max(0.0),
            anchor: None,
        }
    }

    /// Rotation angles in degrees.
    pub fn rotation(&self) -> [f32; 2] {
        self.rotation
    }

    /// Current normalization threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Restores rotation (0, 0) and the default threshold.
    pub fn reset(&mut self) {
        self.rotation = [0.0, 0.0];
        self.threshold = self.default_threshold;
        self.anchor = None;
    }

    /// Records the drag anchor on a primary-button press.
    pub fn press(&mut self, position: Vec2) {
        self.anchor = Some(position);
    }

    /// Ends a drag.
    pub fn release(&mut self) {
        self.anchor = None;
    }

    /// Rotates by the pointer travel since the anchor and moves the anchor.
    ///
    /// Returns false if no press was recorded.
    pub fn drag(&mut self, position: Vec2) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        self.rotation[1] += anchor.x - position.x;
        self.rotation[0] += anchor.y - position.y;
        self.anchor = Some(position);
        true
    }

    /// Steps the threshold one notch. The threshold never drops below zero.
    ///
    /// Returns true if the threshold changed.
    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Up => {
                self.threshold = (self.threshold + self.threshold_step).max(0.0);
                true
            }
            ScrollDirection::Down if self.threshold >= self.threshold_step => {
                self.threshold = (self.threshold - self.threshold_step).max(0.0);
                true
            }
            ScrollDirection::Down => false,
        }
    }
}
