use std::time::Instant;

use super::{App, TITLE_REFRESH};
use crate::viewer::ViewerStatistics;

impl App {
    /// Draws the current buffers and refreshes the window title.
    pub(super) fn render(&mut self) {
        let Some(engine) = &mut self.engine else {
            return;
        };

        if let Err(e) = self.viewer.render(engine) {
            log::error!("{e}");
            self.close_requested = true;
            return;
        }

        let now = Instant::now();
        let stale = self
            .last_title_update
            .map_or(true, |last| now.duration_since(last) >= TITLE_REFRESH);
        if stale {
            if let (Some(window), Some(stats)) = (&self.window, self.viewer.statistics()) {
                window.set_title(&title(&stats, self.logger.is_running()));
            }
            self.last_title_update = Some(now);
        }
    }
}

/// Window title summarizing playback and the displayed frame.
pub(super) fn title(stats: &ViewerStatistics, logging: bool) -> String {
    let playback = &stats.playback;
    let mut title = format!(
        "eitview | {:.1} fps | threshold {:.0}% | {} elements",
        playback.system_fps, playback.threshold_percent, playback.mesh_elements
    );
    if let Some(frame) = stats.frame {
        // Conductivities are shown in mS.
        title.push_str(&format!(
            " | min {:.3} max {:.3} mean {:.3} std {:.3} mS",
            frame.min * 1e3,
            frame.max * 1e3,
            frame.mean * 1e3,
            frame.std_dev * 1e3
        ));
    }
    if logging {
        title.push_str(" | logging");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use eitview_core::{FrameStatistics, PlaybackStatistics};

    #[test]
    fn test_title() {
        let stats = ViewerStatistics {
            frame: Some(FrameStatistics {
                min: -0.001,
                max: 0.002,
                mean: 0.0005,
                std_dev: 0.001,
            }),
            playback: PlaybackStatistics::compute(0.02, 1.0, 0.1, 42),
        };
        let title = title(&stats, true);
        assert!(title.starts_with("eitview | 50.0 fps | threshold 10% | 42 elements"));
        assert!(title.contains("min -1.000 max 2.000"));
        assert!(title.ends_with("| logging"));
    }
}
