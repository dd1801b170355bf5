//! Recording of delivered frame buffers.

use std::ffi::OsString;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use eitview_core::io::save_matrix;
use eitview_core::{FrameBuffer, Mesh, Result};

/// One delivered buffer and when it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub frames: FrameBuffer,
}

/// Records frame buffers while running.
///
/// The logger starts stopped. Entries accumulate until [`DataLogger::reset`].
#[derive(Debug, Default)]
pub struct DataLogger {
    running: bool,
    entries: Vec<LogEntry>,
}

impl DataLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts recording deliveries.
    pub fn start(&mut self) {
        if !self.running {
            log::info!("data logger started");
        }
        self.running = true;
    }

    /// Stops recording; recorded entries are kept.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("data logger stopped with {} entries", self.entries.len());
        }
        self.running = false;
    }

    /// Toggles recording and returns the new state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Records a delivered buffer if running. Returns whether it was kept.
    pub fn record(&mut self, frames: &FrameBuffer) -> bool {
        self.record_at(Local::now(), frames)
    }

    /// Records a buffer with an explicit timestamp.
    pub fn record_at(&mut self, timestamp: DateTime<Local>, frames: &FrameBuffer) -> bool {
        if !self.running {
            return false;
        }
        self.entries.push(LogEntry {
            timestamp,
            frames: frames.clone(),
        });
        true
    }

    /// Drops all recorded entries.
    pub fn reset(&mut self) {
        log::info!("data logger reset, {} entries dropped", self.entries.len());
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Total number of recorded frames across all entries.
    pub fn frame_count(&self) -> usize {
        self.entries.iter().map(|e| e.frames.columns()).sum()
    }

    /// Writes one line per recorded frame: the delivery timestamp followed by
    /// the triangle values, space separated.
    pub fn dump<W: Write>(&self, writer: &mut W) -> Result<()> {
        for entry in &self.entries {
            let timestamp = entry.timestamp.format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            for frame in entry.frames.iter_columns() {
                write!(writer, "{timestamp}")?;
                for value in frame {
                    write!(writer, " {value}")?;
                }
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    /// Dumps the log to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(fs::File::create(path)?);
        self.dump(&mut writer)?;
        writer.flush()?;
        log::info!("saved {} logged frames to {}", self.frame_count(), path.display());
        Ok(())
    }

    /// Writes the mesh next to a log as `<path>.nodes` and `<path>.elements`.
    pub fn save_mesh(path: impl AsRef<Path>, mesh: &Mesh) -> Result<()> {
        let path = path.as_ref();
        let (nodes, elements) = mesh.to_matrices()?;
        save_matrix(with_suffix(path, ".nodes"), &nodes)?;
        save_matrix(with_suffix(path, ".elements"), &elements)?;
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frames() -> FrameBuffer {
        FrameBuffer::from_frames(&[vec![1.0, -0.5], vec![0.25, 0.0]]).unwrap()
    }

    #[test]
    fn test_records_only_while_running() {
        let mut logger = DataLogger::new();
        assert!(!logger.record(&frames()));
        logger.start();
        assert!(logger.record(&frames()));
        logger.stop();
        assert!(!logger.record(&frames()));
        assert_eq!(logger.entries().len(), 1);
        assert_eq!(logger.frame_count(), 2);
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut logger = DataLogger::new();
        assert!(logger.toggle());
        logger.record(&frames());
        assert!(!logger.toggle());
        logger.reset();
        assert!(logger.entries().is_empty());
        assert!(!logger.is_running());
    }

    #[test]
    fn test_dump_one_line_per_frame() {
        let mut logger = DataLogger::new();
        logger.start();
        let timestamp = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        logger.record_at(timestamp, &frames());

        let mut out = Vec::new();
        logger.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2024-03-01T12:00:00.000"));
        assert!(lines[0].ends_with(" 1 -0.5"));
        assert!(lines[1].ends_with(" 0.25 0"));
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(
            with_suffix(Path::new("/tmp/run.log"), ".nodes"),
            PathBuf::from("/tmp/run.log.nodes")
        );
    }
}
