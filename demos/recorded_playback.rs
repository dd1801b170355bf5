//! Plays back a recorded reconstruction.
//!
//! Takes a session file and a matrix file whose rows are mesh triangles and
//! whose columns are frames, and plays it at one frame per tick.
//!
//! Run with: cargo run --example `recorded_playback` -- session.json frames.txt

use eitview::{io, FrameBuffer, Result, SessionConfig};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(session), Some(frames)) = (args.next(), args.next()) else {
        eprintln!("usage: recorded_playback <session.json> <frames.txt>");
        return Ok(());
    };

    let session = SessionConfig::load(session)?;
    let recorded = FrameBuffer::from_text_matrix(&io::load_matrix(frames)?);
    eitview::show_with(&session, Some(recorded))
}
