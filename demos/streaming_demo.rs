#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
//! Streaming demonstration with a synthetic solver.
//!
//! A disk mesh with 16 electrodes is shown while a background thread
//! "solves" batches of frames: a dipole rotating around the center. Each
//! batch is played back in roughly the time the next one takes to produce.
//!
//! Run with: cargo run --example `streaming_demo`

use std::f32::consts::TAU;
use std::thread;
use std::time::Duration;

use eitview::{FrameBuffer, Mesh, Options, Result, Vec2, Viewer};

const RINGS: usize = 12;
const SEGMENTS: usize = 48;
const ELECTRODES: usize = 16;
const FRAMES_PER_BATCH: usize = 25;

/// A unit disk: a center fan plus quads between concentric rings.
fn disk_mesh() -> Result<Mesh> {
    let mut nodes = vec![Vec2::ZERO];
    for ring in 1..=RINGS {
        let r = ring as f32 / RINGS as f32;
        for s in 0..SEGMENTS {
            let angle = TAU * s as f32 / SEGMENTS as f32;
            nodes.push(Vec2::new(r * angle.cos(), r * angle.sin()));
        }
    }

    let id = |ring: usize, s: usize| (1 + (ring - 1) * SEGMENTS + s % SEGMENTS) as u32;
    let mut triangles = Vec::new();
    for s in 0..SEGMENTS {
        triangles.push([0, id(1, s), id(1, s + 1)]);
    }
    for ring in 1..RINGS {
        for s in 0..SEGMENTS {
            triangles.push([id(ring, s), id(ring + 1, s), id(ring + 1, s + 1)]);
            triangles.push([id(ring, s), id(ring + 1, s + 1), id(ring, s + 1)]);
        }
    }

    let half_width = 0.3 * TAU / ELECTRODES as f32;
    let electrodes = (0..ELECTRODES)
        .map(|e| {
            let center = TAU * e as f32 / ELECTRODES as f32;
            let a = center - half_width;
            let b = center + half_width;
            [Vec2::new(a.cos(), a.sin()), Vec2::new(b.cos(), b.sin())]
        })
        .collect();

    Mesh::new(nodes, triangles, electrodes, 1.0)
}

fn centroids(mesh: &Mesh) -> Vec<Vec2> {
    (0..mesh.num_triangles())
        .map(|t| {
            let [a, b, c] = mesh.triangle_nodes(t);
            (a + b + c) / 3.0
        })
        .collect()
}

/// One batch of a dipole rotating by `phase`, values in about ±0.5.
fn dipole_batch(centroids: &[Vec2], batch: usize) -> Result<FrameBuffer> {
    let frames: Vec<Vec<f32>> = (0..FRAMES_PER_BATCH)
        .map(|f| {
            let phase = TAU * (batch * FRAMES_PER_BATCH + f) as f32 / 200.0;
            let axis = Vec2::new(phase.cos(), phase.sin());
            centroids
                .iter()
                .map(|c| 0.5 * c.dot(axis) * (-2.0 * c.length_squared()).exp())
                .collect()
        })
        .collect();
    FrameBuffer::from_frames(&frames)
}

fn main() -> Result<()> {
    let mesh = disk_mesh()?;
    let centroids = centroids(&mesh);
    let triangles = mesh.num_triangles();

    let mut viewer = Viewer::new(Options::default());
    viewer.initialize(mesh, 1, triangles)?;

    eitview::show_viewer_streaming(viewer, move |mut sender| {
        for batch in 0.. {
            // Pretend solving takes a while.
            thread::sleep(Duration::from_millis(400));
            let frames = match dipole_batch(&centroids, batch) {
                Ok(frames) => frames,
                Err(e) => {
                    log::error!("{e}");
                    break;
                }
            };
            if !sender.send_timed(frames) {
                break;
            }
        }
        sender.finish();
    })
}
