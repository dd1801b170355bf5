//! View transform for the rotated mesh.

use eitview_core::ViewState;
use glam::{Mat4, Vec3};

/// Half-extent of the visible region along the shorter window axis.
///
/// Render-space coordinates lie in the unit disk, so a small margin keeps the
/// electrodes inside the frame.
pub const VIEW_EXTENT: f32 = 1.1;

/// Depth range of the orthographic volume; heights are normalized to about ±1.
const DEPTH_EXTENT: f32 = 2.0;

/// Builds the clip-space transform for a view state.
///
/// The mesh is rotated about z by `rotation[1]` degrees, then about x by
/// `rotation[0]` degrees, and projected orthographically with the aspect
/// ratio preserved.
pub fn view_transform(view: &ViewState, aspect_ratio: f32) -> Mat4 {
    let [pitch, yaw] = view.rotation();
    let rotation =
        Mat4::from_rotation_x(pitch.to_radians()) * Mat4::from_rotation_z(yaw.to_radians());
    projection(aspect_ratio) * rotation
}

fn projection(aspect_ratio: f32) -> Mat4 {
    let aspect_ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    };
    let (half_w, half_h) = if aspect_ratio >= 1.0 {
        (VIEW_EXTENT * aspect_ratio, VIEW_EXTENT)
    } else {
        (VIEW_EXTENT, VIEW_EXTENT / aspect_ratio)
    };
    Mat4::orthographic_lh(-half_w, half_w, -half_h, half_h, -DEPTH_EXTENT, DEPTH_EXTENT)
}

/// Maps a render-space point through `transform` to normalized device coordinates.
pub fn project_point(transform: Mat4, point: Vec3) -> Vec3 {
    transform.project_point3(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eitview_core::Vec2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_view_is_plain_projection() {
        let view = ViewState::default();
        let t = view_transform(&view, 1.0);
        let p = project_point(t, Vec3::new(VIEW_EXTENT, 0.0, 0.0));
        assert!(approx(p, Vec3::new(1.0, 0.0, 0.5)));
    }

    #[test]
    fn test_aspect_keeps_unit_disk_visible() {
        let view = ViewState::default();
        for aspect in [0.5, 1.0, 2.0] {
            let t = view_transform(&view, aspect);
            for p in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y] {
                let ndc = project_point(t, p);
                assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_yaw_rotates_in_plane() {
        let mut view = ViewState::default();
        view.press(Vec2::new(90.0, 0.0));
        view.drag(Vec2::new(0.0, 0.0));
        assert_eq!(view.rotation(), [0.0, 90.0]);

        let t = view_transform(&view, 1.0);
        let p = project_point(t, Vec3::X);
        assert!(approx(p, Vec3::new(0.0, 1.0 / VIEW_EXTENT, 0.5)));
    }

    #[test]
    fn test_pitch_tilts_heights_into_view() {
        let mut view = ViewState::default();
        view.press(Vec2::new(0.0, 90.0));
        view.drag(Vec2::new(0.0, 0.0));

        let t = view_transform(&view, 1.0);
        let p = project_point(t, Vec3::new(0.0, 0.0, 1.0));
        assert!(p.y.abs() > 0.5);
    }

    #[test]
    fn test_degenerate_aspect_falls_back() {
        let view = ViewState::default();
        assert_eq!(view_transform(&view, 0.0), view_transform(&view, 1.0));
        assert_eq!(view_transform(&view, f32::NAN), view_transform(&view, 1.0));
    }
}
