use tumble_engine::math::{Axis, Mat4};
use tumble_engine::render::{FrameList, GeometryId};

use crate::mode::Mode;
use crate::scene::{BACKGROUND, RECTANGLE_COLOR, TRIANGLE_COLOR};

/// Angular rates of the rotating rectangle, in rad/s.
pub const RATE_X: f32 = 0.7;
pub const RATE_Y: f32 = 0.5;
pub const RATE_Z: f32 = 1.0;

const TRIANGLE_VERTEX_COUNT: u32 = 3;
const RECTANGLE_INDEX_COUNT: u32 = 6;

/// Handles of the uploaded shapes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SceneIds {
    pub triangle: GeometryId,
    pub rectangle: GeometryId,
}

/// Transform of the rotating rectangle `t` seconds after startup.
///
/// `Rz · Ry · Rx`: X is applied first, then Y, then Z.
pub fn rotating_transform(t: f32) -> Mat4 {
    let rx = Mat4::rotation(Axis::X, t * RATE_X);
    let ry = Mat4::rotation(Axis::Y, t * RATE_Y);
    let rz = Mat4::rotation(Axis::Z, t * RATE_Z);
    Mat4::multiply(&Mat4::multiply(&rz, &ry), &rx)
}

/// Records the frame for `mode` at `elapsed` seconds.
pub fn compose_frame(mode: Mode, elapsed: f32, ids: &SceneIds) -> FrameList {
    let mut list = FrameList::new(BACKGROUND);
    list.use_program();

    match mode {
        Mode::Triangle => {
            list.set_transform(Mat4::identity())
                .set_color(TRIANGLE_COLOR)
                .bind(ids.triangle)
                .draw_arrays(TRIANGLE_VERTEX_COUNT);
        }
        Mode::RectangleStatic => {
            list.set_transform(Mat4::identity())
                .set_color(RECTANGLE_COLOR)
                .bind(ids.rectangle)
                .draw_indexed(RECTANGLE_INDEX_COUNT);
        }
        Mode::RectangleRotating => {
            list.set_transform(rotating_transform(elapsed))
                .set_color(RECTANGLE_COLOR)
                .bind(ids.rectangle)
                .draw_indexed(RECTANGLE_INDEX_COUNT);
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::DemoState;
    use tumble_engine::input::{InputEvent, Key};
    use tumble_engine::render::{DrawCmd, DrawKind};

    const EPS: f32 = 1e-6;

    fn ids() -> SceneIds {
        SceneIds {
            triangle: GeometryId::from_raw(0),
            rectangle: GeometryId::from_raw(1),
        }
    }

    fn single_draw(list: &FrameList) -> DrawCmd {
        assert!(list.program_active());
        assert_eq!(list.clear_color(), BACKGROUND);
        assert_eq!(list.cmds().len(), 1, "expected exactly one draw");
        list.cmds()[0]
    }

    #[test]
    fn startup_frame_draws_triangle() {
        let state = DemoState::new();
        let cmd = single_draw(&compose_frame(state.mode(), 0.0, &ids()));

        assert_eq!(cmd.kind, DrawKind::Arrays { vertex_count: 3 });
        assert_eq!(cmd.geometry, ids().triangle);
        assert_eq!(cmd.color, TRIANGLE_COLOR);
        assert_eq!(cmd.transform, Mat4::identity());
    }

    #[test]
    fn static_rectangle_frame_after_w() {
        let mut state = DemoState::new();
        state.dispatch(&InputEvent::key_pressed(Key::W));

        let cmd = single_draw(&compose_frame(state.mode(), 12.5, &ids()));

        assert_eq!(cmd.kind, DrawKind::Indexed { index_count: 6 });
        assert_eq!(cmd.geometry, ids().rectangle);
        assert_eq!(cmd.color, RECTANGLE_COLOR);
        assert_eq!(cmd.transform, Mat4::identity());
    }

    #[test]
    fn rotating_frame_at_zero_is_identity() {
        let cmd = single_draw(&compose_frame(Mode::RectangleRotating, 0.0, &ids()));

        assert_eq!(cmd.kind, DrawKind::Indexed { index_count: 6 });
        assert_eq!(cmd.color, RECTANGLE_COLOR);
        assert!(cmd.transform.approx_eq(&Mat4::identity(), EPS));
    }

    #[test]
    fn rotating_frame_composes_z_y_x() {
        for t in [0.016f32, 1.0, 2.75, 10.0] {
            let cmd = single_draw(&compose_frame(Mode::RectangleRotating, t, &ids()));
            let expected = Mat4::multiply(
                &Mat4::multiply(&Mat4::rotation(Axis::Z, t * 1.0), &Mat4::rotation(Axis::Y, t * 0.5)),
                &Mat4::rotation(Axis::X, t * 0.7),
            );
            assert!(cmd.transform.approx_eq(&expected, EPS), "t = {t}");
        }
    }

    #[test]
    fn rotating_transform_is_proper_rotation() {
        for i in 0..50 {
            let m = rotating_transform(i as f32 * 0.37);
            assert!(m.is_orthonormal(1e-5));
            assert!((m.determinant() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn rotating_transform_differs_from_reverse_order() {
        let t = 2.0;
        let reversed = Mat4::rotation(Axis::X, t * RATE_X)
            * Mat4::rotation(Axis::Y, t * RATE_Y)
            * Mat4::rotation(Axis::Z, t * RATE_Z);
        assert!(!rotating_transform(t).approx_eq(&reversed, 1e-4));
    }

    #[test]
    fn static_modes_ignore_elapsed_time() {
        for mode in [Mode::Triangle, Mode::RectangleStatic] {
            let a = compose_frame(mode, 0.0, &ids());
            let b = compose_frame(mode, 99.0, &ids());
            assert_eq!(a, b, "{mode:?}");
        }
    }
}
