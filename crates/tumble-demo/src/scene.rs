//! Fixed geometry and colors.

use tumble_engine::render::{Geometry, Rgba, Vertex};

pub const WINDOW_TITLE: &str = "CG Assignment - Triangle & Rotating Rectangle";
pub const WINDOW_WIDTH: f64 = 800.0;
pub const WINDOW_HEIGHT: f64 = 600.0;

/// Dark blue-grey background.
pub const BACKGROUND: Rgba = Rgba::new(0.12, 0.12, 0.18, 1.0);
/// Teal.
pub const TRIANGLE_COLOR: Rgba = Rgba::new(0.18, 0.80, 0.65, 1.0);
/// Magenta-pink.
pub const RECTANGLE_COLOR: Rgba = Rgba::new(0.85, 0.25, 0.55, 1.0);

/// Bottom-left, bottom-right, apex. Sits left of center.
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex::new(-0.85, -0.35, 0.0),
    Vertex::new(-0.35, -0.35, 0.0),
    Vertex::new(-0.60, 0.25, 0.0),
];

/// 0.6 × 0.35 rectangle centered on the origin:
/// top-left, top-right, bottom-right, bottom-left.
pub const RECTANGLE_VERTICES: [Vertex; 4] = [
    Vertex::new(-0.30, 0.175, 0.0),
    Vertex::new(0.30, 0.175, 0.0),
    Vertex::new(0.30, -0.175, 0.0),
    Vertex::new(-0.30, -0.175, 0.0),
];

/// Two triangles sharing the top-left/bottom-right diagonal.
pub const RECTANGLE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub fn triangle() -> Geometry {
    Geometry::triangle_list("triangle", &TRIANGLE_VERTICES)
}

pub fn rectangle() -> Geometry {
    Geometry::indexed("rectangle", &RECTANGLE_VERTICES, &RECTANGLE_INDICES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_non_indexed() {
        let g = triangle();
        assert!(!g.is_indexed());
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn rectangle_is_two_indexed_triangles() {
        let g = rectangle();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.index_count(), 6);
    }

    #[test]
    fn rectangle_is_centered() {
        let (sx, sy) = RECTANGLE_VERTICES
            .iter()
            .fold((0.0f32, 0.0f32), |(x, y), v| (x + v.pos[0], y + v.pos[1]));
        assert!(sx.abs() < 1e-6 && sy.abs() < 1e-6);
    }
}
