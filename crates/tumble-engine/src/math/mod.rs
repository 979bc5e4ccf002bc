//! Small 4×4 matrix math.
//!
//! Column-major, `f32`, no external linear-algebra dependency. Every component
//! of a composed transform can be traced back to one of the elementary
//! rotations built here.

mod mat4;

pub use mat4::{Axis, Mat4};
