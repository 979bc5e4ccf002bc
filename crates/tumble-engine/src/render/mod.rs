//! GPU rendering subsystem.
//!
//! Draw code records a [`FrameList`] (clear color + draws with their slot
//! values); [`ShapeRenderer`] replays it with a single [`ShadingProgram`] over
//! geometry uploaded once at startup.
//!
//! Convention: positions are already in clip space before the `transform` slot
//! is applied (no camera or projection).

mod color;
mod ctx;
mod geometry;
mod list;
mod program;
mod renderer;

#[cfg(test)]
mod headless;

pub use color::Rgba;
pub use ctx::{RenderCtx, RenderTarget};
pub use geometry::{Geometry, GeometryId, Vertex};
pub use list::{DrawCmd, DrawKind, FrameList};
pub use program::{
    BuildDiagnostic, ProgramSource, ProgramStatus, ShadingProgram, Stage, COLOR_BINDING,
    DIAGNOSTIC_LIMIT, TRANSFORM_BINDING,
};
pub use renderer::ShapeRenderer;
