use crate::math::Mat4;

use super::color::Rgba;
use super::geometry::GeometryId;

/// How a draw command consumes its geometry.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawKind {
    /// Non-indexed triangle list over the first `vertex_count` vertices.
    Arrays { vertex_count: u32 },
    /// Indexed triangle list over the first `index_count` indices.
    Indexed { index_count: u32 },
}

/// A single recorded draw with the slot values it was issued with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    pub geometry: GeometryId,
    pub kind: DrawKind,
    pub transform: Mat4,
    pub color: Rgba,
}

/// Recorded command stream for one frame.
///
/// The recording API mirrors immediate-mode graphics calls: activate the
/// program, set the `transform` and `ourColor` slots, bind geometry, draw.
/// Slot and binding state persists across draws within the frame; each draw
/// snapshots it. The renderer replays the list against the GPU, which keeps the
/// per-frame composition testable without a device.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameList {
    clear: Rgba,
    program_active: bool,
    transform: Mat4,
    color: Rgba,
    bound: Option<GeometryId>,
    cmds: Vec<DrawCmd>,
}

impl FrameList {
    /// Starts a frame that clears the color buffer to `clear`.
    pub fn new(clear: Rgba) -> Self {
        Self {
            clear,
            program_active: false,
            transform: Mat4::IDENTITY,
            color: Rgba::BLACK,
            bound: None,
            cmds: Vec::new(),
        }
    }

    /// Activates the shading program for subsequent draws.
    pub fn use_program(&mut self) -> &mut Self {
        self.program_active = true;
        self
    }

    pub fn set_transform(&mut self, transform: Mat4) -> &mut Self {
        self.transform = transform;
        self
    }

    pub fn set_color(&mut self, color: Rgba) -> &mut Self {
        self.color = color;
        self
    }

    pub fn bind(&mut self, geometry: GeometryId) -> &mut Self {
        self.bound = Some(geometry);
        self
    }

    /// Records a non-indexed draw of `vertex_count` vertices.
    pub fn draw_arrays(&mut self, vertex_count: u32) -> &mut Self {
        self.record(DrawKind::Arrays { vertex_count })
    }

    /// Records an indexed draw of `index_count` indices.
    pub fn draw_indexed(&mut self, index_count: u32) -> &mut Self {
        self.record(DrawKind::Indexed { index_count })
    }

    fn record(&mut self, kind: DrawKind) -> &mut Self {
        if !self.program_active {
            log::warn!("draw {kind:?} issued before use_program; dropped");
            return self;
        }
        let Some(geometry) = self.bound else {
            log::warn!("draw {kind:?} issued with no geometry bound; dropped");
            return self;
        };

        self.cmds.push(DrawCmd {
            geometry,
            kind,
            transform: self.transform,
            color: self.color,
        });
        self
    }

    #[inline]
    pub fn clear_color(&self) -> Rgba {
        self.clear
    }

    #[inline]
    pub fn program_active(&self) -> bool {
        self.program_active
    }

    /// Recorded draws in issue order.
    #[inline]
    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }
}
