use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use super::geometry::{Geometry, GeometryId};
use super::list::{DrawCmd, DrawKind, FrameList};
use super::program::{
    ProgramSource, ProgramStatus, ShadingProgram, COLOR_BINDING, COLOR_SLOT_SIZE,
    TRANSFORM_BINDING, TRANSFORM_SLOT_SIZE,
};
use super::{RenderCtx, RenderTarget};

/// Executes `FrameList`s with one shading program over uploaded geometry.
///
/// Owns every GPU resource it draws with. Field order is release order:
/// geometry buffers, then slot buffers, then the program.
pub struct ShapeRenderer {
    meshes: Vec<GpuMesh>,
    slots: Option<SlotBuffers>,
    program: ShadingProgram,

    warned_broken: bool,
    warned_rejected: bool,
}

struct GpuMesh {
    label: &'static str,
    vbo: wgpu::Buffer,
    ibo: Option<wgpu::Buffer>,
    vertex_count: u32,
    index_count: u32,
}

/// Per-draw uniform regions for the two program slots.
struct SlotBuffers {
    transform_ubo: wgpu::Buffer,
    color_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    capacity: usize,
    stride: u64,
}

/// Why a recorded draw cannot be replayed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum DrawReject {
    UnknownGeometry,
    NotIndexed,
    CountOutOfRange,
}

impl ShapeRenderer {
    /// Builds the program from `source`. Build failures are logged, not returned.
    pub fn new(ctx: &RenderCtx<'_>, source: &ProgramSource) -> Self {
        Self {
            meshes: Vec::new(),
            slots: None,
            program: ShadingProgram::build(ctx.device, ctx.surface_format, source),
            warned_broken: false,
            warned_rejected: false,
        }
    }

    /// Uploads `geometry` once and returns its handle.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, geometry: &Geometry) -> GeometryId {
        let label = geometry.label();

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ibo = geometry.indices().map(|indices| {
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let id = GeometryId(self.meshes.len() as u32);
        self.meshes.push(GpuMesh {
            label,
            vbo,
            ibo,
            vertex_count: geometry.vertex_count(),
            index_count: geometry.index_count(),
        });

        log::debug!(
            "uploaded geometry '{label}' as {id:?} ({} vertices, {} indices)",
            geometry.vertex_count(),
            geometry.index_count()
        );
        id
    }

    #[inline]
    pub fn program_status(&self) -> ProgramStatus {
        self.program.status()
    }

    /// Clears `target` and replays the draws recorded in `list`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, list: &FrameList) {
        let draws = self.accepted_draws(list);

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        if !draws.is_empty() {
            self.ensure_slot_capacity(ctx, draws.len());
            self.write_slots(ctx, &draws);
        }

        let mut rpass = target.begin_clear_pass("tumble shape pass", list.clear_color());

        let Some(slots) = self.slots.as_ref() else { return };
        if draws.is_empty() {
            return;
        }

        rpass.set_pipeline(self.program.pipeline());

        for (i, cmd) in draws.iter().enumerate() {
            let mesh = &self.meshes[cmd.geometry.0 as usize];
            let offset = (i as u64 * slots.stride) as u32;

            rpass.set_bind_group(0, &slots.bind_group, &[offset, offset]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));

            match cmd.kind {
                DrawKind::Arrays { vertex_count } => {
                    rpass.draw(0..vertex_count, 0..1);
                }
                DrawKind::Indexed { index_count } => {
                    let Some(ibo) = mesh.ibo.as_ref() else { continue };
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..index_count, 0, 0..1);
                }
            }
        }
    }

    /// Filters the list down to draws that can be replayed safely.
    fn accepted_draws(&mut self, list: &FrameList) -> Vec<DrawCmd> {
        if list.cmds().is_empty() {
            return Vec::new();
        }

        if self.program.status() == ProgramStatus::Broken {
            if !self.warned_broken {
                log::warn!("shading program is broken; skipping draws");
                self.warned_broken = true;
            }
            return Vec::new();
        }

        let mut accepted = Vec::with_capacity(list.cmds().len());
        for cmd in list.cmds() {
            let mesh = self
                .meshes
                .get(cmd.geometry.0 as usize)
                .map(|m| (m.vertex_count, m.ibo.is_some().then_some(m.index_count)));

            match check_draw(cmd.kind, mesh) {
                Ok(()) => accepted.push(*cmd),
                Err(reason) => {
                    if !self.warned_rejected {
                        let label = self
                            .meshes
                            .get(cmd.geometry.0 as usize)
                            .map_or("<none>", |m| m.label);
                        log::warn!("rejected draw {:?} on '{label}': {reason:?}", cmd.kind);
                        self.warned_rejected = true;
                    }
                }
            }
        }
        accepted
    }

    fn ensure_slot_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if self.slots.as_ref().is_some_and(|s| s.capacity >= required) {
            return;
        }

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment;
        let stride = slot_stride(alignment);
        let capacity = required.next_power_of_two().max(4);
        let size = stride * capacity as u64;

        let make_ubo = |label| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let transform_ubo = make_ubo("tumble transform slots");
        let color_ubo = make_ubo("tumble color slots");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tumble program bind group"),
            layout: self.program.bind_group_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: TRANSFORM_BINDING,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &transform_ubo,
                        offset: 0,
                        size: NonZeroU64::new(TRANSFORM_SLOT_SIZE),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: COLOR_BINDING,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &color_ubo,
                        offset: 0,
                        size: NonZeroU64::new(COLOR_SLOT_SIZE),
                    }),
                },
            ],
        });

        log::debug!("slot buffers sized for {capacity} draws (stride {stride})");
        self.slots = Some(SlotBuffers {
            transform_ubo,
            color_ubo,
            bind_group,
            capacity,
            stride,
        });
    }

    fn write_slots(&self, ctx: &RenderCtx<'_>, draws: &[DrawCmd]) {
        let Some(slots) = self.slots.as_ref() else { return };
        for (i, cmd) in draws.iter().enumerate() {
            let offset = i as u64 * slots.stride;
            let transform = cmd.transform.to_cols_array();
            let color = cmd.color.to_array();
            ctx.queue
                .write_buffer(&slots.transform_ubo, offset, bytemuck::cast_slice(&transform));
            ctx.queue
                .write_buffer(&slots.color_ubo, offset, bytemuck::cast_slice(&color));
        }
    }
}

impl Drop for ShapeRenderer {
    fn drop(&mut self) {
        log::debug!("releasing {} geometry buffers", self.meshes.len());
    }
}

/// Checks a draw against the bound mesh: `(vertex_count, Some(index_count) if indexed)`.
pub(crate) fn check_draw(kind: DrawKind, mesh: Option<(u32, Option<u32>)>) -> Result<(), DrawReject> {
    let Some((vertex_count, index_count)) = mesh else {
        return Err(DrawReject::UnknownGeometry);
    };

    match kind {
        DrawKind::Arrays { vertex_count: n } if n <= vertex_count => Ok(()),
        DrawKind::Arrays { .. } => Err(DrawReject::CountOutOfRange),
        DrawKind::Indexed { index_count: n } => match index_count {
            None => Err(DrawReject::NotIndexed),
            Some(available) if n <= available => Ok(()),
            Some(_) => Err(DrawReject::CountOutOfRange),
        },
    }
}

/// Byte distance between per-draw slot regions: one `mat4x4<f32>`, rounded up
/// to the device's dynamic uniform offset alignment.
pub(crate) fn slot_stride(alignment: u32) -> u64 {
    let alignment = u64::from(alignment.max(1));
    TRANSFORM_SLOT_SIZE.div_ceil(alignment) * alignment
}
