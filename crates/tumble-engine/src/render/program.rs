use std::borrow::Cow;
use std::fmt;
use std::num::NonZeroU64;

use crate::logging::truncate_diagnostic;

use super::geometry::Vertex;

/// Backend diagnostics are cut to this many characters before logging.
pub const DIAGNOSTIC_LIMIT: usize = 512;

/// Binding index of the `transform` slot (`mat4x4<f32>`, vertex stage).
pub const TRANSFORM_BINDING: u32 = 0;
/// Binding index of the `ourColor` slot (`vec4<f32>`, fragment stage).
pub const COLOR_BINDING: u32 = 1;

pub(crate) const TRANSFORM_SLOT_SIZE: u64 = 64;
pub(crate) const COLOR_SLOT_SIZE: u64 = 16;

/// Textual sources for the two program stages.
#[derive(Debug, Clone)]
pub struct ProgramSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ProgramSource {
    /// The embedded flat-color shape program.
    pub fn shape() -> Self {
        Self {
            vertex: Cow::Borrowed(include_str!("shaders/shape_vert.wgsl")),
            fragment: Cow::Borrowed(include_str!("shaders/shape_frag.wgsl")),
        }
    }
}

/// Program build step that produced a diagnostic.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
    Link,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "VERTEX::COMPILATION_FAILED",
            Stage::Fragment => "FRAGMENT::COMPILATION_FAILED",
            Stage::Link => "PROGRAM::LINKING_FAILED",
        })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProgramStatus {
    Ready,
    /// At least one stage failed to build. Draws through this program are skipped.
    Broken,
}

/// A diagnostic captured while building a program.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildDiagnostic {
    pub stage: Stage,
    pub message: String,
}

impl BuildDiagnostic {
    /// Captures `text`, cut to [`DIAGNOSTIC_LIMIT`] characters.
    pub fn new(stage: Stage, text: &str) -> Self {
        Self {
            stage,
            message: truncate_diagnostic(text, DIAGNOSTIC_LIMIT).to_owned(),
        }
    }
}

impl fmt::Display for BuildDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader error [{}]\n{}", self.stage, self.message)
    }
}

/// Compiled vertex + fragment stages linked into a render pipeline.
///
/// Exposes two named slots, `transform` and `ourColor`, through one bind group
/// layout with dynamic offsets so several draws can share a frame.
///
/// Build failures never abort: they are logged and the program is returned
/// with [`ProgramStatus::Broken`].
pub struct ShadingProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    status: ProgramStatus,
    diagnostics: Vec<BuildDiagnostic>,
}

impl ShadingProgram {
    pub fn build(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        source: &ProgramSource,
    ) -> Self {
        let mut diagnostics = Vec::new();

        let vertex = compile_stage(
            device,
            "tumble vertex stage",
            Stage::Vertex,
            &source.vertex,
            &mut diagnostics,
        );
        let fragment = compile_stage(
            device,
            "tumble fragment stage",
            Stage::Fragment,
            &source.fragment,
            &mut diagnostics,
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tumble program bgl"),
            entries: &[
                slot_layout_entry(TRANSFORM_BINDING, wgpu::ShaderStages::VERTEX, TRANSFORM_SLOT_SIZE),
                slot_layout_entry(COLOR_BINDING, wgpu::ShaderStages::FRAGMENT, COLOR_SLOT_SIZE),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tumble program pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tumble program pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The rotating shape shows both faces.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            // A stage failure already explains a pipeline failure; only report linking on its own.
            if diagnostics.is_empty() {
                report(&mut diagnostics, Stage::Link, &err.to_string());
            }
        }

        let status = if diagnostics.is_empty() {
            log::debug!("shading program built ({target_format:?})");
            ProgramStatus::Ready
        } else {
            ProgramStatus::Broken
        };

        Self {
            pipeline,
            bind_group_layout,
            status,
            diagnostics,
        }
    }

    #[inline]
    pub fn status(&self) -> ProgramStatus {
        self.status
    }

    #[inline]
    pub fn diagnostics(&self) -> &[BuildDiagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }
}

impl Drop for ShadingProgram {
    fn drop(&mut self) {
        log::debug!("releasing shading program");
    }
}

fn compile_stage(
    device: &wgpu::Device,
    label: &str,
    stage: Stage,
    source: &str,
    diagnostics: &mut Vec<BuildDiagnostic>,
) -> wgpu::ShaderModule {
    // The guard must outlive module creation or the error escapes the scope.
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
    });
    if let Some(err) = pollster::block_on(scope.pop()) {
        report(diagnostics, stage, &err.to_string());
    }
    module
}

fn report(diagnostics: &mut Vec<BuildDiagnostic>, stage: Stage, text: &str) {
    let diag = BuildDiagnostic::new(stage, text);
    log::error!("{diag}");
    diagnostics.push(diag);
}

fn slot_layout_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    size: u64,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: true,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}
