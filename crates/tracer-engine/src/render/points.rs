use crate::coords::{ColorRgba, PixelSize};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::scene::{GpuContext, ProgramDesc, ProgramError, SceneError, POINT_LAYOUT};

use super::common::{blend_state, clear_color, compile_errors, scope_log, vertex_attributes, DEPTH_FORMAT};

/// Initial vertex buffer capacity, in vertices.
const MIN_VERTEX_CAPACITY: u64 = 64;

struct Program {
    pipeline: wgpu::RenderPipeline,
    stride_bytes: u64,
    depth_test: bool,
}

struct DepthTarget {
    view: wgpu::TextureView,
    size: PixelSize,
}

/// wgpu-backed GPU context for the point scene.
///
/// Owns the device context, the point pipeline, one vertex buffer that grows
/// to fit the largest upload, and a depth attachment when depth testing is on.
pub struct WgpuContext {
    gpu: Gpu,
    clear: wgpu::Color,
    viewport: PixelSize,

    program: Option<Program>,

    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: u64, // bytes

    depth: Option<DepthTarget>,
}

impl WgpuContext {
    pub fn new(gpu: Gpu) -> Self {
        let viewport = gpu.size();
        Self {
            gpu,
            clear: wgpu::Color::TRANSPARENT,
            viewport,
            program: None,
            vertex_buffer: None,
            vertex_capacity: 0,
            depth: None,
        }
    }

    fn create_vertex_buffer(&mut self, bytes: u64) {
        self.vertex_buffer = Some(self.gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("tracer points vbo"),
            size: bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = bytes;
    }

    /// Grows the vertex buffer (power-of-two vertex counts) so `bytes` fit.
    fn ensure_vertex_capacity(&mut self, bytes: u64, stride_bytes: u64) {
        if bytes <= self.vertex_capacity && self.vertex_buffer.is_some() {
            return;
        }

        let vertices = bytes.div_ceil(stride_bytes).next_power_of_two().max(MIN_VERTEX_CAPACITY);
        log::debug!("growing vertex buffer to {vertices} vertices");
        self.create_vertex_buffer(vertices * stride_bytes);
    }

    fn ensure_depth_target(&mut self) {
        let size = self.gpu.size();
        if self.depth.as_ref().is_some_and(|d| d.size == size) {
            return;
        }

        let texture = self.gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("tracer points depth"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth = Some(DepthTarget { view, size });
    }
}

impl GpuContext for WgpuContext {
    fn build_program(&mut self, desc: &ProgramDesc<'_>) -> Result<(), ProgramError> {
        desc.layout
            .validate()
            .map_err(|log| ProgramError::Link { log })?;

        let device = self.gpu.device();

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(desc.source.into()),
        });
        let scoped = scope_log(pollster::block_on(scope.pop()));

        let info = pollster::block_on(shader.get_compilation_info());
        if let Some(log) = compile_errors(&info).or(scoped) {
            return Err(ProgramError::Compile { log });
        }

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tracer points pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let attributes = vertex_attributes(&desc.layout);
        let stride_bytes = desc.layout.stride_bytes();

        let depth_stencil = desc.depth_test.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            // Coplanar points: equal depth must pass so later globs paint over.
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(desc.vertex_entry),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: stride_bytes,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(desc.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.gpu.surface_format(),
                    blend: Some(blend_state(desc.alpha_blending)),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });
        if let Some(log) = scope_log(pollster::block_on(scope.pop())) {
            return Err(ProgramError::Link { log });
        }

        self.program = Some(Program {
            pipeline,
            stride_bytes,
            depth_test: desc.depth_test,
        });
        Ok(())
    }

    fn allocate_vertex_buffer(&mut self) {
        let stride = self.program.as_ref().map_or(POINT_LAYOUT.stride_bytes(), |p| p.stride_bytes);
        self.create_vertex_buffer(MIN_VERTEX_CAPACITY * stride);
    }

    fn upload_vertices(&mut self, data: &[f32]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if bytes.is_empty() {
            return;
        }

        let stride = self.program.as_ref().map_or(POINT_LAYOUT.stride_bytes(), |p| p.stride_bytes);
        self.ensure_vertex_capacity(bytes.len() as u64, stride);

        let Some(buffer) = self.vertex_buffer.as_ref() else { return };
        self.gpu.queue().write_buffer(buffer, 0, bytes);
    }

    fn set_clear_color(&mut self, color: ColorRgba) {
        self.clear = clear_color(color);
    }

    fn set_viewport(&mut self, size: PixelSize) {
        self.viewport = size;
    }

    fn max_dimension(&self) -> u32 {
        self.gpu.device().limits().max_texture_dimension_2d
    }

    fn resize(&mut self, size: PixelSize) {
        let max = self.max_dimension();
        self.gpu
            .resize(PixelSize::new(size.width.min(max), size.height.min(max)));
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> Result<(), SceneError> {
        let target = self.gpu.size();
        if target.is_empty() {
            log::trace!("surface has zero size; skipping draw");
            return Ok(());
        }

        let depth_test = self.program.as_ref().is_some_and(|p| p.depth_test);
        if depth_test {
            self.ensure_depth_target();
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let msg = err.to_string();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(SceneError::Surface(msg)),
                    action => {
                        log::warn!("frame dropped ({action:?}): {msg}");
                        Ok(())
                    }
                };
            }
        };

        // Viewport must stay inside the render target.
        let vw = self.viewport.width.min(target.width) as f32;
        let vh = self.viewport.height.min(target.height) as f32;

        // Render pass borrows frame.encoder; dropped before submit() takes frame.
        {
            let depth_stencil_attachment = self
                .depth
                .as_ref()
                .filter(|_| depth_test)
                .map(|d| wgpu::RenderPassDepthStencilAttachment {
                    view: &d.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                });

            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tracer points pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let program = self.program.as_ref();
            let buffer = self.vertex_buffer.as_ref();
            if let (Some(program), Some(buffer), true) = (program, buffer, vertex_count > 0) {
                rpass.set_pipeline(&program.pipeline);
                rpass.set_viewport(0.0, 0.0, vw, vh, 0.0, 1.0);
                rpass.set_vertex_buffer(0, buffer.slice(..));
                rpass.draw(0..vertex_count, 0..1);
            }
        }

        self.gpu.submit(frame);
        Ok(())
    }
}
