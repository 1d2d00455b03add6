use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    straight_alpha_blend, uniform_slots_size, QuadVertex, QUAD_INDICES, QUAD_VERTICES,
    UNIFORM_SLOT_STRIDE,
};

/// Renderer for `DrawCmd::Rect`.
///
/// Every rect is one draw call with its own uniform slot, bound through a
/// dynamic offset. Rounding and edge anti-aliasing are computed in the
/// fragment shader from a rounded-box distance; `u_radius <= 0` takes a
/// sharp-corner fast path with no distance math.
pub struct RectRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,

    slot_buffer: Option<wgpu::Buffer>,
    slot_capacity: usize,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            slot_buffer: None,
            slot_capacity: 0,
            quad_vbo: None,
            quad_ibo: None,
        }
    }
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);

        let screen = [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)];

        let mut uniforms: Vec<RectUniform> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Rect(cmd) = &item.cmd else { continue; };

            let r = cmd.rect.normalized();
            if r.is_empty() {
                continue;
            }

            // Re-clamp here: commands pushed through `DrawList::push` bypass
            // the `push_rect` clamp, and an oversized radius makes the
            // distance field reject every fragment.
            let radius = cmd.radius.clamp(0.0, r.size.x.min(r.size.y) * 0.5);

            let c = &cmd.color;
            uniforms.push(RectUniform {
                u_screen: screen,
                u_rect_pos: [r.origin.x, r.origin.y],
                u_rect_size: [r.size.x, r.size.y],
                u_radius: radius,
                _pad: 0.0,
                u_color: [c.r, c.g, c.b, c.a],
            });
        }

        if uniforms.is_empty() {
            return;
        }

        self.ensure_slot_capacity(ctx, uniforms.len());

        let Some(slot_buffer) = self.slot_buffer.as_ref() else { return; };
        for (i, u) in uniforms.iter().enumerate() {
            ctx.queue
                .write_buffer(slot_buffer, i as u64 * UNIFORM_SLOT_STRIDE, bytemuck::bytes_of(u));
        }

        let Some(pipeline)   = self.pipeline.as_ref()   else { return; };
        let Some(bind_group) = self.bind_group.as_ref() else { return; };
        let Some(quad_vbo)   = self.quad_vbo.as_ref()   else { return; };
        let Some(quad_ibo)   = self.quad_ibo.as_ref()   else { return; };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("serpent rect pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for i in 0..uniforms.len() {
            let offset = (i as u64 * UNIFORM_SLOT_STRIDE) as u32;
            rpass.set_bind_group(0, bind_group, &[offset]);
            rpass.draw_indexed(0..6, 0, 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("serpent rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rect.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("serpent rect bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<RectUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("serpent rect pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("serpent rect pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(straight_alpha_blend()),
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
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.slot_buffer = None;
        self.slot_capacity = 0;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("serpent rect quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("serpent rect quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_slot_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.slot_capacity && self.slot_buffer.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        let slot_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("serpent rect uniform slots"),
            size: uniform_slots_size(new_cap as u64),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let Some(bgl) = self.bind_group_layout.as_ref() else { return; };
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("serpent rect bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &slot_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<RectUniform>() as u64),
                }),
            }],
        });

        self.slot_buffer = Some(slot_buffer);
        self.bind_group = Some(bind_group);
        self.slot_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform block, one slot per rect (48 bytes, padded to the slot stride).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectUniform {
    u_screen: [f32; 2],
    u_rect_pos: [f32; 2],
    u_rect_size: [f32; 2],
    u_radius: f32,
    _pad: f32,
    u_color: [f32; 4],
}
