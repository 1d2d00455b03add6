use crate::render::shapes::UNIFORM_SLOT_STRIDE;

/// Static description of a full-screen pass.
pub(super) struct ScreenPassDesc {
    pub label: &'static str,
    pub shader: &'static str,
    /// Number of sampled input textures (0, 1, or 2).
    pub inputs: u32,
    /// Byte size of the uniform block, if the shader has one.
    pub uniform_size: Option<u64>,
    /// Number of dynamic uniform slots to allocate.
    pub slots: u32,
    /// Output blend state; `None` replaces the target contents.
    pub blend: Option<wgpu::BlendState>,
    /// Color target format.
    pub format: wgpu::TextureFormat,
}

/// One full-screen pipeline plus its uniform slots.
///
/// Geometry is a single oversized triangle generated from the vertex index,
/// so there is no vertex buffer. Bind groups are created at encode time
/// because the input views change across frames and resizes.
///
/// Uniform data lives in one buffer of fixed-stride dynamic-offset slots;
/// multi-iteration stages write each iteration to its own slot up front so a
/// later write never clobbers an earlier draw.
pub(super) struct ScreenPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_buffer: Option<wgpu::Buffer>,
    uniform_size: Option<u64>,
    inputs: u32,
}

impl ScreenPass {
    pub fn new(device: &wgpu::Device, desc: &ScreenPassDesc) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(desc.shader.into()),
        });

        let mut entries: Vec<wgpu::BindGroupLayoutEntry> = Vec::new();
        let mut binding = 0;

        for _ in 0..desc.inputs {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
            binding += 1;
        }

        if desc.inputs > 0 {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
            binding += 1;
        }

        if let Some(size) = desc.uniform_size {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(size),
                },
                count: None,
            });
        }

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(desc.label),
                entries: &entries,
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.format,
                    blend: desc.blend,
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

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(desc.label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = desc.uniform_size.map(|_| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(desc.label),
                size: u64::from(desc.slots.max(1)) * UNIFORM_SLOT_STRIDE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            uniform_buffer,
            uniform_size: desc.uniform_size,
            inputs: desc.inputs,
        }
    }

    /// Writes uniform data into the given slot.
    pub fn write_slot(&self, queue: &wgpu::Queue, slot: u32, data: &[u8]) {
        if let Some(buf) = &self.uniform_buffer {
            queue.write_buffer(buf, u64::from(slot) * UNIFORM_SLOT_STRIDE, data);
        }
    }

    /// Encodes one full-screen draw reading `inputs` and writing `target`.
    pub fn encode(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        inputs: &[&wgpu::TextureView],
        slot: u32,
        target: &wgpu::TextureView,
        load: wgpu::LoadOp<wgpu::Color>,
    ) {
        debug_assert_eq!(inputs.len() as u32, self.inputs);

        let mut entries: Vec<wgpu::BindGroupEntry> = Vec::new();
        let mut binding = 0;

        for view in inputs {
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::TextureView(view),
            });
            binding += 1;
        }

        if self.inputs > 0 {
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::Sampler(&self.sampler),
            });
            binding += 1;
        }

        if let (Some(buf), Some(size)) = (&self.uniform_buffer, self.uniform_size) {
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: buf,
                    offset: 0,
                    size: wgpu::BufferSize::new(size),
                }),
            });
        }

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bind_group_layout,
            entries: &entries,
        });

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        if self.uniform_buffer.is_some() {
            let offset = slot * UNIFORM_SLOT_STRIDE as u32;
            rpass.set_bind_group(0, &bind_group, &[offset]);
        } else {
            rpass.set_bind_group(0, &bind_group, &[]);
        }
        rpass.draw(0..3, 0..1);
    }
}
