use crate::camera::OrbitCamera;
use crate::mesh::{self, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use reactor_common::Color;
use reactor_kernel::{Reactor, ReactorPart, SceneNode};
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light: [f32; 4],
    ambient: [f32; 4],
    particle: [f32; 4],
}

impl Uniforms {
    fn new(camera: &OrbitCamera, style: &SceneStyle) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.position().extend(1.0).to_array(),
            light: style.light_position.extend(style.light_intensity).to_array(),
            ambient: style.ambient_color.to_rgba(style.ambient_intensity),
            particle: style.particle_color.to_rgba(style.particle_opacity),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    base_color: [f32; 4],
    emissive: [f32; 4],
    surface: [f32; 4],
}

impl InstanceData {
    fn new(node: &SceneNode, world: Mat4) -> Self {
        let cols = world.to_cols_array_2d();
        let m = &node.material;
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            base_color: m.base_color.to_rgba(1.0),
            emissive: m.emissive.to_rgba(m.emissive_intensity),
            surface: [m.roughness, m.metalness, 0.0, 0.0],
        }
    }
}

/// Lights, background and particle appearance.
#[derive(Debug, Clone, Copy)]
pub struct SceneStyle {
    pub clear_color: Color,
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub light_position: Vec3,
    pub light_intensity: f32,
    pub particle_color: Color,
    pub particle_opacity: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            ambient_color: Color::WHITE,
            ambient_intensity: 0.5,
            light_position: Vec3::new(10.0, 10.0, 10.0),
            light_intensity: 1.0,
            particle_color: Color::from_rgb8(0x00, 0xFF, 0xF0),
            particle_opacity: 0.6,
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Build one instance per mounted part that has geometry, in draw order.
fn collect_instances(
    reactor: &Reactor,
    has_mesh: impl Fn(ReactorPart) -> bool,
) -> Vec<(ReactorPart, InstanceData)> {
    let scene = reactor.scene();
    scene
        .nodes()
        .filter(|(part, _)| has_mesh(*part))
        .filter_map(|(part, node)| {
            scene
                .world_matrix(part)
                .map(|world| (part, InstanceData::new(node, world)))
        })
        .collect()
}

/// wgpu-based reactor renderer.
///
/// Mesh geometry is built once from each part's initial shape; per-frame
/// transforms and materials come from the scene graph. Particles are uploaded
/// separately and only when the field reports a change.
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    meshes: BTreeMap<ReactorPart, GpuMesh>,
    instance_buffer: wgpu::Buffer,
    particle_buffer: wgpu::Buffer,
    particle_capacity: usize,
    particle_count: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    style: SceneStyle,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        particle_capacity: usize,
    ) -> Self {
        let style = SceneStyle::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(&OrbitCamera::default(), &style)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Mesh pipeline
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("reactor_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::REACTOR_SHADER.into()),
        });

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                            8 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Tori are seen from both sides while tumbling.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Particle pipeline
        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particle_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::PARTICLE_SHADER.into()),
        });

        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &particle_shader,
                entry_point: Some("vs_particle"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vec3>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &particle_shader,
                entry_point: Some("fs_particle"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Part meshes
        let mut meshes = BTreeMap::new();
        for part in ReactorPart::ALL {
            let Some(data) = mesh::mesh_for_shape(&SceneNode::initial(part).shape) else {
                continue;
            };
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(part.name()),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(part.name()),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            meshes.insert(
                part,
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: data.indices.len() as u32,
                },
            );
        }

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (ReactorPart::ALL.len() * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let particle_capacity = particle_capacity.max(1);
        let particle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_buffer"),
            size: (particle_capacity * std::mem::size_of::<Vec3>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::info!(
            meshes = meshes.len(),
            particle_capacity,
            ?surface_format,
            "reactor renderer ready"
        );

        Self {
            mesh_pipeline,
            particle_pipeline,
            uniform_buffer,
            uniform_bind_group,
            meshes,
            instance_buffer,
            particle_buffer,
            particle_capacity,
            particle_count: 0,
            depth_texture,
            surface_format,
            style,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut SceneStyle {
        &mut self.style
    }

    /// Replace the particle vertex data. Positions beyond the capacity given
    /// at construction are dropped.
    pub fn upload_particles(&mut self, queue: &wgpu::Queue, positions: &[Vec3]) {
        let count = positions.len().min(self.particle_capacity);
        if count < positions.len() {
            tracing::warn!(
                given = positions.len(),
                capacity = self.particle_capacity,
                "particle upload truncated"
            );
        }
        if count > 0 {
            queue.write_buffer(
                &self.particle_buffer,
                0,
                bytemuck::cast_slice(&positions[..count]),
            );
        }
        self.particle_count = count as u32;
    }

    /// Render one frame: lit reactor meshes, then the particle cloud.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        reactor: &Reactor,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(camera, &self.style)),
        );

        let instances = collect_instances(reactor, |part| self.meshes.contains_key(&part));
        if !instances.is_empty() {
            let data: Vec<InstanceData> = instances.iter().map(|(_, inst)| *inst).collect();
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&data));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let c = self.style.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: c.r as f64,
                            g: c.g as f64,
                            b: c.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if !instances.is_empty() {
                pass.set_pipeline(&self.mesh_pipeline);
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                for (slot, (part, _)) in instances.iter().enumerate() {
                    let Some(mesh) = self.meshes.get(part) else {
                        continue;
                    };
                    let slot = slot as u32;
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                    pass.draw_indexed(0..mesh.index_count, 0, slot..slot + 1);
                }
            }

            if self.particle_count > 0 {
                pass.set_pipeline(&self.particle_pipeline);
                pass.set_vertex_buffer(0, self.particle_buffer.slice(..));
                pass.draw(0..self.particle_count, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
