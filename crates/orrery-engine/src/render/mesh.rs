use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::camera::PerspectiveCamera;
use crate::device::DEPTH_FORMAT;
use crate::geometry::{MeshData, Topology};
use crate::scene::{MAX_LIGHTS, Scene};

use super::{RenderCtx, RenderTarget};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LightUniform {
    /// xyz: direction toward the light, w: intensity
    direction: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    lights: [LightUniform; MAX_LIGHTS],
    /// x: number of active lights
    light_count: [u32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
    topology: Topology,
}

/// Renders a scene/camera pair.
///
/// GPU resources are created lazily on first use and kept across frames.
/// Mesh data is treated as immutable: an object's buffers are uploaded the
/// first time the object is seen and cached by its scene index afterwards.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    lit: Option<wgpu::RenderPipeline>,
    lit_double_sided: Option<wgpu::RenderPipeline>,
    unlit_triangles: Option<wgpu::RenderPipeline>,
    lines: Option<wgpu::RenderPipeline>,

    frame_bgl: Option<wgpu::BindGroupLayout>,
    object_bgl: Option<wgpu::BindGroupLayout>,

    frame_ubo: Option<wgpu::Buffer>,
    frame_bg: Option<wgpu::BindGroup>,

    object_ubo: Option<wgpu::Buffer>,
    object_bg: Option<wgpu::BindGroup>,
    object_capacity: usize,

    meshes: HashMap<usize, GpuMesh>,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every object of `scene` in insertion order.
    ///
    /// The color/depth attachments are loaded, not cleared; clearing is the
    /// frame context's job.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) {
        if scene.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_frame_resources(ctx);
        self.ensure_object_capacity(ctx, scene.len());
        self.ensure_meshes(ctx, scene);

        self.write_frame_uniforms(ctx, scene, camera);
        let stride = self.write_object_uniforms(ctx, scene);

        let Some(lit) = self.lit.as_ref() else { return };
        let Some(lit_double_sided) = self.lit_double_sided.as_ref() else { return };
        let Some(unlit_triangles) = self.unlit_triangles.as_ref() else { return };
        let Some(lines) = self.lines.as_ref() else { return };
        let Some(frame_bg) = self.frame_bg.as_ref() else { return };
        let Some(object_bg) = self.object_bg.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("orrery mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, frame_bg, &[]);

        for (index, object) in scene.objects().iter().enumerate() {
            let Some(mesh) = self.meshes.get(&index) else { continue };
            if mesh.index_count == 0 {
                continue;
            }

            let pipeline = match (mesh.topology, object.material.unlit) {
                (Topology::LineList, _) => lines,
                (Topology::TriangleList, true) => unlit_triangles,
                (Topology::TriangleList, false) if object.material.double_sided => {
                    lit_double_sided
                }
                (Topology::TriangleList, false) => lit,
            };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(1, object_bg, &[(index as u64 * stride) as u32]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn object_stride(&self, ctx: &RenderCtx<'_>) -> u64 {
        let align = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        (std::mem::size_of::<ObjectUniforms>() as u64).div_ceil(align) * align
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.lit.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let frame_bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("orrery frame bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<FrameUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let object_bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("orrery object bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<ObjectUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("orrery mesh pipeline layout"),
                bind_group_layouts: &[&frame_bgl, &object_bgl],
                immediate_size: 0,
            });

        let make_pipeline = |label: &str,
                             topology: wgpu::PrimitiveTopology,
                             cull_mode: Option<wgpu::Face>,
                             fs_entry: &str| {
            ctx.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(label),
                    layout: Some(&layout),

                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &[Vertex::layout()],
                    },

                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: Some(fs_entry),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: ctx.surface_format,
                            blend: Some(wgpu::BlendState::REPLACE),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),

                    primitive: wgpu::PrimitiveState {
                        topology,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },

                    depth_stencil: Some(wgpu::DepthStencilState {
                        format: DEPTH_FORMAT,
                        depth_write_enabled: true,
                        depth_compare: wgpu::CompareFunction::Less,
                        stencil: wgpu::StencilState::default(),
                        bias: wgpu::DepthBiasState::default(),
                    }),

                    multisample: wgpu::MultisampleState::default(),
                    multiview_mask: None,
                    cache: None,
                })
        };

        self.lit = Some(make_pipeline(
            "orrery lit pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
            "fs_lit",
        ));
        self.lit_double_sided = Some(make_pipeline(
            "orrery lit double-sided pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            None,
            "fs_lit",
        ));
        self.unlit_triangles = Some(make_pipeline(
            "orrery unlit triangle pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            None,
            "fs_unlit",
        ));
        self.lines = Some(make_pipeline(
            "orrery line pipeline",
            wgpu::PrimitiveTopology::LineList,
            None,
            "fs_unlit",
        ));

        self.pipeline_format = Some(ctx.surface_format);
        self.frame_bgl = Some(frame_bgl);
        self.object_bgl = Some(object_bgl);

        // Bind groups reference the old layouts; rebuild them lazily.
        self.frame_ubo = None;
        self.frame_bg = None;
        self.object_ubo = None;
        self.object_bg = None;
        self.object_capacity = 0;
    }

    fn ensure_frame_resources(&mut self, ctx: &RenderCtx<'_>) {
        if self.frame_bg.is_some() {
            return;
        }
        let Some(bgl) = self.frame_bgl.as_ref() else { return };

        let frame_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery frame ubo"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bg = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery frame bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_ubo.as_entire_binding(),
            }],
        });

        self.frame_ubo = Some(frame_ubo);
        self.frame_bg = Some(frame_bg);
    }

    fn ensure_object_capacity(&mut self, ctx: &RenderCtx<'_>, count: usize) {
        if count <= self.object_capacity && self.object_bg.is_some() {
            return;
        }
        let Some(bgl) = self.object_bgl.as_ref() else { return };

        let stride = self.object_stride(ctx);
        let capacity = count.next_power_of_two().max(16);

        let object_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery object ubo"),
            size: capacity as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let object_bg = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery object bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_ubo,
                    offset: 0,
                    size: std::num::NonZeroU64::new(
                        std::mem::size_of::<ObjectUniforms>() as u64
                    ),
                }),
            }],
        });

        self.object_ubo = Some(object_ubo);
        self.object_bg = Some(object_bg);
        self.object_capacity = capacity;
    }

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>, scene: &Scene) {
        for (index, object) in scene.objects().iter().enumerate() {
            if self.meshes.contains_key(&index) {
                continue;
            }
            self.meshes.insert(index, upload_mesh(ctx, &object.mesh));
        }
    }

    fn write_frame_uniforms(
        &self,
        ctx: &RenderCtx<'_>,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) {
        let Some(frame_ubo) = self.frame_ubo.as_ref() else { return };

        let mut lights = [LightUniform {
            direction: [0.0; 4],
            color: [0.0; 4],
        }; MAX_LIGHTS];

        let active = scene.lights().iter().take(MAX_LIGHTS);
        let mut count = 0u32;
        for (slot, light) in lights.iter_mut().zip(active) {
            let dir = light.direction_to_light();
            slot.direction = [dir.x, dir.y, dir.z, light.intensity];
            slot.color = [light.color.r, light.color.g, light.color.b, 1.0];
            count += 1;
        }

        let uniforms = FrameUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            lights,
            light_count: [count, 0, 0, 0],
        };

        ctx.queue
            .write_buffer(frame_ubo, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Writes one `ObjectUniforms` per object at the aligned stride and
    /// returns that stride.
    fn write_object_uniforms(&self, ctx: &RenderCtx<'_>, scene: &Scene) -> u64 {
        let stride = self.object_stride(ctx);
        let Some(object_ubo) = self.object_ubo.as_ref() else { return stride };

        let mut data = vec![0u8; scene.len() * stride as usize];
        for (index, object) in scene.objects().iter().enumerate() {
            let color = object.material.color;
            let uniforms = ObjectUniforms {
                model: object.transform.matrix().to_cols_array_2d(),
                color: [color.r, color.g, color.b, 1.0],
            };
            let offset = index * stride as usize;
            data[offset..offset + std::mem::size_of::<ObjectUniforms>()]
                .copy_from_slice(bytemuck::bytes_of(&uniforms));
        }

        ctx.queue.write_buffer(object_ubo, 0, &data);
        stride
    }
}

fn upload_mesh(ctx: &RenderCtx<'_>, mesh: &MeshData) -> GpuMesh {
    let vertices: Vec<Vertex> = mesh
        .positions
        .iter()
        .zip(&mesh.normals)
        .map(|(p, n)| Vertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect();

    let vbo = ctx
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery mesh vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

    let ibo = ctx
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery mesh ibo"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

    GpuMesh {
        vbo,
        ibo,
        index_count: mesh.indices.len() as u32,
        topology: mesh.topology,
    }
}
