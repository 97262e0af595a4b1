//! wgpu backend: surface, depth buffer, opaque and alpha-blended pipelines.
//! wgpu = 26.x, winit = 0.30.x

use std::num::NonZeroU64;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use asset::mesh::MeshData;
use asset::texture::TextureData;
use bytemuck::{Pod, Zeroable};
use corelib::{MeshHandle, SceneObject, ShaderHandle, TextureHandle};
use wgpu::{
    util::DeviceExt,
    BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    BlendState, Buffer, BufferBindingType, BufferUsages, ColorTargetState, ColorWrites,
    CommandEncoderDescriptor, DepthBiasState, DepthStencilState, Device, DeviceDescriptor,
    Extent3d, Features, FragmentState, Instance, InstanceDescriptor, Limits, LoadOp, Operations,
    PipelineLayout, PipelineLayoutDescriptor, PowerPreference, PresentMode, Queue,
    RenderPassColorAttachment, RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor,
    Sampler, ShaderModule, ShaderModuleDescriptor, ShaderSource, ShaderStages, StoreOp, Surface,
    SurfaceConfiguration, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages,
    TextureView, TextureViewDescriptor, VertexBufferLayout, VertexState, VertexStepMode,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::error::{RenderError, RenderResult};
use crate::frame::{BlendMode, ClearColor, DrawContext, RenderBackend};

/// Vertex: position + normal + uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
    };
}

/// Per-object UBO (16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ObjectUniform {
    world: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    /// x = alpha
    params: [f32; 4],
}

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

struct GpuMesh {
    vertex_buf: Buffer,
    index_buf: Buffer,
    index_count: u32,
}

struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: BindGroup,
}

/// Uniform buffer + bind group for one draw in the frame.
struct ObjectSlot {
    buffer: Buffer,
    bind_group: BindGroup,
}

struct DrawCommand {
    mesh: usize,
    texture: usize,
    slot: usize,
    blend: BlendMode,
}

pub struct GpuState {
    // Surface
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,

    // Device/queue
    device: Device,
    queue: Queue,

    // Pipelines
    opaque_pipeline: RenderPipeline,
    blended_pipeline: RenderPipeline,
    object_bgl: BindGroupLayout,
    texture_bgl: BindGroupLayout,
    sampler: Sampler,

    // Resources
    meshes: Vec<GpuMesh>,
    textures: Vec<GpuTexture>,
    object_slots: Vec<ObjectSlot>,

    // Depth
    depth_view: TextureView,

    // Frame recording
    clear_color: wgpu::Color,
    blend: BlendMode,
    draws: Vec<DrawCommand>,

    // Size cache
    width: u32,
    height: u32,
}

impl GpuState {
    /// Create GPU state bound to an Arc<Window>.
    pub async fn new(window: Arc<Window>, backends: wgpu::Backends) -> Result<Self> {
        let PhysicalSize { width, height } = window.inner_size();
        let width = width.max(1);
        let height = height.max(1);

        // Instance & surface
        let instance = Instance::new(&InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface: Surface<'static> = instance
            .create_surface(window.clone())
            .context("create_surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Orbitview Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("request_device failed")?;

        // Surface format (prefer sRGB)
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("Surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .context("Surface reports no alpha modes")?;

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let depth_view = create_depth_view(&device, &surface_config);

        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Textured WGSL"),
            source: ShaderSource::Wgsl(include_str!("shaders/textured.wgsl").into()),
        });

        // ==== Bind group layouts ====
        let object_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Object BGL"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<ObjectUniform>() as u64),
                },
                count: None,
            }],
        });
        let texture_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Texture BGL"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Base sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // ==== Pipelines ====
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Textured PipelineLayout"),
            bind_group_layouts: &[&object_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_format,
            BlendState::REPLACE,
            "Opaque Pipeline",
        );
        let blended_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_format,
            BlendState::ALPHA_BLENDING,
            "Blended Pipeline",
        );

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            opaque_pipeline,
            blended_pipeline,
            object_bgl,
            texture_bgl,
            sampler,
            meshes: Vec::new(),
            textures: Vec::new(),
            object_slots: Vec::new(),
            depth_view,
            clear_color: wgpu::Color::BLACK,
            blend: BlendMode::Opaque,
            draws: Vec::new(),
            width,
            height,
        })
    }

    /// Fails on meshes with out-of-range indices or a partial triangle.
    pub fn upload_mesh(&mut self, mesh: &MeshData) -> Result<MeshHandle> {
        check_mesh(mesh)?;
        let vertices: Vec<Vertex> = mesh
            .vertices
            .iter()
            .map(|v| Vertex {
                pos: v.position,
                normal: v.normal,
                uv: v.uv,
            })
            .collect();
        let vertex_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} VB", mesh.label)),
                contents: bytemuck::cast_slice(&vertices),
                usage: BufferUsages::VERTEX,
            });
        let index_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} IB", mesh.label)),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: BufferUsages::INDEX,
            });

        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(GpuMesh {
            vertex_buf,
            index_buf,
            index_count: mesh.indices.len() as u32,
        });
        log::debug!(
            "Uploaded mesh '{}' as {handle:?}: {} vertices, {} triangles",
            mesh.label,
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(handle)
    }

    pub fn upload_texture(&mut self, data: &TextureData) -> Result<TextureHandle> {
        if !data.is_valid() {
            bail!(
                "Texture '{}' has {} bytes, expected {}x{} RGBA8",
                data.label,
                data.data.len(),
                data.width,
                data.height
            );
        }
        let size = Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&TextureDescriptor {
            label: Some(&data.label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.row_pitch()),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture BG"),
            layout: &self.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(GpuTexture {
            _texture: texture,
            bind_group,
        });
        log::debug!("Uploaded texture '{}' as {handle:?}", data.label);
        Ok(handle)
    }

    /// Resize: reconfigure surface & recreate depth view.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.surface_config.width = self.width;
        self.surface_config.height = self.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_view(&self.device, &self.surface_config);
    }

    pub fn recreate_surface(&mut self) {
        self.resize(self.width, self.height);
    }

    /// Make sure at least `count` per-draw uniform slots exist.
    fn ensure_object_slots(&mut self, count: usize) {
        while self.object_slots.len() < count {
            let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Object UBO"),
                size: std::mem::size_of::<ObjectUniform>() as u64,
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Object BG"),
                layout: &self.object_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            self.object_slots.push(ObjectSlot { buffer, bind_group });
        }
    }
}

impl RenderBackend for GpuState {
    fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: ClearColor) -> RenderResult<()> {
        self.draws.clear();
        self.blend = BlendMode::Opaque;
        self.clear_color = wgpu::Color {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        Ok(())
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn draw(&mut self, object: &SceneObject, ctx: &DrawContext) -> RenderResult<()> {
        if ctx.shader != ShaderHandle::TEXTURED {
            return Err(RenderError::UnknownShader(ctx.shader));
        }
        let mesh = object.mesh.0 as usize;
        if mesh >= self.meshes.len() {
            return Err(RenderError::UnknownMesh(object.mesh));
        }
        let texture = object.texture.0 as usize;
        if texture >= self.textures.len() {
            return Err(RenderError::UnknownTexture(object.texture));
        }

        let uniform = ObjectUniform {
            world: object.world_matrix.to_cols_array_2d(),
            view: ctx.view.to_cols_array_2d(),
            projection: ctx.projection.to_cols_array_2d(),
            params: [object.alpha, 0.0, 0.0, 0.0],
        };
        let slot = self.draws.len();
        self.ensure_object_slots(slot + 1);
        self.queue.write_buffer(
            &self.object_slots[slot].buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );

        self.draws.push(DrawCommand {
            mesh,
            texture,
            slot,
            blend: self.blend,
        });
        Ok(())
    }

    /// Encode the recorded draws in one pass and present.
    fn present(&mut self) -> RenderResult<()> {
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("MainEncoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("MainPass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for draw in &self.draws {
                let pipeline = match draw.blend {
                    BlendMode::Opaque => &self.opaque_pipeline,
                    BlendMode::AlphaBlend => &self.blended_pipeline,
                };
                let mesh = &self.meshes[draw.mesh];
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(0, &self.object_slots[draw.slot].bind_group, &[]);
                rpass.set_bind_group(1, &self.textures[draw.texture].bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
                rpass.set_index_buffer(mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        log::trace!("Presented {} draws", self.draws.len());
        self.draws.clear();
        Ok(())
    }
}

fn check_mesh(mesh: &MeshData) -> Result<()> {
    if !mesh.is_valid() {
        bail!(
            "Mesh '{}' is malformed: {} vertices, {} indices",
            mesh.label,
            mesh.vertices.len(),
            mesh.indices.len()
        );
    }
    Ok(())
}

fn create_pipeline(
    device: &Device,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    format: TextureFormat,
    blend: BlendState,
    label: &str,
) -> RenderPipeline {
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Create a depth texture view matching the surface config.
fn create_depth_view(device: &Device, sc: &SurfaceConfiguration) -> TextureView {
    let tex = device.create_texture(&TextureDescriptor {
        label: Some("DepthTex"),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_layouts_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 208);
        assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
    }

    #[test]
    fn malformed_meshes_are_rejected_before_upload() {
        assert!(check_mesh(&asset::primitives::quad()).is_ok());

        let mut out_of_range = asset::primitives::quad();
        out_of_range.indices[2] = 99;
        let err = check_mesh(&out_of_range).unwrap_err();
        assert!(err.to_string().contains("malformed"));

        let mut partial = asset::primitives::quad();
        partial.indices.pop();
        assert!(check_mesh(&partial).is_err());
    }
}
