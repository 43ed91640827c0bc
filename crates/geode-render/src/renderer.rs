//! wgpu implementation of the sphere render protocol.
//!
//! [`SphereRenderer`] owns the pipeline and every GPU resource the sphere
//! needs. A [`GpuFrame`] borrows it together with the [`RenderContext`] and
//! implements [`GraphicsDevice`], so [`crate::render_frame`] can drive it.

use std::num::NonZeroU64;

use bytemuck::Zeroable;
use geode_lighting::{LightingProducts, PhongUniform};
use geode_mesh::{MeshBuffer, SPHERE_VERTEX_LAYOUT};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::context::{RenderContext, SurfaceError};
use crate::depth::DepthBuffer;
use crate::frame::GraphicsDevice;
use crate::pass::RenderPassBuilder;
use crate::shader::{SPHERE_SHADER_SOURCE, ShaderError, create_shader};
use crate::texture::{SphereTexture, TextureError, TextureImage};
use crate::transform::TransformUniform;

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

pub struct SphereRenderer {
    pipeline: wgpu::RenderPipeline,
    pass: RenderPassBuilder,
    depth: DepthBuffer,
    transform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
    lighting_buffer: wgpu::Buffer,
    lighting_bind_group: wgpu::BindGroup,
    surface_bind_group: wgpu::BindGroup,
    texture: SphereTexture,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
}

fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    size: u64,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

impl SphereRenderer {
    /// Compile the shader and create the pipeline, uniforms and surface
    /// texture. Lighting starts zeroed until [`GraphicsDevice::upload_lighting`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        image: &TextureImage,
        tint: [f32; 4],
        clear_color: wgpu::Color,
    ) -> Result<Self, RendererError> {
        let shader = create_shader(device, "sphere", SPHERE_SHADER_SOURCE)?;

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sphere-transform-bgl"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX,
                size_of::<TransformUniform>() as u64,
            )],
        });

        let lighting_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sphere-lighting-bgl"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::FRAGMENT,
                size_of::<PhongUniform>() as u64,
            )],
        });

        let surface_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sphere-surface-bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                uniform_entry(2, wgpu::ShaderStages::FRAGMENT, 16),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sphere-pipeline-layout"),
            bind_group_layouts: &[&transform_layout, &lighting_layout, &surface_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sphere-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SPHERE_VERTEX_LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Subdivided faces wind clockwise seen from outside.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere-transforms"),
            contents: bytemuck::bytes_of(&TransformUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sphere-transform-bg"),
            layout: &transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        let lighting_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere-lighting"),
            contents: bytemuck::bytes_of(&PhongUniform::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lighting_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sphere-lighting-bg"),
            layout: &lighting_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: lighting_buffer.as_entire_binding(),
            }],
        });

        let texture = SphereTexture::upload(device, queue, image)?;
        let tint_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere-tint"),
            contents: bytemuck::bytes_of(&tint),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let surface_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sphere-surface-bg"),
            layout: &surface_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: tint_buffer.as_entire_binding(),
                },
            ],
        });

        Ok(Self {
            pipeline,
            pass: RenderPassBuilder::new()
                .clear_color(clear_color)
                .with_depth()
                .label("sphere-pass"),
            depth: DepthBuffer::new(device, width, height),
            transform_buffer,
            transform_bind_group,
            lighting_buffer,
            lighting_bind_group,
            surface_bind_group,
            texture,
            vertex_buffer: None,
            vertex_count: 0,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    /// Replace the vertex buffer with the interleaved contents of `mesh`.
    pub fn upload_mesh(&mut self, device: &wgpu::Device, mesh: &MeshBuffer) {
        let vertices = mesh.to_vertices();
        self.vertex_count = vertices.len() as u32;
        self.vertex_buffer = (!vertices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("sphere-vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        log::debug!("Uploaded {} sphere vertices", self.vertex_count);
    }

    pub fn upload_lighting(&self, queue: &wgpu::Queue, lighting: &LightingProducts) {
        queue.write_buffer(
            &self.lighting_buffer,
            0,
            bytemuck::bytes_of(&lighting.to_uniform()),
        );
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn texture(&self) -> &SphereTexture {
        &self.texture
    }

    /// Borrow the renderer as a [`GraphicsDevice`] targeting the window
    /// surface of `context`.
    pub fn frame<'a>(&'a mut self, context: &'a RenderContext) -> GpuFrame<'a> {
        GpuFrame {
            context,
            renderer: self,
            active: None,
        }
    }
}

struct ActiveFrame {
    pass: wgpu::RenderPass<'static>,
    encoder: wgpu::CommandEncoder,
    surface_texture: wgpu::SurfaceTexture,
}

/// One frame in flight on the window surface.
pub struct GpuFrame<'a> {
    context: &'a RenderContext,
    renderer: &'a mut SphereRenderer,
    active: Option<ActiveFrame>,
}

impl GraphicsDevice for GpuFrame<'_> {
    type Error = SurfaceError;

    fn begin_frame(&mut self) -> Result<(), SurfaceError> {
        let surface_texture = self.context.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("sphere-frame-encoder"),
                });

        let renderer = &*self.renderer;
        let mut pass = renderer
            .pass
            .begin(&mut encoder, &view, Some(&renderer.depth.view))
            .forget_lifetime();
        pass.set_pipeline(&renderer.pipeline);
        pass.set_bind_group(0, &renderer.transform_bind_group, &[]);
        pass.set_bind_group(1, &renderer.lighting_bind_group, &[]);
        pass.set_bind_group(2, &renderer.surface_bind_group, &[]);
        if let Some(buffer) = &renderer.vertex_buffer {
            pass.set_vertex_buffer(0, buffer.slice(..));
        }

        self.active = Some(ActiveFrame {
            pass,
            encoder,
            surface_texture,
        });
        Ok(())
    }

    fn upload_transforms(&mut self, view: &Mat4, projection: &Mat4) {
        self.context.queue.write_buffer(
            &self.renderer.transform_buffer,
            0,
            bytemuck::bytes_of(&TransformUniform::new(view, projection)),
        );
    }

    fn draw(&mut self, first: u32, count: u32) {
        if let Some(frame) = &mut self.active {
            frame.pass.draw(first..first + count, 0..1);
        }
    }

    fn end_frame(&mut self) -> Result<(), SurfaceError> {
        let Some(ActiveFrame {
            pass,
            encoder,
            surface_texture,
        }) = self.active.take()
        else {
            return Ok(());
        };
        drop(pass);
        self.context.queue.submit([encoder.finish()]);
        surface_texture.present();
        Ok(())
    }

    fn upload_mesh(&mut self, mesh: &MeshBuffer) {
        self.renderer.upload_mesh(&self.context.device, mesh);
    }

    fn upload_lighting(&mut self, lighting: &LightingProducts) {
        self.renderer.upload_lighting(&self.context.queue, lighting);
    }
}
