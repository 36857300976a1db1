use std::sync::Arc;
use wgpu::{BindGroup, RenderPipeline, Surface, SurfaceConfiguration, Texture, TextureView};
use winit::window::Window;

use super::color::Color;
use super::display_context::DisplayContext;
use super::gpu_context::GpuContext;
use super::window::PresentTarget;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Presents a packed-color pixel buffer on a window surface.
///
/// The canvas buffer's little-endian byte layout is B, G, R, X per pixel,
/// so it uploads directly into a `Bgra8Unorm` texture with no conversion;
/// a fullscreen triangle then stretches that texture over the surface.
pub struct SurfaceRenderer {
    gpu: GpuContext,
    window: Arc<Window>,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    render_pipeline: RenderPipeline,
    texture: Texture,
    bind_group: BindGroup,
    size: DisplayContext,
}

impl SurfaceRenderer {
    /// Create a renderer presenting to the given window
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let inner = window.inner_size();
        let size = DisplayContext::new(inner.width, inner.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let gpu = pollster::block_on(GpuContext::new_with_surface(&instance, &surface))?;

        let surface_format = wgpu::TextureFormat::Bgra8Unorm;
        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &surface_config);

        let texture = Self::create_canvas_texture(&gpu, size);
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (render_pipeline, bind_group) =
            Self::create_render_pipeline(&gpu, &texture_view, surface_format);

        Ok(Self {
            gpu,
            window,
            surface,
            surface_config,
            render_pipeline,
            texture,
            bind_group,
            size,
        })
    }

    /// Upload a packed pixel buffer and present it
    pub fn render_pixels(&self, pixels: &[Color]) -> Result<()> {
        if pixels.len() != self.size.pixel_count() {
            return Err(format!(
                "Invalid pixel buffer size: expected {} pixels for {}x{}, got {}",
                self.size.pixel_count(),
                self.size.width,
                self.size.height,
                pixels.len()
            )
            .into());
        }

        self.gpu.queue().write_texture(
            self.texture.as_image_copy(),
            bytemuck::cast_slice(pixels),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.size.width),
                rows_per_image: Some(self.size.height),
            },
            wgpu::Extent3d {
                width: self.size.width,
                height: self.size.height,
                depth_or_array_layers: 1,
            },
        );

        let surface_texture = self.surface.get_current_texture()?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Present Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        surface_texture.present();

        Ok(())
    }

    /// Resize the surface and its canvas texture
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.size = DisplayContext::new(width, height);
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface
            .configure(self.gpu.device(), &self.surface_config);

        self.texture = Self::create_canvas_texture(&self.gpu, self.size);
        let texture_view = self.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group_layout = self.render_pipeline.get_bind_group_layout(0);
        self.bind_group = Self::create_bind_group(&self.gpu, &bind_group_layout, &texture_view);
    }

    /// Current surface dimensions
    pub fn dimensions(&self) -> DisplayContext {
        self.size
    }

    /// Create the texture the canvas buffer uploads into
    fn create_canvas_texture(gpu: &GpuContext, size: DisplayContext) -> Texture {
        gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Texture"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Bgra8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        })
    }

    /// Create render pipeline for stretching the texture over the surface
    fn create_render_pipeline(
        gpu: &GpuContext,
        texture_view: &TextureView,
        surface_format: wgpu::TextureFormat,
    ) -> (RenderPipeline, BindGroup) {
        let shader = gpu
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Canvas Display Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("../display.wgsl").into()),
            });

        let bind_group_layout =
            gpu.device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Canvas Texture Bind Group Layout"),
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
                    ],
                });

        let bind_group = Self::create_bind_group(gpu, &bind_group_layout, texture_view);

        let pipeline_layout =
            gpu.device()
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Canvas Present Pipeline Layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                });

        let pipeline = gpu
            .device()
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Canvas Present Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        (pipeline, bind_group)
    }

    /// Create bind group for the canvas texture
    fn create_bind_group(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        texture_view: &TextureView,
    ) -> BindGroup {
        let sampler = gpu.device().create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Texture Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        })
    }
}

impl PresentTarget for SurfaceRenderer {
    fn size(&self) -> DisplayContext {
        self.size
    }

    fn present(&mut self, pixels: &[Color]) -> Result<()> {
        self.render_pixels(pixels)
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_validation_math() {
        // Full SurfaceRenderer needs a window; check the size contract the
        // validation in render_pixels enforces.
        let size = DisplayContext::new(100, 100);
        let pixels = vec![Color::BLACK; size.pixel_count()];
        assert_eq!(bytemuck::cast_slice::<Color, u8>(&pixels).len(), size.buffer_size());
    }
}
