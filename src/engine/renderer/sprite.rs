// Sprite rendering system

use super::{Camera, CameraUniform, Texture, Vertex};
use crate::core::Rect;
use crate::engine::assets::{AssetId, AssetManager, TextureHandle};
use glam::{Mat4, UVec2, Vec2, Vec4};
use std::collections::HashMap;
use std::ops::Range;
use wgpu::util::DeviceExt;

/// Vertices emitted per sprite (two triangles, no index buffer)
const VERTICES_PER_SPRITE: u32 = 6;

/// A textured or solid quad in world space
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Where the quad lands in world space
    pub bounds: Rect,
    /// Pixel rectangle of the texture to show; `None` shows all of it
    pub source: Option<Rect>,
    /// Mirror the image horizontally
    pub flip_x: bool,
    /// Colour multiplier (linear RGBA)
    pub color: Vec4,
    /// Texture handle (None = white texture)
    pub texture: Option<TextureHandle>,
}

impl Sprite {
    /// Untextured quad of a single colour
    pub fn solid(bounds: Rect, color: Vec4) -> Self {
        Self {
            bounds,
            source: None,
            flip_x: false,
            color,
            texture: None,
        }
    }

    /// Quad showing `source` (in pixels) of a texture
    pub fn textured(bounds: Rect, texture: TextureHandle, source: Option<Rect>) -> Self {
        Self {
            bounds,
            source,
            flip_x: false,
            color: Vec4::ONE,
            texture: Some(texture),
        }
    }

    pub fn flipped(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    pub fn tinted(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }
}

/// Normalised texture coordinates for a pixel source rectangle.
///
/// Returns `(uv_min, uv_max)`; flipping swaps the horizontal pair.
pub fn uv_rect(source: Option<Rect>, texture_size: UVec2, flip_x: bool) -> (Vec2, Vec2) {
    let (mut min, mut max) = match source {
        Some(rect) if texture_size.x > 0 && texture_size.y > 0 => {
            let size = texture_size.as_vec2();
            (rect.position / size, (rect.position + rect.size) / size)
        }
        _ => (Vec2::ZERO, Vec2::ONE),
    };

    if flip_x {
        std::mem::swap(&mut min.x, &mut max.x);
    }
    (min, max)
}

/// Two triangles covering `bounds`, y pointing down
fn quad_vertices(bounds: Rect, uv_min: Vec2, uv_max: Vec2, color: Vec4) -> [Vertex; 6] {
    let top_left = Vertex::new(bounds.position, uv_min, color);
    let top_right = Vertex::new(
        Vec2::new(bounds.right(), bounds.top()),
        Vec2::new(uv_max.x, uv_min.y),
        color,
    );
    let bottom_right = Vertex::new(Vec2::new(bounds.right(), bounds.bottom()), uv_max, color);
    let bottom_left = Vertex::new(
        Vec2::new(bounds.left(), bounds.bottom()),
        Vec2::new(uv_min.x, uv_max.y),
        color,
    );

    [top_left, bottom_left, bottom_right, top_left, bottom_right, top_right]
}

/// A run of consecutive sprites sharing a texture
#[derive(Debug, Clone, PartialEq)]
struct SpriteBatch {
    /// `None` draws with the white texture
    texture: Option<AssetId>,
    vertices: Range<u32>,
}

/// Build vertices and draw batches for a frame's sprites, in draw order.
///
/// Sprites whose texture is not resident are skipped.
fn build_batches(sprites: &[Sprite], assets: &AssetManager) -> (Vec<Vertex>, Vec<SpriteBatch>) {
    let mut vertices = Vec::with_capacity(sprites.len() * VERTICES_PER_SPRITE as usize);
    let mut batches: Vec<SpriteBatch> = Vec::new();

    for sprite in sprites {
        let (texture, size) = match sprite.texture {
            Some(handle) => match assets.texture_size(handle) {
                Some(size) => (Some(handle.id()), size),
                None => continue,
            },
            None => (None, UVec2::ONE),
        };

        let (uv_min, uv_max) = uv_rect(sprite.source, size, sprite.flip_x);
        let start = vertices.len() as u32;
        vertices.extend_from_slice(&quad_vertices(sprite.bounds, uv_min, uv_max, sprite.color));
        let end = vertices.len() as u32;

        match batches.last_mut() {
            Some(batch) if batch.texture == texture => batch.vertices.end = end,
            _ => batches.push(SpriteBatch {
                texture,
                vertices: start..end,
            }),
        }
    }

    (vertices, batches)
}

/// Batched quad renderer
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    white_bind_group: wgpu::BindGroup,
    /// Bind groups for textures seen so far; textures are never replaced
    bind_groups: HashMap<AssetId, wgpu::BindGroup>,
    batches: Vec<SpriteBatch>,
}

impl SpriteRenderer {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-down projection mirrors winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(device, 256);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let white = Texture::from_color(device, queue, [255, 255, 255, 255], Some("White"));
        let white_bind_group = white.bind_group(device, &texture_layout);

        Self {
            render_pipeline,
            vertex_buffer,
            camera_buffer,
            camera_bind_group,
            texture_layout,
            white_bind_group,
            bind_groups: HashMap::new(),
            batches: Vec::new(),
        }
    }

    fn create_vertex_buffer(device: &wgpu::Device, sprite_capacity: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: sprite_capacity
                * VERTICES_PER_SPRITE as u64
                * std::mem::size_of::<Vertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload this frame's sprites and camera
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &Camera,
        sprites: &[Sprite],
        assets: &AssetManager,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(camera)]),
        );

        let (vertices, batches) = build_batches(sprites, assets);
        self.batches = batches;
        if vertices.is_empty() {
            return;
        }

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        if bytes.len() as u64 > self.vertex_buffer.size() {
            let sprite_count = (vertices.len() as u64 / VERTICES_PER_SPRITE as u64).next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(device, sprite_count);
        }
        queue.write_buffer(&self.vertex_buffer, 0, bytes);

        for batch in &self.batches {
            let Some(id) = batch.texture else { continue };
            if self.bind_groups.contains_key(&id) {
                continue;
            }
            let handle = TextureHandle::new(id);
            if let Some(texture) = assets.get_texture(handle) {
                self.bind_groups
                    .insert(id, texture.bind_group(device, &self.texture_layout));
            }
        }
    }

    /// Draw everything passed to the last `prepare`
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.batches.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for batch in &self.batches {
            let bind_group = match batch.texture {
                Some(id) => match self.bind_groups.get(&id) {
                    Some(group) => group,
                    None => continue,
                },
                None => &self.white_bind_group,
            };
            render_pass.set_bind_group(1, bind_group, &[]);
            render_pass.draw(batch.vertices.clone(), 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uv_of_frame_in_sheet() {
        // Second column, third row of a 2x4 grid of 64x64 frames
        let (min, max) = uv_rect(
            Some(Rect::new(64.0, 128.0, 64.0, 64.0)),
            UVec2::new(128, 256),
            false,
        );
        assert_relative_eq!(min.x, 0.5);
        assert_relative_eq!(min.y, 0.5);
        assert_relative_eq!(max.x, 1.0);
        assert_relative_eq!(max.y, 0.75);
    }

    #[test]
    fn test_uv_flip_swaps_horizontal() {
        let (min, max) = uv_rect(Some(Rect::new(0.0, 0.0, 32.0, 32.0)), UVec2::new(64, 32), true);
        assert_relative_eq!(min.x, 0.5);
        assert_relative_eq!(max.x, 0.0);
        assert_relative_eq!(min.y, 0.0);
        assert_relative_eq!(max.y, 1.0);
    }

    #[test]
    fn test_uv_without_source_covers_texture() {
        assert_eq!(uv_rect(None, UVec2::new(10, 10), false), (Vec2::ZERO, Vec2::ONE));
    }

    #[test]
    fn test_quad_covers_bounds() {
        let bounds = Rect::new(10.0, 20.0, 30.0, 40.0);
        let quad = quad_vertices(bounds, Vec2::ZERO, Vec2::ONE, Vec4::ONE);

        assert_eq!(quad[0].position, [10.0, 20.0]);
        assert_eq!(quad[2].position, [40.0, 60.0]);
        assert_eq!(quad[2].tex_coords, [1.0, 1.0]);
        assert_eq!(quad[5].position, [40.0, 20.0]);
        assert_eq!(quad[5].tex_coords, [1.0, 0.0]);
    }

    #[test]
    fn test_solid_sprites_share_one_batch() {
        let assets = AssetManager::new("assets");
        let sprites = vec![
            Sprite::solid(Rect::new(0.0, 0.0, 10.0, 10.0), Vec4::ONE),
            Sprite::solid(Rect::new(20.0, 0.0, 10.0, 10.0), Vec4::ONE),
        ];

        let (vertices, batches) = build_batches(&sprites, &assets);
        assert_eq!(vertices.len(), 12);
        assert_eq!(
            batches,
            vec![SpriteBatch {
                texture: None,
                vertices: 0..12
            }]
        );
    }

    #[test]
    fn test_sprites_with_missing_texture_are_skipped() {
        let assets = AssetManager::new("assets");
        let missing = TextureHandle::new(AssetId::from_path("not-loaded.png"));
        let sprites = vec![
            Sprite::textured(Rect::new(0.0, 0.0, 10.0, 10.0), missing, None),
            Sprite::solid(Rect::new(0.0, 0.0, 10.0, 10.0), Vec4::ONE),
        ];

        let (vertices, batches) = build_batches(&sprites, &assets);
        assert_eq!(vertices.len(), 6);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].texture, None);
    }

    #[test]
    fn test_builder_helpers() {
        let sprite = Sprite::solid(Rect::new(0.0, 0.0, 1.0, 1.0), Vec4::ONE)
            .flipped(true)
            .tinted(Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert!(sprite.flip_x);
        assert_eq!(sprite.color.y, 0.0);
    }
}
