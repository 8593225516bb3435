use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use gasket_geometry::Triangle;

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::shader;

/// Solid-fill triangle renderer.
///
/// Acts as the sink for generated geometry: leaves are recorded with
/// [`push`](Self::push) during the frame, then drawn in one call by
/// [`render`](Self::render), which also empties the batch.
///
/// Positions are NDC and pass through the vertex shader unchanged.
/// The fill color is linear premultiplied RGBA (`paint::Color`).
pub struct TriangleRenderer {
    shader_source: &'static str,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    fill_ubo: Option<wgpu::Buffer>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    vertices: Vec<TriangleVertex>,
}

impl Default for TriangleRenderer {
    fn default() -> Self {
        Self::with_shader(include_str!("shaders/triangle.wgsl"))
    }
}

impl TriangleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer compiling `shader_source` instead of the bundled shader.
    ///
    /// The source must provide `vs_main`, `fs_main` and the fill uniform at
    /// `@group(0) @binding(0)`.
    fn with_shader(shader_source: &'static str) -> Self {
        Self {
            shader_source,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            fill_ubo: None,
            vertex_vbo: None,
            vertex_capacity: 0,
            vertices: Vec::new(),
        }
    }

    /// Records one triangle for the next [`render`](Self::render).
    #[inline]
    pub fn push(&mut self, triangle: Triangle) {
        self.vertices.extend(pack_triangle(triangle));
    }

    /// Number of triangles recorded since the last render.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Drops recorded triangles without drawing them.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Draws all recorded triangles into `target` with `fill`, then clears the batch.
    ///
    /// The target is loaded, not cleared; clear it beforehand.
    ///
    /// Fails if the shader or pipeline cannot be built. The batch is cleared
    /// either way.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        fill: Color,
    ) -> Result<()> {
        let result = self.draw(ctx, target, fill);
        self.vertices.clear();
        result
    }

    fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        fill: Color,
    ) -> Result<()> {
        self.ensure_pipeline(ctx)?;
        self.ensure_bindings(ctx);

        if self.vertices.is_empty() {
            return Ok(());
        }

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.write_fill_uniform(ctx, fill);
        self.ensure_vertex_capacity(ctx, self.vertices.len());

        let Some(vertex_vbo) = self.vertex_vbo.as_ref() else { return Ok(()) };
        ctx.queue.write_buffer(vertex_vbo, 0, bytemuck::cast_slice(&self.vertices));

        let Some(pipeline) = self.pipeline.as_ref() else { return Ok(()) };
        let Some(bind_group) = self.bind_group.as_ref() else { return Ok(()) };

        let vertex_count = u32::try_from(self.vertices.len())
            .context("too many triangle vertices for one draw call")?;
        let byte_len = (self.vertices.len() * std::mem::size_of::<TriangleVertex>()) as u64;

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gasket triangle pass"),
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
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vertex_vbo.slice(..byte_len));
        rpass.draw(0..vertex_count, 0..1);

        log::trace!("drew {} triangles", vertex_count / 3);
        Ok(())
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return Ok(());
        }

        let shader =
            shader::compile_wgsl(ctx.device, "gasket triangle shader", self.shader_source)?;

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("gasket triangle bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<FillUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("gasket triangle pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = shader::validated(ctx.device, "gasket triangle pipeline", || {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("gasket triangle pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[TriangleVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // The root triangle may arrive in either winding.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        })?;

        log::debug!("built triangle pipeline for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.fill_ubo = None;
        Ok(())
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.fill_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let fill_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gasket triangle fill ubo"),
            size: std::mem::size_of::<FillUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gasket triangle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: fill_ubo.as_entire_binding(),
            }],
        });

        self.fill_ubo = Some(fill_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_fill_uniform(&mut self, ctx: &RenderCtx<'_>, fill: Color) {
        let Some(ubo) = self.fill_ubo.as_ref() else { return };
        let u = FillUniform { color: fill.to_array() };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required_vertices: usize) {
        if required_vertices <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }

        let new_cap = grown_capacity(required_vertices);
        let new_size = (new_cap * std::mem::size_of::<TriangleVertex>()) as u64;

        log::debug!("triangle vertex buffer grows to {new_cap} vertices");

        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gasket triangle vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }
}

/// Vertex buffer capacity for `required` vertices: next power of two, at least 256.
fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(256)
}

#[inline]
fn pack_triangle(t: Triangle) -> [TriangleVertex; 3] {
    t.vertices().map(|p| TriangleVertex { pos: p.into() })
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct TriangleVertex {
    pos: [f32; 2], // NDC
}

impl TriangleVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TriangleVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FillUniform {
    color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasket_geometry::{for_each_leaf, Point};

    #[test]
    fn packs_vertices_in_order() {
        let packed = pack_triangle(Triangle::ROOT);
        assert_eq!(
            packed.map(|v| v.pos),
            [[-1.0, -1.0], [1.0, -1.0], [0.0, 1.0]]
        );
    }

    #[test]
    fn vertex_layout_is_two_floats() {
        assert_eq!(std::mem::size_of::<TriangleVertex>(), 8);
        assert_eq!(TriangleVertex::layout().array_stride, 8);
        assert_eq!(std::mem::size_of::<FillUniform>(), 16);
    }

    #[test]
    fn push_records_three_vertices_per_triangle() {
        let mut r = TriangleRenderer::new();
        assert!(r.is_empty());
        r.push(Triangle::ROOT);
        r.push(Triangle::new(Point::new(0.0, 0.0), Point::new(0.5, 0.0), Point::new(0.0, 0.5)));
        assert_eq!(r.len(), 2);
        assert_eq!(r.vertices.len(), 6);
        r.clear();
        assert!(r.is_empty());
    }

    #[test]
    fn works_as_leaf_sink() {
        let mut r = TriangleRenderer::new();
        for_each_leaf(Triangle::ROOT, 5, |t| r.push(t));
        assert_eq!(r.len(), 243);
    }

    #[test]
    fn broken_shader_fails_render_and_drops_batch() {
        let (device, queue) = shader::noop_device();
        let format = wgpu::TextureFormat::Rgba8Unorm;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("test target"),
            size: wgpu::Extent3d {
                width: 4,
                height: 4,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());

        let mut r = TriangleRenderer::with_shader("@vertex\nfn vs_main( {\n");
        for_each_leaf(Triangle::ROOT, 2, |t| r.push(t));
        assert_eq!(r.len(), 9);

        let ctx = RenderCtx::new(&device, &queue, format);
        let mut target = RenderTarget::new(&mut encoder, &view);
        let err = r.render(&ctx, &mut target, Color::red()).unwrap_err();

        assert!(err.to_string().contains("failed to compile"), "{err}");
        assert!(r.is_empty());
        assert!(r.pipeline.is_none());
    }

    #[test]
    fn capacity_grows_in_powers_of_two() {
        assert_eq!(grown_capacity(3), 256);
        assert_eq!(grown_capacity(256), 256);
        assert_eq!(grown_capacity(257), 512);
        assert_eq!(grown_capacity(729), 1024);
        assert_eq!(grown_capacity(3 * 243), 1024);
    }
}
