use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wgpu::util::DeviceExt;

use crate::coords::{VERTICES_PER_RECT, Viewport};
use crate::geometry::RectangleBatch;
use crate::paint::Color;
use crate::shader::{FRAGMENT_SOURCE, Program, ProgramError, VERTEX_SOURCE};

use super::layout::{COLOR_SLOT, POSITION_SLOT, ResolutionUniform};
use super::{RectanglePipeline, RenderCtx, RenderTarget};

/// Shader sources a scene is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            vertex: VERTEX_SOURCE.to_owned(),
            fragment: FRAGMENT_SOURCE.to_owned(),
        }
    }
}

/// Parameters of one generated-rectangles draw.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Number of rectangles to generate.
    pub rectangle_count: usize,

    /// Color the target is cleared to before drawing.
    pub clear: Color,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    pub shaders: ShaderSources,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rectangle_count: 50,
            clear: Color::transparent(),
            seed: None,
            shaders: ShaderSources::default(),
        }
    }
}

impl SceneConfig {
    /// Creates the RNG described by `seed`.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Counts describing the draw call a scene issues.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawStats {
    pub rectangles: usize,
    pub vertices: u32,
}

/// Uploaded rectangle batch, ready to be encoded into render passes.
///
/// Owns every GPU resource of the draw; buffers are written once in
/// `prepare` and never touched again.
pub struct PreparedScene {
    pipeline: RectanglePipeline,
    bind_group: wgpu::BindGroup,
    // Kept alive for the bind group.
    _resolution_ubo: wgpu::Buffer,
    position_vbo: Option<wgpu::Buffer>,
    color_vbo: Option<wgpu::Buffer>,
    viewport: Viewport,
    clear: Color,
    stats: DrawStats,
}

impl PreparedScene {
    /// Creates the pipeline and uploads `batch` plus the resolution uniform.
    pub fn prepare(ctx: &RenderCtx<'_>, program: &Program, batch: &RectangleBatch, clear: Color) -> Self {
        debug_assert!(batch.is_consistent());

        let pipeline = RectanglePipeline::new(ctx.device, ctx.target_format, program);

        let resolution = ResolutionUniform::from_viewport(ctx.viewport);
        let resolution_ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("confetti resolution ubo"),
            contents: bytemuck::bytes_of(&resolution),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("confetti rectangles bind group"),
            layout: pipeline.bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: pipeline.bindings().resolution.binding,
                resource: resolution_ubo.as_entire_binding(),
            }],
        });

        // Empty buffers cannot be bound; an empty batch only clears.
        let (position_vbo, color_vbo) = if batch.is_empty() {
            (None, None)
        } else {
            let positions = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("confetti position vbo"),
                contents: bytemuck::cast_slice(batch.positions()),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let colors = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("confetti color vbo"),
                contents: bytemuck::cast_slice(batch.colors()),
                usage: wgpu::BufferUsages::VERTEX,
            });
            (Some(positions), Some(colors))
        };

        let vertices = draw_vertex_count(batch.vertex_count());
        let stats = DrawStats {
            rectangles: batch.rect_count().min(vertices as usize / VERTICES_PER_RECT),
            vertices,
        };
        log::debug!(
            "uploaded {} rectangles ({} vertices) for a {}x{} canvas",
            stats.rectangles,
            stats.vertices,
            ctx.viewport.width,
            ctx.viewport.height
        );

        Self {
            pipeline,
            bind_group,
            _resolution_ubo: resolution_ubo,
            position_vbo,
            color_vbo,
            viewport: ctx.viewport,
            clear,
            stats,
        }
    }

    /// Records one render pass: clear, viewport, bindings, one triangle-list draw.
    pub fn encode(&self, target: &mut RenderTarget<'_>) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("confetti rectangles pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let (Some(positions), Some(colors)) = (self.position_vbo.as_ref(), self.color_vbo.as_ref())
        else {
            return;
        };

        rpass.set_viewport(
            0.0,
            0.0,
            self.viewport.width.max(1.0),
            self.viewport.height.max(1.0),
            0.0,
            1.0,
        );
        rpass.set_pipeline(self.pipeline.raw());
        rpass.set_bind_group(self.pipeline.bindings().resolution.group, &self.bind_group, &[]);
        rpass.set_vertex_buffer(POSITION_SLOT, positions.slice(..));
        rpass.set_vertex_buffer(COLOR_SLOT, colors.slice(..));
        rpass.draw(0..self.stats.vertices, 0..1);
    }

    #[inline]
    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    #[inline]
    pub fn pipeline(&self) -> &RectanglePipeline {
        &self.pipeline
    }
}

/// Vertex range of the single draw call.
///
/// Counts past `u32::MAX` are clamped to the last whole rectangle that fits.
fn draw_vertex_count(vertices: usize) -> u32 {
    u32::try_from(vertices).unwrap_or_else(|_| {
        let max = u32::MAX - u32::MAX % VERTICES_PER_RECT as u32;
        log::warn!("{vertices} vertices do not fit one draw call; drawing the first {max}");
        max
    })
}

/// Runs the whole sequence once: build program, generate, upload, draw.
///
/// `surface` is the host's rendering context; `None` means none could be
/// acquired and the call is a silent no-op. Compile/link failures abort before
/// any GPU resource is created. On success the prepared scene is returned so
/// the host can keep its resources alive and repaint.
pub fn draw_generated_rectangles<R: Rng + ?Sized>(
    surface: Option<(&RenderCtx<'_>, &mut RenderTarget<'_>)>,
    config: &SceneConfig,
    rng: &mut R,
) -> Result<Option<PreparedScene>, ProgramError> {
    let Some((ctx, target)) = surface else {
        log::debug!("no rendering context; nothing drawn");
        return Ok(None);
    };

    let program = Program::build(&config.shaders.vertex, &config.shaders.fragment)?;
    let batch = RectangleBatch::generate(rng, config.rectangle_count, ctx.viewport);
    let scene = PreparedScene::prepare(ctx, &program, &batch, config.clear);
    scene.encode(target);

    log::info!(
        "drew {} rectangles ({} vertices) in one draw call",
        scene.stats.rectangles,
        scene.stats.vertices
    );
    Ok(Some(scene))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::device::{GpuInit, HeadlessGpu};
    use crate::paint::Rgb;
    use crate::shader::ShaderStage;

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    fn headless() -> Option<HeadlessGpu> {
        match HeadlessGpu::new_blocking(GpuInit::default()) {
            Ok(gpu) => Some(gpu),
            Err(e) => {
                eprintln!("skipping GPU test: {e:#}");
                None
            }
        }
    }

    #[test]
    fn missing_context_is_a_silent_no_op() {
        let config = SceneConfig::default();
        let mut rng = config.rng();
        let drawn = draw_generated_rectangles(None, &config, &mut rng).unwrap();
        assert!(drawn.is_none());
    }

    #[test]
    fn default_config_draws_fifty_rectangles() {
        let config = SceneConfig::default();
        assert_eq!(config.rectangle_count, 50);
        assert_eq!(config.clear, Color::transparent());
        assert_eq!(config.shaders.vertex, VERTEX_SOURCE);
    }

    #[test]
    fn seeded_config_reproduces_rng_stream() {
        let config = SceneConfig { seed: Some(17), ..SceneConfig::default() };
        let a: u64 = config.rng().r#gen();
        let b: u64 = config.rng().r#gen();
        assert_eq!(a, b);
    }

    #[test]
    fn draw_range_is_clamped_to_whole_rectangles() {
        assert_eq!(draw_vertex_count(300), 300);
        let clamped = draw_vertex_count(u32::MAX as usize + 7);
        assert_eq!(clamped as usize % VERTICES_PER_RECT, 0);
        assert!(u32::MAX - clamped < VERTICES_PER_RECT as u32);
    }

    #[test]
    fn pixel_origin_lands_in_the_top_left_corner_of_the_target() {
        let Some(gpu) = headless() else { return };
        let (w, h) = (64, 48);
        let target = gpu.create_target(w, h, FORMAT);
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), FORMAT, Viewport::from_physical(w, h));
        let program = Program::rectangles().unwrap();
        let batch = RectangleBatch::from_parts(
            &[Rect::new(0.0, 0.0, (w / 2) as f32, (h / 2) as f32)],
            &[Rgb::new(1.0, 0.0, 0.0)],
        );

        let scene = PreparedScene::prepare(&ctx, &program, &batch, Color::transparent());
        let mut encoder = gpu.create_encoder();
        scene.encode(&mut RenderTarget::new(&mut encoder, &target.view));
        let pixels = gpu.submit_and_read(encoder, &target).unwrap();

        let pixel = |x: u32, y: u32| {
            let i = ((y * w + x) * 4) as usize;
            [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
        };
        const RED: [u8; 4] = [255, 0, 0, 255];
        const CLEAR: [u8; 4] = [0, 0, 0, 0];

        assert_eq!(pixel(0, 0), RED);
        assert_eq!(pixel(w / 2 - 1, h / 2 - 1), RED);
        assert_eq!(pixel(w / 2, h / 2), CLEAR);
        assert_eq!(pixel(w - 1, h - 1), CLEAR);
        assert_eq!(pixel(w - 1, 0), CLEAR);
        assert_eq!(pixel(0, h - 1), CLEAR);
    }

    #[test]
    fn draws_six_vertices_per_rectangle_on_a_headless_device() {
        let Some(gpu) = headless() else { return };
        let target = gpu.create_target(128, 96, FORMAT);
        let mut encoder = gpu.create_encoder();

        let ctx = RenderCtx::new(
            gpu.device(),
            gpu.queue(),
            FORMAT,
            Viewport::from_physical(target.width, target.height),
        );
        let config = SceneConfig { seed: Some(5), ..SceneConfig::default() };
        let mut rng = config.rng();

        let scene = {
            let mut rt = RenderTarget::new(&mut encoder, &target.view);
            draw_generated_rectangles(Some((&ctx, &mut rt)), &config, &mut rng)
                .unwrap()
                .unwrap()
        };
        gpu.submit(encoder);

        assert_eq!(scene.stats(), DrawStats { rectangles: 50, vertices: 300 });
        assert_eq!(scene.pipeline().target_format(), FORMAT);
    }

    #[test]
    fn compile_error_aborts_before_drawing() {
        let Some(gpu) = headless() else { return };
        let target = gpu.create_target(32, 32, FORMAT);
        let mut encoder = gpu.create_encoder();
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), FORMAT, Viewport::new(32.0, 32.0));

        let mut config = SceneConfig { seed: Some(1), ..SceneConfig::default() };
        config.shaders.vertex = config.shaders.vertex.replace("@vertex", "@vertex oops");

        let mut rt = RenderTarget::new(&mut encoder, &target.view);
        match draw_generated_rectangles(Some((&ctx, &mut rt)), &config, &mut config.rng()) {
            Err(ProgramError::Compile(e)) => assert_eq!(e.stage, ShaderStage::Vertex),
            Err(other) => panic!("expected compile error, got {other}"),
            Ok(_) => panic!("broken shader produced a scene"),
        }
    }

    #[test]
    fn empty_batch_only_clears_and_can_be_encoded_again() {
        let Some(gpu) = headless() else { return };
        let target = gpu.create_target(16, 16, FORMAT);
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), FORMAT, Viewport::new(16.0, 16.0));
        let program = Program::rectangles().unwrap();

        let scene = PreparedScene::prepare(&ctx, &program, &RectangleBatch::default(), Color::transparent());
        assert_eq!(scene.stats(), DrawStats { rectangles: 0, vertices: 0 });

        for _ in 0..2 {
            let mut encoder = gpu.create_encoder();
            scene.encode(&mut RenderTarget::new(&mut encoder, &target.view));
            gpu.submit(encoder);
        }
    }

    #[test]
    fn explicit_batch_keeps_its_vertex_count() {
        let Some(gpu) = headless() else { return };
        let target = gpu.create_target(100, 100, FORMAT);
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), FORMAT, Viewport::new(100.0, 100.0));
        let program = Program::rectangles().unwrap();
        let batch = RectangleBatch::from_parts(
            &[Rect::new(10.0, 20.0, 30.0, 40.0)],
            &[Rgb::new(1.0, 0.0, 0.0)],
        );

        let scene = PreparedScene::prepare(&ctx, &program, &batch, Color::transparent());
        let mut encoder = gpu.create_encoder();
        scene.encode(&mut RenderTarget::new(&mut encoder, &target.view));
        gpu.submit(encoder);

        assert_eq!(scene.stats(), DrawStats { rectangles: 1, vertices: 6 });
    }
}
