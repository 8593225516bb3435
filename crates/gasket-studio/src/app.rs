use anyhow::Result;
use gasket_engine::core::{App, AppControl, FrameCtx};
use gasket_engine::render::TriangleRenderer;
use gasket_geometry::for_each_leaf;

use crate::config::GasketConfig;

/// Frames between average-fps log lines.
const FPS_LOG_INTERVAL: u64 = 600;

/// Draws the gasket every frame.
///
/// Geometry is regenerated from the root each frame and streamed straight
/// into the renderer's batch.
pub struct GasketApp {
    config: GasketConfig,
    renderer: TriangleRenderer,
}

impl GasketApp {
    pub fn new(config: GasketConfig) -> Self {
        Self {
            config,
            renderer: TriangleRenderer::new(),
        }
    }

    /// Fills the renderer batch with this frame's leaves.
    fn generate(&mut self) {
        let renderer = &mut self.renderer;
        for_each_leaf(self.config.root, self.config.depth, |t| renderer.push(t));
    }
}

impl App for GasketApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let time = ctx.time;
        if time.frame_index == 0 {
            log::info!(
                "drawing gasket: depth {}, {} triangles per frame",
                self.config.depth,
                self.config.leaf_count()
            );
        } else if time.frame_index % FPS_LOG_INTERVAL == 0 {
            if let Some(fps) = time.average_fps() {
                log::debug!("frame {}: {fps:.1} fps average", time.frame_index);
            }
        }

        self.generate();

        let (clear, fill) = (self.config.clear, self.config.fill);
        let renderer = &mut self.renderer;
        let control = ctx.render(clear, |rctx, target| renderer.render(rctx, target, fill));

        // A skipped frame never reaches the renderer; drop its batch.
        self.renderer.clear();
        control
    }
}
