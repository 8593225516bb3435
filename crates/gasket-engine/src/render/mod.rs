//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and create them
//! lazily on first use.
//!
//! Convention:
//! - CPU geometry is already in NDC ([-1, 1], +Y up); shaders pass it through.
//! - Colors are linear premultiplied RGBA.

mod ctx;
mod shader;
mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use triangle::TriangleRenderer;
