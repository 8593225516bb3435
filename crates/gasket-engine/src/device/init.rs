/// Knobs for [`Gpu::new`](super::Gpu::new).
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one is offered.
    ///
    /// Fill and clear colors are linear; an sRGB target encodes them on write.
    pub prefer_srgb: bool,

    /// FIFO is supported everywhere and caps the redraw loop at vsync.
    pub present_mode: wgpu::PresentMode,

    /// Preferred alpha mode. Ignored if the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub backends: wgpu::Backends,

    /// Limits requested from the device, raised to the adapter's texture
    /// resolution limits.
    ///
    /// Triangle drawing fits the WebGL2 downlevel set, which also admits the
    /// GL backend.
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            backends: wgpu::Backends::all(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
