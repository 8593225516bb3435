use gasket_engine::paint::Color;
use gasket_engine::window::RuntimeConfig;
use gasket_geometry::{leaf_count, Triangle};
use winit::dpi::LogicalSize;

/// What the studio draws and the window it draws into.
#[derive(Debug, Clone)]
pub struct GasketConfig {
    pub title: String,
    /// Window size in logical pixels.
    pub size: (f64, f64),

    /// Recursion depth; the frame holds `3^depth` leaves.
    pub depth: u32,
    pub root: Triangle,

    pub fill: Color,
    pub clear: Color,
}

impl Default for GasketConfig {
    fn default() -> Self {
        Self {
            title: "Sierpinski Gasket".to_string(),
            size: (640.0, 480.0),
            depth: 5,
            root: Triangle::ROOT,
            fill: Color::red(),
            clear: Color::black(),
        }
    }
}

impl GasketConfig {
    /// Leaves drawn per frame.
    pub fn leaf_count(&self) -> u64 {
        leaf_count(self.depth)
    }

    /// Window settings for the runtime. The window is not resizable.
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.size.0, self.size.1),
            resizable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_draw_red_gasket_on_black() {
        let c = GasketConfig::default();
        assert_eq!(c.depth, 5);
        assert_eq!(c.root, Triangle::ROOT);
        assert_eq!(c.fill, Color::red());
        assert_eq!(c.clear, Color::black());
        assert_eq!(c.leaf_count(), 243);
    }

    #[test]
    fn runtime_window_is_fixed_size() {
        let rt = GasketConfig::default().runtime();
        assert_eq!(rt.title, "Sierpinski Gasket");
        assert_eq!(rt.initial_size, LogicalSize::new(640.0, 480.0));
        assert!(!rt.resizable);
    }
}
