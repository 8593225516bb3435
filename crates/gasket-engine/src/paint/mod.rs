//! Paint model shared between the app and renderers.
//!
//! Colors are linear and premultiplied; geometry types live in `gasket-geometry`.

pub mod color;

pub use color::Color;
