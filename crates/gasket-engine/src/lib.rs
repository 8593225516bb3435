//! Gasket engine crate.
//!
//! Owns the platform + GPU runtime pieces the gasket renderer draws through:
//!
//! | Module    | Contents                                               |
//! |-----------|--------------------------------------------------------|
//! | `window`  | event loop and the single window                       |
//! | `device`  | wgpu surface, device and queue for that window         |
//! | `core`    | `App` trait and per-frame context                      |
//! | `render`  | solid-fill triangle renderer and shader compilation    |
//! | `paint`   | premultiplied colors                                   |
//! | `time`    | frame clock                                            |
//! | `logging` | `env_logger` setup                                     |

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
pub mod paint;
