//! Sierpinski gasket viewer.
//!
//! Opens a window and draws the gasket at a fixed depth until it is closed.
//! Set `RUST_LOG` to change log verbosity.

mod app;
mod config;

use anyhow::Result;
use gasket_engine::device::GpuInit;
use gasket_engine::logging::{init_logging, LoggingConfig};
use gasket_engine::window::Runtime;

use app::GasketApp;
use config::GasketConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = GasketConfig::default();
    let runtime = config.runtime();

    Runtime::run(runtime, GpuInit::default(), GasketApp::new(config))
}
