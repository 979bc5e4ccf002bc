mod app;
mod composer;
mod mode;
mod scene;

use anyhow::Result;
use tumble_engine::device::GpuInit;
use tumble_engine::logging::{init_logging, LoggingConfig};
use tumble_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::TumbleApp;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("fatal: {e:#}");
        std::process::exit(-1);
    }
}

fn run() -> Result<()> {
    let config = RuntimeConfig {
        title: scene::WINDOW_TITLE.to_string(),
        initial_size: LogicalSize::new(scene::WINDOW_WIDTH, scene::WINDOW_HEIGHT),
        ..RuntimeConfig::default()
    };

    // Linear surface: the color constants are written to the framebuffer as-is.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    Runtime::run(config, gpu_init, TumbleApp::new())
}
