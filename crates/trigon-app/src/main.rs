mod config;
mod triangle;

use anyhow::Result;

use trigon_engine::logging::init_logging;
use trigon_engine::window::Runtime;

use config::AppConfig;
use triangle::TriangleApp;

fn main() -> Result<()> {
    let AppConfig {
        logging,
        window,
        gpu,
        scene,
    } = AppConfig::default();

    init_logging(logging);
    log::info!("starting `{}`", window.title);

    Runtime::run(window, gpu, TriangleApp::new(scene))
}
