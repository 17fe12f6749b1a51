/// Example: 10x10 grid of wireframe cubes in the terminal
///
/// Usage: cargo run --example grid_wireframe
///
/// Arrow keys twist the grid (each cube turns a little more than the one
/// before it), Space grows every cube.

use std::io;
use std::sync::Arc;
use toycube_core::{Model3D, RenderMode, SceneLayout};
use toycube_terminal::{init_logging, AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    let mut config = AppConfig::load().unwrap_or_default();
    init_logging(&config.debug);

    config.render.mode = RenderMode::Wireframe;
    config.scene.layout = SceneLayout::Grid {
        cols: 10,
        rows: 10,
        spacing: 7.0,
        scale: 2.0,
    };
    config.input.grow_step = 0.25;

    let mut app = TerminalApp::new(&config, Arc::new(Model3D::cube()))?;
    app.run()
}
