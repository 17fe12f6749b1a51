/// toycube terminal demo - shaded cube or wireframe grid
///
/// Usage: toycube-terminal [geometry-file]
///
/// Controls:
///   - Arrow Keys: Rotate
///   - WASD: Move (single object)
///   - Space: Grow (grid)
///   - Tab: Shaded / wireframe
///   - G: Single / grid
///   - Q/ESC: Quit

use std::env;
use std::io;
use toycube_terminal::{init_logging, load_model, AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_logging(&config.debug);
    if let Some(e) = config_error {
        log::warn!("{}. Using defaults.", e);
    }

    // A path on the command line wins over scene.model_path
    let path = env::args().nth(1).or_else(|| config.scene.model_path.clone());
    let model = load_model(path.as_deref(), &config);
    log::info!(
        "starting with {} vertices, {} faces",
        model.vertices().len(),
        model.faces().len()
    );

    let mut app = TerminalApp::new(&config, model)?;
    app.run()?;

    Ok(())
}
