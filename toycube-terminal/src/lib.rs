/// Terminal front end: character-cell surface, frame loop and key handling
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::fs::File;
use std::io::{self, stdout, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use toycube_core::{
    load_obj, Controller, Key, Model3D, RenderMode, Renderer, Scene, SceneLayout,
};

pub mod config;
pub mod renderer;

pub use config::AppConfig;
pub use renderer::CharCanvas;

use config::DebugConfig;

/// Set up `env_logger` from the debug section.
///
/// The terminal is owned by the renderer while running, so records only go
/// to stderr at `error` level unless a log file is configured.
pub fn init_logging(debug: &DebugConfig) {
    let level = if debug.log_file.is_some() {
        debug.log_level.as_str()
    } else {
        "error"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));

    if let Some(path) = &debug.log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("cannot open log file {}: {}", path, e),
        }
    }

    // a logger may already be installed (tests, embedding)
    let _ = builder.try_init();
}

/// Load the model named by `path`, falling back to the built-in cube
pub fn load_model(path: Option<&str>, config: &AppConfig) -> Arc<Model3D> {
    let Some(path) = path else {
        return Arc::new(Model3D::cube());
    };
    match load_obj(path, &config.scene.parse) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            log::error!("failed to load {}: {}; keeping the built-in cube", path, e);
            Arc::new(Model3D::cube())
        }
    }
}

/// Map a crossterm key to a demo key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Key::W),
            'a' => Some(Key::A),
            's' => Some(Key::S),
            'd' => Some(Key::D),
            _ => None,
        },
        _ => None,
    }
}

/// The single and grid layouts the G key switches between.
///
/// The configured layout keeps its own slot; the other kind falls back to a
/// size that fits character cells.
fn toggle_layouts(configured: &SceneLayout) -> (SceneLayout, SceneLayout) {
    let single = SceneLayout::Single { scale: 12.0 };
    let grid = SceneLayout::Grid {
        cols: 10,
        rows: 10,
        spacing: 7.0,
        scale: 2.0,
    };
    if configured.is_grid() {
        (single, configured.clone())
    } else {
        (configured.clone(), grid)
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    single_layout: SceneLayout,
    grid_layout: SceneLayout,
    controller: Controller,
    renderer: Renderer,
    canvas: CharCanvas,
    target_fps: u32,
    show_hud: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &AppConfig, model: Arc<Model3D>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(config, model, width as usize, height as usize))
    }

    /// App drawing into a `width` x `height` cell canvas
    pub fn with_size(config: &AppConfig, model: Arc<Model3D>, width: usize, height: usize) -> Self {
        let canvas = CharCanvas::new(width, height);
        let renderer = Renderer::for_surface(config.render.clone(), &canvas);
        let (single_layout, grid_layout) = toggle_layouts(&config.scene.layout);

        Self {
            scene: Scene::setup(config.scene.layout.clone(), model),
            single_layout,
            grid_layout,
            controller: Controller::new(config.input.clone()),
            renderer,
            canvas,
            target_fps: config.terminal.target_fps.max(1),
            show_hud: config.terminal.show_hud,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn canvas(&self) -> &CharCanvas {
        &self.canvas
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.target_fps as u64);

        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event so each key press lands exactly once
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// React to one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind == KeyEventKind::Press => {
                self.handle_key(code);
            }
            Event::Resize(width, height) => {
                self.canvas.resize(width as usize, height as usize);
                let (w, h) = toycube_core::Surface::size(&self.canvas);
                self.renderer.resize(w, h);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Tab => {
                let mode = match self.renderer.settings().mode {
                    RenderMode::Shaded => RenderMode::Wireframe,
                    RenderMode::Wireframe => RenderMode::Shaded,
                };
                log::debug!("render mode -> {:?}", mode);
                self.renderer.set_mode(mode);
            }
            KeyCode::Char('g') => {
                let layout = if self.scene.layout().is_grid() {
                    &self.single_layout
                } else {
                    &self.grid_layout
                };
                self.scene.reset(layout.clone());
            }
            other => {
                if let Some(key) = map_key(other) {
                    self.controller.key_down(key, &mut self.scene);
                }
            }
        }
    }

    /// Draw the scene into the canvas without touching the terminal
    pub fn render_frame(&mut self) {
        self.renderer.render(&self.scene, &mut self.canvas);
    }

    fn render(&mut self) -> io::Result<()> {
        self.render_frame();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        if self.show_hud {
            queue!(
                stdout,
                cursor::MoveTo(0, 0),
                SetForegroundColor(Color::Yellow),
                Print(format!(
                    "toycube | FPS: {:.1} | {:?} | Arrows=Rotate WASD=Move Space=Grow Tab=Mode G=Grid Q=Quit",
                    self.fps,
                    self.renderer.settings().mode
                )),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}
