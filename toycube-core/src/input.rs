//! Keyboard controller
//!
//! Maps key presses to scene mutations. Every key-down event produces at
//! most one state change; there is no debouncing or repeat handling.

use crate::math::{vec4, Vec4};
use crate::scene::Scene;
use crate::settings::{ControlSettings, SceneLayout};

/// The keys the demo reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    W,
    A,
    S,
    D,
}

impl Key {
    /// Match a platform key code (`"ArrowUp"`, `"KeyW"`, `"Space"`, ...)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Space" => Some(Key::Space),
            "KeyW" => Some(Key::W),
            "KeyA" => Some(Key::A),
            "KeyS" => Some(Key::S),
            "KeyD" => Some(Key::D),
            _ => None,
        }
    }
}

/// Scene mutation resolved from a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Add to the rotation of every object; in a grid the delta is
    /// amplified by the object's index
    Rotate(Vec4),
    /// Add to the position of every object
    Translate(Vec4),
    /// Add to the scale of every object
    Grow(Vec4),
}

/// Applies key presses to a scene
#[derive(Debug, Clone, Default)]
pub struct Controller {
    settings: ControlSettings,
}

impl Controller {
    pub fn new(settings: ControlSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }

    /// Resolve `key` for the given layout.
    ///
    /// Returns `None` for keys the layout ignores (WASD in a grid, space on
    /// a single object).
    pub fn map_key(&self, key: Key, layout: &SceneLayout) -> Option<Command> {
        let r = self.settings.rotate_step;
        let m = self.settings.move_step;
        let g = self.settings.grow_step;

        match (key, layout.is_grid()) {
            (Key::Up, _) => Some(Command::Rotate(vec4(-r, 0.0, 0.0))),
            (Key::Down, _) => Some(Command::Rotate(vec4(r, 0.0, 0.0))),
            (Key::Left, _) => Some(Command::Rotate(vec4(0.0, r, 0.0))),
            (Key::Right, _) => Some(Command::Rotate(vec4(0.0, -r, 0.0))),
            (Key::Space, true) => Some(Command::Grow(vec4(g, g, g))),
            (Key::A, false) => Some(Command::Translate(vec4(-m, 0.0, 0.0))),
            (Key::D, false) => Some(Command::Translate(vec4(m, 0.0, 0.0))),
            (Key::W, false) => Some(Command::Translate(vec4(0.0, -m, 0.0))),
            (Key::S, false) => Some(Command::Translate(vec4(0.0, m, 0.0))),
            _ => None,
        }
    }

    /// Apply a resolved command to every object in the scene
    pub fn apply(&self, command: Command, scene: &mut Scene) {
        let twist = if scene.layout().is_grid() {
            self.settings.twist
        } else {
            0.0
        };

        for (index, object) in scene.objects_mut().iter_mut().enumerate() {
            let t = &mut object.transform;
            match command {
                Command::Rotate(delta) => {
                    let d = delta * (1.0 + index as f32 * twist);
                    t.rotate(d.x, d.y, d.z);
                }
                Command::Translate(delta) => t.translate(delta.x, delta.y, delta.z),
                Command::Grow(delta) => t.grow(delta.x, delta.y, delta.z),
            }
        }
    }

    /// Handle one key-down event. Returns whether the scene changed.
    pub fn key_down(&self, key: Key, scene: &mut Scene) -> bool {
        match self.map_key(key, scene.layout()) {
            Some(command) => {
                log::trace!("{:?} -> {:?}", key, command);
                self.apply(command, scene);
                true
            }
            None => false,
        }
    }

    /// Handle a key-down event carrying a platform key code
    pub fn key_code_down(&self, code: &str, scene: &mut Scene) -> bool {
        Key::from_code(code).map_or(false, |key| self.key_down(key, scene))
    }
}
