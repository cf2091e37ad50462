//! Game configuration.
//!
//! Settings loaded from an INI configuration file. Every value has a safe
//! default so the game starts without a file; a present but malformed value
//! is an error.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 480
//!
//! [window]
//! width = 1280
//! height = 960
//! target_fps = 60
//! vsync = true
//! fullscreen = false
//! title = Walkabout
//!
//! [controls]
//! up = w
//! down = s
//! left = a
//! right = d
//! sprint = left_shift
//!
//! [player]
//! x = 0
//! y = 0
//! sprint_speed = 2
//! ```

use std::path::PathBuf;

use configparser::ini::Ini;
use log::info;

use crate::components::controls::ControlAction;
use crate::components::transform::Direction;
use crate::error::GameError;
use crate::resources::input::Key;

const DEFAULT_RENDER_WIDTH: u32 = 640;
const DEFAULT_RENDER_HEIGHT: u32 = 480;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 960;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_TITLE: &str = "Walkabout";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_SPRINT_SPEED: f32 = 2.0;

/// Keyboard layout for the playable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlKeys {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub sprint: Key,
}

impl Default for ControlKeys {
    fn default() -> Self {
        Self {
            up: Key::W,
            down: Key::S,
            left: Key::A,
            right: Key::D,
            sprint: Key::LeftShift,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Logical render width in pixels.
    pub render_width: u32,
    /// Logical render height in pixels.
    pub render_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,
    pub title: String,
    pub controls: ControlKeys,
    /// Player start position.
    pub player_x: f32,
    pub player_y: f32,
    /// Speed set while the sprint key is held.
    pub sprint_speed: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            title: DEFAULT_TITLE.to_string(),
            controls: ControlKeys::default(),
            player_x: 0.0,
            player_y: 0.0,
            sprint_speed: DEFAULT_SPRINT_SPEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), GameError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|e| {
            GameError::Config(format!(
                "failed to load {}: {}",
                self.config_path.display(),
                e
            ))
        })?;
        self.apply(&ini)?;
        info!(
            "Loaded config from {}: {}x{} render, {}x{} window, fps={}, vsync={}, fullscreen={}",
            self.config_path.display(),
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), GameError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(GameError::Config)?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), GameError> {
        // [render]
        if let Some(width) = get_u32(ini, "render", "width")? {
            self.render_width = width;
        }
        if let Some(height) = get_u32(ini, "render", "height")? {
            self.render_height = height;
        }

        // [window]
        if let Some(width) = get_u32(ini, "window", "width")? {
            self.window_width = width;
        }
        if let Some(height) = get_u32(ini, "window", "height")? {
            self.window_height = height;
        }
        if let Some(fps) = get_u32(ini, "window", "target_fps")? {
            self.target_fps = fps;
        }
        if let Some(vsync) = ini.getbool("window", "vsync").map_err(GameError::Config)? {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = ini
            .getbool("window", "fullscreen")
            .map_err(GameError::Config)?
        {
            self.fullscreen = fullscreen;
        }
        if let Some(title) = ini.get("window", "title") {
            self.title = title;
        }

        // [controls]
        let keys = &mut self.controls;
        for (name, slot) in [
            ("up", &mut keys.up),
            ("down", &mut keys.down),
            ("left", &mut keys.left),
            ("right", &mut keys.right),
            ("sprint", &mut keys.sprint),
        ] {
            if let Some(value) = ini.get("controls", name) {
                *slot = value
                    .parse()
                    .map_err(|e| GameError::Config(format!("[controls] {}: {}", name, e)))?;
            }
        }
        // One action per key.
        let bound = [
            ("up", keys.up),
            ("down", keys.down),
            ("left", keys.left),
            ("right", keys.right),
            ("sprint", keys.sprint),
        ];
        for (i, (first, key)) in bound.iter().enumerate() {
            if let Some((second, _)) = bound[i + 1..].iter().find(|(_, k)| k == key) {
                return Err(GameError::Config(format!(
                    "[controls] {} and {} both use key {}",
                    first, second, key
                )));
            }
        }

        // [player]
        if let Some(x) = get_f32(ini, "player", "x")? {
            self.player_x = x;
        }
        if let Some(y) = get_f32(ini, "player", "y")? {
            self.player_y = y;
        }
        if let Some(speed) = get_f32(ini, "player", "sprint_speed")? {
            self.sprint_speed = speed;
        }
        if !self.sprint_speed.is_finite() || self.sprint_speed <= 0.0 {
            return Err(GameError::Config(format!(
                "[player] sprint_speed: {} must be positive",
                self.sprint_speed
            )));
        }

        if self.render_width == 0 || self.render_height == 0 {
            return Err(GameError::Config(
                "render width and height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), GameError> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| GameError::Config(format!("failed to save config file: {}", e)))?;
        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));
        config.set("window", "title", Some(self.title.clone()));

        let keys = &self.controls;
        config.set("controls", "up", Some(keys.up.to_string()));
        config.set("controls", "down", Some(keys.down.to_string()));
        config.set("controls", "left", Some(keys.left.to_string()));
        config.set("controls", "right", Some(keys.right.to_string()));
        config.set("controls", "sprint", Some(keys.sprint.to_string()));

        config.set("player", "x", Some(self.player_x.to_string()));
        config.set("player", "y", Some(self.player_y.to_string()));
        config.set("player", "sprint_speed", Some(self.sprint_speed.to_string()));
        config
    }

    /// The player's key bindings in the order they are installed.
    pub fn key_bindings(&self) -> Vec<(Key, ControlAction)> {
        let keys = &self.controls;
        vec![
            (keys.up, ControlAction::Move(Direction::Up)),
            (keys.right, ControlAction::Move(Direction::Right)),
            (keys.down, ControlAction::Move(Direction::Down)),
            (keys.left, ControlAction::Move(Direction::Left)),
            (
                keys.sprint,
                ControlAction::SpeedModifier {
                    speed: self.sprint_speed,
                },
            ),
        ]
    }

    /// Logical render resolution.
    pub fn render_size(&self) -> (u32, u32) {
        (self.render_width, self.render_height)
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn get_u32(ini: &Ini, section: &str, key: &str) -> Result<Option<u32>, GameError> {
    let value = ini
        .getuint(section, key)
        .map_err(|e| GameError::Config(format!("[{}] {}: {}", section, key, e)))?;
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| {
                GameError::Config(format!("[{}] {}: {} is out of range", section, key, v))
            })
        })
        .transpose()
}

fn get_f32(ini: &Ini, section: &str, key: &str) -> Result<Option<f32>, GameError> {
    ini.getfloat(section, key)
        .map(|v| v.map(|f| f as f32))
        .map_err(|e| GameError::Config(format!("[{}] {}: {}", section, key, e)))
}
