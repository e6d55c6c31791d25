use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "frog-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default cells per grid side.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest grid with room for the snake and a frog.
pub const MIN_GRID_SIZE: u16 = 2;

/// Largest accepted grid side.
pub const MAX_GRID_SIZE: u16 = 200;

/// Default terminal columns drawn per grid cell.
pub const DEFAULT_CELL_SIZE: u16 = 2;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Score at which the one-shot speed boost fires.
pub const SCORE_THRESHOLD: u32 = 100;

/// Points per frog before the boost.
pub const INITIAL_POINTS_PER_FOOD: u32 = 10;

/// Points per frog after the boost.
pub const BONUS_POINTS_PER_FOOD: u32 = 50;

/// Divisor applied to the initial interval by the boost.
pub const SPEED_MULTIPLIER: f64 = 1.5;

/// Tunables for one game session.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_size: u16,
    /// Terminal columns per cell. Rendering only.
    pub cell_size: u16,
    pub initial_tick_interval_ms: u64,
    pub score_threshold: u32,
    pub bonus_points_per_food: u32,
    pub initial_points_per_food: u32,
    pub speed_multiplier: f64,
    pub min_tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            initial_tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            score_threshold: SCORE_THRESHOLD,
            bonus_points_per_food: BONUS_POINTS_PER_FOOD,
            initial_points_per_food: INITIAL_POINTS_PER_FOOD,
            speed_multiplier: SPEED_MULTIPLIER,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Parses a JSON document, filling missing keys with defaults.
    pub fn from_json(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw, path)
    }

    /// Loads `explicit` when given, otherwise the default config path if that
    /// file exists, otherwise built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        load_from(explicit, default_config_path())
    }

    /// Applies command-line overrides and validates the result.
    ///
    /// A `tick_ms` override below the configured minimum lowers the minimum too.
    pub fn with_overrides(
        mut self,
        grid_size: Option<u16>,
        tick_ms: Option<u64>,
        cell_size: Option<u16>,
    ) -> Result<Self, ConfigError> {
        if let Some(grid_size) = grid_size {
            self.grid_size = grid_size;
        }
        if let Some(tick_ms) = tick_ms {
            self.initial_tick_interval_ms = tick_ms;
            self.min_tick_interval_ms = self.min_tick_interval_ms.min(tick_ms);
        }
        if let Some(cell_size) = cell_size {
            self.cell_size = cell_size;
        }

        self.validate()?;
        Ok(self)
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE || self.grid_size > MAX_GRID_SIZE {
            return Err(invalid(format!(
                "grid_size must be between {MIN_GRID_SIZE} and {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !matches!(self.cell_size, 1 | 2) {
            return Err(invalid(format!(
                "cell_size must be 1 or 2, got {}",
                self.cell_size
            )));
        }
        if self.initial_tick_interval_ms == 0 || self.min_tick_interval_ms == 0 {
            return Err(invalid("tick intervals must be positive".to_owned()));
        }
        if self.min_tick_interval_ms > self.initial_tick_interval_ms {
            return Err(invalid(format!(
                "min_tick_interval_ms ({}) exceeds initial_tick_interval_ms ({})",
                self.min_tick_interval_ms, self.initial_tick_interval_ms
            )));
        }
        if self.initial_points_per_food == 0 || self.bonus_points_per_food == 0 {
            return Err(invalid("points per food must be positive".to_owned()));
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier < 1.0 {
            return Err(invalid(format!(
                "speed_multiplier must be a finite number >= 1.0, got {}",
                self.speed_multiplier
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_interval_ms)
    }

    /// Interval after the speed boost: `max(min, initial / multiplier)`,
    /// truncated to whole milliseconds.
    #[must_use]
    pub fn boosted_interval(&self) -> Duration {
        let scaled = (self.initial_tick_interval_ms as f64 / self.speed_multiplier).floor() as u64;
        Duration::from_millis(scaled.max(self.min_tick_interval_ms))
    }
}

fn load_from(explicit: Option<&Path>, default: Option<PathBuf>) -> Result<GameConfig, ConfigError> {
    if let Some(path) = explicit {
        return GameConfig::load(path);
    }

    let Some(path) = default else {
        return Ok(GameConfig::default());
    };

    match fs::metadata(&path) {
        Ok(_) => GameConfig::load(&path),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(GameConfig::default()),
        Err(source) => Err(ConfigError::Io { path, source }),
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Returns the platform-correct config file path, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push("frog-snake.log");
    base
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub game_over: Color,
}

/// Green snake, red frog on black.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    game_over: Color::White,
};

/// Solid block drawn for every occupied cell column.
pub const GLYPH_BLOCK: &str = "█";

/// Frog glyph.
pub const GLYPH_FOOD: &str = "●";
