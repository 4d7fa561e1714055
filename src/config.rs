//! Game tuning
//!
//! Every number the simulation consumes lives here. Loaded from a JSON file
//! when one is supplied; any field left out keeps its default.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How score accrues while the world scrolls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// +1 for every platform that scrolls off the bottom
    #[default]
    PlatformsRetired,
    /// +1 for every `per_point` pixels scrolled
    Distance { per_point: f32 },
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::PlatformsRetired => write!(f, "platforms"),
            ScoringMode::Distance { per_point } => write!(f, "distance ({} px per point)", per_point),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = ConfigError;

    /// Command line spelling; distance scoring uses the default pixels per point
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "platforms" | "platform" | "retired" => Ok(ScoringMode::PlatformsRetired),
            "distance" | "height" => Ok(ScoringMode::Distance {
                per_point: DISTANCE_PER_POINT,
            }),
            other => Err(ConfigError::Invalid(format!("unknown scoring mode '{}'", other))),
        }
    }
}

/// Hazard sizes and behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    pub spike_size: (f32, f32),
    pub patrol_size: (f32, f32),
    pub ranged_size: (f32, f32),
    pub projectile_size: (f32, f32),
    /// Patrol enemy speed (pixels per tick)
    pub patrol_speed: f32,
    /// Projectile speed (pixels per tick)
    pub projectile_speed: f32,
    /// Ticks between ranged enemy shots
    pub ranged_cooldown_ticks: u32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            spike_size: SPIKE_SIZE,
            patrol_size: PATROL_SIZE,
            ranged_size: RANGED_SIZE,
            projectile_size: PROJECTILE_SIZE,
            patrol_speed: PATROL_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            ranged_cooldown_ticks: RANGED_COOLDOWN_TICKS,
        }
    }
}

/// Complete tuning for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub frame_rate: u32,

    // === Player physics ===
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_strength: f32,
    pub player_speed: f32,
    /// Downward speed cap; `None` lets the player fall freely
    pub terminal_velocity: Option<f32>,
    pub player_width: f32,
    pub player_height: f32,
    /// Pixels the player is drawn sunk into the platform it stands on; never
    /// changes the physics position
    pub landing_sink: f32,

    // === Platforms ===
    pub max_platforms: usize,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub platform_height: f32,
    pub base_platform_height: f32,
    pub platform_min_y_gap: f32,
    pub platform_max_y_gap: f32,
    pub max_jump_distance: f32,

    // === Scrolling ===
    /// Fraction of the screen height the player's top edge may rise to
    pub scroll_threshold: f32,

    // === Lava ===
    pub lava_rise_speed: f32,
    pub lava_ceiling: f32,
    pub lava_start_depth: f32,

    // === Difficulty ===
    pub difficulty_tier_1: u64,
    pub difficulty_tier_2: u64,
    pub difficulty_tier_3: u64,

    pub hazards: HazardTuning,
    pub scoring: ScoringMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            frame_rate: FRAME_RATE,

            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            player_speed: PLAYER_SPEED,
            terminal_velocity: Some(TERMINAL_VELOCITY),
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            landing_sink: 0.0,

            max_platforms: MAX_PLATFORMS,
            platform_min_width: PLATFORM_MIN_WIDTH,
            platform_max_width: PLATFORM_MAX_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            base_platform_height: BASE_PLATFORM_HEIGHT,
            platform_min_y_gap: PLATFORM_MIN_Y_GAP,
            platform_max_y_gap: PLATFORM_MAX_Y_GAP,
            max_jump_distance: MAX_JUMP_DISTANCE,

            scroll_threshold: SCROLL_THRESHOLD,

            lava_rise_speed: LAVA_RISE_SPEED,
            lava_ceiling: LAVA_CEILING,
            lava_start_depth: LAVA_START_DEPTH,

            difficulty_tier_1: DIFFICULTY_TIER_1,
            difficulty_tier_2: DIFFICULTY_TIER_2,
            difficulty_tier_3: DIFFICULTY_TIER_3,

            hazards: HazardTuning::default(),
            scoring: ScoringMode::default(),
        }
    }
}

/// Failure to produce a usable config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Screen-space y the player's top edge may not rise above without scrolling
    pub fn scroll_line(&self) -> f32 {
        self.screen_height * self.scroll_threshold
    }

    /// Lowest the lava surface can be pushed by scrolling
    pub fn lava_floor(&self) -> f32 {
        self.screen_height + self.lava_start_depth
    }

    /// Seconds per tick at the configured frame rate
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Reject tunings the simulation cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return invalid("screen dimensions must be positive");
        }
        if self.frame_rate == 0 {
            return invalid("frame_rate must be non-zero");
        }
        if self.player_width <= 0.0 || self.player_height <= 0.0 {
            return invalid("player size must be positive");
        }
        if self.landing_sink < 0.0 {
            return invalid("landing_sink must not be negative");
        }
        if self.platform_min_width <= 0.0 || self.platform_min_width > self.platform_max_width {
            return invalid("platform widths must satisfy 0 < min <= max");
        }
        if self.platform_max_width > self.screen_width {
            return invalid("platform_max_width exceeds screen_width");
        }
        if self.platform_min_y_gap < 0.0 || self.platform_min_y_gap > self.platform_max_y_gap {
            return invalid("vertical gaps must satisfy 0 <= min <= max");
        }
        if self.max_platforms == 0 {
            return invalid("max_platforms must be at least 1");
        }
        if !(0.0..1.0).contains(&self.scroll_threshold) {
            return invalid("scroll_threshold must be within [0, 1)");
        }
        if let Some(cap) = self.terminal_velocity {
            if cap <= 0.0 {
                return invalid("terminal_velocity must be positive");
            }
        }
        if self.lava_start_depth < 0.0 || self.lava_ceiling > self.lava_floor() {
            return invalid("lava must start below its ceiling");
        }
        if !(self.difficulty_tier_1 < self.difficulty_tier_2
            && self.difficulty_tier_2 < self.difficulty_tier_3)
        {
            return invalid("difficulty tiers must be strictly increasing");
        }
        if let ScoringMode::Distance { per_point } = self.scoring {
            if per_point <= 0.0 {
                return invalid("distance per point must be positive");
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a config file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({})", e);
                Self::default()
            }
        }
    }
}
