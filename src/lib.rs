//! Inferno Climb - An auto-scrolling vertical platformer
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, generation, collisions, session)
//! - `config`: Data-driven game tuning, loadable from JSON
//! - `highscores`: Top-N leaderboard persisted to a JSON file
//! - `render`: Render snapshot and asset fallback for whatever draws the frame

pub mod config;
pub mod highscores;
pub mod render;
pub mod sim;

pub use config::{Config, ConfigError, HazardTuning, ScoringMode};
pub use highscores::{HighScoreError, HighScores};

/// Default tuning values (the shipped game balance)
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1600.0;
    pub const SCREEN_HEIGHT: f32 = 1000.0;
    /// Fixed simulation rate (one tick per rendered frame)
    pub const FRAME_RATE: u32 = 60;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player physics (pixels per tick)
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_STRENGTH: f32 = -24.0;
    pub const PLAYER_SPEED: f32 = 9.0;
    pub const TERMINAL_VELOCITY: f32 = 20.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Platform generation
    pub const MAX_PLATFORMS: usize = 10;
    pub const PLATFORM_MIN_WIDTH: f32 = 300.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 600.0;
    pub const PLATFORM_HEIGHT: f32 = 35.0;
    pub const BASE_PLATFORM_HEIGHT: f32 = 10.0;
    pub const PLATFORM_MIN_Y_GAP: f32 = 220.0;
    pub const PLATFORM_MAX_Y_GAP: f32 = 340.0;
    pub const MAX_JUMP_DISTANCE: f32 = 600.0;

    /// Scroll once the player's top edge rises above this fraction of the screen
    pub const SCROLL_THRESHOLD: f32 = 0.25;

    /// Lava
    pub const LAVA_RISE_SPEED: f32 = 4.0;
    /// Highest the lava surface may climb on its own (screen-space y)
    pub const LAVA_CEILING: f32 = 700.0;
    /// How far below the screen the lava surface starts
    pub const LAVA_START_DEPTH: f32 = 600.0;

    /// Difficulty thresholds (score)
    pub const DIFFICULTY_TIER_1: u64 = 10; // Spikes
    pub const DIFFICULTY_TIER_2: u64 = 20; // Patrol enemies
    pub const DIFFICULTY_TIER_3: u64 = 30; // Ranged enemies

    /// Hazards
    pub const SPIKE_SIZE: (f32, f32) = (40.0, 30.0);
    pub const PATROL_SIZE: (f32, f32) = (40.0, 40.0);
    pub const RANGED_SIZE: (f32, f32) = (40.0, 50.0);
    pub const PROJECTILE_SIZE: (f32, f32) = (16.0, 8.0);
    pub const PATROL_SPEED: f32 = 3.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;
    /// Two seconds at 60 ticks per second
    pub const RANGED_COOLDOWN_TICKS: u32 = 120;

    /// Scroll distance worth one point under distance scoring
    pub const DISTANCE_PER_POINT: f32 = 100.0;
}
