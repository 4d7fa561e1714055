//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platform arena, hazards by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod generator;
pub mod hazards;
pub mod mask;
pub mod physics;
pub mod rect;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{hazard_contact, lava_contact, resolve_landing, scroll_delta};
pub use entity::{Entity, VisualTag};
pub use generator::{Anchor, generate_platform, horizontal_range};
pub use mask::{CollisionMask, MaskShape, masks_overlap};
pub use rect::Rect;
pub use scoring::{PlatformsRetired, ScoringStrategy, ScrollDistance, ScrollEvent, strategy_for};
pub use spawner::{HazardChoice, difficulty_tier, roll_hazard};
pub use state::{
    DeathCause, Facing, GamePhase, Hazard, HazardKind, HazardTraits, Lava, MaskSet, Platform,
    PlatformKey, Player, PlayerPose, ScrollMode, Session,
};
pub use tick::{TickInput, TickOutcome, tick};
