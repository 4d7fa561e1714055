//! Shared entity contract
//!
//! Player, platforms, lava and every hazard expose a rect, a visual tag and a
//! liveness flag. Killing an entity only marks it; the owning collection in
//! the session sweeps dead entries at the end of the step that killed them.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// What an entity looks like, for the render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualTag {
    Player,
    Platform,
    Lava,
    Spike,
    PatrolEnemy,
    RangedEnemy,
    Projectile,
}

impl VisualTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualTag::Player => "player",
            VisualTag::Platform => "platform",
            VisualTag::Lava => "lava",
            VisualTag::Spike => "spike",
            VisualTag::PatrolEnemy => "patrol enemy",
            VisualTag::RangedEnemy => "ranged enemy",
            VisualTag::Projectile => "projectile",
        }
    }

    /// Whether touching this entity ends the run
    pub fn is_lethal(&self) -> bool {
        !matches!(self, VisualTag::Player | VisualTag::Platform)
    }
}

/// Common lifecycle for everything the session owns
pub trait Entity {
    /// Current position and size
    fn rect(&self) -> Rect;

    /// Visual variant
    fn tag(&self) -> VisualTag;

    /// False once killed
    fn is_alive(&self) -> bool;

    /// Mark as no longer active
    fn kill(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lethal_tags() {
        assert!(!VisualTag::Player.is_lethal());
        assert!(!VisualTag::Platform.is_lethal());
        assert!(VisualTag::Lava.is_lethal());
        assert!(VisualTag::Spike.is_lethal());
        assert!(VisualTag::Projectile.is_lethal());
    }
}
