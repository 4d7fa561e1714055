//! Render snapshot
//!
//! Turns a session into a flat, ordered list of sprites for whatever draws
//! the frame. Nothing here touches a GPU or a window; the drawing side decides
//! how an `Appearance` becomes pixels.

use glam::Vec2;

use crate::sim::{Entity, PlayerPose, Rect, Session, VisualTag};

/// Solid RGB colour
pub type Rgb = [u8; 3];

impl VisualTag {
    /// Image file for this tag, relative to the asset directory
    pub fn asset_name(&self) -> &'static str {
        match self {
            VisualTag::Player => "player.png",
            VisualTag::Platform => "platform.png",
            VisualTag::Lava => "lava.png",
            VisualTag::Spike => "spike.png",
            VisualTag::PatrolEnemy => "enemy_patrol.png",
            VisualTag::RangedEnemy => "enemy_ranged.png",
            VisualTag::Projectile => "projectile.png",
        }
    }

    /// Flat colour drawn when the image is missing
    pub fn fallback_color(&self) -> Rgb {
        match self {
            VisualTag::Player => [0, 255, 0],
            VisualTag::Platform => [0, 255, 255],
            VisualTag::Lava => [255, 69, 0],
            VisualTag::Spike => [150, 150, 150],
            VisualTag::PatrolEnemy => [255, 0, 0],
            VisualTag::RangedEnemy => [100, 0, 100],
            VisualTag::Projectile => [255, 255, 0],
        }
    }
}

/// How a sprite is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Image(&'static str),
    Solid(Rgb),
}

/// One thing to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub tag: VisualTag,
    /// Player only; false for everything else
    pub on_ground: bool,
    /// Player only; true for everything else
    pub facing_right: bool,
    pub pose: Option<PlayerPose>,
}

impl Sprite {
    fn of(entity: &impl Entity) -> Self {
        Self {
            rect: entity.rect(),
            tag: entity.tag(),
            on_ground: false,
            facing_right: true,
            pose: None,
        }
    }

    /// Image name for this sprite; the player swaps to a jump frame when airborne
    pub fn asset_name(&self) -> &'static str {
        match (self.tag, self.pose) {
            (VisualTag::Player, Some(PlayerPose::Airborne)) => "player_jump.png",
            (tag, _) => tag.asset_name(),
        }
    }

    /// Image if the loader has it, otherwise the fallback colour
    pub fn appearance(&self, is_available: impl Fn(&str) -> bool) -> Appearance {
        let name = self.asset_name();
        if is_available(name) {
            Appearance::Image(name)
        } else if self.tag == VisualTag::Player && is_available(self.tag.asset_name()) {
            Appearance::Image(self.tag.asset_name())
        } else {
            Appearance::Solid(self.tag.fallback_color())
        }
    }
}

/// Every live entity in draw order: platforms, hazards, player, lava
///
/// A grounded player is drawn `landing_sink` pixels into its platform.
pub fn snapshot(session: &Session) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(session.platforms.len() + session.hazards.len() + 2);

    sprites.extend(
        session
            .platforms
            .values()
            .filter(|p| p.is_alive())
            .map(Sprite::of),
    );
    sprites.extend(session.hazards.iter().filter(|h| h.is_alive()).map(Sprite::of));

    let player = &session.player;
    let mut rect = player.rect;
    if player.on_ground {
        rect.translate(Vec2::new(0.0, session.config.landing_sink));
    }
    sprites.push(Sprite {
        rect,
        tag: VisualTag::Player,
        on_ground: player.on_ground,
        facing_right: player.facing_right,
        pose: Some(player.pose),
    });

    sprites.push(Sprite::of(&session.lava));
    sprites
}
