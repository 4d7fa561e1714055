//! Collision detection and resolution
//!
//! Landing uses bounding boxes; hazard contact is pixel-precise. Scrolling
//! moves the whole world down so the climbing player stays on screen.

use glam::Vec2;
use slotmap::SlotMap;

use super::entity::{Entity, VisualTag};
use super::mask::masks_overlap;
use super::scoring::ScrollEvent;
use super::state::{Hazard, Lava, MaskSet, Platform, PlatformKey, Player, ScrollMode, Session};

/// Snap a falling player onto the platform it just dropped into
///
/// A platform qualifies when the player's bottom edge is still above its
/// vertical midline, or crossed its top edge during this tick's move, so
/// platforms entered from below or from deep inside are ignored. The snap is
/// exact; any landing sink is applied by the render snapshot only. Returns
/// the platform landed on.
pub fn resolve_landing(
    player: &mut Player,
    platforms: &SlotMap<PlatformKey, Platform>,
) -> Option<PlatformKey> {
    if player.vel.y <= 0.0 {
        return None;
    }

    let bottom = player.rect.bottom();
    let prev_bottom = bottom - player.vel.y;
    let (key, platform) = platforms
        .iter()
        .filter(|(_, p)| p.is_alive())
        .filter(|(_, p)| player.rect.overlaps(&p.rect))
        .filter(|(_, p)| bottom < p.rect.mid_y() || prev_bottom <= p.rect.top())
        // Nearest top edge above the player's feet
        .max_by(|(_, a), (_, b)| a.rect.top().total_cmp(&b.rect.top()))?;

    player.rect.set_bottom(platform.rect.top());
    player.vel.y = 0.0;
    player.on_ground = true;
    Some(key)
}

/// First hazard the player touches, pixel-precise
pub fn hazard_contact(player: &Player, hazards: &[Hazard], masks: &MaskSet) -> Option<VisualTag> {
    hazards
        .iter()
        .filter(|h| h.is_alive() && h.tag().is_lethal())
        .find(|h| masks_overlap(&player.rect, &masks.player, &h.rect, &masks.for_hazard(h)))
        .map(|h| h.tag())
}

/// Whether the lava has reached the player
pub fn lava_contact(player: &Player, lava: &Lava) -> bool {
    player.rect.overlaps(&lava.rect)
}

/// How far the world should scroll this tick, if at all
///
/// Scrolling starts once the player's top edge is above `scroll_line` and
/// matches the player's upward speed.
pub fn scroll_delta(player: &Player, scroll_line: f32) -> Option<f32> {
    if player.rect.top() < scroll_line && player.vel.y < 0.0 {
        Some(-player.vel.y)
    } else {
        None
    }
}

impl Session {
    /// Move the world down by `delta`, retiring platforms that leave the screen
    pub fn apply_scroll(&mut self, delta: f32) -> ScrollEvent {
        let shift = Vec2::new(0.0, delta);
        let bottom = self.config.screen_height;

        self.player.rect.translate(shift);

        let mut retired = 0;
        for platform in self.platforms.values_mut() {
            platform.rect.translate(shift);
            if platform.rect.top() >= bottom {
                platform.kill();
                retired += 1;
            }
        }

        self.lava
            .scroll(delta, self.config.lava_ceiling, self.config.lava_floor());

        for hazard in &mut self.hazards {
            match hazard.traits().scroll {
                ScrollMode::Translate => hazard.rect.translate(shift),
                ScrollMode::FollowPlatform => {
                    match self.platforms.get(hazard.platform).filter(|p| p.is_alive()) {
                        Some(platform) => hazard.follow(platform),
                        None => hazard.kill(),
                    }
                }
            }
        }

        self.scrolled += delta;
        ScrollEvent {
            distance: delta,
            platforms_retired: retired,
        }
    }

    /// Remove platforms and hazards whose top edge reached the bottom of the screen
    pub fn cull_offscreen(&mut self) {
        let bottom = self.config.screen_height;
        for platform in self.platforms.values_mut() {
            if platform.rect.top() >= bottom {
                platform.kill();
            }
        }
        for hazard in &mut self.hazards {
            if hazard.rect.top() >= bottom {
                hazard.kill();
            }
        }
        self.sweep();
    }
}
