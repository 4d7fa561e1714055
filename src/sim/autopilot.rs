//! Idle/demo mode - a simple bot that climbs
//!
//! Picks the nearest platform above its feet that a jump can reach and walks
//! until it is under that platform (or at the edge of the one it stands on),
//! then jumps and steers toward the target's center while airborne. It makes
//! no attempt to dodge hazards.

use super::entity::Entity;
use super::rect::Rect;
use super::state::{Platform, PlatformKey, Session};
use super::tick::TickInput;

/// Demo-mode intent source
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    target: Option<PlatformKey>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform currently being aimed at
    pub fn target(&self) -> Option<PlatformKey> {
        self.target
    }

    /// Intents for the next tick
    pub fn input(&mut self, session: &Session) -> TickInput {
        let player = &session.player.rect;
        let speed = session.config.player_speed;
        let mut input = TickInput::default();

        if session.player.on_ground {
            self.target = pick_target(session);
        }

        // Stale handle: the platform scrolled away
        let Some(target) = self
            .target
            .and_then(|key| session.platforms.get(key))
            .filter(|p| p.is_alive())
        else {
            self.target = None;
            return input;
        };

        let dx = target.rect.center().x - player.center().x;
        if dx.abs() > speed {
            input.move_right = dx > 0.0;
            input.move_left = dx < 0.0;
        }

        if session.player.on_ground {
            let under = player.right() > target.rect.left() && player.left() < target.rect.right();
            let at_edge = standing_on(session).is_none_or(|ground| {
                if dx > 0.0 {
                    ground.rect.right() - player.right() <= speed * 2.0
                } else {
                    player.left() - ground.rect.left() <= speed * 2.0
                }
            });
            input.jump = under || at_edge;
        }
        input
    }
}

/// Nearest platform above the player's feet within jump height
fn pick_target(session: &Session) -> Option<PlatformKey> {
    let config = &session.config;
    let feet = session.player.rect.bottom();
    // Gravity is applied before the first move, so the discrete arc peaks
    // half a jump-velocity short of v^2 / 2g
    let v = config.jump_strength.abs();
    let apex = v * v / (2.0 * config.gravity.max(f32::EPSILON)) - v / 2.0;

    session
        .platforms
        .iter()
        .filter(|(_, p)| p.is_alive())
        .filter(|(_, p)| p.rect.top() < feet - 1.0 && feet - p.rect.top() <= apex)
        .max_by(|(_, a), (_, b)| a.rect.top().total_cmp(&b.rect.top()))
        .map(|(k, _)| k)
}

/// Platform under the player's feet
fn standing_on(session: &Session) -> Option<&Platform> {
    let player: Rect = session.player.rect;
    session.platforms.values().find(|p| {
        p.is_alive()
            && (p.rect.top() - player.bottom()).abs() < 1.0
            && player.right() > p.rect.left()
            && player.left() < p.rect.right()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::tick::{TickOutcome, tick};

    fn calm_config() -> Config {
        Config {
            lava_rise_speed: 0.0,
            difficulty_tier_1: 1_000_000,
            difficulty_tier_2: 2_000_000,
            difficulty_tier_3: 3_000_000,
            ..Config::default()
        }
    }

    #[test]
    fn test_targets_reachable_platform_above() {
        let session = Session::new(Config::default(), 31);
        let mut bot = Autopilot::new();
        let input = bot.input(&session);

        let key = bot.target().unwrap();
        let target = &session.platforms[key];
        assert!(target.rect.top() < session.player.rect.bottom());
        // The base platform spans the screen, so the bot either walks or jumps
        assert!(input.jump || input.move_left || input.move_right);
    }

    #[test]
    fn test_stale_target_is_dropped() {
        let mut session = Session::new(calm_config(), 33);
        let mut bot = Autopilot::new();
        bot.input(&session);
        let key = bot.target().unwrap();

        session.player.on_ground = false;
        session.platforms.remove(key);
        let input = bot.input(&session);
        assert_eq!(bot.target(), None);
        assert_eq!(input, TickInput::default());
    }

    #[test]
    fn test_bot_leaves_the_base_platform() {
        let mut session = Session::new(calm_config(), 32);
        let base_top = session.player.rect.bottom();
        let mut bot = Autopilot::new();
        let mut highest = base_top;
        for _ in 0..600 {
            let input = bot.input(&session);
            if tick(&mut session, &input) != TickOutcome::Running {
                break;
            }
            if session.player.on_ground {
                highest = highest.min(session.player.rect.bottom());
            }
        }
        assert!(highest <= base_top - session.config.platform_min_y_gap + 1e-3);
    }
}
