//! Procedural platform generation
//!
//! Every new platform is placed relative to the current topmost one (the
//! anchor): higher by a gap the jump arc covers, and horizontally within
//! jump distance of it. The column is topped up to the target count at the
//! end of each tick.

use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{Platform, Session};
use crate::config::Config;

/// Reference point for the next platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Left edge of the anchor platform
    pub x: f32,
    /// Top edge of the anchor platform
    pub y: f32,
}

impl Anchor {
    /// Topmost active platform, or a virtual one at the bottom center of the screen
    pub fn select(session: &Session) -> Self {
        session
            .topmost_platform()
            .map(|(_, p)| Anchor {
                x: p.rect.left(),
                y: p.rect.top(),
            })
            .unwrap_or(Anchor {
                x: session.config.screen_width / 2.0,
                y: session.config.screen_height,
            })
    }
}

/// Allowed left-edge range for a platform of `width` near `anchor_x`
///
/// Falls back to a window around the screen center when the window around
/// the anchor is empty.
pub fn horizontal_range(anchor_x: f32, width: f32, config: &Config) -> (f32, f32) {
    let reach = config.max_jump_distance;
    let max_x = config.screen_width - width;

    let lo = (anchor_x - reach).max(0.0);
    let hi = (anchor_x + reach).min(max_x);
    if lo <= hi {
        return (lo, hi);
    }

    let center = config.screen_width / 2.0;
    let lo = (center - reach).max(0.0);
    let hi = (center + reach).min(max_x);
    if lo <= hi {
        (lo, hi)
    } else {
        // Wider than the screen allows; pin to the left edge
        (0.0, 0.0)
    }
}

/// Uniform draw from [lo, hi], tolerating an empty span
pub(crate) fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if lo < hi { rng.random_range(lo..=hi) } else { lo }
}

/// Rect for the next platform above `anchor`
pub fn generate_platform(config: &Config, rng: &mut Pcg32, anchor: Anchor) -> Rect {
    let width = if config.platform_min_width < config.platform_max_width {
        rng.random_range(config.platform_min_width..config.platform_max_width)
    } else {
        config.platform_min_width
    };

    let (lo, hi) = horizontal_range(anchor.x, width, config);
    let x = uniform(rng, lo, hi);

    let gap = uniform(rng, config.platform_min_y_gap, config.platform_max_y_gap);
    let y = anchor.y - gap;

    Rect::new(x, y, width, config.platform_height)
}

impl Session {
    /// Generate platforms until the target count is reached
    ///
    /// Each new platform is offered to the hazard spawner. Returns how many
    /// platforms were created.
    pub fn replenish_platforms(&mut self) -> usize {
        let mut created = 0;
        while self.platforms.len() < self.config.max_platforms {
            let anchor = Anchor::select(self);
            let rect = generate_platform(&self.config, &mut self.rng, anchor);
            let key = self.platforms.insert(Platform::new(rect));
            log::debug!(
                "Platform at ({:.0}, {:.0}) width {:.0}",
                rect.left(),
                rect.top(),
                rect.width()
            );
            self.spawn_hazard_on(key);
            created += 1;
        }
        created
    }
}
