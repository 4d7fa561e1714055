//! Difficulty-tiered hazard spawning
//!
//! Each freshly generated platform gets one roll. The score decides the tier,
//! the tier decides which cumulative probability bands apply.

use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::Entity;
use super::generator::uniform;
use super::state::{Facing, Hazard, HazardKind, Platform, PlatformKey, Session};
use crate::config::Config;

/// Which hazard a roll produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardChoice {
    Spike,
    Patrol,
    Ranged,
}

/// Difficulty tier for a score: 0 below the first threshold, up to 3
pub fn difficulty_tier(score: u64, config: &Config) -> u8 {
    if score >= config.difficulty_tier_3 {
        3
    } else if score >= config.difficulty_tier_2 {
        2
    } else if score >= config.difficulty_tier_1 {
        1
    } else {
        0
    }
}

/// Map a uniform roll in [0, 1) to a hazard for the given tier
///
/// Bands are cumulative: exactly one outcome per roll.
pub fn roll_hazard(tier: u8, r: f32) -> Option<HazardChoice> {
    match tier {
        0 => None,
        1 => (r < 0.5).then_some(HazardChoice::Spike),
        2 => {
            if r < 0.3 {
                Some(HazardChoice::Spike)
            } else if r < 0.6 {
                Some(HazardChoice::Patrol)
            } else {
                None
            }
        }
        _ => {
            if r < 0.2 {
                Some(HazardChoice::Spike)
            } else if r < 0.5 {
                Some(HazardChoice::Patrol)
            } else if r < 0.8 {
                Some(HazardChoice::Ranged)
            } else {
                None
            }
        }
    }
}

/// Place a hazard of the chosen type on `platform`
pub fn build_hazard(
    choice: HazardChoice,
    config: &Config,
    rng: &mut Pcg32,
    id: u32,
    key: PlatformKey,
    platform: &Platform,
) -> Hazard {
    let tuning = &config.hazards;
    let span = platform.rect.width();

    let kind = match choice {
        HazardChoice::Spike => HazardKind::Spike,
        HazardChoice::Patrol => HazardKind::Patrol {
            direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
        },
        HazardChoice::Ranged => HazardKind::Ranged {
            facing: if rng.random_bool(0.5) {
                Facing::Right
            } else {
                Facing::Left
            },
            cooldown: tuning.ranged_cooldown_ticks,
        },
    };

    let size = kind.size(tuning);
    let free_span = (span - size.x).max(0.0);
    let offset_x = match kind {
        // Ranged enemies guard the edge they face
        HazardKind::Ranged {
            facing: Facing::Left,
            ..
        } => 0.0,
        HazardKind::Ranged {
            facing: Facing::Right,
            ..
        } => free_span,
        _ => uniform(rng, 0.0, free_span),
    };

    Hazard::on_platform(id, kind, key, platform, size, offset_x)
}

impl Session {
    /// Roll for a hazard on a freshly created platform and register it
    ///
    /// Returns the new hazard's id, if one spawned.
    pub fn spawn_hazard_on(&mut self, key: PlatformKey) -> Option<u32> {
        let tier = difficulty_tier(self.score, &self.config);
        let r: f32 = self.rng.random();
        let choice = roll_hazard(tier, r)?;

        let platform = self.platforms.get(key)?.clone();
        let id = self.next_entity_id();
        let hazard = build_hazard(choice, &self.config, &mut self.rng, id, key, &platform);
        log::debug!(
            "Spawned {} #{} at ({:.0}, {:.0})",
            hazard.tag().as_str(),
            id,
            hazard.rect.left(),
            hazard.rect.top()
        );
        self.hazards.push(hazard);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use rand::SeedableRng;
    use slotmap::SlotMap;
    use std::collections::HashMap;

    const TRIALS: usize = 100_000;

    /// Observed frequency of each outcome over many rolls at a fixed tier
    fn frequencies(tier: u8, seed: u64) -> HashMap<Option<HazardChoice>, f64> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut counts: HashMap<Option<HazardChoice>, usize> = HashMap::new();
        for _ in 0..TRIALS {
            let r: f32 = rng.random();
            *counts.entry(roll_hazard(tier, r)).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(k, v)| (k, v as f64 / TRIALS as f64))
            .collect()
    }

    fn assert_near(freqs: &HashMap<Option<HazardChoice>, f64>, key: Option<HazardChoice>, p: f64) {
        let observed = freqs.get(&key).copied().unwrap_or(0.0);
        assert!(
            (observed - p).abs() < 0.01,
            "{:?}: expected {}, observed {}",
            key,
            p,
            observed
        );
    }

    #[test]
    fn test_tiers_from_score() {
        let config = Config::default();
        assert_eq!(difficulty_tier(0, &config), 0);
        assert_eq!(difficulty_tier(9, &config), 0);
        assert_eq!(difficulty_tier(10, &config), 1);
        assert_eq!(difficulty_tier(20, &config), 2);
        assert_eq!(difficulty_tier(29, &config), 2);
        assert_eq!(difficulty_tier(30, &config), 3);
        assert_eq!(difficulty_tier(10_000, &config), 3);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(roll_hazard(1, 0.49), Some(HazardChoice::Spike));
        assert_eq!(roll_hazard(1, 0.5), None);
        assert_eq!(roll_hazard(2, 0.3), Some(HazardChoice::Patrol));
        assert_eq!(roll_hazard(2, 0.6), None);
        assert_eq!(roll_hazard(3, 0.0), Some(HazardChoice::Spike));
        assert_eq!(roll_hazard(3, 0.5), Some(HazardChoice::Ranged));
        assert_eq!(roll_hazard(3, 0.8), None);
    }

    #[test]
    fn test_below_first_tier_never_spawns() {
        let config = Config {
            difficulty_tier_1: 5,
            ..Config::default()
        };
        let tier = difficulty_tier(0, &config);
        for i in 0..1000 {
            assert_eq!(roll_hazard(tier, i as f32 / 1000.0), None);
        }
    }

    #[test]
    fn test_band_frequencies() {
        let f = frequencies(1, 1);
        assert_near(&f, Some(HazardChoice::Spike), 0.5);
        assert_near(&f, None, 0.5);

        let f = frequencies(2, 2);
        assert_near(&f, Some(HazardChoice::Spike), 0.3);
        assert_near(&f, Some(HazardChoice::Patrol), 0.3);
        assert_near(&f, None, 0.4);

        let f = frequencies(3, 3);
        assert_near(&f, Some(HazardChoice::Spike), 0.2);
        assert_near(&f, Some(HazardChoice::Patrol), 0.3);
        assert_near(&f, Some(HazardChoice::Ranged), 0.3);
        assert_near(&f, None, 0.2);
    }

    #[test]
    fn test_built_hazards_sit_on_platform() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut platforms: SlotMap<PlatformKey, Platform> = SlotMap::with_key();
        let key = platforms.insert(Platform::new(Rect::new(200.0, 400.0, 320.0, 35.0)));
        let platform = &platforms[key];

        for (i, choice) in [HazardChoice::Spike, HazardChoice::Patrol, HazardChoice::Ranged]
            .into_iter()
            .cycle()
            .take(60)
            .enumerate()
        {
            let h = build_hazard(choice, &config, &mut rng, i as u32, key, platform);
            assert_eq!(h.rect.bottom(), platform.rect.top());
            assert!(h.rect.left() >= platform.rect.left());
            assert!(h.rect.right() <= platform.rect.right() + 1e-3);
            assert_eq!(h.platform, key);
        }
    }

    #[test]
    fn test_ranged_enemy_sits_at_its_edge() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut platforms: SlotMap<PlatformKey, Platform> = SlotMap::with_key();
        let key = platforms.insert(Platform::new(Rect::new(200.0, 400.0, 320.0, 35.0)));

        for i in 0..20 {
            let h = build_hazard(HazardChoice::Ranged, &config, &mut rng, i, key, &platforms[key]);
            match h.kind {
                HazardKind::Ranged {
                    facing: Facing::Left,
                    ..
                } => assert_eq!(h.rect.left(), 200.0),
                HazardKind::Ranged {
                    facing: Facing::Right,
                    ..
                } => assert_eq!(h.rect.right(), 520.0),
                other => panic!("unexpected kind {:?}", other),
            }
        }
    }

    #[test]
    fn test_high_score_spawns_on_new_platforms() {
        let config = Config::default();
        let mut session = Session::new(config, 21);
        session.score = 1_000;
        let keys: Vec<_> = session.platforms.keys().collect();
        let spawned = keys
            .into_iter()
            .filter_map(|k| session.spawn_hazard_on(k))
            .count();
        // 80% per roll at the top tier; 10 rolls almost surely yield some
        assert!(spawned > 0);
        assert_eq!(session.hazards.len(), spawned);
    }
}
