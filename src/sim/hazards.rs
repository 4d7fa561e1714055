//! Per-tick hazard behaviour
//!
//! Every update starts by resolving the hazard's platform handle; a stale
//! handle means the platform is gone and the hazard removes itself.

use glam::Vec2;

use super::entity::Entity;
use super::rect::Rect;
use super::state::{Facing, Hazard, HazardKind, PlatformKey, Session};
use crate::config::HazardTuning;

/// A shot requested by a ranged enemy this tick
struct Shot {
    facing: Facing,
    owner: PlatformKey,
    muzzle: Rect,
}

impl Session {
    /// Advance every hazard by one tick
    pub fn update_hazards(&mut self) {
        let tuning = self.config.hazards.clone();
        let screen = Vec2::new(self.config.screen_width, self.config.screen_height);
        let mut shots = Vec::new();

        for hazard in &mut self.hazards {
            let Some(platform) = self.platforms.get(hazard.platform).filter(|p| p.is_alive())
            else {
                hazard.kill();
                continue;
            };

            match &mut hazard.kind {
                HazardKind::Spike => {}
                HazardKind::Patrol { direction } => {
                    let max_offset = (platform.rect.width() - hazard.rect.width()).max(0.0);
                    hazard.offset_x += *direction * tuning.patrol_speed;
                    if hazard.offset_x <= 0.0 {
                        hazard.offset_x = 0.0;
                        *direction = 1.0;
                    } else if hazard.offset_x >= max_offset {
                        hazard.offset_x = max_offset;
                        *direction = -1.0;
                    }
                }
                HazardKind::Ranged { facing, cooldown } => {
                    *cooldown = cooldown.saturating_sub(1);
                    if *cooldown == 0 {
                        *cooldown = tuning.ranged_cooldown_ticks.max(1);
                        shots.push(Shot {
                            facing: *facing,
                            owner: hazard.platform,
                            muzzle: hazard.rect,
                        });
                    }
                }
                HazardKind::Projectile { velocity_x } => {
                    hazard.rect.translate(Vec2::new(*velocity_x, 0.0));
                    let r = hazard.rect;
                    if r.right() < 0.0 || r.left() > screen.x || r.bottom() < 0.0 || r.top() >= screen.y
                    {
                        hazard.kill();
                    }
                    continue;
                }
            }

            hazard.follow(platform);
        }

        for shot in shots {
            let id = self.next_entity_id();
            self.hazards.push(fire_projectile(id, &shot, &tuning));
        }

        self.sweep();
    }
}

/// Projectile leaving the shooter's facing side at its vertical center
fn fire_projectile(id: u32, shot: &Shot, tuning: &HazardTuning) -> Hazard {
    let kind = HazardKind::Projectile {
        velocity_x: shot.facing.sign() * tuning.projectile_speed,
    };
    let mut rect = Rect::from_center(shot.muzzle.center(), kind.size(tuning));
    match shot.facing {
        Facing::Left => rect.set_right(shot.muzzle.left()),
        Facing::Right => rect.set_left(shot.muzzle.right()),
    }
    Hazard::free(id, kind, shot.owner, rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::Platform;

    /// Session with no generated hazards and one known platform on screen
    fn session_with_platform() -> (Session, PlatformKey) {
        let mut session = Session::new(Config::default(), 17);
        session.hazards.clear();
        let key = session
            .platforms
            .insert(Platform::new(Rect::new(400.0, 500.0, 300.0, 35.0)));
        (session, key)
    }

    fn add(session: &mut Session, key: PlatformKey, kind: HazardKind, size: (f32, f32), offset: f32) {
        let id = session.next_entity_id();
        let platform = session.platforms[key].clone();
        session.hazards.push(Hazard::on_platform(
            id,
            kind,
            key,
            &platform,
            Vec2::from(size),
            offset,
        ));
    }

    #[test]
    fn test_patrol_reverses_at_edges() {
        let (mut session, key) = session_with_platform();
        add(
            &mut session,
            key,
            HazardKind::Patrol { direction: 1.0 },
            (40.0, 40.0),
            258.0,
        );

        session.update_hazards();
        let h = &session.hazards[0];
        assert_eq!(h.offset_x, 260.0);
        assert_eq!(h.rect.right(), 700.0);
        assert!(matches!(h.kind, HazardKind::Patrol { direction } if direction < 0.0));

        for _ in 0..200 {
            session.update_hazards();
            let h = &session.hazards[0];
            assert!(h.rect.left() >= 400.0 && h.rect.right() <= 700.0);
        }
    }

    #[test]
    fn test_ranged_fires_on_cooldown() {
        let (mut session, key) = session_with_platform();
        let cooldown = session.config.hazards.ranged_cooldown_ticks;
        add(
            &mut session,
            key,
            HazardKind::Ranged {
                facing: Facing::Right,
                cooldown,
            },
            (40.0, 50.0),
            260.0,
        );

        for _ in 0..cooldown - 1 {
            session.update_hazards();
        }
        assert_eq!(session.hazards.len(), 1);

        session.update_hazards();
        assert_eq!(session.hazards.len(), 2);
        let shot = &session.hazards[1];
        assert_eq!(shot.rect.left(), 700.0);
        assert!(matches!(shot.kind, HazardKind::Projectile { velocity_x } if velocity_x > 0.0));
        assert_eq!(shot.platform, key);
    }

    #[test]
    fn test_projectile_leaves_screen() {
        let (mut session, key) = session_with_platform();
        let id = session.next_entity_id();
        session.hazards.push(Hazard::free(
            id,
            HazardKind::Projectile { velocity_x: 8.0 },
            key,
            Rect::new(1590.0, 600.0, 16.0, 8.0),
        ));
        session.update_hazards();
        assert_eq!(session.hazards.len(), 1);
        session.update_hazards();
        assert!(session.hazards.is_empty());
    }

    #[test]
    fn test_stale_platform_removes_hazard() {
        let (mut session, key) = session_with_platform();
        add(&mut session, key, HazardKind::Spike, (40.0, 30.0), 10.0);
        session.platforms.remove(key);
        session.update_hazards();
        assert!(session.hazards.is_empty());
    }
}
