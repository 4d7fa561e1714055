//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session by one frame. The step order is
//! fixed; later steps read what earlier steps wrote. Hazards kill on contact
//! right after landing; lava and the bottom edge are judged once the world
//! has scrolled.

use super::collision::{hazard_contact, lava_contact, resolve_landing, scroll_delta};
use super::spawner::difficulty_tier;
use super::state::{DeathCause, GamePhase, Session};

/// Intents for a single tick, sampled once before the tick runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held
    pub move_left: bool,
    /// Held
    pub move_right: bool,
    /// Pressed since the previous tick (one per key press, not per tick held)
    pub jump: bool,
    /// Abandon the run
    pub quit: bool,
}

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Run continues
    Running,
    /// Run ended this tick
    Died(DeathCause),
    /// Run was quit this tick
    Aborted,
    /// Run had already ended; nothing happened
    Ended,
}

/// Advance the session by one tick
pub fn tick(session: &mut Session, input: &TickInput) -> TickOutcome {
    if session.is_over() {
        return TickOutcome::Ended;
    }

    // Quit is honoured before anything with lasting effects
    if input.quit {
        session.phase = GamePhase::Aborted;
        log::info!("Run aborted at tick {}", session.time_ticks);
        return TickOutcome::Aborted;
    }

    session.time_ticks += 1;

    // Jump is read against last tick's ground contact
    if input.jump {
        session.player.jump(session.config.jump_strength);
    }

    // 1. Ground contact is re-established by landing every tick
    session.player.on_ground = false;

    // 2. Self-motion
    session.player.update(input, &session.config);
    session
        .lava
        .rise(session.config.lava_rise_speed, session.config.lava_ceiling);
    session.update_hazards();

    // 3. Landing
    resolve_landing(&mut session.player, &session.platforms);

    // 4. Hazard contact
    if let Some(tag) = hazard_contact(&session.player, &session.hazards, &session.masks) {
        session.die(DeathCause::Hazard(tag));
        return TickOutcome::Died(DeathCause::Hazard(tag));
    }

    // 5. Scroll and score
    if let Some(delta) = scroll_delta(&session.player, session.config.scroll_line()) {
        let event = session.apply_scroll(delta);
        let points = session.scoring_mut().award(&event);
        session.score += points;
        update_tier(session);
    }
    session.cull_offscreen();

    // 6. Replenish
    session.replenish_platforms();

    // 7. Lava and the bottom edge, in their final positions
    if lava_contact(&session.player, &session.lava) {
        session.die(DeathCause::Lava);
        return TickOutcome::Died(DeathCause::Lava);
    }
    if session.player.rect.top() > session.config.screen_height {
        session.die(DeathCause::FellOff);
        return TickOutcome::Died(DeathCause::FellOff);
    }

    // 8. Animation
    session.player.update_pose();

    TickOutcome::Running
}

/// Track the difficulty tier, logging when it rises
fn update_tier(session: &mut Session) {
    let tier = difficulty_tier(session.score, &session.config);
    if tier > session.tier {
        session.tier = tier;
        log::info!(
            "Difficulty tier {} reached at score {}",
            tier,
            session.score
        );
    }
}
