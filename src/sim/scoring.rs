//! Pluggable scoring rules
//!
//! The loop reports what each scroll did; the strategy decides what that is
//! worth. Swapping rules never touches the tick.

use crate::config::ScoringMode;

/// What one scroll step did to the world
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollEvent {
    /// Pixels the world moved down
    pub distance: f32,
    /// Platforms that left the bottom of the screen
    pub platforms_retired: u32,
}

/// A scoring rule
pub trait ScoringStrategy {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Points earned by a scroll step
    fn award(&mut self, event: &ScrollEvent) -> u64;
}

/// +1 per platform that scrolls off the bottom
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformsRetired;

impl ScoringStrategy for PlatformsRetired {
    fn name(&self) -> &'static str {
        "platforms"
    }

    fn award(&mut self, event: &ScrollEvent) -> u64 {
        event.platforms_retired as u64
    }
}

/// +1 per `per_point` pixels climbed, with fractional progress carried over
#[derive(Debug, Clone, Copy)]
pub struct ScrollDistance {
    per_point: f32,
    carried: f32,
}

impl ScrollDistance {
    pub fn new(per_point: f32) -> Self {
        Self {
            per_point: per_point.max(f32::EPSILON),
            carried: 0.0,
        }
    }
}

impl ScoringStrategy for ScrollDistance {
    fn name(&self) -> &'static str {
        "distance"
    }

    fn award(&mut self, event: &ScrollEvent) -> u64 {
        self.carried += event.distance.max(0.0);
        let points = (self.carried / self.per_point).floor();
        self.carried -= points * self.per_point;
        points as u64
    }
}

/// Build the strategy a config names
pub fn strategy_for(mode: ScoringMode) -> Box<dyn ScoringStrategy> {
    match mode {
        ScoringMode::PlatformsRetired => Box::new(PlatformsRetired),
        ScoringMode::Distance { per_point } => Box::new(ScrollDistance::new(per_point)),
    }
}
