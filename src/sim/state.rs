//! Session state and core simulation types
//!
//! The session exclusively owns every entity of a run. Subsystems receive
//! the slices they need from it; nothing reaches into global state.

use std::borrow::Cow;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use slotmap::{SlotMap, new_key_type};

use super::entity::{Entity, VisualTag};
use super::mask::{CollisionMask, MaskShape};
use super::rect::Rect;
use super::scoring::ScoringStrategy;
use crate::config::{Config, HazardTuning};

new_key_type! {
    /// Stable handle to a platform; goes stale once the platform is removed
    pub struct PlatformKey;
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player died
    GameOver,
    /// Quit before the run ended
    Aborted,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Touched a spike, enemy or projectile
    Hazard(VisualTag),
    /// Caught by the lava
    Lava,
    /// Dropped below the bottom of the screen
    FellOff,
}

/// Player animation pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerPose {
    #[default]
    Standing,
    Running,
    Airborne,
}

/// The player
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    pub facing_right: bool,
    pub pose: PlayerPose,
    alive: bool,
}

impl Player {
    /// Player standing on `ground_top`, horizontally centered on `center_x`
    pub fn new(center_x: f32, ground_top: f32, size: Vec2) -> Self {
        let mut rect = Rect::new(center_x - size.x / 2.0, 0.0, size.x, size.y);
        rect.set_bottom(ground_top);
        Self {
            rect,
            vel: Vec2::ZERO,
            on_ground: true,
            facing_right: true,
            pose: PlayerPose::Standing,
            alive: true,
        }
    }
}

impl Entity for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn tag(&self) -> VisualTag {
        VisualTag::Player
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// A platform; only ever moved by scrolling
#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    alive: bool,
}

impl Platform {
    pub fn new(rect: Rect) -> Self {
        Self { rect, alive: true }
    }
}

impl Entity for Platform {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn tag(&self) -> VisualTag {
        VisualTag::Platform
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// The rising lava; exactly one per session
#[derive(Debug, Clone)]
pub struct Lava {
    pub rect: Rect,
}

impl Lava {
    /// Screen-wide lava whose surface starts at the floor bound
    pub fn new(config: &Config) -> Self {
        Self {
            rect: Rect::new(
                0.0,
                config.lava_floor(),
                config.screen_width,
                config.screen_height,
            ),
        }
    }

    /// Current surface height (screen-space y)
    pub fn surface(&self) -> f32 {
        self.rect.top()
    }

    /// Rise by `speed`, never above `ceiling`
    pub fn rise(&mut self, speed: f32, ceiling: f32) {
        let top = (self.rect.top() - speed).max(ceiling);
        self.rect.set_top(top);
    }

    /// Move down with the world, keeping the surface within [ceiling, floor]
    pub fn scroll(&mut self, delta: f32, ceiling: f32, floor: f32) {
        let top = (self.rect.top() + delta).min(floor).max(ceiling);
        self.rect.set_top(top);
    }
}

impl Entity for Lava {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn tag(&self) -> VisualTag {
        VisualTag::Lava
    }

    fn is_alive(&self) -> bool {
        true
    }

    /// Lava cannot be removed; a session always has one
    fn kill(&mut self) {}
}

/// Which platform edge a ranged enemy guards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// How a hazard moves when the world scrolls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Re-placed from its platform's rect plus a stored offset
    FollowPlatform,
    /// Translated directly by the scroll delta
    Translate,
}

/// Per-variant capabilities, resolved in one place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardTraits {
    pub tag: VisualTag,
    pub scroll: ScrollMode,
    pub mask: MaskShape,
}

/// Hazard variants with their per-variant state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HazardKind {
    Spike,
    Patrol { direction: f32 },
    Ranged { facing: Facing, cooldown: u32 },
    Projectile { velocity_x: f32 },
}

impl HazardKind {
    /// Configured size of this kind
    pub fn size(&self, tuning: &HazardTuning) -> Vec2 {
        Vec2::from(match self {
            HazardKind::Spike => tuning.spike_size,
            HazardKind::Patrol { .. } => tuning.patrol_size,
            HazardKind::Ranged { .. } => tuning.ranged_size,
            HazardKind::Projectile { .. } => tuning.projectile_size,
        })
    }

    pub fn traits(&self) -> HazardTraits {
        let (tag, scroll, mask) = match self {
            HazardKind::Spike => (VisualTag::Spike, ScrollMode::FollowPlatform, MaskShape::Spike),
            HazardKind::Patrol { .. } => (
                VisualTag::PatrolEnemy,
                ScrollMode::FollowPlatform,
                MaskShape::Round,
            ),
            HazardKind::Ranged { .. } => (
                VisualTag::RangedEnemy,
                ScrollMode::FollowPlatform,
                MaskShape::Full,
            ),
            HazardKind::Projectile { .. } => {
                (VisualTag::Projectile, ScrollMode::Translate, MaskShape::Round)
            }
        };
        HazardTraits { tag, scroll, mask }
    }
}

/// A spike, enemy or projectile
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub rect: Rect,
    /// Platform this hazard belongs to; may be stale
    pub platform: PlatformKey,
    /// Offset of the left edge from the platform's left edge
    pub offset_x: f32,
    alive: bool,
}

impl Hazard {
    /// Hazard standing on `platform` at `offset_x` from its left edge
    pub fn on_platform(
        id: u32,
        kind: HazardKind,
        key: PlatformKey,
        platform: &Platform,
        size: Vec2,
        offset_x: f32,
    ) -> Self {
        let mut hazard = Self {
            id,
            kind,
            rect: Rect::new(0.0, 0.0, size.x, size.y),
            platform: key,
            offset_x,
            alive: true,
        };
        hazard.follow(platform);
        hazard
    }

    /// Free-moving hazard owned by (but not positioned by) a platform
    pub fn free(id: u32, kind: HazardKind, key: PlatformKey, rect: Rect) -> Self {
        Self {
            id,
            kind,
            rect,
            platform: key,
            offset_x: 0.0,
            alive: true,
        }
    }

    pub fn traits(&self) -> HazardTraits {
        self.kind.traits()
    }

    /// Re-place on top of the platform at the stored offset
    pub fn follow(&mut self, platform: &Platform) {
        self.rect.set_left(platform.rect.left() + self.offset_x);
        self.rect.set_bottom(platform.rect.top());
    }
}

impl Entity for Hazard {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn tag(&self) -> VisualTag {
        self.traits().tag
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// Pre-rasterized collision masks for the player and every configured hazard size
#[derive(Debug, Clone)]
pub struct MaskSet {
    pub player: CollisionMask,
    hazards: Vec<CollisionMask>,
}

impl MaskSet {
    pub fn new(config: &Config) -> Self {
        let kinds = [
            HazardKind::Spike,
            HazardKind::Patrol { direction: 1.0 },
            HazardKind::Ranged {
                facing: Facing::Right,
                cooldown: 0,
            },
            HazardKind::Projectile { velocity_x: 0.0 },
        ];
        Self {
            player: CollisionMask::new(
                MaskShape::Full,
                Vec2::new(config.player_width, config.player_height),
            ),
            hazards: kinds
                .iter()
                .map(|k| CollisionMask::new(k.traits().mask, k.size(&config.hazards)))
                .collect(),
        }
    }

    /// Mask for a hazard's shape at its current size, rasterized on demand if
    /// no cached mask fits
    pub fn for_hazard(&self, hazard: &Hazard) -> Cow<'_, CollisionMask> {
        let shape = hazard.traits().mask;
        let size = hazard.rect.size;
        match self.hazards.iter().find(|m| m.fits(shape, size)) {
            Some(mask) => Cow::Borrowed(mask),
            None => Cow::Owned(CollisionMask::new(shape, size)),
        }
    }
}

/// One run of the game
pub struct Session {
    /// Tuning for this run
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving generation and spawning
    pub rng: Pcg32,
    /// Score
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Set when the phase becomes GameOver
    pub death: Option<DeathCause>,
    /// Difficulty tier reached so far (0-3)
    pub tier: u8,
    /// Total distance the world has scrolled
    pub scrolled: f32,
    pub player: Player,
    pub platforms: SlotMap<PlatformKey, Platform>,
    /// Active hazards (sorted by id)
    pub hazards: Vec<Hazard>,
    pub lava: Lava,
    pub masks: MaskSet,
    scoring: Box<dyn ScoringStrategy>,
    /// Next entity ID
    next_id: u32,
}

impl Session {
    /// Start a run using the scoring rule named in the config
    pub fn new(config: Config, seed: u64) -> Self {
        let scoring = super::scoring::strategy_for(config.scoring);
        Self::with_scoring(config, seed, scoring)
    }

    /// Start a run with a custom scoring rule
    pub fn with_scoring(config: Config, seed: u64, scoring: Box<dyn ScoringStrategy>) -> Self {
        let base_top = config.screen_height - config.base_platform_height;
        let player = Player::new(
            config.screen_width / 2.0,
            base_top,
            Vec2::new(config.player_width, config.player_height),
        );

        let mut platforms = SlotMap::with_key();
        platforms.insert(Platform::new(Rect::new(
            0.0,
            base_top,
            config.screen_width,
            config.base_platform_height,
        )));

        let mut session = Self {
            lava: Lava::new(&config),
            masks: MaskSet::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            death: None,
            tier: 0,
            scrolled: 0.0,
            player,
            platforms,
            hazards: Vec::new(),
            scoring,
            next_id: 1,
        };

        session.replenish_platforms();
        log::info!(
            "Run started (seed {}, scoring: {})",
            seed,
            session.scoring.name()
        );
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Name of the active scoring rule
    pub fn scoring_name(&self) -> &'static str {
        self.scoring.name()
    }

    pub(crate) fn scoring_mut(&mut self) -> &mut dyn ScoringStrategy {
        self.scoring.as_mut()
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// End the run
    pub fn die(&mut self, cause: DeathCause) {
        self.player.kill();
        self.phase = GamePhase::GameOver;
        self.death = Some(cause);
        log::info!(
            "Run over at tick {}: {:?} (score {})",
            self.time_ticks,
            cause,
            self.score
        );
    }

    /// Topmost active platform
    pub fn topmost_platform(&self) -> Option<(PlatformKey, &Platform)> {
        self.platforms
            .iter()
            .filter(|(_, p)| p.is_alive())
            .min_by(|(_, a), (_, b)| a.rect.top().total_cmp(&b.rect.top()))
    }

    /// Drop killed platforms and every hazard whose platform is gone
    pub fn sweep(&mut self) {
        self.platforms.retain(|_, p| p.is_alive());
        let platforms = &self.platforms;
        self.hazards
            .retain(|h| h.is_alive() && platforms.contains_key(h.platform));
    }
}

/// Debug output without the boxed scoring rule
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("seed", &self.seed)
            .field("score", &self.score)
            .field("time_ticks", &self.time_ticks)
            .field("phase", &self.phase)
            .field("death", &self.death)
            .field("platforms", &self.platforms.len())
            .field("hazards", &self.hazards.len())
            .field("scoring", &self.scoring.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let config = Config::default();
        let session = Session::new(config.clone(), 7);

        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.platforms.len(), config.max_platforms);
        assert!(session.player.on_ground);
        assert_eq!(session.player.vel, Vec2::ZERO);
        assert_eq!(
            session.player.rect.bottom(),
            config.screen_height - config.base_platform_height
        );
        // Score starts below every tier, so nothing spawns on the opening column
        assert!(session.hazards.is_empty());
        assert_eq!(session.lava.surface(), config.lava_floor());
    }

    #[test]
    fn test_lava_rise_is_clamped() {
        let config = Config::default();
        let mut lava = Lava::new(&config);
        for _ in 0..10_000 {
            lava.rise(config.lava_rise_speed, config.lava_ceiling);
        }
        assert_eq!(lava.surface(), config.lava_ceiling);

        lava.scroll(1_000_000.0, config.lava_ceiling, config.lava_floor());
        assert_eq!(lava.surface(), config.lava_floor());
    }

    #[test]
    fn test_hazard_traits_dispatch() {
        assert_eq!(HazardKind::Spike.traits().scroll, ScrollMode::FollowPlatform);
        assert_eq!(
            HazardKind::Projectile { velocity_x: 1.0 }.traits().scroll,
            ScrollMode::Translate
        );
        assert_eq!(
            HazardKind::Ranged {
                facing: Facing::Left,
                cooldown: 0
            }
            .traits()
            .tag,
            VisualTag::RangedEnemy
        );
    }

    #[test]
    fn test_hazard_masks_come_from_traits() {
        let config = Config::default();
        let masks = MaskSet::new(&config);
        let kinds = [
            HazardKind::Spike,
            HazardKind::Patrol { direction: -1.0 },
            HazardKind::Ranged {
                facing: Facing::Left,
                cooldown: 5,
            },
            HazardKind::Projectile { velocity_x: 8.0 },
        ];
        for kind in kinds {
            let size = kind.size(&config.hazards);
            let hazard = Hazard::free(1, kind, PlatformKey::default(), Rect::new(0.0, 0.0, size.x, size.y));
            let mask = masks.for_hazard(&hazard);
            assert!(matches!(mask, Cow::Borrowed(_)));
            assert!(mask.fits(kind.traits().mask, size));
        }

        // An unconfigured size is rasterized on the spot
        let odd = Hazard::free(2, HazardKind::Spike, PlatformKey::default(), Rect::new(0.0, 0.0, 7.0, 9.0));
        let mask = masks.for_hazard(&odd);
        assert!(matches!(mask, Cow::Owned(_)));
        assert!(mask.fits(MaskShape::Spike, Vec2::new(7.0, 9.0)));
    }

    #[test]
    fn test_hazard_follows_platform() {
        let mut platforms: SlotMap<PlatformKey, Platform> = SlotMap::with_key();
        let key = platforms.insert(Platform::new(Rect::new(100.0, 500.0, 300.0, 35.0)));
        let mut spike = Hazard::on_platform(
            1,
            HazardKind::Spike,
            key,
            &platforms[key],
            Vec2::new(40.0, 30.0),
            50.0,
        );
        assert_eq!(spike.rect.left(), 150.0);
        assert_eq!(spike.rect.bottom(), 500.0);

        platforms[key].rect.translate(Vec2::new(0.0, 120.0));
        spike.follow(&platforms[key]);
        assert_eq!(spike.rect.bottom(), 620.0);
        assert_eq!(spike.rect.left(), 150.0);
    }

    #[test]
    fn test_sweep_drops_orphaned_hazards() {
        let mut session = Session::new(Config::default(), 3);
        let (key, _) = session.topmost_platform().unwrap();
        let id = session.next_entity_id();
        let platform = session.platforms[key].clone();
        session.hazards.push(Hazard::on_platform(
            id,
            HazardKind::Spike,
            key,
            &platform,
            Vec2::new(40.0, 30.0),
            0.0,
        ));

        session.platforms[key].kill();
        session.sweep();
        assert!(!session.platforms.contains_key(key));
        assert!(session.hazards.is_empty());
    }
}
