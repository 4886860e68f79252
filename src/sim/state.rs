//! World state and entity types
//!
//! The whole run lives in one [`World`]: the player, the three entity
//! collections, the score, the camera and the run phase.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::generate::{generate_platform, generate_starting_platform};
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Physics advances every frame
    Running,
    /// Player fell off-screen; frozen until restart
    GameOver,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Landed { score: u64 },
    GemCollected { score: u64 },
    PlatformSpawned,
    CloudSpawned,
    GameOver { score: u64 },
}

/// Drawing surface size, captured once at load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// Camera offset at which world coordinates are shifted back toward zero
pub const CAMERA_REBASE_AT: f32 = 65_536.0;
/// Rebase step. Whole multiples keep every shifted coordinate exact.
const CAMERA_REBASE_STEP: f32 = 1024.0;

/// Vertical camera offset.
///
/// Screen y = world y + offset. Climbing above the middle of the screen
/// pushes the offset up by the player's vertical speed, which reads as the
/// camera following the player. Clouds sit further back and only see half
/// of it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub offset: f32,
}

impl Camera {
    #[inline]
    pub fn to_screen_y(&self, world_y: f32) -> f32 {
        world_y + self.offset
    }

    #[inline]
    pub fn to_world_y(&self, screen_y: f32) -> f32 {
        screen_y - self.offset
    }

    #[inline]
    pub fn cloud_to_screen_y(&self, world_y: f32) -> f32 {
        world_y + self.offset * 0.5
    }

    #[inline]
    pub fn cloud_to_world_y(&self, screen_y: f32) -> f32 {
        screen_y - self.offset * 0.5
    }

    pub fn follow(&mut self, amount: f32) {
        self.offset += amount;
    }
}

/// The player-controlled sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner, world space
    pub pos: Vec2,
    pub size: Vec2,
    /// Per-frame velocity (dx, dy)
    pub vel: Vec2,
    pub speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    pub grounded: bool,
    /// Jumps used since last landing
    pub jumps: u32,
    pub max_jumps: u32,
}

impl Player {
    /// Fresh player at the centre of the viewport, at rest and airborne
    pub fn new(viewport: Viewport, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(viewport.mid_x(), viewport.mid_y()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel: Vec2::ZERO,
            speed: tuning.player_speed,
            jump_impulse: tuning.jump_impulse,
            gravity: tuning.gravity,
            grounded: false,
            jumps: 0,
            max_jumps: tuning.max_jumps,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn move_left(&mut self) {
        self.vel.x = -self.speed;
    }

    pub fn move_right(&mut self) {
        self.vel.x = self.speed;
    }

    pub fn stop(&mut self) {
        self.vel.x = 0.0;
    }

    /// Jump if any jumps are left. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.jumps >= self.max_jumps {
            return false;
        }
        self.vel.y = self.jump_impulse;
        self.grounded = false;
        self.jumps += 1;
        true
    }

    /// Come to rest with the bottom edge on `surface_y`
    pub fn land_on(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.size.y;
        self.vel.y = 0.0;
        self.grounded = true;
        self.jumps = 0;
    }
}

/// A platform the player can land on
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A collectible gem
#[derive(Debug, Clone, PartialEq)]
pub struct Gem {
    pub pos: Vec2,
    pub size: f32,
}

impl Gem {
    /// Gem floating over the left end of a platform
    pub fn above(platform: &Platform, size: f32) -> Self {
        Self {
            pos: Vec2::new(
                platform.pos.x + size / 2.0,
                platform.pos.y - platform.size.y - size,
            ),
            size,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

/// Background decoration, no collision
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct World {
    /// Seed of the current run
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub player: Player,
    /// Platforms in creation order (last = highest spawned)
    pub platforms: Vec<Platform>,
    pub gems: Vec<Gem>,
    pub clouds: Vec<Cloud>,
    pub score: u64,
    pub camera: Camera,
    /// Frames simulated this run
    pub frame: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl World {
    /// Create a world in its starting configuration
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(viewport, &tuning),
            tuning,
            viewport,
            phase: GamePhase::Running,
            platforms: Vec::new(),
            gems: Vec::new(),
            clouds: Vec::new(),
            score: 0,
            camera: Camera::default(),
            frame: 0,
            events: Vec::new(),
        };
        world.populate();
        world
    }

    /// Reset everything for a new run with the given seed
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = GamePhase::Running;
        self.player = Player::new(self.viewport, &self.tuning);
        self.platforms.clear();
        self.gems.clear();
        self.clouds.clear();
        self.score = 0;
        self.camera = Camera::default();
        self.frame = 0;
        self.events.clear();
        self.populate();
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Move the camera offset back near zero once it grows large, shifting
    /// every entity by the same amount (clouds by half). Screen positions
    /// are unchanged; world y stays small enough for sub-pixel steps.
    pub fn rebase_camera(&mut self) {
        if self.camera.offset < CAMERA_REBASE_AT {
            return;
        }
        let shift = (self.camera.offset / CAMERA_REBASE_STEP).floor() * CAMERA_REBASE_STEP;
        self.camera.offset -= shift;
        self.player.pos.y += shift;
        for platform in &mut self.platforms {
            platform.pos.y += shift;
        }
        for gem in &mut self.gems {
            gem.pos.y += shift;
        }
        for cloud in &mut self.clouds {
            cloud.pos.y += shift / 2.0;
        }
        log::debug!("Camera rebased by {}", shift);
    }

    /// Starting platform plus one random platform above it
    fn populate(&mut self) {
        generate_starting_platform(self);
        generate_platform(self);
    }
}
