//! Player physics and movement
//!
//! Arcade model in pixels per tick: constant gravity, instant horizontal
//! speed, a single jump impulse from the ground.

use super::state::{Player, PlayerPose};
use super::tick::TickInput;
use crate::config::Config;

impl Player {
    /// Accelerate downward, capping fall speed when a terminal velocity is set
    pub fn apply_gravity(&mut self, gravity: f32, terminal_velocity: Option<f32>) {
        self.vel.y += gravity;
        if let Some(cap) = terminal_velocity {
            // Only ever limits falling, never a jump
            self.vel.y = self.vel.y.min(cap);
        }
    }

    /// Horizontal velocity from the held intents
    pub fn handle_movement(&mut self, input: &TickInput, speed: f32) {
        self.vel.x = match (input.move_left, input.move_right) {
            (true, false) => {
                self.facing_right = false;
                -speed
            }
            (false, true) => {
                self.facing_right = true;
                speed
            }
            _ => 0.0,
        };
    }

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn jump(&mut self, strength: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = strength;
        self.on_ground = false;
        true
    }

    /// Move by the current velocity
    pub fn integrate(&mut self) {
        self.rect.translate(self.vel);
    }

    /// Leaving one side of the screen re-enters from the other
    pub fn wrap_horizontal(&mut self, screen_width: f32) {
        if self.rect.right() > screen_width {
            self.rect.set_left(0.0);
        } else if self.rect.left() < 0.0 {
            self.rect.set_right(screen_width);
        }
    }

    /// One tick of self-motion
    pub fn update(&mut self, input: &TickInput, config: &Config) {
        self.apply_gravity(config.gravity, config.terminal_velocity);
        self.handle_movement(input, config.player_speed);
        self.integrate();
        self.wrap_horizontal(config.screen_width);
    }

    /// Animation pose from ground contact and velocity
    pub fn update_pose(&mut self) {
        self.pose = if !self.on_ground {
            PlayerPose::Airborne
        } else if self.vel.x != 0.0 {
            PlayerPose::Running
        } else {
            PlayerPose::Standing
        };
    }
}
