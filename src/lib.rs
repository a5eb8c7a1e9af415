//! Path Runner - a top-down arcade space game
//!
//! Core modules:
//! - `sim`: Simulation (level generation, entities, player, game modes)
//! - `renderer`: World/screen projection and the per-frame draw pass
//! - `platform`: Contracts for assets, input and render surfaces
//! - `ui`: Menu and upgrade-shop widgets
//! - `settings`: Player preferences

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{Error, Result};
pub use settings::{ControlScheme, QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Pixels per world unit
    pub const RENDER_SCALE: f32 = 10.0;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 1.0;
    /// Hard cap on ship speed while thrusting (units/s)
    pub const MAX_SPEED: f32 = 25.0;
    /// Forward acceleration at thrust tier 0 (units/s²)
    pub const THRUST_ACCEL: f32 = 20.0;
    /// Speed removed per second while braking at brakes tier 0
    pub const BRAKE_RATE: f32 = 15.0;
    /// Keyboard rotation speed (radians per second)
    pub const ROTATE_SPEED: f32 = 4.0;
    /// Each upgrade tier adds this fraction to the base value
    pub const UPGRADE_STEP: f32 = 0.25;
    /// Seconds between exhaust puffs while thrusting
    pub const THRUST_PUFF_INTERVAL: f32 = 0.1;

    /// Weapons
    pub const SHOOT_COOLDOWN: f32 = 0.35;
    pub const BULLET_RADIUS: f32 = 0.25;
    pub const BULLET_SPEED: f32 = 60.0;
    pub const BULLET_LIFETIME: f32 = 1.5;

    /// Grappling hook
    pub const HOOK_MAX_DISTANCE: f32 = 30.0;
    /// Pull back toward rest length per unit of overstretch (1/s)
    pub const HOOK_SPRING: f32 = 4.0;

    /// Level generation
    pub const ENDPOINT_MIN_DISTANCE: f32 = 350.0;
    pub const ENDPOINT_MAX_DISTANCE: f32 = 450.0;
    pub const PATH_ANGLE_VARIANCE_DEG: f32 = 45.0;
    pub const PATH_LENGTH_VARIANCE: f32 = 3.0;
    pub const MAX_PATH_POINTS: u32 = 15;
    /// No object spawns closer than this to the origin
    pub const SPAWN_CLEAR_RADIUS: f32 = 10.0;
    /// Slack beyond the spawn corridor before the player is lost
    pub const CORRIDOR_MARGIN: f32 = 10.0;

    /// Asteroids
    pub const ASTEROID_SHAKE_TIME: f32 = 0.1;
    pub const COIN_ASTEROID_ODDS: u32 = 7;
    pub const COIN_SCATTER_SPEED: f32 = 15.0;

    /// Coins
    pub const COIN_RADIUS: f32 = 0.75;
    pub const COIN_FRAME_DURATION: f32 = 0.5;
    pub const COIN_FRAMES: usize = 4;
    pub const COIN_MAGNETIZE_DELAY: f32 = 0.5;
    /// Per-tick velocity multiplier before magnetizing
    pub const COIN_DRIFT_DECAY: f32 = 0.95;
    pub const COIN_MAX_SPEED: f32 = 100.0;
    pub const COIN_ACCEL_RANGE: f32 = 200.0;

    /// Enemies
    pub const ORBITER_RADIUS: f32 = 1.0;
    pub const ORBITER_ACCEL: f32 = 10.0;
    pub const ORBITER_VIEW_DISTANCE: f32 = 30.0;
    /// Velocity bleed while no player is in view (units/s²)
    pub const ORBITER_IDLE_DECAY: f32 = 6.0;
    pub const SMART_ORBITER_VIEW_DISTANCE: f32 = 25.0;
    pub const SMART_ORBITER_MAX_SPEED: f32 = 25.0;
    pub const SMART_ORBITER_ACCEL_RANGE: f32 = 100.0;
    pub const LONG_ORBITER_VIEW_DISTANCE: f32 = 60.0;

    /// Level end marker
    pub const LEVEL_END_RADIUS: f32 = 2.0;
    pub const LEVEL_END_FRAMES: usize = 8;
    pub const LEVEL_END_FRAME_DURATION: f32 = 0.1;

    /// Game over sequence timings (seconds since death)
    pub const EXPLOSION_START: f32 = 1.0;
    pub const EXPLOSION_END: f32 = 2.8;
    pub const EXPLOSION_FRAMES: usize = 12;
    pub const SHIP_HIDE_TIME: f32 = 2.0;
    pub const GAME_OVER_TEXT_TIME: f32 = 4.0;
    pub const RETURN_TO_MENU_TIME: f32 = 8.0;
}

/// Wrap an angle to [-π, π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Step `current` toward `target` by at most `max_delta`, never overshooting
#[inline]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI) - -PI).abs() < 1e-4);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-PI / 2.0 - 2.0 * PI) - -PI / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_move_toward_does_not_overshoot() {
        assert_eq!(move_toward(0.1, 0.0, 0.5), 0.0);
        assert!((move_toward(1.0, 0.0, 0.25) - 0.75).abs() < 1e-6);
        assert!((move_toward(-1.0, 0.0, 0.25) - -0.75).abs() < 1e-6);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }
}
