//! Level object record
//!
//! Every thing placed along the path is a [`LevelObject`]: a moving collision
//! circle with optional health and animation, tagged with an [`ObjectKind`]
//! that selects its behavior. Behavior lives in free functions in
//! [`super::objects`] that match on the tag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{CollisionCircle, Rect};
use crate::consts::RENDER_SCALE;
use crate::move_toward;

/// Stable handle to a level object. Lookups by id never dangle: a swept
/// object simply stops being found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Id carried by objects that have not been inserted into a level yet
    pub const UNASSIGNED: ObjectId = ObjectId(0);
}

/// Fixed-rate looping frame counter
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub frame_count: usize,
    pub frame_duration: f32,
    pub elapsed: f32,
    pub frame: usize,
}

impl Animation {
    pub fn new(frame_count: usize, frame_duration: f32) -> Self {
        debug_assert!(frame_count > 0 && frame_duration > 0.0);
        Self {
            frame_count,
            frame_duration,
            elapsed: 0.0,
            frame: 0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        while self.elapsed >= self.frame_duration {
            self.elapsed -= self.frame_duration;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }
}

/// Hit points plus the cosmetic shake window opened by non-fatal hits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub hp: i32,
    pub shake: f32,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self { hp, shake: 0.0 }
    }

    pub fn update(&mut self, dt: f32) {
        self.shake = move_toward(self.shake, 0.0, dt);
    }
}

/// Enemy steering variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Constant acceleration toward the player while in view
    Orbiter,
    /// Distance-shaped speed profile, like coin magnetism
    SmartOrbiter,
    /// Orbiter that sees twice as far
    LongRangeOrbiter,
}

/// Behavior tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    Asteroid { coin_bearing: bool },
    Coin { magnetize_delay: f32 },
    Enemy(EnemyKind),
    LevelEnd,
}

#[derive(Debug, Clone)]
pub struct LevelObject {
    pub id: ObjectId,
    pub circle: CollisionCircle,
    pub velocity: Vec2,
    /// Facing/rotation in radians
    pub angle: f32,
    /// Radians per second
    pub angular_velocity: f32,
    /// Soft delete; swept between passes
    pub queue_delete: bool,
    pub health: Option<Health>,
    pub animation: Option<Animation>,
    pub kind: ObjectKind,
}

impl LevelObject {
    pub fn new(kind: ObjectKind, position: Vec2, radius: f32, velocity: Vec2) -> Self {
        Self {
            id: ObjectId::UNASSIGNED,
            circle: CollisionCircle::new(position, radius),
            velocity,
            angle: 0.0,
            angular_velocity: 0.0,
            queue_delete: false,
            health: None,
            animation: None,
            kind,
        }
    }

    pub fn with_spin(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_health(mut self, hp: i32) -> Self {
        self.health = Some(Health::new(hp));
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.circle.position
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.circle.radius
    }

    /// Explicit Euler step of position and rotation, plus timers
    pub fn integrate(&mut self, dt: f32) {
        self.circle.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
        if let Some(animation) = &mut self.animation {
            animation.update(dt);
        }
        if let Some(health) = &mut self.health {
            health.update(dt);
        }
    }

    /// Sprite edge length in pixels
    pub fn visual_size(&self) -> f32 {
        self.radius() * 2.0 * RENDER_SCALE
    }

    pub fn bounding_box(&self) -> Rect {
        self.circle.bounding_box()
    }

    /// Bullets and ship rams can hurt this object
    pub fn is_damageable(&self) -> bool {
        matches!(self.kind, ObjectKind::Asteroid { .. } | ObjectKind::Enemy(_))
    }

    pub fn is_shaking(&self) -> bool {
        self.health.is_some_and(|h| h.shake > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_wraps() {
        let mut anim = Animation::new(3, 0.5);
        anim.update(0.4);
        assert_eq!(anim.frame, 0);
        anim.update(0.2);
        assert_eq!(anim.frame, 1);
        anim.update(1.0);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn test_integrate_moves_and_spins() {
        let mut obj = LevelObject::new(ObjectKind::LevelEnd, Vec2::ZERO, 1.0, Vec2::new(2.0, -1.0))
            .with_spin(0.5);
        obj.integrate(0.5);
        assert!((obj.position() - Vec2::new(1.0, -0.5)).length() < 1e-6);
        assert!((obj.angle - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_shake_decays() {
        let mut obj = LevelObject::new(ObjectKind::Asteroid { coin_bearing: false }, Vec2::ZERO, 2.0, Vec2::ZERO)
            .with_health(2);
        obj.health.as_mut().unwrap().shake = 0.1;
        assert!(obj.is_shaking());
        obj.integrate(0.06);
        assert!(obj.is_shaking());
        obj.integrate(0.06);
        assert!(!obj.is_shaking());
    }

    #[test]
    fn test_visual_size_tracks_radius() {
        let obj = LevelObject::new(ObjectKind::LevelEnd, Vec2::ZERO, 2.0, Vec2::ZERO);
        assert_eq!(obj.visual_size(), 4.0 * RENDER_SCALE);
        assert!(!obj.is_damageable());
    }
}
