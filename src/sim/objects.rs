//! Object catalog: constructors and per-kind update/damage/destroy behavior

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Animation, EnemyKind, LevelObject, ObjectKind};
use super::geometry::move_toward_vec;
use super::particles::{Emission, EffectStyle, ParticleEffect, ParticleEffects};
use super::state::{GameEvent, SoundCue};
use crate::consts::*;
use crate::{move_toward, polar_to_cartesian};

/// Everything a destroy side effect may touch
pub struct SpawnContext<'a> {
    pub rng: &'a mut Pcg32,
    pub effects: &'a mut ParticleEffects,
    /// Objects created this tick; merged into the level after the sweep
    pub pending: &'a mut Vec<LevelObject>,
    pub events: &'a mut Vec<GameEvent>,
}

/// Result of a single damage call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Object cannot be damaged, or is already dying
    Ignored,
    /// Took a hit and survived
    Hit,
    /// Destroyed; award `score` to the player
    Destroyed { score: u32 },
}

/// Hits an asteroid of this radius survives before the last one destroys it
pub fn asteroid_health(radius: f32) -> i32 {
    (1.25 * radius.sqrt()).floor() as i32
}

pub fn asteroid(position: Vec2, radius: f32, velocity: Vec2, angular_velocity: f32) -> LevelObject {
    LevelObject::new(ObjectKind::Asteroid { coin_bearing: false }, position, radius, velocity)
        .with_spin(angular_velocity)
        .with_health(asteroid_health(radius))
}

pub fn coin_asteroid(position: Vec2, radius: f32, velocity: Vec2, angular_velocity: f32) -> LevelObject {
    LevelObject::new(ObjectKind::Asteroid { coin_bearing: true }, position, radius, velocity)
        .with_spin(angular_velocity)
        .with_health(asteroid_health(radius))
}

pub fn coin(position: Vec2, velocity: Vec2) -> LevelObject {
    LevelObject::new(
        ObjectKind::Coin {
            magnetize_delay: COIN_MAGNETIZE_DELAY,
        },
        position,
        COIN_RADIUS,
        velocity,
    )
    .with_animation(Animation::new(COIN_FRAMES, COIN_FRAME_DURATION))
}

pub fn enemy(kind: EnemyKind, position: Vec2) -> LevelObject {
    LevelObject::new(ObjectKind::Enemy(kind), position, ORBITER_RADIUS, Vec2::ZERO)
        .with_health(kind.health())
}

pub fn level_end(position: Vec2) -> LevelObject {
    LevelObject::new(ObjectKind::LevelEnd, position, LEVEL_END_RADIUS, Vec2::ZERO)
        .with_animation(Animation::new(LEVEL_END_FRAMES, LEVEL_END_FRAME_DURATION))
}

impl EnemyKind {
    pub fn health(self) -> i32 {
        1
    }

    pub fn coins(self) -> u32 {
        match self {
            EnemyKind::Orbiter | EnemyKind::LongRangeOrbiter => 1,
            EnemyKind::SmartOrbiter => 2,
        }
    }

    pub fn score(self) -> u32 {
        match self {
            EnemyKind::Orbiter | EnemyKind::LongRangeOrbiter => 100,
            EnemyKind::SmartOrbiter => 150,
        }
    }

    pub fn view_distance(self) -> f32 {
        match self {
            EnemyKind::Orbiter => ORBITER_VIEW_DISTANCE,
            EnemyKind::SmartOrbiter => SMART_ORBITER_VIEW_DISTANCE,
            EnemyKind::LongRangeOrbiter => LONG_ORBITER_VIEW_DISTANCE,
        }
    }
}

/// Velocity change that steers toward `target`: desired speed falls off
/// quadratically with distance out to `accel_range`, and so does the gain.
fn homing_steer(position: Vec2, velocity: Vec2, target: Vec2, max_speed: f32, accel_range: f32, dt: f32) -> Vec2 {
    let direction = target - position;
    let distance = direction.length();
    let closeness = 1.0 - distance.clamp(0.0, accel_range) / accel_range;
    let desired_speed = max_speed * closeness * closeness;
    let ideal_velocity = direction.normalize_or_zero() * desired_speed;
    let steering_strength = 3.0 * closeness;
    (ideal_velocity - velocity) * dt * steering_strength
}

/// Advance one object by `dt` given where the player is
pub fn update(obj: &mut LevelObject, player_position: Vec2, dt: f32) {
    match obj.kind {
        ObjectKind::Coin { magnetize_delay } => {
            let delay = move_toward(magnetize_delay, 0.0, dt);
            obj.kind = ObjectKind::Coin { magnetize_delay: delay };
            if delay <= 0.0 {
                obj.velocity += homing_steer(
                    obj.position(),
                    obj.velocity,
                    player_position,
                    COIN_MAX_SPEED,
                    COIN_ACCEL_RANGE,
                    dt,
                );
                obj.integrate(dt);
            } else {
                obj.integrate(dt);
                obj.velocity *= COIN_DRIFT_DECAY;
            }
        }
        ObjectKind::Enemy(kind @ (EnemyKind::Orbiter | EnemyKind::LongRangeOrbiter)) => {
            let to_player = player_position - obj.position();
            if to_player.length() < kind.view_distance() {
                obj.velocity += to_player.normalize_or_zero() * ORBITER_ACCEL * dt;
                obj.angle = to_player.y.atan2(to_player.x);
            } else {
                obj.velocity = move_toward_vec(obj.velocity, Vec2::ZERO, ORBITER_IDLE_DECAY * dt);
            }
            obj.integrate(dt);
        }
        ObjectKind::Enemy(EnemyKind::SmartOrbiter) => {
            obj.integrate(dt);
            let to_player = player_position - obj.position();
            if to_player.length() > SMART_ORBITER_VIEW_DISTANCE {
                return;
            }
            obj.velocity += homing_steer(
                obj.position(),
                obj.velocity,
                player_position,
                SMART_ORBITER_MAX_SPEED,
                SMART_ORBITER_ACCEL_RANGE,
                dt,
            );
            obj.angle = to_player.y.atan2(to_player.x);
        }
        ObjectKind::Asteroid { .. } | ObjectKind::LevelEnd => obj.integrate(dt),
    }
}

/// Take one point of damage
pub fn damage(obj: &mut LevelObject, ctx: &mut SpawnContext<'_>) -> DamageOutcome {
    if obj.queue_delete {
        return DamageOutcome::Ignored;
    }
    let Some(health) = obj.health.as_mut() else {
        return DamageOutcome::Ignored;
    };
    health.hp -= 1;
    if health.hp <= 0 {
        DamageOutcome::Destroyed {
            score: destroy(obj, ctx),
        }
    } else {
        health.shake = ASTEROID_SHAKE_TIME;
        ctx.events.push(GameEvent::Sound(SoundCue::Hit));
        DamageOutcome::Hit
    }
}

/// Mark for deletion and run side effects once. Returns score to award.
pub fn destroy(obj: &mut LevelObject, ctx: &mut SpawnContext<'_>) -> u32 {
    if obj.queue_delete {
        return 0;
    }
    obj.queue_delete = true;
    ctx.events.push(GameEvent::Sound(SoundCue::Explosion));
    let position = obj.position();
    let radius = obj.radius();

    match obj.kind {
        ObjectKind::Asteroid { coin_bearing } => {
            let emission = Emission {
                count: (8.0 * radius.sqrt() + 3.0).floor() as usize,
                direction: 0.0,
                spread: std::f32::consts::PI,
                speed: 3.5,
                speed_variance: 1.0,
                spin: 0.0,
                spin_variance: 200f32.to_radians(),
                duration: 2.0,
                duration_variance: 0.2,
            };
            ctx.effects.push(ParticleEffect::emit(position, &emission, &EffectStyle::Fragments, &mut *ctx.rng));

            if coin_bearing {
                let noise = ctx.rng.random_range(-1..=1) as f32;
                let amount = (2.0 * radius.sqrt() + noise).floor().max(0.0) as usize;
                for _ in 0..amount {
                    let offset = polar_to_cartesian(
                        ctx.rng.random_range(0.0..=radius),
                        ctx.rng.random_range(0.0..std::f32::consts::TAU),
                    );
                    let velocity = offset.normalize_or_zero() * COIN_SCATTER_SPEED;
                    ctx.pending.push(coin(position + offset, velocity));
                }
            }
            0
        }
        ObjectKind::Enemy(kind) => {
            let emission = Emission {
                count: 20,
                direction: 0.0,
                spread: std::f32::consts::PI,
                speed: 7.0,
                speed_variance: 1.0,
                spin: 0.0,
                spin_variance: 200f32.to_radians(),
                duration: 1.0,
                duration_variance: 0.2,
            };
            let style = EffectStyle::Dots {
                size: 0.5,
                size_variance: 0.2,
                from: [255, 50, 50],
                to: [255, 215, 0],
            };
            ctx.effects.push(ParticleEffect::emit(position, &emission, &style, &mut *ctx.rng));

            for _ in 0..kind.coins() {
                let offset = Vec2::new(
                    ctx.rng.random_range(-radius..=radius),
                    ctx.rng.random_range(-radius..=radius),
                ) / 2.0;
                let velocity = Vec2::new(
                    ctx.rng.random_range(-10.0..=10.0),
                    ctx.rng.random_range(-10.0..=10.0),
                );
                ctx.pending.push(coin(position + offset, velocity));
            }
            kind.score()
        }
        ObjectKind::Coin { .. } | ObjectKind::LevelEnd => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct Fixture {
        rng: Pcg32,
        effects: ParticleEffects,
        pending: Vec<LevelObject>,
        events: Vec<GameEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                rng: Pcg32::seed_from_u64(11),
                effects: ParticleEffects::new(64),
                pending: Vec::new(),
                events: Vec::new(),
            }
        }

        fn ctx(&mut self) -> SpawnContext<'_> {
            SpawnContext {
                rng: &mut self.rng,
                effects: &mut self.effects,
                pending: &mut self.pending,
                events: &mut self.events,
            }
        }

        fn explosions(&self) -> usize {
            self.events
                .iter()
                .filter(|e| **e == GameEvent::Sound(SoundCue::Explosion))
                .count()
        }
    }

    #[test]
    fn test_asteroid_health_formula() {
        assert_eq!(asteroid_health(2.0), 1);
        assert_eq!(asteroid_health(4.0), 2);
        assert_eq!(asteroid_health(6.0), 3);
    }

    #[test]
    fn test_asteroid_destroyed_once() {
        let mut fx = Fixture::new();
        let mut rock = asteroid(Vec2::new(20.0, 0.0), 6.0, Vec2::ZERO, 0.0);
        assert_eq!(damage(&mut rock, &mut fx.ctx()), DamageOutcome::Hit);
        assert_eq!(damage(&mut rock, &mut fx.ctx()), DamageOutcome::Hit);
        assert!(rock.is_shaking());
        assert_eq!(damage(&mut rock, &mut fx.ctx()), DamageOutcome::Destroyed { score: 0 });
        assert!(rock.queue_delete);
        assert_eq!(damage(&mut rock, &mut fx.ctx()), DamageOutcome::Ignored);
        assert_eq!(destroy(&mut rock, &mut fx.ctx()), 0);
        assert_eq!(fx.explosions(), 1);
        assert_eq!(fx.effects.len(), 1);
        assert!(fx.pending.is_empty());
    }

    #[test]
    fn test_coin_asteroid_drops_coins_in_blast_radius() {
        let mut fx = Fixture::new();
        let center = Vec2::new(30.0, 30.0);
        let mut rock = coin_asteroid(center, 4.0, Vec2::ZERO, 0.0);
        destroy(&mut rock, &mut fx.ctx());
        // floor(2*sqrt(4) + {-1,0,1}) = 3..=5
        assert!((3..=5).contains(&fx.pending.len()));
        for c in &fx.pending {
            assert!(matches!(c.kind, ObjectKind::Coin { .. }));
            assert!(c.position().distance(center) <= 4.0 + 1e-4);
            let speed = c.velocity.length();
            assert!(speed == 0.0 || (speed - COIN_SCATTER_SPEED).abs() < 1e-3);
        }
    }

    #[test]
    fn test_enemy_destroy_awards_score_and_coins() {
        let mut fx = Fixture::new();
        let mut smart = enemy(EnemyKind::SmartOrbiter, Vec2::new(15.0, 0.0));
        assert_eq!(damage(&mut smart, &mut fx.ctx()), DamageOutcome::Destroyed { score: 150 });
        assert_eq!(fx.pending.len(), 2);

        let mut orbiter = enemy(EnemyKind::LongRangeOrbiter, Vec2::new(15.0, 0.0));
        assert_eq!(damage(&mut orbiter, &mut fx.ctx()), DamageOutcome::Destroyed { score: 100 });
        assert_eq!(fx.pending.len(), 3);
    }

    #[test]
    fn test_coins_and_markers_ignore_damage() {
        let mut fx = Fixture::new();
        let mut c = coin(Vec2::ZERO, Vec2::ZERO);
        let mut end = level_end(Vec2::ZERO);
        assert_eq!(damage(&mut c, &mut fx.ctx()), DamageOutcome::Ignored);
        assert_eq!(damage(&mut end, &mut fx.ctx()), DamageOutcome::Ignored);
        assert!(!c.queue_delete && !end.queue_delete);
    }

    #[test]
    fn test_coin_drift_decays_before_magnetizing() {
        let mut c = coin(Vec2::new(50.0, 0.0), Vec2::new(15.0, 0.0));
        let dt = 1.0 / 60.0;
        let mut last = c.velocity.length();
        for _ in 0..29 {
            update(&mut c, Vec2::ZERO, dt);
            let speed = c.velocity.length();
            assert!(speed <= last);
            last = speed;
        }
    }

    #[test]
    fn test_coin_homes_on_player() {
        let player = Vec2::ZERO;
        let start = Vec2::new(150.0, 0.0);
        let mut c = coin(start, Vec2::new(0.0, 15.0));
        let dt = 1.0 / 60.0;
        for _ in 0..300 {
            update(&mut c, player, dt);
        }
        let toward = (player - c.position()).normalize();
        assert!(c.velocity.normalize().dot(toward) > 0.9);
        assert!(c.position().length() < start.length());
    }

    #[test]
    fn test_orbiter_chases_only_in_view() {
        let dt = 0.1;
        let mut near = enemy(EnemyKind::Orbiter, Vec2::new(20.0, 0.0));
        update(&mut near, Vec2::ZERO, dt);
        assert!(near.velocity.x < 0.0);

        let mut far = enemy(EnemyKind::Orbiter, Vec2::new(45.0, 0.0));
        far.velocity = Vec2::new(0.3, 0.0);
        update(&mut far, Vec2::ZERO, dt);
        assert!(far.velocity.x >= 0.0 && far.velocity.x < 0.3);

        let mut long = enemy(EnemyKind::LongRangeOrbiter, Vec2::new(45.0, 0.0));
        update(&mut long, Vec2::ZERO, dt);
        assert!(long.velocity.x < 0.0);
    }

    #[test]
    fn test_smart_orbiter_faces_player() {
        let mut smart = enemy(EnemyKind::SmartOrbiter, Vec2::new(0.0, 10.0));
        update(&mut smart, Vec2::ZERO, 0.1);
        assert!(smart.velocity.y < 0.0);
        assert!((smart.angle - -std::f32::consts::FRAC_PI_2).abs() < 1e-3);

        let mut idle = enemy(EnemyKind::SmartOrbiter, Vec2::new(0.0, 40.0));
        update(&mut idle, Vec2::ZERO, 0.1);
        assert_eq!(idle.velocity, Vec2::ZERO);
    }
}
