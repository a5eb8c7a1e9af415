//! Player ship: steering, weapons and the grappling hook

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::select_hook_target;
use super::entity::{LevelObject, ObjectId};
use super::geometry::{CollisionCircle, move_toward_vec};
use super::objects::SpawnContext;
use super::particles::{EffectStyle, Emission, ParticleEffect};
use super::state::{GameEvent, SoundCue};
use super::tick::TickInput;
use crate::consts::*;
use crate::{move_toward, wrap_angle};

/// Ship heading on spawn: straight up the screen
pub const SPAWN_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;

/// Purchasable upgrade tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    FireRate,
    Brakes,
    Thrust,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::FireRate, UpgradeKind::Brakes, UpgradeKind::Thrust];

    pub fn title(self) -> &'static str {
        match self {
            UpgradeKind::FireRate => "Fire Rate",
            UpgradeKind::Brakes => "Brakes",
            UpgradeKind::Thrust => "Thrust",
        }
    }
}

/// Upgrade tiers, all starting at zero and unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub fire_rate: u32,
    pub brakes: u32,
    pub thrust: u32,
}

impl Upgrades {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::FireRate => self.fire_rate,
            UpgradeKind::Brakes => self.brakes,
            UpgradeKind::Thrust => self.thrust,
        }
    }

    pub fn increment(&mut self, kind: UpgradeKind) {
        match kind {
            UpgradeKind::FireRate => self.fire_rate += 1,
            UpgradeKind::Brakes => self.brakes += 1,
            UpgradeKind::Thrust => self.thrust += 1,
        }
    }

    /// Scale factor a tier applies to its base stat
    pub fn multiplier(&self, kind: UpgradeKind) -> f32 {
        1.0 + UPGRADE_STEP * self.level(kind) as f32
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub circle: CollisionCircle,
    pub velocity: Vec2,
    pub lifetime: f32,
}

impl Bullet {
    /// Returns false once expired
    fn update(&mut self, dt: f32) -> bool {
        self.circle.position += self.velocity * dt;
        self.lifetime -= dt;
        self.lifetime > 0.0
    }
}

/// Active tether to an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hook {
    pub target: ObjectId,
    pub rest_length: f32,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub circle: CollisionCircle,
    pub velocity: Vec2,
    /// Heading in radians
    pub angle: f32,
    pub coins: u32,
    pub score: u32,
    pub upgrades: Upgrades,
    pub bullets: Vec<Bullet>,
    pub shoot_cooldown: f32,
    /// Asteroid currently under the hook sight
    pub selected: Option<ObjectId>,
    pub hook: Option<Hook>,
    /// Hook input from the previous update; latching needs a fresh press
    pub hook_was_held: bool,
    /// Thrust was applied during the last update (drives the flame sprite)
    pub thrusting: bool,
    /// Time until the next exhaust puff
    pub puff_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            circle: CollisionCircle::new(Vec2::ZERO, PLAYER_RADIUS),
            velocity: Vec2::ZERO,
            angle: SPAWN_ANGLE,
            coins: 0,
            score: 0,
            upgrades: Upgrades::default(),
            bullets: Vec::new(),
            shoot_cooldown: 0.0,
            selected: None,
            hook: None,
            hook_was_held: false,
            thrusting: false,
            puff_timer: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.circle.position
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Back to the origin for a new level; keeps coins, score and upgrades
    pub fn reset_position(&mut self) {
        self.circle.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.angle = SPAWN_ANGLE;
        self.bullets.clear();
        self.shoot_cooldown = 0.0;
        self.selected = None;
        self.hook = None;
        self.thrusting = false;
        self.puff_timer = 0.0;
    }

    /// Wipe everything, including progression
    pub fn reset_to_defaults(&mut self) {
        *self = Self::new();
    }

    pub fn shoot_interval(&self) -> f32 {
        SHOOT_COOLDOWN / self.upgrades.multiplier(UpgradeKind::FireRate)
    }

    /// One simulation step of input handling, movement and bullets
    pub fn update(&mut self, input: &TickInput, objects: &[LevelObject], dt: f32, ctx: &mut SpawnContext<'_>) {
        match input.aim_angle {
            Some(aim) => self.angle = aim,
            None => self.angle = wrap_angle(self.angle + input.rotate.clamp(-1.0, 1.0) * ROTATE_SPEED * dt),
        }

        self.thrusting = input.thrust;
        if input.thrust {
            let accel = THRUST_ACCEL * self.upgrades.multiplier(UpgradeKind::Thrust);
            self.velocity = (self.velocity + self.forward() * accel * dt).clamp_length_max(MAX_SPEED);
            self.puff_timer -= dt;
            if self.puff_timer <= 0.0 {
                self.emit_thrust_puff(ctx);
                self.puff_timer = THRUST_PUFF_INTERVAL;
            }
        }
        if input.brake {
            let rate = BRAKE_RATE * self.upgrades.multiplier(UpgradeKind::Brakes);
            self.velocity = move_toward_vec(self.velocity, Vec2::ZERO, rate * dt);
        }

        self.selected = select_hook_target(self.position(), self.forward(), objects, HOOK_MAX_DISTANCE);
        self.update_hook(input.hook, objects, ctx);

        self.circle.position += self.velocity * dt;

        self.shoot_cooldown = move_toward(self.shoot_cooldown, 0.0, dt);
        if input.fire && self.shoot_cooldown <= 0.0 {
            self.fire();
            ctx.events.push(GameEvent::Sound(SoundCue::Shoot));
        }

        self.bullets.retain_mut(|b| b.update(dt));
    }

    fn fire(&mut self) {
        let forward = self.forward();
        self.bullets.push(Bullet {
            circle: CollisionCircle::new(self.position() + forward * PLAYER_RADIUS, BULLET_RADIUS),
            velocity: self.velocity + forward * BULLET_SPEED,
            lifetime: BULLET_LIFETIME,
        });
        self.shoot_cooldown = self.shoot_interval();
    }

    fn update_hook(&mut self, held: bool, objects: &[LevelObject], ctx: &mut SpawnContext<'_>) {
        let pressed = held && !self.hook_was_held;
        self.hook_was_held = held;
        if !held {
            self.hook = None;
            return;
        }
        if pressed && self.hook.is_none() {
            let latched = self
                .selected
                .and_then(|target| objects.iter().find(|o| o.id == target));
            if let Some(obj) = latched {
                let rest_length = self.position().distance(obj.position());
                log::debug!("Hooked {:?} at rest length {:.1}", obj.id, rest_length);
                self.hook = Some(Hook {
                    target: obj.id,
                    rest_length,
                });
                ctx.events.push(GameEvent::Sound(SoundCue::Hook));
            }
        }

        let Some(hook) = self.hook else {
            return;
        };
        match objects.iter().find(|o| o.id == hook.target && !o.queue_delete) {
            Some(anchor) => self.apply_rope(anchor.position(), hook.rest_length),
            None => self.hook = None,
        }
    }

    /// Taut-rope swing: once the rope is at or past rest length, keep only
    /// the tangential velocity and add a pull back toward rest length.
    fn apply_rope(&mut self, anchor: Vec2, rest_length: f32) {
        let to_anchor = anchor - self.position();
        let distance = to_anchor.length();
        if distance < rest_length || distance <= f32::EPSILON {
            return;
        }
        let normal = to_anchor / distance;
        let tangential = self.velocity - normal * self.velocity.dot(normal);
        let tension = -normal * (distance - rest_length) * HOOK_SPRING;
        self.velocity = tangential - tension + normal;
    }

    fn emit_thrust_puff(&self, ctx: &mut SpawnContext<'_>) {
        let emission = Emission {
            count: 2,
            direction: self.angle + std::f32::consts::PI,
            spread: 20f32.to_radians(),
            speed: 5.0,
            speed_variance: 2.0,
            spin: 0.0,
            spin_variance: 90f32.to_radians(),
            duration: 0.3,
            duration_variance: 0.1,
        };
        let style = EffectStyle::Dots {
            size: 0.3,
            size_variance: 0.1,
            from: [200, 200, 200],
            to: [255, 160, 64],
        };
        let origin = self.position() - self.forward() * PLAYER_RADIUS;
        ctx.effects.push(ParticleEffect::emit(origin, &emission, &style, &mut *ctx.rng));
    }
}
