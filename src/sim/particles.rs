//! Burst particle effects (explosions, thrust puffs)
//!
//! An effect emits all of its particles at once; particles then fly
//! ballistically until their lifetime runs out. Purely visual.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use crate::polar_to_cartesian;

/// Number of frames in the `fragments` sprite sheet
pub const FRAGMENT_FRAMES: usize = 4;

/// RGB color
pub type Color = [u8; 3];

/// Linear blend between two colors, `t` in [0, 1]
pub fn interpolate_color(from: Color, to: Color, t: f32) -> Color {
    debug_assert!((0.0..=1.0).contains(&t), "interpolation factor {t} out of range");
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    [lerp(from[0], to[0]), lerp(from[1], to[1]), lerp(from[2], to[2])]
}

/// How a particle looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleVisual {
    /// A frame of the `fragments` sprite sheet
    Fragment { frame: usize },
    /// A filled dot, `size` in world units
    Dot { size: f32, color: Color },
}

/// Emission parameters for one burst. Angles in radians.
#[derive(Debug, Clone, Copy)]
pub struct Emission {
    pub count: usize,
    /// Central emission direction
    pub direction: f32,
    /// Half-width of the emission cone
    pub spread: f32,
    pub speed: f32,
    pub speed_variance: f32,
    pub spin: f32,
    pub spin_variance: f32,
    pub duration: f32,
    pub duration_variance: f32,
}

/// Visual style for every particle of a burst
#[derive(Debug, Clone, Copy)]
pub enum EffectStyle {
    /// Random sprite-sheet fragments
    Fragments,
    /// Dots with size jitter and a random color between two endpoints
    Dots { size: f32, size_variance: f32, from: Color, to: Color },
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub angular_velocity: f32,
    pub lifetime: f32,
    pub visual: ParticleVisual,
}

impl Particle {
    /// Advance one step; returns false once expired
    fn update(&mut self, dt: f32) -> bool {
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
        self.lifetime -= dt;
        self.lifetime > 0.0
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, value: f32, variance: f32) -> f32 {
    if variance > 0.0 {
        value + rng.random_range(-variance..=variance)
    } else {
        value
    }
}

/// Particles from a single burst
#[derive(Debug, Clone)]
pub struct ParticleEffect {
    pub particles: Vec<Particle>,
}

impl ParticleEffect {
    pub fn emit<R: Rng + ?Sized>(
        position: Vec2,
        emission: &Emission,
        style: &EffectStyle,
        rng: &mut R,
    ) -> Self {
        let particles = (0..emission.count)
            .map(|_| {
                let direction = jitter(rng, emission.direction, emission.spread);
                let speed = jitter(rng, emission.speed, emission.speed_variance);
                let visual = match *style {
                    EffectStyle::Fragments => ParticleVisual::Fragment {
                        frame: rng.random_range(0..FRAGMENT_FRAMES),
                    },
                    EffectStyle::Dots { size, size_variance, from, to } => ParticleVisual::Dot {
                        size: jitter(rng, size, size_variance).max(0.0),
                        color: interpolate_color(from, to, rng.random_range(0.0..=1.0)),
                    },
                };
                Particle {
                    position,
                    velocity: polar_to_cartesian(speed, direction),
                    angle: 0.0,
                    angular_velocity: jitter(rng, emission.spin, emission.spin_variance),
                    lifetime: jitter(rng, emission.duration, emission.duration_variance),
                    visual,
                }
            })
            .collect();
        Self { particles }
    }

    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.update(dt));
    }

    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }
}

/// All live effects, capped by the quality setting
#[derive(Debug, Clone)]
pub struct ParticleEffects {
    effects: VecDeque<ParticleEffect>,
    cap: usize,
}

impl ParticleEffects {
    pub fn new(cap: usize) -> Self {
        Self {
            effects: VecDeque::new(),
            cap,
        }
    }

    /// Add an effect, dropping the oldest ones if over the cap
    pub fn push(&mut self, effect: ParticleEffect) {
        if self.cap == 0 {
            return;
        }
        while self.effects.len() >= self.cap {
            self.effects.pop_front();
        }
        self.effects.push_back(effect);
    }

    /// Step all particles and prune effects with nothing left alive
    pub fn update(&mut self, dt: f32) {
        for effect in &mut self.effects {
            effect.update(dt);
        }
        self.effects.retain(|e| !e.is_finished());
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleEffect> {
        self.effects.iter()
    }
}
