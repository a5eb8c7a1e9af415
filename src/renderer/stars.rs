//! Parallax starfield behind the level

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::RenderSurface;
use crate::sim::particles::{Color, interpolate_color};

/// Stars scroll at this fraction of the camera motion
pub const PARALLAX: f32 = 0.5;
/// Stars are placed in a field this much larger than the screen on each side
const PADDING: f32 = 1000.0;
/// Stars wrap within the screen plus this margin on each side
const WRAP_MARGIN: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Generate `count` stars for a screen of `screen_size` pixels. Uses its
    /// own generator so the simulation stream is untouched.
    pub fn new(seed: u64, count: usize, screen_size: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed_57a2);
        let stars = (0..count)
            .map(|_| Star {
                position: Vec2::new(
                    rng.random_range(-PADDING..screen_size.x + PADDING),
                    rng.random_range(-PADDING..screen_size.y + PADDING),
                ),
                radius: rng.random_range(1..=2) as f32,
                color: interpolate_color([64, 64, 64], [128, 128, 128], rng.random_range(0.0..=1.0)),
            })
            .collect();
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Screen position of a star for a camera at `camera` (pixels)
    pub fn project(star: &Star, camera: Vec2, screen_size: Vec2) -> Vec2 {
        let shifted = star.position - camera * PARALLAX;
        let span = screen_size + Vec2::splat(WRAP_MARGIN * 2.0);
        Vec2::new(
            shifted.x.rem_euclid(span.x) - WRAP_MARGIN,
            shifted.y.rem_euclid(span.y) - WRAP_MARGIN,
        )
    }

    /// `camera` is the view position already converted to pixels
    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S, camera: Vec2) {
        let size = surface.size();
        for star in &self.stars {
            let p = Self::project(star, camera, size);
            if p.x >= 0.0 && p.x <= size.x && p.y >= 0.0 && p.y <= size.y {
                surface.draw_circle(p, star.radius, star.color, 255);
            }
        }
    }
}
