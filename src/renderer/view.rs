//! World <-> screen projection
//!
//! The camera is centered on `view_position`; one world unit is `scale`
//! pixels. Screen y grows downward, same as world y.

use glam::Vec2;

use crate::sim::geometry::Rect;

#[inline]
pub fn world_to_screen(view_position: Vec2, point: Vec2, scale: f32, screen_size: Vec2) -> Vec2 {
    (point - view_position) * scale + screen_size / 2.0
}

#[inline]
pub fn screen_to_world(view_position: Vec2, point: Vec2, scale: f32, screen_size: Vec2) -> Vec2 {
    (point - screen_size / 2.0) / scale + view_position
}

/// World-space rectangle covered by the screen
pub fn viewport_rect(view_position: Vec2, scale: f32, screen_size: Vec2) -> Rect {
    Rect::centered(view_position, screen_size / scale)
}

/// Camera for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub position: Vec2,
    pub scale: f32,
    pub screen_size: Vec2,
}

impl View {
    pub fn new(position: Vec2, scale: f32, screen_size: Vec2) -> Self {
        Self {
            position,
            scale,
            screen_size,
        }
    }

    #[inline]
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        world_to_screen(self.position, point, self.scale, self.screen_size)
    }

    #[inline]
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        screen_to_world(self.position, point, self.scale, self.screen_size)
    }

    pub fn world_rect(&self) -> Rect {
        viewport_rect(self.position, self.scale, self.screen_size)
    }

    /// Is a world-space box at least partly on screen?
    pub fn is_visible(&self, bounds: &Rect) -> bool {
        self.world_rect().intersects(bounds)
    }
}
