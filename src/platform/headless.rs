//! Headless platform: in-memory asset catalog and a recording surface
//!
//! Used by the demo binary and by tests; nothing is actually drawn or played.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::{AssetProvider, IMAGES, RenderSurface, SPRITE_SHEETS, Sprite};
use crate::sim::geometry::Rect;
use crate::sim::particles::Color;
use crate::sim::state::SoundCue;

#[derive(Debug, Clone, Default)]
pub struct HeadlessAssets {
    images: HashSet<String>,
    sheets: HashMap<String, usize>,
    sounds: HashSet<String>,
    /// Sounds played so far, in order
    pub played: Vec<String>,
}

impl HeadlessAssets {
    /// Catalog holding everything the game references
    pub fn complete() -> Self {
        Self {
            images: IMAGES.iter().map(|id| id.to_string()).collect(),
            sheets: SPRITE_SHEETS
                .iter()
                .map(|&(id, frames)| (id.to_string(), frames))
                .collect(),
            sounds: SoundCue::ALL.iter().map(|c| c.asset_id().to_string()).collect(),
            played: Vec::new(),
        }
    }

    /// Drop an asset of any type with this id
    pub fn remove(&mut self, id: &str) {
        self.images.remove(id);
        self.sheets.remove(id);
        self.sounds.remove(id);
    }
}

impl AssetProvider for HeadlessAssets {
    fn has_image(&self, id: &str) -> bool {
        self.images.contains(id)
    }

    fn sprite_sheet_len(&self, id: &str) -> Option<usize> {
        self.sheets.get(id).copied()
    }

    fn has_sound(&self, id: &str) -> bool {
        self.sounds.contains(id)
    }

    fn play_sound(&mut self, id: &str) {
        self.played.push(id.to_string());
    }
}

/// Records draw calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    size: Vec2,
    pub sprites: Vec<(Sprite, Vec2)>,
    pub circles: usize,
    pub lines: usize,
    pub rects: usize,
    pub texts: Vec<String>,
}

impl HeadlessSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            sprites: Vec::new(),
            circles: 0,
            lines: 0,
            rects: 0,
            texts: Vec::new(),
        }
    }

    /// Forget recorded calls before the next frame
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.circles = 0;
        self.lines = 0;
        self.rects = 0;
        self.texts.clear();
    }

    pub fn sprite_count(&self, id: &str) -> usize {
        self.sprites.iter().filter(|(s, _)| s.id == id).count()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, _size: f32, _angle: f32) {
        self.sprites.push((sprite, center));
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _alpha: u8) {
        self.circles += 1;
    }

    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {
        self.lines += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color, _alpha: u8) {
        self.rects += 1;
    }

    fn draw_rect_outline(&mut self, _rect: Rect, _color: Color) {
        self.rects += 1;
    }

    fn draw_text(&mut self, text: &str, _position: Vec2, _color: Color) {
        self.texts.push(text.to_string());
    }
}
