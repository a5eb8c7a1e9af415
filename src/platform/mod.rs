//! Platform abstraction layer
//!
//! The simulation never talks to a window, a mixer or a file system. Hosts
//! implement these traits:
//! - `AssetProvider` for images, sprite sheets and sounds
//! - `RenderSurface` for drawing a frame
//!
//! and hand the simulation an `InputSnapshot` each frame.

pub mod headless;

use glam::Vec2;

use crate::error::{Error, Result};
use crate::sim::geometry::Rect;
use crate::sim::particles::Color;
use crate::sim::state::{GameEvent, SoundCue};

pub use headless::{HeadlessAssets, HeadlessSurface};

/// Raw device state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub w: bool,
    pub s: bool,
    pub space: bool,
    pub shift: bool,
    /// Pause key went down this frame
    pub pause_pressed: bool,
    pub mouse_position: Vec2,
    pub mouse_left: bool,
    pub mouse_right: bool,
    pub screen_size: Vec2,
}

/// Single images
pub const IMAGES: &[&str] = &[
    "player",
    "player_thrust",
    "asteroid",
    "coin_asteroid",
    "orbiter",
    "smart_orbiter",
    "long_range_orbiter",
    "fire_rate_icon",
    "brakes_icon",
    "thrust_icon",
    "selection",
];

/// Sprite sheets with their frame counts
pub const SPRITE_SHEETS: &[(&str, usize)] = &[
    ("fragments", crate::sim::particles::FRAGMENT_FRAMES),
    ("coin", crate::consts::COIN_FRAMES),
    ("level_end_ss", crate::consts::LEVEL_END_FRAMES),
    ("explosion", crate::consts::EXPLOSION_FRAMES),
];

/// Read-only access to loaded assets plus sound playback
pub trait AssetProvider {
    fn has_image(&self, id: &str) -> bool;
    /// Number of frames in a sprite sheet, `None` if it isn't loaded
    fn sprite_sheet_len(&self, id: &str) -> Option<usize>;
    fn has_sound(&self, id: &str) -> bool;
    fn play_sound(&mut self, id: &str);
}

/// Check every asset the game references is present. Run once at startup;
/// after this the game assumes lookups never fail.
pub fn verify_assets<A: AssetProvider + ?Sized>(assets: &A) -> Result<()> {
    for &id in IMAGES {
        if !assets.has_image(id) {
            return Err(Error::MissingAsset { id });
        }
    }
    for &(id, frames) in SPRITE_SHEETS {
        match assets.sprite_sheet_len(id) {
            Some(len) if len >= frames => {}
            _ => return Err(Error::MissingAsset { id }),
        }
    }
    for cue in SoundCue::ALL {
        let id = cue.asset_id();
        if !assets.has_sound(id) {
            return Err(Error::MissingAsset { id });
        }
    }
    log::info!(
        "Verified {} images, {} sprite sheets, {} sounds",
        IMAGES.len(),
        SPRITE_SHEETS.len(),
        SoundCue::ALL.len()
    );
    Ok(())
}

/// Play the sound of every sound event
pub fn play_events<A: AssetProvider + ?Sized>(events: &[GameEvent], assets: &mut A) {
    for event in events {
        if let GameEvent::Sound(cue) = event {
            assets.play_sound(cue.asset_id());
        }
    }
}

/// Image or sprite sheet frame to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub id: &'static str,
    pub frame: usize,
}

impl Sprite {
    pub const fn image(id: &'static str) -> Self {
        Self { id, frame: 0 }
    }

    pub const fn frame(id: &'static str, frame: usize) -> Self {
        Self { id, frame }
    }
}

/// Screen-space drawing target (pixels, origin top-left)
pub trait RenderSurface {
    fn size(&self) -> Vec2;
    /// Draw `sprite` scaled to `size` pixels, centered and rotated by `angle`
    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, size: f32, angle: f32);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: u8);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: u8);
    fn draw_rect_outline(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_assets_accepts_complete_set() {
        let assets = HeadlessAssets::complete();
        assert!(verify_assets(&assets).is_ok());
    }

    #[test]
    fn test_verify_assets_names_missing_asset() {
        let mut assets = HeadlessAssets::complete();
        assets.remove("coin");
        match verify_assets(&assets) {
            Err(Error::MissingAsset { id }) => assert_eq!(id, "coin"),
            other => panic!("expected missing coin, got {other:?}"),
        }
    }

    #[test]
    fn test_play_events_only_plays_sounds() {
        let mut assets = HeadlessAssets::complete();
        let events = [
            GameEvent::Sound(SoundCue::Coin),
            GameEvent::ModeChanged {
                from: crate::sim::GameMode::Menu,
                to: crate::sim::GameMode::Level,
            },
            GameEvent::Sound(SoundCue::Shoot),
        ];
        play_events(&events, &mut assets);
        assert_eq!(assets.played, vec!["coin".to_string(), "shoot".to_string()]);
    }
}
