//! Frame draw pass
//!
//! Reads a settled `GameState` (after the tick) and turns it into
//! `RenderSurface` calls. Every world position goes through `View`.

use glam::Vec2;

use super::stars::Starfield;
use super::view::View;
use crate::consts::*;
use crate::platform::{RenderSurface, Sprite};
use crate::settings::Settings;
use crate::sim::entity::{EnemyKind, LevelObject, ObjectId, ObjectKind};
use crate::sim::particles::{Color, ParticleEffects, ParticleVisual};
use crate::sim::player::UpgradeKind;
use crate::sim::state::{GameMode, GameState};
use crate::ui::{ICON_SIZE, UiHandler, WidgetContent};

const WHITE: Color = [255, 255, 255];
const PATH_COLOR: Color = [0, 255, 0];
const HOOK_COLOR: Color = [180, 180, 180];
const BULLET_COLOR: Color = [255, 240, 120];
const BOX_ALPHA: u8 = 64;
/// Max shake displacement in pixels
const SHAKE_PIXELS: f32 = 3.0;
/// Fragment sprites are this many world units across
const FRAGMENT_SIZE: f32 = 1.0;

/// Sprite for a level object in its current animation frame
pub fn object_sprite(obj: &LevelObject) -> Sprite {
    let frame = obj.animation.as_ref().map_or(0, |a| a.frame);
    match obj.kind {
        ObjectKind::Asteroid { coin_bearing: false } => Sprite::image("asteroid"),
        ObjectKind::Asteroid { coin_bearing: true } => Sprite::image("coin_asteroid"),
        ObjectKind::Coin { .. } => Sprite::frame("coin", frame),
        ObjectKind::Enemy(EnemyKind::Orbiter) => Sprite::image("orbiter"),
        ObjectKind::Enemy(EnemyKind::SmartOrbiter) => Sprite::image("smart_orbiter"),
        ObjectKind::Enemy(EnemyKind::LongRangeOrbiter) => Sprite::image("long_range_orbiter"),
        ObjectKind::LevelEnd => Sprite::frame("level_end_ss", frame),
    }
}

/// Cosmetic jitter for a shaking object, stable within a tick
pub fn shake_offset(id: ObjectId, time_ticks: u64) -> Vec2 {
    let hash = id
        .0
        .wrapping_mul(2654435761)
        .wrapping_add(time_ticks as u32)
        .wrapping_mul(7919);
    let x = (hash % 1000) as f32 / 1000.0 * 2.0 - 1.0;
    let y = ((hash >> 10) % 1000) as f32 / 1000.0 * 2.0 - 1.0;
    Vec2::new(x, y) * SHAKE_PIXELS
}

/// Draw one complete frame
pub fn draw_frame<S: RenderSurface + ?Sized>(
    state: &GameState,
    settings: &Settings,
    stars: &Starfield,
    surface: &mut S,
) {
    let screen = surface.size();
    match state.mode {
        GameMode::Menu => {
            stars.draw(surface, Vec2::ZERO);
            draw_widgets(&state.ui, surface);
        }
        GameMode::Upgrade => {
            stars.draw(surface, Vec2::ZERO);
            draw_widgets(&state.ui, surface);
            surface.draw_text(
                &format!("Coins: {}", state.player.coins),
                Vec2::new(10.0, screen.y - 30.0),
                WHITE,
            );
        }
        GameMode::Level | GameMode::Pause => {
            let view = View::new(state.player.position(), RENDER_SCALE, screen);
            stars.draw(surface, view.position * RENDER_SCALE);
            draw_level(state, settings, &view, surface);
            draw_effects(&state.effects, &view, surface);
            draw_player(state, &view, surface);
            draw_hud(state, surface);
            if state.mode == GameMode::Pause {
                surface.draw_text("PAUSED", screen / 2.0, WHITE);
            }
        }
        GameMode::GameOver => {
            let Some(sequence) = &state.game_over else {
                return;
            };
            let view = View::new(sequence.position, RENDER_SCALE, screen);
            stars.draw(surface, view.position * RENDER_SCALE);
            draw_effects(&state.effects, &view, surface);
            let center = view.to_screen(sequence.position);
            let ship_size = PLAYER_RADIUS * 2.0 * RENDER_SCALE;
            if sequence.ship_visible() {
                surface.draw_sprite(Sprite::image("player"), center, ship_size, sequence.angle);
            }
            if let Some(frame) = sequence.explosion_frame() {
                surface.draw_sprite(Sprite::frame("explosion", frame), center, ship_size * 4.0, 0.0);
            }
            if sequence.text_visible() {
                surface.draw_text("GAME OVER", screen / 2.0, WHITE);
            }
        }
    }
}

fn draw_level<S: RenderSurface + ?Sized>(state: &GameState, settings: &Settings, view: &View, surface: &mut S) {
    if settings.show_path {
        for (a, b) in state.level.path.segments() {
            surface.draw_line(view.to_screen(a), view.to_screen(b), PATH_COLOR);
        }
        for &p in &state.level.path.points {
            surface.draw_circle(view.to_screen(p), 3.0, PATH_COLOR, 255);
        }
    }

    for obj in state.level.objects.iter().filter(|o| !o.queue_delete) {
        if !view.is_visible(&obj.bounding_box()) {
            continue;
        }
        let mut center = view.to_screen(obj.position());
        if settings.screen_shake && obj.is_shaking() {
            center += shake_offset(obj.id, state.time_ticks);
        }
        surface.draw_sprite(object_sprite(obj), center, obj.visual_size(), obj.angle);
    }

    if let Some(selected) = state.player.selected.and_then(|id| state.level.get(id)) {
        surface.draw_sprite(
            Sprite::image("selection"),
            view.to_screen(selected.position()),
            selected.visual_size() * 1.2,
            0.0,
        );
    }
    if let Some(anchor) = state.player.hook.and_then(|h| state.level.get(h.target)) {
        surface.draw_line(
            view.to_screen(state.player.position()),
            view.to_screen(anchor.position()),
            HOOK_COLOR,
        );
    }
    for bullet in &state.player.bullets {
        if view.is_visible(&bullet.circle.bounding_box()) {
            surface.draw_circle(
                view.to_screen(bullet.circle.position),
                bullet.circle.radius * RENDER_SCALE,
                BULLET_COLOR,
                255,
            );
        }
    }
}

fn draw_effects<S: RenderSurface + ?Sized>(effects: &ParticleEffects, view: &View, surface: &mut S) {
    for particle in effects.iter().flat_map(|e| e.particles.iter()) {
        let center = view.to_screen(particle.position);
        match particle.visual {
            ParticleVisual::Fragment { frame } => surface.draw_sprite(
                Sprite::frame("fragments", frame),
                center,
                FRAGMENT_SIZE * RENDER_SCALE,
                particle.angle,
            ),
            ParticleVisual::Dot { size, color } => surface.draw_circle(center, size * RENDER_SCALE, color, 255),
        }
    }
}

fn draw_player<S: RenderSurface + ?Sized>(state: &GameState, view: &View, surface: &mut S) {
    let player = &state.player;
    let sprite = if player.thrusting {
        Sprite::image("player_thrust")
    } else {
        Sprite::image("player")
    };
    surface.draw_sprite(
        sprite,
        view.to_screen(player.position()),
        PLAYER_RADIUS * 2.0 * RENDER_SCALE,
        player.angle,
    );
}

fn draw_hud<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let lines = [
        format!("Coins: {}", state.player.coins),
        format!("Score: {}", state.player.score),
        format!("Level: {}", state.level.difficulty),
    ];
    for (i, line) in lines.iter().enumerate() {
        surface.draw_text(line, Vec2::new(10.0, 10.0 + i as f32 * 20.0), WHITE);
    }
}

fn draw_widgets<S: RenderSurface + ?Sized>(ui: &UiHandler, surface: &mut S) {
    for widget in ui.widgets() {
        let bounds = widget.bounds;
        let origin = Vec2::new(bounds.x, bounds.y);
        surface.fill_rect(bounds, [0, 0, 0], BOX_ALPHA);
        let text_x = match widget.content {
            WidgetContent::UpgradeBox { kind, .. } => {
                let icon = match kind {
                    UpgradeKind::FireRate => "fire_rate_icon",
                    UpgradeKind::Brakes => "brakes_icon",
                    UpgradeKind::Thrust => "thrust_icon",
                };
                surface.draw_sprite(
                    Sprite::image(icon),
                    origin + Vec2::splat(5.0 + ICON_SIZE / 2.0),
                    ICON_SIZE,
                    0.0,
                );
                ICON_SIZE + 10.0
            }
            WidgetContent::Button { .. } => 10.0,
        };
        for (i, line) in widget.lines().iter().enumerate() {
            surface.draw_text(line, origin + Vec2::new(text_x, 5.0 + i as f32 * 20.0), WHITE);
        }
        if widget.hovered {
            surface.draw_rect_outline(bounds, WHITE);
        }
    }
}
