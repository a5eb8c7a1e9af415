//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{TerminalContact, bullet_target, ship_contacts};
use super::modes;
use super::objects::{self, DamageOutcome, SpawnContext};
use super::state::{GameMode, GameState, SoundCue};
use crate::consts::*;
use crate::platform::InputSnapshot;
use crate::settings::ControlScheme;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Absolute heading to face (mouse aim); overrides `rotate`
    pub aim_angle: Option<f32>,
    /// Turn direction, -1 (counter-clockwise) to 1
    pub rotate: f32,
    pub thrust: bool,
    pub brake: bool,
    pub fire: bool,
    /// Grapple held
    pub hook: bool,
    /// Pause toggle
    pub pause: bool,
    /// Pointer in screen pixels, for menus
    pub pointer: Vec2,
    /// Primary button held, for menus
    pub click: bool,
    pub screen_size: Vec2,
}

impl TickInput {
    /// Map raw device state to commands for the chosen control scheme
    pub fn from_snapshot(snapshot: &InputSnapshot, scheme: ControlScheme) -> Self {
        let mut input = TickInput {
            thrust: snapshot.up || snapshot.w,
            brake: snapshot.down || snapshot.s,
            pause: snapshot.pause_pressed,
            pointer: snapshot.mouse_position,
            click: snapshot.mouse_left,
            screen_size: snapshot.screen_size,
            ..Default::default()
        };
        match scheme {
            ControlScheme::Keyboard => {
                input.rotate = snapshot.right as i32 as f32 - snapshot.left as i32 as f32;
                input.fire = snapshot.space;
                input.hook = snapshot.shift;
            }
            ControlScheme::MouseAim => {
                // The camera keeps the ship at the screen center
                let offset = snapshot.mouse_position - snapshot.screen_size / 2.0;
                if offset.length_squared() > f32::EPSILON {
                    input.aim_angle = Some(offset.y.atan2(offset.x));
                }
                input.fire = snapshot.mouse_left || snapshot.space;
                input.hook = snapshot.mouse_right || snapshot.shift;
            }
        }
        input
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        modes::toggle_pause(state);
    }

    state.time_ticks += 1;

    match state.mode {
        GameMode::Menu | GameMode::Upgrade => {
            state.ui.layout(input.screen_size);
            if let Some(action) = state.ui.update(input.pointer, input.click) {
                modes::apply_ui_action(state, action);
            }
        }
        GameMode::Pause => {}
        GameMode::Level => tick_level(state, input, dt),
        GameMode::GameOver => tick_game_over(state, dt),
    }
}

fn tick_level(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut ctx = SpawnContext {
        rng: &mut state.rng,
        effects: &mut state.effects,
        pending: &mut state.pending_spawns,
        events: &mut state.events,
    };

    state.player.update(input, &state.level.objects, dt, &mut ctx);
    let player_position = state.player.position();
    for obj in &mut state.level.objects {
        objects::update(obj, player_position, dt);
    }
    ctx.effects.update(dt);

    // Deletions from the previous tick go first, then this tick's spawns
    state.level.sweep();
    state.level.merge_pending(ctx.pending);

    let mut earned = 0;
    let level_objects = &mut state.level.objects;
    state.player.bullets.retain(|bullet| {
        let Some(index) = bullet_target(&bullet.circle, level_objects) else {
            return true;
        };
        if let DamageOutcome::Destroyed { score } = objects::damage(&mut level_objects[index], &mut ctx) {
            earned += score;
        }
        false
    });
    state.player.score += earned;

    let contacts = ship_contacts(&state.player.circle, &state.level.objects);
    for id in &contacts.coins {
        if let Some(coin) = state.level.objects.iter_mut().find(|o| o.id == *id) {
            coin.queue_delete = true;
        }
        state.player.coins += 1;
        state.play(SoundCue::Coin);
    }

    match contacts.terminal {
        Some(TerminalContact::LevelEnd(_)) => {
            modes::switch_to_upgrade(state);
            return;
        }
        Some(TerminalContact::Hazard(id)) => {
            log::debug!("Ship hit {:?}", id);
            state.player.bullets.clear();
            modes::switch_to_game_over(state);
            return;
        }
        None => {}
    }

    if state.level.outside_corridor(state.player.position()) {
        log::debug!("Ship left the corridor at {:?}", state.player.position());
        modes::switch_to_game_over(state);
    }
}

fn tick_game_over(state: &mut GameState, dt: f32) {
    state.effects.update(dt);
    let Some(sequence) = state.game_over.as_mut() else {
        modes::switch_to_menu(state);
        return;
    };
    let before = sequence.elapsed;
    sequence.elapsed += dt;
    let exploded = before < EXPLOSION_START && sequence.elapsed >= EXPLOSION_START;
    let finished = sequence.finished();
    if exploded {
        state.play(SoundCue::BigExplosion);
    }
    if finished {
        modes::switch_to_menu(state);
    }
}
