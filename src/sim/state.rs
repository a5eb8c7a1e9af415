//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: everything that changes
//! from tick to tick lives here and is passed explicitly to the systems.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::LevelObject;
use super::level::LevelManager;
use super::particles::ParticleEffects;
use super::player::Player;
use crate::consts::*;
use crate::settings::Settings;
use crate::ui::UiHandler;

/// Current game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen with the start button
    Menu,
    /// Level frozen; nothing advances
    Pause,
    /// Active flight along the path
    Level,
    /// Between-level shop
    Upgrade,
    /// Timed death sequence, then back to the menu
    GameOver,
}

/// Named sound effects; the host maps them to audio assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shoot,
    Hit,
    Explosion,
    Coin,
    Hook,
    Blip,
    Death,
    /// Ship explosion in the game over sequence
    BigExplosion,
    Upgrade,
    EndLevel,
}

impl SoundCue {
    pub const ALL: [SoundCue; 10] = [
        SoundCue::Shoot,
        SoundCue::Hit,
        SoundCue::Explosion,
        SoundCue::Coin,
        SoundCue::Hook,
        SoundCue::Blip,
        SoundCue::Death,
        SoundCue::BigExplosion,
        SoundCue::Upgrade,
        SoundCue::EndLevel,
    ];

    /// Asset identifier of the sound
    pub fn asset_id(self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Hit => "hit",
            SoundCue::Explosion => "explosion",
            SoundCue::Coin => "coin",
            SoundCue::Hook => "hook",
            SoundCue::Blip => "blip",
            SoundCue::Death => "death",
            SoundCue::BigExplosion => "deltarune_explosion",
            SoundCue::Upgrade => "upgrade",
            SoundCue::EndLevel => "end_level",
        }
    }
}

/// Things the host should react to after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    ModeChanged { from: GameMode, to: GameMode },
}

/// Timeline of the death animation
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverSequence {
    /// Seconds since death
    pub elapsed: f32,
    /// Where the ship died; the camera stays here
    pub position: Vec2,
    pub angle: f32,
}

impl GameOverSequence {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self {
            elapsed: 0.0,
            position,
            angle,
        }
    }

    pub fn ship_visible(&self) -> bool {
        self.elapsed < SHIP_HIDE_TIME
    }

    pub fn text_visible(&self) -> bool {
        self.elapsed >= GAME_OVER_TEXT_TIME
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= RETURN_TO_MENU_TIME
    }

    /// Explosion sprite frame, while the explosion is playing
    pub fn explosion_frame(&self) -> Option<usize> {
        if !(EXPLOSION_START..EXPLOSION_END).contains(&self.elapsed) {
            return None;
        }
        let progress = (self.elapsed - EXPLOSION_START) / (EXPLOSION_END - EXPLOSION_START);
        Some(((progress * EXPLOSION_FRAMES as f32) as usize).min(EXPLOSION_FRAMES - 1))
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: GameMode,
    pub player: Player,
    pub level: LevelManager,
    /// Objects spawned mid-tick, merged after the deletion sweep
    pub pending_spawns: Vec<LevelObject>,
    /// Visual particles (not gameplay-affecting)
    pub effects: ParticleEffects,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    pub ui: UiHandler,
    pub game_over: Option<GameOverSequence>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game at the main menu
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Menu,
            player: Player::new(),
            level: LevelManager::new(),
            pending_spawns: Vec::new(),
            effects: ParticleEffects::new(settings.max_particle_effects()),
            events: Vec::new(),
            ui: UiHandler::default(),
            game_over: None,
            time_ticks: 0,
        };
        super::modes::initialize_main_menu(&mut state);
        state
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn play(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_at_menu() {
        let state = GameState::new(1, &Settings::default());
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.level.difficulty, 0);
        assert!(!state.ui.widgets().is_empty());
    }

    #[test]
    fn test_game_over_timeline() {
        let mut seq = GameOverSequence::new(Vec2::ZERO, 0.0);
        assert!(seq.ship_visible() && !seq.text_visible());
        assert_eq!(seq.explosion_frame(), None);

        seq.elapsed = 1.0;
        assert_eq!(seq.explosion_frame(), Some(0));
        seq.elapsed = 2.79;
        assert_eq!(seq.explosion_frame(), Some(EXPLOSION_FRAMES - 1));
        seq.elapsed = 2.0;
        assert!(!seq.ship_visible());
        seq.elapsed = 2.8;
        assert_eq!(seq.explosion_frame(), None);
        seq.elapsed = 4.0;
        assert!(seq.text_visible() && !seq.finished());
        seq.elapsed = 8.0;
        assert!(seq.finished());
    }

    #[test]
    fn test_sound_ids_are_unique() {
        let mut ids: Vec<&str> = SoundCue::ALL.iter().map(|c| c.asset_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SoundCue::ALL.len());
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(2, &Settings::default());
        state.play(SoundCue::Blip);
        assert_eq!(state.drain_events(), vec![GameEvent::Sound(SoundCue::Blip)]);
        assert!(state.events.is_empty());
    }
}
