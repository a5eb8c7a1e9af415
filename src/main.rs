//! Path Runner entry point
//!
//! Headless native runner: an autopilot plays against the in-memory platform
//! for a few simulated minutes. Run with `RUST_LOG=info` to follow along.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use path_runner::consts::*;
use path_runner::platform::{self, HeadlessAssets, HeadlessSurface, InputSnapshot};
use path_runner::renderer::{Starfield, draw_frame};
use path_runner::sim::{GameEvent, GameMode, GameState, TickInput, tick};
use path_runner::ui::{UiAction, WidgetContent};
use path_runner::{QualityPreset, Settings, wrap_angle};

const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);
const STAR_COUNT: usize = 1000;
const DEMO_SECONDS: f32 = 180.0;
/// Autopilot cruise speed (units/s)
const CRUISE_SPEED: f32 = 12.0;

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Flies toward the next waypoint, shoots everything, buys what it can
#[derive(Debug, Default)]
struct Autopilot {
    pressed: bool,
}

impl Autopilot {
    fn snapshot(&mut self, state: &GameState) -> InputSnapshot {
        let mut snapshot = InputSnapshot {
            screen_size: SCREEN,
            ..Default::default()
        };
        match state.mode {
            GameMode::Menu | GameMode::Upgrade => {
                let coins = state.player.coins;
                let affordable = state.ui.widgets().iter().find(|w| {
                    matches!(w.content, WidgetContent::UpgradeBox { cost, .. } if cost < coins)
                });
                let target = affordable.or_else(|| {
                    state
                        .ui
                        .widgets()
                        .iter()
                        .find(|w| matches!(w.action, UiAction::Start | UiAction::Continue))
                });
                if let Some(widget) = target {
                    let b = widget.bounds;
                    snapshot.mouse_position = Vec2::new(b.x + b.width / 2.0, b.y + b.height / 2.0);
                    // Alternate so every press is a fresh click
                    self.pressed = !self.pressed;
                    snapshot.mouse_left = self.pressed;
                }
            }
            GameMode::Level => {
                let player = &state.player;
                let points = &state.level.path.points;
                let nearest = points
                    .iter()
                    .enumerate()
                    .min_by(|a, b| {
                        a.1.distance_squared(player.position())
                            .partial_cmp(&b.1.distance_squared(player.position()))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(i, _)| i);
                let Some(i) = nearest else {
                    return snapshot;
                };
                let waypoint = points[(i + 1).min(points.len() - 1)];
                let heading = (waypoint - player.position()).normalize_or_zero();
                snapshot.mouse_position = SCREEN / 2.0 + heading * 100.0;

                let turn = wrap_angle(heading.y.atan2(heading.x) - player.angle);
                snapshot.right = turn > 0.05;
                snapshot.left = turn < -0.05;

                let speed_along = player.velocity.dot(heading);
                snapshot.up = speed_along < CRUISE_SPEED;
                snapshot.down = player.velocity.length() > CRUISE_SPEED * 1.2;
                snapshot.space = true;
                snapshot.mouse_left = true;
            }
            GameMode::Pause | GameMode::GameOver => {}
        }
        snapshot
    }
}

fn main() {
    env_logger::init();

    // path-runner [settings.json] [low|medium|high]
    let args: Vec<String> = std::env::args().collect();
    let settings_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let mut settings = Settings::load_or_default(&settings_path);
    if let Some(name) = args.get(2) {
        match QualityPreset::from_name(name) {
            Some(quality) => settings.quality = quality,
            None => log::warn!("Unknown quality preset '{name}', keeping {}", settings.quality.as_str()),
        }
    }

    let mut assets = HeadlessAssets::complete();
    if let Err(e) = platform::verify_assets(&assets) {
        log::error!("Startup failed: {e}");
        std::process::exit(1);
    }

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Path Runner (headless) starting with seed {seed}, quality {}",
        settings.quality.as_str()
    );

    let mut state = GameState::new(seed, &settings);
    let stars = Starfield::new(seed, STAR_COUNT, SCREEN);
    let mut surface = HeadlessSurface::new(SCREEN.x, SCREEN.y);
    let mut pilot = Autopilot::default();

    let mut levels_cleared = 0u32;
    let mut deaths = 0u32;
    let mut best_difficulty = 0u32;

    let ticks = (DEMO_SECONDS / SIM_DT) as u64;
    for _ in 0..ticks {
        let snapshot = pilot.snapshot(&state);
        let input = TickInput::from_snapshot(&snapshot, settings.control_scheme);
        tick(&mut state, &input, SIM_DT);

        let events = state.drain_events();
        platform::play_events(&events, &mut assets);
        for event in &events {
            match event {
                GameEvent::ModeChanged { to: GameMode::Upgrade, .. } => levels_cleared += 1,
                GameEvent::ModeChanged { to: GameMode::GameOver, .. } => deaths += 1,
                _ => {}
            }
        }
        best_difficulty = best_difficulty.max(state.level.difficulty);

        surface.clear();
        draw_frame(&state, &settings, &stars, &mut surface);
    }

    log::info!(
        "Demo finished after {:.0}s: {} levels cleared, {} deaths, best difficulty {}, {} sounds played",
        DEMO_SECONDS,
        levels_cleared,
        deaths,
        best_difficulty,
        assets.played.len()
    );
}
