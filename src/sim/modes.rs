//! Game mode transitions and the upgrade shop

use super::state::{GameEvent, GameMode, GameOverSequence, GameState, SoundCue};
use crate::sim::player::UpgradeKind;
use crate::ui::{UiAction, WidgetContent};

/// Coins needed to buy the next tier when `level` tiers are owned
pub fn upgrade_cost(level: u32) -> u32 {
    let l = level as f64 + 1.5;
    (2.5 * l * l + 14.375).floor() as u32
}

fn set_mode(state: &mut GameState, mode: GameMode) {
    let from = state.mode;
    log::info!("Mode {:?} -> {:?} (difficulty {})", from, mode, state.level.difficulty);
    state.mode = mode;
    state.events.push(GameEvent::ModeChanged { from, to: mode });
}

pub fn initialize_main_menu(state: &mut GameState) {
    state.ui.clear();
    state.ui.push(
        WidgetContent::Button {
            label: "Start".into(),
        },
        UiAction::Start,
    );
}

pub fn initialize_upgrade_menu(state: &mut GameState) {
    state.ui.clear();
    for kind in UpgradeKind::ALL {
        let level = state.player.upgrades.level(kind);
        state.ui.push(
            WidgetContent::UpgradeBox {
                kind,
                cost: upgrade_cost(level),
                level: level + 1,
            },
            UiAction::Purchase(kind),
        );
    }
    state.ui.push(
        WidgetContent::Button {
            label: "Continue".into(),
        },
        UiAction::Continue,
    );
}

/// Start the next level: fresh path and population, ship back at the origin
pub fn switch_to_level(state: &mut GameState) {
    state.player.reset_position();
    state.effects.clear();
    state.pending_spawns.clear();
    state.level.load_next_level(&mut state.rng);
    state.ui.clear();
    set_mode(state, GameMode::Level);
}

pub fn switch_to_upgrade(state: &mut GameState) {
    state.play(SoundCue::EndLevel);
    initialize_upgrade_menu(state);
    set_mode(state, GameMode::Upgrade);
}

/// Ship lost: wipe progression and run the death sequence
pub fn switch_to_game_over(state: &mut GameState) {
    state.play(SoundCue::Death);
    state.game_over = Some(GameOverSequence::new(state.player.position(), state.player.angle));
    log::info!(
        "Game over at difficulty {} with score {}",
        state.level.difficulty,
        state.player.score
    );
    state.player.reset_to_defaults();
    state.level.reset();
    state.pending_spawns.clear();
    state.ui.clear();
    set_mode(state, GameMode::GameOver);
}

pub fn switch_to_menu(state: &mut GameState) {
    state.game_over = None;
    initialize_main_menu(state);
    set_mode(state, GameMode::Menu);
}

/// Flip between Level and Pause; other modes ignore the request
pub fn toggle_pause(state: &mut GameState) {
    match state.mode {
        GameMode::Level => set_mode(state, GameMode::Pause),
        GameMode::Pause => set_mode(state, GameMode::Level),
        _ => {}
    }
}

/// Buy one tier if the player has strictly more coins than it costs
pub fn purchase(state: &mut GameState, kind: UpgradeKind) -> bool {
    let level = state.player.upgrades.level(kind);
    let cost = upgrade_cost(level);
    if state.player.coins <= cost {
        log::debug!("Cannot afford {:?}: {} coins, cost {}", kind, state.player.coins, cost);
        state.play(SoundCue::Hit);
        return false;
    }
    state.player.coins -= cost;
    state.player.upgrades.increment(kind);
    let new_level = state.player.upgrades.level(kind);
    state.ui.set_upgrade(kind, upgrade_cost(new_level), new_level + 1);
    log::debug!("Purchased {:?} tier {} for {}", kind, new_level, cost);
    state.play(SoundCue::Upgrade);
    true
}

pub fn apply_ui_action(state: &mut GameState, action: UiAction) {
    match action {
        UiAction::Start | UiAction::Continue => {
            state.play(SoundCue::Blip);
            switch_to_level(state);
        }
        UiAction::Purchase(kind) => {
            purchase(state, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    fn sounds(state: &mut GameState) -> Vec<SoundCue> {
        state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Sound(cue) => Some(cue),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_upgrade_cost_table() {
        assert_eq!(upgrade_cost(0), 20);
        assert_eq!(upgrade_cost(1), 30);
        assert_eq!(upgrade_cost(2), 45);
        assert_eq!(upgrade_cost(3), 65);
    }

    proptest! {
        #[test]
        fn upgrade_cost_strictly_increases(level in 0u32..1000) {
            prop_assert!(upgrade_cost(level + 1) > upgrade_cost(level));
        }
    }

    #[test]
    fn test_purchase_requires_strictly_more_coins() {
        let mut state = GameState::new(3, &Settings::default());
        switch_to_upgrade(&mut state);
        state.drain_events();

        state.player.coins = 20;
        assert!(!purchase(&mut state, UpgradeKind::FireRate));
        assert_eq!(state.player.coins, 20);
        assert_eq!(state.player.upgrades.fire_rate, 0);
        assert_eq!(sounds(&mut state), vec![SoundCue::Hit]);

        state.player.coins = 25;
        assert!(purchase(&mut state, UpgradeKind::FireRate));
        assert_eq!(state.player.coins, 5);
        assert_eq!(state.player.upgrades.fire_rate, 1);
        assert_eq!(sounds(&mut state), vec![SoundCue::Upgrade]);

        let fire_box = state
            .ui
            .widgets()
            .iter()
            .find(|w| w.action == UiAction::Purchase(UpgradeKind::FireRate))
            .unwrap();
        assert_eq!(
            fire_box.content,
            WidgetContent::UpgradeBox {
                kind: UpgradeKind::FireRate,
                cost: 30,
                level: 2
            }
        );
    }

    #[test]
    fn test_upgrade_menu_lists_every_upgrade_and_continue() {
        let mut state = GameState::new(4, &Settings::default());
        state.player.upgrades.brakes = 2;
        switch_to_upgrade(&mut state);
        let widgets = state.ui.widgets();
        assert_eq!(widgets.len(), 4);
        assert_eq!(widgets[3].action, UiAction::Continue);
        assert_eq!(
            widgets[1].content,
            WidgetContent::UpgradeBox {
                kind: UpgradeKind::Brakes,
                cost: 45,
                level: 3
            }
        );
    }

    #[test]
    fn test_game_over_wipes_progression() {
        let mut state = GameState::new(5, &Settings::default());
        switch_to_level(&mut state);
        switch_to_level(&mut state);
        assert_eq!(state.level.difficulty, 2);
        state.player.coins = 40;
        state.player.score = 900;
        state.player.upgrades.thrust = 3;

        switch_to_game_over(&mut state);
        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.player.coins, 0);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.upgrades.thrust, 0);
        assert_eq!(state.level.difficulty, 0);
        assert!(state.level.objects.is_empty());
        assert!(state.game_over.is_some());
        assert!(sounds(&mut state).contains(&SoundCue::Death));
    }

    #[test]
    fn test_mode_changes_are_reported() {
        let mut state = GameState::new(6, &Settings::default());
        apply_ui_action(&mut state, UiAction::Start);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::Sound(SoundCue::Blip),
                GameEvent::ModeChanged {
                    from: GameMode::Menu,
                    to: GameMode::Level
                }
            ]
        );

        toggle_pause(&mut state);
        assert_eq!(state.mode, GameMode::Pause);
        toggle_pause(&mut state);
        assert_eq!(state.mode, GameMode::Level);
    }
}
