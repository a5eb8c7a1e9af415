//! Menu widgets
//!
//! The simulation fills the handler with widgets (a label or an upgrade
//! summary plus the action a click should trigger); the handler owns layout,
//! hover state and click detection.

use glam::Vec2;

use crate::sim::geometry::Rect;
use crate::sim::player::UpgradeKind;

/// Pixel size of upgrade icons inside a box
pub const ICON_SIZE: f32 = 64.0;
const VERTICAL_PADDING: f32 = 10.0;
const TOP_MARGIN: f32 = 30.0;
const MIN_BOX_WIDTH: f32 = 400.0;
const MIN_BOX_HEIGHT: f32 = 80.0;

/// What a widget does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Start,
    Continue,
    Purchase(UpgradeKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetContent {
    Button {
        label: String,
    },
    UpgradeBox {
        kind: UpgradeKind,
        cost: u32,
        /// Displayed level, one above the owned tier
        level: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub content: WidgetContent,
    pub action: UiAction,
    /// Screen-space bounds from the last layout
    pub bounds: Rect,
    pub hovered: bool,
}

impl Widget {
    /// Text lines drawn inside the widget
    pub fn lines(&self) -> Vec<String> {
        match &self.content {
            WidgetContent::Button { label } => vec![label.clone()],
            WidgetContent::UpgradeBox { kind, cost, level } => vec![
                kind.title().to_string(),
                format!("Cost: {cost} coins"),
                format!("Current Level: {level}"),
            ],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiHandler {
    widgets: Vec<Widget>,
    was_pressed: bool,
}

impl UiHandler {
    pub fn clear(&mut self) {
        self.widgets.clear();
    }

    pub fn push(&mut self, content: WidgetContent, action: UiAction) {
        self.widgets.push(Widget {
            content,
            action,
            bounds: Rect::default(),
            hovered: false,
        });
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Refresh the display data of an upgrade box after a purchase
    pub fn set_upgrade(&mut self, kind: UpgradeKind, new_cost: u32, new_level: u32) {
        for widget in &mut self.widgets {
            if let WidgetContent::UpgradeBox { kind: k, cost, level } = &mut widget.content {
                if *k == kind {
                    *cost = new_cost;
                    *level = new_level;
                }
            }
        }
    }

    /// Stack widgets in a centered column
    pub fn layout(&mut self, screen_size: Vec2) {
        if self.widgets.is_empty() {
            return;
        }
        let width = (screen_size.x / 4.0).max(MIN_BOX_WIDTH);
        let height = (screen_size.y / 2.0 / self.widgets.len() as f32).max(MIN_BOX_HEIGHT);
        let x = screen_size.x / 2.0 - width / 2.0;
        for (i, widget) in self.widgets.iter_mut().enumerate() {
            let y = i as f32 * (height + VERTICAL_PADDING) + TOP_MARGIN;
            widget.bounds = Rect::new(x, y, width, height);
        }
    }

    /// Update hover state; returns the action of the hovered widget on the
    /// frame the button goes down.
    pub fn update(&mut self, pointer: Vec2, pressed: bool) -> Option<UiAction> {
        let mut hovered_action = None;
        for widget in &mut self.widgets {
            widget.hovered = widget.bounds.contains_point(pointer);
            if widget.hovered && hovered_action.is_none() {
                hovered_action = Some(widget.action);
            }
        }
        let clicked = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        if clicked { hovered_action } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> UiHandler {
        let mut ui = UiHandler::default();
        ui.push(
            WidgetContent::Button {
                label: "Start".into(),
            },
            UiAction::Start,
        );
        ui.push(
            WidgetContent::UpgradeBox {
                kind: UpgradeKind::Brakes,
                cost: 20,
                level: 1,
            },
            UiAction::Purchase(UpgradeKind::Brakes),
        );
        ui.layout(Vec2::new(1280.0, 720.0));
        ui
    }

    #[test]
    fn test_layout_is_centered_column() {
        let ui = menu();
        let a = ui.widgets()[0].bounds;
        let b = ui.widgets()[1].bounds;
        assert_eq!(a.width, 400.0);
        assert_eq!(a.x, 440.0);
        assert_eq!(a.y, 30.0);
        assert_eq!(a.height, 180.0);
        assert_eq!(b.y, 30.0 + 190.0);
    }

    #[test]
    fn test_click_fires_on_rising_edge_only() {
        let mut ui = menu();
        let inside = Vec2::new(640.0, 100.0);
        assert_eq!(ui.update(inside, false), None);
        assert!(ui.widgets()[0].hovered);
        assert_eq!(ui.update(inside, true), Some(UiAction::Start));
        assert_eq!(ui.update(inside, true), None);
        assert_eq!(ui.update(inside, false), None);
        assert_eq!(ui.update(Vec2::new(5.0, 5.0), true), None);
    }

    #[test]
    fn test_set_upgrade_updates_box() {
        let mut ui = menu();
        ui.set_upgrade(UpgradeKind::Brakes, 30, 2);
        assert_eq!(
            ui.widgets()[1].lines(),
            vec!["Brakes".to_string(), "Cost: 30 coins".into(), "Current Level: 2".into()]
        );
    }
}
