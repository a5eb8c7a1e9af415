//! Rendering module
//!
//! Projects the simulation into screen space and issues draw calls against a
//! `RenderSurface`. Nothing here mutates game state.

pub mod draw;
pub mod stars;
pub mod view;

pub use draw::draw_frame;
pub use stars::Starfield;
pub use view::{View, screen_to_world, viewport_rect, world_to_screen};
