//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of level objects)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod level;
pub mod modes;
pub mod objects;
pub mod particles;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{ShipContacts, TerminalContact, raycast_circle, select_hook_target};
pub use entity::{Animation, EnemyKind, Health, LevelObject, ObjectId, ObjectKind};
pub use geometry::{CollisionCircle, Rect};
pub use level::{LevelManager, LevelPath, generate_level, generate_path};
pub use modes::upgrade_cost;
pub use objects::{DamageOutcome, SpawnContext};
pub use particles::{ParticleEffect, ParticleEffects};
pub use player::{Bullet, Hook, Player, UpgradeKind, Upgrades};
pub use state::{GameEvent, GameMode, GameOverSequence, GameState, SoundCue};
pub use tick::{TickInput, tick};
