//! Ray and circle queries
//!
//! Target acquisition for the grappling hook plus the per-tick contact
//! checks between the ship, its bullets and level objects.

use glam::Vec2;

use super::entity::{LevelObject, ObjectId, ObjectKind};
use super::geometry::CollisionCircle;

/// Cast a ray against a circle.
///
/// Projects the circle center onto the ray; a hit needs a positive
/// projection and a perpendicular miss distance below the radius. Returns the
/// projection length along `direction` (which must be unit length).
pub fn raycast_circle(origin: Vec2, direction: Vec2, circle: &CollisionCircle) -> Option<f32> {
    debug_assert!((direction.length() - 1.0).abs() < 1e-3, "ray direction must be normalized");
    let to_center = circle.position - origin;
    let along = to_center.dot(direction);
    if along <= 0.0 {
        return None;
    }
    let perpendicular = (to_center - direction * along).length();
    (perpendicular < circle.radius).then_some(along)
}

/// Nearest asteroid hit by the ray within `max_distance`
pub fn select_hook_target(
    origin: Vec2,
    direction: Vec2,
    objects: &[LevelObject],
    max_distance: f32,
) -> Option<ObjectId> {
    objects
        .iter()
        .filter(|o| !o.queue_delete && matches!(o.kind, ObjectKind::Asteroid { .. }))
        .filter_map(|o| raycast_circle(origin, direction, &o.circle).map(|t| (o.id, t)))
        .filter(|&(_, t)| t <= max_distance)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(id, _)| id)
}

/// What the ship ran into this tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShipContacts {
    /// Coins touched, in iteration order
    pub coins: Vec<ObjectId>,
    /// First terminal contact, if any
    pub terminal: Option<TerminalContact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalContact {
    LevelEnd(ObjectId),
    Hazard(ObjectId),
}

/// Walk objects in order. Coins accumulate; the first level end or hazard
/// stops the walk.
pub fn ship_contacts(ship: &CollisionCircle, objects: &[LevelObject]) -> ShipContacts {
    let mut contacts = ShipContacts::default();
    for obj in objects.iter().filter(|o| !o.queue_delete) {
        if !ship.hits(&obj.circle) {
            continue;
        }
        match obj.kind {
            ObjectKind::Coin { .. } => contacts.coins.push(obj.id),
            ObjectKind::LevelEnd => {
                contacts.terminal = Some(TerminalContact::LevelEnd(obj.id));
                break;
            }
            ObjectKind::Asteroid { .. } | ObjectKind::Enemy(_) => {
                contacts.terminal = Some(TerminalContact::Hazard(obj.id));
                break;
            }
        }
    }
    contacts
}

/// Index of the first damageable object the bullet overlaps
pub fn bullet_target(bullet: &CollisionCircle, objects: &[LevelObject]) -> Option<usize> {
    objects
        .iter()
        .position(|o| !o.queue_delete && o.is_damageable() && bullet.hits(&o.circle))
}
