//! Procedural level generation and the level object collection
//!
//! A level is a meandering polyline from the origin to a random endpoint
//! 350-450 units away, with hazards scattered in a corridor around each
//! segment. Difficulty tightens the corridor and thickens the population.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{EnemyKind, LevelObject, ObjectId};
use super::geometry::distance_to_segment;
use super::objects;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Waypoints from the origin to the level end, immutable once generated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelPath {
    pub points: Vec<Vec2>,
}

impl LevelPath {
    pub fn start(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Shortest distance from `point` to any segment (infinite for an empty path)
    pub fn distance_to(&self, point: Vec2) -> f32 {
        match self.points.as_slice() {
            [] => f32::INFINITY,
            [only] => point.distance(*only),
            _ => self
                .segments()
                .map(|(a, b)| distance_to_segment(point, a, b))
                .fold(f32::INFINITY, f32::min),
        }
    }
}

/// Walk from `start` toward `end` in `amount_points` jittered steps, then
/// append `end`. Angle variance is in degrees.
pub fn generate_path(
    rng: &mut Pcg32,
    start: Vec2,
    end: Vec2,
    amount_points: u32,
    angle_variance_deg: f32,
    length_variance: f32,
) -> LevelPath {
    let mut points = Vec::with_capacity(amount_points as usize + 2);
    points.push(start);
    let average_length = start.distance(end) / (amount_points + 1) as f32;
    let mut current = start;
    for _ in 0..amount_points {
        let towards_end = (end - current).normalize_or_zero();
        let turn = rng
            .random_range(-angle_variance_deg..=angle_variance_deg)
            .to_radians();
        let step_length = average_length + rng.random_range(-length_variance..=length_variance);
        current += Vec2::from_angle(turn).rotate(towards_end) * step_length;
        points.push(current);
    }
    points.push(end);
    LevelPath { points }
}

/// Half-width of the spawn corridor
pub fn max_object_distance(difficulty: u32) -> f32 {
    if difficulty < 10 {
        (-10.0 * (difficulty as f32).sqrt() + 55.0).floor()
    } else {
        1.0 / (difficulty as f32 - 9.0) + 22.38
    }
}

/// Mean number of objects per path segment
pub fn average_object_count(difficulty: u32) -> u32 {
    (4.0 * (difficulty as f32).sqrt()).floor() as u32
}

/// Interior waypoint count before jitter
pub fn path_point_count(difficulty: u32) -> u32 {
    if difficulty < 14 {
        (0.5 * difficulty as f32 + 8.0).floor() as u32
    } else {
        MAX_PATH_POINTS
    }
}

/// Percent chance that a spawned object is an asteroid rather than an enemy
pub fn asteroid_chance(difficulty: u32) -> i32 {
    if difficulty < 10 {
        -4 * difficulty as i32 + 90
    } else {
        50
    }
}

pub fn generate_asteroid(rng: &mut Pcg32, position: Vec2) -> LevelObject {
    let radius = rng.random_range(4..=12) as f32 / 2.0;
    let velocity = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
    let spin = rng.random_range(-10.0f32..=10.0).to_radians();
    if rng.random_range(0..COIN_ASTEROID_ODDS) == 0 {
        objects::coin_asteroid(position, radius, velocity, spin)
    } else {
        objects::asteroid(position, radius, velocity, spin)
    }
}

pub fn generate_object(rng: &mut Pcg32, position: Vec2, difficulty: u32) -> LevelObject {
    let roll = rng.random_range(0..100);
    if roll < asteroid_chance(difficulty) {
        generate_asteroid(rng, position)
    } else {
        objects::enemy(EnemyKind::SmartOrbiter, position)
    }
}

/// Build a path and populate it. The level end marker is always first.
pub fn generate_level(rng: &mut Pcg32, difficulty: u32) -> (LevelPath, Vec<LevelObject>) {
    let end_point = polar_to_cartesian(
        rng.random_range(ENDPOINT_MIN_DISTANCE..=ENDPOINT_MAX_DISTANCE),
        rng.random_range(0.0..std::f32::consts::TAU),
    );
    let amount_points = path_point_count(difficulty).saturating_add_signed(rng.random_range(-1..=0));
    let path = generate_path(
        rng,
        Vec2::ZERO,
        end_point,
        amount_points,
        PATH_ANGLE_VARIANCE_DEG,
        PATH_LENGTH_VARIANCE,
    );

    let object_distance = max_object_distance(difficulty);
    let average_amount = average_object_count(difficulty);
    let mut level_objects = vec![objects::level_end(end_point)];

    for (p1, p2) in path.segments() {
        let line_length = p1.distance(p2);
        if line_length <= f32::EPSILON {
            continue;
        }
        let direction = (p2 - p1) / line_length;
        let perpendicular = direction.perp();
        let count = average_amount.saturating_add_signed(rng.random_range(-1..=1));
        for _ in 0..count {
            let on_line = p1 + direction * rng.random_range(0.0..=line_length);
            let position = on_line + perpendicular * rng.random_range(-object_distance..=object_distance);
            if position.length() < SPAWN_CLEAR_RADIUS {
                continue;
            }
            level_objects.push(generate_object(rng, position, difficulty));
        }
    }

    log::info!(
        "Level {}: {} waypoints, {} objects, corridor {:.1}",
        difficulty,
        path.points.len(),
        level_objects.len(),
        object_distance
    );
    (path, level_objects)
}

/// Difficulty counter plus the current level's path and objects
#[derive(Debug, Clone)]
pub struct LevelManager {
    pub difficulty: u32,
    pub path: LevelPath,
    pub objects: Vec<LevelObject>,
    next_id: u32,
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelManager {
    pub fn new() -> Self {
        Self {
            difficulty: 0,
            path: LevelPath::default(),
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Bump difficulty and regenerate path and population
    pub fn load_next_level(&mut self, rng: &mut Pcg32) {
        self.difficulty += 1;
        let (path, objects) = generate_level(rng, self.difficulty);
        self.path = path;
        self.objects.clear();
        for obj in objects {
            self.insert(obj);
        }
    }

    /// Back to difficulty 0 with an empty level
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Give the object a fresh id and append it
    pub fn insert(&mut self, mut obj: LevelObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        obj.id = id;
        self.objects.push(obj);
        id
    }

    /// Remove everything flagged `queue_delete`
    pub fn sweep(&mut self) {
        self.objects.retain(|o| !o.queue_delete);
    }

    /// Move pending spawns into the level, preserving their order
    pub fn merge_pending(&mut self, pending: &mut Vec<LevelObject>) {
        for obj in pending.drain(..) {
            self.insert(obj);
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&LevelObject> {
        self.objects.iter().find(|o| o.id == id && !o.queue_delete)
    }

    /// Player has strayed too far from the path
    pub fn outside_corridor(&self, position: Vec2) -> bool {
        self.path.distance_to(position) > max_object_distance(self.difficulty) + CORRIDOR_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::ObjectKind;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_formulas() {
        assert_eq!(max_object_distance(0), 55.0);
        assert_eq!(max_object_distance(1), 45.0);
        assert_eq!(max_object_distance(4), 35.0);
        assert!((max_object_distance(10) - 23.38).abs() < 1e-4);
        assert!(max_object_distance(100) > 22.38);
        assert_eq!(average_object_count(1), 4);
        assert_eq!(average_object_count(9), 12);
        assert_eq!(path_point_count(1), 8);
        assert_eq!(path_point_count(13), 14);
        assert_eq!(path_point_count(14), 15);
        assert_eq!(path_point_count(40), 15);
        assert_eq!(asteroid_chance(1), 86);
        assert_eq!(asteroid_chance(12), 50);
    }

    #[test]
    fn test_generate_path_is_anchored() {
        let mut rng = Pcg32::seed_from_u64(5);
        let end = Vec2::new(300.0, -200.0);
        let path = generate_path(&mut rng, Vec2::ZERO, end, 10, 45.0, 3.0);
        assert_eq!(path.points.len(), 12);
        assert_eq!(path.start(), Some(Vec2::ZERO));
        assert_eq!(path.end(), Some(end));
    }

    #[test]
    fn test_straight_path_without_variance() {
        let mut rng = Pcg32::seed_from_u64(6);
        let path = generate_path(&mut rng, Vec2::ZERO, Vec2::new(100.0, 0.0), 4, 0.0, 0.0);
        for (i, p) in path.points.iter().enumerate() {
            assert!((p.x - 20.0 * i as f32).abs() < 1e-3);
            assert!(p.y.abs() < 1e-3);
        }
    }

    #[test]
    fn test_level_manager_assigns_ids_and_sweeps() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut manager = LevelManager::new();
        manager.load_next_level(&mut rng);
        assert_eq!(manager.difficulty, 1);
        assert!(matches!(manager.objects[0].kind, ObjectKind::LevelEnd));
        let ids: Vec<u32> = manager.objects.iter().map(|o| o.id.0).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(ids.iter().all(|&id| id != 0));

        let victim = manager.objects[1].id;
        manager.objects[1].queue_delete = true;
        assert!(manager.get(victim).is_none());
        let before = manager.objects.len();
        manager.sweep();
        assert_eq!(manager.objects.len(), before - 1);

        let mut pending = vec![objects::coin(Vec2::new(50.0, 0.0), Vec2::ZERO)];
        manager.merge_pending(&mut pending);
        assert!(pending.is_empty());
        let coin = manager.objects.last().unwrap();
        assert!(coin.id.0 > *ids.last().unwrap());

        manager.load_next_level(&mut rng);
        assert_eq!(manager.difficulty, 2);
        manager.reset();
        assert_eq!(manager.difficulty, 0);
        assert!(manager.objects.is_empty());
    }

    #[test]
    fn test_corridor() {
        let manager = LevelManager {
            difficulty: 1,
            path: LevelPath {
                points: vec![Vec2::ZERO, Vec2::new(100.0, 0.0)],
            },
            ..LevelManager::new()
        };
        assert!(!manager.outside_corridor(Vec2::new(50.0, 54.0)));
        assert!(manager.outside_corridor(Vec2::new(50.0, 56.0)));
        assert!(manager.outside_corridor(Vec2::new(-60.0, 0.0)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn generated_levels_hold_invariants(seed in any::<u64>(), difficulty in 1u32..30) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let (path, objects) = generate_level(&mut rng, difficulty);

            prop_assert_eq!(path.start(), Some(Vec2::ZERO));
            let end = path.end().unwrap();
            let end_distance = end.length();
            prop_assert!(end_distance >= ENDPOINT_MIN_DISTANCE - 1e-2);
            prop_assert!(end_distance <= ENDPOINT_MAX_DISTANCE + 1e-2);

            let interior = path.points.len() as u32 - 2;
            let base = path_point_count(difficulty);
            prop_assert!(interior == base || interior + 1 == base);

            prop_assert!(matches!(objects[0].kind, ObjectKind::LevelEnd));
            prop_assert_eq!(objects[0].position(), end);
            for obj in &objects {
                prop_assert!(obj.position().length() >= SPAWN_CLEAR_RADIUS);
                if let ObjectKind::Asteroid { .. } = obj.kind {
                    prop_assert!((2.0..=6.0).contains(&obj.radius()));
                }
            }
        }
    }
}
