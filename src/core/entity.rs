//! Billboard entities spawned from map markers.
use glam::DVec3;

use crate::core::maze::Maze;

/// World z of the floor plane; walls span `[-0.5, 0.5]` around eye level.
pub const FLOOR_Z: f64 = -0.5;

/// Scene-space footprint shared by every billboard.
pub const ENTITY_WIDTH: f64 = 0.5;
pub const ENTITY_HEIGHT: f64 = 0.7;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Orb,
    Barrel,
    Pillar,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Orb, EntityKind::Barrel, EntityKind::Pillar];

    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            'o' => Some(EntityKind::Orb),
            'b' => Some(EntityKind::Barrel),
            'i' => Some(EntityKind::Pillar),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            EntityKind::Orb => 'o',
            EntityKind::Barrel => 'b',
            EntityKind::Pillar => 'i',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    /// Anchor on the floor under the sprite, fixed for the entity's lifetime.
    pub anchor: DVec3,
    /// Per-frame scratch: projected scene coordinates (z is the depth).
    pub scene: DVec3,
}

impl Entity {
    pub fn new(kind: EntityKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            anchor: DVec3::new(x, y, FLOOR_Z),
            scene: DVec3::ZERO,
        }
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.scene.z
    }
}

/// One entity per spawn marker, centered in its cell.
pub fn spawn_entities(maze: &Maze) -> Vec<Entity> {
    maze.spawns()
        .map(|(x, y, kind)| Entity::new(kind, x as f64 + 0.5, y as f64 + 0.5))
        .collect()
}
