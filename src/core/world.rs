//! Scene context shared across frames: grid, camera and entities.
use crate::core::entity::{Entity, spawn_entities};
use crate::core::maze::Maze;
use crate::core::player::Camera;

pub struct World {
    pub maze: Maze,
    pub camera: Camera,
    pub entities: Vec<Entity>,
}

impl World {
    pub fn new(maze: Maze, camera: Camera) -> Self {
        let entities = spawn_entities(&maze);
        tracing::info!(
            width = maze.width(),
            height = maze.height(),
            entities = entities.len(),
            "world ready"
        );
        Self { maze, camera, entities }
    }
}
