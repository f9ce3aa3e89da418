//! Per-frame sequencing: movement, walls, sprites, overlay.
use std::fmt;

use glam::DVec2;

use crate::config::Config;
use crate::core::maze::Maze;
use crate::core::player::Camera;
use crate::core::process_events::{MoveIntent, Movement};
use crate::core::world::World;
use crate::render::casters::Intersect;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::render_minimap;
use crate::render::render3d::{RenderStyle, render_3d};
use crate::render::sprites::draw_sprites_sorted;
use crate::render::textures::TextureManager;
use crate::render::transform::Projection;

const FRAME_SLOTS: usize = 64;

/// Mean of the last 64 frame durations; unfilled slots count as zero.
#[derive(Clone, Debug)]
pub struct FrameTimer {
    slots: [f64; FRAME_SLOTS],
    next: usize,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self { slots: [0.0; FRAME_SLOTS], next: 0 }
    }
}

impl FrameTimer {
    pub fn record(&mut self, ms: f64) {
        self.slots[self.next] = ms;
        self.next = (self.next + 1) % FRAME_SLOTS;
    }

    pub fn average_ms(&self) -> f64 {
        self.slots.iter().sum::<f64>() / FRAME_SLOTS as f64
    }
}

/// The informational status line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub camera: DVec2,
    pub angle: f64,
    pub straight_hit: DVec2,
    pub straight_depth: f64,
    pub frame_ms: f64,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X={:.2}, Y={:.2}, A={:.2} ;  X={:.2}, Y={:.2}, D={:.2} ;  t={:.1} ms",
            self.camera.x,
            self.camera.y,
            self.angle,
            self.straight_hit.x,
            self.straight_hit.y,
            self.straight_depth,
            self.frame_ms
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Nearest wall through the center column, if any.
    pub straight: Option<Intersect>,
    pub sprites_drawn: usize,
    pub diagnostics: Diagnostics,
}

/// Owns everything a frame touches and runs the frame sequence.
pub struct Engine {
    pub world: World,
    pub framebuffer: Framebuffer,
    pub textures: TextureManager,
    pub projection: Projection,
    pub movement: Movement,
    pub style: RenderStyle,
    pub minimap: bool,
    pub timer: FrameTimer,
}

impl Engine {
    pub fn new(config: &Config, maze: Maze) -> Self {
        let camera = Camera::new(config.spawn.x, config.spawn.y, config.spawn.angle);
        Self {
            world: World::new(maze, camera),
            framebuffer: Framebuffer::new(config.tile_cols, config.tile_rows),
            textures: TextureManager::new(&config.textures),
            projection: Projection::new(config.tile_cols, config.tile_rows, config.fov),
            movement: Movement {
                move_speed: config.move_speed,
                rotate_speed: config.rotate_speed,
            },
            style: config.style,
            minimap: config.minimap,
            timer: FrameTimer::default(),
        }
    }

    /// One full frame. `dt` is the elapsed time since the previous frame in seconds.
    pub fn frame(&mut self, intent: &MoveIntent, dt: f64) -> FrameReport {
        let _span = tracing::trace_span!("frame").entered();
        self.timer.record(dt * 1000.0);

        let world = &mut self.world;
        self.movement.apply(&mut world.camera, intent, dt);
        let camera = world.camera;
        let basis = camera.basis();

        let fb = &mut self.framebuffer;
        fb.clear();
        let (proj, textures) = (&self.projection, &self.textures);
        let straight = render_3d(fb, &world.maze, &camera, basis, proj, textures, self.style);
        let sprites_drawn =
            draw_sprites_sorted(fb, proj, textures, &mut world.entities, &camera, basis);
        if self.minimap {
            render_minimap(fb, &world.maze, &camera);
        }

        let diagnostics = Diagnostics {
            camera: camera.pos,
            angle: camera.angle,
            straight_hit: straight.map_or(DVec2::ZERO, |h| h.hit),
            straight_depth: straight.map_or(0.0, |h| h.depth),
            frame_ms: self.timer.average_ms(),
        };
        FrameReport { straight, sprites_drawn, diagnostics }
    }
}
