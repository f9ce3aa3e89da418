//! Ray/wall intersection per screen column.
//!
//! A ray is tested against grid lines of each axis separately. Up to two of
//! the four face scanners run for a given ray direction; the nearest positive
//! perpendicular depth wins.
use glam::DVec2;
use std::f64::consts::TAU;

use crate::core::maze::Maze;
use crate::core::player::{Camera, wrap_angle};
use crate::render::textures::WALL_TEXTURE_WIDTH;
use crate::render::transform::Projection;

/// Which side of a wall cell the ray struck.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WallFace {
    /// Ray travelling toward +x.
    West,
    /// Ray travelling toward +y.
    North,
    /// Ray travelling toward -x.
    East,
    /// Ray travelling toward -y.
    South,
}

impl WallFace {
    /// Scan order; equal-depth ties resolve to the earlier face.
    pub const ALL: [WallFace; 4] =
        [WallFace::West, WallFace::North, WallFace::East, WallFace::South];

    /// Texture/colour variant: 0 for faces crossed along x, 1 along y.
    #[inline]
    pub fn variant(self) -> usize {
        match self.axis() {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    #[inline]
    fn axis(self) -> Axis {
        match self {
            WallFace::West | WallFace::East => Axis::X,
            WallFace::North | WallFace::South => Axis::Y,
        }
    }

    #[inline]
    fn increasing(self) -> bool {
        matches!(self, WallFace::West | WallFace::North)
    }

    /// Whether a ray at `angle` (turns, `[0, 1)`) can hit this face at all.
    #[inline]
    pub fn faces(self, angle: f64) -> bool {
        match self {
            WallFace::West => angle < 0.25 || angle > 0.75,
            WallFace::North => 0.0 < angle && angle < 0.5,
            WallFace::East => 0.25 < angle && angle < 0.75,
            WallFace::South => 0.5 < angle && angle < 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// One candidate wall hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersect {
    pub hit: DVec2,
    /// Distance along the camera's forward axis, not Euclidean.
    pub depth: f64,
    pub face: WallFace,
    /// Texture column position in `[0, 16)` along the struck edge.
    pub tex_offset: f64,
}

impl Intersect {
    /// Grid cell that owns the struck face.
    pub fn cell(&self) -> (i64, i64) {
        let (px, py) = (self.hit.x.floor() as i64, self.hit.y.floor() as i64);
        match self.face {
            WallFace::West | WallFace::North => (px, py),
            WallFace::East => (px - 1, py),
            WallFace::South => (px, py - 1),
        }
    }
}

/// Marches one face's grid lines along its primary axis until a wall or the edge.
fn scan_face(
    maze: &Maze,
    camera: &Camera,
    basis: DVec2,
    angle: f64,
    face: WallFace,
) -> Option<Intersect> {
    let axis = face.axis();
    let (cam_p, cam_q, dim_p, dim_q) = match axis {
        Axis::X => (camera.pos.x, camera.pos.y, maze.width() as i64, maze.height() as i64),
        Axis::Y => (camera.pos.y, camera.pos.x, maze.height() as i64, maze.width() as i64),
    };
    // Slope of the perpendicular coordinate per unit along the primary axis.
    let slope = match axis {
        Axis::X => (TAU * angle).tan(),
        Axis::Y => (TAU * (0.25 - angle)).tan(),
    };

    let wall_at = |p: i64, q: i64| match axis {
        Axis::X => maze.is_wall(p, q),
        Axis::Y => maze.is_wall(q, p),
    };
    let probe = |line: i64| -> Option<Intersect> {
        let q = (line as f64 - cam_p) * slope + cam_q;
        let qf = q.floor() as i64;
        // A ray travelling toward -p enters the cell on the far side of the line.
        let cell_p = if face.increasing() { line } else { line - 1 };
        if !(0..dim_q).contains(&qf) || !wall_at(cell_p, qf) {
            return None;
        }
        let hit = match axis {
            Axis::X => DVec2::new(line as f64, q),
            Axis::Y => DVec2::new(q, line as f64),
        };
        Some(Intersect {
            hit,
            depth: basis.dot(hit - camera.pos),
            face,
            tex_offset: WALL_TEXTURE_WIDTH as f64 * q.rem_euclid(1.0),
        })
    };

    if face.increasing() {
        let start = (cam_p.ceil() as i64).clamp(0, dim_p);
        (start..dim_p).find_map(probe)
    } else {
        let start = (cam_p.floor() as i64).clamp(0, dim_p - 1);
        (1..=start).rev().find_map(probe)
    }
}

fn candidates(
    maze: &Maze,
    camera: &Camera,
    basis: DVec2,
    angle: f64,
) -> impl Iterator<Item = Intersect> {
    WallFace::ALL
        .into_iter()
        .filter(move |face| face.faces(angle))
        .filter_map(move |face| scan_face(maze, camera, basis, angle, face))
}

/// Every face scanner hit for `angle`, in scan order, depth unfiltered.
pub fn cast_candidates(maze: &Maze, camera: &Camera, basis: DVec2, angle: f64) -> Vec<Intersect> {
    candidates(maze, camera, basis, wrap_angle(angle)).collect()
}

/// Nearest hit with strictly positive depth for a ray at `angle` (turns).
pub fn cast_ray(maze: &Maze, camera: &Camera, basis: DVec2, angle: f64) -> Option<Intersect> {
    candidates(maze, camera, basis, wrap_angle(angle))
        .filter(|hit| hit.depth > 0.0)
        .fold(None, |best: Option<Intersect>, hit| match best {
            Some(b) if b.depth <= hit.depth => Some(b),
            _ => Some(hit),
        })
}

/// Angle (turns) of the ray through screen column `col`.
#[inline]
pub fn column_angle(proj: &Projection, camera: &Camera, col: u32) -> f64 {
    wrap_angle(camera.angle + proj.column_offset(col))
}

pub fn cast_column(
    maze: &Maze,
    camera: &Camera,
    basis: DVec2,
    proj: &Projection,
    col: u32,
) -> Option<Intersect> {
    cast_ray(maze, camera, basis, column_angle(proj, camera, col))
}
