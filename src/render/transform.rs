//! World → scene → view → screen transforms shared by walls and sprites.
//!
//! Scene space is camera-relative: `z` is depth along the view axis, `x` is
//! lateral (positive to the right of the screen), `y` points down. View space
//! is scene space after the perspective divide. Screen space is pixel-buffer
//! coordinates.
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

use crate::core::player::Camera;

/// A rectangle before the perspective divide, at depth `z`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub z: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Pixel rectangle; `w`/`h` come from subtracting independently rounded edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl ScreenRect {
    #[inline] pub fn right(&self) -> i32 { self.x + self.w }
    #[inline] pub fn bottom(&self) -> i32 { self.y + self.h }
}

/// Screen geometry derived from the buffer size and field of view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub cols: u32,
    pub rows: u32,
    /// `tan` of half the field of view.
    pub tan_max: f64,
    /// Pixels per unit of view space.
    pub tile_per_view: f64,
}

impl Projection {
    /// `fov` is the full field of view in turns.
    pub fn new(cols: u32, rows: u32, fov: f64) -> Self {
        let tan_max = (TAU * fov / 2.0).tan();
        let tile_per_view = (cols - 1) as f64 / (2.0 * tan_max);
        Self { cols, rows, tan_max, tile_per_view }
    }

    /// View-space distance covered by one pixel column.
    #[inline]
    pub fn view_per_tile(&self) -> f64 {
        2.0 * self.tan_max / (self.cols - 1) as f64
    }

    /// Angular offset of a column from the heading, in turns.
    ///
    /// Columns are evenly spaced in tangent, not in angle, so the image is a
    /// true planar projection.
    #[inline]
    pub fn column_offset(&self, col: u32) -> f64 {
        let col_tan = -self.tan_max + 2.0 * self.tan_max * col as f64 / (self.cols - 1) as f64;
        col_tan.atan() / TAU
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new((self.cols / 2) as f64, (self.rows / 2) as f64)
    }

    /// Maps a view rectangle to pixels, rounding each edge independently so
    /// rectangles sharing an edge in view space share it on screen.
    pub fn view_to_screen(&self, r: ViewRect) -> ScreenRect {
        let c = self.center();
        let x1 = (r.x * self.tile_per_view + c.x).round() as i32;
        let x2 = ((r.x + r.w) * self.tile_per_view + c.x).round() as i32;
        let y1 = (r.y * self.tile_per_view + c.y).round() as i32;
        let y2 = ((r.y + r.h) * self.tile_per_view + c.y).round() as i32;
        ScreenRect { x: x1, y: y1, w: x2 - x1, h: y2 - y1 }
    }

}

/// Translates by `-camera` then rotates by `-heading`. `basis` is `camera.basis()`.
#[inline]
pub fn world_to_scene(camera: &Camera, basis: DVec2, v: DVec3) -> DVec3 {
    let rx = v.x - camera.pos.x;
    let ry = v.y - camera.pos.y;
    DVec3::new(-basis.y * rx + basis.x * ry, -v.z, basis.x * rx + basis.y * ry)
}

/// Perspective divide. Callers guarantee `r.z` is comfortably positive.
#[inline]
pub fn scene_to_view(r: SceneRect) -> ViewRect {
    ViewRect {
        x: r.x / r.z,
        y: r.y / r.z,
        w: r.w / r.z,
        h: r.h / r.z,
    }
}
