//! Column renderer: sky/floor fill and one shaded wall strip per column.
use glam::DVec2;

use crate::core::maze::Maze;
use crate::core::player::Camera;
use crate::render::casters::{Intersect, cast_column};
use crate::render::framebuffer::{Color, Framebuffer};
use crate::render::textures::{TextureManager, WALL_TEXTURE_WIDTH};
use crate::render::transform::{Projection, ScreenRect};

pub const SKY: Color = Color::rgb(135, 206, 235);
pub const FLOOR: Color = Color::rgb(40, 40, 40);

/// Walls are one unit tall, centered on eye level.
pub const WALL_HEIGHT: f64 = 1.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Red x-axis faces, green y-axis faces.
    #[default]
    Flat,
    /// 16-pixel-wide wall textures, one per axis.
    Textured,
}

/// Brightness multiplier in `[0.8, 1.0]`, falling off with depth.
#[inline]
pub fn shade(depth: f64) -> f64 {
    0.2 * (1.0 / depth).min(1.0) + 0.8
}

/// Half the wall strip height in pixels, capped so the strip edges never overflow.
#[inline]
pub fn wall_half_height(proj: &Projection, depth: f64) -> i32 {
    let half = ((1.0 / depth) / proj.view_per_tile() / 2.0).round();
    half.min((i32::MAX / 4) as f64) as i32
}

/// One-pixel-wide strip for `col`, symmetric about the midline.
pub fn wall_strip(proj: &Projection, col: u32, depth: f64) -> ScreenRect {
    let half = wall_half_height(proj, depth);
    let mid = (proj.rows / 2) as i32;
    ScreenRect { x: col as i32, y: mid - half, w: 1, h: 2 * half }
}

pub fn wall_color(hit: &Intersect) -> Color {
    match hit.face.variant() {
        0 => Color::rgb(255, 0, 0),
        _ => Color::rgb(0, 255, 0),
    }
}

pub fn paint_sky_and_floor(fb: &mut Framebuffer) {
    let (w, h) = (fb.width as i32, fb.height as i32);
    fb.set_current_color(SKY);
    fb.fill_rect(0, 0, w, h / 2);
    fb.set_current_color(FLOOR);
    fb.fill_rect(0, h / 2, w, h - h / 2);
}

/// Draws one column's wall strip; a miss leaves sky/floor showing.
pub fn draw_column(
    fb: &mut Framebuffer,
    proj: &Projection,
    texman: &TextureManager,
    style: RenderStyle,
    col: u32,
    hit: &Intersect,
) {
    let strip = wall_strip(proj, col, hit.depth);
    let k = shade(hit.depth);
    match style {
        RenderStyle::Flat => {
            fb.set_current_color(wall_color(hit).scale(k));
            fb.fill_rect(strip.x, strip.y, strip.w, strip.h);
        }
        RenderStyle::Textured => {
            if strip.h <= 0 {
                return;
            }
            let tex = texman.wall(hit.face.variant());
            let (tw, th) = texman.image_size(tex);
            let tx = (hit.tex_offset * tw as f64 / WALL_TEXTURE_WIDTH as f64) as u32;
            let y0 = strip.y.max(0);
            let y1 = strip.bottom().min(fb.height as i32);
            for y in y0..y1 {
                let ty = ((y - strip.y) as i64 * th as i64 / strip.h as i64) as u32;
                let c = texman.get_pixel_color(tex, tx.min(tw - 1), ty.min(th - 1));
                fb.set_pixel_color(col, y as u32, c.scale(k));
            }
        }
    }
}

/// Casts and draws every column. Returns the hit of the center column.
pub fn render_3d(
    fb: &mut Framebuffer,
    maze: &Maze,
    camera: &Camera,
    basis: DVec2,
    proj: &Projection,
    texman: &TextureManager,
    style: RenderStyle,
) -> Option<Intersect> {
    paint_sky_and_floor(fb);
    let mut straight = None;
    for col in 0..proj.cols {
        let Some(hit) = cast_column(maze, camera, basis, proj, col) else { continue };
        draw_column(fb, proj, texman, style, col, &hit);
        if col == proj.cols / 2 {
            straight = Some(hit);
        }
    }
    straight
}
