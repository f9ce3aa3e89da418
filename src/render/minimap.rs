//! Top-down overlay: one buffer pixel per grid cell, top-right corner.
use crate::core::maze::{Cell, Maze};
use crate::core::player::Camera;
use crate::render::framebuffer::{Color, Framebuffer};

const MINIMAP_PLAYER: Color = Color::rgb(150, 63, 255);

pub fn render_minimap(fb: &mut Framebuffer, maze: &Maze, camera: &Camera) {
    let xo = fb.width as i64 - maze.width() as i64;
    for (y, row) in maze.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let color = if *cell == Cell::Wall { Color::WHITE } else { Color::BLACK };
            let px = xo + x as i64;
            if px >= 0 {
                fb.set_pixel_color(px as u32, y as u32, color);
            }
        }
    }
    let (cx, cy) = (camera.pos.x.floor() as i64, camera.pos.y.floor() as i64);
    if maze.cell(cx, cy).is_some() && xo + cx >= 0 {
        fb.set_pixel_color((xo + cx) as u32, cy as u32, MINIMAP_PLAYER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimap_occupies_the_top_right_corner() {
        let maze = Maze::reference();
        let mut fb = Framebuffer::new(128, 96);
        fb.set_background_color(Color::rgb(1, 2, 3));
        fb.clear();
        render_minimap(&mut fb, &maze, &Camera::new(1.5, 14.5, 0.0));
        assert_eq!(fb.get_pixel(112, 0), Color::WHITE);
        assert_eq!(fb.get_pixel(113, 1), Color::BLACK);
        assert_eq!(fb.get_pixel(113, 14), MINIMAP_PLAYER);
        assert_eq!(fb.get_pixel(111, 0), Color::rgb(1, 2, 3));
        assert_eq!(fb.get_pixel(112, 16), Color::rgb(1, 2, 3));
    }

    #[test]
    fn camera_outside_the_grid_is_not_marked() {
        let maze = Maze::reference();
        let mut fb = Framebuffer::new(128, 96);
        render_minimap(&mut fb, &maze, &Camera::new(-2.0, 3.0, 0.0));
        assert!(fb.color_buffer.iter().all(|&c| c != MINIMAP_PLAYER));
    }
}
