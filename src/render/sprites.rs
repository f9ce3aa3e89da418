//! Sprite compositor (billboards, painter's order).
//!
//! Exposes:
//! - `project_entities`: refresh every entity's scene coordinates
//! - `draw_order`: farthest-first indices, skipping anything at or behind the camera
//! - `sprite_rect`: screen rectangle of one billboard
//! - `draw_sprites_sorted`: the whole pass
//!
//! Sprites are not depth-tested against walls; a sprite behind a nearer wall
//! still draws in full.
use glam::DVec2;

use crate::core::entity::{ENTITY_HEIGHT, ENTITY_WIDTH, Entity};
use crate::core::player::Camera;
use crate::render::framebuffer::Framebuffer;
use crate::render::textures::{TextureId, TextureManager};
use crate::render::transform::{Projection, SceneRect, ScreenRect, scene_to_view, world_to_scene};

/// Entities this close to (or behind) the camera plane are not drawn.
pub const NEAR_EPSILON: f64 = 1e-2;

pub fn project_entities(entities: &mut [Entity], camera: &Camera, basis: DVec2) {
    for e in entities.iter_mut() {
        e.scene = world_to_scene(camera, basis, e.anchor);
    }
}

/// Indices of drawable entities, strictly decreasing in depth.
pub fn draw_order(entities: &[Entity]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entities.len())
        .filter(|&i| entities[i].depth() > NEAR_EPSILON)
        .collect();
    order.sort_by(|&a, &b| entities[b].depth().total_cmp(&entities[a].depth()));
    order
}

/// Bottom-center anchored billboard, through scene → view → screen.
pub fn sprite_rect(proj: &Projection, entity: &Entity) -> ScreenRect {
    let s = entity.scene;
    let scene = SceneRect {
        x: s.x - ENTITY_WIDTH / 2.0,
        y: s.y - ENTITY_HEIGHT,
        w: ENTITY_WIDTH,
        h: ENTITY_HEIGHT,
        z: s.z,
    };
    proj.view_to_screen(scene_to_view(scene))
}

/// Stretches the whole texture over `rect`, skipping fully transparent texels.
pub fn draw_sprite(
    fb: &mut Framebuffer,
    texman: &TextureManager,
    tex: TextureId,
    rect: ScreenRect,
) {
    if rect.w <= 0 || rect.h <= 0 {
        return;
    }
    let (tw, th) = texman.image_size(tex);
    let x0 = rect.x.max(0);
    let x1 = rect.right().min(fb.width as i32);
    let y0 = rect.y.max(0);
    let y1 = rect.bottom().min(fb.height as i32);
    for sx in x0..x1 {
        let tx = ((sx - rect.x) as i64 * tw as i64 / rect.w as i64) as u32;
        for sy in y0..y1 {
            let ty = ((sy - rect.y) as i64 * th as i64 / rect.h as i64) as u32;
            let color = texman.get_pixel_color(tex, tx, ty);
            if color.a == 0 {
                continue;
            }
            fb.set_pixel_color(sx as u32, sy as u32, color);
        }
    }
}

/// Projects, sorts and draws every entity. Returns how many were drawn.
pub fn draw_sprites_sorted(
    fb: &mut Framebuffer,
    proj: &Projection,
    texman: &TextureManager,
    entities: &mut [Entity],
    camera: &Camera,
    basis: DVec2,
) -> usize {
    project_entities(entities, camera, basis);
    let order = draw_order(entities);
    for &i in &order {
        let e = &entities[i];
        draw_sprite(fb, texman, texman.sprite(e.kind), sprite_rect(proj, e));
    }
    order.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{EntityKind, FLOOR_Z};
    use crate::render::framebuffer::Color;
    use crate::render::textures::{Pixmap, TexturePaths};
    use glam::DVec3;

    fn at_depth(z: f64) -> Entity {
        let mut e = Entity::new(EntityKind::Orb, 0.0, 0.0);
        e.scene = DVec3::new(0.0, 0.5, z);
        e
    }

    #[test]
    fn farthest_draws_first() {
        let entities = vec![at_depth(5.0), at_depth(1.0), at_depth(3.0)];
        let order = draw_order(&entities);
        let depths: Vec<f64> = order.iter().map(|&i| entities[i].depth()).collect();
        assert_eq!(depths, vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn entities_at_or_behind_the_camera_are_skipped() {
        let entities = vec![at_depth(2.0), at_depth(NEAR_EPSILON), at_depth(0.0), at_depth(-4.0)];
        assert_eq!(draw_order(&entities), vec![0]);
    }

    #[test]
    fn projection_uses_camera_relative_depth() {
        let cam = Camera::new(1.5, 14.5, 0.0);
        let mut entities = vec![Entity::new(EntityKind::Barrel, 6.5, 14.5)];
        project_entities(&mut entities, &cam, cam.basis());
        assert_eq!(entities[0].scene, DVec3::new(0.0, -FLOOR_Z, 5.0));
    }

    #[test]
    fn sprite_stands_on_the_floor_and_is_centered() {
        let p = Projection::new(128, 96, 0.25);
        let e = at_depth(1.0);
        let r = sprite_rect(&p, &e);
        // Floor at scene y 0.5 lands 0.5 * 63.5 below the midline.
        assert_eq!(r.bottom(), (48.0f64 + 31.75).round() as i32);
        assert_eq!(r.x + r.right(), 128);
    }

    #[test]
    fn farther_sprites_are_smaller() {
        let p = Projection::new(128, 96, 0.25);
        let near = sprite_rect(&p, &at_depth(2.0));
        let far = sprite_rect(&p, &at_depth(8.0));
        assert!(far.w < near.w && far.h < near.h);
    }

    #[test]
    fn nearer_sprite_overwrites_farther_one() {
        let p = Projection::new(64, 48, 0.25);
        let tm = TextureManager::new(&TexturePaths::default());
        let mut fb = Framebuffer::new(64, 48);
        let cam = Camera::new(0.0, 0.0, 0.0);
        let mut entities = vec![
            Entity::new(EntityKind::Pillar, 1.0, 0.0),
            Entity::new(EntityKind::Barrel, 4.0, 0.0),
        ];
        assert_eq!(draw_sprites_sorted(&mut fb, &p, &tm, &mut entities, &cam, cam.basis()), 2);
        // Bottom-center pixel of the near pillar.
        let r = sprite_rect(&p, &entities[0]);
        let px = fb.get_pixel((r.x + r.w / 2) as u32, (r.bottom() - 1) as u32);
        let pillar = tm.sprite(EntityKind::Pillar);
        let (tw, th) = tm.image_size(pillar);
        let ty = ((r.h - 1) as u32 * th) / r.h as u32;
        assert_eq!(px, tm.get_pixel_color(pillar, tw / 2, ty));
    }

    #[test]
    fn transparent_texels_leave_background() {
        let mut fb = Framebuffer::new(4, 4);
        let mut tm = TextureManager::new(&TexturePaths::default());
        let tex = tm.insert(Pixmap::new(2, 1, vec![Color::BLANK, Color::WHITE]));
        draw_sprite(&mut fb, &tm, tex, ScreenRect { x: 0, y: 0, w: 4, h: 4 });
        assert_eq!(fb.get_pixel(1, 2), Color::BLACK);
        assert_eq!(fb.get_pixel(2, 2), Color::WHITE);
    }
}
