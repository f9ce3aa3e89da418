use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::entity::EntityKind;
use crate::render::framebuffer::Color;

/// Wall textures are sampled in 16 columns across one cell face.
pub const WALL_TEXTURE_WIDTH: u32 = 16;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to decode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{path} has zero size")]
    Empty { path: PathBuf },
}

/// Opaque handle into the [`TextureManager`]. Borrowed by draw calls, never owned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

/// An immutable CPU pixmap, sampled per pixel.
#[derive(Clone, Debug)]
pub struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    pub fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        debug_assert_eq!(px.len(), (w * h) as usize);
        Self { w, h, px }
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let img = image::open(path)
            .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })?
            .to_rgba8();
        if img.width() == 0 || img.height() == 0 {
            return Err(AssetError::Empty { path: path.to_path_buf() });
        }
        let px = img.pixels().map(|p| Color::new(p[0], p[1], p[2], p[3])).collect();
        Ok(Self::new(img.width(), img.height(), px))
    }

    #[inline] pub fn width(&self) -> u32 { self.w }
    #[inline] pub fn height(&self) -> u32 { self.h }

    /// Wrapping sample.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Color {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[(yi * self.w as usize) + xi]
    }
}

/// Optional image paths; anything missing gets a procedural pixmap.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct TexturePaths {
    pub wall_x: Option<PathBuf>,
    pub wall_y: Option<PathBuf>,
    pub orb: Option<PathBuf>,
    pub barrel: Option<PathBuf>,
    pub pillar: Option<PathBuf>,
}

impl TexturePaths {
    fn sprite(&self, kind: EntityKind) -> Option<&Path> {
        match kind {
            EntityKind::Orb => self.orb.as_deref(),
            EntityKind::Barrel => self.barrel.as_deref(),
            EntityKind::Pillar => self.pillar.as_deref(),
        }
    }
}

pub struct TextureManager {
    maps: Vec<Pixmap>,
    walls: [TextureId; 2],
    sprites: HashMap<EntityKind, TextureId>,
}

impl TextureManager {
    pub fn new(paths: &TexturePaths) -> Self {
        let mut tm = Self {
            maps: Vec::new(),
            walls: [TextureId(0); 2],
            sprites: HashMap::new(),
        };

        tm.walls[0] = tm.insert(Self::load_or(paths.wall_x.as_deref(), || {
            Self::make_brick_wall(Color::rgb(170, 40, 30), Color::rgb(120, 110, 100))
        }));
        tm.walls[1] = tm.insert(Self::load_or(paths.wall_y.as_deref(), || {
            Self::make_brick_wall(Color::rgb(40, 150, 50), Color::rgb(100, 120, 100))
        }));

        for kind in EntityKind::ALL {
            let pm = Self::load_or(paths.sprite(kind), || match kind {
                EntityKind::Orb => Self::make_glowing_orb(32, 32, Color::rgb(255, 240, 80)),
                EntityKind::Barrel => Self::make_barrel(32, 32),
                EntityKind::Pillar => Self::make_pillar(16, 48),
            });
            let id = tm.insert(pm);
            tm.sprites.insert(kind, id);
        }

        tm
    }

    fn load_or(path: Option<&Path>, fallback: impl FnOnce() -> Pixmap) -> Pixmap {
        let Some(path) = path else { return fallback() };
        match Pixmap::load(path) {
            Ok(pm) => {
                tracing::info!(path = %path.display(), w = pm.w, h = pm.h, "loaded texture");
                pm
            }
            Err(e) => {
                tracing::warn!("{e}; using procedural texture");
                fallback()
            }
        }
    }

    /// Registers an extra pixmap and hands back its handle.
    pub fn insert(&mut self, pm: Pixmap) -> TextureId {
        self.maps.push(pm);
        TextureId(self.maps.len() as u32 - 1)
    }

    /// Variant 0 for x-axis faces (west/east), 1 for y-axis faces.
    #[inline]
    pub fn wall(&self, variant: usize) -> TextureId {
        self.walls[variant.min(1)]
    }

    #[inline]
    pub fn sprite(&self, kind: EntityKind) -> TextureId {
        self.sprites[&kind]
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> &Pixmap {
        &self.maps[id.0 as usize]
    }

    pub fn get_pixel_color(&self, id: TextureId, tx: u32, ty: u32) -> Color {
        self.get(id).sample(tx, ty)
    }

    pub fn image_size(&self, id: TextureId) -> (u32, u32) {
        let pm = self.get(id);
        (pm.w, pm.h)
    }

    /// Staggered bricks with mortar lines.
    fn make_brick_wall(brick: Color, mortar: Color) -> Pixmap {
        let (w, h) = (WALL_TEXTURE_WIDTH, 16);
        let mut px = vec![brick; (w * h) as usize];
        for y in 0..h {
            for x in 0..w {
                let row = y / 4;
                let shift = if row % 2 == 0 { 0 } else { w / 2 };
                let i = (y * w + x) as usize;
                if y % 4 == 3 || (x + shift) % w == 0 {
                    px[i] = mortar;
                } else if (x + y) % 5 == 0 {
                    px[i] = brick.scale(0.85);
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    fn make_glowing_orb(w: u32, h: u32, color: Color) -> Pixmap {
        let mut px = vec![Color::BLANK; (w * h) as usize];
        let cx = w as f64 * 0.5;
        let cy = h as f64 * 0.6;
        let r = w.min(h) as f64 * 0.3;
        for y in 0..h {
            for x in 0..w {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= r {
                    let t = 1.0 - d / r;
                    px[(y * w + x) as usize] = Self::mix(color, Color::WHITE, (t * 200.0) as u8);
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    fn make_barrel(w: u32, h: u32) -> Pixmap {
        let wood = Color::rgb(140, 90, 40);
        let band = Color::rgb(70, 70, 80);
        let mut px = vec![Color::BLANK; (w * h) as usize];
        let top = h / 3;
        for y in top..h {
            let t = (y - top) as f64 / (h - top) as f64;
            let bulge = 0.38 + 0.06 * (std::f64::consts::PI * t).sin();
            let half = w as f64 * bulge;
            for x in 0..w {
                if (x as f64 + 0.5 - w as f64 * 0.5).abs() <= half {
                    let i = (y * w + x) as usize;
                    px[i] = if (y - top) % 6 == 1 { band } else { wood };
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    fn make_pillar(w: u32, h: u32) -> Pixmap {
        let stone = Color::rgb(180, 180, 190);
        let mut px = vec![Color::BLANK; (w * h) as usize];
        for y in 0..h {
            let cap = y < 3 || y + 3 >= h;
            for x in 0..w {
                if cap || (3..w - 3).contains(&x) {
                    let shade = if x % 4 == 0 { 0.8 } else { 1.0 };
                    px[(y * w + x) as usize] = stone.scale(shade);
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    #[inline]
    fn mix(a: Color, b: Color, t: u8) -> Color {
        let ta = t as u16;
        let na = 255u16 - ta;
        let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
        Color::new(mixc(a.r, b.r), mixc(a.g, b.g), mixc(a.b, b.b), mixc(a.a, b.a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_walls_are_sixteen_wide() {
        let tm = TextureManager::new(&TexturePaths::default());
        assert_eq!(tm.image_size(tm.wall(0)).0, WALL_TEXTURE_WIDTH);
        assert_eq!(tm.image_size(tm.wall(1)).0, WALL_TEXTURE_WIDTH);
        assert_ne!(tm.wall(0), tm.wall(1));
    }

    #[test]
    fn every_entity_kind_has_a_sprite() {
        let tm = TextureManager::new(&TexturePaths::default());
        for kind in EntityKind::ALL {
            let (w, h) = tm.image_size(tm.sprite(kind));
            assert!(w > 0 && h > 0);
        }
    }

    #[test]
    fn sprite_backgrounds_are_transparent() {
        let tm = TextureManager::new(&TexturePaths::default());
        let orb = tm.sprite(EntityKind::Orb);
        assert_eq!(tm.get_pixel_color(orb, 0, 0).a, 0);
        assert_eq!(tm.get_pixel_color(orb, 16, 19).a, 255);
    }

    #[test]
    fn sampling_wraps() {
        let pm = Pixmap::new(2, 1, vec![Color::BLACK, Color::WHITE]);
        assert_eq!(pm.sample(3, 5), Color::WHITE);
    }

    #[test]
    fn missing_file_falls_back() {
        let paths = TexturePaths {
            wall_x: Some(PathBuf::from("/no/such/wall.png")),
            ..TexturePaths::default()
        };
        let tm = TextureManager::new(&paths);
        assert_eq!(tm.image_size(tm.wall(0)), (WALL_TEXTURE_WIDTH, 16));
    }

    #[test]
    fn png_textures_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.png");
        let img = image::RgbaImage::from_pixel(16, 8, image::Rgba([1, 2, 3, 255]));
        img.save(&path).unwrap();
        let paths = TexturePaths { wall_y: Some(path), ..TexturePaths::default() };
        let tm = TextureManager::new(&paths);
        assert_eq!(tm.image_size(tm.wall(1)), (16, 8));
        assert_eq!(tm.get_pixel_color(tm.wall(1), 5, 5), Color::rgb(1, 2, 3));
    }
}
