//! Rendering pipeline.
//!
//! Re-exports:
//! - `framebuffer`: CPU framebuffer, clipping fills, upscaling
//! - `textures`: Pixmap registry with procedural fallbacks
//! - `transform`: World → scene → view → screen chain
//! - `casters`: Per-column wall intersection
//! - `render3d`: Column renderer for walls, sky and floor
//! - `sprites`: Billboard projection, sorting and drawing
//! - `minimap`: Top-down overlay

pub mod casters;
pub mod framebuffer;
pub mod minimap;
pub mod render3d;
pub mod sprites;
pub mod textures;
pub mod transform;
