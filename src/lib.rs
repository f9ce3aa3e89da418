//! Software ray-casting renderer over a fixed tile grid.
//!
//! Re-exports:
//! - `core`: Grid, camera, movement, entities
//! - `render`: Wall casting, projection, sprites, framebuffer
//! - `frame`: Frame orchestration and diagnostics
//! - `config`: TOML configuration

pub mod config;
pub mod core;
pub mod frame;
pub mod render;

pub use crate::config::{Config, ConfigError};
pub use crate::core::maze::{MapError, Maze};
pub use crate::core::process_events::MoveIntent;
pub use crate::frame::{Engine, FrameReport};
