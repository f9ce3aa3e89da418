//! Core game types and logic (grid, camera, movement, entities).
//!
//! Re-exports:
//! - `maze`: Map grid parsing and cell queries
//! - `player`: Camera state and angle wrapping
//! - `process_events`: Movement model over resolved intents
//! - `entity`: Billboard entities spawned from the grid
//! - `world`: Per-program scene context

pub mod entity;
pub mod maze;
pub mod player;
pub mod process_events;
pub mod world;
