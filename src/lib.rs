//! Sky Hop - an endless platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, world generation)
//! - `input`: Raw input events to player commands
//! - `game`: Run lifecycle (frame stepping, game over, restart)
//! - `renderer`: Draw list construction and the WebGPU pipeline
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use input::{Command, InputEvent};
pub use tuning::Tuning;
