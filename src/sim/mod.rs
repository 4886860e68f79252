//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per animation frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod generate;
pub mod state;
pub mod tick;

pub use collision::{Aabb, is_landing};
pub use generate::{generate_cloud, generate_platform, generate_starting_platform};
pub use state::{Camera, Cloud, GameEvent, GamePhase, Gem, Platform, Player, Viewport, World};
pub use tick::tick;
