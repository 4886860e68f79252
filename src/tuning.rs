//! Gameplay tuning
//!
//! Every balance constant lives here so a page can override them with a
//! JSON blob (`data-tuning` on the canvas) without a rebuild.

use serde::{Deserialize, Serialize};

/// Gameplay constants. Units are pixels and pixels-per-frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal speed while a direction is held
    pub player_speed: f32,
    /// Vertical velocity applied by a jump (negative = up)
    pub jump_impulse: f32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Jumps allowed per grounded cycle (2 = double jump)
    pub max_jumps: u32,
    pub player_width: f32,
    pub player_height: f32,

    // === World ===
    /// Downward drift of platforms and gems per frame (clouds get half)
    pub scroll_speed: f32,
    /// Per-frame chance of spawning a platform
    pub platform_spawn_chance: f64,
    /// Per-frame chance of spawning a cloud
    pub cloud_spawn_chance: f64,

    // === Geometry ===
    pub platform_height: f32,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub starting_platform_width: f32,
    /// Distance of the first platform from the bottom of the viewport
    pub platform_bottom_margin: f32,
    /// Vertical gap above the previous platform, `[min, max)`
    pub platform_min_gap: f32,
    pub platform_max_gap: f32,
    pub gem_size: f32,
    pub cloud_height: f32,
    pub cloud_min_width: f32,
    pub cloud_max_width: f32,

    // === Scoring ===
    pub landing_score: u64,
    pub gem_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            jump_impulse: -15.0,
            gravity: 0.5,
            max_jumps: 2,
            player_width: 50.0,
            player_height: 50.0,

            scroll_speed: 2.0,
            platform_spawn_chance: 0.02,
            cloud_spawn_chance: 0.005,

            platform_height: 20.0,
            platform_min_width: 50.0,
            platform_max_width: 150.0,
            starting_platform_width: 200.0,
            platform_bottom_margin: 100.0,
            platform_min_gap: 100.0,
            platform_max_gap: 300.0,
            gem_size: 15.0,
            cloud_height: 30.0,
            cloud_min_width: 50.0,
            cloud_max_width: 150.0,

            landing_score: 1,
            gem_score: 5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse an optional override, logging and falling back to defaults on error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning override: {}", e);
                Self::default()
            }
        }
    }
}
