//! Frame assembly
//!
//! Turns the world into a flat list of screen-space quads in paint order.
//! Nothing is cached between frames; every call redraws everything.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::World;

/// A filled rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub min: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear_color: [f32; 4],
    /// Back to front: clouds, player, platforms, gems
    pub quads: Vec<Quad>,
    pub score_label: String,
}

impl Frame {
    /// Triangle list for the whole frame, still in screen pixels
    pub fn vertices(&self) -> Vec<Vertex> {
        self.quads
            .iter()
            .flat_map(|q| shapes::rect(q.min, q.size, q.color))
            .collect()
    }
}

/// Build the draw list for the current world state
pub fn build_frame(world: &World) -> Frame {
    let camera = world.camera;
    let mut quads =
        Vec::with_capacity(1 + world.clouds.len() + world.platforms.len() + world.gems.len());

    for cloud in &world.clouds {
        quads.push(Quad {
            min: Vec2::new(cloud.pos.x, camera.cloud_to_screen_y(cloud.pos.y)),
            size: cloud.size,
            color: colors::CLOUD,
        });
    }

    let player = &world.player;
    quads.push(Quad {
        min: Vec2::new(player.pos.x, camera.to_screen_y(player.pos.y)),
        size: player.size,
        color: colors::PLAYER,
    });

    for platform in &world.platforms {
        quads.push(Quad {
            min: Vec2::new(platform.pos.x, camera.to_screen_y(platform.pos.y)),
            size: platform.size,
            color: colors::PLATFORM,
        });
    }

    for gem in &world.gems {
        quads.push(Quad {
            min: Vec2::new(gem.pos.x, camera.to_screen_y(gem.pos.y)),
            size: Vec2::splat(gem.size),
            color: colors::GEM,
        });
    }

    Frame {
        clear_color: colors::SKY,
        quads,
        score_label: format!("Score: {}", world.score),
    }
}
