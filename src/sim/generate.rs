//! Procedural world generation
//!
//! Platforms stack upward from the bottom of the screen with random gaps,
//! each carrying one gem. Clouds are scattered over the top half.

use glam::Vec2;
use rand::Rng;

use super::state::{Cloud, Gem, Platform, World};

/// Uniform sample in `[min, max)`. Degenerate ranges collapse to `min`.
fn uniform(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

fn push_platform(world: &mut World, platform: Platform) {
    let gem = Gem::above(&platform, world.tuning.gem_size);
    log::trace!(
        "Platform at ({:.1}, {:.1}) width {:.1}",
        platform.pos.x,
        platform.pos.y,
        platform.size.x
    );
    world.platforms.push(platform);
    world.gems.push(gem);
}

/// Wide platform centred near the bottom of the screen, with its gem
pub fn generate_starting_platform(world: &mut World) {
    let tuning = &world.tuning;
    let width = tuning.starting_platform_width;
    let x = world.viewport.mid_x() - width / 2.0;
    let screen_y = world.viewport.height - tuning.platform_bottom_margin;
    let platform = Platform {
        pos: Vec2::new(x, world.camera.to_world_y(screen_y)),
        size: Vec2::new(width, tuning.platform_height),
    };
    push_platform(world, platform);
}

/// Random platform above the most recent one (or at the bottom if none are left)
pub fn generate_platform(world: &mut World) {
    let tuning = &world.tuning;
    let rng = &mut world.rng;

    let width = uniform(rng, tuning.platform_min_width, tuning.platform_max_width);
    let x = uniform(rng, 0.0, world.viewport.width - width);
    let y = match world.platforms.last() {
        Some(previous) => {
            previous.pos.y - uniform(rng, tuning.platform_min_gap, tuning.platform_max_gap)
        }
        None => world
            .camera
            .to_world_y(world.viewport.height - tuning.platform_bottom_margin),
    };

    let platform = Platform {
        pos: Vec2::new(x, y),
        size: Vec2::new(width, tuning.platform_height),
    };
    push_platform(world, platform);
}

/// Decorative cloud somewhere in the top half of the screen
pub fn generate_cloud(world: &mut World) {
    let tuning = &world.tuning;
    let rng = &mut world.rng;

    let width = uniform(rng, tuning.cloud_min_width, tuning.cloud_max_width);
    let x = uniform(rng, 0.0, world.viewport.width);
    let screen_y = uniform(rng, 0.0, world.viewport.mid_y());

    world.clouds.push(Cloud {
        pos: Vec2::new(x, world.camera.cloud_to_world_y(screen_y)),
        size: Vec2::new(width, tuning.cloud_height),
    });
}
