//! Per-frame simulation step
//!
//! Advances the world by exactly one animation frame. All velocities are in
//! pixels per frame, so there is no dt.

use rand::Rng;

use super::collision::is_landing;
use super::generate::{generate_cloud, generate_platform};
use super::state::{GameEvent, GamePhase, World};

/// Advance the world by one frame. Does nothing unless the run is active.
pub fn tick(world: &mut World) {
    world.events.clear();

    if world.phase != GamePhase::Running {
        return;
    }
    world.frame += 1;
    world.rebase_camera();

    let viewport = world.viewport;

    // Gravity, then integrate
    let player = &mut world.player;
    player.vel.y += player.gravity;
    player.pos += player.vel;

    // Walls stop the player dead
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
    }
    if player.pos.x + player.size.x > viewport.width {
        player.pos.x = viewport.width - player.size.x;
    }

    if world.camera.to_screen_y(player.bottom()) > viewport.height {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::GameOver { score: world.score });
        return;
    }

    // Landings
    for platform in &world.platforms {
        if is_landing(&world.player.aabb(), world.player.vel.y, &platform.aabb()) {
            world.player.land_on(platform.pos.y);
            world.score += world.tuning.landing_score;
            world.events.push(GameEvent::Landed { score: world.score });
        }
    }

    // Gem pickups. `retain` visits every gem exactly once.
    let player_box = world.player.aabb();
    let gem_score = world.tuning.gem_score;
    let mut collected = 0u64;
    world.gems.retain(|gem| {
        let hit = player_box.overlaps(&gem.aabb());
        if hit {
            collected += 1;
        }
        !hit
    });
    for _ in 0..collected {
        world.score += gem_score;
        world.events.push(GameEvent::GemCollected { score: world.score });
    }

    // The world sinks at a constant rate, clouds at half
    let scroll = world.tuning.scroll_speed;
    for platform in &mut world.platforms {
        platform.pos.y += scroll;
    }
    for gem in &mut world.gems {
        gem.pos.y += scroll;
    }
    for cloud in &mut world.clouds {
        cloud.pos.y += scroll / 2.0;
    }

    // Follow the player while they climb through the upper half. Stacks with
    // the constant scroll above.
    if world.camera.to_screen_y(world.player.pos.y) < viewport.mid_y() {
        world.camera.follow(world.player.vel.y.abs());
    }

    cull_offscreen(world);

    if world.rng.random::<f64>() < world.tuning.platform_spawn_chance {
        generate_platform(world);
        world.events.push(GameEvent::PlatformSpawned);
    }
    if world.rng.random::<f64>() < world.tuning.cloud_spawn_chance {
        generate_cloud(world);
        world.events.push(GameEvent::CloudSpawned);
    }
}

/// Drop everything that has scrolled past the bottom edge of the screen
fn cull_offscreen(world: &mut World) {
    let camera = world.camera;
    let height = world.viewport.height;

    world
        .platforms
        .retain(|p| camera.to_screen_y(p.pos.y) < height);
    world.gems.retain(|g| camera.to_screen_y(g.pos.y) < height);
    world
        .clouds
        .retain(|c| camera.cloud_to_screen_y(c.pos.y) < height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Cloud, Gem, Platform, Viewport};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// A world with no random spawning and nothing in it
    fn bare_world() -> World {
        let tuning = Tuning {
            platform_spawn_chance: 0.0,
            cloud_spawn_chance: 0.0,
            ..Default::default()
        };
        let mut world = World::new(42, Viewport::new(800.0, 600.0), tuning);
        world.platforms.clear();
        world.gems.clear();
        world
    }

    fn platform_at(x: f32, y: f32, width: f32) -> Platform {
        Platform {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, 20.0),
        }
    }

    #[test]
    fn test_gravity_integration() {
        let mut world = bare_world();
        world.player.pos = Vec2::new(100.0, 400.0);
        world.player.vel.x = 5.0;

        tick(&mut world);
        assert_eq!(world.player.vel.y, 0.5);
        assert_eq!(world.player.pos, Vec2::new(105.0, 400.5));

        tick(&mut world);
        assert_eq!(world.player.vel.y, 1.0);
        assert_eq!(world.player.pos, Vec2::new(110.0, 401.5));
    }

    #[test]
    fn test_horizontal_clamp() {
        let mut world = bare_world();
        world.player.pos = Vec2::new(2.0, 400.0);
        world.player.vel.x = -5.0;
        tick(&mut world);
        assert_eq!(world.player.pos.x, 0.0);

        world.player.pos.x = 748.0;
        world.player.vel.x = 5.0;
        tick(&mut world);
        assert_eq!(world.player.pos.x, 750.0);
    }

    #[test]
    fn test_falling_off_screen_ends_run() {
        let mut world = bare_world();
        world.platforms.push(platform_at(0.0, 200.0, 100.0));
        world.player.pos = Vec2::new(400.0, 549.0);
        world.player.vel.y = 2.0;

        tick(&mut world);
        assert_eq!(world.phase, GamePhase::GameOver);
        assert_eq!(world.events, vec![GameEvent::GameOver { score: 0 }]);
        // Remaining steps were skipped: nothing scrolled
        assert_eq!(world.platforms[0].pos.y, 200.0);

        // Frozen afterwards
        let before = world.player.clone();
        tick(&mut world);
        assert_eq!(world.player, before);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_landing_snaps_and_scores() {
        let mut world = bare_world();
        world.platforms.push(platform_at(100.0, 400.0, 200.0));
        // Bottom at 348, falling at 6 (+0.5 gravity) → bottom 354.5 next frame
        world.player.pos = Vec2::new(150.0, 298.0);
        world.player.vel.y = 6.0;
        world.player.jumps = 2;
        tick(&mut world);
        assert!(!world.player.grounded);

        // Put the player just above the surface instead
        world.player.pos = Vec2::new(150.0, 347.0);
        world.player.vel.y = 6.0;
        let camera_before = world.camera;
        let surface = world.platforms[0].pos.y;
        tick(&mut world);

        assert!(world.player.grounded);
        assert_eq!(world.player.vel.y, 0.0);
        assert_eq!(world.player.jumps, 0);
        assert_eq!(world.player.bottom(), surface);
        assert_eq!(world.score, 1);
        assert_eq!(world.camera, camera_before);
        assert!(world.events.contains(&GameEvent::Landed { score: 1 }));
    }

    #[test]
    fn test_rising_through_platform_does_not_snap() {
        let mut world = bare_world();
        world.platforms.push(platform_at(100.0, 400.0, 200.0));
        // Jumping up through the underside
        world.player.pos = Vec2::new(150.0, 420.0);
        world.player.vel.y = -10.0;
        tick(&mut world);

        assert!(!world.player.grounded);
        assert_eq!(world.player.pos.y, 410.5);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_lateral_contact_does_not_snap() {
        let mut world = bare_world();
        world.platforms.push(platform_at(300.0, 400.0, 200.0));
        // Walking into the side of the platform while barely falling
        world.player.pos = Vec2::new(246.0, 380.0);
        world.player.vel = Vec2::new(5.0, 0.0);
        tick(&mut world);

        assert!(!world.player.grounded);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_grounded_player_at_rest() {
        let mut world = bare_world();
        world.platforms.push(platform_at(100.0, 400.0, 200.0));
        world.player.pos = Vec2::new(150.0, 347.0);
        world.player.vel.y = 6.0;
        tick(&mut world);

        assert!(world.player.grounded);
        assert_eq!(world.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_gem_pickup_removes_only_touched_gems() {
        let mut world = bare_world();
        world.player.pos = Vec2::new(400.0, 400.0);
        // Two adjacent overlapping gems, one far away
        world.gems = vec![
            Gem { pos: Vec2::new(405.0, 420.0), size: 15.0 },
            Gem { pos: Vec2::new(425.0, 420.0), size: 15.0 },
            Gem { pos: Vec2::new(10.0, 100.0), size: 15.0 },
        ];
        tick(&mut world);

        assert_eq!(world.score, 10);
        assert_eq!(world.gems.len(), 1);
        assert_eq!(world.gems[0].pos.x, 10.0);
        let pickups = world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GemCollected { .. }))
            .count();
        assert_eq!(pickups, 2);
    }

    #[test]
    fn test_scroll_and_parallax() {
        let mut world = bare_world();
        world.player.pos = Vec2::new(400.0, 400.0);
        world.platforms.push(platform_at(0.0, 100.0, 100.0));
        world.gems.push(Gem { pos: Vec2::new(0.0, 50.0), size: 15.0 });
        world.clouds.push(Cloud {
            pos: Vec2::new(0.0, 10.0),
            size: Vec2::new(80.0, 30.0),
        });
        tick(&mut world);

        assert_eq!(world.platforms[0].pos.y, 102.0);
        assert_eq!(world.gems[0].pos.y, 52.0);
        assert_eq!(world.clouds[0].pos.y, 11.0);
        assert_eq!(world.camera.offset, 0.0);
    }

    #[test]
    fn test_camera_follows_climb() {
        let mut world = bare_world();
        world.player.pos = Vec2::new(400.0, 200.0);
        world.player.vel.y = -10.0;
        world.platforms.push(platform_at(0.0, 100.0, 100.0));
        tick(&mut world);

        // dy after gravity is -9.5; the camera absorbs it
        assert_eq!(world.player.pos.y, 190.5);
        assert_eq!(world.camera.offset, 9.5);
        assert_eq!(world.camera.to_screen_y(world.player.pos.y), 200.0);
        // Base scroll plus camera
        assert_eq!(world.camera.to_screen_y(world.platforms[0].pos.y), 111.5);
    }

    #[test]
    fn test_fall_stays_smooth_after_long_climb() {
        let mut world = bare_world();
        world.camera.follow(3.0e7);
        world.player.pos = Vec2::new(400.0, 350.0 - 3.0e7);

        let mut screen_y = Vec::new();
        for _ in 0..4 {
            tick(&mut world);
            screen_y.push(world.camera.to_screen_y(world.player.pos.y));
        }
        assert_eq!(screen_y, vec![350.5, 351.5, 353.0, 355.0]);
        assert!(world.camera.offset < 1024.0);
    }

    #[test]
    fn test_offscreen_entities_culled() {
        let mut world = bare_world();
        world.player.pos = Vec2::new(400.0, 300.0);
        world.platforms.push(platform_at(0.0, 599.0, 100.0));
        world.platforms.push(platform_at(0.0, 500.0, 100.0));
        world.gems.push(Gem { pos: Vec2::new(0.0, 598.5), size: 15.0 });
        world.clouds.push(Cloud {
            pos: Vec2::new(0.0, 599.5),
            size: Vec2::new(80.0, 30.0),
        });
        tick(&mut world);

        assert_eq!(world.platforms.len(), 1);
        assert_eq!(world.platforms[0].pos.y, 502.0);
        assert!(world.gems.is_empty());
        assert!(world.clouds.is_empty());
    }

    #[test]
    fn test_spawning_when_forced() {
        let mut world = bare_world();
        world.tuning.platform_spawn_chance = 1.0;
        world.tuning.cloud_spawn_chance = 1.0;
        world.player.pos = Vec2::new(400.0, 300.0);
        tick(&mut world);

        assert_eq!(world.platforms.len(), 1);
        assert_eq!(world.gems.len(), 1);
        assert_eq!(world.clouds.len(), 1);
        assert!(world.events.contains(&GameEvent::PlatformSpawned));
        assert!(world.events.contains(&GameEvent::CloudSpawned));
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(99999, Viewport::new(800.0, 600.0), Tuning::default());
        let mut b = World::new(99999, Viewport::new(800.0, 600.0), Tuning::default());

        for frame in 0..600 {
            if frame % 40 == 0 {
                a.player.jump();
                b.player.jump();
            }
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player, b.player);
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.clouds, b.clouds);
    }

    fn offscreen_free(world: &World) -> bool {
        let h = world.viewport.height;
        let cam = world.camera;
        world.platforms.iter().all(|p| cam.to_screen_y(p.pos.y) < h)
            && world.gems.iter().all(|g| cam.to_screen_y(g.pos.y) < h)
            && world.clouds.iter().all(|c| cam.cloud_to_screen_y(c.pos.y) < h)
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_and_culled(
            seed in any::<u64>(),
            inputs in prop::collection::vec(0u8..4, 1..400),
        ) {
            let mut world = World::new(seed, Viewport::new(640.0, 480.0), Tuning::default());
            let mut last_score = 0;
            for input in inputs {
                match input {
                    0 => world.player.move_left(),
                    1 => world.player.move_right(),
                    2 => { world.player.jump(); }
                    _ => world.player.stop(),
                }
                tick(&mut world);
                prop_assert!(world.score >= last_score);
                prop_assert!(world.player.jumps <= world.player.max_jumps);
                if world.is_running() {
                    prop_assert!(offscreen_free(&world));
                }
                last_score = world.score;
            }
        }
    }
}
