//! Run lifecycle
//!
//! [`Game`] owns the world and the pending command queue. Event handlers
//! push input; the frame callback calls [`Game::frame`] once per animation
//! frame and stops scheduling when the run is over.

use std::collections::VecDeque;

use crate::input::{self, Command, InputEvent};
use crate::renderer::{Frame, build_frame};
use crate::sim::{GameEvent, GamePhase, Viewport, World, tick};
use crate::tuning::Tuning;

pub struct Game {
    world: World,
    commands: VecDeque<Command>,
}

impl Game {
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        log::info!(
            "New run: seed {}, viewport {}x{}",
            seed,
            viewport.width,
            viewport.height
        );
        Self {
            world: World::new(seed, viewport, tuning),
            commands: VecDeque::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn is_running(&self) -> bool {
        self.world.is_running()
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    /// Queue the commands for a raw input event
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.commands
            .extend(input::translate(event, self.world.viewport));
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Run one animation frame: draw the current state, apply queued input,
    /// then advance physics. Returns `None` without doing anything once the
    /// run is over.
    pub fn frame(&mut self) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }

        let frame = build_frame(&self.world);

        for command in self.commands.drain(..) {
            input::apply(command, &mut self.world.player);
        }
        tick(&mut self.world);
        self.log_events();

        if !self.is_running() {
            self.commands.clear();
        }

        Some(frame)
    }

    /// Events from the most recent frame
    pub fn events(&self) -> &[GameEvent] {
        &self.world.events
    }

    fn log_events(&self) {
        for event in &self.world.events {
            match *event {
                GameEvent::Landed { score } => log::debug!("Landed, score {}", score),
                GameEvent::GemCollected { score } => {
                    log::debug!("Gem collected, score {}", score)
                }
                GameEvent::PlatformSpawned => log::trace!("Platform spawned"),
                GameEvent::CloudSpawned => log::trace!("Cloud spawned"),
                GameEvent::GameOver { score } => log::info!(
                    "Game over after {} frames, score {}",
                    self.world.frame,
                    score
                ),
            }
        }
    }

    /// Start a fresh run. Pending input from the previous run is dropped.
    pub fn restart(&mut self, seed: u64) {
        self.commands.clear();
        self.world.restart(seed);
        log::info!("Restarted with seed {}", seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use glam::Vec2;

    fn game() -> Game {
        let tuning = Tuning {
            platform_spawn_chance: 0.0,
            cloud_spawn_chance: 0.0,
            ..Default::default()
        };
        Game::new(5, Viewport::new(800.0, 600.0), tuning)
    }

    #[test]
    fn test_frame_renders_before_physics() {
        let mut game = game();
        let before = game.world().player.pos;
        let frame = game.frame().unwrap();
        // Drawn at the pre-step position
        assert_eq!(frame.quads[0].min, before);
        assert_ne!(game.world().player.pos, before);
    }

    #[test]
    fn test_input_applied_on_next_frame() {
        let mut game = game();
        game.handle_input(&InputEvent::ButtonDown(Button::Right));
        assert_eq!(game.world().player.vel.x, 0.0);

        game.frame();
        assert_eq!(game.world().player.vel.x, 5.0);

        game.handle_input(&InputEvent::ButtonUp(Button::Right));
        game.frame();
        assert_eq!(game.world().player.vel.x, 0.0);
    }

    #[test]
    fn test_tap_top_left_moves_and_jumps() {
        let mut game = game();
        game.handle_input(&InputEvent::PointerDown { x: 10.0, y: 10.0 });
        game.frame();

        let player = &game.world().player;
        assert_eq!(player.vel.x, -5.0);
        assert_eq!(player.jumps, 1);
        // Jump impulse plus one frame of gravity
        assert_eq!(player.vel.y, -14.5);
    }

    #[test]
    fn test_game_over_stops_frames_until_restart() {
        let mut game = game();
        // Nothing to land on, so the player falls out of the world
        game.world.platforms.clear();
        game.world.gems.clear();

        let mut frames = 0;
        while game.frame().is_some() {
            frames += 1;
            assert!(frames < 1000, "player never fell");
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.events(), &[GameEvent::GameOver { score: 0 }]);
        assert!(game.frame().is_none());

        game.push_command(Command::Jump);
        game.restart(6);
        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.world().platforms.len(), 2);
        assert_eq!(game.world().gems.len(), 2);
        assert!(game.world().clouds.is_empty());
        assert_eq!(game.world().player.pos, Vec2::new(400.0, 300.0));

        // Stale jump was dropped
        game.frame();
        assert_eq!(game.world().player.jumps, 0);
    }

    #[test]
    fn test_player_lands_on_starting_platform() {
        let mut game = game();
        let mut landed = false;
        for _ in 0..120 {
            game.frame();
            if game.world().player.grounded {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(game.events().contains(&GameEvent::Landed { score: 1 }));
        assert_eq!(game.score(), 1);
        assert!(game.is_running());
    }
}
