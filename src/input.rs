//! Input translation
//!
//! Raw events from the page (on-screen buttons, canvas taps, keys) become a
//! small set of [`Command`]s. The simulation only ever sees commands.

use crate::sim::{Player, Viewport};

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Release of any horizontal control
    Stop,
    Jump,
}

/// On-screen control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Jump,
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Restart,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            " " | "ArrowUp" | "w" | "W" => Some(Key::Jump),
            "Enter" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// A raw input event, with pointer positions in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ButtonDown(Button),
    ButtonUp(Button),
    /// Mouse down or touch start on the canvas
    PointerDown { x: f32, y: f32 },
    /// Mouse up or touch end on the canvas
    PointerUp,
    KeyDown(Key),
    KeyUp(Key),
}

/// Translate one event into the commands it stands for.
///
/// Canvas presses steer by screen half (left/right) and also jump when they
/// land in the top half, so a single tap can do both.
pub fn translate(event: &InputEvent, viewport: Viewport) -> Vec<Command> {
    match *event {
        InputEvent::ButtonDown(Button::Left) | InputEvent::KeyDown(Key::Left) => {
            vec![Command::MoveLeft]
        }
        InputEvent::ButtonDown(Button::Right) | InputEvent::KeyDown(Key::Right) => {
            vec![Command::MoveRight]
        }
        InputEvent::ButtonDown(Button::Jump) | InputEvent::KeyDown(Key::Jump) => {
            vec![Command::Jump]
        }
        InputEvent::ButtonUp(Button::Left | Button::Right)
        | InputEvent::KeyUp(Key::Left | Key::Right)
        | InputEvent::PointerUp => vec![Command::Stop],
        InputEvent::PointerDown { x, y } => {
            let mut commands = Vec::with_capacity(2);
            commands.push(if x < viewport.mid_x() {
                Command::MoveLeft
            } else {
                Command::MoveRight
            });
            if y < viewport.mid_y() {
                commands.push(Command::Jump);
            }
            commands
        }
        // Jump has no release; restart is handled by the lifecycle
        InputEvent::ButtonUp(Button::Jump)
        | InputEvent::KeyUp(Key::Jump | Key::Restart)
        | InputEvent::KeyDown(Key::Restart) => Vec::new(),
    }
}

/// Apply a command to the player
pub fn apply(command: Command, player: &mut Player) {
    match command {
        Command::MoveLeft => player.move_left(),
        Command::MoveRight => player.move_right(),
        Command::Stop => player.stop(),
        Command::Jump => {
            if !player.jump() {
                log::trace!("Jump ignored, {} of {} used", player.jumps, player.max_jumps);
            }
        }
    }
}
