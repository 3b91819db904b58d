//! Directional input collaborator
//!
//! Tracks which movement keys are held and turns them into a [`TickInput`].
//! When both keys of an axis are held, the one pressed most recently wins.

use glam::Vec2;

use crate::sim::{Command, TickInput};

/// A movement direction key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map a DOM-style key name (arrows and WASD, either case)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Lifecycle hotkey for a key name: Enter starts, P pauses or resumes, R retries
pub fn hotkey_command(name: &str) -> Option<Command> {
    match name {
        "Enter" => Some(Command::Start),
        "p" | "P" => Some(Command::TogglePause),
        "r" | "R" => Some(Command::Retry),
        _ => None,
    }
}

/// One axis: two opposing keys plus which was pressed last
#[derive(Debug, Clone, Copy, Default)]
struct Axis {
    negative: bool,
    positive: bool,
    /// true when the positive key is the latest press
    positive_last: bool,
}

impl Axis {
    fn set(&mut self, positive: bool, pressed: bool) {
        if positive {
            self.positive = pressed;
        } else {
            self.negative = pressed;
        }
        if pressed {
            self.positive_last = positive;
        }
    }

    fn value(&self) -> f32 {
        match (self.negative, self.positive) {
            (true, true) => {
                if self.positive_last {
                    1.0
                } else {
                    -1.0
                }
            }
            (true, false) => -1.0,
            (false, true) => 1.0,
            (false, false) => 0.0,
        }
    }
}

/// Held movement keys (keyboard and touch buttons feed the same state)
#[derive(Debug, Clone, Default)]
pub struct Controls {
    horizontal: Axis,
    vertical: Axis,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Feed a named key event; returns false for keys that do not move
    pub fn handle_named(&mut self, name: &str, pressed: bool) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.set(key, pressed);
                true
            }
            None => false,
        }
    }

    /// Release everything (focus lost, pause)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Up => self.vertical.negative,
            Key::Down => self.vertical.positive,
            Key::Left => self.horizontal.negative,
            Key::Right => self.horizontal.positive,
        }
    }

    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.horizontal.value(), self.vertical.value())
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput::new(self.direction())
    }

    fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up | Key::Down => self.vertical.set(key == Key::Down, pressed),
            Key::Left | Key::Right => self.horizontal.set(key == Key::Right, pressed),
        }
    }
}
