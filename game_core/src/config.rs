use glam::IVec2;

use crate::components::Side;
use crate::error::ConfigError;
use crate::hal::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::keypad;
use crate::params::Params;

/// Keypad codes for every action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub start: u8,
    pub left_up: u8,
    pub left_down: u8,
    pub right_up: u8,
    pub right_down: u8,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            start: Params::KEY_START,
            left_up: Params::KEY_LEFT_UP,
            left_down: Params::KEY_LEFT_DOWN,
            right_up: Params::KEY_RIGHT_UP,
            right_down: Params::KEY_RIGHT_DOWN,
        }
    }
}

impl KeyBindings {
    fn all(&self) -> [u8; 5] {
        [
            self.start,
            self.left_up,
            self.left_down,
            self.right_up,
            self.right_down,
        ]
    }

    /// Paddle and direction (-1 up, +1 down) a key steers, if any
    pub fn steer(&self, code: u8) -> Option<(Side, i32)> {
        match code {
            c if c == self.left_up => Some((Side::Left, -1)),
            c if c == self.left_down => Some((Side::Left, 1)),
            c if c == self.right_up => Some((Side::Right, -1)),
            c if c == self.right_down => Some((Side::Right, 1)),
            _ => None,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub win_score: u8,
    pub paddle_speed: i32,
    pub game_over_delay_ms: u32,
    pub ball_start: IVec2,
    pub ball_serve_velocity: IVec2,
    pub keys: KeyBindings,
    pub left_name: String,
    pub right_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            win_score: Params::WIN_SCORE,
            paddle_speed: Params::PADDLE_SPEED,
            game_over_delay_ms: Params::GAME_OVER_DELAY_MS,
            ball_start: Params::BALL_START,
            ball_serve_velocity: Params::BALL_SERVE_VELOCITY,
            keys: KeyBindings::default(),
            left_name: Params::LEFT_NAME.to_string(),
            right_name: Params::RIGHT_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fastest paddle step that can still land inside the band
    pub const MAX_PADDLE_SPEED: i32 = Params::PADDLE_MAX_Y - Params::PADDLE_MIN_Y;

    /// Check the values the engine relies on.
    ///
    /// The score is shown as one digit, so the win score is capped at 9.
    /// Speeds are bounded so position updates cannot overflow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=9).contains(&self.win_score) {
            return Err(ConfigError::WinScore(self.win_score));
        }
        if !(1..=Self::MAX_PADDLE_SPEED).contains(&self.paddle_speed) {
            return Err(ConfigError::PaddleSpeed {
                speed: self.paddle_speed,
                max: Self::MAX_PADDLE_SPEED,
            });
        }
        let vel = self.ball_serve_velocity;
        if vel.x == 0
            || vel.x.unsigned_abs() > SCREEN_WIDTH.unsigned_abs()
            || vel.y.unsigned_abs() > SCREEN_HEIGHT.unsigned_abs()
        {
            return Err(ConfigError::ServeVelocity(vel));
        }

        let keys = self.keys.all();
        for (i, &code) in keys.iter().enumerate() {
            if keypad::position_of(code).is_none() {
                return Err(ConfigError::UnknownKey(code));
            }
            if keys[..i].contains(&code) {
                return Err(ConfigError::DuplicateKey(code));
            }
        }
        Ok(())
    }

    /// Get X position for a paddle
    pub fn paddle_x(&self, side: Side) -> i32 {
        match side {
            Side::Left => Params::LEFT_PADDLE_X,
            Side::Right => Params::RIGHT_PADDLE_X,
        }
    }

    /// Serve position of a paddle
    pub fn paddle_start(&self, side: Side) -> IVec2 {
        IVec2::new(self.paddle_x(side), Params::PADDLE_START_Y)
    }

    /// Whether a paddle may be committed to vertical position `y`
    pub fn paddle_in_band(&self, y: i32) -> bool {
        Params::PADDLE_MIN_Y < y && y < Params::PADDLE_MAX_Y
    }

    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_name,
            Side::Right => &self.right_name,
        }
    }

    pub fn slot(&self, side: Side) -> u8 {
        match side {
            Side::Left => Params::LEFT_SLOT,
            Side::Right => Params::RIGHT_SLOT,
        }
    }
}
