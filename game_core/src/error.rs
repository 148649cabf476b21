use glam::IVec2;
use thiserror::Error;

/// Rejected game configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("win score must be between 1 and 9, got {0}")]
    WinScore(u8),

    #[error("paddle speed must be between 1 and {max}, got {speed}")]
    PaddleSpeed { speed: i32, max: i32 },

    #[error("ball serve velocity {0} must move sideways and stay within the screen")]
    ServeVelocity(IVec2),

    #[error("key code {0} is not on the keypad")]
    UnknownKey(u8),

    #[error("key code {0} is bound to more than one action")]
    DuplicateKey(u8),
}

/// Errors raised while setting up a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("player name {name:?} is longer than {max} characters")]
    NameTooLong { name: String, max: usize },

    #[error("player name {0:?} must be printable ASCII")]
    NameNotAscii(String),
}
