use glam::IVec2;

/// Game tuning parameters for Superpong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Serve
    pub const BALL_START: IVec2 = IVec2::new(62, 30);
    pub const BALL_SERVE_VELOCITY: IVec2 = IVec2::new(5, 0);

    // Paddles
    pub const LEFT_PADDLE_X: i32 = 10;
    pub const RIGHT_PADDLE_X: i32 = 110;
    pub const PADDLE_START_Y: i32 = 30;
    pub const PADDLE_SPEED: i32 = 2; // pixels per tick per key
    // A paddle move is committed only if the new y is strictly inside these
    pub const PADDLE_MIN_Y: i32 = 3;
    pub const PADDLE_MAX_Y: i32 = 53;

    // Score
    pub const WIN_SCORE: u8 = 3; // First to 3 wins
    pub const GAME_OVER_DELAY_MS: u32 = 5000;

    // Keypad bindings
    pub const KEY_START: u8 = 5;
    pub const KEY_LEFT_UP: u8 = 1;
    pub const KEY_LEFT_DOWN: u8 = 7;
    pub const KEY_RIGHT_UP: u8 = 3;
    pub const KEY_RIGHT_DOWN: u8 = 9;

    // Character display
    pub const LEFT_NAME: &'static str = "Jakob";
    pub const RIGHT_NAME: &'static str = "Emil";
    pub const LEFT_SLOT: u8 = 1;
    pub const RIGHT_SLOT: u8 = 13;
}
