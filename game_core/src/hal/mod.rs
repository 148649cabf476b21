//! Hardware collaborators the engine drives.
//!
//! The engine never talks to registers directly. A board (or the host
//! simulator) implements these traits and hands them to [`crate::Game`].
//! Every call is blocking; implementations that wait on hardware busy flags
//! do so without a timeout.

pub mod memory;

/// Width of the graphic display in pixels
pub const SCREEN_WIDTH: i32 = 128;
/// Height of the graphic display in pixels
pub const SCREEN_HEIGHT: i32 = 64;

/// Character display geometry
pub const TEXT_ROWS: u8 = 2;
pub const TEXT_COLUMNS: u8 = 20;

/// Monochrome pixel surface, [`SCREEN_WIDTH`] x [`SCREEN_HEIGHT`].
///
/// Implementations must ignore coordinates outside the surface.
pub trait PixelSurface {
    fn set_pixel(&mut self, x: i32, y: i32);
    fn clear_pixel(&mut self, x: i32, y: i32);
    fn clear_surface(&mut self);
}

/// Character display. Rows and columns are 1-based.
pub trait TextDisplay {
    fn move_cursor(&mut self, row: u8, column: u8);
    fn write_char(&mut self, byte: u8);
    fn clear_display(&mut self);
}

/// Keypad matrix scan. `row` is 1..=4; the returned mask has bit 3 set for
/// column 4 down to bit 0 for column 1.
pub trait KeypadScan {
    fn activate_row(&mut self, row: u8);
    fn read_active_columns(&mut self) -> u8;
}

/// Blocking delays
pub trait Delay {
    fn delay_us(&mut self, us: u32);
    fn delay_ms(&mut self, ms: u32);
}

/// The set of collaborators a game runs against
#[derive(Debug, Default)]
pub struct Peripherals<P, T, K, D> {
    pub lcd: P,
    pub text: T,
    pub keypad: K,
    pub delay: D,
}

impl<P, T, K, D> Peripherals<P, T, K, D>
where
    P: PixelSurface,
    T: TextDisplay,
    K: KeypadScan,
    D: Delay,
{
    pub fn new(lcd: P, text: T, keypad: K, delay: D) -> Self {
        Self {
            lcd,
            text,
            keypad,
            delay,
        }
    }
}
