//! In-memory collaborators.
//!
//! Used by the tests and by the host simulator, which renders the buffers to
//! a terminal.

use std::collections::VecDeque;

use super::{
    Delay, KeypadScan, PixelSurface, TextDisplay, SCREEN_HEIGHT, SCREEN_WIDTH, TEXT_COLUMNS,
    TEXT_ROWS,
};
use crate::keypad;

/// 128x64 one-bit frame buffer, one `u128` per row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: [u128; SCREEN_HEIGHT as usize],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            rows: [0; SCREEN_HEIGHT as usize],
        }
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        (0..SCREEN_WIDTH).contains(&x) && (0..SCREEN_HEIGHT).contains(&y)
    }

    /// Whether the pixel is lit. Out-of-range reads are dark.
    pub fn get(&self, x: i32, y: i32) -> bool {
        Self::in_bounds(x, y) && self.rows[y as usize] & (1u128 << x) != 0
    }

    pub fn lit_count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| *row == 0)
    }
}

impl PixelSurface for FrameBuffer {
    fn set_pixel(&mut self, x: i32, y: i32) {
        if Self::in_bounds(x, y) {
            self.rows[y as usize] |= 1u128 << x;
        }
    }

    fn clear_pixel(&mut self, x: i32, y: i32) {
        if Self::in_bounds(x, y) {
            self.rows[y as usize] &= !(1u128 << x);
        }
    }

    fn clear_surface(&mut self) {
        self.rows = [0; SCREEN_HEIGHT as usize];
    }
}

/// 2x20 character display with an auto-advancing cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharDisplay {
    cells: [[u8; TEXT_COLUMNS as usize]; TEXT_ROWS as usize],
    row: u8,
    column: u8,
    clears: usize,
}

impl Default for CharDisplay {
    fn default() -> Self {
        Self {
            cells: [[b' '; TEXT_COLUMNS as usize]; TEXT_ROWS as usize],
            row: 1,
            column: 1,
            clears: 0,
        }
    }
}

impl CharDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a 1-based row, trailing spaces kept
    pub fn row_text(&self, row: u8) -> String {
        match self.cells.get(usize::from(row).wrapping_sub(1)) {
            Some(cells) => cells.iter().map(|&b| b as char).collect(),
            None => String::new(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        (1..=TEXT_ROWS).any(|row| self.row_text(row).contains(needle))
    }

    /// Number of `clear_display` calls so far
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl TextDisplay for CharDisplay {
    fn move_cursor(&mut self, row: u8, column: u8) {
        self.row = row;
        self.column = column;
    }

    fn write_char(&mut self, byte: u8) {
        // Characters past the visible window are dropped
        let row = usize::from(self.row).wrapping_sub(1);
        let column = usize::from(self.column).wrapping_sub(1);
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = byte;
        }
        self.column = self.column.saturating_add(1);
    }

    fn clear_display(&mut self) {
        self.cells = [[b' '; TEXT_COLUMNS as usize]; TEXT_ROWS as usize];
        self.row = 1;
        self.column = 1;
        self.clears += 1;
    }
}

/// Keypad that replays a queue of scans.
///
/// Each entry holds the four row masks seen by one full scan. Activating row
/// 1 starts a new scan and consumes the next entry; when the queue runs dry
/// every row reads as idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeypad {
    scans: VecDeque<[u8; 4]>,
    current: [u8; 4],
    active_row: u8,
    completed: usize,
}

impl ScriptedKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one scan given as raw row masks
    pub fn push_scan(&mut self, rows: [u8; 4]) {
        self.scans.push_back(rows);
    }

    /// Queue one scan in which the given key codes are held
    pub fn push_keys(&mut self, codes: &[u8]) {
        self.scans.push_back(keypad::row_masks(codes));
    }

    /// Queue `count` scans with nothing pressed
    pub fn push_idle(&mut self, count: usize) {
        for _ in 0..count {
            self.scans.push_back([0; 4]);
        }
    }

    pub fn pending(&self) -> usize {
        self.scans.len()
    }

    /// Number of scans started so far
    pub fn scans_started(&self) -> usize {
        self.completed
    }
}

impl KeypadScan for ScriptedKeypad {
    fn activate_row(&mut self, row: u8) {
        if row == 1 {
            self.current = self.scans.pop_front().unwrap_or_default();
            self.completed += 1;
        }
        self.active_row = row;
    }

    fn read_active_columns(&mut self) -> u8 {
        match usize::from(self.active_row).checked_sub(1) {
            Some(i) if i < 4 => self.current[i] & 0x0F,
            _ => 0,
        }
    }
}

/// Keypad whose held keys are set directly by a front end
#[derive(Debug, Clone, Default)]
pub struct MatrixKeypad {
    held: [u8; 4],
    active_row: u8,
}

impl MatrixKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held set with exactly `codes`
    pub fn hold(&mut self, codes: &[u8]) {
        self.held = keypad::row_masks(codes);
    }
}

impl KeypadScan for MatrixKeypad {
    fn activate_row(&mut self, row: u8) {
        self.active_row = row;
    }

    fn read_active_columns(&mut self) -> u8 {
        match usize::from(self.active_row).checked_sub(1) {
            Some(i) if i < 4 => self.held[i],
            _ => 0,
        }
    }
}

/// Delay that records requests instead of sleeping
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    pub us: Vec<u32>,
    pub ms: Vec<u32>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl Delay for RecordingDelay {
    fn delay_us(&mut self, us: u32) {
        self.us.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}
