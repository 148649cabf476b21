//! 4x4 keypad decoding.
//!
//! A scan activates rows 1 to 4 in order and reads the active columns of
//! each. Columns are taken highest first (4, 3, 2, 1) and every hit is
//! translated through [`KEYCODES`] into the tick's [`Input`] buffer. Once
//! [`BUFFER_SIZE`] keys are collected the scan stops and further presses in
//! the same scan are dropped.

use crate::hal::KeypadScan;

/// Maximum number of keys reported per scan
pub const BUFFER_SIZE: usize = 4;

/// Key code printed on each key, indexed `[row - 1][column - 1]`
pub const KEYCODES: [[u8; 4]; 4] = [
    [1, 2, 3, 10],
    [4, 5, 6, 11],
    [7, 8, 9, 12],
    [14, 0, 15, 13],
];

/// Keys detected during one scan, in scan order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    buffer: [u8; BUFFER_SIZE],
    presses: u8,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of presses recorded
    pub fn presses(&self) -> usize {
        usize::from(self.presses)
    }

    pub fn is_full(&self) -> bool {
        self.presses() == BUFFER_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.presses == 0
    }

    /// Recorded key codes, oldest first
    pub fn keys(&self) -> &[u8] {
        &self.buffer[..self.presses()]
    }

    pub fn contains(&self, code: u8) -> bool {
        self.keys().contains(&code)
    }

    /// Append a code. Returns `false` (and drops the code) once full.
    pub fn push(&mut self, code: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.buffer[self.presses()] = code;
        self.presses += 1;
        true
    }

    /// Decode one row's column mask into the buffer, column 4 first
    pub fn decode_row(&mut self, row: u8, columns: u8) {
        for column in active_columns(columns) {
            if let Some(code) = key_code(row, column) {
                if !self.push(code) {
                    break;
                }
            }
        }
    }
}

/// Columns set in `mask`, highest first
pub fn active_columns(mask: u8) -> impl Iterator<Item = u8> {
    (1..=4u8).rev().filter(move |column| mask & (1 << (column - 1)) != 0)
}

/// Code of the key at a 1-based `(row, column)`
pub fn key_code(row: u8, column: u8) -> Option<u8> {
    let r = usize::from(row).checked_sub(1)?;
    let c = usize::from(column).checked_sub(1)?;
    KEYCODES.get(r)?.get(c).copied()
}

/// 1-based `(row, column)` of the key printed with `code`
pub fn position_of(code: u8) -> Option<(u8, u8)> {
    KEYCODES.iter().enumerate().find_map(|(r, row)| {
        row.iter()
            .position(|&c| c == code)
            .map(|c| (r as u8 + 1, c as u8 + 1))
    })
}

/// Row masks that a scan would read with `codes` held down
pub fn row_masks(codes: &[u8]) -> [u8; 4] {
    let mut rows = [0u8; 4];
    for (row, column) in codes.iter().filter_map(|&code| position_of(code)) {
        rows[usize::from(row - 1)] |= 1 << (column - 1);
    }
    rows
}

/// Run one full keypad scan
pub fn scan<K: KeypadScan>(keypad: &mut K) -> Input {
    let mut input = Input::new();
    for row in 1..=4u8 {
        if input.is_full() {
            break;
        }
        keypad.activate_row(row);
        let columns = keypad.read_active_columns();
        input.decode_row(row, columns);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::memory::ScriptedKeypad;

    /// Fixed row masks, remembering which rows were driven
    struct RowLog {
        rows: [u8; 4],
        active: u8,
        activated: Vec<u8>,
    }

    impl KeypadScan for RowLog {
        fn activate_row(&mut self, row: u8) {
            self.active = row;
            self.activated.push(row);
        }

        fn read_active_columns(&mut self) -> u8 {
            self.rows[usize::from(self.active - 1)]
        }
    }

    #[test]
    fn test_key_code_table() {
        assert_eq!(key_code(1, 1), Some(1));
        assert_eq!(key_code(2, 2), Some(5));
        assert_eq!(key_code(4, 2), Some(0));
        assert_eq!(key_code(4, 4), Some(13));
        assert_eq!(key_code(0, 1), None);
        assert_eq!(key_code(1, 5), None);
    }

    #[test]
    fn test_position_of_inverts_key_code() {
        for code in 0..=15 {
            let (row, column) = position_of(code).expect("every code is on the keypad");
            assert_eq!(key_code(row, column), Some(code));
        }
        assert_eq!(position_of(16), None);
    }

    #[test]
    fn test_row_columns_are_decoded_highest_first() {
        let mut input = Input::new();
        input.decode_row(2, 0b1010);
        assert_eq!(input.keys(), &[11, 5], "Column 4 before column 2");
    }

    #[test]
    fn test_scan_visits_rows_in_order() {
        let mut keypad = ScriptedKeypad::new();
        keypad.push_scan([0b0001, 0, 0b0100, 0]);
        let input = scan(&mut keypad);
        assert_eq!(input.keys(), &[1, 9]);
        assert_eq!(input.presses(), 2);
    }

    #[test]
    fn test_scan_caps_at_buffer_size() {
        let mut keypad = ScriptedKeypad::new();
        // Three keys on row 1, three on row 2
        keypad.push_scan([0b0111, 0b0111, 0, 0b1111]);
        let input = scan(&mut keypad);
        assert!(input.is_full());
        assert_eq!(input.keys(), &[3, 2, 1, 6], "Presses past the fourth are dropped");
    }

    #[test]
    fn test_scan_stops_once_buffer_is_full() {
        let mut keypad = RowLog {
            rows: [0b0011, 0b1001, 0b1111, 0b1111],
            active: 0,
            activated: Vec::new(),
        };
        let input = scan(&mut keypad);
        assert_eq!(input.keys(), &[2, 1, 11, 4]);
        assert_eq!(keypad.activated, vec![1, 2], "Rows 3 and 4 are never driven");
    }

    #[test]
    fn test_dropped_presses_are_not_carried_over() {
        let mut keypad = ScriptedKeypad::new();
        keypad.push_scan([0b1111, 0b1111, 0, 0]);
        keypad.push_idle(1);
        assert_eq!(scan(&mut keypad).presses(), 4);
        assert!(scan(&mut keypad).is_empty());
    }

    #[test]
    fn test_idle_scan_is_empty() {
        let mut keypad = ScriptedKeypad::new();
        let input = scan(&mut keypad);
        assert!(input.is_empty());
        assert!(!input.contains(0));
    }

    #[test]
    fn test_row_masks() {
        assert_eq!(row_masks(&[1, 7, 3, 9]), [0b0101, 0, 0b0101, 0]);
        assert_eq!(row_masks(&[5, 5]), [0, 0b0010, 0, 0]);
    }
}
