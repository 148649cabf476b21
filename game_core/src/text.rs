//! Messages on the 20x2 character display.
//!
//! Strings are written one byte at a time after positioning the cursor.
//! Anything past column 20 is the display's problem.

use crate::hal::TextDisplay;
use crate::resources::{Player, Players};

pub const WELCOME: &str = "Welcome to Superpong!";
pub const SCORE_LABEL: &str = "Score: ";
pub const WINS: &str = " wins!";

pub fn write_str<T: TextDisplay>(text: &mut T, s: &str) {
    for byte in s.bytes() {
        text.write_char(byte);
    }
}

pub fn write_at<T: TextDisplay>(text: &mut T, row: u8, column: u8, s: &str) {
    text.move_cursor(row, column);
    write_str(text, s);
}

/// Welcome banner and start prompt
pub fn draw_start_screen<T: TextDisplay>(text: &mut T, start_key: u8) {
    text.clear_display();
    write_at(text, 1, 1, WELCOME);
    write_at(text, 2, 1, &format!("Press {start_key} to start."));
}

/// Names on the first row, score labels under them
pub fn draw_labels<T: TextDisplay>(text: &mut T, players: &Players) {
    for (_side, player) in players.iter() {
        write_at(text, 1, player.slot(), player.name());
    }
    for (_side, player) in players.iter() {
        write_at(text, 2, player.slot(), SCORE_LABEL);
    }
}

/// Single score digit right after the player's label
pub fn draw_score<T: TextDisplay>(text: &mut T, player: &Player) {
    let column = player.slot() + SCORE_LABEL.len() as u8;
    text.move_cursor(2, column);
    text.write_char(b'0' + player.score().min(9));
}

pub fn draw_winner<T: TextDisplay>(text: &mut T, player: &Player) {
    text.clear_display();
    text.move_cursor(1, 1);
    write_str(text, player.name());
    write_str(text, WINS);
}
