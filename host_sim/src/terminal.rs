//! Terminal stand-ins for the board: the engine draws into in-memory
//! displays, keyboard input is folded into the keypad matrix, and every
//! keypad scan doubles as the frame pacer and redraw point.

use std::cell::RefCell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use game_core::hal::memory::{CharDisplay, FrameBuffer, MatrixKeypad};
use game_core::hal::{SCREEN_HEIGHT, SCREEN_WIDTH, TEXT_ROWS};
use game_core::{Delay, KeyBindings, KeypadScan, PixelSurface, TextDisplay};
use tracing::{info, warn};

use crate::autopilot::{Autopilot, Observation};

/// What a terminal key means to the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Key(u8),
    Quit,
}

/// Map a terminal key onto a keypad code.
///
/// Digits, `a`-`d`, `*` and `#` are the keys printed on the keypad; the
/// letter pairs and arrows are comfortable aliases for the steering keys.
pub fn map_key(key: &KeyEvent, bindings: &KeyBindings) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let code = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('w') => bindings.left_up,
        KeyCode::Char('s') => bindings.left_down,
        KeyCode::Char('i') | KeyCode::Up => bindings.right_up,
        KeyCode::Char('k') | KeyCode::Down => bindings.right_down,
        KeyCode::Char(' ') | KeyCode::Enter => bindings.start,
        KeyCode::Char(c @ '0'..='9') => c as u8 - b'0',
        KeyCode::Char(c @ 'a'..='d') => c as u8 - b'a' + 10,
        KeyCode::Char('*') => 14,
        KeyCode::Char('#') => 15,
        _ => return None,
    };
    Some(Action::Key(code))
}

/// Fold the frame buffer two pixel rows per text line
pub fn half_block_rows(frame: &FrameBuffer) -> Vec<String> {
    (0..SCREEN_HEIGHT)
        .step_by(2)
        .map(|y| {
            (0..SCREEN_WIDTH)
                .map(|x| match (frame.get(x, y), frame.get(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect()
}

/// Everything the engine's collaborators share
pub struct Host {
    pub frame: FrameBuffer,
    pub text: CharDisplay,
    pub keypad: MatrixKeypad,
    pub observation: Observation,
    autopilot: Autopilot,
    bindings: KeyBindings,
    tick: Duration,
    last_scan: Instant,
    out: Stdout,
}

pub type SharedHost = Rc<RefCell<Host>>;

impl Host {
    pub fn new(autopilot: Autopilot, bindings: KeyBindings, tick: Duration) -> Self {
        Self {
            frame: FrameBuffer::new(),
            text: CharDisplay::new(),
            keypad: MatrixKeypad::new(),
            observation: Observation::default(),
            autopilot,
            bindings,
            tick,
            last_scan: Instant::now(),
            out: io::stdout(),
        }
    }

    pub fn shared(self) -> SharedHost {
        Rc::new(RefCell::new(self))
    }

    /// Draw both displays and wait out the rest of the tick, collecting keys.
    /// The keys seen during the wait are what the next scan reports as held.
    fn pump(&mut self) {
        if let Err(err) = self.render() {
            warn!(%err, "failed to draw frame");
        }

        let mut held = self.autopilot.keys(&self.observation, &self.bindings);
        let deadline = self.last_scan + self.tick;
        self.collect_keys(deadline, &mut held);
        self.keypad.hold(&held);
        self.last_scan = Instant::now();
    }

    fn collect_keys(&mut self, deadline: Instant, held: &mut Vec<u8>) {
        loop {
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            match event::poll(deadline - now) {
                Ok(true) => {}
                Ok(false) => return,
                Err(err) => {
                    warn!(%err, "keyboard poll failed");
                    return;
                }
            }
            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => key,
                Ok(_) => continue,
                Err(err) => {
                    warn!(%err, "keyboard read failed");
                    return;
                }
            };
            match map_key(&key, &self.bindings) {
                Some(Action::Quit) => quit(),
                Some(Action::Key(code)) if !held.contains(&code) => held.push(code),
                _ => {}
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let border = format!("+{}+", "-".repeat(SCREEN_WIDTH as usize));
        let mut line = 0u16;

        queue!(self.out, cursor::MoveTo(0, line), Print(&border))?;
        for row in half_block_rows(&self.frame) {
            line += 1;
            queue!(self.out, cursor::MoveTo(0, line), Print(format!("|{row}|")))?;
        }
        line += 1;
        queue!(self.out, cursor::MoveTo(0, line), Print(&border))?;

        for row in 1..=TEXT_ROWS {
            line += 1;
            let text = self.text.row_text(row);
            queue!(self.out, cursor::MoveTo(0, line), Print(format!("  [{text}]")))?;
        }
        line += 2;
        queue!(
            self.out,
            cursor::MoveTo(0, line),
            Print("w/s left paddle   i/k or arrows right paddle   space start   q quit")
        )?;
        self.out.flush()
    }
}

/// Put the terminal back and end the process. The engine loop never
/// returns, so this is the only way out.
pub fn quit() -> ! {
    info!("quit requested");
    restore_terminal();
    std::process::exit(0);
}

pub fn enter_terminal() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        io::stdout(),
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide
    )
}

/// Restore terminal state - called on exit or panic
pub fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
}

pub struct TermLcd(pub SharedHost);

impl PixelSurface for TermLcd {
    fn set_pixel(&mut self, x: i32, y: i32) {
        self.0.borrow_mut().frame.set_pixel(x, y);
    }

    fn clear_pixel(&mut self, x: i32, y: i32) {
        self.0.borrow_mut().frame.clear_pixel(x, y);
    }

    fn clear_surface(&mut self) {
        self.0.borrow_mut().frame.clear_surface();
    }
}

pub struct TermText(pub SharedHost);

impl TextDisplay for TermText {
    fn move_cursor(&mut self, row: u8, column: u8) {
        self.0.borrow_mut().text.move_cursor(row, column);
    }

    fn write_char(&mut self, byte: u8) {
        self.0.borrow_mut().text.write_char(byte);
    }

    fn clear_display(&mut self) {
        self.0.borrow_mut().text.clear_display();
    }
}

pub struct TermKeypad(pub SharedHost);

impl KeypadScan for TermKeypad {
    fn activate_row(&mut self, row: u8) {
        let mut host = self.0.borrow_mut();
        if row == 1 {
            host.pump();
        }
        host.keypad.activate_row(row);
    }

    fn read_active_columns(&mut self) -> u8 {
        self.0.borrow_mut().keypad.read_active_columns()
    }
}

pub struct TermDelay(pub SharedHost);

impl Delay for TermDelay {
    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    /// Show the current screens, then sleep while still honouring quit
    fn delay_ms(&mut self, ms: u32) {
        let mut host = self.0.borrow_mut();
        if let Err(err) = host.render() {
            warn!(%err, "failed to draw frame");
        }
        let mut ignored = Vec::new();
        host.collect_keys(
            Instant::now() + Duration::from_millis(u64::from(ms)),
            &mut ignored,
        );
        host.last_scan = Instant::now();
    }
}
