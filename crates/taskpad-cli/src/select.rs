//! Interactive multi-select prompt built on crossterm raw mode.
//!
//! Cursor and check state live in [`SelectState`], separate from the
//! terminal loop, so the keyboard handling is testable without a TTY.

use std::io::{self, Write};

use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::tty::IsTty;
use crossterm::{execute, queue};

pub struct SelectItem {
    pub label: String,
    pub checked: bool,
}

enum KeyOutcome {
    Continue,
    Confirm,
    Cancel,
}

struct SelectState {
    checked: Vec<bool>,
    cursor: usize,
}

impl SelectState {
    fn new(items: &[SelectItem]) -> Self {
        Self {
            checked: items.iter().map(|item| item.checked).collect(),
            cursor: 0,
        }
    }

    fn move_up(&mut self) {
        self.cursor = if self.cursor == 0 {
            self.checked.len() - 1
        } else {
            self.cursor - 1
        };
    }

    fn move_down(&mut self) {
        self.cursor = if self.cursor + 1 == self.checked.len() {
            0
        } else {
            self.cursor + 1
        };
    }

    fn toggle(&mut self) {
        self.checked[self.cursor] = !self.checked[self.cursor];
    }

    fn toggle_all(&mut self) {
        let target = !self.checked.iter().all(|checked| *checked);
        for checked in &mut self.checked {
            *checked = target;
        }
    }

    fn invert(&mut self) {
        for checked in &mut self.checked {
            *checked = !*checked;
        }
    }

    fn selected(&self) -> Vec<usize> {
        self.checked
            .iter()
            .enumerate()
            .filter(|(_, checked)| **checked)
            .map(|(idx, _)| idx)
            .collect()
    }
}

fn handle_key(key: KeyEvent, state: &mut SelectState) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Cancel;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Char(' ') => state.toggle(),
        KeyCode::Char('a') => state.toggle_all(),
        KeyCode::Char('i') => state.invert(),
        KeyCode::Enter => return KeyOutcome::Confirm,
        KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Cancel,
        _ => {}
    }
    KeyOutcome::Continue
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the prompt. `Ok(None)` means the user cancelled; the caller is
/// expected to abort without saving. Confirming with nothing selected is a
/// valid outcome and returns an empty selection.
pub fn multi_select(message: &str, items: &[SelectItem]) -> io::Result<Option<Vec<usize>>> {
    if items.is_empty() {
        return Ok(Some(Vec::new()));
    }
    let mut stdout = io::stdout();
    if !stdout.is_tty() {
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "interactive selection needs a terminal",
        ));
    }

    let _raw = RawModeGuard::enable()?;
    execute!(stdout, cursor::Hide)?;
    let result = run_prompt(&mut stdout, message, items);
    // Clear the prompt area and restore the cursor on every exit path.
    let height = items.len() as u16 + 1;
    let _ = execute!(
        stdout,
        cursor::MoveUp(height),
        Clear(ClearType::FromCursorDown),
        cursor::Show
    );
    result
}

fn run_prompt(
    stdout: &mut io::Stdout,
    message: &str,
    items: &[SelectItem],
) -> io::Result<Option<Vec<usize>>> {
    let mut state = SelectState::new(items);
    let height = items.len() as u16 + 1;
    draw(stdout, message, items, &state)?;
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match handle_key(key, &mut state) {
            KeyOutcome::Continue => {
                queue!(stdout, cursor::MoveUp(height), cursor::MoveToColumn(0))?;
                draw(stdout, message, items, &state)?;
            }
            KeyOutcome::Confirm => return Ok(Some(state.selected())),
            KeyOutcome::Cancel => return Ok(None),
        }
    }
}

// Draw leaves the cursor at column 0 one line below the prompt; redraw and
// cleanup both count on that.
fn draw(
    stdout: &mut io::Stdout,
    message: &str,
    items: &[SelectItem],
    state: &SelectState,
) -> io::Result<()> {
    queue!(stdout, Clear(ClearType::CurrentLine))?;
    write!(
        stdout,
        "{message} (space = toggle, a = all, i = invert, enter = confirm, esc = cancel)\r\n"
    )?;
    for (idx, item) in items.iter().enumerate() {
        queue!(stdout, Clear(ClearType::CurrentLine))?;
        let marker = if idx == state.cursor { '>' } else { ' ' };
        let checkbox = if state.checked[idx] { "[x]" } else { "[ ]" };
        write!(stdout, "{marker} {checkbox} {}\r\n", item.label)?;
    }
    stdout.flush()
}
