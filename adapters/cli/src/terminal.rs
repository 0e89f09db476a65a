//! Crossterm backend: raw-mode alternate screen output and key polling.

use std::{
    io::{self, BufWriter, Stdout, Write},
    thread,
    time::Duration,
};

use anyhow::{Context, Result as AnyResult};
use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use dungeon_radar_core::{Action, SCREEN_HEIGHT, SCREEN_WIDTH};
use dungeon_radar_rendering::{GameOver, InputSource, Presentation, RenderingBackend};

const GAME_OVER_HOLD: Duration = Duration::from_secs(2);

/// Failures talking to the controlling terminal.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TerminalError {
    /// Raw mode or the alternate screen could not be entered.
    #[error("failed to prepare the terminal")]
    Startup(#[source] io::Error),
    /// Writing a frame failed.
    #[error("failed to draw to the terminal")]
    Draw(#[source] io::Error),
    /// Reading a key event failed.
    #[error("failed to read terminal input")]
    Input(#[source] io::Error),
}

/// Owns the terminal for the lifetime of a session and restores it on drop.
pub(crate) struct Terminal {
    out: BufWriter<Stdout>,
}

impl Terminal {
    /// Switches to raw mode on the alternate screen with the cursor hidden.
    pub(crate) fn enter() -> Result<Self, TerminalError> {
        terminal::enable_raw_mode().map_err(TerminalError::Startup)?;
        let mut out = BufWriter::new(io::stdout());
        if let Err(error) = execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(TerminalError::Startup(error));
        }
        Ok(Self { out })
    }

    fn draw<I>(&mut self, lines: I) -> Result<(), TerminalError>
    where
        I: IntoIterator<Item = String>,
    {
        write_lines(&mut self.out, lines).map_err(TerminalError::Draw)?;
        self.out.flush().map_err(TerminalError::Draw)
    }
}

/// Queues each line at the start of its row and clears what an older, longer
/// line left behind.
fn write_lines<W, I>(out: &mut W, lines: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    for (row, line) in lines.into_iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, row), Print(line), Clear(ClearType::UntilNewLine))?;
    }
    Ok(())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl RenderingBackend for Terminal {
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()> {
        let status = std::iter::once(presentation.status.to_string());
        self.draw(presentation.frame.rows().chain(status))
            .context("failed to present frame")
    }

    fn present_game_over(&mut self, game_over: &GameOver) -> AnyResult<()> {
        queue!(self.out, Clear(ClearType::All))
            .map_err(TerminalError::Draw)
            .context("failed to clear the screen")?;
        self.draw(game_over.frame(SCREEN_WIDTH, SCREEN_HEIGHT).rows())
            .context("failed to present game over screen")?;
        thread::sleep(GAME_OVER_HOLD);
        Ok(())
    }
}

impl InputSource for Terminal {
    fn poll_action(&mut self) -> AnyResult<Option<Action>> {
        if !event::poll(Duration::ZERO).map_err(TerminalError::Input)? {
            return Ok(None);
        }
        match event::read().map_err(TerminalError::Input)? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(action_for(key)),
            _ => Ok(None),
        }
    }
}

/// Maps a key press to a player action; keys are case-insensitive.
fn action_for(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Left => Some(Action::TurnLeft),
        KeyCode::Right => Some(Action::TurnRight),
        KeyCode::Up => Some(Action::MoveForward),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(glyph) => match glyph.to_ascii_lowercase() {
            'a' => Some(Action::TurnLeft),
            'd' => Some(Action::TurnRight),
            'w' => Some(Action::MoveForward),
            ' ' => Some(Action::Fire),
            'm' => Some(Action::ToggleMap),
            'q' => Some(Action::Quit),
            _ => None,
        },
        _ => None,
    }
}
