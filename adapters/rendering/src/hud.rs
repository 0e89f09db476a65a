//! Weapon overlay, status line and the end-of-session screen.

use std::fmt;

use crate::Frame;

const GUN: [&str; 3] = ["   ║█║   ", "══╣█╠══", "   ║█║   "];
const CONTROLS_HINT: &str = "[W/A/D move | SPACE shoot | M map | Q quit]";

/// Stamps the weapon glyphs centred along the bottom rows of the view.
pub fn draw_gun(frame: &mut Frame) {
    let width = frame.width() as i32;
    let top = frame.height() as i32 - GUN.len() as i32;

    for (offset, line) in GUN.iter().enumerate() {
        let start = (width - line.chars().count() as i32) / 2;
        for (index, glyph) in line.chars().enumerate() {
            frame.set(start + index as i32, top + offset as i32, glyph);
        }
    }
}

/// Single summary line shown under the view every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusLine {
    /// Remaining player health.
    pub health: f32,
    /// Enemies killed so far.
    pub kills: u32,
    /// Enemies still alive.
    pub enemies: usize,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP:{}  Kills:{}  Enemies:{}  {CONTROLS_HINT}",
            self.health.max(0.0) as u32,
            self.kills,
            self.enemies
        )
    }
}

/// Reason a session stopped running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Player health reached zero.
    Died,
    /// Player asked to leave.
    Quit,
}

/// Final screen held briefly before the terminal is restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    /// Why the session ended.
    pub end: SessionEnd,
    /// Enemies killed during the session.
    pub kills: u32,
}

impl GameOver {
    /// Headline shown in the middle of the screen.
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        match self.end {
            SessionEnd::Died => "☠ YOU DIED ☠",
            SessionEnd::Quit => "SESSION ENDED",
        }
    }

    /// Renders the headline and kill count centred on a blank frame.
    #[must_use]
    pub fn frame(&self, width: usize, height: usize) -> Frame {
        let mut frame = Frame::blank(width, height);
        let middle = height as i32 / 2;
        write_centred(&mut frame, middle, self.headline());
        write_centred(&mut frame, middle + 1, &format!("Kills: {}", self.kills));
        frame
    }
}

fn write_centred(frame: &mut Frame, row: i32, text: &str) {
    let start = (frame.width() as i32 - text.chars().count() as i32) / 2;
    for (index, glyph) in text.chars().enumerate() {
        frame.set(start + index as i32, row, glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_truncates_health() {
        let status = StatusLine {
            health: 87.9,
            kills: 3,
            enemies: 4,
        };
        assert_eq!(
            status.to_string(),
            "HP:87  Kills:3  Enemies:4  [W/A/D move | SPACE shoot | M map | Q quit]"
        );
    }

    #[test]
    fn gun_sits_on_the_bottom_rows() {
        let mut frame = Frame::blank(100, 32);
        draw_gun(&mut frame);

        let rows: Vec<String> = frame.rows().collect();
        assert_eq!(rows[29].trim(), "║█║");
        assert_eq!(rows[30].trim(), "══╣█╠══");
        assert_eq!(rows[31].trim(), "║█║");
        assert_eq!(frame.get(49, 30), Some('█'));
    }

    #[test]
    fn game_over_shows_reason_and_kills() {
        let screen = GameOver {
            end: SessionEnd::Quit,
            kills: 5,
        }
        .frame(40, 10);
        let rows: Vec<String> = screen.rows().collect();

        assert_eq!(rows[5].trim(), "SESSION ENDED");
        assert_eq!(rows[6].trim(), "Kills: 5");
    }
}
