use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType, Padding},
};
use web_time::{Duration, Instant};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Padding that centers content of the given size inside `area`.
///
/// `None` leaves that axis unpadded.
pub const fn centered_padding(area: Rect, height: Option<u16>, width: Option<u16>) -> Padding {
    let vertical = match height {
        Some(height) => area.height.saturating_sub(height) / 2,
        None => 0,
    };
    let horizontal = match width {
        Some(width) => area.width.saturating_sub(width) / 2,
        None => 0,
    };
    Padding::new(horizontal, horizontal, vertical, 0)
}

/// Measures the wall-clock time between two frames
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous lap (or since creation)
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.contains(mods)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;

    #[test]
    fn test_centered_padding() {
        let area = Rect::new(0, 0, 40, 11);

        let padding = centered_padding(area, Some(3), None);
        assert_eq!(padding, Padding::new(0, 0, 4, 0));

        let padding = centered_padding(area, Some(20), Some(10));
        assert_eq!(padding, Padding::new(15, 15, 0, 0));
    }

    #[test]
    fn test_key_helpers() {
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(key.is_press());
        assert!(key.has_mods(KeyModifiers::CONTROL));

        let plain = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert!(plain.is_press());
        assert!(!plain.has_mods(KeyModifiers::CONTROL));
    }
}
