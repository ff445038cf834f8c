use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};
use web_time::Duration;

pub mod error;
pub mod player;

pub use error::Error;
pub use player::Player;

use crate::{app::Message, config::Config};

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Player, Error);

impl Page {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        match self {
            Self::Player(page) => page.render(frame, area, config),
            Self::Error(page) => page.render(frame, area, config),
        }
    }

    pub fn render_top(&self, config: &Config) -> Option<Line<'_>> {
        match self {
            Self::Player(page) => page.render_top(config),
            Self::Error(page) => page.render_top(config),
        }
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        match self {
            Self::Player(page) => page.handle_events(event, config),
            Self::Error(page) => page.handle_events(event, config),
        }
    }

    pub fn poll(&mut self, config: &Config) -> Option<Message> {
        match self {
            Self::Player(page) => page.poll(config),
            Self::Error(_) => None,
        }
    }

    /// How long the app may wait for input before the page needs a redraw
    pub fn next_wake(&self, config: &Config) -> Duration {
        match self {
            Self::Player(page) => page.next_wake(config),
            Self::Error(_) => config.settings.cursor_blink(),
        }
    }
}
