use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    style::{Style, Stylize},
    text::ToLine,
    widgets::Padding,
};
use tracing::{error, info};

use crate::config::Config;
use crate::page;
use crate::utils::ROUNDED_BLOCK;

/// An app message
pub enum Message {
    /// An error occurred
    Error(Box<dyn std::error::Error + Send>),
    /// Read the settings from disk and apply them
    Reload,
    /// Rebuild the player from the current settings
    Reset,
    /// Quit the application
    Quit,
}

/// The app itself
pub struct App {
    page: page::Page,
    config: Config,
    /// Banner to select when the player is rebuilt
    selected: usize,
}

impl App {
    /// Creates a new `App`, playing the banner at `selected`
    pub fn new(config: Config, selected: usize) -> Self {
        let page = Self::player(&config, selected);
        Self {
            page,
            config,
            selected,
        }
    }

    fn player(config: &Config, selected: usize) -> page::Page {
        page::Player::new(config.banners(), selected)
            .map_or_else(|error| page::Error::from(error).into(), Into::into)
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();
        let result = self.run_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        loop {
            let timeout = self.page.next_wake(&self.config);
            let event = event::poll(timeout)?.then(event::read).transpose()?;
            if let Some(message) = self.handle_events(event) {
                match message {
                    Message::Error(error) => self.show_error(error.as_ref()),
                    Message::Reload => self.reload(),
                    Message::Reset => self.page = Self::player(&self.config, self.selected),
                    Message::Quit => break,
                }
            }
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    fn show_error(&mut self, error: &dyn std::error::Error) {
        error!(%error, "Showing error");
        self.page = page::Error::from(error).into();
    }

    /// Reloads the settings and hands the new banners to the player
    fn reload(&mut self) {
        if let Err(error) = self.config.reload() {
            self.show_error(&error);
            return;
        }
        info!(directory = %self.config.directory.display(), "Reloaded settings");

        let banners = self.config.banners();
        let result = if let page::Page::Player(player) = &mut self.page {
            player.replace_banners(banners).map(|restarted| {
                info!(restarted, phase = %player.engine().phase(), "Applied reloaded banners");
            })
        } else {
            self.page = Self::player(&self.config, self.selected);
            Ok(())
        };

        if let Err(error) = result {
            self.show_error(&error);
        }
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let mut block = ROUNDED_BLOCK
            .border_style(Style::new().fg(self.config.settings.theme.border))
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("TYPECAST".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned())
            .title_bottom(
                "<Tab> switch · <r> restart · <x> reset · <s> start · <CTRL-R> reload"
                    .to_line()
                    .centered(),
            );

        if let Some(top_msg) = self.page.render_top(&self.config) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.config);
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        event_opt
            .and_then(|event| {
                self.page.handle_events(&event, &self.config).or_else(|| {
                    match event {
                        Event::Key(key) => Self::handle_key_event(key),
                        _ => None, // Reserved for future event handling
                    }
                })
            })
            .or_else(|| self.page.poll(&self.config))
    }

    /// Global key events
    const fn handle_key_event(key: KeyEvent) -> Option<Message> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Char('q') | KeyCode::Esc, KeyModifiers::NONE) => Some(Message::Quit),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(Message::Reload),
            _ => None,
        }
    }
}
