use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use tracing::{debug, info};
use typewriter::{Phase, Typewriter};
use web_time::Duration;

use crate::{
    app::Message,
    config::{BannerConfig, Config},
    utils::{FrameClock, KeyEventHelper, center, centered_padding},
};

/// Page: Player
///
/// Plays one banner at a time and lets the user switch between them
#[derive(Debug)]
pub struct Player {
    engine: Typewriter,
    banners: Vec<BannerConfig>,
    selected: usize,
    clock: FrameClock,
    blink: Blink,
}

impl Player {
    /// Creates the page and starts the selected banner
    pub fn new(mut banners: Vec<BannerConfig>, selected: usize) -> Result<Self, typewriter::Error> {
        if banners.is_empty() {
            banners.push(BannerConfig::default());
        }
        let selected = selected.min(banners.len() - 1);

        let mut engine = Typewriter::new(banners[selected].typewriter.clone())?;
        engine.start();
        info!(banner = %banners[selected].name, "Playing banner");

        Ok(Self {
            engine,
            banners,
            selected,
            clock: FrameClock::new(),
            blink: Blink::default(),
        })
    }

    pub const fn engine(&self) -> &Typewriter {
        &self.engine
    }

    pub fn banner(&self) -> &BannerConfig {
        &self.banners[self.selected]
    }

    /// Switches to the banner at `index`, wrapping around
    ///
    /// The engine restarts only if the texts or the looping differ from the
    /// current ones.
    pub fn select(&mut self, index: usize) -> Result<bool, typewriter::Error> {
        let index = index % self.banners.len();
        let restarted = self
            .engine
            .reconfigure(self.banners[index].typewriter.clone())?;
        self.selected = index;
        self.blink.reset();

        info!(banner = %self.banners[index].name, restarted, "Switched banner");
        Ok(restarted)
    }

    pub fn next_banner(&mut self) -> Result<bool, typewriter::Error> {
        self.select(self.selected + 1)
    }

    pub fn previous_banner(&mut self) -> Result<bool, typewriter::Error> {
        self.select(self.selected + self.banners.len() - 1)
    }

    /// Swaps in a freshly loaded list of banners, keeping the current one by name
    pub fn replace_banners(
        &mut self,
        mut banners: Vec<BannerConfig>,
    ) -> Result<bool, typewriter::Error> {
        if banners.is_empty() {
            banners.push(BannerConfig::default());
        }

        let name = &self.banners[self.selected].name;
        let index = banners
            .iter()
            .position(|banner| &banner.name == name)
            .unwrap_or_default();

        debug!(count = banners.len(), index, "Replacing banners");
        self.banners = banners;
        self.select(index)
    }

    /// Lets `elapsed` pass for the animation and the cursor
    pub fn advance(&mut self, elapsed: Duration, config: &Config) {
        self.engine.advance(elapsed);
        self.blink.advance(elapsed, config.settings.cursor_blink());
    }

    /// Whether the cursor is drawn right now
    pub fn cursor_visible(&self) -> bool {
        if !self.engine.show_cursor() {
            return false;
        }

        // Solid while the text is moving
        matches!(self.engine.phase(), Phase::Typing | Phase::Deleting) || !self.blink.hidden
    }
}

// Rendering logic
impl Player {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme;
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let mut spans = vec![Span::styled(
            self.engine.display_text(),
            Style::new().fg(theme.text).bold(),
        )];
        if self.cursor_visible() {
            spans.push(Span::styled(
                theme.cursor.symbol.as_str(),
                Style::new().fg(theme.cursor.color),
            ));
        }

        let line = Line::from(spans);
        let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
        let height = width.div_ceil(area.width.max(1)).max(1);

        let text = Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::new().padding(centered_padding(area, Some(height), None)));

        frame.render_widget(text, area);
    }

    pub fn render_top(&self, config: &Config) -> Option<Line<'_>> {
        let theme = &config.settings.theme;
        Some(Line::from(vec![
            Span::styled(self.banner().name.as_str(), Style::new().fg(theme.title).bold()),
            Span::raw(format!(
                " · {} · {}/{}",
                self.engine.phase(),
                self.engine.text_index() + 1,
                self.engine.config().texts.len()
            )),
        ]))
    }
}

// Event logic
impl Player {
    pub fn poll(&mut self, config: &Config) -> Option<Message> {
        let elapsed = self.clock.lap();
        self.advance(elapsed, config);
        None
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        let Event::Key(key) = event else {
            return None;
        };
        // Leave modified keys to the app
        if !key.is_press() || key.has_mods(KeyModifiers::CONTROL) {
            return None;
        }

        let result = match key.code {
            KeyCode::Char('r') => {
                self.engine.restart();
                Ok(true)
            }
            KeyCode::Char('x') => {
                self.engine.reset();
                Ok(false)
            }
            KeyCode::Char('s') => Ok(self.engine.start()),
            KeyCode::Tab => self.next_banner(),
            KeyCode::BackTab => self.previous_banner(),
            _ => return None,
        };

        self.blink.reset();
        match result {
            Ok(_) => None,
            Err(error) => Some(Message::Error(Box::new(error))),
        }
    }

    /// Time until something on screen changes, but never shorter than a frame
    pub fn next_wake(&self, config: &Config) -> Duration {
        let blink = self.blink.remaining(config.settings.cursor_blink());
        let wake = self
            .engine
            .time_until_next_tick()
            .map_or(blink, |tick| tick.min(blink));

        wake.max(config.settings.frame_time())
    }
}

/// Cursor blink timer
#[derive(Debug, Default)]
struct Blink {
    elapsed: Duration,
    hidden: bool,
}

impl Blink {
    fn advance(&mut self, elapsed: Duration, interval: Duration) {
        let interval = interval.as_nanos().max(1);
        let total = self.elapsed.as_nanos() + elapsed.as_nanos();

        if (total / interval) % 2 == 1 {
            self.hidden = !self.hidden;
        }
        self.elapsed = Duration::from_nanos((total % interval) as u64);
    }

    fn remaining(&self, interval: Duration) -> Duration {
        interval.saturating_sub(self.elapsed)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crossterm::event::KeyEvent;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::config::{Overrides, Settings};

    fn config() -> Config {
        Config {
            settings: Settings {
                cursor_blink_ms: 500,
                frame_rate: 100,
                ..Settings::default()
            },
            directory: PathBuf::new(),
            overrides: Overrides::default(),
        }
    }

    fn banners() -> Vec<BannerConfig> {
        vec![
            BannerConfig::new("hello", typewriter::Config::new("Hello").with_speed(10)),
            BannerConfig::new(
                "roles",
                typewriter::Config::new(["Writer", "Engineer"])
                    .with_speed(10)
                    .with_loop(true),
            ),
            BannerConfig::new("quiet", typewriter::Config::new("Hello").with_speed(50)),
        ]
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn rendered(player: &Player, config: &Config) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 7)).unwrap();
        terminal
            .draw(|frame| player.render(frame, frame.area(), config))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_starts_selected_banner() {
        let player = Player::new(banners(), 1).unwrap();
        assert_eq!(player.banner().name, "roles");
        assert_eq!(player.engine().display_text(), "W");
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let player = Player::new(banners(), 10).unwrap();
        assert_eq!(player.banner().name, "quiet");

        let player = Player::new(Vec::new(), 0).unwrap();
        assert_eq!(player.banner(), &BannerConfig::default());
    }

    #[test]
    fn test_invalid_banner_fails() {
        let banners = vec![BannerConfig::new(
            "broken",
            typewriter::Config::new("x").with_speed(0),
        )];
        assert_eq!(
            Player::new(banners, 0).unwrap_err(),
            typewriter::Error::ZeroSpeed
        );
    }

    #[test]
    fn test_renders_display_text_and_cursor() {
        let config = config();
        let mut player = Player::new(banners(), 0).unwrap();
        player.advance(Duration::from_millis(40), &config);

        let screen = rendered(&player, &config);
        assert!(screen.contains("Hello"));
        assert!(screen.contains(config.settings.theme.cursor.symbol.as_str()));
    }

    #[test]
    fn test_cursor_blinks_when_finished() {
        let config = config();
        let mut player = Player::new(banners(), 0).unwrap();
        player.advance(Duration::from_millis(50), &config);
        assert_eq!(player.engine().phase(), Phase::Finished);
        assert!(player.cursor_visible());

        player.advance(Duration::from_millis(500), &config);
        assert!(!player.cursor_visible());

        player.advance(Duration::from_millis(500), &config);
        assert!(player.cursor_visible());
    }

    #[test]
    fn test_tab_switches_banners_and_restarts() {
        let config = config();
        let mut player = Player::new(banners(), 0).unwrap();
        player.advance(Duration::from_millis(20), &config);
        assert_eq!(player.engine().display_text(), "Hel");

        assert!(player.handle_events(&press(KeyCode::Tab), &config).is_none());
        assert_eq!(player.banner().name, "roles");
        assert_eq!(player.engine().display_text(), "W");

        player.handle_events(&press(KeyCode::Tab), &config);
        player.handle_events(&press(KeyCode::BackTab), &config);
        player.handle_events(&press(KeyCode::BackTab), &config);
        assert_eq!(player.banner().name, "hello");

        player.handle_events(&press(KeyCode::BackTab), &config);
        assert_eq!(player.banner().name, "quiet");
    }

    #[test]
    fn test_same_texts_do_not_restart() {
        let config = config();
        let mut player = Player::new(banners(), 0).unwrap();
        player.advance(Duration::from_millis(20), &config);

        assert_eq!(player.select(2), Ok(false));
        assert_eq!(player.engine().display_text(), "Hel");
        assert_eq!(player.engine().config().speed, 50);
    }

    #[test]
    fn test_loop_change_restarts() {
        let config = config();
        let banners = vec![
            BannerConfig::new("once", typewriter::Config::new("Hi").with_speed(10)),
            BannerConfig::new(
                "forever",
                typewriter::Config::new("Hi").with_speed(10).with_loop(true),
            ),
        ];
        let mut player = Player::new(banners, 0).unwrap();
        player.advance(Duration::from_millis(20), &config);
        assert_eq!(player.engine().phase(), Phase::Finished);

        assert!(player.handle_events(&press(KeyCode::Tab), &config).is_none());
        assert_eq!(player.banner().name, "forever");
        assert_eq!(player.engine().display_text(), "H");
        assert!(player.engine().is_running());
    }

    #[test]
    fn test_long_text_renders() {
        let config = config();
        let long = "a".repeat(usize::from(u16::MAX) + 10);
        let banners = vec![BannerConfig::new(
            "long",
            typewriter::Config::new(long.as_str()).with_speed(1),
        )];
        let mut player = Player::new(banners, 0).unwrap();
        player.engine.run_until_idle(usize::MAX);

        assert_eq!(player.engine().display_text(), long);

        // Taller than the screen, so no rows are left blank for centering
        let screen: Vec<char> = rendered(&player, &config).chars().collect();
        let filled = screen
            .chunks(40)
            .filter(|row| row.contains(&'a'))
            .count();
        assert!(filled >= 5);
    }

    #[test]
    fn test_control_keys() {
        let config = config();
        let mut player = Player::new(banners(), 0).unwrap();

        player.handle_events(&press(KeyCode::Char('x')), &config);
        assert_eq!(player.engine().phase(), Phase::Idle);
        assert_eq!(player.engine().display_text(), "");

        player.handle_events(&press(KeyCode::Char('s')), &config);
        assert_eq!(player.engine().display_text(), "H");

        player.advance(Duration::from_millis(30), &config);
        player.handle_events(&press(KeyCode::Char('r')), &config);
        assert_eq!(player.engine().display_text(), "H");

        assert!(
            player
                .handle_events(&press(KeyCode::Char('z')), &config)
                .is_none()
        );

        let reload = Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        player.advance(Duration::from_millis(30), &config);
        assert!(player.handle_events(&reload, &config).is_none());
        assert_eq!(player.engine().display_text(), "Hell");
    }

    #[test]
    fn test_replace_banners_keeps_selection_by_name() {
        let mut player = Player::new(banners(), 1).unwrap();

        let mut reloaded = banners();
        reloaded.reverse();
        reloaded[1].typewriter.texts = ["Speaker", "Engineer"].into();

        assert_eq!(player.replace_banners(reloaded), Ok(true));
        assert_eq!(player.banner().name, "roles");
        assert_eq!(player.engine().display_text(), "S");

        let renamed = vec![BannerConfig::new("other", typewriter::Config::new("Bye"))];
        player.replace_banners(renamed).unwrap();
        assert_eq!(player.banner().name, "other");
    }

    #[test]
    fn test_next_wake_is_bounded_by_frame_time() {
        let config = config();
        let player = Player::new(banners(), 0).unwrap();

        // Next tick in 10ms, frame time is 10ms at 100 fps
        assert_eq!(player.next_wake(&config), Duration::from_millis(10));

        let mut slow = Player::new(banners(), 2).unwrap();
        assert_eq!(slow.next_wake(&config), Duration::from_millis(50));
        slow.advance(Duration::from_millis(45), &config);
        assert_eq!(slow.next_wake(&config), Duration::from_millis(10));
    }
}
