//! # Configuration Module - Animation Settings
//!
//! A [`Config`] is supplied once when a [`Typewriter`](crate::Typewriter) is
//! built. It names the text(s) to type and the timing of every phase of the
//! animation. All delays are whole milliseconds.
//!
//! ## Usage
//!
//! ```rust
//! use typewriter::Config;
//!
//! // A single text, typed once at the default speed
//! let config = Config::new("Hello, world!");
//! assert_eq!(config.speed, 100);
//!
//! // Several texts, typed and deleted in a loop
//! let config = Config::new(["Rustacean", "Writer"])
//!     .with_speed(80)
//!     .with_loop(true)
//!     .with_loop_delay(1500);
//! assert_eq!(config.texts.len(), 2);
//! ```
//!
//! ## Serialization
//!
//! `texts` accepts either a single string or a list, under the key `texts` or
//! `text`. Looping is stored under the key `loop`.
//!
//! ```rust
//! use typewriter::Config;
//!
//! let config: Config = toml::from_str(r#"
//!     text = ["one", "two"]
//!     speed = 50
//!     loop = true
//! "#).unwrap();
//!
//! assert!(config.looping);
//! assert_eq!(config.loop_delay, 2000);
//! ```

use derive_more::Deref;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::Error;

/// Default delay between two typed characters
pub const DEFAULT_SPEED: u64 = 100;

/// Default pause after a fully typed text, before deleting it
pub const DEFAULT_LOOP_DELAY: u64 = 2000;

/// The ordered texts a typewriter cycles through
///
/// Always normalized to a list, even when built from a single string. Two
/// `Texts` are equal when they hold the same strings in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, Serialize, Deserialize)]
#[serde(from = "TextsRepr", into = "Vec<String>")]
pub struct Texts(Vec<String>);

impl Texts {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(texts.into_iter().map(Into::into).collect())
    }

    /// Returns the text at `index`, or an empty string if out of bounds
    pub fn text(&self, index: usize) -> &str {
        self.0.get(index).map_or("", String::as_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextsRepr {
    Single(String),
    Many(Vec<String>),
}

impl From<TextsRepr> for Texts {
    fn from(value: TextsRepr) -> Self {
        match value {
            TextsRepr::Single(text) => Self(vec![text]),
            TextsRepr::Many(texts) => Self(texts),
        }
    }
}

impl From<Texts> for Vec<String> {
    fn from(value: Texts) -> Self {
        value.0
    }
}

impl From<&str> for Texts {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for Texts {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for Texts {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for Texts {
    fn from(value: Vec<&str>) -> Self {
        Self::new(value)
    }
}

impl From<&[&str]> for Texts {
    fn from(value: &[&str]) -> Self {
        Self::new(value.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Texts {
    fn from(value: [&str; N]) -> Self {
        Self::new(value)
    }
}

/// Settings for a single typewriter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The texts to type, in order
    #[serde(alias = "text")]
    pub texts: Texts,

    /// Milliseconds between two typed characters. Deleting runs at half this.
    ///
    /// **Default**: 100
    #[serde(default = "default_speed")]
    pub speed: u64,

    /// Milliseconds to wait before the first character appears.
    ///
    /// When looping, this is also the pause before the *first* deletion.
    ///
    /// **Default**: 0
    #[serde(default)]
    pub initial_delay: u64,

    /// Milliseconds to pause after a text is fully typed, before deleting it.
    /// Only used after the first deletion has happened.
    ///
    /// **Default**: 2000
    #[serde(default = "default_loop_delay")]
    pub loop_delay: u64,

    /// Whether to delete a finished text and move on to the next one
    ///
    /// **Default**: false
    #[serde(default, rename = "loop")]
    pub looping: bool,

    /// Whether a cursor should be drawn after the text. Has no effect on timing.
    ///
    /// **Default**: true
    #[serde(default = "default_show_cursor")]
    pub show_cursor: bool,
}

impl Config {
    /// Creates a configuration with default timings for the given text(s)
    pub fn new(texts: impl Into<Texts>) -> Self {
        Self {
            texts: texts.into(),
            speed: DEFAULT_SPEED,
            initial_delay: 0,
            loop_delay: DEFAULT_LOOP_DELAY,
            looping: false,
            show_cursor: true,
        }
    }

    pub fn with_speed(mut self, speed: u64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_initial_delay(mut self, initial_delay: u64) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    pub fn with_loop_delay(mut self, loop_delay: u64) -> Self {
        self.loop_delay = loop_delay;
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_cursor(mut self, show_cursor: bool) -> Self {
        self.show_cursor = show_cursor;
        self
    }

    /// Checks that the configuration can drive an engine
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyTexts`] if there are no texts
    /// - [`Error::ZeroSpeed`] if `speed` is 0
    pub fn validate(&self) -> Result<(), Error> {
        if self.texts.is_empty() {
            return Err(Error::EmptyTexts);
        }

        if self.speed == 0 {
            return Err(Error::ZeroSpeed);
        }

        Ok(())
    }

    /// Interval between two typed characters
    pub const fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.speed)
    }

    /// Interval between two deleted characters: exactly half the typing interval
    pub fn deleting_interval(&self) -> Duration {
        self.typing_interval() / 2
    }

    /// Delay before the first character of a run
    pub const fn start_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay)
    }

    /// Pause between a fully typed text and the start of its deletion
    pub const fn delete_delay(&self, first_iteration: bool) -> Duration {
        if first_iteration {
            Duration::from_millis(self.initial_delay)
        } else {
            Duration::from_millis(self.loop_delay)
        }
    }
}

const fn default_speed() -> u64 {
    DEFAULT_SPEED
}

const fn default_loop_delay() -> u64 {
    DEFAULT_LOOP_DELAY
}

const fn default_show_cursor() -> bool {
    true
}
