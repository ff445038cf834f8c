//! # Engine Module - The Typewriter State Machine
//!
//! A [`Typewriter`] types its texts one character at a time, and when looping,
//! deletes each text again (twice as fast) before moving on to the next one.
//!
//! ## Driving an engine
//!
//! The engine never sleeps. Every delay is a timer on its internal
//! [`TimerQueue`], and time only passes when the owner calls
//! [`advance`](Typewriter::advance), [`tick`](Typewriter::tick) or
//! [`run_until_idle`](Typewriter::run_until_idle). A real-time caller measures
//! the time between frames and feeds it to `advance`.
//!
//! ## Runs and generations
//!
//! Every [`start`](Typewriter::start) and every [`reset`](Typewriter::reset)
//! increments the engine's generation. Timers are tagged with the generation
//! that scheduled them, and a timer from an older generation does nothing when
//! it fires. This is what stops a reset or restarted engine from being mutated
//! by the run it replaced.
//!
//! ## Usage
//!
//! ```rust
//! use typewriter::{Config, Duration, Phase, Typewriter};
//!
//! let config = Config::new(["Ab", "Cd"])
//!     .with_speed(10)
//!     .with_loop(true)
//!     .with_loop_delay(0);
//! let mut engine = Typewriter::new(config).unwrap();
//!
//! engine.start();
//! engine.advance(Duration::from_millis(10));
//! assert_eq!(engine.display_text(), "Ab");
//!
//! // Fully typed: deletion starts right away (initial delay is 0)
//! engine.advance(Duration::from_millis(10));
//! assert_eq!(engine.display_text(), "A");
//! assert_eq!(engine.phase(), Phase::Deleting);
//! ```

use tracing::{debug, trace};
use web_time::Duration;

use crate::timer::{Scheduled, Tick, TimerQueue};
use crate::{Config, Error, Phase, Snapshot, Texts};

/// Pause between a fully deleted text and the first character of the next one
pub const NEXT_TEXT_PAUSE: Duration = Duration::from_millis(500);

/// A typewriter text animation
///
/// Holds the configuration, the visible text and the timer queue of one
/// animation. Not thread-safe: every operation and every timer runs on the
/// caller's thread.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: Config,
    /// `config.texts` split into characters
    sources: Vec<Vec<char>>,

    display_text: String,
    char_index: usize,
    text_index: usize,
    is_typing: bool,
    is_deleting: bool,
    is_first_iteration: bool,

    generation: u64,
    /// The timer the current run is waiting on, if any
    pending: Option<Tick>,
    finished: bool,
    timers: TimerQueue,

    ticks_executed: u64,
    stale_ticks_skipped: u64,
}

impl Typewriter {
    /// Creates an idle engine
    ///
    /// # Errors
    ///
    /// Fails if the configuration has no texts, or a typing speed of 0.
    ///
    /// ```rust
    /// use typewriter::{Config, Error, Typewriter};
    ///
    /// assert!(Typewriter::new(Config::new("hello")).is_ok());
    ///
    /// let empty = Config::new(Vec::<String>::new());
    /// assert_eq!(Typewriter::new(empty).unwrap_err(), Error::EmptyTexts);
    /// ```
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            sources: split_texts(&config.texts),
            config,
            display_text: String::new(),
            char_index: 0,
            text_index: 0,
            is_typing: false,
            is_deleting: false,
            is_first_iteration: true,
            generation: 0,
            pending: None,
            finished: false,
            timers: TimerQueue::new(),
            ticks_executed: 0,
            stale_ticks_skipped: 0,
        })
    }

    /// Starts the animation
    ///
    /// With an initial delay, the first character is scheduled after it and
    /// `is_typing` stays false until then. Without one, typing becomes active
    /// and the first character appears immediately.
    ///
    /// Starting an engine that is already running does nothing. Returns whether
    /// a new run was started.
    pub fn start(&mut self) -> bool {
        if self.pending.is_some() {
            debug!(generation = self.generation, "Typewriter already running");
            return false;
        }

        self.generation += 1;
        self.finished = false;
        debug!(generation = self.generation, "Starting typewriter");

        let delay = self.config.start_delay();
        if delay.is_zero() {
            self.is_typing = true;
            self.step();
        } else {
            self.schedule(delay, Tick::Begin);
        }

        true
    }

    /// Returns the engine to its initial state
    ///
    /// Timers of the current run stay queued, but will do nothing when they fire.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.finished = false;

        self.display_text.clear();
        self.char_index = 0;
        self.text_index = 0;
        self.is_typing = false;
        self.is_deleting = false;
        self.is_first_iteration = true;

        debug!(generation = self.generation, "Reset typewriter");
    }

    /// [`reset`](Self::reset) followed by [`start`](Self::start)
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Replaces the texts, restarting the animation if they changed
    ///
    /// Texts are compared element by element, so passing an equal list is a
    /// no-op. Returns whether the engine restarted.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyTexts`] if `texts` is empty. The engine is left
    /// untouched in that case.
    pub fn set_texts(&mut self, texts: impl Into<Texts>) -> Result<bool, Error> {
        let texts = texts.into();
        if texts.is_empty() {
            return Err(Error::EmptyTexts);
        }

        if texts == self.config.texts {
            return Ok(false);
        }

        debug!(count = texts.len(), "Texts changed, restarting");
        self.sources = split_texts(&texts);
        self.config.texts = texts;
        self.restart();

        Ok(true)
    }

    /// Replaces the whole configuration
    ///
    /// Changed texts restart the animation, like [`set_texts`](Self::set_texts).
    /// So does toggling `looping`, since it decides what follows a typed text.
    /// Changed timings alone apply from the next scheduled timer on, without a
    /// restart. Returns whether the engine restarted.
    ///
    /// # Errors
    ///
    /// Fails if the new configuration is invalid. The engine is left untouched
    /// in that case.
    pub fn reconfigure(&mut self, config: Config) -> Result<bool, Error> {
        config.validate()?;

        if config == self.config {
            return Ok(false);
        }

        let texts_changed = config.texts != self.config.texts;
        let looping_changed = config.looping != self.config.looping;
        if texts_changed {
            self.sources = split_texts(&config.texts);
        }
        self.config = config;

        let restart = texts_changed || looping_changed;
        if restart {
            debug!(texts_changed, looping_changed, "Configuration changed, restarting");
            self.restart();
        } else {
            debug!("Configuration changed timings");
        }

        Ok(restart)
    }

    /// Lets `elapsed` pass, firing every timer that comes due
    ///
    /// Timers scheduled while advancing fire too, if their deadline falls
    /// within the window. Returns the number of ticks that ran, not counting
    /// timers of superseded runs.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let deadline = self.timers.now() + elapsed;
        self.advance_to(deadline)
    }

    /// Like [`advance`](Self::advance), up to an absolute point on the engine's clock
    pub fn advance_to(&mut self, deadline: Duration) -> usize {
        let mut executed = 0;

        while let Some(scheduled) = self.timers.pop_due(deadline) {
            if self.fire(scheduled) {
                executed += 1;
            }
        }
        self.timers.advance_clock(deadline);

        executed
    }

    /// Jumps to the next timer of the current run and fires it
    ///
    /// Timers of superseded runs on the way are discarded. Returns the tick that
    /// ran, or `None` if the current run has nothing scheduled.
    pub fn tick(&mut self) -> Option<Tick> {
        while let Some(due) = self.timers.next_due() {
            let scheduled = self.timers.pop_due(due)?;
            if self.fire(scheduled) {
                return Some(scheduled.tick);
            }
        }

        None
    }

    /// Fires ticks until the run stops scheduling them, or `limit` ticks ran
    ///
    /// A looping run never stops by itself, so `limit` bounds it.
    pub fn run_until_idle(&mut self, limit: usize) -> usize {
        let mut executed = 0;
        while executed < limit && self.tick().is_some() {
            executed += 1;
        }
        executed
    }

    /// Iterates over the snapshots after each tick of the current run
    ///
    /// Each item is the clock at which the tick fired, and the state it left
    /// behind. Endless for looping runs.
    pub fn frames(&mut self) -> Frames<'_> {
        Frames { engine: self }
    }
}

// State machine
impl Typewriter {
    fn schedule(&mut self, delay: Duration, tick: Tick) {
        let due = self.timers.schedule(delay, self.generation, tick);
        self.pending = Some(tick);
        trace!(?tick, ?due, generation = self.generation, "Scheduled tick");
    }

    /// Runs a timer that came due. Returns false if it belonged to an older run.
    fn fire(&mut self, scheduled: Scheduled) -> bool {
        if scheduled.generation != self.generation {
            self.stale_ticks_skipped += 1;
            trace!(
                tick = ?scheduled.tick,
                generation = scheduled.generation,
                current = self.generation,
                "Skipped stale tick"
            );
            return false;
        }

        self.pending = None;
        self.ticks_executed += 1;

        match scheduled.tick {
            Tick::Begin => {
                self.is_typing = true;
                self.step();
            }
            Tick::BeginDelete => {
                self.is_deleting = true;
                self.is_first_iteration = false;
                self.step();
            }
            Tick::Type | Tick::Delete | Tick::Next => self.step(),
        }

        true
    }

    /// One step of the animation: type, delete, or move between phases
    fn step(&mut self) {
        if !self.is_deleting {
            let next = self.sources[self.text_index].get(self.char_index).copied();

            if let Some(character) = next {
                self.display_text.push(character);
                self.char_index += 1;
                self.schedule(self.config.typing_interval(), Tick::Type);
            } else if self.config.looping {
                let delay = self.config.delete_delay(self.is_first_iteration);
                self.schedule(delay, Tick::BeginDelete);
            } else {
                self.is_typing = false;
                self.finished = true;
                debug!(text_index = self.text_index, "Typewriter finished");
            }
        } else if self.char_index > 0 {
            self.display_text.pop();
            self.char_index -= 1;
            self.schedule(self.config.deleting_interval(), Tick::Delete);
        } else {
            self.is_deleting = false;
            if self.sources.len() > 1 {
                self.text_index = (self.text_index + 1) % self.sources.len();
                debug!(text_index = self.text_index, "Moving to next text");
            }
            self.schedule(NEXT_TEXT_PAUSE, Tick::Next);
        }
    }
}

// Observation
impl Typewriter {
    /// The currently visible text
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// True from the moment typing starts until a non-looping run completes
    pub const fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub const fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    /// Number of characters of the current text that are visible
    pub const fn char_index(&self) -> usize {
        self.char_index
    }

    /// Index of the current text
    pub const fn text_index(&self) -> usize {
        self.text_index
    }

    /// True until the first deletion of the run starts
    pub const fn is_first_iteration(&self) -> bool {
        self.is_first_iteration
    }

    /// The text currently being typed or deleted
    pub fn current_text(&self) -> &str {
        self.config.texts.text(self.text_index)
    }

    /// Whether the owner should draw a cursor
    pub const fn show_cursor(&self) -> bool {
        self.config.show_cursor
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match self.pending {
            Some(tick) => tick.into(),
            None if self.finished => Phase::Finished,
            None => Phase::Idle,
        }
    }

    /// Whether the current run has a timer pending
    pub const fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Generation of the current run
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The engine's clock, measured from its creation
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Time until the earliest queued timer, stale or not
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.timers
            .next_due()
            .map(|due| due.saturating_sub(self.timers.now()))
    }

    /// Number of ticks that ran over the engine's lifetime
    pub const fn ticks_executed(&self) -> u64 {
        self.ticks_executed
    }

    /// Number of timers from superseded runs that fired and were ignored
    pub const fn stale_ticks_skipped(&self) -> u64 {
        self.stale_ticks_skipped
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display_text: self.display_text.clone(),
            char_index: self.char_index,
            text_index: self.text_index,
            is_typing: self.is_typing,
            is_deleting: self.is_deleting,
            is_first_iteration: self.is_first_iteration,
            phase: self.phase(),
        }
    }
}

/// Iterator over the ticks of a run, see [`Typewriter::frames`]
pub struct Frames<'a> {
    engine: &'a mut Typewriter,
}

impl Iterator for Frames<'_> {
    type Item = (Duration, Snapshot);

    fn next(&mut self) -> Option<Self::Item> {
        self.engine.tick()?;
        Some((self.engine.now(), self.engine.snapshot()))
    }
}

impl std::iter::FusedIterator for Frames<'_> {}

fn split_texts(texts: &Texts) -> Vec<Vec<char>> {
    texts.iter().map(|text| text.chars().collect()).collect()
}
