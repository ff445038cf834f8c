//! # typewriter
//!
//! A character-by-character "type, then optionally delete and cycle" text
//! animation engine. The engine owns its own virtual clock and timer queue, so
//! it can be driven by a terminal event loop, a game loop, or a test without
//! any real sleeping.
//!
//! ```rust
//! use typewriter::{Config, Duration, Typewriter};
//!
//! let config = Config::new("Hi").with_speed(10);
//! let mut engine = Typewriter::new(config).unwrap();
//!
//! engine.start();
//! assert_eq!(engine.display_text(), "H");
//!
//! engine.advance(Duration::from_millis(10));
//! assert_eq!(engine.display_text(), "Hi");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod timer;

pub use config::{Config, Texts};
pub use engine::{Frames, NEXT_TEXT_PAUSE, Typewriter};
pub use error::Error;
pub use state::{Phase, Snapshot};
pub use web_time::Duration;
