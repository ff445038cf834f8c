use strum::{Display, IntoStaticStr};

use crate::timer::Tick;

/// Where a typewriter is in its animation
#[doc = simple_mermaid::mermaid!("../diagrams/engine_states.mmd")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "title_case")]
pub enum Phase {
    /// Not started, or reset
    Idle,
    /// Started, waiting for the initial delay to pass
    Waiting,
    Typing,
    /// Text fully typed, pausing before it gets deleted
    PausingBeforeDelete,
    Deleting,
    /// Text fully deleted, pausing before the next one is typed
    PausingBeforeNext,
    /// A non-looping run typed its text and stopped
    Finished,
}

impl From<Tick> for Phase {
    /// The phase an engine is in while `tick` is its pending timer
    fn from(value: Tick) -> Self {
        match value {
            Tick::Begin => Self::Waiting,
            Tick::Type => Self::Typing,
            Tick::BeginDelete => Self::PausingBeforeDelete,
            Tick::Delete => Self::Deleting,
            Tick::Next => Self::PausingBeforeNext,
        }
    }
}

/// A copy of every observable field of an engine at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub display_text: String,
    pub char_index: usize,
    pub text_index: usize,
    pub is_typing: bool,
    pub is_deleting: bool,
    pub is_first_iteration: bool,
    pub phase: Phase,
}
