use thiserror::Error;

/// Configuration errors rejected when an engine is built or reconfigured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("No texts given: a typewriter needs at least one text")]
    EmptyTexts,

    #[error("Typing speed must be greater than 0 milliseconds")]
    ZeroSpeed,
}
