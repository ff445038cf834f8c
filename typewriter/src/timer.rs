//! # Timer Module - One-shot Deferred Ticks
//!
//! A [`TimerQueue`] is a virtual clock plus a queue of one-shot timers. Each
//! timer carries the kind of [`Tick`] to run and the generation of the run that
//! scheduled it. There is no way to cancel a timer: a run that is superseded
//! bumps its generation instead, and the owner ignores timers tagged with an
//! old one when they come due.
//!
//! Timers with the same deadline fire in the order they were scheduled.
//!
//! ```rust
//! use typewriter::Duration;
//! use typewriter::timer::{Tick, TimerQueue};
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(Duration::from_millis(20), 1, Tick::Type);
//! timers.schedule(Duration::from_millis(10), 1, Tick::Delete);
//!
//! assert_eq!(timers.pop_due(Duration::from_millis(5)), None);
//!
//! let first = timers.pop_due(Duration::from_millis(30)).unwrap();
//! assert_eq!(first.tick, Tick::Delete);
//! assert_eq!(timers.now(), Duration::from_millis(10));
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use web_time::Duration;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tick {
    /// End of the initial delay: typing becomes active
    Begin,
    /// Type the next character
    Type,
    /// End of the pause after a fully typed text: deleting starts
    BeginDelete,
    /// Delete the last character
    Delete,
    /// End of the pause after a fully deleted text: typing restarts
    Next,
}

/// A timer waiting in a [`TimerQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    /// Point on the queue's clock at which the timer fires
    pub due: Duration,
    /// Generation of the run that scheduled the timer
    pub generation: u64,
    pub tick: Tick,
    seq: u64,
}

// `BinaryHeap` is a max-heap, so the earliest (due, seq) must compare greatest.
impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Virtual clock with a queue of pending one-shot timers
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current point on the clock, measured from the queue's creation
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired yet
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Arms a timer firing `delay` after the current clock. Returns its deadline.
    pub fn schedule(&mut self, delay: Duration, generation: u64, tick: Tick) -> Duration {
        let due = self.now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;

        self.pending.push(Scheduled {
            due,
            generation,
            tick,
            seq,
        });

        due
    }

    /// Deadline of the earliest pending timer
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.peek().map(|scheduled| scheduled.due)
    }

    /// Removes the earliest timer if it is due at or before `deadline`.
    ///
    /// The clock moves to the timer's deadline, so anything the caller schedules
    /// while handling it is measured from the moment it fired.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Scheduled> {
        if self.next_due()? > deadline {
            return None;
        }

        let scheduled = self.pending.pop()?;
        self.now = self.now.max(scheduled.due);
        Some(scheduled)
    }

    /// Moves the clock forward to `to`. The clock never goes backwards.
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(30), 0, Tick::Next);
        timers.schedule(ms(10), 0, Tick::Type);
        timers.schedule(ms(20), 0, Tick::Delete);

        let order: Vec<Tick> = std::iter::from_fn(|| timers.pop_due(ms(100)))
            .map(|scheduled| scheduled.tick)
            .collect();

        assert_eq!(order, vec![Tick::Type, Tick::Delete, Tick::Next]);
        assert!(timers.is_empty());
        assert_eq!(timers.now(), ms(30));
    }

    #[test]
    fn test_equal_deadlines_are_fifo() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(5), 1, Tick::Begin);
        timers.schedule(ms(5), 2, Tick::Begin);
        timers.schedule(ms(5), 3, Tick::Begin);

        let generations: Vec<u64> = std::iter::from_fn(|| timers.pop_due(ms(5)))
            .map(|scheduled| scheduled.generation)
            .collect();

        assert_eq!(generations, vec![1, 2, 3]);
    }

    #[test]
    fn test_pop_due_respects_deadline() {
        let mut timers = TimerQueue::new();
        let due = timers.schedule(ms(50), 0, Tick::Type);
        assert_eq!(due, ms(50));
        assert_eq!(timers.next_due(), Some(ms(50)));

        assert_eq!(timers.pop_due(ms(49)), None);
        assert_eq!(timers.now(), Duration::ZERO);
        assert_eq!(timers.len(), 1);

        assert!(timers.pop_due(ms(50)).is_some());
        assert_eq!(timers.now(), ms(50));
    }

    #[test]
    fn test_schedule_is_relative_to_clock() {
        let mut timers = TimerQueue::new();
        timers.advance_clock(ms(100));
        assert_eq!(timers.schedule(ms(25), 0, Tick::Type), ms(125));

        // Clock does not move backwards
        timers.advance_clock(ms(10));
        assert_eq!(timers.now(), ms(100));
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut timers = TimerQueue::new();
        timers.advance_clock(ms(7));
        timers.schedule(Duration::ZERO, 0, Tick::BeginDelete);

        let scheduled = timers.pop_due(ms(7)).unwrap();
        assert_eq!(scheduled.due, ms(7));
        assert_eq!(scheduled.tick, Tick::BeginDelete);
    }
}
