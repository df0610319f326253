//! Deferred execution for page behaviors.
//!
//! The [`TimerQueue`] trait is the seam between behavior code and whatever
//! event loop drives it. Behaviors only schedule and cancel; the loop owning
//! the queue decides when due timers are delivered back to them.
//!
//! [`VirtualTimers`] is the production implementation: a virtual millisecond
//! clock that hands out due timers one at a time, in due-time order, with ties
//! broken by scheduling order. Nothing ever fires on its own, which keeps the
//! run-to-completion model explicit:
//!
//! ```text
//! loop {
//!     while let Some(fired) = timers.next_due(until) { owner_of(fired).on_timer(fired) }
//!     timers.advance_to(until);
//!     deliver(input);
//! }
//! ```

use std::fmt;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a timer is for. Returned with every firing so the owner can route it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Recurring carousel advance.
    AutoAdvance,
    /// One-shot restart of auto-advance after a manual interaction.
    Resume,
    /// Next animation frame, used to coalesce scroll handling.
    Frame,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    /// Virtual time the timer was due at.
    pub at_ms: u64,
}

/// Scheduling operations behaviors rely on.
pub trait TimerQueue {
    /// Current virtual time in milliseconds.
    fn now(&self) -> u64;

    /// Schedule `kind` every `period_ms`, first firing one period from now.
    fn set_interval(&mut self, kind: TimerKind, period_ms: u64) -> TimerId;

    /// Schedule `kind` once, `delay_ms` from now.
    fn set_timeout(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId;

    /// Cancel a timer. Returns false if it already fired (one-shot) or was
    /// cancelled before.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Whether `id` will still fire.
    fn is_scheduled(&self, id: TimerId) -> bool;
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    kind: TimerKind,
    due_ms: u64,
    /// `Some` for intervals.
    period_ms: Option<u64>,
    /// Insertion order, refreshed when an interval re-arms.
    seq: u64,
}

/// Virtual-clock timer queue.
#[derive(Debug, Default)]
pub struct VirtualTimers {
    now_ms: u64,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: TimerKind, delay_ms: u64, period_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            kind,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
            seq,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Number of timers still scheduled.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Due time of the earliest scheduled timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// Moves the clock to the timer's due time. Intervals are re-armed one
    /// period later; one-shots are removed.
    pub fn next_due(&mut self, until_ms: u64) -> Option<Fired> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(pos, _)| pos)?;

        let entry = &self.entries[pos];
        let period_ms = entry.period_ms;
        let fired = Fired {
            id: entry.id,
            kind: entry.kind,
            at_ms: entry.due_ms,
        };
        self.now_ms = self.now_ms.max(fired.at_ms);

        match period_ms {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[pos];
                // A zero period would spin forever at one instant.
                entry.due_ms = entry.due_ms.saturating_add(period.max(1));
                entry.seq = seq;
            }
            None => {
                self.entries.remove(pos);
            }
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything.
    ///
    /// Callers drain [`next_due`](Self::next_due) first; moving past a due
    /// timer leaves it overdue and it fires on the next drain.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}

impl TimerQueue for VirtualTimers {
    fn now(&self) -> u64 {
        self.now_ms
    }

    fn set_interval(&mut self, kind: TimerKind, period_ms: u64) -> TimerId {
        self.push(kind, period_ms, Some(period_ms))
    }

    fn set_timeout(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId {
        self.push(kind, delay_ms, None)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}
