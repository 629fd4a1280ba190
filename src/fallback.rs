//! Per-image progressive fallback state machine.
//!
//! One resolver owns one immutable attempt list and an attempt cursor that
//! only moves forward. The host assigns whatever source `start`/`on_error`
//! return and feeds back the browser-style load/error signal for it.

use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ResolverState {
    /// Not started, or started with an empty attempt list.
    Idle,
    /// Waiting on the load/error signal for the attempt at this index.
    Attempting(usize),
    /// An attempt loaded. Terminal.
    Succeeded,
    /// Every attempt failed. Terminal, silent.
    Exhausted,
}

#[derive(Clone, Debug)]
pub struct FallbackResolver {
    attempts: Vec<String>,
    state: ResolverState,
}

impl FallbackResolver {
    pub fn new(attempts: Vec<String>) -> Self {
        Self {
            attempts,
            state: ResolverState::Idle,
        }
    }

    /// Begins resolution, returning the first source to assign. An empty
    /// attempt list stays `Idle` and assigns nothing.
    pub fn start(&mut self) -> Option<&str> {
        if self.state != ResolverState::Idle || self.attempts.is_empty() {
            return None;
        }
        self.state = ResolverState::Attempting(0);
        Some(&self.attempts[0])
    }

    /// The current attempt loaded.
    pub fn on_load(&mut self) {
        if let ResolverState::Attempting(_) = self.state {
            self.state = ResolverState::Succeeded;
        }
    }

    /// The current attempt failed; returns the next source to assign, or
    /// `None` once the list is exhausted. Terminal states ignore the signal.
    pub fn on_error(&mut self) -> Option<&str> {
        let ResolverState::Attempting(i) = self.state else {
            return None;
        };
        let next = i + 1;
        if next < self.attempts.len() {
            self.state = ResolverState::Attempting(next);
            debug!(attempt = next, source = %self.attempts[next], "fallback advanced");
            Some(&self.attempts[next])
        } else {
            self.state = ResolverState::Exhausted;
            debug!(attempts = self.attempts.len(), "fallback exhausted");
            None
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }

    /// Source the resolver currently expects the element to show, if any.
    pub fn current_attempt(&self) -> Option<&str> {
        match self.state {
            ResolverState::Attempting(i) => self.attempts.get(i).map(String::as_str),
            _ => None,
        }
    }
}
