//! Caller-driven debouncing.
//!
//! The owner supplies `now` on every call, so there is no hidden timer: a
//! burst of `call`s keeps pushing the deadline out, and only the payload of
//! the last call is released once `poll` observes the deadline has passed.

use foundation::time::Time;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_s: f64,
    pending: Option<(Time, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_s: f64) -> Self {
        Self {
            delay_s: delay_s.max(0.0),
            pending: None,
        }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(delay_ms as f64 / 1000.0)
    }

    pub fn delay_s(&self) -> f64 {
        self.delay_s
    }

    /// Schedules `value`, replacing any payload still waiting.
    pub fn call(&mut self, now: Time, value: T) {
        if self.pending.is_some() {
            tracing::trace!("debounce: superseding pending payload");
        }
        self.pending = Some((now.after(self.delay_s), value));
    }

    /// Releases the pending payload once its deadline is reached.
    pub fn poll(&mut self, now: Time) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now.0 >= deadline.0 => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Time> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }
}
