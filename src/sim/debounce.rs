//! Trailing-edge debounce
//!
//! A burst of calls closer together than the window collapses into a single
//! firing, `window` ms after the last call of the burst. Time is supplied by
//! the caller so the simulation stays deterministic.

use serde::{Deserialize, Serialize};

/// A debounced action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debounced<A> {
    action: A,
    window_ms: f64,
    /// Timestamp of the most recent call in the pending burst
    last_call_ms: Option<f64>,
}

impl<A: Copy> Debounced<A> {
    pub fn new(action: A, window_ms: f64) -> Self {
        Self {
            action,
            window_ms,
            last_call_ms: None,
        }
    }

    /// Request the action, pushing any pending firing back to `now + window`
    pub fn call(&mut self, now_ms: f64) {
        self.last_call_ms = Some(now_ms);
    }

    /// When the pending firing is due, if any
    pub fn deadline(&self) -> Option<f64> {
        self.last_call_ms.map(|t| t + self.window_ms)
    }

    pub fn is_pending(&self) -> bool {
        self.last_call_ms.is_some()
    }

    /// Take the action if its deadline has passed
    pub fn poll(&mut self, now_ms: f64) -> Option<A> {
        match self.deadline() {
            Some(due) if due <= now_ms => {
                self.last_call_ms = None;
                Some(self.action)
            }
            _ => None,
        }
    }
}
