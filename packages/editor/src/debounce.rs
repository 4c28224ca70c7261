//! # Debounce Coordinator
//!
//! Coalesces bursts of calls into a single invocation.
//!
//! ## Design
//!
//! The handle is an explicit state machine: a burst timestamp (the "timer"),
//! the most recent arguments, and the edge mode. Nothing runs in the
//! background. The host event loop calls [`Debouncer::poll`] (or waits until
//! [`Debouncer::next_deadline`]) and executes whatever comes back.
//!
//! ```text
//! trailing:  call(a) call(b) call(c) ......wait...... -> fire(c)
//! leading:   call(a) -> fire(a)   call(b) call(c)     (suppressed)
//! ```
//!
//! Each call within `wait` of the previous one extends the window.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

/// Which end of a burst fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Fire once the burst has settled, with the last arguments
    Trailing,
    /// Fire on the first call, suppress the rest of the burst
    Leading,
}

/// Stateful debounce handle holding the arguments of the latest call
pub struct Debouncer<A> {
    wait: Duration,
    edge: Edge,
    clock: Rc<dyn Clock>,
    /// Timestamp of the latest call in the current burst; `Some` while the timer runs
    last_call: Option<Instant>,
    pending: Option<A>,
}

impl<A> Debouncer<A> {
    pub fn new(wait: Duration, edge: Edge, clock: Rc<dyn Clock>) -> Self {
        Self {
            wait,
            edge,
            clock,
            last_call: None,
            pending: None,
        }
    }

    pub fn trailing(wait: Duration, clock: Rc<dyn Clock>) -> Self {
        Self::new(wait, Edge::Trailing, clock)
    }

    pub fn leading(wait: Duration, clock: Rc<dyn Clock>) -> Self {
        Self::new(wait, Edge::Leading, clock)
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Register a call.
    ///
    /// Returns arguments that must be invoked right away: the call itself on
    /// the leading edge of a burst, or the overdue invocation of a previous
    /// trailing burst that was never polled.
    pub fn call(&mut self, args: A) -> Option<A> {
        let now = self.clock.now();
        let overdue = self.take_due(now);

        match self.edge {
            Edge::Trailing => {
                self.pending = Some(args);
                self.last_call = Some(now);
                overdue
            }
            Edge::Leading => {
                let in_window = self.last_call.is_some();
                self.last_call = Some(now);
                if in_window {
                    self.pending = Some(args);
                    None
                } else {
                    Some(args)
                }
            }
        }
    }

    /// Arguments to invoke if the window has elapsed
    pub fn poll(&mut self) -> Option<A> {
        let now = self.clock.now();
        self.take_due(now)
    }

    /// End the window now, returning the captured arguments if any
    pub fn flush(&mut self) -> Option<A> {
        self.last_call.take()?;
        self.pending.take()
    }

    /// Drop the pending invocation without running it
    pub fn cancel(&mut self) {
        self.last_call = None;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.last_call.is_some() && self.pending.is_some()
    }

    /// When the running window ends, if one is running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.last_call.map(|t| t + self.wait)
    }

    fn take_due(&mut self, now: Instant) -> Option<A> {
        let deadline = self.next_deadline()?;
        if now < deadline {
            return None;
        }

        self.last_call = None;
        let pending = self.pending.take();
        match self.edge {
            Edge::Trailing => pending,
            // Suppressed calls of a leading burst never fire on their own
            Edge::Leading => None,
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait", &self.wait)
            .field("edge", &self.edge)
            .field("last_call", &self.last_call)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

/// A [`Debouncer`] bound to the action it coalesces
pub struct Debounced<A, F>
where
    F: FnMut(A),
{
    state: Debouncer<A>,
    action: F,
}

/// Wrap `action` so bursts of calls collapse into one invocation
pub fn debounce<A, F>(
    action: F,
    wait: Duration,
    immediate: bool,
    clock: Rc<dyn Clock>,
) -> Debounced<A, F>
where
    F: FnMut(A),
{
    let edge = if immediate { Edge::Leading } else { Edge::Trailing };
    Debounced {
        state: Debouncer::new(wait, edge, clock),
        action,
    }
}

impl<A, F> Debounced<A, F>
where
    F: FnMut(A),
{
    pub fn call(&mut self, args: A) {
        if let Some(args) = self.state.call(args) {
            (self.action)(args);
        }
    }

    /// Run the action if the window has elapsed; returns whether it ran
    pub fn poll(&mut self) -> bool {
        match self.state.poll() {
            Some(args) => {
                (self.action)(args);
                true
            }
            None => false,
        }
    }

    /// Run the pending action now; returns whether it ran
    pub fn flush(&mut self) -> bool {
        match self.state.flush() {
            Some(args) => {
                (self.action)(args);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl FnMut(&'static str)) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        (calls, move |arg| sink.borrow_mut().push(arg))
    }

    #[test]
    fn test_trailing_burst_fires_once_with_last_args() {
        let clock = ManualClock::new();
        let (calls, action) = recorder();
        let wait = Duration::from_millis(500);
        let mut handle = debounce(action, wait, false, Rc::new(clock.clone()));

        handle.call("t");
        clock.advance_ms(200);
        handle.call("t+d1");
        clock.advance_ms(300);
        handle.call("t+d2");

        // Window is measured from the last call
        clock.advance_ms(499);
        assert!(!handle.poll());
        assert!(calls.borrow().is_empty());

        clock.advance_ms(1);
        assert!(handle.poll());
        assert_eq!(*calls.borrow(), vec!["t+d2"]);

        clock.advance_ms(1000);
        assert!(!handle.poll());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_leading_burst_fires_immediately_with_first_args() {
        let clock = ManualClock::new();
        let (calls, action) = recorder();
        let mut handle = debounce(action, Duration::from_millis(500), true, Rc::new(clock.clone()));

        handle.call("t");
        assert_eq!(*calls.borrow(), vec!["t"]);

        clock.advance_ms(200);
        handle.call("t+d1");
        clock.advance_ms(200);
        handle.call("t+d2");

        clock.advance_ms(600);
        assert!(!handle.poll());
        assert_eq!(*calls.borrow(), vec!["t"]);

        // A new burst fires again
        handle.call("next");
        assert_eq!(*calls.borrow(), vec!["t", "next"]);
    }

    #[test]
    fn test_flush_runs_pending_once() {
        let clock = ManualClock::new();
        let (calls, action) = recorder();
        let wait = Duration::from_millis(500);
        let mut handle = debounce(action, wait, false, Rc::new(clock.clone()));

        handle.call("a");
        handle.call("b");
        assert!(handle.flush());
        assert_eq!(*calls.borrow(), vec!["b"]);

        // Original timer is gone
        clock.advance_ms(1000);
        assert!(!handle.poll());
        assert!(!handle.flush());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_cancel_discards_pending() {
        let clock = ManualClock::new();
        let (calls, action) = recorder();
        let wait = Duration::from_millis(100);
        let mut handle = debounce(action, wait, false, Rc::new(clock.clone()));

        handle.call("a");
        handle.cancel();
        handle.cancel();
        clock.advance_ms(500);
        assert!(!handle.poll());
        assert!(!handle.flush());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_unpolled_burst_fires_before_next_window() {
        let clock = ManualClock::new();
        let mut state = Debouncer::trailing(Duration::from_millis(100), Rc::new(clock.clone()));

        assert_eq!(state.call(1), None);
        clock.advance_ms(150);
        // The previous window already ended; its invocation is handed back first
        assert_eq!(state.call(2), Some(1));
        assert!(state.is_pending());
        clock.advance_ms(100);
        assert_eq!(state.poll(), Some(2));
    }

    #[test]
    fn test_next_deadline_tracks_last_call() {
        let clock = ManualClock::new();
        let mut state = Debouncer::trailing(Duration::from_millis(100), Rc::new(clock.clone()));
        assert!(state.next_deadline().is_none());

        state.call(());
        let first = state.next_deadline().unwrap();
        clock.advance_ms(40);
        state.call(());
        assert_eq!(state.next_deadline().unwrap() - first, Duration::from_millis(40));
    }
}
