//! Single-slot timer primitive for callback-driven state machines.
//!
//! MatchReel cores never sleep or poll. "Wait N seconds" is expressed as a
//! [`TimerRequest`] the host picks up, schedules with whatever timer facility
//! it has, and fires back via the request's token. Tokens are generation
//! counters: arming or cancelling the slot invalidates every previously
//! issued token, so a stale callback can never advance a state machine past
//! a state it has already left.

/// Opaque handle identifying one armed timer.
pub type TimerToken = u64;

/// A request for the host to invoke a callback after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerRequest<P> {
    /// Token to pass back when the delay elapses.
    pub token: TimerToken,

    /// Delay in seconds.
    pub delay_secs: f64,

    /// What the timer is for (caller-defined tag).
    pub purpose: P,
}

/// Holds at most one armed timer. Arming replaces (and invalidates) any
/// predecessor; there is never more than one live token.
#[derive(Debug)]
pub struct TimerSlot<P> {
    generation: TimerToken,
    armed: Option<TimerRequest<P>>,
    unscheduled: bool,
}

impl<P: Copy> TimerSlot<P> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            armed: None,
            unscheduled: false,
        }
    }

    /// Arm the slot. Any previously issued token becomes stale.
    pub fn arm(&mut self, delay_secs: f64, purpose: P) -> TimerRequest<P> {
        self.generation += 1;
        let request = TimerRequest {
            token: self.generation,
            delay_secs,
            purpose,
        };
        self.armed = Some(request);
        self.unscheduled = true;
        request
    }

    /// Cancel whatever is armed. Already-issued tokens become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.armed = None;
        self.unscheduled = false;
    }

    /// Drain the request the host still needs to schedule, if any.
    /// Returns each armed request exactly once.
    pub fn take_request(&mut self) -> Option<TimerRequest<P>> {
        if self.unscheduled {
            self.unscheduled = false;
            self.armed
        } else {
            None
        }
    }

    /// Whether a timer is currently armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Validate a fired token. Returns the timer's purpose when the token
    /// matches the currently armed timer (clearing it); `None` for stale
    /// tokens, which callers must treat as a no-op.
    pub fn accept(&mut self, token: TimerToken) -> Option<P> {
        match self.armed {
            Some(request) if request.token == token => {
                self.armed = None;
                self.unscheduled = false;
                Some(request.purpose)
            }
            _ => {
                tracing::debug!(token, "Ignoring stale timer token");
                None
            }
        }
    }
}

impl<P: Copy> Default for TimerSlot<P> {
    fn default() -> Self {
        Self::new()
    }
}
