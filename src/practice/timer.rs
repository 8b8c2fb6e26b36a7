use std::time::{Duration, Instant};

/// Visual urgency of the remaining time. Danger wins when both bounds apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    Normal,
    Warning,
    Danger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Finished,
}

/// Countdown for timed answer practice. Decrements ride on the app tick:
/// the next decrement's deadline is stored and [`CountdownTimer::poll`]
/// applies every whole second that has elapsed since.
pub struct CountdownTimer {
    remaining: u32,
    running: bool,
    deadline: Option<Instant>,
    initial: u32,
}

impl CountdownTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: false,
            deadline: None,
            initial: seconds,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start when stopped, pause when running. Pausing clears the pending
    /// deadline, so toggling twice leaves nothing armed. A timer that ran
    /// to zero stays stopped until reset.
    pub fn toggle(&mut self, now: Instant) {
        if self.running {
            self.running = false;
            self.deadline = None;
        } else if self.remaining > 0 {
            self.running = true;
            self.deadline = Some(now + Duration::from_secs(1));
        }
    }

    /// Stop and restore the initial duration, whether or not running.
    pub fn reset(&mut self) {
        self.running = false;
        self.deadline = None;
        self.remaining = self.initial;
    }

    /// Apply every decrement due by `now`. Reports `Finished` exactly once
    /// per run that reaches zero.
    pub fn poll(&mut self, now: Instant) -> Option<TimerEvent> {
        let mut finished = None;
        while self.running {
            let Some(deadline) = self.deadline else { break };
            if now < deadline {
                break;
            }
            self.remaining -= 1;
            if self.remaining == 0 {
                self.running = false;
                self.deadline = None;
                finished = Some(TimerEvent::Finished);
            } else {
                self.deadline = Some(deadline + Duration::from_secs(1));
            }
        }
        finished
    }

    /// `M:SS` with zero-padded seconds.
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    pub fn threshold(&self) -> Threshold {
        if self.remaining <= 30 {
            Threshold::Danger
        } else if self.remaining <= 60 {
            Threshold::Warning
        } else {
            Threshold::Normal
        }
    }
}
