// Runs the Fix 1 / Fix 2 toggle workflows against the service manager.
//
// Everything here runs on the UI thread. The follow-up step of a Fix 1 toggle is
// held as a pending continuation that the event loop fires through `run_due`.

use super::classifier::assess;
use super::display::Display;
use super::model::{ServiceName, ServiceStatus, ToggleIntent};
use super::sc::{ServiceControl, ServiceError};
use std::time::{Duration, Instant};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(5000);

/// Re-query after the follow-up command until the target state shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

/// How long to wait for the service manager between the two halves of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    pub delay: Duration,
    /// `None` keeps the single fixed delay with no retry.
    pub poll: Option<PollPolicy>,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SETTLE_DELAY,
            poll: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fix1 {
    Apply,
    Undo,
}

impl Fix1 {
    fn target(self) -> ServiceStatus {
        match self {
            Fix1::Apply => ServiceStatus::Disabled,
            Fix1::Undo => ServiceStatus::Enabled,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    FollowUp,
    Poll { give_up_at: Instant },
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    fix: Fix1,
    due: Instant,
    phase: Phase,
}

#[derive(Debug, Clone, Copy)]
enum ToggleState {
    Idle,
    Settling(Pending),
}

pub struct ToggleController<S: ServiceControl> {
    service: S,
    name: ServiceName,
    policy: SettlePolicy,
    state: ToggleState,
}

impl<S: ServiceControl> ToggleController<S> {
    pub fn new(service: S, name: ServiceName, policy: SettlePolicy) -> Self {
        Self {
            service,
            name,
            policy,
            state: ToggleState::Idle,
        }
    }

    /// True while a Fix 1 toggle is waiting on its follow-up step.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ToggleState::Settling(_))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            ToggleState::Idle => None,
            ToggleState::Settling(pending) => Some(pending.due),
        }
    }

    pub fn apply(&mut self, intent: ToggleIntent, display: &mut impl Display, now: Instant) {
        match intent {
            ToggleIntent::ApplyPrimary => self.begin(Fix1::Apply, display, now),
            ToggleIntent::UndoPrimary => self.begin(Fix1::Undo, display, now),
            ToggleIntent::ApplySecondary => {
                display.append_log("Fix 2 (BETA) applied successfully.".to_string())
            }
            ToggleIntent::UndoSecondary => {
                display.append_log("Fix 2 (BETA) undone successfully.".to_string())
            }
        }
    }

    /// Queries the service, logs what was found and updates the status indicator.
    pub fn refresh(&self, display: &mut impl Display) {
        let (status, line) = self.check();
        display.append_log(line);
        display.set_status(status);
    }

    /// Fires the pending continuation if its deadline has passed.
    pub fn run_due(&mut self, display: &mut impl Display, now: Instant) {
        let ToggleState::Settling(pending) = self.state else {
            return;
        };
        if now < pending.due {
            return;
        }

        let give_up_at = match pending.phase {
            Phase::FollowUp => {
                let result = match pending.fix {
                    Fix1::Apply => self.service.set_config_disabled(&self.name),
                    Fix1::Undo => self.service.start(&self.name),
                };
                let operation = match pending.fix {
                    Fix1::Apply => "Disable",
                    Fix1::Undo => "Start",
                };
                self.report(operation, result, display);

                match self.policy.poll {
                    Some(poll) => now + poll.timeout,
                    None => now,
                }
            }
            Phase::Poll { give_up_at } => give_up_at,
        };

        let (status, line) = self.check();
        if let Some(poll) = self.policy.poll {
            if status != pending.fix.target() && now < give_up_at {
                tracing::debug!("{} not settled yet ({:?}), polling again", self.name, status);
                self.state = ToggleState::Settling(Pending {
                    fix: pending.fix,
                    due: (now + poll.interval).min(give_up_at),
                    phase: Phase::Poll { give_up_at },
                });
                return;
            }
        }

        self.state = ToggleState::Idle;
        display.append_log(line);
        display.set_status(status);
    }

    fn begin(&mut self, fix: Fix1, display: &mut impl Display, now: Instant) {
        if self.is_busy() {
            display.append_log("Fix 1 is still in progress; please wait.".to_string());
            return;
        }

        let (result, operation) = match fix {
            Fix1::Apply => {
                display.append_log("Applying Fix 1: stopping service...".to_string());
                (self.service.stop(&self.name), "Stop")
            }
            Fix1::Undo => {
                display.append_log("Undoing Fix 1: re-enabling service...".to_string());
                (self.service.set_config_auto_start(&self.name), "Enable")
            }
        };
        self.report(operation, result, display);

        self.state = ToggleState::Settling(Pending {
            fix,
            due: now + self.policy.delay,
            phase: Phase::FollowUp,
        });
    }

    fn check(&self) -> (ServiceStatus, String) {
        match self.service.query(&self.name) {
            Ok(raw) => {
                let verdict = assess(&raw);
                (verdict.status(), verdict.describe(&self.name))
            }
            Err(e) => {
                tracing::warn!("status query for {} failed: {e}", self.name);
                (ServiceStatus::Unknown, format!("Error checking status: {e}"))
            }
        }
    }

    fn report(
        &self,
        operation: &str,
        result: Result<(), ServiceError>,
        display: &mut impl Display,
    ) {
        if let Err(e) = result {
            tracing::warn!("{operation} {} failed: {e}", self.name);
            display.append_log(format!("{operation} failed: {e}"));
        }
    }
}
