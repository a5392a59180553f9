// Command-line settings, resolved once at startup.

use crate::app::controller::{PollPolicy, SettlePolicy};
use crate::app::model::ServiceName;
use anyhow::{Result, bail};
use clap::Parser;
use std::time::Duration;

/// The one service this tool controls.
pub const SERVICE_NAME: &str = "AristotleK12FilterService";

#[derive(Debug, Parser)]
#[command(
    name = "filter-toggle",
    version,
    about = "Switch the filter service off (Fix 1) and back on, with a live status indicator"
)]
pub struct Cli {
    /// Wait between the two halves of a Fix 1 toggle, in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub delay_ms: u64,

    /// Re-check the status at this interval after the wait until it settles
    #[arg(long, requires = "poll_timeout_ms")]
    pub poll_interval_ms: Option<u64>,

    /// Stop re-checking after this long and show whatever was last seen
    #[arg(long, requires = "poll_interval_ms")]
    pub poll_timeout_ms: Option<u64>,

    /// Print the current status once and exit instead of opening the UI
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub service: ServiceName,
    pub policy: SettlePolicy,
    pub headless: bool,
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings> {
        let poll = match (self.poll_interval_ms, self.poll_timeout_ms) {
            (Some(0), _) => bail!("--poll-interval-ms must be greater than zero"),
            (Some(interval), Some(timeout)) => Some(PollPolicy {
                interval: Duration::from_millis(interval),
                timeout: Duration::from_millis(timeout),
            }),
            _ => None,
        };

        Ok(Settings {
            service: ServiceName::new(SERVICE_NAME),
            policy: SettlePolicy {
                delay: Duration::from_millis(self.delay_ms),
                poll,
            },
            headless: self.check,
        })
    }
}
