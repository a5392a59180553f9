// The status indicator and activity log the controller reports to.

use super::model::ServiceStatus;
use chrono::Local;

/// Where the controller sends status changes and log lines.
pub trait Display {
    fn set_status(&mut self, status: ServiceStatus);
    fn append_log(&mut self, message: String);
}

/// Append-only, timestamped activity log.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<String>,
}

impl ActivityLog {
    pub fn push(&mut self, message: &str) {
        tracing::info!("{message}");
        let timestamp = Local::now().format("[%H:%M:%S] ");
        self.entries.push(format!("{timestamp}{message}"));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// State backing the terminal UI: the current status and the log with its scroll position.
#[derive(Debug, Default)]
pub struct Panel {
    pub status: ServiceStatus,
    pub log: ActivityLog,
    pub log_scroll: u16,
    pub stick_to_bottom: bool,
    /// Log rows that fit on screen, as of the last render.
    pub log_rows: u16,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            stick_to_bottom: true,
            ..Self::default()
        }
    }

    /// Scroll offset that puts the newest entry on the last visible row.
    pub fn bottom_offset(&self) -> u16 {
        let hidden = self
            .log
            .entries()
            .len()
            .saturating_sub(usize::from(self.log_rows));
        u16::try_from(hidden).unwrap_or(u16::MAX)
    }

    pub fn scroll_up(&mut self) {
        self.pause_auto_scroll();
        self.log_scroll = self.log_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.pause_auto_scroll();
        self.log_scroll = self.log_scroll.saturating_add(1).min(self.bottom_offset());
    }

    // Leaving auto-scroll starts from where the view currently is.
    fn pause_auto_scroll(&mut self) {
        if self.stick_to_bottom {
            self.stick_to_bottom = false;
            self.log_scroll = self.bottom_offset();
        }
    }

    pub fn resume_auto_scroll(&mut self) {
        self.stick_to_bottom = true;
    }
}

impl Display for Panel {
    fn set_status(&mut self, status: ServiceStatus) {
        tracing::debug!("status -> {:?}", status);
        self.status = status;
    }

    fn append_log(&mut self, message: String) {
        self.log.push(&message);
    }
}
