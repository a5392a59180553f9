// Defines the core data structures for the application.

use std::fmt;

/// Name of the OS service being toggled. Fixed for the whole process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tri-state result of a status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    /// Running and not disabled: the filter is active.
    Enabled,
    /// Stopped and disabled: the fix is in place.
    Disabled,
    #[default]
    Unknown,
}

impl ServiceStatus {
    pub fn label(self) -> &'static str {
        match self {
            ServiceStatus::Enabled => "Filter Enabled",
            ServiceStatus::Disabled => "Filter Disabled",
            ServiceStatus::Unknown => "Unknown",
        }
    }
}

/// Output of `sc query` and `sc qc`, captured together for one classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQueryResult {
    pub query: String,
    pub config: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIntent {
    /// Fix 1: stop, then disable.
    ApplyPrimary,
    /// Undo Fix 1: enable, then start.
    UndoPrimary,
    /// Fix 2 (BETA). Logs only.
    ApplySecondary,
    /// Undo Fix 2 (BETA). Logs only.
    UndoSecondary,
}

/// Everything the user can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Panic,
    Toggle(ToggleIntent),
    CheckStatus,
    Quit,
}
