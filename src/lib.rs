//! Switch a Windows filter service off and back on from a terminal UI.
//!
//! The service is read through `sc query` / `sc qc` and classified as enabled,
//! disabled or unknown; "Fix 1" stops and disables it, "Undo Fix 1" re-enables
//! and starts it, each followed by a delayed status refresh.

pub mod app;
pub mod config;
pub mod elevation;
pub mod logging;
