//! Server state.

use std::time::{Duration, Instant};

use super::config::ServerConfig;
use crate::inspect::Inspector;

/// Application state shared across handlers.
///
/// The inspector (and the signature table inside it) is built once here
/// and only ever read afterward; handlers share it behind an `Arc`. No
/// per-request state survives an inspection.
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Inspection engine
    pub inspector: Inspector,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state, compiling the signature automaton
    pub fn new(config: ServerConfig) -> Self {
        let inspector = Inspector::new(config.inspect.clone());

        Self {
            config,
            inspector,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
