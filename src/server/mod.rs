//! Gatewatch HTTP server.
//!
//! Exposes the inspection pipeline over HTTP:
//! - `GET /scan?input=...` — inspect one decoded input, plain-text verdict
//! - `GET /health` — liveness
//! - `GET /status` — uptime and engine counters
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gatewatch::server::{create_router, AppState, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(8080);
//! let app = create_router(Arc::new(AppState::new(config)));
//! ```

mod config;
mod handlers;
mod state;

pub use config::ServerConfig;
pub use handlers::{create_router, health_check};
pub use state::AppState;
