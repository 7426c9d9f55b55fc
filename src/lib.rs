//! # Gatewatch - Payload Inspection Engine
//!
//! Classifies untrusted request payloads with a multi-pattern signature
//! automaton and stack-based structural/protocol validators, exposed as a
//! pure function boundary with thin HTTP and CLI fronts.
//!
//! ## Architecture
//!
//! ```text
//!                      decoded input "SYN,SYN-ACK,ACK|payload"
//!                                      |
//!                              InspectionPipeline
//!                             /        |          \
//!                  HandshakeValidator  |           \
//!                  (push-down, token   |            \
//!                   grammar)    StructuralValidator  SignatureAutomaton
//!                               (bracket/quote       (shared transition
//!                                stack, depth bound)  table, trap states)
//!                             \        |          /
//!                              Verdict (status, detected)
//!                                      |
//!                               "<status>|<detected>"
//! ```
//!
//! ## Classifications
//!
//! | Field    | Value | Meaning                                         |
//! |----------|-------|-------------------------------------------------|
//! | status   | 0     | Handshake and payload structure valid           |
//! | status   | 1     | Protocol violation or structural syntax error   |
//! | status   | 2     | Nesting depth exceeded (DoS signal)             |
//! | detected | 0/1   | Malicious signature found in the payload        |
//!
//! The status field composes the protocol and structural results by
//! maximum severity; signature scanning runs only after a valid handshake
//! unless configured otherwise.
//!
//! ## Signature Categories
//!
//! | Category          | Examples                                  |
//! |-------------------|-------------------------------------------|
//! | Command injection | `whoami`, `curl`, `system(`               |
//! | SQL injection     | `union select`, `drop table`, `or 1=1`    |
//! | XSS               | `<script`, `javascript:`, `onerror=`      |
//! | Path traversal    | `../`, `/etc/passwd`, `.env`              |
//!
//! Matching is case-insensitive; both byte cases are folded into the
//! transition table at build time.
//!
//! ## Quick Start
//!
//! ### Library
//!
//! ```rust,ignore
//! use gatewatch::inspect::{InspectConfig, Inspector};
//!
//! let inspector = Inspector::new(InspectConfig::default());
//!
//! let verdict = inspector.inspect("SYN,SYN-ACK,ACK|1 union select 2");
//! assert_eq!(verdict.wire(), "0|1");
//!
//! let verdict = inspector.inspect("|<<<<");
//! assert_eq!(verdict.wire(), "2|0");
//! ```
//!
//! ### Server
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gatewatch::server::{create_router, AppState, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(8080);
//! let app = create_router(Arc::new(AppState::new(config)));
//! // GET /scan?input=SYN%2CSYN-ACK%2CACK%7Chello  ->  "0|0"
//! ```
//!
//! ## Concurrency
//!
//! The signature transition table is built once and shared immutably; all
//! per-scan state is stack-local. Any number of inspections may run
//! concurrently without locking. Rule reloads, if ever added, publish a
//! fresh table behind a new handle instead of mutating the live one.
//!
//! ## Modules
//!
//! - [`inspect`]: Signature automaton, validators, pipeline (the core)
//! - [`server`]: HTTP API server (Axum-based)
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod config;
pub mod error;
pub mod inspect;
pub mod server;

// Re-exports for convenience
pub use config::Config;
pub use error::{GatewatchError, Result};
pub use inspect::{
    HandshakeStatus, HandshakeValidator, InspectConfig, InspectMode, Inspector,
    SignatureAutomaton, SignatureMatcher, StructuralStatus, StructuralValidator, Verdict,
};
pub use server::{AppState, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
