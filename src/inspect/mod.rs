//! Payload inspection engine.
//!
//! This module classifies an untrusted, attacker-controlled input fragment
//! along two independent axes:
//!
//! 1. **Structure** — does the payload balance its quotes/brackets, and does
//!    its nesting stay within a bounded depth?
//! 2. **Signatures** — does the payload contain a known malicious substring
//!    (command injection, SQL injection, XSS, path traversal)?
//!
//! An optional ordered handshake token sequence is checked against a small
//! connection-establishment grammar before the payload is scanned.
//!
//! # Classifications
//!
//! | Result              | Code | Meaning                                      |
//! |---------------------|------|----------------------------------------------|
//! | `Valid`             | 0    | Well-formed payload / complete handshake     |
//! | `SyntaxError`       | 1    | Unbalanced or unterminated structure         |
//! | `DepthExceeded`     | 2    | Abusive nesting (DoS signal)                 |
//! | `ProtocolViolation` | 1    | Handshake out of grammatical order           |
//!
//! Malformed input is the expected domain: every validator is total and
//! resolves to a classification, never an error.
//!
//! # Shared state
//!
//! The only long-lived object is the precompiled signature transition table.
//! It is immutable after construction and safe for unlimited concurrent
//! readers; all per-scan state (automaton cursor, bracket stack, handshake
//! stack) is stack-local to the call.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gatewatch::inspect::{InspectConfig, Inspector};
//!
//! let inspector = Inspector::new(InspectConfig::default());
//!
//! let verdict = inspector.inspect("SYN,SYN-ACK,ACK|union select");
//! assert_eq!(verdict.wire(), "0|1");
//! ```

mod automaton;
mod handshake;
mod patterns;
mod pipeline;
mod structure;

pub use automaton::{SignatureAutomaton, TransitionTable};
pub use handshake::{HandshakeStatus, HandshakeValidator};
pub use patterns::{
    signature_count, RegexMatcher, Signature, SignatureCategory, COMMAND_SIGNATURES,
    SQL_SIGNATURES, TRAVERSAL_SIGNATURES, XSS_SIGNATURES,
};
pub use pipeline::{split_input, InspectConfig, InspectMode, Inspector, Verdict};
pub use structure::{StructuralStatus, StructuralValidator, DEFAULT_MAX_DEPTH};

/// Inspection engine version
pub const ENGINE_VERSION: &str = "1.0.0";

/// Common contract for signature matchers.
///
/// Both the transition-table automaton and the regex safety net implement
/// this; the pipeline composes any enabled matchers by logical OR.
pub trait SignatureMatcher {
    /// Scan a payload, returning `true` if any signature occurs in it.
    fn scan(&self, payload: &[u8]) -> bool;
}
