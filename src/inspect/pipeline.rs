//! Inspection pipeline: input splitting, validator composition, verdicts.
//!
//! The decoded input carries an optional handshake prefix and a payload:
//! `token1,token2,...,tokenN|payload`. The pipeline splits the two, runs
//! the handshake validator on the tokens, then runs the structural
//! validator and signature matchers on the payload according to the
//! configured mode.
//!
//! # Status composition
//!
//! The verdict carries one status field and one detection flag, rendered
//! on the wire as `"<status>|<detected>"`. The status field is the higher
//! severity of the protocol result (valid = 0, violation = 1) and the
//! structural result (valid = 0, syntax error = 1, depth exceeded = 2), so
//! a depth-exceeded payload is reported even when the handshake already
//! failed. Signature scanning runs only when the handshake is valid unless
//! `scan_on_violation` is set.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::automaton::SignatureAutomaton;
use super::handshake::{HandshakeStatus, HandshakeValidator};
use super::patterns::RegexMatcher;
use super::structure::{StructuralValidator, DEFAULT_MAX_DEPTH};
use super::SignatureMatcher;

/// Which payload checks run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectMode {
    /// Structural validation only; the detection flag is always false
    Structural,
    /// Signature scanning only; the status field carries the protocol
    /// result alone
    Signature,
    /// Structural validation and signature scanning
    #[default]
    Full,
}

impl FromStr for InspectMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structural" | "struct" => Ok(InspectMode::Structural),
            "signature" | "sig" => Ok(InspectMode::Signature),
            "full" => Ok(InspectMode::Full),
            other => Err(format!(
                "unknown inspection mode: {other}. Use: structural, signature, full"
            )),
        }
    }
}

/// Inspector configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Inspection mode
    pub mode: InspectMode,
    /// Maximum structural nesting depth
    pub max_depth: usize,
    /// Scan for signatures even when the handshake failed
    pub scan_on_violation: bool,
    /// Enable the redundant regex matcher alongside the automaton
    pub regex_net: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            mode: InspectMode::Full,
            max_depth: DEFAULT_MAX_DEPTH,
            scan_on_violation: false,
            regex_net: false,
        }
    }
}

/// Result of one inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Combined structural/protocol status (0 valid, 1 violation, 2 depth)
    pub status: u8,
    /// Signature detection flag
    pub detected: bool,
}

impl Verdict {
    /// Render as the plain-text wire format, e.g. `"0|1"`
    pub fn wire(&self) -> String {
        format!("{}|{}", self.status, u8::from(self.detected))
    }
}

/// Split a decoded input into handshake tokens and the payload remainder.
///
/// Splits on the first `|`; without one, the whole input is the token list
/// and the payload is empty. Tokens are comma-separated, empties dropped.
pub fn split_input(decoded: &str) -> (Vec<&str>, &str) {
    let (head, payload) = match decoded.split_once('|') {
        Some((head, payload)) => (head, payload),
        None => (decoded, ""),
    };

    let tokens = head.split(',').filter(|t| !t.is_empty()).collect();
    (tokens, payload)
}

/// Composed inspection engine.
///
/// Holds the precompiled signature automaton and the validator
/// configurations; `inspect` itself is pure and keeps no state between
/// calls, so one `Inspector` serves any number of concurrent callers.
pub struct Inspector {
    config: InspectConfig,
    automaton: SignatureAutomaton,
    structural: StructuralValidator,
    handshake: HandshakeValidator,
    regex_net: Option<RegexMatcher>,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(InspectConfig::default())
    }
}

impl Inspector {
    /// Build an inspector, compiling the signature automaton once
    pub fn new(config: InspectConfig) -> Self {
        let regex_net = config.regex_net.then(RegexMatcher::new);

        Self {
            automaton: SignatureAutomaton::new(),
            structural: StructuralValidator::new(config.max_depth),
            handshake: HandshakeValidator::new(),
            regex_net,
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Number of states in the compiled automaton
    pub fn automaton_states(&self) -> usize {
        self.automaton.state_count()
    }

    /// Inspect one decoded input. Total: malformed input is the domain,
    /// never an error.
    pub fn inspect(&self, decoded: &str) -> Verdict {
        let (tokens, payload) = split_input(decoded);
        let payload = payload.as_bytes();

        let protocol = self.handshake.validate(&tokens);

        let structural_code = match self.config.mode {
            InspectMode::Signature => 0,
            _ => self.structural.validate(payload).code(),
        };

        let detected = match self.config.mode {
            InspectMode::Structural => false,
            _ if protocol == HandshakeStatus::Valid || self.config.scan_on_violation => {
                self.scan(payload)
            },
            _ => false,
        };

        Verdict {
            status: protocol.code().max(structural_code),
            detected,
        }
    }

    /// Run the enabled signature matchers, composed by OR
    fn scan(&self, payload: &[u8]) -> bool {
        self.automaton.scan(payload)
            || self
                .regex_net
                .as_ref()
                .is_some_and(|net| net.scan(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_payload() {
        let (tokens, payload) = split_input("SYN,SYN-ACK,ACK|union select");
        assert_eq!(tokens, vec!["SYN", "SYN-ACK", "ACK"]);
        assert_eq!(payload, "union select");
    }

    #[test]
    fn test_split_without_separator() {
        let (tokens, payload) = split_input("SYN,ACK");
        assert_eq!(tokens, vec!["SYN", "ACK"]);
        assert_eq!(payload, "");
    }

    #[test]
    fn test_split_drops_empty_tokens() {
        let (tokens, payload) = split_input(",SYN,,ACK,|x");
        assert_eq!(tokens, vec!["SYN", "ACK"]);
        assert_eq!(payload, "x");
    }

    #[test]
    fn test_split_empty_handshake() {
        let (tokens, payload) = split_input("|<<<<");
        assert!(tokens.is_empty());
        assert_eq!(payload, "<<<<");
    }

    #[test]
    fn test_split_keeps_later_separators_in_payload() {
        let (tokens, payload) = split_input("SYN|a|b");
        assert_eq!(tokens, vec!["SYN"]);
        assert_eq!(payload, "a|b");
    }

    #[test]
    fn test_detects_signature_after_valid_handshake() {
        let inspector = Inspector::default();
        let verdict = inspector.inspect("SYN,SYN-ACK,ACK|union select");
        assert_eq!(verdict, Verdict { status: 0, detected: true });
        assert_eq!(verdict.wire(), "0|1");
    }

    #[test]
    fn test_skips_scan_on_handshake_violation() {
        let inspector = Inspector::default();
        let verdict = inspector.inspect("SYN,ACK|hello");
        assert_eq!(verdict, Verdict { status: 1, detected: false });
        assert_eq!(verdict.wire(), "1|0");
    }

    #[test]
    fn test_depth_outranks_protocol_violation() {
        let inspector = Inspector::default();
        let verdict = inspector.inspect("|<<<<");
        assert_eq!(verdict, Verdict { status: 2, detected: false });
        assert_eq!(verdict.wire(), "2|0");
    }

    #[test]
    fn test_scan_on_violation_policy() {
        let inspector = Inspector::new(InspectConfig {
            scan_on_violation: true,
            ..InspectConfig::default()
        });
        let verdict = inspector.inspect("SYN,ACK|union select");
        assert_eq!(verdict, Verdict { status: 1, detected: true });
    }

    #[test]
    fn test_structural_mode_never_detects() {
        let inspector = Inspector::new(InspectConfig {
            mode: InspectMode::Structural,
            ..InspectConfig::default()
        });
        let verdict = inspector.inspect("SYN,SYN-ACK,ACK|whoami");
        assert_eq!(verdict, Verdict { status: 0, detected: false });
    }

    #[test]
    fn test_signature_mode_skips_structural() {
        let inspector = Inspector::new(InspectConfig {
            mode: InspectMode::Signature,
            ..InspectConfig::default()
        });
        let verdict = inspector.inspect("SYN,SYN-ACK,ACK|((((");
        assert_eq!(verdict, Verdict { status: 0, detected: false });
    }

    #[test]
    fn test_regex_net_composes_by_or() {
        let inspector = Inspector::new(InspectConfig {
            regex_net: true,
            ..InspectConfig::default()
        });
        let verdict = inspector.inspect("SYN,SYN-ACK,ACK|UNION SELECT 1");
        assert!(verdict.detected);
    }

    #[test]
    fn test_clean_payload() {
        let inspector = Inspector::default();
        let verdict = inspector.inspect("SYN,SYN-ACK,ACK|hello world");
        assert_eq!(verdict, Verdict { status: 0, detected: false });
        assert_eq!(verdict.wire(), "0|0");
    }

    #[test]
    fn test_syntax_error_with_valid_handshake() {
        let inspector = Inspector::default();
        let verdict = inspector.inspect("SYN,SYN-ACK,ACK|(a>");
        assert_eq!(verdict, Verdict { status: 1, detected: false });
    }

    #[test]
    fn test_inspect_is_idempotent() {
        let inspector = Inspector::default();
        for input in ["SYN,SYN-ACK,ACK|union select", "SYN,ACK|x", "|<<<<", ""] {
            assert_eq!(inspector.inspect(input), inspector.inspect(input));
        }
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("full".parse::<InspectMode>(), Ok(InspectMode::Full));
        assert_eq!("SIG".parse::<InspectMode>(), Ok(InspectMode::Signature));
        assert_eq!(
            "structural".parse::<InspectMode>(),
            Ok(InspectMode::Structural)
        );
        assert!("bogus".parse::<InspectMode>().is_err());
    }
}
