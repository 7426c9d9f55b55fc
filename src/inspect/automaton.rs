//! Multi-pattern signature automaton.
//!
//! Every signature in the library is merged into one shared prefix
//! structure: a table of states, each a 256-way branch on the next input
//! byte. Scanning walks the table with a single stack-local cursor, so a
//! built automaton can serve any number of concurrent scans.
//!
//! On a missed transition the cursor resets toward the start state and
//! re-examines the failing byte against state 0, so a signature that begins
//! exactly at that byte is still recognized (`"uniunion select"` matches).
//! This single-byte retry is an approximation of full Aho-Corasick failure
//! links; a match starting more than one byte inside a failed longer
//! attempt can be missed.

use super::patterns::{all_signatures, Signature};
use super::SignatureMatcher;

/// Sentinel for "no transition" (state 0 is the start state and is never a
/// transition target, so 0 doubles as the absent marker).
const NO_TRANSITION: u32 = 0;

/// Shared state-transition table for all signatures.
///
/// Immutable once built. State 0 is the unique start state and is never
/// accepting; accepting flags are trap-sticky and never cleared.
#[derive(Debug)]
pub struct TransitionTable {
    rows: Vec<[u32; 256]>,
    accepting: Vec<bool>,
}

impl TransitionTable {
    fn new() -> Self {
        Self {
            rows: vec![[NO_TRANSITION; 256]],
            accepting: vec![false],
        }
    }

    /// Insert one signature, walking from the start state and allocating a
    /// new state wherever no transition exists. ASCII letters install both
    /// byte cases under the same successor, so scanning needs no runtime
    /// case folding.
    fn insert(&mut self, needle: &[u8]) {
        if needle.is_empty() {
            return;
        }

        let mut state = 0usize;
        for &byte in needle {
            let lower = byte.to_ascii_lowercase();
            let next = self.rows[state][lower as usize];

            if next == NO_TRANSITION {
                let fresh = self.rows.len() as u32;
                self.rows.push([NO_TRANSITION; 256]);
                self.accepting.push(false);

                self.rows[state][lower as usize] = fresh;
                let upper = lower.to_ascii_uppercase();
                if upper != lower {
                    self.rows[state][upper as usize] = fresh;
                }
                state = fresh as usize;
            } else {
                state = next as usize;
            }
        }
        self.accepting[state] = true;
    }

    /// Number of allocated states (including the start state)
    pub fn state_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    fn step(&self, state: u32, byte: u8) -> u32 {
        self.rows[state as usize][byte as usize]
    }

    #[inline]
    fn is_accepting(&self, state: u32) -> bool {
        self.accepting[state as usize]
    }
}

/// Deterministic multi-pattern matcher over the signature library.
pub struct SignatureAutomaton {
    table: TransitionTable,
}

impl Default for SignatureAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureAutomaton {
    /// Build the automaton over the full built-in signature library
    pub fn new() -> Self {
        Self::with_signatures(all_signatures())
    }

    /// Build the automaton over a specific signature set
    pub fn with_signatures<'a>(signatures: impl IntoIterator<Item = &'a Signature>) -> Self {
        let mut table = TransitionTable::new();
        for sig in signatures {
            table.insert(sig.needle.as_bytes());
        }
        Self { table }
    }

    /// Number of states in the compiled table
    pub fn state_count(&self) -> usize {
        self.table.state_count()
    }

    /// Scan a payload. Returns `true` as soon as any accepting state is
    /// reached; `false` if the input ends without one. Total over any byte
    /// sequence.
    pub fn scan(&self, payload: &[u8]) -> bool {
        let mut state: u32 = 0;

        for &byte in payload {
            let next = self.table.step(state, byte);
            state = if next != NO_TRANSITION {
                next
            } else {
                // Reset, then retry this byte against the start state so a
                // signature starting here is not lost.
                self.table.step(0, byte)
            };

            if self.table.is_accepting(state) {
                return true;
            }
        }
        false
    }
}

impl SignatureMatcher for SignatureAutomaton {
    fn scan(&self, payload: &[u8]) -> bool {
        SignatureAutomaton::scan(self, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_exact_signature() {
        let automaton = SignatureAutomaton::new();
        assert!(automaton.scan(b"whoami"));
        assert!(automaton.scan(b"union select"));
        assert!(automaton.scan(b"<script"));
        assert!(automaton.scan(b"../"));
    }

    #[test]
    fn test_detects_embedded_signature() {
        let automaton = SignatureAutomaton::new();
        assert!(automaton.scan(b"1 AND 2=2 union select name from users"));
        assert!(automaton.scan(b"path=....//....//../etc/passwd"));
    }

    #[test]
    fn test_case_insensitive() {
        let automaton = SignatureAutomaton::new();
        assert!(automaton.scan(b"WHOAMI"));
        assert!(automaton.scan(b"UnIoN SeLeCt"));
        assert!(automaton.scan(b"<SCRIPT>alert(1)"));
    }

    #[test]
    fn test_clean_payloads() {
        let automaton = SignatureAutomaton::new();
        assert!(!automaton.scan(b""));
        assert!(!automaton.scan(b"hello world"));
        assert!(!automaton.scan(b"ordinary search query"));
    }

    #[test]
    fn test_retry_after_failed_prefix() {
        let automaton = SignatureAutomaton::new();
        // "uni" walks three states into "union ...", fails on the second
        // 'u', and the retry-at-start must pick the match back up.
        assert!(automaton.scan(b"uniunion select"));
        assert!(automaton.scan(b"wwhoami"));
    }

    #[test]
    fn test_terminates_on_first_hit() {
        let automaton = SignatureAutomaton::new();
        // Trailing garbage after an accepting state must not un-detect.
        assert!(automaton.scan(b"whoami; rm -rf /tmp/x"));
    }

    #[test]
    fn test_start_state_never_accepting() {
        let automaton = SignatureAutomaton::new();
        assert!(!automaton.table.is_accepting(0));
    }

    #[test]
    fn test_shared_prefixes_share_states() {
        // "union select" and "union all select" share the "union " prefix;
        // the merged table must be smaller than the sum of needle lengths.
        let automaton = SignatureAutomaton::new();
        let total_len: usize = all_signatures().map(|s| s.needle.len()).sum();
        assert!(automaton.state_count() <= total_len);
        assert!(automaton.state_count() > 1);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let automaton = SignatureAutomaton::new();
        for payload in [&b"whoami"[..], b"hello", b"", b"uniunion select"] {
            assert_eq!(automaton.scan(payload), automaton.scan(payload));
        }
    }
}
