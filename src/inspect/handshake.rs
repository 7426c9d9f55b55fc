//! Handshake grammar validator.
//!
//! Checks an ordered token sequence against the three-way
//! SYN / SYN-ACK / ACK connection-establishment grammar. The validator is a
//! push-down automaton rather than a flat sequence match: the stack carries
//! every still-expected continuation, so the number of simultaneously
//! pending phases is tracked exactly.

/// Outcome of a handshake validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStatus {
    /// Complete, grammatically ordered handshake
    Valid,
    /// Out-of-order, unknown, or incomplete token sequence
    ProtocolViolation,
}

impl HandshakeStatus {
    /// Numeric wire code (0 = valid, 1 = violation)
    pub fn code(self) -> u8 {
        match self {
            HandshakeStatus::Valid => 0,
            HandshakeStatus::ProtocolViolation => 1,
        }
    }
}

/// Marker for the token expected next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expectation {
    Syn,
    SynAck,
    Ack,
}

/// Push-down validator for the connection handshake.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandshakeValidator;

impl HandshakeValidator {
    /// Create a validator for the three-way handshake grammar
    pub fn new() -> Self {
        Self
    }

    /// Classify a token sequence. Total over any sequence of strings.
    ///
    /// The stack is seeded expecting the opening `SYN`. Accepting `SYN`
    /// replaces that expectation with two: the final `ACK` (pushed first)
    /// and the immediate `SYN-ACK` (pushed on top, so it is checked next).
    /// `SYN-ACK` and `ACK` each discharge their own expectation. Anything
    /// else, or a token arriving on an empty stack, is a violation, as is
    /// a stack left wound up when the tokens run out.
    pub fn validate<S: AsRef<str>>(&self, tokens: &[S]) -> HandshakeStatus {
        let mut stack = vec![Expectation::Syn];

        for token in tokens {
            let Some(&expected) = stack.last() else {
                return HandshakeStatus::ProtocolViolation;
            };

            match (expected, token.as_ref()) {
                (Expectation::Syn, "SYN") => {
                    stack.pop();
                    stack.push(Expectation::Ack);
                    stack.push(Expectation::SynAck);
                },
                (Expectation::SynAck, "SYN-ACK") => {
                    stack.pop();
                },
                (Expectation::Ack, "ACK") => {
                    stack.pop();
                },
                _ => return HandshakeStatus::ProtocolViolation,
            }
        }

        if stack.is_empty() {
            HandshakeStatus::Valid
        } else {
            HandshakeStatus::ProtocolViolation
        }
    }
}
