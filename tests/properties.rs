//! Property-based tests for the inspection core.
//!
//! Every component must be total and stateless: identical inputs yield
//! identical classifications, any byte sequence resolves to a verdict.

use gatewatch::inspect::{
    InspectConfig, Inspector, SignatureAutomaton, StructuralStatus, StructuralValidator,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn scan_is_idempotent(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        let automaton = SignatureAutomaton::new();
        prop_assert_eq!(automaton.scan(&payload), automaton.scan(&payload));
    }

    #[test]
    fn validate_is_idempotent(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        let validator = StructuralValidator::default();
        prop_assert_eq!(validator.validate(&payload), validator.validate(&payload));
    }

    #[test]
    fn inspect_is_total(input in ".{0,200}") {
        let inspector = Inspector::new(InspectConfig::default());
        let verdict = inspector.inspect(&input);
        prop_assert!(verdict.status <= 2);
    }

    #[test]
    fn balanced_nesting_within_bound_is_valid(
        depth in 0usize..=3,
        filler in "[a-z0-9 ]{0,16}",
    ) {
        let mut payload = String::new();
        for _ in 0..depth {
            payload.push('(');
        }
        payload.push_str(&filler);
        for _ in 0..depth {
            payload.push(')');
        }

        let validator = StructuralValidator::default();
        prop_assert_eq!(validator.validate(payload.as_bytes()), StructuralStatus::Valid);
    }

    #[test]
    fn one_opener_past_the_bound_is_depth_exceeded(extra in 4usize..=32) {
        let payload = "<".repeat(extra);
        let validator = StructuralValidator::default();
        prop_assert_eq!(
            validator.validate(payload.as_bytes()),
            StructuralStatus::DepthExceeded
        );
    }

    #[test]
    fn signature_after_inert_prefix_is_detected(
        // No signature begins with these prefix bytes, so the cursor is
        // still at the start state when the needle begins; the single-byte
        // retry does not recover matches that start mid-way through a
        // failed longer attempt.
        prefix in "[qz ]{0,12}",
        suffix in "[a-z ]{0,12}",
    ) {
        let automaton = SignatureAutomaton::new();
        let payload = format!("{prefix}union select{suffix}");
        prop_assert!(automaton.scan(payload.as_bytes()));
    }
}
