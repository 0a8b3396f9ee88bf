//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// Every lookahead burns fuel; only consuming a token or changing depth refills it.
    #[inline]
    pub(super) fn ensure_progress(&self) {
        let fuel = self.debug_fuel.get();
        assert!(fuel != 0, "parser stuck at token {}: lookahead without progress", self.pos);
        self.debug_fuel.set(fuel - 1);
    }

    /// Productions are only entered on their first token.
    #[inline]
    pub(super) fn assert_current(&mut self, expected_kind: SyntaxKind) {
        let current_kind = self.current();
        assert_eq!(
            current_kind, expected_kind,
            "production entered on {current_kind:?} instead of {expected_kind:?}",
        );
    }

    /// Each container pops what it pushed, on every exit path.
    #[inline]
    pub(super) fn assert_delimiters_balanced(&self) {
        assert!(
            self.delimiter_stack.is_empty() && self.depth == 0,
            "unbalanced container bookkeeping: {} open delimiters at depth {}",
            self.delimiter_stack.len(),
            self.depth,
        );
    }
}
