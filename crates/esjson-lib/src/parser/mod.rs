//! Parser infrastructure for Elasticsearch query bodies.
//!
//! # Architecture
//!
//! A recursive descent parser over a flat token stream. The output is a
//! [`ValueTree`] arena, not a syntax tree: callers want values and keys, and
//! the tokens stored on each node are enough to point back into the source.
//!
//! - `lexer`: produces `Vec<Token>` from source text, never fails
//! - `core`: parser state machine with trivia skipping and recovery helpers
//! - `grammar`: one method per production
//!
//! # Error recovery
//!
//! The parser is resilient. It always produces a tree, even for broken input:
//!
//! - A pair or element that fails keeps its slot (`value: None` for pairs)
//! - Resynchronization happens on `,`, `}` and `]`, never inside a nested container
//! - Diagnostics at the same position as the previous one are suppressed
//!
//! # Fragments
//!
//! A body typed into an editor or received in chunks is usually cut off. In
//! fragment mode, the end of input (or a last token more input could still
//! complete) ends parsing silently, keeping every value that completed.
//!
//! # Recursion limit
//!
//! Nesting depth is capped (512 by default). Past the limit the parser
//! reports `NestingTooDeep` once and gives up on the rest of the body.

mod core;
mod grammar;
mod invariants;
pub mod lexer;
pub mod syntax_kind;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod tests;

pub use core::Parser;

use crate::diagnostics::{DiagnosticMessage, Diagnostics};
use crate::value::{ValueId, ValueTree};

const DEFAULT_RECURSION_LIMIT: u32 = 512;

/// Knobs for a parse. Built with chained setters.
///
/// ```
/// use esjson::ParseOptions;
///
/// let parse = ParseOptions::new()
///     .wrap_in_parens(true)
///     .recursion_limit(Some(64))
///     .parse(r#"{"size": 10}"#);
/// assert!(!parse.has_error());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    wrap_in_parens: bool,
    fragments: Option<bool>,
    recursion_limit: Option<u32>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            wrap_in_parens: false,
            fragments: None,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the body as an implicit group holding exactly one value.
    ///
    /// In this mode an empty body is an error and the body must be complete.
    pub fn wrap_in_parens(mut self, value: bool) -> Self {
        self.wrap_in_parens = value;
        self
    }

    /// Force fragment tolerance on or off. `None` (the default) enables it
    /// exactly when `wrap_in_parens` is off.
    pub fn fragments(mut self, value: Option<bool>) -> Self {
        self.fragments = value;
        self
    }

    /// Maximum nesting of objects and arrays. `None` removes the cap.
    pub fn recursion_limit(mut self, value: Option<u32>) -> Self {
        self.recursion_limit = value;
        self
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrap_in_parens
    }

    pub fn fragments_enabled(&self) -> bool {
        self.fragments.unwrap_or(!self.wrap_in_parens)
    }

    pub fn parse(&self, source: &str) -> Parse {
        let tokens = lexer::lex(source);
        tracing::trace!(tokens = tokens.len(), len = source.len(), "lexed query body");
        Parser::new(source, tokens, self.clone()).parse()
    }
}

/// Result of parsing a body: the value tree and everything that went wrong.
#[derive(Debug, Clone)]
pub struct Parse {
    pub(crate) tree: ValueTree,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) truncated: bool,
}

impl Parse {
    pub fn tree(&self) -> &ValueTree {
        &self.tree
    }

    /// The top-level value. `None` for an empty body, or when nothing usable
    /// could be parsed.
    pub fn root(&self) -> Option<ValueId> {
        self.tree.root()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn errors(&self) -> &[DiagnosticMessage] {
        self.diagnostics.as_slice()
    }

    /// Whether fragment mode stopped at a cut-off end of input.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_tree(self) -> ValueTree {
        self.tree
    }
}

/// Parses `source` with default options apart from `wrap_in_parens`.
pub fn parse(source: &str, wrap_in_parens: bool) -> Parse {
    ParseOptions::new().wrap_in_parens(wrap_in_parens).parse(source)
}
