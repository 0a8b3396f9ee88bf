//! Parser state machine and low-level operations.

use rowan::{TextRange, TextSize};

use super::lexer::{NumberShape, Token, is_keyword_prefix, number_shape, token_text};
use super::syntax_kind::{SyntaxKind, TokenSet};
use super::{Parse, ParseOptions};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::value::ValueTree;

#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

/// One parser session per body. Trivia is skipped lazily on every lookahead.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) tree: ValueTree,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    pub(super) last_diagnostic_pos: Option<TextSize>,
    pub(super) delimiter_stack: Vec<OpenDelimiter>,
    pub(super) debug_fuel: std::cell::Cell<u32>,
    pub(super) options: ParseOptions,
    /// Fragment mode hit the end of a cut-off buffer. Everything unwinds from here.
    pub(super) truncated: bool,
    /// Recursion limit hit. The remaining input was skipped.
    pub(super) abandoned: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>, options: ParseOptions) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            tree: ValueTree::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(8),
            debug_fuel: std::cell::Cell::new(256),
            options,
            truncated: false,
            abandoned: false,
        }
    }

    pub fn parse(mut self) -> Parse {
        self.parse_root();
        self.assert_delimiters_balanced();
        tracing::debug!(
            nodes = self.tree.len(),
            errors = self.diagnostics.len(),
            truncated = self.truncated,
            "parsed query body"
        );
        Parse {
            tree: self.tree,
            diagnostics: self.diagnostics,
            truncated: self.truncated,
        }
    }

    pub(super) fn should_stop(&self) -> bool {
        self.truncated || self.abandoned
    }

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.ensure_progress();
        self.tokens.get(self.pos).map_or(SyntaxKind::Eof, |t| t.kind)
    }

    pub(super) fn current_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        self.tokens.get(self.pos).copied()
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.current_token()
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        let source = self.source;
        self.current_token().map_or("", |t| token_text(source, &t))
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Moves past trivia. Unterminated block comments are reported here, except
    /// in fragment mode where they are just a cut-off tail.
    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos).copied() {
            if !token.kind.is_trivia() {
                break;
            }
            if token.kind == SyntaxKind::UnterminatedComment && !self.options.fragments_enabled() {
                self.report_at(DiagnosticKind::UnterminatedComment, Some(token), None);
            }
            self.pos += 1;
        }
    }

    pub(super) fn bump(&mut self) -> Token {
        self.skip_trivia();
        assert!(self.pos < self.tokens.len(), "bump called at EOF");
        let token = self.tokens[self.pos];
        self.reset_debug_fuel();
        self.pos += 1;
        token
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.currently_is(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    pub(super) fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    /// Fragment mode only: is the parser standing at the cut-off end of a buffer?
    ///
    /// True at end of input, and on a last token that more input could still
    /// complete or change (`"abc`, `12`, `tru`, `{{#to`). Sets `truncated` so
    /// every enclosing production unwinds without reporting anything.
    pub(super) fn at_truncation(&mut self) -> bool {
        if self.truncated {
            return true;
        }
        if !self.options.fragments_enabled() {
            return false;
        }
        let cut = match self.current_token() {
            None => true,
            Some(token) => self.is_incomplete_tail(&token),
        };
        if cut {
            tracing::trace!(
                offset = u32::from(self.current_span().start()),
                "buffer ends mid-value"
            );
            self.truncated = true;
        }
        cut
    }

    /// Inside a parameter a trailing `{` may be the first character of the
    /// closing marker rather than an object.
    pub(super) fn at_truncation_in_marker(&mut self) -> bool {
        if self.at_truncation() {
            return true;
        }
        if !self.options.fragments_enabled() {
            return false;
        }
        let eof = self.eof_offset();
        let cut = self
            .current_token()
            .is_some_and(|t| t.kind == SyntaxKind::BraceOpen && t.span.end() == eof);
        if cut {
            self.truncated = true;
        }
        cut
    }

    fn is_incomplete_tail(&self, token: &Token) -> bool {
        if token.span.end() != self.eof_offset() {
            return false;
        }
        let text = self.text(token);
        match token.kind {
            SyntaxKind::UnterminatedStr | SyntaxKind::PartialMarker => true,
            SyntaxKind::Number | SyntaxKind::MalformedNumber => {
                number_shape(text) != NumberShape::Invalid
            }
            SyntaxKind::Ident => is_keyword_prefix(text),
            _ => false,
        }
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    /// Skips tokens until one in `recovery` (or end of input), keeping brackets
    /// opened along the way balanced so their insides don't count as sync points.
    pub(super) fn skip_until(&mut self, recovery: TokenSet) {
        let mut nesting = 0u32;
        loop {
            match self.current() {
                SyntaxKind::Eof => break,
                kind if nesting == 0 && recovery.contains(kind) => break,
                SyntaxKind::BraceOpen | SyntaxKind::BracketOpen => nesting += 1,
                SyntaxKind::BraceClose | SyntaxKind::BracketClose => {
                    nesting = nesting.saturating_sub(1)
                }
                _ => {}
            }
            let skipped = self.bump();
            tracing::trace!(kind = ?skipped.kind, "skipped while resynchronizing");
        }
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    fn report_at(&mut self, kind: DiagnosticKind, token: Option<Token>, detail: Option<String>) {
        let range = token.map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span);
        if !self.should_report(range.start()) {
            return;
        }
        let builder = self.diagnostics.report(kind, range, token);
        match detail {
            Some(detail) => builder.message(detail).emit(),
            None => builder.emit(),
        }
    }

    /// Report at the current token (or end of input) without consuming it.
    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let token = self.current_token();
        self.report_at(kind, token, None);
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, detail: impl Into<String>) {
        let token = self.current_token();
        self.report_at(kind, token, Some(detail.into()));
    }

    /// `expected X, found Y` against whatever is current.
    pub(super) fn error_found(&mut self, kind: DiagnosticKind) {
        let found = self.describe_current();
        self.error_msg(kind, found);
    }

    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind, detail: Option<String>) {
        let token = self.current_token();
        self.report_at(kind, token, detail);
        if token.is_some() {
            self.bump();
        }
    }

    pub(super) fn describe_current(&mut self) -> String {
        match self.current() {
            SyntaxKind::Ident | SyntaxKind::Garbage => format!("`{}`", self.current_text()),
            kind => kind.describe().to_string(),
        }
    }

    /// Closing delimiter missing at end of input (strict mode) or facing the
    /// wrong closer. Points at the current position, related to the opener.
    pub(super) fn error_unclosed(&mut self, open: OpenDelimiter) {
        let token = self.current_token();
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        let construct = match open.kind {
            SyntaxKind::BraceOpen => "object",
            _ => "array",
        };
        let (kind, found) = match token {
            Some(t) => (DiagnosticKind::MismatchedDelimiter, t.kind.describe()),
            None if open.kind == SyntaxKind::BraceOpen => {
                (DiagnosticKind::UnclosedObject, SyntaxKind::Eof.describe())
            }
            None => (DiagnosticKind::UnclosedArray, SyntaxKind::Eof.describe()),
        };
        self.diagnostics
            .report(kind, current, token)
            .message(found)
            .related_to(format!("{construct} started here"), open.span)
            .emit();
    }

    pub(super) fn error_trailing_comma(&mut self, comma: Token) {
        if !self.should_report(comma.span.start()) {
            return;
        }
        self.diagnostics
            .report(DiagnosticKind::TrailingComma, comma.span, Some(comma))
            .fix("remove the trailing comma", "")
            .emit();
    }

    /// Returns false (after reporting and skipping the rest of the body) when
    /// the configured depth is exceeded.
    pub(super) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.options.recursion_limit
            && self.depth >= limit
        {
            self.error_msg(
                DiagnosticKind::NestingTooDeep,
                format!("more than {limit} levels of objects and arrays"),
            );
            self.abandoned = true;
            self.pos = self.tokens.len();
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    pub(super) fn push_delimiter(&mut self, token: Token) {
        self.delimiter_stack.push(OpenDelimiter {
            kind: token.kind,
            span: token.span,
        });
    }

    pub(super) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }
}
