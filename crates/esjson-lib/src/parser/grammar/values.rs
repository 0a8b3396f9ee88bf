use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::lexer::{Token, unescape};
use crate::parser::syntax_kind::SyntaxKind;
use crate::parser::syntax_kind::token_sets::PARAM_RECOVERY;
use crate::value::{Number, Parameter, ValueId, ValueKind};

impl Parser<'_> {
    /// `value := object | array | string | number | true | false | null | parameter`
    ///
    /// Returns `None` when no value could be built. Either a diagnostic was
    /// recorded, or (fragment mode) the buffer ended before the value did.
    /// Callers tell these apart by checking `self.truncated`.
    pub(crate) fn parse_value(&mut self, parent: Option<ValueId>) -> Option<ValueId> {
        if self.at_truncation() {
            return None;
        }

        match self.current() {
            SyntaxKind::BraceOpen => self.parse_object(parent),
            SyntaxKind::BracketOpen => self.parse_array(parent),
            SyntaxKind::ParamOpen => self.parse_parameter(parent),
            SyntaxKind::Str => {
                let token = self.bump();
                let value = self.string_value(&token);
                Some(self.tree.alloc(ValueKind::String(value), Some(token), parent))
            }
            SyntaxKind::Number => {
                let number = Number::from_literal(self.current_text());
                let token = self.bump();
                Some(self.tree.alloc(ValueKind::Number(number), Some(token), parent))
            }
            SyntaxKind::True | SyntaxKind::False => {
                let token = self.bump();
                let value = token.kind == SyntaxKind::True;
                Some(self.tree.alloc(ValueKind::Bool(value), Some(token), parent))
            }
            SyntaxKind::Null => {
                let token = self.bump();
                Some(self.tree.alloc(ValueKind::Null, Some(token), parent))
            }
            SyntaxKind::Eof => {
                self.error(DiagnosticKind::UnexpectedEof);
                None
            }
            // Sync points belong to the enclosing production.
            SyntaxKind::Comma | SyntaxKind::BraceClose | SyntaxKind::BracketClose => {
                self.error_found(DiagnosticKind::ExpectedValue);
                None
            }
            _ => {
                self.error_bad_value_token();
                None
            }
        }
    }

    /// Decoded content of a `Str` token. The lexer has already validated its escapes.
    pub(super) fn string_value(&self, token: &Token) -> String {
        let raw = self.text(token);
        unescape(&raw[1..raw.len() - 1]).unwrap_or_default()
    }

    /// Reports and consumes a single token that cannot start a value.
    pub(super) fn error_bad_value_token(&mut self) {
        let kind = self.current();
        let text = self.current_text();
        match kind {
            SyntaxKind::UnterminatedStr => {
                self.error_and_bump(DiagnosticKind::UnterminatedString, None)
            }
            SyntaxKind::InvalidStr => {
                let detail = unescape(&text[1..text.len() - 1])
                    .err()
                    .map(|e| e.to_string());
                self.error_and_bump(DiagnosticKind::InvalidEscape, detail);
            }
            SyntaxKind::MalformedNumber => {
                self.error_and_bump(DiagnosticKind::MalformedNumber, Some(format!("`{text}`")))
            }
            SyntaxKind::PartialMarker => {
                self.error_and_bump(DiagnosticKind::MalformedMarker, Some(format!("`{text}`")))
            }
            SyntaxKind::Garbage => self.error_and_bump(
                DiagnosticKind::UnrecognizedCharacter,
                Some(format!("`{text}`")),
            ),
            SyntaxKind::Ident => self.error_and_bump(
                DiagnosticKind::UnexpectedToken,
                Some(format!("identifier `{text}`; strings must be quoted")),
            ),
            _ => {
                let found = self.describe_current();
                self.error_and_bump(DiagnosticKind::ExpectedValue, Some(found));
            }
        }
    }

    /// `parameter := '{{#toJson}}' Ident '{{/toJson}}'`
    fn parse_parameter(&mut self, parent: Option<ValueId>) -> Option<ValueId> {
        self.assert_current(SyntaxKind::ParamOpen);
        let open = self.bump();

        if self.at_truncation() {
            return None;
        }
        let Some(name) = self.eat_token(SyntaxKind::Ident) else {
            self.error_found(DiagnosticKind::ExpectedParameterName);
            self.skip_until(PARAM_RECOVERY);
            self.eat_token(SyntaxKind::ParamClose);
            return None;
        };
        let name = self.text(&name).to_string();

        if self.at_truncation_in_marker() {
            return None;
        }
        if self.eat_token(SyntaxKind::ParamClose).is_none() {
            self.error_found(DiagnosticKind::ExpectedParameterClose);
            return None;
        }

        Some(self.tree.alloc(
            ValueKind::Parameter(Parameter::new(name)),
            Some(open),
            parent,
        ))
    }
}
