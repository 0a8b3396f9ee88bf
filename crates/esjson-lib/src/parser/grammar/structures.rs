//! Objects and arrays.
//!
//! Both loops share one shape: an item (or a report-and-skip), then a
//! separator check. Recovery always resynchronizes on `,` or a closer.
//!
//! In fragment mode a container cut off by the end of the buffer keeps every
//! item that completed. The incomplete item is dropped together with
//! everything it allocated, and a nested container left empty by that goes too.

use indexmap::IndexMap;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::lexer::Token;
use crate::parser::syntax_kind::SyntaxKind;
use crate::parser::syntax_kind::token_sets::{VALUE_FIRST, VALUE_RECOVERY};
use crate::value::{PropertyInfo, ValueId, ValueKind};

impl Parser<'_> {
    /// `object := '{' (pair (',' pair)*)? '}'`
    pub(super) fn parse_object(&mut self, parent: Option<ValueId>) -> Option<ValueId> {
        self.assert_current(SyntaxKind::BraceOpen);
        if !self.enter_recursion() {
            return None;
        }

        let open = self.bump();
        self.push_delimiter(open);
        let object = self
            .tree
            .alloc(ValueKind::Object(IndexMap::new()), Some(open), parent);

        let mut trailing_comma: Option<Token> = None;
        loop {
            if self.should_stop() || self.at_truncation() {
                break;
            }
            match self.current() {
                SyntaxKind::BraceClose => {
                    if let Some(comma) = trailing_comma {
                        self.error_trailing_comma(comma);
                    }
                    self.bump();
                    break;
                }
                SyntaxKind::Eof | SyntaxKind::BracketClose => {
                    self.close_mismatched();
                    break;
                }
                SyntaxKind::Str => self.parse_property(object),
                // Leave the comma for the separator check below.
                SyntaxKind::Comma => self.error_found(DiagnosticKind::ExpectedPropertyName),
                kind => {
                    if kind.is_lexical_error() {
                        self.error_bad_value_token();
                    } else {
                        self.error_found(DiagnosticKind::ExpectedPropertyName);
                    }
                    self.skip_until(VALUE_RECOVERY);
                }
            }

            if self.should_stop() {
                break;
            }
            trailing_comma = None;
            match self.current() {
                SyntaxKind::Comma => trailing_comma = Some(self.bump()),
                SyntaxKind::BraceClose | SyntaxKind::BracketClose | SyntaxKind::Eof => {}
                SyntaxKind::Str => self.error_found(DiagnosticKind::MissingComma),
                _ => {
                    self.error_found(DiagnosticKind::MissingComma);
                    self.skip_until(VALUE_RECOVERY);
                }
            }
        }

        self.pop_delimiter();
        self.exit_recursion();
        Some(object)
    }

    /// `pair := string ':' value`
    ///
    /// A pair whose value failed to parse is kept with no value, so the key
    /// stays visible to callers. A pair cut off by the end of a fragment is
    /// not kept at all.
    fn parse_property(&mut self, object: ValueId) {
        self.assert_current(SyntaxKind::Str);
        let mark = self.tree.mark();
        let key_token = self.bump();
        let key = self.string_value(&key_token);
        let name = self.tree.alloc(
            ValueKind::String(key.clone()),
            Some(key_token),
            Some(object),
        );

        if self.at_truncation() {
            self.tree.rollback(mark);
            return;
        }

        if self.eat_token(SyntaxKind::Colon).is_none() {
            self.error_found(DiagnosticKind::ExpectedColon);
            // `{"a" 1}` still yields a usable pair.
            if !self.currently_is_one_of(VALUE_FIRST) {
                self.skip_until(VALUE_RECOVERY);
                self.tree
                    .insert_property(object, key, PropertyInfo { name, value: None });
                return;
            }
        }

        if self.at_truncation() {
            self.tree.rollback(mark);
            return;
        }

        let value = self.parse_value(Some(object));
        if self.truncated {
            match value {
                Some(value) if !self.tree.is_empty_container(value) => {
                    self.tree.insert_property(
                        object,
                        key,
                        PropertyInfo {
                            name,
                            value: Some(value),
                        },
                    );
                }
                _ => self.tree.rollback(mark),
            }
            return;
        }

        if value.is_none() {
            self.skip_until(VALUE_RECOVERY);
        }
        self.tree
            .insert_property(object, key, PropertyInfo { name, value });
    }

    /// `array := '[' (value (',' value)*)? ']'`
    pub(super) fn parse_array(&mut self, parent: Option<ValueId>) -> Option<ValueId> {
        self.assert_current(SyntaxKind::BracketOpen);
        if !self.enter_recursion() {
            return None;
        }

        let open = self.bump();
        self.push_delimiter(open);
        let array = self
            .tree
            .alloc(ValueKind::Array(Vec::new()), Some(open), parent);

        let mut trailing_comma: Option<Token> = None;
        loop {
            if self.should_stop() || self.at_truncation() {
                break;
            }
            match self.current() {
                SyntaxKind::BracketClose => {
                    if let Some(comma) = trailing_comma {
                        self.error_trailing_comma(comma);
                    }
                    self.bump();
                    break;
                }
                SyntaxKind::Eof | SyntaxKind::BraceClose => {
                    self.close_mismatched();
                    break;
                }
                _ => {}
            }

            let mark = self.tree.mark();
            let element = self.parse_value(Some(array));
            if self.truncated {
                match element {
                    Some(element) if !self.tree.is_empty_container(element) => {
                        self.tree.push_element(array, element);
                    }
                    _ => self.tree.rollback(mark),
                }
                break;
            }
            match element {
                Some(element) => self.tree.push_element(array, element),
                None => self.skip_until(VALUE_RECOVERY),
            }

            if self.should_stop() {
                break;
            }
            trailing_comma = None;
            match self.current() {
                SyntaxKind::Comma => trailing_comma = Some(self.bump()),
                SyntaxKind::BracketClose | SyntaxKind::BraceClose | SyntaxKind::Eof => {}
                kind if VALUE_FIRST.contains(kind) => {
                    self.error_found(DiagnosticKind::MissingComma)
                }
                _ => {
                    self.error_found(DiagnosticKind::MissingComma);
                    self.skip_until(VALUE_RECOVERY);
                }
            }
        }

        self.pop_delimiter();
        self.exit_recursion();
        Some(array)
    }

    /// The innermost open container ends at EOF or at the wrong closer.
    fn close_mismatched(&mut self) {
        if let Some(open) = self.delimiter_stack.last().copied() {
            self.error_unclosed(open);
        }
    }
}
