//! Lexer for query bodies.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! Lexing never fails. Malformed input becomes error-kind tokens:
//! - consecutive unrecognized characters coalesce into a single `Garbage` token
//! - string tokens with bad escapes are re-tagged `InvalidStr`
//! - number-shaped tokens outside the JSON number grammar are re-tagged `MalformedNumber`

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::syntax_kind::SyntaxKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.span.start().into()
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }

                let span = lexer.span();
                let kind = refine(kind, &source[span.clone()]);
                tokens.push(Token::new(kind, range_to_text_range(span)));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Second-pass checks the regexes are too loose to express.
fn refine(kind: SyntaxKind, text: &str) -> SyntaxKind {
    match kind {
        SyntaxKind::Str if unescape(&text[1..text.len() - 1]).is_err() => SyntaxKind::InvalidStr,
        SyntaxKind::Number if number_shape(text) != NumberShape::Complete => {
            SyntaxKind::MalformedNumber
        }
        _ => kind,
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Why a string literal failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeError {
    /// `\` followed by a character outside the JSON escape set.
    UnknownEscape(char),
    /// `\u` not followed by four hex digits.
    BadUnicode,
    /// Raw character below U+0020.
    ControlCharacter(char),
}

impl std::fmt::Display for EscapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscapeError::UnknownEscape(c) => write!(f, "invalid escape sequence `\\{}`", c),
            EscapeError::BadUnicode => write!(f, "`\\u` must be followed by four hex digits"),
            EscapeError::ControlCharacter(c) => {
                write!(f, "control character U+{:04X} must be escaped", *c as u32)
            }
        }
    }
}

/// Decodes the content between a string token's quotes.
///
/// Handles the JSON escape set, including UTF-16 surrogate pairs.
/// Unpaired surrogates decode to U+FFFD rather than failing.
pub fn unescape(content: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {}
            c if (c as u32) < 0x20 => return Err(EscapeError::ControlCharacter(c)),
            c => {
                out.push(c);
                continue;
            }
        }

        // A trailing lone backslash cannot occur: the lexer would have swallowed the quote.
        let Some(escaped) = chars.next() else {
            return Err(EscapeError::UnknownEscape('"'));
        };
        match escaped {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let high = read_hex4(&mut chars)?;
                if (0xD800..0xDC00).contains(&high) {
                    // Only consume the next escape if it really is a low surrogate.
                    let mut lookahead = chars.clone();
                    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
                        let low = read_hex4(&mut lookahead)?;
                        if (0xDC00..0xE000).contains(&low) {
                            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                            chars = lookahead;
                            continue;
                        }
                    }
                    out.push(char::REPLACEMENT_CHARACTER);
                } else {
                    out.push(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            other => return Err(EscapeError::UnknownEscape(other)),
        }
    }

    Ok(out)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, EscapeError> {
    let mut value = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(EscapeError::BadUnicode)?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// How a number-shaped text relates to the JSON number grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberShape {
    Complete,
    /// Not a number yet, but more input could make it one (`-`, `1.`, `2e+`).
    Prefix,
    Invalid,
}

/// Runs the JSON number grammar as a state machine:
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
pub fn number_shape(text: &str) -> NumberShape {
    #[derive(Clone, Copy)]
    enum State {
        Start,
        Minus,
        Zero,
        Int,
        Dot,
        Frac,
        Exp,
        ExpSign,
        ExpDigits,
    }

    let mut state = State::Start;
    for c in text.chars() {
        state = match (state, c) {
            (State::Start, '-') => State::Minus,
            (State::Start | State::Minus, '0') => State::Zero,
            (State::Start | State::Minus, '1'..='9') => State::Int,
            (State::Int, '0'..='9') => State::Int,
            (State::Zero | State::Int, '.') => State::Dot,
            (State::Dot | State::Frac, '0'..='9') => State::Frac,
            (State::Zero | State::Int | State::Frac, 'e' | 'E') => State::Exp,
            (State::Exp, '+' | '-') => State::ExpSign,
            (State::Exp | State::ExpSign | State::ExpDigits, '0'..='9') => State::ExpDigits,
            _ => return NumberShape::Invalid,
        };
    }

    match state {
        State::Zero | State::Int | State::Frac | State::ExpDigits => NumberShape::Complete,
        State::Start => NumberShape::Invalid,
        State::Minus | State::Dot | State::Exp | State::ExpSign => NumberShape::Prefix,
    }
}

/// Whether a bare word could still grow into `true`, `false` or `null`.
pub fn is_keyword_prefix(text: &str) -> bool {
    !text.is_empty() && ["true", "false", "null"].iter().any(|kw| kw.starts_with(text))
}
