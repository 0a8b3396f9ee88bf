use rowan::TextRange;

use crate::parser::lexer::Token;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Priority rationale:
/// - Unclosed containers swallow the rest of the body
/// - Missing pieces are root causes the user should fix first
/// - Misplaced tokens are specific mistakes at one location
/// - Lexical errors are local to a single token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascade over everything after them
    UnclosedObject,
    UnclosedArray,
    NestingTooDeep,

    // Something required is missing
    UnexpectedEof,
    ExpectedValue,
    ExpectedPropertyName,
    ExpectedColon,
    ExpectedParameterName,
    ExpectedParameterClose,

    // Something is where it doesn't belong
    MissingComma,
    TrailingComma,
    MismatchedDelimiter,
    TrailingContent,
    UnexpectedToken,

    // Single bad token
    UnterminatedString,
    InvalidEscape,
    MalformedNumber,
    UnterminatedComment,
    MalformedMarker,
    UnrecognizedCharacter,
}

impl DiagnosticKind {
    /// Errors confined to a single token's text.
    pub fn is_lexical_error(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedString
                | Self::InvalidEscape
                | Self::MalformedNumber
                | Self::UnterminatedComment
                | Self::MalformedMarker
                | Self::UnrecognizedCharacter
        )
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedObject => "missing closing `}`",
            Self::UnclosedArray => "missing closing `]`",
            Self::NestingTooDeep => "nesting too deep",

            Self::UnexpectedEof => "unexpected end of input",
            Self::ExpectedValue => "expected a value",
            Self::ExpectedPropertyName => "expected a property name",
            Self::ExpectedColon => "expected `:` after property name",
            Self::ExpectedParameterName => "expected a parameter name after `{{#toJson}}`",
            Self::ExpectedParameterClose => "expected `{{/toJson}}` after parameter name",

            Self::MissingComma => "missing `,`",
            Self::TrailingComma => "trailing comma",
            Self::MismatchedDelimiter => "mismatched closing delimiter",
            Self::TrailingContent => "unexpected content after the query body",
            Self::UnexpectedToken => "unexpected token",

            Self::UnterminatedString => "unterminated string",
            Self::InvalidEscape => "invalid string",
            Self::MalformedNumber => "malformed number",
            Self::UnterminatedComment => "unterminated block comment",
            Self::MalformedMarker => "malformed parameter marker",
            Self::UnrecognizedCharacter => "unrecognized character",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnexpectedToken => "unexpected {}".to_string(),
            Self::NestingTooDeep => "nesting too deep: {}".to_string(),
            Self::InvalidEscape => format!("{}: {{}}", self.fallback_message()),
            kind if kind.is_lexical_error() => format!("{} {{}}", self.fallback_message()),
            _ => format!("{}, found {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

/// One recorded parse error.
///
/// `token` is the offending token; `None` means the error sits at end of input
/// and has no token of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) token: Option<Token>,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        kind: DiagnosticKind,
        range: TextRange,
        token: Option<Token>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            range,
            token,
            message: message.into(),
            fix: None,
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(
        kind: DiagnosticKind,
        range: TextRange,
        token: Option<Token>,
    ) -> Self {
        Self::new(kind, range, token, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn token(&self) -> Option<Token> {
        self.token
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        self.range.start().into()
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
