//! Token kinds for query bodies.
//!
//! Logos derives token recognition. Lexical error kinds are ordinary variants so the
//! token stream stays total; the parser decides whether each one is an error or an
//! incomplete tail of a streaming buffer.

use logos::Logos;

/// All token kinds, plus the `Eof` sentinel the parser reports past the last token.
/// `#[repr(u16)]` keeps discriminants small enough for [`TokenSet`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("{")]
    BraceOpen = 0,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    /// `{{#toJson}}`, opens a parameter placeholder.
    #[token("{{#toJson}}")]
    ParamOpen,

    /// `{{/toJson}}`, closes a parameter placeholder.
    #[token("{{/toJson}}")]
    ParamClose,

    /// A cut-off marker such as `{{#toJ`. Never valid JSON, since `{{` cannot start an object key.
    #[regex(r"\{\{[#/]?(?:t(?:o(?:J(?:s(?:o(?:n\}?)?)?)?)?)?)?")]
    PartialMarker,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    Str,

    /// Opening quote with no closing quote before end of input.
    #[regex(r#""(?:[^"\\]|\\.)*\\?"#, allow_greedy = true)]
    UnterminatedStr,

    /// String whose escapes or control characters fail validation. Set by the lexer, not logos.
    InvalidStr,

    /// Permissive numeric shape; the lexer re-checks it against the JSON grammar.
    #[regex(r"-?[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]*)?")]
    #[token("-")]
    Number,

    /// Number-shaped text that is not a JSON number (`01`, `1.`, `-`). Set by the lexer.
    MalformedNumber,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    /// Bare word. Valid only as a parameter name. Keywords take precedence.
    #[regex(r"[a-zA-Z_$@][a-zA-Z0-9_$@.\-]*")]
    Ident,

    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"/\*(?:[^*]|\*+[^*/])*\**", allow_greedy = true)]
    UnterminatedComment,

    /// Coalesced unrecognized characters
    Garbage,

    /// Past the last token.
    Eof,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Skipped by the value grammar. `UnterminatedComment` is trivia too; the
    /// parser reports it while skipping.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Whitespace | Newline | LineComment | BlockComment | UnterminatedComment
        )
    }

    #[inline]
    pub fn is_lexical_error(self) -> bool {
        matches!(
            self,
            UnterminatedStr
                | InvalidStr
                | MalformedNumber
                | UnterminatedComment
                | PartialMarker
                | Garbage
        )
    }

    /// Short name used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            BraceOpen => "`{`",
            BraceClose => "`}`",
            BracketOpen => "`[`",
            BracketClose => "`]`",
            Colon => "`:`",
            Comma => "`,`",
            ParamOpen => "`{{#toJson}}`",
            ParamClose => "`{{/toJson}}`",
            PartialMarker => "incomplete parameter marker",
            Str | InvalidStr | UnterminatedStr => "string",
            Number | MalformedNumber => "number",
            True => "`true`",
            False => "`false`",
            Null => "`null`",
            Ident => "identifier",
            Whitespace | Newline => "whitespace",
            LineComment | BlockComment | UnterminatedComment => "comment",
            Garbage => "unrecognized input",
            Eof => "end of input",
        }
    }
}

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const ALL: &[SyntaxKind] = &[
            BraceOpen,
            BraceClose,
            BracketOpen,
            BracketClose,
            Colon,
            Comma,
            ParamOpen,
            ParamClose,
            PartialMarker,
            Str,
            UnterminatedStr,
            InvalidStr,
            Number,
            MalformedNumber,
            True,
            False,
            Null,
            Ident,
            Whitespace,
            Newline,
            LineComment,
            BlockComment,
            UnterminatedComment,
            Garbage,
            Eof,
        ];
        f.debug_set()
            .entries(ALL.iter().filter(|k| self.contains(**k)))
            .finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of a value.
    pub const VALUE_FIRST: TokenSet = TokenSet::new(&[
        BraceOpen,
        BracketOpen,
        Str,
        Number,
        True,
        False,
        Null,
        ParamOpen,
    ]);

    /// Synchronization points after a broken value or pair.
    pub const VALUE_RECOVERY: TokenSet = TokenSet::new(&[Comma, BraceClose, BracketClose]);

    /// Recovery inside a broken parameter placeholder.
    pub const PARAM_RECOVERY: TokenSet = VALUE_RECOVERY.union(TokenSet::new(&[ParamClose]));
}
