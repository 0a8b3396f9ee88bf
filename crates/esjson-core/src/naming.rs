//! Naming rules for indices, mapping types and fields.
//!
//! Each `check_*` function walks its rules in priority order and stops at the
//! first violation. The `is_valid_*` wrappers render that violation as the
//! message shown next to a form field, or an empty string when the name is fine.

/// Characters Elasticsearch rejects in index, type and field names.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#'];

/// Names are limited to 255 bytes (not characters).
const MAX_NAME_BYTES: usize = 255;

/// What kind of name is being validated. Only affects message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Index,
    Type,
    Field,
}

impl NameKind {
    fn subject(self) -> &'static str {
        match self {
            NameKind::Index => "Index name",
            NameKind::Type => "Type name",
            NameKind::Field => "Field name",
        }
    }
}

/// A violated naming rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRule {
    Empty,
    Uppercase,
    LeadingSymbol,
    LeadingUnderscore,
    DotOnly,
    ContainsPeriod,
    ForbiddenChar,
    TooLong,
}

impl NameRule {
    /// Human-readable message for this rule, phrased for `kind`.
    pub fn message(self, kind: NameKind) -> String {
        let subject = kind.subject();
        match self {
            NameRule::Empty => format!("{subject} cannot be an empty string."),
            NameRule::Uppercase => format!("{subject} may not contain uppercase letters."),
            NameRule::LeadingSymbol => format!("{subject} may not start with -, _, or +."),
            NameRule::LeadingUnderscore => format!("{subject} may not start with an underscore."),
            NameRule::DotOnly => format!("{subject} may not be . or .."),
            NameRule::ContainsPeriod => format!("{subject} may not contain periods."),
            NameRule::ForbiddenChar => format!(
                "{subject} may not contain any of the following characters: \
                 \\, /, *, ?, \", <, >, |, \" \" (space character), \",\", #"
            ),
            NameRule::TooLong => {
                format!("{subject} may not be longer than {MAX_NAME_BYTES} bytes.")
            }
        }
    }
}

/// Index names: non-empty, lowercase, no leading `-_+`, not `.`/`..`,
/// no forbidden characters, at most 255 bytes. Leading digits are fine.
pub fn check_index_name(name: &str) -> Option<NameRule> {
    if name.is_empty() {
        return Some(NameRule::Empty);
    }
    if name.chars().any(char::is_uppercase) {
        return Some(NameRule::Uppercase);
    }
    if name.starts_with(['-', '_', '+']) {
        return Some(NameRule::LeadingSymbol);
    }
    check_common(name)
}

/// Type names: non-empty, no leading underscore, then the shared rules.
pub fn check_type_name(name: &str) -> Option<NameRule> {
    if name.is_empty() {
        return Some(NameRule::Empty);
    }
    if name.starts_with('_') {
        return Some(NameRule::LeadingUnderscore);
    }
    check_common(name)
}

/// Field names: non-empty, no leading underscore, no periods (they denote
/// object paths), then the shared rules.
pub fn check_field_name(name: &str) -> Option<NameRule> {
    if name.is_empty() {
        return Some(NameRule::Empty);
    }
    if name.starts_with('_') {
        return Some(NameRule::LeadingUnderscore);
    }
    if name.contains('.') {
        return Some(NameRule::ContainsPeriod);
    }
    check_common(name)
}

fn check_common(name: &str) -> Option<NameRule> {
    if name == "." || name == ".." {
        return Some(NameRule::DotOnly);
    }
    if name.contains(FORBIDDEN_CHARS) {
        return Some(NameRule::ForbiddenChar);
    }
    if name.len() > MAX_NAME_BYTES {
        return Some(NameRule::TooLong);
    }
    None
}

fn render(rule: Option<NameRule>, kind: NameKind) -> String {
    rule.map(|r| r.message(kind)).unwrap_or_default()
}

/// Empty string when valid, otherwise the first violated rule's message.
///
/// # Examples
/// ```
/// use esjson_core::naming::is_valid_index_name;
/// assert_eq!(is_valid_index_name("1abc"), "");
/// assert_eq!(is_valid_index_name(""), "Index name cannot be an empty string.");
/// ```
pub fn is_valid_index_name(name: &str) -> String {
    render(check_index_name(name), NameKind::Index)
}

pub fn is_valid_type_name(name: &str) -> String {
    render(check_type_name(name), NameKind::Type)
}

pub fn is_valid_field_name(name: &str) -> String {
    render(check_field_name(name), NameKind::Field)
}
