//! esjson: fault-tolerant parser for Elasticsearch query bodies.
//!
//! Bodies are JSON extended with parameter placeholders
//! (`{{#toJson}}NAME{{/toJson}}`). The parser never fails: it builds a value
//! tree from whatever it can and records every problem as a diagnostic.
//! Cut-off buffers parse silently in fragment mode.
//!
//! # Example
//!
//! ```
//! use esjson::{generate_root, parse};
//!
//! let source = r#"{"query": {"match": {"title": {{#toJson}}title{{/toJson}}}}}"#;
//!
//! let parse = parse(source, true);
//! assert!(!parse.has_error(), "{}", parse.diagnostics().render(source));
//!
//! let template = generate_root(parse.tree()).unwrap();
//! assert_eq!(
//!     template,
//!     r#"{ "query":{ "match":{ "title":{{#toJson}}title{{/toJson}} } } }"#
//! );
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;
pub mod query;
pub mod template;
pub mod value;

#[cfg(test)]
mod template_tests;

pub use diagnostics::{DiagnosticKind, DiagnosticMessage, Diagnostics, DiagnosticsPrinter};
pub use parser::{Parse, ParseOptions, parse};
pub use query::{ErrorItem, QueryErrors, get_parsed_query};
pub use template::{TemplateError, generate, generate_root};
pub use value::{
    JsonType, Number, Parameter, PropertyInfo, ValueId, ValueInfo, ValueKind, ValueTree,
};

pub use esjson_core::{
    LineIndex, Position, is_valid_field_name, is_valid_index_name, is_valid_type_name,
};
