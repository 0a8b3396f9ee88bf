//! Query validation in the shape the search API reports errors.

use serde::{Deserialize, Serialize};

use esjson_core::LineIndex;

use crate::parser::{Parse, parse};

/// One reported problem, as the API's error list carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub status: i32,
    /// `"{row}:{col}:{char_offset} {message}"`
    pub title: String,
    pub detail: String,
    pub source: serde_json::Map<String, serde_json::Value>,
}

impl ErrorItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            status: -1,
            title: title.into(),
            detail: String::new(),
            source: serde_json::Map::new(),
        }
    }
}

/// All problems found in a body. Serializes as a bare list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("query body has {} error(s)", .0.len())]
pub struct QueryErrors(pub Vec<ErrorItem>);

impl QueryErrors {
    pub fn items(&self) -> &[ErrorItem] {
        &self.0
    }
}

/// Parses a complete body (as an implicit group) and fails on any error.
pub fn get_parsed_query(body: &str) -> Result<Parse, QueryErrors> {
    let parse = parse(body, true);
    if !parse.has_error() {
        return Ok(parse);
    }

    let index = LineIndex::new(body);
    let mut items: Vec<ErrorItem> = parse
        .errors()
        .iter()
        .map(|diag| {
            let position = match diag.token() {
                Some(token) => index.position(token.start()),
                None => index.end(),
            };
            ErrorItem::new(format!("{position} {}", diag.message()))
        })
        .collect();

    if items.is_empty() {
        items.push(ErrorItem::new("0:0:0 Syntax Error"));
    }

    tracing::debug!(errors = items.len(), "query body rejected");
    Err(QueryErrors(items))
}
