#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared building blocks for esjson.
//!
//! - [`naming`]: Elasticsearch index/type/field naming rules, checked in a fixed order
//! - [`LineIndex`]: maps byte offsets in a query body to row/column/character positions

pub mod naming;
mod position;

#[cfg(test)]
mod position_tests;

pub use naming::{
    NameKind, NameRule, check_field_name, check_index_name, check_type_name, is_valid_field_name,
    is_valid_index_name, is_valid_type_name,
};
pub use position::{LineIndex, Position};
