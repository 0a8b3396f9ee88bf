//! Renders a parsed body back into a template string.
//!
//! Output is compact JSON, except that every object is padded with one space
//! inside its braces and parameters come out as `{{#toJson}}NAME{{/toJson}}`
//! markers for the template engine to fill in. Parsing the output again
//! yields a structurally equal tree.

use crate::value::{ValueId, ValueKind, ValueTree};

/// Opening marker of a parameter placeholder.
pub const PARAM_OPEN: &str = "{{#toJson}}";
/// Closing marker of a parameter placeholder.
pub const PARAM_CLOSE: &str = "{{/toJson}}";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("property `{property}` has no value")]
    MissingPropertyValue { property: String },

    #[error("nothing to render: the body has no value")]
    EmptyTree,

    #[error("failed to serialize scalar: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Renders the subtree rooted at `id`.
pub fn generate(tree: &ValueTree, id: ValueId) -> Result<String, TemplateError> {
    let out = match tree.get(id).kind() {
        ValueKind::Null => "null".to_string(),
        ValueKind::Bool(b) => b.to_string(),
        ValueKind::Number(n) => n.to_string(),
        ValueKind::String(s) => serde_json::to_string(s)?,
        ValueKind::Parameter(param) => format!("{PARAM_OPEN}{}{PARAM_CLOSE}", param.name),
        ValueKind::Array(items) => {
            let items = items
                .iter()
                .map(|&item| generate(tree, item))
                .collect::<Result<Vec<_>, _>>()?;
            format!("[{}]", items.join(","))
        }
        ValueKind::Object(props) => {
            let mut pairs = Vec::with_capacity(props.len());
            for (key, prop) in props {
                let Some(value) = prop.value() else {
                    return Err(TemplateError::MissingPropertyValue {
                        property: key.clone(),
                    });
                };
                pairs.push(format!(
                    "{}:{}",
                    serde_json::to_string(key)?,
                    generate(tree, value)?
                ));
            }
            format!("{{ {} }}", pairs.join(","))
        }
    };
    Ok(out)
}

/// Renders the whole tree.
pub fn generate_root(tree: &ValueTree) -> Result<String, TemplateError> {
    let root = tree.root().ok_or(TemplateError::EmptyTree)?;
    let out = generate(tree, root)?;
    tracing::debug!(len = out.len(), "generated template");
    Ok(out)
}
