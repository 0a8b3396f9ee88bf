//! Arena storage and traversal.

use serde_json::{Map, Value};

use super::{Number, PropertyInfo, ValueId, ValueInfo, ValueKind};
use crate::parser::lexer::Token;

/// Arena of parsed values. Immutable once the parser hands it out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTree {
    nodes: Vec<ValueInfo>,
    root: Option<ValueId>,
}

impl ValueTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<ValueId> {
        self.root
    }

    /// # Panics
    /// Panics if `id` was not created by this tree.
    #[inline]
    pub fn get(&self, id: ValueId) -> &ValueInfo {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: ValueId) -> Option<ValueId> {
        self.get(id).parent
    }

    /// Walks `parent` links up to the root, starting with the parent of `id`.
    pub fn ancestors(&self, id: ValueId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Array elements, or the values of an object's properties in order.
    /// Properties without a value are skipped.
    pub fn children(&self, id: ValueId) -> Vec<ValueId> {
        match &self.get(id).kind {
            ValueKind::Array(items) => items.clone(),
            ValueKind::Object(props) => props.values().filter_map(|p| p.value).collect(),
            _ => Vec::new(),
        }
    }

    /// Looks up a property value by key.
    pub fn property(&self, object: ValueId, key: &str) -> Option<ValueId> {
        self.get(object).object_children()?.get(key)?.value
    }

    /// Plain JSON view of a subtree, mainly for comparisons.
    ///
    /// Parameters become `{"$param": NAME}` and out-of-range numbers become
    /// `null`. Returns `None` if any property in the subtree is missing its value.
    pub fn to_json(&self, id: ValueId) -> Option<Value> {
        let json = match &self.get(id).kind {
            ValueKind::Null => Value::Null,
            ValueKind::Bool(b) => Value::Bool(*b),
            ValueKind::Number(Number::Finite(n)) => Value::Number(n.clone()),
            ValueKind::Number(Number::OutOfRange(_)) => Value::Null,
            ValueKind::String(s) => Value::String(s.clone()),
            ValueKind::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|&item| self.to_json(item))
                    .collect::<Option<_>>()?,
            ),
            ValueKind::Object(props) => {
                let mut map = Map::new();
                for (key, prop) in props {
                    map.insert(key.clone(), self.to_json(prop.value?)?);
                }
                Value::Object(map)
            }
            ValueKind::Parameter(param) => {
                let mut map = Map::new();
                map.insert("$param".to_string(), Value::String(param.name.clone()));
                Value::Object(map)
            }
        };
        Some(json)
    }

    pub fn root_json(&self) -> Option<Value> {
        self.to_json(self.root?)
    }

    /// Same values in the same order, ignoring ids and source positions.
    /// Unlike JSON equality, object key order matters.
    pub fn structurally_eq(&self, id: ValueId, other: &ValueTree, other_id: ValueId) -> bool {
        match (&self.get(id).kind, &other.get(other_id).kind) {
            (ValueKind::Array(a), ValueKind::Array(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(&x, &y)| self.structurally_eq(x, other, y))
            }
            (ValueKind::Object(a), ValueKind::Object(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|((ka, pa), (kb, pb))| {
                        ka == kb
                            && match (pa.value, pb.value) {
                                (Some(x), Some(y)) => self.structurally_eq(x, other, y),
                                (None, None) => true,
                                _ => false,
                            }
                    })
            }
            (a, b) => a == b,
        }
    }

    pub(crate) fn alloc(
        &mut self,
        kind: ValueKind,
        token: Option<Token>,
        parent: Option<ValueId>,
    ) -> ValueId {
        let id = ValueId(self.nodes.len() as u32);
        self.nodes.push(ValueInfo {
            kind,
            token,
            parent,
        });
        id
    }

    /// Id the next `alloc` will return. Pass to [`ValueTree::rollback`] to discard
    /// everything allocated after this point.
    pub(crate) fn mark(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn rollback(&mut self, mark: usize) {
        self.nodes.truncate(mark);
    }

    pub(crate) fn set_root(&mut self, root: Option<ValueId>) {
        self.root = root;
    }

    pub(crate) fn push_element(&mut self, array: ValueId, element: ValueId) {
        match &mut self.nodes[array.index()].kind {
            ValueKind::Array(items) => items.push(element),
            other => panic!("push_element: {:?} is not an array", other.json_type()),
        }
    }

    pub(crate) fn insert_property(&mut self, object: ValueId, key: String, prop: PropertyInfo) {
        match &mut self.nodes[object.index()].kind {
            ValueKind::Object(props) => {
                props.insert(key, prop);
            }
            other => panic!("insert_property: {:?} is not an object", other.json_type()),
        }
    }

    pub(crate) fn is_empty_container(&self, id: ValueId) -> bool {
        match &self.get(id).kind {
            ValueKind::Array(items) => items.is_empty(),
            ValueKind::Object(props) => props.is_empty(),
            _ => false,
        }
    }
}

pub struct Ancestors<'t> {
    tree: &'t ValueTree,
    next: Option<ValueId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ValueId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
