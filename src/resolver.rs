//! Local `$ref` dereferencing into an arena graph.
//!
//! Every JSON-pointer location of the document is materialised at most once.
//! A reference edge points at the target's node, so two uses of the same
//! component share one node and a schema that refers to itself produces a
//! real cycle. Node identity is the node's index in the arena.

use crate::constants;
use crate::path::{LogicalPath, PathSegment};
use crate::spec::reference::{escape_segment, lookup, parse_ref, ref_of};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

pub type NodeId = usize;

/// A link from a container to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Node(NodeId),
    /// The child closed a cycle and was cut.
    Circular,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedNode {
    Object(IndexMap<String, Edge>),
    Array(Vec<Edge>),
    Scalar(Value),
}

impl ResolvedNode {
    /// Children in document order, keyed the way a path would address them.
    #[must_use]
    pub fn children(&self) -> Vec<(PathSegment, Edge)> {
        match self {
            Self::Object(map) => map
                .iter()
                .map(|(key, edge)| (PathSegment::Key(key.clone()), *edge))
                .collect(),
            Self::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, edge)| (PathSegment::Index(index), *edge))
                .collect(),
            Self::Scalar(_) => Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    fn edge_mut(&mut self, segment: &PathSegment) -> Option<&mut Edge> {
        match self {
            Self::Object(map) => map.get_mut(segment.as_key().as_ref()),
            Self::Array(items) => segment.as_index().and_then(|index| items.get_mut(index)),
            Self::Scalar(_) => None,
        }
    }

    fn edge(&self, segment: &PathSegment) -> Option<Edge> {
        match self {
            Self::Object(map) => map.get(segment.as_key().as_ref()).copied(),
            Self::Array(items) => segment.as_index().and_then(|index| items.get(index)).copied(),
            Self::Scalar(_) => None,
        }
    }
}

/// A dereferenced document. May contain cycles until corrected.
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    nodes: Vec<ResolvedNode>,
    root: NodeId,
    references: IndexMap<String, String>,
}

impl ResolvedDocument {
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// # Panics
    ///
    /// If `id` was not produced by this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ResolvedNode {
        &self.nodes[id]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reference sites and their targets, both as JSON pointers (`#/a/b`).
    #[must_use]
    pub const fn references(&self) -> &IndexMap<String, String> {
        &self.references
    }

    /// Follows `path` from the root. `None` if a segment is missing; a cut
    /// edge anywhere but the last step also ends the walk.
    #[must_use]
    pub fn edge_at(&self, path: &LogicalPath) -> Option<Edge> {
        let mut edge = Edge::Node(self.root);
        for segment in path {
            let Edge::Node(id) = edge else {
                return None;
            };
            edge = self.nodes[id].edge(segment)?;
        }
        Some(edge)
    }

    /// Replaces the edge from `parent` to the child at `segment` with a cut.
    /// Returns false if there is no such child.
    pub fn cut(&mut self, parent: NodeId, segment: &PathSegment) -> bool {
        self.nodes
            .get_mut(parent)
            .and_then(|node| node.edge_mut(segment))
            .map(|edge| *edge = Edge::Circular)
            .is_some()
    }

    /// Serialises the graph. Cut edges become the `"[Circular]"` sentinel.
    /// Any cycle still present is written as the sentinel as well, so this
    /// never recurses forever.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut on_path = HashSet::new();
        self.value_of(Edge::Node(self.root), &mut on_path)
    }

    fn value_of(&self, edge: Edge, on_path: &mut HashSet<NodeId>) -> Value {
        let Edge::Node(id) = edge else {
            return Value::String(constants::CIRCULAR_SENTINEL.to_string());
        };
        if !on_path.insert(id) {
            return Value::String(constants::CIRCULAR_SENTINEL.to_string());
        }
        let value = match &self.nodes[id] {
            ResolvedNode::Object(map) => {
                let mut object = Map::with_capacity(map.len());
                for (key, child) in map {
                    object.insert(key.clone(), self.value_of(*child, on_path));
                }
                Value::Object(object)
            }
            ResolvedNode::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|child| self.value_of(*child, on_path))
                    .collect(),
            ),
            ResolvedNode::Scalar(value) => value.clone(),
        };
        on_path.remove(&id);
        value
    }
}

/// Dereferences every local `$ref` in `document`.
///
/// Non-local references, dangling references and chains of references that
/// only point at each other are kept as literal `{"$ref": ...}` objects.
/// Keys next to a resolved `$ref` are dropped.
#[must_use]
pub fn resolve(document: &Value) -> ResolvedDocument {
    let mut builder = Builder {
        document,
        nodes: Vec::new(),
        by_pointer: HashMap::new(),
        following: HashSet::new(),
        references: IndexMap::new(),
    };
    let root = builder.build_at("#".to_string(), document);
    debug!(
        target: "oaslint::resolver",
        nodes = builder.nodes.len(),
        references = builder.references.len(),
        "resolved document"
    );
    ResolvedDocument {
        nodes: builder.nodes,
        root,
        references: builder.references,
    }
}

fn pointer_of(path: &LogicalPath) -> String {
    path.iter().fold("#".to_string(), |mut pointer, segment| {
        pointer.push('/');
        pointer.push_str(&escape_segment(&segment.as_key()));
        pointer
    })
}

struct Builder<'a> {
    document: &'a Value,
    nodes: Vec<ResolvedNode>,
    by_pointer: HashMap<String, NodeId>,
    /// Reference sites currently being followed.
    following: HashSet<String>,
    references: IndexMap<String, String>,
}

impl<'a> Builder<'a> {
    fn build_at(&mut self, pointer: String, value: &'a Value) -> NodeId {
        if let Some(&id) = self.by_pointer.get(&pointer) {
            return id;
        }

        if let Some(reference) = ref_of(value) {
            if let Some(id) = self.follow(&pointer, reference) {
                self.by_pointer.insert(pointer, id);
                return id;
            }
        }

        let id = self.nodes.len();
        self.nodes.push(ResolvedNode::Scalar(Value::Null));
        self.by_pointer.insert(pointer.clone(), id);

        let node = match value {
            Value::Object(map) => ResolvedNode::Object(
                map.iter()
                    .map(|(key, child)| {
                        let child_pointer = format!("{pointer}/{}", escape_segment(key));
                        (key.clone(), Edge::Node(self.build_at(child_pointer, child)))
                    })
                    .collect(),
            ),
            Value::Array(items) => ResolvedNode::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, child)| Edge::Node(self.build_at(format!("{pointer}/{index}"), child)))
                    .collect(),
            ),
            scalar => ResolvedNode::Scalar(scalar.clone()),
        };
        self.nodes[id] = node;
        id
    }

    fn follow(&mut self, site: &str, reference: &str) -> Option<NodeId> {
        if !reference.starts_with('#') {
            trace!(target: "oaslint::resolver", site, reference, "leaving non-local reference");
            return None;
        }
        let target_path = parse_ref(reference);
        let Some(target) = lookup(self.document, &target_path) else {
            debug!(target: "oaslint::resolver", site, reference, "dangling reference");
            return None;
        };
        if !self.following.insert(site.to_string()) {
            return None;
        }

        let target_pointer = pointer_of(&target_path);
        let id = self.build_at(target_pointer.clone(), target);
        self.following.remove(site);
        self.references.insert(site.to_string(), target_pointer);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shared_reference_shares_identity() {
        let doc = json!({
            "a": {"$ref": "#/definitions/Pet"},
            "b": {"$ref": "#/definitions/Pet"},
            "definitions": {"Pet": {"type": "object"}}
        });
        let resolved = resolve(&doc);
        let a = resolved.edge_at(&LogicalPath::from(["a"]));
        let b = resolved.edge_at(&LogicalPath::from(["b"]));
        let pet = resolved.edge_at(&LogicalPath::from(["definitions", "Pet"]));
        assert_eq!(a, pet);
        assert_eq!(b, pet);
        assert_eq!(resolved.references().get("#/a").map(String::as_str), Some("#/definitions/Pet"));
    }

    #[test]
    fn test_self_reference_forms_cycle() {
        let doc = json!({
            "definitions": {
                "Node": {"properties": {"next": {"$ref": "#/definitions/Node"}}}
            }
        });
        let resolved = resolve(&doc);
        let node = resolved.edge_at(&LogicalPath::from(["definitions", "Node"]));
        let next = resolved.edge_at(&LogicalPath::from(["definitions", "Node", "properties", "next"]));
        assert_eq!(node, next);
    }

    #[test]
    fn test_to_value_writes_sentinel_for_cycles() {
        let doc = json!({"key": {"foo": {"bar": {"$ref": "#"}}}});
        let value = resolve(&doc).to_value();
        assert_eq!(value, json!({"key": {"foo": {"bar": "[Circular]"}}}));
    }

    #[test]
    fn test_unresolvable_references_stay_literal() {
        let doc = json!({
            "external": {"$ref": "other.yaml#/Pet"},
            "dangling": {"$ref": "#/definitions/Missing"},
            "loopA": {"$ref": "#/loopB"},
            "loopB": {"$ref": "#/loopA"}
        });
        let value = resolve(&doc).to_value();
        assert_eq!(value["external"], json!({"$ref": "other.yaml#/Pet"}));
        assert_eq!(value["dangling"], json!({"$ref": "#/definitions/Missing"}));
        // Both sites collapse onto the first literal reached.
        assert_eq!(value["loopA"], json!({"$ref": "#/loopB"}));
        assert_eq!(value["loopB"], json!({"$ref": "#/loopB"}));
    }

    #[test]
    fn test_reference_into_array() {
        let doc = json!({
            "params": [{"name": "limit"}],
            "use": {"$ref": "#/params/0"}
        });
        let value = resolve(&doc).to_value();
        assert_eq!(value["use"], json!({"name": "limit"}));
    }

    #[test]
    fn test_escaped_pointer_target() {
        let doc = json!({
            "paths": {"/pets": {"get": {"description": "list"}}},
            "alias": {"$ref": "#/paths/~1pets/get"}
        });
        let value = resolve(&doc).to_value();
        assert_eq!(value["alias"], json!({"description": "list"}));
    }

    #[test]
    fn test_cut_edge() {
        let doc = json!({"a": {"b": 1}});
        let mut resolved = resolve(&doc);
        let Some(Edge::Node(a)) = resolved.edge_at(&LogicalPath::from(["a"])) else {
            panic!("expected node");
        };
        assert!(resolved.cut(a, &PathSegment::Key("b".to_string())));
        assert!(!resolved.cut(a, &PathSegment::Key("missing".to_string())));
        assert_eq!(resolved.to_value(), json!({"a": {"b": "[Circular]"}}));
    }
}
