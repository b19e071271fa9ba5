//! Flat node storage for the loaded reflection tree.
//!
//! Nodes are appended once by the loader and never mutated afterwards.
//! Parent links are non-owning indices; children, signatures and
//! parameters are owned through index lists.

use rustc_hash::FxHashMap;
use std::ops::Index;

use crate::comment::Comment;
use crate::kind::{ModifierFlags, ReflectionKind};
use crate::types::TypeExpr;

/// Index of a node in a [`ReflectionArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// TypeDoc's numeric reflection id, the target of `reference` types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReflectionId(pub i64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub file_name: String,
    pub line: u32,
}

/// A declaration, signature, parameter or type parameter.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: Option<ReflectionId>,
    pub kind: ReflectionKind,
    pub name: String,
    pub original_name: Option<String>,
    pub flags: ModifierFlags,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub signatures: Vec<NodeId>,
    pub get_signature: Option<NodeId>,
    pub set_signature: Option<NodeId>,
    pub index_signature: Option<NodeId>,
    pub parameters: Vec<NodeId>,
    pub type_parameters: Vec<NodeId>,
    pub sources: Vec<Source>,
    pub comment: Option<Comment>,
    /// Declared type; the return type for signatures and the constraint for
    /// type parameters.
    pub ty: Option<TypeExpr>,
    pub default_value: Option<String>,
    pub extended_types: Vec<TypeExpr>,
    pub implemented_types: Vec<TypeExpr>,
    pub inherited_from: Option<TypeExpr>,
}

impl Node {
    pub fn new(kind: ReflectionKind, name: impl Into<String>) -> Self {
        Node {
            id: None,
            kind,
            name: name.into(),
            original_name: None,
            flags: ModifierFlags::empty(),
            parent: None,
            children: Vec::new(),
            signatures: Vec::new(),
            get_signature: None,
            set_signature: None,
            index_signature: None,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            sources: Vec::new(),
            comment: None,
            ty: None,
            default_value: None,
            extended_types: Vec::new(),
            implemented_types: Vec::new(),
            inherited_from: None,
        }
    }

    /// The first (authoritative) source location.
    pub fn source(&self) -> Option<&Source> {
        self.sources.first()
    }

    /// True when the node is only present because a supertype declares it.
    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }
}

#[derive(Debug, Default)]
pub struct ReflectionArena {
    nodes: Vec<Node>,
    by_reflection: FxHashMap<ReflectionId, NodeId>,
}

impl ReflectionArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, indexing it by its reflection id if it has one.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if let Some(rid) = node.id {
            self.by_reflection.insert(rid, id);
        }
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Look a node up by TypeDoc reflection id.
    pub fn by_reflection(&self, rid: ReflectionId) -> Option<NodeId> {
        self.by_reflection.get(&rid).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}

impl Index<NodeId> for ReflectionArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
