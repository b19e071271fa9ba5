//! The loaded project and the analyzer's symbol table.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::arena::{Node, NodeId, ReflectionArena, ReflectionId};
use crate::kind::{ModifierFlags, ReflectionKind};
use crate::types::{SymbolLocation, TypeExpr};

/// A fully loaded, immutable reflection tree.
#[derive(Debug)]
pub struct Project {
    pub arena: ReflectionArena,
    pub root: NodeId,
    pub program: Option<Program>,
}

impl Project {
    pub fn root_node(&self) -> &Node {
        &self.arena[self.root]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    /// The symbol table available for references observed under
    /// `container`. `None` when the analyzer emitted no symbol table or the
    /// node is not a container.
    pub fn program_for(&self, container: NodeId) -> Option<&Program> {
        let node = self.arena.get(container)?;
        if !node.kind.is_container() {
            return None;
        }
        self.program.as_ref()
    }
}

/// A declaration known to the analyzer, documented or not.
#[derive(Clone, Debug)]
pub struct SymbolInfo {
    pub id: Option<ReflectionId>,
    pub name: String,
    pub kind: ReflectionKind,
    pub file_name: String,
    pub pos: Option<u32>,
    pub qualified_name: String,
    pub flags: ModifierFlags,
    /// Right-hand side for type aliases, declared type otherwise.
    pub ty: Option<Arc<TypeExpr>>,
}

impl SymbolInfo {
    pub fn is_type_alias(&self) -> bool {
        self.kind == ReflectionKind::TypeAlias
    }
}

/// Symbol table indexed by reflection id, position and qualified name.
#[derive(Debug, Default)]
pub struct Program {
    symbols: Vec<SymbolInfo>,
    by_id: FxHashMap<ReflectionId, usize>,
    by_pos: FxHashMap<(String, u32), usize>,
    by_name: FxHashMap<(String, String), usize>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: SymbolInfo) {
        let idx = self.symbols.len();
        if let Some(id) = symbol.id {
            self.by_id.insert(id, idx);
        }
        if let Some(pos) = symbol.pos {
            self.by_pos.insert((symbol.file_name.clone(), pos), idx);
        }
        self.by_name
            .insert((symbol.file_name.clone(), symbol.qualified_name.clone()), idx);
        self.symbols.push(symbol);
    }

    pub fn by_id(&self, id: ReflectionId) -> Option<&SymbolInfo> {
        self.by_id.get(&id).map(|&i| &self.symbols[i])
    }

    /// Resolve a symbol location, preferring the exact position.
    pub fn by_location(&self, location: &SymbolLocation) -> Option<&SymbolInfo> {
        let by_pos = location.pos.and_then(|pos| {
            self.by_pos
                .get(&(location.source_file_name.clone(), pos))
                .map(|&i| &self.symbols[i])
        });
        by_pos.or_else(|| {
            self.by_name
                .get(&(
                    location.source_file_name.clone(),
                    location.qualified_name.clone(),
                ))
                .map(|&i| &self.symbols[i])
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolInfo> {
        self.symbols.iter()
    }
}
