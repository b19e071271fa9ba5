//! Private type-alias redirection.
//!
//! A reference to a type alias that is not exported has no documented
//! target. Instead of emitting a dangling cross-reference, the renderer
//! inlines the alias's right-hand side. The candidates are only
//! discoverable while references are being created, so the redirector
//! listens on the [`Loader`](tsdoc_reflection::Loader) and builds the table
//! once loading is done.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use tsdoc_reflection::{
    NodeId, Program, Project, ReferenceListener, ReferenceTarget, ReferenceType, ReflectionId,
    ReflectionKind, TypeExpr,
};

/// Identity of an aliased declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKey {
    Position { file: String, pos: u32 },
    Name { file: String, name: String },
}

/// Alias identity to its expanded type. Read-only once built.
#[derive(Debug, Default)]
pub struct RedirectTable {
    by_key: FxHashMap<SymbolKey, Arc<TypeExpr>>,
    reflection_keys: FxHashMap<ReflectionId, SymbolKey>,
}

impl RedirectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `ty` under the name key and, when known, the position key. The
    /// first registration for a key wins.
    pub fn insert(
        &mut self,
        file: &str,
        name: &str,
        pos: Option<u32>,
        reflection: Option<ReflectionId>,
        ty: Arc<TypeExpr>,
    ) {
        let name_key = SymbolKey::Name {
            file: file.to_string(),
            name: name.to_string(),
        };
        if let Some(pos) = pos {
            self.by_key
                .entry(SymbolKey::Position {
                    file: file.to_string(),
                    pos,
                })
                .or_insert_with(|| Arc::clone(&ty));
        }
        self.by_key.entry(name_key.clone()).or_insert(ty);
        if let Some(id) = reflection {
            self.reflection_keys.entry(id).or_insert(name_key);
        }
    }

    pub fn get(&self, key: &SymbolKey) -> Option<&Arc<TypeExpr>> {
        self.by_key.get(key)
    }

    /// The expansion for a reference target, if it names a redirected alias.
    pub fn resolve(&self, target: &ReferenceTarget) -> Option<&Arc<TypeExpr>> {
        match target {
            ReferenceTarget::Reflection(id) => {
                let key = self.reflection_keys.get(id)?;
                self.by_key.get(key)
            }
            ReferenceTarget::Symbol(location) => {
                let by_pos = location.pos.and_then(|pos| {
                    self.by_key.get(&SymbolKey::Position {
                        file: location.source_file_name.clone(),
                        pos,
                    })
                });
                by_pos.or_else(|| {
                    self.by_key.get(&SymbolKey::Name {
                        file: location.source_file_name.clone(),
                        name: location.qualified_name.clone(),
                    })
                })
            }
            ReferenceTarget::Unresolved => None,
        }
    }

    /// Number of keys (each alias is stored under up to two).
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Collects referenced targets per container while the project loads.
#[derive(Debug, Default)]
pub struct PrivateAliasRedirector {
    references: IndexMap<NodeId, IndexSet<ReferenceTarget>>,
}

impl ReferenceListener for PrivateAliasRedirector {
    fn on_reference(&mut self, container: NodeId, reference: &ReferenceType) {
        if reference.refers_to_type_parameter || reference.target == ReferenceTarget::Unresolved {
            return;
        }
        self.references
            .entry(container)
            .or_default()
            .insert(reference.target.clone());
    }
}

impl PrivateAliasRedirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Containers that had at least one reference, in first-seen order.
    pub fn containers(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.references.keys().copied()
    }

    /// Expand every undocumented type alias referenced in the project.
    ///
    /// Alias bodies can reference further private aliases, so each new
    /// expansion is scanned and its targets redirected until nothing new
    /// turns up.
    pub fn build(&self, project: &Project) -> RedirectTable {
        let mut table = RedirectTable::new();
        let mut seen: IndexSet<(NodeId, ReferenceTarget)> = IndexSet::new();
        let mut pending: Vec<(NodeId, ReferenceTarget)> = self
            .references
            .iter()
            .flat_map(|(&container, targets)| {
                targets.iter().map(move |target| (container, target.clone()))
            })
            .rev()
            .collect();

        while let Some((container, target)) = pending.pop() {
            if !seen.insert((container, target.clone())) {
                continue;
            }
            let Some(program) = project.program_for(container) else {
                trace!(container = container.0, "no program for container, skipping");
                continue;
            };
            let Some(expansion) = redirect_target(project, program, &target, &mut table) else {
                continue;
            };
            for reference in expansion.references().into_iter().rev() {
                if reference.refers_to_type_parameter
                    || reference.target == ReferenceTarget::Unresolved
                {
                    continue;
                }
                pending.push((container, reference.target.clone()));
            }
        }
        debug!(keys = table.len(), "built redirect table");
        table
    }
}

/// Registers `target` when it names a private alias and returns the
/// expansion that was stored.
fn redirect_target(
    project: &Project,
    program: &Program,
    target: &ReferenceTarget,
    table: &mut RedirectTable,
) -> Option<Arc<TypeExpr>> {
    let symbol = match target {
        ReferenceTarget::Reflection(id) => program.by_id(*id),
        ReferenceTarget::Symbol(location) => program.by_location(location),
        ReferenceTarget::Unresolved => return None,
    };

    let reflection = match target {
        ReferenceTarget::Reflection(id) => Some(*id),
        _ => symbol.and_then(|s| s.id),
    };
    let node = reflection
        .and_then(|id| project.arena.by_reflection(id))
        .map(|id| project.node(id));
    if node.is_some_and(|n| !n.flags.is_private()) {
        return None;
    }

    match (symbol, node) {
        (Some(symbol), _) if symbol.is_type_alias() => {
            let ty = symbol.ty.as_ref()?;
            trace!(alias = %symbol.qualified_name, "redirecting private alias");
            table.insert(
                &symbol.file_name,
                &symbol.qualified_name,
                symbol.pos,
                reflection,
                Arc::clone(ty),
            );
            Some(Arc::clone(ty))
        }
        (Some(symbol), _) => {
            trace!(symbol = %symbol.qualified_name, kind = %symbol.kind, "not a type alias, skipping");
            None
        }
        // A private alias the analyzer kept as a reflection but left out of
        // the symbol table.
        (None, Some(node)) if node.kind == ReflectionKind::TypeAlias => {
            let (Some(ty), Some(source)) = (&node.ty, node.source()) else {
                return None;
            };
            trace!(alias = %node.name, "redirecting private alias reflection");
            let ty = Arc::new(ty.clone());
            table.insert(&source.file_name, &node.name, None, reflection, Arc::clone(&ty));
            Some(ty)
        }
        (None, _) => None,
    }
}

#[cfg(test)]
#[path = "../tests/redirect_tests.rs"]
mod redirect_tests;
