//! Path assignment.
//!
//! One depth-first walk over the arena gives every node a qualified path
//! (the cross-reference join key) and a file path (the segments of its
//! source file relative to the base directory). Must complete before any
//! type is rendered.

use std::borrow::Cow;

use tracing::{debug, trace};
use tsdoc_ir::Pathname;
use tsdoc_reflection::{Node, NodeId, Project, ReflectionKind};

use crate::error::{ConvertError, Result};

/// Paths recorded for every node reachable from the project root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathMap {
    paths: Vec<Option<Pathname>>,
    file_paths: Vec<Option<Pathname>>,
}

impl PathMap {
    pub fn path_of(&self, id: NodeId) -> Option<&Pathname> {
        self.paths.get(id.index()).and_then(Option::as_ref)
    }

    pub fn file_path_of(&self, id: NodeId) -> Option<&Pathname> {
        self.file_paths.get(id.index()).and_then(Option::as_ref)
    }

    /// The path of `id`, or [`ConvertError::MissingPath`] if the walk never
    /// reached it.
    pub fn require(&self, project: &Project, id: NodeId) -> Result<&Pathname> {
        self.path_of(id).ok_or_else(|| {
            let node = project.node(id);
            ConvertError::MissingPath {
                name: node.name.clone(),
                kind: node.kind,
            }
        })
    }

    /// Number of nodes with a recorded path.
    pub fn len(&self) -> usize {
        self.paths.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Pathname)> {
        self.paths
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (NodeId(i as u32), p)))
    }

    fn record(&mut self, id: NodeId, path: Vec<String>, file_path: &[String]) {
        let idx = id.index();
        if self.paths.len() <= idx {
            self.paths.resize(idx + 1, None);
            self.file_paths.resize(idx + 1, None);
        }
        self.paths[idx] = Some(Pathname::new(path));
        self.file_paths[idx] = Some(Pathname::new(file_path.to_vec()));
    }
}

/// Assign a path and a file path to every node under the project root.
pub fn assign_paths(project: &Project, base_dir: &str) -> PathMap {
    let mut assigner = PathAssigner {
        project,
        base_dir,
        map: PathMap {
            paths: vec![None; project.arena.len()],
            file_paths: vec![None; project.arena.len()],
        },
    };
    assigner.visit(project.root, None, &[], &[]);
    debug!(paths = assigner.map.len(), "assigned paths");
    assigner.map
}

struct PathAssigner<'a> {
    project: &'a Project,
    base_dir: &'a str,
    map: PathMap,
}

impl PathAssigner<'_> {
    fn visit(
        &mut self,
        id: NodeId,
        parent_kind: Option<ReflectionKind>,
        parent_segments: &[String],
        file_segments: &[String],
    ) {
        let project = self.project;
        let node = project.node(id);

        let own_file;
        let file_segments = match node.source() {
            Some(source) => {
                own_file = make_filepath_segments(&relative_source(&source.file_name, self.base_dir));
                own_file.as_slice()
            }
            None => file_segments,
        };

        let path = compute_path(node, parent_kind, parent_segments, file_segments);
        trace!(name = %node.name, kind = %node.kind, path = %path.concat(), "path");
        self.map.record(id, path.clone(), file_segments);

        for child in descendants(node) {
            self.visit(child, Some(node.kind), &path, file_segments);
        }
    }
}

fn compute_path(
    node: &Node,
    parent_kind: Option<ReflectionKind>,
    parent_segments: &[String],
    file_segments: &[String],
) -> Vec<String> {
    let anchor = if parent_segments.is_empty() {
        file_segments
    } else {
        parent_segments
    };
    let mut path = anchor.to_vec();
    if has_redundant_name(node) {
        return path;
    }

    let delimiter = if parent_kind == Some(ReflectionKind::Class) && !node.flags.is_static() {
        '#'
    } else {
        '.'
    };
    if let Some(last) = path.last_mut() {
        last.push(delimiter);
    }
    path.push(symbol_safe_name(&node.name).into_owned());
    path
}

/// Kinds whose name adds nothing to the path: descendants anchor off the
/// parent's path unchanged.
fn has_redundant_name(node: &Node) -> bool {
    match node.kind {
        ReflectionKind::Project
        | ReflectionKind::Module
        | ReflectionKind::Parameter
        | ReflectionKind::TypeParameter => true,
        ReflectionKind::TypeLiteral => node.name == "__type" || node.name == "__object",
        kind => kind.is_signature(),
    }
}

/// Nodes to visit below `node`, in path-assignment order.
fn descendants(node: &Node) -> Vec<NodeId> {
    let mut out = Vec::new();
    out.extend(&node.children);
    out.extend(&node.signatures);
    out.extend(node.get_signature);
    out.extend(node.set_signature);
    out.extend(node.index_signature);
    out.extend(&node.parameters);
    out.extend(&node.type_parameters);
    if let Some(ty) = &node.ty {
        out.extend(ty.inline_declarations());
    }
    out
}

/// Rewrite well-known-symbol names (`[iterator]`, `[Symbol.iterator]`) to
/// use U+2024 ONE DOT LEADER, which is never read as a path delimiter.
pub fn symbol_safe_name(name: &str) -> Cow<'_, str> {
    match name.strip_prefix('[') {
        Some(rest) if rest.ends_with(']') => {
            let rest = rest.strip_prefix("Symbol.").unwrap_or(rest);
            Cow::Owned(format!("[Symbol\u{2024}{rest}"))
        }
        _ => Cow::Borrowed(name),
    }
}

/// Split a file path into path segments: directories keep a trailing `/`,
/// the file loses its extension, and relative paths are rooted at `./`.
pub fn make_filepath_segments(path: &str) -> Vec<String> {
    let rooted = path.starts_with('/')
        || path.starts_with("./")
        || path.starts_with("../")
        || path == "."
        || path == "..";
    let path: Cow<'_, str> = if rooted {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("./{path}"))
    };

    let parts: Vec<&str> = path.split('/').collect();
    let Some((file, dirs)) = parts.split_last() else {
        return Vec::new();
    };
    let mut segments: Vec<String> = dirs.iter().map(|dir| format!("{dir}/")).collect();
    let stem = match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    };
    segments.push(stem.to_string());
    segments
}

/// Make a source file name relative to `base_dir`. Both are compared
/// lexically, so relative names work against a relative base. A name whose
/// absoluteness differs from the base's is kept unchanged. Files outside the
/// base directory that live in a dependency are re-anchored at
/// `/node_modules/...`.
pub fn relative_source(file_name: &str, base_dir: &str) -> String {
    let mixed = file_name.starts_with('/') != base_dir.starts_with('/');
    let relative = if base_dir.is_empty() || mixed {
        file_name.to_string()
    } else {
        let base = path_components(base_dir);
        let file = path_components(file_name);
        let common = base
            .iter()
            .zip(&file)
            .take_while(|(a, b)| a == b)
            .count();
        let mut parts = vec![".."; base.len() - common];
        parts.extend(&file[common..]);
        parts.join("/")
    };

    if relative.starts_with("../") {
        let parts: Vec<&str> = relative.split('/').collect();
        if let Some(idx) = parts.iter().position(|s| *s == "node_modules") {
            return format!("/{}", parts[idx..].join("/"));
        }
    }
    relative
}

fn path_components(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

#[cfg(test)]
#[path = "../tests/paths_tests.rs"]
mod paths_tests;
