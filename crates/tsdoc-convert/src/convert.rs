//! Reflection Converter - build IR records from arena nodes.
//!
//! Dispatch is an exhaustive match on [`ReflectionKind`]: adding a kind to
//! the reflection model fails to compile here until it is handled.

use tracing::{debug, trace};
use tsdoc_ir::{
    Attribute, Class, Function, Interface, Member, MemberProperties, Param, Pathname,
    RenderedType, Return, TopLevel, TopLevelRecord, TypeParam,
};
use tsdoc_reflection::{Comment, Node, NodeId, Project, ReferenceTarget, ReflectionKind, TypeExpr};

use crate::describe;
use crate::error::{ConvertError, Result};
use crate::options::ConvertOptions;
use crate::paths::{PathMap, symbol_safe_name};
use crate::redirect::RedirectTable;
use crate::render::TypeRenderer;

/// Parameter name TypeDoc gives to destructured parameters.
pub const NAMED_PARAMETERS: &str = "__namedParameters";

/// A converted node and the nodes still to convert below it.
pub type Converted = (Option<TopLevelRecord>, Vec<NodeId>);

pub struct Converter<'a> {
    project: &'a Project,
    paths: &'a PathMap,
    renderer: TypeRenderer<'a>,
    skip_absolute_sources: bool,
}

impl<'a> Converter<'a> {
    pub fn new(
        project: &'a Project,
        paths: &'a PathMap,
        redirects: &'a RedirectTable,
        options: &ConvertOptions,
    ) -> Self {
        Converter {
            project,
            paths,
            renderer: TypeRenderer::new(project, paths, redirects, options),
            skip_absolute_sources: options.skip_absolute_sources,
        }
    }

    /// Convert every declaration below the project root, in declaration
    /// order.
    pub fn convert_all(&mut self) -> Result<Vec<TopLevelRecord>> {
        let project = self.project;
        let mut todo: Vec<NodeId> = project.root_node().children.iter().rev().copied().collect();
        let mut done = Vec::new();

        while let Some(id) = todo.pop() {
            let node = project.node(id);
            if self.skip_absolute_sources
                && node.source().is_some_and(|s| s.file_name.starts_with('/'))
            {
                trace!(name = %node.name, "skipping declaration with absolute source");
                continue;
            }
            let (record, more) = self.convert(id)?;
            done.extend(record);
            todo.extend(more.into_iter().rev());
        }

        debug!(records = done.len(), "converted project");
        Ok(done)
    }

    /// Convert one declaration or signature.
    pub fn convert(&mut self, id: NodeId) -> Result<Converted> {
        let project = self.project;
        let node = project.node(id);
        trace!(name = %node.name, kind = %node.kind, "converting");

        match node.kind {
            ReflectionKind::Project
            | ReflectionKind::Module
            | ReflectionKind::Namespace
            | ReflectionKind::Enum
            | ReflectionKind::EnumMember
            | ReflectionKind::TypeAlias
            | ReflectionKind::Reference => Ok((None, node.children.clone())),

            ReflectionKind::Function | ReflectionKind::Method | ReflectionKind::Constructor => {
                let signature = first_signature(node)?;
                let function = self.function(signature, id, &node.name, &[])?;
                Ok((Some(TopLevelRecord::Function(function)), node.children.clone()))
            }

            ReflectionKind::Variable | ReflectionKind::Property => {
                let member = self.member(id)?;
                Ok((Some(member.into()), node.children.clone()))
            }

            ReflectionKind::Accessor => {
                let attribute = self.accessor(id)?;
                Ok((Some(TopLevelRecord::Attribute(attribute)), node.children.clone()))
            }

            ReflectionKind::Class => {
                let (class, todo) = self.class(id)?;
                Ok((Some(TopLevelRecord::Class(class)), todo))
            }

            ReflectionKind::Interface => {
                let (interface, todo) = self.interface(id)?;
                Ok((Some(TopLevelRecord::Interface(interface)), todo))
            }

            ReflectionKind::CallSignature | ReflectionKind::ConstructorSignature => {
                let owner = node.parent.unwrap_or(id);
                let name = &project.node(owner).name;
                let function = self.function(id, owner, name, &[])?;
                Ok((Some(TopLevelRecord::Function(function)), Vec::new()))
            }

            ReflectionKind::TypeLiteral => match node.signatures.first() {
                Some(&signature) => {
                    // Inline function shapes are named after the declaration
                    // whose type they are.
                    let owner = node.parent.unwrap_or(id);
                    let name = &project.node(owner).name;
                    let function = self.function(signature, owner, name, &[])?;
                    Ok((Some(TopLevelRecord::Function(function)), Vec::new()))
                }
                None => Ok((None, Vec::new())),
            },

            ReflectionKind::GetSignature
            | ReflectionKind::SetSignature
            | ReflectionKind::IndexSignature
            | ReflectionKind::Parameter
            | ReflectionKind::TypeParameter => Ok((None, Vec::new())),
        }
    }

    /// Build a function record from `signature`. `owner` supplies the
    /// source location, member flags and fallback comment; `name` is the
    /// display name.
    fn function(
        &mut self,
        signature: NodeId,
        owner: NodeId,
        name: &str,
        inherited_type_params: &[NodeId],
    ) -> Result<Function> {
        let project = self.project;
        let sig = project.node(signature);
        let owner_node = project.node(owner);
        let comment = sig.comment.as_ref().or(owner_node.comment.as_ref());

        let top = self.top_level(signature, owner, name, comment)?;
        let params = self.params(sig, comment, name)?;

        let is_async = sig
            .ty
            .as_ref()
            .and_then(TypeExpr::as_reference)
            .is_some_and(|r| r.name == "Promise");
        let return_type = sig.ty.as_ref().map(|ty| match ty {
            TypeExpr::Reference(r) if is_async && !r.type_arguments.is_empty() => {
                &r.type_arguments[0]
            }
            ty => ty,
        });
        let returns = match return_type {
            _ if sig.kind == ReflectionKind::ConstructorSignature => Vec::new(),
            None => Vec::new(),
            Some(ty) if ty.is_void() => Vec::new(),
            Some(ty) => vec![Return {
                ty: self.render(ty, name)?,
                description: comment.map(describe::returns).unwrap_or_default(),
            }],
        };

        let type_param_ids = if sig.type_parameters.is_empty() {
            inherited_type_params
        } else {
            sig.type_parameters.as_slice()
        };
        let type_params = self.type_params(type_param_ids)?;

        Ok(Function {
            top,
            member: member_properties(owner_node),
            is_async,
            params,
            exceptions: Vec::new(),
            returns,
            type_params,
        })
    }

    fn params(
        &mut self,
        sig: &Node,
        comment: Option<&Comment>,
        function: &str,
    ) -> Result<Vec<Param>> {
        let project = self.project;
        let requested: Vec<String> = comment
            .and_then(|c| c.first_tag("destructure"))
            .map(|tag| tag.text().split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let mut params = Vec::with_capacity(sig.parameters.len());
        for &id in &sig.parameters {
            let param = project.node(id);
            if requested.iter().any(|r| *r == param.name) {
                params.extend(self.destructure(id, false, function)?);
            } else if param.name == NAMED_PARAMETERS && is_object_shape(project, param) {
                params.extend(self.destructure(id, true, function)?);
            } else {
                params.push(self.param(param, comment, function)?);
            }
        }
        Ok(params)
    }

    fn param(&mut self, param: &Node, signature: Option<&Comment>, function: &str) -> Result<Param> {
        let ty = match &param.ty {
            Some(ty) => Some(self.render(ty, function)?),
            None => None,
        };
        Ok(Param {
            name: param.name.clone(),
            description: describe::param(param.comment.as_ref(), signature, &param.name),
            is_variadic: param.flags.is_rest(),
            has_default: param.default_value.is_some(),
            default: param.default_value.clone(),
            ty,
        })
    }

    /// One synthetic parameter per field of an object-shaped parameter.
    fn destructure(&mut self, id: NodeId, sentinel: bool, function: &str) -> Result<Vec<Param>> {
        let project = self.project;
        let param = project.node(id);
        let shape = param
            .ty
            .as_ref()
            .and_then(TypeExpr::as_reflection)
            .map(|decl| project.node(decl))
            .filter(|decl| decl.signatures.is_empty())
            .ok_or_else(|| ConvertError::DestructureNonObject {
                name: function.to_string(),
                param: param.name.clone(),
            })?;

        let mut fields = Vec::with_capacity(shape.children.len());
        for &field_id in &shape.children {
            let field = project.node(field_id);
            let name = if sentinel {
                field.name.clone()
            } else {
                format!("{}.{}", param.name, field.name)
            };
            let ty = self
                .renderer
                .render_member(field_id)
                .map_err(|e| e.within(function))?;
            fields.push(Param {
                name,
                description: field_description(project, field),
                is_variadic: false,
                has_default: field.default_value.is_some(),
                default: field.default_value.clone(),
                ty: Some(ty),
            });
        }
        Ok(fields)
    }

    fn type_params(&mut self, ids: &[NodeId]) -> Result<Vec<TypeParam>> {
        let project = self.project;
        let mut params = Vec::with_capacity(ids.len());
        for &id in ids {
            let param = project.node(id);
            let extends = match &param.ty {
                Some(ty) => Some(self.render(ty, &param.name)?),
                None => None,
            };
            params.push(TypeParam {
                name: param.name.clone(),
                extends,
                description: param
                    .comment
                    .as_ref()
                    .map(|c| describe::description(&c.summary))
                    .unwrap_or_default(),
            });
        }
        Ok(params)
    }

    /// Variables and properties. Inline callable types become functions
    /// named after the declaration.
    fn member(&mut self, id: NodeId) -> Result<Member> {
        let project = self.project;
        let node = project.node(id);
        let ty = node.ty.as_ref().ok_or_else(|| ConvertError::MissingType {
            name: node.name.clone(),
            kind: node.kind,
        })?;

        let callable = ty
            .as_reflection()
            .and_then(|decl| project.node(decl).signatures.first().copied());
        if let Some(signature) = callable {
            return Ok(Member::Function(self.function(signature, id, &node.name, &[])?));
        }

        Ok(Member::Attribute(Attribute {
            top: self.top_level(id, id, &node.name, node.comment.as_ref())?,
            member: member_properties(node),
            ty: self.render(ty, &node.name)?,
        }))
    }

    /// Accessors document as attributes typed by the getter, or by the
    /// setter's parameter when there is no getter.
    fn accessor(&mut self, id: NodeId) -> Result<Attribute> {
        let project = self.project;
        let node = project.node(id);
        let (signature, ty) = match (node.get_signature, node.set_signature) {
            (Some(get), _) => (get, project.node(get).ty.as_ref()),
            (None, Some(set)) => {
                let ty = project
                    .node(set)
                    .parameters
                    .first()
                    .and_then(|&p| project.node(p).ty.as_ref());
                (set, ty)
            }
            (None, None) => {
                return Err(ConvertError::MissingSignature {
                    name: node.name.clone(),
                    kind: node.kind,
                });
            }
        };
        let ty = ty.ok_or_else(|| ConvertError::MissingType {
            name: node.name.clone(),
            kind: node.kind,
        })?;
        let comment = project
            .node(signature)
            .comment
            .as_ref()
            .or(node.comment.as_ref());

        Ok(Attribute {
            top: self.top_level(id, id, &node.name, comment)?,
            member: member_properties(node),
            ty: self.render(ty, &node.name)?,
        })
    }

    fn class(&mut self, id: NodeId) -> Result<(Class, Vec<NodeId>)> {
        let project = self.project;
        let node = project.node(id);
        let (constructor, members, todo) = self.constructor_and_members(node)?;

        let class = Class {
            top: self.top_level(id, id, &node.name, node.comment.as_ref())?,
            constructor,
            members,
            supers: self.related(&node.extended_types)?,
            is_abstract: node.flags.is_abstract(),
            interfaces: self.related(&node.implemented_types)?,
            type_params: self.type_params(&node.type_parameters)?,
        };
        Ok((class, todo))
    }

    fn interface(&mut self, id: NodeId) -> Result<(Interface, Vec<NodeId>)> {
        let project = self.project;
        let node = project.node(id);
        let (_, members, todo) = self.constructor_and_members(node)?;

        let interface = Interface {
            top: self.top_level(id, id, &node.name, node.comment.as_ref())?,
            members,
            supers: self.related(&node.extended_types)?,
            type_params: self.type_params(&node.type_parameters)?,
        };
        Ok((interface, todo))
    }

    /// Split a class or interface body into its constructor and other
    /// members, skipping inherited children. Only the first constructor, and
    /// its first overload, is used.
    fn constructor_and_members(
        &mut self,
        owner: &Node,
    ) -> Result<(Option<Function>, Vec<Member>, Vec<NodeId>)> {
        let project = self.project;
        let mut constructor = None;
        let mut members = Vec::new();
        let mut todo = Vec::new();

        for &child_id in &owner.children {
            let child = project.node(child_id);
            if child.is_inherited() {
                trace!(name = %child.name, "skipping inherited member");
                continue;
            }

            if child.kind == ReflectionKind::Constructor {
                if constructor.is_some() {
                    trace!(name = %child.name, "ignoring extra constructor");
                    continue;
                }
                let signature = first_signature(child)?;
                constructor = Some(self.function(
                    signature,
                    child_id,
                    &child.name,
                    &owner.type_parameters,
                )?);
                todo.push(child_id);
                continue;
            }
            todo.push(child_id);

            match self.convert(child_id)?.0 {
                Some(TopLevelRecord::Function(f)) => members.push(Member::Function(f)),
                Some(TopLevelRecord::Attribute(a)) => members.push(Member::Attribute(a)),
                Some(_) | None => {}
            }
        }
        Ok((constructor, members, todo))
    }

    /// Paths of the documented declarations among `types`. Supertypes that
    /// are not plain references to a reflection are dropped.
    fn related(&self, types: &[TypeExpr]) -> Result<Vec<Pathname>> {
        let project = self.project;
        types
            .iter()
            .filter_map(TypeExpr::as_reference)
            .filter_map(|r| match r.target {
                ReferenceTarget::Reflection(rid) => project.arena.by_reflection(rid),
                _ => None,
            })
            .map(|node| self.paths.require(project, node).cloned())
            .collect()
    }

    fn top_level(
        &self,
        path_node: NodeId,
        owner: NodeId,
        name: &str,
        comment: Option<&Comment>,
    ) -> Result<TopLevel> {
        let project = self.project;
        let path = self.paths.require(project, path_node)?.clone();
        let source = project
            .node(owner)
            .source()
            .or_else(|| project.node(path_node).source());
        let exported_from = self
            .paths
            .file_path_of(owner)
            .filter(|p| !p.is_empty())
            .cloned();

        let mut top = TopLevel {
            name: symbol_safe_name(name).into_owned(),
            path,
            filename: source.map(|s| basename(&s.file_name).to_string()).unwrap_or_default(),
            deppath: source.map(|s| s.file_name.clone()),
            line: source.map(|s| s.line),
            exported_from,
            ..TopLevel::default()
        };
        if let Some(comment) = comment {
            top.description = describe::description(&comment.summary);
            top.modifier_tags = describe::modifier_tags(comment);
            top.block_tags = describe::block_tags(comment);
            top.deprecated = describe::deprecated(comment);
            top.examples = describe::examples(comment);
        }
        Ok(top)
    }

    fn render(&mut self, ty: &TypeExpr, declaration: &str) -> Result<RenderedType> {
        self.renderer
            .render(ty)
            .map_err(|e| e.within(declaration))
    }
}

fn first_signature(node: &Node) -> Result<NodeId> {
    node.signatures
        .first()
        .copied()
        .ok_or_else(|| ConvertError::MissingSignature {
            name: node.name.clone(),
            kind: node.kind,
        })
}

fn member_properties(node: &Node) -> MemberProperties {
    MemberProperties {
        is_abstract: node.flags.is_abstract(),
        is_optional: node.flags.is_optional(),
        is_static: node.flags.is_static(),
        is_private: node.flags.is_private(),
    }
}

fn is_object_shape(project: &Project, param: &Node) -> bool {
    param
        .ty
        .as_ref()
        .and_then(TypeExpr::as_reflection)
        .is_some_and(|decl| project.node(decl).signatures.is_empty())
}

/// A destructured field's own summary, falling back to the comment of its
/// first signature when the field is callable.
fn field_description(project: &Project, field: &Node) -> tsdoc_ir::Description {
    if let Some(comment) = field.comment.as_ref().filter(|c| !c.summary.is_empty()) {
        return describe::description(&comment.summary);
    }
    let signature = field.signatures.first().copied().or_else(|| {
        field
            .ty
            .as_ref()
            .and_then(TypeExpr::as_reflection)
            .and_then(|decl| project.node(decl).signatures.first().copied())
    });
    signature
        .and_then(|sig| project.node(sig).comment.as_ref())
        .map(|c| describe::description(&c.summary))
        .unwrap_or_default()
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
#[path = "../tests/convert_tests.rs"]
mod convert_tests;
