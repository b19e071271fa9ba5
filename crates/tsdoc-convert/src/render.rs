//! Type Renderer - turn type expressions into token streams.
//!
//! Each variant emits text and cross-reference tokens. The syntactic
//! position a type is emitted in (its [`TypeContext`]) decides whether it
//! needs parentheses; adjacent text tokens are merged so the output stays
//! small and stable.

use std::sync::Arc;

use tracing::trace;
use tsdoc_ir::{RenderedType, TypeToken, TypeXRef};
use tsdoc_reflection::{
    LiteralValue, Node, NodeId, Project, ReferenceTarget, ReferenceType, ReflectionKind, TypeExpr,
};

use crate::error::{ConvertError, Result};
use crate::options::{ConvertOptions, LiteralPolicy, UnsupportedTypePolicy};
use crate::paths::PathMap;
use crate::redirect::RedirectTable;

/// Syntactic position of a type, used only for parenthesization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeContext {
    Root,
    ArrayElement,
    UnionMember,
    IntersectionMember,
    TupleElement,
    TypeOperatorTarget,
    TypeArgument,
    OptionalElement,
    MappedKey,
}

/// Binding strength of a rendered type, loosest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Precedence {
    Function,
    Union,
    Intersection,
    Operator,
    Primary,
}

fn needs_parens(precedence: Precedence, context: TypeContext) -> bool {
    use TypeContext::*;
    match precedence {
        Precedence::Function => matches!(
            context,
            ArrayElement | UnionMember | IntersectionMember | TypeOperatorTarget | OptionalElement
        ),
        Precedence::Union => matches!(
            context,
            ArrayElement | IntersectionMember | TypeOperatorTarget | OptionalElement
        ),
        Precedence::Intersection => {
            matches!(context, ArrayElement | TypeOperatorTarget | OptionalElement)
        }
        Precedence::Operator => matches!(context, ArrayElement | OptionalElement),
        Precedence::Primary => false,
    }
}

/// Token sink that merges adjacent text.
#[derive(Default)]
struct Tokens(Vec<TypeToken>);

impl Tokens {
    fn text(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(TypeToken::Text(last)) => last.push_str(s),
            _ => self.0.push(TypeToken::text(s)),
        }
    }

    fn xref(&mut self, xref: TypeXRef) {
        self.0.push(TypeToken::XRef(xref));
    }
}

pub struct TypeRenderer<'a> {
    project: &'a Project,
    paths: &'a PathMap,
    redirects: &'a RedirectTable,
    literal_policy: LiteralPolicy,
    unsupported: UnsupportedTypePolicy,
    /// Redirect expansions currently being rendered.
    expanding: Vec<Arc<TypeExpr>>,
}

impl<'a> TypeRenderer<'a> {
    pub fn new(
        project: &'a Project,
        paths: &'a PathMap,
        redirects: &'a RedirectTable,
        options: &ConvertOptions,
    ) -> Self {
        TypeRenderer {
            project,
            paths,
            redirects,
            literal_policy: options.literal_policy,
            unsupported: options.unsupported_types,
            expanding: Vec::new(),
        }
    }

    pub fn render(&mut self, ty: &TypeExpr) -> Result<RenderedType> {
        self.render_in(ty, TypeContext::Root)
    }

    pub fn render_in(&mut self, ty: &TypeExpr, context: TypeContext) -> Result<RenderedType> {
        let mut out = Tokens::default();
        self.emit(ty, context, &mut out)?;
        Ok(out.0)
    }

    /// Render a signature node as a function type, `(a: A) => R`.
    pub fn render_signature(&mut self, signature: NodeId) -> Result<RenderedType> {
        let mut out = Tokens::default();
        self.emit_signature(signature, &mut out)?;
        Ok(out.0)
    }

    /// Render the type of an object member: its declared type, the shape
    /// of its first signature, or its accessor type.
    pub fn render_member(&mut self, member: NodeId) -> Result<RenderedType> {
        let mut out = Tokens::default();
        self.emit_member_type(member, &mut out)?;
        Ok(out.0)
    }

    fn emit(&mut self, ty: &TypeExpr, context: TypeContext, out: &mut Tokens) -> Result<()> {
        if let TypeExpr::Reference(reference) = ty {
            if !reference.refers_to_type_parameter {
                let redirects = self.redirects;
                if let Some(expanded) = redirects.resolve(&reference.target) {
                    return self.emit_redirect(reference, Arc::clone(expanded), context, out);
                }
            }
        }

        let parens = needs_parens(self.precedence(ty), context);
        if parens {
            out.text("(");
        }
        self.emit_bare(ty, out)?;
        if parens {
            out.text(")");
        }
        Ok(())
    }

    fn emit_redirect(
        &mut self,
        reference: &ReferenceType,
        expanded: Arc<TypeExpr>,
        context: TypeContext,
        out: &mut Tokens,
    ) -> Result<()> {
        if self.expanding.iter().any(|e| Arc::ptr_eq(e, &expanded)) {
            return Err(ConvertError::CircularRedirect {
                name: reference.name.clone(),
            });
        }
        trace!(alias = %reference.name, "expanding private alias");
        self.expanding.push(Arc::clone(&expanded));
        let result = self.emit(&expanded, context, out);
        self.expanding.pop();
        result
    }

    fn precedence(&self, ty: &TypeExpr) -> Precedence {
        match ty {
            TypeExpr::Reflection { declaration } => {
                if self.project.node(*declaration).signatures.is_empty() {
                    Precedence::Primary
                } else {
                    Precedence::Function
                }
            }
            TypeExpr::Union(_) => Precedence::Union,
            TypeExpr::Intersection(_) => Precedence::Intersection,
            TypeExpr::TypeOperator { .. } | TypeExpr::Query(_) => Precedence::Operator,
            _ => Precedence::Primary,
        }
    }

    fn emit_bare(&mut self, ty: &TypeExpr, out: &mut Tokens) -> Result<()> {
        match ty {
            TypeExpr::Intrinsic { name } => out.xref(TypeXRef::intrinsic(name)),
            TypeExpr::Literal(literal) => self.emit_literal(literal, out),
            TypeExpr::Reference(reference) => self.emit_reference(reference, out)?,
            TypeExpr::Union(types) => {
                self.emit_joined(types, " | ", TypeContext::UnionMember, out)?
            }
            TypeExpr::Intersection(types) => {
                self.emit_joined(types, " & ", TypeContext::IntersectionMember, out)?
            }
            TypeExpr::Array(element) => {
                self.emit(element, TypeContext::ArrayElement, out)?;
                out.text("[]");
            }
            TypeExpr::Tuple(elements) => {
                out.text("[");
                self.emit_joined(elements, ", ", TypeContext::TupleElement, out)?;
                out.text("]");
            }
            TypeExpr::NamedTupleMember {
                name,
                optional,
                element,
            } => {
                out.text(name);
                out.text(if *optional { "?: " } else { ": " });
                self.emit(element, TypeContext::TupleElement, out)?;
            }
            TypeExpr::Optional(element) => {
                self.emit(element, TypeContext::OptionalElement, out)?;
                out.text("?");
            }
            TypeExpr::Reflection { declaration } => self.emit_declaration(*declaration, out)?,
            TypeExpr::Predicate {
                asserts, target, ..
            } => {
                let (result, clause) = if *asserts {
                    ("void", " (assertion for ")
                } else {
                    ("boolean", " (typeguard for ")
                };
                out.xref(TypeXRef::intrinsic(result));
                if let Some(target) = target {
                    out.text(clause);
                    self.emit(target, TypeContext::Root, out)?;
                    out.text(")");
                }
            }
            TypeExpr::Query(target) => {
                out.text("typeof ");
                self.emit(target, TypeContext::TypeOperatorTarget, out)?;
            }
            TypeExpr::TypeOperator { operator, target } => {
                out.text(operator);
                out.text(" ");
                self.emit(target, TypeContext::TypeOperatorTarget, out)?;
            }
            TypeExpr::Rest(_)
            | TypeExpr::IndexedAccess { .. }
            | TypeExpr::Conditional
            | TypeExpr::Mapped
            | TypeExpr::TemplateLiteral
            | TypeExpr::Inferred { .. } => self.emit_unsupported(ty, out)?,
            TypeExpr::Unknown { name } => out.text(name),
        }
        Ok(())
    }

    fn emit_joined(
        &mut self,
        types: &[TypeExpr],
        separator: &str,
        context: TypeContext,
        out: &mut Tokens,
    ) -> Result<()> {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                out.text(separator);
            }
            self.emit(ty, context, out)?;
        }
        Ok(())
    }

    fn emit_literal(&self, literal: &LiteralValue, out: &mut Tokens) {
        let widen = self.literal_policy == LiteralPolicy::Widen;
        match literal {
            LiteralValue::Null => out.xref(TypeXRef::intrinsic("null")),
            LiteralValue::Number(_) if widen => out.xref(TypeXRef::intrinsic("number")),
            LiteralValue::Number(text) => out.text(text),
            LiteralValue::String(s) => out.text(&quote(s)),
            LiteralValue::Boolean(b) => out.text(if *b { "true" } else { "false" }),
            LiteralValue::BigInt { .. } if widen => out.xref(TypeXRef::intrinsic("bigint")),
            LiteralValue::BigInt { negative, value } => {
                if *negative {
                    out.text("-");
                }
                out.text(value);
                out.text("n");
            }
        }
    }

    fn emit_reference(&mut self, reference: &ReferenceType, out: &mut Tokens) -> Result<()> {
        if reference.refers_to_type_parameter {
            out.text(&reference.name);
        } else {
            out.xref(self.resolve_reference(reference)?);
        }

        if !reference.type_arguments.is_empty() {
            out.text("<");
            self.emit_joined(&reference.type_arguments, ", ", TypeContext::TypeArgument, out)?;
            out.text(">");
        }
        Ok(())
    }

    fn resolve_reference(&self, reference: &ReferenceType) -> Result<TypeXRef> {
        match &reference.target {
            ReferenceTarget::Symbol(location)
                if location.is_dependency() || reference.package.is_some() =>
            {
                let package = reference
                    .package
                    .clone()
                    .or_else(|| package_from_path(&location.source_file_name))
                    .unwrap_or_default();
                Ok(TypeXRef::External {
                    name: reference.name.clone(),
                    package,
                    qualified_name: location.qualified_name.clone(),
                    sourcefilename: location.source_file_name.clone(),
                })
            }
            ReferenceTarget::Reflection(id) => match self.project.arena.by_reflection(*id) {
                Some(node) => {
                    let path = self.paths.require(self.project, node)?;
                    Ok(TypeXRef::internal(&reference.name, path.clone()))
                }
                None => Err(unresolved(reference)),
            },
            _ => Err(unresolved(reference)),
        }
    }

    fn emit_declaration(&mut self, declaration: NodeId, out: &mut Tokens) -> Result<()> {
        let project = self.project;
        let node = project.node(declaration);
        match node.signatures.first() {
            Some(&signature) => self.emit_signature(signature, out),
            None => self.emit_object(node, out),
        }
    }

    fn emit_signature(&mut self, signature: NodeId, out: &mut Tokens) -> Result<()> {
        let project = self.project;
        let sig = project.node(signature);
        if sig.kind == ReflectionKind::ConstructorSignature {
            out.text("new ");
        }
        self.emit_type_parameters(&sig.type_parameters, out)?;

        out.text("(");
        for (i, &param) in sig.parameters.iter().enumerate() {
            if i > 0 {
                out.text(", ");
            }
            let param = project.node(param);
            if param.flags.is_rest() {
                out.text("...");
            }
            out.text(&param.name);
            if param.flags.is_optional() {
                out.text("?");
            }
            if let Some(ty) = &param.ty {
                out.text(": ");
                self.emit(ty, TypeContext::Root, out)?;
            }
        }
        out.text(") => ");

        match &sig.ty {
            Some(ty) => self.emit(ty, TypeContext::Root, out),
            None => {
                out.xref(TypeXRef::intrinsic("void"));
                Ok(())
            }
        }
    }

    fn emit_type_parameters(&mut self, params: &[NodeId], out: &mut Tokens) -> Result<()> {
        if params.is_empty() {
            return Ok(());
        }
        let project = self.project;
        out.text("<");
        for (i, &param) in params.iter().enumerate() {
            if i > 0 {
                out.text(", ");
            }
            let param = project.node(param);
            out.text(&param.name);
            if let Some(constraint) = &param.ty {
                out.text(" extends ");
                self.emit(constraint, TypeContext::Root, out)?;
            }
        }
        out.text(">");
        Ok(())
    }

    /// `{ [key: K]: V; a: A; b?: B }`, or `{}` for an empty shape.
    fn emit_object(&mut self, node: &Node, out: &mut Tokens) -> Result<()> {
        let project = self.project;
        let mut entries = 0usize;

        if let Some(index) = node.index_signature {
            let index = project.node(index);
            if index.parameters.len() != 1 {
                return Err(ConvertError::MalformedIndexSignature {
                    name: owner_name(project, node).to_string(),
                    arity: index.parameters.len(),
                });
            }
            let key = project.node(index.parameters[0]);
            out.text("{ [");
            out.text(&key.name);
            if let Some(ty) = &key.ty {
                out.text(": ");
                self.emit(ty, TypeContext::Root, out)?;
            }
            out.text("]: ");
            match &index.ty {
                Some(ty) => self.emit(ty, TypeContext::Root, out)?,
                None => {
                    return Err(ConvertError::MissingType {
                        name: owner_name(project, node).to_string(),
                        kind: index.kind,
                    });
                }
            }
            entries += 1;
        }

        for &child in &node.children {
            out.text(if entries == 0 { "{ " } else { "; " });
            let member = project.node(child);
            out.text(&member.name);
            out.text(if member.flags.is_optional() { "?: " } else { ": " });
            self.emit_member_type(child, out)?;
            entries += 1;
        }

        out.text(if entries == 0 { "{}" } else { " }" });
        Ok(())
    }

    fn emit_member_type(&mut self, member: NodeId, out: &mut Tokens) -> Result<()> {
        let project = self.project;
        let node = project.node(member);
        if let Some(ty) = &node.ty {
            return self.emit(ty, TypeContext::Root, out);
        }
        if let Some(&signature) = node.signatures.first() {
            return self.emit_signature(signature, out);
        }
        if let Some(ty) = node.get_signature.and_then(|g| project.node(g).ty.as_ref()) {
            return self.emit(ty, TypeContext::Root, out);
        }
        let setter_param = node
            .set_signature
            .and_then(|s| project.node(s).parameters.first().copied())
            .and_then(|p| project.node(p).ty.as_ref());
        if let Some(ty) = setter_param {
            return self.emit(ty, TypeContext::Root, out);
        }
        Err(ConvertError::MissingType {
            name: node.name.clone(),
            kind: node.kind,
        })
    }

    fn emit_unsupported(&self, ty: &TypeExpr, out: &mut Tokens) -> Result<()> {
        match self.unsupported {
            UnsupportedTypePolicy::Error => Err(ConvertError::UnsupportedType {
                variant: ty.variant_name(),
                declaration: String::new(),
            }),
            UnsupportedTypePolicy::Placeholder => {
                out.text(&format!("<unsupported: {}>", ty.variant_name()));
                Ok(())
            }
        }
    }
}

fn unresolved(reference: &ReferenceType) -> ConvertError {
    ConvertError::UnresolvedReference {
        name: reference.name.clone(),
        target: reference.target.clone(),
    }
}

/// Name of the declaration an inline shape belongs to.
fn owner_name<'p>(project: &'p Project, node: &'p Node) -> &'p str {
    node.parent
        .map(|parent| project.node(parent).name.as_str())
        .unwrap_or(node.name.as_str())
}

/// Package name from a path under `node_modules`, scoped or not.
fn package_from_path(path: &str) -> Option<String> {
    let mut parts = path.split(['/', '\\']).skip_while(|s| *s != "node_modules").skip(1);
    let first = parts.next()?;
    if first.starts_with('@') {
        let second = parts.next()?;
        Some(format!("{first}/{second}"))
    } else {
        Some(first.to_string())
    }
}

/// Double-quoted string literal with JSON escaping.
fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod render_tests;
