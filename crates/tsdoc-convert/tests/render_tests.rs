use super::*;
use crate::paths::assign_paths;
use crate::test_fixtures::*;
use serde_json::{Value, json};
use tsdoc_ir::{Pathname, display};
use tsdoc_reflection::{ReflectionId, SymbolLocation};

/// Render the type of declaration `rid`.
fn render_decl(
    value: Value,
    rid: i64,
    redirects: &RedirectTable,
    options: &ConvertOptions,
) -> Result<RenderedType> {
    let project = load(value);
    let paths = assign_paths(&project, "");
    let mut renderer = TypeRenderer::new(&project, &paths, redirects, options);
    let ty = project.node(node_id(&project, rid)).ty.clone().unwrap();
    renderer.render(&ty)
}

fn render_with(ty: Value, options: &ConvertOptions) -> Result<RenderedType> {
    render_decl(
        project(vec![var(1, "x", ty)]),
        1,
        &RedirectTable::new(),
        options,
    )
}

fn render_text(ty: Value) -> String {
    display(&render_with(ty, &ConvertOptions::default()).unwrap())
}

fn union(types: Vec<Value>) -> Value {
    json!({"type": "union", "types": types})
}

fn array(element: Value) -> Value {
    json!({"type": "array", "elementType": element})
}

fn symbol_reference(name: &str, file: &str) -> Value {
    json!({
        "type": "reference",
        "name": name,
        "target": {"sourceFileName": file, "qualifiedName": name}
    })
}

fn symbol_target(name: &str, file: &str) -> ReferenceTarget {
    ReferenceTarget::Symbol(SymbolLocation {
        source_file_name: file.to_string(),
        qualified_name: name.to_string(),
        pos: None,
    })
}

#[test]
fn test_intrinsic_is_a_single_xref() {
    let tokens = render_with(intrinsic("string"), &ConvertOptions::default()).unwrap();
    assert_eq!(tokens, vec![TypeToken::XRef(TypeXRef::intrinsic("string"))]);
}

#[test]
fn test_union_members_are_joined() {
    assert_eq!(
        render_text(union(vec![intrinsic("string"), intrinsic("number")])),
        "string | number"
    );
}

#[test]
fn test_union_in_array_is_parenthesized() {
    let tokens = render_with(
        array(union(vec![intrinsic("string"), intrinsic("number")])),
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(
        tokens,
        vec![
            TypeToken::text("("),
            TypeToken::XRef(TypeXRef::intrinsic("string")),
            TypeToken::text(" | "),
            TypeToken::XRef(TypeXRef::intrinsic("number")),
            TypeToken::text(")[]"),
        ]
    );
}

#[test]
fn test_function_in_array_is_parenthesized() {
    assert_eq!(
        render_text(array(function_type(2, vec![], intrinsic("void")))),
        "(() => void)[]"
    );
    assert_eq!(
        render_text(union(vec![
            function_type(2, vec![], intrinsic("void")),
            intrinsic("undefined"),
        ])),
        "(() => void) | undefined"
    );
}

#[test]
fn test_union_in_intersection_is_parenthesized() {
    let ty = json!({
        "type": "intersection",
        "types": [union(vec![intrinsic("string"), intrinsic("number")]), intrinsic("object")]
    });
    assert_eq!(render_text(ty), "(string | number) & object");
}

#[test]
fn test_type_operator_in_array_is_parenthesized() {
    let keyof = json!({"type": "typeOperator", "operator": "keyof", "target": type_param_ref("T")});
    assert_eq!(render_text(keyof.clone()), "keyof T");
    assert_eq!(render_text(array(keyof)), "(keyof T)[]");
}

#[test]
fn test_tuples() {
    let named = json!({
        "type": "tuple",
        "elements": [
            {"type": "namedTupleMember", "name": "a", "isOptional": false, "element": intrinsic("string")},
            {"type": "namedTupleMember", "name": "b", "isOptional": true, "element": intrinsic("number")}
        ]
    });
    assert_eq!(render_text(named), "[a: string, b?: number]");

    let optional = json!({
        "type": "tuple",
        "elements": [intrinsic("string"), {"type": "optional", "elementType": intrinsic("number")}]
    });
    assert_eq!(render_text(optional), "[string, number?]");
}

#[test]
fn test_literals_widen_by_default() {
    let tokens = render_with(
        json!({"type": "literal", "value": 42}),
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(tokens, vec![TypeToken::XRef(TypeXRef::intrinsic("number"))]);
    assert_eq!(
        render_text(json!({"type": "literal", "value": null})),
        "null"
    );
    assert_eq!(
        render_text(json!({"type": "literal", "value": "hi"})),
        "\"hi\""
    );
}

#[test]
fn test_literals_preserved_on_request() {
    let options = ConvertOptions {
        literal_policy: LiteralPolicy::Preserve,
        ..ConvertOptions::default()
    };
    let text = |ty: Value| display(&render_with(ty, &options).unwrap());
    assert_eq!(text(json!({"type": "literal", "value": 42})), "42");
    assert_eq!(text(json!({"type": "literal", "value": true})), "true");
    assert_eq!(
        text(json!({"type": "literal", "value": {"negative": true, "value": "12"}})),
        "-12n"
    );
}

#[test]
fn test_internal_reference_carries_path() {
    let value = project(vec![
        var(1, "x", reference("Shape", 2)),
        decl(2, "Interface", "Shape"),
    ]);
    let tokens = render_decl(value, 1, &RedirectTable::new(), &ConvertOptions::default()).unwrap();
    let path = Pathname::new(
        ["./", "src/", "index.", "Shape"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    assert_eq!(tokens, vec![TypeToken::XRef(TypeXRef::internal("Shape", path))]);
}

#[test]
fn test_external_reference_with_type_arguments() {
    let tokens = render_with(
        lib_reference("Promise", vec![intrinsic("string")]),
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(
        tokens,
        vec![
            TypeToken::XRef(TypeXRef::External {
                name: "Promise".into(),
                package: "typescript".into(),
                qualified_name: "Promise".into(),
                sourcefilename: "node_modules/typescript/lib/lib.es5.d.ts".into(),
            }),
            TypeToken::text("<"),
            TypeToken::XRef(TypeXRef::intrinsic("string")),
            TypeToken::text(">"),
        ]
    );
}

#[test]
fn test_external_package_from_scoped_path() {
    let tokens = render_with(
        symbol_reference("Widget", "node_modules/@acme/ui/dist/index.d.ts"),
        &ConvertOptions::default(),
    )
    .unwrap();
    match &tokens[..] {
        [TypeToken::XRef(TypeXRef::External { package, .. })] => assert_eq!(package, "@acme/ui"),
        other => panic!("unexpected tokens {other:?}"),
    }
}

#[test]
fn test_type_parameter_is_plain_text() {
    let tokens = render_with(type_param_ref("T"), &ConvertOptions::default()).unwrap();
    assert_eq!(tokens, vec![TypeToken::text("T")]);
}

#[test]
fn test_unresolved_references_fail() {
    let err = render_with(
        symbol_reference("Local", "src/other.ts"),
        &ConvertOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::UnresolvedReference { ref name, .. } if name == "Local"));

    let err = render_with(reference("Gone", 99), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::UnresolvedReference {
            target: ReferenceTarget::Reflection(ReflectionId(99)),
            ..
        }
    ));

    let err = render_with(reference("Nothing", -1), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::UnresolvedReference {
            target: ReferenceTarget::Unresolved,
            ..
        }
    ));
}

#[test]
fn test_reference_without_path_fails() {
    let project = load(project(vec![
        var(1, "x", reference("Shape", 2)),
        decl(2, "Interface", "Shape"),
    ]));
    let paths = PathMap::default();
    let redirects = RedirectTable::new();
    let options = ConvertOptions::default();
    let mut renderer = TypeRenderer::new(&project, &paths, &redirects, &options);
    let ty = project.node(node_id(&project, 1)).ty.clone().unwrap();
    let err = renderer.render(&ty).unwrap_err();
    assert!(matches!(err, ConvertError::MissingPath { ref name, .. } if name == "Shape"));
}

#[test]
fn test_object_shapes() {
    let optional_b = with(
        property(4, "b", intrinsic("number")),
        "flags",
        json!({"isOptional": true}),
    );
    let shape = object(2, vec![property(3, "a", intrinsic("string")), optional_b]);
    assert_eq!(render_text(shape), "{ a: string; b?: number }");
    assert_eq!(render_text(object(2, vec![])), "{}");
}

fn indexed_object(params: Vec<Value>) -> Value {
    json!({
        "type": "reflection",
        "declaration": {
            "id": 2,
            "name": "__type",
            "kindString": "Type literal",
            "indexSignature": {
                "id": 3,
                "name": "__index",
                "kindString": "Index signature",
                "parameters": params,
                "type": intrinsic("number")
            }
        }
    })
}

#[test]
fn test_index_signature() {
    let shape = indexed_object(vec![param(4, "key", intrinsic("string"))]);
    assert_eq!(render_text(shape), "{ [key: string]: number }");
}

#[test]
fn test_malformed_index_signature() {
    let shape = indexed_object(vec![
        param(4, "a", intrinsic("string")),
        param(5, "b", intrinsic("string")),
    ]);
    let err = render_with(shape, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MalformedIndexSignature { ref name, arity: 2 } if name == "x"
    ));
}

#[test]
fn test_function_shape() {
    let shape = json!({
        "type": "reflection",
        "declaration": {
            "id": 2,
            "name": "__type",
            "kindString": "Type literal",
            "signatures": [{
                "id": 3,
                "name": "__type",
                "kindString": "Call signature",
                "typeParameter": [{"id": 4, "name": "T", "kindString": "Type parameter"}],
                "parameters": [
                    param(5, "a", type_param_ref("T")),
                    with(param(6, "b", intrinsic("string")), "flags", json!({"isOptional": true})),
                    with(param(7, "rest", array(intrinsic("number"))), "flags", json!({"isRest": true}))
                ],
                "type": intrinsic("boolean")
            }]
        }
    });
    assert_eq!(
        render_text(shape),
        "<T>(a: T, b?: string, ...rest: number[]) => boolean"
    );
}

#[test]
fn test_constructor_shape() {
    let shape = json!({
        "type": "reflection",
        "declaration": {
            "id": 2,
            "name": "__type",
            "kindString": "Type literal",
            "signatures": [{
                "id": 3,
                "name": "__type",
                "kindString": "Constructor signature",
                "type": reference("Circle", 5)
            }]
        }
    });
    let value = project(vec![var(1, "x", shape), decl(5, "Class", "Circle")]);
    let tokens = render_decl(value, 1, &RedirectTable::new(), &ConvertOptions::default()).unwrap();
    assert_eq!(display(&tokens), "new () => Circle");
}

#[test]
fn test_predicates() {
    let guard = json!({"type": "predicate", "name": "x", "asserts": false, "targetType": intrinsic("string")});
    let tokens = render_with(guard, &ConvertOptions::default()).unwrap();
    assert_eq!(tokens[0], TypeToken::XRef(TypeXRef::intrinsic("boolean")));
    assert_eq!(display(&tokens), "boolean (typeguard for string)");

    let assertion = json!({"type": "predicate", "name": "x", "asserts": true, "targetType": intrinsic("string")});
    assert_eq!(render_text(assertion), "void (assertion for string)");
}

#[test]
fn test_type_query() {
    let query = json!({"type": "query", "queryType": reference("x", 1)});
    assert_eq!(render_text(query), "typeof x");
}

#[test]
fn test_unsupported_types() {
    let err = render_with(json!({"type": "conditional"}), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::UnsupportedType {
            variant: "conditional",
            ..
        }
    ));

    let options = ConvertOptions {
        unsupported_types: UnsupportedTypePolicy::Placeholder,
        ..ConvertOptions::default()
    };
    let tokens = render_with(json!({"type": "conditional"}), &options).unwrap();
    assert_eq!(display(&tokens), "<unsupported: conditional>");
}

#[test]
fn test_unknown_type_is_text() {
    assert_eq!(
        render_text(json!({"type": "unknown", "name": "Weird<T>"})),
        "Weird<T>"
    );
}

#[test]
fn test_redirect_expands_in_place() {
    let mut redirects = RedirectTable::new();
    let pair = TypeExpr::Union(vec![TypeExpr::intrinsic("string"), TypeExpr::intrinsic("number")]);
    redirects.insert("src/private.ts", "Pair", None, None, Arc::new(pair));

    let value = project(vec![var(1, "x", array(symbol_reference("Pair", "src/private.ts")))]);
    let tokens = render_decl(value, 1, &redirects, &ConvertOptions::default()).unwrap();
    assert_eq!(display(&tokens), "(string | number)[]");
    assert!(tokens.iter().all(|t| t.display_name() != "Pair"));
}

#[test]
fn test_self_referencing_redirect_is_an_error() {
    let mut redirects = RedirectTable::new();
    let looped = TypeExpr::Reference(ReferenceType {
        name: "Loop".into(),
        target: symbol_target("Loop", "src/private.ts"),
        package: None,
        refers_to_type_parameter: false,
        type_arguments: Vec::new(),
    });
    redirects.insert("src/private.ts", "Loop", None, None, Arc::new(looped));

    let value = project(vec![var(1, "x", symbol_reference("Loop", "src/private.ts"))]);
    let err = render_decl(value, 1, &redirects, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::CircularRedirect { ref name } if name == "Loop"));
}
