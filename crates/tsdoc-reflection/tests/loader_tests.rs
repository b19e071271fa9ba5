use super::*;
use serde_json::json;

#[derive(Default)]
struct Recorder {
    seen: Vec<(NodeId, String)>,
}

impl ReferenceListener for Recorder {
    fn on_reference(&mut self, container: NodeId, reference: &ReferenceType) {
        self.seen.push((container, reference.name.clone()));
    }
}

fn var(name: &str, ty: serde_json::Value) -> serde_json::Value {
    json!({
        "id": 100,
        "name": name,
        "kindString": "Variable",
        "sources": [{"fileName": "src/index.ts", "line": 3}],
        "type": ty
    })
}

#[test]
fn test_load_builds_parent_links() {
    let project = Loader::new()
        .load_value(json!({
            "id": 0,
            "name": "proj",
            "kindString": "Project",
            "children": [{
                "id": 1,
                "name": "index",
                "kindString": "Module",
                "children": [{
                    "id": 2,
                    "name": "add",
                    "kindString": "Function",
                    "signatures": [{
                        "id": 3,
                        "name": "add",
                        "kindString": "Call signature",
                        "parameters": [{
                            "id": 4,
                            "name": "a",
                            "kindString": "Parameter",
                            "type": {"type": "intrinsic", "name": "number"}
                        }],
                        "type": {"type": "intrinsic", "name": "number"}
                    }]
                }]
            }]
        }))
        .unwrap();

    assert_eq!(project.root_node().kind, ReflectionKind::Project);
    assert_eq!(project.arena.len(), 5);

    let module = project.arena.by_reflection(ReflectionId(1)).unwrap();
    let func = project.arena.by_reflection(ReflectionId(2)).unwrap();
    let sig = project.arena.by_reflection(ReflectionId(3)).unwrap();
    let param = project.arena.by_reflection(ReflectionId(4)).unwrap();

    assert_eq!(project.node(module).parent, Some(project.root));
    assert_eq!(project.node(func).parent, Some(module));
    assert_eq!(project.node(func).signatures, vec![sig]);
    assert_eq!(project.node(sig).parameters, vec![param]);
    assert_eq!(project.node(param).ty, Some(TypeExpr::intrinsic("number")));
}

#[test]
fn test_numeric_kinds() {
    let project = Loader::new()
        .load_value(json!({
            "id": 0,
            "name": "proj",
            "kind": 1,
            "children": [{"id": 1, "name": "Shape", "kind": 256}]
        }))
        .unwrap();
    let shape = project.arena.by_reflection(ReflectionId(1)).unwrap();
    assert_eq!(project.node(shape).kind, ReflectionKind::Interface);
}

#[test]
fn test_unknown_kind_is_an_error() {
    let err = Loader::new()
        .load_value(json!({
            "name": "proj",
            "kindString": "Project",
            "children": [{"id": 1, "name": "weird", "kindString": "Widget"}]
        }))
        .unwrap_err();
    assert!(matches!(err, LoadError::UnknownKind { ref name, .. } if name == "weird"));

    let err = Loader::new()
        .load_value(json!({
            "name": "proj",
            "children": [{"id": 1, "name": "weird", "kind": 3}]
        }))
        .unwrap_err();
    assert!(matches!(err, LoadError::UnknownKind { ref kind, .. } if kind == "3"));
}

#[test]
fn test_missing_kind_below_root_is_an_error() {
    let err = Loader::new()
        .load_value(json!({"name": "proj", "children": [{"id": 1, "name": "x"}]}))
        .unwrap_err();
    assert!(matches!(err, LoadError::MissingKind { ref name } if name == "x"));
}

#[test]
fn test_unknown_type_tag_is_a_json_error() {
    let err = Loader::new()
        .load_str(
            r#"{"name": "proj", "children": [
                {"id": 1, "name": "x", "kindString": "Variable", "type": {"type": "spline"}}
            ]}"#,
        )
        .unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[test]
fn test_listener_sees_innermost_container() {
    let mut recorder = Recorder::default();
    let mut loader = Loader::new();
    loader.subscribe(&mut recorder);
    let project = loader
        .load_value(json!({
            "name": "proj",
            "kindString": "Project",
            "children": [
                {
                    "id": 1,
                    "name": "index",
                    "kindString": "Module",
                    "children": [
                        {
                            "id": 2,
                            "name": "NS",
                            "kindString": "Namespace",
                            "children": [var("x", json!({"type": "reference", "name": "Foo", "target": 7}))]
                        },
                        var("y", json!({
                            "type": "array",
                            "elementType": {"type": "reference", "name": "Bar", "target": 8}
                        }))
                    ]
                },
                var("z", json!({"type": "reference", "name": "Baz"}))
            ]
        }))
        .unwrap();

    let module = project.arena.by_reflection(ReflectionId(1)).unwrap();
    let namespace = project.arena.by_reflection(ReflectionId(2)).unwrap();
    assert_eq!(
        recorder.seen,
        vec![
            (namespace, "Foo".to_string()),
            (module, "Bar".to_string()),
            (project.root, "Baz".to_string()),
        ]
    );
}

#[test]
fn test_reference_targets() {
    let project = Loader::new()
        .load_value(json!({
            "name": "proj",
            "children": [
                var("a", json!({"type": "reference", "name": "A", "target": 5})),
                var("b", json!({"type": "reference", "name": "B", "id": 6})),
                var("c", json!({
                    "type": "reference",
                    "name": "Readable",
                    "package": "@types/node",
                    "target": {
                        "sourceFileName": "node_modules/@types/node/stream.d.ts",
                        "qualifiedName": "internal.Readable"
                    }
                })),
                var("d", json!({"type": "reference", "name": "Gone", "target": -1})),
                var("e", json!({"type": "typeParameter", "name": "T"}))
            ]
        }))
        .unwrap();

    let types: Vec<&TypeExpr> = project
        .root_node()
        .children
        .iter()
        .map(|&id| project.node(id).ty.as_ref().unwrap())
        .collect();

    let targets: Vec<&ReferenceTarget> = types
        .iter()
        .map(|t| &t.as_reference().unwrap().target)
        .collect();
    assert_eq!(targets[0], &ReferenceTarget::Reflection(ReflectionId(5)));
    assert_eq!(targets[1], &ReferenceTarget::Reflection(ReflectionId(6)));
    match targets[2] {
        ReferenceTarget::Symbol(sym) => {
            assert!(sym.is_dependency());
            assert_eq!(sym.qualified_name, "internal.Readable");
        }
        other => panic!("expected symbol target, got {other}"),
    }
    assert_eq!(targets[3], &ReferenceTarget::Unresolved);
    assert!(types[4].as_reference().unwrap().refers_to_type_parameter);
}

#[test]
fn test_literal_values() {
    let project = Loader::new()
        .load_value(json!({
            "name": "proj",
            "children": [
                var("a", json!({"type": "literal", "value": null})),
                var("b", json!({"type": "literal", "value": 42})),
                var("c", json!({"type": "literal", "value": "hi"})),
                var("d", json!({"type": "literal", "value": true})),
                var("e", json!({"type": "literal", "value": {"negative": true, "value": "12"}})),
                var("f", json!({"type": "stringLiteral", "value": "old"}))
            ]
        }))
        .unwrap();

    let literals: Vec<TypeExpr> = project
        .root_node()
        .children
        .iter()
        .map(|&id| project.node(id).ty.clone().unwrap())
        .collect();
    assert_eq!(
        literals,
        vec![
            TypeExpr::Literal(LiteralValue::Null),
            TypeExpr::Literal(LiteralValue::Number("42".into())),
            TypeExpr::Literal(LiteralValue::String("hi".into())),
            TypeExpr::Literal(LiteralValue::Boolean(true)),
            TypeExpr::Literal(LiteralValue::BigInt {
                negative: true,
                value: "12".into()
            }),
            TypeExpr::Literal(LiteralValue::String("old".into())),
        ]
    );
}

#[test]
fn test_inline_declaration_is_parented_to_owner() {
    let project = Loader::new()
        .load_value(json!({
            "name": "proj",
            "children": [{
                "id": 1,
                "name": "opts",
                "kindString": "Variable",
                "type": {
                    "type": "reflection",
                    "declaration": {
                        "id": 2,
                        "name": "__type",
                        "kindString": "Type literal",
                        "indexSignature": [{
                            "id": 3,
                            "name": "__index",
                            "kindString": "Index signature"
                        }]
                    }
                }
            }]
        }))
        .unwrap();

    let owner = project.arena.by_reflection(ReflectionId(1)).unwrap();
    let literal = project.arena.by_reflection(ReflectionId(2)).unwrap();
    let index = project.arena.by_reflection(ReflectionId(3)).unwrap();
    assert_eq!(project.node(owner).ty.as_ref().unwrap().as_reflection(), Some(literal));
    assert_eq!(project.node(literal).parent, Some(owner));
    assert_eq!(project.node(literal).index_signature, Some(index));
}

#[test]
fn test_symbol_table_becomes_program() {
    let project = Loader::new()
        .load_value(json!({
            "name": "proj",
            "kindString": "Project",
            "children": [{"id": 1, "name": "index", "kindString": "Module"}],
            "symbols": [{
                "id": 9,
                "name": "Secret",
                "kindString": "Type alias",
                "fileName": "src/index.ts",
                "pos": 120,
                "type": {"type": "intrinsic", "name": "string"}
            }]
        }))
        .unwrap();

    let module = project.arena.by_reflection(ReflectionId(1)).unwrap();
    let program = project.program_for(module).unwrap();
    assert_eq!(program.len(), 1);

    let by_id = program.by_id(ReflectionId(9)).unwrap();
    assert!(by_id.is_type_alias());
    assert_eq!(by_id.qualified_name, "Secret");
    assert_eq!(by_id.ty.as_deref(), Some(&TypeExpr::intrinsic("string")));

    let by_pos = program
        .by_location(&SymbolLocation {
            source_file_name: "src/index.ts".into(),
            qualified_name: "ignored".into(),
            pos: Some(120),
        })
        .unwrap();
    assert_eq!(by_pos.name, "Secret");

    let by_name = program
        .by_location(&SymbolLocation {
            source_file_name: "src/index.ts".into(),
            qualified_name: "Secret".into(),
            pos: None,
        })
        .unwrap();
    assert_eq!(by_name.id, Some(ReflectionId(9)));

    assert!(project.program_for(project.root).is_some());
}

#[test]
fn test_program_only_for_containers() {
    let project = Loader::new()
        .load_value(json!({
            "name": "proj",
            "children": [{"id": 1, "name": "Shape", "kindString": "Class"}],
            "symbols": [{"name": "Hidden", "kind": 2097152, "fileName": "a.ts"}]
        }))
        .unwrap();
    let class = project.arena.by_reflection(ReflectionId(1)).unwrap();
    assert!(project.program_for(class).is_none());
    assert!(project.program_for(project.root).is_some());
}

#[test]
fn test_no_symbol_table_means_no_program() {
    let project = Loader::new()
        .load_value(json!({"name": "proj", "children": []}))
        .unwrap();
    assert!(project.program.is_none());
    assert!(project.program_for(project.root).is_none());
}

#[test]
fn test_symbol_types_expose_their_references() {
    let project = Loader::new()
        .load_value(json!({
            "name": "proj",
            "kindString": "Project",
            "children": [{"id": 1, "name": "index", "kindString": "Module"}],
            "symbols": [{
                "name": "Outer",
                "kindString": "Type alias",
                "fileName": "src/index.ts",
                "pos": 40,
                "type": {
                    "type": "union",
                    "types": [
                        {
                            "type": "reference",
                            "name": "Inner",
                            "target": {"sourceFileName": "src/index.ts", "qualifiedName": "Inner", "pos": 80}
                        },
                        {
                            "type": "array",
                            "elementType": {"type": "reference", "name": "Other", "target": 5}
                        }
                    ]
                }
            }]
        }))
        .unwrap();

    let program = project.program_for(project.root).unwrap();
    let outer = program
        .by_location(&SymbolLocation {
            source_file_name: "src/index.ts".into(),
            qualified_name: "Outer".into(),
            pos: Some(40),
        })
        .unwrap();
    let ty = outer.ty.as_deref().unwrap();
    let names: Vec<&str> = ty.references().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Inner", "Other"]);
    assert_eq!(ty.references()[1].target, ReferenceTarget::Reflection(ReflectionId(5)));
}
