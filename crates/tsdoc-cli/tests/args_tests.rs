use super::*;

#[test]
fn test_defaults() {
    let args = CliArgs::try_parse_from(["tsdoc", "docs.json"]).unwrap();
    assert_eq!(args.input, PathBuf::from("docs.json"));
    assert!(args.base_dir.is_none());
    assert!(args.config.is_none());
    assert!(args.output.is_none());
    assert!(!args.preserve_literals);
    assert!(args.unsupported_types.is_none());
    assert!(!args.no_redirect);
    assert!(!args.keep_absolute_sources);
    assert!(!args.pretty);
}

#[test]
fn test_all_flags() {
    let args = CliArgs::try_parse_from([
        "tsdoc",
        "docs.json",
        "--base-dir",
        "/proj",
        "-c",
        "tsdoc.json",
        "-o",
        "ir.json",
        "--preserve-literals",
        "--unsupported-types",
        "Placeholder",
        "--no-redirect",
        "--keep-absolute-sources",
        "--pretty",
    ])
    .unwrap();
    assert_eq!(args.base_dir.as_deref(), Some("/proj"));
    assert_eq!(args.config, Some(PathBuf::from("tsdoc.json")));
    assert_eq!(args.output, Some(PathBuf::from("ir.json")));
    assert!(args.preserve_literals);
    assert_eq!(args.unsupported_types, Some(UnsupportedTypes::Placeholder));
    assert!(args.no_redirect);
    assert!(args.keep_absolute_sources);
    assert!(args.pretty);
}

#[test]
fn test_input_is_required() {
    assert!(CliArgs::try_parse_from(["tsdoc"]).is_err());
    assert!(CliArgs::try_parse_from(["tsdoc", "a.json", "--unsupported-types", "ignore"]).is_err());
}

#[test]
fn test_unsupported_types_map_to_policy() {
    assert_eq!(
        UnsupportedTypePolicy::from(UnsupportedTypes::Error),
        UnsupportedTypePolicy::Error
    );
    assert_eq!(
        UnsupportedTypePolicy::from(UnsupportedTypes::Placeholder),
        UnsupportedTypePolicy::Placeholder
    );
}
