use super::*;

#[test]
fn test_kind_string_parsing() {
    assert_eq!(
        ReflectionKind::from_kind_string("Class"),
        Some(ReflectionKind::Class)
    );
    assert_eq!(
        ReflectionKind::from_kind_string("Call signature"),
        Some(ReflectionKind::CallSignature)
    );
    assert_eq!(
        ReflectionKind::from_kind_string("External module"),
        Some(ReflectionKind::Module)
    );
    assert_eq!(ReflectionKind::from_kind_string("Widget"), None);
}

#[test]
fn test_kind_bits_parsing() {
    assert_eq!(ReflectionKind::from_bits(0x1), Some(ReflectionKind::Project));
    assert_eq!(ReflectionKind::from_bits(0x80), Some(ReflectionKind::Class));
    assert_eq!(
        ReflectionKind::from_bits(0x200000),
        Some(ReflectionKind::TypeAlias)
    );
    // Combined masks are not kinds.
    assert_eq!(ReflectionKind::from_bits(0x3), None);
    assert_eq!(ReflectionKind::from_bits(0), None);
}

#[test]
fn test_kind_string_round_trips_through_as_str() {
    for kind in ReflectionKind::ALL {
        assert_eq!(ReflectionKind::from_kind_string(kind.as_str()), Some(kind));
        assert_eq!(ReflectionKind::from_bits(kind as u32), Some(kind));
    }
}

#[test]
fn test_signature_and_container_kinds() {
    assert!(ReflectionKind::GetSignature.is_signature());
    assert!(ReflectionKind::IndexSignature.is_signature());
    assert!(!ReflectionKind::Method.is_signature());

    assert!(ReflectionKind::Namespace.is_container());
    assert!(ReflectionKind::Project.is_container());
    assert!(!ReflectionKind::Class.is_container());
}

#[test]
fn test_modifier_flags_accessors() {
    let flags = ModifierFlags::STATIC | ModifierFlags::OPTIONAL;
    assert!(flags.is_static());
    assert!(flags.is_optional());
    assert!(!flags.is_private());
    assert!(!flags.is_abstract());
    assert!(!flags.is_rest());
    assert_eq!(ModifierFlags::default(), ModifierFlags::empty());
}

#[test]
fn test_display_uses_typedoc_names() {
    assert_eq!(ReflectionKind::EnumMember.to_string(), "Enumeration Member");
    assert_eq!(ReflectionKind::TypeLiteral.to_string(), "Type literal");
}
