use nova_generics::{Type, TyContext, WildcardBound, WildcardType};
use pretty_assertions::assert_eq;

use super::fixture::Jdk;

#[test]
fn capture_replaces_wildcards_with_fresh_variables() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let ty = jdk.list(Type::extends(jdk.number()));

    let captured = cx.capture(&ty);
    let Type::Class(ct) = &captured else {
        panic!("capture of a class type is a class type");
    };
    let [Type::Captured(id)] = ct.args.as_slice() else {
        panic!("expected one capture variable, got {}", cx.format_type(&captured));
    };
    let var = cx.captured(*id).expect("capture variable").clone();
    assert_eq!(var.upper, jdk.number());
    assert_eq!(var.lower, Type::Null);

    let again = cx.capture(&ty);
    assert_ne!(again, captured);
}

#[test]
fn capture_of_super_wildcard_keeps_declared_bound_above() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    let captured = cx.capture(&jdk.list(Type::super_of(jdk.integer())));
    let Some(Type::Captured(id)) = captured.as_class().and_then(|ct| ct.args.first()) else {
        panic!("expected a capture variable");
    };
    let var = cx.captured(*id).expect("capture variable").clone();
    assert_eq!(var.upper, jdk.object());
    assert_eq!(var.lower, jdk.integer());
}

#[test]
fn types_without_wildcards_are_unchanged() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let ty = jdk.list(jdk.string());

    assert_eq!(cx.capture(&ty), ty);
    assert_eq!(cx.capture(&jdk.raw("java.util.List")), jdk.raw("java.util.List"));
    assert_eq!(cx.capture(&Type::int()), Type::int());
}

#[test]
fn capture_then_widen() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    for ty in [
        jdk.list(Type::unbounded()),
        jdk.list(Type::extends(jdk.number())),
        jdk.list(Type::super_of(jdk.integer())),
        jdk.class(
            "java.util.Map",
            vec![Type::extends(jdk.string()), Type::super_of(jdk.number())],
        ),
    ] {
        let captured = cx.capture(&ty);
        assert!(
            cx.is_subtype(&captured, &ty),
            "{} should be a subtype of {}",
            cx.format_type(&captured),
            cx.format_type(&ty)
        );
    }

    let numbers = cx.capture(&jdk.list(Type::extends(jdk.number())));
    assert!(cx.is_subtype(&numbers, &jdk.list(Type::extends(jdk.object()))));
    assert!(cx.is_subtype(&numbers, &jdk.list(Type::unbounded())));
    assert!(!cx.is_subtype(&numbers, &jdk.list(Type::extends(jdk.integer()))));

    let sinks = cx.capture(&jdk.list(Type::super_of(jdk.integer())));
    assert!(cx.is_subtype(&sinks, &jdk.list(Type::super_of(jdk.integer()))));
    assert!(!cx.is_subtype(&sinks, &jdk.list(Type::super_of(jdk.number()))));
}

#[test]
fn captured_element_reads_as_its_upper_bound() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    let captured = cx.capture(&jdk.list(Type::extends(jdk.number())));
    let Some(elem) = captured.as_class().and_then(|ct| ct.args.first()).cloned() else {
        panic!("expected a type argument");
    };
    assert!(cx.is_subtype(&elem, &jdk.number()));
    assert!(!cx.is_subtype(&jdk.integer(), &elem));
    let wildcard = WildcardType::new(WildcardBound::Extends(Box::new(jdk.number())));
    assert!(cx.is_capture_of(&elem, &wildcard));
}
