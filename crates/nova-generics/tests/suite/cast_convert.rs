use nova_generics::{LintCategory, PrimitiveType, Type, TyContext, Warner};
use pretty_assertions::assert_eq;

use super::fixture::Jdk;

#[test]
fn downcast_to_parameterized_type_is_unchecked() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    let mut warner = Warner::default();
    assert!(cx.is_castable_with(&jdk.object(), &jdk.list(jdk.string()), &mut warner));
    assert_eq!(warner.warnings(), &[LintCategory::Unchecked]);

    let mut warner = Warner::default();
    assert!(cx.is_castable_with(&jdk.object(), &jdk.list(Type::unbounded()), &mut warner));
    assert!(warner.is_empty());

    let mut warner = Warner::default();
    assert!(cx.is_castable_with(
        &jdk.list(Type::extends(jdk.number())),
        &jdk.array_list(jdk.integer()),
        &mut warner
    ));
    assert!(warner.has_warning(LintCategory::Unchecked));
}

#[test]
fn downcast_keeping_arguments_is_checked() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    let mut warner = Warner::default();
    assert!(cx.is_castable_with(
        &jdk.list(jdk.integer()),
        &jdk.array_list(jdk.integer()),
        &mut warner
    ));
    assert!(warner.is_empty());
}

#[test]
fn casts_with_provably_distinct_arguments_are_rejected() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    assert!(!cx.is_castable(&jdk.list(jdk.integer()), &jdk.array_list(jdk.string())));
    assert!(!cx.is_castable(&jdk.list(jdk.integer()), &jdk.list(jdk.string())));
    assert!(cx.is_castable(&jdk.list(Type::extends(jdk.number())), &jdk.list(jdk.integer())));
}

#[test]
fn class_casts_follow_the_hierarchy() {
    let mut jdk = Jdk::new();
    let number = jdk.number();
    let t = jdk.type_param("T", vec![number.clone()]);
    let mut cx = TyContext::new(&jdk.store);

    assert!(cx.is_castable(&number, &jdk.integer()));
    assert!(cx.is_castable(&jdk.integer(), &number));
    assert!(!cx.is_castable(&jdk.string(), &jdk.integer()));
    assert!(!cx.is_castable(&jdk.integer(), &jdk.string()));

    let mut warner = Warner::default();
    assert!(cx.is_castable_with(&Type::TypeVar(t), &jdk.integer(), &mut warner));
    assert!(warner.is_empty());
    assert!(!cx.is_castable(&Type::TypeVar(t), &jdk.string()));
}

#[test]
fn array_casts() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let long = Type::Primitive(PrimitiveType::Long);

    assert!(cx.is_castable(&Type::array(jdk.object()), &Type::array(jdk.string())));
    assert!(!cx.is_castable(&Type::array(Type::int()), &Type::array(long)));
    assert!(cx.is_castable(&jdk.object(), &Type::array(Type::int())));
    assert!(cx.is_castable(&jdk.cloneable(), &Type::array(jdk.string())));
    assert!(!cx.is_castable(&jdk.string(), &Type::array(jdk.string())));
}

#[test]
fn boxing_in_casts_and_conversions() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let long = Type::Primitive(PrimitiveType::Long);
    let long_box = jdk.class("java.lang.Long", vec![]);

    assert!(cx.is_castable(&Type::int(), &jdk.integer()));
    assert!(cx.is_castable(&jdk.integer(), &long));
    assert!(!cx.is_castable(&jdk.string(), &Type::int()));

    assert!(cx.is_convertible(&Type::int(), &jdk.object()));
    assert!(cx.is_convertible(&Type::int(), &jdk.number()));
    assert!(!cx.is_convertible(&Type::int(), &long_box));
    assert!(cx.is_convertible(&jdk.integer(), &long));
    let boolean_box = jdk.class("java.lang.Boolean", vec![]);
    assert!(nova_generics::is_convertible(&jdk.store, &Type::boolean(), &boolean_box));
}

#[test]
fn boxing_round_trip() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    for prim in PrimitiveType::ALL {
        let boxed = cx.boxed_type(prim);
        assert_eq!(cx.unboxed_type(&boxed), Some(prim), "{}", prim.name());
        assert_eq!(cx.erasure(&boxed), boxed);
        let ty = Type::Primitive(prim);
        assert!(cx.is_convertible(&ty, &boxed), "{} boxes", prim.name());
        assert!(cx.is_convertible(&boxed, &ty), "{} unboxes", prim.name());
    }
    assert_eq!(cx.unboxed_type(&jdk.string()), None);
    assert_eq!(cx.boxed_type_or_type(&jdk.string()), jdk.string());
}

#[test]
fn constant_assignment_narrows_when_the_value_fits() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let byte = Type::Primitive(PrimitiveType::Byte);
    let short = Type::Primitive(PrimitiveType::Short);
    let character = jdk.class("java.lang.Character", vec![]);

    assert!(cx.is_assignable_constant(&Type::int(), 100, &byte));
    assert!(!cx.is_assignable_constant(&Type::int(), 200, &byte));
    assert!(!cx.is_assignable_constant(&Type::int(), 70_000, &short));
    assert!(cx.is_assignable_constant(&Type::int(), 65, &character));
    assert!(!cx.is_assignable(&Type::int(), &byte));
    let long = Type::Primitive(PrimitiveType::Long);
    assert!(cx.is_assignable_constant(&Type::int(), 1 << 40, &long));
}
