use nova_generics::{Type, TyContext};
use pretty_assertions::assert_eq;

use super::fixture::Jdk;

#[test]
fn lub_of_list_instantiations_uses_extends_wildcard() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    let lub = cx.lub(&[jdk.list(jdk.integer()), jdk.list(jdk.number())]);
    assert_eq!(cx.format_type(&lub), "List<? extends Number>");
    assert!(cx.is_same_type(&lub, &jdk.list(Type::extends(jdk.number()))));
}

#[test]
fn lub_of_related_classes_is_the_superclass() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    assert_eq!(cx.lub(&[jdk.integer(), jdk.number()]), jdk.number());
    assert_eq!(
        cx.lub(&[jdk.array_list(jdk.string()), jdk.list(jdk.string())]),
        jdk.list(jdk.string())
    );
    assert_eq!(
        nova_generics::lub(&jdk.store, &[jdk.string(), Type::Null]),
        jdk.string()
    );
}

#[test]
fn lub_of_unrelated_classes_is_an_upper_bound_of_both() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let integer = jdk.integer();
    let string = jdk.string();

    let lub = cx.lub(&[integer.clone(), string.clone()]);
    assert!(matches!(lub, Type::Intersection(_)), "{}", cx.format_type(&lub));
    assert!(cx.is_subtype(&integer, &lub));
    assert!(cx.is_subtype(&string, &lub));
}

#[test]
fn lub_of_reference_arrays_is_elementwise() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    assert_eq!(
        cx.lub(&[Type::array(jdk.integer()), Type::array(jdk.number())]),
        Type::array(jdk.number())
    );
}

#[test]
fn lub_of_primitives_is_an_error() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    assert!(cx.lub(&[Type::int(), Type::boolean()]).is_error());
}

#[test]
fn glb_of_unrelated_interfaces_is_compound() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    let glb = cx.glb(&jdk.serializable(), &jdk.cloneable());
    let Type::Intersection(parts) = &glb else {
        panic!("expected an intersection, got {}", cx.format_type(&glb));
    };
    assert_eq!(parts.len(), 2);
    assert!(parts.contains(&jdk.serializable()));
    assert!(parts.contains(&jdk.cloneable()));

    let closure = cx.closure(&glb);
    assert_eq!(closure.len(), 3);
    for expected in [jdk.serializable(), jdk.cloneable(), jdk.object()] {
        assert!(closure.contains(&expected), "missing {}", cx.format_type(&expected));
    }

    assert!(cx.is_subtype(&glb, &jdk.serializable()));
    assert!(cx.is_subtype(&glb, &jdk.cloneable()));
}

#[test]
fn glb_puts_the_class_component_first() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let runnable = jdk.raw("java.lang.Runnable");

    let glb = cx.glb(&runnable, &jdk.number());
    assert_eq!(glb, Type::Intersection(vec![jdk.number(), runnable]));
}

#[test]
fn glb_of_unrelated_classes_is_an_error() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    assert!(cx.glb(&jdk.string(), &jdk.integer()).is_error());
    assert!(nova_generics::glb(&jdk.store, &jdk.string(), &jdk.integer()).is_error());
    assert_eq!(cx.glb(&jdk.integer(), &jdk.object()), jdk.integer());
    assert_eq!(cx.glb_all(&[]), jdk.object());
}
