use nova_generics::{PrimitiveType, Type, TyContext};
use proptest::prelude::*;

use super::fixture::Jdk;

const PROPTEST_CASES: u32 = 128;

/// Type skeletons drawn from the minimal JDK; built into real types by [`build`].
#[derive(Clone, Debug)]
enum Shape {
    Object,
    String,
    Integer,
    Number,
    Serializable,
    Int,
    RawList,
    List(Box<Shape>),
    ExtendsList(Box<Shape>),
    SuperList(Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Array(Box<Shape>),
}

fn arb_leaf() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Object),
        Just(Shape::String),
        Just(Shape::Integer),
        Just(Shape::Number),
        Just(Shape::Serializable),
        Just(Shape::Int),
        Just(Shape::RawList),
    ]
}

/// Shapes whose types carry no wildcard arguments.
fn arb_concrete_shape() -> impl Strategy<Value = Shape> {
    arb_leaf().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::List(Box::new(s))),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Shape::Map(Box::new(k), Box::new(v))),
            inner.prop_map(|s| Shape::Array(Box::new(s))),
        ]
    })
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    arb_leaf().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::List(Box::new(s))),
            inner.clone().prop_map(|s| Shape::ExtendsList(Box::new(s))),
            inner.clone().prop_map(|s| Shape::SuperList(Box::new(s))),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Shape::Map(Box::new(k), Box::new(v))),
            inner.prop_map(|s| Shape::Array(Box::new(s))),
        ]
    })
}

fn build(jdk: &Jdk, shape: &Shape) -> Type {
    match shape {
        Shape::Object => jdk.object(),
        Shape::String => jdk.string(),
        Shape::Integer => jdk.integer(),
        Shape::Number => jdk.number(),
        Shape::Serializable => jdk.serializable(),
        Shape::Int => Type::int(),
        Shape::RawList => jdk.raw("java.util.List"),
        Shape::List(arg) => jdk.list(build_arg(jdk, arg)),
        Shape::ExtendsList(arg) => jdk.list(Type::extends(build_arg(jdk, arg))),
        Shape::SuperList(arg) => jdk.list(Type::super_of(build_arg(jdk, arg))),
        Shape::Map(k, v) => jdk.class("java.util.Map", vec![build_arg(jdk, k), build_arg(jdk, v)]),
        Shape::Array(elem) => Type::array(build(jdk, elem)),
    }
}

/// Type arguments must be references.
fn build_arg(jdk: &Jdk, shape: &Shape) -> Type {
    match build(jdk, shape) {
        Type::Primitive(_) => jdk.integer(),
        other => other,
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: PROPTEST_CASES, .. ProptestConfig::default() })]

    #[test]
    fn subtyping_is_reflexive(shape in arb_shape()) {
        let jdk = Jdk::new();
        let mut cx = TyContext::new(&jdk.store);
        let ty = build(&jdk, &shape);

        prop_assert!(cx.is_subtype(&ty, &ty));
        prop_assert!(cx.is_same_type(&ty, &ty));
        prop_assert!(cx.is_assignable(&ty, &ty));
        prop_assert!(cx.is_castable(&ty, &ty));
    }

    #[test]
    fn erasure_is_idempotent(shape in arb_shape()) {
        let jdk = Jdk::new();
        let cx = TyContext::new(&jdk.store);
        let ty = build(&jdk, &shape);

        let once = cx.erasure(&ty);
        prop_assert_eq!(cx.erasure(&once), once);
    }

    #[test]
    fn capture_then_widen(shape in arb_shape()) {
        let jdk = Jdk::new();
        let mut cx = TyContext::new(&jdk.store);
        let ty = build(&jdk, &shape);

        let captured = cx.capture(&ty);
        prop_assert!(
            cx.is_subtype(&captured, &ty),
            "{} is not a subtype of {}",
            cx.format_type(&captured),
            cx.format_type(&ty)
        );
    }

    #[test]
    fn subtyping_is_antisymmetric(a in arb_concrete_shape(), b in arb_concrete_shape()) {
        let jdk = Jdk::new();
        let mut cx = TyContext::new(&jdk.store);
        let (a, b) = (build(&jdk, &a), build(&jdk, &b));

        if cx.is_subtype(&a, &b) && cx.is_subtype(&b, &a) {
            prop_assert!(cx.is_same_type(&a, &b));
        }
    }

    #[test]
    fn subtyping_is_transitive(
        a in arb_concrete_shape(),
        b in arb_concrete_shape(),
        c in arb_concrete_shape(),
    ) {
        let jdk = Jdk::new();
        let mut cx = TyContext::new(&jdk.store);
        let (a, b, c) = (build(&jdk, &a), build(&jdk, &b), build(&jdk, &c));

        if cx.is_subtype(&a, &b) && cx.is_subtype(&b, &c) {
            prop_assert!(cx.is_subtype(&a, &c));
        }
    }

    #[test]
    fn boxing_round_trips(prim in prop::sample::select(PrimitiveType::ALL.to_vec())) {
        let jdk = Jdk::new();
        let mut cx = TyContext::new(&jdk.store);
        let ty = Type::Primitive(prim);

        let boxed = cx.boxed_type(prim);
        prop_assert_eq!(cx.erasure(&boxed), boxed.clone());
        prop_assert_eq!(cx.unboxed_type(&boxed), Some(prim));
        prop_assert!(cx.is_convertible(&ty, &boxed));
        prop_assert!(cx.is_convertible(&boxed, &ty));
    }
}
