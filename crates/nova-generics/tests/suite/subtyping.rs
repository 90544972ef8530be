use nova_generics::{
    ClassDef, LintCategory, PrimitiveType, RelationOptions, Type, TyContext, TypeEnv, Warner,
};
use pretty_assertions::assert_eq;

use super::fixture::Jdk;

#[test]
fn generic_class_subtyping_requires_equal_arguments() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    assert!(cx.is_subtype(&jdk.list(jdk.string()), &jdk.list(jdk.string())));
    assert!(cx.is_subtype(&jdk.array_list(jdk.string()), &jdk.list(jdk.string())));
    assert!(cx.is_subtype(
        &jdk.array_list(jdk.string()),
        &jdk.class("java.util.Collection", vec![jdk.string()])
    ));
    assert!(!cx.is_subtype(&jdk.array_list(jdk.string()), &jdk.list(jdk.object())));
    assert!(!cx.is_subtype(&jdk.list(jdk.integer()), &jdk.list(jdk.number())));
    assert!(!cx.is_subtype(&jdk.list(jdk.string()), &jdk.array_list(jdk.string())));
}

#[test]
fn extends_wildcards_accept_subtypes() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let list_extends_number = jdk.list(Type::extends(jdk.number()));

    assert!(cx.is_subtype(&jdk.list(jdk.integer()), &list_extends_number));
    assert!(cx.is_subtype(&jdk.list(jdk.number()), &list_extends_number));
    assert!(cx.is_subtype(
        &jdk.list(Type::extends(jdk.integer())),
        &list_extends_number
    ));
    assert!(!cx.is_subtype(&jdk.list(jdk.string()), &list_extends_number));
    assert!(!cx.is_subtype(&list_extends_number, &jdk.list(jdk.number())));
    assert!(cx.is_subtype(&list_extends_number, &jdk.list(Type::unbounded())));
}

#[test]
fn super_wildcards_accept_supertypes() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let list_super_integer = jdk.list(Type::super_of(jdk.integer()));

    assert!(cx.is_subtype(&jdk.list(jdk.object()), &list_super_integer));
    assert!(cx.is_subtype(&jdk.list(jdk.number()), &list_super_integer));
    assert!(cx.is_subtype(&jdk.list(jdk.integer()), &list_super_integer));
    assert!(!cx.is_subtype(&jdk.list(jdk.string()), &list_super_integer));

    let list_super_object = jdk.list(Type::super_of(jdk.object()));
    assert!(cx.is_subtype(&jdk.list(jdk.object()), &list_super_object));
    assert!(!cx.is_subtype(&jdk.list(jdk.number()), &list_super_object));
}

#[test]
fn arrays_are_covariant_for_references_only() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let int_array = Type::array(Type::int());

    assert!(cx.is_subtype(&Type::array(jdk.string()), &Type::array(jdk.object())));
    assert!(cx.is_subtype(&Type::array(jdk.integer()), &Type::array(jdk.number())));
    assert!(!cx.is_subtype(&Type::array(jdk.object()), &Type::array(jdk.string())));
    assert!(!cx.is_subtype(
        &int_array,
        &Type::array(Type::Primitive(PrimitiveType::Long))
    ));
    assert!(cx.is_subtype(&int_array, &jdk.object()));
    assert!(cx.is_subtype(&int_array, &jdk.cloneable()));
    assert!(cx.is_subtype(&int_array, &jdk.serializable()));
    assert!(!cx.is_subtype(&int_array, &jdk.string()));
}

#[test]
fn primitives_null_and_error() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let long = Type::Primitive(PrimitiveType::Long);

    assert!(cx.is_subtype(&Type::int(), &long));
    assert!(!cx.is_subtype(&long, &Type::int()));
    assert!(!cx.is_subtype(&Type::int(), &jdk.integer()));
    assert!(!cx.is_subtype(&Type::boolean(), &Type::int()));

    assert!(cx.is_subtype(&Type::Null, &jdk.string()));
    assert!(cx.is_subtype(&Type::Null, &Type::array(Type::int())));
    assert!(!cx.is_subtype(&Type::Null, &Type::int()));

    assert!(cx.is_subtype(&Type::error(), &jdk.string()));
    assert!(cx.is_subtype(&Type::int(), &Type::error()));
}

#[test]
fn type_variables_are_bounded_by_their_declaration() {
    let mut jdk = Jdk::new();
    let number = jdk.number();
    let t = jdk.type_param("T", vec![number.clone()]);
    let mut cx = TyContext::new(&jdk.store);
    let tv = Type::TypeVar(t);

    assert!(cx.is_subtype(&tv, &number));
    assert!(cx.is_subtype(&tv, &jdk.object()));
    assert!(cx.is_subtype(&tv, &jdk.serializable()));
    assert!(!cx.is_subtype(&jdk.integer(), &tv));
    assert!(!cx.is_subtype(&tv, &jdk.integer()));
    assert!(cx.is_subtype(&Type::Null, &tv));
}

#[test]
fn intersection_needs_every_component() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let both = Type::Intersection(vec![jdk.serializable(), jdk.cloneable()]);

    assert!(cx.is_subtype(&Type::array(jdk.string()), &both));
    assert!(!cx.is_subtype(&jdk.string(), &both));
    assert!(cx.is_subtype(&both, &jdk.cloneable()));
}

#[test]
fn raw_types_are_unsound_but_flagged() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);
    let raw_list = jdk.raw("java.util.List");
    let strings = jdk.list(jdk.string());
    let integers = jdk.list(jdk.integer());

    // List<String> -> List -> List<Integer>
    assert!(cx.is_subtype(&strings, &raw_list));
    assert!(!cx.is_subtype(&raw_list, &integers));

    let mut warner = Warner::default();
    assert!(cx.is_assignable_with(&raw_list, &integers, &mut warner));
    assert_eq!(warner.warnings(), &[LintCategory::Unchecked]);

    let mut warner = Warner::default();
    assert!(cx.is_assignable_with(&raw_list, &jdk.list(Type::unbounded()), &mut warner));
    assert!(warner.is_empty());
}

#[test]
fn strict_dialect_rejects_unchecked_conversion() {
    let jdk = Jdk::new();
    let options = RelationOptions {
        allow_unchecked_conversion: false,
        ..RelationOptions::default()
    };
    let mut cx = TyContext::with_options(&jdk.store, options);

    assert!(!cx.is_assignable(&jdk.raw("java.util.List"), &jdk.list(jdk.string())));
    assert!(cx.is_assignable(&jdk.list(jdk.string()), &jdk.raw("java.util.List")));
}

#[test]
fn same_type_treats_equivalent_wildcards_as_equal() {
    let jdk = Jdk::new();
    let mut cx = TyContext::new(&jdk.store);

    assert!(cx.is_same_type(
        &jdk.list(Type::unbounded()),
        &jdk.list(Type::extends(jdk.object()))
    ));
    assert!(!cx.is_same_type(
        &jdk.list(Type::extends(jdk.number())),
        &jdk.list(jdk.number())
    ));
    assert!(!cx.is_same_type(&jdk.list(jdk.string()), &jdk.raw("java.util.List")));
}

#[test]
fn f_bounded_enums_terminate() {
    let mut jdk = Jdk::new();
    let enum_id = jdk.id("java.lang.Enum");
    let color = jdk.store.intern_class_id("demo.Color");
    jdk.store.define_class(
        color,
        ClassDef::class("demo.Color")
            .final_()
            .extends(Type::class(enum_id, vec![Type::class(color, vec![])])),
    );
    let shape = jdk.store.intern_class_id("demo.Shape");
    jdk.store.define_class(
        shape,
        ClassDef::class("demo.Shape")
            .final_()
            .extends(Type::class(enum_id, vec![Type::class(shape, vec![])])),
    );
    let mut cx = TyContext::new(&jdk.store);
    let color_ty = Type::class(color, vec![]);
    let shape_ty = Type::class(shape, vec![]);
    let comparable = cx.well_known().comparable;

    assert!(cx.is_subtype(&color_ty, &Type::class(enum_id, vec![color_ty.clone()])));
    assert!(cx.is_subtype(&color_ty, &Type::class(comparable, vec![color_ty.clone()])));
    assert!(!cx.is_subtype(&color_ty, &Type::class(enum_id, vec![shape_ty.clone()])));
    assert!(cx.is_subtype(
        &color_ty,
        &Type::class(enum_id, vec![Type::extends(Type::class(enum_id, vec![Type::unbounded()]))])
    ));
    assert!(!cx.is_castable(&color_ty, &shape_ty));
}
