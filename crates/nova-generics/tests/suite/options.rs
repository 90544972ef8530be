use nova_generics::{OptionsError, RelationOptions, Type, TyContext};
use pretty_assertions::assert_eq;

use super::fixture::Jdk;

#[test]
fn options_loaded_from_toml_drive_the_relations() {
    let jdk = Jdk::new();
    let options = RelationOptions::from_toml_str(
        r#"
allow_boxing = false
allow_unchecked_conversion = false
"#,
    )
    .expect("valid options");
    assert_eq!(options.max_depth, RelationOptions::default().max_depth);

    let mut cx = TyContext::with_options(&jdk.store, options);
    assert!(!cx.is_convertible(&Type::int(), &jdk.integer()));
    assert!(!cx.is_castable(&jdk.object(), &Type::int()));
    assert!(!cx.is_assignable(&jdk.raw("java.util.List"), &jdk.list(jdk.string())));
    assert!(cx.is_convertible(&Type::int(), &Type::Primitive(nova_generics::PrimitiveType::Long)));
}

#[test]
fn small_depth_limit_still_answers() {
    let jdk = Jdk::new();
    let options = RelationOptions::from_toml_str("max_depth = 2\n").expect("valid options");
    let mut cx = TyContext::with_options(&jdk.store, options);

    let nested = jdk.list(jdk.list(jdk.list(jdk.list(jdk.string()))));
    assert!(cx.is_subtype(&nested, &nested));
    assert!(cx.is_subtype(&jdk.array_list(jdk.string()), &jdk.list(jdk.string())));
}

#[test]
fn depth_limit_answers_holds_once_reached() {
    let jdk = Jdk::new();
    let strings = jdk.list(jdk.list(jdk.list(jdk.string())));
    let integers = jdk.list(jdk.list(jdk.list(jdk.integer())));

    let mut cx = TyContext::new(&jdk.store);
    assert!(!cx.is_subtype(&strings, &integers));

    // Past the limit the innermost arguments are never compared.
    let options = RelationOptions::from_toml_str("max_depth = 2\n").expect("valid options");
    let mut shallow = TyContext::with_options(&jdk.store, options);
    assert!(shallow.is_subtype(&strings, &integers));
}

#[test]
fn invalid_options_report_the_field() {
    let err = RelationOptions::from_toml_str("max_depth = 0\n").expect_err("zero depth");
    assert_eq!(
        err.to_string(),
        "invalid value for `max_depth`: must be at least 1"
    );

    let err = RelationOptions::from_toml_str("max_depth = \"deep\"\n").expect_err("wrong type");
    assert!(matches!(err, OptionsError::Toml(_)));
}

#[test]
fn schema_round_trips_through_serde() {
    let schema = RelationOptions::json_schema();
    let properties = schema.schema.object.expect("object schema").properties;
    assert!(properties.contains_key("allow_unchecked_conversion"));

    let options = RelationOptions {
        max_depth: 64,
        ..RelationOptions::default()
    };
    let text = toml::to_string(&options).expect("serialize");
    assert_eq!(RelationOptions::from_toml_str(&text).expect("parse"), options);
}

