//! Value (de)serialization and ComposeOptions loading

#![cfg(feature = "serde")]

use tola_compose::prelude::*;

#[test]
fn test_value_json_shape() {
    let value = Value::List(vec![
        Value::Null,
        Value::Bool(true),
        Value::Int(3),
        Value::Float(1.5),
        Value::from("x"),
    ]);
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"[null,true,3,1.5,"x"]"#);
    assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);
}

#[test]
fn test_json_arguments_construct_instances() {
    let mut catalog = Catalog::new();
    let id = catalog
        .define(TypeDef::new("Point").init(|this, args| {
            this.define("x", Value::from(positional::<i64>(args, 0)?))?;
            this.define("y", Value::from(positional::<i64>(args, 1)?))?;
            Ok(())
        }))
        .unwrap();

    let args: Vec<Value> = serde_json::from_str("[4, 5]").unwrap();
    let point = catalog.instantiate(id, &args).unwrap();
    assert_eq!(point.get("y").unwrap(), Value::Int(5));
}

#[test]
fn test_options_defaults_fill_missing_fields() {
    let options: ComposeOptions = serde_json::from_str(r#"{ "name": "Person" }"#).unwrap();
    assert_eq!(options, ComposeOptions::new().named("Person"));

    let options: ComposeOptions =
        serde_json::from_str(r#"{ "run_hooks": false, "exclude_statics": [] }"#).unwrap();
    assert!(!options.run_hooks);
    assert!(options.exclude_statics.is_empty());
    assert_eq!(options.name, None);
}

#[test]
fn test_options_reject_unknown_fields() {
    let result = serde_json::from_str::<ComposeOptions>(r#"{ "hooks": false }"#);
    assert!(result.is_err());
}
