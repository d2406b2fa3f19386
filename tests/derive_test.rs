//! #[derive(Composable)] and type_def!

#![cfg(feature = "derive")]

use tola_compose::prelude::*;

#[derive(Composable, Clone)]
struct HasAge {
    age: i64,
}

#[derive(Composable, Clone)]
#[compose(name = "Named", extends = "Base")]
struct HasName {
    name: String,
    #[compose(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
    r#type: String,
}

#[derive(Composable)]
struct Marker;

type_def! {
    Base {
        fn describe(this, _args) {
            Ok(Value::from(format!("{} ({})", this.get("name")?, this.get("type")?)))
        }
    }
}

#[test]
fn test_derive_fields_become_own_members() {
    let mut catalog = Catalog::new();
    let id = catalog.define_composable::<HasAge>().unwrap();

    let age = HasAge { age: 12 };
    let instance = catalog.instantiate(id, &age.to_args()).unwrap();
    assert_eq!(catalog.name_of(id), "HasAge");
    assert_eq!(instance.own_names(), vec!["age"]);
    assert_eq!(instance.get("age").unwrap(), Value::Int(12));
}

#[test]
fn test_derive_container_attributes() {
    let def = HasName::type_def();
    assert_eq!(def.name(), "Named");
    assert_eq!(def.parent_name(), Some("Base"));

    let value = HasName { name: "Ada".into(), cache: vec![1, 2], r#type: "person".into() };
    assert_eq!(value.to_args(), vec![Value::from("Ada"), Value::from("person")]);
}

#[test]
fn test_derive_with_parent_from_type_def() {
    let mut catalog = Catalog::new();
    catalog.define(base()).unwrap();
    let id = catalog.define_composable::<HasName>().unwrap();

    let value = HasName { name: "Ada".into(), cache: Vec::new(), r#type: "person".into() };
    let mut instance = catalog.instantiate(id, &value.to_args()).unwrap();
    assert_eq!(instance.own_names(), vec!["name", "type"]);
    assert_eq!(instance.call("describe", &[]).unwrap(), Value::from("Ada (person)"));
}

#[test]
fn test_derive_unit_struct() {
    let def = Marker::type_def();
    assert!(!def.declares_members());
    assert!(Marker.to_args().is_empty());
}

#[test]
fn test_derived_types_compose() {
    let mut catalog = Catalog::new();
    catalog.define(base()).unwrap();
    let name = catalog.define_composable::<HasName>().unwrap();
    let age = catalog.define_composable::<HasAge>().unwrap();
    let person = catalog.compose(&[name, age]).unwrap();

    let args = ConstructArgs::new()
        .with(name, HasName { name: "Ada".into(), cache: Vec::new(), r#type: "person".into() }.to_args())
        .with(age, HasAge { age: 36 }.to_args());
    let mut p = catalog.construct(person, &args).unwrap();

    assert_eq!(p.get("age").unwrap(), Value::Int(36));
    assert_eq!(p.call("describe", &[]).unwrap(), Value::from("Ada (person)"));
    assert_eq!(p.signature(), Some("Named:Base:HasAge:(Named,HasAge)"));
}

#[test]
fn test_wrong_argument_kind_fails_construction() {
    let mut catalog = Catalog::new();
    let id = catalog.define_composable::<HasAge>().unwrap();

    let err = catalog.instantiate(id, &[Value::from("old")]).unwrap_err();
    assert_eq!(err.ty, "HasAge");
    assert_eq!(err.source.to_string(), "expected int, found str");
}
