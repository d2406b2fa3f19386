//! Chain extraction, proxies and splicing

use tola_compose::chain::{extract_chain, make_proxy, merge_chains, splice};
use tola_compose::prelude::*;
use tola_compose::Members;

fn label(name: &str) -> TypeDef {
    let owned = name.to_owned();
    TypeDef::new(name).method("who", move |_, _| Ok(Value::from(owned.as_str())))
}

/// Animal <- Dog <- Puppy, plus an unrelated Robot.
fn zoo() -> (Catalog, [TypeId; 4]) {
    let mut catalog = Catalog::new();
    let animal = catalog.define(label("Animal").value("legs", 4)).unwrap();
    let dog = catalog.define(label("Dog").extends("Animal").value("sound", "woof")).unwrap();
    let puppy = catalog.define(label("Puppy").extends("Dog")).unwrap();
    let robot = catalog.define(label("Robot")).unwrap();
    (catalog, [animal, dog, puppy, robot])
}

#[test]
fn test_extract_most_derived_first() {
    let (catalog, [animal, dog, puppy, _]) = zoo();

    let chain = extract_chain(&catalog, puppy).unwrap();
    assert_eq!(chain.source(), puppy);
    assert_eq!(chain.levels(), &[puppy, dog, animal]);
    assert_eq!(catalog.chain(animal).unwrap().levels(), &[animal]);
}

#[test]
fn test_empty_root_is_left_out() {
    let (catalog, [_, _, _, robot]) = zoo();
    assert!(!catalog.chain(robot).unwrap().levels().contains(&Catalog::ROOT));
}

#[test]
fn test_root_with_members_closes_every_chain() {
    let mut catalog = Catalog::with_root(TypeDef::new("Object").value("kind", "object")).unwrap();
    let a = catalog.define(TypeDef::new("A")).unwrap();
    let b = catalog.define(TypeDef::new("B").extends("A")).unwrap();

    assert_eq!(catalog.chain(b).unwrap().levels(), &[b, a, Catalog::ROOT]);
    assert_eq!(catalog.name_of(Catalog::ROOT), "Object");
}

#[test]
fn test_parent_may_be_defined_later() {
    let mut catalog = Catalog::new();
    let child = catalog.define(TypeDef::new("Child").extends("Parent")).unwrap();
    assert!(catalog.chain(child).is_err());

    let parent = catalog.define(TypeDef::new("Parent")).unwrap();
    assert_eq!(catalog.chain(child).unwrap().levels(), &[child, parent]);
}

#[test]
fn test_unknown_type_id() {
    let (catalog, _) = zoo();
    let mut other = Catalog::new();
    for n in 0..8 {
        other.define(TypeDef::new(format!("T{n}"))).unwrap();
    }
    let foreign = other.lookup("T7").unwrap();

    assert_eq!(extract_chain(&catalog, foreign), Err(ComposeError::UnknownType(foreign)));
    assert_eq!(catalog.name_of(foreign), "?");
}

#[test]
fn test_merge_extracted_chains() {
    let (catalog, [animal, dog, puppy, robot]) = zoo();
    let chains = [
        catalog.chain(puppy).unwrap().levels().to_vec(),
        catalog.chain(robot).unwrap().levels().to_vec(),
        catalog.chain(dog).unwrap().levels().to_vec(),
    ];
    assert_eq!(merge_chains(&chains).unwrap(), vec![puppy, dog, animal, robot]);
}

#[test]
fn test_splice_links_head_to_tail() {
    let (catalog, [animal, dog, puppy, _]) = zoo();
    let proxies = [puppy, dog, animal]
        .into_iter()
        .map(|level| make_proxy(level, catalog.level_members(level).unwrap()))
        .collect();
    let spliced = splice(proxies);

    assert_eq!(spliced.len(), 3);
    assert_eq!(spliced.head().map(|p| p.origin()), Some(puppy));
    assert_eq!(spliced.origins(), vec![puppy, dog, animal]);
    let links: Vec<_> = spliced.walk().map(|p| p.next()).collect();
    assert_eq!(links, vec![Some(1), Some(2), None]);
}

#[test]
fn test_flatten_first_declaration_wins() {
    let (catalog, [animal, dog, puppy, _]) = zoo();
    let spliced = splice(
        [puppy, dog, animal]
            .into_iter()
            .map(|level| make_proxy(level, catalog.level_members(level).unwrap()))
            .collect(),
    );
    let table = spliced.flatten();

    assert_eq!(table.names().collect::<Vec<_>>(), vec!["who", "sound", "legs"]);
    let who = &table.get("who").unwrap().member;
    let puppy_who = &catalog.level_members(puppy).unwrap().get("who").unwrap().member;
    assert!(who.same_as(puppy_who));
}

#[test]
fn test_proxies_are_private_copies() {
    let sealed: Members = [("id", Descriptor::fixed(Value::Int(1)))].into_iter().collect();

    let mut proxy = make_proxy(Catalog::ROOT, &sealed);
    assert!(proxy.members().get("id").unwrap().configurable);
    assert_eq!(proxy.next(), None);

    // Relinking a proxy never reaches back into its level.
    proxy = splice(vec![proxy.clone(), proxy]).head().cloned().unwrap();
    assert_eq!(proxy.next(), Some(1));
    assert!(!sealed.get("id").unwrap().configurable);
}

#[test]
fn test_splice_nothing() {
    let spliced = splice(Vec::new());
    assert!(spliced.is_empty());
    assert!(spliced.head().is_none());
    assert!(spliced.flatten().is_empty());
}
