use polymorphs::{
    assoc::Options,
    schema::{Model, Table},
    Registry, Schema,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std_util::prelude::*;

fn registry() -> Registry {
    let schema = Schema::builder()
        .model(Model::new("Devouring"))
        .model(Model::new("Dog"))
        .model(Model::new("Cat"))
        .model(Model::new("Bird"))
        .table(Table::new(
            "devourings",
            ["id", "eater_id", "eater_type", "food_id", "food_type"],
        ))
        .table(Table::new("dogs", ["id", "name"]))
        .table(Table::new("cats", ["id", "name"]))
        .table(Table::new("birds", ["id", "name"]))
        .build()
        .unwrap();

    Registry::new(Arc::new(schema))
}

fn devourings() -> Options {
    Options::new()
        .set("eaters", ["cats", "dogs"])
        .set("foods", ["dogs", "birds"])
}

#[test]
fn installs_both_sides() {
    let registry = registry();
    assert_ok!(registry.acts_as_double_polymorphic_join("Devouring", devourings()));

    let bird: Vec<_> = registry
        .relations("Bird")
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(
        bird,
        ["eaters", "devourings_as_food", "cats", "dogs", "devourings"]
    );

    // `Dog` is on both sides, so its collections are merged.
    let dogs = registry.relation("Dog", "dogs").unwrap();
    assert!(dogs.is_merged());
    assert!(dogs.is_read_only());
    assert!(registry.relation("Dog", "devourings").unwrap().is_merged());
    assert!(registry.relation("Bird", "devourings").unwrap().is_alias());

    assert!(registry.reflection("Dog", "eaters").is_some());
    assert!(registry.reflection("Dog", "foods").is_some());
}

#[test]
fn hooks_are_installed_once_per_column() {
    let registry = registry();
    registry
        .acts_as_double_polymorphic_join("Devouring", devourings())
        .unwrap();

    let mut columns: Vec<_> = registry
        .hooks("Devouring")
        .iter()
        .map(|hook| hook.column().to_string())
        .collect();
    columns.sort();

    assert_eq!(columns, ["eater_type", "food_type"]);
}

#[test]
fn redeclaring_fails_atomically() {
    let registry = registry();
    registry
        .acts_as_double_polymorphic_join("Devouring", devourings())
        .unwrap();
    let before = registry.relations("Cat").len();

    let err = assert_err!(registry.acts_as_double_polymorphic_join("Devouring", devourings()));
    assert!(err.is_validation());
    assert!(err
        .to_string()
        .starts_with("declaring double polymorphic join `Devouring`: "));

    assert_eq!(registry.relations("Cat").len(), before);
}

#[test]
fn ambiguous_collections() {
    let registry = registry();

    let err = assert_err!(registry.acts_as_double_polymorphic_join(
        "Devouring",
        Options::new().set("eaters", ["cats"]),
    ));
    assert!(err.is_ambiguous_spec());
    assert_empty!(registry.relations("Cat"));
}
