use polymorphs_core::{
    assoc::{AliasTable, AssociationSpec, Options, Resolved},
    schema::{Model, ModelName, Table},
    Schema,
};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

fn schema() -> Schema {
    Schema::builder()
        .model(Model::new("Petfood"))
        .model(Model::new("Dog"))
        .model(Model::new("Cat"))
        .model(Model::new("Bird"))
        .model(Model::new("Fish"))
        .model(Model::new("EatersPetfood"))
        .table(Table::new("petfoods", ["id", "name"]))
        .table(Table::new("dogs", ["id", "name", "breed"]))
        .table(Table::new("cats", ["id", "name"]))
        .table(Table::new("birds", ["id", "name", "wingspan"]))
        .table(Table::new(
            "eaters_petfoods",
            ["id", "petfood_id", "eater_id", "eater_type"],
        ))
        .build()
        .unwrap()
}

fn aliases(schema: &Schema, from: &[&str]) -> AliasTable {
    let options = Options::new().set("from", from.to_vec());
    let spec =
        AssociationSpec::from_options(&ModelName::new("Petfood"), "eaters", &options).unwrap();
    Resolved::new(schema, &spec).unwrap().aliases
}

#[test]
fn aliases_are_unique() {
    let schema = schema();
    let aliases = aliases(&schema, &["dogs", "cats", "birds"]);

    let all: Vec<_> = aliases.iter().map(|(_, _, alias)| alias).collect();
    assert_eq!(all.len(), 3 + 2 + 3 + 4);
    assert_unique!(all);
}

#[test]
fn aliases_ignore_declaration_order() {
    let schema = schema();
    let mut from = vec!["dogs", "cats", "birds"];
    let expected = aliases(&schema, &from);

    for _ in 0..16 {
        std_util::slice::shuffle(&mut from);
        assert_eq!(aliases(&schema, &from), expected);
    }
}

#[test]
fn missing_table_skips_its_columns() {
    let schema = schema();
    let aliases = aliases(&schema, &["dogs", "fish"]);

    // dogs, eaters_petfoods, fish
    assert_eq!(aliases.get("dogs", "breed"), Some("t0_r2"));
    assert_eq!(aliases.get("eaters_petfoods", "eater_type"), Some("t1_r3"));
    assert_eq!(aliases.len(), 3 + 4);
}

#[test]
fn unknown_type() {
    let schema = schema();
    let options = Options::new().set("from", ["dogs", "ferrets"]);
    let spec =
        AssociationSpec::from_options(&ModelName::new("Petfood"), "eaters", &options).unwrap();

    let err = assert_err!(Resolved::new(&schema, &spec));
    assert!(err.is_schema_resolution());
    assert!(err.to_string().contains("`ferrets` (tried `Ferret`)"));
}

#[test]
fn join_orders_by_declared_through() {
    let schema = Schema::builder()
        .model(Model::new("Petfood"))
        .model(Model::new("Dog"))
        .model(Model::new("Frog"))
        .model(Model::new("Meal"))
        .table(Table::new("petfoods", ["id"]))
        .table(Table::new("dogs", ["id"]))
        .table(Table::new("frogs", ["id"]))
        .table(Table::new("meals", ["id", "petfood_id", "eater_id", "eater_type"]))
        .build()
        .unwrap();

    let options = Options::new()
        .set("from", ["dogs", "frogs"])
        .set("join_class_name", "Meal");
    let spec =
        AssociationSpec::from_options(&ModelName::new("Petfood"), "eaters", &options).unwrap();
    assert_eq!(spec.join_ident, "eaters_petfoods");

    // `eaters_petfoods` sorts between `dogs` and `frogs`, `meals` would not
    let aliases = Resolved::new(&schema, &spec).unwrap().aliases;
    assert_eq!(aliases.get("dogs", "id"), Some("t0_r0"));
    assert_eq!(aliases.get("meals", "id"), Some("t1_r0"));
    assert_eq!(aliases.get("meals", "eater_type"), Some("t1_r3"));
    assert_eq!(aliases.get("frogs", "id"), Some("t2_r0"));
}
