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
        .model(Model::new("Petfood"))
        .model(Model::new("Dog"))
        .model(Model::new("Cat"))
        .model(Model::new("EatersPetfood"))
        .table(Table::new("petfoods", ["id", "name"]))
        .table(Table::new("dogs", ["id", "name"]))
        .table(Table::new("cats", ["id", "name"]))
        .table(Table::new(
            "eaters_petfoods",
            ["id", "petfood_id", "eater_id", "eater_type"],
        ))
        .build()
        .unwrap();

    Registry::new(Arc::new(schema))
}

#[test]
fn declare_from_json() {
    let options: Options = serde_json::from_str(
        r#"{
            "from": ["dogs", "cats"],
            "rename_individual_collections": true,
            "order": "eaters_petfoods.id",
            "extend": ["Paginated"]
        }"#,
    )
    .unwrap();

    let registry = registry();
    let reflection = assert_ok!(registry.has_many_polymorphs("Petfood", "eaters", options));
    assert_eq!(reflection.spec.view.order.as_deref(), Some("eaters_petfoods.id"));

    let names: Vec<_> = registry
        .relations("Petfood")
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(
        names,
        ["eaters", "eaters_petfoods", "eater_dogs", "eater_cats"]
    );

    let reverse: Vec<_> = registry
        .relations("Dog")
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(reverse, ["eaters_petfoods", "petfoods_of_eaters"]);

    let forward = registry.relation("Petfood", "eater_dogs").unwrap();
    let extensions: Vec<_> = forward
        .expect_has_many_through()
        .extensions
        .iter()
        .map(|extension| extension.name().to_string())
        .collect();
    assert_eq!(extensions, ["delegate_to_union", "Paginated"]);
}

#[test]
fn unknown_json_key() {
    let options: Options =
        serde_json::from_str(r#"{ "from": ["dogs"], "table_aliases": true }"#).unwrap();

    let err = assert_err!(registry().has_many_polymorphs("Petfood", "eaters", options));
    assert!(err.is_unknown_option());
    assert_empty!(registry().relations("Petfood"));
}
