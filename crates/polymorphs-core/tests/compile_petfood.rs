use polymorphs_core::{
    assoc::{self, Hook, JoinKind, Options, Projection, Relation},
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
        .model(Model::new("EatersPetfood"))
        .table(Table::new("petfoods", ["id", "name", "price"]))
        .table(Table::new("dogs", ["id", "name"]))
        .table(Table::new("cats", ["id", "name"]))
        .table(Table::new("birds", ["id", "name"]))
        .table(Table::new(
            "eaters_petfoods",
            ["id", "petfood_id", "eater_id", "eater_type"],
        ))
        .build()
        .unwrap()
}

fn compile(options: Options) -> assoc::Batch {
    assert_ok!(assoc::compile(
        &schema(),
        &ModelName::new("Petfood"),
        "eaters",
        &options
    ))
}

fn names(batch: &assoc::Batch, model: &str) -> Vec<String> {
    let model = ModelName::new(model);
    batch
        .registrations
        .iter()
        .filter(|registration| registration.model == model)
        .map(|registration| registration.name.clone())
        .collect()
}

#[test]
fn petfood_relations() {
    let batch = compile(Options::new().set("from", ["dogs", "cats", "birds"]));

    assert_eq!(
        names(&batch, "Petfood"),
        ["eaters", "eaters_petfoods", "dogs", "cats", "birds"]
    );

    for target in ["Dog", "Cat", "Bird"] {
        assert_eq!(names(&batch, target), ["eaters_petfoods", "petfoods"]);
    }

    let pairs: Vec<_> = batch
        .registrations
        .iter()
        .map(|registration| (registration.model.clone(), registration.name.clone()))
        .collect();
    assert_unique!(pairs);
}

#[test]
fn petfood_union_view() {
    let batch = compile(Options::new().set("from", ["dogs", "cats", "birds"]));
    let reflection = batch
        .registration(&ModelName::new("Petfood"), "eaters")
        .unwrap()
        .relation
        .expect_polymorphic()
        .clone();

    assert_eq!(reflection.from(), ["dogs", "cats", "birds"]);
    assert_eq!(reflection.plan.source, "eaters_petfoods");

    let Projection::Columns { columns, .. } = &reflection.plan.projection else {
        panic!("expected generated projection");
    };
    let aliases: Vec<_> = columns.iter().map(|column| column.alias.as_str()).collect();
    assert_eq!(
        aliases,
        [
            "t0_r0", "t0_r1", "t1_r0", "t1_r1", "t2_r0", "t2_r1", "t3_r0", "t3_r1", "t3_r2",
            "t3_r3"
        ]
    );
    assert_eq!(reflection.aliases.get("birds", "name"), Some("t0_r1"));
    assert_eq!(reflection.aliases.get("eaters_petfoods", "eater_type"), Some("t3_r3"));

    assert_eq!(
        reflection.plan.projection.to_string(),
        "'Petfood' AS polymorphic_parent_class, 'eaters' AS polymorphic_association_id, \
         birds.id AS t0_r0, birds.name AS t0_r1, cats.id AS t1_r0, cats.name AS t1_r1, \
         dogs.id AS t2_r0, dogs.name AS t2_r1, eaters_petfoods.id AS t3_r0, \
         eaters_petfoods.petfood_id AS t3_r1, eaters_petfoods.eater_id AS t3_r2, \
         eaters_petfoods.eater_type AS t3_r3"
    );

    let joins: Vec<_> = reflection.plan.joins.iter().map(ToString::to_string).collect();
    assert_eq!(
        joins,
        [
            "INNER JOIN petfoods AS polymorphic_parent ON eaters_petfoods.petfood_id = polymorphic_parent.id",
            "LEFT JOIN dogs ON eaters_petfoods.eater_id = dogs.id AND eaters_petfoods.eater_type = 'Dog'",
            "LEFT JOIN cats ON eaters_petfoods.eater_id = cats.id AND eaters_petfoods.eater_type = 'Cat'",
            "LEFT JOIN birds ON eaters_petfoods.eater_id = birds.id AND eaters_petfoods.eater_type = 'Bird'",
        ]
    );

    assert_eq!(
        reflection.plan.existence_filter().unwrap(),
        "t0_r0 > 0 OR t1_r0 > 0 OR t2_r0 > 0"
    );
}

#[test]
fn petfood_derived_relations() {
    let batch = compile(
        Options::new()
            .set("from", ["dogs", "cats", "birds"])
            .set("conditions", "dogs.name != 'Spot' OR cats.name = 'Tom'")
            .set("order", "petfoods.price")
            .set("limit", 5_i64)
            .set("parent_order", "petfoods.name")
            .set("dependent", "nullify"),
    );
    let petfood = ModelName::new("Petfood");
    let dog = ModelName::new("Dog");

    let join = batch
        .registration(&petfood, "eaters_petfoods")
        .unwrap()
        .relation
        .expect_has_many();
    assert_eq!(join.target, ModelName::new("EatersPetfood"));
    assert_eq!(join.foreign_key, "petfood_id");
    assert_eq!(join.dependent, Some(assoc::Dependent::Nullify));
    assert_none!(join.conditions);

    let cats = batch
        .registration(&petfood, "cats")
        .unwrap()
        .relation
        .expect_has_many_through();
    assert_eq!(cats.target, ModelName::new("Cat"));
    assert_eq!(cats.through, "eaters_petfoods");
    assert_eq!(cats.source, "eater");
    assert_eq!(cats.source_type, Some(ModelName::new("Cat")));
    assert_eq!(
        cats.clauses.conditions.as_deref(),
        Some("NULL != 'Spot' OR cats.name = 'Tom'")
    );
    assert_eq!(cats.clauses.order.as_deref(), Some("NULL"));
    assert_eq!(cats.clauses.limit, Some(5));
    assert_eq!(cats.extensions[0].name(), "delegate_to_union");

    let dogs = batch
        .registration(&petfood, "dogs")
        .unwrap()
        .relation
        .expect_has_many_through();
    assert_eq!(
        dogs.clauses.conditions.as_deref(),
        Some("dogs.name != 'Spot' OR NULL = 'Tom'")
    );

    let dog_join = batch
        .registration(&dog, "eaters_petfoods")
        .unwrap()
        .relation
        .expect_has_many();
    assert_eq!(dog_join.foreign_key, "eater_id");
    assert_eq!(dog_join.role.as_deref(), Some("eater"));
    assert_eq!(dog_join.order.as_deref(), Some("NULL"));

    let petfoods = batch
        .registration(&dog, "petfoods")
        .unwrap()
        .relation
        .expect_has_many_through();
    assert_eq!(petfoods.target, petfood);
    assert_eq!(petfoods.through, "eaters_petfoods");
    assert_eq!(petfoods.source, "petfood");
    assert_eq!(petfoods.clauses.order.as_deref(), Some("petfoods.name"));

    assert_eq!(
        batch.hooks,
        [assoc::HookRegistration {
            model: ModelName::new("EatersPetfood"),
            hook: Hook::sti_class_rewrite("eater_type"),
        }]
    );
}

#[test]
fn renamed_collections() {
    let batch = compile(
        Options::new()
            .set("from", ["dogs", "cats"])
            .set("rename_individual_collections", true),
    );

    assert_eq!(
        names(&batch, "Petfood"),
        ["eaters", "eaters_petfoods", "eater_dogs", "eater_cats"]
    );
    assert_eq!(names(&batch, "Dog"), ["eaters_petfoods", "petfoods_of_eaters"]);
}

#[test]
fn conflicting_target_is_qualified_on_both_sides() {
    let batch = compile(
        Options::new()
            .set("from", ["dogs", "cats", "birds"])
            .set("conflicts", ["dogs"]),
    );

    assert_eq!(
        names(&batch, "Petfood"),
        ["eaters", "eaters_petfoods", "eater_dogs", "cats", "birds"]
    );
    assert_eq!(
        names(&batch, "Dog"),
        ["eaters_petfoods_of_eaters", "petfoods_of_eaters"]
    );
    assert_eq!(names(&batch, "Cat"), ["eaters_petfoods", "petfoods"]);

    let forward = batch
        .registration(&ModelName::new("Petfood"), "eater_dogs")
        .unwrap();
    assert_eq!(
        forward.relation.expect_has_many_through().target,
        ModelName::new("Dog")
    );
}

#[test]
fn custom_select_replaces_projection() {
    let batch = compile(
        Options::new()
            .set("from", ["dogs"])
            .set("select", "eaters_petfoods.*"),
    );
    let reflection = batch.reflections[0].clone();
    assert_eq!(
        reflection.plan.projection,
        Projection::Custom("eaters_petfoods.*".to_string())
    );
}

#[test]
fn polymorphic_parent_side() {
    let batch = compile(
        Options::new()
            .set("from", ["dogs"])
            .set("foreign_type_key", "petfood_type"),
    );
    let reflection = &batch.reflections[0];
    let (column, value) = reflection.plan.owner_type.clone().unwrap();
    assert_eq!(column.to_string(), "eaters_petfoods.petfood_type");
    assert_eq!(value, "Petfood");

    let join = batch
        .registration(&ModelName::new("Petfood"), "eaters_petfoods")
        .unwrap()
        .relation
        .expect_has_many();
    assert_eq!(
        join.conditions.as_deref(),
        Some("eaters_petfoods.petfood_type = 'Petfood'")
    );
    assert_eq!(join.role.as_deref(), Some("petfood"));
}

#[test]
fn uniq_deduplicates_rows() {
    let rows = vec![("Dog", 1), ("Cat", 1), ("Dog", 1), ("Dog", 2)];

    let batch = compile(Options::new().set("from", ["dogs", "cats"]).set("uniq", true));
    let deduped = batch.reflections[0].dedup(rows.clone(), |row| *row);
    assert_eq!(deduped, [("Dog", 1), ("Cat", 1), ("Dog", 2)]);

    let batch = compile(Options::new().set("from", ["dogs", "cats"]));
    assert_eq!(batch.reflections[0].dedup(rows.clone(), |row| *row), rows);
}

#[test]
fn join_kinds() {
    let batch = compile(Options::new().set("from", ["dogs", "cats"]));
    let kinds: Vec<_> = batch.reflections[0]
        .plan
        .joins
        .iter()
        .map(|join| join.kind)
        .collect();
    assert_eq!(kinds, [JoinKind::Inner, JoinKind::Left, JoinKind::Left]);
    assert!(matches!(
        batch.registrations[0].relation,
        Relation::Polymorphic(_)
    ));
}
