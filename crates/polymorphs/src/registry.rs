mod model_relations;
use model_relations::ModelRelations;

use polymorphs_core::{
    assoc::{self, Batch, Hook, HookRegistration, Options, PolymorphicReflection, Relation},
    schema::ModelName,
    Error, Result, Schema,
};
use polymorphs_sql::{Params, Serializer};

use indexmap::IndexMap;
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::debug;

/// Relations declared on the models of a schema.
///
/// A declaration is compiled without touching the registry, then installed
/// as a whole while every model it affects is locked. If any part of it
/// fails, nothing is installed. Declarations affecting disjoint models do not
/// contend.
#[derive(Debug)]
pub struct Registry {
    schema: Arc<Schema>,

    /// Per-model relation tables, created on first use
    slots: Mutex<HashMap<ModelName, Arc<Mutex<ModelRelations>>>>,
}

impl Registry {
    pub fn new(schema: Arc<Schema>) -> Registry {
        Registry {
            schema,
            slots: Mutex::default(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Declares the polymorphic relation `association` on `parent` along
    /// with every relation derived from it.
    pub fn has_many_polymorphs(
        &self,
        parent: impl Into<ModelName>,
        association: &str,
        options: Options,
    ) -> Result<Arc<PolymorphicReflection>> {
        let parent = parent.into();
        let batch = assoc::compile(&self.schema, &parent, association, &options)?;
        let reflection = batch.reflections[0].clone();

        self.install(batch)
            .map_err(|err| err.context(polymorphs_core::err!("declaring `{parent}.{association}`")))?;

        Ok(reflection)
    }

    /// Declares both sides of a join model whose rows reference polymorphic
    /// records at each end.
    pub fn acts_as_double_polymorphic_join(
        &self,
        join_model: impl Into<ModelName>,
        options: Options,
    ) -> Result<()> {
        let join_model = join_model.into();
        let batch = assoc::compile_double(&self.schema, &join_model, &options)?;

        self.install(batch).map_err(|err| {
            err.context(polymorphs_core::err!(
                "declaring double polymorphic join `{join_model}`"
            ))
        })
    }

    pub fn relation(&self, model: impl Into<ModelName>, name: &str) -> Option<Relation> {
        let slot = self.existing_slot(&model.into())?;
        let relations = lock(&slot);
        relations.relations.get(name).cloned()
    }

    /// Every relation on `model`, in declaration order
    pub fn relations(&self, model: impl Into<ModelName>) -> Vec<(String, Relation)> {
        let Some(slot) = self.existing_slot(&model.into()) else {
            return vec![];
        };

        let relations = lock(&slot);
        relations
            .relations
            .iter()
            .map(|(name, relation)| (name.clone(), relation.clone()))
            .collect()
    }

    pub fn hooks(&self, model: impl Into<ModelName>) -> Vec<Hook> {
        let Some(slot) = self.existing_slot(&model.into()) else {
            return vec![];
        };

        let relations = lock(&slot);
        relations.hooks.clone()
    }

    /// The union view registered as `name` on `model`
    pub fn reflection(
        &self,
        model: impl Into<ModelName>,
        name: &str,
    ) -> Option<Arc<PolymorphicReflection>> {
        self.relation(model, name)?.as_polymorphic().cloned()
    }

    /// Renders the query listing the records of the union view `name` on
    /// `model` for a single owner.
    pub fn union_sql(
        &self,
        serializer: &Serializer,
        model: impl Into<ModelName>,
        name: &str,
        params: &mut impl Params,
    ) -> Result<String> {
        let model = model.into();

        let Some(reflection) = self.reflection(&model, name) else {
            return Err(Error::validation(format!(
                "`{model}.{name}` is not a polymorphic relation"
            )));
        };

        Ok(serializer.serialize_union(&reflection, params))
    }

    fn install(&self, batch: Batch) -> Result<()> {
        let models = batch.models();
        let slots: Vec<_> = models
            .iter()
            .map(|model| (model, self.slot(model)))
            .collect();

        // Models are sorted, so concurrent installs lock in the same order.
        let mut guards: IndexMap<&ModelName, MutexGuard<'_, ModelRelations>> = slots
            .iter()
            .map(|(model, slot)| (*model, lock(slot)))
            .collect();

        let mut staged = HashSet::new();
        let mut keep = Vec::with_capacity(batch.registrations.len());

        for registration in &batch.registrations {
            let key = (&registration.model, registration.name.as_str());
            let taken = guards[&registration.model].contains(&registration.name)
                || staged.contains(&key);

            if !taken {
                staged.insert(key);
                keep.push(true);
            } else if registration.if_absent {
                keep.push(false);
            } else {
                return Err(Error::validation(format!(
                    "relation `{}` is already defined on `{}`",
                    registration.name, registration.model
                )));
            }
        }

        let mut installed = 0;
        for (registration, keep) in batch.registrations.into_iter().zip(keep) {
            if keep {
                guards[&registration.model].insert(registration.name, registration.relation);
                installed += 1;
            }
        }

        for HookRegistration { model, hook } in batch.hooks {
            guards[&model].install_hook(hook);
        }

        debug!(
            models = ?models,
            relations = installed,
            "installed relations"
        );

        Ok(())
    }

    fn slot(&self, model: &ModelName) -> Arc<Mutex<ModelRelations>> {
        let mut slots = lock(&self.slots);
        let slot = slots.entry(model.clone()).or_default();
        slot.clone()
    }

    fn existing_slot(&self, model: &ModelName) -> Option<Arc<Mutex<ModelRelations>>> {
        lock(&self.slots).get(model).cloned()
    }
}

/// Poisoning is ignored; installs validate before mutating.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polymorphs_core::schema::{Model, Table};

    fn registry() -> Registry {
        let schema = Schema::builder()
            .model(Model::new("Petfood"))
            .model(Model::new("Dog"))
            .model(Model::new("EatersPetfood"))
            .table(Table::new("petfoods", ["id"]))
            .table(Table::new("dogs", ["id"]))
            .table(Table::new(
                "eaters_petfoods",
                ["id", "petfood_id", "eater_id", "eater_type"],
            ))
            .build()
            .unwrap();

        Registry::new(Arc::new(schema))
    }

    #[test]
    fn slots_are_created_lazily() {
        let registry = registry();
        assert!(registry.existing_slot(&ModelName::new("Dog")).is_none());
        assert!(registry.relations("Dog").is_empty());

        registry
            .has_many_polymorphs("Petfood", "eaters", Options::new().set("from", ["dogs"]))
            .unwrap();

        assert!(registry.existing_slot(&ModelName::new("Dog")).is_some());
        assert!(registry.existing_slot(&ModelName::new("Cat")).is_none());
    }

    #[test]
    fn same_slot_is_reused() {
        let registry = registry();
        let dog = ModelName::new("Dog");

        let first = registry.slot(&dog);
        let second = registry.slot(&dog);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
