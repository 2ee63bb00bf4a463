use super::{
    derived, AssociationSpec, HookRegistration, JoinPlan, Options, PolymorphicReflection,
    Registration, Resolved,
};
use crate::{
    schema::{ModelName, Schema},
    Result,
};

use std::{collections::BTreeSet, sync::Arc};
use tracing::debug;

/// Everything one declaration installs, in installation order.
///
/// Compiling has no side effects. A batch is installed as a whole or not at
/// all.
#[derive(Debug, Default)]
pub struct Batch {
    pub reflections: Vec<Arc<PolymorphicReflection>>,
    pub registrations: Vec<Registration>,
    pub hooks: Vec<HookRegistration>,
}

/// Compiles a polymorphic relation named `association` on `parent`.
pub fn compile(
    schema: &Schema,
    parent: &ModelName,
    association: &str,
    options: &Options,
) -> Result<Batch> {
    let mut batch = Batch::default();
    compile_into(schema, parent, association, options, &mut batch)?;
    Ok(batch)
}

pub(crate) fn compile_into(
    schema: &Schema,
    parent: &ModelName,
    association: &str,
    options: &Options,
    batch: &mut Batch,
) -> Result<Arc<PolymorphicReflection>> {
    compile_impl(schema, parent, association, options, batch)
        .map_err(|err| err.context(crate::err!("declaring `{parent}.{association}`")))
}

fn compile_impl(
    schema: &Schema,
    parent: &ModelName,
    association: &str,
    options: &Options,
    batch: &mut Batch,
) -> Result<Arc<PolymorphicReflection>> {
    let spec = AssociationSpec::from_options(parent, association, options)?;
    let cx = Resolved::new(schema, &spec)?;
    let plan = JoinPlan::compile(&cx);

    debug!(
        parent = %parent,
        association,
        from = ?spec.from,
        through = %spec.through,
        "compiling polymorphic relation"
    );

    let reflection = Arc::new(PolymorphicReflection {
        spec: spec.clone(),
        aliases: cx.aliases.clone(),
        plan,
    });

    let derived = derived::generate(&cx, &reflection)?;

    batch.reflections.push(reflection.clone());
    batch.registrations.extend(derived.parent);
    batch.hooks.extend(derived.hooks);

    for target in derived.targets {
        batch.registrations.push(target.forward);
        batch.registrations.extend(target.join);
        batch.registrations.extend(target.reverse);
    }

    Ok(reflection)
}

impl Batch {
    /// Models receiving a registration or a hook, sorted
    pub fn models(&self) -> BTreeSet<ModelName> {
        self.registrations
            .iter()
            .map(|registration| registration.model.clone())
            .chain(self.hooks.iter().map(|hook| hook.model.clone()))
            .collect()
    }

    /// Adds a registration. An `if_absent` registration whose name is
    /// already taken in the batch is dropped.
    pub fn push(&mut self, registration: Registration) {
        if registration.if_absent && self.contains(&registration.model, &registration.name) {
            return;
        }
        self.registrations.push(registration);
    }

    /// Whether the batch already registers `name` on `model`
    pub fn contains(&self, model: &ModelName, name: &str) -> bool {
        self.registrations
            .iter()
            .any(|registration| registration.model == *model && registration.name == name)
    }

    pub fn registration(&self, model: &ModelName, name: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|registration| registration.model == *model && registration.name == name)
    }

    pub fn extend(&mut self, other: Batch) {
        self.reflections.extend(other.reflections);
        self.registrations.extend(other.registrations);
        self.hooks.extend(other.hooks);
    }
}
