use super::{
    devolve, naming, Clauses, Extension, HasMany, HasManyThrough, Hook, HookRegistration,
    PolymorphicReflection, Registration, Relation, Resolved, Target,
};
use crate::{schema::ModelName, Error, Result};

use std::sync::Arc;
use tracing::debug;

/// Relations generated on the parent and the join model
#[derive(Debug)]
pub struct Derived {
    /// Union view and join relation on the parent
    pub parent: Vec<Registration>,

    pub hooks: Vec<HookRegistration>,

    /// One entry per target type, in declaration order
    pub targets: Vec<DerivedAssociation>,
}

/// The relations generated for one target type
#[derive(Debug)]
pub struct DerivedAssociation {
    pub target: ModelName,

    /// On the parent, reaching the target's records
    pub forward: Registration,

    /// Join relation on the target
    pub join: Option<Registration>,

    /// On the target, reaching back to the parents
    pub reverse: Option<Registration>,
}

/// Routes writes on a narrowed forward relation to the union view it was
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateToUnion {
    pub association: String,

    /// Type `clear` is restricted to
    pub target: ModelName,
}

impl Extension for DelegateToUnion {
    fn name(&self) -> &str {
        "delegate_to_union"
    }
}

pub(crate) fn generate(cx: &Resolved<'_>, reflection: &Arc<PolymorphicReflection>) -> Result<Derived> {
    let spec = cx.spec;
    let parent = &spec.parent;

    let union = Registration::new(parent, &spec.name, Relation::Polymorphic(reflection.clone()));

    let join = Registration::new(
        parent,
        &spec.through,
        Relation::HasMany(HasMany {
            target: spec.join_model.clone(),
            foreign_key: spec.foreign_key.clone(),
            role: spec.foreign_type_key.as_ref().map(|_| spec.role.clone()),
            dependent: Some(spec.dependent),
            conditions: spec.foreign_type_key.as_ref().map(|key| {
                format!(
                    "{}.{key} = '{}'",
                    cx.join.table_name(),
                    cx.parent_base().name
                )
            }),
            order: None,
            extensions: spec.join_extend.clone(),
        }),
    );

    let hooks = vec![HookRegistration {
        model: spec.join_model.clone(),
        hook: Hook::sti_class_rewrite(&spec.polymorphic_type_key),
    }];

    let mut targets = vec![];
    for target in &cx.targets {
        targets.push(DerivedAssociation {
            target: target.model.name.clone(),
            forward: forward(cx, target),
            join: None,
            reverse: None,
        });
    }

    for (target, derived) in cx.targets.iter().zip(targets.iter_mut()) {
        if let Some((join, reverse)) = reverse(cx, target)? {
            derived.join = Some(join);
            derived.reverse = Some(reverse);
        }
    }

    debug!(
        parent = %parent,
        association = %spec.name,
        targets = targets.len(),
        "derived polymorphic relations"
    );

    Ok(Derived {
        parent: vec![union, join],
        hooks,
        targets,
    })
}

/// Name of the forward relation to `target` on the parent
pub fn forward_name(cx: &Resolved<'_>, target: &Target<'_>) -> String {
    let spec = cx.spec;
    let singular = spec.singular();

    let mut name = if spec.rename_individual_collections {
        format!("{singular}_{}", target.ident)
    } else {
        target.ident.to_string()
    };

    // Double joins only qualify targets on parents that are conflicts too
    let qualify = spec.is_conflict(target.ident)
        && (!spec.is_double || spec.is_conflict(&cx.parent.name.tableize()));

    if !spec.rename_individual_collections && qualify {
        name = format!("{singular}_{name}");
    }

    naming::demodulate(&name)
}

fn forward(cx: &Resolved<'_>, target: &Target<'_>) -> Registration {
    let spec = cx.spec;
    let keep = target.model;

    let mut extensions: Vec<Arc<dyn Extension>> = vec![Arc::new(DelegateToUnion {
        association: spec.name.clone(),
        target: target.model.name.clone(),
    })];
    extensions.extend(spec.extend.iter().cloned());

    Registration::new(
        &spec.parent,
        forward_name(cx, target),
        Relation::HasManyThrough(HasManyThrough {
            target: target.model.name.clone(),
            through: spec.through.clone(),
            source: spec.singular(),
            source_type: Some(target.base.name.clone()),
            clauses: Clauses {
                conditions: devolve(cx, spec.view.conditions.as_deref(), keep),
                order: devolve(cx, spec.view.order.as_deref(), keep),
                group: devolve(cx, spec.view.group.as_deref(), keep),
                limit: spec.view.limit,
                offset: None,
            },
            extensions,
        }),
    )
}

/// The join relation on `target` and the relation back to the parents
/// through it.
fn reverse(cx: &Resolved<'_>, target: &Target<'_>) -> Result<Option<(Registration, Registration)>> {
    let spec = cx.spec;

    if naming::singular(target.ident) == spec.role {
        if spec.is_double {
            return Ok(None);
        }
        return Err(Error::self_reference(spec.parent.to_string(), target.ident));
    }

    if spec.is_double {
        return Ok(None);
    }

    // Conflicting targets are qualified with the association so they do not
    // collide with the other declaration naming the same type.
    let conflict = spec.is_conflict(target.ident);

    let mut through = spec.through.clone();
    if target.model.name == spec.parent {
        through.push_str("_as_child");
    }
    if conflict {
        through = format!("{through}_of_{}", spec.name);
    }

    let join = Registration::new(
        &target.model.name,
        &through,
        Relation::HasMany(HasMany {
            target: spec.join_model.clone(),
            foreign_key: spec.polymorphic_key.clone(),
            role: Some(spec.singular()),
            dependent: Some(spec.dependent),
            conditions: devolve(cx, spec.parent_scope.conditions.as_deref(), cx.join),
            order: devolve(cx, spec.parent_scope.order.as_deref(), cx.join),
            extensions: spec.join_extend.clone(),
        }),
    );

    let mut name = spec.role_plural();
    if spec.rename_individual_collections || conflict {
        name = format!("{name}_of_{}", spec.name);
    }

    let reverse = Registration::new(
        &target.model.name,
        name,
        Relation::HasManyThrough(HasManyThrough {
            target: spec.parent.clone(),
            through,
            source: spec.role.clone(),
            source_type: None,
            clauses: spec.parent_scope.clone(),
            extensions: spec.parent_extend.clone(),
        }),
    );

    Ok(Some((join, reverse)))
}
