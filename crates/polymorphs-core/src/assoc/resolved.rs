use super::{AliasTable, AssociationSpec};
use crate::{
    schema::{Model, Schema},
    Result,
};

/// A target type of a polymorphic relation, resolved against the schema
#[derive(Debug)]
pub struct Target<'a> {
    /// Plural, possibly namespaced identifier, `zoo/lions`
    pub ident: &'a str,

    pub model: &'a Model,

    /// Root of the model's inheritance chain
    pub base: &'a Model,
}

/// Every model taking part in a polymorphic relation
#[derive(Debug)]
pub struct Resolved<'a> {
    pub schema: &'a Schema,
    pub spec: &'a AssociationSpec,
    pub parent: &'a Model,
    pub join: &'a Model,

    /// Targets in declaration order
    pub targets: Vec<Target<'a>>,

    pub aliases: AliasTable,
}

impl<'a> Resolved<'a> {
    pub fn new(schema: &'a Schema, spec: &'a AssociationSpec) -> Result<Self> {
        let parent = schema.expect_model(&spec.parent)?;
        let join = schema.expect_model(&spec.join_model)?;

        let targets = spec
            .from
            .iter()
            .map(|ident| {
                let model = schema.resolve_plural(ident)?;
                Ok(Target {
                    ident: ident.as_str(),
                    model,
                    base: schema.base_of(model),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut participants = vec![(spec.join_ident.as_str(), join)];
        participants.extend(targets.iter().map(|target| (target.ident, target.model)));

        let aliases = AliasTable::build(schema, &participants);

        Ok(Self {
            schema,
            spec,
            parent,
            join,
            targets,
            aliases,
        })
    }

    /// Targets ordered by identifier
    pub fn sorted_targets(&self) -> Vec<&Target<'a>> {
        let mut targets: Vec<_> = self.targets.iter().collect();
        targets.sort_by(|a, b| a.ident.cmp(b.ident));
        targets
    }

    pub fn parent_base(&self) -> &'a Model {
        self.schema.base_of(self.parent)
    }
}
