use crate::{
    assoc::{AliasTable, AssociationSpec, JoinPlan},
    schema::ModelName,
};

use std::{collections::HashSet, hash::Hash};

/// The union view of a polymorphic relation, registered on its parent.
#[derive(Debug)]
pub struct PolymorphicReflection {
    pub spec: AssociationSpec,
    pub aliases: AliasTable,
    pub plan: JoinPlan,
}

impl PolymorphicReflection {
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn parent(&self) -> &ModelName {
        &self.spec.parent
    }

    /// Plural identifiers of the target types
    pub fn from(&self) -> &[String] {
        &self.spec.from
    }

    /// Drops rows whose identity was already seen when the relation is
    /// declared `uniq`. Order is preserved.
    pub fn dedup<T, K>(&self, rows: Vec<T>, identity: impl Fn(&T) -> K) -> Vec<T>
    where
        K: Eq + Hash,
    {
        if !self.spec.uniq {
            return rows;
        }

        let mut seen = HashSet::new();
        rows.into_iter()
            .filter(|row| seen.insert(identity(row)))
            .collect()
    }
}
