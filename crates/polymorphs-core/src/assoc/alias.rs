use crate::schema::{Model, Schema};

use indexmap::IndexMap;
use tracing::warn;

/// Unique, deterministic aliases for every column of every participating
/// table.
///
/// Participants are ordered by identifier. The `c`th column of the `t`th
/// participant's table is aliased `t<t>_r<c>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasTable {
    /// (table, column) to alias
    aliases: IndexMap<(String, String), String>,
}

impl AliasTable {
    /// Allocates aliases for `participants`, given as (identifier, model)
    /// pairs in any order.
    ///
    /// A participant whose table does not exist yet is skipped with a
    /// warning. It still consumes its index so the remaining aliases do not
    /// depend on which tables exist.
    pub fn build(schema: &Schema, participants: &[(&str, &Model)]) -> AliasTable {
        let mut participants = participants.to_vec();
        participants.sort_by(|a, b| a.0.cmp(b.0));

        let mut aliases = IndexMap::new();

        for (t, (ident, model)) in participants.iter().enumerate() {
            let Some(table) = schema.table_for(model) else {
                warn!(
                    model = %model.name,
                    table = model.table_name(),
                    "could not find table for `{ident}`; skipping its columns"
                );
                continue;
            };

            for (c, column) in table.columns.iter().enumerate() {
                aliases
                    .entry((table.name.clone(), column.name.clone()))
                    .or_insert_with(|| format!("t{t}_r{c}"));
            }
        }

        AliasTable { aliases }
    }

    pub fn get(&self, table: &str, column: &str) -> Option<&str> {
        self.aliases
            .get(&(table.to_string(), column.to_string()))
            .map(String::as_str)
    }

    /// (table, column, alias) triples in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.aliases
            .iter()
            .map(|((table, column), alias)| (table.as_str(), column.as_str(), alias.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
