use super::ModelName;

use std_util::str;

/// A persisted type
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Name of the model
    pub name: ModelName,

    /// Parent model when the type is stored through single table
    /// inheritance. The root of the chain is the model's base type.
    pub base: Option<ModelName>,

    /// Name of the backing table. When not set, the schema builder derives
    /// it from the model name.
    pub table_name: Option<String>,

    /// Name of the primary key column
    pub primary_key: String,
}

impl Model {
    pub fn new(name: impl Into<ModelName>) -> Self {
        Self {
            name: name.into(),
            base: None,
            table_name: None,
            primary_key: "id".to_string(),
        }
    }

    pub fn base(mut self, base: impl Into<ModelName>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Name of the backing table.
    ///
    /// # Panics
    ///
    /// Panics if the model did not go through the schema builder and has no
    /// explicit table name.
    pub fn table_name(&self) -> &str {
        self.table_name
            .as_deref()
            .expect("table name is resolved by the schema builder")
    }

    /// The table name derived from the model name: `Zoo::Lion` is stored in
    /// `lions`.
    pub(crate) fn default_table_name(&self) -> String {
        str::pluralize(&str::snake_case(self.name.demodulize()))
    }
}
