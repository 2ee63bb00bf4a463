//! Persisted-schema metadata consumed by the compiler.
//!
//! The compiler only needs to know, for every participating type, its name,
//! its base type (for single table inheritance), its table name, its primary
//! key and the ordered column names of its table. A model may be declared
//! while its table does not exist yet; callers of [`Schema::table_for`] must
//! handle the `None` case.

mod builder;
pub use builder::Builder;

mod model;
pub use model::Model;

mod name;
pub use name::ModelName;

mod table;
pub use table::{Column, Table};

use crate::{Error, Result};
use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Schema {
    /// Models by name, in registration order
    pub models: IndexMap<ModelName, Model>,

    /// Tables that exist in the database, by name
    pub tables: IndexMap<String, Table>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn model(&self, name: &ModelName) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// The table backing `model`, if it exists
    pub fn table_for(&self, model: &Model) -> Option<&Table> {
        self.table(model.table_name())
    }

    /// Walks the inheritance chain up to the root model.
    pub fn base_of<'a>(&'a self, model: &'a Model) -> &'a Model {
        let mut curr = model;
        while let Some(base) = &curr.base {
            curr = self.models.get(base).expect("base model verified by builder");
        }
        curr
    }

    /// Resolves a model by name, failing with a schema resolution error.
    pub fn expect_model(&self, name: &ModelName) -> Result<&Model> {
        self.model(name)
            .ok_or_else(|| Error::schema_resolution(name.to_string(), name.to_string()))
    }

    /// Resolves a plural, possibly namespaced, type identifier (`dogs`,
    /// `zoo/lions`) to its model.
    pub fn resolve_plural(&self, ident: &str) -> Result<&Model> {
        let name = ModelName::from_plural(ident);
        self.model(&name)
            .ok_or_else(|| Error::schema_resolution(ident, name.to_string()))
    }
}
