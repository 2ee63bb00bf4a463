use super::{Model, ModelName, Schema, Table};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Builder {
    /// Models as they were registered
    models: Vec<Model>,

    /// Tables that exist in the database
    tables: Vec<Table>,

    /// If set, prefix all derived table names with this string
    table_name_prefix: Option<String>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    /// Build options
    builder: &'a Builder,

    models: IndexMap<ModelName, Model>,

    tables: IndexMap<String, Table>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    pub fn table(&mut self, table: Table) -> &mut Self {
        self.tables.push(table);
        self
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(&self) -> Result<Schema> {
        let mut build = BuildSchema {
            builder: self,
            models: IndexMap::new(),
            tables: IndexMap::new(),
        };

        for table in &self.tables {
            build.register_table(table)?;
        }

        for model in &self.models {
            build.register_model(model)?;
        }

        build.verify_bases()?;
        build.resolve_table_names();
        build.verify_primary_keys()?;

        Ok(Schema {
            models: build.models,
            tables: build.tables,
        })
    }
}

impl BuildSchema<'_> {
    fn register_table(&mut self, table: &Table) -> Result<()> {
        if self.tables.contains_key(&table.name) {
            return Err(Error::invalid_schema(format!(
                "table `{}` is defined more than once",
                table.name
            )));
        }

        let mut seen = HashSet::new();
        for column in &table.columns {
            if !seen.insert(&column.name) {
                return Err(Error::invalid_schema(format!(
                    "table `{}` has more than one column named `{}`",
                    table.name, column.name
                )));
            }
        }

        self.tables.insert(table.name.clone(), table.clone());
        Ok(())
    }

    fn register_model(&mut self, model: &Model) -> Result<()> {
        if self.models.contains_key(&model.name) {
            return Err(Error::invalid_schema(format!(
                "model `{}` is defined more than once",
                model.name
            )));
        }

        self.models.insert(model.name.clone(), model.clone());
        Ok(())
    }

    /// Models without an explicit table are stored in the table of their
    /// root model, or in a table derived from their own name.
    fn resolve_table_names(&mut self) {
        let mut resolved = vec![];

        for model in self.models.values() {
            if model.table_name.is_some() {
                continue;
            }

            let mut root = model;
            while let Some(base) = &root.base {
                root = &self.models[base];
            }

            let table_name = match &root.table_name {
                Some(table_name) => table_name.clone(),
                None => self.prefix_table_name(&root.default_table_name()),
            };
            resolved.push((model.name.clone(), table_name));
        }

        for (name, table_name) in resolved {
            self.models[&name].table_name = Some(table_name);
        }
    }

    /// Every base model must be registered and the inheritance chains must
    /// not loop.
    fn verify_bases(&self) -> Result<()> {
        for model in self.models.values() {
            let mut visited = HashSet::new();
            visited.insert(&model.name);

            let mut curr = model;
            while let Some(base) = &curr.base {
                let Some(next) = self.models.get(base) else {
                    return Err(Error::invalid_schema(format!(
                        "model `{}` inherits from `{base}`, which is not part of the schema",
                        curr.name
                    )));
                };

                if !visited.insert(&next.name) {
                    return Err(Error::invalid_schema(format!(
                        "model `{}` has a cyclic inheritance chain",
                        model.name
                    )));
                }

                curr = next;
            }
        }

        Ok(())
    }

    /// When a model's table exists, its primary key must be one of the
    /// table's columns.
    fn verify_primary_keys(&self) -> Result<()> {
        for model in self.models.values() {
            let Some(table) = self.tables.get(model.table_name()) else {
                continue;
            };

            if !table.has_column(&model.primary_key) {
                return Err(Error::invalid_schema(format!(
                    "primary key `{}` of model `{}` is not a column of table `{}`",
                    model.primary_key, model.name, table.name
                )));
            }
        }

        Ok(())
    }

    fn prefix_table_name(&self, name: &str) -> String {
        if let Some(prefix) = &self.builder.table_name_prefix {
            format!("{prefix}{name}")
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_table_names() {
        let schema = Schema::builder()
            .table_name_prefix("app_")
            .model(Model::new("Petfood"))
            .model(Model::new("Zoo::Lion"))
            .model(Model::new("Cat").table("felines"))
            .build()
            .unwrap();

        let name = |model: &str| {
            schema
                .model(&ModelName::new(model))
                .unwrap()
                .table_name()
                .to_string()
        };

        assert_eq!(name("Petfood"), "app_petfoods");
        assert_eq!(name("Zoo::Lion"), "app_lions");
        assert_eq!(name("Cat"), "felines");
    }

    #[test]
    fn rejects_unknown_base() {
        let err = Schema::builder()
            .model(Model::new("Dog").base("Animal"))
            .build()
            .unwrap_err();

        assert!(err.is_invalid_schema());
        assert!(err.to_string().contains("`Animal`"));
    }

    #[test]
    fn rejects_cyclic_base() {
        let err = Schema::builder()
            .model(Model::new("Dog").base("Cat"))
            .model(Model::new("Cat").base("Dog"))
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("cyclic"));
    }

    #[test]
    fn rejects_missing_primary_key_column() {
        let err = Schema::builder()
            .model(Model::new("Dog").primary_key("dog_id"))
            .table(Table::new("dogs", ["id", "name"]))
            .build()
            .unwrap_err();

        assert!(err.is_invalid_schema());
    }

    #[test]
    fn base_of_follows_chain() {
        let schema = Schema::builder()
            .model(Model::new("Animal"))
            .model(Model::new("Dog").base("Animal"))
            .model(Model::new("Puppy").base("Dog"))
            .build()
            .unwrap();

        let puppy = schema.model(&ModelName::new("Puppy")).unwrap();
        assert_eq!(schema.base_of(puppy).name, ModelName::new("Animal"));
        assert_eq!(puppy.table_name(), "animals");
    }
}
