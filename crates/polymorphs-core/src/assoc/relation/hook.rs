use crate::{
    schema::{ModelName, Schema},
    Result,
};

/// A capability installed on a model, run when its records are saved.
///
/// Hooks are identified by kind and column; installing the same hook twice
/// is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Rewrites the type stored in `column` to its base type, so rows written
    /// through a subtype resolve against the table of the whole hierarchy.
    StiClassRewrite { column: String },
}

/// A hook to install on a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRegistration {
    pub model: ModelName,
    pub hook: Hook,
}

impl Hook {
    pub fn sti_class_rewrite(column: impl Into<String>) -> Hook {
        Hook::StiClassRewrite {
            column: column.into(),
        }
    }

    pub fn identity(&self) -> (&'static str, &str) {
        match self {
            Hook::StiClassRewrite { column } => ("sti_class_rewrite", column),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Hook::StiClassRewrite { column } => column,
        }
    }

    /// The value to store in the hook's column in place of `type_name`.
    pub fn rewrite(&self, schema: &Schema, type_name: &str) -> Result<String> {
        match self {
            Hook::StiClassRewrite { .. } => {
                let model = schema.expect_model(&ModelName::new(type_name))?;
                Ok(schema.base_of(model).name.to_string())
            }
        }
    }
}
