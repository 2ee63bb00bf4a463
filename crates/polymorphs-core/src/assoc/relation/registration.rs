use super::Relation;
use crate::schema::ModelName;

/// A relation to install on a model
#[derive(Debug, Clone)]
pub struct Registration {
    pub model: ModelName,
    pub name: String,
    pub relation: Relation,

    /// Skip the registration when the name is already taken instead of
    /// failing
    pub if_absent: bool,
}

impl Registration {
    pub fn new(model: &ModelName, name: impl Into<String>, relation: Relation) -> Registration {
        Registration {
            model: model.clone(),
            name: name.into(),
            relation,
            if_absent: false,
        }
    }

    pub fn if_absent(mut self) -> Registration {
        self.if_absent = true;
        self
    }
}
