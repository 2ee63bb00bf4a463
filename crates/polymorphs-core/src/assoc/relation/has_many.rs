use crate::{
    assoc::{Dependent, Extensions},
    schema::ModelName,
};

/// Join model rows pointing at the owner
#[derive(Debug, Clone)]
pub struct HasMany {
    /// Join model
    pub target: ModelName,

    /// Join model column referencing the owner
    pub foreign_key: String,

    /// Polymorphic role the owner plays on the join model. When set, the
    /// join model stores the owner's type next to the key.
    pub role: Option<String>,

    /// What happens to the join rows when the owner is destroyed
    pub dependent: Option<Dependent>,

    pub conditions: Option<String>,
    pub order: Option<String>,
    pub extensions: Extensions,
}
