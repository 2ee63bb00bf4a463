use crate::{
    assoc::{Clauses, Extensions},
    schema::ModelName,
};

/// Records reached through a join relation registered on the same model
#[derive(Debug, Clone)]
pub struct HasManyThrough {
    /// Model of the reached records
    pub target: ModelName,

    /// Name of the join relation
    pub through: String,

    /// Relation on the join model leading to the records
    pub source: String,

    /// Type stored next to the source key, for polymorphic sources
    pub source_type: Option<ModelName>,

    pub clauses: Clauses,
    pub extensions: Extensions,
}
