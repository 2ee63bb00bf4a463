mod registry;
pub use registry::Registry;

pub use polymorphs_core::{assoc, schema, Error, Result, Schema};
pub use polymorphs_sql as sql;
