//! Compiles declarative polymorphic relations into a
//! consistent set of derived relations.

mod error;
pub use error::{Error, IntoError};

pub mod assoc;

pub mod schema;
pub use schema::Schema;

/// A Result type alias that uses polymorphs' [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
