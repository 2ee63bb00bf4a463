//! The polymorphic relation compiler.
//!
//! A declaration such as `Petfood has_many_polymorphs eaters from [dogs,
//! cats, birds]` is normalized into an [`AssociationSpec`], resolved against
//! the [`Schema`](crate::Schema), and compiled into a [`Batch`]: the union
//! view ([`PolymorphicReflection`]), the join relation, one narrowed relation
//! per target type on the parent and the reverse relations on every target.

mod alias;
pub use alias::AliasTable;

mod compile;
pub use compile::{compile, Batch};

mod derived;
pub use derived::{forward_name, DelegateToUnion, Derived, DerivedAssociation};

mod devolve;
pub use devolve::{devolve, Clause, ColumnRef, Fragment};

mod double;
pub use double::{compile_double, conflicts, Collection, DoubleJoinSpec, RESERVED_KEYS};

mod join;
pub use join::{
    ColumnPath, Join, JoinConstraint, JoinKind, JoinPlan, Projection, SelectColumn,
    ASSOCIATION_ID_COLUMN, PARENT_ALIAS, PARENT_CLASS_COLUMN,
};

pub mod naming;

mod options;
pub use options::{Dependent, Extension, Extensions, NamedExtension, OptionValue, Options};

mod relation;
pub use relation::{
    Alias, HasMany, HasManyThrough, Hook, HookRegistration, Merged, PolymorphicReflection,
    Registration, Relation,
};

mod resolved;
pub use resolved::{Resolved, Target};

mod spec;
pub use spec::{AssociationSpec, Clauses, KEYS};
