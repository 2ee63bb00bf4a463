mod alias;
pub use alias::Alias;

mod has_many;
pub use has_many::HasMany;

mod has_many_through;
pub use has_many_through::HasManyThrough;

mod hook;
pub use hook::{Hook, HookRegistration};

mod merged;
pub use merged::Merged;

mod polymorphic;
pub use polymorphic::PolymorphicReflection;

mod registration;
pub use registration::Registration;

use std::{fmt, sync::Arc};

/// Relation metadata registered on a model
#[derive(Clone)]
pub enum Relation {
    /// The union view over every target type
    Polymorphic(Arc<PolymorphicReflection>),

    /// Rows of a join model referencing the owner
    HasMany(HasMany),

    /// Records reached through another relation
    HasManyThrough(HasManyThrough),

    /// Read-only concatenation of two relations
    Merged(Merged),

    /// Another name for an existing relation
    Alias(Alias),
}

impl Relation {
    pub fn is_polymorphic(&self) -> bool {
        matches!(self, Self::Polymorphic(..))
    }

    pub fn as_polymorphic(&self) -> Option<&Arc<PolymorphicReflection>> {
        match self {
            Self::Polymorphic(reflection) => Some(reflection),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_polymorphic(&self) -> &Arc<PolymorphicReflection> {
        match self {
            Self::Polymorphic(reflection) => reflection,
            _ => panic!("expected relation to be `Polymorphic`, but was {self:?}"),
        }
    }

    pub fn is_has_many(&self) -> bool {
        matches!(self, Self::HasMany(..))
    }

    pub fn as_has_many(&self) -> Option<&HasMany> {
        match self {
            Self::HasMany(has_many) => Some(has_many),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_has_many(&self) -> &HasMany {
        match self {
            Self::HasMany(has_many) => has_many,
            _ => panic!("expected relation to be `HasMany`, but was {self:?}"),
        }
    }

    pub fn is_has_many_through(&self) -> bool {
        matches!(self, Self::HasManyThrough(..))
    }

    pub fn as_has_many_through(&self) -> Option<&HasManyThrough> {
        match self {
            Self::HasManyThrough(through) => Some(through),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_has_many_through(&self) -> &HasManyThrough {
        match self {
            Self::HasManyThrough(through) => through,
            _ => panic!("expected relation to be `HasManyThrough`, but was {self:?}"),
        }
    }

    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged(..))
    }

    #[track_caller]
    pub fn expect_merged(&self) -> &Merged {
        match self {
            Self::Merged(merged) => merged,
            _ => panic!("expected relation to be `Merged`, but was {self:?}"),
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(..))
    }

    #[track_caller]
    pub fn expect_alias(&self) -> &Alias {
        match self {
            Self::Alias(alias) => alias,
            _ => panic!("expected relation to be `Alias`, but was {self:?}"),
        }
    }

    /// Read-only relations reject writes
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Polymorphic(..) | Self::Merged(..))
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polymorphic(reflection) => write!(
                f,
                "Polymorphic({}.{})",
                reflection.spec.parent, reflection.spec.name
            ),
            Self::HasMany(has_many) => fmt::Debug::fmt(has_many, f),
            Self::HasManyThrough(through) => fmt::Debug::fmt(through, f),
            Self::Merged(merged) => fmt::Debug::fmt(merged, f),
            Self::Alias(alias) => fmt::Debug::fmt(alias, f),
        }
    }
}
