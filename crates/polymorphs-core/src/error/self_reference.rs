use super::Error;

/// Error when the parent's role in the join has the same name as one of the
/// targets' singular names.
#[derive(Debug)]
pub(super) struct SelfReferenceError {
    parent: Box<str>,
    target: Box<str>,
}

impl std::error::Error for SelfReferenceError {}

impl core::fmt::Display for SelfReferenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "`{}` cannot have a self-referential polymorphic relation through `{}` \
             without renaming the non-polymorphic foreign key in the join model; \
             rename the foreign key role with the `as` option",
            self.parent, self.target
        )
    }
}

impl Error {
    /// Creates a self reference error.
    pub fn self_reference(parent: impl Into<String>, target: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SelfReference(SelfReferenceError {
            parent: parent.into().into(),
            target: target.into().into(),
        }))
    }

    /// Returns `true` if this error is a self reference error.
    pub fn is_self_reference(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::SelfReference(_))
    }
}
