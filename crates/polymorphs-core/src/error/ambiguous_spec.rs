use super::Error;

/// Error when a double join declaration does not name exactly two
/// collections.
#[derive(Debug)]
pub(super) struct AmbiguousSpecError {
    collections: Vec<String>,
}

impl std::error::Error for AmbiguousSpecError {}

impl core::fmt::Display for AmbiguousSpecError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "a double polymorphic join needs exactly two collections of target types, \
             optionally followed by reserved options prefixed with a collection name; \
             found {}: [{}]",
            self.collections.len(),
            self.collections.join(", ")
        )
    }
}

impl Error {
    /// Creates an ambiguous spec error listing the collections that were
    /// found.
    pub fn ambiguous_spec(collections: &[String]) -> Error {
        Error::from(super::ErrorKind::AmbiguousSpec(AmbiguousSpecError {
            collections: collections.to_vec(),
        }))
    }

    /// Returns `true` if this error is an ambiguous spec error.
    pub fn is_ambiguous_spec(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::AmbiguousSpec(_))
    }
}
