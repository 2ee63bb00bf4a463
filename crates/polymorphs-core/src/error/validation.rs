use super::Error;

/// Error when the declarative options are malformed.
///
/// This occurs when:
/// - A required option is missing (`from`)
/// - An option has the wrong shape (`from` is not a list, `limit` is not an
///   integer)
/// - A relation name collides with one already registered on a model
#[derive(Debug)]
pub(super) struct ValidationError {
    message: Box<str>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid options: {}", self.message)
    }
}

impl Error {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Validation(_))
    }
}
