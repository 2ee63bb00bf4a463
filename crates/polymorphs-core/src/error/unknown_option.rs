use super::Error;

#[derive(Debug)]
pub(super) struct UnknownOptionError {
    key: Box<str>,
}

impl std::error::Error for UnknownOptionError {}

impl core::fmt::Display for UnknownOptionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown option `{}`", self.key)
    }
}

impl Error {
    /// Creates an unknown option error.
    pub fn unknown_option(key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownOption(UnknownOptionError {
            key: key.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown option error.
    pub fn is_unknown_option(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnknownOption(_))
    }
}
