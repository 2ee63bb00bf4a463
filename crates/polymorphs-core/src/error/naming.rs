use super::Error;

/// Error when an identifier does not survive the pluralization round trip.
///
/// Irregular words would otherwise silently produce wrong derived names.
#[derive(Debug)]
pub(super) struct NamingError {
    ident: Box<str>,
    singular: Box<str>,
    plural: Box<str>,
}

impl std::error::Error for NamingError {}

impl core::fmt::Display for NamingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "pluralization rules are not set up correctly; `{}` singularizes to `{}`, \
             which pluralizes to `{}`; did you mean `{}`?",
            self.ident, self.singular, self.plural, self.plural
        )
    }
}

impl Error {
    /// Creates a naming error for `ident`, reporting the singular and the
    /// re-pluralized forms it was checked against.
    pub fn naming(
        ident: impl Into<String>,
        singular: impl Into<String>,
        plural: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::Naming(NamingError {
            ident: ident.into().into(),
            singular: singular.into().into(),
            plural: plural.into().into(),
        }))
    }

    /// Returns `true` if this error is a naming error.
    pub fn is_naming(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Naming(_))
    }
}
