use super::Error;

/// Error when a type identifier cannot be mapped to a model in the schema.
#[derive(Debug)]
pub(super) struct SchemaResolutionError {
    ident: Box<str>,
    tried: Box<str>,
}

impl std::error::Error for SchemaResolutionError {}

impl core::fmt::Display for SchemaResolutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "could not find a model for `{}` (tried `{}`); \
             namespaced models are written as `module/plural`",
            self.ident, self.tried
        )
    }
}

impl Error {
    /// Creates a schema resolution error. `tried` is the model name the
    /// identifier was classified to.
    pub fn schema_resolution(ident: impl Into<String>, tried: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaResolution(SchemaResolutionError {
            ident: ident.into().into(),
            tried: tried.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema resolution error.
    pub fn is_schema_resolution(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::SchemaResolution(_))
    }
}
