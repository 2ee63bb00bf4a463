mod adhoc;
mod ambiguous_spec;
mod invalid_schema;
mod naming;
mod schema_resolution;
mod self_reference;
mod unknown_option;
mod validation;

use adhoc::AdhocError;
use ambiguous_spec::AmbiguousSpecError;
use invalid_schema::InvalidSchemaError;
use naming::NamingError;
use schema_resolution::SchemaResolutionError;
use self_reference::SelfReferenceError;
use std::sync::Arc;
use unknown_option::UnknownOptionError;
use validation::ValidationError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while declaring or compiling a polymorphic relation.
///
/// All errors are declaration-time configuration errors. None of them are
/// retryable.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    fn root(&self) -> &Error {
        self.chain().last().unwrap()
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// The kind of the innermost error, skipping any context layered on top.
    fn root_kind(&self) -> &ErrorKind {
        self.root().kind()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Validation(ValidationError),
    Naming(NamingError),
    SchemaResolution(SchemaResolutionError),
    SelfReference(SelfReferenceError),
    AmbiguousSpec(AmbiguousSpecError),
    UnknownOption(UnknownOptionError),
    InvalidSchema(InvalidSchemaError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
            Naming(err) => core::fmt::Display::fmt(err, f),
            SchemaResolution(err) => core::fmt::Display::fmt(err, f),
            SelfReference(err) => core::fmt::Display::fmt(err, f),
            AmbiguousSpec(err) => core::fmt::Display::fmt(err, f),
            UnknownOption(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown polymorphs error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::naming("dog", "dog", "dogs");
        let chained = root
            .context(err!("verifying `from`"))
            .context(err!("Petfood.eaters"));

        assert_eq!(
            chained.to_string(),
            "Petfood.eaters: verifying `from`: pluralization rules are not set up correctly; \
             `dog` singularizes to `dog`, which pluralizes to `dogs`; did you mean `dogs`?"
        );
        assert!(chained.is_naming());
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn validation_error() {
        let err = Error::validation("`from` must be a non-empty list of identifiers");
        assert_eq!(
            err.to_string(),
            "invalid options: `from` must be a non-empty list of identifiers"
        );
        assert!(err.is_validation());
        assert!(!err.is_naming());
    }

    #[test]
    fn schema_resolution_error() {
        let err = Error::schema_resolution("zoo/lions", "Zoo::Lion");
        assert_eq!(
            err.to_string(),
            "could not find a model for `zoo/lions` (tried `Zoo::Lion`); \
             namespaced models are written as `module/plural`"
        );
        assert!(err.is_schema_resolution());
    }

    #[test]
    fn self_reference_error() {
        let err = Error::self_reference("Animal", "animals");
        assert!(err.to_string().contains("rename the foreign key role"));
        assert!(err.is_self_reference());
    }

    #[test]
    fn unknown_option_error() {
        let err = Error::unknown_option("fromm");
        assert_eq!(err.to_string(), "unknown option `fromm`");
        assert!(err.is_unknown_option());
    }

    #[test]
    fn ambiguous_spec_error() {
        let err = Error::ambiguous_spec(&["eaters".to_string()]);
        assert!(err.to_string().contains("found 1: [eaters]"));
        assert!(err.is_ambiguous_spec());
    }

    #[test]
    fn invalid_schema_error() {
        let err = Error::invalid_schema("model `Dog` is defined twice");
        assert_eq!(err.to_string(), "invalid schema: model `Dog` is defined twice");
        assert!(err.is_invalid_schema());
    }
}
