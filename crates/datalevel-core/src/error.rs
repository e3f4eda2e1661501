mod adhoc;
mod circle_dependency;
mod invalid_schema;
mod unknown_model;

use adhoc::AdhocError;
use circle_dependency::CircleDependencyError;
use invalid_schema::InvalidSchema;
use std::sync::Arc;
use unknown_model::UnknownModelError;

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while building a schema or resolving data levels.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
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

        // A consequent that is shared or already chained is re-wrapped by its
        // message so the existing chain stays intact.
        let reusable = Arc::get_mut(&mut err.inner).is_some_and(|inner| inner.cause.is_none());
        if !reusable {
            err = Error::from(ErrorKind::Adhoc(AdhocError::new(err.to_string())));
        }

        if let Some(inner) = Arc::get_mut(&mut err.inner) {
            inner.cause = Some(self);
        }
        err
    }

    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(args)))
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => self
                .inner
                .cause
                .as_ref()
                .map(|cause| cause as &(dyn std::error::Error + 'static)),
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
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    CircleDependency(CircleDependencyError),
    InvalidSchema(InvalidSchema),
    UnknownModel(UnknownModelError),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            CircleDependency(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            UnknownModel(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind, cause: None }),
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
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn context_with_shared_consequent_keeps_chain() {
        let consequent = err!("resolving `Order`");
        let _shared = consequent.clone();

        let err = Error::circle_dependency("Order.items(Item).order").context(consequent);
        assert_eq!(
            err.to_string(),
            "resolving `Order`: circle dependency detected at `Order.items(Item).order`"
        );
        assert!(!err.is_circle_dependency());
    }

    #[test]
    fn bail_returns_adhoc_error() {
        fn lookup(name: &str) -> crate::Result<()> {
            bail!("no handler for `{name}`");
        }

        let err = lookup("Ghost").unwrap_err();
        assert_eq!(err.to_string(), "no handler for `Ghost`");
        assert!(!err.is_unknown_model());
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn circle_dependency_error() {
        let err = Error::circle_dependency("A.b(B).a(A).b");
        assert!(err.is_circle_dependency());
        assert_eq!(err.circle_dependency_path(), Some("A.b(B).a(A).b"));
        assert_eq!(
            err.to_string(),
            "circle dependency detected at `A.b(B).a(A).b`"
        );
    }

    #[test]
    fn circle_dependency_path_through_context() {
        let err = Error::circle_dependency("A.b").context(err!("GET /a"));
        assert_eq!(err.circle_dependency_path(), None);
        assert_eq!(err.to_string(), "GET /a: circle dependency detected at `A.b`");
    }

    #[test]
    fn invalid_schema_error() {
        let err = Error::invalid_schema("model `User` is registered twice");
        assert!(err.is_invalid_schema());
        assert_eq!(
            err.to_string(),
            "invalid schema: model `User` is registered twice"
        );
    }

    #[test]
    fn unknown_model_error() {
        let err = Error::unknown_model("Ghost");
        assert!(err.is_unknown_model());
        assert_eq!(err.to_string(), "unknown model `Ghost`");
    }
}
