use super::Error;

/// Error when a set of model declarations cannot form a schema.
///
/// This occurs when:
/// - A model name is registered twice
/// - A field, mixin, base model, or discrimination names an unregistered model
/// - A stored or virtual reference targets a model that is not a document
/// - Mixins or base models form a cycle
/// - A field name contains a `.`
///
/// These errors are raised by `Builder::build`, before any resolution runs.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
