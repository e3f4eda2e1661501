use super::Error;

/// Error when resolving a model's data levels would populate indefinitely.
///
/// The path is the dotted ancestry of models and fields that was being
/// resolved when the depth bound was exceeded, e.g.
/// `Order.customer(Customer).orders(Order).customer`. The fix is a model
/// configuration change (a lower populate level on one of the edges), so
/// callers should surface it rather than retry.
#[derive(Debug)]
pub(super) struct CircleDependencyError {
    path: Box<str>,
}

impl std::error::Error for CircleDependencyError {}

impl core::fmt::Display for CircleDependencyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "circle dependency detected at `{}`", self.path)
    }
}

impl Error {
    /// Creates a circle dependency error carrying the offending path.
    pub fn circle_dependency(path: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::CircleDependency(CircleDependencyError {
            path: path.into().into(),
        }))
    }

    /// Returns `true` if this error is a circle dependency error.
    pub fn is_circle_dependency(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CircleDependency(_))
    }

    /// Returns the offending path if this error is a circle dependency error.
    pub fn circle_dependency_path(&self) -> Option<&str> {
        match self.kind() {
            super::ErrorKind::CircleDependency(err) => Some(&err.path),
            _ => None,
        }
    }
}
