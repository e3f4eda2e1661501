use crate::{Error, Result};

use std::fmt;

/// Dotted ancestry of the resolution in progress.
///
/// Models enter as `Parent(Model)` so the same model at different positions in
/// the tree stays distinguishable; fields enter as `.field`. A path such as
/// `Order.customer(Customer).orders` has three segments.
#[derive(Debug, Clone, Default)]
pub(super) struct ResolvePath {
    path: Option<String>,
}

impl ResolvePath {
    pub(super) fn root() -> Self {
        Self::default()
    }

    pub(super) fn depth(&self) -> usize {
        self.path.as_ref().map_or(0, |path| path.split('.').count())
    }

    /// Fails once the path has grown past `max_depth` segments.
    pub(super) fn check(&self, max_depth: usize) -> Result<()> {
        match &self.path {
            Some(path) if self.depth() > max_depth => Err(Error::circle_dependency(path.as_str())),
            _ => Ok(()),
        }
    }

    pub(super) fn enter_model(&self, name: &str) -> Self {
        let path = match &self.path {
            Some(path) => format!("{path}({name})"),
            None => name.to_string(),
        };

        Self { path: Some(path) }
    }

    pub(super) fn enter_field(&self, name: &str) -> Self {
        let path = match &self.path {
            Some(path) => format!("{path}.{name}"),
            None => name.to_string(),
        };

        Self { path: Some(path) }
    }
}

impl From<&str> for ResolvePath {
    fn from(path: &str) -> Self {
        Self {
            path: (!path.is_empty()).then(|| path.to_string()),
        }
    }
}

impl fmt::Display for ResolvePath {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.path.as_deref().unwrap_or(""))
    }
}
