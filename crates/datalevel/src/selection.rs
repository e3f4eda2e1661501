use datalevel_core::{schema::app::Level, DataLevelPopulate, Populate};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field selection and populate options for one read, keyed the way a
/// document query builder consumes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// The level the selection was resolved at
    pub level: Level,

    /// Field paths to fetch, each mapped to `1`
    pub fields: IndexMap<String, u8>,

    /// Populate options keyed by path
    pub populate: IndexMap<String, Populate>,
}

impl Selection {
    pub(crate) fn new(level: Level, populates: &DataLevelPopulate) -> Self {
        Self {
            level,
            fields: populates
                .projections
                .iter()
                .filter(|projection| !projection.is_empty())
                .map(|projection| (projection.clone(), 1))
                .collect(),
            populate: populates
                .populates
                .iter()
                .map(|populate| (populate.path.clone(), populate.clone()))
                .collect(),
        }
    }

    pub fn selects(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}
