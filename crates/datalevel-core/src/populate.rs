use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Identity field of every document model
pub const IDENTITY: &str = "_id";

/// Path segment addressing every value of a map
pub const MAP_VALUES: &str = "$*";

/// Field projections and population directives needed to render one model at
/// one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLevelPopulate {
    /// Field paths to fetch, dot-joined for embedded fields
    pub projections: IndexSet<String>,

    /// Relations to expand, unique by `path`
    pub populates: Vec<Populate>,
}

/// A directive to expand the relation stored at `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Populate {
    pub path: String,

    /// Fields of the related document to fetch, each mapped to `1`. Absent
    /// for count relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<IndexMap<String, u8>>,

    /// Directives applied to the related documents
    #[serde(default)]
    pub populate: Vec<Populate>,
}

impl DataLevelPopulate {
    /// The result for models stored as a single value: project the field
    /// itself and nothing nested.
    pub fn opaque() -> Self {
        Self {
            projections: IndexSet::from([String::new()]),
            populates: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty() && self.populates.is_empty()
    }

    pub fn populate(&self, path: &str) -> Option<&Populate> {
        self.populates.iter().find(|populate| populate.path == path)
    }

    /// Add a directive, replacing an existing directive for the same path in
    /// place.
    pub fn push_populate(&mut self, populate: Populate) {
        match self.populates.iter_mut().find(|p| p.path == populate.path) {
            Some(existing) => *existing = populate,
            None => self.populates.push(populate),
        }
    }

    /// Union `other` into `self`. Directives from `other` win on path
    /// collisions.
    pub fn merge(&mut self, other: &DataLevelPopulate) {
        self.projections.extend(other.projections.iter().cloned());

        for populate in &other.populates {
            self.push_populate(populate.clone());
        }
    }
}

impl Populate {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            select: None,
            populate: vec![],
        }
    }

    /// Directive fetching `target`'s projections (plus the identity field)
    /// and expanding its own relations.
    pub fn with_target(path: impl Into<String>, target: &DataLevelPopulate) -> Self {
        let select = target
            .projections
            .iter()
            .map(String::as_str)
            .chain([IDENTITY])
            .filter(|projection| !projection.is_empty())
            .map(|projection| (projection.to_string(), 1))
            .collect();

        Self {
            path: path.into(),
            select: Some(select),
            populate: target.populates.clone(),
        }
    }

    /// Returns a copy of this directive nested under `parent`.
    pub fn reparent(&self, parent: &str) -> Self {
        Self {
            path: join_path(parent, &self.path),
            ..self.clone()
        }
    }

    pub fn selects(&self, field: &str) -> bool {
        self.select
            .as_ref()
            .is_some_and(|select| select.contains_key(field))
    }
}

/// Joins two path segments with a `.`. An empty child resolves to the parent.
pub fn join_path(parent: &str, child: &str) -> String {
    if child.is_empty() {
        parent.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_populate_replaces_in_place() {
        let mut res = DataLevelPopulate::default();
        res.push_populate(Populate::new("a"));
        res.push_populate(Populate::new("b"));

        let mut replacement = Populate::new("a");
        replacement.select = Some(IndexMap::from([("x".to_string(), 1)]));
        res.push_populate(replacement);

        let paths: Vec<_> = res.populates.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["a", "b"]);
        assert!(res.populates[0].selects("x"));
    }

    #[test]
    fn with_target_selects_identity_once() {
        let target = DataLevelPopulate {
            projections: IndexSet::from(["_id".to_string(), "label".to_string()]),
            populates: vec![],
        };

        let populate = Populate::with_target("child", &target);
        let select: Vec<_> = populate.select.unwrap().into_keys().collect();
        assert_eq!(select, ["_id", "label"]);
    }

    #[test]
    fn with_target_skips_opaque_projection() {
        let populate = Populate::with_target("status", &DataLevelPopulate::opaque());
        let select: Vec<_> = populate.select.unwrap().into_keys().collect();
        assert_eq!(select, ["_id"]);
    }

    #[test]
    fn reparent_nests_path() {
        let populate = Populate::new("author").reparent("meta");
        assert_eq!(populate.path, "meta.author");
    }

    #[test]
    fn serializes_directives() {
        let target = DataLevelPopulate {
            projections: IndexSet::from(["_id".to_string(), "label".to_string()]),
            populates: vec![],
        };
        let res = DataLevelPopulate {
            projections: IndexSet::from(["_id".to_string(), "child".to_string()]),
            populates: vec![Populate::with_target("child", &target), Populate::new("count")],
        };

        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "projections": ["_id", "child"],
                "populates": [
                    { "path": "child", "select": { "_id": 1, "label": 1 }, "populate": [] },
                    { "path": "count", "populate": [] },
                ],
            })
        );
    }
}
