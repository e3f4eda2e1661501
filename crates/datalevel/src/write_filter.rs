use datalevel_core::populate::MAP_VALUES;

use indexmap::IndexSet;
use serde_json::Value;

/// Drops server-managed fields from a client payload before it is persisted.
///
/// An omitted path removes a key equal to it or nested under it, so omitting
/// `meta` also removes a dotted update key such as `meta.createdAt`. Dotted
/// omits descend into nested objects and arrays; a `$*` segment matches every
/// value of a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteFilter {
    omits: IndexSet<String>,
}

impl WriteFilter {
    pub fn new(omits: impl IntoIterator<Item = String>) -> Self {
        Self {
            omits: omits.into_iter().collect(),
        }
    }

    /// Additionally drop `path`
    pub fn omit(mut self, path: impl Into<String>) -> Self {
        self.omits.insert(path.into());
        self
    }

    pub fn omits(&self) -> impl ExactSizeIterator<Item = &str> {
        self.omits.iter().map(String::as_str)
    }

    /// Returns true if a top-level payload key is dropped by this filter.
    pub fn is_omitted(&self, key: &str) -> bool {
        self.omits.iter().any(|omit| covers(omit, key))
    }

    pub fn apply(&self, payload: &mut Value) {
        for omit in &self.omits {
            remove_path(payload, omit);
        }
    }
}

fn remove_path(value: &mut Value, path: &str) {
    match value {
        Value::Array(items) => {
            for item in items {
                remove_path(item, path);
            }
        }
        Value::Object(object) => {
            object.retain(|key, _| !covers(path, key));

            for (key, value) in object.iter_mut() {
                if let Some(rest) = below(path, key) {
                    remove_path(value, rest);
                }
            }
        }
        _ => {}
    }
}

/// `key` is `omit` itself or a dotted path below it. A `$*` segment of
/// `omit` matches any single key segment.
fn covers(omit: &str, key: &str) -> bool {
    let mut key_segments = key.split('.');

    omit.split('.').all(|segment| {
        key_segments
            .next()
            .is_some_and(|key_segment| segment_matches(segment, key_segment))
    })
}

/// The part of `omit` that remains after walking down through `key`, if
/// `key` leads towards `omit` without reaching it.
fn below<'a>(omit: &'a str, key: &str) -> Option<&'a str> {
    let mut rest = omit;

    for key_segment in key.split('.') {
        let (segment, tail) = rest.split_once('.')?;
        if !segment_matches(segment, key_segment) {
            return None;
        }
        rest = tail;
    }

    Some(rest)
}

fn segment_matches(segment: &str, key_segment: &str) -> bool {
    segment == MAP_VALUES || segment == key_segment
}
