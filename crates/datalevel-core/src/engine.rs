//! Data-level resolution over a model registry.
//!
//! [`Engine`] computes, for a `(model, level)` pair, the projections and
//! population directives a read at that level needs, and the server-managed
//! field paths a write must drop. Every result is memoized; model metadata is
//! immutable, so cached entries are never invalidated.

mod field;
mod managed;
mod model;

mod path;
use path::ResolvePath;

use crate::{
    schema::{
        app::{Level, Model, ModelId},
        Resolve,
    },
    Config, DataLevelPopulate, Error, Result,
};

use dashmap::DashMap;
use indexmap::IndexSet;
use std::sync::Arc;

pub struct Engine<R> {
    /// Source of model metadata
    resolver: R,

    /// Resolution paths longer than this fail with a circle dependency
    max_depth: usize,

    /// Memoized data level results
    levels: DashMap<(ModelId, Level), Arc<DataLevelPopulate>>,

    /// Memoized autogen field paths
    autogen: DashMap<ModelId, Arc<IndexSet<String>>>,

    /// Memoized readonly field paths
    readonly: DashMap<ModelId, Arc<IndexSet<String>>>,
}

impl<R: Resolve> Engine<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, &Config::default())
    }

    pub fn with_config(resolver: R, config: &Config) -> Self {
        Self {
            resolver,
            max_depth: config.max_depth,
            levels: DashMap::new(),
            autogen: DashMap::new(),
            readonly: DashMap::new(),
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Look up a model by name through the resolver.
    pub fn model(&self, name: &str) -> Result<&Model> {
        self.resolver
            .resolve(name)
            .ok_or_else(|| Error::unknown_model(name))
    }

    /// Returns the projections and population directives needed to render
    /// `model` at `level`.
    ///
    /// Fails with a circle dependency error when the models reachable through
    /// populated references loop back on themselves at this level.
    pub fn data_level_populates(
        &self,
        model: &Model,
        level: Level,
    ) -> Result<Arc<DataLevelPopulate>> {
        self.resolve_model(model, level, &ResolvePath::root())
    }

    /// Like [`data_level_populates`](Self::data_level_populates), resuming from
    /// the dotted ancestry `path` of an enclosing resolution.
    pub fn data_level_populates_from(
        &self,
        model: &Model,
        level: Level,
        path: &str,
    ) -> Result<Arc<DataLevelPopulate>> {
        self.resolve_model(model, level, &ResolvePath::from(path))
    }

    /// Returns the paths of fields whose values the server generates.
    pub fn autogen_fields(&self, model: &Model) -> Result<Arc<IndexSet<String>>> {
        self.collect_managed(model, managed::Managed::Autogen, &ResolvePath::root())
    }

    /// Returns the paths of fields clients may not set. Includes autogen
    /// fields.
    pub fn readonly_fields(&self, model: &Model) -> Result<Arc<IndexSet<String>>> {
        self.collect_managed(model, managed::Managed::Readonly, &ResolvePath::root())
    }
}

impl<R> std::fmt::Debug for Engine<R> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Engine")
            .field("max_depth", &self.max_depth)
            .field("levels", &self.levels.len())
            .finish_non_exhaustive()
    }
}
