pub mod app;

mod builder;
pub use builder::{Builder, ModelDef};

mod resolve;
pub use resolve::Resolve;

mod verify;

use app::{Model, ModelId};
use std::collections::HashMap;

/// Registry of combined model metadata.
///
/// Built once through [`Builder`] and immutable afterwards. Every model owns
/// a permanent [`ModelId`] equal to its registration index.
#[derive(Debug, Default)]
pub struct Schema {
    models: Vec<Model>,

    /// Model name to arena index
    names: HashMap<String, ModelId>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Get a model by ID
    #[track_caller]
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        let id = id.into();
        self.models
            .get(id.0)
            .unwrap_or_else(|| panic!("invalid model ID; id={id:?}"))
    }

    /// Get a model by name
    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.names.get(name).map(|id| &self.models[id.0])
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub(crate) fn from_models(models: Vec<Model>) -> Self {
        let names = models
            .iter()
            .map(|model| (model.name.clone(), model.id))
            .collect();

        Schema { models, names }
    }
}
