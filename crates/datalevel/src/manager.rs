mod builder;
pub use builder::Builder;

use crate::{Selection, WriteFilter};

use datalevel_core::{
    populate::IDENTITY,
    schema::app::{Level, Model},
    Config, DataLevelPopulate, Engine, Result, Schema,
};

use indexmap::IndexSet;
use std::sync::Arc;

/// Shared state between all `Manager` clones.
struct Shared {
    engine: Engine<Arc<Schema>>,
    config: Config,
}

/// Entry point for data level queries against a registered set of models.
///
/// Results are memoized for the lifetime of the manager. Cloning is cheap and
/// clones share the same caches.
#[derive(Clone)]
pub struct Manager {
    shared: Arc<Shared>,
}

impl Manager {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(schema: Schema, config: Config) -> Self {
        let engine = Engine::with_config(Arc::new(schema), &config);

        Self {
            shared: Arc::new(Shared { engine, config }),
        }
    }

    pub fn schema(&self) -> &Schema {
        self.shared.engine.resolver()
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    /// Look up a registered model by name.
    pub fn model(&self, name: &str) -> Result<&Model> {
        self.shared.engine.model(name)
    }

    pub fn data_level_populates(
        &self,
        model: &str,
        level: impl Into<Level>,
    ) -> Result<Arc<DataLevelPopulate>> {
        let model = self.model(model)?;
        self.shared.engine.data_level_populates(model, level.into())
    }

    pub fn autogen_fields(&self, model: &str) -> Result<Arc<IndexSet<String>>> {
        self.shared.engine.autogen_fields(self.model(model)?)
    }

    pub fn readonly_fields(&self, model: &str) -> Result<Arc<IndexSet<String>>> {
        self.shared.engine.readonly_fields(self.model(model)?)
    }

    /// Field selection and populate options for a read of `model`.
    ///
    /// The level falls back to the model's default level and then to the
    /// configured default. Returns `None` when no level applies, in which case
    /// the read is left unrestricted.
    pub fn selection(&self, model: &str, level: Option<Level>) -> Result<Option<Selection>> {
        let model = self.model(model)?;

        let Some(level) = level
            .or(model.default_level)
            .or(self.shared.config.default_level)
        else {
            return Ok(None);
        };

        let populates = self.shared.engine.data_level_populates(model, level)?;
        Ok(Some(Selection::new(level, &populates)))
    }

    /// Filter for client payloads creating a `model` document. Drops the
    /// identity and every autogen field.
    pub fn create_filter(&self, model: &str) -> Result<WriteFilter> {
        let model = self.model(model)?;

        let mut omits = IndexSet::from([IDENTITY.to_string()]);
        omits.extend(self.shared.engine.autogen_fields(model)?.iter().cloned());

        tracing::debug!(model = %model.name, ?omits, "built create filter");
        Ok(WriteFilter::new(omits))
    }

    /// Filter for client payloads updating a `model` document. Drops
    /// everything the create filter drops plus every readonly field.
    pub fn update_filter(&self, model: &str) -> Result<WriteFilter> {
        let model = self.model(model)?;

        let mut omits = IndexSet::from([IDENTITY.to_string()]);
        omits.extend(self.shared.engine.autogen_fields(model)?.iter().cloned());
        omits.extend(self.shared.engine.readonly_fields(model)?.iter().cloned());

        tracing::debug!(model = %model.name, ?omits, "built update filter");
        Ok(WriteFilter::new(omits))
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Manager")
            .field("models", &self.schema().len())
            .field("config", &self.shared.config)
            .finish()
    }
}
