use super::Manager;
use crate::Result;

use datalevel_core::{
    schema::{self, app::Level, ModelDef},
    Config,
};

#[derive(Debug, Default)]
pub struct Builder {
    /// Model declarations
    schema: schema::Builder,

    config: Config,
}

impl Builder {
    pub fn register(&mut self, model: ModelDef) -> &mut Self {
        self.schema.register(model);
        self
    }

    /// Replace the whole configuration
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Set the longest resolution path before a circle dependency is reported
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn default_level(&mut self, level: impl Into<Level>) -> &mut Self {
        self.config.default_level = Some(level.into());
        self
    }

    pub fn build(&self) -> Result<Manager> {
        let schema = self.schema.build()?;
        Ok(Manager::new(schema, self.config.clone()))
    }
}
