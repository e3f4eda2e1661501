use super::{Engine, ResolvePath};
use crate::{
    populate::IDENTITY,
    schema::{
        app::{Level, Model},
        Resolve,
    },
    DataLevelPopulate, Result,
};

use std::sync::Arc;
use tracing::{debug, trace};

impl<R: Resolve> Engine<R> {
    pub(super) fn resolve_model(
        &self,
        model: &Model,
        level: Level,
        path: &ResolvePath,
    ) -> Result<Arc<DataLevelPopulate>> {
        if model.is_opaque() {
            return Ok(Arc::new(DataLevelPopulate::opaque()));
        }

        let key = (model.id, level);

        if let Some(cached) = self.levels.get(&key) {
            trace!(model = %model.name, %level, "data level cache hit");
            return Ok(cached.clone());
        }

        debug!(model = %model.name, %level, %path, "resolving data level populates");

        path.check(self.max_depth)?;

        let fields_path = path.enter_model(&model.name);
        let mut res = DataLevelPopulate::default();

        if model.is_document() {
            res.projections.insert(IDENTITY.to_string());
        }

        // Bare getters are derived values; only an explicit level opts them in.
        for field in model
            .fields()
            .filter(|field| !field.getter_only || field.level.is_some())
        {
            let contribution = self.resolve_field(field, level, &fields_path)?;
            res.merge(&contribution);
        }

        // A query against a polymorphic base fetches what any subtype needs.
        for name in &model.discriminations {
            let subtype = self.model(name)?;
            let contribution = self.resolve_model(subtype, level, path)?;
            res.merge(&contribution);
        }

        let res = Arc::new(res);
        self.levels.insert(key, res.clone());

        Ok(res)
    }
}
