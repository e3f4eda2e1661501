use super::{Engine, ResolvePath};
use crate::{
    populate::{join_path, MAP_VALUES},
    schema::{
        app::{Field, Model, ModelId},
        Resolve,
    },
    Result,
};

use dashmap::DashMap;
use indexmap::IndexSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Server-managed field flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum Managed {
    Autogen,
    Readonly,
}

impl Managed {
    fn matches(self, field: &Field) -> bool {
        match self {
            Self::Autogen => field.is_autogen(),
            Self::Readonly => field.is_readonly(),
        }
    }
}

impl<R: Resolve> Engine<R> {
    pub(super) fn collect_managed(
        &self,
        model: &Model,
        managed: Managed,
        path: &ResolvePath,
    ) -> Result<Arc<IndexSet<String>>> {
        if let Some(cached) = self.managed_cache(managed).get(&model.id) {
            trace!(model = %model.name, ?managed, "managed fields cache hit");
            return Ok(cached.clone());
        }

        debug!(model = %model.name, ?managed, %path, "collecting managed fields");

        path.check(self.max_depth)?;

        let fields_path = path.enter_model(&model.name);
        let mut res = IndexSet::new();

        for field in model.fields() {
            if managed.matches(field) {
                res.insert(field.name.clone());
            }

            // Only embedded documents carry managed fields of their own inside
            // the stored document. References point at separately managed
            // documents.
            if !field.is_persisted() || field.relation.is_some() {
                continue;
            }

            let Some(target) = field.target() else {
                continue;
            };

            let target = self.model(target)?;
            if target.is_opaque() {
                continue;
            }

            let prefix = if field.ty.is_map() {
                join_path(&field.name, MAP_VALUES)
            } else {
                field.name.clone()
            };

            let nested =
                self.collect_managed(target, managed, &fields_path.enter_field(&field.name))?;

            for name in nested.iter() {
                res.insert(join_path(&prefix, name));
            }
        }

        let res = Arc::new(res);
        self.managed_cache(managed).insert(model.id, res.clone());

        Ok(res)
    }

    fn managed_cache(&self, managed: Managed) -> &DashMap<ModelId, Arc<IndexSet<String>>> {
        match managed {
            Managed::Autogen => &self.autogen,
            Managed::Readonly => &self.readonly,
        }
    }
}
