use super::{Engine, ResolvePath};
use crate::{
    populate::{join_path, MAP_VALUES},
    schema::{
        app::{Field, Level},
        Resolve,
    },
    DataLevelPopulate, Populate, Result,
};

use std::sync::Arc;
use tracing::debug;

impl<R: Resolve> Engine<R> {
    /// Contribution of one field to its model's result at `level`.
    pub(super) fn resolve_field(
        &self,
        field: &Field,
        level: Level,
        path: &ResolvePath,
    ) -> Result<DataLevelPopulate> {
        let mut res = DataLevelPopulate::default();

        if !field.is_visible_at(level) {
            return Ok(res);
        }

        debug!(
            field = %field.name,
            %level,
            populate_level = ?field.populate_level,
            %path,
            "resolving field data level populates"
        );

        let name = &field.name;

        let Some(relation) = &field.relation else {
            let Some(target) = field.target() else {
                res.projections.insert(name.clone());
                return Ok(res);
            };

            // Embedded composite
            let next = self.resolve_target(field, target, level, path)?;

            if field.ty.is_map() {
                // Map values cannot be partially projected
                res.projections.insert(name.clone());

                let parent = join_path(name, MAP_VALUES);
                for populate in &next.populates {
                    res.push_populate(populate.reparent(&parent));
                }
            } else {
                for projection in &next.projections {
                    res.projections.insert(join_path(name, projection));
                }

                for populate in &next.populates {
                    res.push_populate(populate.reparent(name));
                }
            }

            return Ok(res);
        };

        if field.populates_at(level) {
            let populate_path = if field.ty.is_map() {
                join_path(name, MAP_VALUES)
            } else {
                name.clone()
            };

            let populate = match field.target() {
                Some(target) => {
                    let next = self.resolve_target(field, target, level, path)?;
                    Populate::with_target(populate_path, &next)
                }
                None => Populate::new(populate_path),
            };

            res.push_populate(populate);
        }

        // The raw id is fetched whether or not the reference is expanded.
        if relation.is_stored() {
            res.projections.insert(name.clone());
        }

        Ok(res)
    }

    fn resolve_target(
        &self,
        field: &Field,
        target: &str,
        level: Level,
        path: &ResolvePath,
    ) -> Result<Arc<DataLevelPopulate>> {
        let model = self.model(target)?;
        self.resolve_model(model, field.inner_level(level), &path.enter_field(&field.name))
    }
}
