use super::{
    app::{Field, Model, Relation},
    Schema,
};
use crate::{populate::MAP_VALUES, Error, Result};

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for model in self.schema.models() {
            for field in model.fields() {
                self.verify_field_name(model, field)?;
                self.verify_field_target(model, field)?;
            }
        }

        Ok(())
    }

    fn verify_field_name(&self, model: &Model, field: &Field) -> Result<()> {
        if field.name == MAP_VALUES {
            return Err(Error::invalid_schema(format!(
                "model `{}` declares a field named `{MAP_VALUES}`, which is reserved for \
                 addressing map values",
                model.name
            )));
        }

        if field.name.is_empty() || field.name.contains('.') {
            return Err(Error::invalid_schema(format!(
                "model `{}` declares a field named `{}`; field names must be non-empty and \
                 cannot contain `.`",
                model.name, field.name
            )));
        }

        Ok(())
    }

    fn verify_field_target(&self, model: &Model, field: &Field) -> Result<()> {
        let Some(target) = field.target() else {
            return match &field.relation {
                Some(Relation::Reference) => Err(Error::invalid_schema(format!(
                    "field `{}::{}` is a reference but its type does not name a model",
                    model.name, field.name
                ))),
                Some(relation) if relation.as_virtual().is_some_and(|virt| !virt.count) => {
                    Err(Error::invalid_schema(format!(
                        "virtual field `{}::{}` has no target model and is not a count",
                        model.name, field.name
                    )))
                }
                _ => Ok(()),
            };
        };

        let Some(target_model) = self.schema.model_by_name(target) else {
            return Err(Error::invalid_schema(format!(
                "field `{}::{}` references a model `{target}` that was not registered with \
                 the schema",
                model.name, field.name
            )));
        };

        if field.relation.is_some() && !target_model.is_document() {
            return Err(Error::invalid_schema(format!(
                "field `{}::{}` references `{target}`, which is not a document model",
                model.name, field.name
            )));
        }

        Ok(())
    }
}
