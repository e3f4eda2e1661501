use super::{
    app::{Field, Level, Model, ModelId, ModelKind},
    Schema,
};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;

/// Declaration of a model, before mixins and base models are merged in.
#[derive(Debug, Clone)]
pub struct ModelDef {
    name: String,
    kind: ModelKind,
    fields: Vec<Field>,
    mixins: Vec<String>,
    base: Option<Base>,
    default_level: Option<Level>,
}

#[derive(Debug, Clone)]
enum Base {
    /// Plain inheritance of the base model's fields
    Extends(String),

    /// Inheritance plus registration as a discriminated subtype of the base
    Discriminates(String),
}

/// Builds a [`Schema`] from model declarations.
#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<ModelDef>,
}

struct Merge<'a> {
    models: &'a [ModelDef],

    /// Model name to declaration index
    index: &'a HashMap<&'a str, usize>,

    /// Combined fields of declarations that were already merged
    combined: HashMap<usize, IndexMap<String, Field>>,

    /// Declarations currently being merged, used to report cycles
    visiting: Vec<usize>,
}

impl ModelDef {
    fn new(name: impl Into<String>, kind: ModelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: vec![],
            mixins: vec![],
            base: None,
            default_level: None,
        }
    }

    /// A persisted entity with its own `_id`
    pub fn document(name: impl Into<String>) -> Self {
        Self::new(name, ModelKind::Document)
    }

    /// A composite type only ever stored inside another model
    pub fn embedded(name: impl Into<String>) -> Self {
        Self::new(name, ModelKind::Embedded)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ModelKind::Enum(values.into_iter().map(Into::into).collect()),
        )
    }

    /// A customized scalar type
    pub fn custom(name: impl Into<String>) -> Self {
        Self::new(name, ModelKind::Custom)
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Compose the fields of `name` into this model. Mixins are applied after
    /// own fields, in the order they are declared.
    pub fn mixin(mut self, name: impl Into<String>) -> Self {
        self.mixins.push(name.into());
        self
    }

    /// Inherit the fields of `base`.
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base = Some(Base::Extends(base.into()));
        self
    }

    /// Inherit the fields of `base` and register this model as one of its
    /// discriminated subtypes.
    pub fn discriminator_of(mut self, base: impl Into<String>) -> Self {
        self.base = Some(Base::Discriminates(base.into()));
        self
    }

    pub fn default_level(mut self, level: impl Into<Level>) -> Self {
        self.default_level = Some(level.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Base {
    fn name(&self) -> &str {
        match self {
            Self::Extends(name) | Self::Discriminates(name) => name,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: ModelDef) -> &mut Self {
        self.models.push(model);
        self
    }

    pub fn build(&self) -> Result<Schema> {
        let mut index = HashMap::with_capacity(self.models.len());

        for (position, model) in self.models.iter().enumerate() {
            if index.insert(model.name.as_str(), position).is_some() {
                return Err(Error::invalid_schema(format!(
                    "model `{}` is registered more than once",
                    model.name
                )));
            }
        }

        let mut merge = Merge {
            models: &self.models,
            index: &index,
            combined: HashMap::new(),
            visiting: vec![],
        };

        let mut models = Vec::with_capacity(self.models.len());

        for (position, def) in self.models.iter().enumerate() {
            models.push(Model {
                id: ModelId(position),
                name: def.name.clone(),
                kind: def.kind.clone(),
                fields: merge.combined_fields(position)?,
                discriminations: vec![],
                default_level: def.default_level,
            });
        }

        // Subtypes register on their base once every model exists. The base
        // was resolved while merging fields.
        for def in &self.models {
            if let Some(Base::Discriminates(base)) = &def.base {
                models[index[base.as_str()]]
                    .discriminations
                    .push(def.name.clone());
            }
        }

        let schema = Schema::from_models(models);
        schema.verify()?;

        tracing::debug!(models = schema.len(), "built schema");
        Ok(schema)
    }
}

impl Merge<'_> {
    /// Merge base, own, and mixin fields. A later source replaces an earlier
    /// field of the same name and keeps its position.
    fn combined_fields(&mut self, position: usize) -> Result<IndexMap<String, Field>> {
        if let Some(fields) = self.combined.get(&position) {
            return Ok(fields.clone());
        }

        if let Some(start) = self.visiting.iter().position(|v| *v == position) {
            let chain = self.visiting[start..]
                .iter()
                .chain(Some(&position))
                .map(|v| self.models[*v].name.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");

            return Err(Error::invalid_schema(format!(
                "model `{}` composes itself through `{chain}`",
                self.models[position].name
            )));
        }

        self.visiting.push(position);

        let models = self.models;
        let def = &models[position];
        let mut fields = IndexMap::new();

        if let Some(base) = &def.base {
            let base = self.lookup(def, base.name(), "base model")?;
            fields.extend(self.combined_fields(base)?);
        }

        for field in &def.fields {
            fields.insert(field.name.clone(), field.clone());
        }

        for mixin in &def.mixins {
            let mixin = self.lookup(def, mixin, "mixin")?;
            fields.extend(self.combined_fields(mixin)?);
        }

        self.visiting.pop();
        self.combined.insert(position, fields.clone());

        Ok(fields)
    }

    fn lookup(&self, def: &ModelDef, name: &str, role: &str) -> Result<usize> {
        self.index.get(name).copied().ok_or_else(|| {
            Error::invalid_schema(format!(
                "model `{}` names `{name}` as its {role}, but `{name}` was not registered \
                 with the schema",
                def.name
            ))
        })
    }
}
