use super::{Field, Level};

use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: String,

    /// Distinguishes persisted documents from embedded, enum, and custom types
    pub kind: ModelKind,

    /// Combined fields, keyed by name, in declaration order across inherited,
    /// own, and mixed-in sources.
    pub fields: IndexMap<String, Field>,

    /// Names of the subtypes registered against this model through
    /// discrimination.
    pub discriminations: Vec<String>,

    /// Level used when a query does not request one
    pub default_level: Option<Level>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelKind {
    /// Persisted entity that owns an `_id`
    Document,

    /// Plain composite stored inside its parent
    Embedded,

    /// Enumeration, stored as one of its values
    Enum(Vec<String>),

    /// Customized scalar type (e.g. an email or a duration)
    Custom,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub usize);

impl Model {
    /// Returns true if this model is a persisted entity with an identity field
    pub fn is_document(&self) -> bool {
        matches!(self.kind, ModelKind::Document)
    }

    /// Returns true if this model is stored as a single value and therefore has
    /// no nested fields to project.
    pub fn is_opaque(&self) -> bool {
        matches!(self.kind, ModelKind::Enum(_) | ModelKind::Custom)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &Field> {
        self.fields.values()
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
