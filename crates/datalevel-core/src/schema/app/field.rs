use super::{Level, Relation, Virtual};

use indexmap::IndexMap;
use std::fmt;

/// One field of a model, merged from own, inherited, and mixed-in
/// declarations.
#[derive(Debug, Clone)]
pub struct Field {
    /// The field name. Nesting is expressed through `ty`, never with dots.
    pub name: String,

    /// Scalar, model, array, or map
    pub ty: FieldTy,

    /// Minimum level at which the field is visible. `None` means every level.
    pub level: Option<Level>,

    /// Minimum level at which a relation is expanded. Falls back to `level`.
    pub populate_level: Option<Level>,

    /// Remaps the requested level before descending into the field's target.
    pub pass_level_map: IndexMap<Level, Level>,

    /// Set for stored and virtual references. Model-typed fields without a
    /// relation are embedded.
    pub relation: Option<Relation>,

    /// Value is generated by the server. Implies `readonly`.
    pub autogen: bool,

    /// Value cannot be set by clients
    pub readonly: bool,

    /// The member is a method, not data
    pub method: bool,

    pub modifier: Modifier,

    /// The member is a computed getter without backing storage
    pub getter_only: bool,

    /// The field exists on the model type but is never persisted
    pub no_persist: bool,
}

#[derive(Clone, PartialEq, Eq)]
pub enum FieldTy {
    Scalar,
    Model(String),
    Array(Box<FieldTy>),
    Map(Box<FieldTy>),
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Modifier {
    #[default]
    Public,
    Protected,
    Private,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldTy) -> Self {
        Self {
            name: name.into(),
            ty,
            level: None,
            populate_level: None,
            pass_level_map: IndexMap::new(),
            relation: None,
            autogen: false,
            readonly: false,
            method: false,
            modifier: Modifier::Public,
            getter_only: false,
            no_persist: false,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, FieldTy::Scalar)
    }

    /// A field storing the target model inline
    pub fn embedded(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, FieldTy::Model(target.into()))
    }

    /// A field storing the id of a target document
    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        let mut field = Self::new(name, FieldTy::Model(target.into()));
        field.relation = Some(Relation::Reference);
        field
    }

    /// A reverse relation populated from the target side. `ty` is
    /// `FieldTy::Scalar` for counts.
    pub fn virtual_reference(name: impl Into<String>, ty: FieldTy, virt: Virtual) -> Self {
        let mut field = Self::new(name, ty);
        field.relation = Some(Relation::Virtual(virt));
        field
    }

    pub fn level(mut self, level: impl Into<Level>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn populate_level(mut self, level: impl Into<Level>) -> Self {
        self.populate_level = Some(level.into());
        self
    }

    /// Render the target at `to` when the caller requests `from`.
    pub fn pass_level(mut self, from: impl Into<Level>, to: impl Into<Level>) -> Self {
        self.pass_level_map.insert(from.into(), to.into());
        self
    }

    /// Wrap the current type in an array
    pub fn array(mut self) -> Self {
        self.ty = FieldTy::Array(Box::new(self.ty));
        self
    }

    /// Wrap the current type in a string-keyed map
    pub fn map(mut self) -> Self {
        self.ty = FieldTy::Map(Box::new(self.ty));
        self
    }

    pub fn autogen(mut self) -> Self {
        self.autogen = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn method(mut self) -> Self {
        self.method = true;
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn getter_only(mut self) -> Self {
        self.getter_only = true;
        self
    }

    pub fn no_persist(mut self) -> Self {
        self.no_persist = true;
        self
    }

    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the type.
    pub fn ty(&self) -> &FieldTy {
        &self.ty
    }

    /// Name of the model this field's type points at, looking through arrays
    /// and maps.
    pub fn target(&self) -> Option<&str> {
        self.ty.target()
    }

    pub fn is_reference(&self) -> bool {
        self.relation.as_ref().is_some_and(Relation::is_stored)
    }

    pub fn is_virtual_reference(&self) -> bool {
        self.relation.as_ref().is_some_and(Relation::is_virtual)
    }

    /// Methods, non-public members, and unpersisted fields never take part in
    /// projection or population.
    pub fn is_excluded(&self) -> bool {
        self.method || self.modifier != Modifier::Public || self.no_persist
    }

    pub fn is_visible_at(&self, level: Level) -> bool {
        !self.is_excluded() && self.level.map_or(true, |min| min <= level)
    }

    /// Returns true if the relation should be expanded at `level`.
    pub fn populates_at(&self, level: Level) -> bool {
        self.populate_level
            .or(self.level)
            .is_some_and(|min| min <= level)
    }

    /// The level at which this field's target is rendered for a caller at
    /// `level`.
    pub fn inner_level(&self, level: Level) -> Level {
        self.pass_level_map.get(&level).copied().unwrap_or(level)
    }

    pub fn is_autogen(&self) -> bool {
        self.autogen
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly || self.autogen
    }

    /// Returns true if the field is a column of the stored document.
    pub fn is_persisted(&self) -> bool {
        !self.is_excluded() && !self.is_virtual_reference() && !self.getter_only
    }
}

impl FieldTy {
    pub fn model(name: impl Into<String>) -> Self {
        Self::Model(name.into())
    }

    pub fn array(element: FieldTy) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn map(value: FieldTy) -> Self {
        Self::Map(Box::new(value))
    }

    /// Returns true if the values of this type sit behind map keys
    pub fn is_map(&self) -> bool {
        match self {
            Self::Map(_) => true,
            Self::Array(element) => element.is_map(),
            _ => false,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Scalar => None,
            Self::Model(name) => Some(name),
            Self::Array(element) | Self::Map(element) => element.target(),
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => fmt.write_str("Scalar"),
            Self::Model(name) => write!(fmt, "Model({name})"),
            Self::Array(element) => write!(fmt, "Array<{element:?}>"),
            Self::Map(value) => write!(fmt, "Map<{value:?}>"),
        }
    }
}
