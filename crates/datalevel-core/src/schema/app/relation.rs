/// How a model-typed field relates to its target.
///
/// A field with no relation embeds its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    /// Stored foreign key; the raw id is a column on this model
    Reference,

    /// Reverse relation resolved by looking up documents whose foreign key
    /// points back at this one. Never stored on this model.
    Virtual(Virtual),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Virtual {
    /// Field on this model matched against `foreign_field`
    pub local_field: String,

    /// Field on the target model holding the foreign key
    pub foreign_field: String,

    /// Populate a single document instead of a list
    pub just_one: bool,

    /// Populate the number of matching documents
    pub count: bool,
}

impl Relation {
    /// Returns true if the relation is backed by a column on this model
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Reference)
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual(..))
    }

    pub fn as_virtual(&self) -> Option<&Virtual> {
        match self {
            Self::Virtual(virt) => Some(virt),
            _ => None,
        }
    }
}

impl Virtual {
    pub fn new(local_field: impl Into<String>, foreign_field: impl Into<String>) -> Self {
        Self {
            local_field: local_field.into(),
            foreign_field: foreign_field.into(),
            just_one: false,
            count: false,
        }
    }

    pub fn just_one(mut self) -> Self {
        self.just_one = true;
        self
    }

    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }
}

impl From<Virtual> for Relation {
    fn from(value: Virtual) -> Self {
        Self::Virtual(value)
    }
}
