//! Combined model metadata

mod field;
pub use field::{Field, FieldTy, Modifier};

mod level;
pub use level::Level;

mod model;
pub use model::{Model, ModelId, ModelKind};

mod relation;
pub use relation::{Relation, Virtual};
