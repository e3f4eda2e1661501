pub mod manager;
pub use manager::Manager;

mod selection;
pub use selection::Selection;

mod write_filter;
pub use write_filter::WriteFilter;

pub use datalevel_core::{
    schema::{
        self,
        app::{Field, FieldTy, Level, Modifier, Virtual},
        ModelDef,
    },
    Config, DataLevelPopulate, Error, Populate, Result,
};
