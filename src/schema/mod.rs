mod error;
mod registry;
mod schema;
mod validation;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
pub use schema::{Schema, SchemaKind};
pub use validation::validate_value;
