//! Market data aggregate containing the input record entity and value objects.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
