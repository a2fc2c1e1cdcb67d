//! Schema object model for avromock.
//!
//! This crate defines the Avro-derived schema tree consumed by the generator,
//! the naming rules for namespaces, and the conversion from JSON schemas.

pub mod error;
pub mod names;
mod parse;
pub mod schema;
pub mod types;

pub use error::{Result, SchemaError};
pub use names::{FullName, effective_namespace, qualify, short_name};
pub use schema::{
    EnumSchema, Field, FixedSchema, LogicalSchema, RecordSchema, Schema, UnionMember,
};
pub use types::{DURATION_SIZE, LogicalType, Primitive};
