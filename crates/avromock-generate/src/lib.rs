//! Schema-driven mock value generation for avromock.
//!
//! This crate walks an Avro-derived schema tree and produces a value tree of
//! realistic fixture data, either from a fresh random stream per call or from
//! a seeded, reproducible stream owned by the caller.

pub mod engine;
pub mod errors;
pub mod model;
pub mod random;
pub mod resolver;
pub mod union;
pub mod value;

pub use engine::{SeededGenerator, TypeGenerator, generate, generate_with, seeded, seeded_fn};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GeneratorFn, GeneratorOverrides, load_options};
pub use random::{Leaf, RandomSource};
pub use resolver::{Definition, Resolved, SymbolTable};
pub use union::{Pick, UnionPicker};
pub use value::MockValue;
