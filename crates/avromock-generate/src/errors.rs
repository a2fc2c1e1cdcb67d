use thiserror::Error;

/// Errors emitted by the generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A type token names neither a built-in type nor a registered definition.
    #[error("Unknown type: {0}")]
    UnknownType(String),
    /// Reference nesting exceeded `max_depth`, usually a cyclic record.
    #[error("recursion limit of {depth} exceeded while generating '{name}'")]
    RecursionLimit { name: String, depth: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
