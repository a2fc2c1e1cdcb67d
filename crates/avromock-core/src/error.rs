use thiserror::Error;

/// Errors raised while turning JSON into the schema object model.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required attribute is absent (e.g. `fields` on a record).
    #[error("missing attribute '{attribute}' in {context}")]
    MissingAttribute {
        attribute: &'static str,
        context: String,
    },
    /// An attribute is present but has the wrong JSON shape.
    #[error("invalid attribute '{attribute}' in {context}: {message}")]
    InvalidAttribute {
        attribute: &'static str,
        context: String,
        message: String,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by the schema model.
pub type Result<T> = std::result::Result<T, SchemaError>;
