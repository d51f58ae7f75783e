use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse JSON document: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("unknown {kind} '{name}' referenced by {context}")]
    UnknownReference {
        kind: &'static str,
        name: String,
        context: String,
    },

    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("unsupported {quantity} unit '{unit}' (supported: {supported})")]
    UnsupportedUnit {
        quantity: &'static str,
        unit: String,
        supported: &'static str,
    },
}

impl Error {
    pub fn unknown_reference(
        kind: &'static str,
        name: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::UnknownReference {
            kind,
            name: name.into(),
            context: context.into(),
        }
    }
}
