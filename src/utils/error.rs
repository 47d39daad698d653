use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssignError {
    #[error("invalid topology: capacity_per_cell must be positive (got {capacity})")]
    InvalidTopology { capacity: usize },

    #[error("corrupt record(s) with partially-set group fields: {}", codes.join(", "))]
    CorruptRecord { codes: Vec<String> },

    #[error("code {code} is already registered")]
    DuplicateCode { code: String },

    #[error("code {code} is not registered")]
    UnknownCode { code: String },

    #[error("invalid value for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AssignError>;
