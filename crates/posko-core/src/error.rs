use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Sheet parsing failed: {0}")]
    Parser(#[from] posko_parser::ParserError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is invalid: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
