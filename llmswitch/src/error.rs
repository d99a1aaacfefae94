use thiserror::Error;

/// App errors
#[derive(Error, Debug)]
pub enum AppError {

    /// Toml parsing error
    #[error("Failed to parse config file: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Config parsing error
    #[error("Failed to parse config file: {0}")]
    ConfigParseError(&'static str),

    /// Missing arguments
    #[error("Incorrect argument value: {0}")]
    InvalidArgError(&'static str),

    /// Library error
    #[error("{0}")]
    LibError(#[from] llmswitch_lib::Error),

    /// Other errors
    #[error("Reading user input: {0}")]
    Rustyline(#[from] rustyline::error::ReadlineError),

    /// Output serialization error
    #[error("Failed to format output: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown/unexpected error
    #[error("Unknown error")]
    Unknown,

    /// Config parsing error
    #[error("The format of the color value is incorrect")]
    ColorParseError,

    /// General error.
    #[error("{0}")]
    Error(String),
}
