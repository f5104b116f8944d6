use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    /// Java source without a `public class <Name>` declaration
    #[error("No public class found. Java code must contain a public class.")]
    MissingPublicClass,

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error is a caller mistake rather than a fault of the host
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::UnsupportedLanguage(_) | Error::MissingPublicClass)
    }
}
