use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request failed with status code {status}\nFrom: {url}")]
    Request { status: u16, url: String },

    #[error("Unable get data from source\nFrom: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unable to parse {0}")]
    Parsing(String),

    // Archive errors
    #[error("Unrecognized archive format: {0}")]
    UnrecognizedArchive(String),

    #[error("No simplified chinese subtitle found in {0}")]
    SubtitleNotFound(String),

    #[error("Unable to read zip archive\nFrom: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Unable to read rar archive\nFrom: {0}")]
    Rar(#[from] unrar::error::UnrarError),

    #[error("Extraction task failed\nFrom: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    // Generic errors
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid url\nFrom: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    pub fn parsing(what: &str) -> Self {
        Error::Parsing(what.to_string())
    }
}
