use thiserror::Error;

#[derive(Error, Debug)]
pub enum SejeonError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Zip error: {0}")]
    Zip(Box<zip::result::ZipError>),

    #[error("Failed to load file: {0}")]
    FailedToLoadFile(String),

    #[error("SejeonError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for SejeonError {
    fn from(error: std::io::Error) -> Self {
        SejeonError::Io(Box::new(error))
    }
}

impl From<zip::result::ZipError> for SejeonError {
    fn from(error: zip::result::ZipError) -> Self {
        SejeonError::Zip(Box::new(error))
    }
}
