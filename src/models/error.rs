use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ComicError {
    Io(io::Error),
    InvalidPath,
    ComicNotFound,
    NoCoverFound,
    Zip(zip::result::ZipError),
    Watch(notify::Error),
}

impl fmt::Display for ComicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComicError::Io(e) => write!(f, "IO error: {}", e),
            ComicError::InvalidPath => write!(f, "Invalid path"),
            ComicError::ComicNotFound => write!(f, "Comic not found"),
            ComicError::NoCoverFound => write!(f, "No cover found in comic"),
            ComicError::Zip(e) => write!(f, "Zip error: {}", e),
            ComicError::Watch(e) => write!(f, "Watch error: {}", e),
        }
    }
}

impl std::error::Error for ComicError {}

impl From<io::Error> for ComicError {
    fn from(error: io::Error) -> Self {
        ComicError::Io(error)
    }
}

impl From<zip::result::ZipError> for ComicError {
    fn from(error: zip::result::ZipError) -> Self {
        ComicError::Zip(error)
    }
}

impl From<notify::Error> for ComicError {
    fn from(error: notify::Error) -> Self {
        ComicError::Watch(error)
    }
}
