use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubcueError {
    #[error("subtitle payload is not valid {encoding}")]
    Decode { encoding: &'static str },
    #[error("failed to read subtitles from '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read subtitles from stdin")]
    Stdin(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, SubcueError>;
