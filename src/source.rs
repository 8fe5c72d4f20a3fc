use crate::error::{Result, SubcueError};

use std::io::{self, Read};
use std::path::PathBuf;

use encoding_rs::Encoding;

/// Where a subtitle payload comes from.
#[derive(Debug, Clone)]
pub enum Source {
    Path(PathBuf),
    Stdin,
    Text(String),
}

impl Source {
    /// `-` means standard input.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::Path(PathBuf::from(arg))
        }
    }
}

/// Reads the whole payload. `encoding` applies to files and stdin; text is
/// already decoded.
pub fn read_all_text(source: Source, encoding: &'static Encoding) -> Result<String> {
    match source {
        Source::Text(text) => Ok(text),
        Source::Path(path) => {
            let bytes = std::fs::read(&path).map_err(|source| SubcueError::Io { path, source })?;
            decode(&bytes, encoding)
        }
        Source::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(SubcueError::Stdin)?;
            decode(&bytes, encoding)
        }
    }
}

/// Decodes `bytes` strictly, dropping a leading byte order mark. Malformed
/// input is an error rather than being replaced.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(SubcueError::Decode {
            encoding: encoding.name(),
        })?;
    Ok(text.strip_prefix('\u{FEFF}').unwrap_or(&text[..]).to_string())
}

/// Resolves an encoding label such as `utf-8`, `latin1` or `windows-1252`.
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}
