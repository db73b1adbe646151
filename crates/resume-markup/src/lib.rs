//! Decoder for the indentation-based key/value documents that hold resume
//! content.
//!
//! The format is a small, forgiving subset of block-style YAML: nested
//! mappings, `- ` sequences and scalars. Decoding never fails; malformed input
//! yields a partial tree.

mod node;
mod parser;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use node::{ContentNode, Mapping, Scalar};
pub use parser::{parse, parse_scalar};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decode raw bytes, replacing invalid UTF-8 sequences instead of rejecting
/// the document.
pub fn parse_bytes(bytes: &[u8]) -> ContentNode {
    let text = String::from_utf8_lossy(bytes);
    if let std::borrow::Cow::Owned(_) = text {
        tracing::warn!("document is not valid UTF-8; invalid bytes were replaced");
    }
    parse(&text)
}

/// Read and decode the document at `path`. Only I/O can fail.
pub fn load_path(path: impl AsRef<Path>) -> Result<ContentNode, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let node = parse_bytes(&bytes);
    tracing::info!(path = %path.display(), "loaded document");
    Ok(node)
}
