use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Load(#[from] resume_markup::LoadError),
    #[error("terminal error: {0}")]
    Terminal(String),
}

pub type Result<T, E = DesktopError> = std::result::Result<T, E>;
