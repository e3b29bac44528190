use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::state::QuizState;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("failed to access progress file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("progress file {path} is not valid: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// A missing file is a fresh session.
pub fn load(path: &Path) -> Result<QuizState, ProgressError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no saved progress");
            return Ok(QuizState::new());
        }
        Err(source) => {
            return Err(ProgressError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| ProgressError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the whole snapshot, replacing whatever was there.
pub fn save(path: &Path, state: &QuizState) -> Result<(), ProgressError> {
    let io_err = |source| ProgressError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let content = serde_json::to_string_pretty(state).map_err(|source| ProgressError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    let mut file = fs::File::create(path).map_err(io_err)?;
    writeln!(file, "{}", content).map_err(io_err)?;

    tracing::debug!(path = %path.display(), chapters = state.quiz_reactions.len(), "saved progress");
    Ok(())
}
