//! Writing artifacts to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use protofreeze_compiler::Artifacts;
use tracing::info;

/// Longest artifact path accepted, in bytes.
pub const MAX_PATH_LEN: usize = 255;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("output path '{path}' is longer than {max} bytes")]
    PathTooLong { path: String, max: usize },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// The three artifact paths derived from one base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub header: PathBuf,
    pub const_header: PathBuf,
    pub data: PathBuf,
}

impl ArtifactPaths {
    /// Derive `BASE.h`, `BASE_const.h` and `BASE.c`.
    ///
    /// Fails before anything is written if any of them is too long.
    pub fn new(base: &str) -> Result<Self, ResourceError> {
        let header = checked(format!("{base}.h"))?;
        let const_header = checked(format!("{base}_const.h"))?;
        let data = checked(format!("{base}.c"))?;
        Ok(Self {
            header,
            const_header,
            data,
        })
    }
}

fn checked(path: String) -> Result<PathBuf, ResourceError> {
    if path.len() > MAX_PATH_LEN {
        return Err(ResourceError::PathTooLong {
            path,
            max: MAX_PATH_LEN,
        });
    }
    Ok(PathBuf::from(path))
}

/// Write every rendered artifact; returns the paths written.
pub fn write_artifacts(
    paths: &ArtifactPaths,
    artifacts: &Artifacts,
) -> Result<Vec<PathBuf>, ResourceError> {
    let mut written = Vec::with_capacity(3);
    write_file(&paths.header, &artifacts.header)?;
    written.push(paths.header.clone());
    write_file(&paths.const_header, &artifacts.const_header)?;
    written.push(paths.const_header.clone());
    if let Some(data) = &artifacts.data {
        write_file(&paths.data, data)?;
        written.push(paths.data.clone());
    }
    Ok(written)
}

pub fn write_file(path: &Path, content: &str) -> Result<(), ResourceError> {
    fs::write(path, content).map_err(|source| ResourceError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), bytes = content.len(), "wrote");
    Ok(())
}

/// Artifact base for an input file: the path without its extension.
pub fn base_from_path(path: &Path) -> String {
    path.with_extension("").to_string_lossy().into_owned()
}
