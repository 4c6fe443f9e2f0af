// File: src/persistence.rs
use crate::core::model::WordnetModel;
use crate::error::{CollocError, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name used when a canonical source path is a directory.
pub const SOURCE_FILE: &str = "senses.yaml";

/// Where the model comes from for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Binary snapshot, no revalidation.
    Snapshot { dir: PathBuf, filename: String },
    /// Canonical YAML, optionally extended with derived relations.
    Source { path: PathBuf, extend: bool },
}

impl ModelSource {
    pub fn snapshot_file(path: &Path) -> Self {
        let (dir, filename) = snapshot_parts(path);
        ModelSource::Snapshot { dir, filename }
    }

    pub fn load(&self) -> Result<WordnetModel> {
        match self {
            ModelSource::Snapshot { dir, filename } => load_snapshot(dir, filename),
            ModelSource::Source { path, extend } => load_source(path, *extend),
        }
    }
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Snapshot { dir, filename } => {
                write!(f, "snapshot {}", dir.join(filename).display())
            }
            ModelSource::Source { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// Splits a snapshot file path into the `(dir, filename)` the loader expects.
pub fn snapshot_parts(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, filename)
}

/// Writes through a temp file in the destination directory, then renames it
/// into place so readers never see a half-written model.
fn write_atomically(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| CollocError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| CollocError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush().map_err(|e| CollocError::io(path, e))?;
    }

    temp_file
        .persist(path)
        .map_err(|source| CollocError::Persist { path: path.to_path_buf(), source })?;
    Ok(())
}

pub fn save_snapshot(wn: &WordnetModel, dir: &Path, filename: &str) -> Result<()> {
    let path = dir.join(filename);
    write_atomically(&path, |writer| {
        bincode::serialize_into(writer, wn)
            .map_err(|source| CollocError::Snapshot { path: path.clone(), source })
    })?;
    tracing::debug!("saved snapshot {}", path.display());
    Ok(())
}

pub fn load_snapshot(dir: &Path, filename: &str) -> Result<WordnetModel> {
    let path = dir.join(filename);
    let file = File::open(&path).map_err(|e| CollocError::io(&path, e))?;
    let reader = BufReader::new(file);
    let wn: WordnetModel = bincode::deserialize_from(reader)
        .map_err(|source| CollocError::Snapshot { path: path.clone(), source })?;
    tracing::debug!("loaded {} senses from snapshot {}", wn.senses.len(), path.display());
    Ok(wn)
}

fn source_file(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(SOURCE_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Loads the canonical YAML model. With `extend`, derived reverse relations
/// are materialized after loading.
pub fn load_source(path: &Path, extend: bool) -> Result<WordnetModel> {
    let file_path = source_file(path);
    let file = File::open(&file_path).map_err(|e| CollocError::io(&file_path, e))?;
    let mut wn: WordnetModel = serde_yaml::from_reader(BufReader::new(file))
        .map_err(|source| CollocError::Source { path: file_path.clone(), source })?;
    tracing::debug!("loaded {} senses from {}", wn.senses.len(), file_path.display());

    if extend {
        let added = wn.extend();
        tracing::debug!("extended with {added} derived relations");
    }
    Ok(wn)
}

/// Saves the canonical YAML model. A directory path (existing, or one
/// without an extension) gets `senses.yaml` inside it.
pub fn save_source(wn: &WordnetModel, path: &Path) -> Result<()> {
    let file_path = if path.is_dir() || path.extension().is_none() {
        path.join(SOURCE_FILE)
    } else {
        path.to_path_buf()
    };
    write_atomically(&file_path, |writer| {
        serde_yaml::to_writer(writer, wn)
            .map_err(|source| CollocError::Source { path: file_path.clone(), source })
    })?;
    tracing::debug!("saved {} senses to {}", wn.senses.len(), file_path.display());
    Ok(())
}

/// Writes a pretty-printed JSON summary of a run.
pub fn write_report(summary: &impl Serialize, path: &Path) -> Result<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(writer, summary)?;
        Ok(())
    })
}
