//! Local dataset status (exists / size / checksum / rows)

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{DatasetError, DatasetResult};
use super::fetch::{expand_dir, split_paths};
use super::layout::LayoutInfo;
use super::reader::count_rows;
use super::Split;

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub split: Split,
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub sha256: Option<String>,
    pub rows: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub directory: PathBuf,
    pub layout: LayoutInfo,
    pub inspected_at: DateTime<Utc>,
    pub files: Vec<FileInfo>,
}

impl DatasetInfo {
    pub fn is_complete(&self) -> bool {
        self.files.iter().all(|f| f.exists)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Streamed SHA-256 of a file
pub fn sha256_file(path: &Path) -> DatasetResult<String> {
    let mut file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| DatasetError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Report the state of both split files without creating or downloading
/// anything.
pub fn inspect(directory: impl AsRef<Path>) -> DatasetResult<DatasetInfo> {
    let base = expand_dir(directory.as_ref());
    let (train_path, test_path) = split_paths(&base);

    let files = [(Split::Train, train_path), (Split::Test, test_path)]
        .into_iter()
        .map(|(split, path)| file_info(split, path))
        .collect::<DatasetResult<Vec<_>>>()?;

    Ok(DatasetInfo {
        directory: base,
        layout: LayoutInfo::current(),
        inspected_at: Utc::now(),
        files,
    })
}

fn file_info(split: Split, path: PathBuf) -> DatasetResult<FileInfo> {
    if !path.is_file() {
        return Ok(FileInfo {
            split,
            path,
            exists: false,
            size_bytes: None,
            sha256: None,
            rows: None,
        });
    }

    let size = path.metadata().map_err(|e| DatasetError::io(&path, e))?.len();
    Ok(FileInfo {
        split,
        exists: true,
        size_bytes: Some(size),
        sha256: Some(sha256_file(&path)?),
        rows: Some(count_rows(&path)?),
        path,
    })
}
