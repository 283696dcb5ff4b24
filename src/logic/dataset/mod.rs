//! Dataset Module - NSL-KDD fetch & load
//!
//! Downloads the two NSL-KDD split files and loads them into [`Table`]s,
//! with optional 5-class label mapping and one-hot categorical encoding.

pub mod layout;
pub mod labels;
pub mod table;
pub mod reader;
pub mod encode;
pub mod fetch;
pub mod inspect;
pub mod prepare;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, DatasetResult};
use fetch::{ensure_dataset_files_with, resolve_dir, split_paths, FetchOptions, HttpTransport, Transport};
use layout::DIFFICULTY_COLUMN;

pub use labels::{map_label, AttackClass, LABEL_TO_5CLASS};
pub use table::{Column, ColumnData, Table};

// ============================================================================
// TYPES
// ============================================================================

/// Which split file(s) to operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Test,
    Both,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
            Split::Both => "both",
        }
    }

    fn wants_train(&self) -> bool {
        matches!(self, Split::Train | Split::Both)
    }

    fn wants_test(&self) -> bool {
        matches!(self, Split::Test | Split::Both)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            "both" => Ok(Split::Both),
            _ => Err(DatasetError::UnknownSplit(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Run the fetcher (default options) if either file is absent
    pub download_if_missing: bool,
    pub drop_difficulty: bool,
    /// Append `label_5class`
    pub map_to_5class: bool,
    /// Expand protocol_type / service / flag into indicator columns
    pub one_hot: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            download_if_missing: true,
            drop_difficulty: true,
            map_to_5class: false,
            one_hot: false,
        }
    }
}

/// Load result: one table for `train`/`test`, a (train, test) pair for `both`
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Single(Table),
    Pair(Table, Table),
}

impl Loaded {
    pub fn into_single(self) -> DatasetResult<Table> {
        match self {
            Loaded::Single(table) => Ok(table),
            Loaded::Pair(..) => Err(DatasetError::Schema(
                "expected a single table, got a train/test pair".to_string(),
            )),
        }
    }

    pub fn into_pair(self) -> DatasetResult<(Table, Table)> {
        match self {
            Loaded::Pair(train, test) => Ok((train, test)),
            Loaded::Single(_) => Err(DatasetError::Schema(
                "expected a train/test pair, got a single table".to_string(),
            )),
        }
    }
}

// ============================================================================
// LOADER
// ============================================================================

/// Load one or both splits from `directory`, downloading over HTTP if
/// allowed and needed.
pub fn load_dataset(
    split: Split,
    directory: impl AsRef<Path>,
    options: &LoadOptions,
) -> DatasetResult<Loaded> {
    load_dataset_with(split, directory, options, &HttpTransport::new())
}

/// Same as [`load_dataset`] with a caller-supplied transport
pub fn load_dataset_with(
    split: Split,
    directory: impl AsRef<Path>,
    options: &LoadOptions,
    transport: &dyn Transport,
) -> DatasetResult<Loaded> {
    let base = resolve_dir(directory.as_ref())?;
    let (train_path, test_path) = split_paths(&base);

    if options.download_if_missing && (!train_path.exists() || !test_path.exists()) {
        ensure_dataset_files_with(&base, &FetchOptions::default(), transport)?;
    }

    // Every requested file must exist before any parsing starts
    let required = [
        (split.wants_train(), &train_path),
        (split.wants_test(), &test_path),
    ];
    for (needed, path) in required {
        if needed && !path.is_file() {
            return Err(DatasetError::NotFound(path.clone()));
        }
    }

    let read = |path: &Path| -> DatasetResult<Table> {
        let mut table = reader::read_split(path)?;
        if options.drop_difficulty {
            table.drop_column(DIFFICULTY_COLUMN);
        }
        if options.map_to_5class {
            encode::add_5class_column(&mut table)?;
        }
        Ok(table)
    };

    let loaded = match split {
        Split::Train | Split::Test => {
            let path = if split == Split::Train { train_path.as_path() } else { test_path.as_path() };
            let mut table = read(path)?;
            if options.one_hot {
                table = encode::one_hot(table)?;
            }
            Loaded::Single(table)
        }
        Split::Both => {
            let train = read(train_path.as_path())?;
            let test = read(test_path.as_path())?;
            if options.one_hot {
                // Encode jointly so both halves share one indicator set
                let train_rows = train.n_rows();
                let combined = encode::one_hot(train.concat(&test)?)?;
                let (train, test) = combined.split_at(train_rows);
                Loaded::Pair(train, test)
            } else {
                Loaded::Pair(train, test)
            }
        }
    };

    match &loaded {
        Loaded::Single(t) => log::info!("Loaded {} split: {:?}", split, t.shape()),
        Loaded::Pair(a, b) => log::info!("Loaded both splits: train {:?}, test {:?}", a.shape(), b.shape()),
    }

    Ok(loaded)
}
