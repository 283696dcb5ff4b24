//! NSL-KDD Loader
//!
//! Fetches the NSL-KDD intrusion-detection dataset and loads it into
//! in-memory tables.
//!
//! ```no_run
//! use nslkdd::{load_dataset, LoadOptions, Split};
//!
//! let options = LoadOptions { map_to_5class: true, ..LoadOptions::default() };
//! let (train, test) = load_dataset(Split::Both, "~/datasets/nsl-kdd", &options)?
//!     .into_pair()?;
//! println!("train {:?}, test {:?}", train.shape(), test.shape());
//! # Ok::<(), nslkdd::DatasetError>(())
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{DatasetError, DatasetResult, ErrorKind};
pub use logic::dataset::fetch::{ensure_dataset_files, FetchOptions, HttpTransport, Transport};
pub use logic::dataset::inspect::{inspect, DatasetInfo};
pub use logic::dataset::prepare::{prepare, LabelEncoder, Prepared};
pub use logic::dataset::{
    load_dataset, load_dataset_with, map_label, AttackClass, Column, ColumnData, LoadOptions,
    Loaded, Split, Table,
};
