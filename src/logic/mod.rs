//! Logic Module - Dataset engines
//!
//! - `dataset/` - NSL-KDD fetch, parse, encode, prepare

pub mod dataset;
