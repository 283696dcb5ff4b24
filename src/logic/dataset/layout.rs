//! Column Layout - Centralized NSL-KDD Column Definition
//!
//! **This file controls the raw record schema**
//!
//! Rows carry no header, so every field is named by its position here.
//! Changing order or adding a column → increment LAYOUT_VERSION.

use crc32fast::Hasher;
use serde::Serialize;

// ============================================================================
// LAYOUT VERSION
// ============================================================================

/// Current column layout version
pub const LAYOUT_VERSION: u8 = 1;

// ============================================================================
// COLUMN LAYOUT (Authoritative source)
// ============================================================================

/// Column names in exact file order
pub const COLUMNS: &[&str] = &[
    // === Basic connection (0-8) ===
    "duration",
    "protocol_type",
    "service",
    "flag",
    "src_bytes",
    "dst_bytes",
    "land",
    "wrong_fragment",
    "urgent",

    // === Content (9-21) ===
    "hot",
    "num_failed_logins",
    "logged_in",
    "num_compromised",
    "root_shell",
    "su_attempted",
    "num_root",
    "num_file_creations",
    "num_shells",
    "num_access_files",
    "num_outbound_cmds",
    "is_host_login",
    "is_guest_login",

    // === Time-based traffic (22-30) ===
    "count",
    "srv_count",
    "serror_rate",
    "srv_serror_rate",
    "rerror_rate",
    "srv_rerror_rate",
    "same_srv_rate",
    "diff_srv_rate",
    "srv_diff_host_rate",

    // === Host-based traffic (31-40) ===
    "dst_host_count",
    "dst_host_srv_count",
    "dst_host_same_srv_rate",
    "dst_host_diff_srv_rate",
    "dst_host_same_src_port_rate",
    "dst_host_srv_diff_host_rate",
    "dst_host_serror_rate",
    "dst_host_srv_serror_rate",
    "dst_host_rerror_rate",
    "dst_host_srv_rerror_rate",

    // === Targets (41-42) ===
    "label",
    "difficulty",
];

/// Fields per raw row
/// IMPORTANT: Must match COLUMNS.len()!
pub const COLUMN_COUNT: usize = 43;

/// Categorical feature columns (expanded by one-hot encoding)
pub const CATEGORICAL_COLUMNS: &[&str] = &["protocol_type", "service", "flag"];

pub const LABEL_COLUMN: &str = "label";
pub const DIFFICULTY_COLUMN: &str = "difficulty";
pub const LABEL_5CLASS_COLUMN: &str = "label_5class";

/// True for columns stored as strings rather than numbers
pub fn is_categorical(name: &str) -> bool {
    name == LABEL_COLUMN || CATEGORICAL_COLUMNS.contains(&name)
}

// ============================================================================
// SCHEMA HASH
// ============================================================================

/// CRC32 of an ordered column list, salted with the layout version
pub fn schema_hash<'a, I>(names: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Hasher::new();
    hasher.update(&[LAYOUT_VERSION]);

    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Hash of the raw file layout
pub fn layout_hash() -> u32 {
    schema_hash(COLUMNS.iter().copied())
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout description embedded in dataset reports
#[derive(Debug, Clone, Serialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub column_count: usize,
    pub column_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: LAYOUT_VERSION,
            hash: layout_hash(),
            column_count: COLUMN_COUNT,
            column_names: COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
