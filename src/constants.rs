//! Central Configuration Constants
//!
//! Single source of truth for dataset defaults.
//! Every default can be overridden through the environment (or a `.env` file
//! loaded by the binary).

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Training split file name
pub const TRAIN_FILE: &str = "KDDTrain+.txt";

/// Test split file name
pub const TEST_FILE: &str = "KDDTest+.txt";

/// Default dataset directory (`~` is expanded at resolve time)
pub const DEFAULT_BASE_DIR: &str = "~/datasets/nsl-kdd";

/// Default mirror key
pub const DEFAULT_MIRROR: &str = "github";

/// Default download timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Download URLs for one mirror
#[derive(Debug, Clone, Copy)]
pub struct MirrorUrls {
    pub train: &'static str,
    pub test: &'static str,
}

/// Registered mirrors
pub static MIRRORS: Lazy<HashMap<&'static str, MirrorUrls>> = Lazy::new(|| {
    HashMap::from([(
        "github",
        MirrorUrls {
            train: "https://raw.githubusercontent.com/defcom17/NSL_KDD/master/KDDTrain+.txt",
            test: "https://raw.githubusercontent.com/defcom17/NSL_KDD/master/KDDTest+.txt",
        },
    )])
});

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get dataset directory from environment or use default
pub fn get_base_dir() -> String {
    std::env::var("NSL_KDD_DIR")
        .unwrap_or_else(|_| DEFAULT_BASE_DIR.to_string())
}

/// Get mirror key from environment or use default
pub fn get_mirror() -> String {
    std::env::var("NSL_KDD_MIRROR")
        .unwrap_or_else(|_| DEFAULT_MIRROR.to_string())
}

/// Get download timeout from environment or use default
pub fn get_timeout_secs() -> u64 {
    std::env::var("NSL_KDD_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}
