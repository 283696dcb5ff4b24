//! Dataset Fetcher
//!
//! Makes sure both split files exist locally, downloading them from a
//! registered mirror when absent (or when overwrite is requested).

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{self, MIRRORS, TEST_FILE, TRAIN_FILE};
use crate::error::{DatasetError, DatasetResult};
use super::inspect::sha256_hex;

// ============================================================================
// TRANSPORT
// ============================================================================

/// Fetches the full body of a URL
pub trait Transport {
    fn fetch(&self, url: &str) -> DatasetResult<Vec<u8>>;
}

/// Blocking HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout: Duration,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(constants::get_timeout_secs()))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> DatasetResult<Vec<u8>> {
        let transfer_error = |message: String| DatasetError::Transfer {
            url: url.to_string(),
            message,
        };

        let response = match ureq::get(url).timeout(self.timeout).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) => {
                return Err(transfer_error(format!("HTTP status {}", code)));
            }
            Err(e) => return Err(transfer_error(e.to_string())),
        };

        // into_string() caps bodies at 10 MB; the train split is larger
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| transfer_error(e.to_string()))?;

        if body.is_empty() {
            return Err(transfer_error("empty response body".to_string()));
        }

        Ok(body)
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Re-download even if the file already exists
    pub overwrite: bool,
    /// Key into the mirror table
    pub mirror: String,
    /// Emit progress at info level (debug otherwise)
    pub verbose: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            mirror: constants::get_mirror(),
            verbose: true,
        }
    }
}

// ============================================================================
// DIRECTORY HELPERS
// ============================================================================

/// Expand a leading `~` to the home directory
pub fn expand_dir(directory: &Path) -> PathBuf {
    match directory.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| directory.to_path_buf()),
        Err(_) => directory.to_path_buf(),
    }
}

/// Expand, create (with parents) and canonicalize a dataset directory
pub fn resolve_dir(directory: &Path) -> DatasetResult<PathBuf> {
    let expanded = expand_dir(directory);
    fs::create_dir_all(&expanded).map_err(|e| DatasetError::io(&expanded, e))?;
    fs::canonicalize(&expanded).map_err(|e| DatasetError::io(&expanded, e))
}

/// (train, test) file paths under `base`
pub fn split_paths(base: &Path) -> (PathBuf, PathBuf) {
    (base.join(TRAIN_FILE), base.join(TEST_FILE))
}

// ============================================================================
// FETCH
// ============================================================================

/// Ensure both split files exist under `directory`, downloading over HTTP.
///
/// Returns the resolved (train, test) paths whether or not anything was
/// downloaded.
pub fn ensure_dataset_files(
    directory: impl AsRef<Path>,
    options: &FetchOptions,
) -> DatasetResult<(PathBuf, PathBuf)> {
    ensure_dataset_files_with(directory, options, &HttpTransport::new())
}

/// Same as [`ensure_dataset_files`] with a caller-supplied transport
pub fn ensure_dataset_files_with(
    directory: impl AsRef<Path>,
    options: &FetchOptions,
    transport: &dyn Transport,
) -> DatasetResult<(PathBuf, PathBuf)> {
    let urls = MIRRORS
        .get(options.mirror.as_str())
        .ok_or_else(|| DatasetError::UnknownMirror(options.mirror.clone()))?;

    let base = resolve_dir(directory.as_ref())?;
    let (train_path, test_path) = split_paths(&base);

    maybe_download(urls.train, &train_path, options, transport)?;
    maybe_download(urls.test, &test_path, options, transport)?;

    Ok((train_path, test_path))
}

fn maybe_download(
    url: &str,
    path: &Path,
    options: &FetchOptions,
    transport: &dyn Transport,
) -> DatasetResult<()> {
    let level = if options.verbose { log::Level::Info } else { log::Level::Debug };

    if path.exists() && !options.overwrite {
        log::log!(level, "Found existing: {}", path.display());
        return Ok(());
    }

    log::log!(level, "Downloading: {} -> {}", url, path.display());
    let body = transport.fetch(url)?;
    fs::write(path, &body).map_err(|e| DatasetError::io(path, e))?;
    log::log!(
        level,
        "Saved: {} ({} bytes, sha256 {})",
        path.display(),
        body.len(),
        sha256_hex(&body)
    );

    Ok(())
}
