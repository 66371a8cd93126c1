//! PDF engine discovery and child environment setup
//!
//! TeX Live installs often live outside the login PATH (typically under
//! `/usr/local/texlive/<year>/bin/<arch>`), so discovery checks a configured
//! path first, then asks `which`, and finally falls back to the bare binary
//! name for pandoc to resolve.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info, warn};

/// Resolve the xelatex binary to hand to `--pdf-engine`
pub fn discover_pdf_engine(configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        if path.exists() {
            info!("using configured pdf engine: {}", path.display());
            return path.to_path_buf();
        }
        warn!(
            "configured pdf engine {} does not exist, falling back to PATH lookup",
            path.display()
        );
    }

    match Command::new("which").arg("xelatex").output() {
        Ok(output) if output.status.success() => {
            let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !path.is_empty() {
                info!("found xelatex on PATH: {}", path);
                return PathBuf::from(path);
            }
        }
        Ok(_) => warn!("xelatex not found on PATH"),
        Err(e) => debug!("which lookup failed: {}", e),
    }

    // Let pandoc try its own resolution
    PathBuf::from("xelatex")
}

/// Child `PATH` with the TeX Live bin directory prepended
///
/// Returns `None` when no directory is configured or it does not exist, in
/// which case the child inherits the parent environment untouched.
pub fn child_path(texlive_bin_dir: Option<&Path>) -> Option<OsString> {
    let dir = texlive_bin_dir?;
    if !dir.is_dir() {
        warn!("texlive bin dir {} does not exist, ignoring", dir.display());
        return None;
    }

    let current = env::var_os("PATH").unwrap_or_default();
    let paths: Vec<PathBuf> = std::iter::once(dir.to_path_buf())
        .chain(env::split_paths(&current))
        .collect();
    match env::join_paths(paths) {
        Ok(joined) => {
            info!("prepending {} to child PATH", dir.display());
            Some(joined)
        }
        Err(e) => {
            warn!("failed to build child PATH: {}", e);
            None
        }
    }
}
