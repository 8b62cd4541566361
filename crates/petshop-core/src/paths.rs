//! Filesystem locations shared by the binaries.

use std::path::{Path, PathBuf};

/// Where the store lives unless configured otherwise.
pub const DEFAULT_STORE_PATH: &str = "~/.local/share/petshop/pets.db";

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
