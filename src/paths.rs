//! Path resolution for x-mcp-server directories.
//!
//! Provides XDG-compliant path resolution.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "x-mcp-server";

/// Get XDG-compliant data directory.
///
/// # Returns
/// `$XDG_DATA_HOME/x-mcp-server/`, falling back to `~/.local/share/x-mcp-server/`,
/// or `./x-mcp-server/` when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share"))
        })
        .unwrap_or_else(|| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/users.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("users.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir_ends_with_app_dir() {
        // Env vars are unreliable in parallel tests, so only check the suffix
        assert!(get_data_dir().ends_with(APP_DIR));
    }

    #[test]
    fn test_get_db_path_ends_with_users_db() {
        assert!(get_db_path().ends_with("x-mcp-server/users.db"));
    }
}
