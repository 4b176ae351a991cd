//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "relief";
const APPLICATION: &str = "relief";

const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/relief` or `~/.cache/relief`
/// - macOS: `~/Library/Caches/org.relief.relief`
/// - Windows: `C:\Users\<User>\AppData\Local\relief\relief\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory for `config.json`.
///
/// - Linux: `$XDG_CONFIG_HOME/relief` or `~/.config/relief`
/// - macOS: `~/Library/Application Support/org.relief.relief`
/// - Windows: `C:\Users\<User>\AppData\Roaming\relief\relief\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// The table config file, if one exists.
pub fn config_file() -> Option<PathBuf> {
    config_dir()
        .map(|dir| dir.join("config.json"))
        .filter(|path| path.is_file())
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive `latest.log` under a timestamped name and prune old archives.
///
/// Call at startup, before the new log file is created.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    if let Err(e) = fs::create_dir_all(&cache) {
        debug!("could not create {}: {e}", cache.display());
        return;
    }
    rotate_logs_in(&cache, MAX_OLD_LOGS);
}

fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = dir.join(format!("{timestamp}.log"));
        if let Err(e) = fs::rename(&latest, &archived) {
            debug!("could not archive {}: {e}", latest.display());
        }
    }
    prune_logs(dir, keep);
}

/// Remove archived logs beyond the newest `keep`.
fn prune_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first; the timestamped names sort chronologically.
    logs.sort_by_key(|e| e.file_name());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            if let Err(e) = fs::remove_file(entry.path()) {
                debug!("could not prune {}: {e}", entry.path().display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_archives_and_prunes() {
        let dir = std::env::temp_dir().join(format!("relief-logs-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        for name in ["20240101_000000.log", "20240102_000000.log", "20240103_000000.log"] {
            fs::write(dir.join(name), "old").unwrap();
        }
        fs::write(dir.join(LATEST_LOG), "current").unwrap();

        rotate_logs_in(&dir, 2);

        let mut names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names.len(), 2);
        assert!(!names.contains(&LATEST_LOG.to_string()));
        assert!(!names.contains(&"20240101_000000.log".to_string()));
        assert!(!names.contains(&"20240102_000000.log".to_string()));
        let _ = fs::remove_dir_all(&dir);
    }
}
