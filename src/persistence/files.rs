use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the nightfall directory - checks for a local .nightfall first, then
/// falls back to the global ~/.nightfall
pub fn get_nightfall_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_nightfall(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".nightfall"))
}

/// Find a local .nightfall directory by walking up the directory tree
fn find_local_nightfall(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let dir = current.join(".nightfall");
        if dir.exists() && dir.is_dir() {
            return Some(dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the nightfall directory exists
pub fn ensure_nightfall_dir() -> Result<PathBuf> {
    let dir = get_nightfall_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Get path to the persisted cue settings record
pub fn settings_file() -> Result<PathBuf> {
    Ok(ensure_nightfall_dir()?.join("settings.json"))
}

/// Get path to the voice-pack sound files (one subdirectory per voice)
pub fn sounds_dir() -> Result<PathBuf> {
    Ok(get_nightfall_dir()?.join("sounds"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        atomic_write(&path, "first").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        atomic_write(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_find_local_nightfall_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("project");
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(root.join(".nightfall")).unwrap();

        let found = find_local_nightfall(&nested).unwrap();
        assert_eq!(found, root.join(".nightfall"));
    }
}
