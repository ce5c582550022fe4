use super::types::{RunStore, STORE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default run store path (~/.config/setup-scout/runs.json)
pub fn get_runs_path() -> PathBuf {
    crate::config::get_config_dir().join("runs.json")
}

/// Load the run store from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_run_store(path: &Path) -> Result<RunStore> {
    if !path.exists() {
        log::debug!("No run store at {}, starting empty", path.display());
        return Ok(RunStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open run store at {}", path.display()))?;

    let store: RunStore = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load run store from {}", path.display()))?;

    if store.version != STORE_VERSION {
        anyhow::bail!("Unsupported run store version: {}", store.version);
    }

    log::debug!(
        "Loaded {} runs for {} users from {}",
        store.total_runs(),
        store.users.len(),
        path.display()
    );
    Ok(store)
}

/// Save the run store to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if it
/// doesn't exist.
pub fn save_run_store(path: &Path, store: &RunStore) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize run store")?;

    file.commit().context("Failed to save run store")?;

    log::debug!("Saved {} runs to {}", store.total_runs(), path.display());
    Ok(())
}
