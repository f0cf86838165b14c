//! JSON files on disk
//!
//! The data source dumps are read with `read_json_required`; the session
//! file goes through `read_json` (absent means logged out) and
//! `write_json_atomic`, so an interrupted login never leaves a torn file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{GastosError, GastosResult};

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> GastosError {
    GastosError::Storage(format!("Could not {} {}: {}", action, path.display(), err))
}

/// Parse a JSON file, or `T::default()` when it is absent
pub fn read_json<T, P>(path: P) -> GastosResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.exists() {
        read_json_required(path)
    } else {
        Ok(T::default())
    }
}

/// Parse a JSON file that must exist
pub fn read_json_required<T, P>(path: P) -> GastosResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with `data` as pretty JSON via a sibling `.json.tmp` file
pub fn write_json_atomic<T, P>(path: P, data: &T) -> GastosResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    let staged = path.with_extension("json.tmp");
    let mut writer =
        BufWriter::new(File::create(&staged).map_err(|e| storage_error("create", &staged, e))?);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize into", &staged, e))?;
    writer.flush().map_err(|e| storage_error("flush", &staged, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", &staged, e))?;

    fs::rename(&staged, path).map_err(|e| {
        let _ = fs::remove_file(&staged);
        storage_error("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, LookupEntry, UserId};
    use tempfile::TempDir;

    type Categories = Vec<LookupEntry<CategoryId>>;

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let categories: Categories = read_json(&path).unwrap();
        assert!(categories.is_empty());

        let session: Option<Categories> = read_json(&path).unwrap();
        assert!(session.is_none());
    }

    #[test]
    fn test_atomic_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dump").join("categorias.json");
        let categories: Categories = vec![LookupEntry::new(
            CategoryId::new(4),
            "Comida",
            UserId::new(1),
        )];

        write_json_atomic(&path, &categories).unwrap();
        assert!(!temp_dir.path().join("dump").join("categorias.json.tmp").exists());

        let loaded: Categories = read_json_required(&path).unwrap();
        assert_eq!(loaded, categories);
    }

    #[test]
    fn test_required_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("divisas.json");

        let missing = read_json_required::<Categories, _>(&path).unwrap_err();
        assert!(missing.to_string().contains("Could not open"));

        fs::write(&path, "no es json").unwrap();
        let garbled = read_json_required::<Categories, _>(&path).unwrap_err();
        assert!(garbled.to_string().contains("Could not parse"));
    }
}
