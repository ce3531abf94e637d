use super::{render, DataStore, Payload, EMPTY_CATALOG};
use crate::error::{Result, StockError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct FileStore {
    data_file: PathBuf,
}

impl FileStore {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StockError::Io)?;
            }
        }
        Ok(())
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "catalog".to_string());
        path.with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let tmp_file = Self::tmp_path(path);
        let replaced = fs::write(&tmp_file, content).and_then(|_| fs::rename(&tmp_file, path));

        if let Err(e) = replaced {
            warn!(path = %path.display(), error = %e, "atomic replace failed, writing in place");
            let _ = fs::remove_file(&tmp_file);
            fs::write(path, content).map_err(StockError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn save(&mut self, path: &Path, payload: &Payload<'_>) -> Result<()> {
        self.ensure_parent(path)?;
        let content = render(payload)?;
        self.write_atomic(path, &content)?;
        info!(path = %path.display(), bytes = content.len(), "saved catalog");
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<Value> {
        if !path.exists() {
            let created = self
                .ensure_parent(path)
                .and_then(|_| fs::write(path, EMPTY_CATALOG).map_err(StockError::Io));
            match created {
                Ok(()) => info!(path = %path.display(), "created empty catalog"),
                Err(e) => warn!(path = %path.display(), error = %e, "could not create catalog file"),
            }
            return Ok(Value::Array(Vec::new()));
        }

        let content = fs::read_to_string(path).map_err(StockError::Io)?;
        let value = serde_json::from_str(&content).map_err(StockError::Serialization)?;
        debug!(path = %path.display(), "loaded catalog");
        Ok(value)
    }
}
