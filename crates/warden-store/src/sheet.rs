//! Sheet implementations
//!
//! `FileSheet` keeps registration rows in a local tab-separated file, one
//! row per line. `MemorySheet` backs tests.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::error;

use warden_core::{Sheet, SheetError};

/// Tab-separated file sheet
///
/// Rows load once at open and every append goes to memory and disk under
/// the same lock, mirroring the whole-document discipline of the stores.
pub struct FileSheet {
    path: PathBuf,
    rows: Mutex<Vec<Vec<String>>>,
}

impl FileSheet {
    /// Open the sheet file, loading existing rows
    ///
    /// A missing file starts the sheet empty.
    pub async fn open(path: PathBuf) -> Result<Self, SheetError> {
        let rows = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| l.split('\t').map(str::to_string).collect())
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read sheet file");
                return Err(SheetError::Transport(e.to_string()));
            }
        };

        Ok(Self {
            path,
            rows: Mutex::new(rows),
        })
    }

    async fn persist(&self, rows: &[Vec<String>]) -> Result<(), SheetError> {
        let body = rows
            .iter()
            .map(|r| r.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SheetError::Transport(e.to_string()))?;
            }
        }

        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| SheetError::Transport(e.to_string()))
    }
}

#[async_trait]
impl Sheet for FileSheet {
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetError> {
        // Tabs are the column separator; they cannot survive inside values.
        let row: Vec<String> = row.iter().map(|v| v.replace('\t', " ")).collect();

        let mut rows = self.rows.lock().await;
        rows.push(row);
        self.persist(&rows).await
    }

    async fn column(&self, index: usize) -> Result<Vec<String>, SheetError> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter_map(|r| r.get(index).cloned())
            .collect())
    }

    async fn row_count(&self) -> Result<usize, SheetError> {
        Ok(self.rows.lock().await.len())
    }
}

/// In-memory sheet for tests
#[derive(Default)]
pub struct MemorySheet {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemorySheet {
    /// Snapshot of all rows
    pub async fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl Sheet for MemorySheet {
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetError> {
        self.rows.lock().await.push(row);
        Ok(())
    }

    async fn column(&self, index: usize) -> Result<Vec<String>, SheetError> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter_map(|r| r.get(index).cloned())
            .collect())
    }

    async fn row_count(&self) -> Result<usize, SheetError> {
        Ok(self.rows.lock().await.len())
    }
}
