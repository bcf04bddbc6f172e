//! Sheet trait (port) - the external spreadsheet's narrow surface
//!
//! Registration ingestion only ever appends rows and scans one column for
//! duplicate display names.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from sheet calls
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Sheet transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Sheet: Send + Sync {
    /// Append one row
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetError>;

    /// All values in the given column, top to bottom
    async fn column(&self, index: usize) -> Result<Vec<String>, SheetError>;

    /// Number of stored rows
    async fn row_count(&self) -> Result<usize, SheetError>;
}
