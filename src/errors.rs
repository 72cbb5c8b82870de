//! Centralized error handling for nc_scan
//!
//! All failures that can abort a classification run are open failures: the
//! file is missing, unreadable, not NetCDF, or carries metadata that cannot be
//! decoded. Everything past the point of loading is resolved by the
//! classification rules and never surfaces as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Why a dataset could not be opened
#[derive(Error, Debug)]
pub enum OpenFailure {
    /// The file could not be read from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The NetCDF library rejected the file
    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),

    /// The file signature matches no NetCDF data model
    #[error("not a NetCDF-3 or NetCDF-4/HDF5 file")]
    UnrecognizedFormat,

    /// An attribute value could not be decoded while loading the tree
    #[error("cannot read attribute '{attribute}' of variable '{variable}': {source}")]
    Attribute {
        variable: String,
        attribute: String,
        #[source]
        source: netcdf::Error,
    },
}

/// Main error type for nc_scan operations
#[derive(Error, Debug)]
pub enum NcScanError {
    /// The dataset could not be opened or parsed
    #[error("failed to open dataset '{}': {source}", .path.display())]
    DatasetOpen {
        path: PathBuf,
        #[source]
        source: OpenFailure,
    },

    /// NetCDF file operation errors outside of a classification run
    #[error("NetCDF error: {0}")]
    NetCDFError(#[from] netcdf::Error),

    /// I/O operation errors outside of a classification run
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl NcScanError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: impl Into<OpenFailure>) -> Self {
        NcScanError::DatasetOpen {
            path: path.into(),
            source: source.into(),
        }
    }

    /// True when the error aborted a run at dataset acquisition
    pub fn is_open_error(&self) -> bool {
        matches!(self, NcScanError::DatasetOpen { .. })
    }
}

/// Result type alias for nc_scan operations
pub type Result<T> = std::result::Result<T, NcScanError>;
