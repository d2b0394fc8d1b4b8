//! File-backed execution handles.
//!
//! These adapt result files written by an execution run to the
//! `CountsSource` capability. The file is only read when counts are
//! requested, so a handle can be created before the run has finished
//! writing its output.

use crate::loader::{self, RegisterLayout};
use crate::parser;
use iceberg_core::{Counts, CountsSource, IcebergError};
use std::path::{Path, PathBuf};

fn retrieval_error(err: anyhow::Error) -> IcebergError {
    IcebergError::Retrieval {
        reason: format!("{:#}", err),
    }
}

/// Counts text file in either layout accepted by [`parser::parse_counts`].
#[derive(Debug, Clone)]
pub struct CountsFile {
    path: PathBuf,
}

impl CountsFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CountsSource for CountsFile {
    fn retrieve_counts(&self) -> Result<Counts, IcebergError> {
        parser::load_counts_file(&self.path).map_err(retrieval_error)
    }
}

/// Packed shot-record file plus the register layout of its records.
#[derive(Debug, Clone)]
pub struct ShotRecordFile {
    path: PathBuf,
    layout: RegisterLayout,
}

impl ShotRecordFile {
    pub fn new<P: AsRef<Path>>(path: P, layout: RegisterLayout) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &RegisterLayout {
        &self.layout
    }
}

impl CountsSource for ShotRecordFile {
    fn retrieve_counts(&self) -> Result<Counts, IcebergError> {
        loader::load_shot_counts(&self.path, &self.layout).map_err(retrieval_error)
    }
}
