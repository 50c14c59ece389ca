//! JSON input and output.
//!
//! - `read_slices`: load a recorded slice stream (a JSON array of
//!   [`SliceRecord`]s).
//! - `write_json_file`: pretty-print a serializable value to disk, creating
//!   parent directories as needed.

use crate::error::{Error, Result};
use crate::spectrum::Spectrum;
use crate::types::{InputPoint, SliceHeader};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One slice of a recorded stream: header, discriminated points and, when
/// available, the full power spectrum used for refinement.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceRecord {
    pub header: SliceHeader,
    #[serde(default)]
    pub points: Vec<InputPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrum: Option<Spectrum>,
}

pub fn read_slices(path: &Path) -> Result<Vec<SliceRecord>> {
    let data = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
