//! JSON inventory snapshots.
//!
//! The scanner hands over its [`Data`] as a JSON document; the normalized
//! result is written back in the same shape.

use crate::error::{ErrorContext, PrepError, Result, SnapshotErrorKind};
use crate::model::Data;
use std::io::Read;
use std::path::Path;

/// Parse a snapshot from a reader
pub fn read_snapshot<R: Read>(reader: R) -> Result<Data> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a snapshot file
pub fn load_snapshot(path: &Path) -> Result<Data> {
    let file = std::fs::File::open(path).map_err(|e| PrepError::io(path, e))?;
    read_snapshot(std::io::BufReader::new(file))
        .with_context(|| format!("loading {}", path.display()))
}

/// Render a snapshot as JSON
pub fn snapshot_to_json(data: &Data, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    };
    rendered.map_err(|e| {
        PrepError::snapshot(
            "rendering snapshot",
            SnapshotErrorKind::Serialization(e.to_string()),
        )
    })
}
