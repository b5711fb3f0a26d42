//! File ordering and detector aggregation.

use crate::model::Data;

/// Stable sort of the files by path
pub fn sort_files(data: &mut Data) {
    data.files.sort_by(|a, b| a.file_path.cmp(&b.file_path));
}

/// Union every file's detectors into the document-wide set
pub fn collect_detectors(data: &mut Data) {
    for file in &data.files {
        data.detectors.extend(file.detectors.iter().cloned());
    }
    tracing::debug!(detectors = data.detectors.len(), "Collected detectors");
}
