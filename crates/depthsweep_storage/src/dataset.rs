//! Input dataset reader.

use crate::TextEncoding;
use depthsweep_core::StoryRecord;
use depthsweep_error::{DepthsweepResult, StorageError, StorageErrorKind};
use std::path::Path;
use tracing::{info, instrument};

/// Read every story from a CSV dataset.
///
/// The header must name the [`StoryRecord`] columns; extra columns are ignored.
///
/// # Errors
///
/// Returns a storage error if the file cannot be read, decoded, or parsed.
#[instrument(skip(path), fields(path = %path.as_ref().display(), %encoding))]
pub async fn load_stories(
    path: impl AsRef<Path>,
    encoding: TextEncoding,
) -> DepthsweepResult<Vec<StoryRecord>> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    let text = encoding.decode(bytes)?;

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let stories = reader
        .deserialize::<StoryRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            StorageError::new(StorageErrorKind::MalformedRow {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;

    info!(count = stories.len(), "Loaded stories");
    Ok(stories)
}
