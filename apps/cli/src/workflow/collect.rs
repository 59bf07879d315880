//! Collect step — fetch localized versions for every poem on the list and
//! persist them as pretty-printed JSON for human review.
//!
//! A failed fetch is logged and skipped; one bad poem never aborts the batch.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::errors::AppError;
use crate::localization::{PoemInput, PoemSource, ReviewRecord};

/// Runs the collect step. Returns the number of records written.
pub async fn run_collect_step(
    source: Arc<dyn PoemSource>,
    poem_list_path: &Path,
    review_file_path: &Path,
) -> Result<usize, AppError> {
    let raw = std::fs::read_to_string(poem_list_path).map_err(|e| {
        AppError::Validation(format!(
            "cannot read poem list {}: {e}",
            poem_list_path.display()
        ))
    })?;
    let poems: Vec<PoemInput> = serde_json::from_str(&raw)?;
    info!("Collecting localized versions for {} poems", poems.len());

    let mut records: Vec<ReviewRecord> = Vec::with_capacity(poems.len());
    for (index, poem) in poems.iter().enumerate() {
        info!(
            "[{}/{}] fetching \"{}\" by {}",
            index + 1,
            poems.len(),
            poem.title,
            poem.author
        );
        match source.fetch(&poem.title, &poem.author).await {
            Ok(versions) => records.push(ReviewRecord {
                input: poem.clone(),
                collected_at: Utc::now(),
                versions,
            }),
            Err(e) => error!("Fetch failed for \"{}\", skipping: {e}", poem.title),
        }
    }

    std::fs::write(review_file_path, serde_json::to_string_pretty(&records)?)?;
    info!(
        "{} of {} records saved to {} — proof-read the file, then run the render step",
        records.len(),
        poems.len(),
        review_file_path.display()
    );
    Ok(records.len())
}
