use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::currency::CurrencyFormat;
use crate::importers::{DatasetError, DatasetLoader};
use crate::models::{DrawEntry, DrawSummary};
use crate::services::aggregator::aggregate;
use crate::services::presentation::summarize;

/// Error types for draw lookups
#[derive(Debug, thiserror::Error)]
pub enum DrawServiceError {
    #[error("Draw not found: {0}")]
    NotFound(String),

    #[error("Invalid draw name: {0:?}")]
    InvalidName(String),

    #[error("Failed to read draw: {0}")]
    Dataset(#[source] DatasetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Draw loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Serves prize draws out of a directory of workbooks
///
/// Every immediate file in `winners_dir` is one draw, identified by its file
/// name. Nothing is cached: each summary reloads and re-aggregates its file.
#[derive(Clone)]
pub struct DrawService {
    winners_dir: PathBuf,
    top_locations: usize,
    currency: CurrencyFormat,
}

impl DrawService {
    pub fn new(
        winners_dir: impl Into<PathBuf>,
        top_locations: usize,
        currency: CurrencyFormat,
    ) -> Self {
        Self {
            winners_dir: winners_dir.into(),
            top_locations,
            currency,
        }
    }

    pub fn winners_dir(&self) -> &Path {
        &self.winners_dir
    }

    /// List the draws available in the winners directory, sorted by name
    ///
    /// Only regular files directly inside the directory are listed; there is
    /// no recursion into subdirectories.
    #[instrument(skip(self), fields(dir = %self.winners_dir.display()))]
    pub async fn list_draws(&self) -> Result<Vec<DrawEntry>, DrawServiceError> {
        let mut entries = tokio::fs::read_dir(&self.winners_dir).await?;
        let mut draws = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();

            // fs::metadata follows symlinks, so a link to a workbook still counts
            match tokio::fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_file() => draws.push(DrawEntry { name }),
                Ok(_) => debug!("Skipping non-file entry {}", name),
                Err(e) => warn!("Skipping unreadable entry {}: {}", name, e),
            }
        }

        draws.sort_by(|a, b| a.name.cmp(&b.name));
        info!("Found {} draws", draws.len());
        Ok(draws)
    }

    /// Load, aggregate and summarize a single draw
    ///
    /// `top` overrides the configured number of top locations.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn get_draw_summary(
        &self,
        name: &str,
        top: Option<usize>,
    ) -> Result<DrawSummary, DrawServiceError> {
        let path = self.resolve(name)?;
        let loader = DatasetLoader::new(path);

        // calamine is synchronous
        let dataset = tokio::task::spawn_blocking(move || loader.load())
            .await?
            .map_err(|e| match e {
                DatasetError::NotFound(_) => DrawServiceError::NotFound(name.to_string()),
                other => DrawServiceError::Dataset(other),
            })?;

        let aggregate = aggregate(&dataset.records);
        let summary = summarize(
            name,
            &dataset,
            &aggregate,
            top.unwrap_or(self.top_locations),
            &self.currency,
        );

        info!(
            "Summarized draw {}: {} records ({} rejected), total {}",
            name, summary.record_count, summary.rejected_row_count, summary.total_money_won_display
        );
        Ok(summary)
    }

    /// Map a draw name onto a path inside the winners directory
    ///
    /// Names are plain file names; anything that could walk out of the
    /// directory is refused.
    fn resolve(&self, name: &str) -> Result<PathBuf, DrawServiceError> {
        let is_plain_file_name = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);

        if !is_plain_file_name {
            warn!("Rejecting draw name {:?}", name);
            return Err(DrawServiceError::InvalidName(name.to_string()));
        }

        Ok(self.winners_dir.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> DrawService {
        DrawService::new("public/winners", 3, CurrencyFormat::default())
    }

    #[test]
    fn test_resolve_plain_name() {
        let path = service().resolve("March 2024.xlsx").unwrap();
        assert_eq!(path, PathBuf::from("public/winners/March 2024.xlsx"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        for name in ["", ".", "..", "../secret.xlsx", "nested/draw.xlsx", "a\\b.xlsx"] {
            match service().resolve(name) {
                Err(DrawServiceError::InvalidName(rejected)) => assert_eq!(rejected, name),
                other => panic!("Expected InvalidName for {name:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn test_error_display() {
        let err = DrawServiceError::NotFound("june.xlsx".to_string());
        assert!(err.to_string().contains("june.xlsx"));

        let err = DrawServiceError::InvalidName("..".to_string());
        assert!(err.to_string().contains("\"..\""));
    }

    #[test]
    fn test_dataset_error_is_source() {
        use std::error::Error;

        let err = DrawServiceError::Dataset(DatasetError::WorkbookOpen("bad zip".to_string()));
        let source = err.source().expect("dataset error should be chained");
        assert_eq!(source.to_string(), "Failed to open workbook: bad zip");
    }
}
