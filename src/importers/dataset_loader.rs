use calamine::{open_workbook_auto, Data, Range, Reader};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::importers::row_normalizer::{normalize, RowRejection};
use crate::models::PrizeRecord;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Failed to read sheet {sheet}: {msg}")]
    SheetRead { sheet: String, msg: String },
}

/// A row that failed normalization, kept for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// Zero-based row index within the sheet
    pub row_index: usize,
    pub reason: RowRejection,
}

/// Result of reading one prize draw workbook
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    /// Name of the sheet that was read (always the first one)
    pub sheet_name: String,
    /// Accepted records, in sheet row order
    pub records: Vec<PrizeRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// Reader for prize draw workbooks (xlsx, xlsm, xlsb, xls, ods)
pub struct DatasetLoader {
    workbook_path: PathBuf,
}

impl DatasetLoader {
    pub fn new(workbook_path: impl Into<PathBuf>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.workbook_path
    }

    /// Read the first sheet and normalize every row
    ///
    /// Only the first sheet (declaration order) is read; any others are ignored.
    /// Rows that fail normalization are dropped from `records` and listed in
    /// `rejected`. A header row is not special-cased: it fails the numeric
    /// checks and lands in `rejected` like any other bad row.
    ///
    /// A path that is missing or is not a regular file (a directory, say) is
    /// `NotFound`.
    ///
    /// This is synchronous, caller should use spawn_blocking from async code.
    #[instrument(skip(self), fields(path = %self.workbook_path.display()))]
    pub fn load(&self) -> Result<LoadedDataset, DatasetError> {
        // is_file follows symlinks, matching what the draw listing accepts
        if !self.workbook_path.is_file() {
            return Err(DatasetError::NotFound(self.workbook_path.clone()));
        }

        info!("Loading prize draw workbook");

        let mut workbook = match open_workbook_auto(&self.workbook_path) {
            Ok(wb) => wb,
            Err(e) => return Err(DatasetError::WorkbookOpen(e.to_string())),
        };

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(DatasetError::NoSheets)?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| DatasetError::SheetRead {
                sheet: sheet_name.clone(),
                msg: e.to_string(),
            })?;

        debug!(
            "Sheet {} spans {} rows x {} columns",
            sheet_name,
            range.height(),
            range.width()
        );

        let (records, rejected) = Self::normalize_range(&range);

        if !rejected.is_empty() {
            warn!(
                "Dropped {} invalid rows from sheet {}",
                rejected.len(),
                sheet_name
            );
        }
        info!(
            "Loaded {} prize records from sheet {}",
            records.len(),
            sheet_name
        );

        Ok(LoadedDataset {
            sheet_name,
            records,
            rejected,
        })
    }

    /// Same as `load`, keeping only the accepted records
    pub fn load_records(&self) -> Result<Vec<PrizeRecord>, DatasetError> {
        self.load().map(|dataset| dataset.records)
    }

    fn normalize_range(range: &Range<Data>) -> (Vec<PrizeRecord>, Vec<RejectedRow>) {
        let mut records = Vec::new();
        let mut rejected = Vec::new();

        // calamine trims leading empty rows/columns; positions are counted from
        // column A, so pad the row back out when the used range starts later
        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let first_row = first_row as usize;
        let first_col = first_col as usize;

        for (idx, row) in range.rows().enumerate() {
            let row_index = first_row + idx;

            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                debug!("Row {} is blank, skipping", row_index);
                continue;
            }

            let cells: Cow<[Data]> = if first_col == 0 {
                Cow::Borrowed(row)
            } else {
                Cow::Owned(
                    std::iter::repeat(Data::Empty)
                        .take(first_col)
                        .chain(row.iter().cloned())
                        .collect(),
                )
            };

            match normalize(&cells) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    debug!("Row {} rejected: {}", row_index, reason);
                    rejected.push(RejectedRow { row_index, reason });
                }
            }
        }

        (records, rejected)
    }
}

/// Load a prize draw workbook from `path`
pub fn load(path: impl AsRef<Path>) -> Result<LoadedDataset, DatasetError> {
    DatasetLoader::new(path.as_ref()).load()
}

/// Load only the accepted records from a prize draw workbook
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<PrizeRecord>, DatasetError> {
    DatasetLoader::new(path.as_ref()).load_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importers::row_normalizer::Column;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_dataset_loader_creation() {
        let loader = DatasetLoader::new("winners.xlsx");
        assert_eq!(loader.path(), Path::new("winners.xlsx"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = load("/nonexistent/path");
        match result {
            Err(DatasetError::NotFound(path)) => {
                assert_eq!(path, PathBuf::from("/nonexistent/path"));
            }
            other => panic!("Expected NotFound error, got: {other:?}"),
        }
    }

    #[test]
    fn test_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        match load(dir.path()) {
            Err(DatasetError::NotFound(path)) => assert_eq!(path, dir.path()),
            other => panic!("Expected NotFound error, got: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_range_filters_invalid_rows() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 5));
        let rows = [
            [
                Data::Float(100.0),
                text("B1"),
                Data::Float(1000.0),
                text("North"),
                Data::Float(100.0),
                Data::Float(0.0),
            ],
            [
                text("x"),
                text("B2"),
                Data::Float(500.0),
                text("South"),
                Data::Float(50.0),
                Data::Float(1.0),
            ],
        ];
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }

        let (records, rejected) = DatasetLoader::normalize_range(&range);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bond_number, "B1");
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].row_index, 1);
        assert_eq!(rejected[0].reason.column(), Column::PrizeValue);
    }

    #[test]
    fn test_normalize_range_pads_offset_columns() {
        // Used range starting at column B: column A is treated as empty
        let mut range: Range<Data> = Range::new((0, 1), (0, 5));
        range.set_value((0, 1), text("B1"));
        range.set_value((0, 2), Data::Float(1000.0));
        range.set_value((0, 3), text("North"));
        range.set_value((0, 4), Data::Float(100.0));
        range.set_value((0, 5), Data::Float(0.0));

        let (records, rejected) = DatasetLoader::normalize_range(&range);

        assert!(records.is_empty());
        assert_eq!(rejected.len(), 1);
        assert_eq!(
            rejected[0].reason,
            RowRejection::NotNumeric {
                column: Column::PrizeValue,
                value: "<empty>".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_range_skips_blank_rows() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 5));
        let row = [
            Data::Float(25.0),
            text("B9"),
            Data::Float(75.0),
            text("East"),
            Data::Float(25.0),
            Data::Float(44000.0),
        ];
        for (c, cell) in row.iter().enumerate() {
            range.set_value((0, c as u32), cell.clone());
            range.set_value((2, c as u32), cell.clone());
        }

        let (records, rejected) = DatasetLoader::normalize_range(&range);

        assert_eq!(records.len(), 2);
        assert!(rejected.is_empty());
    }
}
