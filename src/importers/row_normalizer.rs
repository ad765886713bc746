use calamine::Data;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::models::PrizeRecord;
use crate::utils::serial_to_calendar_date;

/// Column positions of a prize draw sheet
///
/// Columns are read by position, never by header label. A sheet with its
/// columns reordered will be misread (or rejected) rather than remapped.
///
/// ```text
/// A (0): Prize Value            - number
/// B (1): Bond Number            - opaque text
/// C (2): Total Value of Holding - number
/// D (3): Area                   - opaque text
/// E (4): Value of Bond          - number
/// F (5): Date of Purchase       - day serial from 1899-12-30
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PrizeValue,
    BondNumber,
    TotalValueOfHolding,
    Area,
    ValueOfBond,
    DateOfPurchase,
}

impl Column {
    pub const fn index(self) -> usize {
        match self {
            Column::PrizeValue => 0,
            Column::BondNumber => 1,
            Column::TotalValueOfHolding => 2,
            Column::Area => 3,
            Column::ValueOfBond => 4,
            Column::DateOfPurchase => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Column::PrizeValue => "prize value",
            Column::BondNumber => "bond number",
            Column::TotalValueOfHolding => "total value of holding",
            Column::Area => "area",
            Column::ValueOfBond => "value of bond",
            Column::DateOfPurchase => "date of purchase",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (column {})", self.label(), self.index())
    }
}

/// Why a row was left out of a dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowRejection {
    #[error("{column} is not a number: {value}")]
    NotNumeric { column: Column, value: String },

    #[error("{column} is not a valid date: {value}")]
    InvalidDate { column: Column, value: String },
}

impl RowRejection {
    pub fn column(&self) -> Column {
        match self {
            RowRejection::NotNumeric { column, .. } | RowRejection::InvalidDate { column, .. } => {
                *column
            }
        }
    }
}

/// Turn one positional row into a `PrizeRecord`
///
/// The three numeric columns must coerce to finite numbers and the date column
/// must convert to a calendar date; otherwise the whole row is rejected and no
/// partial record escapes. Each accepted row gets a fresh v4 id.
pub fn normalize(row: &[Data]) -> Result<PrizeRecord, RowRejection> {
    let prize_value = numeric(row, Column::PrizeValue)?;
    let total_value_of_holding = numeric(row, Column::TotalValueOfHolding)?;
    let value_of_bond = numeric(row, Column::ValueOfBond)?;

    let date_cell = row.get(Column::DateOfPurchase.index());
    let date_of_purchase = to_date(date_cell).ok_or_else(|| RowRejection::InvalidDate {
        column: Column::DateOfPurchase,
        value: describe(date_cell),
    })?;

    Ok(PrizeRecord {
        id: Uuid::new_v4(),
        prize_value,
        bond_number: to_text(row.get(Column::BondNumber.index())),
        total_value_of_holding,
        area: to_text(row.get(Column::Area.index())),
        value_of_bond,
        date_of_purchase,
    })
}

fn numeric(row: &[Data], column: Column) -> Result<f64, RowRejection> {
    let cell = row.get(column.index());
    to_number(cell).ok_or_else(|| RowRejection::NotNumeric {
        column,
        value: describe(cell),
    })
}

/// Coerce a cell to a finite number
///
/// Numbers and date-formatted cells (via their serial) pass straight through;
/// text is trimmed and parsed. Blank text, booleans and error cells are not
/// numbers.
pub fn to_number(cell: Option<&Data>) -> Option<f64> {
    let value = match cell? {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::DateTime(excel_date) => excel_date.as_f64(),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    // "NaN" and "inf" parse as f64 but are not usable amounts
    value.is_finite().then_some(value)
}

/// Coerce a cell to a purchase date
///
/// Serials go through `serial_to_calendar_date`. ODS sheets hand back ISO
/// strings for date cells, so those are parsed directly.
pub fn to_date(cell: Option<&Data>) -> Option<NaiveDate> {
    match cell? {
        Data::DateTimeIso(s) => NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok(),
        other => to_number(Some(other)).and_then(serial_to_calendar_date),
    }
}

fn to_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::DateTime(excel_date)) => excel_date.as_f64().to_string(),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => s.clone(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => format!("{other:?}"),
    }
}

fn describe(cell: Option<&Data>) -> String {
    match cell {
        None => "<missing>".to_string(),
        Some(Data::Empty) => "<empty>".to_string(),
        Some(Data::String(s)) => format!("{s:?}"),
        Some(other) => to_text(Some(other)),
    }
}
