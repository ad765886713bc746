use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::utils::normalize_zero;

/// A single winning bond from a prize draw workbook
///
/// Only produced by the row normalizer, so every numeric field is finite
/// and `date_of_purchase` is a real calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PrizeRecord {
    /// Generated when the row is normalized; source files carry no identifier
    pub id: Uuid,
    pub prize_value: f64,
    pub bond_number: String,
    pub total_value_of_holding: f64,
    pub area: String,
    pub value_of_bond: f64,
    pub date_of_purchase: NaiveDate,
}

/// Map key for prize values
///
/// Floats are neither `Eq` nor `Ord`, so prize values are keyed through this
/// wrapper. `-0.0` is folded into `0.0` and ordering uses `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct PrizeKey(f64);

impl PrizeKey {
    pub fn new(value: f64) -> Self {
        Self(normalize_zero(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for PrizeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PrizeKey {}

impl PartialOrd for PrizeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrizeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for PrizeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Derived statistics for one loaded draw
///
/// Built fresh by `services::aggregator::aggregate` on every load.
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    pub total_money_won: f64,
    pub location_counts: HashMap<String, usize>,
    /// For each prize value, the first record seen with the smallest holding
    pub lowest_holding_by_prize_value: BTreeMap<PrizeKey, PrizeRecord>,
}

// API response DTOs (to avoid circular dependency between services and api modules)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LocationCount {
    pub area: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LowestHolding {
    pub prize_value: f64,
    pub prize_value_display: String,
    pub total_value_of_holding_display: String,
    pub record: PrizeRecord,
}

/// A prize record with its money columns pre-formatted for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordView {
    pub id: Uuid,
    pub prize_value: f64,
    pub prize_value_display: String,
    pub bond_number: String,
    pub total_value_of_holding: f64,
    pub total_value_of_holding_display: String,
    pub area: String,
    pub value_of_bond: f64,
    pub value_of_bond_display: String,
    pub date_of_purchase: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawSummary {
    pub dataset: String,
    pub record_count: usize,
    pub rejected_row_count: usize,
    /// Infinite (JSON `null`) if the sum of prize values overflows
    pub total_money_won: f64,
    pub total_money_won_display: String,
    pub top_locations: Vec<LocationCount>,
    /// Ordered by prize value, largest first
    pub lowest_holdings: Vec<LowestHolding>,
    /// Accepted records in sheet order
    pub records: Vec<RecordView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DrawEntry {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawListResponse {
    pub total_draws: usize,
    pub draws: Vec<DrawEntry>,
}
