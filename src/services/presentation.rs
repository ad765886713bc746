use std::collections::HashMap;
use tracing::warn;

use crate::currency::CurrencyFormat;
use crate::importers::LoadedDataset;
use crate::models::{AggregateResult, DrawSummary, LocationCount, LowestHolding, RecordView};

/// Default number of locations shown for a draw
pub const DEFAULT_TOP_LOCATIONS: usize = 3;

/// Rank locations by number of winners, most first, keeping at most `n`
///
/// Equal counts are ordered by area name so the ranking is deterministic.
pub fn top_locations(location_counts: &HashMap<String, usize>, n: usize) -> Vec<LocationCount> {
    let mut ranked: Vec<LocationCount> = location_counts
        .iter()
        .map(|(area, count)| LocationCount {
            area: area.clone(),
            count: *count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.area.cmp(&b.area)));
    ranked.truncate(n);
    ranked
}

/// Shape a loaded and aggregated draw into the response handed to callers
///
/// Every record amount is finite, but their sum can still overflow. The
/// total is passed through unchanged in that case: it serializes as JSON
/// `null` and displays as the symbol followed by `inf`.
pub fn summarize(
    dataset_name: &str,
    dataset: &LoadedDataset,
    aggregate: &AggregateResult,
    top_n: usize,
    currency: &CurrencyFormat,
) -> DrawSummary {
    if !aggregate.total_money_won.is_finite() {
        warn!(
            "Total money won for {} overflowed to {}",
            dataset_name, aggregate.total_money_won
        );
    }

    let lowest_holdings = aggregate
        .lowest_holding_by_prize_value
        .iter()
        .rev()
        .map(|(prize_value, record)| LowestHolding {
            prize_value: prize_value.value(),
            prize_value_display: currency.format(prize_value.value()),
            total_value_of_holding_display: currency.format(record.total_value_of_holding),
            record: record.clone(),
        })
        .collect();

    let records = dataset
        .records
        .iter()
        .map(|record| RecordView {
            id: record.id,
            prize_value: record.prize_value,
            prize_value_display: currency.format(record.prize_value),
            bond_number: record.bond_number.clone(),
            total_value_of_holding: record.total_value_of_holding,
            total_value_of_holding_display: currency.format(record.total_value_of_holding),
            area: record.area.clone(),
            value_of_bond: record.value_of_bond,
            value_of_bond_display: currency.format(record.value_of_bond),
            date_of_purchase: record.date_of_purchase,
        })
        .collect();

    DrawSummary {
        dataset: dataset_name.to_string(),
        record_count: dataset.records.len(),
        rejected_row_count: dataset.rejected.len(),
        total_money_won: aggregate.total_money_won,
        total_money_won_display: currency.format(aggregate.total_money_won),
        top_locations: top_locations(&aggregate.location_counts, top_n),
        lowest_holdings,
        records,
    }
}
