use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::models::{AggregateResult, PrizeKey, PrizeRecord};
use crate::utils::normalize_zero;

/// Compute draw statistics in a single pass over `records`
///
/// - `total_money_won`: sum of every prize value (0 when empty)
/// - `location_counts`: number of records per area
/// - `lowest_holding_by_prize_value`: for each prize value, the record with the
///   smallest total holding. The existing entry is only replaced when its
///   holding is strictly greater, so on a tie the earliest record in input
///   order is kept.
pub fn aggregate(records: &[PrizeRecord]) -> AggregateResult {
    let mut total_money_won = 0.0;
    let mut location_counts: HashMap<String, usize> = HashMap::new();
    let mut lowest_holding_by_prize_value: BTreeMap<PrizeKey, PrizeRecord> = BTreeMap::new();

    for record in records {
        total_money_won += record.prize_value;

        *location_counts.entry(record.area.clone()).or_insert(0) += 1;

        match lowest_holding_by_prize_value.entry(PrizeKey::new(record.prize_value)) {
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
            Entry::Occupied(mut slot) => {
                if slot.get().total_value_of_holding > record.total_value_of_holding {
                    slot.insert(record.clone());
                }
            }
        }
    }

    AggregateResult {
        total_money_won: normalize_zero(total_money_won),
        location_counts,
        lowest_holding_by_prize_value,
    }
}
