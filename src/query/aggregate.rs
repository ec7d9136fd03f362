//! Best-per-year aggregation
//!
//! Reduces per-lifter-year records to one record per year, the one holding
//! the largest `best`. This is what keeps at most one point per year on the
//! chart for any (category, filter key, sex).

use chrono::NaiveDate;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::dataset::{year_start, Record};

/// One point of the overview strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewPoint {
    pub year: i32,
    pub year_date: NaiveDate,
    pub best: f64,
}

/// Keep the record with the maximum `best` for every year
///
/// Output is sorted by year ascending. Equal values go to the record seen
/// last. A record without `best` only survives if no record of its year has
/// one.
pub fn best_per_year<'a, I>(records: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut by_year: BTreeMap<i32, &Record> = BTreeMap::new();

    for record in records {
        match by_year.entry(record.year) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if replaces(slot.get(), record) {
                    slot.insert(record);
                }
            }
        }
    }

    by_year.into_values().cloned().collect()
}

fn replaces(current: &Record, candidate: &Record) -> bool {
    match (current.best, candidate.best) {
        (Some(held), Some(new)) => new >= held,
        (None, Some(_)) => true,
        (_, None) => current.best.is_none(),
    }
}

/// Largest `best` over several record slices
pub fn max_best(series: &[&[Record]]) -> Option<f64> {
    series
        .iter()
        .flat_map(|records| records.iter())
        .filter_map(|r| r.best)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
}

/// Combine two aggregated series into the overview strip's points
///
/// One point per year present in either series, holding the larger of the
/// two values. Years where neither series has a value are dropped.
pub fn overview_points(male: &[Record], female: &[Record]) -> Vec<OverviewPoint> {
    let mut by_year: BTreeMap<i32, Option<f64>> = BTreeMap::new();

    for record in male.iter().chain(female.iter()) {
        let slot = by_year.entry(record.year).or_insert(None);
        if let Some(best) = record.best {
            *slot = Some(slot.map_or(best, |held| held.max(best)));
        }
    }

    by_year
        .into_iter()
        .filter_map(|(year, best)| {
            best.map(|best| OverviewPoint {
                year,
                year_date: year_start(year),
                best,
            })
        })
        .collect()
}
