//! Query Executor
//!
//! Turns a [`Selection`] into the two aggregated series the chart draws:
//! look up the (category, filter key) bucket, fall back to the unfiltered
//! bucket if it is absent, apply the federation filter, then keep the best
//! record per year for each sex.

use serde::Serialize;

use super::aggregate::{best_per_year, max_best};
use super::selection::Selection;
use crate::dataset::{Dataset, Record, SeriesKey, Sex};

/// Aggregated male and female series for one selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesPair {
    /// Bucket the records came from; `None` if the category has no data
    pub key: Option<SeriesKey>,
    /// True if the requested filter key was absent and the unfiltered
    /// bucket was used instead
    pub fell_back: bool,
    pub male: Vec<Record>,
    pub female: Vec<Record>,
}

impl SeriesPair {
    pub fn get(&self, sex: Sex) -> &[Record] {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.male.is_empty() && self.female.is_empty()
    }

    /// Records that can be placed on the chart (those with a `best`)
    pub fn plotted(&self, sex: Sex) -> Vec<&Record> {
        self.get(sex).iter().filter(|r| r.best.is_some()).collect()
    }

    /// Largest visible value across both sexes
    pub fn max_best(&self) -> Option<f64> {
        max_best(&[self.male.as_slice(), self.female.as_slice()])
    }
}

/// Executes selections against a loaded dataset
pub struct QueryExecutor<'a> {
    dataset: &'a Dataset,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Run a selection
    ///
    /// The federation filter applies to the fallback bucket too, so a named
    /// federation never shows records of another federation.
    pub fn execute(&self, selection: &Selection) -> SeriesPair {
        let lookup = match self
            .dataset
            .lookup(selection.category, selection.filter_key())
        {
            Some(lookup) => lookup,
            None => {
                tracing::debug!(category = %selection.category, "No data for category");
                return SeriesPair::default();
            }
        };

        let federation = &selection.federation;
        let male = best_per_year(lookup.series.male.iter().filter(|r| federation.matches(r)));
        let female = best_per_year(lookup.series.female.iter().filter(|r| federation.matches(r)));

        tracing::debug!(
            key = %lookup.key,
            federation = %federation,
            fell_back = lookup.fell_back,
            male = male.len(),
            female = female.len(),
            "Query executed"
        );

        SeriesPair {
            key: Some(lookup.key),
            fell_back: lookup.fell_back,
            male,
            female,
        }
    }
}
