//! The in-memory dataset
//!
//! The JSON document nests `category → filter key → sex → [record]` under
//! string keys. `Dataset` flattens that into a map keyed by `SeriesKey`, so a
//! lookup can only be expressed with keys that exist in the vocabulary.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::error::DatasetResult;
use super::types::{
    normalize_year_date, year_start, Category, Equipment, FilterKey, RawRecord, Record, SeriesKey,
    Sex, Tested,
};

/// Both sexes' records for one (category, filter key)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SexSeries {
    pub male: Vec<Record>,
    pub female: Vec<Record>,
}

impl SexSeries {
    pub fn new(male: Vec<Record>, female: Vec<Record>) -> Self {
        Self { male, female }
    }

    pub fn get(&self, sex: Sex) -> &[Record] {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    pub fn len(&self) -> usize {
        self.male.len() + self.female.len()
    }

    pub fn is_empty(&self) -> bool {
        self.male.is_empty() && self.female.is_empty()
    }

    /// Iterate over every record, males first
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.male.iter().chain(self.female.iter())
    }
}

/// Result of a lookup that may have fallen back to the unfiltered key
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    /// The key whose records were returned
    pub key: SeriesKey,
    pub series: &'a SexSeries,
    /// True if the requested filter key was absent
    pub fell_back: bool,
}

/// Which filter keys a category carries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCoverage {
    pub category: Category,
    pub present: Vec<FilterKey>,
    pub missing: Vec<FilterKey>,
    pub has_unfiltered: bool,
}

/// The loaded dataset. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    federations: Vec<String>,
    series: HashMap<SeriesKey, SexSeries>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    federations: Vec<String>,
    #[serde(default)]
    data: HashMap<String, HashMap<String, RawSexSeries>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSexSeries {
    #[serde(rename = "M", default)]
    male: Vec<RawRecord>,
    #[serde(rename = "F", default)]
    female: Vec<RawRecord>,
}

impl Dataset {
    /// Build a dataset directly from typed parts
    pub fn new(federations: Vec<String>, series: HashMap<SeriesKey, SexSeries>) -> Self {
        Self {
            federations,
            series,
        }
    }

    /// Parse and normalize a JSON document
    ///
    /// Unknown category or filter keys are skipped with a warning. A record
    /// whose `yearDate` cannot be read is placed at January 1st of its year.
    pub fn from_json_str(json: &str) -> DatasetResult<Self> {
        let document: RawDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(document))
    }

    /// Parse and normalize a JSON document from raw bytes
    pub fn from_slice(bytes: &[u8]) -> DatasetResult<Self> {
        let document: RawDocument = serde_json::from_slice(bytes)?;
        Ok(Self::from_document(document))
    }

    fn from_document(document: RawDocument) -> Self {
        let mut series = HashMap::new();
        let mut skipped = 0usize;

        for (category_key, buckets) in document.data {
            let category = match category_key.parse::<Category>() {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(key = %category_key, error = %e, "Skipping unknown category");
                    skipped += 1;
                    continue;
                }
            };

            for (filter_key, raw) in buckets {
                let filter = match filter_key.parse::<FilterKey>() {
                    Ok(f) => f,
                    Err(e) => {
                        tracing::warn!(
                            category = %category,
                            key = %filter_key,
                            error = %e,
                            "Skipping unknown filter key"
                        );
                        skipped += 1;
                        continue;
                    }
                };

                let entry = SexSeries::new(
                    normalize_bucket(raw.male, Sex::Male),
                    normalize_bucket(raw.female, Sex::Female),
                );
                series.insert(SeriesKey::new(category, filter), entry);
            }
        }

        let dataset = Self {
            federations: document.federations,
            series,
        };

        tracing::info!(
            series = dataset.series.len(),
            records = dataset.record_count(),
            federations = dataset.federations.len(),
            skipped,
            "Dataset loaded"
        );

        dataset
    }

    /// Federation names listed by the document
    pub fn federations(&self) -> &[String] {
        &self.federations
    }

    /// Exact lookup
    pub fn get(&self, key: &SeriesKey) -> Option<&SexSeries> {
        self.series.get(key)
    }

    /// Lookup with fallback to the category's unfiltered key
    pub fn lookup(&self, category: Category, filter: FilterKey) -> Option<Lookup<'_>> {
        let requested = SeriesKey::new(category, filter);
        if let Some(series) = self.series.get(&requested) {
            return Some(Lookup {
                key: requested,
                series,
                fell_back: false,
            });
        }

        let fallback = SeriesKey::new(category, FilterKey::UNFILTERED);
        let series = self.series.get(&fallback)?;
        tracing::warn!(
            requested = %requested,
            fallback = %fallback,
            "Filter combination absent, using unfiltered records"
        );
        Some(Lookup {
            key: fallback,
            series,
            fell_back: true,
        })
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<SeriesKey> {
        let mut keys: Vec<_> = self.series.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of records across every series
    pub fn record_count(&self) -> usize {
        self.series.values().map(SexSeries::len).sum()
    }

    /// Most frequent federations over every record of the dataset
    ///
    /// Counts span all categories, filter keys and sexes. Sorted by count,
    /// most frequent first; equal counts are ordered by name. Empty when the
    /// document lists no federations.
    pub fn top_federations(&self, limit: usize) -> Vec<(String, usize)> {
        if self.federations.is_empty() {
            return Vec::new();
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in self.series.values().flat_map(SexSeries::iter) {
            if let Some(federation) = record.federation.as_deref() {
                *counts.entry(federation).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        // stable sort keeps the BTreeMap name order within equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);

        tracing::debug!(top = ?ranked.iter().map(|(f, _)| f.as_str()).collect::<Vec<_>>(), "Top federations");
        ranked
    }

    /// Report which filter keys each category carries
    pub fn coverage(&self) -> Vec<CategoryCoverage> {
        Category::all()
            .iter()
            .map(|&category| {
                let mut present = Vec::new();
                let mut missing = Vec::new();
                for &equipment in Equipment::all() {
                    for &tested in Tested::all() {
                        let filter = FilterKey::new(equipment, tested);
                        if self.series.contains_key(&SeriesKey::new(category, filter)) {
                            present.push(filter);
                        } else {
                            missing.push(filter);
                        }
                    }
                }
                let has_unfiltered = present.contains(&FilterKey::UNFILTERED);
                CategoryCoverage {
                    category,
                    present,
                    missing,
                    has_unfiltered,
                }
            })
            .collect()
    }
}

fn normalize_bucket(raw: Vec<RawRecord>, sex: Sex) -> Vec<Record> {
    raw.into_iter()
        .filter_map(|r| {
            let Some(year) = r.year else {
                tracing::warn!(sex = sex.code(), name = ?r.name, "Skipping record without a readable year");
                return None;
            };
            let year_date = match normalize_year_date(year, r.year_date.as_deref()) {
                Ok(date) => date,
                Err(e) => {
                    tracing::warn!(year, error = %e, "Unreadable yearDate, using January 1st");
                    year_start(year)
                }
            };
            Some(r.into_record_at(sex, year, year_date))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::{Equipment, Tested};

    const SAMPLE: &str = r#"{
        "federations": ["IPF", "USAPL", "WRPF"],
        "data": {
            "squat": {
                "equipment_all_tested_all": {
                    "M": [
                        {"year": 2000, "yearDate": "2000-01-01T00:00:00.000Z", "sex": "M", "best": 400, "federation": "IPF", "category": "squat"},
                        {"year": 2001, "yearDate": "2001-01-01", "sex": "M", "best": 410, "federation": "USAPL", "category": "squat"}
                    ],
                    "F": [
                        {"year": 2000, "sex": "F", "best": 250, "federation": "IPF", "category": "squat"}
                    ]
                },
                "equipment_raw_tested_yes": {
                    "M": [
                        {"year": 2000, "sex": "M", "best": 350, "federation": "IPF", "category": "squat"}
                    ]
                },
                "equipment_steel_tested_yes": {"M": [], "F": []}
            },
            "clean_and_jerk": {
                "equipment_all_tested_all": {"M": [], "F": []}
            }
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();

        assert_eq!(dataset.federations(), &["IPF", "USAPL", "WRPF"]);
        // unknown category and unknown equipment bucket are skipped
        assert_eq!(dataset.keys().len(), 2);
        assert_eq!(dataset.record_count(), 4);

        let key = SeriesKey::new(Category::Squat, FilterKey::UNFILTERED);
        let series = dataset.get(&key).unwrap();
        assert_eq!(series.male.len(), 2);
        assert_eq!(series.female.len(), 1);
        assert_eq!(series.female[0].sex, Sex::Female);
        assert_eq!(series.male[0].year_date, year_start(2000));
    }

    #[test]
    fn test_lookup_exact_and_fallback() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();

        let exact = dataset
            .lookup(Category::Squat, FilterKey::new(Equipment::Raw, Tested::Yes))
            .unwrap();
        assert!(!exact.fell_back);
        assert_eq!(exact.series.male.len(), 1);

        let fallback = dataset
            .lookup(Category::Squat, FilterKey::new(Equipment::Wraps, Tested::No))
            .unwrap();
        assert!(fallback.fell_back);
        assert_eq!(fallback.key.filter, FilterKey::UNFILTERED);
        assert_eq!(fallback.series.len(), 3);

        assert!(dataset.lookup(Category::Bench, FilterKey::UNFILTERED).is_none());
    }

    #[test]
    fn test_top_federations() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        let top = dataset.top_federations(20);

        assert_eq!(
            top,
            vec![("IPF".to_string(), 3), ("USAPL".to_string(), 1)]
        );
        assert_eq!(dataset.top_federations(1).len(), 1);
    }

    #[test]
    fn test_top_federations_requires_listing() {
        let json = r#"{"federations": [], "data": {"bench": {"equipment_all_tested_all": {
            "M": [{"year": 1990, "best": 200, "federation": "IPF"}]
        }}}}"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert!(dataset.top_federations(20).is_empty());
    }

    #[test]
    fn test_coverage() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        let coverage = dataset.coverage();

        let squat = coverage.iter().find(|c| c.category == Category::Squat).unwrap();
        assert!(squat.has_unfiltered);
        assert_eq!(squat.present.len(), 2);
        assert_eq!(squat.missing.len(), Equipment::all().len() * Tested::all().len() - 2);

        let bench = coverage.iter().find(|c| c.category == Category::Bench).unwrap();
        assert!(!bench.has_unfiltered);
        assert!(bench.present.is_empty());
    }

    #[test]
    fn test_bad_date_is_tolerated() {
        let json = r#"{"federations": [], "data": {"dots": {"equipment_all_tested_all": {
            "F": [{"year": 1985, "yearDate": "sometime", "best": 300}]
        }}}}"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        let series = dataset
            .get(&SeriesKey::new(Category::Dots, FilterKey::UNFILTERED))
            .unwrap();
        assert_eq!(series.female[0].year_date, year_start(1985));
    }

    #[test]
    fn test_lenient_and_missing_years() {
        let json = r#"{"federations": [], "data": {
            "squat": {"equipment_all_tested_all": {
                "M": [{"year": 2000.0, "best": 200}, {"year": "2001", "best": 210}]
            }},
            "bench": {"equipment_all_tested_all": {
                "F": [{"best": 120}, {"year": 1999, "best": 130}]
            }}
        }}"#;
        let dataset = Dataset::from_json_str(json).unwrap();

        let squat = dataset
            .get(&SeriesKey::new(Category::Squat, FilterKey::UNFILTERED))
            .unwrap();
        let years: Vec<i32> = squat.male.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2001]);

        let bench = dataset
            .get(&SeriesKey::new(Category::Bench, FilterKey::UNFILTERED))
            .unwrap();
        assert_eq!(bench.female.len(), 1);
        assert_eq!(bench.female[0].year, 1999);
        assert_eq!(bench.female[0].best, Some(130.0));
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Dataset::from_json_str("{\"data\": 5}").is_err());
        assert!(Dataset::from_slice(b"not json").is_err());
    }
}
