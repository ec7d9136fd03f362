//! Core data types for the powerlifting dataset
//!
//! This module defines the typed vocabulary of the dataset:
//! - `Record`: one lifter-year entry
//! - `Category`, `Equipment`, `Tested`: the enumerated filter dimensions
//! - `FilterKey` and `SeriesKey`: typed replacements for the string keys of
//!   the JSON document

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::error::{DatasetError, DatasetResult};

/// Sex of the lifter; also the grouping key inside a filter bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn all() -> &'static [Sex] {
        &[Sex::Male, Sex::Female]
    }

    /// Wire code as used in the document (`"M"` / `"F"`)
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// What is being charted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TotalsAll,
    TotalsOpen,
    TotalsTested,
    Dots,
    Squat,
    Bench,
    Deadlift,
}

impl Category {
    /// Get all categories for iteration, in selector order
    pub fn all() -> &'static [Category] {
        &[
            Category::TotalsAll,
            Category::TotalsOpen,
            Category::TotalsTested,
            Category::Dots,
            Category::Squat,
            Category::Bench,
            Category::Deadlift,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Category::TotalsAll => "totals_all",
            Category::TotalsOpen => "totals_open",
            Category::TotalsTested => "totals_tested",
            Category::Dots => "dots",
            Category::Squat => "squat",
            Category::Bench => "bench",
            Category::Deadlift => "deadlift",
        }
    }

    /// Human-readable label for selectors and axis titles
    pub fn label(&self) -> &'static str {
        match self {
            Category::TotalsAll => "Totals (All)",
            Category::TotalsOpen => "Totals (Open)",
            Category::TotalsTested => "Totals (Tested)",
            Category::Dots => "Dots",
            Category::Squat => "Squat",
            Category::Bench => "Bench",
            Category::Deadlift => "Deadlift",
        }
    }

    /// Y axis title. Dots is a unitless score, everything else is in kilograms.
    pub fn axis_label(&self) -> String {
        match self {
            Category::Dots => "Dots points".to_string(),
            other => format!("{} [kg]", other.label()),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::TotalsAll
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| DatasetError::UnknownKey(s.to_string()))
    }
}

/// Equipment class
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Equipment {
    All,
    Raw,
    Wraps,
    SinglePly,
    MultiPly,
    Unlimited,
}

impl Equipment {
    pub fn all() -> &'static [Equipment] {
        &[
            Equipment::All,
            Equipment::Raw,
            Equipment::Wraps,
            Equipment::SinglePly,
            Equipment::MultiPly,
            Equipment::Unlimited,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Equipment::All => "all",
            Equipment::Raw => "raw",
            Equipment::Wraps => "wraps",
            Equipment::SinglePly => "single-ply",
            Equipment::MultiPly => "multi-ply",
            Equipment::Unlimited => "unlimited",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Equipment::All => "All",
            Equipment::Raw => "Raw",
            Equipment::Wraps => "Wraps",
            Equipment::SinglePly => "Single-ply",
            Equipment::MultiPly => "Multi-ply",
            Equipment::Unlimited => "Unlimited",
        }
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Equipment::All
    }
}

impl std::fmt::Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Equipment {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Equipment::all()
            .iter()
            .copied()
            .find(|e| e.key() == s)
            .ok_or_else(|| DatasetError::UnknownKey(s.to_string()))
    }
}

/// Drug-tested status of the meet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tested {
    All,
    Yes,
    No,
}

impl Tested {
    pub fn all() -> &'static [Tested] {
        &[Tested::All, Tested::Yes, Tested::No]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Tested::All => "all",
            Tested::Yes => "yes",
            Tested::No => "no",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tested::All => "All",
            Tested::Yes => "Tested",
            Tested::No => "Untested",
        }
    }
}

impl Default for Tested {
    fn default() -> Self {
        Tested::All
    }
}

impl std::fmt::Display for Tested {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tested {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tested::all()
            .iter()
            .copied()
            .find(|t| t.key() == s)
            .ok_or_else(|| DatasetError::UnknownKey(s.to_string()))
    }
}

/// Equipment × tested composite
///
/// Wire form is `equipment_<equipment>_tested_<tested>`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilterKey {
    pub equipment: Equipment,
    pub tested: Tested,
}

impl FilterKey {
    /// The key every category is expected to carry
    pub const UNFILTERED: FilterKey = FilterKey {
        equipment: Equipment::All,
        tested: Tested::All,
    };

    pub fn new(equipment: Equipment, tested: Tested) -> Self {
        Self { equipment, tested }
    }

    pub fn is_unfiltered(&self) -> bool {
        *self == Self::UNFILTERED
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "equipment_{}_tested_{}", self.equipment, self.tested)
    }
}

impl FromStr for FilterKey {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || DatasetError::UnknownKey(s.to_string());
        let rest = s.strip_prefix("equipment_").ok_or_else(unknown)?;
        let (equipment, tested) = rest.split_once("_tested_").ok_or_else(unknown)?;
        Ok(Self {
            equipment: equipment.parse().map_err(|_| unknown())?,
            tested: tested.parse().map_err(|_| unknown())?,
        })
    }
}

/// Typed lookup key: one series pair per (category, equipment, tested)
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub category: Category,
    pub filter: FilterKey,
}

impl SeriesKey {
    pub fn new(category: Category, filter: FilterKey) -> Self {
        Self { category, filter }
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.filter)
    }
}

/// One lifter-year entry
///
/// Immutable once loaded. `best` may be absent for sparse years.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub year: i32,
    pub year_date: NaiveDate,
    pub sex: Sex,
    pub best: Option<f64>,
    pub bodyweight: Option<f64>,
    pub equipment: Option<String>,
    pub tested: Option<String>,
    pub division: Option<String>,
    pub country: Option<String>,
    pub federation: Option<String>,
    pub meet: Option<String>,
    pub name: Option<String>,
    pub category: String,
}

impl Record {
    /// Create a bare record; the builder methods fill in the rest
    pub fn new(year: i32, sex: Sex, best: Option<f64>) -> Self {
        Self {
            year,
            year_date: year_start(year),
            sex,
            best,
            bodyweight: None,
            equipment: None,
            tested: None,
            division: None,
            country: None,
            federation: None,
            meet: None,
            name: None,
            category: String::new(),
        }
    }

    /// Builder: set the lifter name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the federation
    pub fn federation(mut self, federation: impl Into<String>) -> Self {
        self.federation = Some(federation.into());
        self
    }

    /// Builder: set the category label carried by the record
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder: set the bodyweight
    pub fn bodyweight(mut self, bodyweight: f64) -> Self {
        self.bodyweight = Some(bodyweight);
        self
    }

    /// Check if this record belongs to the given federation
    pub fn is_federation(&self, federation: &str) -> bool {
        self.federation.as_deref() == Some(federation)
    }
}

/// January 1st of `year`, clamped into chrono's representable range
pub fn year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Read a `yearDate` value into a calendar date
///
/// Accepts RFC 3339 timestamps, naive ISO date-times and plain `YYYY-MM-DD`
/// dates. A missing or empty value means January 1st of `year`.
pub fn normalize_year_date(year: i32, raw: Option<&str>) -> DatasetResult<NaiveDate> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(year_start(year)),
        Some(v) => v,
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }

    let datetime_formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DatasetError::InvalidDate {
        year,
        value: value.to_string(),
    })
}

/// A record exactly as it appears in the document, before normalization
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRecord {
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub best: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bodyweight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub equipment: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tested: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub division: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub federation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub meet: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
}

impl RawRecord {
    /// Normalize into a `Record`. The sex comes from the bucket the record
    /// was found in, not from the record itself.
    pub fn into_record(self, sex: Sex) -> DatasetResult<Record> {
        let year = self.year.ok_or(DatasetError::MissingYear)?;
        let year_date = normalize_year_date(year, self.year_date.as_deref())?;
        Ok(self.into_record_at(sex, year, year_date))
    }

    /// Normalize with an already resolved year and date
    pub fn into_record_at(self, sex: Sex, year: i32, year_date: NaiveDate) -> Record {
        Record {
            year,
            year_date,
            sex,
            best: self.best,
            bodyweight: self.bodyweight,
            equipment: self.equipment,
            tested: self.tested,
            division: self.division,
            country: self.country,
            federation: self.federation,
            meet: self.meet,
            name: self.name,
            category: self.category.unwrap_or_default(),
        }
    }
}

/// Years may arrive as integers, whole floats (`2000.0`) or numeric strings
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().map(|v| v as f64).or_else(|| n.as_f64()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .filter(|v| *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
        .map(|v| v as i32))
}

/// Numbers may arrive as JSON numbers or numeric strings
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// Optional text fields; empty strings read as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(if b { "Yes" } else { "No" }.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_key_round_trip() {
        let key: FilterKey = "equipment_single-ply_tested_yes".parse().unwrap();
        assert_eq!(key, FilterKey::new(Equipment::SinglePly, Tested::Yes));
        assert_eq!(key.to_string(), "equipment_single-ply_tested_yes");

        assert_eq!(
            FilterKey::UNFILTERED.to_string(),
            "equipment_all_tested_all"
        );
        assert!(FilterKey::default().is_unfiltered());
    }

    #[test]
    fn test_filter_key_rejects_garbage() {
        assert!("equipment_raw".parse::<FilterKey>().is_err());
        assert!("raw_tested_yes".parse::<FilterKey>().is_err());
        assert!("equipment_steel_tested_yes".parse::<FilterKey>().is_err());
        assert!("equipment_raw_tested_maybe".parse::<FilterKey>().is_err());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!("totals_open".parse::<Category>().unwrap(), Category::TotalsOpen);
        assert_eq!(Category::Dots.axis_label(), "Dots points");
        assert_eq!(Category::Squat.axis_label(), "Squat [kg]");
        assert_eq!(Category::TotalsAll.axis_label(), "Totals (All) [kg]");
        assert!("powerclean".parse::<Category>().is_err());
    }

    #[test]
    fn test_normalize_year_date() {
        let expected = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();

        assert_eq!(normalize_year_date(2001, None).unwrap(), expected);
        assert_eq!(normalize_year_date(2001, Some("")).unwrap(), expected);
        assert_eq!(normalize_year_date(2001, Some("2001-01-01")).unwrap(), expected);
        assert_eq!(
            normalize_year_date(2001, Some("2001-01-01T00:00:00.000Z")).unwrap(),
            expected
        );
        assert_eq!(
            normalize_year_date(2001, Some("2001-01-01T00:00:00")).unwrap(),
            expected
        );
        assert!(matches!(
            normalize_year_date(2001, Some("first of jan")),
            Err(DatasetError::InvalidDate { year: 2001, .. })
        ));
    }

    #[test]
    fn test_raw_record_is_lenient() {
        let json = r#"{
            "year": 1998,
            "yearDate": "1998-01-01",
            "best": "250.5",
            "bodyweight": 82.5,
            "federation": "IPF",
            "tested": true,
            "country": "",
            "category": "squat"
        }"#;
        let raw: RawRecord = serde_json::from_str(json).unwrap();
        let record = raw.into_record(Sex::Female).unwrap();

        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.best, Some(250.5));
        assert_eq!(record.bodyweight, Some(82.5));
        assert_eq!(record.tested.as_deref(), Some("Yes"));
        assert_eq!(record.country, None);
        assert!(record.is_federation("IPF"));
        assert_eq!(record.category, "squat");
    }

    #[test]
    fn test_raw_record_missing_best() {
        let raw: RawRecord = serde_json::from_str(r#"{"year": 1975, "best": null}"#).unwrap();
        let record = raw.into_record(Sex::Male).unwrap();
        assert_eq!(record.best, None);
        assert_eq!(record.year_date, year_start(1975));
    }

    #[test]
    fn test_raw_record_lenient_year() {
        for json in [r#"{"year": 2000.0}"#, r#"{"year": "2000"}"#, r#"{"year": " 2000 "}"#] {
            let raw: RawRecord = serde_json::from_str(json).unwrap();
            let record = raw.into_record(Sex::Male).unwrap();
            assert_eq!(record.year, 2000);
            assert_eq!(record.year_date, year_start(2000));
        }
    }

    #[test]
    fn test_raw_record_unreadable_year() {
        for json in [r#"{"best": 200}"#, r#"{"year": null}"#, r#"{"year": 2000.5}"#, r#"{"year": "MMX"}"#] {
            let raw: RawRecord = serde_json::from_str(json).unwrap();
            assert_eq!(raw.year, None);
            assert!(matches!(
                raw.into_record(Sex::Male),
                Err(DatasetError::MissingYear)
            ));
        }
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = Record::new(2000, Sex::Male, Some(210.0)).name("A. Lifter");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["yearDate"], "2000-01-01");
        assert_eq!(json["sex"], "M");
        assert_eq!(json["best"], 210.0);
    }
}
