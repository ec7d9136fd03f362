//! Scales
//!
//! - [`LinearScale`]: continuous value axis with "nice" ticks (steps of 1, 2
//!   or 5 times a power of ten)
//! - [`TimeWindow`] / [`TimeScale`]: the x axis, UTC milliseconds mapped to
//!   pixels, with ticks on January 1st of every n-th year

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::dataset::year_start;

/// An axis tick: pixel position and label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Midnight UTC of a date, in milliseconds since the epoch
pub fn date_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::default()).and_utc().timestamp_millis()
}

/// Inverse of [`date_millis`], at millisecond precision
pub fn millis_datetime(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

fn lerp(range: (f64, f64), t: f64) -> f64 {
    range.0 + t * (range.1 - range.0)
}

/// Linear mapping from a value domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a value to a pixel; a zero-width domain maps to the range start
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d1 == d0 {
            return self.range.0;
        }
        lerp(self.range, (value - d0) / (d1 - d0))
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (r0, r1) = self.range;
        if r1 == r0 {
            return self.domain.0;
        }
        lerp(self.domain, (px - r0) / (r1 - r0))
    }

    /// Roughly `count` round values covering the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        nice_ticks(lo, hi, count)
    }

    /// Ticks with positions and labels
    pub fn axis_ticks(&self, count: usize) -> Vec<Tick> {
        let values = self.ticks(count);
        let step = match values.as_slice() {
            [a, b, ..] => b - a,
            _ => 1.0,
        };
        values
            .into_iter()
            .map(|v| Tick {
                position: self.apply(v),
                label: format_tick(v, step),
            })
            .collect()
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Integer tick indices and the increment; a negative increment means
/// "divide by", which keeps fractional ticks exact
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let div = 10f64.powf(-power) / factor;
        i1 = (start * div).round() as i64;
        i2 = (stop * div).round() as i64;
        if (i1 as f64) / div < start {
            i1 += 1;
        }
        if (i2 as f64) / div > stop {
            i2 -= 1;
        }
        inc = -div;
    } else {
        let mul = 10f64.powf(power) * factor;
        i1 = (start / mul).round() as i64;
        i2 = (stop / mul).round() as i64;
        if (i1 as f64) * mul < start {
            i1 += 1;
        }
        if (i2 as f64) * mul > stop {
            i2 -= 1;
        }
        inc = mul;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    (i1..=i2)
        .map(|i| {
            if inc < 0.0 {
                i as f64 / -inc
            } else {
                i as f64 * inc
            }
        })
        .collect()
}

/// Format a tick value with as many decimals as the step needs and
/// thousands separators
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(raw.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = grouped.chars().all(|c| matches!(c, '0' | '.' | ','));
    if value < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// A closed time interval in UTC milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Builds a window, swapping the ends if given in reverse
    pub fn new(start: i64, end: i64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// January 1st of `first` through December 31st of `last`
    pub fn full_years(first: i32, last: i32) -> Self {
        let end = NaiveDate::from_ymd_opt(last, 12, 31).unwrap_or_else(|| year_start(last));
        Self::new(date_millis(year_start(first)), date_millis(end))
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    pub fn contains(&self, millis: i64) -> bool {
        self.start <= millis && millis <= self.end
    }

    pub fn start_datetime(&self) -> Option<NaiveDateTime> {
        millis_datetime(self.start)
    }

    pub fn end_datetime(&self) -> Option<NaiveDateTime> {
        millis_datetime(self.end)
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.start_datetime(), self.end_datetime()) {
            (Some(start), Some(end)) => write!(
                f,
                "{} .. {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            _ => write!(f, "{} .. {}", self.start, self.end),
        }
    }
}

/// Time window mapped onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    window: TimeWindow,
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(window: TimeWindow, range: (f64, f64)) -> Self {
        Self { window, range }
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, millis: i64) -> f64 {
        let span = self.window.duration();
        if span == 0 {
            return self.range.0;
        }
        lerp(self.range, (millis - self.window.start) as f64 / span as f64)
    }

    pub fn apply_date(&self, date: NaiveDate) -> f64 {
        self.apply(date_millis(date))
    }

    /// Pixel back to a time, rounded to the millisecond
    pub fn invert(&self, px: f64) -> i64 {
        let (r0, r1) = self.range;
        if r1 == r0 {
            return self.window.start;
        }
        let t = (px - r0) / (r1 - r0);
        self.window.start + (t * self.window.duration() as f64).round() as i64
    }

    /// January 1st of every year divisible by `every` inside the window
    pub fn year_ticks(&self, every: i32) -> Vec<Tick> {
        let every = every.max(1);
        let (Some(start), Some(end)) = (self.window.start_datetime(), self.window.end_datetime())
        else {
            return Vec::new();
        };

        (start.year()..=end.year())
            .filter(|year| year.rem_euclid(every) == 0)
            .map(year_start)
            .filter(|date| self.window.contains(date_millis(*date)))
            .map(|date| self.year_tick(date))
            .collect()
    }

    /// A single tick on January 1st of the given date's year
    pub fn year_tick(&self, date: NaiveDate) -> Tick {
        let date = year_start(date.year());
        Tick {
            position: self.apply_date(date),
            label: date.format("%Y").to_string(),
        }
    }
}
