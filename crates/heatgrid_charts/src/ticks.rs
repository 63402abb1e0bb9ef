//! Month-boundary ticks for date-like x axes.
//!
//! A category gets a tick when it is the first one, or when its calendar
//! month or year differs from the previous category's.

use chrono::{DateTime, Datelike, NaiveDate};
use thiserror::Error;

use crate::data::AxisCategories;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AxisError {
    #[error("x category {label:?} at index {index} is not a calendar date")]
    UnparseableDate { index: usize, label: String },
}

/// Parse a category as a calendar date (`YYYY-MM-DD` or RFC 3339).
pub fn parse_category_date(label: &str) -> Option<NaiveDate> {
    let s = label.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Ordered x categories together with their parsed dates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatedAxis {
    labels: Vec<String>,
    dates: Vec<NaiveDate>,
}

impl DatedAxis {
    pub fn parse(categories: &AxisCategories) -> Result<Self, AxisError> {
        Self::from_labels(categories.iter())
    }

    pub fn from_labels<I, S>(labels: I) -> Result<Self, AxisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self::default();
        for (index, label) in labels.into_iter().enumerate() {
            let label = label.as_ref();
            let date = parse_category_date(label).ok_or_else(|| AxisError::UnparseableDate {
                index,
                label: label.to_string(),
            })?;
            out.labels.push(label.to_string());
            out.dates.push(date);
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Lazy tick sequence. Call again (or clone it) to restart.
    pub fn ticks(&self) -> MonthTicks<'_> {
        MonthTicks {
            axis: self,
            next: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthTick<'a> {
    /// Position of the category in the axis.
    pub index: usize,
    pub label: &'a str,
    pub date: NaiveDate,
}

impl MonthTick<'_> {
    /// Human readable "Mon YYYY" text, e.g. `Feb 2024`.
    pub fn display(&self) -> String {
        self.date.format("%b %Y").to_string()
    }
}

#[derive(Clone, Debug)]
pub struct MonthTicks<'a> {
    axis: &'a DatedAxis,
    next: usize,
}

impl<'a> Iterator for MonthTicks<'a> {
    type Item = MonthTick<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let dates = &self.axis.dates;
        while self.next < dates.len() {
            let i = self.next;
            self.next += 1;

            let date = dates[i];
            let is_tick = match i.checked_sub(1).map(|p| dates[p]) {
                None => true,
                Some(prev) => date.month() != prev.month() || date.year() != prev.year(),
            };
            if is_tick {
                return Some(MonthTick {
                    index: i,
                    label: &self.axis.labels[i],
                    date,
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.axis.dates.len().saturating_sub(self.next)))
    }
}
