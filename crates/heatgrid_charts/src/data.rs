use std::io::Read;

use anyhow::Context;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

/// One heatmap record. `value: None` means "no data for this cell".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: String,
    pub y: String,
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn new(x: impl Into<String>, y: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            value,
        }
    }
}

pub type Dataset = Vec<DataPoint>;

/// Parse a JSON array of `{x, y, value}` records.
pub fn dataset_from_json(json: &str) -> anyhow::Result<Dataset> {
    serde_json::from_str(json).context("dataset must be a JSON array of {x, y, value} records")
}

pub fn dataset_from_reader<R: Read>(reader: R) -> anyhow::Result<Dataset> {
    serde_json::from_reader(reader)
        .context("dataset must be a JSON array of {x, y, value} records")
}

/// Maximum of all non-null values, or `0.0` when there are none.
///
/// NaN values are ignored the same way nulls are.
pub fn max_value(data: &[DataPoint]) -> f64 {
    data.iter()
        .filter_map(|d| d.value)
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}

/// Distinct axis labels in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct AxisCategories {
    labels: IndexSet<String, FxBuildHasher>,
}

impl AxisCategories {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = IndexSet::with_hasher(FxBuildHasher);
        for label in labels {
            let label = label.as_ref();
            if !set.contains(label) {
                set.insert(label.to_string());
            }
        }
        Self { labels: set }
    }

    pub fn x_of(data: &[DataPoint]) -> Self {
        Self::from_labels(data.iter().map(|d| d.x.as_str()))
    }

    pub fn y_of(data: &[DataPoint]) -> Self {
        Self::from_labels(data.iter().map(|d| d.y.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.labels.get_index(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }
}
