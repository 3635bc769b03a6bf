//! Data models for the tote report.
//!
//! This module defines the records the report works on:
//! - `ProducerEntry`: one container as emitted by the report producer
//! - `ToteSummary`: the raw per-tote summary of a packing simulation run
//! - `ContainerRecord`: the parsed, immutable view of a container
//!
//! Numeric fields are parsed leniently. A value that cannot be read becomes
//! `None`, which the sorter treats as a not-a-number value.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors raised while loading a producer report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("could not read report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One container entry as emitted by the report producer.
///
/// `item_count` and `volume_utilization` are kept as raw JSON values since
/// the producer may emit numbers, numeric strings or nothing at all.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProducerEntry {
    pub id: String,
    #[serde(default, alias = "itemCount")]
    pub item_count: Option<Value>,
    #[serde(default, alias = "volumeUtilization", alias = "utilization_percent")]
    pub volume_utilization: Option<Value>,
    /// Comma separated SKU tokens.
    #[serde(default)]
    pub skus: Option<String>,
}

/// A case packed into a tote, as listed in a simulation summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackedItem {
    pub sku: String,
}

/// Per-tote summary of a packing simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToteSummary {
    pub id: Value,
    #[serde(default)]
    pub items: Vec<PackedItem>,
    #[serde(default)]
    pub utilization_percent: Option<Value>,
}

impl ToteSummary {
    /// Prefix given to numeric tote ids when converting a summary.
    pub const ID_PREFIX: &'static str = "Tote_";

    /// Converts the summary into the entry shape the report lists.
    ///
    /// SKUs are de-duplicated, keeping the order in which they were packed.
    pub fn into_entry(self) -> ProducerEntry {
        let id = match &self.id {
            Value::String(s) => s.clone(),
            other => format!("{}{}", Self::ID_PREFIX, other),
        };

        let mut skus: Vec<&str> = Vec::new();
        for item in &self.items {
            let sku = item.sku.trim();
            if !sku.is_empty() && !skus.contains(&sku) {
                skus.push(sku);
            }
        }

        ProducerEntry {
            id,
            item_count: Some(Value::from(self.items.len())),
            volume_utilization: self.utilization_percent,
            skus: Some(skus.join(",")),
        }
    }
}

/// A single container in the report.
///
/// Only `visible` changes after parsing; position is owned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerRecord {
    id: String,
    item_count: Option<u64>,
    volume_utilization: Option<f64>,
    skus: Vec<String>,
    pub(crate) visible: bool,
}

impl ContainerRecord {
    /// Creates a visible record from already parsed values.
    pub fn new(
        id: impl Into<String>,
        item_count: Option<u64>,
        volume_utilization: Option<f64>,
        skus: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            item_count,
            volume_utilization: volume_utilization.filter(|v| !v.is_nan()),
            skus,
            visible: true,
        }
    }

    /// Parses a producer entry. Never fails; unreadable numbers become `None`.
    pub fn from_entry(entry: &ProducerEntry) -> Self {
        Self::new(
            entry.id.clone(),
            entry.item_count.as_ref().and_then(parse_item_count),
            entry.volume_utilization.as_ref().and_then(parse_utilization),
            entry.skus.as_deref().map(parse_skus).unwrap_or_default(),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of packed items, `None` if the producer value was unreadable.
    pub fn item_count(&self) -> Option<u64> {
        self.item_count
    }

    /// Volume utilization in percent, `None` if the producer value was unreadable.
    pub fn volume_utilization(&self) -> Option<f64> {
        self.volume_utilization
    }

    pub fn skus(&self) -> &[String] {
        &self.skus
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Reads an item count from a JSON number or a numeric string.
///
/// Negative, fractional, out-of-range and non-numeric values are rejected.
pub fn parse_item_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && *f < u64::MAX as f64 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Reads a utilization percentage from a JSON number or a numeric string.
///
/// A single trailing `%` is accepted. NaN and infinities are rejected.
pub fn parse_utilization(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
            digits.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Splits a comma separated SKU list into trimmed, non-empty tokens.
pub fn parse_skus(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
