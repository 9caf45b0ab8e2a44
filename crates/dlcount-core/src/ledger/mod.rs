//! Download ledgers.
//!
//! Two ledgers are kept between runs:
//!
//! - the **snapshot** ledger mirrors the latest absolute counters reported
//!   by the release hosts and is overwritten on every run;
//! - the **cumulative** ledger holds running totals that only ever grow.
//!
//! In memory a ledger is a map of per-device entries plus a summary record.
//! On disk it keeps the flat layout used by existing deployments: one key per
//! device count, a `<codename>_diff` key per device delta, and the reserved
//! `_date`, `_total` and `_total_diff` keys.

mod error;
mod file_store;

pub use error::LedgerError;
pub use file_store::JsonLedgerStore;

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format used for the `_date` key.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const PARSE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_KEY: &str = "_date";
const TOTAL_KEY: &str = "_total";
const TOTAL_DIFF_KEY: &str = "_total_diff";
const DIFF_SUFFIX: &str = "_diff";

/// Which of the two ledgers a document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKind {
    /// Latest absolute counters (`available_downloads.json`).
    Snapshot,
    /// Monotonic running totals (`downloads.json`).
    Cumulative,
}

impl LedgerKind {
    /// File name of this ledger inside the data directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Snapshot => "available_downloads.json",
            Self::Cumulative => "downloads.json",
        }
    }
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot => write!(f, "snapshot"),
            Self::Cumulative => write!(f, "cumulative"),
        }
    }
}

/// Per-device ledger entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceEntry {
    /// Absolute count (snapshot) or running total (cumulative).
    pub count: u64,
    /// Last delta recorded for the device.
    pub diff: i64,
}

/// Run-wide summary stored alongside the device entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Time of the run that last wrote the summary.
    pub date: Option<NaiveDateTime>,
    /// Grand total.
    pub total: u64,
    /// Change of the grand total applied by that run.
    pub total_diff: i64,
}

/// A download ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FlatLedger", into = "FlatLedger")]
pub struct Ledger {
    devices: BTreeMap<String, DeviceEntry>,
    summary: LedgerSummary,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for a device, if it has been recorded.
    pub fn get(&self, codename: &str) -> Option<&DeviceEntry> {
        self.devices.get(codename)
    }

    /// Count for a device, `0` for devices never seen.
    pub fn count(&self, codename: &str) -> u64 {
        self.get(codename).map_or(0, |entry| entry.count)
    }

    /// Mutable entry for a device, inserting a zero baseline if absent.
    pub fn entry_mut(&mut self, codename: &str) -> &mut DeviceEntry {
        self.devices.entry(codename.to_string()).or_default()
    }

    /// Insert or replace a device entry.
    pub fn insert(&mut self, codename: impl Into<String>, entry: DeviceEntry) {
        self.devices.insert(codename.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub const fn summary(&self) -> &LedgerSummary {
        &self.summary
    }

    pub fn summary_mut(&mut self) -> &mut LedgerSummary {
        &mut self.summary
    }

    /// Render the ledger as its on-disk document.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// On-disk representation: a single sorted object with mixed key semantics.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct FlatLedger(BTreeMap<String, Value>);

impl From<Ledger> for FlatLedger {
    fn from(ledger: Ledger) -> Self {
        let mut map = BTreeMap::new();

        for (codename, entry) in ledger.devices {
            map.insert(format!("{codename}{DIFF_SUFFIX}"), Value::from(entry.diff));
            map.insert(codename, Value::from(entry.count));
        }

        let summary = ledger.summary;
        if let Some(date) = summary.date {
            map.insert(
                DATE_KEY.to_string(),
                Value::from(date.format(DATE_FORMAT).to_string()),
            );
        }
        map.insert(TOTAL_KEY.to_string(), Value::from(summary.total));
        map.insert(TOTAL_DIFF_KEY.to_string(), Value::from(summary.total_diff));

        Self(map)
    }
}

impl TryFrom<FlatLedger> for Ledger {
    type Error = LedgerError;

    fn try_from(flat: FlatLedger) -> Result<Self, Self::Error> {
        let mut ledger = Self::new();

        for (key, value) in flat.0 {
            match key.as_str() {
                DATE_KEY => ledger.summary.date = Some(parse_date(&key, &value)?),
                TOTAL_KEY => ledger.summary.total = parse_count(&key, &value)?,
                TOTAL_DIFF_KEY => ledger.summary.total_diff = parse_diff(&key, &value)?,
                _ if key.starts_with('_') => {
                    return Err(LedgerError::invalid(&key, "unknown reserved key"));
                }
                _ => match key.strip_suffix(DIFF_SUFFIX) {
                    Some(codename) if !codename.is_empty() => {
                        ledger.entry_mut(codename).diff = parse_diff(&key, &value)?;
                    }
                    _ => ledger.entry_mut(&key).count = parse_count(&key, &value)?,
                },
            }
        }

        Ok(ledger)
    }
}

fn parse_count(key: &str, value: &Value) -> Result<u64, LedgerError> {
    value.as_u64().ok_or_else(|| {
        LedgerError::invalid(key, format!("expected a non-negative integer, got {value}"))
    })
}

fn parse_diff(key: &str, value: &Value) -> Result<i64, LedgerError> {
    value
        .as_i64()
        .ok_or_else(|| LedgerError::invalid(key, format!("expected an integer, got {value}")))
}

fn parse_date(key: &str, value: &Value) -> Result<NaiveDateTime, LedgerError> {
    let raw = value.as_str().ok_or_else(|| {
        LedgerError::invalid(key, format!("expected a date string, got {value}"))
    })?;
    NaiveDateTime::parse_from_str(raw, PARSE_DATE_FORMAT)
        .map_err(|e| LedgerError::invalid(key, format!("unparseable date '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(18, 5, 7, 123_456)
            .unwrap()
    }

    #[test]
    fn test_decode_flat_document() {
        let json = r#"{
            "_date": "2024-03-09 18:05:07.123456",
            "_total": 40,
            "_total_diff": -2,
            "raven": 30,
            "raven_diff": 3,
            "oriole": 10,
            "oriole_diff": -5
        }"#;

        let ledger: Ledger = serde_json::from_str(json).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("raven"), Some(&DeviceEntry { count: 30, diff: 3 }));
        assert_eq!(ledger.get("oriole"), Some(&DeviceEntry { count: 10, diff: -5 }));
        assert_eq!(ledger.summary().total, 40);
        assert_eq!(ledger.summary().total_diff, -2);
        assert_eq!(ledger.summary().date, Some(sample_date()));
    }

    #[test]
    fn test_decode_minimal_cumulative_document() {
        let ledger: Ledger = serde_json::from_str(r#"{"device1": 10, "_total": 10}"#).unwrap();
        assert_eq!(ledger.count("device1"), 10);
        assert_eq!(ledger.get("device1").unwrap().diff, 0);
        assert_eq!(ledger.summary().total, 10);
        assert!(ledger.summary().date.is_none());
    }

    #[test]
    fn test_decode_date_without_fraction() {
        let ledger: Ledger = serde_json::from_str(r#"{"_date": "2024-03-09 18:05:07"}"#).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(18, 5, 7)
            .unwrap();
        assert_eq!(ledger.summary().date, Some(expected));
    }

    #[test]
    fn test_decode_rejects_negative_count() {
        let result: Result<Ledger, _> = serde_json::from_str(r#"{"raven": -1}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("raven"));
    }

    #[test]
    fn test_decode_rejects_unknown_reserved_key() {
        let result: Result<Ledger, _> = serde_json::from_str(r#"{"_version": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_sorted_with_two_space_indent() {
        let mut ledger = Ledger::new();
        ledger.insert("raven", DeviceEntry { count: 15, diff: 15 });
        ledger.insert("bluejay", DeviceEntry { count: 4, diff: -1 });
        *ledger.summary_mut() = LedgerSummary {
            date: Some(sample_date()),
            total: 19,
            total_diff: 14,
        };

        let json = ledger.to_json_pretty().unwrap();
        let expected = r#"{
  "_date": "2024-03-09 18:05:07.123456",
  "_total": 19,
  "_total_diff": 14,
  "bluejay": 4,
  "bluejay_diff": -1,
  "raven": 15,
  "raven_diff": 15
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_encode_then_decode_preserves_ledger() {
        let mut ledger = Ledger::new();
        ledger.entry_mut("cheetah").count = 120;
        ledger.summary_mut().total = 120;
        ledger.summary_mut().date = Some(sample_date());

        let decoded: Ledger = serde_json::from_str(&ledger.to_json_pretty().unwrap()).unwrap();
        assert_eq!(decoded, ledger);
    }

    #[test]
    fn test_ledger_kind_file_names() {
        assert_eq!(LedgerKind::Snapshot.file_name(), "available_downloads.json");
        assert_eq!(LedgerKind::Cumulative.file_name(), "downloads.json");
    }
}
