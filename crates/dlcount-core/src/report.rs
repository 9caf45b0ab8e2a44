//! Human-readable run report.

use std::fmt;

use chrono::NaiveDateTime;

use crate::ledger::DATE_FORMAT;

/// One device line: its cumulative count and the gain of this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLine {
    pub codename: String,
    pub count: u64,
    /// Positive delta of this run, `None` when the count did not grow.
    pub gained: Option<u64>,
}

/// Grand total line, present only when the total grew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalLine {
    pub total: u64,
    pub gained: u64,
}

/// Report assembled during a tally run and sent as the notification text.
///
/// ```text
/// Download stats as of 2024-03-09 18:05:07.123456 in last 24 hours:
///
/// raven: 25 (+15)
/// oriole: 10
///
/// Skipped devices:
/// cheetah (Gitea) - no releases
///
/// Total: 35 (+15)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    date: NaiveDateTime,
    devices: Vec<DeviceLine>,
    skipped: Vec<String>,
    total: Option<TotalLine>,
}

impl Report {
    /// Start an empty report for a run started at `date`.
    pub const fn new(date: NaiveDateTime) -> Self {
        Self {
            date,
            devices: Vec::new(),
            skipped: Vec::new(),
            total: None,
        }
    }

    pub(crate) fn push_device(&mut self, codename: &str, count: u64, gained: Option<u64>) {
        self.devices.push(DeviceLine {
            codename: codename.to_string(),
            count,
            gained,
        });
    }

    pub(crate) fn push_skipped(&mut self, entry: String) {
        self.skipped.push(entry);
    }

    pub(crate) fn set_total(&mut self, total: u64, gained: u64) {
        self.total = Some(TotalLine { total, gained });
    }

    pub fn devices(&self) -> &[DeviceLine] {
        &self.devices
    }

    /// Skip-list entries, in the order they were recorded.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub const fn total(&self) -> Option<TotalLine> {
        self.total
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Download stats as of {} in last 24 hours:",
            self.date.format(DATE_FORMAT)
        )?;

        for line in &self.devices {
            write!(f, "\n{}: {}", line.codename, line.count)?;
            if let Some(gained) = line.gained {
                write!(f, " (+{gained})")?;
            }
        }
        f.write_str("\n\n")?;

        if !self.skipped.is_empty() {
            f.write_str("Skipped devices:")?;
            for entry in &self.skipped {
                write!(f, "\n{entry}")?;
            }
            f.write_str("\n\n")?;
        }

        if let Some(total) = self.total {
            write!(f, "Total: {} (+{})", total.total, total.gained)?;
        }

        Ok(())
    }
}
