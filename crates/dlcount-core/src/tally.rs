//! Download accounting engine.
//!
//! A [`Tally`] consumes one device at a time together with the release
//! listings of both hosts, reconciles the counts against the snapshot
//! ledger, and on [`Tally::finish`] folds the run into the cumulative
//! ledger.
//!
//! Cumulative counts never decrease. When a device's absolute count drops
//! (a release was deleted, a host lost data), the snapshot ledger takes the
//! lower value while the cumulative entry stays put; the size of the drop is
//! added to the grand total on finish, but only if the run as a whole grew.

use chrono::NaiveDateTime;

use crate::domain::{AssetFilter, Device, Release};
use crate::ledger::{DeviceEntry, Ledger, LedgerSummary};
use crate::ports::{FetchError, FetchResult};
use crate::report::Report;

/// Result of fetching one device's releases from one host.
#[derive(Debug)]
pub struct HostListing {
    /// Host display name.
    pub host: String,
    pub result: FetchResult<Vec<Release>>,
}

impl HostListing {
    pub fn new(host: impl Into<String>, result: FetchResult<Vec<Release>>) -> Self {
        Self {
            host: host.into(),
            result,
        }
    }

    /// A successful listing.
    pub fn releases(host: impl Into<String>, releases: Vec<Release>) -> Self {
        Self::new(host, Ok(releases))
    }

    /// A failed listing.
    pub fn failed(host: impl Into<String>, error: FetchError) -> Self {
        Self::new(host, Err(error))
    }
}

/// What happened to a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceOutcome {
    /// Both hosts failed; ledgers untouched.
    Skipped,
    /// Counted and reconciled.
    Counted {
        /// Absolute downloads across both hosts.
        downloads: u64,
        /// Change against the snapshot ledger.
        diff: i64,
    },
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct TallyOutcome {
    /// Snapshot ledger, always to be persisted.
    pub snapshot: Ledger,
    /// Cumulative ledger, to be persisted only if `cumulative_changed`.
    pub cumulative: Ledger,
    pub cumulative_changed: bool,
    /// Sum of current absolute counts minus sum of previous ones.
    pub total_diff: i64,
    /// Sum of all per-device drops seen this run.
    pub negatives: u64,
    pub report: Report,
}

impl TallyOutcome {
    /// Whether the run grew the grand total and warrants a notification.
    pub const fn has_growth(&self) -> bool {
        self.total_diff > 0
    }
}

/// In-flight accounting state for one run.
#[derive(Debug)]
pub struct Tally {
    filter: AssetFilter,
    snapshot: Ledger,
    cumulative: Ledger,
    report: Report,
    started_at: NaiveDateTime,
    total_downloads: u64,
    total_previous: u64,
    negatives: u64,
}

impl Tally {
    /// Start a run from the ledgers of the previous run.
    pub fn new(
        snapshot: Ledger,
        cumulative: Ledger,
        filter: AssetFilter,
        started_at: NaiveDateTime,
    ) -> Self {
        Self {
            filter,
            snapshot,
            cumulative,
            report: Report::new(started_at),
            started_at,
            total_downloads: 0,
            total_previous: 0,
            negatives: 0,
        }
    }

    /// Count and reconcile one device.
    pub fn record_device(
        &mut self,
        device: &Device,
        primary: &HostListing,
        secondary: &HostListing,
    ) -> DeviceOutcome {
        let codename = device.codename.as_str();

        if let (Err(primary_err), Err(secondary_err)) = (&primary.result, &secondary.result) {
            tracing::warn!(
                device = %device.label(),
                "Failed to get data: {} responded {primary_err}, {} responded {secondary_err}",
                primary.host,
                secondary.host
            );
            self.report.push_skipped(format!(
                "{codename} - no data from both {} and {}",
                primary.host, secondary.host
            ));
            return DeviceOutcome::Skipped;
        }

        let downloads = self
            .count_host(codename, primary)
            .saturating_add(self.count_host(codename, secondary));
        tracing::info!("{downloads} downloads in total for {codename}");

        let diff = self.reconcile(codename, downloads);
        DeviceOutcome::Counted { downloads, diff }
    }

    fn count_host(&mut self, codename: &str, listing: &HostListing) -> u64 {
        match &listing.result {
            Err(err) => {
                tracing::warn!(host = %listing.host, %codename, "Failed to get data: {err}");
                self.report
                    .push_skipped(format!("{codename} ({}) - no data", listing.host));
                0
            }
            Ok(releases) if releases.is_empty() => {
                tracing::info!(host = %listing.host, %codename, "No releases");
                self.report
                    .push_skipped(format!("{codename} ({}) - no releases", listing.host));
                0
            }
            Ok(releases) => {
                tracing::info!(host = %listing.host, %codename, "Counting downloads");
                self.filter.count(releases)
            }
        }
    }

    fn reconcile(&mut self, codename: &str, downloads: u64) -> i64 {
        let previous = self.snapshot.count(codename);
        let diff = signed_diff(downloads, previous);

        self.snapshot.insert(
            codename,
            DeviceEntry {
                count: downloads,
                diff,
            },
        );

        self.total_downloads = self.total_downloads.saturating_add(downloads);
        self.total_previous = self.total_previous.saturating_add(previous);

        if diff < 0 {
            self.negatives = self.negatives.saturating_add(diff.unsigned_abs());
        }

        let gained = u64::try_from(diff).ok().filter(|gained| *gained > 0);
        let entry = self.cumulative.entry_mut(codename);
        if let Some(gained) = gained {
            entry.count = entry.count.saturating_add(gained);
            entry.diff = diff;
        }
        let count = entry.count;

        self.report.push_device(codename, count, gained);
        diff
    }

    /// Close the run: update both summaries and produce the report.
    pub fn finish(mut self) -> TallyOutcome {
        let total_diff = signed_diff(self.total_downloads, self.total_previous);

        let cumulative_changed = total_diff > 0;
        if cumulative_changed {
            let adjustment = total_diff.unsigned_abs().saturating_add(self.negatives);
            let summary = self.cumulative.summary_mut();
            summary.total = summary.total.saturating_add(adjustment);
            summary.total_diff = i64::try_from(adjustment).unwrap_or(i64::MAX);
            summary.date = Some(self.started_at);
            let total = summary.total;

            self.report.set_total(total, adjustment);
            tracing::info!(total, adjustment, negatives = self.negatives, "Grand total grew");
        } else {
            tracing::info!(total_diff, "No growth this run, cumulative ledger unchanged");
        }

        *self.snapshot.summary_mut() = LedgerSummary {
            date: Some(self.started_at),
            total: self.total_downloads,
            total_diff,
        };

        TallyOutcome {
            snapshot: self.snapshot,
            cumulative: self.cumulative,
            cumulative_changed,
            total_diff,
            negatives: self.negatives,
            report: self.report,
        }
    }
}

fn signed_diff(current: u64, previous: u64) -> i64 {
    let diff = i128::from(current) - i128::from(previous);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Asset;
    use chrono::NaiveDate;

    const GITHUB: &str = "GitHub";
    const GITEA: &str = "Gitea";

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap()
    }

    fn zip(codename: &str, count: u64) -> Vec<Release> {
        vec![Release::new(vec![Asset::new(
            format!("PixelBuilds_{codename}.zip"),
            count,
        )])]
    }

    fn not_found() -> FetchError {
        FetchError::Status { status: 404 }
    }

    fn tally(snapshot: Ledger, cumulative: Ledger) -> Tally {
        Tally::new(snapshot, cumulative, AssetFilter::default(), date(9))
    }

    fn ledger(entries: &[(&str, u64)], total: u64) -> Ledger {
        let mut ledger = Ledger::new();
        for (codename, count) in entries {
            ledger.entry_mut(codename).count = *count;
        }
        ledger.summary_mut().total = total;
        ledger
    }

    #[test]
    fn test_first_positive_delta_on_existing_cumulative() {
        let mut run = tally(Ledger::new(), ledger(&[("device1", 10)], 10));
        let device = Device::new("device1", "Google");

        let outcome = run.record_device(
            &device,
            &HostListing::releases(GITHUB, zip("device1", 15)),
            &HostListing::releases(GITEA, Vec::new()),
        );
        assert_eq!(outcome, DeviceOutcome::Counted { downloads: 15, diff: 15 });

        let result = run.finish();

        assert_eq!(result.snapshot.get("device1"), Some(&DeviceEntry { count: 15, diff: 15 }));
        assert_eq!(result.cumulative.get("device1"), Some(&DeviceEntry { count: 25, diff: 15 }));
        assert_eq!(result.cumulative.summary().total, 25);
        assert_eq!(result.cumulative.summary().total_diff, 15);
        assert_eq!(result.cumulative.summary().date, Some(date(9)));
        assert!(result.cumulative_changed);
        assert!(result.has_growth());

        let text = result.report.to_string();
        assert!(text.contains("device1: 25 (+15)"));
        assert!(text.contains("device1 (Gitea) - no releases"));
        assert!(text.contains("Total: 25 (+15)"));
    }

    #[test]
    fn test_new_device_starts_from_zero_baseline() {
        let mut run = tally(Ledger::new(), Ledger::new());
        run.record_device(
            &Device::new("oriole", "Google"),
            &HostListing::releases(GITHUB, zip("oriole", 4)),
            &HostListing::releases(GITEA, zip("oriole", 3)),
        );

        let result = run.finish();
        assert_eq!(result.cumulative.count("oriole"), 7);
        assert_eq!(result.cumulative.summary().total, 7);
        assert_eq!(result.snapshot.summary().total, 7);
        assert_eq!(result.snapshot.summary().total_diff, 7);
    }

    #[test]
    fn test_both_hosts_failing_skips_device() {
        let snapshot = ledger(&[("raven", 30)], 30);
        let cumulative = ledger(&[("raven", 50)], 50);
        let mut run = tally(snapshot, cumulative);

        let outcome = run.record_device(
            &Device::new("raven", "Google"),
            &HostListing::failed(GITHUB, not_found()),
            &HostListing::failed(GITEA, FetchError::Network {
                message: "timed out".to_string(),
            }),
        );
        assert_eq!(outcome, DeviceOutcome::Skipped);

        let result = run.finish();
        assert_eq!(result.snapshot.get("raven"), Some(&DeviceEntry { count: 30, diff: 0 }));
        assert_eq!(result.cumulative.get("raven"), Some(&DeviceEntry { count: 50, diff: 0 }));
        assert_eq!(
            result.report.skipped(),
            ["raven - no data from both GitHub and Gitea".to_string()]
        );
        assert!(result.report.devices().is_empty());
        assert!(!result.cumulative_changed);
    }

    #[test]
    fn test_both_hosts_failing_does_not_create_entries_for_new_device() {
        let mut run = tally(Ledger::new(), Ledger::new());
        run.record_device(
            &Device::new("lynx", "Google"),
            &HostListing::failed(GITHUB, not_found()),
            &HostListing::failed(GITEA, not_found()),
        );

        let result = run.finish();
        assert!(result.snapshot.get("lynx").is_none());
        assert!(result.cumulative.get("lynx").is_none());
    }

    #[test]
    fn test_single_host_failure_counts_other_host() {
        let mut run = tally(Ledger::new(), Ledger::new());
        run.record_device(
            &Device::new("cheetah", "Google"),
            &HostListing::releases(GITHUB, zip("cheetah", 9)),
            &HostListing::failed(GITEA, FetchError::Status { status: 500 }),
        );

        let result = run.finish();
        assert_eq!(result.snapshot.count("cheetah"), 9);
        assert_eq!(result.report.skipped(), ["cheetah (Gitea) - no data".to_string()]);
    }

    #[test]
    fn test_drop_keeps_cumulative_and_compensates_total() {
        // raven lost 5, oriole gained 8: net +3, adjustment 3 + 5 = 8
        let snapshot = ledger(&[("raven", 20), ("oriole", 10)], 30);
        let cumulative = ledger(&[("raven", 40), ("oriole", 15)], 55);
        let mut run = tally(snapshot, cumulative);

        run.record_device(
            &Device::new("raven", "Google"),
            &HostListing::releases(GITHUB, zip("raven", 15)),
            &HostListing::releases(GITEA, Vec::new()),
        );
        run.record_device(
            &Device::new("oriole", "Google"),
            &HostListing::releases(GITHUB, zip("oriole", 18)),
            &HostListing::releases(GITEA, Vec::new()),
        );

        let result = run.finish();

        assert_eq!(result.snapshot.get("raven"), Some(&DeviceEntry { count: 15, diff: -5 }));
        assert_eq!(result.cumulative.count("raven"), 40);
        assert_eq!(result.cumulative.count("oriole"), 23);
        assert_eq!(result.negatives, 5);
        assert_eq!(result.total_diff, 3);
        assert_eq!(result.cumulative.summary().total, 63);
        assert_eq!(result.cumulative.summary().total_diff, 8);

        let text = result.report.to_string();
        assert!(text.contains("\nraven: 40\n"));
        assert!(text.contains("oriole: 23 (+8)"));
        assert!(text.contains("Total: 63 (+8)"));
    }

    #[test]
    fn test_non_positive_total_leaves_cumulative_unchanged() {
        let snapshot = ledger(&[("raven", 20)], 20);
        let cumulative = ledger(&[("raven", 40)], 40);
        let mut run = tally(snapshot, cumulative);

        run.record_device(
            &Device::new("raven", "Google"),
            &HostListing::releases(GITHUB, zip("raven", 12)),
            &HostListing::releases(GITEA, Vec::new()),
        );

        let result = run.finish();
        assert!(!result.cumulative_changed);
        assert!(!result.has_growth());
        assert_eq!(result.total_diff, -8);
        assert_eq!(result.cumulative.summary().total, 40);
        assert!(result.report.total().is_none());

        assert_eq!(result.snapshot.summary().total, 12);
        assert_eq!(result.snapshot.summary().total_diff, -8);
        assert_eq!(result.snapshot.summary().date, Some(date(9)));
    }

    #[test]
    fn test_cumulative_never_decreases_across_runs() {
        let counts: [u64; 6] = [10, 14, 9, 9, 30, 2];
        let mut snapshot = Ledger::new();
        let mut cumulative = Ledger::new();
        let mut last_device = 0;
        let mut last_total = 0;

        for (day, count) in (1..).zip(counts) {
            let mut run = Tally::new(snapshot, cumulative.clone(), AssetFilter::default(), date(day));
            run.record_device(
                &Device::new("raven", "Google"),
                &HostListing::releases(GITHUB, zip("raven", count)),
                &HostListing::releases(GITEA, Vec::new()),
            );
            let result = run.finish();

            if result.cumulative_changed {
                cumulative = result.cumulative;
            }
            snapshot = result.snapshot;

            assert!(cumulative.count("raven") >= last_device);
            assert!(cumulative.summary().total >= last_total);
            last_device = cumulative.count("raven");
            last_total = cumulative.summary().total;
        }

        // 10 + 4 + 21 growth, the drop of 5 fell on a non-positive run
        assert_eq!(cumulative.count("raven"), 35);
        assert_eq!(cumulative.summary().total, 35);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut run = tally(Ledger::new(), ledger(&[("raven", u64::MAX - 1)], u64::MAX - 1));

        run.record_device(
            &Device::new("raven", "Google"),
            &HostListing::releases(GITHUB, zip("raven", 5)),
            &HostListing::releases(GITEA, zip("raven", u64::MAX)),
        );
        let result = run.finish();

        assert_eq!(result.snapshot.count("raven"), u64::MAX);
        assert_eq!(result.cumulative.count("raven"), u64::MAX);
        assert_eq!(result.cumulative.summary().total, u64::MAX);
    }

    #[test]
    fn test_non_qualifying_assets_are_ignored() {
        let mut run = tally(Ledger::new(), Ledger::new());
        let releases = vec![Release::new(vec![
            Asset::new("PixelBuilds_raven.zip", 3),
            Asset::new("PixelBuilds_raven.img", 100),
            Asset::new("recovery.zip", 100),
        ])];

        let outcome = run.record_device(
            &Device::new("raven", "Google"),
            &HostListing::releases(GITHUB, releases),
            &HostListing::releases(GITEA, Vec::new()),
        );
        assert_eq!(outcome, DeviceOutcome::Counted { downloads: 3, diff: 3 });
    }

    #[test]
    fn test_signed_diff() {
        assert_eq!(signed_diff(15, 10), 5);
        assert_eq!(signed_diff(10, 15), -5);
        assert_eq!(signed_diff(u64::MAX, 0), i64::MAX);
        assert_eq!(signed_diff(0, u64::MAX), i64::MIN);
    }
}
