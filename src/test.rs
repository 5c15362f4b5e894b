//! Shared test utilities for building sponsors and exports.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{RawSponsor, RawTransaction, TransactionStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The fixed reference time used by tests: 2025-06-15T12:00:00Z.
pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

/// An RFC 3339 timestamp `days_ago` whole days before `now()`.
pub(crate) fn days_ago(days: i64) -> String {
    (now() - Duration::days(days)).to_rfc3339()
}

/// Creates a transaction whose tier amount and processed amount are both `amount`.
pub(crate) fn raw_transaction(
    tier_name: &str,
    amount: &str,
    days: i64,
    status: TransactionStatus,
) -> RawTransaction {
    RawTransaction {
        tier_name: tier_name.to_string(),
        tier_monthly_amount: amount.to_string(),
        processed_amount: amount.to_string(),
        status,
        transaction_date: days_ago(days),
        billing_country: String::new(),
    }
}

/// Builds a `RawSponsor`. Sponsors start out public, monthly, with no transactions.
pub(crate) struct SponsorBuilder {
    sponsor: RawSponsor,
}

impl SponsorBuilder {
    pub(crate) fn new(handle: &str) -> Self {
        Self {
            sponsor: RawSponsor {
                handle: handle.to_string(),
                display_name: None,
                is_public: true,
                is_yearly: false,
                sponsorship_started_on: "2024-01-15T00:00:00Z".to_string(),
                transactions: Vec::new(),
            },
        }
    }

    pub(crate) fn private(mut self) -> Self {
        self.sponsor.is_public = false;
        self
    }

    pub(crate) fn yearly(mut self) -> Self {
        self.sponsor.is_yearly = true;
        self
    }

    pub(crate) fn display_name(mut self, name: &str) -> Self {
        self.sponsor.display_name = Some(name.to_string());
        self
    }

    pub(crate) fn started(mut self, timestamp: &str) -> Self {
        self.sponsor.sponsorship_started_on = timestamp.to_string();
        self
    }

    /// Adds a settled `$N a month` payment made `days` days ago.
    pub(crate) fn recurring(self, amount: u32, days: i64) -> Self {
        self.transaction(raw_transaction(
            &format!("${amount} a month"),
            &format!("${amount}"),
            days,
            TransactionStatus::Settled,
        ))
    }

    /// Adds a settled `$N one time` payment made `days` days ago.
    pub(crate) fn one_time(self, amount: u32, days: i64) -> Self {
        self.transaction(raw_transaction(
            &format!("${amount} one time"),
            &format!("${amount}"),
            days,
            TransactionStatus::Settled,
        ))
    }

    pub(crate) fn transaction(mut self, transaction: RawTransaction) -> Self {
        self.sponsor.transactions.push(transaction);
        self
    }

    pub(crate) fn build(self) -> RawSponsor {
        self.sponsor
    }
}

/// A directory holding an export file. Holds TempDir to keep the directory alive for the duration
/// of the test.
pub(crate) struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub(crate) fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `sponsors` as a JSON export and returns its path.
    pub(crate) fn write_export(&self, sponsors: &[RawSponsor]) -> PathBuf {
        let path = self.path("export.json");
        std::fs::write(&path, serde_json::to_string_pretty(sponsors).unwrap()).unwrap();
        path
    }

    /// Writes raw `contents` to `name` and returns its path.
    pub(crate) fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub(crate) fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }
}

/// A small export covering each category plus the two exclusion reasons.
pub(crate) fn sample_sponsors() -> Vec<RawSponsor> {
    vec![
        SponsorBuilder::new("big-corp")
            .display_name("Big Corp")
            .recurring(100, 40)
            .recurring(100, 10)
            .build(),
        SponsorBuilder::new("generous")
            .one_time(421, 10)
            .build(),
        SponsorBuilder::new("steady")
            .recurring(20, 5)
            .build(),
        SponsorBuilder::new("lapsed")
            .started("2023-03-02T00:00:00Z")
            .recurring(20, 50)
            .build(),
        SponsorBuilder::new("coffee")
            .recurring(2, 3)
            .build(),
        SponsorBuilder::new("secret")
            .private()
            .recurring(1000, 1)
            .build(),
        SponsorBuilder::new("pending")
            .transaction(raw_transaction(
                "$5 a month",
                "$5",
                1,
                TransactionStatus::Other,
            ))
            .build(),
    ]
}
