//! The output document consumed by UIs, banner renderers and the `diff` command.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The document written by `summarize`.
///
/// Example:
/// ```json
/// {
///   "generated_at": "2025-06-15T12:00:00Z",
///   "summary": {
///     "total_sponsors": 1,
///     "total_lifetime_amount": 100.0,
///     "total_current_monthly": 100.0,
///     "special_sponsors": 1,
///     "current_sponsors": 0,
///     "past_sponsors": 0,
///     "backers": 0,
///     "top_sponsor": { "name": "The Octocat", "amount": 100.0 }
///   },
///   "specialSponsors": [ ... ],
///   "sponsors": [],
///   "pastSponsors": [],
///   "backers": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    #[serde(rename = "specialSponsors")]
    pub special_sponsors: Vec<UiSponsor>,
    /// The `current` bucket.
    pub sponsors: Vec<UiSponsor>,
    #[serde(rename = "pastSponsors")]
    pub past_sponsors: Vec<UiSponsor>,
    pub backers: Vec<UiSponsor>,
}

impl SummaryDocument {
    /// All sponsors across the four buckets, in rank order.
    pub fn all_sponsors(&self) -> impl Iterator<Item = &UiSponsor> {
        self.special_sponsors
            .iter()
            .chain(self.sponsors.iter())
            .chain(self.past_sponsors.iter())
            .chain(self.backers.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    pub total_sponsors: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_lifetime_amount: Decimal,
    /// Sum of the current monthly amount of every currently active sponsor, backers included.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_current_monthly: Decimal,
    pub special_sponsors: usize,
    pub current_sponsors: usize,
    pub past_sponsors: usize,
    pub backers: usize,
    pub top_sponsor: Option<TopSponsor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSponsor {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// A sponsor as presented to a UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSponsor {
    pub name: String,
    pub github_id: String,
    pub avatar_url: String,
    pub website_url: Option<String>,
    pub github_url: String,
    pub tier_name: String,
    pub since_when: String,
    pub transaction_count: usize,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_processed_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_amount: Option<String>,
}
