use crate::model::Profile;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The lifecycle tier of a sponsor. The variant order is the display rank: `Special` sorts first.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Special,
    Current,
    Past,
    Backer,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

/// The result of classifying one `RawSponsor`. Values are produced by `classify` and are not
/// modified afterwards, except for attaching a `Profile` with `with_profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedSponsor {
    pub(crate) handle: String,
    pub(crate) display_name: Option<String>,
    pub(crate) is_yearly: bool,
    pub(crate) sponsorship_started_on: DateTime<Utc>,
    pub(crate) profile: Option<Profile>,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) total_lifetime_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) highest_tier_amount: Decimal,
    pub(crate) has_recurring_tiers: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) recurring_tier_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) current_monthly_amount: Decimal,
    pub(crate) is_currently_active: bool,
    pub(crate) days_since_last_transaction: Option<i64>,
    pub(crate) days_since_last_recurring_transaction: Option<i64>,
    pub(crate) days_since_last_one_time_transaction: Option<i64>,
    pub(crate) category: Category,
    pub(crate) primary_tier_name: String,
    pub(crate) transaction_count: usize,
    pub(crate) all_tier_names: BTreeSet<String>,
    pub(crate) countries: BTreeSet<String>,
}

impl ClassifiedSponsor {
    /// Returns a copy of this sponsor with the enrichment `profile` attached.
    pub fn with_profile(self, profile: Profile) -> Self {
        Self {
            profile: Some(profile),
            ..self
        }
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_yearly(&self) -> bool {
        self.is_yearly
    }

    pub fn sponsorship_started_on(&self) -> DateTime<Utc> {
        self.sponsorship_started_on
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// The sum of processed amounts over all valid transactions.
    pub fn total_lifetime_amount(&self) -> Decimal {
        self.total_lifetime_amount
    }

    /// The largest tier amount seen on any valid transaction.
    pub fn highest_tier_amount(&self) -> Decimal {
        self.highest_tier_amount
    }

    pub fn has_recurring_tiers(&self) -> bool {
        self.has_recurring_tiers
    }

    /// The largest tier amount seen on any recurring transaction.
    pub fn recurring_tier_amount(&self) -> Decimal {
        self.recurring_tier_amount
    }

    /// The tier amount of the latest recurring transaction, or zero.
    pub fn current_monthly_amount(&self) -> Decimal {
        self.current_monthly_amount
    }

    pub fn is_currently_active(&self) -> bool {
        self.is_currently_active
    }

    /// `None` means there is no such transaction.
    pub fn days_since_last_transaction(&self) -> Option<i64> {
        self.days_since_last_transaction
    }

    pub fn days_since_last_recurring_transaction(&self) -> Option<i64> {
        self.days_since_last_recurring_transaction
    }

    pub fn days_since_last_one_time_transaction(&self) -> Option<i64> {
        self.days_since_last_one_time_transaction
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn primary_tier_name(&self) -> &str {
        &self.primary_tier_name
    }

    /// The number of valid transactions.
    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn all_tier_names(&self) -> &BTreeSet<String> {
        &self.all_tier_names
    }

    pub fn countries(&self) -> &BTreeSet<String> {
        &self.countries
    }
}
