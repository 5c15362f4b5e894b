//! The sponsor categorization engine.
//!
//! `classify` turns one `RawSponsor` and a reference time `now` into a `ClassifiedSponsor`, or
//! explains why the sponsor is left out of the output. It performs no I/O and does not read the
//! clock, so the same input and `now` always yield the same result.

mod rules;

use crate::model::{days_since, parse_timestamp, ClassifiedSponsor, RawSponsor, Transaction};
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use rules::Facts;

/// Why a sponsor does not appear in the output.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    /// The sponsor chose to keep their sponsorship private.
    Private,
    /// None of the sponsor's transactions are settled or credit-balance adjusted.
    NoValidTransactions,
}

serde_plain::derive_display_from_serialize!(Exclusion);

/// The outcome of classifying a single sponsor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Classified(ClassifiedSponsor),
    Excluded(Exclusion),
}

impl Classification {
    pub fn classified(self) -> Option<ClassifiedSponsor> {
        match self {
            Classification::Classified(sponsor) => Some(sponsor),
            Classification::Excluded(_) => None,
        }
    }
}

/// Classifies `sponsor` as of `now`.
///
/// # Errors
/// Returns an error when an amount or date on one of the sponsor's valid transactions, or the
/// sponsorship start date, cannot be parsed. Callers should skip the sponsor and continue.
pub fn classify(sponsor: &RawSponsor, now: DateTime<Utc>) -> Result<Classification> {
    if !sponsor.is_public() {
        return Ok(Classification::Excluded(Exclusion::Private));
    }

    let handle = sponsor.handle();
    let mut transactions = Vec::new();
    for (ix, raw) in sponsor.transactions().iter().enumerate() {
        if !raw.status().is_valid() {
            continue;
        }
        let transaction = Transaction::parse(raw)
            .with_context(|| format!("Sponsor '{handle}' has a bad transaction at index {ix}"))?;
        transactions.push(transaction);
    }
    if transactions.is_empty() {
        return Ok(Classification::Excluded(Exclusion::NoValidTransactions));
    }

    let sponsorship_started_on = parse_timestamp(sponsor.sponsorship_started_on())
        .with_context(|| format!("Sponsor '{handle}' has a bad sponsorship start date"))?;

    // Stable, so transactions sharing a date keep their export order and the later one is latest.
    transactions.sort_by_key(Transaction::date);

    let (recurring, one_time): (Vec<&Transaction>, Vec<&Transaction>) =
        transactions.iter().partition(|t| t.is_recurring());
    let days = |t: &Transaction| days_since(t.date(), now);

    let latest_recurring = recurring.last().copied();
    let latest_one_time = one_time.last().copied();
    let current_monthly_amount = latest_recurring
        .map(Transaction::tier_monthly_amount)
        .unwrap_or_default();
    let days_since_last_recurring = latest_recurring.map(days);
    let days_since_last_one_time = latest_one_time.map(days);

    let threshold = rules::active_threshold_days(sponsor.is_yearly());
    let is_currently_active = days_since_last_recurring.is_some_and(|d| d <= threshold);

    let special_one_time = one_time
        .iter()
        .rev()
        .find(|t| t.tier_monthly_amount() >= rules::SPECIAL_AMOUNT)
        .copied()
        .filter(|&t| days(t) <= rules::special_window_days(t.tier_monthly_amount()));

    let facts = Facts {
        latest_recurring,
        latest_one_time,
        days_since_last_one_time,
        current_monthly_amount,
        is_currently_active,
        special_one_time,
    };
    let category = rules::categorize(&facts);
    let primary_tier_name = rules::primary_tier(&facts, &transactions)
        .map(|t| t.tier_name().to_string())
        .unwrap_or_default();

    let total_lifetime_amount = transactions
        .iter()
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.processed_amount()))
        .with_context(|| format!("Sponsor '{handle}' has a lifetime amount that overflows"))?;

    Ok(Classification::Classified(ClassifiedSponsor {
        handle: handle.to_string(),
        display_name: sponsor.display_name().map(str::to_string),
        is_yearly: sponsor.is_yearly(),
        sponsorship_started_on,
        profile: None,
        total_lifetime_amount,
        highest_tier_amount: max_tier(transactions.iter()),
        has_recurring_tiers: latest_recurring.is_some(),
        recurring_tier_amount: max_tier(recurring.iter().copied()),
        current_monthly_amount,
        is_currently_active,
        days_since_last_transaction: transactions.last().map(days),
        days_since_last_recurring_transaction: days_since_last_recurring,
        days_since_last_one_time_transaction: days_since_last_one_time,
        category,
        primary_tier_name,
        transaction_count: transactions.len(),
        all_tier_names: transactions
            .iter()
            .map(|t| t.tier_name().to_string())
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>(),
        countries: transactions
            .iter()
            .map(|t| t.billing_country().to_string())
            .filter(|country| !country.is_empty())
            .collect::<BTreeSet<_>>(),
    }))
}

fn max_tier<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Decimal {
    transactions
        .map(Transaction::tier_monthly_amount)
        .max()
        .unwrap_or_default()
}
