//! Groups classified sponsors into category buckets and builds the `SummaryDocument`.

use crate::model::{
    since_when, Amount, Category, ClassifiedSponsor, Summary, SummaryDocument, TopSponsor,
    UiSponsor,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const GITHUB: &str = "https://github.com";

/// Controls when lifetime amounts are included for a sponsor in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountDisclosure {
    /// Only for sponsors with more than one transaction.
    #[default]
    Repeat,
    /// For every sponsor.
    Always,
    /// Never.
    Never,
}

serde_plain::derive_display_from_serialize!(AmountDisclosure);
serde_plain::derive_fromstr_from_deserialize!(AmountDisclosure);

impl AmountDisclosure {
    fn discloses(&self, transaction_count: usize) -> bool {
        match self {
            AmountDisclosure::Repeat => transaction_count > 1,
            AmountDisclosure::Always => true,
            AmountDisclosure::Never => false,
        }
    }
}

/// Presentation settings for `summarize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub disclosure: AmountDisclosure,
    /// Prefix for `formattedAmount`, e.g. `$` or `€`.
    pub currency_symbol: String,
    /// Multiplier applied to USD amounts before they are formatted.
    pub exchange_rate: Decimal,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            disclosure: AmountDisclosure::default(),
            currency_symbol: "$".to_string(),
            exchange_rate: Decimal::ONE,
        }
    }
}

/// The display order: category rank, then lifetime amount, highest tier and start date, all
/// descending. The handle breaks any remaining tie.
pub fn display_order(a: &ClassifiedSponsor, b: &ClassifiedSponsor) -> Ordering {
    a.category()
        .cmp(&b.category())
        .then_with(|| b.total_lifetime_amount().cmp(&a.total_lifetime_amount()))
        .then_with(|| b.highest_tier_amount().cmp(&a.highest_tier_amount()))
        .then_with(|| b.sponsorship_started_on().cmp(&a.sponsorship_started_on()))
        .then_with(|| a.handle().cmp(b.handle()))
}

/// Builds the output document from `sponsors`, which may be in any order.
pub fn summarize(
    sponsors: &[ClassifiedSponsor],
    options: &SummaryOptions,
    generated_at: DateTime<Utc>,
) -> SummaryDocument {
    let mut sorted: Vec<&ClassifiedSponsor> = sponsors.iter().collect();
    sorted.sort_by(|a, b| display_order(a, b));

    let bucket = |category: Category| -> Vec<UiSponsor> {
        sorted
            .iter()
            .filter(|s| s.category() == category)
            .map(|s| ui_sponsor(s, options))
            .collect()
    };
    let special_sponsors = bucket(Category::Special);
    let current = bucket(Category::Current);
    let past_sponsors = bucket(Category::Past);
    let backers = bucket(Category::Backer);

    let top_sponsor = sorted
        .iter()
        .fold(None::<&ClassifiedSponsor>, |top, &s| match top {
            Some(t) if t.total_lifetime_amount() >= s.total_lifetime_amount() => Some(t),
            _ => Some(s),
        })
        .map(|s| TopSponsor {
            name: display_name(s),
            amount: s.total_lifetime_amount(),
        });

    let summary = Summary {
        total_sponsors: sorted.len(),
        total_lifetime_amount: total(sorted.iter().map(|s| s.total_lifetime_amount())),
        total_current_monthly: total(
            sorted
                .iter()
                .filter(|s| s.is_currently_active())
                .map(|s| s.current_monthly_amount()),
        ),
        special_sponsors: special_sponsors.len(),
        current_sponsors: current.len(),
        past_sponsors: past_sponsors.len(),
        backers: backers.len(),
        top_sponsor,
    };

    SummaryDocument {
        generated_at,
        summary,
        special_sponsors,
        sponsors: current,
        past_sponsors,
        backers,
    }
}

/// Sums `amounts`, saturating at `Decimal::MAX`.
fn total(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// The name shown for a sponsor: the enriched profile name, the export display name, or the
/// handle.
pub fn display_name(sponsor: &ClassifiedSponsor) -> String {
    sponsor
        .profile()
        .and_then(|p| p.name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .or(sponsor.display_name())
        .unwrap_or(sponsor.handle())
        .to_string()
}

fn ui_sponsor(sponsor: &ClassifiedSponsor, options: &SummaryOptions) -> UiSponsor {
    let handle = sponsor.handle();
    let profile = sponsor.profile();
    let (total_processed_amount, formatted_amount) =
        if options.disclosure.discloses(sponsor.transaction_count()) {
            let amount = Amount::new(sponsor.total_lifetime_amount());
            let formatted = amount.format_with(&options.currency_symbol, options.exchange_rate);
            (Some(amount.value()), Some(formatted))
        } else {
            (None, None)
        };

    UiSponsor {
        name: display_name(sponsor),
        github_id: handle.to_string(),
        avatar_url: profile
            .and_then(|p| p.avatar_url.clone())
            .unwrap_or_else(|| format!("{GITHUB}/{handle}.png")),
        website_url: profile.and_then(|p| p.website_url.clone()),
        github_url: profile
            .and_then(|p| p.profile_url.clone())
            .unwrap_or_else(|| format!("{GITHUB}/{handle}")),
        tier_name: sponsor.primary_tier_name().to_string(),
        since_when: since_when(sponsor.sponsorship_started_on()),
        transaction_count: sponsor.transaction_count(),
        total_processed_amount,
        formatted_amount,
    }
}
