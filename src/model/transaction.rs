use crate::model::{parse_amount, parse_timestamp};
use crate::Result;
use anyhow::{ensure, Context};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Substrings that mark a tier name as a subscription rather than a one-time payment. GitHub
/// names tiers like `$5 a month` or `$20/month`. The match is case-sensitive.
const RECURRING_MARKERS: &[&str] = &[
    "a month",
    "/month",
    "monthly",
    "per month",
    "a year",
    "/year",
    "yearly",
    "per year",
];

/// The largest amount, in either direction, accepted on a single transaction.
const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Returns true when the tier name looks like a recurring tier.
///
/// This is a heuristic over free text: the export has no structured recurring flag. A tier named
/// `$5 a month (one-time gift)` is misclassified as recurring.
pub fn is_recurring_tier_name(name: &str) -> bool {
    RECURRING_MARKERS.iter().any(|marker| name.contains(marker))
}

/// The settlement status of a transaction. Only `Settled` and `CreditBalanceAdjusted` count.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Settled,
    CreditBalanceAdjusted,
    #[default]
    #[serde(other)]
    Other,
}

serde_plain::derive_display_from_serialize!(TransactionStatus);

impl TransactionStatus {
    pub fn is_valid(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Settled | TransactionStatus::CreditBalanceAdjusted
        )
    }
}

/// A transaction exactly as it appears in the export. Amounts and dates are kept as text so that
/// one malformed value does not prevent the rest of the file from loading.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(alias = "tier_name", default)]
    pub(crate) tier_name: String,
    #[serde(alias = "tier_monthly_amount", deserialize_with = "text_or_number")]
    pub(crate) tier_monthly_amount: String,
    #[serde(
        alias = "processed_amount",
        deserialize_with = "text_or_number",
        default
    )]
    pub(crate) processed_amount: String,
    pub(crate) status: TransactionStatus,
    #[serde(alias = "transaction_date")]
    pub(crate) transaction_date: String,
    #[serde(alias = "billing_country", default)]
    pub(crate) billing_country: String,
}

impl RawTransaction {
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn tier_name(&self) -> &str {
        &self.tier_name
    }
}

/// A valid transaction with its amounts and date parsed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Transaction {
    tier_name: String,
    tier_monthly_amount: Decimal,
    processed_amount: Decimal,
    date: DateTime<Utc>,
    billing_country: String,
    recurring: bool,
}

impl Transaction {
    /// Parses the text fields of `raw`.
    pub fn parse(raw: &RawTransaction) -> Result<Self> {
        let tier_monthly_amount = parse_amount(&raw.tier_monthly_amount)
            .context("Unable to parse the tier monthly amount")?;
        let processed_amount = parse_amount(&raw.processed_amount)
            .context("Unable to parse the processed amount")?;
        let date = parse_timestamp(&raw.transaction_date)
            .context("Unable to parse the transaction date")?;
        for amount in [tier_monthly_amount, processed_amount] {
            ensure!(
                amount.abs() <= MAX_AMOUNT,
                "The amount {amount} exceeds the largest supported amount of {MAX_AMOUNT}"
            );
        }
        Ok(Self {
            recurring: is_recurring_tier_name(&raw.tier_name),
            tier_name: raw.tier_name.clone(),
            tier_monthly_amount,
            processed_amount,
            date,
            billing_country: raw.billing_country.clone(),
        })
    }

    pub fn tier_name(&self) -> &str {
        &self.tier_name
    }

    pub fn tier_monthly_amount(&self) -> Decimal {
        self.tier_monthly_amount
    }

    pub fn processed_amount(&self) -> Decimal {
        self.processed_amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn billing_country(&self) -> &str {
        &self.billing_country
    }

    pub fn is_recurring(&self) -> bool {
        self.recurring
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Accepts `"$100"` as well as `100` for amount fields.
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    })
}
