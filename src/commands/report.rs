use crate::args::ReportArgs;
use crate::commands::Out;
use crate::model::{Category, ClassifiedSponsor};
use crate::summary::display_order;
use crate::{export, utils, Result};
use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// One row of the review table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub handle: String,
    pub category: Category,
    pub tier: String,
    pub lifetime: Decimal,
    pub highest_tier: Decimal,
    pub current_monthly: Decimal,
    pub active: bool,
    pub days_since_last: Option<i64>,
    pub transactions: usize,
    /// Billing countries joined with `;`.
    pub countries: String,
}

impl From<&ClassifiedSponsor> for ReportRow {
    fn from(sponsor: &ClassifiedSponsor) -> Self {
        Self {
            handle: sponsor.handle().to_string(),
            category: sponsor.category(),
            tier: sponsor.primary_tier_name().to_string(),
            lifetime: sponsor.total_lifetime_amount(),
            highest_tier: sponsor.highest_tier_amount(),
            current_monthly: sponsor.current_monthly_amount(),
            active: sponsor.is_currently_active(),
            days_since_last: sponsor.days_since_last_transaction(),
            transactions: sponsor.transaction_count(),
            countries: sponsor
                .countries()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}

/// Writes a CSV table of the classified sponsors in display order. Profile lookups are not made.
pub async fn report(args: ReportArgs) -> Result<Out<Vec<ReportRow>>> {
    let now = args.now().unwrap_or_else(Utc::now);
    let records = export::load(args.input()).await?;
    let mut batch = export::classify_all(records, now);
    batch.sponsors.sort_by(display_order);

    let rows: Vec<ReportRow> = batch.sponsors.iter().map(ReportRow::from).collect();
    let csv = to_csv(&rows)?;
    utils::write(args.output(), csv).await?;
    debug!("Skipped {} unreadable records", batch.warnings);

    Ok(Out::new(
        format!(
            "Wrote {} rows to {}",
            rows.len(),
            args.output().display()
        ),
        rows,
    ))
}

fn to_csv(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Unable to write the report row for '{}'", row.handle))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish the CSV report: {e}"))
}
