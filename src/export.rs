//! Reading a sponsors export and classifying every record in it.
//!
//! The export is a JSON array of sponsor records. A record that cannot be read or classified is
//! skipped with a warning; only a file that is not a JSON array stops the run.

use crate::classify::{classify, Classification, Exclusion};
use crate::model::{ClassifiedSponsor, RawSponsor};
use crate::{utils, Result};
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// The outcome of classifying a whole export.
#[derive(Debug, Clone, Default)]
pub(crate) struct Batch {
    pub(crate) sponsors: Vec<ClassifiedSponsor>,
    pub(crate) private: usize,
    pub(crate) no_valid_transactions: usize,
    /// Records that were skipped because they were malformed.
    pub(crate) warnings: usize,
}

/// Reads the export at `path` as a list of untyped records.
pub(crate) async fn load(path: &Path) -> Result<Vec<Value>> {
    let value: Value = utils::deserialize(path).await?;
    match value {
        Value::Array(records) => {
            debug!("Read {} sponsor records from {}", records.len(), path.display());
            Ok(records)
        }
        other => bail!(
            "Expected a JSON array of sponsors in {}, found {}",
            path.display(),
            kind(&other)
        ),
    }
}

/// Classifies each record as of `now`, keeping the export order.
pub(crate) fn classify_all(records: Vec<Value>, now: DateTime<Utc>) -> Batch {
    let mut batch = Batch::default();
    for (ix, record) in records.into_iter().enumerate() {
        match classify_record(record, now) {
            Ok(Classification::Classified(sponsor)) => batch.sponsors.push(sponsor),
            Ok(Classification::Excluded(Exclusion::Private)) => batch.private += 1,
            Ok(Classification::Excluded(Exclusion::NoValidTransactions)) => {
                batch.no_valid_transactions += 1
            }
            Err(e) => {
                warn!("Skipping sponsor record {ix}: {e:#}");
                batch.warnings += 1;
            }
        }
    }
    batch
}

fn classify_record(record: Value, now: DateTime<Utc>) -> Result<Classification> {
    let sponsor: RawSponsor =
        serde_json::from_value(record).context("The record is not a valid sponsor")?;
    classify(&sponsor, now)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
