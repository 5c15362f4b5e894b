//! Attaches public profile details to classified sponsors.

use crate::api::ProfileLookup;
use crate::model::ClassifiedSponsor;
use std::time::Duration;
use tracing::{debug, warn};

/// The result of an enrichment pass.
#[derive(Debug, Clone)]
pub(crate) struct Enriched {
    pub(crate) sponsors: Vec<ClassifiedSponsor>,
    /// The number of lookups that failed. Those sponsors keep their export-derived details.
    pub(crate) failures: usize,
}

/// Looks up each sponsor's profile in order, pausing for `delay` between requests. A failed or
/// empty lookup leaves the sponsor unchanged; it never fails the run.
pub(crate) async fn enrich(
    sponsors: Vec<ClassifiedSponsor>,
    lookup: &mut (dyn ProfileLookup + Send),
    delay: Duration,
) -> Enriched {
    let mut enriched = Vec::with_capacity(sponsors.len());
    let mut failures = 0;

    for (ix, sponsor) in sponsors.into_iter().enumerate() {
        if ix > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let handle = sponsor.handle().to_string();
        match lookup.lookup(&handle).await {
            Ok(Some(profile)) => enriched.push(sponsor.with_profile(profile)),
            Ok(None) => {
                debug!("No profile found for '{handle}'");
                enriched.push(sponsor);
            }
            Err(e) => {
                warn!("Profile lookup for '{handle}' failed, using defaults: {e:#}");
                failures += 1;
                enriched.push(sponsor);
            }
        }
    }

    Enriched {
        sponsors: enriched,
        failures,
    }
}
