//! Optional profile enrichment.
//!
//! A `ProfileLookup` resolves a sponsor handle to public profile details such as a display name,
//! avatar and website. Lookups are never required: callers fall back to values derived from the
//! export when a lookup fails or when running in `Mode::Offline`.

mod github;

use crate::model::Profile;
use crate::Result;
use serde::{Deserialize, Serialize};

pub(crate) use github::GitHubProfiles;

/// Whether profile lookups go to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Online,
    Offline,
}

serde_plain::derive_display_from_serialize!(Mode);

impl Mode {
    /// Lookups need a GitHub token, so `Online` requires one.
    pub fn new(offline: bool, has_token: bool) -> Self {
        if offline || !has_token {
            Mode::Offline
        } else {
            Mode::Online
        }
    }
}

/// Looks up public profile details for a sponsor handle.
#[async_trait::async_trait]
pub(crate) trait ProfileLookup {
    /// Returns `Ok(None)` when the handle is unknown to the service.
    async fn lookup(&mut self, handle: &str) -> Result<Option<Profile>>;
}
