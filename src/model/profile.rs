use serde::{Deserialize, Serialize};

/// Public profile details returned by a `ProfileLookup`. Every field is optional because the
/// lookup may only know some of them.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
    pub website_url: Option<String>,
    /// `User` or `Organization`.
    pub entity_type: Option<String>,
}
