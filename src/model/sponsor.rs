use crate::model::RawTransaction;
use serde::{Deserialize, Serialize};

/// One sponsor as exported from GitHub, including its full transaction history.
///
/// Both the camelCase names and the snake_case names of GitHub's own export are accepted, e.g.
/// `handle` or `sponsor_handle`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSponsor {
    #[serde(alias = "sponsor_handle")]
    pub(crate) handle: String,
    #[serde(alias = "sponsor_profile_name", default)]
    pub(crate) display_name: Option<String>,
    #[serde(alias = "is_public")]
    pub(crate) is_public: bool,
    #[serde(alias = "is_yearly")]
    pub(crate) is_yearly: bool,
    #[serde(alias = "sponsorship_started_on")]
    pub(crate) sponsorship_started_on: String,
    pub(crate) transactions: Vec<RawTransaction>,
}

impl RawSponsor {
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn is_yearly(&self) -> bool {
        self.is_yearly
    }

    pub fn sponsorship_started_on(&self) -> &str {
        &self.sponsorship_started_on
    }

    pub fn transactions(&self) -> &[RawTransaction] {
        &self.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_export_names() {
        let json = r#"{
            "sponsor_handle": "octocat",
            "sponsor_profile_name": "The Octocat",
            "is_public": true,
            "is_yearly": false,
            "sponsorship_started_on": "2024-01-05 08:00:00 UTC",
            "transactions": []
        }"#;
        let sponsor: RawSponsor = serde_json::from_str(json).unwrap();
        assert_eq!(sponsor.handle(), "octocat");
        assert_eq!(sponsor.display_name(), Some("The Octocat"));
        assert!(sponsor.is_public());
        assert!(!sponsor.is_yearly());
    }

    #[test]
    fn test_missing_required_field() {
        let json = r#"{ "handle": "octocat", "isPublic": true, "transactions": [] }"#;
        assert!(serde_json::from_str::<RawSponsor>(json).is_err());
    }

    #[test]
    fn test_blank_display_name_is_none() {
        let sponsor = RawSponsor {
            display_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(sponsor.display_name(), None);
    }
}
