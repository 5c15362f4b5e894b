//! Compares two summary documents to show how sponsors moved between runs.

use crate::model::{Category, SummaryDocument, UiSponsor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A sponsor present in both documents whose category or tier changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorChange {
    pub github_id: String,
    pub old_category: Category,
    pub new_category: Category,
    pub old_tier: String,
    pub new_tier: String,
}

/// The differences between two documents. Every list is sorted by `githubId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<SponsorChange>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compares `old` to `new`, keyed by `githubId`.
pub fn diff(old: &SummaryDocument, new: &SummaryDocument) -> DiffReport {
    let old = index(old);
    let new = index(new);

    let added = new
        .keys()
        .filter(|id| !old.contains_key(*id))
        .map(|id| id.to_string())
        .collect();
    let removed = old
        .keys()
        .filter(|id| !new.contains_key(*id))
        .map(|id| id.to_string())
        .collect();
    let changed = old
        .iter()
        .filter_map(|(id, (old_category, old_sponsor))| {
            let (new_category, new_sponsor) = new.get(id)?;
            if old_category == new_category && old_sponsor.tier_name == new_sponsor.tier_name {
                return None;
            }
            Some(SponsorChange {
                github_id: id.to_string(),
                old_category: *old_category,
                new_category: *new_category,
                old_tier: old_sponsor.tier_name.clone(),
                new_tier: new_sponsor.tier_name.clone(),
            })
        })
        .collect();

    DiffReport {
        added,
        removed,
        changed,
    }
}

fn index(doc: &SummaryDocument) -> BTreeMap<&str, (Category, &UiSponsor)> {
    let buckets = [
        (Category::Special, &doc.special_sponsors),
        (Category::Current, &doc.sponsors),
        (Category::Past, &doc.past_sponsors),
        (Category::Backer, &doc.backers),
    ];
    buckets
        .into_iter()
        .flat_map(|(category, sponsors)| {
            sponsors
                .iter()
                .map(move |s| (s.github_id.as_str(), (category, s)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::model::RawSponsor;
    use crate::summary::{summarize, SummaryOptions};
    use crate::test::{now, sample_sponsors, SponsorBuilder};

    fn document(raw: &[RawSponsor]) -> SummaryDocument {
        let sponsors: Vec<_> = raw
            .iter()
            .filter_map(|s| classify(s, now()).unwrap().classified())
            .collect();
        summarize(&sponsors, &SummaryOptions::default(), now())
    }

    #[test]
    fn test_identical_documents() {
        let doc = document(&sample_sponsors());
        let report = diff(&doc, &doc);
        assert!(report.is_empty());
    }

    #[test]
    fn test_added_removed_changed() {
        let old = document(&[
            SponsorBuilder::new("stays").recurring(20, 1).build(),
            SponsorBuilder::new("leaves").recurring(2, 1).build(),
            SponsorBuilder::new("upgrades").recurring(2, 1).build(),
            SponsorBuilder::new("lapses").recurring(20, 1).build(),
        ]);
        let new = document(&[
            SponsorBuilder::new("stays").recurring(20, 1).build(),
            SponsorBuilder::new("upgrades").recurring(2, 31).recurring(10, 1).build(),
            SponsorBuilder::new("lapses").recurring(20, 60).build(),
            SponsorBuilder::new("arrives").one_time(500, 1).build(),
        ]);

        let report = diff(&old, &new);
        assert_eq!(report.added, vec!["arrives"]);
        assert_eq!(report.removed, vec!["leaves"]);
        assert_eq!(
            report.changed,
            vec![
                SponsorChange {
                    github_id: "lapses".to_string(),
                    old_category: Category::Current,
                    new_category: Category::Past,
                    old_tier: "$20 a month".to_string(),
                    new_tier: "$20 a month".to_string(),
                },
                SponsorChange {
                    github_id: "upgrades".to_string(),
                    old_category: Category::Backer,
                    new_category: Category::Current,
                    old_tier: "$2 a month".to_string(),
                    new_tier: "$10 a month".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_tier_change_within_category() {
        let old = document(&[SponsorBuilder::new("a").recurring(10, 1).build()]);
        let new = document(&[SponsorBuilder::new("a").recurring(10, 31).recurring(25, 1).build()]);
        let report = diff(&old, &new);
        assert_eq!(report.changed.len(), 1);
        assert_eq!(report.changed[0].old_category, Category::Current);
        assert_eq!(report.changed[0].new_category, Category::Current);
        assert_eq!(report.changed[0].new_tier, "$25 a month");
    }

    #[test]
    fn test_json_shape() {
        let old = document(&[]);
        let new = document(&[SponsorBuilder::new("a").recurring(10, 1).build()]);
        let json = serde_json::to_value(diff(&old, &new)).unwrap();
        assert_eq!(json["added"][0], "a");
        assert!(json["changed"].as_array().unwrap().is_empty());
    }
}
