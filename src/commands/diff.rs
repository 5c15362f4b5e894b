use crate::args::DiffArgs;
use crate::commands::Out;
use crate::diff::DiffReport;
use crate::model::SummaryDocument;
use crate::{utils, Result};
use tracing::info;

/// Compares two summary documents written by `summarize`.
pub async fn diff(args: DiffArgs) -> Result<Out<DiffReport>> {
    let old: SummaryDocument = utils::deserialize(args.old()).await?;
    let new: SummaryDocument = utils::deserialize(args.new_path()).await?;
    let report = crate::diff::diff(&old, &new);

    if report.is_empty() {
        return Ok(Out::new("No sponsors changed", report));
    }
    for change in &report.changed {
        info!(
            "{}: {} ({}) -> {} ({})",
            change.github_id,
            change.old_category,
            change.old_tier,
            change.new_category,
            change.new_tier
        );
    }
    let message = format!(
        "{} added, {} removed, {} changed",
        report.added.len(),
        report.removed.len(),
        report.changed.len()
    );
    Ok(Out::new(message, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::SummarizeArgs;
    use crate::commands::summarize;
    use crate::test::{now, sample_sponsors, TestEnv};
    use crate::Config;

    #[tokio::test]
    async fn test_diff_documents() {
        let env = TestEnv::new();
        let input = env.write_export(&sample_sponsors());
        let old = env.path("old.json");
        let new = env.path("new.json");
        summarize(
            Config::default(),
            SummarizeArgs::new(&input, &old).with_now(now()),
        )
        .await
        .unwrap();
        // 130 days on, the special window of the $421 payment has closed and both monthly sponsors
        // have lapsed.
        summarize(
            Config::default(),
            SummarizeArgs::new(&input, &new).with_now(now() + chrono::Duration::days(130)),
        )
        .await
        .unwrap();

        let out = diff(DiffArgs::new(&old, &new)).await.unwrap();
        let report = out.structure().unwrap();
        assert!(report.added.is_empty());
        assert!(report.removed.is_empty());
        let changed: Vec<_> = report.changed.iter().map(|c| c.github_id.as_str()).collect();
        assert_eq!(changed, vec!["big-corp", "generous", "steady"]);
        assert_eq!(out.message(), "0 added, 0 removed, 3 changed");
    }

    #[tokio::test]
    async fn test_diff_same_document() {
        let env = TestEnv::new();
        let input = env.write_export(&sample_sponsors());
        let doc = env.path("doc.json");
        summarize(Config::default(), SummarizeArgs::new(&input, &doc).with_now(now()))
            .await
            .unwrap();
        let out = diff(DiffArgs::new(&doc, &doc)).await.unwrap();
        assert_eq!(out.message(), "No sponsors changed");
    }

    #[tokio::test]
    async fn test_diff_missing_file() {
        let env = TestEnv::new();
        let result = diff(DiffArgs::new(env.path("a.json"), env.path("b.json"))).await;
        assert!(result.is_err());
    }
}
