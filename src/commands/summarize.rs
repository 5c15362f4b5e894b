use crate::api::{GitHubProfiles, Mode, ProfileLookup};
use crate::args::SummarizeArgs;
use crate::commands::Out;
use crate::enrich::enrich;
use crate::{export, summary, utils, Config, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What a `summarize` run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Sponsors written to the output.
    pub classified: usize,
    pub private: usize,
    pub no_valid_transactions: usize,
    /// Export records skipped because they could not be read or classified.
    pub warnings: usize,
    pub enrichment_failures: usize,
    pub mode: Mode,
    pub output: PathBuf,
}

/// Reads the export, classifies and optionally enriches every sponsor, and writes the summary
/// document to the output path.
pub async fn summarize(config: Config, args: SummarizeArgs) -> Result<Out<RunSummary>> {
    let mode = Mode::new(args.offline(), args.github_token().is_some());
    let lookup: Option<Box<dyn ProfileLookup + Send>> = match (mode, args.github_token()) {
        (Mode::Online, Some(token)) => {
            match GitHubProfiles::new(config.github_api_url(), token, config.request_timeout()) {
                Ok(client) => Some(Box::new(client)),
                Err(e) => {
                    warn!("Unable to set up GitHub profile lookups, continuing offline: {e:#}");
                    None
                }
            }
        }
        _ => {
            info!("Running offline, profile details will come from the export");
            None
        }
    };
    run(&config, &args, lookup).await
}

async fn run(
    config: &Config,
    args: &SummarizeArgs,
    lookup: Option<Box<dyn ProfileLookup + Send>>,
) -> Result<Out<RunSummary>> {
    let now = args.now().unwrap_or_else(Utc::now);
    debug!("Classifying sponsors as of {now}");

    let records = export::load(args.input()).await?;
    let batch = export::classify_all(records, now);

    let (mode, sponsors, enrichment_failures) = match lookup {
        Some(mut lookup) => {
            let enriched = enrich(batch.sponsors, lookup.as_mut(), config.request_delay()).await;
            (Mode::Online, enriched.sponsors, enriched.failures)
        }
        None => (Mode::Offline, batch.sponsors, 0),
    };

    let document = summary::summarize(&sponsors, &config.summary_options(), now);
    utils::write_json(args.output(), &document).await?;

    let run_summary = RunSummary {
        classified: sponsors.len(),
        private: batch.private,
        no_valid_transactions: batch.no_valid_transactions,
        warnings: batch.warnings,
        enrichment_failures,
        mode,
        output: args.output().to_path_buf(),
    };

    let mut message = format!(
        "Wrote {} sponsors to {}",
        run_summary.classified,
        args.output().display()
    );
    let skipped = run_summary.warnings + run_summary.enrichment_failures;
    if skipped > 0 {
        message.push_str(&format!(
            " with {} unreadable records and {} failed profile lookups",
            run_summary.warnings, run_summary.enrichment_failures
        ));
    }
    Ok(Out::new(message, run_summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Profile, SummaryDocument};
    use crate::test::{now, sample_sponsors, TestEnv};

    struct NamedLookup;

    #[async_trait::async_trait]
    impl ProfileLookup for NamedLookup {
        async fn lookup(&mut self, handle: &str) -> Result<Option<Profile>> {
            Ok(Some(Profile {
                name: Some(handle.to_uppercase()),
                ..Profile::default()
            }))
        }
    }

    fn args(env: &TestEnv) -> SummarizeArgs {
        let input = env.write_export(&sample_sponsors());
        SummarizeArgs::new(input, env.path("sponsors.json")).with_now(now())
    }

    #[tokio::test]
    async fn test_summarize_offline() {
        let env = TestEnv::new();
        let args = args(&env).with_offline(true).with_github_token("ignored");

        let out = summarize(Config::default(), args).await.unwrap();
        let run = out.structure().unwrap();
        assert_eq!(run.classified, 5);
        assert_eq!(run.private, 1);
        assert_eq!(run.no_valid_transactions, 1);
        assert_eq!(run.warnings, 0);
        assert_eq!(run.mode, Mode::Offline);
        assert!(out.message().starts_with("Wrote 5 sponsors"));

        let doc: SummaryDocument =
            serde_json::from_str(&TestEnv::read(&env.path("sponsors.json"))).unwrap();
        assert_eq!(doc.generated_at, now());
        assert_eq!(doc.summary.total_sponsors, 5);
        assert_eq!(doc.special_sponsors[1].name, "Big Corp");
        assert_eq!(doc.backers[0].avatar_url, "https://github.com/coffee.png");
    }

    #[tokio::test]
    async fn test_summarize_without_token_is_offline() {
        let env = TestEnv::new();
        let out = summarize(Config::default(), args(&env)).await.unwrap();
        assert_eq!(out.structure().unwrap().mode, Mode::Offline);
    }

    #[tokio::test]
    async fn test_summarize_with_lookup() {
        let env = TestEnv::new();
        let args = args(&env);
        let out = run(&Config::default(), &args, Some(Box::new(NamedLookup)))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().mode, Mode::Online);

        let doc: SummaryDocument =
            serde_json::from_str(&TestEnv::read(args.output())).unwrap();
        assert_eq!(doc.sponsors[0].name, "STEADY");
        assert_eq!(doc.summary.top_sponsor.unwrap().name, "GENEROUS");
    }

    #[tokio::test]
    async fn test_summarize_skips_malformed_records() {
        let env = TestEnv::new();
        let input = env.write(
            "export.json",
            r#"[
                { "handle": "nope" },
                {
                    "handle": "ok",
                    "isPublic": true,
                    "isYearly": false,
                    "sponsorshipStartedOn": "2025-01-01",
                    "transactions": [{
                        "tierName": "$10 a month",
                        "tierMonthlyAmount": 10,
                        "processedAmount": "$10.00",
                        "status": "settled",
                        "transactionDate": "2025-06-10"
                    }]
                }
            ]"#,
        );
        let args = SummarizeArgs::new(input, env.path("out.json")).with_now(now());
        let out = summarize(Config::default(), args).await.unwrap();
        let run = out.structure().unwrap();
        assert_eq!(run.classified, 1);
        assert_eq!(run.warnings, 1);
        assert!(out.message().contains("1 unreadable records"));
    }

    #[tokio::test]
    async fn test_summarize_rejects_non_array_export() {
        let env = TestEnv::new();
        let input = env.write("export.json", r#"{"handle": "solo"}"#);
        let args = SummarizeArgs::new(input, env.path("out.json")).with_now(now());
        assert!(summarize(Config::default(), args).await.is_err());
        assert!(!env.path("out.json").exists());
    }
}
