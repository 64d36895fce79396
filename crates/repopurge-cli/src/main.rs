//! repopurge — invalidate CDN-cached package repository objects.
//!
//! Lists a repository bucket, filters the keys, and creates one
//! CloudFront invalidation for the surviving paths. Production
//! distributions are reached through a cross-account role.

use clap::Parser;

use repopurge_aws::{CloudFrontInvalidator, CredentialStrategy, S3Lister};
use repopurge_cli::{init_tracing, print_json, run, InvalidationReport, RunOutcome, RunRequest};
use repopurge_core::{Environment, FilterCriteria, RepoType, TargetTable};

#[derive(Parser, Debug)]
#[command(name = "repopurge", about = "Invalidate CDN-cached package repository objects")]
struct Args {
    /// Type of repo to invalidate: 'apt' or 'yum'
    #[arg(long)]
    repo_type: String,

    /// Environment of the repo: 'staging' or 'prod'
    #[arg(long)]
    env: String,

    /// Regex whitelist; only matching objects are invalidated
    #[arg(long, default_value = "")]
    pattern_regex: String,

    /// Substring whitelist; only objects containing it are invalidated
    #[arg(long, default_value = "")]
    pattern_substring: String,

    /// Don't filter out versioned objects (one or more digits in the filename)
    #[arg(long)]
    invalidate_versioned: bool,

    /// Compute and report the invalidation without creating it
    #[arg(long)]
    dry_run: bool,

    /// Don't query the bucket; invalidate exactly this path
    #[arg(long)]
    raw_cloudfront_path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Validate tags and patterns before any network call.
    let env: Environment = args.env.parse()?;
    let repo_type: RepoType = args.repo_type.parse()?;
    let criteria = FilterCriteria::from_args(
        !args.invalidate_versioned,
        &args.pattern_regex,
        &args.pattern_substring,
    )?;

    let table = TargetTable::builtin();
    let target = table.resolve(env, repo_type).clone();

    tracing::info!(
        env = %env,
        repo_type = %repo_type,
        bucket = %target.bucket,
        distribution_id = %target.distribution_id,
        "Resolved repository target"
    );

    let lister = S3Lister::new().await;
    let strategy = CredentialStrategy::for_environment(env);
    let invalidator = CloudFrontInvalidator::new(&strategy).await;

    let outcome = run(
        &lister,
        &invalidator,
        RunRequest {
            target: target.clone(),
            criteria,
            raw_path: args.raw_cloudfront_path,
            dry_run: args.dry_run,
        },
    )
    .await?;

    match outcome {
        RunOutcome::DryRun(plan) => {
            print_json(&InvalidationReport::new(&target, &plan, None))?;
        }
        RunOutcome::Submitted { plan, location } => {
            print_json(&InvalidationReport::new(&target, &plan, Some(&location)))?;
            tracing::info!(location = %location, "Successfully created invalidation");
        }
    }

    Ok(())
}
