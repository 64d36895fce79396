//! Repopurge CLI library
//!
//! Orchestration for the invalidation pipeline, kept out of main so it
//! can be exercised with fake collaborators: list (or accept a raw
//! path), filter, build the plan, then either stop at the dry-run gate
//! or submit.

use serde::Serialize;

use repopurge_aws::{Invalidator, ObjectLister};
use repopurge_core::plan::to_invalidation_path;
use repopurge_core::{
    is_versioned, AppError, AppResult, FilterCriteria, InvalidationPlan, RepoTarget,
};

/// Everything one invocation needs beyond its collaborators.
pub struct RunRequest {
    pub target: RepoTarget,
    pub criteria: FilterCriteria,
    /// When set, skip listing and filtering and invalidate exactly this path
    pub raw_path: Option<String>,
    pub dry_run: bool,
}

/// How the run ended. Errors abort the run before anything is submitted.
#[derive(Debug)]
pub enum RunOutcome {
    /// The plan was computed and reported but not submitted
    DryRun(InvalidationPlan),
    /// The invalidation was created; `location` is the CDN's identifier
    Submitted {
        plan: InvalidationPlan,
        location: String,
    },
}

/// Run the full pipeline. The dry-run gate is checked last, after all
/// filtering, so a dry-run report reflects the true final object set.
pub async fn run(
    lister: &dyn ObjectLister,
    invalidator: &dyn Invalidator,
    request: RunRequest,
) -> AppResult<RunOutcome> {
    let paths = match &request.raw_path {
        Some(raw) => vec![raw.clone()],
        None => {
            let keys = lister.list_keys(&request.target.bucket).await?;
            let candidates: Vec<String> =
                keys.iter().map(|k| to_invalidation_path(k)).collect();

            if request.criteria.exclude_versioned {
                let unversioned =
                    candidates.iter().filter(|p| !is_versioned(p)).count();
                tracing::info!(
                    unversioned = unversioned,
                    total = candidates.len(),
                    "Found unversioned objects"
                );
            }

            let survivors = request.criteria.apply(&candidates);
            if survivors.is_empty() {
                return Err(AppError::NoMatchingObjects {
                    bucket: request.target.bucket.clone(),
                });
            }
            survivors
        }
    };

    let plan = InvalidationPlan::new(&request.target, paths);
    tracing::info!(
        distribution_id = %plan.distribution_id,
        path_count = plan.paths.len(),
        "Invalidation plan ready"
    );

    if request.dry_run {
        tracing::info!("Dry run: no invalidation created");
        return Ok(RunOutcome::DryRun(plan));
    }

    let location = invalidator.create_invalidation(&plan).await?;
    Ok(RunOutcome::Submitted { plan, location })
}

/// Final report printed for both dry runs and successful submissions.
#[derive(Serialize)]
pub struct InvalidationReport<'a> {
    pub bucket: &'a str,
    pub distribution_id: &'a str,
    pub dry_run: bool,
    pub object_count: usize,
    pub caller_reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    pub paths: &'a [String],
}

impl<'a> InvalidationReport<'a> {
    pub fn new(
        target: &'a RepoTarget,
        plan: &'a InvalidationPlan,
        location: Option<&'a str>,
    ) -> Self {
        InvalidationReport {
            bucket: &target.bucket,
            distribution_id: &plan.distribution_id,
            dry_run: location.is_none(),
            object_count: plan.paths.len(),
            caller_reference: &plan.caller_reference,
            location,
            paths: &plan.paths,
        }
    }
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
