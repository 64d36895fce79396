//! Pipeline orchestration tests with fake collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use repopurge_aws::{Invalidator, ObjectLister};
use repopurge_cli::{run, RunOutcome, RunRequest};
use repopurge_core::{AppError, AppResult, FilterCriteria, InvalidationPlan, RepoTarget};

struct FakeLister {
    keys: Vec<&'static str>,
    calls: AtomicUsize,
    fail_with: Option<&'static str>,
}

impl FakeLister {
    fn with_keys(keys: Vec<&'static str>) -> Self {
        FakeLister {
            keys,
            calls: AtomicUsize::new(0),
            fail_with: None,
        }
    }

    fn failing(message: &'static str) -> Self {
        FakeLister {
            keys: Vec::new(),
            calls: AtomicUsize::new(0),
            fail_with: Some(message),
        }
    }
}

#[async_trait]
impl ObjectLister for FakeLister {
    async fn list_keys(&self, _bucket: &str) -> AppResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_with {
            return Err(AppError::collaborator("S3 ListObjectsV2", message));
        }
        Ok(self.keys.iter().map(|k| k.to_string()).collect())
    }
}

#[derive(Default)]
struct FakeInvalidator {
    calls: AtomicUsize,
    submitted: Mutex<Option<InvalidationPlan>>,
}

#[async_trait]
impl Invalidator for FakeInvalidator {
    async fn create_invalidation(&self, plan: &InvalidationPlan) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.submitted.lock().unwrap() = Some(plan.clone());
        Ok(format!(
            "/2020-05-31/distribution/{}/invalidation/I2J3K4L5M6N7O8",
            plan.distribution_id
        ))
    }
}

fn target() -> RepoTarget {
    RepoTarget {
        bucket: "apt.stage.pkgcdn.net".to_string(),
        distribution_id: "E1B7Q2J8KXV4TN".to_string(),
    }
}

fn request(criteria: FilterCriteria, raw_path: Option<&str>, dry_run: bool) -> RunRequest {
    RunRequest {
        target: target(),
        criteria,
        raw_path: raw_path.map(|p| p.to_string()),
        dry_run,
    }
}

#[tokio::test]
async fn lists_filters_and_submits() {
    let lister = FakeLister::with_keys(vec![
        "dists/stable/Release",
        "pool/p/pkg-1.0.deb",
        "pool/p/pkg.deb",
    ]);
    let invalidator = FakeInvalidator::default();
    let criteria = FilterCriteria::from_args(true, "", "pkg").unwrap();

    let outcome = run(&lister, &invalidator, request(criteria, None, false))
        .await
        .unwrap();

    match outcome {
        RunOutcome::Submitted { plan, location } => {
            assert_eq!(plan.paths, vec!["/pool/p/pkg.deb".to_string()]);
            assert!(location.contains("E1B7Q2J8KXV4TN"));
        }
        RunOutcome::DryRun(_) => panic!("expected submission"),
    }
    assert_eq!(invalidator.calls.load(Ordering::SeqCst), 1);
    let submitted = invalidator.submitted.lock().unwrap().clone().unwrap();
    assert_eq!(submitted.paths, vec!["/pool/p/pkg.deb".to_string()]);
}

#[tokio::test]
async fn raw_path_bypasses_listing_and_filtering() {
    let lister = FakeLister::with_keys(vec!["pool/p/pkg.deb"]);
    let invalidator = FakeInvalidator::default();
    // Filters are supplied but must be ignored in bypass mode.
    let criteria = FilterCriteria::from_args(true, "never-matches", "nor-this").unwrap();

    let outcome = run(
        &lister,
        &invalidator,
        request(criteria, Some("/manual/path"), false),
    )
    .await
    .unwrap();

    match outcome {
        RunOutcome::Submitted { plan, .. } => {
            assert_eq!(plan.paths, vec!["/manual/path".to_string()]);
        }
        RunOutcome::DryRun(_) => panic!("expected submission"),
    }
    assert_eq!(lister.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_filter_result_aborts_before_submission() {
    let lister = FakeLister::with_keys(vec!["pool/p/pkg-1.0.deb", "pool/p/tool-2.deb"]);
    let invalidator = FakeInvalidator::default();
    // Everything is versioned, so the default posture drops it all.
    let criteria = FilterCriteria::from_args(true, "", "").unwrap();

    let err = run(&lister, &invalidator, request(criteria, None, false))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NoMatchingObjects { ref bucket } if bucket == "apt.stage.pkgcdn.net"));
    assert_eq!(invalidator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn dry_run_computes_the_plan_but_never_submits() {
    let lister = FakeLister::with_keys(vec![
        "dists/stable/Release",
        "dists/stable/InRelease",
        "pool/p/pkg-1.0.deb",
    ]);
    let invalidator = FakeInvalidator::default();
    let criteria = FilterCriteria::from_args(true, "", "").unwrap();

    let outcome = run(&lister, &invalidator, request(criteria, None, true))
        .await
        .unwrap();

    match outcome {
        RunOutcome::DryRun(plan) => {
            assert_eq!(
                plan.paths,
                vec![
                    "/dists/stable/Release".to_string(),
                    "/dists/stable/InRelease".to_string(),
                ]
            );
            assert!(plan.caller_reference.starts_with("repopurge:"));
        }
        RunOutcome::Submitted { .. } => panic!("dry run must not submit"),
    }
    assert_eq!(invalidator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn listing_failure_propagates_unchanged() {
    let lister = FakeLister::failing("access denied");
    let invalidator = FakeInvalidator::default();
    let criteria = FilterCriteria::from_args(true, "", "").unwrap();

    let err = run(&lister, &invalidator, request(criteria, None, false))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "S3 ListObjectsV2 request failed: access denied"
    );
    assert_eq!(invalidator.calls.load(Ordering::SeqCst), 0);
}
