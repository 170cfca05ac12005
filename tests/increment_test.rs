// tests/increment_test.rs
use repo_version::cli::increase_version;
use repo_version::domain::Tick;
use repo_version::git::{MockRepository, Repository};
use repo_version::planner::{IncrementPlanner, PlanState, TickRequest};
use repo_version::VersionError;

const MESSAGE: &str = "Version {tag}";

fn repo() -> MockRepository {
    let mut repo = MockRepository::new("/repos/app");
    repo.set_head(
        "1111111aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        1_500_000_000,
        "Jane Doe",
        "initial commit",
    );
    repo
}

fn increase(repo: &MockRepository, request: TickRequest) -> repo_version::Result<String> {
    let planner = IncrementPlanner::new(request)?;
    let outcome = increase_version(repo, planner, MESSAGE, |_| Ok(true))?;
    assert_eq!(outcome.state, PlanState::Applied);
    Ok(outcome.plan.tag_name())
}

#[test]
fn test_first_version_is_patch_on_sentinel() {
    let repo = repo();
    assert_eq!(increase(&repo, TickRequest::default()).unwrap(), "v0.0.1");

    let created = repo.created_tags();
    assert_eq!(created[0].message, "Version v0.0.1");
    assert_eq!(created[0].commit, "1111111aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
}

#[test]
fn test_conflicting_ticks_touch_nothing() {
    let request = TickRequest {
        major: true,
        minor: true,
        ..Default::default()
    };
    let err = IncrementPlanner::new(request).unwrap_err();
    assert!(matches!(err, VersionError::Config(_)));
}

#[test]
fn test_successive_increases_strictly_increase() {
    let mut repo = repo();
    let mut previous = repo_version::analyzer::collect_versions(&repo)
        .unwrap()
        .highest();

    let steps = [
        (TickRequest::tick(Tick::Patch), "v0.0.1"),
        (TickRequest::tick(Tick::Minor).with_special("rc.1"), "v0.1.0-rc.1"),
        (TickRequest::default().with_special("rc.2"), "v0.1.0-rc.2"),
        (TickRequest::tick(Tick::Minor), "v0.2.0"),
        (TickRequest::tick(Tick::Major), "v1.0.0"),
    ];

    for (i, (request, expected)) in steps.into_iter().enumerate() {
        let hash = format!("{}{:039}", i + 2, 0);
        repo.set_head(&hash, 1_500_000_100 + i as i64, "Jane Doe", "change");

        assert_eq!(increase(&repo, request).unwrap(), expected);

        let highest = repo_version::analyzer::collect_versions(&repo)
            .unwrap()
            .highest();
        assert!(highest.larger(&previous), "{} > {}", highest, previous);
        assert_eq!(highest.to_string(), expected);
        previous = highest;
    }
}

#[test]
fn test_head_already_versioned() {
    let mut repo = repo();
    increase(&repo, TickRequest::default()).unwrap();
    repo.set_head(
        "1111111aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        1_500_000_000,
        "Jane Doe",
        "initial commit",
    );

    let err = increase(&repo, TickRequest::tick(Tick::Minor)).unwrap_err();
    assert!(matches!(err, VersionError::AlreadyVersioned { .. }));
    assert_eq!(repo.created_tags().len(), 1);
}

#[test]
fn test_special_lower_than_release_is_rejected() {
    let mut repo = MockRepository::new("/repos/app");
    repo.add_tag("a1b2c3d", 1_400_000_000, "v1.0.0");
    repo.set_head(
        "2222222bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
        1_500_000_000,
        "Jane Doe",
        "fix",
    );

    let err = increase(&repo, TickRequest::default().with_special("rc1")).unwrap_err();
    match err {
        VersionError::Monotonicity { candidate, current } => {
            assert_eq!(candidate, "v1.0.0-rc1");
            assert_eq!(current, "v1.0.0");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(repo.created_tags().is_empty());
}

#[test]
fn test_special_with_tick_is_accepted() {
    let mut repo = MockRepository::new("/repos/app");
    repo.add_tag("a1b2c3d", 1_400_000_000, "v1.0.0");
    repo.set_head(
        "2222222bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
        1_500_000_000,
        "Jane Doe",
        "fix",
    );

    let request = TickRequest::tick(Tick::Patch)
        .with_special("rc1")
        .with_build("ci.42");
    assert_eq!(increase(&repo, request).unwrap(), "v1.0.1-rc1+ci.42");
}

#[test]
fn test_declined_confirmation_writes_nothing() {
    let repo = repo();
    let planner = IncrementPlanner::new(TickRequest::default()).unwrap();

    let outcome = increase_version(&repo, planner, MESSAGE, |plan| {
        assert_eq!(plan.tag_name(), "v0.0.1");
        assert_eq!(plan.branch.name, "main");
        Ok(false)
    })
    .unwrap();

    assert_eq!(outcome.state, PlanState::Aborted);
    assert!(!outcome.applied());
    assert!(repo.created_tags().is_empty());
    assert!(repo.tag_history().unwrap().is_empty());
}

#[test]
fn test_unreadable_history_aborts() {
    let repo = repo().unreadable();
    let err = increase(&repo, TickRequest::default()).unwrap_err();
    assert!(matches!(err, VersionError::Repository { .. }));
    assert!(repo.created_tags().is_empty());
}

#[test]
fn test_version_like_branch_name_does_not_block_increase() {
    let mut repo = MockRepository::new("/repos/app");
    repo.add_tag("a1b2c3d", 1_400_000_000, "v1.0.0");
    repo.set_branch_listing("* release/v2.0.0\n  main\n");
    repo.set_head(
        "ffff111cccccccccccccccccccccccccccccccc",
        1_500_000_000,
        "Jane Doe",
        "prepare release",
    );

    assert_eq!(increase(&repo, TickRequest::default()).unwrap(), "v1.0.1");
}

#[test]
fn test_tick_beyond_largest_number_is_rejected() {
    let mut repo = MockRepository::new("/repos/app");
    repo.add_tag("a1b2c3d", 1_400_000_000, "v18446744073709551615.0.0");
    repo.set_head(
        "2222222bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
        1_500_000_000,
        "Jane Doe",
        "fix",
    );

    let err = increase(&repo, TickRequest::tick(Tick::Major)).unwrap_err();
    assert!(matches!(err, VersionError::Parse(_)));
    assert!(repo.created_tags().is_empty());

    assert_eq!(
        increase(&repo, TickRequest::tick(Tick::Minor)).unwrap(),
        "v18446744073709551615.1.0"
    );
}
