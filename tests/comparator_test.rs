// tests/comparator_test.rs
use repo_version::domain::{larger, parse_tag_text, VersionRecord};

fn v(major: u64, minor: u64, patch: u64, special: &str) -> VersionRecord {
    VersionRecord::new(major, minor, patch).with_special(special)
}

#[test]
fn test_larger_table() {
    let cases = [
        (v(0, 0, 1, ""), v(0, 0, 0, ""), true),
        (v(0, 0, 0, ""), v(0, 0, 1, ""), false),
        (v(0, 1, 0, ""), v(0, 0, 10, ""), true),
        (v(10, 1, 3, ""), v(0, 10, 10, ""), true),
        (v(10, 100, 300, ""), v(20, 10, 10, ""), false),
        (v(1, 0, 0, ""), v(1, 0, 0, "rc1"), true),
        (v(1, 0, 0, ""), v(1, 0, 0, "alpha.rc1"), true),
        (v(1, 0, 0, "alpha.rc2"), v(1, 0, 0, "beta.rc1"), false),
        (v(1, 0, 0, "alpha"), v(1, 0, 0, "beta.rc1"), false),
        (v(1, 0, 0, "beta"), v(1, 0, 0, "beta.rc1"), false),
        (v(1, 0, 0, "gamma"), v(1, 0, 0, "beta.rc1"), true),
        (v(1, 0, 0, "gamma.rc2"), v(1, 0, 0, "beta.rc3"), true),
        (v(1, 0, 0, "beta.1.rc2"), v(1, 0, 0, "beta.rc1.1"), false),
        (v(1, 0, 0, ""), v(1, 0, 1, "alpha.rc1"), false),
    ];

    for (i, (a, b, expected)) in cases.iter().enumerate() {
        assert_eq!(
            larger(a, b),
            *expected,
            "case {}: larger({}, {})",
            i + 1,
            a,
            b
        );
    }
}

#[test]
fn test_semver_prerelease_chain() {
    let chain = [
        "alpha",
        "alpha.1",
        "alpha.beta",
        "beta",
        "beta.2",
        "beta.11",
        "rc.1",
    ];

    for pair in chain.windows(2) {
        let lower = v(1, 0, 0, pair[0]);
        let higher = v(1, 0, 0, pair[1]);
        assert!(larger(&higher, &lower), "{} > {}", pair[1], pair[0]);
        assert!(!larger(&lower, &higher), "{} < {}", pair[0], pair[1]);
    }
    assert!(larger(&v(1, 0, 0, ""), &v(1, 0, 0, "rc.1")));
}

#[test]
fn test_larger_is_antisymmetric_and_irreflexive() {
    let records = [
        v(0, 0, 0, ""),
        v(1, 0, 0, "alpha").at_commit("a", 10),
        v(1, 0, 0, "alpha").at_commit("b", 20),
        v(1, 0, 0, "alpha-1"),
        v(1, 0, 0, "alpha.1"),
        v(1, 0, 0, ""),
        v(1, 2, 0, "rc.1").with_build("7"),
        v(2, 0, 0, ""),
    ];

    for a in &records {
        assert!(!larger(a, a), "{} larger than itself", a);
        for b in &records {
            assert!(!(larger(a, b) && larger(b, a)), "{} and {}", a, b);
        }
    }
}

#[test]
fn test_larger_is_transitive() {
    let records = [
        v(1, 0, 0, "alpha"),
        v(1, 0, 0, "alpha.1"),
        v(1, 0, 0, "beta"),
        v(1, 0, 0, ""),
        v(1, 0, 1, "rc1"),
        v(1, 1, 0, ""),
    ];

    for a in &records {
        for b in &records {
            for c in &records {
                if larger(a, b) && larger(b, c) {
                    assert!(larger(a, c), "{} > {} > {}", a, b, c);
                }
            }
        }
    }
}

#[test]
fn test_build_metadata_is_ignored() {
    let a = v(1, 0, 0, "rc1").with_build("zzz").at_commit("a", 100);
    let b = v(1, 0, 0, "rc1").with_build("aaa").at_commit("b", 100);
    assert!(!larger(&a, &b));
    assert!(!larger(&b, &a));
}

#[test]
fn test_display_parses_back() {
    let records = [
        v(0, 0, 1, ""),
        v(1, 2, 3, "rc1"),
        v(4, 0, 12, "alpha.beta-2").with_build("exp.sha.5114f85"),
        v(1, 0, 0, "").with_build("b5"),
    ];

    for record in &records {
        let text = record.to_string();
        let parsed = parse_tag_text(&text).unwrap();
        assert_eq!(parsed.to_string(), text);
        assert_eq!(parsed.precedence(record), std::cmp::Ordering::Equal);
    }
}
