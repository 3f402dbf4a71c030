use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vrange_semver::constraint::tokenize;
use vrange_semver::{evaluator, Comparator, Constraint, Semver, Version};

fn bench_compare(c: &mut Criterion) {
    let cases: Vec<(Version, Version)> = [
        ("1.2.3", "1.2.4"),
        ("2.4.0-alpha", "2.4.0"),
        ("1.0.0-alpha.1", "1.0.0-alpha.beta"),
        ("1.0.0-beta.2", "1.0.0-beta.11"),
        ("1.2.3+build.1", "1.2.3+build.2"),
        ("10.0.0", "9.99.99"),
    ]
    .iter()
    .map(|(a, b)| (a.parse().unwrap(), b.parse().unwrap()))
    .collect();

    c.bench_function("compare", |b| {
        b.iter(|| {
            for (left, right) in &cases {
                black_box(Comparator::compare(black_box(left), black_box(right), false));
            }
        })
    });
}

fn bench_parse_version(c: &mut Criterion) {
    let versions = [
        "v1.2.3",
        "1.2.3-beta.1",
        "2.4.0+build.5",
        "1.0.0-alpha.beta.1+exp.sha.5114f85",
        "10.20.30",
    ];

    c.bench_function("parse_versions", |b| {
        b.iter(|| {
            for version in versions {
                black_box(Version::parse(black_box(version)).ok());
            }
        })
    });
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter(|| black_box(tokenize(black_box(">=1.2.3 && <2.0.0 || ^3.1 || 4.0.0 - 4.5"))))
    });
}

fn bench_parse_constraints(c: &mut Criterion) {
    let constraints = [
        ">=1.2.3 <2.0.0",
        "^1.2.3 || ~2.4",
        "1.2.* || 2.*",
        "1.2.3 - 2.0.0",
        ">=1.0.0 && <3.0.0 || >=4.0.0",
        "*",
    ];

    c.bench_function("parse_constraints", |b| {
        b.iter(|| {
            for constraint in constraints {
                black_box(Constraint::parse(black_box(constraint)).ok());
            }
        })
    });
}

fn bench_satisfies(c: &mut Criterion) {
    let cases = [
        ("1.2.3", "^1.2.0"),
        ("1.2.3-beta", "^1.2.3"),
        ("2.4.5", "~2.4"),
        ("1.2.3", ">=1.2.3 <2.0.0"),
        ("1.9999.9999", "<2.0.0"),
        ("1.2.3", "1.2.* || 2.*"),
    ];

    c.bench_function("semver_satisfies", |b| {
        b.iter(|| {
            for (version, constraint) in cases {
                black_box(Semver::satisfies(black_box(version), black_box(constraint)));
            }
        })
    });
}

fn bench_satisfies_parsed(c: &mut Criterion) {
    let versions: Vec<Version> = [
        "1.2.3",
        "1.2.3-beta",
        "2.4.5",
        "1.9999.9999",
        "1.9.0",
        "2.0.0",
    ]
    .iter()
    .map(|v| v.parse().unwrap())
    .collect();

    let parsed = Constraint::parse("^1.2 || >=3.0.0 <3.5.0").expect("parse constraint");

    c.bench_function("semver_satisfies_parsed", |b| {
        b.iter(|| {
            for version in &versions {
                black_box(evaluator::satisfies(black_box(version), black_box(&parsed), false));
            }
        })
    });
}

fn bench_sort(c: &mut Criterion) {
    let versions = vec![
        "1.0.0",
        "0.1.0",
        "0.1.1",
        "3.2.1",
        "2.4.0-alpha",
        "2.4.0",
        "50.2.0",
        "1.2.3",
        "2.4.5",
        "2.4.5-rc.1",
    ];

    c.bench_function("semver_sort", |b| {
        b.iter(|| {
            black_box(Semver::sort(black_box(&versions)).ok());
        })
    });
}

criterion_group!(
    benches,
    bench_compare,
    bench_parse_version,
    bench_tokenize,
    bench_parse_constraints,
    bench_satisfies,
    bench_satisfies_parsed,
    bench_sort
);
criterion_main!(benches);
