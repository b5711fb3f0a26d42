//! Performance benchmarks for normalizing large inventories.
//!
//! Run with: cargo bench --bench large_snapshot

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sbom_prep::model::{Data, File, Package};
use sbom_prep::pipeline::build_license_expr;
use sbom_prep::{Normalizer, SpdxExpressionResolver};
use std::hint::black_box;

const LICENSES: &[&[&str]] = &[
    &["Apache-2.0"],
    &["MIT", "Apache-2.0"],
    &["MIT OR BSD-3-Clause", "GPL-2.0"],
    &["LicenseRef-Nordic-5-Clause"],
    &[],
    &["Vendor EULA (see LICENSE)", "mit"],
    &["GPL-2.0-or-later WITH Linux-syscall-note"],
];

/// Generate a snapshot with `files` files spread over `packages` packages.
fn generate_snapshot(files: usize, packages: usize) -> Data {
    let mut data = Data::new();
    for i in 0..packages {
        data.add_package(
            Package::new(format!("pkg-{i}"))
                .with_url(format!("https://github.com/org/repo-{}.git", i % (packages / 2 + 1)))
                .with_version(format!("1.{}", i % 7)),
        );
    }
    for i in 0..files {
        data.add_file(
            File::new(
                format!("src/{}/file-{}.c", i % 97, files - i),
                format!("pkg-{}", i % packages),
                LICENSES[i % LICENSES.len()].iter().copied(),
            )
            .with_detector("spdx-tag"),
        );
    }
    data
}

fn bench_pre_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("pre_process");
    let normalizer = Normalizer::new();

    for size in [1_000, 10_000, 50_000] {
        let data = generate_snapshot(size, size / 100 + 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut data = data.clone();
                let stats = normalizer.run(black_box(&mut data));
                black_box(stats)
            });
        });
    }

    group.finish();
}

fn bench_license_expr(c: &mut Criterion) {
    let resolver = SpdxExpressionResolver::new();
    let tokens = ["MIT OR BSD-3-Clause", "GPL-2.0", "mit", "Apache-2.0 AND MIT"];

    c.bench_function("build_license_expr", |b| {
        b.iter(|| black_box(build_license_expr(black_box(&tokens), &resolver)));
    });
}

criterion_group!(benches, bench_pre_process, bench_license_expr);
criterion_main!(benches);
