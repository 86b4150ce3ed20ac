/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use numc::{linalg, Matrix, RandomFill};

const SIZES: [usize; 3] = [16, 64, 128];

fn random_square(n: usize, seed: u64) -> Matrix {
    Matrix::random(n, n, &RandomFill::new(seed, -1.0, 1.0)).unwrap()
}

pub(crate) fn benchmark_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for n in SIZES {
        let a = random_square(n, 0xc0ff33);
        let b = random_square(n, 0xbeef);
        let result = Matrix::allocate(n, n).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |f, _| {
            f.iter(|| linalg::multiply(black_box(&result), black_box(&a), black_box(&b)).unwrap())
        });
    }
    group.finish();
}

/// Multiplication into one of the operands, which pays for a snapshot every call.
pub(crate) fn benchmark_multiply_aliased(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply-aliased");
    for n in SIZES {
        let a = random_square(n, 0xc0ff33);
        let b = random_square(n, 0xbeef);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |f, _| {
            f.iter(|| linalg::multiply(black_box(&a), black_box(&a), black_box(&b)).unwrap())
        });
    }
    group.finish();
}

pub(crate) fn benchmark_power(c: &mut Criterion) {
    let mut group = c.benchmark_group("power");
    let n = 32;
    // Keep the entries small so repeated products stay finite.
    let a = Matrix::random(n, n, &RandomFill::new(7, -0.05, 0.05)).unwrap();
    let result = Matrix::allocate(n, n).unwrap();
    for exponent in [1i64, 8, 32] {
        group.bench_with_input(
            BenchmarkId::from_parameter(exponent),
            &exponent,
            |f, &exponent| {
                f.iter(|| linalg::power(black_box(&result), black_box(&a), exponent).unwrap())
            },
        );
    }
    group.finish();
}
