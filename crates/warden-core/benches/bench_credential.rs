//! Benchmarks for credential and token hot paths

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use warden_core::{generate_session_token, hash_password, validate_email, verify_password};

fn bench_password_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("password");
    group.sample_size(10);

    group.bench_function("hash", |b| {
        b.iter(|| hash_password(black_box("correct horse battery staple")))
    });

    let hash = hash_password("correct horse battery staple").unwrap();
    group.bench_function("verify_match", |b| {
        b.iter(|| verify_password(black_box(&hash), black_box("correct horse battery staple")))
    });
    group.bench_function("verify_mismatch", |b| {
        b.iter(|| verify_password(black_box(&hash), black_box("wrong horse")))
    });

    group.finish();
}

fn bench_session_token(c: &mut Criterion) {
    c.bench_function("session_token_generate", |b| b.iter(generate_session_token));
}

fn bench_email_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_email");
    group.bench_function("valid", |b| {
        b.iter(|| validate_email(black_box("first.last+tag@sub.example.com")))
    });
    group.bench_function("invalid", |b| {
        b.iter(|| validate_email(black_box("not an email at all")))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_password_hashing,
    bench_session_token,
    bench_email_validation
);
criterion_main!(benches);
