//! # Finality Oracle Benchmarks
//!
//! | Path | Measured |
//! |------|----------|
//! | fo-02 | payload encoding, signer recovery |
//! | fo-03 | submission to quorum, conflict routing |
//! | fo-04 | snapshot encoding |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fo_02_signature_verification::{AttestationVerifier, EcdsaAttestationVerifier};
use fo_tests::fixtures::*;
use std::time::Duration;

fn bench_signature_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("fo-02-signature-verification");
    group.measurement_time(Duration::from_secs(5));

    let signer = &signers(1)[0];
    let claim = payload(15);
    let signature = signer.sign_payload(&claim).unwrap().to_bytes();
    let verifier = EcdsaAttestationVerifier::new();

    group.bench_function("payload_signing_hash", |b| {
        b.iter(|| black_box(claim.signing_hash()))
    });
    group.bench_function("recover_signer", |b| {
        b.iter(|| black_box(verifier.recover(&claim, &signature)))
    });
    group.finish();
}

fn bench_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("fo-03-attestation-ledger");
    group.measurement_time(Duration::from_secs(5));
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for keys in [10u32, 100] {
        let oracles = signers(3);
        let submissions: Vec<_> = (0..keys)
            .flat_map(|k| {
                let mut tx = [0u8; 32];
                tx[..4].copy_from_slice(&(k + 1).to_be_bytes());
                let claim = payload_for(tx, 1, 15);
                oracles
                    .iter()
                    .map(move |oracle| submission(oracle, &claim))
                    .collect::<Vec<_>>()
            })
            .collect();

        group.throughput(Throughput::Elements(submissions.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("finalize_keys", keys),
            &submissions,
            |b, submissions| {
                b.iter_batched(
                    || {
                        let (service, _) = engine();
                        runtime.block_on(admit(&service, &oracles, TWO_ETH));
                        service
                    },
                    |service| {
                        for submission in submissions.iter().cloned() {
                            black_box(service.ledger().submit(submission).unwrap());
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("fo-04-oracle-service");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (service, _) = engine();
    let oracles = signers(3);
    runtime.block_on(admit(&service, &oracles, TWO_ETH));
    for k in 1..=200u8 {
        let claim = payload_for([k; 32], 1, 15);
        for oracle in &oracles {
            service.ledger().submit(submission(oracle, &claim)).unwrap();
        }
    }

    group.bench_function("snapshot_encode_200_proofs", |b| {
        b.iter(|| black_box(service.snapshot().encode().unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_signature_recovery,
    bench_submission,
    bench_snapshot
);
criterion_main!(benches);
