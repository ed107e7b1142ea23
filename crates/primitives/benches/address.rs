#![allow(missing_docs)]
use alloy_primitives::B256;
use blockgraph_primitives::{Codec, ContentAddress, Hasher};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::prelude::*;

pub fn address_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("address");
    let mut rng = rand::rng();

    let addresses: Vec<ContentAddress> = (0..1000)
        .map(|_| {
            let mut bytes = [0u8; 32];
            rng.fill(&mut bytes);
            ContentAddress::from_digest(Codec::BitcoinTx, B256::from(bytes))
        })
        .collect();

    group.bench_function("to_bytes", |b| {
        b.iter(|| {
            for address in &addresses {
                black_box(address.to_bytes());
            }
        })
    });

    let encoded: Vec<_> = addresses.iter().map(ContentAddress::to_bytes).collect();
    group.bench_function("from_bytes", |b| {
        b.iter(|| {
            for bytes in &encoded {
                black_box(ContentAddress::from_bytes(bytes).unwrap());
            }
        })
    });

    group.bench_function("display", |b| {
        b.iter(|| black_box(addresses[0].to_string()))
    });

    group.finish();
}

pub fn hasher_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("double_sha256");

    for size in [64usize, 250, 1024, 4096] {
        let data: Vec<u8> = (0..size).map(|_| rand::random::<u8>()).collect();
        group.bench_with_input(BenchmarkId::new("digest", size), &data, |b, data| {
            b.iter(|| black_box(Hasher::digest(data)))
        });
    }

    let left = B256::random();
    let right = B256::random();
    group.bench_function("digest_pair", |b| {
        b.iter(|| black_box(Hasher::digest_pair(&left, &right)))
    });

    group.finish();
}

criterion_group!(benches, address_benchmarks, hasher_benchmarks);
criterion_main!(benches);
