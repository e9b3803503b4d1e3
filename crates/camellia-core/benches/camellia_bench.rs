use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use camellia_core::{derive_schedule, encrypt_blocks};

fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");
    for key_len in [16usize, 24, 32] {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        let mut key = vec![0u8; key_len];
        rng.fill_bytes(&mut key);
        group.bench_function(format!("derive_{}bit", key_len * 8), |b| {
            b.iter(|| derive_schedule(&key).unwrap());
        });
    }
    group.finish();
}

fn bench_encrypt(c: &mut Criterion) {
    const BLOCKS: usize = 256;

    let mut group = c.benchmark_group("encrypt");
    group.throughput(Throughput::Bytes((16 * BLOCKS) as u64));
    for key_len in [16usize, 24, 32] {
        let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
        let mut key = vec![0u8; key_len];
        rng.fill_bytes(&mut key);
        let schedule = derive_schedule(&key).unwrap();

        let mut input = vec![0u8; 16 * BLOCKS];
        rng.fill_bytes(&mut input);
        let mut output = vec![0u8; input.len()];

        group.bench_function(format!("{}bit_{}blocks", key_len * 8, BLOCKS), |b| {
            b.iter(|| encrypt_blocks(&schedule, &input, &mut output, BLOCKS));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_schedule, bench_encrypt);
criterion_main!(benches);
