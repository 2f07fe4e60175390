//! Benchmarks for action decoding and a full reset/step loop.

use cantstop_gym::codec::ActionCodec;
use cantstop_gym::env::EpisodeController;
use cantstop_gym::games::simple::SimpleDiceEngineBuilder;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_decode(c: &mut Criterion) {
    let codec = ActionCodec::new(12).unwrap();
    let count = codec.action_count();

    c.bench_function("decode_all_156", |b| {
        b.iter(|| {
            for index in 0..count {
                black_box(codec.decode(black_box(index)).unwrap());
            }
        })
    });
}

fn bench_episode(c: &mut Criterion) {
    c.bench_function("simple_engine_100_steps", |b| {
        b.iter(|| {
            let builder = SimpleDiceEngineBuilder::new();
            let config = builder.env_config();
            let mut env = EpisodeController::new(builder.build(42), config).unwrap();
            env.reset().unwrap();
            for step in 0..100usize {
                let result = env.step(step % 156).unwrap();
                if result.done {
                    env.reset().unwrap();
                }
            }
        })
    });
}

criterion_group!(benches, bench_decode, bench_episode);
criterion_main!(benches);
