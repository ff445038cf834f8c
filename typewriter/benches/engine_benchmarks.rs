use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use typewriter::{Config, Duration, Typewriter};

fn benchmark_looping_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("looping_ticks");

    let test_cases = vec![
        (1, 10, 1_000),     // Short single text
        (3, 40, 10_000),    // A few sentences
        (10, 200, 100_000), // Many long texts
    ];

    for (texts, length, ticks) in test_cases {
        let config = Config::new(
            (0..texts)
                .map(|i| "x".repeat(length + i))
                .collect::<Vec<String>>(),
        )
        .with_speed(10)
        .with_loop(true)
        .with_loop_delay(0);

        group.bench_with_input(
            BenchmarkId::new("run", format!("{texts}texts_{length}chars_{ticks}ticks")),
            &(config, ticks),
            |b, (config, ticks)| {
                b.iter(|| {
                    let mut engine = Typewriter::new(config.clone()).unwrap();
                    engine.start();
                    black_box(engine.run_until_idle(black_box(*ticks)))
                })
            },
        );
    }

    group.finish();
}

fn benchmark_frame_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_advance");

    // Roughly one minute of animation at 60 frames per second
    let frame = Duration::from_micros(16_667);
    let frames = 3_600;

    group.bench_function("sixty_fps_minute", |b| {
        b.iter(|| {
            let config = Config::new(["Hello, world!", "Welcome to my site", "Enjoy"])
                .with_speed(80)
                .with_loop(true);
            let mut engine = Typewriter::new(config).unwrap();
            engine.start();

            for _ in 0..frames {
                black_box(engine.advance(black_box(frame)));
            }
            black_box(engine.display_text().len())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_looping_ticks, benchmark_frame_advance);
criterion_main!(benches);
