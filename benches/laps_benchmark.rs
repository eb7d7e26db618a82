use criterion::{black_box, criterion_group, criterion_main, Criterion};
use split_timer::models::Activity;
use split_timer::services::timer::{SplitTimer, DEFAULT_QUIET_PERIOD_MS};
use split_timer::time_utils::format_duration;

fn benchmark_laps(c: &mut Criterion) {
    // A long interval session: 2,000 laps of roughly 72 seconds
    let mut activity = Activity::new("bench".to_string(), 0);
    let mut now = 1_704_067_200_000_i64;
    for i in 0..2_001 {
        activity.splits.push(now);
        now += 72_000 + (i % 7) * 113;
    }
    let timer = SplitTimer::new(activity.clone());

    let mut group = c.benchmark_group("laps");

    group.bench_function("derive_laps", |b| b.iter(|| black_box(&activity).laps()));

    group.bench_function("redraw_display", |b| {
        b.iter(|| timer.display(black_box(now), DEFAULT_QUIET_PERIOD_MS))
    });

    group.bench_function("format_duration", |b| {
        b.iter(|| format_duration(black_box(123_456.0)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_laps);
criterion_main!(benches);
