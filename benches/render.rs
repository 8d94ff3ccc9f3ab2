//! Criterion benchmarks for snapshot decoding and panel rendering.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use improv_scoreboard::prelude::*;

fn make_payload(rounds: usize) -> Vec<u8> {
    let snapshot = ScoreboardSnapshot {
        player_name: Some("Alex".to_string()),
        current_round: rounds as i64,
        max_rounds: rounds as i64,
        phase: "reacting".to_string(),
        rounds: (1..=rounds)
            .map(|n| RoundResult {
                round: n as i64,
                scenario: "You are a ghost trying to haunt a house, but the new owners are really into it."
                    .to_string(),
                critique: "Committed to the bit and kept escalating; the ending landed.".to_string(),
                rating: if n % 2 == 0 { "Great" } else { "Okay" }.to_string(),
            })
            .collect(),
    };
    serde_json::to_vec(&snapshot).unwrap()
}

/// Decode + build the panel, the work done per inbound message.
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_message");

    for rounds in [1usize, 3, 10, 50].iter() {
        let payload = make_payload(*rounds);
        group.throughput(Throughput::Bytes(payload.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(rounds), &payload, |b, payload| {
            let mut model = ScoreboardModel::new(&ScoreboardConfig::default());
            let msg = DataMessage::new(SCOREBOARD_TOPIC, payload.clone());
            b.iter(|| {
                model.apply(black_box(&msg));
                black_box(model.panel())
            });
        });
    }

    group.finish();
}

fn bench_renderers(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let snapshot = decode_payload(&make_payload(10)).unwrap();
    let panel = PanelView::from_snapshot(&snapshot, "Improv Battle").unwrap();

    group.bench_function("html", |b| b.iter(|| black_box(render_html(black_box(&panel)))));
    group.bench_function("text", |b| {
        b.iter(|| black_box(render_text(black_box(&panel), 44, 2)))
    });

    group.finish();
}

criterion_group!(benches, bench_apply, bench_renderers);
criterion_main!(benches);
