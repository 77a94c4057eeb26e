use altre_textarea::buffer::{navigation, CursorPosition, NavigationAction, TextBuffer};
use altre_textarea::{Action, TextArea, TextAreaConfig, Theme};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|n| format!("line {} with some words to skip over", n))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 文字入力のベンチマーク
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("type_1000_chars", |b| {
        b.iter_batched(
            TextBuffer::new,
            |mut buffer| {
                for i in 0..1000 {
                    if i % 80 == 79 {
                        buffer.insert_newline();
                    } else {
                        buffer.insert_char(black_box('x'));
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });

    let paste = sample_text(500);
    group.bench_function("paste_500_lines_mid_buffer", |b| {
        b.iter_batched(
            || {
                let mut buffer = TextBuffer::new();
                buffer.set_value(&sample_text(100));
                buffer.set_cursor(CursorPosition::at(50, 10));
                buffer
            },
            |mut buffer| buffer.insert_str(black_box(&paste)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// カーソル移動のベンチマーク
fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");
    group.measurement_time(Duration::from_secs(5));

    let mut buffer = TextBuffer::new();
    buffer.set_value(&sample_text(1000));
    let lines = buffer.lines();

    group.bench_function("word_forward_through_buffer", |b| {
        b.iter(|| {
            let mut cursor = CursorPosition::new();
            for _ in 0..2000 {
                cursor = navigation::navigate(lines, cursor, NavigationAction::WordForward);
                if cursor.column == lines[cursor.line].len() {
                    cursor = navigation::navigate(lines, cursor, NavigationAction::CharForward);
                }
            }
            black_box(cursor)
        })
    });

    group.bench_function("line_next_to_end", |b| {
        b.iter(|| {
            let mut cursor = CursorPosition::new();
            for _ in 0..1000 {
                cursor = navigation::navigate(lines, cursor, NavigationAction::LineNext);
            }
            black_box(cursor)
        })
    });

    group.finish();
}

/// 描画のベンチマーク
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let mut textarea = TextArea::new(80, 24, TextAreaConfig::default());
    textarea.focus();
    textarea.set_value(&sample_text(1000));
    textarea.execute(Action::InputEnd);
    let theme = Theme::dark();

    group.bench_function("render_ansi_80x24", |b| b.iter(|| black_box(textarea.render(&theme))));
    group.bench_function("render_lines_80x24", |b| {
        b.iter(|| black_box(textarea.render_lines(&theme)))
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_navigation, bench_render);
criterion_main!(benches);
