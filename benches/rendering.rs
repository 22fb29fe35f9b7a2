//! Benchmarks for markdown rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use folio::markdown::{ComrakRenderer, MarkdownRenderer};

fn bench_render_page(c: &mut Criterion) {
    let md = include_str!("../assets/pages/2 - Skills.md");
    let renderer = ComrakRenderer::default();

    c.bench_function("render_skills_page", |b| {
        b.iter(|| renderer.render(black_box(md), black_box(72), "dark"))
    });
}

fn bench_render_long_paragraphs(c: &mut Criterion) {
    let md = "lorem ipsum dolor sit amet consectetur adipiscing elit\n\n".repeat(200);
    let renderer = ComrakRenderer::default();

    c.bench_function("render_long_paragraphs", |b| {
        b.iter(|| renderer.render(black_box(&md), black_box(40), "dark"))
    });
}

criterion_group!(benches, bench_render_page, bench_render_long_paragraphs);
criterion_main!(benches);
