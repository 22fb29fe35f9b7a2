//! Benchmarks for state transitions.

use std::rc::Rc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use folio::app::{Message, Model, update};
use folio::content::Page;
use folio::input::Key;
use folio::markdown::ComrakRenderer;

fn create_model() -> Model {
    let pages = vec![
        Page::new(1, "Intro", include_str!("../assets/pages/1 - Intro.md")),
        Page::new(2, "Skills", include_str!("../assets/pages/2 - Skills.md")),
        Page::new(3, "Contact", include_str!("../assets/pages/3 - Contact.md")),
    ];
    let themes = vec!["dark".to_string(), "light".to_string()];
    let model = Model::new(pages, themes, Rc::new(ComrakRenderer::default()))
        .expect("non-empty pages and themes");
    update(model, Message::Resize(100, 40)).0
}

fn bench_page_switch(c: &mut Criterion) {
    let mut model = Some(create_model());
    c.bench_function("page_switch", |b| {
        b.iter(|| {
            let current = model.take().expect("model present");
            let (next, effects) = update(current, black_box(Message::KeyPress(Key::Next)));
            black_box(effects);
            model = Some(next);
        })
    });
}

fn bench_scroll(c: &mut Criterion) {
    let mut model = Some(create_model());
    c.bench_function("scroll_down", |b| {
        b.iter(|| {
            let current = model.take().expect("model present");
            let (next, _) = update(current, black_box(Message::MouseWheel(3)));
            model = Some(next);
        })
    });
}

criterion_group!(benches, bench_page_switch, bench_scroll);
criterion_main!(benches);
