use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weave_core::{Context, Inflater, Registry, State, View};
use weave_ui::prelude::*;

const SECTION_COUNT: usize = 4;
const ROWS_PER_SECTION: usize = 32;
const ROW_SAMPLES: &[usize] = &[8, 16, 32, 64];

#[derive(Clone, Slots)]
struct Row {
    section: usize,
    row: usize,
    selected: State<bool>,
}

impl View for Row {
    type Body = Flexbox;
    const REUSABLE: bool = true;

    fn should_reuse(&self, previous: &Self) -> bool {
        self.section == previous.section && self.row == previous.row
    }

    fn body(&self, _cx: &Context<Self>) -> Flexbox {
        let title = format!("Item {}-{} title", self.section, self.row);
        Flexbox::row()
            .flex_child(
                FlexChild::new(ComponentView::new("Label").attribute("text", title)).grow(1.0),
            )
            .child(
                ComponentView::new("Label")
                    .attribute("text", format!("Detail {}-{}", self.section, self.row))
                    .padding(4.0),
            )
            .background_color(if self.selected.get() {
                Color::BLACK
            } else {
                Color::WHITE
            })
    }
}

fn content(sections: usize, rows_per_section: usize) -> Flexbox {
    (0..sections).fold(Flexbox::column(), |root, section| {
        let rows = (0..rows_per_section).map(|row| {
            FlexChild::new(Row {
                section,
                row,
                selected: State::new(|| false),
            })
        });
        root.child(
            Flexbox::column()
                .child(ComponentView::new("Label").attribute("text", format!("Section {section}")))
                .children(rows),
        )
    })
}

fn bench_first_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflate_first_pass");
    for &rows in ROW_SAMPLES {
        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, &rows| {
            let root = content(SECTION_COUNT, rows);
            b.iter(|| {
                let registry = Registry::new();
                black_box(Inflater::render(&registry, &root));
            });
        });
    }
    group.finish();
}

fn bench_steady_state(c: &mut Criterion) {
    let registry = Registry::new();
    // Warm up so rows are reused rather than created.
    Inflater::render(&registry, &content(SECTION_COUNT, ROWS_PER_SECTION));
    c.bench_function("inflate_steady_state", |b| {
        b.iter(|| {
            let root = content(SECTION_COUNT, ROWS_PER_SECTION);
            black_box(Inflater::render(&registry, &root));
        });
    });
}

criterion_group!(benches, bench_first_pass, bench_steady_state);
criterion_main!(benches);
