use blueprint_core::ElementPath;
use blueprint_testing::{
    frame, keyed, test_description, test_node, FixedElement, ReconcilerHarness, StackElement,
};
use blueprint_ui::{ElementResolver, IntoElement, LayoutResolver, NativeViewNode, Rect};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SECTION_COUNT: usize = 4;
const ROWS_PER_SECTION: usize = 32;
const RESOLVE_ROWS_PER_SECTION_SAMPLES: &[usize] = &[8, 16, 32, 64];
const ROOT_BOUNDS: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1080.0,
    height: 1920.0,
};

fn section_nodes(
    sections: usize,
    rows_per_section: usize,
    shift: f32,
) -> Vec<(ElementPath, NativeViewNode)> {
    (0..sections)
        .map(|section| {
            let rows = (0..rows_per_section)
                .map(|row| keyed(row, test_node(shift + row as f32)))
                .collect();
            keyed(
                section,
                NativeViewNode::new(
                    test_description(),
                    frame(0.0, section as f32 * 400.0, 1080.0, 400.0),
                    rows,
                ),
            )
        })
        .collect()
}

fn section_element(sections: usize, rows_per_section: usize) -> StackElement {
    let mut root = StackElement::layout_only(Vec::new());
    for _ in 0..sections {
        let mut section = StackElement::new(Vec::new());
        for _ in 0..rows_per_section {
            section = section.child(FixedElement::new(1080.0, 44.0));
        }
        root = root.child(section);
    }
    root
}

fn ui_object_count(sections: usize, rows_per_section: usize) -> usize {
    sections * (1 + rows_per_section)
}

fn bench_initial_build(c: &mut Criterion) {
    let nodes = section_nodes(SECTION_COUNT, ROWS_PER_SECTION, 0.0);

    c.bench_function("reconcile_initial_build", |b| {
        b.iter(|| {
            let mut harness = ReconcilerHarness::new();
            harness.update(nodes.clone(), false).expect("update");
            black_box(harness.subviews());
        });
    });
}

fn bench_steady_state(c: &mut Criterion) {
    let mut harness = ReconcilerHarness::new();
    let nodes = section_nodes(SECTION_COUNT, ROWS_PER_SECTION, 0.0);
    // Warm up so only in-place updates are measured.
    harness.update(nodes.clone(), false).expect("update");

    c.bench_function("reconcile_steady_state", |b| {
        b.iter(|| {
            let context = harness.update(nodes.clone(), false).expect("update");
            black_box(context.updated());
        });
    });
}

fn bench_moving_frames(c: &mut Criterion) {
    let mut harness = ReconcilerHarness::new();
    let even = section_nodes(SECTION_COUNT, ROWS_PER_SECTION, 0.0);
    let odd = section_nodes(SECTION_COUNT, ROWS_PER_SECTION, 1.0);
    harness.update(even.clone(), false).expect("update");
    let mut flip = false;

    c.bench_function("reconcile_moving_frames", |b| {
        b.iter(|| {
            flip = !flip;
            let nodes = if flip { odd.clone() } else { even.clone() };
            harness.update(nodes, false).expect("update");
        });
    });
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_elements");
    for &rows_per_section in RESOLVE_ROWS_PER_SECTION_SAMPLES {
        let total_ui_objects = ui_object_count(SECTION_COUNT, rows_per_section);
        let element = section_element(SECTION_COUNT, rows_per_section).into_element();
        group.bench_with_input(
            BenchmarkId::new("ui_objects", total_ui_objects),
            &element,
            |b, element| {
                b.iter(|| {
                    let nodes = ElementResolver.resolve(element.as_ref(), ROOT_BOUNDS);
                    black_box(nodes);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    reconcile,
    bench_initial_build,
    bench_steady_state,
    bench_moving_frames,
    bench_resolve
);
criterion_main!(reconcile);
