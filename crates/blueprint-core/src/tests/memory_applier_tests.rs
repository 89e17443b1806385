use super::*;
use blueprint_ui_graphics::{LayoutAttributes, Rect};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct PlainView {
    mounted: bool,
}

impl NativeView for PlainView {
    fn mount(&mut self) {
        self.mounted = true;
    }
}

struct TrackedView {
    unmounts: Rc<Cell<usize>>,
}

impl NativeView for TrackedView {
    fn unmount(&mut self) {
        self.unmounts.set(self.unmounts.get() + 1);
    }
}

fn create_plain(applier: &mut MemoryApplier) -> ViewId {
    applier.create(ViewType::of::<PlainView>(), Box::new(PlainView::default()))
}

fn frame(x: f32) -> LayoutAttributes {
    LayoutAttributes::with_frame(Rect::new(x, 0.0, 10.0, 10.0))
}

#[test]
fn insert_subview_mounts_and_orders_children() {
    let mut applier = MemoryApplier::new();
    let root = create_plain(&mut applier);
    let a = create_plain(&mut applier);
    let b = create_plain(&mut applier);

    applier.insert_subview(root, a, 0).expect("insert a");
    applier.insert_subview(root, b, 0).expect("insert b");

    assert_eq!(applier.subviews(root).expect("root"), vec![b, a]);
    assert_eq!(applier.superview(a).expect("a"), Some(root));
    let mounted = applier
        .with_view(a, |view: &mut PlainView| view.mounted)
        .expect("a is a PlainView");
    assert!(mounted);
}

#[test]
fn insert_subview_moves_existing_child() {
    let mut applier = MemoryApplier::new();
    let root = create_plain(&mut applier);
    let children: Vec<_> = (0..3).map(|_| create_plain(&mut applier)).collect();
    for (index, &child) in children.iter().enumerate() {
        applier.insert_subview(root, child, index).expect("insert");
    }

    applier.insert_subview(root, children[2], 0).expect("move");
    assert_eq!(
        applier.subviews(root).expect("root"),
        vec![children[2], children[0], children[1]]
    );

    applier.insert_subview(root, children[2], 99).expect("move to end");
    assert_eq!(
        applier.subviews(root).expect("root"),
        vec![children[0], children[1], children[2]]
    );
}

#[test]
fn insert_into_descendant_is_rejected() {
    let mut applier = MemoryApplier::new();
    let root = create_plain(&mut applier);
    let child = create_plain(&mut applier);
    applier.insert_subview(root, child, 0).expect("insert");

    let err = applier.insert_subview(child, root, 0).unwrap_err();
    assert_eq!(err, ViewError::CyclicInsertion { parent: child, child: root });
}

#[test]
fn remove_from_superview_disposes_subtree_once() {
    let unmounts = Rc::new(Cell::new(0));
    let mut applier = MemoryApplier::new();
    let root = create_plain(&mut applier);
    let parent = applier.create(
        ViewType::of::<TrackedView>(),
        Box::new(TrackedView { unmounts: unmounts.clone() }),
    );
    let child = applier.create(
        ViewType::of::<TrackedView>(),
        Box::new(TrackedView { unmounts: unmounts.clone() }),
    );
    applier.insert_subview(root, parent, 0).expect("insert parent");
    applier.insert_subview(parent, child, 0).expect("insert child");

    applier.remove_from_superview(parent);
    applier.remove_from_superview(parent);

    assert_eq!(unmounts.get(), 2);
    assert!(!applier.contains(parent));
    assert!(!applier.contains(child));
    assert!(applier.subviews(root).expect("root").is_empty());
    assert_eq!(applier.len(), 1);
}

#[test]
fn with_view_reports_type_mismatch() {
    let mut applier = MemoryApplier::new();
    let id = create_plain(&mut applier);
    let err = applier
        .with_view(id, |_: &mut TrackedView| ())
        .unwrap_err();
    assert!(matches!(err, ViewError::TypeMismatch { .. }));
    assert_eq!(
        applier.with_view(42, |_: &mut PlainView| ()).unwrap_err(),
        ViewError::Missing { id: 42 }
    );
}

#[test]
fn changes_outside_animation_scope_snap() {
    let mut applier = MemoryApplier::new();
    let id = create_plain(&mut applier);
    applier.apply_layout_attributes(id, &frame(20.0)).expect("apply");

    assert_eq!(applier.presentation(id).expect("view").frame.x, 20.0);
    assert!(applier.running_animation(id).is_none());
    assert_eq!(applier.animations_started(), 0);
}

#[test]
fn changes_inside_animation_scope_interpolate() {
    let mut applier = MemoryApplier::new();
    let id = create_plain(&mut applier);
    applier.apply_layout_attributes(id, &frame(0.0)).expect("apply");

    AnimationAttributes::linear(100).perform(
        &mut applier,
        |applier| applier.apply_layout_attributes(id, &frame(100.0)),
        None,
    )
    .expect("animated apply");

    assert_eq!(applier.layout_attributes(id).expect("view").frame.x, 100.0);
    assert_eq!(applier.presentation(id).expect("view").frame.x, 0.0);
    assert_eq!(applier.animations_started(), 1);

    applier.drain_frame(50_000_000);
    let halfway = applier.presentation(id).expect("view").frame.x;
    assert!((halfway - 50.0).abs() < 0.01, "got {halfway}");

    applier.drain_frame(100_000_000);
    assert_eq!(applier.presentation(id).expect("view").frame.x, 100.0);
    assert!(applier.running_animation(id).is_none());
}

#[test]
fn applying_identical_attributes_does_not_animate() {
    let mut applier = MemoryApplier::new();
    let id = create_plain(&mut applier);
    applier.apply_layout_attributes(id, &frame(10.0)).expect("apply");

    AnimationAttributes::default().perform(
        &mut applier,
        |applier| applier.apply_layout_attributes(id, &frame(10.0)),
        None,
    )
    .expect("apply");

    assert_eq!(applier.animations_started(), 0);
}

#[test]
fn without_animation_overrides_enclosing_scope() {
    let mut applier = MemoryApplier::new();
    let id = create_plain(&mut applier);

    applier.begin_animation(Some(AnimationAttributes::default()));
    assert!(applier.inherited_animation().is_some());
    perform_without_animation(&mut applier, |applier| {
        assert!(applier.inherited_animation().is_none());
        applier.apply_layout_attributes(id, &frame(5.0))
    })
    .expect("apply");
    applier.commit_animation(None);

    assert_eq!(applier.presentation(id).expect("view").frame.x, 5.0);
    assert!(applier.inherited_animation().is_none());
}

#[test]
fn removal_completion_fires_after_animation_ends() {
    let mut applier = MemoryApplier::new();
    let root = create_plain(&mut applier);
    let child = create_plain(&mut applier);
    applier.insert_subview(root, child, 0).expect("insert");

    AnimationAttributes::linear(200).perform(
        &mut applier,
        |applier| {
            let mut hidden = LayoutAttributes::default();
            hidden.alpha = 0.0;
            applier.apply_layout_attributes(child, &hidden)
        },
        Some(AnimationCompletion::RemoveFromSuperview(child)),
    )
    .expect("apply");

    assert_eq!(applier.pending_completions(), 1);
    applier.drain_frame(100_000_000);
    assert!(applier.contains(child));

    // Already gone by the time the completion fires.
    applier.remove_from_superview(child);
    applier.drain_frame(200_000_000);
    assert!(!applier.contains(child));
    assert_eq!(applier.pending_completions(), 0);
    assert!(applier.subviews(root).expect("root").is_empty());
}

#[test]
fn dump_tree_lists_hierarchy() {
    let mut applier = MemoryApplier::new();
    let root = create_plain(&mut applier);
    let child = create_plain(&mut applier);
    applier.insert_subview(root, child, 0).expect("insert");

    let dump = applier.dump_tree(Some(root));
    assert_eq!(
        dump,
        "[0] PlainView (0, 0, 0x0)\n  [1] PlainView (0, 0, 0x0)\n"
    );
    assert_eq!(applier.dump_tree(None), "(no root)\n");
}

#[test]
fn frames_only_visit_animating_views() {
    let mut applier = MemoryApplier::new();
    let idle: Vec<_> = (0..8).map(|_| create_plain(&mut applier)).collect();
    for &id in &idle {
        applier.apply_layout_attributes(id, &frame(1.0)).expect("apply");
    }
    let moving = create_plain(&mut applier);
    let removed = create_plain(&mut applier);
    assert_eq!(applier.animating_len(), 0);

    AnimationAttributes::linear(100)
        .perform(
            &mut applier,
            |applier| {
                applier.apply_layout_attributes(moving, &frame(100.0))?;
                applier.apply_layout_attributes(removed, &frame(100.0))
            },
            None,
        )
        .expect("animated apply");
    assert_eq!(applier.animating_len(), 2);

    applier.remove_from_superview(removed);
    assert_eq!(applier.animating_len(), 1);

    applier.drain_frame(50_000_000);
    assert_eq!(applier.animating_len(), 1);
    applier.drain_frame(100_000_000);
    assert_eq!(applier.animating_len(), 0);
    assert_eq!(applier.presentation(moving).expect("view").frame.x, 100.0);
}

#[test]
fn snapping_cancels_a_running_animation() {
    let mut applier = MemoryApplier::new();
    let id = create_plain(&mut applier);
    AnimationAttributes::linear(100)
        .perform(&mut applier, |applier| applier.apply_layout_attributes(id, &frame(100.0)), None)
        .expect("animated apply");
    assert_eq!(applier.animating_len(), 1);

    applier.apply_layout_attributes(id, &frame(20.0)).expect("apply");
    assert_eq!(applier.animating_len(), 0);
    assert_eq!(applier.presentation(id).expect("view").frame.x, 20.0);
}
