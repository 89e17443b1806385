use std::panic::{catch_unwind, AssertUnwindSafe};

use blueprint_core::{Applier, AnimationAttributes, ElementPath, MemoryApplier};
use blueprint_testing::{
    frame, keyed, other_description, test_description, test_node, titled_description,
    ReconcilerHarness, TestView,
};
use blueprint_ui::{
    ContainerView, LayoutTransition, NativeViewController, NativeViewNode, PerformRule,
    UpdateContext, ViewDescription, VisibilityTransition,
};

fn three_children() -> Vec<(ElementPath, NativeViewNode)> {
    vec![
        keyed(0, test_node(0.0)),
        keyed(1, test_node(10.0)),
        keyed(2, test_node(20.0)),
    ]
}

fn fading() -> ViewDescription {
    test_description().visibility_transition(VisibilityTransition::fade())
}

#[test]
fn single_leaf_creates_one_controller_without_animation() {
    let mut harness = ReconcilerHarness::new();
    let context = harness
        .update(vec![keyed(0, test_node(0.0))], true)
        .expect("update");

    assert_eq!(context.created(), 1);
    assert_eq!(harness.root().children().len(), 1);
    assert_eq!(harness.subviews().len(), 1);
    assert_eq!(harness.applier().animations_started(), 0);

    let view = harness.view_at([0]).expect("view at [0]");
    assert_eq!(
        harness.applier().presentation(view).expect("view"),
        frame(0.0, 0.0, 10.0, 10.0)
    );
}

#[test]
#[should_panic(expected = "duplicate element path [0]")]
fn duplicate_sibling_paths_are_rejected() {
    let mut harness = ReconcilerHarness::new();
    let _ = harness.update(vec![keyed(0, test_node(0.0)), keyed(0, test_node(10.0))], false);
}

#[test]
fn duplicate_paths_are_rejected_before_any_mutation() {
    let mut harness = ReconcilerHarness::new();
    harness.update(three_children(), false).expect("update");
    let before = harness.subviews();
    let views_before = harness.applier().len();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = harness.update(vec![keyed(3, test_node(0.0)), keyed(3, test_node(5.0))], false);
    }));

    assert!(result.is_err());
    assert_eq!(harness.subviews(), before);
    assert_eq!(harness.applier().len(), views_before);
}

#[test]
fn repeated_update_with_same_tree_is_idempotent() {
    let mut harness = ReconcilerHarness::new();
    let children = vec![
        keyed(0, test_node(0.0)),
        keyed(
            1,
            NativeViewNode::leaf(fading(), frame(10.0, 0.0, 10.0, 10.0)),
        ),
    ];
    harness.update(children.clone(), true).expect("first update");
    let views = harness.subviews();
    let dump = harness.dump_tree();
    let animations = harness.applier().animations_started();

    let context = harness.update(children, true).expect("second update");

    assert_eq!(context.created(), 0);
    assert_eq!(context.updated(), 2);
    assert_eq!(context.removed(), 0);
    assert_eq!(harness.subviews(), views);
    assert_eq!(harness.dump_tree(), dump);
    assert_eq!(harness.applier().animations_started(), animations);
}

#[test]
fn configuration_is_reapplied_on_every_update() {
    let mut harness = ReconcilerHarness::new();
    let node = NativeViewNode::leaf(titled_description("first"), frame(0.0, 0.0, 10.0, 10.0));
    harness.update(vec![keyed(0, node)], false).expect("update");
    let view = harness.view_at([0]).expect("view");

    let node = NativeViewNode::leaf(titled_description("second"), frame(0.0, 0.0, 10.0, 10.0));
    harness.update(vec![keyed(0, node)], false).expect("update");

    assert_eq!(harness.view_at([0]), Some(view));
    let (title, count) = harness
        .applier_mut()
        .with_view(view, |view: &mut TestView| (view.title.clone(), view.configure_count))
        .expect("test view");
    assert_eq!(title, "second");
    assert_eq!(count, 2);
}

#[test]
fn views_are_preserved_by_path_and_type() {
    let mut harness = ReconcilerHarness::new();
    harness.update(three_children(), false).expect("update");
    let first = harness.view_at([0]).expect("[0]");
    let second = harness.view_at([1]).expect("[1]");

    let children = vec![
        keyed(0, test_node(5.0)),
        keyed(1, NativeViewNode::leaf(other_description(), frame(10.0, 0.0, 10.0, 10.0))),
        keyed(2, test_node(20.0)),
    ];
    let context = harness.update(children, false).expect("update");

    assert_eq!(harness.view_at([0]), Some(first));
    let replaced = harness.view_at([1]).expect("[1]");
    assert_ne!(replaced, second);
    assert!(!harness.applier().contains(second));
    assert_eq!(context.created(), 1);
    assert_eq!(context.removed(), 1);
    assert_eq!(
        harness.applier().layout_attributes(first).expect("first").frame.x,
        5.0
    );
}

#[test]
fn subview_order_follows_new_sibling_order() {
    let mut harness = ReconcilerHarness::new();
    harness.update(three_children(), false).expect("update");
    let a = harness.view_at([0]).expect("[0]");
    let b = harness.view_at([1]).expect("[1]");
    let c = harness.view_at([2]).expect("[2]");

    let reordered = vec![
        keyed(2, test_node(20.0)),
        keyed(0, test_node(0.0)),
        keyed(1, test_node(10.0)),
    ];
    harness.update(reordered, false).expect("update");

    assert_eq!(harness.subviews(), vec![c, a, b]);
    let paths: Vec<_> = harness
        .root()
        .children()
        .iter()
        .map(|(path, _)| path.to_string())
        .collect();
    assert_eq!(paths, vec!["[2]", "[0]", "[1]"]);
}

#[test]
fn removing_middle_child_without_transition_detaches_synchronously() {
    let mut harness = ReconcilerHarness::new();
    harness.update(three_children(), true).expect("update");
    let first = harness.view_at([0]).expect("[0]");
    let middle = harness.view_at([1]).expect("[1]");
    let last = harness.view_at([2]).expect("[2]");

    let context = harness
        .update(vec![keyed(0, test_node(0.0)), keyed(2, test_node(20.0))], true)
        .expect("update");

    assert_eq!(context.removed(), 1);
    assert_eq!(context.updated(), 2);
    assert!(!harness.applier().contains(middle));
    assert_eq!(harness.subviews(), vec![first, last]);
    assert_eq!(harness.applier().pending_completions(), 0);
}

#[test]
fn disappearing_transition_detaches_after_animation() {
    let mut harness = ReconcilerHarness::new();
    let node = NativeViewNode::leaf(fading(), frame(0.0, 0.0, 10.0, 10.0));
    harness.update(vec![keyed(0, node)], false).expect("update");
    let view = harness.view_at([0]).expect("[0]");

    harness.update(Vec::new(), true).expect("update");

    assert!(harness.root().children().is_empty());
    assert_eq!(harness.subviews(), vec![view]);
    assert_eq!(harness.applier().layout_attributes(view).expect("view").alpha, 0.0);

    harness.advance_frame(100_000_000);
    assert!(harness.applier().contains(view));

    harness.advance_frame(200_000_000);
    assert!(!harness.applier().contains(view));
    assert!(harness.subviews().is_empty());
}

#[test]
fn disappearing_transition_is_skipped_when_not_animated() {
    let mut harness = ReconcilerHarness::new();
    let node = NativeViewNode::leaf(fading(), frame(0.0, 0.0, 10.0, 10.0));
    harness.update(vec![keyed(0, node)], false).expect("update");
    let view = harness.view_at([0]).expect("[0]");

    harness.update(Vec::new(), false).expect("update");

    assert!(!harness.applier().contains(view));
    assert_eq!(harness.applier().pending_completions(), 0);
}

#[test]
fn appearing_transition_plays_only_when_animated() {
    let mut harness = ReconcilerHarness::new();
    let node = NativeViewNode::leaf(fading(), frame(0.0, 0.0, 10.0, 10.0));
    harness.update(vec![keyed(0, node.clone())], false).expect("update");
    assert_eq!(harness.applier().animations_started(), 0);

    harness.update(vec![keyed(1, node)], true).expect("update");
    let view = harness.view_at([1]).expect("[1]");

    assert_eq!(harness.applier().presentation(view).expect("view").alpha, 0.0);
    assert_eq!(
        harness.applier().running_animation(view),
        Some(AnimationAttributes::default())
    );
    harness.advance_frame(200_000_000);
    assert_eq!(harness.applier().presentation(view).expect("view").alpha, 1.0);
}

#[test]
fn nested_appearing_transitions_are_suppressed() {
    let mut harness = ReconcilerHarness::new();
    let child = NativeViewNode::leaf(fading(), frame(0.0, 0.0, 5.0, 5.0));
    let parent = NativeViewNode::new(
        fading(),
        frame(0.0, 0.0, 20.0, 20.0),
        vec![keyed(0, child)],
    );
    harness.update(vec![keyed(0, parent)], true).expect("update");

    let parent = harness.root().child(&ElementPath::from([0])).expect("parent");
    let child_view = parent.children()[0].1.view();
    assert!(harness.applier().running_animation(parent.view()).is_some());
    assert!(harness.applier().running_animation(child_view).is_none());
    assert_eq!(harness.applier().animations_started(), 1);
}

#[test]
fn always_rule_ignores_nesting() {
    let mut harness = ReconcilerHarness::new();
    let always = VisibilityTransition::scale().with_performing(PerformRule::Always);
    let child = NativeViewNode::leaf(
        test_description().appearing_transition(always),
        frame(0.0, 0.0, 5.0, 5.0),
    );
    let parent = NativeViewNode::new(
        fading(),
        frame(0.0, 0.0, 20.0, 20.0),
        vec![keyed(0, child)],
    );
    harness.update(vec![keyed(0, parent)], true).expect("update");

    let parent = harness.root().child(&ElementPath::from([0])).expect("parent");
    let child_view = parent.children()[0].1.view();
    assert!(harness.applier().running_animation(child_view).is_some());
    assert_eq!(harness.applier().animations_started(), 2);
}

#[test]
fn sibling_appearing_transitions_do_not_suppress_each_other() {
    let mut harness = ReconcilerHarness::new();
    let children = vec![
        keyed(0, NativeViewNode::leaf(fading(), frame(0.0, 0.0, 5.0, 5.0))),
        keyed(1, NativeViewNode::leaf(fading(), frame(5.0, 0.0, 5.0, 5.0))),
    ];
    harness.update(children, true).expect("update");

    for path in [[0], [1]] {
        let view = harness.view_at(path).expect("view");
        assert!(harness.applier().running_animation(view).is_some());
    }
}

#[test]
fn specific_layout_transition_animates_frame_change() {
    let mut harness = ReconcilerHarness::new();
    let attributes = AnimationAttributes::linear(100);
    let description =
        || test_description().layout_transition(LayoutTransition::Specific(attributes));
    harness
        .update(
            vec![keyed(0, NativeViewNode::leaf(description(), frame(0.0, 0.0, 10.0, 10.0)))],
            false,
        )
        .expect("update");
    let view = harness.view_at([0]).expect("[0]");

    harness
        .update(
            vec![keyed(0, NativeViewNode::leaf(description(), frame(100.0, 0.0, 10.0, 10.0)))],
            false,
        )
        .expect("update");

    assert_eq!(harness.applier().running_animation(view), Some(attributes));
    assert_eq!(harness.applier().presentation(view).expect("view").frame.x, 0.0);
    harness.advance_frame(50_000_000);
    let x = harness.applier().presentation(view).expect("view").frame.x;
    assert!((x - 50.0).abs() < 0.01, "got {x}");
}

#[test]
fn inherited_layout_transition_snaps_outside_animation() {
    let mut harness = ReconcilerHarness::new();
    harness.update(vec![keyed(0, test_node(0.0))], false).expect("update");
    let view = harness.view_at([0]).expect("[0]");

    harness.update(vec![keyed(0, test_node(50.0))], true).expect("update");

    assert!(harness.applier().running_animation(view).is_none());
    assert_eq!(harness.applier().presentation(view).expect("view").frame.x, 50.0);
}

#[test]
fn unchanged_attributes_do_not_open_layout_transition() {
    let mut harness = ReconcilerHarness::new();
    let description =
        || test_description().layout_transition(LayoutTransition::Specific(AnimationAttributes::default()));
    let node = || NativeViewNode::leaf(description(), frame(0.0, 0.0, 10.0, 10.0));
    harness.update(vec![keyed(0, node())], false).expect("update");
    harness.update(vec![keyed(0, node())], false).expect("update");

    assert_eq!(harness.applier().animations_started(), 0);
}

#[test]
fn revived_path_gets_a_fresh_view_while_old_one_disappears() {
    let mut harness = ReconcilerHarness::new();
    let node = NativeViewNode::leaf(fading(), frame(0.0, 0.0, 10.0, 10.0));
    harness.update(vec![keyed(0, node.clone())], false).expect("update");
    let old = harness.view_at([0]).expect("[0]");

    harness.update(Vec::new(), true).expect("remove");
    harness.update(vec![keyed(0, node)], false).expect("revive");
    let revived = harness.view_at([0]).expect("[0]");

    assert_ne!(revived, old);
    assert_eq!(harness.subviews(), vec![revived, old]);

    harness.advance_frame(200_000_000);
    assert!(!harness.applier().contains(old));
    assert_eq!(harness.subviews(), vec![revived]);
}

#[test]
fn children_attach_to_the_content_view() {
    let mut harness = ReconcilerHarness::new();
    let scrolling = ViewDescription::of::<TestView>()
        .prepare(|applier, view| {
            let content = applier.create(
                blueprint_core::ViewType::of::<ContainerView>(),
                Box::new(ContainerView),
            );
            applier.insert_subview(view, content, 0)
        })
        .content_view(|applier, view| {
            applier
                .subviews(view)?
                .first()
                .copied()
                .ok_or(blueprint_core::ViewError::Missing { id: view })
        });
    let parent = NativeViewNode::new(
        scrolling,
        frame(0.0, 0.0, 100.0, 100.0),
        vec![keyed(0, test_node(0.0)), keyed(1, test_node(10.0))],
    );
    harness.update(vec![keyed(0, parent)], false).expect("update");

    let parent = harness.root().child(&ElementPath::from([0])).expect("parent");
    let internal = harness.applier().subviews(parent.view()).expect("parent")[0];
    let children: Vec<_> = parent.children().iter().map(|(_, c)| c.view()).collect();
    assert_eq!(harness.applier().subviews(internal).expect("content"), children);
}

#[test]
#[should_panic(expected = "cannot update a TestView controller")]
fn updating_with_a_different_view_type_panics() {
    let mut applier = MemoryApplier::new();
    let mut controller =
        NativeViewController::new(&mut applier, &test_node(0.0), false).expect("controller");
    let other = NativeViewNode::leaf(other_description(), frame(0.0, 0.0, 1.0, 1.0));
    let _ = controller.update(&mut applier, &other, false, &mut UpdateContext::new());
}

#[test]
fn new_controller_builds_the_whole_subtree() {
    let mut applier = MemoryApplier::new();
    let node = NativeViewNode::new(
        test_description(),
        frame(0.0, 0.0, 10.0, 10.0),
        vec![
            keyed(0, test_node(0.0)),
            keyed(1, NativeViewNode::new(test_description(), frame(0.0, 0.0, 1.0, 1.0), vec![keyed(0, test_node(0.0))])),
        ],
    );
    assert_eq!(node.count(), 4);

    let controller = NativeViewController::new(&mut applier, &node, false).expect("controller");

    assert_eq!(applier.len(), 4);
    assert_eq!(controller.children().len(), 2);
    let nested = controller.child(&ElementPath::from([1])).expect("nested");
    assert_eq!(nested.children().len(), 1);
    assert!(controller.child(&ElementPath::from([7])).is_none());
}

fn failing_node() -> NativeViewNode {
    let failing = ViewDescription::of::<ContainerView>()
        .prepare(|_, _| Err(blueprint_core::ViewError::Missing { id: usize::MAX }));
    NativeViewNode::leaf(failing, frame(0.0, 0.0, 1.0, 1.0))
}

#[test]
fn failed_update_keeps_attached_views_owned() {
    let mut harness = ReconcilerHarness::new();
    harness.update(vec![keyed(0, test_node(0.0))], false).expect("update");
    let kept = harness.view_at([0]).expect("view at [0]");

    let result = harness.update(vec![keyed(0, test_node(0.0)), keyed(1, failing_node())], false);
    assert_eq!(
        result.err(),
        Some(blueprint_core::ViewError::Missing { id: usize::MAX })
    );
    assert_eq!(harness.subviews(), vec![kept]);
    assert_eq!(harness.root().children().len(), 1);
    // Root and the kept view; the view that failed to prepare is disposed.
    assert_eq!(harness.applier().len(), 2);

    harness.update(vec![keyed(0, test_node(0.0))], false).expect("update");
    assert_eq!(harness.subviews(), vec![kept]);
    assert_eq!(harness.view_at([0]), Some(kept));
}

#[test]
fn failed_update_drops_controllers_replaced_at_the_same_path() {
    let mut harness = ReconcilerHarness::new();
    harness.update(vec![keyed(0, test_node(0.0))], false).expect("update");
    let replaced = harness.view_at([0]).expect("view at [0]");

    let other = NativeViewNode::leaf(other_description(), frame(0.0, 0.0, 1.0, 1.0));
    let result = harness.update(vec![keyed(0, other.clone()), keyed(1, failing_node())], false);
    assert!(result.is_err());

    let rebuilt = harness.view_at([0]).expect("view at [0]");
    assert_ne!(rebuilt, replaced);
    assert!(!harness.applier().contains(replaced));
    assert_eq!(harness.subviews(), vec![rebuilt]);

    harness.update(vec![keyed(0, other)], false).expect("update");
    assert_eq!(harness.subviews(), vec![rebuilt]);
}

#[test]
fn failure_deep_in_a_new_subtree_removes_the_whole_subtree() {
    let mut harness = ReconcilerHarness::new();
    let parent = NativeViewNode::new(
        test_description(),
        frame(0.0, 0.0, 10.0, 10.0),
        vec![keyed(0, test_node(0.0)), keyed(1, failing_node())],
    );

    assert!(harness.update(vec![keyed(0, parent)], false).is_err());
    assert!(harness.subviews().is_empty());
    assert!(harness.root().children().is_empty());
    assert_eq!(harness.applier().len(), 1);
}
