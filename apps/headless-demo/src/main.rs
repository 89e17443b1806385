use std::rc::Rc;

use blueprint_common_controls::{Label, TransitionContainer};
use blueprint_core::{
    AnimationAttributes, Applier, Easing, EnvironmentValues, MemoryApplier, ScreenScaleKey,
};
use blueprint_host::BlueprintView;
use blueprint_ui::{
    Element, ElementContent, ElementResolver, IntoElement, Layout, LayoutAttributes, Measurable,
    Rect, Size, SizeConstraint,
};

const FRAME_NANOS: u64 = 16_666_667;

/// Stacks children top to bottom with a fixed gap.
struct ColumnLayout {
    spacing: f32,
}

impl Layout for ColumnLayout {
    fn measure(&self, constraint: SizeConstraint, items: &[&dyn Measurable]) -> Size {
        let mut size = Size::ZERO;
        for (index, item) in items.iter().enumerate() {
            let measured = item.measure(constraint);
            size.width = size.width.max(measured.width);
            size.height += measured.height;
            if index > 0 {
                size.height += self.spacing;
            }
        }
        constraint.constrain(size)
    }

    fn layout(&self, size: Size, items: &[&dyn Measurable]) -> Vec<LayoutAttributes> {
        let mut y = 0.0;
        items
            .iter()
            .map(|item| {
                let measured = item.measure(SizeConstraint::new(size));
                let frame = Rect::new(0.0, y, size.width, measured.height);
                y += measured.height + self.spacing;
                LayoutAttributes::with_frame(frame)
            })
            .collect()
    }
}

struct Column {
    spacing: f32,
    children: Vec<Rc<dyn Element>>,
}

impl Element for Column {
    fn content(&self) -> ElementContent {
        ElementContent::layout(
            ColumnLayout {
                spacing: self.spacing,
            },
            self.children.clone(),
        )
    }
}

fn screen(items: &[&str]) -> Column {
    let mut children = vec![Label::new("Shopping list").font_size(24.0).into_element()];
    children.extend(
        items
            .iter()
            .map(|item| TransitionContainer::new(Label::new(*item)).into_element()),
    );
    Column {
        spacing: 8.0,
        children,
    }
}

fn run_frames(view: &BlueprintView, start: u64, frames: u64) -> u64 {
    let mut time = start;
    for _ in 0..frames {
        time += FRAME_NANOS;
        view.drain_frame(time);
    }
    time
}

fn main() {
    env_logger::init();

    println!("=== Blueprint-RS Headless Example ===");

    let view = match BlueprintView::new(MemoryApplier::new(), ElementResolver) {
        Ok(view) => view,
        Err(err) => {
            log::error!("failed to create host view: {err}");
            return;
        }
    };
    view.set_environment(EnvironmentValues::new().with::<ScreenScaleKey>(2.0));
    view.set_bounds(Rect::new(0.0, 0.0, 320.0, 480.0));

    view.set_element(screen(&["apples", "bread"]));
    println!("fits in {:?}", view.measure(Size::new(320.0, 480.0)));
    view.layout_subviews();
    println!("\n-- initial --\n{}", view.dump_tree());

    let animation = AnimationAttributes::new(250, Easing::FastOutSlowIn);
    view.with_applier(|applier| applier.begin_animation(Some(animation)));
    view.set_element(screen(&["apples", "cheese", "bread"]));
    view.with_applier(|applier| applier.commit_animation(None));
    view.layout_subviews();
    println!("-- mid-animation --\n{}", view.dump_tree());

    let time = run_frames(&view, 0, 30);
    println!("-- settled --\n{}", view.dump_tree());

    view.set_element_animated(Some(screen(&["cheese"]).into_element()), true);
    view.layout_subviews();
    run_frames(&view, time, 30);
    println!("-- after removal --\n{}", view.dump_tree());

    for (path, id) in view.native_view_controllers() {
        println!("{path} -> view {id}");
    }
}
