use blueprint_animation::{LayoutTransition, PerformRule, VisibilityTransition};
use blueprint_core::collections::map::HashSet;
use blueprint_core::hash::DefaultBuildHasher;
use blueprint_core::{perform_without_animation, Applier, ElementPath, ViewError, ViewId, ViewType};
use blueprint_ui_graphics::LayoutAttributes;
use indexmap::IndexMap;

use crate::native_view_node::NativeViewNode;
use crate::view_description::ViewDescription;

type ChildMap = IndexMap<ElementPath, NativeViewController, DefaultBuildHasher>;

/// State shared by every controller touched during one update pass.
#[derive(Debug, Default)]
pub struct UpdateContext {
    appearing_ancestors: Vec<VisibilityTransition>,
    created: usize,
    updated: usize,
    removed: usize,
}

impl UpdateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `transition` may run given the appearing transitions of the
    /// ancestors currently being inserted.
    pub fn should_animate(&self, transition: &VisibilityTransition) -> bool {
        match transition.performing {
            PerformRule::Always => true,
            PerformRule::IfNotNested => self.appearing_ancestors.is_empty(),
        }
    }

    /// Controllers created during the pass.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Controllers updated in place during the pass.
    pub fn updated(&self) -> usize {
        self.updated
    }

    /// Controllers whose views were removed or began disappearing.
    pub fn removed(&self) -> usize {
        self.removed
    }

    fn with_appearing<R>(
        &mut self,
        transition: Option<VisibilityTransition>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let Some(transition) = transition else {
            return f(self);
        };
        self.appearing_ancestors.push(transition);
        let result = f(self);
        self.appearing_ancestors.pop();
        result
    }
}

/// Retains one native view across updates and reconciles its children
/// against freshly resolved nodes.
pub struct NativeViewController {
    view: ViewId,
    view_type: ViewType,
    view_description: ViewDescription,
    layout_attributes: LayoutAttributes,
    children: Vec<(ElementPath, NativeViewController)>,
}

impl NativeViewController {
    /// Builds the view for `node` and its whole subtree.
    pub fn new(
        applier: &mut dyn Applier,
        node: &NativeViewNode,
        animated: bool,
    ) -> Result<Self, ViewError> {
        let mut controller = Self::instantiate(applier, node)?;
        controller.update(applier, node, animated, &mut UpdateContext::new())?;
        Ok(controller)
    }

    fn instantiate(applier: &mut dyn Applier, node: &NativeViewNode) -> Result<Self, ViewError> {
        let view = node.view_description.build(applier)?;
        Ok(Self {
            view,
            view_type: node.view_description.view_type(),
            view_description: node.view_description.clone(),
            layout_attributes: node.layout_attributes,
            children: Vec::new(),
        })
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn view_description(&self) -> &ViewDescription {
        &self.view_description
    }

    pub fn layout_attributes(&self) -> LayoutAttributes {
        self.layout_attributes
    }

    pub fn children(&self) -> &[(ElementPath, NativeViewController)] {
        &self.children
    }

    pub fn child(&self, path: &ElementPath) -> Option<&NativeViewController> {
        self.children
            .iter()
            .find(|(child_path, _)| child_path == path)
            .map(|(_, controller)| controller)
    }

    pub fn can_update_from(&self, node: &NativeViewNode) -> bool {
        node.view_description.view_type() == self.view_type
    }

    /// Reconfigures the view from `node` and reconciles its children.
    ///
    /// Children are matched by path. A child whose path and view type both
    /// match is updated in place, anything else is created, and controllers
    /// left without a matching node are removed, playing their disappearing
    /// transition when `animated`.
    ///
    /// Panics if `node` describes a different view type, or if two of its
    /// children share a path.
    pub fn update(
        &mut self,
        applier: &mut dyn Applier,
        node: &NativeViewNode,
        animated: bool,
        context: &mut UpdateContext,
    ) -> Result<(), ViewError> {
        assert!(
            self.can_update_from(node),
            "cannot update a {} controller from a {} description",
            self.view_type,
            node.view_description.view_type()
        );
        assert_unique_paths(&node.children);

        self.view_description = node.view_description.clone();
        self.layout_attributes = node.layout_attributes;
        self.view_description.apply_to(applier, self.view)?;
        let content_view = self.view_description.content_view_in(&*applier, self.view)?;

        let mut old_children: ChildMap =
            IndexMap::with_capacity_and_hasher(self.children.len(), DefaultBuildHasher::default());
        old_children.extend(std::mem::take(&mut self.children));
        let mut new_children = Vec::with_capacity(node.children.len());

        if let Err(err) = Self::update_children(
            applier,
            node,
            content_view,
            animated,
            context,
            &mut old_children,
            &mut new_children,
        ) {
            self.children = Self::recover_children(applier, new_children, old_children);
            return Err(err);
        }

        for (path, controller) in old_children {
            controller.remove(applier, animated);
            context.removed += 1;
            log::trace!("removed {} at {}", controller.view_type, path);
        }

        self.children = new_children;
        Ok(())
    }

    /// Matches `node`'s children against `old_children`, moving every
    /// controller that ends up attached into `new_children` as it goes.
    fn update_children(
        applier: &mut dyn Applier,
        node: &NativeViewNode,
        content_view: ViewId,
        animated: bool,
        context: &mut UpdateContext,
        old_children: &mut ChildMap,
        new_children: &mut Vec<(ElementPath, NativeViewController)>,
    ) -> Result<(), ViewError> {
        for (index, (path, child)) in node.children.iter().enumerate() {
            let reusable = old_children
                .get(path)
                .is_some_and(|controller| controller.can_update_from(child));
            let existing = if reusable {
                old_children.shift_remove(path)
            } else {
                None
            };

            match existing {
                Some(mut controller) => {
                    let transition = if child.layout_attributes != controller.layout_attributes {
                        child.view_description.layout()
                    } else {
                        LayoutTransition::Inherited
                    };
                    let result = transition.perform(applier, |applier| {
                        applier.apply_layout_attributes(controller.view, &child.layout_attributes)?;
                        applier.insert_subview(content_view, controller.view, index)?;
                        controller.update(applier, child, animated, context)
                    });
                    log::trace!("updated {} at {}", controller.view_type, path);
                    new_children.push((path.clone(), controller));
                    result?;
                    context.updated += 1;
                }
                None => {
                    let mut controller = Self::instantiate(applier, child)?;
                    if let Err(err) =
                        controller.attach(applier, child, content_view, index, animated, context)
                    {
                        applier.remove_from_superview(controller.view);
                        return Err(err);
                    }
                    context.created += 1;
                    log::trace!("created {} at {}", controller.view_type, path);
                    new_children.push((path.clone(), controller));
                }
            }
        }
        Ok(())
    }

    /// Inserts a freshly built view at `index`, initialises its subtree and
    /// plays its appearing transition when allowed.
    fn attach(
        &mut self,
        applier: &mut dyn Applier,
        node: &NativeViewNode,
        content_view: ViewId,
        index: usize,
        animated: bool,
        context: &mut UpdateContext,
    ) -> Result<(), ViewError> {
        let view = self.view;
        perform_without_animation(applier, |applier| {
            applier.apply_layout_attributes(view, &node.layout_attributes)
        })?;
        applier.insert_subview(content_view, view, index)?;

        let appearing = node.view_description.appearing();
        let perform = appearing.filter(|transition| animated && context.should_animate(transition));
        context.with_appearing(appearing, |context| self.update(applier, node, animated, context))?;
        if let Some(transition) = perform {
            transition.perform_appearing(applier, view, &node.layout_attributes)?;
        }
        Ok(())
    }

    /// Detaches the view, through its disappearing transition when
    /// `animated`.
    fn remove(&self, applier: &mut dyn Applier, animated: bool) {
        let Some(transition) = self.view_description.disappearing().filter(|_| animated) else {
            applier.remove_from_superview(self.view);
            return;
        };
        if let Err(err) = transition.perform_disappearing(applier, self.view, &self.layout_attributes) {
            log::warn!("disappearing transition for {} failed: {err}", self.view_type);
            applier.remove_from_superview(self.view);
        }
    }

    /// Keeps every view that is still attached after a failed pass owned by
    /// a controller, so the next pass can reconcile it. Stale controllers
    /// whose path was already rebuilt are removed.
    fn recover_children(
        applier: &mut dyn Applier,
        mut children: Vec<(ElementPath, NativeViewController)>,
        leftovers: ChildMap,
    ) -> Vec<(ElementPath, NativeViewController)> {
        for (path, controller) in leftovers {
            if children.iter().any(|(kept, _)| *kept == path) {
                applier.remove_from_superview(controller.view);
            } else {
                children.push((path, controller));
            }
        }
        children
    }
}

impl std::fmt::Debug for NativeViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeViewController")
            .field("view", &self.view)
            .field("view_type", &self.view_type)
            .field("children", &self.children)
            .finish()
    }
}

fn assert_unique_paths(children: &[(ElementPath, NativeViewNode)]) {
    let mut seen: HashSet<&ElementPath, DefaultBuildHasher> =
        HashSet::with_capacity_and_hasher(children.len(), DefaultBuildHasher::default());
    for (path, _) in children {
        if !seen.insert(path) {
            panic!("duplicate element path {path} among siblings");
        }
    }
}
