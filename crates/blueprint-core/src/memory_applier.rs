use std::any::type_name;

use blueprint_ui_graphics::LayoutAttributes;

use crate::animation::{AnimationAttributes, AnimationCompletion, Lerp};
use crate::collections::map::HashSet;
use crate::hash::DefaultBuildHasher;
use crate::{Applier, NativeView, ViewError, ViewId, ViewType};

struct ViewRecord {
    view: Box<dyn NativeView>,
    view_type: ViewType,
    superview: Option<ViewId>,
    subviews: Vec<ViewId>,
    /// Attributes most recently applied.
    model: LayoutAttributes,
    /// Attributes currently on screen; trails `model` while animating.
    presentation: LayoutAttributes,
    animation: Option<RunningAnimation>,
}

#[derive(Clone, Copy, Debug)]
struct RunningAnimation {
    from: LayoutAttributes,
    attributes: AnimationAttributes,
    start_nanos: u64,
}

struct PendingCompletion {
    completion: AnimationCompletion,
    deadline_nanos: u64,
}

/// An [`Applier`] that keeps views in memory and runs animations against
/// the frame times passed to [`Applier::drain_frame`].
#[derive(Default)]
pub struct MemoryApplier {
    // Ids are never reused: queued completions may still name disposed views.
    views: Vec<Option<ViewRecord>>,
    /// Views with a running animation; the only ones a frame visits.
    animating: HashSet<ViewId, DefaultBuildHasher>,
    animation_stack: Vec<Option<AnimationAttributes>>,
    pending_completions: Vec<PendingCompletion>,
    frame_time_nanos: u64,
    animations_started: usize,
}

impl MemoryApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view<V: NativeView, R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut V) -> R,
    ) -> Result<R, ViewError> {
        let record = self.record_mut(id)?;
        let found = record.view_type.name();
        let typed = record
            .view
            .as_any_mut()
            .downcast_mut::<V>()
            .ok_or(ViewError::TypeMismatch {
                id,
                expected: type_name::<V>(),
                found,
            })?;
        Ok(f(typed))
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.views.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attributes currently on screen, which differ from
    /// [`layout_attributes`](Applier::layout_attributes) while animating.
    pub fn presentation(&self, id: ViewId) -> Result<LayoutAttributes, ViewError> {
        Ok(self.record(id)?.presentation)
    }

    /// The attributes of the animation currently running on `id`, if any.
    pub fn running_animation(&self, id: ViewId) -> Option<AnimationAttributes> {
        self.record(id).ok()?.animation.map(|a| a.attributes)
    }

    /// Number of views a frame currently advances.
    pub fn animating_len(&self) -> usize {
        self.animating.len()
    }

    /// Total number of attribute animations started so far.
    pub fn animations_started(&self) -> usize {
        self.animations_started
    }

    pub fn pending_completions(&self) -> usize {
        self.pending_completions.len()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    pub fn dump_tree(&self, root: Option<ViewId>) -> String {
        let mut output = String::new();
        if let Some(root_id) = root {
            self.dump_view(&mut output, root_id, 0);
        } else {
            output.push_str("(no root)\n");
        }
        output
    }

    fn dump_view(&self, output: &mut String, id: ViewId, depth: usize) {
        let indent = "  ".repeat(depth);
        if let Some(Some(record)) = self.views.get(id) {
            output.push_str(&format!(
                "{}[{}] {} {}\n",
                indent, id, record.view_type, record.model.frame
            ));
            for &child_id in &record.subviews {
                self.dump_view(output, child_id, depth + 1);
            }
        } else {
            output.push_str(&format!("{}[{}] (missing)\n", indent, id));
        }
    }

    fn record(&self, id: ViewId) -> Result<&ViewRecord, ViewError> {
        self.views
            .get(id)
            .and_then(Option::as_ref)
            .ok_or(ViewError::Missing { id })
    }

    fn record_mut(&mut self, id: ViewId) -> Result<&mut ViewRecord, ViewError> {
        self.views
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or(ViewError::Missing { id })
    }

    fn detach(&mut self, id: ViewId) {
        let Some(superview) = self
            .record_mut(id)
            .ok()
            .and_then(|record| record.superview.take())
        else {
            return;
        };
        if let Ok(parent) = self.record_mut(superview) {
            parent.subviews.retain(|&child| child != id);
        }
    }

    fn dispose(&mut self, id: ViewId) {
        let Some(mut record) = self.views.get_mut(id).and_then(Option::take) else {
            return;
        };
        self.animating.remove(&id);
        record.view.unmount();
        for child in record.subviews {
            self.dispose(child);
        }
    }

    fn is_ancestor(&self, candidate: ViewId, of: ViewId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.record(id).ok().and_then(|r| r.superview);
        }
        false
    }

    fn fire_completion(&mut self, completion: AnimationCompletion) {
        match completion {
            AnimationCompletion::RemoveFromSuperview(id) => self.remove_from_superview(id),
        }
    }
}

impl Applier for MemoryApplier {
    fn create(&mut self, view_type: ViewType, view: Box<dyn NativeView>) -> ViewId {
        let id = self.views.len();
        self.views.push(Some(ViewRecord {
            view,
            view_type,
            superview: None,
            subviews: Vec::new(),
            model: LayoutAttributes::default(),
            presentation: LayoutAttributes::default(),
            animation: None,
        }));
        id
    }

    fn view_mut(&mut self, id: ViewId) -> Result<&mut dyn NativeView, ViewError> {
        Ok(self.record_mut(id)?.view.as_mut())
    }

    fn view_type(&self, id: ViewId) -> Result<ViewType, ViewError> {
        Ok(self.record(id)?.view_type)
    }

    fn contains(&self, id: ViewId) -> bool {
        self.record(id).is_ok()
    }

    fn subviews(&self, id: ViewId) -> Result<Vec<ViewId>, ViewError> {
        Ok(self.record(id)?.subviews.clone())
    }

    fn superview(&self, id: ViewId) -> Result<Option<ViewId>, ViewError> {
        Ok(self.record(id)?.superview)
    }

    fn insert_subview(
        &mut self,
        parent: ViewId,
        child: ViewId,
        index: usize,
    ) -> Result<(), ViewError> {
        self.record(parent)?;
        let was_attached = self.record(child)?.superview.is_some();
        if self.is_ancestor(child, parent) {
            return Err(ViewError::CyclicInsertion { parent, child });
        }

        self.detach(child);
        let parent_record = self.record_mut(parent)?;
        let index = index.min(parent_record.subviews.len());
        parent_record.subviews.insert(index, child);

        let child_record = self.record_mut(child)?;
        child_record.superview = Some(parent);
        if !was_attached {
            child_record.view.mount();
        }
        Ok(())
    }

    fn remove_from_superview(&mut self, id: ViewId) {
        if !self.contains(id) {
            return;
        }
        self.detach(id);
        self.dispose(id);
    }

    fn layout_attributes(&self, id: ViewId) -> Result<LayoutAttributes, ViewError> {
        Ok(self.record(id)?.model)
    }

    fn apply_layout_attributes(
        &mut self,
        id: ViewId,
        attributes: &LayoutAttributes,
    ) -> Result<(), ViewError> {
        let animation = self.inherited_animation().filter(AnimationAttributes::is_animated);
        let frame_time = self.frame_time_nanos;
        let record = self.record_mut(id)?;
        if record.model == *attributes {
            return Ok(());
        }
        record.model = *attributes;
        match animation {
            Some(attributes) => {
                record.animation = Some(RunningAnimation {
                    from: record.presentation,
                    attributes,
                    start_nanos: frame_time,
                });
                self.animations_started += 1;
                self.animating.insert(id);
            }
            None => {
                record.presentation = *attributes;
                record.animation = None;
                self.animating.remove(&id);
            }
        }
        Ok(())
    }

    fn begin_animation(&mut self, animation: Option<AnimationAttributes>) {
        self.animation_stack.push(animation);
    }

    fn commit_animation(&mut self, completion: Option<AnimationCompletion>) {
        let Some(animation) = self.animation_stack.pop() else {
            log::warn!("commit_animation called without an open animation scope");
            return;
        };
        if let Some(completion) = completion {
            let duration = animation.map_or(0, |a| a.total_nanos());
            self.pending_completions.push(PendingCompletion {
                completion,
                deadline_nanos: self.frame_time_nanos + duration,
            });
        }
    }

    fn inherited_animation(&self) -> Option<AnimationAttributes> {
        self.animation_stack.last().copied().flatten()
    }

    fn drain_frame(&mut self, frame_time_nanos: u64) {
        self.frame_time_nanos = self.frame_time_nanos.max(frame_time_nanos);
        let now = self.frame_time_nanos;

        let views = &mut self.views;
        self.animating.retain(|&id| {
            let Some(Some(record)) = views.get_mut(id) else {
                return false;
            };
            let Some(running) = record.animation else {
                return false;
            };
            let elapsed = now.saturating_sub(running.start_nanos);
            if elapsed >= running.attributes.total_nanos() {
                record.presentation = record.model;
                record.animation = None;
                false
            } else {
                let progress = running.attributes.progress(elapsed);
                record.presentation = running.from.lerp(&record.model, progress);
                true
            }
        });

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_completions)
            .into_iter()
            .partition(|pending| pending.deadline_nanos <= now);
        self.pending_completions = pending;
        for pending in due {
            self.fire_completion(pending.completion);
        }
    }
}
