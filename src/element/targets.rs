use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::element::capability::{Animatable, Element, ElementKind};
use crate::element::widgets::{Button, Image, RawImage, RichTextLabel, TextLabel};
use crate::foundation::error::CanvasAnimResult;
use crate::pool::slot_pool::{SlotIndex, SlotPool};

/// One non-owning handle pool per element kind.
///
/// Handles are weak: dropping an element elsewhere never notifies the scheduler, it just stops
/// resolving.
#[derive(Debug)]
pub struct TargetPools {
    pub(crate) texts: SlotPool<Weak<RefCell<TextLabel>>>,
    pub(crate) buttons: SlotPool<Weak<RefCell<Button>>>,
    pub(crate) images: SlotPool<Weak<RefCell<Image>>>,
    pub(crate) raw_images: SlotPool<Weak<RefCell<RawImage>>>,
    pub(crate) rich_texts: SlotPool<Weak<RefCell<RichTextLabel>>>,
}

fn upgrade<E: Element>(
    pool: &SlotPool<Weak<RefCell<E>>>,
    idx: SlotIndex,
) -> Option<Rc<RefCell<dyn Animatable>>> {
    let el: Rc<RefCell<dyn Animatable>> = pool.get(idx)?.upgrade()?;
    Some(el)
}

impl TargetPools {
    /// Empty pools of `capacity` handles each.
    pub fn new(capacity: usize) -> Self {
        Self {
            texts: SlotPool::new("text_targets", capacity),
            buttons: SlotPool::new("button_targets", capacity),
            images: SlotPool::new("image_targets", capacity),
            raw_images: SlotPool::new("raw_image_targets", capacity),
            rich_texts: SlotPool::new("rich_text_targets", capacity),
        }
    }

    /// Store a weak handle to `element` in its kind's pool.
    pub fn allocate<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
    ) -> CanvasAnimResult<SlotIndex> {
        E::handles(self).try_allocate(Rc::downgrade(element))
    }

    /// Return `true` when the pool for `E` has no free slot.
    pub fn is_full_for<E: Element>(&self) -> bool {
        E::handles_ref(self).is_full()
    }

    /// Pool name and capacity for `E`, for diagnostics.
    pub fn pool_info<E: Element>(&self) -> (&'static str, usize) {
        let pool = E::handles_ref(self);
        (pool.name(), pool.capacity())
    }

    /// Live element behind (`kind`, `idx`), or `None` if the slot is free or the element is gone.
    pub fn resolve(
        &self,
        kind: ElementKind,
        idx: SlotIndex,
    ) -> Option<Rc<RefCell<dyn Animatable>>> {
        match kind {
            ElementKind::Text => upgrade(&self.texts, idx),
            ElementKind::Button => upgrade(&self.buttons, idx),
            ElementKind::Image => upgrade(&self.images, idx),
            ElementKind::RawImage => upgrade(&self.raw_images, idx),
            ElementKind::RichText => upgrade(&self.rich_texts, idx),
        }
    }

    /// Release (`kind`, `idx`). Returns `true` if the slot was occupied.
    pub fn free(&mut self, kind: ElementKind, idx: SlotIndex) -> bool {
        match kind {
            ElementKind::Text => self.texts.free(idx).is_some(),
            ElementKind::Button => self.buttons.free(idx).is_some(),
            ElementKind::Image => self.images.free(idx).is_some(),
            ElementKind::RawImage => self.raw_images.free(idx).is_some(),
            ElementKind::RichText => self.rich_texts.free(idx).is_some(),
        }
    }

    /// Occupied handle count for `kind`.
    pub fn len(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Text => self.texts.len(),
            ElementKind::Button => self.buttons.len(),
            ElementKind::Image => self.images.len(),
            ElementKind::RawImage => self.raw_images.len(),
            ElementKind::RichText => self.rich_texts.len(),
        }
    }

    /// Occupied handle count across all kinds.
    pub fn total_len(&self) -> usize {
        ElementKind::ALL.iter().map(|&k| self.len(k)).sum()
    }

    /// Release every handle.
    pub fn clear(&mut self) {
        self.texts.clear();
        self.buttons.clear();
        self.images.clear();
        self.raw_images.clear();
        self.rich_texts.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/targets.rs"]
mod tests;
