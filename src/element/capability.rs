use std::cell::RefCell;
use std::rc::Weak;

use crate::element::targets::TargetPools;
use crate::foundation::core::Vec3;
use crate::pool::slot_pool::SlotPool;

/// Animatable element kinds. Each one has its own handle pool in [`TargetPools`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementKind {
    /// Plain text label.
    Text,
    /// Button; alpha is applied to its target graphic.
    Button,
    /// Sprite image.
    Image,
    /// Raw texture image.
    RawImage,
    /// Rich-text label.
    RichText,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::Button,
        Self::Image,
        Self::RawImage,
        Self::RichText,
    ];
}

/// What the scheduler needs from an element: its alpha channel and its local position.
pub trait Animatable {
    /// Current alpha, or `None` when the element has nothing to tint.
    fn alpha(&self) -> Option<f64>;

    /// Replace the alpha channel. Elements without a color ignore this.
    fn set_alpha(&mut self, alpha: f64);

    /// Position relative to the parent transform.
    fn local_position(&self) -> Vec3;

    /// Move relative to the parent transform.
    fn set_local_position(&mut self, position: Vec3);
}

/// A concrete element type the scheduler can hold weak handles to.
pub trait Element: Animatable + Sized + 'static {
    /// Tag stored with each task targeting this type.
    const KIND: ElementKind;

    /// Handle pool for this type.
    fn handles(targets: &mut TargetPools) -> &mut SlotPool<Weak<RefCell<Self>>>;

    /// Read-only handle pool for this type.
    fn handles_ref(targets: &TargetPools) -> &SlotPool<Weak<RefCell<Self>>>;
}
