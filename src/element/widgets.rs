use std::cell::RefCell;
use std::rc::Weak;

use crate::element::capability::{Animatable, Element, ElementKind};
use crate::element::targets::TargetPools;
use crate::foundation::core::{Rgba, Vec3};
use crate::pool::slot_pool::SlotPool;

/// Transform carried by every element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectTransform {
    /// Position relative to the parent.
    pub local_position: Vec3,
}

impl RectTransform {
    /// Transform at `local_position`.
    pub fn at(local_position: Vec3) -> Self {
        Self { local_position }
    }
}

/// Tintable graphic a [`Button`] draws through.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Graphic {
    /// Tint color.
    pub color: Rgba,
}

/// Plain text label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLabel {
    /// Displayed text.
    pub text: String,
    /// Tint color.
    pub color: Rgba,
    /// Placement.
    pub transform: RectTransform,
}

/// Rich-text label (markup-aware text component).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichTextLabel {
    /// Displayed markup.
    pub text: String,
    /// Tint color.
    pub color: Rgba,
    /// Placement.
    pub transform: RectTransform,
}

/// Sprite image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image {
    /// Sprite identifier, if any.
    pub sprite: Option<String>,
    /// Tint color.
    pub color: Rgba,
    /// Placement.
    pub transform: RectTransform,
}

/// Image backed by a raw texture.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawImage {
    /// Texture identifier, if any.
    pub texture: Option<String>,
    /// Tint color.
    pub color: Rgba,
    /// Placement.
    pub transform: RectTransform,
}

/// Clickable button. Fades act on `target_graphic`; with no graphic they do nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Button {
    /// Graphic tinted by the button.
    pub target_graphic: Option<Graphic>,
    /// Placement.
    pub transform: RectTransform,
}

macro_rules! tinted_element {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl Animatable for $ty {
            fn alpha(&self) -> Option<f64> {
                Some(self.color.a)
            }

            fn set_alpha(&mut self, alpha: f64) {
                self.color = self.color.with_alpha(alpha);
            }

            fn local_position(&self) -> Vec3 {
                self.transform.local_position
            }

            fn set_local_position(&mut self, position: Vec3) {
                self.transform.local_position = position;
            }
        }

        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;

            fn handles(targets: &mut TargetPools) -> &mut SlotPool<Weak<RefCell<Self>>> {
                &mut targets.$field
            }

            fn handles_ref(targets: &TargetPools) -> &SlotPool<Weak<RefCell<Self>>> {
                &targets.$field
            }
        }
    };
}

tinted_element!(TextLabel, Text, texts);
tinted_element!(RichTextLabel, RichText, rich_texts);
tinted_element!(Image, Image, images);
tinted_element!(RawImage, RawImage, raw_images);

impl Animatable for Button {
    fn alpha(&self) -> Option<f64> {
        self.target_graphic.map(|g| g.color.a)
    }

    fn set_alpha(&mut self, alpha: f64) {
        if let Some(g) = self.target_graphic.as_mut() {
            g.color = g.color.with_alpha(alpha);
        }
    }

    fn local_position(&self) -> Vec3 {
        self.transform.local_position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.transform.local_position = position;
    }
}

impl Element for Button {
    const KIND: ElementKind = ElementKind::Button;

    fn handles(targets: &mut TargetPools) -> &mut SlotPool<Weak<RefCell<Self>>> {
        &mut targets.buttons
    }

    fn handles_ref(targets: &TargetPools) -> &SlotPool<Weak<RefCell<Self>>> {
        &targets.buttons
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/widgets.rs"]
mod tests;
