/// Easing curves mapping normalized progress to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Transition {
    /// No curve requested; behaves like [`Transition::Linear`].
    None,
    /// Identity.
    #[default]
    Linear,
    /// Quadratic ease-in.
    EaseIn,
    /// Quadratic ease-out.
    EaseOut,
    /// Smoothstep (`3t² - 2t³`).
    EaseInOut,
}

impl Transition {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
    ];

    /// Apply this curve to progress `t`. Inputs outside `[0, 1]` are clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::None | Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
