use crate::foundation::core::{Vec2, Vec3};

/// What an animation task does to its element each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AnimationMode {
    /// Inert.
    None,
    /// Alpha goes from 0 to 1.
    FadeIn,
    /// Alpha goes from 1 to 0.
    FadeOut,
    /// Slides in from below its resting position.
    MoveDown,
    /// Slides in from above its resting position.
    MoveUp,
    /// Slides in from the right of its resting position.
    MoveLeft,
    /// Slides in from the left of its resting position.
    MoveRight,
    /// Declared but not implemented; inert.
    Toggle,
}

impl AnimationMode {
    /// Direction for the move modes, `None` otherwise.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveDown => Some(Direction::Down),
            Self::MoveUp => Some(Direction::Up),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            Self::None | Self::FadeIn | Self::FadeOut | Self::Toggle => None,
        }
    }

    /// Alpha for eased progress, `None` for modes that leave alpha alone.
    pub fn alpha(self, eased: f64) -> Option<f64> {
        match self {
            Self::FadeIn => Some(eased),
            Self::FadeOut => Some(1.0 - eased),
            _ => None,
        }
    }
}

/// Axis and sign of a directional move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// `+y` offset that decays to zero.
    Down,
    /// `-y` offset that decays to zero.
    Up,
    /// `+x` offset that decays to zero.
    Left,
    /// `-x` offset that decays to zero.
    Right,
}

impl Direction {
    /// Animation mode that moves in this direction.
    pub fn mode(self) -> AnimationMode {
        match self {
            Self::Down => AnimationMode::MoveDown,
            Self::Up => AnimationMode::MoveUp,
            Self::Left => AnimationMode::MoveLeft,
            Self::Right => AnimationMode::MoveRight,
        }
    }

    /// Signed unit vector the pixel offset is scaled by.
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(1.0, 0.0),
            Self::Right => Vec2::new(-1.0, 0.0),
        }
    }

    /// Position at eased progress: `start` displaced by `pixel_offset * (1 - eased)`.
    pub fn position_at(self, start: Vec3, pixel_offset: i32, eased: f64) -> Vec3 {
        let remaining = f64::from(pixel_offset) * (1.0 - eased);
        start.offset_xy(self.unit() * remaining)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/mode.rs"]
mod tests;
