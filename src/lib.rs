//! canvas-anim schedules fade and directional-move animations on UI elements.
//!
//! Every attribute of a task lives in its own fixed-capacity slot pool, so the scheduler never
//! allocates per frame and a request that does not fit is refused instead of growing anything.
//!
//! - Build a [`CanvasAnimator`] from [`SchedulerOpts`]
//! - Request animations on shared elements ([`CanvasAnimator::fade_in`], [`CanvasAnimator::try_move`], ...)
//! - Call [`CanvasAnimator::tick`] once per frame
//!
//! [`simulate`] runs a JSON [`Script`] frame by frame for offline inspection.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod element;
pub(crate) mod pool;
pub(crate) mod scheduler;
/// Scripted, frame-stepped simulation.
pub mod script;

pub use crate::foundation::core::{Rgba, Vec2, Vec3};
pub use crate::foundation::error::{CanvasAnimError, CanvasAnimResult};

pub use crate::animation::ease::Transition;
pub use crate::animation::mode::{AnimationMode, Direction};
pub use crate::animation::timing::Timing;
pub use crate::element::capability::{Animatable, Element, ElementKind};
pub use crate::element::targets::TargetPools;
pub use crate::element::widgets::{
    Button, Graphic, Image, RawImage, RectTransform, RichTextLabel, TextLabel,
};
pub use crate::pool::descriptor::{DESCRIPTOR_DELIMITER, TaskDescriptor};
pub use crate::pool::slot_pool::{SlotIndex, SlotPool};
pub use crate::scheduler::animator::{CanvasAnimator, PoolUsage, TaskId, TickStats};
pub use crate::scheduler::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::scheduler::opts::SchedulerOpts;
pub use crate::script::{MAX_SIMULATED_FRAMES, Script, Simulation, Simulator, simulate};
