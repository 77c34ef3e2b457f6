//! Frame-stepped simulation of scripted animation requests.
//!
//! A [`Script`] names a set of elements and a list of animation requests, each issued at a given
//! time. [`simulate`] drives a [`CanvasAnimator`] on a [`ManualClock`] at a fixed frame rate and
//! records every element's alpha and position after each tick.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::animation::ease::Transition;
use crate::animation::mode::AnimationMode;
use crate::element::capability::{Animatable, Element, ElementKind};
use crate::element::widgets::{
    Button, Graphic, Image, RawImage, RectTransform, RichTextLabel, TextLabel,
};
use crate::foundation::core::{Rgba, Vec3};
use crate::foundation::error::{CanvasAnimError, CanvasAnimResult};
use crate::scheduler::animator::{CanvasAnimator, TaskId, TickStats};
use crate::scheduler::clock::{Clock, ManualClock};
use crate::scheduler::opts::SchedulerOpts;

fn default_alpha() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// An element the script animates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDef {
    /// Unique name referenced by [`AnimationDef::target`].
    pub name: String,
    /// Element type to create.
    pub kind: ElementKind,
    /// Initial alpha.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Initial local position.
    #[serde(default)]
    pub position: Vec3,
    /// Buttons only: whether the button has a target graphic to tint.
    #[serde(default = "default_true")]
    pub graphic: bool,
}

/// One animation request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationDef {
    /// Script time (seconds) at which the request is issued; it is submitted on the first frame
    /// at or after this time.
    #[serde(default)]
    pub at: f64,
    /// Name of the element to animate.
    pub target: String,
    /// What to do.
    pub mode: AnimationMode,
    /// Seconds; `<= 0` is instantaneous.
    #[serde(default)]
    pub duration: f64,
    /// Seconds to wait after issue.
    #[serde(default)]
    pub delay: f64,
    /// Distance for move modes.
    #[serde(default)]
    pub pixel_offset: i32,
    /// Easing curve.
    #[serde(default)]
    pub transition: Transition,
}

/// A complete simulation input.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Scheduler options.
    #[serde(default)]
    pub opts: SchedulerOpts,
    /// Elements, in snapshot order.
    pub elements: Vec<ElementDef>,
    /// Requests, in any order.
    #[serde(default)]
    pub animations: Vec<AnimationDef>,
}

impl Script {
    /// Parse and validate a script from JSON.
    pub fn from_json_str(s: &str) -> CanvasAnimResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Check options, element names and request targets.
    pub fn validate(&self) -> CanvasAnimResult<()> {
        self.opts.validate()?;

        let mut names = BTreeSet::new();
        for el in &self.elements {
            if !names.insert(el.name.as_str()) {
                return Err(CanvasAnimError::validation(format!(
                    "duplicate element name '{}'",
                    el.name
                )));
            }
            if !el.position.is_finite() {
                return Err(CanvasAnimError::validation(format!(
                    "element '{}' position must be finite",
                    el.name
                )));
            }
        }
        for (i, a) in self.animations.iter().enumerate() {
            if !names.contains(a.target.as_str()) {
                return Err(CanvasAnimError::validation(format!(
                    "animation {i} targets unknown element '{}'",
                    a.target
                )));
            }
            if !a.at.is_finite() || a.at < 0.0 {
                return Err(CanvasAnimError::validation(format!(
                    "animation {i} issue time must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// State of one element after a tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementSnapshot {
    /// Element name.
    pub name: String,
    /// Element type.
    pub kind: ElementKind,
    /// Alpha, `None` for a button without a graphic.
    pub alpha: Option<f64>,
    /// Local position.
    pub position: Vec3,
}

/// Everything recorded for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    /// 0-based frame number.
    pub frame: u64,
    /// Clock reading for the frame, in seconds.
    pub time: f64,
    /// Tasks counted by this frame's tick.
    pub running: usize,
    /// Element states after the tick.
    pub elements: Vec<ElementSnapshot>,
}

/// Output of [`simulate`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Simulation {
    /// Frame rate used.
    pub fps: f64,
    /// One entry per simulated frame.
    pub frames: Vec<FrameSnapshot>,
    /// Requests the scheduler refused.
    pub rejected: usize,
    /// Peak concurrent animations seen.
    pub peak_concurrent_animations: usize,
}

enum LiveElement {
    Text(Rc<RefCell<TextLabel>>),
    Button(Rc<RefCell<Button>>),
    Image(Rc<RefCell<Image>>),
    RawImage(Rc<RefCell<RawImage>>),
    RichText(Rc<RefCell<RichTextLabel>>),
}

fn shared<T>(v: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(v))
}

fn issue<E: Element>(
    anim: &mut CanvasAnimator<ManualClock>,
    el: &Rc<RefCell<E>>,
    def: &AnimationDef,
) -> CanvasAnimResult<TaskId> {
    anim.try_animate(
        el,
        def.mode,
        def.duration,
        def.delay,
        def.pixel_offset,
        def.transition,
    )
}

impl LiveElement {
    fn from_def(def: &ElementDef) -> Self {
        let color = Rgba::WHITE.with_alpha(def.alpha);
        let transform = RectTransform::at(def.position);
        match def.kind {
            ElementKind::Text => Self::Text(shared(TextLabel {
                text: def.name.clone(),
                color,
                transform,
            })),
            ElementKind::RichText => Self::RichText(shared(RichTextLabel {
                text: def.name.clone(),
                color,
                transform,
            })),
            ElementKind::Image => Self::Image(shared(Image {
                sprite: None,
                color,
                transform,
            })),
            ElementKind::RawImage => Self::RawImage(shared(RawImage {
                texture: None,
                color,
                transform,
            })),
            ElementKind::Button => Self::Button(shared(Button {
                target_graphic: def.graphic.then_some(Graphic { color }),
                transform,
            })),
        }
    }

    fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Button(_) => ElementKind::Button,
            Self::Image(_) => ElementKind::Image,
            Self::RawImage(_) => ElementKind::RawImage,
            Self::RichText(_) => ElementKind::RichText,
        }
    }

    fn as_animatable(&self) -> Rc<RefCell<dyn Animatable>> {
        match self {
            Self::Text(e) => e.clone(),
            Self::Button(e) => e.clone(),
            Self::Image(e) => e.clone(),
            Self::RawImage(e) => e.clone(),
            Self::RichText(e) => e.clone(),
        }
    }

    fn schedule(
        &self,
        anim: &mut CanvasAnimator<ManualClock>,
        def: &AnimationDef,
    ) -> CanvasAnimResult<TaskId> {
        match self {
            Self::Text(e) => issue(anim, e, def),
            Self::Button(e) => issue(anim, e, def),
            Self::Image(e) => issue(anim, e, def),
            Self::RawImage(e) => issue(anim, e, def),
            Self::RichText(e) => issue(anim, e, def),
        }
    }
}

/// Incremental driver behind [`simulate`].
pub struct Simulator {
    anim: CanvasAnimator<ManualClock>,
    clock: ManualClock,
    elements: Vec<(String, LiveElement)>,
    pending: Vec<AnimationDef>,
    next: usize,
    rejected: usize,
}

impl Simulator {
    /// Build elements and a scheduler for `script`.
    pub fn new(script: &Script) -> CanvasAnimResult<Self> {
        script.validate()?;
        let clock = ManualClock::default();
        let anim = CanvasAnimator::with_clock(script.opts.clone(), clock.clone())?;
        let elements = script
            .elements
            .iter()
            .map(|d| (d.name.clone(), LiveElement::from_def(d)))
            .collect();
        let mut pending = script.animations.clone();
        pending.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self {
            anim,
            clock,
            elements,
            pending,
            next: 0,
            rejected: 0,
        })
    }

    /// The scheduler being driven.
    pub fn animator(&self) -> &CanvasAnimator<ManualClock> {
        &self.anim
    }

    /// Requests refused so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Move the clock to `now`, submit every request due by then, and tick once.
    pub fn step(&mut self, now: f64) -> TickStats {
        self.clock.set(now);
        while let Some(def) = self.pending.get(self.next) {
            if def.at > now {
                break;
            }
            self.next += 1;
            let Some((_, el)) = self.elements.iter().find(|(n, _)| *n == def.target) else {
                continue;
            };
            if let Err(err) = el.schedule(&mut self.anim, def) {
                self.rejected += 1;
                tracing::warn!(target_name = %def.target, mode = ?def.mode, error = %err, "request rejected");
            }
        }
        self.anim.tick()
    }

    /// Step frame by frame at `fps` through every frame whose time is `<= at`.
    ///
    /// Returns the number of frames stepped.
    pub fn advance_to(&mut self, at: f64, fps: f64) -> CanvasAnimResult<u64> {
        validate_fps(fps)?;
        if !at.is_finite() || at < 0.0 {
            return Err(CanvasAnimError::validation(
                "target time must be finite and >= 0",
            ));
        }
        let mut frame = 0u64;
        loop {
            let time = frame as f64 / fps;
            if time > at {
                return Ok(frame);
            }
            self.step(time);
            frame += 1;
        }
    }

    /// Record the current state of every element.
    pub fn snapshot(&self, frame: u64) -> FrameSnapshot {
        let elements = self
            .elements
            .iter()
            .map(|(name, el)| {
                let handle = el.as_animatable();
                let handle = handle.borrow();
                ElementSnapshot {
                    name: name.clone(),
                    kind: el.kind(),
                    alpha: handle.alpha(),
                    position: handle.local_position(),
                }
            })
            .collect();
        FrameSnapshot {
            frame,
            time: self.clock.now_secs(),
            running: self.anim.running_animations(),
            elements,
        }
    }
}

fn validate_fps(fps: f64) -> CanvasAnimResult<()> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(CanvasAnimError::validation("fps must be finite and > 0"));
    }
    Ok(())
}

/// Upper bound on frames recorded by a single [`simulate`] call.
pub const MAX_SIMULATED_FRAMES: u64 = 1_000_000;

/// Run `script` for `frames` frames at `fps`, snapshotting after every tick.
#[tracing::instrument(skip(script), fields(elements = script.elements.len(), animations = script.animations.len()))]
pub fn simulate(script: &Script, fps: f64, frames: u64) -> CanvasAnimResult<Simulation> {
    validate_fps(fps)?;
    if frames > MAX_SIMULATED_FRAMES {
        return Err(CanvasAnimError::validation(format!(
            "frames must be <= {MAX_SIMULATED_FRAMES}, got {frames}"
        )));
    }
    let mut sim = Simulator::new(script)?;
    let mut out = Vec::with_capacity(usize::try_from(frames.min(4096)).unwrap_or(0));
    for frame in 0..frames {
        sim.step(frame as f64 / fps);
        out.push(sim.snapshot(frame));
    }
    Ok(Simulation {
        fps,
        frames: out,
        rejected: sim.rejected,
        peak_concurrent_animations: sim.anim.peak_concurrent_animations(),
    })
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
