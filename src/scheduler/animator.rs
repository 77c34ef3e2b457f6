use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::ease::Transition;
use crate::animation::mode::{AnimationMode, Direction};
use crate::animation::timing::Timing;
use crate::element::capability::{Element, ElementKind};
use crate::element::targets::TargetPools;
use crate::foundation::core::Vec3;
use crate::foundation::error::{CanvasAnimError, CanvasAnimResult};
use crate::pool::descriptor::TaskDescriptor;
use crate::pool::slot_pool::{SlotIndex, SlotPool};
use crate::scheduler::clock::{Clock, MonotonicClock};
use crate::scheduler::opts::SchedulerOpts;

/// Handle to a scheduled animation: the slot of its descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub SlotIndex);

/// What one [`CanvasAnimator::tick`] saw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Occupied descriptor slots at the start of the tick.
    pub active: usize,
    /// Tasks still inside their delay.
    pub waiting: usize,
    /// Tasks whose element is gone (or borrowed elsewhere this frame).
    pub stale: usize,
    /// Tasks that reached full progress and were retired.
    pub finished: usize,
}

/// Occupied slot count of every pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PoolUsage {
    /// Descriptor pool.
    pub tasks: usize,
    /// All element-handle pools combined.
    pub targets: usize,
    /// Duration pool.
    pub durations: usize,
    /// Start-time pool.
    pub start_times: usize,
    /// Pixel-offset pool.
    pub pixel_offsets: usize,
    /// Delay pool.
    pub delays: usize,
    /// Start-position pool.
    pub start_positions: usize,
    /// Transition pool.
    pub transitions: usize,
    /// Animation-mode pool.
    pub modes: usize,
    /// Element-kind pool.
    pub element_kinds: usize,
}

enum Step {
    Stale,
    Waiting,
    Running,
    Finished,
}

fn status<T>(pool: &SlotPool<T>) -> (&'static str, bool, usize) {
    (pool.name(), pool.is_full(), pool.capacity())
}

/// Fixed-capacity scheduler driving fades and directional moves of UI elements.
///
/// Every task attribute lives in its own [`SlotPool`]; a [`TaskDescriptor`] stored in the task
/// pool links a task's slots together. All pools share the capacity from [`SchedulerOpts`] and
/// never grow. Requests are admitted only when every pool has room, so a rejected request never
/// holds slots.
///
/// The scheduler is single-threaded: create tasks and call [`CanvasAnimator::tick`] from the same
/// update loop.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use canvas_anim::{CanvasAnimator, ManualClock, SchedulerOpts, TextLabel, Transition};
///
/// let clock = ManualClock::default();
/// let mut anim = CanvasAnimator::with_clock(SchedulerOpts::default(), clock.clone()).unwrap();
/// let label = Rc::new(RefCell::new(TextLabel::default()));
///
/// anim.fade_out(&label, 1.0, 0.0, Transition::Linear);
/// clock.advance(0.5);
/// anim.tick();
/// assert_eq!(label.borrow().color.a, 0.5);
/// ```
pub struct CanvasAnimator<C: Clock = MonotonicClock> {
    clock: C,
    opts: SchedulerOpts,

    tasks: SlotPool<TaskDescriptor>,
    targets: TargetPools,
    durations: SlotPool<f64>,
    start_times: SlotPool<f64>,
    pixel_offsets: SlotPool<i32>,
    delays: SlotPool<f64>,
    start_positions: SlotPool<Vec3>,
    transitions: SlotPool<Transition>,
    modes: SlotPool<AnimationMode>,
    element_kinds: SlotPool<ElementKind>,

    running: usize,
    peak: usize,
}

impl CanvasAnimator<MonotonicClock> {
    /// Scheduler on the process monotonic clock.
    pub fn new(opts: SchedulerOpts) -> CanvasAnimResult<Self> {
        Self::with_clock(opts, MonotonicClock::new())
    }
}

impl<C: Clock> CanvasAnimator<C> {
    /// Scheduler reading time from `clock`.
    pub fn with_clock(opts: SchedulerOpts, clock: C) -> CanvasAnimResult<Self> {
        opts.validate()?;
        let n = opts.max_concurrent_animations;
        Ok(Self {
            clock,
            tasks: SlotPool::new("tasks", n),
            targets: TargetPools::new(n),
            durations: SlotPool::new("durations", n),
            start_times: SlotPool::new("start_times", n),
            pixel_offsets: SlotPool::new("pixel_offsets", n),
            delays: SlotPool::new("delays", n),
            start_positions: SlotPool::new("start_positions", n),
            transitions: SlotPool::new("transitions", n),
            modes: SlotPool::new("modes", n),
            element_kinds: SlotPool::new("element_kinds", n),
            opts,
            running: 0,
            peak: 0,
        })
    }

    /// Options this scheduler was built with.
    pub fn opts(&self) -> &SchedulerOpts {
        &self.opts
    }

    /// The clock tasks are timed against.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Tasks counted by the most recent tick.
    pub fn running_animations(&self) -> usize {
        self.running
    }

    /// Highest [`CanvasAnimator::running_animations`] ever observed.
    pub fn peak_concurrent_animations(&self) -> usize {
        self.peak
    }

    /// Return `true` while the task behind `id` still occupies its slots.
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.is_occupied(id.0)
    }

    /// Descriptor of a scheduled task.
    pub fn descriptor(&self, id: TaskId) -> Option<TaskDescriptor> {
        self.tasks.get(id.0).copied()
    }

    /// Every scheduled task with its descriptor, in slot order.
    pub fn descriptors(&self) -> impl Iterator<Item = (TaskId, TaskDescriptor)> + '_ {
        self.tasks.iter().map(|(i, d)| (TaskId(i), *d))
    }

    /// Occupied slots per pool.
    pub fn pool_usage(&self) -> PoolUsage {
        PoolUsage {
            tasks: self.tasks.len(),
            targets: self.targets.total_len(),
            durations: self.durations.len(),
            start_times: self.start_times.len(),
            pixel_offsets: self.pixel_offsets.len(),
            delays: self.delays.len(),
            start_positions: self.start_positions.len(),
            transitions: self.transitions.len(),
            modes: self.modes.len(),
            element_kinds: self.element_kinds.len(),
        }
    }

    fn first_full_pool<E: Element>(&self) -> Option<(&'static str, usize)> {
        if self.targets.is_full_for::<E>() {
            return Some(self.targets.pool_info::<E>());
        }
        [
            status(&self.durations),
            status(&self.start_times),
            status(&self.pixel_offsets),
            status(&self.delays),
            status(&self.start_positions),
            status(&self.transitions),
            status(&self.modes),
            status(&self.element_kinds),
            status(&self.tasks),
        ]
        .into_iter()
        .find(|&(_, full, _)| full)
        .map(|(name, _, capacity)| (name, capacity))
    }

    /// Schedule `mode` on `element`, reporting rejection as an error.
    ///
    /// `duration` and `delay` are seconds; `pixel_offset` is only read by the move modes.
    pub fn try_animate<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        mode: AnimationMode,
        duration: f64,
        delay: f64,
        pixel_offset: i32,
        transition: Transition,
    ) -> CanvasAnimResult<TaskId> {
        if !duration.is_finite() || !delay.is_finite() {
            return Err(CanvasAnimError::validation(
                "animation duration and delay must be finite",
            ));
        }
        if let Some((pool, capacity)) = self.first_full_pool::<E>() {
            return Err(CanvasAnimError::pool_exhausted(pool, capacity));
        }
        let start_position = element
            .try_borrow()
            .map_err(|_| CanvasAnimError::validation("element is mutably borrowed"))?
            .local_position();
        let now = self.clock.now_secs();

        // Room in every pool was checked above, so none of these can fail part-way.
        let desc = TaskDescriptor {
            target: self.targets.allocate(element)?,
            duration: self.durations.try_allocate(duration)?,
            start_time: self.start_times.try_allocate(now)?,
            pixel_offset: self.pixel_offsets.try_allocate(pixel_offset)?,
            delay: self.delays.try_allocate(delay)?,
            start_position: self.start_positions.try_allocate(start_position)?,
            transition: self.transitions.try_allocate(transition)?,
            mode: self.modes.try_allocate(mode)?,
            element_kind: self.element_kinds.try_allocate(E::KIND)?,
        };
        let id = TaskId(self.tasks.try_allocate(desc)?);

        tracing::debug!(
            task = id.0.0,
            descriptor = %desc,
            kind = ?E::KIND,
            ?mode,
            "animation scheduled"
        );
        Ok(id)
    }

    /// Fade `element` from transparent to opaque.
    pub fn try_fade_in<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        duration: f64,
        delay: f64,
        transition: Transition,
    ) -> CanvasAnimResult<TaskId> {
        self.try_animate(element, AnimationMode::FadeIn, duration, delay, 0, transition)
    }

    /// Fade `element` from opaque to transparent.
    pub fn try_fade_out<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        duration: f64,
        delay: f64,
        transition: Transition,
    ) -> CanvasAnimResult<TaskId> {
        self.try_animate(element, AnimationMode::FadeOut, duration, delay, 0, transition)
    }

    /// Slide `element` into its current position from `pixel_offset` away along `direction`.
    pub fn try_move<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        direction: Direction,
        duration: f64,
        delay: f64,
        pixel_offset: i32,
        transition: Transition,
    ) -> CanvasAnimResult<TaskId> {
        self.try_animate(
            element,
            direction.mode(),
            duration,
            delay,
            pixel_offset,
            transition,
        )
    }

    fn submit(
        &mut self,
        kind: ElementKind,
        mode: AnimationMode,
        res: CanvasAnimResult<TaskId>,
    ) -> &mut Self {
        if let Err(err) = res {
            tracing::error!(?kind, ?mode, error = %err, "couldn't assign animation task");
        }
        self
    }

    /// Fluent [`CanvasAnimator::try_fade_in`]; rejections are logged and dropped.
    pub fn fade_in<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        duration: f64,
        delay: f64,
        transition: Transition,
    ) -> &mut Self {
        let res = self.try_fade_in(element, duration, delay, transition);
        self.submit(E::KIND, AnimationMode::FadeIn, res)
    }

    /// Fluent [`CanvasAnimator::try_fade_out`]; rejections are logged and dropped.
    pub fn fade_out<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        duration: f64,
        delay: f64,
        transition: Transition,
    ) -> &mut Self {
        let res = self.try_fade_out(element, duration, delay, transition);
        self.submit(E::KIND, AnimationMode::FadeOut, res)
    }

    fn move_dir<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        direction: Direction,
        duration: f64,
        delay: f64,
        pixel_offset: i32,
        transition: Transition,
    ) -> &mut Self {
        let res = self.try_move(element, direction, duration, delay, pixel_offset, transition);
        self.submit(E::KIND, direction.mode(), res)
    }

    /// Slide in from `pixel_offset` below; rejections are logged and dropped.
    pub fn move_down<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        duration: f64,
        delay: f64,
        pixel_offset: i32,
        transition: Transition,
    ) -> &mut Self {
        self.move_dir(element, Direction::Down, duration, delay, pixel_offset, transition)
    }

    /// Slide in from `pixel_offset` above; rejections are logged and dropped.
    pub fn move_up<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        duration: f64,
        delay: f64,
        pixel_offset: i32,
        transition: Transition,
    ) -> &mut Self {
        self.move_dir(element, Direction::Up, duration, delay, pixel_offset, transition)
    }

    /// Slide in from `pixel_offset` to the right; rejections are logged and dropped.
    pub fn move_left<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        duration: f64,
        delay: f64,
        pixel_offset: i32,
        transition: Transition,
    ) -> &mut Self {
        self.move_dir(element, Direction::Left, duration, delay, pixel_offset, transition)
    }

    /// Slide in from `pixel_offset` to the left; rejections are logged and dropped.
    pub fn move_right<E: Element>(
        &mut self,
        element: &Rc<RefCell<E>>,
        duration: f64,
        delay: f64,
        pixel_offset: i32,
        transition: Transition,
    ) -> &mut Self {
        self.move_dir(element, Direction::Right, duration, delay, pixel_offset, transition)
    }

    /// Advance every task to the current clock reading.
    ///
    /// Tasks whose element is gone are skipped and keep their slots until [`CanvasAnimator::reset`].
    /// Tasks that reach full progress are applied one last time and retired in the same tick.
    pub fn tick(&mut self) -> TickStats {
        let now = self.clock.now_secs();
        let mut stats = TickStats::default();

        for i in 0..self.tasks.capacity() {
            let id = TaskId(SlotIndex(i as u32));
            let Some(&desc) = self.tasks.get(id.0) else {
                continue;
            };
            stats.active += 1;

            match self.advance(desc, now) {
                Ok(Step::Stale) => stats.stale += 1,
                Ok(Step::Waiting) => stats.waiting += 1,
                Ok(Step::Running) => {}
                Ok(Step::Finished) => {
                    self.retire(id, desc);
                    stats.finished += 1;
                    tracing::debug!(task = i, descriptor = %desc, "animation finished");
                }
                Err(err) => {
                    tracing::error!(
                        task = i,
                        descriptor = %desc,
                        error = %err,
                        "dropping corrupt animation task"
                    );
                    self.retire(id, desc);
                }
            }
        }

        self.running = stats.active;
        self.peak = self.peak.max(stats.active);
        tracing::trace!(
            active = stats.active,
            waiting = stats.waiting,
            stale = stats.stale,
            finished = stats.finished,
            "animation tick"
        );
        stats
    }

    fn advance(&self, desc: TaskDescriptor, now: f64) -> CanvasAnimResult<Step> {
        let kind = *self.element_kinds.expect_slot(desc.element_kind)?;
        let Some(target) = self.targets.resolve(kind, desc.target) else {
            return Ok(Step::Stale);
        };

        let timing = Timing {
            start_time: *self.start_times.expect_slot(desc.start_time)?,
            delay: *self.delays.expect_slot(desc.delay)?,
            duration: *self.durations.expect_slot(desc.duration)?,
        };
        let Some(t) = timing.progress(now) else {
            return Ok(Step::Waiting);
        };
        let eased = self.transitions.expect_slot(desc.transition)?.apply(t);
        let mode = *self.modes.expect_slot(desc.mode)?;

        // Held by the caller across the tick; try again next frame.
        let Ok(mut el) = target.try_borrow_mut() else {
            return Ok(Step::Stale);
        };
        if let Some(alpha) = mode.alpha(eased) {
            el.set_alpha(alpha);
        } else if let Some(dir) = mode.direction() {
            let start = *self.start_positions.expect_slot(desc.start_position)?;
            let offset = *self.pixel_offsets.expect_slot(desc.pixel_offset)?;
            el.set_local_position(dir.position_at(start, offset, eased));
        }

        Ok(if t >= 1.0 { Step::Finished } else { Step::Running })
    }

    fn retire(&mut self, id: TaskId, desc: TaskDescriptor) {
        if let Some(&kind) = self.element_kinds.get(desc.element_kind) {
            self.targets.free(kind, desc.target);
        }
        self.durations.free(desc.duration);
        self.start_times.free(desc.start_time);
        self.pixel_offsets.free(desc.pixel_offset);
        self.delays.free(desc.delay);
        self.start_positions.free(desc.start_position);
        self.transitions.free(desc.transition);
        self.modes.free(desc.mode);
        self.element_kinds.free(desc.element_kind);
        self.tasks.free(id.0);
    }

    /// Drop every task and free all slots. The peak counter is kept.
    pub fn reset(&mut self) {
        let dropped = self.tasks.len();
        self.tasks.clear();
        self.targets.clear();
        self.durations.clear();
        self.start_times.clear();
        self.pixel_offsets.clear();
        self.delays.clear();
        self.start_positions.clear();
        self.transitions.clear();
        self.modes.clear();
        self.element_kinds.clear();
        self.running = 0;
        tracing::debug!(dropped, "animation scheduler reset");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/animator.rs"]
mod tests;
