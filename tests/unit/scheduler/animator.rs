use super::*;
use crate::element::capability::Animatable;
use crate::element::widgets::{Button, Graphic, Image, RectTransform, TextLabel};
use crate::foundation::core::Rgba;
use crate::scheduler::clock::ManualClock;

fn animator(capacity: usize) -> (CanvasAnimator<ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let anim = CanvasAnimator::with_clock(SchedulerOpts::with_capacity(capacity), clock.clone())
        .unwrap();
    (anim, clock)
}

fn label(alpha: f64, pos: Vec3) -> Rc<RefCell<TextLabel>> {
    Rc::new(RefCell::new(TextLabel {
        text: "x".to_owned(),
        color: Rgba::WHITE.with_alpha(alpha),
        transform: RectTransform::at(pos),
    }))
}

fn assert_slots_occupied(anim: &CanvasAnimator<ManualClock>, d: TaskDescriptor, expected: bool) {
    assert_eq!(anim.durations.is_occupied(d.duration), expected);
    assert_eq!(anim.start_times.is_occupied(d.start_time), expected);
    assert_eq!(anim.pixel_offsets.is_occupied(d.pixel_offset), expected);
    assert_eq!(anim.delays.is_occupied(d.delay), expected);
    assert_eq!(anim.start_positions.is_occupied(d.start_position), expected);
    assert_eq!(anim.transitions.is_occupied(d.transition), expected);
    assert_eq!(anim.modes.is_occupied(d.mode), expected);
    assert_eq!(anim.element_kinds.is_occupied(d.element_kind), expected);
}

#[test]
fn linear_fade_in_tracks_elapsed_time_and_retires() {
    let (mut anim, clock) = animator(4);
    let el = label(0.0, Vec3::ZERO);
    let id = anim
        .try_fade_in(&el, 1.0, 0.0, Transition::Linear)
        .unwrap();

    // Created at t=0: nothing has elapsed yet.
    let stats = anim.tick();
    assert_eq!(stats.waiting, 1);
    assert_eq!(el.borrow().color.a, 0.0);

    clock.set(0.5);
    anim.tick();
    assert_eq!(el.borrow().color.a, 0.5);
    assert!(anim.is_scheduled(id));

    clock.set(1.0);
    let stats = anim.tick();
    assert_eq!(stats.finished, 1);
    assert_eq!(el.borrow().color.a, 1.0);
    assert!(!anim.is_scheduled(id));
    assert_eq!(anim.pool_usage(), PoolUsage::default());
}

#[test]
fn move_down_quarter_progress() {
    let (mut anim, clock) = animator(2);
    let el = label(1.0, Vec3::new(5.0, 10.0, 0.0));
    anim.move_down(&el, 4.0, 0.0, 100, Transition::Linear);

    clock.set(1.0);
    anim.tick();
    assert_eq!(el.borrow().transform.local_position, Vec3::new(5.0, 85.0, 0.0));

    clock.set(4.0);
    anim.tick();
    assert_eq!(el.borrow().transform.local_position, Vec3::new(5.0, 10.0, 0.0));
    assert_eq!(anim.pool_usage().tasks, 0);
}

#[test]
fn delayed_task_holds_slots_without_touching_element() {
    let (mut anim, clock) = animator(2);
    let el = label(0.3, Vec3::ZERO);
    let id = anim
        .try_fade_out(&el, 1.0, 2.0, Transition::EaseIn)
        .unwrap();
    let d = anim.descriptor(id).unwrap();

    for now in [0.5, 1.0, 1.5, 2.0] {
        clock.set(now);
        let stats = anim.tick();
        assert_eq!(stats.waiting, 1, "at {now}");
        assert_eq!(el.borrow().color.a, 0.3);
        assert_slots_occupied(&anim, d, true);
    }

    clock.set(2.5);
    anim.tick();
    assert_eq!(el.borrow().color.a, 0.75);
}

#[test]
fn finishing_one_task_frees_only_its_slots() {
    let (mut anim, clock) = animator(4);
    let a = label(0.0, Vec3::ZERO);
    let b = label(0.0, Vec3::ZERO);
    let short = anim.try_fade_in(&a, 1.0, 0.0, Transition::Linear).unwrap();
    let long = anim.try_fade_in(&b, 5.0, 0.0, Transition::Linear).unwrap();
    let short_d = anim.descriptor(short).unwrap();
    let long_d = anim.descriptor(long).unwrap();

    clock.set(1.0);
    anim.tick();

    assert!(!anim.is_scheduled(short));
    assert_slots_occupied(&anim, short_d, false);
    assert!(!anim.targets.texts.is_occupied(short_d.target));

    assert!(anim.is_scheduled(long));
    assert_slots_occupied(&anim, long_d, true);
    assert!(anim.targets.texts.is_occupied(long_d.target));
    assert_eq!(anim.pool_usage().durations, 1);
}

#[test]
fn rejected_request_leaves_every_pool_untouched() {
    let (mut anim, _clock) = animator(2);
    let el = label(1.0, Vec3::ZERO);
    anim.fade_in(&el, 1.0, 0.0, Transition::Linear)
        .fade_out(&el, 1.0, 0.0, Transition::Linear);
    let before = anim.pool_usage();
    assert_eq!(before.tasks, 2);

    let err = anim
        .try_move(&el, Direction::Up, 1.0, 0.0, 10, Transition::Linear)
        .unwrap_err();
    assert!(err.is_pool_exhausted());
    assert_eq!(anim.pool_usage(), before);

    // Fluent form logs and drops.
    anim.move_left(&el, 1.0, 0.0, 10, Transition::Linear);
    assert_eq!(anim.pool_usage(), before);
}

#[test]
fn full_kind_pool_is_reported_first() {
    let (mut anim, _clock) = animator(1);
    let img = Rc::new(RefCell::new(Image::default()));
    anim.try_fade_in(&img, 1.0, 0.0, Transition::Linear).unwrap();

    let err = anim
        .try_fade_in(&img, 1.0, 0.0, Transition::Linear)
        .unwrap_err();
    assert!(err.to_string().contains("image_targets"));
}

#[test]
fn stale_target_keeps_slots_until_reset() {
    let (mut anim, clock) = animator(2);
    let id = {
        let el = label(0.0, Vec3::ZERO);
        anim.try_fade_in(&el, 1.0, 0.0, Transition::Linear).unwrap()
    };

    clock.set(10.0);
    let stats = anim.tick();
    assert_eq!(stats.stale, 1);
    assert_eq!(stats.active, 1);
    assert!(anim.is_scheduled(id));
    assert_eq!(anim.running_animations(), 1);

    anim.reset();
    assert!(!anim.is_scheduled(id));
    assert_eq!(anim.pool_usage(), PoolUsage::default());
    assert_eq!(anim.running_animations(), 0);
    assert_eq!(anim.peak_concurrent_animations(), 1);
}

#[test]
fn instant_duration_completes_on_first_active_tick() {
    let (mut anim, clock) = animator(1);
    let el = label(1.0, Vec3::ZERO);
    anim.fade_out(&el, 0.0, 0.0, Transition::EaseOut);

    clock.set(0.01);
    let stats = anim.tick();
    assert_eq!(stats.finished, 1);
    assert_eq!(el.borrow().color.a, 0.0);
}

#[test]
fn toggle_is_inert_but_retires() {
    let (mut anim, clock) = animator(1);
    let el = label(0.4, Vec3::new(1.0, 2.0, 3.0));
    anim.try_animate(&el, AnimationMode::Toggle, 1.0, 0.0, 50, Transition::Linear)
        .unwrap();

    clock.set(0.5);
    anim.tick();
    assert_eq!(el.borrow().color.a, 0.4);
    assert_eq!(el.borrow().transform.local_position, Vec3::new(1.0, 2.0, 3.0));

    clock.set(1.0);
    assert_eq!(anim.tick().finished, 1);
}

#[test]
fn button_alpha_goes_through_graphic() {
    let (mut anim, clock) = animator(1);
    let btn = Rc::new(RefCell::new(Button {
        target_graphic: Some(Graphic::default()),
        transform: RectTransform::default(),
    }));
    anim.fade_out(&btn, 2.0, 0.0, Transition::Linear);
    clock.set(1.0);
    anim.tick();
    assert_eq!(btn.borrow().alpha(), Some(0.5));
}

#[test]
fn peak_is_monotonic_across_ticks() {
    let (mut anim, clock) = animator(3);
    let el = label(0.0, Vec3::ZERO);
    anim.fade_in(&el, 1.0, 0.0, Transition::Linear)
        .fade_in(&el, 1.0, 0.0, Transition::Linear)
        .fade_in(&el, 3.0, 0.0, Transition::Linear);

    clock.set(0.5);
    anim.tick();
    assert_eq!(anim.running_animations(), 3);

    clock.set(1.5);
    anim.tick();
    // Two finished during this tick but were still counted.
    assert_eq!(anim.running_animations(), 3);

    clock.set(2.0);
    anim.tick();
    assert_eq!(anim.running_animations(), 1);
    assert_eq!(anim.peak_concurrent_animations(), 3);
}

#[test]
fn freed_descriptor_slot_is_reused() {
    let (mut anim, clock) = animator(2);
    let el = label(0.0, Vec3::ZERO);
    let a = anim.try_fade_in(&el, 1.0, 0.0, Transition::Linear).unwrap();
    let b = anim.try_fade_in(&el, 9.0, 0.0, Transition::Linear).unwrap();
    assert_eq!((a.0, b.0), (SlotIndex(0), SlotIndex(1)));

    clock.set(1.0);
    anim.tick();
    let c = anim.try_fade_in(&el, 1.0, 0.0, Transition::Linear).unwrap();
    assert_eq!(c, a);
}

#[test]
fn descriptors_encode_slot_indices() {
    let (mut anim, _clock) = animator(2);
    let el = label(0.0, Vec3::ZERO);
    anim.try_move(&el, Direction::Right, 1.0, 0.0, 20, Transition::EaseInOut)
        .unwrap();
    let records: Vec<String> = anim.descriptors().map(|(_, d)| d.encode()).collect();
    assert_eq!(records, vec!["0,,,0,,,0,,,0,,,0,,,0,,,0,,,0,,,0".to_owned()]);
}

#[test]
fn non_finite_timing_is_rejected() {
    let (mut anim, _clock) = animator(1);
    let el = label(0.0, Vec3::ZERO);
    assert!(matches!(
        anim.try_fade_in(&el, f64::NAN, 0.0, Transition::Linear),
        Err(CanvasAnimError::Validation(_))
    ));
    assert_eq!(anim.pool_usage().tasks, 0);
}

#[test]
fn zero_capacity_opts_fail_construction() {
    assert!(CanvasAnimator::with_clock(SchedulerOpts::with_capacity(0), ManualClock::default()).is_err());
}
