use super::*;

fn timing(start_time: f64, delay: f64, duration: f64) -> Timing {
    Timing {
        start_time,
        delay,
        duration,
    }
}

#[test]
fn waits_until_start_plus_delay() {
    let t = timing(1.0, 2.0, 1.0);
    assert_eq!(t.progress(1.0), None);
    assert_eq!(t.progress(2.5), None);
    assert_eq!(t.progress(3.0), None);
    assert_eq!(t.progress(3.5), Some(0.5));
}

#[test]
fn progress_clamps_at_one() {
    let t = timing(0.0, 0.0, 2.0);
    assert_eq!(t.progress(1.0), Some(0.5));
    assert_eq!(t.progress(2.0), Some(1.0));
    assert_eq!(t.progress(10.0), Some(1.0));
}

#[test]
fn non_positive_duration_is_instant() {
    assert_eq!(timing(0.0, 0.0, 0.0).progress(0.001), Some(1.0));
    assert_eq!(timing(0.0, 0.0, -1.0).progress(0.001), Some(1.0));
    assert_eq!(timing(0.0, 0.5, 0.0).progress(0.25), None);
}
