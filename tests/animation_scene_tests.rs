use crossbeam::channel::unbounded;
use fresnel::animation::{AnimationClock, AnimationDriver};
use fresnel::config::FresnelConfig;
use fresnel::exercise::Feedback;
use fresnel::scene::Scene;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn fast_driver(scene: &Scene, step: f64) -> AnimationDriver {
    let reference = *scene.reference_signal().unwrap();
    AnimationDriver::new(
        AnimationClock::new(&reference, step),
        Duration::from_millis(1),
    )
}

#[test]
fn test_correct_answer_from_default_config() {
    let mut scene = Scene::from_config(&FresnelConfig::default()).unwrap();
    let feedback = scene.validate("4.3*sin(314*t + pi/30)");

    assert!(feedback.is_correct(), "expected success, got {}", feedback);
    let frame = scene.frame(0.0);
    assert_eq!(frame.signals.len(), 1);
    assert_eq!(frame.signals[0].label, "custom");
}

#[test]
fn test_wrong_answer_is_still_drawn() {
    let mut scene = Scene::from_config(&FresnelConfig::default()).unwrap();
    let feedback = scene.validate("4.3*sin(314*t + pi/6)");

    assert!(matches!(feedback, Feedback::Validated { .. }));
    assert!(!scene.frame(0.0).is_empty());
}

#[test]
fn test_frames_follow_clock() {
    let mut scene = Scene::from_config(&FresnelConfig::default()).unwrap();
    scene.toggle_reference(0);
    scene.toggle_reference(1);
    let scene = Arc::new(scene);

    let mut driver = fast_driver(&scene, 0.0005);
    let (tx, rx) = unbounded();
    let listener_scene = Arc::clone(&scene);
    driver.subscribe(move |time| {
        let _ = tx.send(listener_scene.frame(time));
    });

    assert!(driver.toggle());
    let frames: Vec<_> = (0..5)
        .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
        .collect();
    assert!(!driver.toggle());

    for (i, frame) in frames.iter().enumerate() {
        let expected = 0.0005 * (i + 1) as f64;
        assert!((frame.time - expected).abs() < 1e-12, "frame {} at {}", i, frame.time);
        assert_eq!(frame.signals.len(), 2);
        assert_eq!(frame.diagram.as_ref().unwrap().phasors.len(), 2);
    }
}

#[test]
fn test_reset_while_paused_draws_origin() {
    let scene = Scene::from_config(&FresnelConfig::default()).unwrap();
    let driver = fast_driver(&scene, 0.001);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    driver.subscribe(move |time| sink.lock().unwrap().push(time));

    driver.reset();
    assert_eq!(*seen.lock().unwrap(), vec![0.0]);
    assert_eq!(driver.current_time(), 0.0);
}

#[test]
fn test_clock_loops_over_reference_window() {
    let scene = Scene::from_config(&FresnelConfig::default()).unwrap();
    let reference = *scene.reference_signal().unwrap();
    let window = 3.0 * reference.period();

    let mut clock = AnimationClock::new(&reference, 0.0005);
    let mut wrapped = false;
    let mut previous = 0.0;
    for _ in 0..200 {
        let time = clock.tick();
        assert!(time <= window);
        if time < previous {
            wrapped = true;
            assert_eq!(time, 0.0);
        }
        previous = time;
    }
    assert!(wrapped, "clock never looped within 200 steps");
}
