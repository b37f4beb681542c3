use tatter::{
    ClothConfig, ClothEngine, ClothError, PointerState, StepObserver, TracingObserver, Vec2,
};

fn idle() -> PointerState<f32> {
    PointerState::up(Vec2::new(0.0, 0.0))
}

#[test]
fn zero_length_frame_is_a_no_op() {
    let mut engine = ClothEngine::new(10, 1.6f32, ClothConfig::new()).unwrap();
    for _ in 0..10 {
        engine.frame(1.0 / 60.0, idle());
    }
    let before = engine.grid().particles().positions();
    let buffer = engine.vertex_buffer().to_vec();

    assert_eq!(engine.frame(0.0, idle()), 0);

    assert_eq!(engine.grid().particles().positions(), before);
    assert_eq!(engine.vertex_buffer(), &buffer[..]);
}

#[test]
fn one_step_per_fixed_duration_at_unit_speed() {
    let config = ClothConfig::new().with_speed_multiplier(1.0);
    let mut engine = ClothEngine::new(4, 1.0f32, config).unwrap();
    assert_eq!(engine.frame(1.0 / 60.0, idle()), 1);
    assert_eq!(engine.frame(1.0 / 240.0, idle()), 0);
}

#[test]
fn speed_multiplier_doubles_step_rate() {
    let config = ClothConfig::new().with_speed_multiplier(2.0);
    let mut engine = ClothEngine::new(4, 1.0f32, config).unwrap();
    let steps: usize = (0..30).map(|_| engine.frame(1.0 / 60.0, idle())).sum();
    assert!((59..=60).contains(&steps), "expected ~60 steps, got {}", steps);
}

#[test]
fn stalled_frame_is_clamped() {
    let mut engine = ClothEngine::new(4, 1.0f32, ClothConfig::new()).unwrap();
    // Tab was in the background for a minute.
    let steps = engine.frame(60.0, idle());
    assert!((11..=12).contains(&steps), "clamped frame should run ~12 steps, ran {}", steps);
    assert!(engine.clock().accumulator() < engine.clock().fixed_step());
}

#[test]
fn buffer_size_never_changes() {
    let mut engine = ClothEngine::new(12, 1.3f32, ClothConfig::new()).unwrap();
    let expected = 6 * engine.constraint_count();
    assert_eq!(engine.vertex_buffer().len(), expected);

    engine.frame(1.0 / 60.0, PointerState::down(Vec2::new(-1.0, -1.0)));
    for i in 0..40 {
        let t = i as f32 / 40.0;
        engine.frame(1.0 / 60.0, PointerState::down(Vec2::new(-1.0 + 2.0 * t, -1.0 + 2.0 * t)));
        assert_eq!(engine.vertex_buffer().len(), expected);
    }
    assert!(engine.active_constraint_count() < engine.constraint_count());
    assert_eq!(engine.constraint_count() * 6, expected);
}

#[test]
fn project_into_matches_owned_buffer() {
    let mut engine = ClothEngine::new(5, 1.0f32, ClothConfig::new()).unwrap();
    engine.frame(0.5, idle());
    let mut out = vec![0.0f32; engine.vertex_buffer().len()];
    engine.project_into(&mut out).unwrap();
    assert_eq!(&out[..], engine.vertex_buffer());

    let mut short = vec![0.0f32; 3];
    assert!(matches!(
        engine.project_into(&mut short),
        Err(ClothError::BufferSizeMismatch { actual: 3, .. })
    ));
}

#[test]
fn construction_rejects_bad_input() {
    assert_eq!(
        ClothEngine::<f32>::new(0, 1.0, ClothConfig::new()).unwrap_err(),
        ClothError::InvalidColumns { cols: 0 }
    );
    assert!(matches!(
        ClothEngine::<f32>::new(8, -1.0, ClothConfig::new()),
        Err(ClothError::InvalidAspectRatio(_))
    ));
    assert!(matches!(
        ClothEngine::<f32>::new(8, f32::NAN, ClothConfig::new()),
        Err(ClothError::InvalidAspectRatio(_))
    ));
}

#[test]
fn observer_sees_every_phase() {
    #[derive(Default)]
    struct Phases {
        integrations: usize,
        sweeps: usize,
        cut: usize,
        steps: usize,
    }

    impl StepObserver for Phases {
        fn on_integrate(&mut self) { self.integrations += 1; }
        fn on_constraint_iteration(&mut self, _iteration: usize) { self.sweeps += 1; }
        fn on_cut(&mut self, deactivated: usize) { self.cut += deactivated; }
        fn on_step_complete(&mut self) { self.steps += 1; }
    }

    let config = ClothConfig::new().with_speed_multiplier(1.0).with_iterations(3);
    let mut engine = ClothEngine::new(2, 1.0f32, config).unwrap();
    let mut phases = Phases::default();
    engine.press(Vec2::new(-0.3, 0.6));
    engine.drag_to(Vec2::new(0.3, 0.6));
    engine.frame_with_observer(1.0 / 60.0, PointerState::down(Vec2::new(0.3, 0.6)), &mut phases);

    assert_eq!(phases.steps, 1);
    assert_eq!(phases.integrations, 1);
    assert_eq!(phases.sweeps, 3);
    assert_eq!(phases.cut, 1);
}

#[test]
fn tracing_observer_counts_steps() {
    let config = ClothConfig::new().with_speed_multiplier(1.0);
    let mut engine = ClothEngine::new(4, 1.0f32, config).unwrap();
    let mut observer = TracingObserver::new();
    for _ in 0..5 {
        engine.frame_with_observer(1.0 / 60.0, idle(), &mut observer);
    }
    assert_eq!(observer.steps(), 5);
}

#[test]
fn rebuild_resets_cuts_and_clock() {
    let mut engine = ClothEngine::new(6, 1.0f32, ClothConfig::new()).unwrap();
    engine.cut(Vec2::new(-2.0, 0.1), Vec2::new(2.0, 0.1));
    engine.frame(1.0 / 100.0, idle());
    engine.rebuild(10, 2.0).unwrap();

    assert_eq!(engine.cols(), 10);
    assert_eq!(engine.rows(), 5);
    assert_eq!(engine.particle_count(), 11 * 6);
    assert_eq!(engine.active_constraint_count(), engine.constraint_count());
    assert_eq!(engine.clock().accumulator(), 0.0);
    assert_eq!(engine.vertex_buffer().len(), 6 * engine.constraint_count());
}
