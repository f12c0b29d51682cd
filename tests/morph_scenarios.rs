use pathmorph::{
    Canvas, Color, CpuSurface, Document, DrawCall, Ease, FrameOutcome, ManualClock, MorphConfig,
    MorphController, MorphError, MorphState, Point, PointSequence, RecordingSurface, interpolate,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn squares_doc() -> Document {
    let mut doc = Document::new().with_canvas("stage", Canvas::new(32, 32).unwrap());
    doc.insert_path_data("small", "M0,0 L1,0 L1,1 L0,1 Z").unwrap();
    doc.insert_path_data("big", "M0,0 L2,0 L2,2 L0,2 Z").unwrap();
    doc
}

fn config() -> MorphConfig {
    MorphConfig {
        sample_steps: 4,
        duration_ms: 100.0,
        ease: Ease::Linear,
        ..MorphConfig::new("stage", "small", "big")
    }
}

fn assert_points_close(got: &[Point], want: &[(f64, f64)]) {
    assert_eq!(got.len(), want.len());
    for (g, &(x, y)) in got.iter().zip(want) {
        assert!(
            (g.x - x).abs() < 1e-9 && (g.y - y).abs() < 1e-9,
            "{g:?} != ({x}, {y})"
        );
    }
}

#[test]
fn sampled_squares_interpolate_halfway() {
    let doc = squares_doc();
    let from = doc.sample("small", 4).unwrap();
    let to = doc.sample("big", 4).unwrap();
    assert_points_close(from.points(), &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    assert_points_close(to.points(), &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);

    let mid = interpolate(&from, &to, 0.5).unwrap();
    assert_points_close(mid.points(), &[(0.0, 0.0), (1.5, 0.0), (1.5, 1.5), (0.0, 1.5)]);
}

fn looping_at(progress_ms: f64) -> (MorphController<RecordingSurface>, ManualClock) {
    init_tracing();
    let clock = ManualClock::new(0.0);
    let mut m: MorphController<RecordingSurface> =
        MorphController::new(config(), &squares_doc(), clock.clone()).unwrap();
    let h = m.start_loop();
    let FrameOutcome::Scheduled(h) = m.on_frame(h).unwrap() else {
        panic!("loop must schedule");
    };
    clock.advance(progress_ms);
    m.on_frame(h).unwrap();
    (m, clock)
}

#[test]
fn stop_loop_below_half_snaps_to_source() {
    let (mut m, _clock) = looping_at(30.0);
    assert!((m.progress() - 0.3).abs() < 1e-9);

    m.stop_loop().unwrap();
    assert_eq!(m.state(), MorphState::Idle);
    assert_eq!(m.pending_frame(), None);
    assert_eq!(m.progress(), 0.0);
    assert_eq!(
        m.surface().last_polyline().unwrap(),
        m.from_points().points().to_vec()
    );
}

#[test]
fn stop_loop_above_half_snaps_to_target() {
    let (mut m, _clock) = looping_at(70.0);
    assert!((m.progress() - 0.7).abs() < 1e-9);

    m.stop_loop().unwrap();
    assert_eq!(m.progress(), 1.0);
    assert_eq!(
        m.surface().last_polyline().unwrap(),
        m.to_points().points().to_vec()
    );
}

#[test]
fn backwards_retargets_from_the_partial_value() {
    init_tracing();
    let clock = ManualClock::new(0.0);
    let mut m: MorphController<RecordingSurface> =
        MorphController::new(config(), &squares_doc(), clock.clone()).unwrap();

    let h = m.forwards();
    clock.advance(40.0);
    let FrameOutcome::Scheduled(pending) = m.on_frame(h).unwrap() else {
        panic!("run is not over yet");
    };
    assert!((m.progress() - 0.4).abs() < 1e-9);

    clock.advance(10.0);
    let h = m.backwards();
    // The sampled value at the retarget instant is kept, not reset to 1.
    assert!((m.progress() - 0.5).abs() < 1e-9);
    assert_eq!(h, pending, "the pending frame is reused");

    clock.advance(50.0);
    m.on_frame(h).unwrap();
    assert!((m.progress() - 0.25).abs() < 1e-9);
    assert!(matches!(m.state(), MorphState::Transitioning { .. }));

    clock.advance(50.0);
    assert_eq!(m.on_frame(m.pending_frame().unwrap()).unwrap(), FrameOutcome::Finished);
    assert_eq!(m.progress(), 0.0);
    assert_eq!(m.state(), MorphState::Idle);
}

#[test]
fn forwards_replaces_a_running_loop() {
    let (mut m, clock) = looping_at(20.0);
    m.forwards();
    assert!(matches!(m.state(), MorphState::Transitioning { .. }));
    clock.advance(100.0);
    let outcome = m.on_frame(m.pending_frame().unwrap()).unwrap();
    assert_eq!(outcome, FrameOutcome::Finished);
    assert_eq!(m.progress(), 1.0);
}

#[test]
fn every_frame_fully_repaints() {
    let (m, _clock) = looping_at(10.0);
    let calls = m.surface().calls();
    let clears = calls.iter().filter(|c| **c == DrawCall::Clear).count();
    assert_eq!(clears, m.surface().presented());
    assert_eq!(m.surface().last_frame()[0], DrawCall::Clear);
}

#[test]
fn unknown_ids_fail_construction_with_typed_errors() {
    init_tracing();
    let doc = squares_doc();

    let missing_canvas = MorphConfig::new("nope", "small", "big");
    let err = MorphController::<RecordingSurface>::new(missing_canvas, &doc, ManualClock::default())
        .unwrap_err();
    assert!(matches!(err, MorphError::Configuration(_)));

    let missing_path = MorphConfig::new("stage", "small", "ghost");
    let err = MorphController::<RecordingSurface>::new(missing_path, &doc, ManualClock::default())
        .unwrap_err();
    assert!(matches!(err, MorphError::Geometry(_)));
    assert!(err.to_string().contains("ghost"));

    // Empty identifiers are only diagnosed; the lookup reports the error.
    let err = MorphController::<RecordingSurface>::new(
        MorphConfig::default(),
        &doc,
        ManualClock::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MorphError::Configuration(_)));
}

#[test]
fn cpu_surface_shows_the_target_after_a_filled_run() {
    init_tracing();
    let mut doc = Document::new().with_canvas("stage", Canvas::new(32, 32).unwrap());
    doc.insert_path_data("small", "M4,4 L12,4 L12,12 L4,12 Z").unwrap();
    doc.insert_path_data("big", "M4,4 L28,4 L28,28 L4,28 Z").unwrap();

    let clock = ManualClock::new(0.0);
    let cfg = MorphConfig {
        fill: true,
        color: Color::rgba(0.0, 0.0, 1.0, 1.0),
        sample_steps: 64,
        ..MorphConfig::new("stage", "small", "big")
    };
    let mut m: MorphController<CpuSurface> =
        MorphController::new(cfg, &doc, clock.clone()).unwrap();
    assert_eq!(m.surface().pixel(8, 8), Some([0, 0, 255, 255]));
    assert_eq!(m.surface().pixel(20, 20), Some([0, 0, 0, 0]));

    let h = m.forwards();
    clock.advance(500.0);
    assert_eq!(m.on_frame(h).unwrap(), FrameOutcome::Finished);
    assert_eq!(m.surface().pixel(20, 20), Some([0, 0, 255, 255]));
    assert_eq!(m.surface().pixel(30, 30), Some([0, 0, 0, 0]));
}

#[test]
fn sequences_keep_positional_correspondence() {
    let from = PointSequence::from(&[(0.0, 0.0), (10.0, 0.0)][..]);
    let to = PointSequence::from(&[(10.0, 0.0), (0.0, 0.0)][..]);
    let mid = interpolate(&from, &to, 0.5).unwrap();
    assert_points_close(mid.points(), &[(5.0, 0.0), (5.0, 0.0)]);
}
