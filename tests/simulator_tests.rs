use tether::{
    IterationSchedule, LogObserver, NoOpStepObserver, RopeConfig, RopeError, RopeSimulator, SolverKind,
    StepObserver, Vec3,
};

/// Records which hooks fired and how many sweeps each sub-step ran.
#[derive(Default)]
struct Recorder {
    integrations: usize,
    sweeps_per_substep: Vec<usize>,
    substeps_completed: usize,
    frames: usize,
}

impl StepObserver for Recorder {
    fn on_integrate(&mut self, substep: usize) {
        self.integrations += 1;
        if self.sweeps_per_substep.len() <= substep {
            self.sweeps_per_substep.resize(substep + 1, 0);
        }
    }

    fn on_constraint_sweep(&mut self, substep: usize, _sweep: usize) {
        self.sweeps_per_substep[substep] += 1;
    }

    fn on_substep_complete(&mut self, _substep: usize) {
        self.substeps_completed += 1;
    }

    fn on_step_complete(&mut self) {
        self.frames += 1;
    }
}

fn rope(config: RopeConfig<f64>) -> RopeSimulator<f64> {
    RopeSimulator::new(config).unwrap()
}

#[test]
fn builds_chain_along_x() {
    let origin = Vec3::new(1.0, 2.0, 3.0);
    let sim = rope(
        RopeConfig::new()
            .with_point_count(5)
            .with_rest_length(0.5)
            .with_mass(2.0)
            .with_origin(origin),
    );

    assert_eq!(sim.len(), 5);
    assert_eq!(sim.constraint_count(), 4);
    for (i, p) in sim.points().iter().enumerate() {
        assert_eq!(p.position, origin + Vec3::new(0.5 * i as f64, 0.0, 0.0));
        assert_eq!(p.prev_position, p.position);
        assert_eq!(p.velocity, Vec3::zero());
        assert_eq!(p.inv_mass, 0.5);
        assert_eq!(p.pinned, i == 0);
    }
    for (i, c) in sim.constraints().iter().enumerate() {
        assert_eq!((c.a(), c.b()), (i, i + 1));
        assert_eq!(c.rest_length(), 0.5);
        assert_eq!(c.kind(), SolverKind::Pbd);
    }
}

#[test]
fn xpbd_config_builds_xpbd_constraints() {
    let sim = rope(RopeConfig::new().with_solver(SolverKind::Xpbd));
    assert!(sim.constraints().iter().all(|c| c.kind() == SolverKind::Xpbd));
    assert!(sim.constraints().iter().all(|c| c.lambda() == Some(0.0)));
}

#[test]
fn single_point_rope_has_no_constraints() {
    let mut sim = rope(RopeConfig::new().with_point_count(1));
    assert_eq!(sim.constraint_count(), 0);
    sim.step(1.0 / 60.0, &mut NoOpStepObserver);
    assert_eq!(sim.point(0).position, Vec3::zero());
}

#[test]
fn rejects_unbuildable_config() {
    assert_eq!(
        RopeSimulator::<f32>::new(RopeConfig::new().with_point_count(0)).err(),
        Some(RopeError::InvalidPointCount),
    );
    assert_eq!(
        RopeSimulator::<f32>::new(RopeConfig::new().with_mass(-1.0)).err(),
        Some(RopeError::InvalidMass),
    );
}

#[test]
fn configure_rebuilds_or_keeps_old_rope() {
    let mut sim = rope(RopeConfig::new().with_point_count(4));
    sim.configure(RopeConfig::new().with_point_count(7)).unwrap();
    assert_eq!(sim.len(), 7);

    let err = sim.configure(RopeConfig::new().with_point_count(0));
    assert_eq!(err, Err(RopeError::InvalidPointCount));
    assert_eq!(sim.len(), 7);
}

#[test]
fn ramp_schedule_gives_substep_index_sweeps() {
    let mut sim = rope(RopeConfig::new().with_sub_steps(10));
    let mut rec = Recorder::default();
    sim.step(1.0 / 60.0, &mut rec);

    assert_eq!(rec.integrations, 10);
    assert_eq!(rec.substeps_completed, 10);
    assert_eq!(rec.frames, 1);
    assert_eq!(rec.sweeps_per_substep, (0..10).collect::<Vec<_>>());
}

#[test]
fn fixed_schedule_gives_constant_sweeps() {
    let mut sim = rope(RopeConfig::new());
    let mut rec = Recorder::default();
    sim.advance(1.0 / 60.0, 5, IterationSchedule::Fixed(4), &mut rec);
    assert_eq!(rec.sweeps_per_substep, vec![4; 5]);
}

#[test]
fn first_ramp_substep_projects_nothing() {
    let config = RopeConfig::new().with_point_count(3);
    let mut sim = rope(config.clone());

    // One sub-step per frame under the ramp means zero sweeps: the free
    // points fall as a block and the first segment stretches.
    for _ in 0..2 {
        sim.advance(1.0 / 60.0, 1, IterationSchedule::Ramp, &mut NoOpStepObserver);
    }
    let d01 = sim.point(0).position.distance(sim.point(1).position);
    let d12 = sim.point(1).position.distance(sim.point(2).position);
    assert!(d01 > 1.0);
    assert!((d12 - 1.0).abs() < 1e-12);

    let mut fixed = rope(config);
    for _ in 0..2 {
        fixed.advance(1.0 / 60.0, 1, IterationSchedule::Fixed(1), &mut NoOpStepObserver);
    }
    let d01_fixed = fixed.point(0).position.distance(fixed.point(1).position);
    assert!(d01_fixed < d01);
}

#[test]
fn substep_applies_gravity_through_velocity() {
    let mut sim = rope(RopeConfig::new().with_point_count(3).with_gravity(10.0));
    sim.substep(0.1, 0, &mut NoOpStepObserver);

    // Integration is purely inertial, so nothing has moved yet.
    assert_eq!(sim.positions(), vec![
        Vec3::zero(),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
    ]);
    assert_eq!(sim.point(0).velocity.x, 0.0);
    assert!((sim.point(1).velocity.z + 1.0).abs() < 1e-12);
    assert!((sim.point(2).velocity.z + 1.0).abs() < 1e-12);
}

#[test]
fn invalid_frames_are_skipped() {
    let mut sim = rope(RopeConfig::new());
    sim.step(1.0 / 60.0, &mut NoOpStepObserver);
    let before = sim.points().to_vec();

    let mut rec = Recorder::default();
    sim.advance(1.0 / 60.0, 0, IterationSchedule::Ramp, &mut rec);
    sim.advance(0.0, 10, IterationSchedule::Ramp, &mut rec);
    sim.advance(-1.0, 10, IterationSchedule::Ramp, &mut rec);
    sim.advance(f64::NAN, 10, IterationSchedule::Ramp, &mut rec);

    assert_eq!(sim.points(), &before[..]);
    assert_eq!(rec.integrations, 0);
    assert_eq!(rec.frames, 0);
}

#[test]
fn anchor_point_never_moves() {
    for solver in [SolverKind::Pbd, SolverKind::Xpbd] {
        let origin = Vec3::new(0.0, 0.0, 10.0);
        let mut sim = rope(
            RopeConfig::new()
                .with_point_count(10)
                .with_solver(solver)
                .with_stiffness(0.5)
                .with_origin(origin),
        );
        for _ in 0..120 {
            sim.step(1.0 / 60.0, &mut NoOpStepObserver);
            assert_eq!(sim.point(0).position, origin);
        }
    }
}

#[test]
fn rope_hangs_below_anchor() {
    let mut sim = rope(RopeConfig::new().with_point_count(8).with_damping(5.0, 5.0));
    for _ in 0..300 {
        sim.step(1.0 / 60.0, &mut NoOpStepObserver);
    }
    let end = sim.point(7).position;
    assert!(end.z < -6.0, "end should hang near -7, got {:?}", end);
    assert!(end.x.abs() < 0.5);
}

#[test]
fn rope_at_rest_without_gravity_stays_put() {
    let mut sim = rope(RopeConfig::new().with_point_count(6));
    sim.set_gravity(0.0);
    let before = sim.positions();
    for _ in 0..30 {
        sim.step(1.0 / 60.0, &mut NoOpStepObserver);
    }
    assert_eq!(sim.positions(), before);
    assert!(sim.points().iter().all(|p| p.velocity == Vec3::zero()));
}

#[test]
fn damping_setters_update_config() {
    let mut sim = rope(RopeConfig::new());
    sim.set_damping(1.5, 0.25);
    assert_eq!(sim.config().global_damping, 1.5);
    assert_eq!(sim.config().edge_damping, 0.25);
}

#[test]
fn segments_match_constraint_endpoints() {
    let mut sim = rope(RopeConfig::new().with_point_count(4));
    sim.step(1.0 / 60.0, &mut NoOpStepObserver);
    let segments: Vec<_> = sim.segments().collect();
    assert_eq!(segments.len(), 3);
    for (i, (a, b)) in segments.iter().enumerate() {
        assert_eq!(*a, sim.point(i).position);
        assert_eq!(*b, sim.point(i + 1).position);
    }
}

#[test]
fn log_observer_counts_sweeps_until_frame_ends() {
    let mut sim = rope(RopeConfig::new());
    let mut obs = LogObserver::new();
    sim.substep(1.0 / 600.0, 3, &mut obs);
    assert_eq!(obs.sweeps(), 3);
    sim.step(1.0 / 60.0, &mut obs);
    assert_eq!(obs.sweeps(), 0);
}

/// Vertical three-point rope: anchor at the origin, point 1 at rest length
/// below it, point 2 stretched to `z = -3`.
fn stretched_vertical_rope() -> RopeSimulator<f64> {
    let mut sim = rope(
        RopeConfig::new()
            .with_point_count(3)
            .with_gravity(1.0)
            .with_damping(0.5, 0.5),
    );
    sim.set_external_anchor(1, Vec3::new(0.0, 0.0, -1.0)).unwrap();
    sim.release(1).unwrap();
    sim.set_external_anchor(2, Vec3::new(0.0, 0.0, -3.0)).unwrap();
    sim.release(2).unwrap();
    sim
}

fn assert_near(actual: Vec3<f64>, expected: Vec3<f64>) {
    assert!(
        actual.distance(expected) < 1e-12,
        "expected {:?}, got {:?}",
        expected,
        actual,
    );
}

#[test]
fn single_sweep_runs_constraints_in_rope_order() {
    let mut sim = stretched_vertical_rope();
    sim.substep(0.5, 1, &mut NoOpStepObserver);

    // Segment 0-1 is already at rest, so only segment 1-2 moves anything.
    // Solving 1-2 before 0-1 would pull point 1 back to z = -1.
    assert_eq!(sim.positions(), vec![
        Vec3::zero(),
        Vec3::new(0.0, 0.0, -1.5),
        Vec3::new(0.0, 0.0, -2.5),
    ]);
}

#[test]
fn single_pass_damps_globally_then_along_edges() {
    let mut sim = stretched_vertical_rope();
    sim.substep(0.5, 1, &mut NoOpStepObserver);

    // Reconstructed z velocities are -0.5, -1.5, 0.5. Global damping scales
    // the free points by 0.75, then each edge closes a quarter of the gap.
    assert_near(sim.point(0).velocity, Vec3::new(0.0, 0.0, -0.5));
    assert_near(sim.point(1).velocity, Vec3::new(0.0, 0.0, -0.6328125));
    assert_near(sim.point(2).velocity, Vec3::new(0.0, 0.0, 0.0390625));
}

#[test]
fn frame_sweeps_match_schedule_total() {
    for schedule in [IterationSchedule::Ramp, IterationSchedule::Fixed(3)] {
        let mut sim = rope(RopeConfig::new());
        let mut rec = Recorder::default();
        sim.advance(1.0 / 60.0, 10, schedule, &mut rec);
        let swept: usize = rec.sweeps_per_substep.iter().sum();
        assert_eq!(swept, schedule.total_sweeps(10));
    }
}

#[test]
#[should_panic]
fn point_out_of_range_panics() {
    let sim = rope(RopeConfig::new().with_point_count(3));
    let _ = sim.point(3);
}

#[test]
fn checked_point_lookup() {
    let sim = rope(RopeConfig::new().with_point_count(3));
    assert!(sim.points().get(2).is_some());
    assert!(sim.points().get(3).is_none());
}
