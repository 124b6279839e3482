mod util;

use iterative_mesh::geometry;
use iterative_mesh::prelude::*;
use util::polygon;

fn warp_engine(seed: u64, policy: ResetPolicy) -> IterativeEngine<IterativeWarpStep> {
    IterativeEngine::with_options(
        IterativeWarpStep::new(IterativeWarpOptions {
            scale_factor: 0.05,
            seed,
            ..IterativeWarpOptions::default()
        }),
        EngineOptions {
            reset_policy: policy,
            ..EngineOptions::default()
        },
    )
}

#[test]
fn same_seed_same_walk() {
    let input = polygon(12);
    let a = warp_engine(42, ResetPolicy::AlwaysFromZero)
        .request_iterations(6, Some(&input), None)
        .unwrap();
    let b = warp_engine(42, ResetPolicy::AlwaysFromZero)
        .request_iterations(6, Some(&input), None)
        .unwrap();
    let c = warp_engine(43, ResetPolicy::AlwaysFromZero)
        .request_iterations(6, Some(&input), None)
        .unwrap();
    assert_eq!(a, b);
    assert_ne!(a.points(), c.points());
}

#[test]
fn resumed_walk_continues_the_random_stream() {
    let input = polygon(12);
    let mut resumed = warp_engine(7, ResetPolicy::ResumeFromCurrent);
    resumed.request_iterations(2, Some(&input), None).unwrap();
    let a = resumed.request_iterations(5, Some(&input), None).unwrap();
    let b = warp_engine(7, ResetPolicy::AlwaysFromZero)
        .request_iterations(5, Some(&input), None)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn recomputing_replays_the_walk() {
    let input = polygon(12);
    let mut engine = warp_engine(3, ResetPolicy::AlwaysFromZero);
    let first = engine.request_iterations(3, Some(&input), None).unwrap();
    let again = engine.request_iterations(3, Some(&input), None).unwrap();
    assert_eq!(first, again);
}

#[test]
fn displacement_is_bounded_per_iteration() {
    let input = polygon(12);
    let mut engine = warp_engine(11, ResetPolicy::AlwaysFromZero);
    let out = engine.request_iterations(4, Some(&input), None).unwrap();
    for (p, q) in out.points().iter().zip(input.points()) {
        assert!(geometry::distance(*p, *q) <= 4.0 * 0.05 + 1e-12);
    }
    let vectors = out.point_data().array("BrownianVectors").unwrap();
    assert_eq!(vectors.len(), input.n_points());
    assert_eq!(out.point_data().active_vectors_name(), Some("BrownianVectors"));
    assert_eq!(out.lines(), input.lines());
}

#[test]
fn inverted_speed_range_is_rejected() {
    let input = polygon(4);
    let mut engine = IterativeEngine::new(IterativeWarpStep::new(IterativeWarpOptions {
        min_speed: 2.0,
        max_speed: 1.0,
        ..IterativeWarpOptions::default()
    }));
    assert!(matches!(
        engine.request_iterations(1, Some(&input), None),
        Err(MeshError::InvalidParameter(_))
    ));
}
