mod util;

use iterative_mesh::prelude::*;
use util::{mean_radius, polygon, polyline, radial};

fn options(extrapolation: ExtrapolationMode) -> RecursiveFilterOptions {
    RecursiveFilterOptions {
        extrapolation,
        keep_signals: true,
        ..RecursiveFilterOptions::default()
    }
}

#[test]
fn identity_kernel_reproduces_a_closed_polygon() {
    let input = polygon(6);
    for mode in [ExtrapolationMode::Closed, ExtrapolationMode::Sphere] {
        let mut filter = SymmetricRecursiveFilter::new(ConstantKernel::default(), options(mode));
        let out = filter.apply(&input).unwrap();
        assert_eq!(out, input, "{mode:?}");
    }
}

#[test]
fn exponential_smoothing_shrinks_a_circle() {
    let input = polygon(12);
    let mut filter = SymmetricRecursiveFilter::new(
        ExponentialSmoothingKernel::new(0.5),
        options(ExtrapolationMode::Closed),
    );
    let out = filter.apply(&input).unwrap();
    let r = mean_radius(&out);
    // zero-phase gain at 2*pi/12 is alpha^2 / |1 - (1 - alpha) e^{-i w}|^2 ~ 0.65
    assert!(r > 0.6 && r < 0.7, "mean radius {r}");
    for &p in out.points() {
        assert!((radial(p) - r).abs() < 0.05);
        assert_eq!(p[2], 0.0);
    }
    assert!(filter.poles().is_empty());
}

#[test]
fn sphere_poles_are_averaged_over_meridians() {
    let sphere = uv_sphere(&UvSphereOptions {
        radius: 1.0,
        meridian_resolution: 8,
        parallel_resolution: 16,
        ..UvSphereOptions::default()
    })
    .unwrap();
    let mut filter = SymmetricRecursiveFilter::new(
        ExponentialSmoothingKernel::new(0.5),
        options(ExtrapolationMode::Sphere),
    );
    let out = filter.apply(&sphere).unwrap();

    assert_eq!(filter.poles().len(), 2);
    for pole in [0, 1] {
        assert!(filter.poles().is_pole(pole));
        assert_eq!(filter.poles().get(pole).unwrap().count, 16);
        let p = out.point(pole).unwrap();
        assert!(p[0].abs() < 1e-9 && p[1].abs() < 1e-9, "pole {pole} drifted to {p:?}");
        assert!(p[2].is_finite());
    }
    // smoothing pulls the north pole inwards
    let north = out.point(1).unwrap();
    assert!(north[2] > 0.0 && north[2] < 1.0);
    assert!(out.is_finite());
}

#[test]
fn signals_are_dropped_unless_kept() {
    let input = polygon(6);
    let mut filter = SymmetricRecursiveFilter::new(
        ConstantKernel::default(),
        RecursiveFilterOptions {
            extrapolation: ExtrapolationMode::Closed,
            keep_signals: false,
            ..RecursiveFilterOptions::default()
        },
    );
    let out = filter.apply(&input).unwrap();
    assert!(out.lines().is_empty());
    assert_eq!(out.points(), input.points());
}

#[test]
fn vector_source_filters_the_active_array() {
    let input = polyline((0..8).map(|i| [i as f64, 0.0, 0.0]).collect())
        .with_vectors("flow", vec![[1.0, 2.0, 3.0]; 8])
        .unwrap();
    let mut filter = SymmetricRecursiveFilter::new(
        ExponentialSmoothingKernel::new(0.5),
        RecursiveFilterOptions {
            extrapolation: ExtrapolationMode::Closed,
            source: SignalSource::Vectors,
            keep_signals: true,
            ..RecursiveFilterOptions::default()
        },
    );
    let out = filter.apply(&input).unwrap();
    assert_eq!(out.points(), input.points());
    for v in out.point_data().array("flow").unwrap() {
        assert!((v[0] - 1.0).abs() < 1e-2);
        assert!((v[1] - 2.0).abs() < 1e-2);
        assert!((v[2] - 3.0).abs() < 1e-2);
    }
}

#[test]
fn vertex_lists_can_carry_the_signals() {
    let sphere = uv_sphere(&UvSphereOptions::default()).unwrap();
    let mut filter = SymmetricRecursiveFilter::new(
        ExponentialSmoothingKernel::new(0.3),
        RecursiveFilterOptions {
            extrapolation: ExtrapolationMode::Closed,
            container: SignalContainer::Verts,
            keep_signals: true,
            ..RecursiveFilterOptions::default()
        },
    );
    let out = filter.apply(&sphere).unwrap();
    // poles belong to no parallel
    assert_eq!(out.point(0).unwrap(), sphere.point(0).unwrap());
    assert_eq!(out.point(1).unwrap(), sphere.point(1).unwrap());
    assert_eq!(out.lines(), sphere.lines());
    assert_eq!(out.verts(), sphere.verts());
    assert!(out.points()[2..].iter().zip(&sphere.points()[2..]).all(|(a, b)| radial(*a) < radial(*b)));
}

#[test]
fn adaptive_kernel_follows_the_sampling() {
    let input = polygon(24);
    let mut filter = SymmetricRecursiveFilter::new(
        ExponentialSmoothingKernel::adaptive(1.0),
        options(ExtrapolationMode::Closed),
    );
    let out = filter.apply(&input).unwrap();
    let alpha = filter.kernel().current_alpha();
    assert!(alpha > 0.0 && alpha < 1.0);
    assert!(mean_radius(&out) < 1.0);
}

#[test]
fn short_cells_are_rejected() {
    let input = Mesh::from_points(vec![[0.0; 3], [1.0, 0.0, 0.0]])
        .with_lines(CellArray::from_cells([vec![0usize, 1], vec![1]]));
    let mut filter = SymmetricRecursiveFilter::new(
        ConstantKernel::default(),
        options(ExtrapolationMode::Closed),
    );
    assert_eq!(
        filter.apply(&input),
        Err(MeshError::DegenerateCell {
            cell: 1,
            len: 1,
            min: 2
        })
    );
}

#[test]
fn out_of_range_cells_are_rejected() {
    let input = Mesh::from_points(vec![[0.0; 3], [1.0, 0.0, 0.0]])
        .with_lines(CellArray::from_cells([[0usize, 1, 5]]));
    let mut filter = SymmetricRecursiveFilter::new(
        ConstantKernel::default(),
        options(ExtrapolationMode::Sphere),
    );
    let err = filter.apply(&input).unwrap_err();
    assert_eq!(
        err,
        MeshError::PointIndexOutOfRange {
            cell: 0,
            point: 5,
            n_points: 2
        }
    );
}

#[test]
fn zero_length_start_has_no_companion() {
    let input = Mesh::from_points(vec![[0.0; 3], [1.0, 0.0, 0.0]])
        .with_lines(CellArray::from_cells([[0usize, 0, 1]]));
    let mut filter = SymmetricRecursiveFilter::new(
        ConstantKernel::default(),
        options(ExtrapolationMode::Sphere),
    );
    assert_eq!(
        filter.apply(&input),
        Err(MeshError::MissingCompanion { cell: 0, pole: 0 })
    );
}

#[test]
fn missing_vectors_are_reported() {
    let input = polygon(6);
    let mut filter = SymmetricRecursiveFilter::new(
        ConstantKernel::default(),
        RecursiveFilterOptions {
            source: SignalSource::Vectors,
            ..RecursiveFilterOptions::default()
        },
    );
    assert!(matches!(
        filter.apply(&input),
        Err(MeshError::MissingPointArray(_))
    ));

    filter.options_mut().vector_array = Some("nope".into());
    assert_eq!(
        filter.apply(&input),
        Err(MeshError::MissingPointArray("nope".into()))
    );
}

#[test]
fn corrupt_offsets_are_an_error_not_a_panic() {
    let mut value = serde_json::to_value(polygon(6)).unwrap();
    value["lines"]["offsets"] = serde_json::json!([0, 50]);
    let corrupt: Mesh = serde_json::from_value(value).unwrap();

    let mut filter = SymmetricRecursiveFilter::new(
        ConstantKernel::default(),
        options(ExtrapolationMode::Closed),
    );
    assert!(matches!(
        filter.apply(&corrupt),
        Err(MeshError::InvalidParameter(_))
    ));

    let field = FnField::new(|p: Vec3| p);
    let mut engine = IterativeEngine::new(DeformationStep::default());
    assert!(matches!(
        engine.request_iterations(1, Some(&corrupt), Some(&field)),
        Err(MeshError::InvalidParameter(_))
    ));
}
