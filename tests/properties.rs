use iterative_mesh::algs::brownian::brownian_vectors;
use iterative_mesh::algs::transform::warp;
use iterative_mesh::data::mesh::Mesh;
use iterative_mesh::geometry;
use iterative_mesh::topology::companion::{CellSide, ExtrapolationMode, map_curve_coordinate};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

proptest! {
    #[test]
    fn closed_mapping_is_periodic(n in 2usize..64, closed in any::<bool>(), k in -1000i64..1000) {
        let period = if closed { n - 1 } else { n } as i64;
        let a = map_curve_coordinate(ExtrapolationMode::Closed, n, n, closed, k);
        let b = map_curve_coordinate(ExtrapolationMode::Closed, n, n, closed, k + period);
        prop_assert_eq!(a, b);
        prop_assert!(a.index < n);
    }

    #[test]
    fn sphere_mapping_stays_in_bounds(n in 2usize..40, m in 2usize..40, k in -500i64..500) {
        let pos = map_curve_coordinate(ExtrapolationMode::Sphere, n, m, false, k);
        match pos.side {
            CellSide::Origin => prop_assert!(pos.index < n),
            CellSide::Companion => prop_assert!(pos.index < m),
        }
        if (0..n as i64).contains(&k) {
            prop_assert_eq!(pos.side, CellSide::Origin);
            prop_assert_eq!(pos.index, k as usize);
        }
    }

    #[test]
    fn sphere_mapping_repeats_forward(n in 2usize..40, m in 2usize..40, k in 0i64..500) {
        let a = map_curve_coordinate(ExtrapolationMode::Sphere, n, m, false, k);
        let b = map_curve_coordinate(ExtrapolationMode::Sphere, n, m, false, k + 2 * n as i64);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn zero_scale_warp_is_identity(
        points in prop::collection::vec(prop::array::uniform3(-1e6f64..1e6), 1..32),
        seed in any::<u64>(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let vectors = brownian_vectors(points.len(), 0.0, 10.0, &mut rng).unwrap();
        let mesh = Mesh::from_points(points).with_vectors("v", vectors).unwrap();
        let out = warp(&mesh, None, 0.0).unwrap();
        prop_assert_eq!(out.points(), mesh.points());
    }

    #[test]
    fn brownian_speeds_respect_bounds(lo in 0.0f64..5.0, span in 0.0f64..5.0, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let hi = lo + span;
        for v in brownian_vectors(16, lo, hi, &mut rng).unwrap() {
            let speed = geometry::norm(v);
            prop_assert!(speed >= lo - 1e-9 && speed <= hi + 1e-9, "speed {} outside [{}, {}]", speed, lo, hi);
        }
    }
}
