//! Property-based tests for the geometry kernel.
//!
//! Run with: cargo test -p field-types -- proptest

use field_types::{
    Line, Point3, Triangle, Vector3, align_vector, barycentric_coordinates,
    barycentric_to_cartesian,
};
use proptest::prelude::*;

fn arb_vector() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-10.0..10.0f64).prop_map(|[x, y, z]| Vector3::new(x, y, z))
}

fn arb_triangle() -> impl Strategy<Value = Triangle> {
    prop::array::uniform6(-10.0..10.0f64).prop_filter_map("degenerate", |c| {
        let tri = Triangle::new(
            Point3::new(c[0], c[1], 0.0),
            Point3::new(c[2], c[3], 0.0),
            Point3::new(c[4], c[5], 0.0),
        );
        (tri.barycentric_denominator().abs() > 1e-3).then_some(tri)
    })
}

/// Random convex weights, used to build interior points.
fn arb_weights() -> impl Strategy<Value = [f64; 3]> {
    (0.0..1.0f64, 0.0..1.0f64).prop_map(|(u, v)| {
        let (u, v) = if u + v > 1.0 { (1.0 - u, 1.0 - v) } else { (u, v) };
        [u, v, 1.0 - u - v]
    })
}

proptest! {
    #[test]
    fn proptest_aligned_vector_points_along_reference(v in arb_vector(), r in arb_vector()) {
        let a = align_vector(&v, &r);
        prop_assert!(a.dot(&r) >= 0.0);
    }

    #[test]
    fn proptest_alignment_is_sign_insensitive(v in arb_vector(), r in arb_vector()) {
        let pos = align_vector(&v, &r);
        let neg = align_vector(&-v, &r);
        // Orthogonal inputs keep their own sign, so equality holds only off ties.
        if v.dot(&r).abs() > 1e-12 {
            prop_assert!((pos - neg).norm() < 1e-12);
        }
    }

    #[test]
    fn proptest_barycentric_round_trip(tri in arb_triangle(), w in arb_weights()) {
        let p = barycentric_to_cartesian(&w, &tri);
        let bars = barycentric_coordinates(&p, &tri, false).unwrap();
        prop_assert!((bars.iter().sum::<f64>() - 1.0).abs() < 1e-9);

        let back = barycentric_to_cartesian(&bars, &tri);
        prop_assert!((back - p).norm() < 1e-6);
        prop_assert!(tri.contains(&p).unwrap());
    }

    #[test]
    fn proptest_line_is_sign_invariant(v in arb_vector()) {
        prop_assume!(v.norm() > 1e-6);
        let a = Line::new(&v).unwrap();
        let b = Line::new(&-v).unwrap();
        prop_assert!((a.direction() - b.direction()).norm() < 1e-12);
        prop_assert!(a.distance(&b) < 1e-9);
    }
}
