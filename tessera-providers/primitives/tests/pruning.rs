#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Bounds pruning must agree with exhaustive exact queries on real shapes,
//! including pairs whose distance sits exactly on the tolerance.
use nalgebra::{Point3, Vector3};
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use rstest::rstest;
use tessera_core::{
    Bounds, ContactMatrix, GeometryError, GeometryProvider, compute_contact_matrix,
};
use tessera_providers_primitives::{Primitive, PrimitiveAssembly, PrimitivePart};
use tessera_test_support::ci::property_test_profile::ProptestRunProfile;

/// Forwards every query but reports no bounds, so nothing is pruned.
struct Exhaustive<'a>(&'a PrimitiveAssembly);

impl GeometryProvider for Exhaustive<'_> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn name(&self) -> &str {
        self.0.name()
    }

    fn part_name(&self, index: usize) -> Option<&str> {
        self.0.part_name(index)
    }

    fn distance(&self, left: usize, right: usize) -> Result<f64, GeometryError> {
        self.0.distance(left, right)
    }

    fn bounds(&self, _index: usize) -> Option<Bounds> {
        None
    }
}

fn pruned_and_exhaustive(
    assembly: &PrimitiveAssembly,
    tolerance: f64,
) -> (ContactMatrix, ContactMatrix) {
    let pruned = compute_contact_matrix(assembly, tolerance).expect("pruned run");
    let exhaustive = compute_contact_matrix(&Exhaustive(assembly), tolerance).expect("exhaustive run");
    (pruned, exhaustive)
}

#[rstest]
#[case::sphere_then_box(
    Primitive::sphere(Point3::new(0.022, 0.0, 0.0), 2.946),
    Primitive::cuboid(Point3::new(6.558, -1.0, -1.0), Point3::new(8.0, 1.0, 1.0))
)]
#[case::box_then_sphere(
    Primitive::cuboid(Point3::new(-8.0, -1.0, -1.0), Point3::new(-6.558, 1.0, 1.0)),
    Primitive::sphere(Point3::new(-0.022, 0.0, 0.0), 2.946)
)]
fn pair_at_exact_tolerance_stays_in_contact(#[case] first: Primitive, #[case] second: Primitive) {
    let assembly = PrimitiveAssembly::new(
        "edge",
        vec![PrimitivePart::new("first", first), PrimitivePart::new("second", second)],
    );
    let tolerance = assembly.distance(0, 1).expect("distance must compute");
    let matrix = compute_contact_matrix(&assembly, tolerance).expect("matrix must compute");
    assert!(matrix.is_contact(0, 1), "pair at distance {tolerance} was dropped");
}

fn proptest_config() -> ProptestConfig {
    let profile = ProptestRunProfile::load(64, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

fn primitive() -> impl Strategy<Value = Primitive> {
    let coordinate = -20.0_f64..20.0;
    let centre = (coordinate.clone(), coordinate.clone(), coordinate)
        .prop_map(|(x, y, z)| Point3::new(x, y, z));
    (any::<bool>(), centre, 0.05_f64..4.0, 0.05_f64..4.0, 0.05_f64..4.0).prop_map(
        |(is_box, centre, a, b, c)| {
            if is_box {
                let half = Vector3::new(a, b, c);
                Primitive::cuboid(centre - half, centre + half)
            } else {
                Primitive::sphere(centre, a)
            }
        },
    )
}

fn assembly() -> impl Strategy<Value = PrimitiveAssembly> {
    prop::collection::vec(primitive(), 2..8).prop_map(|shapes| {
        let parts = shapes
            .into_iter()
            .enumerate()
            .map(|(index, shape)| PrimitivePart::new(format!("part-{index}"), shape))
            .collect();
        PrimitiveAssembly::new("generated", parts)
    })
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn pruning_matches_exhaustive_at_every_pair_distance(assembly in assembly()) {
        let size = assembly.len();
        for left in 0..size {
            for right in (left + 1)..size {
                let tolerance = assembly.distance(left, right).expect("distance must compute");
                let (pruned, exhaustive) = pruned_and_exhaustive(&assembly, tolerance);
                prop_assert!(pruned.is_contact(left, right));
                prop_assert_eq!(pruned, exhaustive);
            }
        }
    }

    #[test]
    fn pruning_matches_exhaustive_at_fixed_tolerances(
        assembly in assembly(),
        tolerance in prop_oneof![Just(0.0), 0.0_f64..10.0],
    ) {
        let (pruned, exhaustive) = pruned_and_exhaustive(&assembly, tolerance);
        prop_assert_eq!(pruned, exhaustive);
    }
}
