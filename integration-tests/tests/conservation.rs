use approx::{assert_abs_diff_eq, assert_relative_eq};
use integration_tests::{closed_box, simulation, swirl, total_mass};
use lbm2d_core::{FluidField, Topology};
use lbm2d_solvers::{CollisionModel, boundary::BouncebackScheme};

const CASES: [(CollisionModel, BouncebackScheme); 4] = [
    (CollisionModel::Bgk, BouncebackScheme::FullWay),
    (CollisionModel::Bgk, BouncebackScheme::HalfWay),
    (CollisionModel::Mrt, BouncebackScheme::FullWay),
    (CollisionModel::Mrt, BouncebackScheme::HalfWay),
];

#[test]
fn closed_boxes_conserve_mass_on_non_square_grids() {
    for (nx, ny) in [(9, 5), (5, 9)] {
        for (model, scheme) in CASES {
            let topology = Topology::d2q9(nx, ny, 1.0, 1.0).unwrap();
            let mut sim = simulation(&topology, model, 1.0 / 6.0, swirl(&topology, 0.005));
            sim.add_boundary(closed_box(&topology, scheme)).unwrap();
            let mass = total_mass(&sim);

            sim.run_unobserved(200).unwrap();

            assert_relative_eq!(total_mass(&sim), mass, epsilon = 1e-10);
            assert!(
                sim.field().velocity.iter().flatten().all(|u| u.is_finite()),
                "{nx} x {ny} {model:?} {scheme:?}"
            );
        }
    }
}

#[test]
fn swirl_decays_in_a_closed_box() {
    for (model, scheme) in CASES {
        let topology = Topology::d2q9(9, 9, 1.0, 1.0).unwrap();
        let mut sim = simulation(&topology, model, 1.0 / 6.0, swirl(&topology, 0.005));
        sim.add_boundary(closed_box(&topology, scheme)).unwrap();
        let initial = sim.field().max_speed();

        sim.run_unobserved(300).unwrap();

        assert!(
            sim.field().max_speed() < 0.5 * initial,
            "{model:?} {scheme:?}: {} vs {initial}",
            sim.field().max_speed()
        );
    }
}

#[test]
fn fluid_at_rest_in_a_closed_box_stays_at_rest() {
    for (model, scheme) in CASES {
        let topology = Topology::d2q9(6, 4, 1.0, 1.0).unwrap();
        let mut sim = simulation(&topology, model, 0.1, FluidField::uniform(&topology, [0.0, 0.0]));
        sim.add_boundary(closed_box(&topology, scheme)).unwrap();

        sim.run_unobserved(50).unwrap();

        for (rho, u) in sim.density().iter().zip(&sim.field().velocity) {
            assert_relative_eq!(*rho, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(u[0], 0.0, epsilon = 1e-14);
            assert_abs_diff_eq!(u[1], 0.0, epsilon = 1e-14);
        }
    }
}
