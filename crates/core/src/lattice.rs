//! The D2Q9 discrete velocity set.
//!
//! Nine velocity directions on a 2D square lattice:
//!
//! ```text
//!   6   2   5     ^ y
//!    \  |  /      |
//!   3 - 0 - 1     |
//!    /  |  \      |       x
//!   7   4   8     +------->
//! ```
//!
//! Direction indices are exposed as constants in [`dir`] so that boundary
//! formulas read like their published form (`f[dir::NE]`, `f[dir::SW]`).

/// Number of discrete directions.
pub const Q: usize = 9;

/// Distribution function values of a single node, one per direction.
pub type Distribution = [f64; Q];

/// Direction indices into a [`Distribution`].
pub mod dir {
    pub const REST: usize = 0;
    pub const E: usize = 1;
    pub const N: usize = 2;
    pub const W: usize = 3;
    pub const S: usize = 4;
    pub const NE: usize = 5;
    pub const NW: usize = 6;
    pub const SW: usize = 7;
    pub const SE: usize = 8;
}

/// Unit velocity vectors, before scaling by the lattice speed.
pub const UNIT_VELOCITIES: [[f64; 2]; Q] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [-1.0, 0.0],
    [0.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
    [-1.0, -1.0],
    [1.0, -1.0],
];

/// Integer offsets to the neighbor each direction points at.
pub const OFFSETS: [[isize; 2]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

/// Quadrature weights, summing to one.
pub const WEIGHTS: [f64; Q] = [
    16.0 / 36.0,
    4.0 / 36.0,
    4.0 / 36.0,
    4.0 / 36.0,
    4.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// Index of the direction opposite to each direction.
pub const OPPOSITE: [usize; Q] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

/// Transform from distribution space to moment space.
///
/// Rows: density, energy, energy squared, x-momentum, x-energy flux,
/// y-momentum, y-energy flux, and the two stress components.
pub const M: [[f64; Q]; Q] = [
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    [-4.0, -1.0, -1.0, -1.0, -1.0, 2.0, 2.0, 2.0, 2.0],
    [4.0, -2.0, -2.0, -2.0, -2.0, 1.0, 1.0, 1.0, 1.0],
    [0.0, 1.0, 0.0, -1.0, 0.0, 1.0, -1.0, -1.0, 1.0],
    [0.0, -2.0, 0.0, 2.0, 0.0, 1.0, -1.0, -1.0, 1.0],
    [0.0, 0.0, 1.0, 0.0, -1.0, 1.0, 1.0, -1.0, -1.0],
    [0.0, 0.0, -2.0, 0.0, 2.0, 1.0, 1.0, -1.0, -1.0],
    [0.0, 1.0, -1.0, 1.0, -1.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, -1.0, 1.0, -1.0],
];

/// Inverse of [`M`].
pub const M_INV: [[f64; Q]; Q] = [
    [1.0 / 9.0, -4.0 / 36.0, 4.0 / 36.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 9.0, -1.0 / 36.0, -2.0 / 36.0, 1.0 / 6.0, -2.0 / 12.0, 0.0, 0.0, 1.0 / 4.0, 0.0],
    [1.0 / 9.0, -1.0 / 36.0, -2.0 / 36.0, 0.0, 0.0, 1.0 / 6.0, -2.0 / 12.0, -1.0 / 4.0, 0.0],
    [1.0 / 9.0, -1.0 / 36.0, -2.0 / 36.0, -1.0 / 6.0, 2.0 / 12.0, 0.0, 0.0, 1.0 / 4.0, 0.0],
    [1.0 / 9.0, -1.0 / 36.0, -2.0 / 36.0, 0.0, 0.0, -1.0 / 6.0, 2.0 / 12.0, -1.0 / 4.0, 0.0],
    [1.0 / 9.0, 2.0 / 36.0, 1.0 / 36.0, 1.0 / 6.0, 1.0 / 12.0, 1.0 / 6.0, 1.0 / 12.0, 0.0, 1.0 / 4.0],
    [1.0 / 9.0, 2.0 / 36.0, 1.0 / 36.0, -1.0 / 6.0, -1.0 / 12.0, 1.0 / 6.0, 1.0 / 12.0, 0.0, -1.0 / 4.0],
    [1.0 / 9.0, 2.0 / 36.0, 1.0 / 36.0, -1.0 / 6.0, -1.0 / 12.0, -1.0 / 6.0, -1.0 / 12.0, 0.0, 1.0 / 4.0],
    [1.0 / 9.0, 2.0 / 36.0, 1.0 / 36.0, 1.0 / 6.0, 1.0 / 12.0, -1.0 / 6.0, -1.0 / 12.0, 0.0, -1.0 / 4.0],
];

/// The D2Q9 velocity set, scaled by a lattice speed.
///
/// The velocity vectors are scaled once, when the descriptor is built for a
/// particular topology, and are never re-derived during a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct D2Q9 {
    velocities: [[f64; 2]; Q],
    speed: f64,
}

impl D2Q9 {
    /// Creates the velocity set scaled by the lattice speed `c = dl / dt`.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        let velocities = UNIT_VELOCITIES.map(|[x, y]| [x * speed, y * speed]);
        Self { velocities, speed }
    }

    /// Returns the scaled velocity vectors.
    #[must_use]
    pub fn velocities(&self) -> &[[f64; 2]; Q] {
        &self.velocities
    }

    /// Returns the quadrature weights.
    #[must_use]
    pub fn weights(&self) -> &[f64; Q] {
        &WEIGHTS
    }

    /// Returns the lattice speed the velocities were scaled by.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Returns the squared speed of sound, `c² / 3`.
    #[must_use]
    pub fn sound_speed_sqr(&self) -> f64 {
        self.speed * self.speed / 3.0
    }

    /// Computes the equilibrium distribution for a density and velocity.
    ///
    /// Uses the second-order truncated Maxwell-Boltzmann expansion:
    /// ```text
    /// f_i^eq = w_i ρ [1 + (e_i·u)/cs² + (e_i·u)²/(2 cs⁴) − u²/(2 cs²)]
    /// ```
    #[must_use]
    pub fn equilibrium(&self, rho: f64, u: [f64; 2]) -> Distribution {
        let cs_sqr = self.sound_speed_sqr();
        let u_sqr = (u[0] * u[0] + u[1] * u[1]) / (2.0 * cs_sqr);
        std::array::from_fn(|i| {
            let [ex, ey] = self.velocities[i];
            let c_dot_u = (ex * u[0] + ey * u[1]) / cs_sqr;
            WEIGHTS[i] * rho * (1.0 + c_dot_u * (1.0 + c_dot_u / 2.0) - u_sqr)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use crate::moments::mat_vec_product;

    #[test]
    fn weights_sum_to_one() {
        assert_relative_eq!(WEIGHTS.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn opposite_directions_cancel() {
        for i in 0..Q {
            let [x, y] = UNIT_VELOCITIES[i];
            let [ox, oy] = UNIT_VELOCITIES[OPPOSITE[i]];
            assert_eq!((x + ox, y + oy), (0.0, 0.0));
            assert_eq!(OPPOSITE[OPPOSITE[i]], i);
        }
    }

    #[test]
    fn offsets_match_unit_velocities() {
        for i in 0..Q {
            let [dx, dy] = OFFSETS[i];
            #[allow(clippy::cast_precision_loss)]
            let as_float = [dx as f64, dy as f64];
            assert_eq!(as_float, UNIT_VELOCITIES[i]);
        }
    }

    #[test]
    fn moment_matrices_are_inverses() {
        for col in 0..Q {
            let mut unit = [0.0; Q];
            unit[col] = 1.0;
            let round_trip = mat_vec_product(&M_INV, &mat_vec_product(&M, &unit));
            for (row, value) in round_trip.iter().enumerate() {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(*value, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn velocities_are_scaled_by_speed() {
        let lattice = D2Q9::new(2.0);
        assert_eq!(lattice.velocities()[5], [2.0, 2.0]);
        assert_eq!(lattice.velocities()[3], [-2.0, 0.0]);
        assert_relative_eq!(lattice.sound_speed_sqr(), 4.0 / 3.0);
    }

    #[test]
    fn equilibrium_at_rest_equals_weights() {
        let lattice = D2Q9::new(1.0);
        let eq = lattice.equilibrium(1.0, [0.0, 0.0]);
        for i in 0..Q {
            assert_relative_eq!(eq[i], WEIGHTS[i]);
        }
    }

    #[test]
    fn equilibrium_recovers_density_and_momentum() {
        let lattice = D2Q9::new(1.0);
        let rho = 1.2;
        let u = [0.05, -0.02];
        let eq = lattice.equilibrium(rho, u);

        let density: f64 = eq.iter().sum();
        let momentum = eq
            .iter()
            .zip(lattice.velocities())
            .fold([0.0, 0.0], |acc, (f, e)| [acc[0] + f * e[0], acc[1] + f * e[1]]);

        assert_relative_eq!(density, rho, epsilon = 1e-12);
        assert_relative_eq!(momentum[0], rho * u[0], epsilon = 1e-12);
        assert_relative_eq!(momentum[1], rho * u[1], epsilon = 1e-12);
    }
}
