use lbm2d_core::{
    Distribution, Q,
    lattice::{M, M_INV},
    moments::mat_vec_product,
};

/// Energy mode relaxation rate.
const ENERGY_RATE: f64 = 1.6;

/// Energy-squared mode relaxation rate.
const ENERGY_SQR_RATE: f64 = 1.8;

/// Relaxation rates of the nine D2Q9 moments.
///
/// The conserved moments (density and both momentum components) have rate
/// zero. The stress moments relax at `1/τ`, which fixes the shear viscosity,
/// and the energy-flux moments at `8(2 − s_ν)/(8 − s_ν)`, which places the
/// wall of a bounceback boundary exactly halfway between nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MrtRates([f64; Q]);

impl MrtRates {
    /// Creates the relaxation rates for a BGK-equivalent relaxation time.
    #[must_use]
    pub fn new(tau: f64) -> Self {
        let s_nu = 1.0 / tau;
        let s_q = 8.0 * (2.0 - s_nu) / (8.0 - s_nu);
        Self([
            0.0,
            ENERGY_RATE,
            ENERGY_SQR_RATE,
            0.0,
            s_q,
            0.0,
            s_q,
            s_nu,
            s_nu,
        ])
    }

    /// Returns the rates in moment order.
    #[must_use]
    pub fn as_array(&self) -> &[f64; Q] {
        &self.0
    }
}

/// Returns the equilibrium moments for a node density and velocity.
pub(super) fn equilibrium_moments(rho: f64, u: [f64; 2]) -> Distribution {
    let jx = rho * u[0];
    let jy = rho * u[1];
    let j_sqr = jx * jx + jy * jy;
    [
        rho,
        -2.0 * rho + 3.0 * j_sqr,
        rho - 3.0 * j_sqr,
        jx,
        -jx,
        jy,
        -jy,
        jx * jx - jy * jy,
        jx * jy,
    ]
}

/// Relaxes a node distribution in moment space.
///
/// The distribution is transformed with `M`, each moment moves toward its
/// equilibrium at its own rate, and the result is transformed back with `M⁻¹`.
pub(super) fn relax(df: &mut Distribution, m_eq: &Distribution, rates: &MrtRates) {
    let mut m = mat_vec_product(&M, df);
    for ((m_i, m_eq_i), s_i) in m.iter_mut().zip(m_eq).zip(rates.as_array()) {
        *m_i += s_i * (m_eq_i - *m_i);
    }
    *df = mat_vec_product(&M_INV, &m);
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use lbm2d_core::D2Q9;

    #[test]
    fn rates_follow_relaxation_time() {
        let rates = MrtRates::new(1.0);
        let s = rates.as_array();
        assert_relative_eq!(s[7], 1.0);
        assert_relative_eq!(s[8], 1.0);
        assert_relative_eq!(s[4], 8.0 / 7.0);
        assert_relative_eq!(s[6], s[4]);
        assert_relative_eq!(s[1], 1.6);
        assert_relative_eq!(s[2], 1.8);
        assert_eq!([s[0], s[3], s[5]], [0.0; 3]);
    }

    #[test]
    fn equilibrium_distribution_maps_to_equilibrium_moments() {
        let lattice = D2Q9::new(1.0);
        let rho = 1.0;
        let u = [0.04, -0.03];
        let m = mat_vec_product(&M, &lattice.equilibrium(rho, u));
        let m_eq = equilibrium_moments(rho, u);

        // The moment equilibria are the incompressible form, exact at unit density.
        for i in 0..Q {
            assert_abs_diff_eq!(m[i], m_eq[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn relaxation_conserves_mass_and_momentum() {
        let mut df = [0.4, 0.12, 0.1, 0.11, 0.1, 0.03, 0.025, 0.028, 0.031];
        let lattice = D2Q9::new(1.0);
        let rho: f64 = df.iter().sum();
        let [jx, jy] = lbm2d_core::moments::first_moment(&df, lattice.velocities());
        let m_eq = equilibrium_moments(rho, [jx / rho, jy / rho]);

        relax(&mut df, &m_eq, &MrtRates::new(0.8));

        let [jx_after, jy_after] = lbm2d_core::moments::first_moment(&df, lattice.velocities());
        assert_relative_eq!(df.iter().sum::<f64>(), rho, epsilon = 1e-12);
        assert_abs_diff_eq!(jx_after, jx, epsilon = 1e-12);
        assert_abs_diff_eq!(jy_after, jy, epsilon = 1e-12);
    }
}
