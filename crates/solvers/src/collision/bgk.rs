use lbm2d_core::Distribution;

/// Relaxes a node distribution linearly toward equilibrium.
///
/// ```text
/// f_i ← f_i + (f_i^eq − f_i) / τ
/// ```
pub(super) fn relax(df: &mut Distribution, eq: &Distribution, tau: f64) {
    for (f, f_eq) in df.iter_mut().zip(eq) {
        *f += (f_eq - *f) / tau;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use lbm2d_core::lattice::WEIGHTS;

    #[test]
    fn unit_tau_jumps_to_equilibrium() {
        let mut df = [0.5, 0.1, 0.0, 0.2, 0.0, 0.05, 0.05, 0.05, 0.05];
        relax(&mut df, &WEIGHTS, 1.0);
        for (f, w) in df.iter().zip(WEIGHTS) {
            assert_relative_eq!(*f, w);
        }
    }

    #[test]
    fn larger_tau_moves_part_way() {
        let mut df = [0.0; 9];
        let mut eq = [0.0; 9];
        eq[1] = 1.0;
        relax(&mut df, &eq, 2.0);
        assert_relative_eq!(df[1], 0.5);
        assert_relative_eq!(df[0], 0.0);
    }
}
