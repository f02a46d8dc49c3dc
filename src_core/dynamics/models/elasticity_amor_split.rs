use crate::math::{Real, Voigt};
use na::vector;

/// Small-strain plane-strain elasticity with the volumetric/deviatoric split of
/// Amor et al. (2009).
///
/// Only the tensile volumetric part and the deviatoric part of the elastic
/// energy are degraded by the phase field. Compressive volumetric energy is
/// never degraded, so cracks do not interpenetrate under compression.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AmorSplitElasticity {
    pub bulk_modulus: Real,
    pub shear_modulus: Real,
    /// Residual stiffness `k` kept by a fully broken material.
    pub residual_stiffness: Real,
}

/// Decomposition of a strain state used by both the stress and the energy.
struct SplitStrain {
    trace_pos: Real,
    trace_neg: Real,
    // Deviatoric strain, in-plane tensor components plus the out-of-plane one.
    dev_xx: Real,
    dev_yy: Real,
    dev_zz: Real,
    dev_xy: Real,
}

impl SplitStrain {
    fn new(strain: &Voigt<Real>) -> Self {
        let trace = strain.x + strain.y;
        let third = trace / 3.0;

        Self {
            trace_pos: 0.5 * (trace + trace.abs()),
            trace_neg: 0.5 * (trace - trace.abs()),
            dev_xx: strain.x - third,
            dev_yy: strain.y - third,
            dev_zz: -third,
            dev_xy: 0.5 * strain.z,
        }
    }

    fn dev_squared_norm(&self) -> Real {
        self.dev_xx * self.dev_xx
            + self.dev_yy * self.dev_yy
            + self.dev_zz * self.dev_zz
            + 2.0 * self.dev_xy * self.dev_xy
    }
}

impl AmorSplitElasticity {
    pub fn new(young_modulus: Real, poisson_ratio: Real, residual_stiffness: Real) -> Self {
        Self {
            bulk_modulus: crate::utils::bulk_modulus(young_modulus, poisson_ratio),
            shear_modulus: crate::utils::shear_modulus(young_modulus, poisson_ratio),
            residual_stiffness,
        }
    }

    pub fn from_moduli(bulk_modulus: Real, shear_modulus: Real, residual_stiffness: Real) -> Self {
        Self {
            bulk_modulus,
            shear_modulus,
            residual_stiffness,
        }
    }

    /// The degradation function `g(c) = (1 - k) c² + k`.
    #[inline]
    pub fn degradation(&self, phase: Real) -> Real {
        (1.0 - self.residual_stiffness) * phase * phase + self.residual_stiffness
    }

    /// Stress `[σxx, σyy, σxy]` for the engineering strain `[εxx, εyy, γxy]`.
    pub fn stress(&self, phase: Real, strain: &Voigt<Real>) -> Voigt<Real> {
        let split = SplitStrain::new(strain);
        let g = self.degradation(phase);
        let k = self.bulk_modulus;
        let mu = self.shear_modulus;

        vector![
            g * (k * split.trace_pos + 2.0 * mu * split.dev_xx) + k * split.trace_neg,
            g * (k * split.trace_pos + 2.0 * mu * split.dev_yy) + k * split.trace_neg,
            g * 2.0 * mu * split.dev_xy
        ]
    }

    /// Energy density driving the fracture: tensile volumetric plus deviatoric.
    pub fn pos_energy(&self, strain: &Voigt<Real>) -> Real {
        let split = SplitStrain::new(strain);
        0.5 * self.bulk_modulus * split.trace_pos * split.trace_pos
            + self.shear_modulus * split.dev_squared_norm()
    }

    /// Energy density that is never degraded.
    pub fn neg_energy(&self, strain: &Voigt<Real>) -> Real {
        let split = SplitStrain::new(strain);
        0.5 * self.bulk_modulus * split.trace_neg * split.trace_neg
    }

    pub fn elastic_energy_density(&self, phase: Real, strain: &Voigt<Real>) -> Real {
        self.degradation(phase) * self.pos_energy(strain) + self.neg_energy(strain)
    }

    /// Irreversibility condition: the history never decreases.
    #[inline]
    pub fn update_history(&self, history: Real, strain: &Voigt<Real>) -> Real {
        history.max(self.pos_energy(strain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Real = 2.0e7;
    const NU: Real = 0.3;

    fn model() -> AmorSplitElasticity {
        AmorSplitElasticity::new(E, NU, 1.0e-3)
    }

    fn linear_elastic_stress(strain: &Voigt<Real>) -> Voigt<Real> {
        let (lambda, mu) = crate::utils::lame_lambda_mu(E, NU);
        let tr = strain.x + strain.y;
        vector![
            lambda * tr + 2.0 * mu * strain.x,
            lambda * tr + 2.0 * mu * strain.y,
            mu * strain.z
        ]
    }

    fn assert_relative_eq(a: &Voigt<Real>, b: &Voigt<Real>) {
        let scale = b.norm().max(1.0);
        assert!((a - b).norm() / scale < 1.0e-10, "{} != {}", a, b);
    }

    #[test]
    fn intact_material_is_linear_elastic() {
        let m = model();
        for strain in [
            vector![1.0e-3, -2.0e-4, 5.0e-4],
            vector![-1.0e-3, -3.0e-4, 0.0],
            vector![0.0, 0.0, 2.0e-3],
        ] {
            assert_relative_eq(&m.stress(1.0, &strain), &linear_elastic_stress(&strain));
        }
    }

    #[test]
    fn broken_material_keeps_the_residual_stiffness_in_tension() {
        let m = model();
        let strain = vector![1.0e-3, 4.0e-4, 3.0e-4];
        let expected = linear_elastic_stress(&strain) * m.residual_stiffness;
        assert_relative_eq(&m.stress(0.0, &strain), &expected);
    }

    #[test]
    fn compression_is_not_degraded() {
        let m = model();
        let strain = vector![-1.0e-3, -1.0e-3, 0.0];
        let intact = m.stress(1.0, &strain);
        let broken = m.stress(0.0, &strain);

        // Equibiaxial compression still has an out-of-plane deviatoric part.
        let mean_intact = 0.5 * (intact.x + intact.y);
        let mean_broken = 0.5 * (broken.x + broken.y);
        assert!(mean_broken < 0.0);
        assert!(mean_broken.abs() > 0.5 * mean_intact.abs());
        assert!(m.pos_energy(&vector![-1.0e-3, 0.0, 0.0]) > 0.0);
        assert_eq!(m.neg_energy(&vector![1.0e-3, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn energy_vanishes_without_strain() {
        let m = model();
        assert_eq!(m.pos_energy(&Voigt::zeros()), 0.0);
        assert_eq!(m.stress(0.3, &Voigt::zeros()), Voigt::zeros());
    }

    #[test]
    fn history_never_decreases() {
        let m = model();
        let mut rng = oorandom::Rand64::new(42);
        let mut history = 0.0;

        for _ in 0..100 {
            let strain = vector![
                (rng.rand_float() as Real - 0.5) * 1.0e-3,
                (rng.rand_float() as Real - 0.5) * 1.0e-3,
                (rng.rand_float() as Real - 0.5) * 1.0e-3
            ];
            let new_history = m.update_history(history, &strain);
            assert!(new_history >= history);
            assert!(new_history >= m.pos_energy(&strain));
            history = new_history;
        }
    }

    #[test]
    fn intact_energy_is_half_stress_times_strain() {
        let m = model();
        let strain = vector![8.0e-4, -1.0e-4, 3.0e-4];
        let stress = m.stress(1.0, &strain);
        let expected = 0.5 * stress.dot(&strain);
        let energy = m.elastic_energy_density(1.0, &strain);
        assert!((energy - expected).abs() < 1.0e-10 * expected.abs());
        assert!(m.elastic_energy_density(0.0, &strain) < energy);
    }

    #[test]
    fn degradation_bounds() {
        let m = model();
        assert!((m.degradation(1.0) - 1.0).abs() < 1.0e-12);
        assert_eq!(m.degradation(0.0), m.residual_stiffness);
    }
}
