use crate::math::{Real, Vector};

/// CFL-like bound based on the elastic wave speed `c = sqrt(E / rho)`.
///
/// The bound ignores stiffness loss due to damage, so it only becomes more
/// conservative as the material breaks.
#[derive(Copy, Clone, Debug)]
pub struct ElasticitySoundSpeedTimestepBound {
    pub alpha: Real,
    pub young_modulus: Real,
}

impl ElasticitySoundSpeedTimestepBound {
    pub fn new(alpha: Real, young_modulus: Real) -> Self {
        Self {
            alpha,
            young_modulus,
        }
    }

    pub fn wave_speed(&self, density0: Real) -> Real {
        crate::utils::bar_wave_speed(self.young_modulus, density0)
    }

    /// `alpha * cell_width / c`, independent of the particle motion.
    pub fn fixed_timestep(&self, density0: Real, min_cell_width: Real) -> Real {
        self.alpha * min_cell_width / self.wave_speed(density0)
    }

    /// Same as [`Self::fixed_timestep`], but also limited by the particle speed.
    pub fn timestep_bound(
        &self,
        density0: Real,
        velocity: &Vector<Real>,
        min_cell_width: Real,
    ) -> Real {
        let max_denom = velocity.norm().max(self.wave_speed(density0));
        self.alpha * min_cell_width / max_denom
    }
}
