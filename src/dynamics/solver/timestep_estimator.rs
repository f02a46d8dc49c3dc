use super::ExplicitSolver;
use crate::core::dynamics::models::MaterialParameters;
use crate::core::dynamics::timestep::ElasticitySoundSpeedTimestepBound;
use crate::dynamics::solver::SolverParameters;
use crate::dynamics::ParticleSet;
use crate::error::{Result, SimulationError};
use crate::geometry::Grid;
use crate::math::Real;
use ordered_float::NotNan;
use rayon::prelude::*;

impl ExplicitSolver {
    /// The timestep used for the whole run.
    ///
    /// Either the explicit `params.dt`, or a fraction `params.cfl_coeff` of the
    /// time an elastic wave of the deformable material needs to cross the
    /// smallest grid cell.
    pub fn fixed_timestep_length(
        params: &SolverParameters,
        material: &MaterialParameters,
        grid: &Grid,
    ) -> Result<Real> {
        let dt = match params.dt {
            Some(dt) => dt,
            None => ElasticitySoundSpeedTimestepBound::new(params.cfl_coeff, material.young_modulus)
                .fixed_timestep(material.density, grid.min_cell_size()),
        };

        if dt <= 0.0 || !dt.is_finite() {
            return Err(SimulationError::InvalidConfig(format!(
                "the timestep length must be positive, got {}",
                dt
            )));
        }

        Ok(dt)
    }

    /// Smallest sound-speed and velocity based timestep bound over the
    /// deformable particles. Only used for diagnostics.
    pub fn stable_timestep_bound(
        params: &SolverParameters,
        grid: &Grid,
        particles: &ParticleSet,
    ) -> Real {
        let cell_width = grid.min_cell_size();

        particles
            .particles()
            .par_iter()
            .filter(|particle| particle.is_deformable())
            .filter_map(|particle| {
                let bound = ElasticitySoundSpeedTimestepBound::new(
                    params.cfl_coeff,
                    particle.young_modulus,
                );
                NotNan::new(bound.timestep_bound(
                    particle.density0(),
                    &particle.velocity,
                    cell_width,
                ))
                .ok()
            })
            .min()
            .map(NotNan::into_inner)
            .unwrap_or(Real::MAX)
    }
}
